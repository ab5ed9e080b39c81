// File: crates/dash-core/src/view.rs
// Summary: ViewAdapter trait shared by every linked view, plus the gesture vocabulary.

use std::sync::Arc;

use crate::dataset::YearRange;
use crate::error::{DashError, Result};
use crate::frame::{ViewFrame, ViewKind};
use crate::geometry::{PixelInterval, PixelRect};
use crate::row::{Dataset, KeySet};
use crate::selection::{SelectionEvent, SelectionMode, ViewId};

/// Raw pointer gesture, in plot-local pixels.
#[derive(Clone, Debug, PartialEq)]
pub enum Gesture {
    /// 1-D brush drag; `None` is an empty drag. `finished` marks pointer release.
    Span { region: Option<PixelInterval>, finished: bool },
    /// 2-D brush drag; `None` is an empty drag.
    Rect { region: Option<PixelRect>, finished: bool },
    /// Click on a map region by code; `None` is a click on empty space.
    Click { code: Option<String> },
}

impl Gesture {
    pub fn name(&self) -> &'static str {
        match self {
            Gesture::Span { .. } => "span brush",
            Gesture::Rect { .. } => "rectangle brush",
            Gesture::Click { .. } => "click",
        }
    }
}

/// One chart's half of the linking contract: turn gestures into candidate
/// selections, and turn imposed highlight sets into local visual state.
pub trait ViewAdapter {
    fn id(&self) -> &ViewId;
    fn kind(&self) -> ViewKind;
    fn mode(&self) -> SelectionMode;
    /// Keys the view currently shows as selected (empty when mode is `None`).
    fn local_keys(&self) -> KeySet;
    /// True while a brush overlay region is visible.
    fn overlay_active(&self) -> bool { false }
    fn required_metrics(&self) -> Vec<&str>;

    /// Recompute snapshot, scales and bins for `range` (`None` = all years).
    fn rebuild(&mut self, dataset: &Arc<Dataset>, range: Option<YearRange>) -> Result<()>;

    /// Returns the selection to publish, if the gesture produced one.
    fn handle_gesture(&mut self, gesture: Gesture) -> Result<Option<SelectionEvent>>;

    /// Adopt a highlight set chosen elsewhere; clears any geometric overlay.
    fn apply_external_highlight(&mut self, keys: &KeySet);

    /// Returns `false` when the dimensions are unchanged and nothing was recomputed.
    fn resize(&mut self, width: f64, height: f64) -> bool;

    /// Switch the displayed metric; single-metric views only.
    fn set_metric(&mut self, _dataset: &Arc<Dataset>, _range: Option<YearRange>, _metric: &str) -> Result<()> {
        Err(DashError::Unsupported { view: self.id().clone(), what: "metric switching" })
    }

    fn frame(&self) -> ViewFrame;
}
