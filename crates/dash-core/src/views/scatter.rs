// File: crates/dash-core/src/views/scatter.rs
// Summary: Scatterplot adapter: rectangle brush -> entity keys, one point per entity-year.

use std::sync::Arc;

use crate::brush::{to_data_region, to_pixel_rect};
use crate::dataset::{DatasetIndex, DatasetSnapshot, YearRange};
use crate::error::{DashError, Result};
use crate::frame::{Axis, Mark, OverlayShape, ViewFrame, ViewKind};
use crate::geometry::{DataRegion, PixelRect};
use crate::row::{Dataset, EntityKey, KeySet};
use crate::scale::{LinearScale, AXIS_TICKS};
use crate::selection::{
    BrushOverlay, Emphasis, Origin, OverlayEvent, Selection, SelectionEvent, SelectionMode, ViewId,
};
use crate::types::Viewport;
use crate::view::{Gesture, ViewAdapter};

pub struct ScatterView {
    id: ViewId,
    x_metric: String,
    y_metric: String,
    viewport: Viewport,
    snapshot: Option<DatasetSnapshot>,
    x: LinearScale,
    y: LinearScale,
    selection: Selection<DataRegion>,
    overlay: BrushOverlay<PixelRect>,
}

impl ScatterView {
    pub fn new(id: impl Into<ViewId>, x_metric: impl Into<String>, y_metric: impl Into<String>, viewport: Viewport) -> Self {
        let (xr, yr) = Self::ranges(&viewport);
        Self {
            id: id.into(),
            x_metric: x_metric.into(),
            y_metric: y_metric.into(),
            viewport,
            snapshot: None,
            x: LinearScale::fallback(xr),
            y: LinearScale::fallback(yr),
            selection: Selection::None,
            overlay: BrushOverlay::default(),
        }
    }

    // y is inverted so larger values sit higher on screen
    fn ranges(vp: &Viewport) -> ((f64, f64), (f64, f64)) {
        ((0.0, vp.plot_width()), (vp.plot_height(), 0.0))
    }

    pub fn x_scale(&self) -> &LinearScale { &self.x }
    pub fn y_scale(&self) -> &LinearScale { &self.y }
    pub fn selection(&self) -> &Selection<DataRegion> { &self.selection }
    pub fn overlay(&self) -> Option<&PixelRect> { self.overlay.region() }

    fn rescale(&mut self) {
        let (xr, yr) = Self::ranges(&self.viewport);
        match &self.snapshot {
            Some(s) if !s.is_empty() => {
                self.x = LinearScale::from_values(s.values(&self.x_metric), xr, AXIS_TICKS);
                self.y = LinearScale::from_values(s.values(&self.y_metric), yr, AXIS_TICKS);
            }
            _ => {
                self.x = LinearScale::fallback(xr);
                self.y = LinearScale::fallback(yr);
            }
        }
    }

    /// Keys of entities with at least one point inside `region`.
    fn keys_in(&self, region: &DataRegion) -> KeySet {
        let Some(snapshot) = &self.snapshot else { return KeySet::new() };
        snapshot
            .rows()
            .filter(|r| match (r.metric(&self.x_metric), r.metric(&self.y_metric)) {
                (Some(x), Some(y)) => region.contains(x, y),
                _ => false,
            })
            .map(|r| r.key())
            .collect()
    }

    pub fn on_gesture_select(&mut self, rect: PixelRect) -> SelectionEvent {
        let region = to_data_region(&self.x, &self.y, rect);
        let keys = self.keys_in(&region);
        tracing::debug!(view = %self.id, selected = keys.len(), "scatter brush");
        self.selection = Selection::Geometric { region, keys: keys.clone() };
        SelectionEvent::from_gesture(self.id.clone(), keys)
    }

    pub fn on_gesture_clear(&mut self) -> SelectionEvent {
        self.selection = Selection::None;
        SelectionEvent::from_gesture(self.id.clone(), KeySet::new())
    }

    fn handle_overlay(&mut self, event: OverlayEvent<PixelRect>) -> Option<SelectionEvent> {
        if event.origin == Origin::Programmatic {
            tracing::trace!(view = %self.id, "ignoring programmatic overlay move");
            return None;
        }
        Some(match event.region {
            Some(rect) => self.on_gesture_select(rect),
            None => self.on_gesture_clear(),
        })
    }

    /// Put the overlay where the geometric selection's data region now maps to,
    /// or clear it when there is no geometric selection.
    fn sync_overlay(&mut self) {
        let target = self.selection.region().map(|r| to_pixel_rect(&self.x, &self.y, *r));
        let event = self.overlay.move_to(target, Origin::Programmatic, true);
        let echoed = self.handle_overlay(event);
        debug_assert!(echoed.is_none());
    }

    fn point_emphasis(&self, key: &EntityKey, x: f64, y: f64) -> Emphasis {
        Emphasis::from_bool(match &self.selection {
            Selection::None => true,
            Selection::Geometric { region, .. } => region.contains(x, y),
            Selection::EntityDriven(keys) => keys.contains(key),
        })
    }
}

impl ViewAdapter for ScatterView {
    fn id(&self) -> &ViewId { &self.id }
    fn kind(&self) -> ViewKind { ViewKind::Scatter }
    fn mode(&self) -> SelectionMode { self.selection.mode() }
    fn local_keys(&self) -> KeySet { self.selection.keys() }
    fn overlay_active(&self) -> bool { self.overlay.is_active() }
    fn required_metrics(&self) -> Vec<&str> { vec![self.x_metric.as_str(), self.y_metric.as_str()] }

    fn rebuild(&mut self, dataset: &Arc<Dataset>, range: Option<YearRange>) -> Result<()> {
        let snapshot = DatasetIndex::build(dataset, range, &self.required_metrics())?;
        self.snapshot = Some(snapshot);
        self.rescale();
        self.sync_overlay();
        Ok(())
    }

    fn handle_gesture(&mut self, gesture: Gesture) -> Result<Option<SelectionEvent>> {
        match gesture {
            Gesture::Rect { region, finished } => {
                let event = self.overlay.move_to(region, Origin::User, finished);
                Ok(self.handle_overlay(event))
            }
            other => Err(DashError::Unsupported { view: self.id.clone(), what: other.name() }),
        }
    }

    fn apply_external_highlight(&mut self, keys: &KeySet) {
        self.selection = Selection::external(keys);
        self.sync_overlay();
    }

    fn resize(&mut self, width: f64, height: f64) -> bool {
        if !self.viewport.resize(width, height) {
            return false;
        }
        self.rescale();
        self.sync_overlay();
        true
    }

    fn frame(&self) -> ViewFrame {
        let marks = self
            .snapshot
            .iter()
            .flat_map(|s| s.rows())
            .filter_map(|r| {
                let (xv, yv) = (r.metric(&self.x_metric)?, r.metric(&self.y_metric)?);
                let key = r.key();
                let emphasis = self.point_emphasis(&key, xv, yv);
                Some(Mark::Point { key, year: r.year, x: self.x.map(xv), y: self.y.map(yv), emphasis })
            })
            .collect();
        ViewFrame {
            view: self.id.clone(),
            kind: ViewKind::Scatter,
            viewport: self.viewport,
            x_axis: Some(Axis::new(self.x_metric.clone(), self.x.domain())),
            y_axis: Some(Axis::new(self.y_metric.clone(), self.y.domain())),
            marks,
            overlay: self.overlay.region().map(|r| OverlayShape::Rect(*r)),
        }
    }
}
