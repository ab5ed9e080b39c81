// File: crates/dash-core/src/views/histogram.rs
// Summary: Histogram adapter: 1-D brush over a binned metric, bins emphasised by range or entity.

use std::sync::Arc;

use crate::bins::{bin_rows, Bin};
use crate::brush::BrushGeometryMapper;
use crate::dataset::{DatasetIndex, DatasetSnapshot, YearRange};
use crate::error::{DashError, Result};
use crate::frame::{Axis, Mark, OverlayShape, ViewFrame, ViewKind};
use crate::geometry::{DataInterval, PixelInterval};
use crate::row::{Dataset, KeySet};
use crate::scale::{LinearScale, AXIS_TICKS};
use crate::selection::{
    BrushOverlay, Emphasis, Origin, OverlayEvent, Selection, SelectionEvent, SelectionMode, ViewId,
};
use crate::types::Viewport;
use crate::view::{Gesture, ViewAdapter};

pub const DEFAULT_BIN_COUNT: usize = 20;

pub struct HistogramView {
    id: ViewId,
    metric: String,
    bin_count: usize,
    viewport: Viewport,
    snapshot: Option<DatasetSnapshot>,
    x: LinearScale,
    y: LinearScale,
    bins: Vec<Bin>,
    selection: Selection<DataInterval>,
    overlay: BrushOverlay<PixelInterval>,
}

impl HistogramView {
    pub fn new(id: impl Into<ViewId>, metric: impl Into<String>, bin_count: usize, viewport: Viewport) -> Self {
        let (xr, yr) = Self::ranges(&viewport);
        Self {
            id: id.into(),
            metric: metric.into(),
            bin_count: bin_count.max(1),
            viewport,
            snapshot: None,
            x: LinearScale::fallback(xr),
            y: LinearScale::fallback(yr),
            bins: Vec::new(),
            selection: Selection::None,
            overlay: BrushOverlay::default(),
        }
    }

    fn ranges(vp: &Viewport) -> ((f64, f64), (f64, f64)) {
        ((0.0, vp.plot_width()), (vp.plot_height(), 0.0))
    }

    pub fn metric(&self) -> &str { &self.metric }
    pub fn bins(&self) -> &[Bin] { &self.bins }
    pub fn x_scale(&self) -> &LinearScale { &self.x }
    pub fn selection(&self) -> &Selection<DataInterval> { &self.selection }
    pub fn overlay(&self) -> Option<&PixelInterval> { self.overlay.region() }

    /// Recompute domains and bins from the current snapshot. The x domain is niced
    /// with the bin count so every bucket has the same width.
    fn rebin(&mut self) {
        let (xr, yr) = Self::ranges(&self.viewport);
        let Some(snapshot) = self.snapshot.as_ref().filter(|s| !s.is_empty()) else {
            self.x = LinearScale::fallback(xr);
            self.y = LinearScale::fallback(yr);
            self.bins.clear();
            return;
        };
        self.x = LinearScale::from_values(snapshot.values(&self.metric), xr, self.bin_count);
        self.bins = bin_rows(snapshot.rows(), &self.metric, self.x.domain(), self.bin_count);
        let max_count = self.bins.iter().map(|b| b.count).max().unwrap_or(0);
        self.y = if max_count == 0 {
            LinearScale::fallback(yr)
        } else {
            LinearScale::new((0.0, max_count as f64), yr).nice(AXIS_TICKS)
        };
    }

    /// Entities with a value inside `range` (inclusive on both ends).
    fn keys_in(&self, range: &DataInterval) -> KeySet {
        let Some(snapshot) = &self.snapshot else { return KeySet::new() };
        snapshot
            .rows()
            .filter(|r| r.metric(&self.metric).is_some_and(|v| range.contains(v)))
            .map(|r| r.key())
            .collect()
    }

    pub fn on_gesture_select(&mut self, px: PixelInterval, finished: bool) -> SelectionEvent {
        let range = BrushGeometryMapper::new(&self.x).to_data_range(px);
        let keys = self.keys_in(&range);
        tracing::debug!(view = %self.id, min = range.min, max = range.max, selected = keys.len(), "histogram brush");
        self.selection = Selection::Geometric { region: range, keys: keys.clone() };
        if finished {
            // snap the overlay to the clamped interval
            self.sync_overlay();
        }
        SelectionEvent::from_gesture(self.id.clone(), keys)
    }

    pub fn on_gesture_clear(&mut self) -> SelectionEvent {
        self.selection = Selection::None;
        SelectionEvent::from_gesture(self.id.clone(), KeySet::new())
    }

    fn handle_overlay(&mut self, event: OverlayEvent<PixelInterval>) -> Option<SelectionEvent> {
        if event.origin == Origin::Programmatic {
            tracing::trace!(view = %self.id, "ignoring programmatic overlay move");
            return None;
        }
        Some(match event.region {
            Some(px) => self.on_gesture_select(px, event.finished),
            None => self.on_gesture_clear(),
        })
    }

    fn sync_overlay(&mut self) {
        let target = self.selection.region().map(|r| BrushGeometryMapper::new(&self.x).to_pixel_interval(*r));
        let event = self.overlay.move_to(target, Origin::Programmatic, true);
        let echoed = self.handle_overlay(event);
        debug_assert!(echoed.is_none());
    }

    fn bin_emphasis(&self, bin: &Bin) -> Emphasis {
        Emphasis::from_bool(match &self.selection {
            Selection::None => true,
            Selection::Geometric { region, .. } => bin.overlaps(region),
            Selection::EntityDriven(keys) => bin.contains_any(keys),
        })
    }
}

impl ViewAdapter for HistogramView {
    fn id(&self) -> &ViewId { &self.id }
    fn kind(&self) -> ViewKind { ViewKind::Histogram }
    fn mode(&self) -> SelectionMode { self.selection.mode() }
    fn local_keys(&self) -> KeySet { self.selection.keys() }
    fn overlay_active(&self) -> bool { self.overlay.is_active() }
    fn required_metrics(&self) -> Vec<&str> { vec![self.metric.as_str()] }

    fn rebuild(&mut self, dataset: &Arc<Dataset>, range: Option<YearRange>) -> Result<()> {
        let snapshot = DatasetIndex::build(dataset, range, &self.required_metrics())?;
        self.snapshot = Some(snapshot);
        self.rebin();
        self.sync_overlay();
        Ok(())
    }

    fn handle_gesture(&mut self, gesture: Gesture) -> Result<Option<SelectionEvent>> {
        match gesture {
            Gesture::Span { region, finished } => {
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
        self.rebin();
        self.sync_overlay();
        true
    }

    /// A numeric interval does not translate across metrics, so a geometric
    /// selection degrades to highlighting the same entities.
    fn set_metric(&mut self, dataset: &Arc<Dataset>, range: Option<YearRange>, metric: &str) -> Result<()> {
        let snapshot = DatasetIndex::build(dataset, range, &[metric])?;
        self.metric = metric.to_string();
        self.snapshot = Some(snapshot);
        self.selection = match std::mem::take(&mut self.selection) {
            Selection::Geometric { keys, .. } => Selection::external(&keys),
            other => other,
        };
        self.rebin();
        self.sync_overlay();
        Ok(())
    }

    fn frame(&self) -> ViewFrame {
        let marks = self
            .bins
            .iter()
            .map(|b| Mark::Bar {
                x0: self.x.map(b.x0),
                x1: self.x.map(b.x1),
                y: self.y.map(b.count as f64),
                count: b.count,
                emphasis: self.bin_emphasis(b),
            })
            .collect();
        ViewFrame {
            view: self.id.clone(),
            kind: ViewKind::Histogram,
            viewport: self.viewport,
            x_axis: Some(Axis::new(self.metric.clone(), self.x.domain())),
            y_axis: Some(Axis::new("Count of countries", self.y.domain())),
            marks,
            overlay: self.overlay.region().map(|p| OverlayShape::Span(*p)),
        }
    }
}
