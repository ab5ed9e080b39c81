// File: crates/dash-core/src/dashboard.rs
// Summary: Orchestrator wiring views, coordinator, year range and observers together.
// Every operation runs to completion synchronously; no partial state is observable.

use std::sync::Arc;

use crate::config::DashboardConfig;
use crate::coordinator::SelectionCoordinator;
use crate::dataset::YearRange;
use crate::error::{DashError, Result};
use crate::frame::ViewFrame;
use crate::geometry::PixelInterval;
use crate::range::{RangeFilter, YearBrush};
use crate::row::{Dataset, KeySet};
use crate::selection::{ChangeCause, SelectionChange, SelectionEvent, ViewId};
use crate::types::{Margins, Viewport, YEAR_BRUSH_SIZE};
use crate::view::{Gesture, ViewAdapter};
use crate::views::{ChoroplethView, GeometrySet, HistogramView, ScatterView};

/// Id the year selector answers to in [`Dashboard::resize`].
pub const YEAR_BRUSH_ID: &str = "years";

/// Receives every local selection change of every view.
pub trait SelectionObserver {
    fn on_selection_change(&mut self, change: &SelectionChange);
}

impl<F: FnMut(&SelectionChange)> SelectionObserver for F {
    fn on_selection_change(&mut self, change: &SelectionChange) { self(change) }
}

/// Immutable summary of the two interacting filters; replaced wholesale on
/// every transition.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FilterState {
    pub year_range: Option<YearRange>,
    pub highlight: KeySet,
    pub source: Option<ViewId>,
}

/// Everything a renderer needs for one frame of the dashboard.
#[derive(Clone, Debug, PartialEq)]
pub struct DashboardFrame {
    pub filter: FilterState,
    pub year_selector: ViewFrame,
    pub views: Vec<ViewFrame>,
}

pub struct Dashboard {
    dataset: Arc<Dataset>,
    coordinator: SelectionCoordinator,
    range: RangeFilter,
    year_brush: YearBrush,
    filter: FilterState,
    observers: Vec<Box<dyn SelectionObserver>>,
}

impl Dashboard {
    /// Empty dashboard over `dataset`, with the full year range active.
    pub fn new(dataset: Dataset) -> Self {
        let bounds = dataset.year_bounds().map(|(lo, hi)| YearRange::new(lo, hi));
        let range = RangeFilter::new(bounds);
        let mut year_brush = YearBrush::new(YEAR_BRUSH_ID, bounds, Viewport::new(YEAR_BRUSH_SIZE, Margins::year_brush()));
        if let Some(b) = bounds {
            year_brush.show(b);
        }
        Self {
            dataset: Arc::new(dataset),
            coordinator: SelectionCoordinator::new(),
            range,
            filter: FilterState { year_range: bounds, ..FilterState::default() },
            year_brush,
            observers: Vec::new(),
        }
    }

    /// Build the views described by `config`. Views are named `scatter`,
    /// `histogram-<i>` and `map-<i>`.
    pub fn from_config(dataset: Dataset, config: &DashboardConfig, geometry: GeometrySet) -> Result<Self> {
        config.validate(&dataset)?;
        let mut dash = Self::new(dataset);
        let yb = &config.year_brush;
        dash.year_brush = YearBrush::new(YEAR_BRUSH_ID, dash.range.bounds(), Viewport::new(yb.size, yb.margins));
        if let Some(b) = dash.range.bounds() {
            dash.year_brush.show(b);
        }
        if let Some(s) = &config.scatter {
            let vp = Viewport::new(s.size, s.margins);
            dash.add_view(Box::new(ScatterView::new("scatter", s.x_metric.as_str(), s.y_metric.as_str(), vp)))?;
        }
        for (i, h) in config.histograms.iter().enumerate() {
            let vp = Viewport::new(h.size, h.margins);
            dash.add_view(Box::new(HistogramView::new(format!("histogram-{i}").as_str(), h.metric.as_str(), h.bin_count, vp)))?;
        }
        let geometry = Arc::new(geometry);
        for (i, m) in config.maps.iter().enumerate() {
            let vp = Viewport::new(m.size, m.margins);
            dash.add_view(Box::new(ChoroplethView::new(format!("map-{i}").as_str(), m.metric.as_str(), Arc::clone(&geometry), vp)))?;
        }
        Ok(dash)
    }

    pub fn dataset(&self) -> &Arc<Dataset> { &self.dataset }
    pub fn filter_state(&self) -> &FilterState { &self.filter }
    pub fn year_range(&self) -> Option<YearRange> { self.range.current() }
    pub fn year_bounds(&self) -> Option<YearRange> { self.range.bounds() }
    pub fn coordinator(&self) -> &SelectionCoordinator { &self.coordinator }
    pub fn year_brush(&self) -> &YearBrush { &self.year_brush }

    pub fn view(&self, id: &ViewId) -> Result<&dyn ViewAdapter> {
        self.coordinator.view(id).ok_or_else(|| DashError::UnknownView(id.clone()))
    }

    pub fn subscribe(&mut self, observer: impl SelectionObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Build the view for the active range, adopt the current highlight, register it.
    pub fn add_view(&mut self, mut view: Box<dyn ViewAdapter>) -> Result<()> {
        if self.coordinator.is_registered(view.id()) {
            return Err(DashError::DuplicateView(view.id().clone()));
        }
        view.rebuild(&self.dataset, self.range.current())?;
        let keys = &self.coordinator.state().keys;
        if !keys.is_empty() {
            view.apply_external_highlight(keys);
        }
        self.coordinator.register_view(view)
    }

    /// Route a user gesture to `view`; publish whatever selection it produces.
    pub fn gesture(&mut self, view: &ViewId, gesture: Gesture) -> Result<()> {
        let adapter = self.coordinator.view_mut(view).ok_or_else(|| DashError::UnknownView(view.clone()))?;
        let Some(event) = adapter.handle_gesture(gesture)? else {
            return Ok(());
        };
        self.publish(event)
    }

    fn publish(&mut self, event: SelectionEvent) -> Result<()> {
        let own = SelectionChange { view: event.source.clone(), keys: event.keys.clone(), cause: ChangeCause::Gesture };
        let mut changes = vec![own];
        changes.extend(self.coordinator.publish(event)?);
        self.refresh_filter();
        self.notify(&changes);
        Ok(())
    }

    /// Clamp/reorder, rebuild every view for the new range, then re-apply the
    /// (unchanged) canonical highlight to all of them.
    pub fn set_year_range(&mut self, start: i32, end: i32) -> Result<YearRange> {
        let range = self.range.set_range(start, end);
        self.apply_range(Some(range))?;
        Ok(range)
    }

    /// Drag on the year selector; an empty drag restores the full range.
    pub fn drag_year_brush(&mut self, region: Option<PixelInterval>, finished: bool) -> Result<Option<YearRange>> {
        let Some(requested) = self.year_brush.drag(region, finished) else {
            return Ok(None);
        };
        self.set_year_range(requested.start, requested.end).map(Some)
    }

    /// Restore the full year range.
    pub fn reset_year_range(&mut self) -> Result<Option<YearRange>> {
        let range = self.range.reset();
        self.apply_range(range)?;
        Ok(range)
    }

    fn apply_range(&mut self, range: Option<YearRange>) -> Result<()> {
        for view in self.coordinator.views_mut() {
            view.rebuild(&self.dataset, range)?;
        }
        if let Some(r) = range {
            self.year_brush.show(r);
        }
        let changes = self.coordinator.rebroadcast();
        self.refresh_filter();
        self.notify(&changes);
        Ok(())
    }

    /// Impose a highlight set on every view without a source view.
    pub fn set_highlighted_entities(&mut self, keys: KeySet) {
        let changes = self.coordinator.impose(keys);
        self.refresh_filter();
        self.notify(&changes);
    }

    /// Resize one view (or the year selector). Returns `false` when the size is
    /// unchanged and the notification was dropped.
    pub fn resize(&mut self, view: &ViewId, width: f64, height: f64) -> Result<bool> {
        if view == self.year_brush.id() {
            return Ok(self.year_brush.resize(width, height, self.range.current()));
        }
        let adapter = self.coordinator.view_mut(view).ok_or_else(|| DashError::UnknownView(view.clone()))?;
        Ok(adapter.resize(width, height))
    }

    /// Switch the metric of a single-metric view (histogram or map).
    pub fn set_metric(&mut self, view: &ViewId, metric: &str) -> Result<()> {
        let range = self.range.current();
        let adapter = self.coordinator.view_mut(view).ok_or_else(|| DashError::UnknownView(view.clone()))?;
        adapter.set_metric(&self.dataset, range, metric)
    }

    pub fn frames(&self) -> DashboardFrame {
        DashboardFrame {
            filter: self.filter.clone(),
            year_selector: self.year_brush.frame(),
            views: self.coordinator.views().map(|v| v.frame()).collect(),
        }
    }

    fn refresh_filter(&mut self) {
        let state = self.coordinator.state();
        self.filter = FilterState {
            year_range: self.range.current(),
            highlight: state.keys.clone(),
            source: state.source.clone(),
        };
    }

    fn notify(&mut self, changes: &[SelectionChange]) {
        for change in changes {
            for obs in self.observers.iter_mut() {
                obs.on_selection_change(change);
            }
        }
    }
}
