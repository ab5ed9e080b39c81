// File: crates/dash-core/src/range.rs
// Summary: RangeFilter (owner of the active year range) and the year selector brush.

use crate::brush::BrushGeometryMapper;
use crate::dataset::YearRange;
use crate::frame::{Axis, OverlayShape, ViewFrame, ViewKind};
use crate::geometry::PixelInterval;
use crate::scale::LinearScale;
use crate::selection::{BrushOverlay, Origin, OverlayEvent, ViewId};
use crate::types::Viewport;

/// Owns the active year range. Without bounds (empty dataset) any reordered
/// range is accepted as-is.
#[derive(Clone, Debug, PartialEq)]
pub struct RangeFilter {
    bounds: Option<YearRange>,
    current: Option<YearRange>,
}

impl RangeFilter {
    /// Starts at the full bounds.
    pub fn new(bounds: Option<YearRange>) -> Self {
        Self { bounds, current: bounds }
    }

    pub fn bounds(&self) -> Option<YearRange> { self.bounds }
    pub fn current(&self) -> Option<YearRange> { self.current }

    /// Clamp into `[minYear, maxYear]`, reorder, store. A single year is a valid range.
    pub fn set_range(&mut self, start: i32, end: i32) -> YearRange {
        let requested = YearRange::new(start, end);
        let range = self.bounds.map_or(requested, |b| requested.clamp_to(b));
        if self.current != Some(range) {
            tracing::debug!(start = range.start, end = range.end, "year range changed");
        }
        self.current = Some(range);
        range
    }

    /// Back to the full bounds.
    pub fn reset(&mut self) -> Option<YearRange> {
        self.current = self.bounds;
        self.current
    }
}

/// Year selector: a 1-D brush over `[minYear, maxYear]`.
pub struct YearBrush {
    id: ViewId,
    viewport: Viewport,
    bounds: Option<YearRange>,
    scale: LinearScale,
    overlay: BrushOverlay<PixelInterval>,
}

impl YearBrush {
    pub fn new(id: impl Into<ViewId>, bounds: Option<YearRange>, viewport: Viewport) -> Self {
        let mut brush = Self {
            id: id.into(),
            viewport,
            bounds,
            scale: LinearScale::fallback((0.0, 1.0)),
            overlay: BrushOverlay::default(),
        };
        brush.rescale();
        brush
    }

    pub fn id(&self) -> &ViewId { &self.id }
    pub fn scale(&self) -> &LinearScale { &self.scale }
    pub fn overlay(&self) -> Option<&PixelInterval> { self.overlay.region() }

    fn rescale(&mut self) {
        let range = (0.0, self.viewport.plot_width());
        self.scale = match self.bounds {
            Some(b) => LinearScale::new((f64::from(b.start), f64::from(b.end)), range),
            None => LinearScale::fallback(range),
        };
    }

    /// Interpret a drag. Returns the requested year range, or the full bounds
    /// for an empty drag; `None` for programmatic moves or without bounds.
    pub fn drag(&mut self, region: Option<PixelInterval>, finished: bool) -> Option<YearRange> {
        let event = self.overlay.move_to(region, Origin::User, finished);
        self.handle_overlay(event)
    }

    fn handle_overlay(&mut self, event: OverlayEvent<PixelInterval>) -> Option<YearRange> {
        if event.origin == Origin::Programmatic {
            return None;
        }
        let bounds = self.bounds?;
        Some(match event.region {
            Some(px) => BrushGeometryMapper::new(&self.scale).to_year_range(px, bounds),
            None => bounds,
        })
    }

    /// Reposition the overlay on `range` (whole-year snapped, minimum width for one year).
    pub fn show(&mut self, range: YearRange) {
        let span = BrushGeometryMapper::new(&self.scale).year_overlay(range);
        let event = self.overlay.move_to(Some(span), Origin::Programmatic, true);
        let echoed = self.handle_overlay(event);
        debug_assert!(echoed.is_none());
    }

    pub fn resize(&mut self, width: f64, height: f64, current: Option<YearRange>) -> bool {
        if !self.viewport.resize(width, height) {
            return false;
        }
        self.rescale();
        if let Some(r) = current {
            self.show(r);
        }
        true
    }

    pub fn frame(&self) -> ViewFrame {
        ViewFrame {
            view: self.id.clone(),
            kind: ViewKind::YearSelector,
            viewport: self.viewport,
            x_axis: Some(Axis::new("Year", self.scale.domain())),
            y_axis: None,
            marks: Vec::new(),
            overlay: self.overlay.region().map(|p| OverlayShape::Span(*p)),
        }
    }
}
