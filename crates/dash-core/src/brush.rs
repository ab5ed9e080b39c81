// File: crates/dash-core/src/brush.rs
// Summary: BrushGeometryMapper: pixel brush extents <-> data intervals for a given scale,
// including the single-value (year selector) case.

use crate::dataset::YearRange;
use crate::geometry::{clamp, DataInterval, DataRegion, PixelInterval, PixelRect};
use crate::scale::LinearScale;

/// Narrowest overlay drawn for a single-value selection, so it stays grabbable.
pub const MIN_POINT_SPAN_PX: f64 = 6.0;

/// Stateless converter parameterised by the scale currently in effect.
#[derive(Clone, Copy, Debug)]
pub struct BrushGeometryMapper<'a> {
    scale: &'a LinearScale,
}

impl<'a> BrushGeometryMapper<'a> {
    pub fn new(scale: &'a LinearScale) -> Self {
        Self { scale }
    }

    /// Sort the endpoints, clamp them to the plot, invert, clamp to the domain.
    /// Handles reversed drags and drags past the plot edge.
    pub fn to_data_range(&self, px: PixelInterval) -> DataInterval {
        let (lo, hi) = self.scale.pixel_bounds();
        let p = px.normalized(lo, hi);
        let a = self.scale.clamp_to_domain(self.scale.invert(p.a));
        let b = self.scale.clamp_to_domain(self.scale.invert(p.b));
        DataInterval::new(a, b)
    }

    /// Map a data interval to pixels, clamped to the plot.
    pub fn to_pixel_interval(&self, data: DataInterval) -> PixelInterval {
        let (lo, hi) = self.scale.pixel_bounds();
        PixelInterval::new(self.scale.map(data.min), self.scale.map(data.max)).normalized(lo, hi)
    }

    /// Overlay for a data interval; a zero-width interval becomes a minimum-width
    /// span centred on the mapped value.
    pub fn overlay_for(&self, data: DataInterval) -> PixelInterval {
        if data.is_point() { self.point_interval(data.min) } else { self.to_pixel_interval(data) }
    }

    /// Span of `max(floor(one data unit in px), MIN_POINT_SPAN_PX)` centred on `value`,
    /// shifted (not shrunk) to stay inside the plot when it fits.
    pub fn point_interval(&self, value: f64) -> PixelInterval {
        let (lo, hi) = self.scale.pixel_bounds();
        let unit = (self.scale.map(value + 1.0) - self.scale.map(value)).abs().floor();
        let width = unit.max(MIN_POINT_SPAN_PX).min(hi - lo);
        let center = self.scale.map(value);
        let start = clamp(center - width * 0.5, lo, (hi - width).max(lo));
        PixelInterval::new(start, start + width)
    }

    /// Year selector inverse: invert both ends, round to the nearest year, clamp
    /// into `bounds`, reorder.
    pub fn to_year_range(&self, px: PixelInterval, bounds: YearRange) -> YearRange {
        let data = self.to_data_range(px);
        let round = |v: f64| clamp(v.round() as i32, bounds.start, bounds.end);
        YearRange::new(round(data.min), round(data.max))
    }

    /// Overlay span for a year range, using the point interval for single years.
    pub fn year_overlay(&self, range: YearRange) -> PixelInterval {
        self.overlay_for(DataInterval::new(f64::from(range.start), f64::from(range.end)))
    }
}

/// 2-D variant for the scatter brush: each axis is mapped independently.
pub fn to_data_region(x: &LinearScale, y: &LinearScale, rect: PixelRect) -> DataRegion {
    DataRegion {
        x: BrushGeometryMapper::new(x).to_data_range(rect.x_span()),
        y: BrushGeometryMapper::new(y).to_data_range(rect.y_span()),
    }
}

/// Inverse of [`to_data_region`], clamped to the plot.
pub fn to_pixel_rect(x: &LinearScale, y: &LinearScale, region: DataRegion) -> PixelRect {
    PixelRect::from_spans(
        BrushGeometryMapper::new(x).to_pixel_interval(region.x),
        BrushGeometryMapper::new(y).to_pixel_interval(region.y),
    )
}
