// File: crates/dash-core/src/geometry.rs
// Summary: Pixel-space brush shapes and their data-space counterparts.

/// 1-D pixel interval as dragged; endpoints may arrive in either order.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PixelInterval {
    pub a: f64,
    pub b: f64,
}

impl PixelInterval {
    pub const fn new(a: f64, b: f64) -> Self { Self { a, b } }
    pub fn lo(&self) -> f64 { self.a.min(self.b) }
    pub fn hi(&self) -> f64 { self.a.max(self.b) }
    pub fn len(&self) -> f64 { self.hi() - self.lo() }

    /// Endpoints sorted ascending and clamped to `[lo, hi]`.
    pub fn normalized(&self, lo: f64, hi: f64) -> Self {
        Self { a: clamp(self.lo(), lo, hi), b: clamp(self.hi(), lo, hi) }
    }

    /// True when `other` lies inside this interval, allowing `eps` of float slack.
    pub fn contains_interval(&self, other: &PixelInterval, eps: f64) -> bool {
        other.lo() >= self.lo() - eps && other.hi() <= self.hi() + eps
    }
}

/// 2-D pixel rectangle (scatter brush), corners in any order.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PixelRect {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

impl PixelRect {
    pub const fn from_corners(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self { x0, y0, x1, y1 }
    }
    pub fn x_span(&self) -> PixelInterval { PixelInterval::new(self.x0, self.x1) }
    pub fn y_span(&self) -> PixelInterval { PixelInterval::new(self.y0, self.y1) }
    pub fn from_spans(x: PixelInterval, y: PixelInterval) -> Self {
        Self { x0: x.lo(), y0: y.lo(), x1: x.hi(), y1: y.hi() }
    }
}

/// Closed numeric interval in one metric domain, `min <= max`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DataInterval {
    pub min: f64,
    pub max: f64,
}

impl DataInterval {
    /// Build from two values in any order.
    pub fn new(a: f64, b: f64) -> Self {
        Self { min: a.min(b), max: a.max(b) }
    }
    #[inline]
    pub fn contains(&self, v: f64) -> bool { v >= self.min && v <= self.max }
    /// Closed-interval overlap with `[x0, x1]`.
    #[inline]
    pub fn overlaps(&self, x0: f64, x1: f64) -> bool { x1 >= self.min && x0 <= self.max }
    pub fn is_point(&self) -> bool { self.min == self.max }
}

/// Data-space rectangle: one interval per scatter axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DataRegion {
    pub x: DataInterval,
    pub y: DataInterval,
}

impl DataRegion {
    #[inline]
    pub fn contains(&self, x: f64, y: f64) -> bool { self.x.contains(x) && self.y.contains(y) }
}

#[inline]
pub fn clamp<T: PartialOrd>(v: T, lo: T, hi: T) -> T {
    if v < lo { lo } else if v > hi { hi } else { v }
}
