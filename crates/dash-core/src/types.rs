// File: crates/dash-core/src/types.rs
// Summary: Shared layout types (container size, plot margins) and default view sizes.

/// Default scatterplot container size in pixels.
pub const SCATTER_SIZE: Size = Size::new(900.0, 550.0);
/// Default histogram container size in pixels.
pub const HISTOGRAM_SIZE: Size = Size::new(900.0, 320.0);
/// Default choropleth container size in pixels.
pub const MAP_SIZE: Size = Size::new(900.0, 550.0);
/// Default year selector container size in pixels.
pub const YEAR_BRUSH_SIZE: Size = Size::new(900.0, 80.0);

/// Container dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, serde::Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Plot margins inside a view container, in pixels.
/// Contract: all fields are non-negative.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Deserialize)]
pub struct Margins {
    pub left: u32,
    pub right: u32,
    pub top: u32,
    pub bottom: u32,
}

impl Margins {
    /// Create new margins (non-negative by type).
    pub const fn new(left: u32, right: u32, top: u32, bottom: u32) -> Self {
        Self { left, right, top, bottom }
    }
    /// Total horizontal margin (left + right).
    pub const fn hsum(&self) -> u32 { self.left + self.right }
    /// Total vertical margin (top + bottom).
    pub const fn vsum(&self) -> u32 { self.top + self.bottom }

    pub const fn scatter() -> Self { Self::new(70, 20, 20, 60) }
    pub const fn histogram() -> Self { Self::new(55, 20, 20, 45) }
    pub const fn map() -> Self { Self::new(20, 20, 20, 20) }
    pub const fn year_brush() -> Self { Self::new(40, 40, 10, 30) }
}

impl Default for Margins {
    fn default() -> Self {
        Self::scatter()
    }
}

/// A container plus its margins; yields the inner plot extent that scales map onto.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub size: Size,
    pub margins: Margins,
}

impl Viewport {
    pub const fn new(size: Size, margins: Margins) -> Self {
        Self { size, margins }
    }

    /// Inner plot width, never negative.
    pub fn plot_width(&self) -> f64 {
        (self.size.width - f64::from(self.margins.hsum())).max(0.0)
    }

    /// Inner plot height, never negative.
    pub fn plot_height(&self) -> f64 {
        (self.size.height - f64::from(self.margins.vsum())).max(0.0)
    }

    /// Apply new container dimensions. Returns `false` when they match the
    /// last applied ones, so repeated notifications for one layout change are dropped.
    pub fn resize(&mut self, width: f64, height: f64) -> bool {
        if self.size.width == width && self.size.height == height {
            tracing::trace!(width, height, "resize coalesced");
            return false;
        }
        self.size = Size::new(width, height);
        true
    }
}
