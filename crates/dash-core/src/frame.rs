// File: crates/dash-core/src/frame.rs
// Summary: Renderer-agnostic description of one view's current visual state.
// Pixel coordinates are plot-local (origin at the inner top-left corner).

use crate::geometry::{PixelInterval, PixelRect};
use crate::row::EntityKey;
use crate::selection::{Emphasis, ViewId};
use crate::types::Viewport;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewKind {
    Scatter,
    Histogram,
    Choropleth,
    YearSelector,
}

#[derive(Clone, Debug, PartialEq)]
pub enum RegionFill {
    /// Metric value and its position `t` in `[0, 1]` along the color domain.
    Value { value: f64, t: f64 },
    NoData,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Mark {
    Point { key: EntityKey, year: i32, x: f64, y: f64, emphasis: Emphasis },
    Bar { x0: f64, x1: f64, y: f64, count: usize, emphasis: Emphasis },
    Region { code: String, name: String, fill: RegionFill, emphasis: Emphasis },
}

impl Mark {
    pub fn emphasis(&self) -> Emphasis {
        match self {
            Mark::Point { emphasis, .. } | Mark::Bar { emphasis, .. } | Mark::Region { emphasis, .. } => *emphasis,
        }
    }
}

/// Brush overlay as currently positioned.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum OverlayShape {
    Span(PixelInterval),
    Rect(PixelRect),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Axis {
    pub label: String,
    pub domain: (f64, f64),
}

impl Axis {
    pub fn new(label: impl Into<String>, domain: (f64, f64)) -> Self {
        Self { label: label.into(), domain }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ViewFrame {
    pub view: ViewId,
    pub kind: ViewKind,
    pub viewport: Viewport,
    pub x_axis: Option<Axis>,
    pub y_axis: Option<Axis>,
    pub marks: Vec<Mark>,
    pub overlay: Option<OverlayShape>,
}

impl ViewFrame {
    pub fn full_count(&self) -> usize {
        self.marks.iter().filter(|m| m.emphasis() == Emphasis::Full).count()
    }

    pub fn muted_count(&self) -> usize {
        self.marks.len() - self.full_count()
    }
}
