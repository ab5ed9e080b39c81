// File: crates/dash-render-skia/src/theme.rs
// Summary: Color themes for dashboard frames: marks, emphasis, choropleth ramp and brush.

use skia_safe as skia;

use dash_core::Emphasis;

#[derive(Clone, Copy, Debug)]
pub struct Theme {
    pub name: &'static str,
    pub background: skia::Color,
    pub grid: skia::Color,
    pub axis_line: skia::Color,
    pub axis_label: skia::Color,
    pub mark: skia::Color,
    /// Alpha applied to muted marks.
    pub muted_alpha: u8,
    pub ramp_low: skia::Color,
    pub ramp_high: skia::Color,
    pub no_data: skia::Color,
    pub region_stroke: skia::Color,
    pub brush_fill: skia::Color,
    pub brush_stroke: skia::Color,
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            name: "dark",
            background: skia::Color::from_argb(255, 18, 18, 20),
            grid: skia::Color::from_argb(255, 40, 40, 45),
            axis_line: skia::Color::from_argb(255, 180, 180, 190),
            axis_label: skia::Color::from_argb(255, 235, 235, 245),
            mark: skia::Color::from_argb(255, 64, 160, 255),
            muted_alpha: 40,
            ramp_low: skia::Color::from_argb(255, 237, 248, 233),
            ramp_high: skia::Color::from_argb(255, 0, 90, 50),
            no_data: skia::Color::from_argb(255, 70, 70, 76),
            region_stroke: skia::Color::from_argb(255, 18, 18, 20),
            brush_fill: skia::Color::from_argb(60, 255, 230, 70),
            brush_stroke: skia::Color::from_argb(255, 255, 230, 70),
        }
    }

    pub fn light() -> Self {
        Self {
            name: "light",
            background: skia::Color::from_argb(255, 250, 250, 252),
            grid: skia::Color::from_argb(255, 230, 230, 235),
            axis_line: skia::Color::from_argb(255, 60, 60, 70),
            axis_label: skia::Color::from_argb(255, 20, 20, 30),
            mark: skia::Color::from_argb(255, 70, 130, 180),
            muted_alpha: 50,
            ramp_low: skia::Color::from_argb(255, 237, 248, 233),
            ramp_high: skia::Color::from_argb(255, 0, 109, 44),
            no_data: skia::Color::from_argb(255, 204, 204, 204),
            region_stroke: skia::Color::from_argb(255, 255, 255, 255),
            brush_fill: skia::Color::from_argb(50, 30, 120, 240),
            brush_stroke: skia::Color::from_argb(255, 30, 120, 240),
        }
    }

    /// `color` as drawn at `emphasis`.
    pub fn emphasized(&self, color: skia::Color, emphasis: Emphasis) -> skia::Color {
        match emphasis {
            Emphasis::Full => color,
            Emphasis::Muted => color.with_a(self.muted_alpha),
        }
    }

    /// Sequential ramp position `t` in `[0, 1]`.
    pub fn ramp(&self, t: f64) -> skia::Color {
        let t = t.clamp(0.0, 1.0) as f32;
        let lerp = |a: u8, b: u8| (f32::from(a) + (f32::from(b) - f32::from(a)) * t).round() as u8;
        let (lo, hi) = (self.ramp_low, self.ramp_high);
        skia::Color::from_argb(255, lerp(lo.r(), hi.r()), lerp(lo.g(), hi.g()), lerp(lo.b(), hi.b()))
    }
}

pub fn presets() -> Vec<Theme> {
    vec![Theme::dark(), Theme::light()]
}

/// Find a theme by its `name`, falling back to dark.
pub fn find(name: &str) -> Theme {
    presets().into_iter().find(|t| t.name.eq_ignore_ascii_case(name)).unwrap_or_else(Theme::dark)
}
