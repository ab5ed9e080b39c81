// File: crates/dash-render-skia/src/lib.rs
// Summary: Headless rendering of dashboard view frames to PNG / RGBA8 using Skia CPU raster surfaces.

pub mod text;
pub mod theme;

use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Result};
use skia_safe as skia;

use dash_core::scale::{bucket_edges, AXIS_TICKS};
use dash_core::{DashboardFrame, LinearScale, Mark, OverlayShape, RegionFill, ViewFrame, ViewKind};

pub use text::{format_tick, TextShaper};
pub use theme::Theme;

pub struct RenderOptions {
    pub theme: Theme,
    /// Axis titles and tick labels. Off gives font-independent output.
    pub draw_labels: bool,
    pub point_radius: f32,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self { theme: Theme::dark(), draw_labels: true, point_radius: 4.0 }
    }
}

/// Render one view frame and return the encoded PNG.
pub fn render_to_png_bytes(frame: &ViewFrame, opts: &RenderOptions) -> Result<Vec<u8>> {
    let mut surface = draw(frame, opts)?;
    let image = surface.image_snapshot();
    #[allow(deprecated)]
    let data = image
        .encode_to_data(skia::EncodedImageFormat::PNG)
        .ok_or_else(|| anyhow!("encode PNG failed"))?;
    Ok(data.as_bytes().to_vec())
}

/// Render one view frame into an unpremultiplied RGBA8 buffer.
/// Returns `(pixels, width, height, row_bytes)`.
pub fn render_to_rgba8(frame: &ViewFrame, opts: &RenderOptions) -> Result<(Vec<u8>, i32, i32, usize)> {
    let mut surface = draw(frame, opts)?;
    let (w, h) = (surface.width(), surface.height());
    let info = skia::ImageInfo::new((w, h), skia::ColorType::RGBA8888, skia::AlphaType::Unpremul, None);
    let stride = w as usize * 4;
    let mut px = vec![0u8; stride * h as usize];
    if !surface.read_pixels(&info, &mut px, stride, (0, 0)) {
        bail!("reading back {w}x{h} surface failed");
    }
    Ok((px, w, h, stride))
}

pub fn render_to_png(frame: &ViewFrame, opts: &RenderOptions, path: impl AsRef<Path>) -> Result<()> {
    let bytes = render_to_png_bytes(frame, opts)?;
    if let Some(parent) = path.as_ref().parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, bytes)?;
    Ok(())
}

/// Write `<view id>.png` for the year selector and every view into `dir`.
pub fn render_dashboard(frame: &DashboardFrame, opts: &RenderOptions, dir: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    std::fs::create_dir_all(dir)?;
    let mut written = Vec::with_capacity(frame.views.len() + 1);
    for view in std::iter::once(&frame.year_selector).chain(&frame.views) {
        let path = dir.join(format!("{}.png", view.view));
        render_to_png(view, opts, &path)?;
        tracing::debug!(view = %view.view, path = %path.display(), "frame written");
        written.push(path);
    }
    Ok(written)
}

/// Grid of equal tiles standing in for map shapes, one per region in order.
pub fn region_tiles(n: usize, width: f32, height: f32) -> Vec<skia::Rect> {
    if n == 0 || width <= 0.0 || height <= 0.0 {
        return Vec::new();
    }
    let cols = ((n as f32 * width / height).sqrt().ceil() as usize).clamp(1, n);
    let rows = n.div_ceil(cols);
    let (tw, th) = (width / cols as f32, height / rows as f32);
    (0..n)
        .map(|i| skia::Rect::from_xywh((i % cols) as f32 * tw, (i / cols) as f32 * th, tw, th))
        .collect()
}

fn draw(frame: &ViewFrame, opts: &RenderOptions) -> Result<skia::Surface> {
    let w = frame.viewport.size.width.round().max(1.0) as i32;
    let h = frame.viewport.size.height.round().max(1.0) as i32;
    let mut surface = skia::surfaces::raster_n32_premul((w, h))
        .ok_or_else(|| anyhow!("failed to create {w}x{h} raster surface"))?;
    let shaper = opts.draw_labels.then(TextShaper::new);
    draw_frame(surface.canvas(), frame, opts, shaper.as_ref());
    Ok(surface)
}

fn draw_frame(canvas: &skia::Canvas, frame: &ViewFrame, opts: &RenderOptions, text: Option<&TextShaper>) {
    let theme = &opts.theme;
    canvas.clear(theme.background);
    let m = frame.viewport.margins;
    let pw = frame.viewport.plot_width() as f32;
    let ph = frame.viewport.plot_height() as f32;

    canvas.save();
    canvas.translate((m.left as f32, m.top as f32));
    match frame.kind {
        ViewKind::Choropleth => draw_regions(canvas, &frame.marks, pw, ph, theme, text),
        _ => {
            draw_grid(canvas, frame, pw, ph, theme);
            draw_marks(canvas, &frame.marks, ph, opts);
            draw_axes(canvas, pw, ph, theme);
        }
    }
    if let Some(overlay) = &frame.overlay {
        draw_overlay(canvas, overlay, ph, theme);
    }
    if let Some(t) = text {
        draw_labels(canvas, t, frame, pw, ph, theme);
    }
    canvas.restore();
}

// ---- helpers ----------------------------------------------------------------

fn ticks(domain: (f64, f64)) -> Vec<f64> {
    let (lo, hi) = (domain.0.min(domain.1), domain.0.max(domain.1));
    if hi > lo { bucket_edges(lo, hi, AXIS_TICKS) } else { vec![lo] }
}

fn draw_grid(canvas: &skia::Canvas, frame: &ViewFrame, pw: f32, ph: f32, theme: &Theme) {
    let mut paint = skia::Paint::default();
    paint.set_color(theme.grid);
    paint.set_anti_alias(true);
    paint.set_stroke_width(1.0);

    if let Some(x) = &frame.x_axis {
        let sx = LinearScale::new(x.domain, (0.0, f64::from(pw)));
        for t in ticks(x.domain) {
            let px = sx.map(t) as f32;
            canvas.draw_line((px, 0.0), (px, ph), &paint);
        }
    }
    if let Some(y) = &frame.y_axis {
        let sy = LinearScale::new(y.domain, (f64::from(ph), 0.0));
        for t in ticks(y.domain) {
            let py = sy.map(t) as f32;
            canvas.draw_line((0.0, py), (pw, py), &paint);
        }
    }
}

fn draw_axes(canvas: &skia::Canvas, pw: f32, ph: f32, theme: &Theme) {
    let mut paint = skia::Paint::default();
    paint.set_color(theme.axis_line);
    paint.set_anti_alias(true);
    paint.set_stroke_width(1.5);
    canvas.draw_line((0.0, ph), (pw, ph), &paint);
    canvas.draw_line((0.0, 0.0), (0.0, ph), &paint);
}

fn draw_marks(canvas: &skia::Canvas, marks: &[Mark], ph: f32, opts: &RenderOptions) {
    let theme = &opts.theme;
    let mut fill = skia::Paint::default();
    fill.set_anti_alias(true);
    fill.set_style(skia::paint::Style::Fill);

    for mark in marks {
        fill.set_color(theme.emphasized(theme.mark, mark.emphasis()));
        match mark {
            Mark::Point { x, y, .. } => {
                canvas.draw_circle((*x as f32, *y as f32), opts.point_radius, &fill);
            }
            Mark::Bar { x0, x1, y, .. } => {
                let (l, r) = (*x0 as f32 + 0.5, (*x1 as f32 - 0.5).max(*x0 as f32 + 1.0));
                canvas.draw_rect(skia::Rect::from_ltrb(l, *y as f32, r, ph), &fill);
            }
            Mark::Region { .. } => {}
        }
    }
}

fn draw_regions(canvas: &skia::Canvas, marks: &[Mark], pw: f32, ph: f32, theme: &Theme, text: Option<&TextShaper>) {
    let mut fill = skia::Paint::default();
    fill.set_anti_alias(true);
    let mut stroke = skia::Paint::default();
    stroke.set_anti_alias(true);
    stroke.set_style(skia::paint::Style::Stroke);
    stroke.set_stroke_width(1.0);
    stroke.set_color(theme.region_stroke);

    for (mark, tile) in marks.iter().zip(region_tiles(marks.len(), pw, ph)) {
        let Mark::Region { code, fill: region_fill, emphasis, .. } = mark else { continue };
        let base = match region_fill {
            RegionFill::Value { t, .. } => theme.ramp(*t),
            RegionFill::NoData => theme.no_data,
        };
        fill.set_color(theme.emphasized(base, *emphasis));
        canvas.draw_rect(tile, &fill);
        canvas.draw_rect(tile, &stroke);
        if let Some(t) = text {
            t.draw_centered(canvas, code, tile.center_x(), tile.center_y() - 6.0, 11.0, theme.axis_label);
        }
    }
}

fn draw_overlay(canvas: &skia::Canvas, overlay: &OverlayShape, ph: f32, theme: &Theme) {
    let rect = match overlay {
        OverlayShape::Span(p) => skia::Rect::from_ltrb(p.lo() as f32, 0.0, p.hi() as f32, ph),
        OverlayShape::Rect(r) => skia::Rect::from_ltrb(r.x0 as f32, r.y0 as f32, r.x1 as f32, r.y1 as f32),
    };
    let mut paint = skia::Paint::default();
    paint.set_anti_alias(true);
    paint.set_color(theme.brush_fill);
    canvas.draw_rect(rect, &paint);
    paint.set_style(skia::paint::Style::Stroke);
    paint.set_stroke_width(1.0);
    paint.set_color(theme.brush_stroke);
    canvas.draw_rect(rect, &paint);
}

fn draw_labels(canvas: &skia::Canvas, text: &TextShaper, frame: &ViewFrame, pw: f32, ph: f32, theme: &Theme) {
    let m = frame.viewport.margins;
    if let Some(x) = &frame.x_axis {
        if frame.kind != ViewKind::Choropleth {
            let sx = LinearScale::new(x.domain, (0.0, f64::from(pw)));
            for t in ticks(x.domain) {
                text.draw_centered(canvas, &format_tick(t), sx.map(t) as f32, ph + 4.0, 11.0, theme.axis_label);
            }
        }
        let title_y = ph + m.bottom as f32 - 18.0;
        text.draw_centered(canvas, &x.label, pw * 0.5, title_y, 13.0, theme.axis_label);
    }
    if let Some(y) = &frame.y_axis {
        let sy = LinearScale::new(y.domain, (f64::from(ph), 0.0));
        for t in ticks(y.domain) {
            text.draw_right(canvas, &format_tick(t), -6.0, sy.map(t) as f32, 11.0, theme.axis_label);
        }
        text.draw_vertical(canvas, &y.label, 14.0 - m.left as f32, ph * 0.5, 13.0, theme.axis_label);
    }
}
