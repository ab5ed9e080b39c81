// File: crates/dash-render-skia/tests/render.rs
// Purpose: Frame rendering: buffer shape, emphasis colors, overlays and dashboard output.

use dash_core::frame::Axis;
use dash_core::{
    Dashboard, Dataset, Emphasis, GeometrySet, Margins, Mark, OverlayShape, PixelInterval, Row, Size, ViewFrame,
    ViewId, ViewKind, Viewport,
};
use dash_render_skia::{format_tick, region_tiles, render_dashboard, render_to_png_bytes, render_to_rgba8, RenderOptions, Theme};

fn bar_frame(emphasis: Emphasis, overlay: Option<OverlayShape>) -> ViewFrame {
    ViewFrame {
        view: ViewId::from("bars"),
        kind: ViewKind::Histogram,
        viewport: Viewport::new(Size::new(200.0, 100.0), Margins::new(0, 0, 0, 0)),
        x_axis: Some(Axis::new("m", (0.0, 10.0))),
        y_axis: None,
        marks: vec![Mark::Bar { x0: 0.0, x1: 100.0, y: 0.0, count: 3, emphasis }],
        overlay,
    }
}

fn quiet() -> RenderOptions {
    RenderOptions { draw_labels: false, ..RenderOptions::default() }
}

fn pixel(px: &[u8], stride: usize, x: usize, y: usize) -> [u8; 4] {
    let i = y * stride + x * 4;
    [px[i], px[i + 1], px[i + 2], px[i + 3]]
}

#[test]
fn rgba_buffer_shape_and_colors() {
    let theme = Theme::dark();
    let (px, w, h, stride) = render_to_rgba8(&bar_frame(Emphasis::Full, None), &quiet()).expect("rgba render");
    assert_eq!((w, h), (200, 100));
    assert_eq!(stride, 800);
    assert_eq!(px.len(), stride * h as usize);

    let bg = theme.background;
    assert_eq!(pixel(&px, stride, 150, 10), [bg.r(), bg.g(), bg.b(), 255]);
    let mark = theme.mark;
    assert_eq!(pixel(&px, stride, 50, 50), [mark.r(), mark.g(), mark.b(), 255]);
}

#[test]
fn muted_marks_fade_toward_background() {
    let theme = Theme::dark();
    let (px, _, _, stride) = render_to_rgba8(&bar_frame(Emphasis::Muted, None), &quiet()).unwrap();
    let [_, _, b, _] = pixel(&px, stride, 50, 50);
    assert!(b > theme.background.b() && b < theme.mark.b());
}

#[test]
fn span_overlay_is_painted() {
    let overlay = Some(OverlayShape::Span(PixelInterval::new(120.0, 180.0)));
    let (px, _, _, stride) = render_to_rgba8(&bar_frame(Emphasis::Full, overlay), &quiet()).unwrap();
    let bg = Theme::dark().background;
    assert_ne!(pixel(&px, stride, 150, 50), [bg.r(), bg.g(), bg.b(), 255]);
}

#[test]
fn png_decodes_at_viewport_size() {
    let bytes = render_to_png_bytes(&bar_frame(Emphasis::Full, None), &quiet()).unwrap();
    let img = image::load_from_memory(&bytes).expect("decode png").to_rgba8();
    assert_eq!(img.dimensions(), (200, 100));
}

#[test]
fn tiles_cover_the_plot() {
    let tiles = region_tiles(5, 300.0, 100.0);
    assert_eq!(tiles.len(), 5);
    assert!(tiles.iter().all(|t| t.left >= 0.0 && t.right <= 300.0 + 1e-3 && t.bottom <= 100.0 + 1e-3));
    assert!(region_tiles(0, 300.0, 100.0).is_empty());
}

#[test]
fn tick_formatting() {
    assert_eq!(format_tick(80.0), "80");
    assert_eq!(format_tick(8.1), "8.1");
    assert_eq!(format_tick(0.125), "0.125");
    assert_eq!(format_tick(-2.0), "-2");
}

#[test]
fn dashboard_writes_one_png_per_view() {
    let rows = vec![
        Row::new("France", Some("FRA"), 2000).with_metric("m", Some(1.0)).with_metric("n", Some(3.0)),
        Row::new("France", Some("FRA"), 2001).with_metric("m", Some(2.0)).with_metric("n", Some(4.0)),
    ];
    let cfg = dash_core::DashboardConfig {
        scatter: Some(dash_core::config::ScatterConfig { x_metric: "m".into(), y_metric: "n".into(), ..Default::default() }),
        histograms: vec![dash_core::config::HistogramConfig::for_metric("m")],
        maps: vec![dash_core::config::MapConfig::for_metric("n")],
        ..Default::default()
    };
    let geo = GeometrySet::new().with_region("FRA", "France").with_region("ESP", "Spain");
    let dash = Dashboard::from_config(Dataset::from_rows(rows), &cfg, geo).unwrap();

    let dir = std::path::PathBuf::from(env!("CARGO_TARGET_TMPDIR")).join("dashboard_frames");
    let written = render_dashboard(&dash.frames(), &quiet(), &dir).unwrap();
    let names: Vec<_> = written.iter().filter_map(|p| p.file_name()?.to_str().map(str::to_string)).collect();
    assert_eq!(names, vec!["years.png", "scatter.png", "histogram-0.png", "map-0.png"]);
    assert!(written.iter().all(|p| p.exists()));
}
