// File: crates/demo/src/session.rs
// Summary: Scripted interaction replay: each step drives the dashboard, then every view is rendered.

use std::path::{Path, PathBuf};

use anyhow::Result;
use dash_core::{keys, Dashboard, Gesture, KeySet, Mark, PixelInterval, PixelRect, RegionFill, ViewId};
use dash_render_skia::{render_dashboard, RenderOptions};

pub enum Step {
    Snapshot,
    Range(i32, i32),
    Gesture(ViewId, Gesture),
    YearDrag(Option<PixelInterval>),
    Highlight(KeySet),
    Metric(ViewId, String),
}

/// A short session touching every interaction the dashboard supports, built
/// against whatever views the configuration produced.
pub fn script(dash: &Dashboard) -> Vec<(&'static str, Step)> {
    let mut steps = vec![("initial", Step::Snapshot)];
    if let Some(b) = dash.year_bounds() {
        steps.push(("last-decade", Step::Range(b.end - 10, b.end)));
    }
    if let Ok(view) = dash.view(&ViewId::from("scatter")) {
        let vp = view.frame().viewport;
        let (w, h) = (vp.plot_width(), vp.plot_height());
        let rect = PixelRect::from_corners(w * 0.5, 0.0, w, h * 0.5);
        steps.push(("scatter-brush", Step::Gesture(ViewId::from("scatter"), Gesture::Rect { region: Some(rect), finished: true })));
    }
    if let Ok(view) = dash.view(&ViewId::from("histogram-0")) {
        let w = view.frame().viewport.plot_width();
        let span = PixelInterval::new(w / 3.0, w * 2.0 / 3.0);
        steps.push(("histogram-brush", Step::Gesture(ViewId::from("histogram-0"), Gesture::Span { region: Some(span), finished: true })));
        if dash.view(&ViewId::from("histogram-1")).is_ok() {
            // swap the second histogram onto the first one's metric
            let metric = view.frame().x_axis.map(|a| a.label).unwrap_or_default();
            steps.push(("histogram-metric", Step::Metric(ViewId::from("histogram-1"), metric)));
        }
    }
    let mut with_data: Vec<String> = Vec::new();
    if let Ok(view) = dash.view(&ViewId::from("map-0")) {
        with_data = view
            .frame()
            .marks
            .into_iter()
            .filter_map(|m| match m {
                Mark::Region { code, fill: RegionFill::Value { .. }, .. } => Some(code),
                _ => None,
            })
            .take(2)
            .collect();
        for code in &with_data {
            steps.push(("map-click", Step::Gesture(ViewId::from("map-0"), Gesture::Click { code: Some(code.clone()) })));
        }
        steps.push(("map-clear", Step::Gesture(ViewId::from("map-0"), Gesture::Click { code: None })));
    }
    if !with_data.is_empty() {
        steps.push(("imposed", Step::Highlight(keys(with_data))));
    }
    let brush = dash.year_brush().frame().viewport.plot_width();
    steps.push(("single-year", Step::YearDrag(Some(PixelInterval::new(brush - 1.0, brush)))));
    steps.push(("full-range", Step::YearDrag(None)));
    steps
}

/// Apply each step and render all views into `<out>/<nn>-<name>/`.
pub fn replay(dash: &mut Dashboard, steps: Vec<(&'static str, Step)>, opts: &RenderOptions, out: &Path) -> Result<Vec<PathBuf>> {
    let mut written = Vec::new();
    for (i, (name, step)) in steps.into_iter().enumerate() {
        match step {
            Step::Snapshot => {}
            Step::Range(a, b) => {
                dash.set_year_range(a, b)?;
            }
            Step::Gesture(view, gesture) => dash.gesture(&view, gesture)?,
            Step::YearDrag(region) => {
                dash.drag_year_brush(region, true)?;
            }
            Step::Highlight(keys) => dash.set_highlighted_entities(keys),
            Step::Metric(view, metric) => dash.set_metric(&view, &metric)?,
        }
        let state = dash.filter_state();
        tracing::info!(
            step = name,
            highlighted = state.highlight.len(),
            range = ?state.year_range.map(|r| (r.start, r.end)),
            "step applied"
        );
        let dir = out.join(format!("{i:02}-{name}"));
        written.extend(render_dashboard(&dash.frames(), opts, &dir)?);
    }
    Ok(written)
}
