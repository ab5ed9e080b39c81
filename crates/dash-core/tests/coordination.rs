// File: crates/dash-core/tests/coordination.rs
// Purpose: Cross-view linking through the dashboard: propagation, clearing,
// year-range interaction and the error paths.

use std::cell::RefCell;
use std::rc::Rc;

use dash_core::brush::MIN_POINT_SPAN_PX;
use dash_core::config::{HistogramConfig, MapConfig, ScatterConfig};
use dash_core::types::{Margins, Viewport, HISTOGRAM_SIZE, SCATTER_SIZE};
use dash_core::{
    keys, ChangeCause, DashError, Dashboard, DashboardConfig, Dataset, GeometrySet, Gesture, HistogramView, KeySet,
    Mark, Origin, OverlayShape, PixelInterval, PixelRect, Row, ScatterView, SelectionChange, SelectionCoordinator,
    SelectionEvent, SelectionMode, ViewFrame, ViewId, YearRange,
};

const SPEND: &str = "spend";
const LIFE: &str = "life";

fn row(name: &str, code: Option<&str>, year: i32, spend: f64, life: f64) -> Row {
    Row::new(name, code, year).with_metric(SPEND, Some(spend)).with_metric(LIFE, Some(life))
}

fn dataset() -> Dataset {
    Dataset::from_rows(vec![
        row("United States", Some("USA"), 2000, 5.0, 70.0),
        row("United States", Some("USA"), 2010, 8.0, 78.0),
        row("France", Some("FRA"), 2010, 9.0, 82.0),
        row("Germany", Some("DEU"), 2010, 11.0, 80.0),
        row("Japan", Some("JPN"), 2010, 3.0, 84.0),
        row("World", None, 2010, 10.0, 72.0),
    ])
}

fn geometry() -> GeometrySet {
    [("USA", "United States"), ("FRA", "France"), ("DEU", "Germany"), ("JPN", "Japan"), ("ATA", "Antarctica")]
        .into_iter()
        .collect()
}

fn config() -> DashboardConfig {
    DashboardConfig {
        scatter: Some(ScatterConfig { x_metric: SPEND.into(), y_metric: LIFE.into(), ..ScatterConfig::default() }),
        histograms: vec![HistogramConfig::for_metric(LIFE), HistogramConfig::for_metric(SPEND)],
        maps: vec![MapConfig::for_metric(SPEND)],
        ..DashboardConfig::default()
    }
}

fn dashboard() -> Dashboard {
    Dashboard::from_config(dataset(), &config(), geometry()).unwrap()
}

fn id(s: &str) -> ViewId { ViewId::from(s) }

fn frame(d: &Dashboard, view: &str) -> ViewFrame { d.view(&id(view)).unwrap().frame() }
fn local(d: &Dashboard, view: &str) -> KeySet { d.view(&id(view)).unwrap().local_keys() }
fn mode(d: &Dashboard, view: &str) -> SelectionMode { d.view(&id(view)).unwrap().mode() }

fn point(f: &ViewFrame, code: &str, year: i32) -> (f64, f64) {
    f.marks
        .iter()
        .find_map(|m| match m {
            Mark::Point { key, year: yr, x, y, .. } if key.as_str() == code && *yr == year => Some((*x, *y)),
            _ => None,
        })
        .expect("point present")
}

// pixel position of `v` along a histogram frame's x axis
fn px(f: &ViewFrame, v: f64) -> f64 {
    let (d0, d1) = f.x_axis.as_ref().unwrap().domain;
    (v - d0) / (d1 - d0) * f.viewport.plot_width()
}

fn brush_around((x, y): (f64, f64)) -> Gesture {
    Gesture::Rect { region: Some(PixelRect::from_corners(x - 4.0, y - 4.0, x + 4.0, y + 4.0)), finished: true }
}

fn click(code: &str) -> Gesture { Gesture::Click { code: Some(code.to_string()) } }

fn brush_usa(d: &mut Dashboard) {
    let p = point(&frame(d, "scatter"), "USA", 2010);
    d.gesture(&id("scatter"), brush_around(p)).unwrap();
}

const OTHERS: [&str; 3] = ["histogram-0", "histogram-1", "map-0"];

#[test]
fn publish_propagates_to_every_other_view() {
    let mut d = dashboard();
    d.gesture(&id("map-0"), click("USA")).unwrap();
    d.gesture(&id("map-0"), click("FRA")).unwrap();

    let expected = keys(["USA", "FRA"]);
    assert_eq!(d.filter_state().highlight, expected);
    assert_eq!(d.filter_state().source, Some(id("map-0")));
    for v in ["scatter", "histogram-0", "histogram-1"] {
        assert_eq!(mode(&d, v), SelectionMode::EntityDriven, "{v}");
        assert_eq!(local(&d, v), expected, "{v}");
    }
    // the source keeps its own selection
    assert_eq!(mode(&d, "map-0"), SelectionMode::Geometric);
}

#[test]
fn scatter_brush_highlights_matching_histogram_bin() {
    let mut d = dashboard();
    d.set_year_range(2005, 2015).unwrap();
    brush_usa(&mut d);

    assert_eq!(d.filter_state().highlight, keys(["USA"]));
    let scatter = frame(&d, "scatter");
    assert_eq!(scatter.full_count(), 1);
    assert!(matches!(scatter.overlay, Some(OverlayShape::Rect(_))));

    let hist = frame(&d, "histogram-0");
    assert_eq!(hist.full_count(), 1);
    assert_eq!(hist.muted_count(), hist.marks.len() - 1);
    let full = hist.marks.iter().find(|m| m.emphasis() == dash_core::Emphasis::Full).unwrap();
    assert!(matches!(full, Mark::Bar { count: 1, .. }));
}

#[test]
fn clearing_a_brush_resets_every_view() {
    let mut d = dashboard();
    brush_usa(&mut d);
    d.gesture(&id("scatter"), Gesture::Rect { region: None, finished: true }).unwrap();

    assert!(d.filter_state().highlight.is_empty());
    for v in ["scatter", "histogram-0", "histogram-1", "map-0"] {
        assert_eq!(mode(&d, v), SelectionMode::None, "{v}");
        assert_eq!(frame(&d, v).muted_count(), 0, "{v}");
    }
    assert!(frame(&d, "scatter").overlay.is_none());
}

#[test]
fn a_newer_selection_replaces_a_stale_brush() {
    let mut d = dashboard();
    brush_usa(&mut d);
    assert!(d.view(&id("scatter")).unwrap().overlay_active());

    let hist = frame(&d, "histogram-0");
    let span = PixelInterval::new(px(&hist, 79.9), hist.viewport.plot_width() + 10.0);
    d.gesture(&id("histogram-0"), Gesture::Span { region: Some(span), finished: true }).unwrap();

    let expected = keys(["FRA", "DEU", "JPN"]);
    assert_eq!(d.filter_state().highlight, expected);
    assert_eq!(mode(&d, "scatter"), SelectionMode::EntityDriven);
    assert_eq!(local(&d, "scatter"), expected);
    assert!(!d.view(&id("scatter")).unwrap().overlay_active());
    assert!(frame(&d, "scatter").overlay.is_none());
}

#[test]
fn highlight_survives_a_range_without_its_entities() {
    let mut d = dashboard();
    d.set_highlighted_entities(keys(["JPN"]));
    let applied = d.set_year_range(1990, 2000).unwrap();
    assert_eq!(applied, YearRange::new(2000, 2000));

    assert_eq!(d.filter_state().highlight, keys(["JPN"]));
    assert_eq!(d.filter_state().year_range, Some(applied));
    for v in ["scatter", "histogram-0", "histogram-1", "map-0"] {
        assert_eq!(local(&d, v), keys(["JPN"]), "{v}");
    }
    let scatter = frame(&d, "scatter");
    assert!(scatter.marks.iter().all(|m| !matches!(m, Mark::Point { key, .. } if key.as_str() == "JPN")));
}

#[test]
fn range_change_turns_source_brush_into_entity_highlight() {
    let mut d = dashboard();
    brush_usa(&mut d);
    d.set_year_range(2005, 2010).unwrap();

    assert_eq!(mode(&d, "scatter"), SelectionMode::EntityDriven);
    assert_eq!(local(&d, "scatter"), keys(["USA"]));
    assert!(frame(&d, "scatter").overlay.is_none());
    assert_eq!(d.filter_state().source, Some(id("scatter")));
}

#[test]
fn applying_the_same_highlight_twice_is_idempotent() {
    let mut d = dashboard();
    d.set_highlighted_entities(keys(["USA", "FRA"]));
    let once = d.frames();
    d.set_highlighted_entities(keys(["USA", "FRA"]));
    assert_eq!(d.frames(), once);
    assert_eq!(d.filter_state().source, None);
}

#[test]
fn repeating_the_same_gesture_changes_nothing() {
    let span = |d: &Dashboard| {
        let f = frame(d, "histogram-1");
        Gesture::Span { region: Some(PixelInterval::new(px(&f, 7.5), px(&f, 9.5))), finished: true }
    };
    let mut once = dashboard();
    brush_usa(&mut once);
    let mut twice = dashboard();
    brush_usa(&mut twice);
    brush_usa(&mut twice);
    assert_eq!(twice.frames(), once.frames());
    assert_eq!(twice.filter_state(), once.filter_state());
    for v in ["scatter", "histogram-0", "histogram-1", "map-0"] {
        assert_eq!(mode(&twice, v), mode(&once, v), "{v}");
        assert_eq!(local(&twice, v), local(&once, v), "{v}");
    }

    let g = span(&once);
    once.gesture(&id("histogram-1"), g.clone()).unwrap();
    twice.gesture(&id("histogram-1"), g.clone()).unwrap();
    twice.gesture(&id("histogram-1"), g).unwrap();
    assert_eq!(twice.frames(), once.frames());
    assert_eq!(twice.filter_state().highlight, keys(["USA", "FRA"]));
    assert_eq!(twice.filter_state(), once.filter_state());
}

#[test]
fn observers_see_one_change_per_view_and_no_echoes() {
    let mut d = dashboard();
    let log: Rc<RefCell<Vec<SelectionChange>>> = Rc::default();
    let sink = Rc::clone(&log);
    d.subscribe(move |c: &SelectionChange| sink.borrow_mut().push(c.clone()));

    brush_usa(&mut d);
    {
        let log = log.borrow();
        assert_eq!(log.len(), 4);
        assert_eq!(log[0].view, id("scatter"));
        assert_eq!(log[0].cause, ChangeCause::Gesture);
        for (c, v) in log[1..].iter().zip(OTHERS) {
            assert_eq!(c.view, id(v));
            assert_eq!(c.cause, ChangeCause::External { source: id("scatter") });
            assert_eq!(c.keys, keys(["USA"]));
        }
    }

    d.set_year_range(2005, 2010).unwrap();
    d.set_highlighted_entities(KeySet::new());
    let log = log.borrow();
    assert_eq!(log.len(), 12);
    assert_eq!(log.iter().filter(|c| c.cause == ChangeCause::Gesture).count(), 1);
    assert_eq!(log.iter().filter(|c| c.cause == ChangeCause::Rebroadcast).count(), 4);
    assert_eq!(log.iter().filter(|c| c.cause == ChangeCause::Imposed).count(), 4);
}

#[test]
fn map_clicks_toggle_membership() {
    let mut d = dashboard();
    for code in ["USA", "FRA", "USA"] {
        d.gesture(&id("map-0"), click(code)).unwrap();
    }
    assert_eq!(d.filter_state().highlight, keys(["FRA"]));

    // regions without data are not selectable
    d.gesture(&id("map-0"), click("ATA")).unwrap();
    assert_eq!(d.filter_state().highlight, keys(["FRA"]));

    d.gesture(&id("map-0"), Gesture::Click { code: None }).unwrap();
    assert!(d.filter_state().highlight.is_empty());
    assert_eq!(mode(&d, "map-0"), SelectionMode::None);
}

#[test]
fn map_click_extends_an_imposed_highlight() {
    let mut d = dashboard();
    d.set_highlighted_entities(keys(["USA", "DEU"]));
    d.gesture(&id("map-0"), click("FRA")).unwrap();
    assert_eq!(d.filter_state().highlight, keys(["USA", "DEU", "FRA"]));
}

#[test]
fn map_frame_marks_no_data_regions() {
    let d = dashboard();
    let map = frame(&d, "map-0");
    assert_eq!(map.marks.len(), 5);
    let ata = map.marks.iter().find(|m| matches!(m, Mark::Region { code, .. } if code == "ATA")).unwrap();
    assert!(matches!(ata, Mark::Region { fill: dash_core::RegionFill::NoData, .. }));
}

#[test]
fn year_brush_drags_set_and_reset_the_range() {
    let mut d = dashboard();
    assert_eq!(d.year_range(), Some(YearRange::new(2000, 2010)));

    let set = d.drag_year_brush(Some(PixelInterval::new(164.0, 656.0)), true).unwrap();
    assert_eq!(set, Some(YearRange::new(2002, 2008)));
    assert_eq!(d.year_range(), set);

    let reset = d.drag_year_brush(None, true).unwrap();
    assert_eq!(reset, Some(YearRange::new(2000, 2010)));
}

#[test]
fn single_year_keeps_a_grabbable_overlay() {
    let mut d = dashboard();
    d.set_year_range(2010, 2010).unwrap();
    let span = *d.year_brush().overlay().unwrap();
    assert!(span.len() >= MIN_POINT_SPAN_PX);
    assert!(span.lo() >= 0.0 && span.hi() <= 820.0);
    assert!(matches!(d.frames().year_selector.overlay, Some(OverlayShape::Span(_))));
}

#[test]
fn repeated_resize_is_coalesced_and_overlay_follows() {
    let mut d = dashboard();
    brush_usa(&mut d);
    assert!(!d.resize(&id("scatter"), SCATTER_SIZE.width, SCATTER_SIZE.height).unwrap());
    assert!(d.resize(&id("scatter"), 1200.0, 700.0).unwrap());
    assert!(!d.resize(&id("scatter"), 1200.0, 700.0).unwrap());

    let f = frame(&d, "scatter");
    let (x, y) = point(&f, "USA", 2010);
    let Some(OverlayShape::Rect(r)) = f.overlay else { panic!("overlay missing") };
    assert!(r.x0 <= x && x <= r.x1 && r.y0 <= y && y <= r.y1);

    assert!(!d.resize(&id("years"), 900.0, 80.0).unwrap());
    assert!(d.resize(&id("years"), 1000.0, 80.0).unwrap());
}

#[test]
fn metric_switching() {
    let mut d = dashboard();
    assert_eq!(
        d.set_metric(&id("scatter"), LIFE),
        Err(DashError::Unsupported { view: id("scatter"), what: "metric switching" })
    );
    assert_eq!(d.set_metric(&id("histogram-0"), "nope"), Err(DashError::UnknownMetric("nope".into())));

    let hist = frame(&d, "histogram-0");
    let span = PixelInterval::new(px(&hist, 79.9), hist.viewport.plot_width());
    d.gesture(&id("histogram-0"), Gesture::Span { region: Some(span), finished: true }).unwrap();
    d.set_metric(&id("histogram-0"), SPEND).unwrap();

    assert_eq!(mode(&d, "histogram-0"), SelectionMode::EntityDriven);
    assert_eq!(local(&d, "histogram-0"), keys(["FRA", "DEU", "JPN"]));
    assert!(!d.view(&id("histogram-0")).unwrap().overlay_active());
    assert_eq!(frame(&d, "histogram-0").x_axis.unwrap().label, SPEND);
    assert_eq!(d.filter_state().highlight, keys(["FRA", "DEU", "JPN"]));

    d.set_metric(&id("map-0"), LIFE).unwrap();
    assert_eq!(frame(&d, "map-0").x_axis.unwrap().label, LIFE);
}

#[test]
fn unknown_views_and_gestures_are_rejected() {
    let mut d = dashboard();
    assert_eq!(d.gesture(&id("nope"), click("USA")), Err(DashError::UnknownView(id("nope"))));
    assert_eq!(d.resize(&id("nope"), 1.0, 1.0), Err(DashError::UnknownView(id("nope"))));
    assert_eq!(
        d.gesture(&id("scatter"), Gesture::Span { region: None, finished: true }),
        Err(DashError::Unsupported { view: id("scatter"), what: "span brush" })
    );

    let dup = ScatterView::new("scatter", SPEND, LIFE, Viewport::new(SCATTER_SIZE, Margins::scatter()));
    assert_eq!(d.add_view(Box::new(dup)), Err(DashError::DuplicateView(id("scatter"))));
}

#[test]
fn late_views_adopt_the_current_highlight() {
    let mut d = dashboard();
    d.set_highlighted_entities(keys(["USA"]));
    let late = HistogramView::new("late", LIFE, 10, Viewport::new(HISTOGRAM_SIZE, Margins::histogram()));
    d.add_view(Box::new(late)).unwrap();
    assert_eq!(local(&d, "late"), keys(["USA"]));
    assert_eq!(d.frames().views.len(), 5);
}

#[test]
fn coordinator_rejects_unknown_sources_and_ignores_programmatic_events() {
    let mut c = SelectionCoordinator::new();
    let err = c.publish(SelectionEvent::from_gesture(id("ghost"), keys(["USA"]))).unwrap_err();
    assert_eq!(err, DashError::UnknownView(id("ghost")));

    c.register_view(Box::new(ScatterView::new("s", SPEND, LIFE, Viewport::new(SCATTER_SIZE, Margins::scatter()))))
        .unwrap();
    let changes = c
        .publish(SelectionEvent { source: id("s"), origin: Origin::Programmatic, keys: keys(["USA"]) })
        .unwrap();
    assert!(changes.is_empty());
    assert!(c.state().keys.is_empty());
}

#[test]
fn unknown_metric_in_config_fails_fast() {
    let mut cfg = config();
    cfg.histograms.push(HistogramConfig::for_metric("nope"));
    let err = Dashboard::from_config(dataset(), &cfg, geometry()).err();
    assert_eq!(err, Some(DashError::UnknownMetric("nope".into())));
}

#[test]
fn empty_dataset_is_not_an_error() {
    let mut d = Dashboard::new(Dataset::default());
    assert_eq!(d.year_range(), None);
    assert_eq!(d.set_year_range(2015, 2005).unwrap(), YearRange::new(2005, 2015));
    assert!(d.frames().views.is_empty());
}
