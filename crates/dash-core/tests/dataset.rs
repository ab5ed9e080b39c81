// File: crates/dash-core/tests/dataset.rs
// Purpose: Snapshot filtering, latest-row reduction and the year-range scenario.

use std::sync::Arc;

use dash_core::scale::{LinearScale, AXIS_TICKS};
use dash_core::{latest_by_entity, DashError, Dataset, DatasetIndex, Row, YearRange};

fn scenario() -> Arc<Dataset> {
    Arc::new(Dataset::from_rows(vec![
        Row::new("United States", Some("USA"), 2000).with_metric("m", Some(5.0)),
        Row::new("United States", Some("USA"), 2010).with_metric("m", Some(8.0)),
        Row::new("France", Some("FRA"), 2010).with_metric("m", Some(9.0)),
    ]))
}

#[test]
fn range_filter_and_latest_scenario() {
    let ds = scenario();
    let snap = DatasetIndex::build(&ds, Some(YearRange::new(2005, 2015)), &["m"]).unwrap();
    assert_eq!(snap.len(), 2);
    assert!(snap.rows().all(|r| r.year == 2010));

    let latest = snap.latest_by_entity();
    assert_eq!(latest.len(), 2);
    assert_eq!(latest["USA"].metric("m"), Some(8.0));
    assert_eq!(latest["FRA"].metric("m"), Some(9.0));

    let scale = LinearScale::from_values(snap.values("m"), (0.0, 100.0), AXIS_TICKS);
    assert_eq!(scale.domain(), (8.0, 9.0));
}

#[test]
fn rows_without_code_or_value_are_dropped_silently() {
    let ds = Arc::new(Dataset::from_rows(vec![
        Row::new("World", None, 2010).with_metric("m", Some(1.0)),
        Row::new("Chad", Some("TCD"), 2010).with_metric("m", None),
        Row::new("Peru", Some("PER"), 2010).with_metric("m", Some(f64::NAN)),
        Row::new("Chile", Some("CHL"), 2010).with_metric("m", Some(3.0)),
    ]));
    let snap = DatasetIndex::build(&ds, None, &["m"]).unwrap();
    let codes: Vec<_> = snap.rows().map(|r| r.key().to_string()).collect();
    assert_eq!(codes, vec!["CHL"]);
}

#[test]
fn unknown_metric_fails_fast() {
    let ds = scenario();
    let err = DatasetIndex::build(&ds, None, &["nope"]).unwrap_err();
    assert_eq!(err, DashError::UnknownMetric("nope".into()));
}

#[test]
fn range_outside_data_is_empty_not_an_error() {
    let ds = scenario();
    let snap = DatasetIndex::build(&ds, Some(YearRange::new(1990, 1995)), &["m"]).unwrap();
    assert!(snap.is_empty());
    assert!(snap.latest_by_entity().is_empty());
}

#[test]
fn latest_by_entity_ties_keep_last_seen() {
    let rows = vec![
        Row::new("A", Some("AAA"), 2001).with_metric("m", Some(1.0)),
        Row::new("A", Some("AAA"), 2003).with_metric("m", Some(2.0)),
        Row::new("A", Some("AAA"), 2003).with_metric("m", Some(3.0)),
        Row::new("A", Some("AAA"), 2002).with_metric("m", Some(4.0)),
    ];
    let latest = latest_by_entity(&rows);
    assert_eq!(latest["AAA"].metric("m"), Some(3.0));
}

#[test]
fn year_range_reorders_and_clamps() {
    let r = YearRange::new(2015, 2005);
    assert_eq!((r.start, r.end), (2005, 2015));
    let c = YearRange::new(1990, 2030).clamp_to(YearRange::new(2000, 2020));
    assert_eq!(c, YearRange::new(2000, 2020));
    assert!(YearRange::new(2010, 2010).is_single_year());
}

#[test]
fn schema_and_year_bounds() {
    let ds = scenario();
    assert_eq!(ds.metrics, vec!["m".to_string()]);
    assert_eq!(ds.year_bounds(), Some((2000, 2010)));
    assert_eq!(Dataset::default().year_bounds(), None);
}
