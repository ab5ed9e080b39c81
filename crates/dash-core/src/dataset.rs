// File: crates/dash-core/src/dataset.rs
// Summary: DatasetIndex: year-range + required-metric filtering and latest-row-per-entity reduction.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::error::{DashError, Result};
use crate::row::{Dataset, EntityKey, Row};

/// Inclusive year interval, `start <= end`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct YearRange {
    pub start: i32,
    pub end: i32,
}

impl YearRange {
    /// Build from two years in any order.
    pub fn new(a: i32, b: i32) -> Self {
        Self { start: a.min(b), end: a.max(b) }
    }

    /// Clamp both ends into `bounds` (which is itself a valid range).
    pub fn clamp_to(&self, bounds: YearRange) -> Self {
        let c = |y: i32| y.clamp(bounds.start, bounds.end);
        Self::new(c(self.start), c(self.end))
    }

    #[inline]
    pub fn contains(&self, year: i32) -> bool { year >= self.start && year <= self.end }
    pub fn is_single_year(&self) -> bool { self.start == self.end }
}

/// Rows of a dataset that pass one view's filter. Holds indices into the shared
/// dataset; rebuilt on every range or metric change, never patched.
#[derive(Clone, Debug)]
pub struct DatasetSnapshot {
    dataset: Arc<Dataset>,
    indices: Vec<usize>,
    range: Option<YearRange>,
}

impl DatasetSnapshot {
    pub fn rows(&self) -> impl Iterator<Item = &Row> + '_ {
        self.indices.iter().map(move |&i| &self.dataset.rows[i])
    }
    pub fn len(&self) -> usize { self.indices.len() }
    pub fn is_empty(&self) -> bool { self.indices.is_empty() }
    pub fn range(&self) -> Option<YearRange> { self.range }

    /// One row per entity: the latest year within this snapshot.
    pub fn latest_by_entity(&self) -> BTreeMap<EntityKey, &Row> {
        latest_by_entity(self.rows())
    }

    /// Finite values of `metric` across the snapshot.
    pub fn values<'a>(&'a self, metric: &'a str) -> impl Iterator<Item = f64> + 'a {
        self.rows().filter_map(move |r| r.metric(metric))
    }
}

pub struct DatasetIndex;

impl DatasetIndex {
    /// Keep rows with a code, a value for every required metric, and a year inside
    /// `range` (`None` = unbounded). Unknown metric names fail loudly; missing values
    /// of known metrics filter silently.
    pub fn build(dataset: &Arc<Dataset>, range: Option<YearRange>, required: &[&str]) -> Result<DatasetSnapshot> {
        if let Some(unknown) = required.iter().find(|m| !dataset.has_metric(m)) {
            return Err(DashError::UnknownMetric((*unknown).to_string()));
        }
        let indices = dataset
            .rows
            .iter()
            .enumerate()
            .filter(|(_, r)| r.code.is_some())
            .filter(|(_, r)| range.map_or(true, |yr| yr.contains(r.year)))
            .filter(|(_, r)| required.iter().all(|m| r.metric(m).is_some()))
            .map(|(i, _)| i)
            .collect();
        Ok(DatasetSnapshot { dataset: Arc::clone(dataset), indices, range })
    }
}

/// For each entity keep the row with the greatest year. A row replaces the kept
/// one unless the kept one is strictly newer, so year ties resolve last-seen-wins.
pub fn latest_by_entity<'a, I>(rows: I) -> BTreeMap<EntityKey, &'a Row>
where
    I: IntoIterator<Item = &'a Row>,
{
    let mut latest: BTreeMap<EntityKey, &'a Row> = BTreeMap::new();
    for row in rows {
        let key = row.key();
        match latest.get(&key) {
            Some(kept) if kept.year > row.year => {}
            _ => { latest.insert(key, row); }
        }
    }
    latest
}
