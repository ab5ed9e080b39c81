// File: crates/dash-core/src/row.rs
// Summary: Row, entity key and dataset (row collection + metric schema) model.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Stable cross-view identity of a real-world entity: ISO code if present, else display name.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntityKey(String);

impl EntityKey {
    pub fn new(key: impl Into<String>) -> Self { Self(key.into()) }
    pub fn as_str(&self) -> &str { &self.0 }
}

impl fmt::Display for EntityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.0) }
}

impl From<&str> for EntityKey {
    fn from(s: &str) -> Self { Self(s.to_string()) }
}

impl From<String> for EntityKey {
    fn from(s: String) -> Self { Self(s) }
}

impl std::borrow::Borrow<str> for EntityKey {
    fn borrow(&self) -> &str { &self.0 }
}

/// Ordered key set; empty means "no selection".
pub type KeySet = BTreeSet<EntityKey>;

/// Convenience for tests and callers: build a key set from string literals.
pub fn keys<I, S>(items: I) -> KeySet
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    items.into_iter().map(|s| EntityKey::new(s)).collect()
}

/// One record per entity-year.
#[derive(Clone, Debug, PartialEq)]
pub struct Row {
    pub entity: String,
    pub code: Option<String>,
    pub year: i32,
    pub metrics: BTreeMap<String, Option<f64>>,
}

impl Row {
    pub fn new(entity: impl Into<String>, code: Option<&str>, year: i32) -> Self {
        Self { entity: entity.into(), code: code.map(str::to_string), year, metrics: BTreeMap::new() }
    }

    /// Builder-style metric setter; `None` records an explicit null.
    pub fn with_metric(mut self, name: impl Into<String>, value: Option<f64>) -> Self {
        self.metrics.insert(name.into(), value);
        self
    }

    pub fn key(&self) -> EntityKey {
        match &self.code {
            Some(code) => EntityKey::new(code.clone()),
            None => EntityKey::new(self.entity.clone()),
        }
    }

    /// Finite value of `name`, or `None` for missing / null / NaN.
    pub fn metric(&self, name: &str) -> Option<f64> {
        self.metrics.get(name).copied().flatten().filter(|v| v.is_finite())
    }
}

/// Raw rows plus the metric columns they were read with.
#[derive(Clone, Debug, Default)]
pub struct Dataset {
    pub metrics: Vec<String>,
    pub rows: Vec<Row>,
}

impl Dataset {
    pub fn new(metrics: Vec<String>, rows: Vec<Row>) -> Self {
        Self { metrics, rows }
    }

    /// Build from rows alone, deriving the schema from every metric name seen.
    pub fn from_rows(rows: Vec<Row>) -> Self {
        let mut names = BTreeSet::new();
        for r in &rows {
            names.extend(r.metrics.keys().cloned());
        }
        Self { metrics: names.into_iter().collect(), rows }
    }

    pub fn has_metric(&self, name: &str) -> bool {
        self.metrics.iter().any(|m| m == name)
    }

    /// `[minYear, maxYear]` over all rows, `None` when there are no rows.
    pub fn year_bounds(&self) -> Option<(i32, i32)> {
        let mut it = self.rows.iter().map(|r| r.year);
        let first = it.next()?;
        Some(it.fold((first, first), |(lo, hi), y| (lo.min(y), hi.max(y))))
    }
}
