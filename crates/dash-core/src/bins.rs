// File: crates/dash-core/src/bins.rs
// Summary: Equal-width histogram buckets over a niced domain, with per-bucket entity membership.

use std::collections::BTreeSet;

use crate::geometry::DataInterval;
use crate::row::{KeySet, Row};
use crate::scale::bucket_edges;

/// One histogram bucket. Membership is `x0 <= v < x1`, except the last bucket
/// which also includes `x1` so the domain maximum is never dropped.
#[derive(Clone, Debug, PartialEq)]
pub struct Bin {
    pub x0: f64,
    pub x1: f64,
    pub count: usize,
    pub keys: KeySet,
    /// Display names of the member entities, sorted (tooltip content).
    pub names: Vec<String>,
}

impl Bin {
    pub fn overlaps(&self, range: &DataInterval) -> bool {
        range.overlaps(self.x0, self.x1)
    }

    pub fn contains_any(&self, keys: &KeySet) -> bool {
        self.keys.iter().any(|k| keys.contains(k))
    }
}

/// Index of the bucket holding `value` given ascending `edges`, `None` outside.
pub fn bucket_of(value: f64, edges: &[f64]) -> Option<usize> {
    let n = edges.len().checked_sub(1)?;
    if n == 0 || value < edges[0] || value > edges[n] {
        return None;
    }
    // partition_point gives the first edge > value
    let i = edges.partition_point(|&e| e <= value);
    Some(i.saturating_sub(1).min(n - 1))
}

/// Bucket `metric` over `rows` across `domain` (expected niced with `bin_count`).
/// Rows without a value for `metric` are skipped.
pub fn bin_rows<'a, I>(rows: I, metric: &str, domain: (f64, f64), bin_count: usize) -> Vec<Bin>
where
    I: IntoIterator<Item = &'a Row>,
{
    let edges = bucket_edges(domain.0, domain.1, bin_count);
    let mut bins: Vec<Bin> = edges
        .windows(2)
        .map(|w| Bin { x0: w[0], x1: w[1], count: 0, keys: KeySet::new(), names: Vec::new() })
        .collect();
    if bins.is_empty() {
        return bins;
    }
    let mut names: Vec<BTreeSet<String>> = vec![BTreeSet::new(); bins.len()];
    for row in rows {
        let Some(v) = row.metric(metric) else { continue };
        if let Some(i) = bucket_of(v, &edges) {
            bins[i].count += 1;
            bins[i].keys.insert(row.key());
            names[i].insert(row.entity.clone());
        }
    }
    for (bin, n) in bins.iter_mut().zip(names) {
        bin.names = n.into_iter().collect();
    }
    bins
}
