// File: crates/demo/src/load.rs
// Summary: Indicator CSV -> Dataset, and the region set the map views draw.

use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use anyhow::{bail, Context, Result};
use dash_core::{Dataset, GeometrySet, Row};

pub fn load_dataset(path: &Path) -> Result<Dataset> {
    let file = std::fs::File::open(path).with_context(|| format!("opening {}", path.display()))?;
    read_dataset(file).with_context(|| format!("reading {}", path.display()))
}

/// `Entity`, `Code` and `Year` are matched case-insensitively; every other
/// column is a metric. Empty or unparsable cells become nulls. Rows without a
/// parsable year are skipped.
pub fn read_dataset<R: Read>(reader: R) -> Result<Dataset> {
    let mut rdr = csv::ReaderBuilder::new().has_headers(true).trim(csv::Trim::All).from_reader(reader);
    let headers: Vec<String> = rdr.headers()?.iter().map(str::to_string).collect();
    let find = |name: &str| headers.iter().position(|h| h.eq_ignore_ascii_case(name));
    let (Some(i_entity), Some(i_year)) = (find("entity"), find("year")) else {
        bail!("CSV needs Entity and Year columns, found {headers:?}");
    };
    let i_code = find("code");
    let metric_cols: Vec<(usize, String)> = headers
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != i_entity && *i != i_year && Some(*i) != i_code)
        .map(|(i, h)| (i, h.clone()))
        .collect();
    tracing::debug!(metrics = metric_cols.len(), "csv header parsed");

    let mut rows = Vec::new();
    let mut skipped = 0usize;
    for rec in rdr.records() {
        let rec = rec?;
        let Some(year) = rec.get(i_year).and_then(|s| s.parse::<i32>().ok()) else {
            skipped += 1;
            continue;
        };
        let entity = rec.get(i_entity).unwrap_or_default();
        let code = i_code.and_then(|i| rec.get(i)).filter(|c| !c.is_empty());
        let mut row = Row::new(entity, code, year);
        for (i, name) in &metric_cols {
            let value = rec.get(*i).and_then(|s| s.parse::<f64>().ok());
            row = row.with_metric(name.as_str(), value);
        }
        rows.push(row);
    }
    if skipped > 0 {
        tracing::warn!(skipped, "rows without a parsable year");
    }
    let metrics = metric_cols.into_iter().map(|(_, name)| name).collect();
    Ok(Dataset::new(metrics, rows))
}

/// Regions named by `codes`, or every code in the dataset when empty. Display
/// names come from the rows where available.
pub fn geometry_for(dataset: &Dataset, codes: &[String]) -> GeometrySet {
    let names: BTreeMap<&str, &str> =
        dataset.rows.iter().filter_map(|r| Some((r.code.as_deref()?, r.entity.as_str()))).collect();
    if codes.is_empty() {
        return names.into_iter().collect();
    }
    codes.iter().map(|c| (c.clone(), names.get(c.as_str()).copied().unwrap_or(c.as_str()).to_string())).collect()
}
