// File: crates/dash-core/src/config.rs
// Summary: Dashboard layout/metric configuration with serde defaults.

use serde::Deserialize;

use crate::error::{DashError, Result};
use crate::row::Dataset;
use crate::types::{Margins, Size, HISTOGRAM_SIZE, MAP_SIZE, SCATTER_SIZE, YEAR_BRUSH_SIZE};
use crate::views::DEFAULT_BIN_COUNT;

pub const LIFE_EXPECTANCY: &str = "Life expectancy at birth (years)";
pub const HEALTH_EXPENDITURE: &str = "Healthcare expenditure (% of GDP)";

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct ScatterConfig {
    pub x_metric: String,
    pub y_metric: String,
    pub size: Size,
    pub margins: Margins,
}

impl Default for ScatterConfig {
    fn default() -> Self {
        Self {
            x_metric: HEALTH_EXPENDITURE.to_string(),
            y_metric: LIFE_EXPECTANCY.to_string(),
            size: SCATTER_SIZE,
            margins: Margins::scatter(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct HistogramConfig {
    pub metric: String,
    pub bin_count: usize,
    pub size: Size,
    pub margins: Margins,
}

impl HistogramConfig {
    pub fn for_metric(metric: &str) -> Self {
        Self { metric: metric.to_string(), ..Self::default() }
    }
}

impl Default for HistogramConfig {
    fn default() -> Self {
        Self {
            metric: LIFE_EXPECTANCY.to_string(),
            bin_count: DEFAULT_BIN_COUNT,
            size: HISTOGRAM_SIZE,
            margins: Margins::histogram(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    pub metric: String,
    pub size: Size,
    pub margins: Margins,
}

impl MapConfig {
    pub fn for_metric(metric: &str) -> Self {
        Self { metric: metric.to_string(), ..Self::default() }
    }
}

impl Default for MapConfig {
    fn default() -> Self {
        Self { metric: HEALTH_EXPENDITURE.to_string(), size: MAP_SIZE, margins: Margins::map() }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct YearBrushConfig {
    pub size: Size,
    pub margins: Margins,
}

impl Default for YearBrushConfig {
    fn default() -> Self {
        Self { size: YEAR_BRUSH_SIZE, margins: Margins::year_brush() }
    }
}

/// Which views to build and how. The default mirrors the health dashboard:
/// one scatterplot, a histogram and a map for each of the two indicators.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub scatter: Option<ScatterConfig>,
    pub histograms: Vec<HistogramConfig>,
    pub maps: Vec<MapConfig>,
    pub year_brush: YearBrushConfig,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            scatter: Some(ScatterConfig::default()),
            histograms: vec![HistogramConfig::for_metric(LIFE_EXPECTANCY), HistogramConfig::for_metric(HEALTH_EXPENDITURE)],
            maps: vec![MapConfig::for_metric(HEALTH_EXPENDITURE), MapConfig::for_metric(LIFE_EXPECTANCY)],
            year_brush: YearBrushConfig::default(),
        }
    }
}

impl DashboardConfig {
    /// Every referenced metric must exist in the dataset schema; bin counts must be positive.
    pub fn validate(&self, dataset: &Dataset) -> Result<()> {
        let mut metrics: Vec<&str> = Vec::new();
        if let Some(s) = &self.scatter {
            metrics.push(&s.x_metric);
            metrics.push(&s.y_metric);
        }
        metrics.extend(self.histograms.iter().map(|h| h.metric.as_str()));
        metrics.extend(self.maps.iter().map(|m| m.metric.as_str()));
        if let Some(m) = metrics.into_iter().find(|m| !dataset.has_metric(m)) {
            return Err(DashError::UnknownMetric(m.to_string()));
        }
        if self.histograms.iter().any(|h| h.bin_count == 0) {
            return Err(DashError::Config("histogram bin_count must be at least 1".into()));
        }
        Ok(())
    }
}
