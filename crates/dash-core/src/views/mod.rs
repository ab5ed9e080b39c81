// File: crates/dash-core/src/views/mod.rs
// Summary: Concrete view adapters (scatter, histogram, choropleth).

pub mod choropleth;
pub mod histogram;
pub mod scatter;

pub use choropleth::{ChoroplethView, GeometrySet, MapDatum};
pub use histogram::{HistogramView, DEFAULT_BIN_COUNT};
pub use scatter::ScatterView;
