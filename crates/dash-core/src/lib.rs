// File: crates/dash-core/src/lib.rs
// Summary: Core library entry point; exports the linked-view coordination API.

pub mod types;
pub mod geometry;
pub mod row;
pub mod error;
pub mod dataset;
pub mod scale;
pub mod brush;
pub mod bins;
pub mod selection;
pub mod frame;
pub mod view;
pub mod views;
pub mod range;
pub mod coordinator;
pub mod config;
pub mod dashboard;

pub use types::{Margins, Size, Viewport};
pub use geometry::{DataInterval, DataRegion, PixelInterval, PixelRect};
pub use row::{keys, Dataset, EntityKey, KeySet, Row};
pub use error::{DashError, Result};
pub use dataset::{latest_by_entity, DatasetIndex, DatasetSnapshot, YearRange};
pub use scale::LinearScale;
pub use brush::BrushGeometryMapper;
pub use bins::Bin;
pub use selection::{
    ChangeCause, Emphasis, Origin, Selection, SelectionChange, SelectionEvent, SelectionMode, SelectionState, ViewId,
};
pub use frame::{Mark, OverlayShape, RegionFill, ViewFrame, ViewKind};
pub use view::{Gesture, ViewAdapter};
pub use views::{ChoroplethView, GeometrySet, HistogramView, ScatterView};
pub use range::{RangeFilter, YearBrush};
pub use coordinator::SelectionCoordinator;
pub use config::DashboardConfig;
pub use dashboard::{Dashboard, DashboardFrame, FilterState, SelectionObserver};
