// File: crates/dash-core/src/error.rs
// Summary: Error type for contract violations in the coordination engine.
// Data absence (null codes/metrics, out-of-range years, empty snapshots) is never an error.

use thiserror::Error;

use crate::selection::ViewId;

#[derive(Debug, Error, PartialEq)]
pub enum DashError {
    #[error("view `{0}` is not registered")]
    UnknownView(ViewId),

    #[error("view `{0}` is already registered")]
    DuplicateView(ViewId),

    #[error("unknown metric `{0}`")]
    UnknownMetric(String),

    #[error("view `{view}` does not support {what}")]
    Unsupported { view: ViewId, what: &'static str },

    #[error("invalid configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, DashError>;
