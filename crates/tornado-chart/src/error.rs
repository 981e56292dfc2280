// File: crates/tornado-chart/src/error.rs
// Summary: Errors raised while loading or converting a data view.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TornadoError {
    #[error("invalid data view JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("value column '{column}' has {actual} values, expected {expected}")]
    LengthMismatch { column: String, expected: usize, actual: usize },
}
