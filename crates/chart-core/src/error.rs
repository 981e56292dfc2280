// File: crates/chart-core/src/error.rs
// Summary: Error type for the few fallible core operations (parsing colors and easing names).

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ChartError {
    #[error("invalid color literal '{0}'")]
    InvalidColor(String),
    #[error("unknown easing curve '{0}'")]
    UnknownEasing(String),
}

pub type Result<T> = std::result::Result<T, ChartError>;
