// File: crates/chart-core/src/error.rs
// Summary: Error type for the fallible edges of the engine (file-backed sources, configuration).

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("tick size must be positive, got {0}")]
    InvalidTickSize(f64),
    #[error("unknown time frame '{0}'")]
    UnknownTimeFrame(String),
}

pub type Result<T> = std::result::Result<T, ChartError>;
