use chrono::NaiveDate;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SeriesError {
    #[error("Series is empty")]
    Empty,

    #[error("Insufficient data: operation needs {needed} observations, series has {got}")]
    InsufficientData { needed: usize, got: usize },

    #[error("Timestamps must be strictly increasing: {prev} is not before {next}")]
    NonMonotonic { prev: NaiveDate, next: NaiveDate },

    #[error("Lag must be at least one period")]
    ZeroLag,
}
