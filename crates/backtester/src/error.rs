use core_types::SeriesError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum BacktestError {
    #[error("Return and exposure series share no dates")]
    NoOverlap,

    #[error("Cost rate must be finite and non-negative, got {0}")]
    InvalidCostRate(f64),

    #[error(transparent)]
    Series(#[from] SeriesError),
}
