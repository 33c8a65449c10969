use core_types::SeriesError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum VolatilityError {
    #[error("Rolling window must be at least 2, got {0}")]
    InvalidWindow(usize),

    #[error("EWMA decay must lie strictly between 0 and 1, got {0}")]
    InvalidLambda(f64),

    #[error(transparent)]
    Series(#[from] SeriesError),
}
