use core_types::{Regime, SeriesError};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum StrategyError {
    #[error("Invalid strategy parameters: {0}")]
    InvalidParameters(String),

    #[error("Volatility series has zero dispersion, z-scores are undefined")]
    ZeroDispersion,

    #[error("Regime '{0}' has no exposure mapping")]
    UnmappedRegime(Regime),

    #[error("'{0}' is not a recognized regime label")]
    UnknownRegimeLabel(String),

    #[error(transparent)]
    Series(#[from] SeriesError),
}
