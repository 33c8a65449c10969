use backtester::BacktestError;
use core_types::SeriesError;
use strategies::StrategyError;
use thiserror::Error;
use volatility::VolatilityError;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PortfolioError {
    #[error("Portfolio contains no assets")]
    NoAssets,

    #[error("Asset '{0}' has no configured weight")]
    MissingWeight(String),

    #[error("Invalid portfolio weights: {0}")]
    InvalidWeights(String),

    #[error("Volatility estimation failed for asset '{asset}': {source}")]
    Volatility {
        asset: String,
        source: VolatilityError,
    },

    #[error("Strategy evaluation failed for asset '{asset}': {source}")]
    Strategy {
        asset: String,
        source: StrategyError,
    },

    #[error("Backtest failed for asset '{asset}': {source}")]
    Backtest {
        asset: String,
        source: BacktestError,
    },

    #[error(transparent)]
    Series(#[from] SeriesError),
}
