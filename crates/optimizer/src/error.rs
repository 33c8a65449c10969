use analytics::AnalyticsError;
use backtester::BacktestError;
use portfolio::PortfolioError;
use strategies::StrategyError;
use thiserror::Error;
use volatility::VolatilityError;

#[derive(Error, Debug)]
pub enum OptimizerError {
    #[error("Parameter space is empty: need at least one window and one target vol")]
    EmptyParameterSpace,

    #[error("Progress bar template error: {0}")]
    ProgressBarTemplate(String),

    #[error("Volatility estimation failed for asset '{asset}': {source}")]
    Volatility {
        asset: String,
        source: VolatilityError,
    },

    #[error("Exposure mapping failed for asset '{asset}': {source}")]
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
    Portfolio(#[from] PortfolioError),

    #[error(transparent)]
    Analytics(#[from] AnalyticsError),
}

impl From<indicatif::style::TemplateError> for OptimizerError {
    fn from(error: indicatif::style::TemplateError) -> Self {
        OptimizerError::ProgressBarTemplate(error.to_string())
    }
}
