use serde::Serialize;

/// A standardized report of a strategy's risk-adjusted performance.
///
/// `sharpe` and `calmar` may be non-finite (`NaN` or infinite) when their
/// denominators are zero; consumers must handle that explicitly rather than
/// assume finite values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PerformanceReport {
    /// Compound annual growth rate implied by the final equity value.
    pub cagr: f64,
    /// Sample standard deviation of returns, annualized.
    pub annualized_vol: f64,
    /// Annualized mean return over annualized vol (zero risk-free rate).
    pub sharpe: f64,
    /// Largest peak-to-trough decline of the equity curve; always <= 0.
    pub max_drawdown: f64,
    /// CAGR over absolute max drawdown.
    pub calmar: f64,
    /// Number of return periods the metrics were computed over.
    pub n_periods: usize,
}
