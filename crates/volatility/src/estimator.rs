use crate::error::VolatilityError;
use core_types::{stats, SeriesError, TimeSeries};

/// Annualized realized-volatility estimator.
///
/// Both variants consume a log-return series and produce a volatility series
/// in annualized terms; callers choose between responsiveness (`Ewma`) and
/// stability (`Rolling`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum VolEstimator {
    /// Sample standard deviation over a trailing window of `window` returns.
    Rolling { window: usize },
    /// RiskMetrics recursion `v_t = λ·v_{t-1} + (1-λ)·r_t²`, seeded with
    /// `v_0 = r_0²`.
    Ewma { lambda: f64 },
}

impl VolEstimator {
    /// Computes the annualized realized-volatility series for `returns`.
    ///
    /// The rolling variant drops the first `window - 1` dates; the EWMA
    /// variant is defined at every input date.
    pub fn annualized(
        &self,
        returns: &TimeSeries,
        trading_days: u32,
    ) -> Result<TimeSeries, VolatilityError> {
        match *self {
            VolEstimator::Rolling { window } => rolling(returns, window, trading_days),
            VolEstimator::Ewma { lambda } => ewma(returns, lambda, trading_days),
        }
    }
}

fn rolling(
    returns: &TimeSeries,
    window: usize,
    trading_days: u32,
) -> Result<TimeSeries, VolatilityError> {
    if window < 2 {
        return Err(VolatilityError::InvalidWindow(window));
    }
    if returns.len() < window {
        return Err(SeriesError::InsufficientData {
            needed: window,
            got: returns.len(),
        }
        .into());
    }

    tracing::debug!(window, n = returns.len(), "computing rolling volatility");

    let annualize = (trading_days as f64).sqrt();
    let values: Vec<f64> = returns.values().collect();
    let mut points = Vec::with_capacity(returns.len() - window + 1);
    for (i, &(date, _)) in returns.points().iter().enumerate().skip(window - 1) {
        let slice = &values[i + 1 - window..=i];
        let std = stats::sample_std(slice).ok_or(VolatilityError::InvalidWindow(window))?;
        points.push((date, std * annualize));
    }

    Ok(TimeSeries::new(points)?)
}

fn ewma(
    returns: &TimeSeries,
    lambda: f64,
    trading_days: u32,
) -> Result<TimeSeries, VolatilityError> {
    if !(lambda > 0.0 && lambda < 1.0) {
        return Err(VolatilityError::InvalidLambda(lambda));
    }
    if returns.is_empty() {
        return Err(SeriesError::Empty.into());
    }

    tracing::debug!(lambda, n = returns.len(), "computing EWMA volatility");

    let annualize = (trading_days as f64).sqrt();
    let mut points = Vec::with_capacity(returns.len());
    let mut variance = 0.0;

    // Strict temporal order: each variance depends on the previous one.
    for (i, &(date, r)) in returns.points().iter().enumerate() {
        variance = if i == 0 {
            r * r
        } else {
            lambda * variance + (1.0 - lambda) * r * r
        };
        points.push((date, variance.sqrt() * annualize));
    }

    Ok(TimeSeries::new(points)?)
}
