//! # Meridian Backtest Core
//!
//! Turns a return series and a lagged exposure series into realized strategy
//! returns and an equity curve.
//!
//! ## Architectural Principles
//!
//! - **No lag is applied here.** The exposure input is `LaggedSeries`, which
//!   can only be produced by `TimeSeries::lag`. Whatever reaches this crate
//!   was decided strictly before the date it is applied to; this crate only
//!   aligns and multiplies.
//! - **Inner-join alignment:** only dates present in both the return and
//!   exposure series contribute. Unmatched dates are dropped, never filled.
//! - **No partial results:** a failed computation yields no equity curve.
//!
//! The `cost` module layers a flat per-unit-turnover transaction cost on top
//! of the gross result.

pub mod cost;
pub mod error;

pub use cost::CostModel;
pub use error::BacktestError;

use core_types::{LaggedSeries, TimeSeries};

/// The result of applying an exposure series to a return series.
#[derive(Debug, Clone, PartialEq)]
pub struct BacktestOutcome {
    /// Per-period realized strategy returns: aligned return × lagged exposure.
    pub strategy_returns: TimeSeries,
    /// Cumulative product of `(1 + strategy return)`, anchored at 1.0.
    pub equity: TimeSeries,
}

/// Applies an already-lagged exposure series to a return series.
///
/// 1. Inner-join both series on date (unmatched dates dropped).
/// 2. Multiply elementwise.
/// 3. Accumulate `(1 + r)` into the equity curve.
///
/// Composite strategies multiply their lagged exposures together
/// (`LaggedSeries::combine`) before calling this.
pub fn apply_exposure(
    returns: &TimeSeries,
    exposure: &LaggedSeries,
) -> Result<BacktestOutcome, BacktestError> {
    let (aligned_returns, aligned_exposure) = returns.align(exposure.series());
    if aligned_returns.is_empty() {
        return Err(BacktestError::NoOverlap);
    }

    tracing::debug!(
        n = aligned_returns.len(),
        "applying exposure to aligned returns"
    );

    let strategy_returns = aligned_returns.mul(&aligned_exposure);
    let equity = strategy_returns.accumulate();

    Ok(BacktestOutcome {
        strategy_returns,
        equity,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn series(values: &[f64]) -> TimeSeries {
        let points = values
            .iter()
            .enumerate()
            .map(|(i, &v)| {
                (
                    NaiveDate::from_ymd_opt(2024, 4, 1).unwrap() + chrono::Days::new(i as u64),
                    v,
                )
            })
            .collect();
        TimeSeries::new(points).unwrap()
    }

    #[test]
    fn equity_is_flat_while_exposure_is_zero() {
        let returns = series(&[0.05, -0.03, 0.02, 0.04]);
        // Exposure decided one day earlier: zero over the whole range.
        let exposure = series(&[0.0, 0.0, 0.0, 0.0]).lag(1).unwrap();
        let outcome = apply_exposure(&returns, &exposure).unwrap();
        assert!(outcome.equity.values().all(|e| (e - 1.0).abs() < 1e-12));
    }

    #[test]
    fn full_exposure_reproduces_lagged_asset_returns() {
        let returns = series(&[0.01, 0.02, -0.01]);
        let exposure = series(&[1.0, 1.0, 1.0]).lag(1).unwrap();
        let outcome = apply_exposure(&returns, &exposure).unwrap();
        // The first return has no prior-day decision and is dropped by the
        // join; the remaining two are passed through at full exposure.
        assert_eq!(outcome.strategy_returns.len(), 2);
        let got: Vec<f64> = outcome.strategy_returns.values().collect();
        assert!((got[0] - 0.02).abs() < 1e-12);
        assert!((got[1] + 0.01).abs() < 1e-12);

        let final_equity = outcome.equity.last().unwrap().1;
        assert!((final_equity - 1.02 * 0.99).abs() < 1e-12);
    }

    #[test]
    fn half_exposure_halves_returns() {
        let returns = series(&[0.0, 0.04]);
        let exposure = series(&[0.5, 0.5]).lag(1).unwrap();
        let outcome = apply_exposure(&returns, &exposure).unwrap();
        assert!((outcome.strategy_returns.last().unwrap().1 - 0.02).abs() < 1e-12);
    }

    #[test]
    fn disjoint_series_are_an_error() {
        let returns = series(&[0.01, 0.02]);
        let later = TimeSeries::new(vec![
            (NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(), 1.0),
            (NaiveDate::from_ymd_opt(2025, 1, 2).unwrap(), 1.0),
        ])
        .unwrap()
        .lag(1)
        .unwrap();
        assert_eq!(
            apply_exposure(&returns, &later),
            Err(BacktestError::NoOverlap)
        );
    }
}
