use crate::aggregate::equal_weight;
use crate::error::PortfolioError;
use backtester::apply_exposure;
use core_types::TimeSeries;
use std::collections::BTreeMap;
use strategies::{momentum_signal, vol_target_exposure, StrategyError};
use volatility::VolEstimator;

/// Parameters for the composite momentum × vol-target portfolio run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MomentumPortfolioParams {
    pub lookback: usize,
    pub vol_window: usize,
    pub target_vol: f64,
    pub min_exposure: f64,
    pub max_exposure: f64,
    pub trading_days: u32,
}

/// The aggregated result of a multi-asset run.
#[derive(Debug, Clone, PartialEq)]
pub struct PortfolioOutcome {
    /// Equal-weight mean of the per-asset strategy returns.
    pub portfolio_returns: TimeSeries,
    /// Equity curve accumulated from the portfolio returns.
    pub equity: TimeSeries,
    /// Per-asset strategy return series, for inspection.
    pub per_asset_returns: BTreeMap<String, TimeSeries>,
    /// Per-asset combined exposure as actually held (already lagged), for
    /// turnover accounting and presentation.
    pub per_asset_exposure: BTreeMap<String, TimeSeries>,
}

/// Runs the momentum × volatility-target strategy on every asset and
/// aggregates the results equal-weight.
///
/// Per asset: a binary momentum signal and a vol-target exposure are each
/// lagged by one period, multiplied into a combined exposure, and applied to
/// the asset's log returns. Any single-asset failure aborts the whole run;
/// there are no partial portfolios.
pub fn run_momentum_portfolio(
    prices_by_asset: &BTreeMap<String, TimeSeries>,
    params: &MomentumPortfolioParams,
) -> Result<PortfolioOutcome, PortfolioError> {
    if prices_by_asset.is_empty() {
        return Err(PortfolioError::NoAssets);
    }

    let mut per_asset_returns = BTreeMap::new();
    let mut per_asset_exposure = BTreeMap::new();
    for (asset, prices) in prices_by_asset {
        tracing::debug!(asset, "running momentum x vol-target leg");

        let returns = prices.log_returns()?;

        let signal = momentum_signal(prices, params.lookback)
            .and_then(|s| s.lag(1).map_err(StrategyError::from))
            .map_err(|source| PortfolioError::Strategy {
                asset: asset.clone(),
                source,
            })?;

        let vol = VolEstimator::Rolling {
            window: params.vol_window,
        }
        .annualized(&returns, params.trading_days)
        .map_err(|source| PortfolioError::Volatility {
            asset: asset.clone(),
            source,
        })?;

        let exposure = vol_target_exposure(
            &vol,
            params.target_vol,
            params.min_exposure,
            params.max_exposure,
        )
        .and_then(|e| e.lag(1).map_err(StrategyError::from))
        .map_err(|source| PortfolioError::Strategy {
            asset: asset.clone(),
            source,
        })?;

        let combined = signal.combine(&exposure);
        let outcome = apply_exposure(&returns, &combined).map_err(|source| {
            PortfolioError::Backtest {
                asset: asset.clone(),
                source,
            }
        })?;

        per_asset_exposure.insert(asset.clone(), combined.series().clone());
        per_asset_returns.insert(asset.clone(), outcome.strategy_returns);
    }

    let portfolio_returns = equal_weight(&per_asset_returns)?;
    let equity = portfolio_returns.accumulate();

    Ok(PortfolioOutcome {
        portfolio_returns,
        equity,
        per_asset_returns,
        per_asset_exposure,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn trending_prices(n: usize, step: f64) -> TimeSeries {
        let points = (0..n)
            .map(|i| {
                (
                    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap() + chrono::Days::new(i as u64),
                    100.0 + step * i as f64,
                )
            })
            .collect();
        TimeSeries::new(points).unwrap()
    }

    fn params() -> MomentumPortfolioParams {
        MomentumPortfolioParams {
            lookback: 3,
            vol_window: 3,
            target_vol: 0.3,
            min_exposure: 0.0,
            max_exposure: 2.0,
            trading_days: 252,
        }
    }

    #[test]
    fn uptrend_produces_positive_portfolio_equity() {
        let mut prices = BTreeMap::new();
        prices.insert("a".to_string(), trending_prices(30, 1.0));
        prices.insert("b".to_string(), trending_prices(30, 0.5));
        let outcome = run_momentum_portfolio(&prices, &params()).unwrap();
        assert!(!outcome.portfolio_returns.is_empty());
        // Strictly rising prices with a long/flat strategy never lose.
        assert!(outcome.equity.last().unwrap().1 >= 1.0);
        assert_eq!(outcome.per_asset_returns.len(), 2);
    }

    #[test]
    fn downtrend_keeps_the_strategy_flat() {
        let mut prices = BTreeMap::new();
        prices.insert("a".to_string(), trending_prices(30, -1.0));
        let outcome = run_momentum_portfolio(&prices, &params()).unwrap();
        // Momentum signal is 0 throughout, so equity never moves.
        assert!(outcome.equity.values().all(|e| (e - 1.0).abs() < 1e-12));
    }

    #[test]
    fn too_short_history_fails_the_run() {
        let mut prices = BTreeMap::new();
        prices.insert("a".to_string(), trending_prices(3, 1.0));
        assert!(run_momentum_portfolio(&prices, &params()).is_err());
    }
}
