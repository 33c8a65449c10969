//! # Meridian Grid Search
//!
//! Sweeps the volatility-targeting strategy over a cartesian grid of
//! (volatility window × target vol) configurations and reports the headline
//! metrics for each one.
//!
//! ## Architectural Principles
//!
//! - **Independent cells:** every configuration reads the shared return
//!   series and writes only its own result row, so the sweep is parallelized
//!   across CPU cores with rayon.
//! - **One bad cell never aborts the sweep.** A configuration that fails
//!   (window longer than the data, say) is recorded as a failed row with its
//!   reason; the remaining cells still run. Single-strategy backtests fail
//!   fast instead; this policy is specific to sweeps.
//! - **Deterministic output:** rows come back in row-major grid order
//!   regardless of scheduling, so identical inputs give identical tables.

pub mod error;
pub mod generator;

pub use error::OptimizerError;
pub use generator::{parameter_grid, GridPoint};

use analytics::{compute_cagr, compute_max_drawdown, compute_sharpe};
use backtester::apply_exposure;
use core_types::TimeSeries;
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use serde::Serialize;
use std::collections::BTreeMap;
use strategies::{vol_target_exposure, StrategyError};
use volatility::VolEstimator;

/// Headline metrics for one completed grid configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GridMetrics {
    pub cagr: f64,
    pub sharpe: f64,
    pub max_drawdown: f64,
}

/// Result of one grid cell: either the metrics or the failure reason.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum GridOutcome {
    Completed { metrics: GridMetrics },
    Failed { reason: String },
}

/// One row of the sweep result table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GridRow {
    pub window: usize,
    pub target_vol: f64,
    #[serde(flatten)]
    pub outcome: GridOutcome,
}

/// The grid-search engine for the vol-target strategy.
pub struct GridSearch {
    windows: Vec<usize>,
    target_vols: Vec<f64>,
    min_exposure: f64,
    max_exposure: f64,
    trading_days: u32,
}

impl GridSearch {
    pub fn new(
        windows: Vec<usize>,
        target_vols: Vec<f64>,
        min_exposure: f64,
        max_exposure: f64,
        trading_days: u32,
    ) -> Result<Self, OptimizerError> {
        if windows.is_empty() || target_vols.is_empty() {
            return Err(OptimizerError::EmptyParameterSpace);
        }
        Ok(Self {
            windows,
            target_vols,
            min_exposure,
            max_exposure,
            trading_days,
        })
    }

    /// Runs the sweep over every (window, target_vol) combination against
    /// the given per-asset log-return series.
    pub fn run(
        &self,
        returns_by_asset: &BTreeMap<String, TimeSeries>,
    ) -> Result<Vec<GridRow>, OptimizerError> {
        let grid = parameter_grid(&self.windows, &self.target_vols);

        tracing::info!(
            cells = grid.len(),
            assets = returns_by_asset.len(),
            threads = rayon::current_num_threads(),
            "starting grid sweep"
        );

        let progress_bar = ProgressBar::new(grid.len() as u64);
        progress_bar.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")?
                .progress_chars("=>-"),
        );

        let rows = grid
            .par_iter()
            .map(|&point| {
                let outcome = match self.evaluate_cell(point, returns_by_asset) {
                    Ok(metrics) => GridOutcome::Completed { metrics },
                    Err(e) => {
                        tracing::warn!(
                            window = point.window,
                            target_vol = point.target_vol,
                            error = %e,
                            "grid cell failed"
                        );
                        GridOutcome::Failed {
                            reason: e.to_string(),
                        }
                    }
                };
                progress_bar.inc(1);
                GridRow {
                    window: point.window,
                    target_vol: point.target_vol,
                    outcome,
                }
            })
            .collect();

        progress_bar.finish_with_message("Grid sweep complete.");
        Ok(rows)
    }

    /// Runs the full pipeline for a single configuration: rolling vol →
    /// vol-target exposure → one-period lag → backtest per asset →
    /// equal-weight aggregation → metrics.
    fn evaluate_cell(
        &self,
        point: GridPoint,
        returns_by_asset: &BTreeMap<String, TimeSeries>,
    ) -> Result<GridMetrics, OptimizerError> {
        let mut strategy_returns = BTreeMap::new();

        for (asset, returns) in returns_by_asset {
            let vol = VolEstimator::Rolling {
                window: point.window,
            }
            .annualized(returns, self.trading_days)
            .map_err(|source| OptimizerError::Volatility {
                asset: asset.clone(),
                source,
            })?;

            let exposure = vol_target_exposure(
                &vol,
                point.target_vol,
                self.min_exposure,
                self.max_exposure,
            )
            .and_then(|e| e.lag(1).map_err(StrategyError::from))
            .map_err(|source| OptimizerError::Strategy {
                asset: asset.clone(),
                source,
            })?;

            let outcome = apply_exposure(returns, &exposure).map_err(|source| {
                OptimizerError::Backtest {
                    asset: asset.clone(),
                    source,
                }
            })?;

            strategy_returns.insert(asset.clone(), outcome.strategy_returns);
        }

        let portfolio_returns = portfolio::equal_weight(&strategy_returns)?;
        let equity = portfolio_returns.accumulate();

        Ok(GridMetrics {
            cagr: compute_cagr(&equity, self.trading_days)?,
            sharpe: compute_sharpe(&portfolio_returns, self.trading_days)?,
            max_drawdown: compute_max_drawdown(&equity)?,
        })
    }
}
