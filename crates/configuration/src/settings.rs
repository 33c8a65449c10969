use crate::error::ConfigError;
use serde::Deserialize;

/// The root configuration structure for the entire application.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub backtest: BacktestParams,
    pub momentum: MomentumParams,
    pub volatility: VolatilityParams,
    pub vol_target: VolTargetParams,
    pub regime: RegimeParams,
    pub grid: GridParams,
    pub data: DataParams,
}

/// Parameters shared by every backtest run.
#[derive(Debug, Clone, Deserialize)]
pub struct BacktestParams {
    /// Annualization constant: the number of trading periods per year.
    pub trading_days: u32,
    /// Flat transaction cost per unit of exposure change (0.001 = 10 bps).
    pub cost_rate: f64,
}

/// Parameters for the long/flat time-series momentum signal.
#[derive(Debug, Clone, Deserialize)]
pub struct MomentumParams {
    /// How many periods back the current price is compared against.
    pub lookback: usize,
}

/// Parameters for the realized-volatility estimators.
#[derive(Debug, Clone, Deserialize)]
pub struct VolatilityParams {
    /// Trailing window for the rolling estimator.
    pub window: usize,
    /// Decay factor for the EWMA (RiskMetrics) estimator.
    pub ewma_lambda: f64,
}

/// Parameters for volatility-target position sizing.
#[derive(Debug, Clone, Deserialize)]
pub struct VolTargetParams {
    /// Annualized volatility the strategy aims to run at.
    pub target_vol: f64,
    pub min_exposure: f64,
    pub max_exposure: f64,
}

/// How much history the volatility z-score is standardized over.
///
/// `FullHistory` reproduces the retrospective research behavior: mean and
/// standard deviation are taken over the entire series, which makes the
/// regime label non-causal. `Trailing` standardizes over a trailing window
/// only, which a live deployment can reproduce.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZScoreWindow {
    FullHistory,
    Trailing { days: usize },
}

/// Parameters for the volatility-regime classifier.
#[derive(Debug, Clone, Deserialize)]
pub struct RegimeParams {
    /// Z-score threshold separating the three regimes.
    pub threshold: f64,
    pub z_score_window: ZScoreWindow,
    pub exposure: RegimeExposureLevels,
}

/// Exposure level assigned to each volatility regime.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct RegimeExposureLevels {
    pub low_vol: f64,
    pub neutral: f64,
    pub high_vol: f64,
}

/// The parameter space swept by the grid search.
#[derive(Debug, Clone, Deserialize)]
pub struct GridParams {
    pub windows: Vec<usize>,
    pub target_vols: Vec<f64>,
}

/// Where the price CSV files live.
#[derive(Debug, Clone, Deserialize)]
pub struct DataParams {
    pub csv_dir: String,
}

impl Config {
    /// Validates every scalar parameter at the configuration boundary, so
    /// the pure computation layers never see a nonsensical value.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.backtest.trading_days == 0 {
            return Err(ConfigError::invalid(
                "backtest.trading_days",
                "must be positive",
            ));
        }
        if !(self.backtest.cost_rate.is_finite() && self.backtest.cost_rate >= 0.0) {
            return Err(ConfigError::invalid(
                "backtest.cost_rate",
                "must be finite and non-negative",
            ));
        }
        if self.momentum.lookback == 0 {
            return Err(ConfigError::invalid("momentum.lookback", "must be positive"));
        }
        if self.volatility.window < 2 {
            return Err(ConfigError::invalid(
                "volatility.window",
                "must be at least 2 for a sample standard deviation",
            ));
        }
        if !(self.volatility.ewma_lambda > 0.0 && self.volatility.ewma_lambda < 1.0) {
            return Err(ConfigError::invalid(
                "volatility.ewma_lambda",
                "must lie strictly between 0 and 1",
            ));
        }
        if !(self.vol_target.target_vol.is_finite() && self.vol_target.target_vol > 0.0) {
            return Err(ConfigError::invalid(
                "vol_target.target_vol",
                "must be finite and positive",
            ));
        }
        if !(self.vol_target.min_exposure.is_finite() && self.vol_target.max_exposure.is_finite())
        {
            return Err(ConfigError::invalid(
                "vol_target",
                "exposure bounds must be finite",
            ));
        }
        if self.vol_target.min_exposure > self.vol_target.max_exposure {
            return Err(ConfigError::invalid(
                "vol_target",
                "min_exposure must not exceed max_exposure",
            ));
        }
        if !(self.regime.threshold.is_finite() && self.regime.threshold >= 0.0) {
            return Err(ConfigError::invalid(
                "regime.threshold",
                "must be finite and non-negative",
            ));
        }
        if let ZScoreWindow::Trailing { days } = self.regime.z_score_window {
            if days < 2 {
                return Err(ConfigError::invalid(
                    "regime.z_score_window",
                    "trailing window must be at least 2",
                ));
            }
        }
        for level in [
            self.regime.exposure.low_vol,
            self.regime.exposure.neutral,
            self.regime.exposure.high_vol,
        ] {
            if !level.is_finite() {
                return Err(ConfigError::invalid(
                    "regime.exposure",
                    "exposure levels must be finite",
                ));
            }
        }
        if self.grid.windows.is_empty() || self.grid.target_vols.is_empty() {
            return Err(ConfigError::invalid(
                "grid",
                "windows and target_vols must each contain at least one value",
            ));
        }
        if self.grid.windows.iter().any(|&w| w < 2) {
            return Err(ConfigError::invalid(
                "grid.windows",
                "every window must be at least 2",
            ));
        }
        if self
            .grid
            .target_vols
            .iter()
            .any(|&t| !(t.is_finite() && t > 0.0))
        {
            return Err(ConfigError::invalid(
                "grid.target_vols",
                "every target must be finite and positive",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config() -> Config {
        Config {
            backtest: BacktestParams {
                trading_days: 252,
                cost_rate: 0.001,
            },
            momentum: MomentumParams { lookback: 252 },
            volatility: VolatilityParams {
                window: 30,
                ewma_lambda: 0.94,
            },
            vol_target: VolTargetParams {
                target_vol: 0.3,
                min_exposure: 0.0,
                max_exposure: 2.0,
            },
            regime: RegimeParams {
                threshold: 0.5,
                z_score_window: ZScoreWindow::FullHistory,
                exposure: RegimeExposureLevels {
                    low_vol: 1.5,
                    neutral: 1.0,
                    high_vol: 0.3,
                },
            },
            grid: GridParams {
                windows: vec![10, 30],
                target_vols: vec![0.2, 0.3],
            },
            data: DataParams {
                csv_dir: "data".to_string(),
            },
        }
    }

    #[test]
    fn default_shape_validates() {
        assert!(base_config().validate().is_ok());
    }

    #[test]
    fn lambda_outside_unit_interval_is_rejected() {
        let mut config = base_config();
        config.volatility.ewma_lambda = 1.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn inverted_exposure_bounds_are_rejected() {
        let mut config = base_config();
        config.vol_target.min_exposure = 3.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn zero_target_vol_is_rejected() {
        let mut config = base_config();
        config.vol_target.target_vol = 0.0;
        assert!(config.validate().is_err());
    }
}
