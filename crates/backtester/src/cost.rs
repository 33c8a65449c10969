use crate::error::BacktestError;
use core_types::{SeriesError, TimeSeries};

/// Flat per-unit-turnover transaction cost model.
///
/// Turnover at `t` is `|exposure_t - exposure_{t-1}|`, with zero turnover at
/// the first observation (no prior position). The cost drag is symmetric:
/// increasing and decreasing exposure cost the same.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CostModel {
    cost_rate: f64,
    trading_days: u32,
}

impl CostModel {
    /// `cost_rate` is the cost per unit of exposure change per period
    /// (0.001 = 10 bps).
    pub fn new(cost_rate: f64, trading_days: u32) -> Result<Self, BacktestError> {
        if !(cost_rate.is_finite() && cost_rate >= 0.0) {
            return Err(BacktestError::InvalidCostRate(cost_rate));
        }
        Ok(Self {
            cost_rate,
            trading_days,
        })
    }

    /// Absolute period-over-period change in exposure, zero at the origin.
    pub fn turnover(&self, exposure: &TimeSeries) -> TimeSeries {
        let points = exposure.points();
        let turnover = points
            .iter()
            .enumerate()
            .map(|(i, &(date, value))| {
                if i == 0 {
                    (date, 0.0)
                } else {
                    (date, (value - points[i - 1].1).abs())
                }
            })
            .collect();
        TimeSeries::new(turnover)
            .unwrap_or_else(|_| unreachable!("exposure dates are strictly increasing"))
    }

    /// Mean per-period turnover scaled to a yearly figure.
    pub fn annualized_turnover(&self, turnover: &TimeSeries) -> Result<f64, BacktestError> {
        if turnover.is_empty() {
            return Err(SeriesError::Empty.into());
        }
        let mean = turnover.values().sum::<f64>() / turnover.len() as f64;
        Ok(mean * self.trading_days as f64)
    }

    /// Per-period cost drag: `turnover_t × cost_rate`.
    pub fn cost_drag(&self, turnover: &TimeSeries) -> TimeSeries {
        turnover.map(|t| t * self.cost_rate)
    }

    /// Net returns: gross strategy returns minus the cost drag, inner-joined
    /// on date. Re-accumulate with `TimeSeries::accumulate` for net equity.
    pub fn net_returns(&self, gross: &TimeSeries, turnover: &TimeSeries) -> TimeSeries {
        gross.sub(&self.cost_drag(turnover))
    }
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
                    NaiveDate::from_ymd_opt(2024, 5, 1).unwrap() + chrono::Days::new(i as u64),
                    v,
                )
            })
            .collect();
        TimeSeries::new(points).unwrap()
    }

    #[test]
    fn turnover_is_absolute_exposure_change() {
        let model = CostModel::new(0.001, 252).unwrap();
        let turnover = model.turnover(&series(&[1.0, 1.5, 1.5, 0.5]));
        assert_eq!(
            turnover.values().collect::<Vec<_>>(),
            vec![0.0, 0.5, 0.0, 1.0]
        );
    }

    #[test]
    fn annualized_turnover_scales_the_mean() {
        let model = CostModel::new(0.001, 252).unwrap();
        let turnover = model.turnover(&series(&[1.0, 1.5, 1.5, 0.5]));
        let annual = model.annualized_turnover(&turnover).unwrap();
        // mean([0, 0.5, 0, 1.0]) × 252 = 94.5
        assert!((annual - 94.5).abs() < 1e-12);
    }

    #[test]
    fn cost_drag_is_symmetric_in_direction() {
        let model = CostModel::new(0.001, 252).unwrap();
        let up = model.cost_drag(&model.turnover(&series(&[1.0, 2.0])));
        let down = model.cost_drag(&model.turnover(&series(&[2.0, 1.0])));
        assert_eq!(
            up.values().collect::<Vec<_>>(),
            down.values().collect::<Vec<_>>()
        );
    }

    #[test]
    fn net_returns_subtract_the_drag() {
        let model = CostModel::new(0.01, 252).unwrap();
        let gross = series(&[0.05, 0.05]);
        let turnover = model.turnover(&series(&[1.0, 2.0]));
        let net: Vec<f64> = model.net_returns(&gross, &turnover).values().collect();
        assert!((net[0] - 0.05).abs() < 1e-12);
        assert!((net[1] - 0.04).abs() < 1e-12);
    }

    #[test]
    fn negative_cost_rate_is_rejected() {
        assert!(matches!(
            CostModel::new(-0.001, 252),
            Err(BacktestError::InvalidCostRate(_))
        ));
    }
}
