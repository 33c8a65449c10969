use crate::error::AnalyticsError;
use crate::report::PerformanceReport;
use core_types::{stats, SeriesError, TimeSeries};

/// Compound annual growth rate implied by the final equity value.
///
/// `CAGR = equity_final ^ (trading_days / n_periods) - 1`, where `n_periods`
/// is the length of the equity series and equity starts from 1.0.
pub fn compute_cagr(equity: &TimeSeries, trading_days: u32) -> Result<f64, AnalyticsError> {
    let (_, final_equity) = equity.last().ok_or(SeriesError::Empty)?;
    let exponent = trading_days as f64 / equity.len() as f64;
    Ok(final_equity.powf(exponent) - 1.0)
}

/// Sample standard deviation of per-period returns, annualized by
/// `sqrt(trading_days)`. `NaN` for a single observation.
pub fn compute_annualized_vol(
    returns: &TimeSeries,
    trading_days: u32,
) -> Result<f64, AnalyticsError> {
    if returns.is_empty() {
        return Err(SeriesError::Empty.into());
    }
    let values: Vec<f64> = returns.values().collect();
    let std = stats::sample_std(&values).unwrap_or(f64::NAN);
    Ok(std * (trading_days as f64).sqrt())
}

/// Annualized Sharpe ratio under a zero risk-free rate.
///
/// When the return dispersion is zero the ratio is undefined; the result is
/// a non-finite value (`NaN` or ±infinity), deliberately not coerced to 0.
pub fn compute_sharpe(returns: &TimeSeries, trading_days: u32) -> Result<f64, AnalyticsError> {
    if returns.is_empty() {
        return Err(SeriesError::Empty.into());
    }
    let values: Vec<f64> = returns.values().collect();
    let mean = stats::mean(&values).unwrap_or(f64::NAN);
    let std = stats::sample_std(&values).unwrap_or(f64::NAN);
    Ok(mean / std * (trading_days as f64).sqrt())
}

/// Largest peak-to-trough decline: `min(equity / running_max - 1)`.
/// Always <= 0.
pub fn compute_max_drawdown(equity: &TimeSeries) -> Result<f64, AnalyticsError> {
    if equity.is_empty() {
        return Err(SeriesError::Empty.into());
    }

    let mut peak = f64::MIN;
    let mut max_drawdown = 0.0_f64;
    for value in equity.values() {
        if value > peak {
            peak = value;
        }
        let drawdown = value / peak - 1.0;
        if drawdown < max_drawdown {
            max_drawdown = drawdown;
        }
    }
    Ok(max_drawdown)
}

/// Calmar ratio: CAGR over absolute max drawdown.
///
/// Non-finite when the drawdown is zero; reported as-is.
pub fn compute_calmar(cagr: f64, max_drawdown: f64) -> f64 {
    cagr / max_drawdown.abs()
}

/// Computes the full metric bundle from a strategy-return series and its
/// equity curve.
pub fn performance_report(
    returns: &TimeSeries,
    equity: &TimeSeries,
    trading_days: u32,
) -> Result<PerformanceReport, AnalyticsError> {
    let cagr = compute_cagr(equity, trading_days)?;
    let max_drawdown = compute_max_drawdown(equity)?;
    Ok(PerformanceReport {
        cagr,
        annualized_vol: compute_annualized_vol(returns, trading_days)?,
        sharpe: compute_sharpe(returns, trading_days)?,
        max_drawdown,
        calmar: compute_calmar(cagr, max_drawdown),
        n_periods: returns.len(),
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
                    NaiveDate::from_ymd_opt(2024, 7, 1).unwrap() + chrono::Days::new(i as u64),
                    v,
                )
            })
            .collect();
        TimeSeries::new(points).unwrap()
    }

    #[test]
    fn cagr_matches_closed_form() {
        // Prices [100, 110, 99, 108.9] held at full exposure give a final
        // equity of 108.9 / 100 = 1.089 over three periods.
        let prices = series(&[100.0, 110.0, 99.0, 108.9]);
        let equity = prices.log_returns().unwrap().map(f64::exp_m1).accumulate();
        assert!((equity.last().unwrap().1 - 1.089).abs() < 1e-12);

        let cagr = compute_cagr(&equity, 252).unwrap();
        let expected = 1.089_f64.powf(252.0 / 3.0) - 1.0;
        assert!((cagr - expected).abs() < 1e-12);
    }

    #[test]
    fn sharpe_with_zero_dispersion_is_not_finite() {
        let returns = series(&[0.01, 0.01, 0.01]);
        let sharpe = compute_sharpe(&returns, 252).unwrap();
        assert!(!sharpe.is_finite());
    }

    #[test]
    fn sharpe_scales_with_sqrt_of_trading_days() {
        let returns = series(&[0.01, 0.02, -0.01, 0.03]);
        let values: Vec<f64> = returns.values().collect();
        let expected = stats::mean(&values).unwrap() / stats::sample_std(&values).unwrap()
            * 252.0_f64.sqrt();
        let sharpe = compute_sharpe(&returns, 252).unwrap();
        assert!((sharpe - expected).abs() < 1e-12);
    }

    #[test]
    fn max_drawdown_tracks_the_running_peak() {
        // Equity 1.0 → 1.2 → 0.9 → 1.1: trough 0.9 against peak 1.2.
        let equity = series(&[1.0, 1.2, 0.9, 1.1]);
        let mdd = compute_max_drawdown(&equity).unwrap();
        assert!((mdd - (0.9 / 1.2 - 1.0)).abs() < 1e-12);
        assert!(mdd <= 0.0);
    }

    #[test]
    fn monotone_equity_has_zero_drawdown_and_nonfinite_calmar() {
        let equity = series(&[1.0, 1.1, 1.2]);
        let mdd = compute_max_drawdown(&equity).unwrap();
        assert_eq!(mdd, 0.0);
        let calmar = compute_calmar(0.25, mdd);
        assert!(!calmar.is_finite());
    }

    #[test]
    fn empty_series_is_an_error() {
        let empty = series(&[]);
        assert!(compute_cagr(&empty, 252).is_err());
        assert!(compute_sharpe(&empty, 252).is_err());
        assert!(compute_max_drawdown(&empty).is_err());
    }

    #[test]
    fn report_is_internally_consistent() {
        let returns = series(&[0.01, -0.02, 0.015, 0.005]);
        let equity = returns.accumulate();
        let report = performance_report(&returns, &equity, 252).unwrap();
        assert_eq!(report.n_periods, 4);
        assert!((report.calmar - compute_calmar(report.cagr, report.max_drawdown)).abs() < 1e-12);
    }
}
