use crate::error::StrategyError;
use core_types::{SeriesError, TimeSeries};

/// Long/flat time-series momentum signal.
///
/// The signal at date `t` is 1 if the price is above its value `lookback`
/// periods earlier, 0 otherwise. The first `lookback` dates have no shifted
/// price to compare against and are dropped from the output.
///
/// The result is a decision series: it must be lagged by one period before
/// it is applied to returns.
pub fn momentum_signal(
    prices: &TimeSeries,
    lookback: usize,
) -> Result<TimeSeries, StrategyError> {
    if lookback == 0 {
        return Err(StrategyError::InvalidParameters(
            "momentum lookback must be positive".to_string(),
        ));
    }
    if prices.len() <= lookback {
        return Err(SeriesError::InsufficientData {
            needed: lookback + 1,
            got: prices.len(),
        }
        .into());
    }

    tracing::debug!(lookback, n = prices.len(), "computing momentum signal");

    let points = prices.points();
    let signal = (lookback..points.len())
        .map(|i| {
            let (date, price) = points[i];
            let past = points[i - lookback].1;
            (date, if price > past { 1.0 } else { 0.0 })
        })
        .collect();

    Ok(TimeSeries::new(signal)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn prices(values: &[f64]) -> TimeSeries {
        let points = values
            .iter()
            .enumerate()
            .map(|(i, &v)| {
                (
                    NaiveDate::from_ymd_opt(2024, 3, 1).unwrap() + chrono::Days::new(i as u64),
                    v,
                )
            })
            .collect();
        TimeSeries::new(points).unwrap()
    }

    #[test]
    fn lookback_two_over_four_prices() {
        // Prices [10, 11, 9, 12]: first two dates undefined, then 9 < 10 and
        // 12 > 11.
        let signal = momentum_signal(&prices(&[10.0, 11.0, 9.0, 12.0]), 2).unwrap();
        assert_eq!(signal.len(), 2);
        assert_eq!(signal.values().collect::<Vec<_>>(), vec![0.0, 1.0]);
    }

    #[test]
    fn flat_price_is_not_momentum() {
        // Strict inequality: an unchanged price yields 0.
        let signal = momentum_signal(&prices(&[10.0, 10.0]), 1).unwrap();
        assert_eq!(signal.values().collect::<Vec<_>>(), vec![0.0]);
    }

    #[test]
    fn series_shorter_than_lookback_is_rejected() {
        let result = momentum_signal(&prices(&[10.0, 11.0]), 2);
        assert!(matches!(
            result,
            Err(StrategyError::Series(SeriesError::InsufficientData { .. }))
        ));
    }

    #[test]
    fn zero_lookback_is_rejected() {
        let result = momentum_signal(&prices(&[10.0, 11.0]), 0);
        assert!(matches!(result, Err(StrategyError::InvalidParameters(_))));
    }
}
