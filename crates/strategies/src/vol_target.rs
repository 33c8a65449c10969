use crate::error::StrategyError;
use core_types::TimeSeries;

/// Volatility-target position sizing: `exposure_t = target / vol_t`, clipped
/// to `[min_exposure, max_exposure]`.
///
/// Clipping is applied unconditionally. When realized volatility is zero the
/// raw ratio is infinite; the clip turns it into `max_exposure` instead of
/// letting a non-finite value propagate into the backtest.
pub fn vol_target_exposure(
    realized_vol: &TimeSeries,
    target_vol: f64,
    min_exposure: f64,
    max_exposure: f64,
) -> Result<TimeSeries, StrategyError> {
    if !(target_vol.is_finite() && target_vol > 0.0) {
        return Err(StrategyError::InvalidParameters(
            "target volatility must be finite and positive".to_string(),
        ));
    }
    if !(min_exposure.is_finite() && max_exposure.is_finite()) {
        return Err(StrategyError::InvalidParameters(
            "exposure bounds must be finite".to_string(),
        ));
    }
    if min_exposure > max_exposure {
        return Err(StrategyError::InvalidParameters(
            "min_exposure must not exceed max_exposure".to_string(),
        ));
    }

    tracing::debug!(
        target_vol,
        min_exposure,
        max_exposure,
        n = realized_vol.len(),
        "computing vol-target exposure"
    );

    Ok(realized_vol.map(|vol| (target_vol / vol).clamp(min_exposure, max_exposure)))
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
                    NaiveDate::from_ymd_opt(2024, 2, 1).unwrap() + chrono::Days::new(i as u64),
                    v,
                )
            })
            .collect();
        TimeSeries::new(points).unwrap()
    }

    #[test]
    fn exposure_is_target_over_vol_within_bounds() {
        let vol = series(&[0.30, 0.60, 0.15]);
        let exposure = vol_target_exposure(&vol, 0.30, 0.0, 2.0).unwrap();
        assert_eq!(exposure.values().collect::<Vec<_>>(), vec![1.0, 0.5, 2.0]);
    }

    #[test]
    fn zero_volatility_is_clipped_to_max() {
        // Constant prices produce zero realized vol; division by zero is
        // guarded by the clip, not an error.
        let vol = series(&[0.0, 0.0, 0.2]);
        let exposure = vol_target_exposure(&vol, 0.3, 0.0, 2.0).unwrap();
        assert_eq!(exposure.values().collect::<Vec<_>>(), vec![2.0, 2.0, 1.5]);
        assert!(exposure.values().all(f64::is_finite));
    }

    #[test]
    fn bounds_are_inclusive_everywhere() {
        let vol = series(&[10.0, 0.001]);
        let exposure = vol_target_exposure(&vol, 0.3, 0.1, 2.0).unwrap();
        let values: Vec<f64> = exposure.values().collect();
        assert_eq!(values[0], 0.1);
        assert_eq!(values[1], 2.0);
    }

    #[test]
    fn inverted_bounds_are_rejected() {
        let vol = series(&[0.3]);
        assert!(matches!(
            vol_target_exposure(&vol, 0.3, 2.0, 0.0),
            Err(StrategyError::InvalidParameters(_))
        ));
    }

    #[test]
    fn non_positive_target_is_rejected() {
        let vol = series(&[0.3]);
        assert!(vol_target_exposure(&vol, 0.0, 0.0, 2.0).is_err());
        assert!(vol_target_exposure(&vol, -0.1, 0.0, 2.0).is_err());
    }
}
