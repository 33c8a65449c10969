use crate::error::StrategyError;
use configuration::{RegimeExposureLevels, ZScoreWindow};
use core_types::{stats, Regime, RegimeSeries, SeriesError, TimeSeries};
use std::collections::HashMap;

/// Standardizes a volatility series into z-scores.
///
/// With `ZScoreWindow::FullHistory` the mean and standard deviation are taken
/// over the entire series. That choice is retrospective: the score at any
/// date incorporates later observations, so a live deployment cannot
/// reproduce it. `ZScoreWindow::Trailing` standardizes over a trailing
/// window only (defined from index `days - 1` on) and is causal.
///
/// A volatility series (or trailing window) with zero dispersion has no
/// defined z-score; that is a `ZeroDispersion` error, never a silently
/// classified score.
pub fn vol_z_score(
    vol: &TimeSeries,
    window: ZScoreWindow,
) -> Result<TimeSeries, StrategyError> {
    match window {
        ZScoreWindow::FullHistory => {
            let values: Vec<f64> = vol.values().collect();
            let mean = stats::mean(&values).ok_or(SeriesError::Empty)?;
            let std = stats::sample_std(&values).ok_or(SeriesError::InsufficientData {
                needed: 2,
                got: values.len(),
            })?;
            if std == 0.0 {
                return Err(StrategyError::ZeroDispersion);
            }
            Ok(vol.map(|v| (v - mean) / std))
        }
        ZScoreWindow::Trailing { days } => {
            if days < 2 {
                return Err(StrategyError::InvalidParameters(
                    "trailing z-score window must be at least 2".to_string(),
                ));
            }
            if vol.len() < days {
                return Err(SeriesError::InsufficientData {
                    needed: days,
                    got: vol.len(),
                }
                .into());
            }
            let values: Vec<f64> = vol.values().collect();
            let mut points = Vec::with_capacity(vol.len() - days + 1);
            for (i, &(date, v)) in vol.points().iter().enumerate().skip(days - 1) {
                let slice = &values[i + 1 - days..=i];
                let mean = stats::mean(slice).ok_or(SeriesError::Empty)?;
                let std = stats::sample_std(slice).ok_or(SeriesError::InsufficientData {
                    needed: 2,
                    got: slice.len(),
                })?;
                if std == 0.0 {
                    return Err(StrategyError::ZeroDispersion);
                }
                points.push((date, (v - mean) / std));
            }
            Ok(TimeSeries::new(points)?)
        }
    }
}

/// Classifies z-scores into discrete regimes via a fixed threshold.
///
/// `z < -threshold` → low volatility, `|z| <= threshold` → neutral,
/// `z > threshold` → high volatility.
pub fn classify_regimes(z_scores: &TimeSeries, threshold: f64) -> RegimeSeries {
    let points = z_scores
        .points()
        .iter()
        .map(|&(date, z)| {
            let regime = if z < -threshold {
                Regime::LowVol
            } else if z > threshold {
                Regime::HighVol
            } else {
                Regime::Neutral
            };
            (date, regime)
        })
        .collect();

    // Dates come from an already-validated series, so ordering holds.
    RegimeSeries::new(points)
        .unwrap_or_else(|_| unreachable!("z-score dates are strictly increasing"))
}

/// Exposure level to hold in each volatility regime.
///
/// The map is total by construction: every regime variant has a level, so a
/// lookup can never fail. Building one from a loose label → level table
/// rejects missing and unrecognized labels up front.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegimeExposureMap {
    low_vol: f64,
    neutral: f64,
    high_vol: f64,
}

impl RegimeExposureMap {
    pub fn new(levels: RegimeExposureLevels) -> Self {
        Self {
            low_vol: levels.low_vol,
            neutral: levels.neutral,
            high_vol: levels.high_vol,
        }
    }

    /// Builds the map from a label-keyed table, as found in loosely-typed
    /// configuration. A regime without an entry is an `UnmappedRegime`
    /// error; a key that is not a regime label is an `UnknownRegimeLabel`
    /// error. Both are raised here, at construction, never at lookup.
    pub fn from_levels(levels: &HashMap<String, f64>) -> Result<Self, StrategyError> {
        for key in levels.keys() {
            if !Regime::ALL.iter().any(|r| r.as_str() == key) {
                return Err(StrategyError::UnknownRegimeLabel(key.clone()));
            }
        }
        let level_for = |regime: Regime| {
            levels
                .get(regime.as_str())
                .copied()
                .ok_or(StrategyError::UnmappedRegime(regime))
        };
        Ok(Self {
            low_vol: level_for(Regime::LowVol)?,
            neutral: level_for(Regime::Neutral)?,
            high_vol: level_for(Regime::HighVol)?,
        })
    }

    pub fn exposure_for(&self, regime: Regime) -> f64 {
        match regime {
            Regime::LowVol => self.low_vol,
            Regime::Neutral => self.neutral,
            Regime::HighVol => self.high_vol,
        }
    }

    /// Maps a regime series to its discrete exposure series.
    pub fn map_series(&self, regimes: &RegimeSeries) -> TimeSeries {
        let points = regimes
            .points()
            .iter()
            .map(|&(date, regime)| (date, self.exposure_for(regime)))
            .collect();
        TimeSeries::new(points).unwrap_or_else(|_| {
            // Input dates were validated by RegimeSeries::new.
            unreachable!("regime series dates are strictly increasing")
        })
    }
}
