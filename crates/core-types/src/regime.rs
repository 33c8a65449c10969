use crate::error::SeriesError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Discrete volatility-state label derived from a standardized volatility
/// score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Regime {
    LowVol,
    Neutral,
    HighVol,
}

impl Regime {
    pub const ALL: [Regime; 3] = [Regime::LowVol, Regime::Neutral, Regime::HighVol];

    pub fn as_str(&self) -> &'static str {
        match self {
            Regime::LowVol => "low_vol",
            Regime::Neutral => "neutral",
            Regime::HighVol => "high_vol",
        }
    }
}

impl fmt::Display for Regime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An ordered mapping from strictly increasing dates to regime labels.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegimeSeries {
    points: Vec<(NaiveDate, Regime)>,
}

impl RegimeSeries {
    pub fn new(points: Vec<(NaiveDate, Regime)>) -> Result<Self, SeriesError> {
        for pair in points.windows(2) {
            if pair[1].0 <= pair[0].0 {
                return Err(SeriesError::NonMonotonic {
                    prev: pair[0].0,
                    next: pair[1].0,
                });
            }
        }
        Ok(Self { points })
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[(NaiveDate, Regime)] {
        &self.points
    }
}
