use crate::error::SeriesError;
use chrono::NaiveDate;
use serde::Serialize;

/// An ordered mapping from strictly increasing calendar dates to `f64` values.
///
/// This is the single temporal container used throughout the workspace: price
/// series, return series, volatility series, exposure series, and equity
/// curves are all `TimeSeries` with different value semantics.
// Serialize only: deserialization would bypass the ordering validation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeSeries {
    points: Vec<(NaiveDate, f64)>,
}

impl TimeSeries {
    /// Constructs a series, validating that dates are strictly increasing.
    pub fn new(points: Vec<(NaiveDate, f64)>) -> Result<Self, SeriesError> {
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

    pub fn points(&self) -> &[(NaiveDate, f64)] {
        &self.points
    }

    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.points.iter().map(|(d, _)| *d)
    }

    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(|(_, v)| *v)
    }

    pub fn first(&self) -> Option<(NaiveDate, f64)> {
        self.points.first().copied()
    }

    pub fn last(&self) -> Option<(NaiveDate, f64)> {
        self.points.last().copied()
    }

    /// Looks up the value at an exact date.
    pub fn get(&self, date: NaiveDate) -> Option<f64> {
        self.points
            .binary_search_by_key(&date, |(d, _)| *d)
            .ok()
            .map(|i| self.points[i].1)
    }

    /// One-lag differencing in log space: `r_t = ln(P_t / P_{t-1})`.
    ///
    /// The first observation is dropped; no return is defined at the series
    /// origin. The result has length `len() - 1`.
    pub fn log_returns(&self) -> Result<TimeSeries, SeriesError> {
        if self.len() < 2 {
            return Err(SeriesError::InsufficientData {
                needed: 2,
                got: self.len(),
            });
        }
        let points = self
            .points
            .windows(2)
            .map(|w| (w[1].0, (w[1].1 / w[0].1).ln()))
            .collect();
        Ok(Self { points })
    }

    /// Inner join on dates: only dates present in both operands survive,
    /// order preserved. Returns the two aligned series.
    pub fn align(&self, other: &TimeSeries) -> (TimeSeries, TimeSeries) {
        let mut left = Vec::new();
        let mut right = Vec::new();
        let (mut i, mut j) = (0, 0);
        while i < self.points.len() && j < other.points.len() {
            let (da, va) = self.points[i];
            let (db, vb) = other.points[j];
            if da == db {
                left.push((da, va));
                right.push((db, vb));
                i += 1;
                j += 1;
            } else if da < db {
                i += 1;
            } else {
                j += 1;
            }
        }
        (Self { points: left }, Self { points: right })
    }

    /// Elementwise multiplication over the inner join of both date sets.
    pub fn mul(&self, other: &TimeSeries) -> TimeSeries {
        self.zip_with(other, |a, b| a * b)
    }

    /// Elementwise subtraction over the inner join of both date sets.
    pub fn sub(&self, other: &TimeSeries) -> TimeSeries {
        self.zip_with(other, |a, b| a - b)
    }

    fn zip_with(&self, other: &TimeSeries, f: impl Fn(f64, f64) -> f64) -> TimeSeries {
        let mut points = Vec::new();
        let (mut i, mut j) = (0, 0);
        while i < self.points.len() && j < other.points.len() {
            let (da, va) = self.points[i];
            let (db, vb) = other.points[j];
            if da == db {
                points.push((da, f(va, vb)));
                i += 1;
                j += 1;
            } else if da < db {
                i += 1;
            } else {
                j += 1;
            }
        }
        TimeSeries { points }
    }

    /// Applies a function to every value, keeping dates unchanged.
    pub fn map(&self, f: impl Fn(f64) -> f64) -> TimeSeries {
        let points = self.points.iter().map(|&(d, v)| (d, f(v))).collect();
        TimeSeries { points }
    }

    /// Shifts values forward by `periods`: the value observed at `t - periods`
    /// is attributed to date `t`. The first `periods` dates are dropped.
    ///
    /// This is the only way to obtain a `LaggedSeries`, which is the only
    /// exposure input the backtester accepts. A decision made with
    /// information through `t-1` is thereby applied to the return realized
    /// over `(t-1, t]`.
    pub fn lag(&self, periods: usize) -> Result<LaggedSeries, SeriesError> {
        if periods == 0 {
            return Err(SeriesError::ZeroLag);
        }
        if self.len() <= periods {
            return Err(SeriesError::InsufficientData {
                needed: periods + 1,
                got: self.len(),
            });
        }
        let points = (periods..self.points.len())
            .map(|i| (self.points[i].0, self.points[i - periods].1))
            .collect();
        Ok(LaggedSeries(Self { points }))
    }

    /// Cumulative product of `(1 + value)`, anchored multiplicatively at 1.0
    /// before the first observation. Used to turn a return series into an
    /// equity curve.
    pub fn accumulate(&self) -> TimeSeries {
        let mut equity = 1.0_f64;
        let points = self
            .points
            .iter()
            .map(|&(d, r)| {
                equity *= 1.0 + r;
                (d, equity)
            })
            .collect();
        TimeSeries { points }
    }
}

/// A series whose value at date `t` was decided strictly before `t`.
///
/// Instances can only come from `TimeSeries::lag` or from combining two
/// already-lagged series, so any exposure that reaches the backtester is
/// guaranteed free of lookahead.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LaggedSeries(TimeSeries);

impl LaggedSeries {
    pub fn series(&self) -> &TimeSeries {
        &self.0
    }

    pub fn into_series(self) -> TimeSeries {
        self.0
    }

    /// Elementwise product of two lagged series over their inner join.
    ///
    /// Both inputs carry decisions made at `t-1` or earlier, so the product
    /// does too; the combined series inherits the intersection of both valid
    /// ranges.
    pub fn combine(&self, other: &LaggedSeries) -> LaggedSeries {
        LaggedSeries(self.0.mul(&other.0))
    }
}
