//! # Meridian Volatility Estimators
//!
//! Turns a log-return series into an annualized realized-volatility series.
//!
//! Two interchangeable estimators sit behind the single `VolEstimator` enum:
//!
//! - `Rolling`: sample standard deviation over a trailing window. More
//!   stable, undefined for the first `window - 1` observations (those are
//!   dropped, not null-filled).
//! - `Ewma`: RiskMetrics-style recursive variance. More responsive, defined
//!   from the first observation on. This is a recurrence, not a window, so it
//!   must be evaluated in strict temporal order.
//!
//! Downstream consumers (vol targeting, regime classification, grid search)
//! pick a variant and call `annualized` without branching on estimator type.

pub mod error;
pub mod estimator;

pub use error::VolatilityError;
pub use estimator::VolEstimator;
