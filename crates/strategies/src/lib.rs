//! # Meridian Strategy Library
//!
//! Signal generation and exposure mapping: the rules that decide how much of
//! the asset the strategy wants to hold.
//!
//! ## Architectural Principles
//!
//! - **Layer 1 logic:** This crate knows nothing about data loading,
//!   backtesting mechanics, or presentation. It depends only on `core-types`
//!   and `configuration`.
//! - **Pure functions:** Every transform here maps an input series to an
//!   output series with no hidden state. The same input always produces the
//!   same output.
//! - **Decisions are not yet lagged:** The series produced here are decision
//!   series aligned with the date the decision was *made*. Callers lag them
//!   (`TimeSeries::lag`) before handing them to the backtester; the
//!   backtester's types enforce that.
//!
//! ## Public API
//!
//! - `momentum_signal`: binary long/flat time-series momentum.
//! - `vol_z_score` / `classify_regimes`: standardized volatility score and
//!   discrete regime labels.
//! - `RegimeExposureMap`: validated regime → exposure lookup.
//! - `vol_target_exposure`: volatility-target position sizing with
//!   unconditional clipping.

pub mod error;
pub mod momentum;
pub mod regime_filter;
pub mod vol_target;

pub use error::StrategyError;
pub use momentum::momentum_signal;
pub use regime_filter::{classify_regimes, vol_z_score, RegimeExposureMap};
pub use vol_target::vol_target_exposure;
