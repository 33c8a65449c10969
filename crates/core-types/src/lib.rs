//! # Meridian Core Types
//!
//! This crate defines the foundational data types shared by every other crate
//! in the workspace.
//!
//! ## Architectural Principles
//!
//! - **Layer 0:** This crate depends on nothing else in the workspace. All
//!   higher layers (estimators, strategies, backtester, analytics) are built
//!   on the types defined here.
//! - **Immutable series:** A `TimeSeries` is constructed once and validated at
//!   construction (strictly increasing dates). Every transform produces a new
//!   series; nothing is mutated in place.
//! - **Lag discipline in the type system:** A `LaggedSeries` can only be
//!   produced by `TimeSeries::lag` (or by combining two already-lagged
//!   series). The backtester accepts only `LaggedSeries` as exposure input,
//!   which makes lookahead bias a compile error rather than a runtime bug.
//!
//! ## Public API
//!
//! - `TimeSeries`: ordered date → value mapping, with alignment, log-return,
//!   and equity-accumulation transforms.
//! - `LaggedSeries`: a series whose values were decided strictly before the
//!   date they are attributed to.
//! - `Regime` / `RegimeSeries`: categorical volatility-state labels.
//! - `SeriesError`: the error type for all series construction and transforms.

pub mod error;
pub mod regime;
pub mod series;
pub mod stats;

// Re-export the core types to provide a clean public API.
pub use error::SeriesError;
pub use regime::{Regime, RegimeSeries};
pub use series::{LaggedSeries, TimeSeries};
