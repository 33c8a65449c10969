//! # Meridian Analytics
//!
//! Standardized performance metrics over return and equity series. It acts
//! as the "unbiased judge" of the system.
//!
//! ## Architectural Principles
//!
//! - **Pure reductions:** every metric is a stateless fold over a single
//!   series (or a pair). Same input, same output, no internal state.
//! - **Non-finite values are surfaced, not hidden.** A Sharpe ratio with
//!   zero return dispersion is `NaN`; a Calmar ratio with zero drawdown is
//!   non-finite. These are reported as-is; coercing them to 0 would turn a
//!   degenerate backtest into a plausible-looking one.
//!
//! ## Public API
//!
//! - `PerformanceReport`: the standardized bundle of metrics.
//! - `performance_report`: computes the full bundle from returns + equity.
//! - Individual `compute_*` functions for callers that need a single metric.

pub mod engine;
pub mod error;
pub mod report;

pub use engine::{
    compute_annualized_vol, compute_cagr, compute_calmar, compute_max_drawdown, compute_sharpe,
    performance_report,
};
pub use error::AnalyticsError;
pub use report::PerformanceReport;
