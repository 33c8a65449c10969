//! # Meridian Portfolio Layer
//!
//! Aggregates per-asset strategy returns into a single portfolio series and
//! orchestrates multi-asset composite runs over the lower layers.
//!
//! Aggregation is a pure reduction: each date's portfolio return is the
//! (weighted) mean over the assets that have a value at that date. There is
//! no shared mutable state; the fold produces one output series and nothing
//! else.

pub mod aggregate;
pub mod error;
pub mod momentum_run;

pub use aggregate::{equal_weight, weighted};
pub use error::PortfolioError;
pub use momentum_run::{run_momentum_portfolio, MomentumPortfolioParams, PortfolioOutcome};
