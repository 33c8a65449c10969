//! # Meridian Data Access
//!
//! The boundary between the pure computation engine and the outside world.
//! The engine consumes a `PriceProvider`; where prices actually come from
//! (CSV files here, a vendor API elsewhere) is an implementation detail
//! behind the trait.
//!
//! A provider returns a clean daily close series: positive prices, strictly
//! increasing dates, gaps dropped rather than interpolated. When no data
//! exists for the requested range it returns `DataError::NoData`; the
//! engine propagates that, it never substitutes a default series.

pub mod csv_provider;
pub mod error;

pub use csv_provider::CsvPriceProvider;
pub use error::DataError;

use chrono::NaiveDate;
use core_types::TimeSeries;

/// External collaborator supplying historical daily closing prices.
pub trait PriceProvider {
    /// Returns the daily close series for `ticker` over `[start, end]`
    /// inclusive.
    fn daily_closes(
        &self,
        ticker: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<TimeSeries, DataError>;
}
