use core_types::SeriesError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DataError {
    #[error("No data available for '{ticker}' in the requested range")]
    NoData { ticker: String },

    #[error("Failed to read price file '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("Malformed price row in '{path}' line {line}: {reason}")]
    Malformed {
        path: String,
        line: usize,
        reason: String,
    },

    #[error(transparent)]
    Series(#[from] SeriesError),
}
