use crate::error::DataError;
use crate::PriceProvider;
use chrono::NaiveDate;
use core_types::TimeSeries;
use std::path::PathBuf;

/// Reads daily closes from `<dir>/<TICKER>.csv`.
///
/// Expected format: one `date,close` pair per line, dates as `YYYY-MM-DD`,
/// with an optional header line. Rows with a non-positive or unparsable
/// close are dropped (gaps are dropped, never interpolated); a malformed
/// date is an error, since it usually means the file is not a price file.
#[derive(Debug, Clone)]
pub struct CsvPriceProvider {
    dir: PathBuf,
}

impl CsvPriceProvider {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl PriceProvider for CsvPriceProvider {
    fn daily_closes(
        &self,
        ticker: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<TimeSeries, DataError> {
        let path = self.dir.join(format!("{ticker}.csv"));
        let display = path.display().to_string();
        let contents = std::fs::read_to_string(&path).map_err(|source| DataError::Io {
            path: display.clone(),
            source,
        })?;

        let mut points = Vec::new();
        for (index, line) in contents.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let (date_field, close_field) =
                line.split_once(',').ok_or_else(|| DataError::Malformed {
                    path: display.clone(),
                    line: index + 1,
                    reason: "expected 'date,close'".to_string(),
                })?;

            let date = match NaiveDate::parse_from_str(date_field.trim(), "%Y-%m-%d") {
                Ok(date) => date,
                // Tolerate a single header line, recognized by a non-numeric
                // close field. A corrupt first data row stays an error.
                Err(_) if index == 0 && close_field.trim().parse::<f64>().is_err() => continue,
                Err(e) => {
                    return Err(DataError::Malformed {
                        path: display.clone(),
                        line: index + 1,
                        reason: e.to_string(),
                    });
                }
            };

            if date < start || date > end {
                continue;
            }

            // Missing or non-positive closes are gaps; drop the row.
            match close_field.trim().parse::<f64>() {
                Ok(close) if close.is_finite() && close > 0.0 => points.push((date, close)),
                _ => {
                    tracing::debug!(ticker, line = index + 1, "dropping gap row");
                }
            }
        }

        if points.is_empty() {
            return Err(DataError::NoData {
                ticker: ticker.to_string(),
            });
        }

        Ok(TimeSeries::new(points)?)
    }
}
