//! Daily bar readers.

use barstat_analytics::DerivedSeries;
use barstat_types::{AnalyticsError, Bar, Series};
use chrono::NaiveDate;
use std::io::{BufRead, Read};
use std::path::Path;

use crate::FormatError;

/// Input format identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum InputFormat {
    /// CSV with a header row.
    #[default]
    Csv,
    /// JSON array of bar objects.
    Json,
    /// One JSON bar object per line.
    Ndjson,
}

impl InputFormat {
    /// Infers the format from a file extension.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| ext.parse().ok())
    }
}

impl std::str::FromStr for InputFormat {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" | "txt" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            "ndjson" | "jsonl" => Ok(Self::Ndjson),
            _ => Err(FormatError::UnknownFormat(s.to_string())),
        }
    }
}

/// Column names a bar file must provide.
const REQUIRED_COLUMNS: [&str; 6] = ["date", "open", "high", "low", "close", "volume"];

/// Reads daily bars into a [`Series`].
///
/// CSV columns are matched by header name, case-insensitively; extra
/// columns are ignored. Dates may carry a time suffix, only the leading
/// `YYYY-MM-DD` is used. Rows may appear in any order.
#[derive(Debug, Clone)]
pub struct BarReader {
    format: InputFormat,
    delimiter: u8,
}

impl BarReader {
    /// Creates a reader for the given format.
    #[must_use]
    pub const fn new(format: InputFormat) -> Self {
        Self {
            format,
            delimiter: b',',
        }
    }

    /// Sets the CSV field delimiter.
    #[must_use]
    pub const fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Reads all bars from `reader`.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is malformed, if a price is not a
    /// positive finite number, or if two rows share a date.
    pub fn read<R: BufRead>(&self, reader: R) -> Result<Series, FormatError> {
        let bars: Vec<Bar> = match self.format {
            InputFormat::Csv => self.read_csv(reader)?,
            InputFormat::Json => serde_json::from_reader(reader)?,
            InputFormat::Ndjson => read_ndjson(reader)?,
        };
        if let Some(bad) = bars.iter().find(|b| !b.has_valid_prices()) {
            return Err(AnalyticsError::InvalidData(format!(
                "non-positive or non-finite price on {}",
                bad.date
            ))
            .into());
        }
        Ok(Series::from_unsorted(bars)?)
    }

    fn read_csv<R: BufRead>(&self, reader: R) -> Result<Vec<Bar>, FormatError> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(self.delimiter)
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(reader);

        let headers = reader.headers()?.clone();
        if headers.is_empty() {
            return Ok(Vec::new());
        }
        let mut index = [0usize; REQUIRED_COLUMNS.len()];
        for (slot, required) in index.iter_mut().zip(REQUIRED_COLUMNS) {
            *slot = headers
                .iter()
                .position(|h| h.eq_ignore_ascii_case(required))
                .ok_or_else(|| FormatError::MissingColumn(required.to_string()))?;
        }
        let [date_i, open_i, high_i, low_i, close_i, volume_i] = index;

        let mut bars = Vec::new();
        for record in reader.records() {
            let record = record?;
            if record.iter().all(str::is_empty) {
                continue;
            }
            let line_no = record.position().map_or(0, |p| p.line() as usize);
            let field = |idx: usize, name: &str| {
                record.get(idx).ok_or_else(|| FormatError::Parse {
                    line: line_no,
                    message: format!("missing {name} field"),
                })
            };

            bars.push(Bar::new(
                parse_date(field(date_i, "date")?, line_no)?,
                parse_price(field(open_i, "open")?, "open", line_no)?,
                parse_price(field(high_i, "high")?, "high", line_no)?,
                parse_price(field(low_i, "low")?, "low", line_no)?,
                parse_price(field(close_i, "close")?, "close", line_no)?,
                parse_volume(field(volume_i, "volume")?, line_no)?,
            ));
        }

        Ok(bars)
    }
}

/// Reads daily bars in the given format.
///
/// # Errors
///
/// Returns an error if the input is malformed or if two rows share a date.
pub fn read_bars<R: BufRead>(reader: R, format: InputFormat) -> Result<Series, FormatError> {
    BarReader::new(format).read(reader)
}

/// Reads a derived series written as a JSON array of `{date, value}` records.
///
/// # Errors
///
/// Returns an error if the input is not valid JSON of that shape.
pub fn read_series_json<R: Read>(reader: R) -> Result<DerivedSeries, FormatError> {
    Ok(serde_json::from_reader(reader)?)
}

fn read_ndjson<R: BufRead>(reader: R) -> Result<Vec<Bar>, FormatError> {
    let mut bars = Vec::new();
    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        bars.push(serde_json::from_str(&line)?);
    }
    Ok(bars)
}

fn parse_date(field: &str, line: usize) -> Result<NaiveDate, FormatError> {
    let day = field.get(..10).unwrap_or(field);
    NaiveDate::parse_from_str(day, "%Y-%m-%d").map_err(|e| FormatError::Parse {
        line,
        message: format!("invalid date '{field}': {e}"),
    })
}

fn parse_price(field: &str, name: &str, line: usize) -> Result<f64, FormatError> {
    match field.parse::<f64>() {
        Ok(price) if price.is_finite() && price > 0.0 => Ok(price),
        _ => Err(FormatError::Parse {
            line,
            message: format!("invalid {name} '{field}'"),
        }),
    }
}

fn parse_volume(field: &str, line: usize) -> Result<u64, FormatError> {
    if let Ok(volume) = field.parse::<u64>() {
        return Ok(volume);
    }
    match field.parse::<f64>() {
        Ok(v) if v.is_finite() && v >= 0.0 => Ok(v.trunc() as u64),
        _ => Err(FormatError::Parse {
            line,
            message: format!("invalid volume '{field}'"),
        }),
    }
}
