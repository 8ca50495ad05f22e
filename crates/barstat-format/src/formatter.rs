//! Output format abstraction.

use barstat_analytics::DerivedSeries;
use barstat_types::{AnalyticsError, Bar};
use std::io::Write;
use thiserror::Error;

/// Output format identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OutputFormat {
    /// CSV format.
    #[default]
    Csv,
    /// JSON array format.
    Json,
    /// Newline-delimited JSON format.
    Ndjson,
    /// Apache Parquet format.
    Parquet,
}

impl OutputFormat {
    /// Returns the file extension for this format.
    #[must_use]
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
            Self::Ndjson => "ndjson",
            Self::Parquet => "parquet",
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.extension())
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            "ndjson" | "jsonl" => Ok(Self::Ndjson),
            "parquet" | "pq" => Ok(Self::Parquet),
            _ => Err(FormatError::UnknownFormat(s.to_string())),
        }
    }
}

/// Errors that can occur while reading or writing data.
#[derive(Error, Debug)]
pub enum FormatError {
    /// Unknown input or output format.
    #[error("Unknown format: {0}")]
    UnknownFormat(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV decoding error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Arrow/Parquet error.
    #[error("Parquet error: {0}")]
    Parquet(String),

    /// Malformed input row.
    #[error("Parse error on line {line}: {message}")]
    Parse {
        /// 1-based line number.
        line: usize,
        /// What went wrong.
        message: String,
    },

    /// Required CSV column is absent from the header.
    #[error("Missing column: {0}")]
    MissingColumn(String),

    /// Table columns do not share one date axis.
    #[error("Column '{0}' is not aligned with the first column's dates")]
    Misaligned(String),

    /// The parsed bars do not form a valid series.
    #[error(transparent)]
    Analytics(#[from] AnalyticsError),
}

/// A named derived series written as one table column.
#[derive(Debug, Clone, Copy)]
pub struct Column<'a> {
    /// Column header.
    pub name: &'a str,
    /// Column values.
    pub series: &'a DerivedSeries,
}

impl<'a> Column<'a> {
    /// Creates a new column.
    #[must_use]
    pub const fn new(name: &'a str, series: &'a DerivedSeries) -> Self {
        Self { name, series }
    }
}

/// Checks that every column shares the first column's date axis.
pub(crate) fn check_aligned(columns: &[Column<'_>]) -> Result<(), FormatError> {
    let Some(first) = columns.first() else {
        return Ok(());
    };
    match columns.iter().find(|c| !c.series.is_aligned_with(first.series)) {
        Some(column) => Err(FormatError::Misaligned(column.name.to_string())),
        None => Ok(()),
    }
}

/// Trait for output formatters.
pub trait Formatter: Send + Sync {
    /// Writes daily bars to the output.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    fn write_bars<W: Write + Send>(&self, bars: &[Bar], writer: W) -> Result<(), FormatError>;

    /// Writes a derived series as `date`/`value` records, undefined values
    /// as null.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    fn write_series<W: Write + Send>(
        &self,
        series: &DerivedSeries,
        writer: W,
    ) -> Result<(), FormatError>;

    /// Writes several derived series sharing one date axis as a table.
    ///
    /// # Errors
    ///
    /// Returns [`FormatError::Misaligned`] if the columns' dates differ, or
    /// an error if writing fails.
    fn write_table<W: Write + Send>(
        &self,
        columns: &[Column<'_>],
        writer: W,
    ) -> Result<(), FormatError>;

    /// Returns the file extension for this format.
    fn extension(&self) -> &str;
}
