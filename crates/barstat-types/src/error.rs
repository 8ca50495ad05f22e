//! Error types for barstat.

use chrono::NaiveDate;
use thiserror::Error;

/// Result type alias for analytics operations.
pub type Result<T> = std::result::Result<T, AnalyticsError>;

/// Errors reported by analytics operations.
///
/// Every failure is detected from the inputs alone and reported before any
/// output is produced.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalyticsError {
    /// A statistic was requested over zero eligible data points.
    #[error("Empty series: no data points to compute over")]
    EmptySeries,

    /// The input violates a bar or series invariant.
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// A caller-supplied parameter is out of domain.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The requested date range contains no bars.
    #[error("No bars between {start} and {end}")]
    EmptyInterval {
        /// Requested start date.
        start: NaiveDate,
        /// Requested end date.
        end: NaiveDate,
    },
}

impl From<DateRangeError> for AnalyticsError {
    fn from(err: DateRangeError) -> Self {
        Self::InvalidArgument(err.to_string())
    }
}

/// Error for invalid date ranges.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DateRangeError {
    /// Start date is after end date.
    #[error("Invalid date range: {start} > {end}")]
    InvalidRange {
        /// The start date.
        start: NaiveDate,
        /// The end date.
        end: NaiveDate,
    },
}
