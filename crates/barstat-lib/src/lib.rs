//! Descriptive analytics for daily OHLCV price series.
//!
//! This is a facade crate that re-exports functionality from the barstat
//! workspace crates for convenient access.
//!
//! # Quick Start
//!
//! ```ignore
//! use barstat_lib::prelude::*;
//! use std::fs::File;
//! use std::io::BufReader;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let file = BufReader::new(File::open("aapl.csv")?);
//!     let series = read_bars(file, InputFormat::Csv)?;
//!
//!     let summary = close_stats(&series)?;
//!     println!("mean close {:.2}", summary.mean);
//!
//!     let ma50 = moving_average(&series, 50)?;
//!     println!("{} defined points", ma50.defined_count());
//!
//!     Ok(())
//! }
//! ```

#![doc(issue_tracker_base_url = "https://github.com/barstat/barstat/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Re-export core types
pub use barstat_types::*;

// Re-export analytics
#[cfg(feature = "analytics")]
pub use barstat_analytics::{
    Candle, DerivedSeries, Histogram, HistogramBin, IntervalSummary, Point, Resampler,
    SeriesOverview, Summary, close_stats, describe, histogram, interval_summary,
    interval_summary_between, moving_average, moving_averages, overview, pct_change,
    resample_bars, resample_closes, return_series, return_stats,
};

// Re-export readers and formatters
#[cfg(feature = "format")]
pub use barstat_format::{
    BarReader, Column, CsvFormatter, FormatError, Formatter, InputFormat, JsonFormatter,
    JsonStyle, OutputFormat, read_bars, read_series_json,
};

#[cfg(feature = "parquet")]
pub use barstat_format::ParquetFormatter;

/// Prelude module for convenient imports.
///
/// ```
/// use barstat_lib::prelude::*;
/// ```
pub mod prelude {
    pub use barstat_types::{
        AnalyticsError, Bar, DateRange, DateRangeError, Direction, Period, Result, Series,
    };

    #[cfg(feature = "analytics")]
    pub use barstat_analytics::{
        DerivedSeries, IntervalSummary, Point, Summary, close_stats, describe, histogram,
        interval_summary, moving_average, resample_bars, resample_closes, return_series,
    };

    #[cfg(feature = "format")]
    pub use barstat_format::{
        BarReader, CsvFormatter, Formatter, InputFormat, JsonFormatter, OutputFormat, read_bars,
    };

    #[cfg(feature = "parquet")]
    pub use barstat_format::ParquetFormatter;
}
