//! Bar readers and series writers for barstat.
//!
//! Readers turn exported daily bar files into a [`Series`]:
//!
//! - [`BarReader`] - CSV, JSON array or NDJSON input
//!
//! Formatters write bars and derived series for downstream plotting tools:
//!
//! - [`CsvFormatter`] - CSV format
//! - [`JsonFormatter`] - JSON array or NDJSON format
//! - [`ParquetFormatter`] - Apache Parquet columnar format
//!
//! [`Series`]: barstat_types::Series

#![doc(issue_tracker_base_url = "https://github.com/barstat/barstat/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod csv;
mod formatter;
mod json;
mod reader;

#[cfg(feature = "parquet")]
mod parquet;

pub use crate::csv::CsvFormatter;
pub use formatter::{Column, FormatError, Formatter, OutputFormat};
pub use json::{JsonFormatter, JsonStyle};
pub use reader::{BarReader, InputFormat, read_bars, read_series_json};

#[cfg(feature = "parquet")]
pub use crate::parquet::ParquetFormatter;
