//! Core types for the barstat OHLCV analytics toolkit.
//!
//! This crate provides the fundamental data structures used throughout barstat:
//!
//! - [`Bar`] - One trading day's open/high/low/close/volume record
//! - [`Series`] - Bars ordered strictly ascending by date
//! - [`Direction`] - Up/down classification of a single bar
//! - [`Period`] - Calendar granularity used for resampling
//! - [`DateRange`] - Inclusive date range for interval selection
//! - [`AnalyticsError`] - Error taxonomy shared by every analytics operation

#![doc(issue_tracker_base_url = "https://github.com/barstat/barstat/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod bar;
mod date_range;
mod error;
mod period;
mod series;

pub use bar::{Bar, Direction};
pub use date_range::DateRange;
pub use error::{AnalyticsError, DateRangeError, Result};
pub use period::{Period, PeriodParseError};
pub use series::Series;
