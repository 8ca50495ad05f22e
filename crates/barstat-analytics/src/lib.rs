//! Time-series analytics over daily OHLCV bars.
//!
//! Every operation is a pure function of an immutable [`Series`] and scalar
//! parameters; outputs are freshly allocated and nothing is cached between
//! calls.
//!
//! - [`describe`] / [`close_stats`] - Mean, sample deviation, min, max, median
//! - [`return_series`] / [`pct_change`] - Percentage change series
//! - [`moving_average`] - Trailing simple moving average
//! - [`resample_closes`] / [`resample_bars`] - Calendar bucketing
//! - [`interval_summary`] - Aggregates over an inclusive date slice
//! - [`histogram`] - Equal-width value distribution
//!
//! [`Series`]: barstat_types::Series

#![doc(issue_tracker_base_url = "https://github.com/barstat/barstat/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod derived;
mod histogram;
mod interval;
mod resample;
mod returns;
mod rolling;
mod stats;

pub use derived::{DerivedSeries, Point};
pub use histogram::{Histogram, HistogramBin, histogram};
pub use interval::{Candle, IntervalSummary, interval_summary, interval_summary_between};
pub use resample::{Resampler, resample_bars, resample_closes};
pub use returns::{pct_change, return_series, return_stats};
pub use rolling::{moving_average, moving_averages};
pub use stats::{SeriesOverview, Summary, close_stats, describe, overview};
