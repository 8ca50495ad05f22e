//! Interval command implementation.
//!
//! Summarizes an inclusive date slice. Without explicit dates the slice is
//! the trailing window ending at the last bar.

use crate::display::{load_series, print_interval, print_json};
use anyhow::{Result, bail};
use barstat_lib::prelude::*;
use chrono::NaiveDate;
use std::path::Path;
use tracing::info;

/// Fill in omitted bounds: `end` defaults to the last bar, `start` to
/// `trailing_days` before `end`.
pub(crate) fn resolve_range(
    series: &Series,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    trailing_days: u64,
) -> Result<DateRange> {
    let end = match (end, series.last()) {
        (Some(end), _) => end,
        (None, Some(last)) => last.date,
        (None, None) => bail!("Series has no bars"),
    };
    match start {
        Some(start) => Ok(DateRange::new(start, end).map_err(AnalyticsError::from)?),
        None => Ok(DateRange::trailing_days(end, trailing_days)),
    }
}

/// Summarize an interval of the series at `input`.
pub(crate) fn interval(
    input: &Path,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    trailing_days: u64,
    candles: bool,
    json: bool,
) -> Result<()> {
    let series = load_series(input)?;
    let range = resolve_range(&series, start, end, trailing_days)?;
    info!(%range, days = range.total_days(), "summarizing interval");

    let mut summary = interval_summary(&series, range)?;

    if json {
        if !candles {
            summary.candles.clear();
        }
        return print_json(&summary);
    }

    print_interval(&summary, candles);
    Ok(())
}
