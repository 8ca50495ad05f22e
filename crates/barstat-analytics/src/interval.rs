//! Aggregate statistics over an inclusive date slice.

use barstat_types::{AnalyticsError, Bar, DateRange, Direction, Result, Series};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One bar of an interval, tagged with its candle direction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    /// Trading date.
    pub date: NaiveDate,
    /// Opening price.
    pub open: f64,
    /// Highest price.
    pub high: f64,
    /// Lowest price.
    pub low: f64,
    /// Closing price.
    pub close: f64,
    /// Candle body height, `|close - open|`.
    pub body: f64,
    /// Price range, `high - low`.
    pub range: f64,
    /// Up when close >= open.
    pub direction: Direction,
}

impl From<&Bar> for Candle {
    fn from(bar: &Bar) -> Self {
        Self {
            date: bar.date,
            open: bar.open,
            high: bar.high,
            low: bar.low,
            close: bar.close,
            body: bar.body(),
            range: bar.range(),
            direction: bar.direction(),
        }
    }
}

/// Aggregates over the bars inside a date range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntervalSummary {
    /// Date of the first bar inside the range.
    pub start: NaiveDate,
    /// Date of the last bar inside the range.
    pub end: NaiveDate,
    /// Number of bars inside the range.
    pub bar_count: usize,
    /// Last close minus first close.
    pub price_change: f64,
    /// `(last close / first close - 1) * 100`.
    pub period_return_pct: f64,
    /// Mean daily volume.
    pub avg_volume: f64,
    /// Highest high.
    pub interval_high: f64,
    /// Lowest low.
    pub interval_low: f64,
    /// Per-bar candles in date order.
    pub candles: Vec<Candle>,
}

impl IntervalSummary {
    /// Returns the number of up candles.
    #[must_use]
    pub fn up_count(&self) -> usize {
        self.candles.iter().filter(|c| c.direction.is_up()).count()
    }

    /// Returns the number of down candles.
    #[must_use]
    pub fn down_count(&self) -> usize {
        self.candles.len() - self.up_count()
    }
}

/// Summarizes the bars whose dates fall inside `range`.
///
/// The range bounds need not coincide with bar dates.
///
/// # Errors
///
/// Returns [`AnalyticsError::EmptyInterval`] if no bar falls inside the
/// range, or [`AnalyticsError::InvalidData`] if the first close is not a
/// positive price.
pub fn interval_summary(series: &Series, range: DateRange) -> Result<IntervalSummary> {
    let bars = series.slice(&range);
    let (Some(first), Some(last)) = (bars.first(), bars.last()) else {
        return Err(AnalyticsError::EmptyInterval {
            start: range.start(),
            end: range.end(),
        });
    };

    if !first.close.is_finite() || first.close <= 0.0 {
        return Err(AnalyticsError::InvalidData(format!(
            "close {} on {} is not a positive price",
            first.close, first.date
        )));
    }

    let total_volume: f64 = bars.iter().map(|b| b.volume as f64).sum();
    let interval_high = bars.iter().map(|b| b.high).fold(f64::NEG_INFINITY, f64::max);
    let interval_low = bars.iter().map(|b| b.low).fold(f64::INFINITY, f64::min);

    Ok(IntervalSummary {
        start: first.date,
        end: last.date,
        bar_count: bars.len(),
        price_change: last.close - first.close,
        period_return_pct: (last.close / first.close - 1.0) * 100.0,
        avg_volume: total_volume / bars.len() as f64,
        interval_high,
        interval_low,
        candles: bars.iter().map(Candle::from).collect(),
    })
}

/// Summarizes the bars between two raw dates.
///
/// # Errors
///
/// Returns [`AnalyticsError::InvalidArgument`] if `start > end`, otherwise
/// fails as [`interval_summary`] does.
pub fn interval_summary_between(
    series: &Series,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<IntervalSummary> {
    let range = DateRange::new(start, end)?;
    interval_summary(series, range)
}
