//! Calendar resampling of daily bars.

use barstat_types::{Bar, Period, Result, Series};
use chrono::NaiveDate;

use crate::{DerivedSeries, Point};

/// Streaming bar resampler.
///
/// Groups consecutive bars into calendar buckets and emits one aggregated
/// bar per non-empty bucket, keyed by the bucket's period-end date. Bars
/// must be pushed in ascending date order.
#[derive(Debug)]
pub struct Resampler {
    period: Period,
    current: Option<BucketBuilder>,
}

impl Resampler {
    /// Creates a new resampler for the given period.
    #[must_use]
    pub const fn new(period: Period) -> Self {
        Self {
            period,
            current: None,
        }
    }

    /// Pushes a bar, returning the previous bucket once a bar from a later
    /// bucket arrives.
    pub fn push(&mut self, bar: &Bar) -> Option<Bar> {
        let key = self.period.period_end(bar.date);

        match self.current.take() {
            Some(mut builder) if builder.key == key => {
                builder.update(bar);
                self.current = Some(builder);
                None
            }
            Some(builder) => {
                self.current = Some(BucketBuilder::new(key, bar));
                Some(builder.finish())
            }
            None => {
                self.current = Some(BucketBuilder::new(key, bar));
                None
            }
        }
    }

    /// Finishes resampling, returning the last open bucket.
    #[must_use]
    pub fn finish(self) -> Option<Bar> {
        self.current.map(BucketBuilder::finish)
    }
}

/// Accumulates one calendar bucket.
#[derive(Debug)]
struct BucketBuilder {
    key: NaiveDate,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
    volume: u64,
}

impl BucketBuilder {
    fn new(key: NaiveDate, bar: &Bar) -> Self {
        Self {
            key,
            open: bar.open,
            high: bar.high,
            low: bar.low,
            close: bar.close,
            volume: bar.volume,
        }
    }

    fn update(&mut self, bar: &Bar) {
        self.high = self.high.max(bar.high);
        self.low = self.low.min(bar.low);
        self.close = bar.close;
        self.volume = self.volume.saturating_add(bar.volume);
    }

    const fn finish(self) -> Bar {
        Bar::new(
            self.key,
            self.open,
            self.high,
            self.low,
            self.close,
            self.volume,
        )
    }
}

/// Runs a resampler over the whole series.
fn buckets(series: &Series, period: Period) -> Vec<Bar> {
    let mut resampler = Resampler::new(period);
    let mut bars = Vec::new();

    for bar in series {
        if let Some(done) = resampler.push(bar) {
            bars.push(done);
        }
    }
    bars.extend(resampler.finish());
    bars
}

/// Aggregates bars into one bar per calendar bucket.
///
/// Open is the first open, high and low are the bucket extremes, close is
/// the last close and volume is summed. Buckets without bars are omitted.
///
/// # Errors
///
/// Returns [`AnalyticsError::InvalidData`](barstat_types::AnalyticsError::InvalidData)
/// if the bucket dates do not come out strictly increasing.
pub fn resample_bars(series: &Series, period: Period) -> Result<Series> {
    Series::new(buckets(series, period))
}

/// Takes the last close of each calendar bucket.
///
/// Points are keyed by period-end date and always defined. Feed the result
/// to [`pct_change`](crate::pct_change) for period-over-period returns.
#[must_use]
pub fn resample_closes(series: &Series, period: Period) -> DerivedSeries {
    buckets(series, period)
        .iter()
        .map(|bar| Point::defined(bar.date, bar.close))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pct_change;
    use approx::assert_relative_eq;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn bar(date: NaiveDate, close: f64) -> Bar {
        Bar::new(date, close - 1.0, close + 2.0, close - 2.0, close, 10)
    }

    fn sample() -> Series {
        Series::new(vec![
            bar(date(2024, 1, 30), 100.0),
            bar(date(2024, 1, 31), 101.0),
            bar(date(2024, 2, 1), 102.0),
            bar(date(2024, 2, 29), 103.0),
            // No March bars.
            bar(date(2024, 4, 2), 110.0),
        ])
        .unwrap()
    }

    #[test]
    fn test_monthly_last_close() {
        let monthly = resample_closes(&sample(), Period::Month);
        let dates: Vec<_> = monthly.dates().collect();

        assert_eq!(dates, vec![date(2024, 1, 31), date(2024, 2, 29), date(2024, 4, 30)]);
        assert_eq!(monthly.defined_values(), vec![101.0, 103.0, 110.0]);
    }

    #[test]
    fn test_monthly_bars_aggregate() {
        let monthly = resample_bars(&sample(), Period::Month).unwrap();
        let feb = monthly.bars()[1];

        assert_relative_eq!(feb.open, 101.0);
        assert_relative_eq!(feb.high, 105.0);
        assert_relative_eq!(feb.low, 100.0);
        assert_relative_eq!(feb.close, 103.0);
        assert_eq!(feb.volume, 20);
    }

    #[test]
    fn test_weekly_buckets() {
        // Wed 2024-01-03 .. Tue 2024-01-09 spans two weeks.
        let series = Series::new(
            (3..=9)
                .map(|d| bar(date(2024, 1, d), f64::from(d)))
                .collect(),
        )
        .unwrap();
        let weekly = resample_closes(&series, Period::Week);

        assert_eq!(weekly.len(), 2);
        assert_eq!(weekly.points()[0], Point::defined(date(2024, 1, 7), 7.0));
        assert_eq!(weekly.points()[1], Point::defined(date(2024, 1, 14), 9.0));
    }

    #[test]
    fn test_resampling_is_idempotent() {
        let monthly = resample_bars(&sample(), Period::Month).unwrap();
        let again = resample_bars(&monthly, Period::Month).unwrap();
        assert_eq!(monthly, again);

        let closes = resample_closes(&monthly, Period::Month);
        assert_eq!(closes, resample_closes(&sample(), Period::Month));
    }

    #[test]
    fn test_daily_is_identity() {
        let series = sample();
        assert_eq!(resample_bars(&series, Period::Day).unwrap(), series);
    }

    #[test]
    fn test_empty_series() {
        assert!(resample_closes(&Series::default(), Period::Month).is_empty());
        assert!(resample_bars(&Series::default(), Period::Year).unwrap().is_empty());
    }

    #[test]
    fn test_monthly_returns_composition() {
        let returns = pct_change(&resample_closes(&sample(), Period::Month)).unwrap();

        assert_eq!(returns.value_at(0), None);
        assert_relative_eq!(returns.value_at(1).unwrap(), 200.0 / 101.0, epsilon = 1e-12);
        assert_relative_eq!(returns.value_at(2).unwrap(), 700.0 / 103.0, epsilon = 1e-12);
    }
}
