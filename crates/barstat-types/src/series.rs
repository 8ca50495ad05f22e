//! Ordered daily bar series.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{AnalyticsError, Bar, DateRange, Result};

/// Bars ordered strictly ascending by date.
///
/// A `Series` is immutable once built. Analytics operations borrow it and
/// return freshly allocated outputs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Bar>", into = "Vec<Bar>")]
pub struct Series {
    bars: Vec<Bar>,
}

impl Series {
    /// Creates a series from bars that are already in date order.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyticsError::InvalidData`] if dates are not strictly
    /// increasing.
    pub fn new(bars: Vec<Bar>) -> Result<Self> {
        if let Some(pair) = bars.windows(2).find(|w| w[0].date >= w[1].date) {
            let message = if pair[0].date == pair[1].date {
                format!("duplicate bar date {}", pair[1].date)
            } else {
                format!("bar dated {} follows {}", pair[1].date, pair[0].date)
            };
            return Err(AnalyticsError::InvalidData(message));
        }
        Ok(Self { bars })
    }

    /// Creates a series from bars in any order, sorting them by date.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyticsError::InvalidData`] if two bars share a date.
    pub fn from_unsorted(mut bars: Vec<Bar>) -> Result<Self> {
        bars.sort_by_key(|b| b.date);
        Self::new(bars)
    }

    /// Checks every bar for finite, positive prices and consistent
    /// high/low bounds.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyticsError::InvalidData`] naming the first offending date.
    pub fn validate(&self) -> Result<()> {
        match self.bars.iter().find(|b| !b.is_consistent()) {
            Some(bar) => Err(AnalyticsError::InvalidData(format!(
                "inconsistent OHLC prices on {}",
                bar.date
            ))),
            None => Ok(()),
        }
    }

    /// Returns the bars.
    #[must_use]
    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    /// Returns the number of bars.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bars.len()
    }

    /// Returns true if the series has no bars.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// Returns the first bar.
    #[must_use]
    pub fn first(&self) -> Option<&Bar> {
        self.bars.first()
    }

    /// Returns the last bar.
    #[must_use]
    pub fn last(&self) -> Option<&Bar> {
        self.bars.last()
    }

    /// Returns an iterator over closing prices.
    pub fn closes(&self) -> impl ExactSizeIterator<Item = f64> + '_ {
        self.bars.iter().map(|b| b.close)
    }

    /// Returns an iterator over bar dates.
    pub fn dates(&self) -> impl ExactSizeIterator<Item = NaiveDate> + '_ {
        self.bars.iter().map(|b| b.date)
    }

    /// Returns the date range spanned by the series, or `None` when empty.
    #[must_use]
    pub fn date_range(&self) -> Option<DateRange> {
        match (self.bars.first(), self.bars.last()) {
            (Some(first), Some(last)) => DateRange::new(first.date, last.date).ok(),
            _ => None,
        }
    }

    /// Returns the contiguous bars whose dates fall inside `range`.
    #[must_use]
    pub fn slice(&self, range: &DateRange) -> &[Bar] {
        let lo = self.bars.partition_point(|b| b.date < range.start());
        let hi = self.bars.partition_point(|b| b.date <= range.end());
        &self.bars[lo..hi]
    }
}

impl TryFrom<Vec<Bar>> for Series {
    type Error = AnalyticsError;

    fn try_from(bars: Vec<Bar>) -> Result<Self> {
        Self::new(bars)
    }
}

impl From<Series> for Vec<Bar> {
    fn from(series: Series) -> Self {
        series.bars
    }
}

impl<'a> IntoIterator for &'a Series {
    type Item = &'a Bar;
    type IntoIter = std::slice::Iter<'a, Bar>;

    fn into_iter(self) -> Self::IntoIter {
        self.bars.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn bar(day: u32, close: f64) -> Bar {
        Bar::new(date(2024, 1, day), close, close + 1.0, close - 1.0, close, 100)
    }

    #[test]
    fn test_new_rejects_unsorted() {
        let err = Series::new(vec![bar(3, 10.0), bar(2, 11.0)]).unwrap_err();
        assert!(matches!(err, AnalyticsError::InvalidData(_)));
    }

    #[test]
    fn test_new_rejects_duplicates() {
        let err = Series::new(vec![bar(2, 10.0), bar(2, 11.0)]).unwrap_err();
        assert_eq!(
            err,
            AnalyticsError::InvalidData("duplicate bar date 2024-01-02".to_string())
        );
    }

    #[test]
    fn test_from_unsorted() {
        let series = Series::from_unsorted(vec![bar(5, 12.0), bar(2, 10.0), bar(3, 11.0)]).unwrap();
        let dates: Vec<_> = series.dates().collect();
        assert_eq!(dates, vec![date(2024, 1, 2), date(2024, 1, 3), date(2024, 1, 5)]);
        assert_eq!(series.closes().collect::<Vec<_>>(), vec![10.0, 11.0, 12.0]);
    }

    #[test]
    fn test_validate() {
        let good = Series::new(vec![bar(2, 10.0), bar(3, 11.0)]).unwrap();
        assert!(good.validate().is_ok());

        let broken = Bar::new(date(2024, 1, 4), 10.0, 9.0, 8.0, 10.0, 100);
        let bad = Series::new(vec![bar(2, 10.0), broken]).unwrap();
        let err = bad.validate().unwrap_err();
        assert!(err.to_string().contains("2024-01-04"));
    }

    #[test]
    fn test_slice_uses_nearest_available_dates() {
        let series = Series::new(vec![bar(2, 10.0), bar(3, 11.0), bar(5, 12.0), bar(8, 13.0)]).unwrap();

        let range = DateRange::new(date(2024, 1, 1), date(2024, 1, 4)).unwrap();
        assert_eq!(series.slice(&range).len(), 2);

        let range = DateRange::new(date(2024, 1, 4), date(2024, 1, 7)).unwrap();
        let slice = series.slice(&range);
        assert_eq!(slice.len(), 1);
        assert_eq!(slice[0].date, date(2024, 1, 5));

        let range = DateRange::new(date(2024, 2, 1), date(2024, 2, 7)).unwrap();
        assert!(series.slice(&range).is_empty());
    }

    #[test]
    fn test_date_range() {
        assert!(Series::default().date_range().is_none());
        let series = Series::new(vec![bar(2, 10.0), bar(9, 11.0)]).unwrap();
        let range = series.date_range().unwrap();
        assert_eq!(range.start(), date(2024, 1, 2));
        assert_eq!(range.end(), date(2024, 1, 9));
    }

    #[test]
    fn test_deserialize_validates_order() {
        let json = r#"[
            {"date":"2024-01-03","open":1.0,"high":1.0,"low":1.0,"close":1.0,"volume":1},
            {"date":"2024-01-02","open":1.0,"high":1.0,"low":1.0,"close":1.0,"volume":1}
        ]"#;
        assert!(serde_json::from_str::<Series>(json).is_err());
    }
}
