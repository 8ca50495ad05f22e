//! Date-keyed derived values with explicit gaps.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single derived value. `value` is `None` where the computation has no
/// defined result, such as the leading positions of a rolling window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Date key.
    pub date: NaiveDate,
    /// Derived value, if defined.
    pub value: Option<f64>,
}

impl Point {
    /// Creates a new point.
    #[must_use]
    pub const fn new(date: NaiveDate, value: Option<f64>) -> Self {
        Self { date, value }
    }

    /// Creates a point with a defined value.
    #[must_use]
    pub const fn defined(date: NaiveDate, value: f64) -> Self {
        Self {
            date,
            value: Some(value),
        }
    }

    /// Creates a point with no value.
    #[must_use]
    pub const fn undefined(date: NaiveDate) -> Self {
        Self { date, value: None }
    }
}

/// A date-ordered sequence of derived values.
///
/// Serializes as an ordered list of `{"date": ..., "value": number | null}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DerivedSeries {
    points: Vec<Point>,
}

impl DerivedSeries {
    /// Creates a derived series from points in date order.
    #[must_use]
    pub const fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    /// Returns the points.
    #[must_use]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Returns the number of points, defined or not.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns true if the series has no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Returns the value at position `index`, or `None` if out of bounds
    /// or undefined.
    #[must_use]
    pub fn value_at(&self, index: usize) -> Option<f64> {
        self.points.get(index).and_then(|p| p.value)
    }

    /// Returns an iterator over all values, including gaps.
    pub fn values(&self) -> impl ExactSizeIterator<Item = Option<f64>> + '_ {
        self.points.iter().map(|p| p.value)
    }

    /// Returns an iterator over dates.
    pub fn dates(&self) -> impl ExactSizeIterator<Item = NaiveDate> + '_ {
        self.points.iter().map(|p| p.date)
    }

    /// Returns the defined values in order, skipping gaps.
    #[must_use]
    pub fn defined_values(&self) -> Vec<f64> {
        self.points.iter().filter_map(|p| p.value).collect()
    }

    /// Returns the number of defined values.
    #[must_use]
    pub fn defined_count(&self) -> usize {
        self.points.iter().filter(|p| p.value.is_some()).count()
    }

    /// Returns true if `other` is keyed by the same dates in the same order.
    #[must_use]
    pub fn is_aligned_with(&self, other: &Self) -> bool {
        self.len() == other.len() && self.dates().eq(other.dates())
    }
}

impl FromIterator<Point> for DerivedSeries {
    fn from_iter<I: IntoIterator<Item = Point>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl From<Vec<Point>> for DerivedSeries {
    fn from(points: Vec<Point>) -> Self {
        Self::new(points)
    }
}

impl<'a> IntoIterator for &'a DerivedSeries {
    type Item = &'a Point;
    type IntoIter = std::slice::Iter<'a, Point>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    #[test]
    fn test_defined_values_skip_gaps() {
        let series: DerivedSeries = vec![
            Point::undefined(date(2)),
            Point::defined(date(3), 1.5),
            Point::defined(date(4), -0.5),
        ]
        .into();

        assert_eq!(series.len(), 3);
        assert_eq!(series.defined_count(), 2);
        assert_eq!(series.defined_values(), vec![1.5, -0.5]);
        assert_eq!(series.value_at(0), None);
        assert_eq!(series.value_at(1), Some(1.5));
        assert_eq!(series.value_at(9), None);
    }

    #[test]
    fn test_serializes_gaps_as_null() {
        let series: DerivedSeries =
            vec![Point::undefined(date(2)), Point::defined(date(3), 2.0)].into();
        let json = serde_json::to_string(&series).unwrap();

        assert_eq!(
            json,
            r#"[{"date":"2024-01-02","value":null},{"date":"2024-01-03","value":2.0}]"#
        );
        let back: DerivedSeries = serde_json::from_str(&json).unwrap();
        assert_eq!(back, series);
    }

    #[test]
    fn test_alignment() {
        let a: DerivedSeries = vec![Point::undefined(date(2)), Point::undefined(date(3))].into();
        let b: DerivedSeries = vec![Point::defined(date(2), 1.0), Point::defined(date(3), 1.0)].into();
        let c: DerivedSeries = vec![Point::defined(date(2), 1.0)].into();

        assert!(a.is_aligned_with(&b));
        assert!(!a.is_aligned_with(&c));
    }
}
