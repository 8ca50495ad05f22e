//! Descriptive statistics.

use barstat_types::{AnalyticsError, Result, Series};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Descriptive statistics over a set of values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    /// Number of values.
    pub count: usize,
    /// Arithmetic mean.
    pub mean: f64,
    /// Sample standard deviation (n - 1 denominator). `NaN` for a single value.
    pub std_dev: f64,
    /// Smallest value.
    pub min: f64,
    /// Largest value.
    pub max: f64,
    /// Median, interpolated between the two middle values for even counts.
    pub median: f64,
}

/// First date, last date and size of a series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesOverview {
    /// Date of the first bar.
    pub start: NaiveDate,
    /// Date of the last bar.
    pub end: NaiveDate,
    /// Number of bars.
    pub bar_count: usize,
}

/// Computes descriptive statistics over `values`.
///
/// # Errors
///
/// Returns [`AnalyticsError::EmptySeries`] if `values` is empty.
pub fn describe(values: &[f64]) -> Result<Summary> {
    if values.is_empty() {
        return Err(AnalyticsError::EmptySeries);
    }

    let count = values.len();
    let n = count as f64;
    let mean = values.iter().sum::<f64>() / n;

    let std_dev = if count < 2 {
        f64::NAN
    } else {
        let sum_sq: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
        (sum_sq / (n - 1.0)).sqrt()
    };

    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    Ok(Summary {
        count,
        mean,
        std_dev,
        min,
        max,
        median: median(values),
    })
}

/// Computes descriptive statistics over closing prices.
///
/// # Errors
///
/// Returns [`AnalyticsError::EmptySeries`] if the series has no bars.
pub fn close_stats(series: &Series) -> Result<Summary> {
    let closes: Vec<f64> = series.closes().collect();
    describe(&closes)
}

/// Returns the first date, last date and bar count of a series.
///
/// # Errors
///
/// Returns [`AnalyticsError::EmptySeries`] if the series has no bars.
pub fn overview(series: &Series) -> Result<SeriesOverview> {
    let range = series.date_range().ok_or(AnalyticsError::EmptySeries)?;
    Ok(SeriesOverview {
        start: range.start(),
        end: range.end(),
        bar_count: series.len(),
    })
}

/// Median of a non-empty slice.
fn median(values: &[f64]) -> f64 {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use barstat_types::Bar;

    #[test]
    fn test_describe_odd() {
        let summary = describe(&[100.0, 102.0, 101.0, 105.0, 103.0]).unwrap();

        assert_eq!(summary.count, 5);
        assert_relative_eq!(summary.mean, 102.2);
        assert_relative_eq!(summary.std_dev, 1.923_538_406_167_134_3, epsilon = 1e-12);
        assert_relative_eq!(summary.min, 100.0);
        assert_relative_eq!(summary.max, 105.0);
        assert_relative_eq!(summary.median, 102.0);
    }

    #[test]
    fn test_describe_even_median_interpolates() {
        let summary = describe(&[4.0, 1.0, 3.0, 2.0]).unwrap();
        assert_relative_eq!(summary.median, 2.5);
    }

    #[test]
    fn test_single_value_has_nan_deviation() {
        let summary = describe(&[42.0]).unwrap();
        assert!(summary.std_dev.is_nan());
        assert_relative_eq!(summary.median, 42.0);
    }

    #[test]
    fn test_empty_fails() {
        assert_eq!(describe(&[]), Err(AnalyticsError::EmptySeries));
        assert_eq!(close_stats(&Series::default()), Err(AnalyticsError::EmptySeries));
        assert_eq!(overview(&Series::default()), Err(AnalyticsError::EmptySeries));
    }

    #[test]
    fn test_overview() {
        let bars = (2..=6)
            .map(|d| {
                let date = NaiveDate::from_ymd_opt(2024, 1, d).unwrap();
                Bar::new(date, 10.0, 11.0, 9.0, 10.0, 5)
            })
            .collect();
        let series = Series::new(bars).unwrap();
        let overview = overview(&series).unwrap();

        assert_eq!(overview.bar_count, 5);
        assert_eq!(overview.start, NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());
        assert_eq!(overview.end, NaiveDate::from_ymd_opt(2024, 1, 6).unwrap());
    }
}
