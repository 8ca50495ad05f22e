//! Trailing simple moving averages.

use barstat_types::{AnalyticsError, Result, Series};

use crate::{DerivedSeries, Point};

/// Computes the trailing simple moving average of closes over `window` bars.
///
/// Positions before `window - 1` are undefined. A window longer than the
/// series is not an error: every position is undefined.
///
/// # Errors
///
/// Returns [`AnalyticsError::InvalidArgument`] if `window` is zero.
pub fn moving_average(series: &Series, window: usize) -> Result<DerivedSeries> {
    if window == 0 {
        return Err(AnalyticsError::InvalidArgument(
            "moving average window must be positive".to_string(),
        ));
    }

    let bars = series.bars();
    let divisor = window as f64;

    // Windows are summed independently: a close only affects the windows
    // that contain it.
    let warmup = window.saturating_sub(1).min(bars.len());
    let mut points: Vec<Point> = bars[..warmup]
        .iter()
        .map(|bar| Point::undefined(bar.date))
        .collect();
    points.extend(bars.windows(window).map(|w| {
        let sum: f64 = w.iter().map(|b| b.close).sum();
        Point::defined(w[w.len() - 1].date, sum / divisor)
    }));

    Ok(DerivedSeries::new(points))
}

/// Computes one moving average per window.
///
/// # Errors
///
/// Returns [`AnalyticsError::InvalidArgument`] if any window is zero.
pub fn moving_averages(series: &Series, windows: &[usize]) -> Result<Vec<(usize, DerivedSeries)>> {
    windows
        .iter()
        .map(|&w| moving_average(series, w).map(|ma| (w, ma)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use barstat_types::Bar;
    use chrono::NaiveDate;

    fn series(closes: &[f64]) -> Series {
        let bars = closes
            .iter()
            .enumerate()
            .map(|(i, &c)| {
                let date = NaiveDate::from_ymd_opt(2024, 1, 2 + i as u32).unwrap();
                Bar::new(date, c, c, c, c, 1_000)
            })
            .collect();
        Series::new(bars).unwrap()
    }

    #[test]
    fn test_three_bar_average() {
        let ma = moving_average(&series(&[100.0, 102.0, 101.0, 105.0, 103.0]), 3).unwrap();

        assert_eq!(ma.len(), 5);
        assert_eq!(ma.value_at(0), None);
        assert_eq!(ma.value_at(1), None);
        assert_relative_eq!(ma.value_at(2).unwrap(), 101.0, epsilon = 1e-9);
        assert_relative_eq!(ma.value_at(3).unwrap(), 102.666_666_666_666_67, epsilon = 1e-9);
        assert_relative_eq!(ma.value_at(4).unwrap(), 103.0, epsilon = 1e-9);
    }

    #[test]
    fn test_window_longer_than_series() {
        let ma = moving_average(&series(&[100.0, 102.0, 101.0, 105.0, 103.0]), 10).unwrap();

        assert_eq!(ma.len(), 5);
        assert_eq!(ma.defined_count(), 0);
    }

    #[test]
    fn test_window_one_is_identity() {
        let closes = [3.0, 1.0, 4.0, 1.0, 5.0];
        let ma = moving_average(&series(&closes), 1).unwrap();
        for (value, close) in ma.values().zip(closes) {
            assert_relative_eq!(value.unwrap(), close);
        }
    }

    #[test]
    fn test_zero_window_fails() {
        let err = moving_average(&series(&[1.0, 2.0]), 0).unwrap_err();
        assert!(matches!(err, AnalyticsError::InvalidArgument(_)));
        assert!(moving_averages(&series(&[1.0, 2.0]), &[2, 0]).is_err());
    }

    #[test]
    fn test_multiple_windows_are_independent() {
        let s = series(&[1.0, 2.0, 3.0, 4.0]);
        let mas = moving_averages(&s, &[2, 4]).unwrap();

        assert_eq!(mas[0].0, 2);
        assert_eq!(mas[0].1, moving_average(&s, 2).unwrap());
        assert_eq!(mas[1].1.defined_count(), 1);
        assert_relative_eq!(mas[1].1.value_at(3).unwrap(), 2.5);
    }

    #[test]
    fn test_mixed_magnitudes_do_not_bleed() {
        let ma = moving_average(&series(&[1e20, 1.0, 1.0, 1.0]), 2).unwrap();

        assert_relative_eq!(ma.value_at(1).unwrap(), 5e19);
        assert_relative_eq!(ma.value_at(2).unwrap(), 1.0);
        assert_relative_eq!(ma.value_at(3).unwrap(), 1.0);
    }

    #[test]
    fn test_infinite_close_only_affects_its_windows() {
        let ma = moving_average(&series(&[1.0, f64::INFINITY, 1.0, 1.0, 1.0, 1.0]), 3).unwrap();

        assert!(ma.value_at(2).unwrap().is_infinite());
        assert!(ma.value_at(3).unwrap().is_infinite());
        assert_relative_eq!(ma.value_at(4).unwrap(), 1.0);
        assert_relative_eq!(ma.value_at(5).unwrap(), 1.0);
    }
}
