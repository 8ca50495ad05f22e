//! Benchmark utilities for barstat.

use barstat_lib::{Bar, Series};
use chrono::{Days, NaiveDate};

/// First date of every synthetic series.
fn start_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2000, 1, 3).unwrap_or(NaiveDate::MIN)
}

/// Builds a deterministic series of `n` consecutive daily bars.
///
/// Closes follow a pseudo-random walk from 100 clamped to `[50, 150]`, so
/// every price stays positive and every bar is internally consistent.
pub fn synthetic_series(n: usize) -> Series {
    let mut bars = Vec::with_capacity(n);
    let start = start_date();
    let mut close = 100.0_f64;

    for i in 0..n {
        let open = close;
        // Small linear congruential step in [-1, 1).
        let step = ((i.wrapping_mul(1_103_515_245).wrapping_add(12_345) >> 8) % 2_000) as f64
            / 1_000.0
            - 1.0;
        close = (open + step).clamp(50.0, 150.0);

        let date = start
            .checked_add_days(Days::new(i as u64))
            .unwrap_or(NaiveDate::MAX);
        bars.push(Bar::new(
            date,
            open,
            open.max(close) + 0.5,
            open.min(close) - 0.5,
            close,
            1_000_000 + (i as u64 % 10_000),
        ));
    }

    Series::new(bars).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_synthetic_series_is_valid() {
        let series = synthetic_series(1_000);
        assert_eq!(series.len(), 1_000);
        assert!(series.validate().is_ok());
        assert!(series.bars().iter().all(Bar::is_consistent));
    }
}
