//! Percentage return series.

use barstat_types::{AnalyticsError, Result, Series};

use crate::{DerivedSeries, Point, Summary, describe};

/// Computes the percentage change between consecutive closes.
///
/// Position 0 is undefined; position `i` is
/// `(close[i] - close[i-1]) / close[i-1] * 100`.
///
/// # Errors
///
/// Returns [`AnalyticsError::InvalidData`] if any close is non-positive or
/// not finite.
pub fn return_series(series: &Series) -> Result<DerivedSeries> {
    if let Some(bar) = series
        .bars()
        .iter()
        .find(|b| !b.close.is_finite() || b.close <= 0.0)
    {
        return Err(AnalyticsError::InvalidData(format!(
            "close {} on {} is not a positive price",
            bar.close, bar.date
        )));
    }

    let bars = series.bars();
    let points = bars
        .iter()
        .enumerate()
        .map(|(i, bar)| {
            let value = i
                .checked_sub(1)
                .map(|prev| percent_change(bars[prev].close, bar.close));
            Point::new(bar.date, value)
        })
        .collect();

    Ok(DerivedSeries::new(points))
}

/// Computes the percentage change between consecutive values of a
/// price-like derived series, such as resampled closes.
///
/// Position `i` is defined only when positions `i` and `i - 1` are both
/// defined.
///
/// # Errors
///
/// Returns [`AnalyticsError::InvalidData`] if a defined value that would be
/// used as a denominator is non-positive or not finite.
pub fn pct_change(values: &DerivedSeries) -> Result<DerivedSeries> {
    let points = values.points();

    let mut denominators = points.iter().take(points.len().saturating_sub(1));
    if let Some(point) =
        denominators.find(|p| p.value.is_some_and(|v| !v.is_finite() || v <= 0.0))
    {
        return Err(AnalyticsError::InvalidData(format!(
            "value {:?} on {} is not a positive price",
            point.value, point.date
        )));
    }

    let out = points
        .iter()
        .enumerate()
        .map(|(i, point)| {
            let value = match (i.checked_sub(1).and_then(|p| points[p].value), point.value) {
                (Some(prev), Some(curr)) => Some(percent_change(prev, curr)),
                _ => None,
            };
            Point::new(point.date, value)
        })
        .collect();

    Ok(DerivedSeries::new(out))
}

/// Computes descriptive statistics over the defined values of a return
/// series.
///
/// # Errors
///
/// Returns [`AnalyticsError::EmptySeries`] if no value is defined.
pub fn return_stats(returns: &DerivedSeries) -> Result<Summary> {
    describe(&returns.defined_values())
}

fn percent_change(prev: f64, curr: f64) -> f64 {
    (curr - prev) / prev * 100.0
}
