//! Equal-width value distributions.

use barstat_types::{AnalyticsError, Result};
use serde::{Deserialize, Serialize};

/// One histogram bin covering `[lower, upper)`; the last bin also includes
/// its upper edge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HistogramBin {
    /// Lower edge.
    pub lower: f64,
    /// Upper edge.
    pub upper: f64,
    /// Number of values in the bin.
    pub count: usize,
}

/// Equal-width histogram.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Histogram {
    /// Bins in ascending order.
    pub bins: Vec<HistogramBin>,
}

impl Histogram {
    /// Returns the number of values counted.
    #[must_use]
    pub fn total(&self) -> usize {
        self.bins.iter().map(|b| b.count).sum()
    }

    /// Returns the bin with the highest count (the first one on ties).
    #[must_use]
    pub fn mode_bin(&self) -> Option<&HistogramBin> {
        self.bins
            .iter()
            .reduce(|best, b| if b.count > best.count { b } else { best })
    }
}

/// Counts finite `values` into `bins` equal-width bins spanning their range.
///
/// When every value is equal the range is widened by 0.5 on each side.
///
/// # Errors
///
/// Returns [`AnalyticsError::InvalidArgument`] if `bins` is zero,
/// [`AnalyticsError::EmptySeries`] if there is no finite value, or
/// [`AnalyticsError::InvalidData`] if the value range overflows `f64`.
pub fn histogram(values: &[f64], bins: usize) -> Result<Histogram> {
    if bins == 0 {
        return Err(AnalyticsError::InvalidArgument(
            "histogram needs at least one bin".to_string(),
        ));
    }

    let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if finite.is_empty() {
        return Err(AnalyticsError::EmptySeries);
    }

    let mut lo = finite.iter().copied().fold(f64::INFINITY, f64::min);
    let mut hi = finite.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if lo == hi {
        lo -= 0.5;
        hi += 0.5;
    }

    let width = (hi - lo) / bins as f64;
    if !width.is_finite() {
        return Err(AnalyticsError::InvalidData(format!(
            "value range {lo} to {hi} is too wide to bin"
        )));
    }
    let mut counts = vec![0usize; bins];
    for v in finite {
        let idx = (((v - lo) / width) as usize).min(bins - 1);
        counts[idx] += 1;
    }

    let bins = counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| HistogramBin {
            lower: lo + width * i as f64,
            upper: if i + 1 == bins { hi } else { lo + width * (i + 1) as f64 },
            count,
        })
        .collect();

    Ok(Histogram { bins })
}
