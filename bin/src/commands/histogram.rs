//! Histogram command implementation.

use crate::display::{load_series, print_histogram, print_json};
use anyhow::Result;
use barstat_lib::Histogram;
use barstat_lib::prelude::*;
use std::path::Path;
use tracing::info;

/// Bin the closes, or the defined daily returns, of a series.
pub(crate) fn distribution(series: &Series, returns: bool, bins: usize) -> Result<Histogram> {
    let values: Vec<f64> = if returns {
        return_series(series)?.defined_values()
    } else {
        series.closes().collect()
    };
    Ok(histogram(&values, bins)?)
}

/// Show the distribution of the series at `input`.
pub(crate) fn histogram_command(input: &Path, returns: bool, bins: usize, json: bool) -> Result<()> {
    let series = load_series(input)?;
    let result = distribution(&series, returns, bins)?;
    info!(bins, values = result.total(), returns, "computed histogram");

    if json {
        return print_json(&result);
    }

    print_histogram(&result);
    Ok(())
}
