//! Moving-average command implementation.
//!
//! Writes one table: the close followed by one column per window.

use crate::display::{Format, Payload, load_series, write_output};
use anyhow::{Result, bail};
use barstat_lib::prelude::*;
use barstat_lib::{Column, moving_averages as compute_moving_averages};
use std::path::Path;
use tracing::info;

/// Closes of a series as a fully defined derived series.
fn close_column(series: &Series) -> DerivedSeries {
    series
        .bars()
        .iter()
        .map(|bar| Point::defined(bar.date, bar.close))
        .collect()
}

/// Compute moving averages for the series at `input`.
pub(crate) fn moving_averages(
    input: &Path,
    windows: &[usize],
    output: Option<&Path>,
    format: Option<Format>,
) -> Result<()> {
    if windows.is_empty() {
        bail!("No moving-average windows given");
    }

    let series = load_series(input)?;
    let averages = compute_moving_averages(&series, windows)?;
    for (window, average) in &averages {
        info!(window, defined = average.defined_count(), "computed moving average");
    }

    let closes = close_column(&series);
    let names: Vec<String> = averages.iter().map(|(w, _)| format!("ma{w}")).collect();
    let mut columns = vec![Column::new("close", &closes)];
    columns.extend(
        names
            .iter()
            .zip(&averages)
            .map(|(name, (_, average))| Column::new(name, average)),
    );

    write_output(
        Payload::Table(&columns),
        output,
        Format::resolve(format, output),
    )
}
