//! Returns command implementation.

use crate::display::{Format, Payload, load_series, write_output};
use anyhow::Result;
use barstat_lib::pct_change;
use barstat_lib::prelude::*;
use std::path::Path;
use tracing::info;

/// Daily returns, or returns between period closes when `period` is set.
pub(crate) fn compute_returns(series: &Series, period: Option<Period>) -> Result<DerivedSeries> {
    let returns = match period {
        Some(period) => pct_change(&resample_closes(series, period))?,
        None => return_series(series)?,
    };
    Ok(returns)
}

/// Compute percentage returns for the series at `input`.
pub(crate) fn returns(
    input: &Path,
    period: Option<Period>,
    output: Option<&Path>,
    format: Option<Format>,
) -> Result<()> {
    let series = load_series(input)?;
    let returns = compute_returns(&series, period)?;
    info!(
        period = period.map_or("day", |p| p.as_str()),
        defined = returns.defined_count(),
        "computed returns"
    );

    write_output(
        Payload::Series(&returns),
        output,
        Format::resolve(format, output),
    )
}
