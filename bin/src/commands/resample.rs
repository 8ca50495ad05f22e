//! Resample command implementation.

use crate::display::{Format, Payload, load_series, write_output};
use anyhow::Result;
use barstat_lib::prelude::*;
use std::path::Path;
use tracing::info;

/// Resample the series at `input` to calendar periods.
pub(crate) fn resample(
    input: &Path,
    period: Period,
    bars: bool,
    output: Option<&Path>,
    format: Option<Format>,
) -> Result<()> {
    let series = load_series(input)?;
    let format = Format::resolve(format, output);

    if bars {
        let resampled = resample_bars(&series, period)?;
        info!(%period, buckets = resampled.len(), "resampled bars");
        write_output(Payload::Bars(resampled.bars()), output, format)
    } else {
        let closes = resample_closes(&series, period);
        info!(%period, buckets = closes.len(), "resampled closes");
        write_output(Payload::Series(&closes), output, format)
    }
}
