//! Describe command implementation.
//!
//! Reports the date span of a series together with statistics of its closes
//! and of its daily returns.

use crate::display::{load_series, print_json, print_overview, print_summary};
use anyhow::Result;
use barstat_lib::prelude::*;
use barstat_lib::{SeriesOverview, overview, return_stats};
use serde::Serialize;
use std::path::Path;

/// Everything `describe` reports.
#[derive(Debug, Serialize)]
pub(crate) struct DescribeReport {
    overview: SeriesOverview,
    close: Summary,
    /// Absent when the series has fewer than two bars.
    returns: Option<Summary>,
}

/// Build the report for a loaded series.
pub(crate) fn build_report(series: &Series) -> Result<DescribeReport> {
    let returns = match return_stats(&return_series(series)?) {
        Ok(summary) => Some(summary),
        Err(AnalyticsError::EmptySeries) => None,
        Err(e) => return Err(e.into()),
    };

    Ok(DescribeReport {
        overview: overview(series)?,
        close: close_stats(series)?,
        returns,
    })
}

/// Describe the series stored at `input`.
pub(crate) fn describe(input: &Path, json: bool) -> Result<()> {
    let series = load_series(input)?;
    let report = build_report(&series)?;

    if json {
        return print_json(&report);
    }

    print_overview(&report.overview);
    print_summary("Close", &report.close, "");
    match &report.returns {
        Some(summary) => print_summary("Daily return", summary, "%"),
        None => println!("\nDaily return: not enough bars"),
    }
    Ok(())
}
