//! Display utilities and output formatting for the barstat CLI.

use anyhow::{Context, Result, bail};
use barstat_lib::prelude::*;
use barstat_lib::{Column, FormatError, Histogram, SeriesOverview};
use clap::ValueEnum;
use serde::Serialize;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use tracing::{debug, info, warn};

/// Output format for derived data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum Format {
    Csv,
    Json,
    Ndjson,
    Parquet,
}

impl Format {
    /// Returns the file extension for this format.
    pub(crate) const fn extension(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
            Self::Ndjson => "ndjson",
            Self::Parquet => "parquet",
        }
    }

    /// Picks the explicit format, else the one named by the output file
    /// extension, else CSV.
    pub(crate) fn resolve(explicit: Option<Self>, output: Option<&Path>) -> Self {
        explicit
            .or_else(|| {
                output
                    .and_then(|p| p.extension())
                    .and_then(|ext| ext.to_str())
                    .and_then(|ext| ext.parse::<OutputFormat>().ok())
                    .map(Self::from)
            })
            .unwrap_or(Self::Csv)
    }
}

impl From<OutputFormat> for Format {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Csv => Self::Csv,
            OutputFormat::Json => Self::Json,
            OutputFormat::Ndjson => Self::Ndjson,
            OutputFormat::Parquet => Self::Parquet,
        }
    }
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.extension())
    }
}

/// Data handed to a formatter.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Payload<'a> {
    Bars(&'a [Bar]),
    Series(&'a DerivedSeries),
    Table(&'a [Column<'a>]),
}

impl Payload<'_> {
    fn rows(&self) -> usize {
        match self {
            Self::Bars(bars) => bars.len(),
            Self::Series(series) => series.len(),
            Self::Table(columns) => columns.first().map_or(0, |c| c.series.len()),
        }
    }
}

/// Load a bar file, inferring its format from the extension.
pub(crate) fn load_series(path: &Path) -> Result<Series> {
    let format = InputFormat::from_path(path).unwrap_or_default();
    let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;

    let series = BarReader::new(format)
        .read(BufReader::new(file))
        .with_context(|| format!("Failed to read bars from {}", path.display()))?;

    info!(input = %path.display(), bars = series.len(), "loaded series");
    if let Err(err) = series.validate() {
        warn!(input = %path.display(), %err, "high/low do not enclose open/close");
    }
    if let Some(range) = series.date_range() {
        debug!(%range, "series span");
    }
    Ok(series)
}

/// Write a payload to `output`, or to stdout when no path is given.
pub(crate) fn write_output(payload: Payload<'_>, output: Option<&Path>, format: Format) -> Result<()> {
    match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            let mut writer = BufWriter::new(file);
            dispatch(payload, format, &mut writer)?;
            writer.flush()?;
            info!(output = %path.display(), %format, rows = payload.rows(), "wrote output");
        }
        None => {
            if format == Format::Parquet {
                bail!("Parquet output is binary; pass --output FILE");
            }
            let mut writer = BufWriter::new(std::io::stdout());
            dispatch(payload, format, &mut writer)?;
            writer.flush()?;
            debug!(%format, rows = payload.rows(), "wrote output to stdout");
        }
    }
    Ok(())
}

fn dispatch<W: Write + Send>(payload: Payload<'_>, format: Format, writer: W) -> Result<()> {
    match format {
        Format::Csv => emit(&CsvFormatter::new(), payload, writer)?,
        Format::Json => emit(&JsonFormatter::new(), payload, writer)?,
        Format::Ndjson => emit(&JsonFormatter::ndjson(), payload, writer)?,
        Format::Parquet => {
            #[cfg(feature = "parquet")]
            {
                emit(&ParquetFormatter::new(), payload, writer)?;
            }
            #[cfg(not(feature = "parquet"))]
            {
                let _ = writer;
                bail!("Parquet support not compiled in");
            }
        }
    }
    Ok(())
}

fn emit<F: Formatter, W: Write + Send>(
    formatter: &F,
    payload: Payload<'_>,
    writer: W,
) -> Result<(), FormatError> {
    match payload {
        Payload::Bars(bars) => formatter.write_bars(bars, writer),
        Payload::Series(series) => formatter.write_series(series, writer),
        Payload::Table(columns) => formatter.write_table(columns, writer),
    }
}

/// Print a value as pretty JSON on stdout.
pub(crate) fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Print the date span of a series.
pub(crate) fn print_overview(overview: &SeriesOverview) {
    println!("Start:      {}", overview.start.format("%Y-%m-%d"));
    println!("End:        {}", overview.end.format("%Y-%m-%d"));
    println!("Bars:       {}", overview.bar_count);
}

/// Print a statistics block under a heading.
pub(crate) fn print_summary(title: &str, summary: &Summary, unit: &str) {
    println!("\n{title}:");
    println!("{:<10} {:>14}", "COUNT", summary.count);
    println!("{:<10} {:>14.4}{unit}", "MEAN", summary.mean);
    println!("{:<10} {:>14.4}{unit}", "STD", summary.std_dev);
    println!("{:<10} {:>14.4}{unit}", "MIN", summary.min);
    println!("{:<10} {:>14.4}{unit}", "MEDIAN", summary.median);
    println!("{:<10} {:>14.4}{unit}", "MAX", summary.max);
}

/// Print an interval summary, optionally with its candles.
pub(crate) fn print_interval(summary: &IntervalSummary, candles: bool) {
    println!(
        "Interval:      {} to {}",
        summary.start.format("%Y-%m-%d"),
        summary.end.format("%Y-%m-%d")
    );
    println!("Bars:          {}", summary.bar_count);
    println!("Price change:  {:+.4}", summary.price_change);
    println!("Return:        {:+.2}%", summary.period_return_pct);
    println!("Avg volume:    {:.0}", summary.avg_volume);
    println!("High:          {:.4}", summary.interval_high);
    println!("Low:           {:.4}", summary.interval_low);
    println!(
        "Up/Down days:  {}/{}",
        summary.up_count(),
        summary.down_count()
    );

    if candles {
        println!(
            "\n{:<12} {:>12} {:>12} {:>12} {:>12} {:>10} {:>10} {:>6}",
            "DATE", "OPEN", "HIGH", "LOW", "CLOSE", "BODY", "RANGE", "DIR"
        );
        println!("{}", "-".repeat(92));
        for candle in &summary.candles {
            println!(
                "{:<12} {:>12.4} {:>12.4} {:>12.4} {:>12.4} {:>10.4} {:>10.4} {:>6}",
                candle.date.format("%Y-%m-%d").to_string(),
                candle.open,
                candle.high,
                candle.low,
                candle.close,
                candle.body,
                candle.range,
                candle.direction.as_str()
            );
        }
    }
}

/// Widest bar drawn for the fullest histogram bin.
const HISTOGRAM_WIDTH: usize = 40;

/// Print a histogram as a text bar chart.
pub(crate) fn print_histogram(histogram: &Histogram) {
    let peak = histogram.mode_bin().map_or(0, |bin| bin.count);

    println!("{:>12} {:>12} {:>8}", "LOWER", "UPPER", "COUNT");
    println!("{}", "-".repeat(34 + HISTOGRAM_WIDTH));
    for bin in &histogram.bins {
        let width = if peak == 0 {
            0
        } else {
            bin.count * HISTOGRAM_WIDTH / peak
        };
        println!(
            "{:>12.4} {:>12.4} {:>8} {}",
            bin.lower,
            bin.upper,
            bin.count,
            "#".repeat(width)
        );
    }
    println!("\nTotal: {} values", histogram.total());
}
