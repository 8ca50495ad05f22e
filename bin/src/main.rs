//! barstat CLI - Descriptive analytics over daily OHLCV price series.

use anyhow::Result;
use barstat_lib::Period;
use chrono::NaiveDate;
use clap::{CommandFactory, Parser, Subcommand};
use std::path::PathBuf;
use tracing::Level;

mod commands;
mod config;
mod display;

use config::AnalysisConfig;
use display::Format;

#[derive(Parser)]
#[command(name = "barstat")]
#[command(about = "Descriptive analytics over daily OHLCV price series", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Analysis defaults file (JSON). Defaults to the user config directory.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the date span, close statistics and daily return statistics
    Describe {
        /// Bar file (csv, json or ndjson)
        #[arg(short, long)]
        input: PathBuf,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Compute percentage returns
    Returns {
        /// Bar file (csv, json or ndjson)
        #[arg(short, long)]
        input: PathBuf,

        /// Compute returns between period closes instead of daily
        #[arg(short, long)]
        period: Option<Period>,

        /// Output file path. Defaults to stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format. Defaults to the output file extension, then csv
        #[arg(short, long, value_enum)]
        format: Option<Format>,
    },

    /// Compute trailing simple moving averages of the close
    Ma {
        /// Bar file (csv, json or ndjson)
        #[arg(short, long)]
        input: PathBuf,

        /// Window length in bars (repeatable). Defaults to the configured windows
        #[arg(short, long = "window")]
        windows: Vec<usize>,

        /// Output file path. Defaults to stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format. Defaults to the output file extension, then csv
        #[arg(short, long, value_enum)]
        format: Option<Format>,
    },

    /// Resample to calendar periods
    Resample {
        /// Bar file (csv, json or ndjson)
        #[arg(short, long)]
        input: PathBuf,

        /// Target period (day, week, month, quarter, year)
        #[arg(short, long)]
        period: Option<Period>,

        /// Emit full OHLCV bars instead of closes only
        #[arg(long)]
        bars: bool,

        /// Output file path. Defaults to stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format. Defaults to the output file extension, then csv
        #[arg(short, long, value_enum)]
        format: Option<Format>,
    },

    /// Summarize an inclusive date interval
    Interval {
        /// Bar file (csv, json or ndjson)
        #[arg(short, long)]
        input: PathBuf,

        /// Start date (YYYY-MM-DD). Defaults to the trailing window before --end
        #[arg(short, long)]
        start: Option<NaiveDate>,

        /// End date (YYYY-MM-DD). Defaults to the last bar
        #[arg(short, long)]
        end: Option<NaiveDate>,

        /// Include per-bar candles
        #[arg(long)]
        candles: bool,

        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the distribution of closes or daily returns
    Histogram {
        /// Bar file (csv, json or ndjson)
        #[arg(short, long)]
        input: PathBuf,

        /// Bin daily returns instead of closes
        #[arg(long)]
        returns: bool,

        /// Number of bins. Defaults to the configured bin count
        #[arg(short, long)]
        bins: Option<usize>,

        /// Print the histogram as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Maps the verbosity flags to a maximum log level.
const fn log_level(verbose: u8, quiet: bool) -> Level {
    if quiet {
        return Level::ERROR;
    }
    match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

fn init_tracing(verbose: u8, quiet: bool) {
    tracing_subscriber::fmt()
        .with_max_level(log_level(verbose, quiet))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    // Show help if no command provided
    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    let config = AnalysisConfig::load(cli.config.as_deref())?;

    match command {
        Commands::Describe { input, json } => commands::describe::describe(&input, json),
        Commands::Returns {
            input,
            period,
            output,
            format,
        } => commands::returns::returns(&input, period, output.as_deref(), format),
        Commands::Ma {
            input,
            windows,
            output,
            format,
        } => {
            let windows = if windows.is_empty() {
                config.windows
            } else {
                windows
            };
            commands::ma::moving_averages(&input, &windows, output.as_deref(), format)
        }
        Commands::Resample {
            input,
            period,
            bars,
            output,
            format,
        } => commands::resample::resample(
            &input,
            period.unwrap_or(config.period),
            bars,
            output.as_deref(),
            format,
        ),
        Commands::Interval {
            input,
            start,
            end,
            candles,
            json,
        } => commands::interval::interval(
            &input,
            start,
            end,
            config.trailing_days,
            candles,
            json,
        ),
        Commands::Histogram {
            input,
            returns,
            bins,
            json,
        } => {
            let bins = bins.unwrap_or(if returns {
                config.return_bins
            } else {
                config.close_bins
            });
            commands::histogram::histogram_command(&input, returns, bins, json)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level() {
        assert_eq!(log_level(0, false), Level::WARN);
        assert_eq!(log_level(1, false), Level::INFO);
        assert_eq!(log_level(2, false), Level::DEBUG);
        assert_eq!(log_level(5, false), Level::TRACE);
        assert_eq!(log_level(3, true), Level::ERROR);
    }

    #[test]
    fn test_cli_parses() {
        Cli::command().debug_assert();

        let cli = Cli::try_parse_from([
            "barstat", "-vv", "ma", "-i", "aapl.csv", "-w", "20", "-w", "50",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        let Some(Commands::Ma { windows, .. }) = cli.command else {
            panic!("expected ma command");
        };
        assert_eq!(windows, vec![20, 50]);
    }

    #[test]
    fn test_cli_parses_dates_and_periods() {
        let cli = Cli::try_parse_from([
            "barstat", "interval", "-i", "a.csv", "--start", "2024-01-02", "--candles",
        ])
        .unwrap();
        let Some(Commands::Interval { start, end, candles, .. }) = cli.command else {
            panic!("expected interval command");
        };
        assert_eq!(start, NaiveDate::from_ymd_opt(2024, 1, 2));
        assert_eq!(end, None);
        assert!(candles);

        let cli =
            Cli::try_parse_from(["barstat", "resample", "-i", "a.csv", "-p", "weekly"]).unwrap();
        let Some(Commands::Resample { period, .. }) = cli.command else {
            panic!("expected resample command");
        };
        assert_eq!(period, Some(Period::Week));

        assert!(Cli::try_parse_from(["barstat", "resample", "-i", "a.csv", "-p", "hourly"]).is_err());
    }
}
