//! CSV output format.

use barstat_analytics::DerivedSeries;
use barstat_types::Bar;
use std::io::Write;

use crate::formatter::check_aligned;
use crate::{Column, FormatError, Formatter};

/// CSV formatter.
#[derive(Debug, Clone)]
pub struct CsvFormatter {
    /// Field delimiter (default: comma).
    delimiter: char,
    /// Whether to include header row.
    include_header: bool,
}

impl Default for CsvFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl CsvFormatter {
    /// Creates a new CSV formatter with default settings.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            delimiter: ',',
            include_header: true,
        }
    }

    /// Sets the field delimiter.
    #[must_use]
    pub const fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Sets whether to include a header row.
    #[must_use]
    pub const fn with_header(mut self, include: bool) -> Self {
        self.include_header = include;
        self
    }

    /// Creates a tab-separated values (TSV) formatter.
    #[must_use]
    pub const fn tsv() -> Self {
        Self {
            delimiter: '\t',
            include_header: true,
        }
    }
}

/// Renders an optional value; undefined values become an empty cell.
fn cell(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

impl Formatter for CsvFormatter {
    fn write_bars<W: Write + Send>(&self, bars: &[Bar], mut writer: W) -> Result<(), FormatError> {
        let d = self.delimiter;

        if self.include_header {
            writeln!(writer, "date{d}open{d}high{d}low{d}close{d}volume")?;
        }

        for bar in bars {
            writeln!(
                writer,
                "{}{d}{}{d}{}{d}{}{d}{}{d}{}",
                bar.date.format("%Y-%m-%d"),
                bar.open,
                bar.high,
                bar.low,
                bar.close,
                bar.volume
            )?;
        }

        Ok(())
    }

    fn write_series<W: Write + Send>(
        &self,
        series: &DerivedSeries,
        mut writer: W,
    ) -> Result<(), FormatError> {
        let d = self.delimiter;

        if self.include_header {
            writeln!(writer, "date{d}value")?;
        }

        for point in series {
            writeln!(
                writer,
                "{}{d}{}",
                point.date.format("%Y-%m-%d"),
                cell(point.value)
            )?;
        }

        Ok(())
    }

    fn write_table<W: Write + Send>(
        &self,
        columns: &[Column<'_>],
        mut writer: W,
    ) -> Result<(), FormatError> {
        check_aligned(columns)?;
        let d = self.delimiter.to_string();

        if self.include_header {
            let mut header = vec!["date"];
            header.extend(columns.iter().map(|c| c.name));
            writeln!(writer, "{}", header.join(&d))?;
        }

        let Some(first) = columns.first() else {
            return Ok(());
        };

        for (row, date) in first.series.dates().enumerate() {
            let mut fields = vec![date.format("%Y-%m-%d").to_string()];
            fields.extend(columns.iter().map(|c| cell(c.series.value_at(row))));
            writeln!(writer, "{}", fields.join(&d))?;
        }

        Ok(())
    }

    fn extension(&self) -> &str {
        "csv"
    }
}
