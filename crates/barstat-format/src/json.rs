//! JSON output format.

use barstat_analytics::DerivedSeries;
use barstat_types::Bar;
use serde::Serialize;
use serde_json::{Map, Value};
use std::io::Write;

use crate::formatter::check_aligned;
use crate::{Column, FormatError, Formatter};

/// JSON output style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonStyle {
    /// JSON array (standard JSON).
    #[default]
    Array,
    /// Newline-delimited JSON (NDJSON/JSONL).
    Ndjson,
}

/// JSON formatter.
#[derive(Debug, Clone, Default)]
pub struct JsonFormatter {
    /// Output style.
    style: JsonStyle,
    /// Whether to pretty-print (only for array style).
    pretty: bool,
}

impl JsonFormatter {
    /// Creates a new JSON formatter with default settings (array style).
    #[must_use]
    pub const fn new() -> Self {
        Self {
            style: JsonStyle::Array,
            pretty: false,
        }
    }

    /// Creates a new NDJSON formatter.
    #[must_use]
    pub const fn ndjson() -> Self {
        Self {
            style: JsonStyle::Ndjson,
            pretty: false,
        }
    }

    /// Sets whether to pretty-print output (array style only).
    #[must_use]
    pub const fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// Sets the output style.
    #[must_use]
    pub const fn with_style(mut self, style: JsonStyle) -> Self {
        self.style = style;
        self
    }

    fn write_records<T: Serialize, W: Write>(
        &self,
        records: &[T],
        mut writer: W,
    ) -> Result<(), FormatError> {
        match self.style {
            JsonStyle::Array => {
                if self.pretty {
                    serde_json::to_writer_pretty(&mut writer, records)?;
                } else {
                    serde_json::to_writer(&mut writer, records)?;
                }
                writeln!(writer)?;
            }
            JsonStyle::Ndjson => {
                for record in records {
                    serde_json::to_writer(&mut writer, record)?;
                    writeln!(writer)?;
                }
            }
        }
        Ok(())
    }
}

impl Formatter for JsonFormatter {
    fn write_bars<W: Write + Send>(&self, bars: &[Bar], writer: W) -> Result<(), FormatError> {
        self.write_records(bars, writer)
    }

    fn write_series<W: Write + Send>(
        &self,
        series: &DerivedSeries,
        writer: W,
    ) -> Result<(), FormatError> {
        self.write_records(series.points(), writer)
    }

    fn write_table<W: Write + Send>(
        &self,
        columns: &[Column<'_>],
        writer: W,
    ) -> Result<(), FormatError> {
        check_aligned(columns)?;

        let rows: Vec<Value> = columns
            .first()
            .map(|first| {
                first
                    .series
                    .dates()
                    .enumerate()
                    .map(|(row, date)| {
                        let mut record = Map::new();
                        record.insert("date".to_string(), Value::String(date.to_string()));
                        for column in columns {
                            let value = column
                                .series
                                .value_at(row)
                                .and_then(serde_json::Number::from_f64)
                                .map_or(Value::Null, Value::Number);
                            record.insert(column.name.to_string(), value);
                        }
                        Value::Object(record)
                    })
                    .collect()
            })
            .unwrap_or_default();

        self.write_records(&rows, writer)
    }

    fn extension(&self) -> &str {
        match self.style {
            JsonStyle::Array => "json",
            JsonStyle::Ndjson => "ndjson",
        }
    }
}
