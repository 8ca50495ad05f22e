//! Apache Parquet output format.

use arrow::array::{ArrayRef, Date32Array, Float64Array, UInt64Array};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use barstat_analytics::DerivedSeries;
use barstat_types::Bar;
use chrono::{Datelike, NaiveDate};
use parquet::arrow::ArrowWriter;
use parquet::basic::Compression;
use parquet::file::properties::WriterProperties;
use std::io::Write;
use std::sync::Arc;

use crate::formatter::check_aligned;
use crate::{Column, FormatError, Formatter};

/// Days from 0001-01-01 (CE) to 1970-01-01.
const UNIX_EPOCH_DAYS_FROM_CE: i32 = 719_163;

/// Parquet formatter.
#[derive(Debug, Clone)]
pub struct ParquetFormatter {
    /// Row group size (number of rows per group).
    row_group_size: usize,
    /// Compression codec.
    compression: Compression,
}

impl Default for ParquetFormatter {
    fn default() -> Self {
        Self {
            row_group_size: 100_000,
            compression: Compression::SNAPPY,
        }
    }
}

impl ParquetFormatter {
    /// Creates a new Parquet formatter with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the row group size.
    #[must_use]
    pub const fn with_row_group_size(mut self, size: usize) -> Self {
        self.row_group_size = size;
        self
    }

    /// Sets the compression codec.
    #[must_use]
    pub const fn with_compression(mut self, compression: Compression) -> Self {
        self.compression = compression;
        self
    }

    fn date_field() -> Field {
        Field::new("date", DataType::Date32, false)
    }

    /// Creates the Arrow schema for daily bars.
    fn bar_schema() -> Schema {
        Schema::new(vec![
            Self::date_field(),
            Field::new("open", DataType::Float64, false),
            Field::new("high", DataType::Float64, false),
            Field::new("low", DataType::Float64, false),
            Field::new("close", DataType::Float64, false),
            Field::new("volume", DataType::UInt64, false),
        ])
    }

    /// Creates the Arrow schema for a table of nullable value columns.
    fn table_schema(names: &[&str]) -> Schema {
        let mut fields = vec![Self::date_field()];
        fields.extend(
            names
                .iter()
                .map(|name| Field::new(*name, DataType::Float64, true)),
        );
        Schema::new(fields)
    }

    fn dates_array(dates: impl Iterator<Item = NaiveDate>) -> ArrayRef {
        let days: Vec<i32> = dates
            .map(|d| d.num_days_from_ce() - UNIX_EPOCH_DAYS_FROM_CE)
            .collect();
        Arc::new(Date32Array::from(days))
    }

    /// Converts bars to an Arrow RecordBatch.
    fn bars_to_batch(bars: &[Bar]) -> Result<RecordBatch, FormatError> {
        let opens: Vec<_> = bars.iter().map(|b| b.open).collect();
        let highs: Vec<_> = bars.iter().map(|b| b.high).collect();
        let lows: Vec<_> = bars.iter().map(|b| b.low).collect();
        let closes: Vec<_> = bars.iter().map(|b| b.close).collect();
        let volumes: Vec<_> = bars.iter().map(|b| b.volume).collect();

        RecordBatch::try_new(
            Arc::new(Self::bar_schema()),
            vec![
                Self::dates_array(bars.iter().map(|b| b.date)),
                Arc::new(Float64Array::from(opens)),
                Arc::new(Float64Array::from(highs)),
                Arc::new(Float64Array::from(lows)),
                Arc::new(Float64Array::from(closes)),
                Arc::new(UInt64Array::from(volumes)),
            ],
        )
        .map_err(|e| FormatError::Parquet(e.to_string()))
    }

    /// Converts rows `[from, to)` of aligned columns to an Arrow RecordBatch.
    fn table_to_batch(
        schema: &Arc<Schema>,
        columns: &[Column<'_>],
        from: usize,
        to: usize,
    ) -> Result<RecordBatch, FormatError> {
        let mut arrays = Vec::with_capacity(columns.len() + 1);
        if let Some(first) = columns.first() {
            arrays.push(Self::dates_array(
                first.series.points()[from..to].iter().map(|p| p.date),
            ));
        }
        for column in columns {
            let values: Vec<Option<f64>> = column.series.points()[from..to]
                .iter()
                .map(|p| p.value)
                .collect();
            arrays.push(Arc::new(Float64Array::from(values)) as ArrayRef);
        }

        RecordBatch::try_new(Arc::clone(schema), arrays)
            .map_err(|e| FormatError::Parquet(e.to_string()))
    }

    fn writer<W: Write + Send>(
        &self,
        schema: Arc<Schema>,
        writer: W,
    ) -> Result<ArrowWriter<W>, FormatError> {
        let props = WriterProperties::builder()
            .set_compression(self.compression)
            .set_max_row_group_size(self.row_group_size)
            .build();

        ArrowWriter::try_new(writer, schema, Some(props))
            .map_err(|e| FormatError::Parquet(e.to_string()))
    }
}

impl Formatter for ParquetFormatter {
    fn write_bars<W: Write + Send>(&self, bars: &[Bar], writer: W) -> Result<(), FormatError> {
        let mut arrow_writer = self.writer(Arc::new(Self::bar_schema()), writer)?;

        for chunk in bars.chunks(self.row_group_size) {
            let batch = Self::bars_to_batch(chunk)?;
            arrow_writer
                .write(&batch)
                .map_err(|e| FormatError::Parquet(e.to_string()))?;
        }

        arrow_writer
            .close()
            .map_err(|e| FormatError::Parquet(e.to_string()))?;

        Ok(())
    }

    fn write_series<W: Write + Send>(
        &self,
        series: &DerivedSeries,
        writer: W,
    ) -> Result<(), FormatError> {
        self.write_table(&[Column::new("value", series)], writer)
    }

    fn write_table<W: Write + Send>(
        &self,
        columns: &[Column<'_>],
        writer: W,
    ) -> Result<(), FormatError> {
        check_aligned(columns)?;
        if columns.is_empty() {
            return Err(FormatError::Parquet(
                "a Parquet table needs at least one column".to_string(),
            ));
        }

        let names: Vec<&str> = columns.iter().map(|c| c.name).collect();
        let schema = Arc::new(Self::table_schema(&names));
        let mut arrow_writer = self.writer(Arc::clone(&schema), writer)?;

        let rows = columns[0].series.len();
        let mut from = 0;
        while from < rows {
            let to = (from + self.row_group_size.max(1)).min(rows);
            let batch = Self::table_to_batch(&schema, columns, from, to)?;
            arrow_writer
                .write(&batch)
                .map_err(|e| FormatError::Parquet(e.to_string()))?;
            from = to;
        }

        arrow_writer
            .close()
            .map_err(|e| FormatError::Parquet(e.to_string()))?;

        Ok(())
    }

    fn extension(&self) -> &str {
        "parquet"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use barstat_analytics::Point;
    use std::io::Cursor;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    #[test]
    fn test_parquet_bars() {
        let formatter = ParquetFormatter::new();
        let bars = vec![Bar::new(date(2), 100.0, 101.0, 99.0, 100.5, 1_000)];
        let mut output = Cursor::new(Vec::new());

        formatter.write_bars(&bars, &mut output).unwrap();

        // Parquet files start with "PAR1" magic bytes
        let data = output.into_inner();
        assert!(data.len() > 4);
        assert_eq!(&data[0..4], b"PAR1");
    }

    #[test]
    fn test_parquet_series_with_gaps() {
        let formatter = ParquetFormatter::new().with_row_group_size(1);
        let series: DerivedSeries =
            vec![Point::undefined(date(2)), Point::defined(date(3), 1.5)].into();
        let mut output = Cursor::new(Vec::new());

        formatter.write_series(&series, &mut output).unwrap();

        let data = output.into_inner();
        assert_eq!(&data[0..4], b"PAR1");
    }

    #[test]
    fn test_epoch_offset() {
        let epoch = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap();
        assert_eq!(epoch.num_days_from_ce(), UNIX_EPOCH_DAYS_FROM_CE);
    }

    #[test]
    fn test_schemas() {
        let schema = ParquetFormatter::bar_schema();
        assert_eq!(schema.fields().len(), 6);
        assert!(schema.field_with_name("volume").is_ok());

        let schema = ParquetFormatter::table_schema(&["close", "ma50"]);
        assert_eq!(schema.fields().len(), 3);
        assert!(schema.field_with_name("ma50").unwrap().is_nullable());
    }
}
