//! CSV upload parsing
//!
//! Reads CSV bytes with polars and converts the frame into a DataSource with
//! one declared [`DataType`] per column.
//!
//! ## Memory Limits
//!
//! Uploads are rejected before parsing when they exceed
//! `Settings::max_upload_mb`, and after parsing when they hold more than
//! `Settings::max_rows` rows.

use crate::constants::DELIMITER_SNIFF_LINES;
use crate::data::error::{DataError, DataResult};
use crate::settings::Settings;
use crate::types::{DataCell, DataColumn, DataOrigin, DataRow, DataSource, DataType};
use polars::prelude::*;
use std::io::Cursor;

/// Parse CSV bytes into a DataSource
///
/// The separator is sniffed from the first lines (comma, semicolon or tab).
/// With `settings.parse_dates` on, ISO date columns come back as
/// [`DataType::Date`].
pub fn parse_csv_bytes(bytes: &[u8], filename: &str, settings: &Settings) -> DataResult<DataSource> {
    let start = std::time::Instant::now();

    let content = String::from_utf8_lossy(bytes);
    if content.trim().is_empty() {
        return Err(DataError::EmptyFile);
    }
    let delimiter = detect_delimiter(&content);

    let df = match read_frame(bytes, delimiter, Some(settings.infer_schema_length), settings) {
        Ok(df) => df,
        // Usually a late row that does not fit the dtype sampled from the
        // first rows; a full scan widens that column to text
        Err(e) => {
            tracing::warn!("Re-reading {} with a full schema scan: {}", filename, e);
            read_frame(bytes, delimiter, None, settings)?
        }
    };

    if df.width() == 0 {
        return Err(DataError::NoColumns);
    }
    if df.height() > settings.max_rows {
        return Err(DataError::TooManyRows {
            rows: df.height(),
            max_rows: settings.max_rows,
        });
    }

    let (columns, rows) = frame_to_table(&df)?;

    tracing::debug!(
        "Loaded CSV {} with {} rows x {} cols in {:?}",
        filename,
        rows.len(),
        columns.len(),
        start.elapsed()
    );

    Ok(DataSource {
        name: file_stem(filename),
        columns,
        rows,
        origin: DataOrigin::Csv {
            filename: filename.to_string(),
            delimiter,
        },
    })
}

/// Run the polars CSV reader; `None` scans every row to infer dtypes
fn read_frame(
    bytes: &[u8],
    delimiter: char,
    infer_schema_length: Option<usize>,
    settings: &Settings,
) -> PolarsResult<DataFrame> {
    CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(infer_schema_length)
        .map_parse_options(|opts| {
            opts.with_separator(delimiter as u8)
                .with_try_parse_dates(settings.parse_dates)
        })
        .into_reader_with_file_handle(Cursor::new(bytes.to_vec()))
        .finish()
}

/// Convert a polars frame into declared columns plus row-major cells
fn frame_to_table(df: &DataFrame) -> DataResult<(Vec<DataColumn>, Vec<DataRow>)> {
    let height = df.height();
    let mut columns = Vec::with_capacity(df.width());
    let mut cells_by_column: Vec<Vec<DataCell>> = Vec::with_capacity(df.width());

    for column in df.get_columns() {
        let mut data_type = infer_polars_dtype(column.dtype());
        // Temporal values are kept as their ISO text and parsed on demand
        let column = if data_type == DataType::Date {
            column.cast(&polars::datatypes::DataType::String)?
        } else {
            column.clone()
        };

        let cells: Vec<DataCell> = (0..height)
            .map(|row_idx| polars_value_to_cell(&column, row_idx, data_type))
            .collect();

        if cells.iter().all(DataCell::is_empty) {
            data_type = DataType::Unknown;
        }

        columns.push(DataColumn::new(column.name().as_str(), data_type));
        cells_by_column.push(cells);
    }

    let rows = (0..height)
        .map(|row_idx| {
            DataRow::new(
                cells_by_column
                    .iter()
                    .map(|cells| cells[row_idx].clone())
                    .collect(),
            )
        })
        .collect();

    Ok((columns, rows))
}

/// Map a polars dtype onto the declared element kind
fn infer_polars_dtype(dtype: &polars::datatypes::DataType) -> DataType {
    match dtype {
        polars::datatypes::DataType::Int8
        | polars::datatypes::DataType::Int16
        | polars::datatypes::DataType::Int32
        | polars::datatypes::DataType::Int64
        | polars::datatypes::DataType::UInt8
        | polars::datatypes::DataType::UInt16
        | polars::datatypes::DataType::UInt32
        | polars::datatypes::DataType::UInt64
        | polars::datatypes::DataType::Float32
        | polars::datatypes::DataType::Float64 => DataType::Number,
        polars::datatypes::DataType::Boolean => DataType::Boolean,
        polars::datatypes::DataType::Date | polars::datatypes::DataType::Datetime(_, _) => {
            DataType::Date
        }
        polars::datatypes::DataType::String => DataType::Text,
        _ => DataType::Unknown,
    }
}

/// Convert a polars cell value to DataCell
fn polars_value_to_cell(column: &Column, row_idx: usize, hint: DataType) -> DataCell {
    let Ok(val) = column.get(row_idx) else {
        return DataCell::Empty;
    };
    match val {
        AnyValue::Null => DataCell::Empty,
        AnyValue::Int8(v) => DataCell::Number(v as f64),
        AnyValue::Int16(v) => DataCell::Number(v as f64),
        AnyValue::Int32(v) => DataCell::Number(v as f64),
        AnyValue::Int64(v) => DataCell::Number(v as f64),
        AnyValue::UInt8(v) => DataCell::Number(v as f64),
        AnyValue::UInt16(v) => DataCell::Number(v as f64),
        AnyValue::UInt32(v) => DataCell::Number(v as f64),
        AnyValue::UInt64(v) => DataCell::Number(v as f64),
        AnyValue::Float32(v) => DataCell::Number(v as f64),
        AnyValue::Float64(v) => DataCell::Number(v),
        AnyValue::Boolean(v) => DataCell::Boolean(v),
        AnyValue::String(s) => string_cell(s, hint),
        AnyValue::StringOwned(s) => string_cell(s.as_str(), hint),
        other => DataCell::Text(format!("{}", other)),
    }
}

fn string_cell(s: &str, hint: DataType) -> DataCell {
    if s.is_empty() {
        DataCell::Empty
    } else if hint == DataType::Date {
        DataCell::Date(s.to_string())
    } else {
        DataCell::Text(s.to_string())
    }
}

/// Detect the separator by counting candidates in the first few lines
fn detect_delimiter(content: &str) -> char {
    let first_lines: String = content
        .lines()
        .take(DELIMITER_SNIFF_LINES)
        .collect::<Vec<_>>()
        .join("\n");

    let comma_count = first_lines.matches(',').count();
    let tab_count = first_lines.matches('\t').count();
    let semicolon_count = first_lines.matches(';').count();

    if tab_count > comma_count && tab_count > semicolon_count {
        '\t'
    } else if semicolon_count > comma_count {
        ';'
    } else {
        ','
    }
}

/// Filename without its extension, used as the table name
pub(crate) fn file_stem(filename: &str) -> String {
    std::path::Path::new(filename)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("Data")
        .to_string()
}
