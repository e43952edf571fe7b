//! Excel (.xlsx) upload parsing
//!
//! Reads the first worksheet of a workbook with calamine. The first row holds
//! the headers; each remaining column gets a declared type from its cells.

use super::csv_parser::file_stem;
use crate::data::error::{DataError, DataResult};
use crate::settings::Settings;
use crate::types::{DataCell, DataColumn, DataOrigin, DataRow, DataSource, DataType};
use calamine::{Data, Range, Reader, Xlsx};
use std::collections::HashSet;
use std::io::Cursor;

/// Layout used when an Excel date cell is turned into text
const EXCEL_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Parse XLSX bytes into a DataSource (first worksheet only)
pub fn parse_xlsx_bytes(bytes: &[u8], filename: &str, settings: &Settings) -> DataResult<DataSource> {
    let start = std::time::Instant::now();

    if bytes.is_empty() {
        return Err(DataError::EmptyFile);
    }

    let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(bytes.to_vec()))?;
    let sheet = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| DataError::InvalidData("Workbook has no sheets".to_string()))?;
    let range = workbook.worksheet_range(&sheet)?;

    let mut source = parse_range(&range, settings.max_rows)?;
    source.name = file_stem(filename);
    source.origin = DataOrigin::Xlsx {
        filename: filename.to_string(),
        sheet: sheet.clone(),
    };

    tracing::debug!(
        "Loaded XLSX {} (sheet {}) with {} rows x {} cols in {:?}",
        filename,
        sheet,
        source.row_count(),
        source.column_count(),
        start.elapsed()
    );

    Ok(source)
}

/// Parse a worksheet range; the first row is the header row.
///
/// Fully empty data rows are skipped. Blank headers become `column_N` and
/// repeated headers get a `.N` suffix.
pub fn parse_range(range: &Range<Data>, max_rows: usize) -> DataResult<DataSource> {
    if range.is_empty() {
        return Err(DataError::EmptyFile);
    }

    let mut rows = range.rows();
    let header_row = rows.next().ok_or(DataError::EmptyFile)?;
    let headers = unique_headers(header_row);
    if headers.is_empty() {
        return Err(DataError::NoColumns);
    }

    let mut raw_rows: Vec<&[Data]> = Vec::new();
    for row in rows {
        if row.iter().all(|cell| matches!(cell, Data::Empty)) {
            continue;
        }
        if raw_rows.len() >= max_rows {
            return Err(DataError::TooManyRows {
                rows: raw_rows.len() + 1,
                max_rows,
            });
        }
        raw_rows.push(row);
    }

    let columns: Vec<DataColumn> = headers
        .iter()
        .enumerate()
        .map(|(col_idx, name)| {
            let cells: Vec<&Data> = raw_rows
                .iter()
                .map(|row| row.get(col_idx).unwrap_or(&Data::Empty))
                .collect();
            DataColumn::new(name, infer_excel_column_type(&cells))
        })
        .collect();

    let data_rows = raw_rows
        .iter()
        .map(|row| {
            DataRow::new(
                columns
                    .iter()
                    .enumerate()
                    .map(|(col_idx, col)| {
                        excel_cell_to_cell(row.get(col_idx).unwrap_or(&Data::Empty), col.data_type)
                    })
                    .collect(),
            )
        })
        .collect();

    Ok(DataSource::new("Data", columns, data_rows))
}

fn unique_headers(header_row: &[Data]) -> Vec<String> {
    let mut seen = HashSet::new();
    header_row
        .iter()
        .enumerate()
        .map(|(i, cell)| {
            let base = match cell {
                Data::Empty => format!("column_{}", i + 1),
                other => other.to_string().trim().to_string(),
            };
            let base = if base.is_empty() {
                format!("column_{}", i + 1)
            } else {
                base
            };
            let mut name = base.clone();
            let mut n = 1;
            while !seen.insert(name.clone()) {
                name = format!("{}.{}", base, n);
                n += 1;
            }
            name
        })
        .collect()
}

/// Infer the declared type of an Excel column from its cell types.
///
/// String cells are never promoted, so any text makes the column `Text`.
fn infer_excel_column_type(cells: &[&Data]) -> DataType {
    let values: Vec<&Data> = cells
        .iter()
        .copied()
        .filter(|c| !matches!(c, Data::Empty))
        .collect();

    if values.is_empty() {
        DataType::Unknown
    } else if values
        .iter()
        .all(|c| matches!(c, Data::DateTime(_) | Data::DateTimeIso(_)))
    {
        DataType::Date
    } else if values.iter().all(|c| matches!(c, Data::Int(_) | Data::Float(_))) {
        DataType::Number
    } else if values.iter().all(|c| matches!(c, Data::Bool(_))) {
        DataType::Boolean
    } else {
        DataType::Text
    }
}

/// Convert a calamine cell to DataCell under the column's declared type
fn excel_cell_to_cell(cell: &Data, data_type: DataType) -> DataCell {
    match (cell, data_type) {
        (Data::Empty, _) => DataCell::Empty,
        (Data::Int(v), DataType::Number) => DataCell::Number(*v as f64),
        (Data::Float(v), DataType::Number) => DataCell::Number(*v),
        (Data::Bool(b), DataType::Boolean) => DataCell::Boolean(*b),
        (Data::DateTime(dt), _) => match dt.as_datetime() {
            Some(value) => {
                let text = value.format(EXCEL_DATETIME_FORMAT).to_string();
                if data_type == DataType::Date {
                    DataCell::Date(text)
                } else {
                    DataCell::Text(text)
                }
            }
            None => DataCell::Empty,
        },
        (Data::DateTimeIso(s), DataType::Date) => DataCell::Date(s.clone()),
        (Data::String(s), _) if s.trim().is_empty() => DataCell::Empty,
        (other, _) => DataCell::Text(other.to_string()),
    }
}
