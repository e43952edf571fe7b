//! Date/time detection for columns that are neither numeric nor text.
//!
//! Parsing is all-or-nothing: a column is temporal only if every non-empty
//! cell parses. The result is a new [`TemporalColumn`]; the table itself is
//! never rewritten.

use crate::types::{DataCell, DataSource};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use thiserror::Error;

/// Date-time layouts tried in order
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

/// Date-only layouts, read as midnight
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%d-%b-%Y",
    "%d %B %Y",
    "%B %d, %Y",
];

/// A column parsed into timestamps; `None` marks an empty cell.
#[derive(Clone, Debug, PartialEq)]
pub struct TemporalColumn {
    pub name: String,
    pub values: Vec<Option<NaiveDateTime>>,
}

impl TemporalColumn {
    /// Row indices ordered by timestamp ascending, empty cells last.
    ///
    /// The sort is stable so equal timestamps keep their table order.
    pub fn sorted_order(&self) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.values.len()).collect();
        order.sort_by_key(|&i| (self.values[i].is_none(), self.values[i]));
        order
    }
}

/// Why a column could not be read as date/time values
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TemporalParseError {
    #[error("column not found: {0}")]
    ColumnNotFound(String),

    #[error("row {row}: '{value}' is not a date/time")]
    Unparseable { row: usize, value: String },

    #[error("row {row}: {kind} value cannot be a date/time")]
    NotTemporal { row: usize, kind: &'static str },

    #[error("column has no values")]
    NoValues,
}

/// Parse one string as a date/time.
///
/// RFC 3339 values with an offset are converted to UTC.
pub fn parse_datetime_str(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_utc());
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// Attempt to read every cell of `column` as a date/time value
pub fn parse_temporal_column(
    source: &DataSource,
    column: &str,
) -> Result<TemporalColumn, TemporalParseError> {
    let index = source
        .column_index(column)
        .ok_or_else(|| TemporalParseError::ColumnNotFound(column.to_string()))?;

    let values = source
        .column_cells(index)
        .enumerate()
        .map(|(row, cell)| parse_cell(row, cell))
        .collect::<Result<Vec<_>, _>>()?;

    if values.iter().all(Option::is_none) {
        return Err(TemporalParseError::NoValues);
    }

    Ok(TemporalColumn {
        name: column.to_string(),
        values,
    })
}

fn parse_cell(row: usize, cell: &DataCell) -> Result<Option<NaiveDateTime>, TemporalParseError> {
    match cell {
        DataCell::Empty => Ok(None),
        DataCell::Date(s) | DataCell::Text(s) => parse_datetime_str(s)
            .map(Some)
            .ok_or_else(|| TemporalParseError::Unparseable {
                row,
                value: s.clone(),
            }),
        DataCell::Number(_) => Err(TemporalParseError::NotTemporal {
            row,
            kind: "number",
        }),
        DataCell::Boolean(_) => Err(TemporalParseError::NotTemporal {
            row,
            kind: "boolean",
        }),
    }
}
