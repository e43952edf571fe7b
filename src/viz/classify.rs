//! Column classification.
//!
//! Resolved once per request, in a fixed order: declared numeric, declared
//! text, then a date/time parse attempt for everything else.

use crate::data::{DataError, DataResult, TemporalColumn, TemporalParseError, parse_temporal_column};
use crate::types::{DataSource, DataType};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The chart family a column falls into
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColumnClass {
    Numeric,
    Categorical,
    Temporal,
    Unsupported,
}

impl ColumnClass {
    pub fn label(&self) -> &'static str {
        match self {
            ColumnClass::Numeric => "Numeric",
            ColumnClass::Categorical => "Categorical",
            ColumnClass::Temporal => "Temporal",
            ColumnClass::Unsupported => "Unsupported",
        }
    }
}

/// Why no chart applies to a column
#[derive(Clone, Debug, PartialEq)]
pub enum UnsupportedReason {
    /// The date/time parse attempt failed
    NotTemporal(TemporalParseError),
    /// Temporal column, but the table has no numeric column to plot over time
    NoNumericColumn,
}

impl fmt::Display for UnsupportedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnsupportedReason::NotTemporal(err) => write!(f, "not a date/time column ({})", err),
            UnsupportedReason::NoNumericColumn => {
                f.write_str("no numeric column available for a time series")
            }
        }
    }
}

/// Classification of one column.
///
/// `Temporal` owns the parsed timestamps so the table stays untouched.
#[derive(Clone, Debug, PartialEq)]
pub enum Classification {
    Numeric,
    Categorical,
    Temporal(TemporalColumn),
    Unsupported(UnsupportedReason),
}

impl Classification {
    pub fn class(&self) -> ColumnClass {
        match self {
            Classification::Numeric => ColumnClass::Numeric,
            Classification::Categorical => ColumnClass::Categorical,
            Classification::Temporal(_) => ColumnClass::Temporal,
            Classification::Unsupported(_) => ColumnClass::Unsupported,
        }
    }
}

/// Classify `column` of `source`.
///
/// Only an unknown column name is an error; a failed date/time parse
/// resolves to `Unsupported`.
pub fn classify(source: &DataSource, column: &str) -> DataResult<Classification> {
    let col = source
        .column(column)
        .ok_or_else(|| DataError::ColumnNotFound(column.to_string()))?;

    let classification = match col.data_type {
        DataType::Number => Classification::Numeric,
        DataType::Text => Classification::Categorical,
        DataType::Boolean | DataType::Date | DataType::Unknown => {
            match parse_temporal_column(source, column) {
                Ok(parsed) => Classification::Temporal(parsed),
                Err(err) => {
                    tracing::debug!(
                        column,
                        dtype = col.data_type.label(),
                        error = %err,
                        "temporal parse failed"
                    );
                    Classification::Unsupported(UnsupportedReason::NotTemporal(err))
                }
            }
        }
    };

    Ok(classification)
}
