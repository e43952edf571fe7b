//! Session state - the VizSession struct and the values it hands out.

use crate::settings::Settings;
use crate::types::{ChartSpec, DataSource, DataType};
use crate::viz::{ColumnClass, Dispatcher};
use serde::{Deserialize, Serialize};

/// One uploaded table plus the settings it was loaded with.
///
/// Every call re-runs from scratch against the immutable table.
#[derive(Debug)]
pub struct VizSession {
    pub(super) source: DataSource,
    pub(super) settings: Settings,
    pub(super) dispatcher: Dispatcher,
}

/// Severity of a user-facing notice
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum NoticeLevel {
    Info,
    Warning,
}

/// A message shown next to the charts
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Warning,
            message: message.into(),
        }
    }
}

/// First rows of the table, stringified for display
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preview {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
    /// Rows in the whole table
    pub total_rows: usize,
}

/// Everything produced for one column selection
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct VizReport {
    pub column: String,
    /// Declared kind, shown as the column's data type
    pub data_type: DataType,
    pub class: ColumnClass,
    pub notices: Vec<Notice>,
    pub charts: Vec<ChartSpec>,
}

impl VizReport {
    pub fn is_supported(&self) -> bool {
        self.class != ColumnClass::Unsupported
    }
}
