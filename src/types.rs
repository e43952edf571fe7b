//! Core types for the autoviz pipeline.
//!
//! This module defines the in-memory table loaded from an upload and the
//! chart specifications handed to a renderer.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Table Types
// ============================================================================

/// A loaded table: ordered, named, typed columns plus rows of cells.
///
/// Loaded once per upload and treated as immutable afterwards. Every row has
/// exactly one cell per column.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DataSource {
    /// Human-readable name (from the upload's filename)
    pub name: String,
    /// Column definitions
    pub columns: Vec<DataColumn>,
    /// Data rows
    pub rows: Vec<DataRow>,
    /// Where this data came from
    pub origin: DataOrigin,
}

impl DataSource {
    pub fn new(name: impl Into<String>, columns: Vec<DataColumn>, rows: Vec<DataRow>) -> Self {
        Self {
            name: name.into(),
            columns,
            rows,
            origin: DataOrigin::Manual,
        }
    }

    /// Get the number of rows
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Get the number of columns
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Column names in table order
    pub fn column_names(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name.clone()).collect()
    }

    /// Position of a column by name
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    /// Column definition by name
    pub fn column(&self, name: &str) -> Option<&DataColumn> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Cells of one column, top to bottom. Short rows yield `Empty`.
    pub fn column_cells(&self, index: usize) -> impl Iterator<Item = &DataCell> + '_ {
        self.rows
            .iter()
            .map(move |row| row.cells.get(index).unwrap_or(&DataCell::Empty))
    }

    /// Names of all columns declared numeric, in table order
    pub fn numeric_columns(&self) -> Vec<String> {
        self.columns
            .iter()
            .filter(|c| c.data_type == DataType::Number)
            .map(|c| c.name.clone())
            .collect()
    }

    /// First `n` rows, for the dataset preview
    pub fn head(&self, n: usize) -> &[DataRow] {
        &self.rows[..n.min(self.rows.len())]
    }
}

/// Column metadata
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DataColumn {
    /// Column name/header
    pub name: String,
    /// Declared element kind for this column
    pub data_type: DataType,
}

impl DataColumn {
    pub fn new(name: &str, data_type: DataType) -> Self {
        Self {
            name: name.to_string(),
            data_type,
        }
    }
}

/// Declared element kind of a column, as reported by the loader
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DataType {
    /// Generic text; treated as categorical
    #[default]
    Text,
    Number,
    Boolean,
    /// Already typed as date/time by the loader
    Date,
    /// Nothing to infer from (e.g. every cell empty)
    Unknown,
}

impl DataType {
    pub fn label(&self) -> &'static str {
        match self {
            DataType::Text => "text",
            DataType::Number => "number",
            DataType::Boolean => "boolean",
            DataType::Date => "date",
            DataType::Unknown => "unknown",
        }
    }
}

/// A row of data cells
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DataRow {
    pub cells: Vec<DataCell>,
}

impl DataRow {
    pub fn new(cells: Vec<DataCell>) -> Self {
        Self { cells }
    }
}

/// A single cell value
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum DataCell {
    Text(String),
    Number(f64),
    Boolean(bool),
    Date(String), // as read from the file, parsed on demand
    Empty,
}

impl DataCell {
    /// Numeric value of the cell. NaN counts as missing.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            DataCell::Number(n) if !n.is_nan() => Some(*n),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, DataCell::Empty)
    }
}

impl fmt::Display for DataCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataCell::Text(s) | DataCell::Date(s) => f.write_str(s),
            // `{}` already drops the fraction of whole floats
            DataCell::Number(n) => write!(f, "{}", n),
            DataCell::Boolean(b) => f.write_str(if *b { "true" } else { "false" }),
            DataCell::Empty => Ok(()),
        }
    }
}

/// Origin of a data source
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum DataOrigin {
    /// Built in memory
    Manual,
    /// Uploaded CSV file
    Csv { filename: String, delimiter: char },
    /// Uploaded Excel workbook
    Xlsx { filename: String, sheet: String },
}

// ============================================================================
// Chart Types
// ============================================================================

/// One chart to render: a title plus the kind-specific inputs.
///
/// Series are resolved from the table at dispatch time so a renderer never
/// needs to look back into the `DataSource`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChartSpec {
    pub title: String,
    #[serde(flatten)]
    pub kind: ChartKind,
}

impl ChartSpec {
    pub fn new(title: impl Into<String>, kind: ChartKind) -> Self {
        Self {
            title: title.into(),
            kind,
        }
    }
}

/// Kind of chart together with its source column(s) and data
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChartKind {
    Histogram {
        column: String,
        values: Vec<Option<f64>>,
    },
    Box {
        column: String,
        values: Vec<Option<f64>>,
    },
    /// Values on y; x is the implicit row index
    Line {
        column: String,
        values: Vec<Option<f64>>,
    },
    Violin {
        column: String,
        values: Vec<Option<f64>>,
        /// Overlay a box plot inside the violin
        show_box: bool,
        /// Draw every observation next to the violin
        show_all_points: bool,
    },
    Scatter {
        x_column: String,
        y_column: String,
        x: Vec<Option<f64>>,
        y: Vec<Option<f64>>,
    },
    CorrelationHeatmap {
        matrix: CorrelationMatrix,
        /// Print the coefficient inside each cell
        annotate: bool,
    },
    Bar {
        column: String,
        counts: FrequencyTable,
    },
    Pie {
        column: String,
        counts: FrequencyTable,
    },
    Donut {
        column: String,
        counts: FrequencyTable,
        hole: f64,
    },
    /// Rows sorted by `x` ascending, missing timestamps last
    TimeSeries {
        x_column: String,
        y_column: String,
        x: Vec<Option<NaiveDateTime>>,
        y: Vec<Option<f64>>,
    },
}

impl ChartKind {
    pub fn label(&self) -> &'static str {
        match self {
            ChartKind::Histogram { .. } => "Histogram",
            ChartKind::Box { .. } => "Box",
            ChartKind::Line { .. } => "Line",
            ChartKind::Violin { .. } => "Violin",
            ChartKind::Scatter { .. } => "Scatter",
            ChartKind::CorrelationHeatmap { .. } => "Correlation Heatmap",
            ChartKind::Bar { .. } => "Bar",
            ChartKind::Pie { .. } => "Pie",
            ChartKind::Donut { .. } => "Donut",
            ChartKind::TimeSeries { .. } => "Time Series",
        }
    }
}

/// One row of a frequency table. `value` is `None` for missing cells.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrequencyEntry {
    pub value: Option<String>,
    pub count: usize,
}

impl FrequencyEntry {
    /// Display label, with missing cells shown as `(missing)`
    pub fn label(&self) -> &str {
        self.value
            .as_deref()
            .unwrap_or(crate::constants::MISSING_LABEL)
    }
}

/// Distinct values of a column with their occurrence counts
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrequencyTable {
    pub entries: Vec<FrequencyEntry>,
}

impl FrequencyTable {
    pub fn total(&self) -> usize {
        self.entries.iter().map(|e| e.count).sum()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn labels(&self) -> Vec<&str> {
        self.entries.iter().map(FrequencyEntry::label).collect()
    }

    pub fn counts(&self) -> Vec<usize> {
        self.entries.iter().map(|e| e.count).collect()
    }
}

/// Pairwise Pearson correlations between numeric columns.
///
/// `values[i][j]` is `None` when fewer than two complete pairs exist or one
/// side has zero variance.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CorrelationMatrix {
    pub columns: Vec<String>,
    pub values: Vec<Vec<Option<f64>>>,
}

impl CorrelationMatrix {
    pub fn get(&self, row: &str, col: &str) -> Option<f64> {
        let i = self.columns.iter().position(|c| c == row)?;
        let j = self.columns.iter().position(|c| c == col)?;
        self.values.get(i)?.get(j).copied().flatten()
    }
}
