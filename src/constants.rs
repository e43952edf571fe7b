//! Crate-wide constants.
//!
//! Centralizes limits and chart defaults so the loaders, the dispatcher and
//! the settings layer agree on the same numbers.

// ============================================================================
// Data Loading
// ============================================================================

/// Maximum number of rows to load from an upload
pub const MAX_ROWS: usize = 100_000;

/// Maximum upload size in MB
pub const MAX_UPLOAD_SIZE_MB: usize = 100;

/// Rows sampled by the CSV reader when inferring column dtypes
pub const INFER_SCHEMA_LENGTH: usize = 1000;

/// Number of lines inspected when guessing the CSV separator
pub const DELIMITER_SNIFF_LINES: usize = 5;

/// File extensions accepted as uploads
pub const SUPPORTED_EXTENSIONS: &[&str] = &["csv", "xlsx"];

// ============================================================================
// Preview & Charts
// ============================================================================

/// Rows shown in the dataset preview
pub const PREVIEW_ROWS: usize = 5;

/// Hole size of the donut chart as a fraction of the radius
pub const DONUT_HOLE: f64 = 0.4;

/// Title of the correlation heatmap (it spans every numeric column)
pub const CORRELATION_TITLE: &str = "Correlation Heatmap";

/// Label used in frequency tables for missing cells
pub const MISSING_LABEL: &str = "(missing)";

// ============================================================================
// Notices
// ============================================================================

/// Shown when the selected column parsed as date/time values
pub const TEMPORAL_NOTICE: &str =
    "Datetime column detected. Select a numeric column to create Time Series.";

/// Shown when no chart applies to the selected column
pub const UNSUPPORTED_NOTICE: &str = "This column type is not supported.";

/// Shown when a date/time column has no numeric column to plot against
pub const NO_NUMERIC_NOTICE: &str = "No numeric column available to create a Time Series.";
