//! Upload entry point: picks a parser from the filename extension.

use crate::constants::SUPPORTED_EXTENSIONS;
use crate::data::csv_parser::parse_csv_bytes;
use crate::data::error::{DataError, DataResult};
use crate::data::xlsx_parser::parse_xlsx_bytes;
use crate::settings::Settings;
use crate::types::DataSource;
use std::path::Path;

/// Lowercase extension of an upload's filename
fn upload_extension(filename: &str) -> Option<String> {
    Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
}

/// Check if a filename is an accepted upload (CSV/XLSX)
pub fn is_supported_upload(filename: &str) -> bool {
    upload_extension(filename)
        .map(|ext| SUPPORTED_EXTENSIONS.contains(&ext.as_str()))
        .unwrap_or(false)
}

/// Load an uploaded file into a table.
///
/// Fails closed on any extension other than `.csv` and `.xlsx`.
pub fn load_upload(filename: &str, bytes: &[u8], settings: &Settings) -> DataResult<DataSource> {
    let size_mb = bytes.len() as u64 / (1024 * 1024);
    if size_mb > settings.max_upload_mb as u64 {
        return Err(DataError::TooLarge {
            size_mb,
            max_mb: settings.max_upload_mb,
        });
    }

    let source = match upload_extension(filename).as_deref() {
        Some("csv") => parse_csv_bytes(bytes, filename, settings)?,
        Some("xlsx") => parse_xlsx_bytes(bytes, filename, settings)?,
        _ => return Err(DataError::UnsupportedFormat(filename.to_string())),
    };

    tracing::info!(
        table = %source.name,
        rows = source.row_count(),
        columns = source.column_count(),
        "upload loaded"
    );
    Ok(source)
}

/// Load a CSV/XLSX file from disk
///
/// The size limit is checked from file metadata before reading.
pub fn load_path(path: &Path, settings: &Settings) -> DataResult<DataSource> {
    let metadata = std::fs::metadata(path)?;
    let size_mb = metadata.len() / (1024 * 1024);
    if size_mb > settings.max_upload_mb as u64 {
        return Err(DataError::TooLarge {
            size_mb,
            max_mb: settings.max_upload_mb,
        });
    }

    let filename = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| DataError::InvalidData(format!("Bad file name: {}", path.display())))?;
    if !is_supported_upload(filename) {
        return Err(DataError::UnsupportedFormat(filename.to_string()));
    }

    let bytes = std::fs::read(path)?;
    load_upload(filename, &bytes, settings)
}
