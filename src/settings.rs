//! User settings.
//!
//! Stored as JSON at `<config dir>/autoviz/settings.json`. Every field has a
//! default, so partial files are fine.

use crate::constants::{DONUT_HOLE, INFER_SCHEMA_LENGTH, MAX_ROWS, MAX_UPLOAD_SIZE_MB, PREVIEW_ROWS};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Largest donut hole still leaving a visible ring
const MAX_DONUT_HOLE: f64 = 0.9;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Rows shown in the dataset preview
    pub preview_rows: usize,
    /// Largest accepted upload, in MB
    pub max_upload_mb: usize,
    /// Largest accepted table, in rows
    pub max_rows: usize,
    /// Rows the CSV reader samples to infer dtypes
    pub infer_schema_length: usize,
    /// Read ISO date columns in CSV uploads as dates
    pub parse_dates: bool,
    /// Donut hole as a fraction of the radius
    pub donut_hole: f64,
    /// `tracing` filter used when `RUST_LOG` is unset
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            preview_rows: PREVIEW_ROWS,
            max_upload_mb: MAX_UPLOAD_SIZE_MB,
            max_rows: MAX_ROWS,
            infer_schema_length: INFER_SCHEMA_LENGTH,
            parse_dates: true,
            donut_hole: DONUT_HOLE,
            log_filter: "info".to_string(),
        }
    }
}

impl Settings {
    /// Default settings file location, if the platform has a config dir
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("autoviz").join("settings.json"))
    }

    /// Load from the default location, falling back to defaults
    pub fn load() -> Self {
        let Some(path) = Self::config_path() else {
            return Self::default();
        };
        if !path.exists() {
            return Self::default();
        }
        Self::load_from(&path).unwrap_or_else(|e| {
            tracing::warn!("Using default settings: {:#}", e);
            Self::default()
        })
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings from {}", path.display()))?;
        let settings: Settings = serde_json::from_str(&content)
            .with_context(|| format!("Invalid settings file {}", path.display()))?;
        Ok(settings.validated())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write settings to {}", path.display()))?;
        Ok(())
    }

    /// Clamp values into usable ranges
    pub fn validated(mut self) -> Self {
        self.max_upload_mb = self.max_upload_mb.max(1);
        self.max_rows = self.max_rows.max(1);
        self.infer_schema_length = self.infer_schema_length.max(1);
        self.donut_hole = if self.donut_hole.is_finite() {
            self.donut_hole.clamp(0.0, MAX_DONUT_HOLE)
        } else {
            DONUT_HOLE
        };
        if self.log_filter.trim().is_empty() {
            self.log_filter = "info".to_string();
        }
        self
    }
}
