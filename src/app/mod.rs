//! Application module - the upload session and the selection flow.
//!
//! This module is organized into two submodules:
//! - `state` - The VizSession struct and the report/preview/notice types
//! - `data_viz` - Column selection, secondary choices and chart dispatch

mod data_viz;
mod state;

pub use state::{Notice, NoticeLevel, Preview, VizReport, VizSession};

use crate::data::load_upload;
use crate::settings::Settings;
use crate::types::DataSource;
use crate::viz::Dispatcher;
use anyhow::{Context, Result};

impl VizSession {
    pub fn new(source: DataSource, settings: Settings) -> Self {
        let dispatcher = Dispatcher::new(&settings);
        Self {
            source,
            settings,
            dispatcher,
        }
    }

    /// Load an uploaded file and start a session over it
    pub fn from_upload(filename: &str, bytes: &[u8], settings: Settings) -> Result<Self> {
        let source = load_upload(filename, bytes, &settings)
            .with_context(|| format!("Failed to load {}", filename))?;
        Ok(Self::new(source, settings))
    }

    pub fn source(&self) -> &DataSource {
        &self.source
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// First `preview_rows` rows of the table
    pub fn preview(&self) -> Preview {
        Preview {
            columns: self.source.column_names(),
            rows: self
                .source
                .head(self.settings.preview_rows)
                .iter()
                .map(|row| row.cells.iter().map(|c| c.to_string()).collect())
                .collect(),
            total_rows: self.source.row_count(),
        }
    }
}
