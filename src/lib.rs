//! Autoviz - automatic chart selection for uploaded tables.
//!
//! Load a CSV or XLSX upload into a [`types::DataSource`], pick a column and
//! get back the ordered list of [`types::ChartSpec`]s that fit it.

pub mod app;
pub mod constants;
pub mod data;
pub mod logging;
pub mod render;
pub mod settings;
pub mod types;
pub mod viz;
