//! Data loading and handling module
//!
//! This module turns an uploaded file into a [`DataSource`](crate::types::DataSource)
//! and provides the table computations the chart dispatcher needs.
//!
//! ## Formats
//!
//! - `.csv`: read with polars, dtypes inferred over the first rows
//! - `.xlsx`: first worksheet read with calamine
//!
//! Anything else is rejected with [`DataError::UnsupportedFormat`].
//!
//! ## Error Handling
//!
//! All data operations return `DataResult<T>` which uses the `DataError` type.
//! Common errors include:
//! - `TooLarge`: Upload exceeds size limits
//! - `TooManyRows`: Dataset exceeds row limits
//! - `Polars`/`Xlsx`: Parse errors
//! - `ColumnNotFound`/`InvalidSelection`: Bad column choices

mod chart_engine;
mod csv_parser;
mod error;
mod loader;
mod temporal;
mod xlsx_parser;

pub use chart_engine::*;
pub use csv_parser::*;
pub use error::*;
pub use loader::*;
pub use temporal::*;
pub use xlsx_parser::*;
