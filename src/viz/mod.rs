//! Visualization dispatcher.
//!
//! [`classify`] decides which chart family a column belongs to and
//! [`Dispatcher`] builds the ordered chart list for it:
//!
//! - `Numeric`: histogram, box, line, violin; plus scatter against a second
//!   numeric column and a correlation heatmap when other numeric columns exist
//! - `Categorical`: bar, pie and donut over the value counts
//! - `Temporal`: one time series of a numeric column, sorted by time
//! - `Unsupported`: no charts, just a notice

mod classify;
mod dispatch;

pub use classify::*;
pub use dispatch::*;
