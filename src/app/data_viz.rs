//! Data visualization methods - column selection and chart dispatch

use super::state::{Notice, VizReport, VizSession};
use crate::constants::{NO_NUMERIC_NOTICE, TEMPORAL_NOTICE, UNSUPPORTED_NOTICE};
use crate::types::DataType;
use crate::viz::{
    Classification, ColumnClass, Dispatch, Selection, UnsupportedReason, classify,
    scatter_candidates,
};
use anyhow::{Context, Result};

impl VizSession {
    /// Columns offered for selection, in table order
    pub fn column_names(&self) -> Vec<String> {
        self.source.column_names()
    }

    /// Declared type of a column
    pub fn column_type(&self, column: &str) -> Option<DataType> {
        self.source.column(column).map(|c| c.data_type)
    }

    /// Second selection list for `column`, only when it applies.
    ///
    /// Numeric columns get the other numeric columns (scatter partner);
    /// date/time columns get every numeric column (time series values).
    pub fn secondary_choices(&self, column: &str) -> Result<Option<Vec<String>>> {
        let classification = classify(&self.source, column)
            .with_context(|| format!("Cannot classify column '{}'", column))?;

        let choices = match classification {
            Classification::Numeric => scatter_candidates(&self.source, column),
            Classification::Temporal(_) => self.source.numeric_columns(),
            Classification::Categorical | Classification::Unsupported(_) => Vec::new(),
        };

        Ok(if choices.is_empty() { None } else { Some(choices) })
    }

    /// Build the charts and notices for one selection
    pub fn visualize(&self, selection: &Selection) -> Result<VizReport> {
        let dispatch = self
            .dispatcher
            .dispatch(&self.source, selection)
            .with_context(|| format!("Cannot visualize column '{}'", selection.column))?;

        let data_type = self.column_type(&selection.column).unwrap_or(DataType::Unknown);

        let notices = match &dispatch {
            Dispatch::Charts {
                class: ColumnClass::Temporal,
                ..
            } => vec![Notice::info(TEMPORAL_NOTICE)],
            Dispatch::Charts { .. } => Vec::new(),
            Dispatch::Unsupported {
                reason: UnsupportedReason::NoNumericColumn,
                ..
            } => vec![Notice::info(TEMPORAL_NOTICE), Notice::warning(NO_NUMERIC_NOTICE)],
            Dispatch::Unsupported { .. } => vec![Notice::warning(UNSUPPORTED_NOTICE)],
        };

        let class = dispatch.class();
        let charts = match dispatch {
            Dispatch::Charts { charts, .. } => charts,
            Dispatch::Unsupported { .. } => Vec::new(),
        };

        Ok(VizReport {
            column: selection.column.clone(),
            data_type,
            class,
            notices,
            charts,
        })
    }
}
