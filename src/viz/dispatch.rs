//! Per-classification chart dispatch.
//!
//! Turns `(table, selection)` into the ordered list of charts for the
//! selected column. Charts are all-or-nothing per request: either the whole
//! list is built or the column is reported unsupported.

use crate::constants::{CORRELATION_TITLE, DONUT_HOLE};
use crate::data::{
    DataError, DataResult, TemporalColumn, correlation_matrix, numeric_values, time_ordered,
    value_counts,
};
use crate::settings::Settings;
use crate::types::{ChartKind, ChartSpec, DataSource};
use crate::viz::classify::{Classification, ColumnClass, UnsupportedReason, classify};

/// The user's column choices for one request
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Selection {
    /// Column to visualize
    pub column: String,
    /// Partner column for the scatter plot or time series.
    /// Defaults to the first offered choice when unset.
    pub second_column: Option<String>,
}

impl Selection {
    pub fn new(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            second_column: None,
        }
    }

    pub fn with_second(mut self, column: impl Into<String>) -> Self {
        self.second_column = Some(column.into());
        self
    }
}

/// Outcome of one dispatch request
#[derive(Clone, Debug, PartialEq)]
pub enum Dispatch {
    Charts {
        class: ColumnClass,
        charts: Vec<ChartSpec>,
    },
    /// Non-fatal: nothing to draw for this column
    Unsupported {
        column: String,
        reason: UnsupportedReason,
    },
}

impl Dispatch {
    pub fn class(&self) -> ColumnClass {
        match self {
            Dispatch::Charts { class, .. } => *class,
            Dispatch::Unsupported { .. } => ColumnClass::Unsupported,
        }
    }

    pub fn charts(&self) -> &[ChartSpec] {
        match self {
            Dispatch::Charts { charts, .. } => charts,
            Dispatch::Unsupported { .. } => &[],
        }
    }

    pub fn is_unsupported(&self) -> bool {
        matches!(self, Dispatch::Unsupported { .. })
    }
}

/// Builds chart lists; holds the few chart parameters that are configurable
#[derive(Clone, Debug, PartialEq)]
pub struct Dispatcher {
    donut_hole: f64,
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self {
            donut_hole: DONUT_HOLE,
        }
    }
}

impl Dispatcher {
    pub fn new(settings: &Settings) -> Self {
        Self {
            donut_hole: settings.donut_hole,
        }
    }

    /// Classify the selected column and build its charts
    pub fn dispatch(&self, source: &DataSource, selection: &Selection) -> DataResult<Dispatch> {
        let column = selection.column.as_str();
        let classification = classify(source, column)?;
        let class = classification.class();

        let result = match classification {
            Classification::Numeric => Dispatch::Charts {
                class,
                charts: self.numeric_charts(source, column, selection.second_column.as_deref())?,
            },
            Classification::Categorical => Dispatch::Charts {
                class,
                charts: self.categorical_charts(source, column)?,
            },
            Classification::Temporal(parsed) => {
                match self.temporal_charts(source, &parsed, selection.second_column.as_deref())? {
                    Some(charts) => Dispatch::Charts { class, charts },
                    None => Dispatch::Unsupported {
                        column: column.to_string(),
                        reason: UnsupportedReason::NoNumericColumn,
                    },
                }
            }
            Classification::Unsupported(reason) => Dispatch::Unsupported {
                column: column.to_string(),
                reason,
            },
        };

        match &result {
            Dispatch::Charts { class, charts } => {
                tracing::debug!(column, class = class.label(), charts = charts.len(), "dispatched");
            }
            Dispatch::Unsupported { reason, .. } => {
                tracing::warn!(column, %reason, "column not supported");
            }
        }

        Ok(result)
    }

    fn numeric_charts(
        &self,
        source: &DataSource,
        column: &str,
        second: Option<&str>,
    ) -> DataResult<Vec<ChartSpec>> {
        let index = column_index(source, column)?;
        let values = numeric_values(source, index);

        let mut charts = vec![
            ChartSpec::new(
                format!("Histogram of {}", column),
                ChartKind::Histogram {
                    column: column.to_string(),
                    values: values.clone(),
                },
            ),
            ChartSpec::new(
                format!("Box Plot of {}", column),
                ChartKind::Box {
                    column: column.to_string(),
                    values: values.clone(),
                },
            ),
            ChartSpec::new(
                format!("Line Chart of {}", column),
                ChartKind::Line {
                    column: column.to_string(),
                    values: values.clone(),
                },
            ),
            ChartSpec::new(
                format!("Violin Plot of {}", column),
                ChartKind::Violin {
                    column: column.to_string(),
                    values: values.clone(),
                    show_box: true,
                    show_all_points: true,
                },
            ),
        ];

        let others = scatter_candidates(source, column);
        if let Some(second) = resolve_second(&others, second)? {
            let y = numeric_values(source, column_index(source, &second)?);
            charts.push(ChartSpec::new(
                format!("Scatter Plot: {} vs {}", column, second),
                ChartKind::Scatter {
                    x_column: column.to_string(),
                    y_column: second,
                    x: values,
                    y,
                },
            ));
        }

        let numeric = source.numeric_columns();
        if numeric.len() > 1 {
            charts.push(ChartSpec::new(
                CORRELATION_TITLE,
                ChartKind::CorrelationHeatmap {
                    matrix: correlation_matrix(source, &numeric),
                    annotate: true,
                },
            ));
        }

        Ok(charts)
    }

    fn categorical_charts(&self, source: &DataSource, column: &str) -> DataResult<Vec<ChartSpec>> {
        let counts = value_counts(source, column_index(source, column)?);

        Ok(vec![
            ChartSpec::new(
                format!("Bar Chart of {}", column),
                ChartKind::Bar {
                    column: column.to_string(),
                    counts: counts.clone(),
                },
            ),
            ChartSpec::new(
                format!("Pie Chart of {}", column),
                ChartKind::Pie {
                    column: column.to_string(),
                    counts: counts.clone(),
                },
            ),
            ChartSpec::new(
                format!("Donut Chart of {}", column),
                ChartKind::Donut {
                    column: column.to_string(),
                    counts,
                    hole: self.donut_hole,
                },
            ),
        ])
    }

    /// `None` when the table has no numeric column to plot over time
    fn temporal_charts(
        &self,
        source: &DataSource,
        parsed: &TemporalColumn,
        second: Option<&str>,
    ) -> DataResult<Option<Vec<ChartSpec>>> {
        let numeric = source.numeric_columns();
        let Some(value_column) = resolve_second(&numeric, second)? else {
            return Ok(None);
        };

        let values = numeric_values(source, column_index(source, &value_column)?);
        let (x, y) = time_ordered(parsed, &values);

        Ok(Some(vec![ChartSpec::new(
            format!("Time Series: {} over {}", value_column, parsed.name),
            ChartKind::TimeSeries {
                x_column: parsed.name.clone(),
                y_column: value_column,
                x,
                y,
            },
        )]))
    }
}

/// Classify and build charts with default chart parameters
pub fn dispatch(source: &DataSource, selection: &Selection) -> DataResult<Dispatch> {
    Dispatcher::default().dispatch(source, selection)
}

/// Numeric columns other than `column`: the scatter partners on offer
pub fn scatter_candidates(source: &DataSource, column: &str) -> Vec<String> {
    source
        .numeric_columns()
        .into_iter()
        .filter(|name| name != column)
        .collect()
}

/// Pick the secondary column from `choices`.
///
/// An unset request takes the first choice, or none when there are no
/// choices. A request outside the choices is rejected, even when the list is
/// empty.
fn resolve_second(choices: &[String], requested: Option<&str>) -> DataResult<Option<String>> {
    match requested {
        None => Ok(choices.first().cloned()),
        Some(name) if choices.iter().any(|c| c == name) => Ok(Some(name.to_string())),
        Some(name) => Err(DataError::InvalidSelection {
            column: name.to_string(),
            allowed: choices.to_vec(),
        }),
    }
}

fn column_index(source: &DataSource, column: &str) -> DataResult<usize> {
    source
        .column_index(column)
        .ok_or_else(|| DataError::ColumnNotFound(column.to_string()))
}
