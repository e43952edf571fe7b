//! Plotly-style figure rendering.
//!
//! Each chart becomes `{"data": [traces...], "layout": {...}}`. Missing
//! values are emitted as `null`, which plotly treats as gaps.

use super::ChartRenderer;
use crate::app::Preview;
use crate::data::{DataError, DataResult};
use crate::types::{ChartKind, ChartSpec, CorrelationMatrix, FrequencyTable};
use serde_json::{Value, json};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Renders chart specs as plotly figure JSON
#[derive(Clone, Copy, Debug, Default)]
pub struct FigureRenderer;

impl ChartRenderer for FigureRenderer {
    type Output = Value;

    fn render(&self, spec: &ChartSpec) -> DataResult<Value> {
        let (data, axes) = match &spec.kind {
            ChartKind::Histogram { column, values } => (
                vec![json!({ "type": "histogram", "name": column, "x": values })],
                Some((column.as_str(), "count")),
            ),
            ChartKind::Box { column, values } => (
                vec![json!({ "type": "box", "name": column, "y": values })],
                None,
            ),
            ChartKind::Line { column, values } => {
                let index: Vec<usize> = (0..values.len()).collect();
                (
                    vec![json!({
                        "type": "scatter",
                        "mode": "lines",
                        "name": column,
                        "x": index,
                        "y": values,
                    })],
                    Some(("index", column.as_str())),
                )
            }
            ChartKind::Violin {
                column,
                values,
                show_box,
                show_all_points,
            } => {
                let points = if *show_all_points { json!("all") } else { json!(false) };
                (
                    vec![json!({
                        "type": "violin",
                        "name": column,
                        "y": values,
                        "box": { "visible": show_box },
                        "points": points,
                    })],
                    None,
                )
            }
            ChartKind::Scatter {
                x_column,
                y_column,
                x,
                y,
            } => {
                same_length(spec, x.len(), y.len())?;
                (
                    vec![json!({
                        "type": "scatter",
                        "mode": "markers",
                        "x": x,
                        "y": y,
                    })],
                    Some((x_column.as_str(), y_column.as_str())),
                )
            }
            ChartKind::CorrelationHeatmap { matrix, annotate } => {
                (vec![heatmap_trace(spec, matrix, *annotate)?], None)
            }
            ChartKind::Bar { column, counts } => (
                vec![json!({
                    "type": "bar",
                    "x": counts.labels(),
                    "y": counts.counts(),
                })],
                Some((column.as_str(), "count")),
            ),
            ChartKind::Pie { counts, .. } => (vec![pie_trace(counts, None)], None),
            ChartKind::Donut { counts, hole, .. } => (vec![pie_trace(counts, Some(*hole))], None),
            ChartKind::TimeSeries {
                x_column,
                y_column,
                x,
                y,
            } => {
                same_length(spec, x.len(), y.len())?;
                let stamps: Vec<Option<String>> = x
                    .iter()
                    .map(|t| t.map(|t| t.format(TIMESTAMP_FORMAT).to_string()))
                    .collect();
                (
                    vec![json!({
                        "type": "scatter",
                        "mode": "lines",
                        "x": stamps,
                        "y": y,
                    })],
                    Some((x_column.as_str(), y_column.as_str())),
                )
            }
        };

        let mut layout = json!({ "title": { "text": spec.title } });
        if let Some((x_title, y_title)) = axes {
            layout["xaxis"] = json!({ "title": { "text": x_title } });
            layout["yaxis"] = json!({ "title": { "text": y_title } });
        }

        tracing::trace!(kind = spec.kind.label(), title = %spec.title, "rendered chart");
        Ok(json!({ "data": data, "layout": layout }))
    }
}

impl FigureRenderer {
    /// Render the table preview as a plotly table trace
    pub fn render_preview(&self, preview: &Preview) -> Value {
        // Plotly tables are column-major
        let cells: Vec<Vec<&str>> = (0..preview.columns.len())
            .map(|col| {
                preview
                    .rows
                    .iter()
                    .map(|row| row.get(col).map(String::as_str).unwrap_or(""))
                    .collect()
            })
            .collect();

        json!({
            "data": [{
                "type": "table",
                "header": { "values": preview.columns },
                "cells": { "values": cells },
            }],
            "layout": {
                "title": { "text": format!("Preview ({} rows total)", preview.total_rows) },
            },
        })
    }
}

fn pie_trace(counts: &FrequencyTable, hole: Option<f64>) -> Value {
    let mut trace = json!({
        "type": "pie",
        "labels": counts.labels(),
        "values": counts.counts(),
    });
    if let Some(hole) = hole {
        trace["hole"] = json!(hole);
    }
    trace
}

fn heatmap_trace(spec: &ChartSpec, matrix: &CorrelationMatrix, annotate: bool) -> DataResult<Value> {
    let n = matrix.columns.len();
    if matrix.values.len() != n || matrix.values.iter().any(|row| row.len() != n) {
        return Err(DataError::InvalidData(format!(
            "'{}': correlation matrix is not {}x{}",
            spec.title, n, n
        )));
    }

    let mut trace = json!({
        "type": "heatmap",
        "x": matrix.columns,
        "y": matrix.columns,
        "z": matrix.values,
        "zmin": -1.0,
        "zmax": 1.0,
        "colorscale": "RdBu",
    });

    if annotate {
        let text: Vec<Vec<String>> = matrix
            .values
            .iter()
            .map(|row| {
                row.iter()
                    .map(|v| v.map(|v| format!("{:.2}", v)).unwrap_or_default())
                    .collect()
            })
            .collect();
        trace["text"] = json!(text);
        trace["texttemplate"] = json!("%{text}");
    }

    Ok(trace)
}

fn same_length(spec: &ChartSpec, x: usize, y: usize) -> DataResult<()> {
    if x == y {
        Ok(())
    } else {
        Err(DataError::InvalidData(format!(
            "'{}': x has {} values but y has {}",
            spec.title, x, y
        )))
    }
}
