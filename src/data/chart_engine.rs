//! Chart data processing engine
//!
//! Table computations behind the chart specs: numeric series extraction,
//! value counts, pairwise correlation and time ordering. Heavy work happens
//! here rather than in the renderer.

use crate::data::temporal::TemporalColumn;
use crate::types::{CorrelationMatrix, DataCell, DataSource, FrequencyEntry, FrequencyTable};
use chrono::NaiveDateTime;
use std::collections::HashMap;

/// Numeric values of a column; non-numeric and missing cells are `None`
pub fn numeric_values(source: &DataSource, index: usize) -> Vec<Option<f64>> {
    source.column_cells(index).map(DataCell::as_number).collect()
}

/// Count occurrences of each distinct value in a column.
///
/// Entries are ordered by count descending; ties keep first-appearance
/// order. Empty cells are counted under a `None` value so the counts always
/// sum to the row count.
pub fn value_counts(source: &DataSource, index: usize) -> FrequencyTable {
    // Group by value, preserving insertion order
    let mut group_order: Vec<Option<String>> = Vec::new();
    let mut groups: HashMap<Option<String>, usize> = HashMap::new();

    for cell in source.column_cells(index) {
        let key = match cell {
            DataCell::Empty => None,
            other => Some(other.to_string()),
        };
        let count = groups.entry(key.clone()).or_insert(0);
        if *count == 0 {
            group_order.push(key);
        }
        *count += 1;
    }

    let mut entries: Vec<FrequencyEntry> = group_order
        .into_iter()
        .map(|value| {
            let count = groups.get(&value).copied().unwrap_or(0);
            FrequencyEntry { value, count }
        })
        .collect();

    // Stable, so ties stay in first-appearance order
    entries.sort_by(|a, b| b.count.cmp(&a.count));

    FrequencyTable { entries }
}

/// Pearson correlation over the rows where both values are present.
///
/// Returns `None` with fewer than two complete pairs or when either side has
/// zero variance.
pub fn pearson(x: &[Option<f64>], y: &[Option<f64>]) -> Option<f64> {
    let pairs: Vec<(f64, f64)> = x
        .iter()
        .zip(y)
        .filter_map(|(a, b)| Some(((*a)?, (*b)?)))
        .collect();
    if pairs.len() < 2 {
        return None;
    }

    let n = pairs.len() as f64;
    let mean_x = pairs.iter().map(|p| p.0).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|p| p.1).sum::<f64>() / n;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (a, b) in &pairs {
        let dx = a - mean_x;
        let dy = b - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    if var_x == 0.0 || var_y == 0.0 {
        return None;
    }
    Some((cov / (var_x.sqrt() * var_y.sqrt())).clamp(-1.0, 1.0))
}

/// Pairwise correlation matrix over the named numeric columns
pub fn correlation_matrix(source: &DataSource, columns: &[String]) -> CorrelationMatrix {
    let series: Vec<Vec<Option<f64>>> = columns
        .iter()
        .map(|name| {
            source
                .column_index(name)
                .map(|idx| numeric_values(source, idx))
                .unwrap_or_default()
        })
        .collect();

    let values = (0..series.len())
        .map(|i| {
            (0..series.len())
                .map(|j| {
                    let r = pearson(&series[i], &series[j]);
                    // Self-correlation is exactly 1 whenever it is defined
                    if i == j { r.map(|_| 1.0) } else { r }
                })
                .collect()
        })
        .collect();

    CorrelationMatrix {
        columns: columns.to_vec(),
        values,
    }
}

/// Reorder a temporal column and a value series by time ascending
pub fn time_ordered(
    temporal: &TemporalColumn,
    values: &[Option<f64>],
) -> (Vec<Option<NaiveDateTime>>, Vec<Option<f64>>) {
    temporal
        .sorted_order()
        .into_iter()
        .map(|i| (temporal.values[i], values.get(i).copied().flatten()))
        .unzip()
}
