//! Rendering module - turns chart specs into something a frontend can draw.
//!
//! The dispatcher stops at [`ChartSpec`]; a [`ChartRenderer`] takes it from
//! there. This module is organized into:
//! - `figure` - Plotly-style figure JSON for each chart kind

mod figure;

pub use figure::FigureRenderer;

use crate::data::DataResult;
use crate::types::ChartSpec;

/// Draws one chart spec into the renderer's output type
pub trait ChartRenderer {
    type Output;

    fn render(&self, spec: &ChartSpec) -> DataResult<Self::Output>;
}

/// Render every chart in order. Stops at the first failure.
pub fn render_all<R: ChartRenderer>(
    renderer: &R,
    charts: &[ChartSpec],
) -> DataResult<Vec<R::Output>> {
    charts.iter().map(|spec| renderer.render(spec)).collect()
}
