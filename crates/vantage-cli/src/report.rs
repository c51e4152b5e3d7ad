//! Text and JSON rendering of projection results

use serde::Serialize;
use vantage_core::projection::to_row_major;
use vantage_core::{
    Parameter, ProjectionMode, ProjectionOutput, ProjectionParameters, Viewport,
};

/// Format a matrix as four aligned rows
pub fn format_matrix(rows: &[[f32; 4]; 4]) -> String {
    let mut out = String::new();
    for row in rows {
        out.push_str(&format!(
            "[ {:>12.6} {:>12.6} {:>12.6} {:>12.6} ]\n",
            row[0], row[1], row[2], row[3]
        ));
    }
    out
}

/// Format every parameter, marking the ones the active mode ignores
pub fn format_parameters(mode: ProjectionMode, params: &ProjectionParameters) -> String {
    let mut out = format!("mode: {mode}\n");
    for parameter in Parameter::ALL {
        let marker = if parameter.applies_to(mode) { "" } else { "  (unused)" };
        out.push_str(&format!(
            "  {:<13} {}{}\n",
            parameter.to_string(),
            params.get(parameter),
            marker
        ));
    }
    out
}

pub fn format_viewport(viewport: &Viewport) -> String {
    format!(
        "viewport: x={} y={} width={} height={}",
        viewport.x, viewport.y, viewport.width, viewport.height
    )
}

/// Full report for one recomputation
pub fn format_output(mode: ProjectionMode, output: &ProjectionOutput, aspect: f32) -> String {
    let mut out = format!("projection ({mode}):\n");
    out.push_str(&format_matrix(&output.row_major()));
    out.push_str(&format!("viewport aspect: {aspect:.6}\n"));

    if let Some(placement) = output.placement {
        out.push_str("camera placement (overrides orbit):\n");
        out.push_str(&format_matrix(&to_row_major(&placement)));
    }
    out
}

/// Machine-readable form of a recomputation
#[derive(Debug, Serialize)]
pub struct OutputReport {
    pub mode: ProjectionMode,
    pub parameters: ProjectionParameters,
    /// Row-major projection matrix
    pub matrix: [[f32; 4]; 4],
    pub viewport_aspect: f32,
    /// Row-major placement override, Isometric only
    pub placement: Option<[[f32; 4]; 4]>,
}

impl OutputReport {
    pub fn new(
        mode: ProjectionMode,
        parameters: ProjectionParameters,
        output: &ProjectionOutput,
        viewport_aspect: f32,
    ) -> Self {
        Self {
            mode,
            parameters,
            matrix: output.row_major(),
            viewport_aspect,
            placement: output.placement.as_ref().map(to_row_major),
        }
    }
}
