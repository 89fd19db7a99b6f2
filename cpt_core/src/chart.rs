//! # Chart Assembly
//!
//! Combines two resistance curves into a chart description that a plotting
//! host can render. The serialized form is a Plotly figure document
//! (`{"data": [...], "layout": {...}}`); nothing is drawn here.
//!
//! ## Layout
//!
//! - x-axis: state parameter ψ, fixed range [-0.3, 0.3]
//! - y-axis: dimensionless CPT resistance, log scale, ticks at 10, 50, 100, 1000
//! - Case1 drawn blue, Case2 drawn red
//! - "NorSand CPT" annotation in the top-right corner of the plot area
//!
//! ## Example
//!
//! ```rust
//! use cpt_core::chart::render;
//! use cpt_core::parameters::ParameterSet;
//!
//! let chart = render(&ParameterSet::default(), &ParameterSet::default()).unwrap();
//! assert_eq!(chart.data.len(), 2);
//!
//! let json = chart.to_json().unwrap();
//! assert!(json.contains("\"type\":\"log\""));
//! ```

use log::debug;
use serde::{Deserialize, Serialize};

use crate::calculations::cpt_curve::{self, CptCurveInput, ResistanceCurve};
use crate::calculations::{STATE_PARAMETER_MAX, STATE_PARAMETER_MIN};
use crate::errors::{CalcError, CalcResult};
use crate::parameters::ParameterSet;

/// Label of the first case
pub const CASE1_LABEL: &str = "Case1";

/// Label of the second case
pub const CASE2_LABEL: &str = "Case2";

/// Line color of the first case
pub const CASE1_COLOR: &str = "blue";

/// Line color of the second case
pub const CASE2_COLOR: &str = "red";

/// Figure title
pub const CHART_TITLE: &str = "NorSand CPT inversion";

/// Text of the corner annotation
pub const ANNOTATION_TEXT: &str = "NorSand CPT";

/// Tick values on the logarithmic resistance axis
pub const RESISTANCE_TICKS: [f64; 4] = [10.0, 50.0, 100.0, 1000.0];

/// Text element (figure or axis title)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Title {
    pub text: String,
}

impl Title {
    fn new(text: impl Into<String>) -> Self {
        Title { text: text.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineStyle {
    pub color: String,
    pub width: f64,
}

/// One line trace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trace {
    #[serde(rename = "type")]
    pub trace_type: String,
    pub name: String,
    pub mode: String,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub line: LineStyle,
}

impl Trace {
    /// Build a line trace from a curve.
    pub fn from_curve(curve: &ResistanceCurve, color: &str) -> Self {
        Trace {
            trace_type: "scatter".to_string(),
            name: curve.label.clone(),
            mode: "lines".to_string(),
            x: curve.psi_values(),
            y: curve.q_values(),
            line: LineStyle {
                color: color.to_string(),
                width: 2.0,
            },
        }
    }
}

/// Axis configuration. Unset options are left out of the JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Axis {
    pub title: Title,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub axis_type: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub range: Option<[f64; 2]>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub constrain: Option<String>,

    pub scaleratio: f64,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub tickvals: Option<Vec<f64>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub dtick: Option<f64>,
}

impl Axis {
    /// Linear state parameter axis with the fixed ψ range.
    fn state_parameter() -> Self {
        Axis {
            title: Title::new("State parameter \u{03A8}"),
            axis_type: None,
            range: Some([STATE_PARAMETER_MIN, STATE_PARAMETER_MAX]),
            constrain: Some("domain".to_string()),
            scaleratio: 1.0,
            tickvals: None,
            dtick: None,
        }
    }

    /// Logarithmic resistance axis.
    fn resistance() -> Self {
        Axis {
            title: Title::new("Dimensionless CPT resistance"),
            axis_type: Some("log".to_string()),
            range: None,
            constrain: None,
            scaleratio: 1.0,
            tickvals: Some(RESISTANCE_TICKS.to_vec()),
            dtick: Some(1.0),
        }
    }

    pub fn is_log(&self) -> bool {
        self.axis_type.as_deref() == Some("log")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Font {
    pub size: f64,
    pub color: String,
}

/// Static text box placed in paper coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub xref: String,
    pub yref: String,
    pub showarrow: bool,
    pub font: Font,
    pub bordercolor: String,
    pub borderwidth: f64,
    pub borderpad: f64,
    pub bgcolor: String,
    pub opacity: f64,
}

impl Annotation {
    /// The "NorSand CPT" label anchored at the top-right of the plot area.
    fn corner_label() -> Self {
        Annotation {
            text: ANNOTATION_TEXT.to_string(),
            x: 1.0,
            y: 1.0,
            xref: "paper".to_string(),
            yref: "paper".to_string(),
            showarrow: false,
            font: Font {
                size: 12.0,
                color: "black".to_string(),
            },
            bordercolor: "black".to_string(),
            borderwidth: 1.0,
            borderpad: 4.0,
            bgcolor: "white".to_string(),
            opacity: 0.8,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    pub title: Title,
    pub xaxis: Axis,
    pub yaxis: Axis,
    pub annotations: Vec<Annotation>,
}

/// Renderable chart: the two traces plus layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartArtifact {
    pub data: Vec<Trace>,
    pub layout: Layout,
}

impl ChartArtifact {
    /// Find a trace by its label
    pub fn trace(&self, name: &str) -> Option<&Trace> {
        self.data.iter().find(|t| t.name == name)
    }

    /// Compact JSON for transmission to a plotting host
    pub fn to_json(&self) -> CalcResult<String> {
        serde_json::to_string(self).map_err(|e| CalcError::serialization(e.to_string()))
    }

    /// Indented JSON for files and terminals
    pub fn to_json_pretty(&self) -> CalcResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| CalcError::serialization(e.to_string()))
    }
}

/// Assemble the chart for two already evaluated curves.
///
/// Purely presentational: the first curve is drawn blue, the second red, in
/// that order.
pub fn assemble_chart(case1: &ResistanceCurve, case2: &ResistanceCurve) -> ChartArtifact {
    ChartArtifact {
        data: vec![
            Trace::from_curve(case1, CASE1_COLOR),
            Trace::from_curve(case2, CASE2_COLOR),
        ],
        layout: Layout {
            title: Title::new(CHART_TITLE),
            xaxis: Axis::state_parameter(),
            yaxis: Axis::resistance(),
            annotations: vec![Annotation::corner_label()],
        },
    }
}

/// Both evaluated curves together with the chart drawn from them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rendering {
    pub case1: ResistanceCurve,
    pub case2: ResistanceCurve,
    pub chart: ChartArtifact,
}

/// Evaluate both cases and keep the curves next to the chart.
///
/// All-or-nothing: if either case faults, nothing is produced.
pub fn render_with_curves(case1: &ParameterSet, case2: &ParameterSet) -> CalcResult<Rendering> {
    let curve1 = cpt_curve::calculate(&CptCurveInput::new(CASE1_LABEL, *case1))?;
    let curve2 = cpt_curve::calculate(&CptCurveInput::new(CASE2_LABEL, *case2))?;
    debug!(
        "rendering chart: {} k = {:.3}, {} k = {:.3}",
        curve1.label, curve1.k, curve2.label, curve2.k
    );
    let chart = assemble_chart(&curve1, &curve2);
    Ok(Rendering {
        case1: curve1,
        case2: curve2,
        chart,
    })
}

/// Evaluate both cases and assemble the chart.
pub fn render(case1: &ParameterSet, case2: &ParameterSet) -> CalcResult<ChartArtifact> {
    render_with_curves(case1, case2).map(|rendering| rendering.chart)
}
