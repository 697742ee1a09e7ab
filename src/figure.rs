//! Declarative chart descriptions.
//!
//! These types serialize to the trace + layout JSON understood by Plotly-style
//! graphing widgets. They carry no rendering logic.

use serde::Serialize;

/// Area filling mode of a trace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Fill {
    None,
    /// Fill down to the previous trace in the figure.
    ToNextY,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Lines,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Line {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub color: String,
}

/// One drawable line or region of a figure.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trace {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    pub name: String,
    pub x: Vec<usize>,
    pub y: Vec<f64>,
    pub mode: Mode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<Line>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marker: Option<Marker>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<Fill>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fillcolor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub legendgroup: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub showlegend: Option<bool>,
}

impl Trace {
    /// Create a bare line trace over the index axis `0..y.len()`.
    pub fn new(name: &str, y: Vec<f64>) -> Self {
        Self {
            kind: None,
            name: name.to_string(),
            x: (0..y.len()).collect(),
            y,
            mode: Mode::Lines,
            line: None,
            marker: None,
            fill: None,
            fillcolor: None,
            legendgroup: None,
            showlegend: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Title {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xanchor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yanchor: Option<String>,
}

impl Title {
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
            x: None,
            xanchor: None,
            yanchor: None,
        }
    }

    /// Title centered horizontally and anchored at the top.
    pub fn centered(text: &str) -> Self {
        Self {
            text: text.to_string(),
            x: Some(0.5),
            xanchor: Some("center".to_string()),
            yanchor: Some("top".to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layout {
    pub title: Title,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plot_bgcolor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub showlegend: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Figure {
    pub data: Vec<Trace>,
    pub layout: Layout,
}

/// A figure addressed to one graph element of the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Graph {
    pub id: String,
    pub figure: Figure,
}
