//! Renderers that turn a [`Graph`] into text for external drawing tools
//!
//! - [`dot`] - Graphviz DOT, force-directed layout by default
//! - [`json`] - plain node/edge list

use crate::graph::Graph;
use serde::{Deserialize, Serialize};

pub mod dot;
pub mod json;

pub use dot::DotStyle;

/// Supported output formats
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Dot,
    Json,
}

/// Render `graph` in the requested format
pub fn render(graph: &Graph, format: OutputFormat, style: &DotStyle) -> anyhow::Result<String> {
    match format {
        OutputFormat::Dot => Ok(dot::to_dot(graph, style)),
        OutputFormat::Json => json::to_json(graph),
    }
}
