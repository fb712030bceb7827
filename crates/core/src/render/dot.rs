//! Graphviz DOT output
//!
//! Nodes are emitted in pre-order, edges in insertion order, so the output
//! for a given input is stable byte for byte.

use crate::graph::Graph;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Write};

/// Presentation settings for the DOT writer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DotStyle {
    /// Graphviz layout engine (`neato` and `fdp` are force-directed)
    pub layout: String,
    /// Node fill color
    pub fill_color: String,
    /// Node label font size in points
    pub font_size: u32,
    /// Label nodes with their full id instead of the display label
    pub show_ids: bool,
}

impl Default for DotStyle {
    fn default() -> Self {
        Self {
            layout: "neato".to_string(),
            fill_color: "skyblue".to_string(),
            font_size: 10,
            show_ids: false,
        }
    }
}

/// A graph paired with its style, printable as a DOT document
pub struct Dot<'a> {
    graph: &'a Graph,
    style: &'a DotStyle,
}

impl<'a> Dot<'a> {
    pub fn new(graph: &'a Graph, style: &'a DotStyle) -> Self {
        Self { graph, style }
    }
}

impl fmt::Display for Dot<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_dot(self.graph, self.style, f)
    }
}

/// Render `graph` as a DOT document
pub fn to_dot(graph: &Graph, style: &DotStyle) -> String {
    Dot::new(graph, style).to_string()
}

/// Write `graph` as a DOT document into `out`
pub fn write_dot<W: Write>(graph: &Graph, style: &DotStyle, out: &mut W) -> fmt::Result {
    writeln!(out, "digraph scene {{")?;
    writeln!(out, "    layout={};", quote(&style.layout))?;
    writeln!(
        out,
        "    node [shape=ellipse, style=filled, fillcolor={}, fontsize={}];",
        quote(&style.fill_color),
        style.font_size
    )?;

    for node in graph.nodes() {
        let label = if style.show_ids { &node.id } else { &node.label };
        write!(out, "    {} [label={}", quote(&node.id), quote(label))?;
        if let Some(material) = &node.material {
            write!(out, ", tooltip={}", quote(material))?;
        }
        writeln!(out, "];")?;
    }

    for (from, to, _) in graph.edges_by_id() {
        writeln!(out, "    {} -> {};", quote(from), quote(to))?;
    }

    writeln!(out, "}}")
}

// DOT double-quoted string: only `"` and `\` need escaping.
fn quote(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for c in value.chars() {
        match c {
            '"' => quoted.push_str("\\\""),
            '\\' => quoted.push_str("\\\\"),
            '\n' => quoted.push_str("\\n"),
            _ => quoted.push(c),
        }
    }
    quoted.push('"');
    quoted
}
