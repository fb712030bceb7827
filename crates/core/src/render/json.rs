//! JSON node/edge list output

use crate::graph::{Graph, Node};
use anyhow::Context;
use serde::Serialize;

/// Serializable view of a graph
#[derive(Debug, Serialize)]
pub struct GraphExport<'a> {
    pub nodes: Vec<&'a Node>,
    pub edges: Vec<EdgeExport<'a>>,
}

/// One directed edge, by node id
#[derive(Debug, Serialize)]
pub struct EdgeExport<'a> {
    pub from: &'a str,
    pub to: &'a str,
    pub position: usize,
}

impl<'a> GraphExport<'a> {
    pub fn new(graph: &'a Graph) -> Self {
        Self {
            nodes: graph.nodes().collect(),
            edges: graph
                .edges_by_id()
                .map(|(from, to, edge)| EdgeExport {
                    from,
                    to,
                    position: edge.position,
                })
                .collect(),
        }
    }
}

/// Render `graph` as pretty-printed JSON
pub fn to_json(graph: &Graph) -> anyhow::Result<String> {
    serde_json::to_string_pretty(&GraphExport::new(graph)).context("Failed to serialize graph")
}
