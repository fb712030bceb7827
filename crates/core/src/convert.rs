//! Tree → graph conversion
//!
//! Walks a [`SceneNode`] tree in pre-order and produces a [`Graph`] with one
//! node per tree node below the root, plus the synthetic `root` node. Every
//! parent/child relationship becomes one directed edge. Children are visited
//! in input order; there is no deduplication, so the result is always a tree.
//!
//! # Node ids
//!
//! Ids have the form `<label>_<discriminator>`. The discriminator depends on
//! the [`IdScheme`]:
//!
//! - `Sequential`: 1-based pre-order visitation counter (`Cube_1`, `None_2`)
//! - `Path`: dot-joined child indices from the root (`Cube_0`, `Sphere_1.0`)
//!
//! Both are deterministic, so the same input always yields the same ids.

use crate::graph::{Edge, Graph, Node, NodeKind};
use crate::scene::SceneNode;
use petgraph::stable_graph::NodeIndex;
use serde::{Deserialize, Serialize};

/// How node discriminators are generated
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdScheme {
    #[default]
    Sequential,
    Path,
}

/// Options for [`tree_to_graph`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConvertOptions {
    pub id_scheme: IdScheme,
}

/// Convert a scene tree into a diagram graph
///
/// `root` is the tree node hanging off the document's `root` key. Its own
/// `renderInfo` is not read; it is represented by the synthetic root node.
pub fn tree_to_graph(root: &SceneNode, options: &ConvertOptions) -> Graph {
    let mut converter = Converter {
        graph: Graph::new(),
        scheme: options.id_scheme,
        visited: 0,
        path: Vec::new(),
    };
    let graph_root = converter.graph.root();
    converter.add_children(graph_root, root, 1);

    let graph = converter.graph;
    tracing::info!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "built scene graph"
    );
    graph
}

// Accumulator scoped to one `tree_to_graph` call.
struct Converter {
    graph: Graph,
    scheme: IdScheme,
    visited: usize,
    path: Vec<usize>,
}

impl Converter {
    fn add_children(&mut self, parent: NodeIndex, tree_node: &SceneNode, depth: usize) {
        for (position, child) in tree_node.children.iter().enumerate() {
            self.visited += 1;
            self.path.push(position);

            let label = child.label();
            let id = format!("{}_{}", label, self.discriminator());
            tracing::debug!(%id, depth, "adding scene node");

            let index = self.graph.add_node(Node {
                id,
                label: label.to_string(),
                kind: NodeKind::Scene,
                material: child.material().map(str::to_string),
                depth,
            });
            self.graph.add_edge(parent, index, Edge { position });

            self.add_children(index, child, depth + 1);
            self.path.pop();
        }
    }

    fn discriminator(&self) -> String {
        match self.scheme {
            IdScheme::Sequential => self.visited.to_string(),
            IdScheme::Path => self
                .path
                .iter()
                .map(|i| i.to_string())
                .collect::<Vec<_>>()
                .join("."),
        }
    }
}
