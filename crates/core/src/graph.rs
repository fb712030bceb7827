//! Graph data structures for scene hierarchies
//!
//! Uses `petgraph::StableGraph` so node and edge indices follow insertion
//! order. The converter inserts in pre-order, which makes index order the
//! traversal order that renderers rely on.

use petgraph::stable_graph::{EdgeIndex, NodeIndex, StableGraph};
use petgraph::visit::{EdgeRef, IntoEdgeReferences};
use petgraph::Direction;
use serde::{Deserialize, Serialize};

/// Identifier and label of the synthetic root node
pub const ROOT_ID: &str = "root";

/// A node in the scene diagram
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Node {
    /// Deterministic identifier, unique within one graph
    pub id: String,
    /// Display label (mesh name, `"None"`, or `"root"`)
    pub label: String,
    /// Whether this is the synthetic root or a scene node
    pub kind: NodeKind,
    /// Material name from `renderInfo.material`, if any
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub material: Option<String>,
    /// Distance from the synthetic root (root is 0)
    pub depth: usize,
}

impl Node {
    /// The synthetic root every graph starts from
    pub fn root() -> Self {
        Self {
            id: ROOT_ID.to_string(),
            label: ROOT_ID.to_string(),
            kind: NodeKind::Root,
            material: None,
            depth: 0,
        }
    }
}

/// Kinds of nodes that appear in the diagram
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Root,
    Scene,
}

/// A parent → child edge
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Edge {
    /// Index of the child within its parent's `children` list
    pub position: usize,
}

/// The scene diagram
///
/// Always contains the synthetic root node. Built once by
/// [`crate::convert::tree_to_graph`] and read-only afterwards.
#[derive(Debug, Clone)]
pub struct Graph {
    inner: StableGraph<Node, Edge>,
    root: NodeIndex,
}

impl Graph {
    /// Create a graph holding only the synthetic root
    pub fn new() -> Self {
        let mut inner = StableGraph::new();
        let root = inner.add_node(Node::root());
        Self { inner, root }
    }

    /// Index of the synthetic root
    pub fn root(&self) -> NodeIndex {
        self.root
    }

    pub(crate) fn add_node(&mut self, node: Node) -> NodeIndex {
        self.inner.add_node(node)
    }

    pub(crate) fn add_edge(&mut self, from: NodeIndex, to: NodeIndex, edge: Edge) -> EdgeIndex {
        self.inner.add_edge(from, to, edge)
    }

    /// Get a node by index
    pub fn node_weight(&self, index: NodeIndex) -> Option<&Node> {
        self.inner.node_weight(index)
    }

    /// Get the number of nodes in the graph, root included
    pub fn node_count(&self) -> usize {
        self.inner.node_count()
    }

    /// Get the number of edges in the graph
    pub fn edge_count(&self) -> usize {
        self.inner.edge_count()
    }

    /// Iterate over all nodes in insertion (pre-order) order
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.inner.node_weights()
    }

    /// Get all node indices in the graph
    pub fn node_indices(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        self.inner.node_indices()
    }

    /// Iterate over `(from, to, edge)` for every edge in insertion order
    pub fn edge_endpoints(&self) -> impl Iterator<Item = (NodeIndex, NodeIndex, &Edge)> {
        self.inner
            .edge_references()
            .map(|e| (e.source(), e.target(), e.weight()))
    }

    /// Iterate over `(from_id, to_id, edge)` for every edge in insertion order
    pub fn edges_by_id(&self) -> impl Iterator<Item = (&str, &str, &Edge)> {
        self.edge_endpoints().filter_map(move |(from, to, edge)| {
            let from = self.node_weight(from)?;
            let to = self.node_weight(to)?;
            Some((from.id.as_str(), to.id.as_str(), edge))
        })
    }

    /// Children of `parent`, ordered as they appeared in the input
    ///
    /// petgraph yields adjacent edges newest-first, so this sorts by the
    /// recorded child position.
    pub fn children(&self, parent: NodeIndex) -> Vec<NodeIndex> {
        let mut edges: Vec<_> = self
            .inner
            .edges_directed(parent, Direction::Outgoing)
            .map(|e| (e.weight().position, e.target()))
            .collect();
        edges.sort_by_key(|&(position, _)| position);
        edges.into_iter().map(|(_, target)| target).collect()
    }

    /// Parent of `child`, `None` for the root
    pub fn parent(&self, child: NodeIndex) -> Option<NodeIndex> {
        self.inner
            .neighbors_directed(child, Direction::Incoming)
            .next()
    }

    /// Find a node by its ID
    ///
    /// **Note**: linear scan over all nodes.
    pub fn find_node_by_id(&self, id: &str) -> Option<NodeIndex> {
        self.node_indices()
            .find(|&idx| self.node_weight(idx).map(|n| n.id.as_str()) == Some(id))
    }
}

impl Default for Graph {
    fn default() -> Self {
        Self::new()
    }
}
