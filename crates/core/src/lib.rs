//! Scene Diagram Core Library
//!
//! This library converts scene-graph JSON trees into directed graphs of
//! parent/child relationships and renders them for external drawing tools.

pub mod convert;
pub mod graph;
pub mod render;
pub mod scene;

// Re-export commonly used types
pub use convert::{tree_to_graph, ConvertOptions, IdScheme};
pub use graph::{Edge, Graph, Node, NodeKind};
pub use render::{render, DotStyle, OutputFormat};
pub use scene::{RenderInfo, SceneDocument, SceneNode};
