//! Input model for scene-graph JSON documents
//!
//! A document has the shape `{"root": <tree node>}`. Tree nodes are JSON
//! objects with an optional ordered `children` list and an optional
//! `renderInfo` object. Unknown fields (transforms, names, ...) are ignored.
//!
//! Shape checking happens here, during deserialization: a tree node that is
//! not an object or a `children` value that is not an array is rejected with
//! the serde error, wrapped in context naming the input source.

use anyhow::Context;
use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::io::Read;
use std::path::Path;

/// Label used when a node has no `renderInfo.mesh`
pub const MISSING_MESH_LABEL: &str = "None";

// The model types deserialize through `Map` so only JSON objects are
// accepted; derived struct visitors would also take positional arrays.
type Object = Map<String, Value>;

/// Top-level document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Object")]
pub struct SceneDocument {
    pub root: SceneNode,
}

/// A node in the input tree
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Object")]
pub struct SceneNode {
    pub children: Vec<SceneNode>,
    #[serde(rename = "renderInfo", skip_serializing_if = "Option::is_none")]
    pub render_info: Option<RenderInfo>,
}

/// Rendering attributes attached to a tree node
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Object")]
pub struct RenderInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mesh: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub material: Option<String>,
}

impl TryFrom<Object> for SceneDocument {
    type Error = serde_json::Error;

    fn try_from(mut object: Object) -> Result<Self, Self::Error> {
        let root = take(&mut object, "root")?
            .ok_or_else(|| serde_json::Error::missing_field("root"))?;
        Ok(Self { root })
    }
}

impl TryFrom<Object> for SceneNode {
    type Error = serde_json::Error;

    fn try_from(mut object: Object) -> Result<Self, Self::Error> {
        Ok(Self {
            children: take(&mut object, "children")?.unwrap_or_default(),
            render_info: take(&mut object, "renderInfo")?,
        })
    }
}

impl TryFrom<Object> for RenderInfo {
    type Error = serde_json::Error;

    fn try_from(mut object: Object) -> Result<Self, Self::Error> {
        Ok(Self {
            mesh: take(&mut object, "mesh")?,
            material: take(&mut object, "material")?,
        })
    }
}

// Missing keys and explicit `null` both read as `None`.
fn take<T: DeserializeOwned>(
    object: &mut Object,
    key: &str,
) -> Result<Option<T>, serde_json::Error> {
    match object.remove(key) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => serde_json::from_value(value).map(Some),
    }
}

impl SceneNode {
    /// Display label: the mesh name, or `"None"` when absent
    pub fn label(&self) -> &str {
        self.render_info
            .as_ref()
            .and_then(|info| info.mesh.as_deref())
            .unwrap_or(MISSING_MESH_LABEL)
    }

    /// Material name, if the node has one
    pub fn material(&self) -> Option<&str> {
        self.render_info
            .as_ref()
            .and_then(|info| info.material.as_deref())
    }

    /// Number of tree nodes strictly below this one
    pub fn descendant_count(&self) -> usize {
        self.children
            .iter()
            .map(|child| 1 + child.descendant_count())
            .sum()
    }
}

impl SceneDocument {
    /// Parse a document from a JSON string
    pub fn from_str(json: &str) -> anyhow::Result<Self> {
        let document: Self =
            serde_json::from_str(json).context("Failed to parse scene document")?;
        document.log_loaded("<string>");
        Ok(document)
    }

    /// Parse a document from any reader (e.g. stdin)
    pub fn from_reader<R: Read>(reader: R) -> anyhow::Result<Self> {
        let document: Self =
            serde_json::from_reader(reader).context("Failed to parse scene document")?;
        document.log_loaded("<reader>");
        Ok(document)
    }

    /// Read and parse a document from a file
    pub fn from_path(path: &Path) -> anyhow::Result<Self> {
        let source = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read scene file: {}", path.display()))?;
        let document: Self = serde_json::from_str(&source)
            .with_context(|| format!("Failed to parse scene file: {}", path.display()))?;
        document.log_loaded(&path.display().to_string());
        Ok(document)
    }

    fn log_loaded(&self, source: &str) {
        tracing::info!(
            source,
            nodes = self.root.descendant_count(),
            "loaded scene document"
        );
    }
}
