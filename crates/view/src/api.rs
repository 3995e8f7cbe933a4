#![forbid(unsafe_code)]

//! What the view layer needs from a graph store, independent of how calls travel.

use crate::SessionError;
use ng_core::graph::{DataBag, GraphView, Link, NodeType, Position, RenderNode};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct NewNode {
    pub type_id: String,
    pub label: String,
    pub position: Position,
    pub parent_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "DataBag::is_empty")]
    pub data: DataBag,
}

/// Partial node update. Absent fields stay untouched; `Some(None)` clears a nullable field.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct NodePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<DataBag>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct NewLink {
    pub source_id: String,
    pub target_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub link_type: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiErrorBody {
    pub code: String,
    pub message: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct PositionOutcome {
    pub id: String,
    pub success: bool,
    #[serde(default)]
    pub error: Option<ApiErrorBody>,
}

pub trait GraphApi {
    fn list_node_types(&mut self) -> Result<Vec<NodeType>, SessionError>;
    fn create_node_type(&mut self, name: &str, color: &str) -> Result<NodeType, SessionError>;
    fn get_graph(&mut self, parent_id: Option<&str>) -> Result<GraphView, SessionError>;
    fn list_all_nodes(&mut self) -> Result<Vec<RenderNode>, SessionError>;
    fn create_node(&mut self, node: &NewNode) -> Result<RenderNode, SessionError>;
    fn update_node(&mut self, id: &str, patch: &NodePatch) -> Result<RenderNode, SessionError>;
    /// Independent writes: one failing entry does not undo the others.
    fn update_node_positions(
        &mut self,
        moves: &[(String, Position)],
    ) -> Result<Vec<PositionOutcome>, SessionError>;
    fn delete_node(&mut self, id: &str) -> Result<(), SessionError>;
    fn create_link(&mut self, link: &NewLink) -> Result<Link, SessionError>;
    fn delete_link(&mut self, id: &str) -> Result<(), SessionError>;
}
