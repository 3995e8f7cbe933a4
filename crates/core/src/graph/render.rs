#![forbid(unsafe_code)]

//! Renderer-facing shapes. These are what the graph canvas and the table view consume; they
//! carry resolved display fields (type name, color, parent name) next to the identity.

use super::{DataBag, Link, Node, NodeType, Position, merge_data_bag};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

pub const UNKNOWN_TYPE_NAME: &str = "Unknown";
pub const UNKNOWN_TYPE_COLOR: &str = "#ccc";
pub const DEFAULT_EDGE_TYPE: &str = "smoothstep";

const RESERVED_DATA_KEYS: &[&str] = &[
    "label",
    "nodeType",
    "typeId",
    "description",
    "color",
    "tags",
    "parentName",
];

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RenderNode {
    pub id: String,
    pub position: Position,
    pub data: RenderNodeData,
    #[serde(
        rename = "parentNode",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub parent_node: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderNodeData {
    pub label: String,
    pub node_type: String,
    pub type_id: String,
    #[serde(default)]
    pub description: String,
    pub color: String,
    #[serde(default, deserialize_with = "deserialize_lenient_tags")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_name: Option<String>,
    #[serde(flatten)]
    pub extra: DataBag,
}

impl RenderNodeData {
    /// Switches the node to `type_id`, resolving name and color the way the store renders them.
    pub fn set_type(&mut self, type_id: &str, node_type: Option<&NodeType>) {
        self.type_id = type_id.to_string();
        self.node_type = node_type
            .map(|t| t.name.clone())
            .unwrap_or_else(|| UNKNOWN_TYPE_NAME.to_string());
        self.color = node_type
            .map(|t| t.color.clone())
            .unwrap_or_else(|| UNKNOWN_TYPE_COLOR.to_string());
    }

    /// Shallow merge into the extension fields; `null` removes a key, core fields are untouched.
    pub fn merge_extra(&mut self, patch: DataBag) {
        merge_data_bag(&mut self.extra, patch);
        for key in RESERVED_DATA_KEYS {
            self.extra.remove(*key);
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RenderEdge {
    pub id: String,
    pub source: String,
    pub target: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(rename = "type", default = "default_edge_type")]
    pub edge_type: String,
    #[serde(default)]
    pub data: DataBag,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphView {
    pub nodes: Vec<RenderNode>,
    pub edges: Vec<RenderEdge>,
}

fn default_edge_type() -> String {
    DEFAULT_EDGE_TYPE.to_string()
}

pub fn render_node(node: &Node, node_type: Option<&NodeType>) -> RenderNode {
    let mut extra = node.data.clone();
    for key in RESERVED_DATA_KEYS {
        extra.remove(*key);
    }
    RenderNode {
        id: node.id.clone(),
        position: node.position,
        data: RenderNodeData {
            label: node.label.clone(),
            node_type: node_type
                .map(|t| t.name.clone())
                .unwrap_or_else(|| UNKNOWN_TYPE_NAME.to_string()),
            type_id: node.type_id.clone(),
            description: node.description.clone().unwrap_or_default(),
            color: node_type
                .map(|t| t.color.clone())
                .unwrap_or_else(|| UNKNOWN_TYPE_COLOR.to_string()),
            tags: node.tags.clone(),
            parent_name: None,
            extra,
        },
        parent_node: None,
    }
}

pub fn render_edge(link: &Link) -> RenderEdge {
    RenderEdge {
        id: link.id.clone(),
        source: link.source_id.clone(),
        target: link.target_id.clone(),
        label: link.label.clone(),
        edge_type: link
            .link_type
            .clone()
            .unwrap_or_else(default_edge_type),
        data: link.data.clone(),
    }
}

/// Tags arrive from clients in more than one shape. Anything that is not a list of strings (or a
/// JSON string holding one) reads as no tags.
pub fn deserialize_lenient_tags<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(lenient_tags(&value))
}

pub fn lenient_tags(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => items
            .iter()
            .filter_map(|item| item.as_str().map(str::to_string))
            .collect(),
        Value::String(raw) => match serde_json::from_str::<Value>(raw) {
            Ok(Value::Array(items)) => items
                .iter()
                .filter_map(|item| item.as_str().map(str::to_string))
                .collect(),
            _ => Vec::new(),
        },
        _ => Vec::new(),
    }
}
