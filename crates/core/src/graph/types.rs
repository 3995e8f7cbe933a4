#![forbid(unsafe_code)]

use serde::{Deserialize, Serialize};

/// Open-ended extension fields attached to nodes and links.
pub type DataBag = serde_json::Map<String, serde_json::Value>;

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NodeType {
    pub id: String,
    pub name: String,
    pub color: String,
    pub created_at_ms: i64,
    pub updated_at_ms: i64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: String,
    pub type_id: String,
    pub label: String,
    pub description: Option<String>,
    pub parent_id: Option<String>,
    pub position: Position,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub data: DataBag,
    pub created_at_ms: i64,
    pub updated_at_ms: i64,
}

impl Node {
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Link {
    pub id: String,
    pub source_id: String,
    pub target_id: String,
    pub label: Option<String>,
    #[serde(rename = "type")]
    pub link_type: Option<String>,
    #[serde(default)]
    pub data: DataBag,
    pub created_at_ms: i64,
    pub updated_at_ms: i64,
}

/// Built-in types installed when a store is initialized: `(name, color)`.
pub const DEFAULT_NODE_TYPES: &[(&str, &str)] = &[
    ("Initiative", "#3F51B5"),
    ("Epic", "#673AB7"),
    ("Task", "#2196F3"),
    ("Sub Task", "#00BCD4"),
    ("Design Spec", "#009688"),
    ("Proposal", "#4CAF50"),
];
