#![forbid(unsafe_code)]

use ng_core::graph::{DataBag, Position};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct CreateNodeRequest {
    pub type_id: String,
    pub label: String,
    pub position: Position,
    pub parent_id: Option<String>,
    pub description: Option<String>,
    pub tags: Vec<String>,
    pub data: DataBag,
}

/// Partial update. `None` leaves a field untouched; for the nullable fields `Some(None)` clears.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct UpdateNodeRequest {
    pub type_id: Option<String>,
    pub label: Option<String>,
    pub description: Option<Option<String>>,
    pub parent_id: Option<Option<String>>,
    pub position: Option<Position>,
    pub tags: Option<Vec<String>>,
    pub data: Option<DataBag>,
}

impl UpdateNodeRequest {
    pub fn position(position: Position) -> Self {
        Self {
            position: Some(position),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.type_id.is_none()
            && self.label.is_none()
            && self.description.is_none()
            && self.parent_id.is_none()
            && self.position.is_none()
            && self.tags.is_none()
            && self.data.is_none()
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct CreateLinkRequest {
    pub source_id: String,
    pub target_id: String,
    pub label: Option<String>,
    pub link_type: Option<String>,
    pub data: DataBag,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CreateNodeTypeRequest {
    pub name: String,
    pub color: String,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DeleteReport {
    pub nodes_deleted: usize,
    pub links_deleted: usize,
}

#[derive(Debug)]
pub struct PositionWrite {
    pub node_id: String,
    pub result: Result<(), super::StoreError>,
}
