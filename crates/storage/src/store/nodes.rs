#![forbid(unsafe_code)]

use super::support::*;
use super::{
    CreateNodeRequest, EntityKind, PositionWrite, SqliteStore, StoreError, UpdateNodeRequest,
};
use ng_core::graph::{Node, Position, merge_data_bag};
use rusqlite::{Connection, params};
use std::collections::HashSet;

impl SqliteStore {
    pub fn create_node(&mut self, request: CreateNodeRequest) -> Result<Node, StoreError> {
        let label = checked_label(request.label)?;
        let parent_id = request.parent_id.filter(|p| !p.trim().is_empty());
        let tags = checked_tags(request.tags)?;
        let data = checked_data(request.data)?;
        let description = request.description;

        let now_ms = now_ms();
        let tx = self.conn.transaction()?;

        if !node_type_exists_tx(&tx, &request.type_id)? {
            return Err(StoreError::Validation(format!(
                "node type {} not found",
                request.type_id
            )));
        }
        if let Some(parent_id) = parent_id.as_deref()
            && !node_exists_tx(&tx, parent_id)?
        {
            return Err(StoreError::Validation(format!(
                "parent node with id {parent_id} not found"
            )));
        }

        let node = Node {
            id: uuid::Uuid::new_v4().to_string(),
            type_id: request.type_id,
            label,
            description,
            parent_id,
            position: request.position,
            tags,
            data,
            created_at_ms: now_ms,
            updated_at_ms: now_ms,
        };

        tx.execute(
            r#"
            INSERT INTO nodes(id, type_id, label, description, parent_id, pos_x, pos_y, data_json, created_at_ms, updated_at_ms)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
            "#,
            params![
                node.id,
                node.type_id,
                node.label,
                node.description,
                node.parent_id,
                node.position.x,
                node.position.y,
                encode_data(&node.data)?,
                node.created_at_ms,
                node.updated_at_ms
            ],
        )?;
        write_tags(&tx, &node.id, &node.tags)?;

        tx.commit()?;
        tracing::debug!(node_id = %node.id, parent_id = ?node.parent_id, "node created");
        Ok(node)
    }

    pub fn get_node(&self, id: &str) -> Result<Node, StoreError> {
        get_node_tx(&self.conn, id)?.ok_or_else(|| StoreError::not_found(EntityKind::Node, id))
    }

    pub fn update_node(&mut self, id: &str, request: UpdateNodeRequest) -> Result<Node, StoreError> {
        if request.is_empty() {
            return Err(StoreError::InvalidInput("no fields to update"));
        }

        let now_ms = now_ms();
        let tx = self.conn.transaction()?;

        let Some(mut node) = get_node_tx(&tx, id)? else {
            return Err(StoreError::not_found(EntityKind::Node, id));
        };

        if let Some(type_id) = request.type_id {
            if !node_type_exists_tx(&tx, &type_id)? {
                return Err(StoreError::Validation(format!(
                    "node type {type_id} not found"
                )));
            }
            node.type_id = type_id;
        }
        if let Some(label) = request.label {
            node.label = checked_label(label)?;
        }
        if let Some(description) = request.description {
            node.description = description;
        }
        if let Some(parent_id) = request.parent_id {
            let parent_id = parent_id.filter(|p| !p.trim().is_empty());
            if let Some(parent_id) = parent_id.as_deref() {
                ensure_valid_parent_tx(&tx, id, parent_id)?;
            }
            node.parent_id = parent_id;
        }
        if let Some(position) = request.position {
            node.position = position;
        }
        let tags_changed = request.tags.is_some();
        if let Some(tags) = request.tags {
            node.tags = checked_tags(tags)?;
        }
        if let Some(patch) = request.data {
            merge_data_bag(&mut node.data, patch);
            node.data = checked_data(node.data)?;
        }
        node.updated_at_ms = now_ms;

        tx.execute(
            r#"
            UPDATE nodes
            SET type_id=?2, label=?3, description=?4, parent_id=?5, pos_x=?6, pos_y=?7, data_json=?8, updated_at_ms=?9
            WHERE id=?1
            "#,
            params![
                node.id,
                node.type_id,
                node.label,
                node.description,
                node.parent_id,
                node.position.x,
                node.position.y,
                encode_data(&node.data)?,
                node.updated_at_ms
            ],
        )?;
        if tags_changed {
            write_tags(&tx, &node.id, &node.tags)?;
        }

        tx.commit()?;
        tracing::debug!(node_id = %node.id, "node updated");
        Ok(node)
    }

    /// Drag path: every write is independent, so a failure part way leaves earlier moves applied.
    pub fn update_node_positions(&mut self, moves: &[(String, Position)]) -> Vec<PositionWrite> {
        moves
            .iter()
            .map(|(node_id, position)| {
                let result = self
                    .update_node(node_id, UpdateNodeRequest::position(*position))
                    .map(|_| ());
                if let Err(err) = &result {
                    tracing::warn!(node_id = %node_id, error = %err, "position update failed");
                }
                PositionWrite {
                    node_id: node_id.clone(),
                    result,
                }
            })
            .collect()
    }
}

fn checked_label(label: String) -> Result<String, StoreError> {
    if label.trim().is_empty() {
        return Err(StoreError::InvalidInput("label must not be empty"));
    }
    Ok(label)
}

/// Reparenting must keep `parent_id` a forest: the new parent has to exist and must not sit
/// inside the subtree of the node being moved.
fn ensure_valid_parent_tx(conn: &Connection, node_id: &str, parent_id: &str) -> Result<(), StoreError> {
    if parent_id == node_id {
        return Err(StoreError::Validation(
            "a node cannot be its own parent".to_string(),
        ));
    }
    if !node_exists_tx(conn, parent_id)? {
        return Err(StoreError::Validation(format!(
            "parent node with id {parent_id} not found"
        )));
    }

    let mut visited = HashSet::new();
    let mut cursor = Some(parent_id.to_string());
    while let Some(current) = cursor {
        if current == node_id {
            return Err(StoreError::Validation(format!(
                "node {node_id} cannot be moved under its own descendant {parent_id}"
            )));
        }
        if !visited.insert(current.clone()) {
            break;
        }
        cursor = parent_of_tx(conn, &current)?;
    }
    Ok(())
}
