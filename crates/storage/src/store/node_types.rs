#![forbid(unsafe_code)]

use super::support::*;
use super::{CreateNodeTypeRequest, EntityKind, SqliteStore, StoreError};
use ng_core::graph::{DEFAULT_NODE_TYPES, NodeType, NodeTypeId};
use rusqlite::{OptionalExtension, params};

impl SqliteStore {
    /// Types are append-only. A name whose slug is already taken is rejected.
    pub fn create_node_type(&mut self, request: CreateNodeTypeRequest) -> Result<NodeType, StoreError> {
        let id = NodeTypeId::from_name(&request.name)
            .map_err(|err| StoreError::InvalidInput(err.message()))?;
        let color = request.color.trim().to_string();
        if color.is_empty() {
            return Err(StoreError::InvalidInput("color must not be empty"));
        }

        let now_ms = now_ms();
        let node_type = NodeType {
            id: id.into_string(),
            name: request.name.trim().to_string(),
            color,
            created_at_ms: now_ms,
            updated_at_ms: now_ms,
        };

        let tx = self.conn.transaction()?;
        if node_type_exists_tx(&tx, &node_type.id)? {
            return Err(StoreError::Validation(format!(
                "node type {} already exists",
                node_type.id
            )));
        }
        tx.execute(
            "INSERT INTO node_types(id, name, color, created_at_ms, updated_at_ms) VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                node_type.id,
                node_type.name,
                node_type.color,
                node_type.created_at_ms,
                node_type.updated_at_ms
            ],
        )?;
        tx.commit()?;
        tracing::debug!(type_id = %node_type.id, "node type created");
        Ok(node_type)
    }

    pub fn get_node_type(&self, id: &str) -> Result<NodeType, StoreError> {
        self.conn
            .query_row(
                &format!("SELECT {NODE_TYPE_COLUMNS} FROM node_types WHERE id=?1"),
                params![id],
                node_type_from_row,
            )
            .optional()?
            .ok_or_else(|| StoreError::not_found(EntityKind::NodeType, id))
    }

    pub fn list_node_types(&self) -> Result<Vec<NodeType>, StoreError> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {NODE_TYPE_COLUMNS} FROM node_types ORDER BY created_at_ms ASC, rowid ASC"
        ))?;
        let rows = stmt.query_map([], node_type_from_row)?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    pub(super) fn seed_default_node_types(&mut self) -> Result<(), StoreError> {
        let now_ms = now_ms();
        let tx = self.conn.transaction()?;
        let mut inserted = 0usize;
        for (name, color) in DEFAULT_NODE_TYPES {
            let id = NodeTypeId::from_name(name)
                .map_err(|err| StoreError::InvalidInput(err.message()))?;
            inserted += tx.execute(
                "INSERT OR IGNORE INTO node_types(id, name, color, created_at_ms, updated_at_ms) VALUES (?1, ?2, ?3, ?4, ?4)",
                params![id.as_str(), name, color, now_ms],
            )?;
        }
        tx.commit()?;
        if inserted > 0 {
            tracing::info!(inserted, "default node types installed");
        }
        Ok(())
    }
}
