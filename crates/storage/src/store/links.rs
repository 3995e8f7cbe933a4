#![forbid(unsafe_code)]

use super::support::*;
use super::{CreateLinkRequest, EntityKind, SqliteStore, StoreError};
use ng_core::graph::Link;
use rusqlite::params;

impl SqliteStore {
    pub fn create_link(&mut self, request: CreateLinkRequest) -> Result<Link, StoreError> {
        let data = checked_data(request.data)?;
        let now_ms = now_ms();
        let tx = self.conn.transaction()?;

        if !node_exists_tx(&tx, &request.source_id)? || !node_exists_tx(&tx, &request.target_id)? {
            return Err(StoreError::Validation(
                "source or target node does not exist".to_string(),
            ));
        }

        let link = Link {
            id: uuid::Uuid::new_v4().to_string(),
            source_id: request.source_id,
            target_id: request.target_id,
            label: request.label,
            link_type: request.link_type,
            data,
            created_at_ms: now_ms,
            updated_at_ms: now_ms,
        };

        tx.execute(
            r#"
            INSERT INTO links(id, source_id, target_id, label, link_type, data_json, created_at_ms, updated_at_ms)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
            params![
                link.id,
                link.source_id,
                link.target_id,
                link.label,
                link.link_type,
                encode_data(&link.data)?,
                link.created_at_ms,
                link.updated_at_ms
            ],
        )?;

        tx.commit()?;
        tracing::debug!(link_id = %link.id, source = %link.source_id, target = %link.target_id, "link created");
        Ok(link)
    }

    pub fn delete_link(&mut self, id: &str) -> Result<(), StoreError> {
        let deleted = self
            .conn
            .execute("DELETE FROM links WHERE id=?1", params![id])?;
        if deleted == 0 {
            return Err(StoreError::not_found(EntityKind::Link, id));
        }
        tracing::debug!(link_id = %id, "link deleted");
        Ok(())
    }

    pub fn list_links(&self) -> Result<Vec<Link>, StoreError> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {LINK_COLUMNS} FROM links ORDER BY created_at_ms ASC, rowid ASC"
        ))?;
        let rows = stmt.query_map([], link_from_row)?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }
}
