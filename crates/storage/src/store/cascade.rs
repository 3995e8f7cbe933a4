#![forbid(unsafe_code)]

use super::support::*;
use super::{DeleteReport, EntityKind, SqliteStore, StoreError};
use rusqlite::{Connection, params};
use std::collections::HashSet;

impl SqliteStore {
    /// Deletes a node, every node contained in it (at any depth) and every link touching any of
    /// them. All of it happens in one transaction; on failure nothing is removed.
    pub fn delete_node(&mut self, id: &str) -> Result<DeleteReport, StoreError> {
        let tx = self.conn.transaction()?;
        if !node_exists_tx(&tx, id)? {
            return Err(StoreError::not_found(EntityKind::Node, id));
        }

        let report = match delete_subtree_tx(&tx, id) {
            Ok(report) => report,
            Err(err) => {
                tracing::warn!(node_id = %id, error = %err, "cascading delete rolled back");
                return Err(StoreError::Transaction {
                    node_id: id.to_string(),
                    source: Box::new(err),
                });
            }
        };

        if let Err(err) = tx.commit() {
            tracing::warn!(node_id = %id, error = %err, "cascading delete commit failed");
            return Err(StoreError::Transaction {
                node_id: id.to_string(),
                source: Box::new(err.into()),
            });
        }

        tracing::info!(
            node_id = %id,
            nodes = report.nodes_deleted,
            links = report.links_deleted,
            "node subtree deleted"
        );
        Ok(report)
    }
}

/// Containment subtree rooted at `root_id` in pre-order (parents before children). Walks with an
/// explicit stack and a visited set, so deep or malformed cyclic chains terminate.
pub(in crate::store) fn collect_subtree_ids_tx(
    conn: &Connection,
    root_id: &str,
) -> Result<Vec<String>, StoreError> {
    let mut out = Vec::new();
    let mut visited = HashSet::new();
    let mut stack = vec![root_id.to_string()];
    while let Some(current) = stack.pop() {
        if !visited.insert(current.clone()) {
            tracing::warn!(node_id = %current, "parent cycle detected during subtree walk");
            continue;
        }
        let children = child_ids_tx(conn, &current)?;
        out.push(current);
        // Reverse so the first child is popped first.
        stack.extend(children.into_iter().rev());
    }
    Ok(out)
}

fn delete_subtree_tx(conn: &Connection, root_id: &str) -> Result<DeleteReport, StoreError> {
    let ids = collect_subtree_ids_tx(conn, root_id)?;

    let mut report = DeleteReport::default();
    for id in ids.iter() {
        report.links_deleted += conn.execute(
            "DELETE FROM links WHERE source_id=?1 OR target_id=?1",
            params![id],
        )?;
    }
    for id in ids.iter().rev() {
        conn.execute("DELETE FROM node_tags WHERE node_id=?1", params![id])?;
        report.nodes_deleted += conn.execute("DELETE FROM nodes WHERE id=?1", params![id])?;
    }
    Ok(report)
}
