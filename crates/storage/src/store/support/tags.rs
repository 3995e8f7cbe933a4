#![forbid(unsafe_code)]

use super::super::StoreError;
use ng_core::graph::validate_tags;
use rusqlite::{Connection, params};

pub(in crate::store) fn checked_tags(tags: Vec<String>) -> Result<Vec<String>, StoreError> {
    validate_tags(&tags).map_err(|err| StoreError::InvalidInput(err.message()))?;
    Ok(tags)
}

pub(in crate::store) fn load_tags(conn: &Connection, node_id: &str) -> Result<Vec<String>, StoreError> {
    let mut stmt =
        conn.prepare_cached("SELECT tag FROM node_tags WHERE node_id=?1 ORDER BY ordinal ASC")?;
    let rows = stmt.query_map(params![node_id], |row| row.get::<_, String>(0))?;
    Ok(rows.collect::<Result<Vec<_>, _>>()?)
}

/// Replaces the stored tag list of a node, keeping order and repeats.
pub(in crate::store) fn write_tags(
    conn: &Connection,
    node_id: &str,
    tags: &[String],
) -> Result<(), StoreError> {
    conn.execute("DELETE FROM node_tags WHERE node_id=?1", params![node_id])?;
    let mut stmt =
        conn.prepare_cached("INSERT INTO node_tags(node_id, ordinal, tag) VALUES (?1, ?2, ?3)")?;
    for (ordinal, tag) in tags.iter().enumerate() {
        stmt.execute(params![node_id, ordinal as i64, tag])?;
    }
    Ok(())
}
