#![forbid(unsafe_code)]

use super::super::StoreError;
use super::{decode_data, load_tags};
use ng_core::graph::{Link, Node, NodeType, Position};
use rusqlite::types::Type;
use rusqlite::{Connection, OptionalExtension, Row, params};

pub(in crate::store) const NODE_COLUMNS: &str =
    "id, type_id, label, description, parent_id, pos_x, pos_y, data_json, created_at_ms, updated_at_ms";

pub(in crate::store) const LINK_COLUMNS: &str =
    "id, source_id, target_id, label, link_type, data_json, created_at_ms, updated_at_ms";

pub(in crate::store) const NODE_TYPE_COLUMNS: &str = "id, name, color, created_at_ms, updated_at_ms";

fn data_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<ng_core::graph::DataBag> {
    let raw = row.get::<_, Option<String>>(idx)?;
    decode_data(raw.as_deref())
        .map_err(|err| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(err)))
}

/// Decodes a `NODE_COLUMNS` row. Tags live in their own table and are attached separately.
pub(in crate::store) fn node_from_row(row: &Row<'_>) -> rusqlite::Result<Node> {
    Ok(Node {
        id: row.get(0)?,
        type_id: row.get(1)?,
        label: row.get(2)?,
        description: row.get(3)?,
        parent_id: row.get(4)?,
        position: Position::new(row.get(5)?, row.get(6)?),
        tags: Vec::new(),
        data: data_column(row, 7)?,
        created_at_ms: row.get(8)?,
        updated_at_ms: row.get(9)?,
    })
}

pub(in crate::store) fn link_from_row(row: &Row<'_>) -> rusqlite::Result<Link> {
    Ok(Link {
        id: row.get(0)?,
        source_id: row.get(1)?,
        target_id: row.get(2)?,
        label: row.get(3)?,
        link_type: row.get(4)?,
        data: data_column(row, 5)?,
        created_at_ms: row.get(6)?,
        updated_at_ms: row.get(7)?,
    })
}

pub(in crate::store) fn node_type_from_row(row: &Row<'_>) -> rusqlite::Result<NodeType> {
    Ok(NodeType {
        id: row.get(0)?,
        name: row.get(1)?,
        color: row.get(2)?,
        created_at_ms: row.get(3)?,
        updated_at_ms: row.get(4)?,
    })
}

pub(in crate::store) fn attach_tags(conn: &Connection, nodes: &mut [Node]) -> Result<(), StoreError> {
    for node in nodes.iter_mut() {
        node.tags = load_tags(conn, &node.id)?;
    }
    Ok(())
}

pub(in crate::store) fn get_node_tx(conn: &Connection, id: &str) -> Result<Option<Node>, StoreError> {
    let node = conn
        .query_row(
            &format!("SELECT {NODE_COLUMNS} FROM nodes WHERE id=?1"),
            params![id],
            node_from_row,
        )
        .optional()?;
    let Some(mut node) = node else {
        return Ok(None);
    };
    node.tags = load_tags(conn, &node.id)?;
    Ok(Some(node))
}

pub(in crate::store) fn node_exists_tx(conn: &Connection, id: &str) -> Result<bool, StoreError> {
    Ok(conn
        .query_row("SELECT 1 FROM nodes WHERE id=?1", params![id], |_| Ok(()))
        .optional()?
        .is_some())
}

pub(in crate::store) fn node_type_exists_tx(conn: &Connection, id: &str) -> Result<bool, StoreError> {
    Ok(conn
        .query_row("SELECT 1 FROM node_types WHERE id=?1", params![id], |_| Ok(()))
        .optional()?
        .is_some())
}

pub(in crate::store) fn parent_of_tx(conn: &Connection, id: &str) -> Result<Option<String>, StoreError> {
    Ok(conn
        .query_row(
            "SELECT parent_id FROM nodes WHERE id=?1",
            params![id],
            |row| row.get::<_, Option<String>>(0),
        )
        .optional()?
        .flatten())
}

pub(in crate::store) fn child_ids_tx(conn: &Connection, parent_id: &str) -> Result<Vec<String>, StoreError> {
    let mut stmt =
        conn.prepare_cached("SELECT id FROM nodes WHERE parent_id=?1 ORDER BY created_at_ms, rowid")?;
    let rows = stmt.query_map(params![parent_id], |row| row.get::<_, String>(0))?;
    Ok(rows.collect::<Result<Vec<_>, _>>()?)
}
