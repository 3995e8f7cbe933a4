#![forbid(unsafe_code)]

//! Read side: scoped node lists and the renderer view of a subgraph.

use super::support::*;
use super::{SqliteStore, StoreError};
use ng_core::graph::{GraphView, Link, Node, NodeType, RenderNode, render_edge, render_node};
use rusqlite::{params, params_from_iter};
use std::collections::HashMap;

impl SqliteStore {
    /// Direct children of `parent_id`, or the root nodes when no parent is given. Never returns
    /// grandchildren.
    pub fn list_nodes(&self, parent_id: Option<&str>) -> Result<Vec<Node>, StoreError> {
        let parent_id = parent_id.filter(|p| !p.trim().is_empty());
        let mut nodes = match parent_id {
            Some(parent_id) => {
                let mut stmt = self.conn.prepare(&format!(
                    "SELECT {NODE_COLUMNS} FROM nodes WHERE parent_id=?1 ORDER BY created_at_ms ASC, rowid ASC"
                ))?;
                let rows = stmt.query_map(params![parent_id], node_from_row)?;
                rows.collect::<Result<Vec<_>, _>>()?
            }
            None => {
                let mut stmt = self.conn.prepare(&format!(
                    "SELECT {NODE_COLUMNS} FROM nodes WHERE parent_id IS NULL ORDER BY created_at_ms ASC, rowid ASC"
                ))?;
                let rows = stmt.query_map([], node_from_row)?;
                rows.collect::<Result<Vec<_>, _>>()?
            }
        };
        attach_tags(&self.conn, &mut nodes)?;
        Ok(nodes)
    }

    pub fn list_all_nodes(&self) -> Result<Vec<Node>, StoreError> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {NODE_COLUMNS} FROM nodes ORDER BY created_at_ms ASC, rowid ASC"
        ))?;
        let rows = stmt.query_map([], node_from_row)?;
        let mut nodes = rows.collect::<Result<Vec<_>, _>>()?;
        attach_tags(&self.conn, &mut nodes)?;
        Ok(nodes)
    }

    /// Every link with at least one endpoint among `node_ids`. The other endpoint may lie outside
    /// the set.
    pub fn links_touching(&self, node_ids: &[String]) -> Result<Vec<Link>, StoreError> {
        if node_ids.is_empty() {
            return Ok(Vec::new());
        }
        let placeholders = (1..=node_ids.len())
            .map(|i| format!("?{i}"))
            .collect::<Vec<_>>()
            .join(",");
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {LINK_COLUMNS} FROM links \
             WHERE source_id IN ({placeholders}) OR target_id IN ({placeholders}) \
             ORDER BY created_at_ms ASC, rowid ASC"
        ))?;
        let rows = stmt.query_map(params_from_iter(node_ids.iter()), link_from_row)?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    pub fn render_node(&self, id: &str) -> Result<RenderNode, StoreError> {
        let node = self.get_node(id)?;
        let types = self.node_type_index()?;
        Ok(render_node(&node, types.get(&node.type_id)))
    }

    /// Renderer shape of `list_nodes`.
    pub fn render_nodes(&self, parent_id: Option<&str>) -> Result<Vec<RenderNode>, StoreError> {
        let types = self.node_type_index()?;
        Ok(self
            .list_nodes(parent_id)?
            .iter()
            .map(|node| render_node(node, types.get(&node.type_id)))
            .collect())
    }

    /// Every node in the store, each carrying its parent id and the parent's label.
    pub fn render_all_nodes(&self) -> Result<Vec<RenderNode>, StoreError> {
        let types = self.node_type_index()?;
        let nodes = self.list_all_nodes()?;
        let labels = nodes
            .iter()
            .map(|node| (node.id.as_str(), node.label.as_str()))
            .collect::<HashMap<_, _>>();

        Ok(nodes
            .iter()
            .map(|node| {
                let mut rendered = render_node(node, types.get(&node.type_id));
                if let Some(parent_id) = node.parent_id.as_deref() {
                    rendered.parent_node = Some(parent_id.to_string());
                    rendered.data.parent_name =
                        labels.get(parent_id).map(|label| label.to_string());
                }
                rendered
            })
            .collect())
    }

    /// Nodes of one subgraph plus every link touching them. Edges may reference nodes that are
    /// not in `nodes`; renderers have to tolerate that.
    pub fn get_graph(&self, parent_id: Option<&str>) -> Result<GraphView, StoreError> {
        let types = self.node_type_index()?;
        let nodes = self.list_nodes(parent_id)?;
        let ids = nodes.iter().map(|node| node.id.clone()).collect::<Vec<_>>();
        let links = self.links_touching(&ids)?;

        Ok(GraphView {
            nodes: nodes
                .iter()
                .map(|node| render_node(node, types.get(&node.type_id)))
                .collect(),
            edges: links.iter().map(render_edge).collect(),
        })
    }

    fn node_type_index(&self) -> Result<HashMap<String, NodeType>, StoreError> {
        Ok(self
            .list_node_types()?
            .into_iter()
            .map(|node_type| (node_type.id.clone(), node_type))
            .collect())
    }
}
