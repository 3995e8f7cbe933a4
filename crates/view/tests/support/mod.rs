#![forbid(unsafe_code)]
#![allow(dead_code)]

use ng_core::graph::{GraphView, Link, NodeType, Position, RenderNode};
use ng_storage::{
    CreateLinkRequest, CreateNodeRequest, CreateNodeTypeRequest, SqliteStore, StoreError,
    StoreOptions, UpdateNodeRequest,
};
use ng_view::{
    GraphApi, NewLink, NewNode, NodePatch, PositionOutcome, SessionError, TransportError,
    api::ApiErrorBody,
};
use std::collections::HashSet;

/// `GraphApi` straight onto an in-memory store, with switchable transport failures.
pub struct StoreApi {
    pub store: SqliteStore,
    pub offline: HashSet<&'static str>,
    pub calls: Vec<&'static str>,
}

impl StoreApi {
    pub fn new() -> Self {
        Self {
            store: SqliteStore::open_in_memory(StoreOptions::default()).expect("open store"),
            offline: HashSet::new(),
            calls: Vec::new(),
        }
    }

    pub fn go_offline(&mut self, method: &'static str) {
        self.offline.insert(method);
    }

    pub fn seed_node(&mut self, label: &str, parent_id: Option<&str>, tags: &[&str]) -> String {
        self.store
            .create_node(CreateNodeRequest {
                type_id: "task".to_string(),
                label: label.to_string(),
                parent_id: parent_id.map(str::to_string),
                tags: tags.iter().map(|t| t.to_string()).collect(),
                ..CreateNodeRequest::default()
            })
            .expect("seed node")
            .id
    }

    pub fn seed_link(&mut self, source: &str, target: &str) -> String {
        self.store
            .create_link(CreateLinkRequest {
                source_id: source.to_string(),
                target_id: target.to_string(),
                ..CreateLinkRequest::default()
            })
            .expect("seed link")
            .id
    }

    fn enter(&mut self, method: &'static str) -> Result<(), SessionError> {
        self.calls.push(method);
        if self.offline.contains(method) {
            return Err(TransportError::Closed.into());
        }
        Ok(())
    }
}

fn rejected(err: StoreError) -> SessionError {
    SessionError::Rejected {
        code: err.code().to_string(),
        message: err.to_string(),
    }
}

impl GraphApi for StoreApi {
    fn list_node_types(&mut self) -> Result<Vec<NodeType>, SessionError> {
        self.enter("list_node_types")?;
        self.store.list_node_types().map_err(rejected)
    }

    fn create_node_type(&mut self, name: &str, color: &str) -> Result<NodeType, SessionError> {
        self.enter("create_node_type")?;
        self.store
            .create_node_type(CreateNodeTypeRequest {
                name: name.to_string(),
                color: color.to_string(),
            })
            .map_err(rejected)
    }

    fn get_graph(&mut self, parent_id: Option<&str>) -> Result<GraphView, SessionError> {
        self.enter("get_graph")?;
        self.store.get_graph(parent_id).map_err(rejected)
    }

    fn list_all_nodes(&mut self) -> Result<Vec<RenderNode>, SessionError> {
        self.enter("list_all_nodes")?;
        self.store.render_all_nodes().map_err(rejected)
    }

    fn create_node(&mut self, node: &NewNode) -> Result<RenderNode, SessionError> {
        self.enter("create_node")?;
        let created = self
            .store
            .create_node(CreateNodeRequest {
                type_id: node.type_id.clone(),
                label: node.label.clone(),
                position: node.position,
                parent_id: node.parent_id.clone(),
                description: node.description.clone(),
                tags: node.tags.clone(),
                data: node.data.clone(),
            })
            .map_err(rejected)?;
        self.store.render_node(&created.id).map_err(rejected)
    }

    fn update_node(&mut self, id: &str, patch: &NodePatch) -> Result<RenderNode, SessionError> {
        self.enter("update_node")?;
        let request = UpdateNodeRequest {
            type_id: patch.type_id.clone(),
            label: patch.label.clone(),
            description: patch.description.clone(),
            parent_id: patch.parent_id.clone(),
            position: patch.position,
            tags: patch.tags.clone(),
            data: patch.data.clone(),
        };
        let updated = self.store.update_node(id, request).map_err(rejected)?;
        self.store.render_node(&updated.id).map_err(rejected)
    }

    fn update_node_positions(
        &mut self,
        moves: &[(String, Position)],
    ) -> Result<Vec<PositionOutcome>, SessionError> {
        self.enter("update_node_positions")?;
        Ok(self
            .store
            .update_node_positions(moves)
            .into_iter()
            .map(|write| PositionOutcome {
                id: write.node_id,
                success: write.result.is_ok(),
                error: write.result.err().map(|err| ApiErrorBody {
                    code: err.code().to_string(),
                    message: err.to_string(),
                }),
            })
            .collect())
    }

    fn delete_node(&mut self, id: &str) -> Result<(), SessionError> {
        self.enter("delete_node")?;
        self.store.delete_node(id).map(|_| ()).map_err(rejected)
    }

    fn create_link(&mut self, link: &NewLink) -> Result<Link, SessionError> {
        self.enter("create_link")?;
        self.store
            .create_link(CreateLinkRequest {
                source_id: link.source_id.clone(),
                target_id: link.target_id.clone(),
                label: link.label.clone(),
                link_type: link.link_type.clone(),
                ..CreateLinkRequest::default()
            })
            .map_err(rejected)
    }

    fn delete_link(&mut self, id: &str) -> Result<(), SessionError> {
        self.enter("delete_link")?;
        self.store.delete_link(id).map_err(rejected)
    }
}
