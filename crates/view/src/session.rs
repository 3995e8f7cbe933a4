#![forbid(unsafe_code)]

//! Graph canvas session: the nodes and edges of the open subgraph, kept in step with the store.
//!
//! Edits are applied locally first. When the store refuses one (or cannot be reached) the
//! session reloads the subgraph, so local state never stays ahead of the store, and records a
//! user-facing message in `last_error`.

use crate::api::{GraphApi, NewLink, NewNode, NodePatch};
use crate::navigation::NavigationStack;
use crate::SessionError;
use ng_core::graph::{
    GraphView, NodeType, Position, RenderEdge, RenderNode, dedupe_tags, render_edge,
};

pub struct GraphSession<A> {
    api: A,
    navigation: NavigationStack,
    nodes: Vec<RenderNode>,
    edges: Vec<RenderEdge>,
    node_types: Vec<NodeType>,
    last_error: Option<String>,
}

impl<A: GraphApi> GraphSession<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            navigation: NavigationStack::new(),
            nodes: Vec::new(),
            edges: Vec::new(),
            node_types: Vec::new(),
            last_error: None,
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn api_mut(&mut self) -> &mut A {
        &mut self.api
    }

    pub fn navigation(&self) -> &NavigationStack {
        &self.navigation
    }

    pub fn current_parent_id(&self) -> Option<&str> {
        self.navigation.current_parent_id()
    }

    pub fn nodes(&self) -> &[RenderNode] {
        &self.nodes
    }

    pub fn edges(&self) -> &[RenderEdge] {
        &self.edges
    }

    pub fn node_types(&self) -> &[NodeType] {
        &self.node_types
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn clear_error(&mut self) {
        self.last_error = None;
    }

    fn fail(&mut self, err: SessionError, generic: &str) -> SessionError {
        tracing::warn!(error = %err, "{generic}");
        self.last_error = Some(err.user_message(generic));
        err
    }

    /// Re-reads the open subgraph.
    pub fn load(&mut self) -> Result<(), SessionError> {
        let parent_id = self.navigation.current_parent_id().map(str::to_string);
        match self.api.get_graph(parent_id.as_deref()) {
            Ok(view) => {
                self.apply_view(view);
                self.last_error = None;
                Ok(())
            }
            Err(err) => Err(self.fail(err, "Error loading graph data")),
        }
    }

    /// Best-effort resync after a failed edit. The edit's error is the one reported.
    fn resync(&mut self) {
        let parent_id = self.navigation.current_parent_id().map(str::to_string);
        match self.api.get_graph(parent_id.as_deref()) {
            Ok(view) => self.apply_view(view),
            Err(err) => tracing::warn!(error = %err, "graph reload failed"),
        }
    }

    /// Inside a subgraph the parent reference is dropped from each node, since the parent
    /// itself is not on the canvas.
    fn apply_view(&mut self, view: GraphView) {
        self.nodes = view.nodes;
        if !self.navigation.is_root() {
            for node in &mut self.nodes {
                node.parent_node = None;
            }
        }
        self.edges = view.edges;
    }

    pub fn load_node_types(&mut self) -> Result<(), SessionError> {
        match self.api.list_node_types() {
            Ok(types) => {
                self.node_types = types;
                Ok(())
            }
            Err(err) => Err(self.fail(err, "Error loading node types")),
        }
    }

    pub fn create_node_type(&mut self, name: &str, color: &str) -> Result<NodeType, SessionError> {
        match self.api.create_node_type(name, color) {
            Ok(node_type) => {
                self.node_types.push(node_type.clone());
                Ok(node_type)
            }
            Err(err) => Err(self.fail(err, "Error creating node type")),
        }
    }

    /// Every node in the store, for the table view.
    pub fn all_nodes(&mut self) -> Result<Vec<RenderNode>, SessionError> {
        self.api
            .list_all_nodes()
            .map_err(|err| self.fail(err, "Failed to fetch all nodes"))
    }

    pub fn navigate_into(
        &mut self,
        node_id: impl Into<String>,
        label: impl Into<String>,
    ) -> Result<(), SessionError> {
        self.navigation.navigate_into(node_id, label);
        self.load()
    }

    pub fn navigate_up(&mut self) -> Result<(), SessionError> {
        self.navigation.navigate_up();
        self.load()
    }

    /// Creates a node inside the open subgraph; `node.parent_id` is overwritten.
    pub fn add_node(&mut self, mut node: NewNode) -> Result<RenderNode, SessionError> {
        node.parent_id = self.navigation.current_parent_id().map(str::to_string);
        node.tags = dedupe_tags(&node.tags);
        match self.api.create_node(&node) {
            Ok(mut created) => {
                created.parent_node = None;
                self.nodes.push(created.clone());
                Ok(created)
            }
            Err(err) => Err(self.fail(err, "Error creating node. Please try again.")),
        }
    }

    /// Applies every patched field locally, then writes. Tags are de-duplicated before they are
    /// sent; the store keeps whatever list it receives.
    pub fn update_node(&mut self, id: &str, mut patch: NodePatch) -> Result<RenderNode, SessionError> {
        if let Some(tags) = patch.tags.as_mut() {
            *tags = dedupe_tags(tags);
        }
        if let Some(local) = self.nodes.iter_mut().find(|node| node.id == id) {
            apply_patch(local, &patch, &self.node_types);
        }
        match self.api.update_node(id, &patch) {
            Ok(mut updated) => {
                let current = self.navigation.current_parent_id();
                let leaves_view = patch
                    .parent_id
                    .as_ref()
                    .is_some_and(|parent| parent.as_deref() != current);
                if leaves_view {
                    self.nodes.retain(|node| node.id != id);
                } else if let Some(local) = self.nodes.iter_mut().find(|node| node.id == id) {
                    if self.navigation.current_parent_id().is_some() {
                        updated.parent_node = None;
                    }
                    *local = updated.clone();
                }
                Ok(updated)
            }
            Err(err) => {
                let err = self.fail(err, "Error updating node");
                self.resync();
                Err(err)
            }
        }
    }

    /// Drag end. Positions change locally at once; the writes are independent and any refusal
    /// triggers a reload.
    pub fn move_nodes(&mut self, moves: &[(String, Position)]) -> Result<(), SessionError> {
        for (id, position) in moves {
            if let Some(node) = self.nodes.iter_mut().find(|node| &node.id == id) {
                node.position = *position;
            }
        }
        match self.api.update_node_positions(moves) {
            Ok(outcomes) => {
                let failed = outcomes.iter().filter(|o| !o.success).count();
                if failed > 0 {
                    tracing::warn!(failed, "some position updates were refused");
                    self.last_error = Some(format!("{failed} position update(s) failed"));
                    self.resync();
                }
                Ok(())
            }
            Err(err) => {
                let err = self.fail(err, "Error saving node positions");
                self.resync();
                Err(err)
            }
        }
    }

    /// Removes the node and its edges at once. The store also drops the node's descendants and
    /// their links, which the canvas cannot see, so the subgraph is re-read afterwards.
    pub fn delete_node(&mut self, id: &str) -> Result<(), SessionError> {
        self.nodes.retain(|node| node.id != id);
        self.edges
            .retain(|edge| edge.source != id && edge.target != id);
        match self.api.delete_node(id) {
            Ok(()) => {
                self.resync();
                Ok(())
            }
            Err(err) => {
                let err = self.fail(err, "Error deleting node");
                self.resync();
                Err(err)
            }
        }
    }

    pub fn connect(
        &mut self,
        source_id: &str,
        target_id: &str,
        label: Option<String>,
    ) -> Result<RenderEdge, SessionError> {
        let link = NewLink {
            source_id: source_id.to_string(),
            target_id: target_id.to_string(),
            label,
            link_type: None,
        };
        match self.api.create_link(&link) {
            Ok(created) => {
                let edge = render_edge(&created);
                self.edges.push(edge.clone());
                Ok(edge)
            }
            Err(err) => {
                let err = self.fail(err, "Error creating link");
                self.resync();
                Err(err)
            }
        }
    }

    pub fn disconnect(&mut self, edge_id: &str) -> Result<(), SessionError> {
        self.edges.retain(|edge| edge.id != edge_id);
        match self.api.delete_link(edge_id) {
            Ok(()) => Ok(()),
            Err(err) => {
                let err = self.fail(err, "Error deleting link");
                self.resync();
                Err(err)
            }
        }
    }
}

fn apply_patch(node: &mut RenderNode, patch: &NodePatch, node_types: &[NodeType]) {
    if let Some(type_id) = &patch.type_id {
        let node_type = node_types.iter().find(|t| &t.id == type_id);
        node.data.set_type(type_id, node_type);
    }
    if let Some(label) = &patch.label {
        node.data.label = label.clone();
    }
    if let Some(description) = &patch.description {
        node.data.description = description.clone().unwrap_or_default();
    }
    if let Some(position) = patch.position {
        node.position = position;
    }
    if let Some(tags) = &patch.tags {
        node.data.tags = tags.clone();
    }
    if let Some(data) = &patch.data {
        node.data.merge_extra(data.clone());
    }
}
