#![forbid(unsafe_code)]
#![allow(dead_code)]

use ng_core::graph::{DataBag, Position};
use ng_storage::{CreateLinkRequest, CreateNodeRequest, SqliteStore, StoreOptions};
use ng_core::graph::{Link, Node};
use tempfile::TempDir;

pub struct TestStore {
    pub store: SqliteStore,
    pub dir: TempDir,
}

pub fn open_store() -> TestStore {
    let dir = tempfile::tempdir().expect("temp dir");
    let store = SqliteStore::open_with(dir.path(), StoreOptions::default()).expect("open store");
    TestStore { store, dir }
}

pub fn node_request(label: &str, parent_id: Option<&str>) -> CreateNodeRequest {
    CreateNodeRequest {
        type_id: "task".to_string(),
        label: label.to_string(),
        position: Position::new(0.0, 0.0),
        parent_id: parent_id.map(str::to_string),
        description: None,
        tags: Vec::new(),
        data: DataBag::new(),
    }
}

pub fn create_node(store: &mut SqliteStore, label: &str, parent_id: Option<&str>) -> Node {
    store
        .create_node(node_request(label, parent_id))
        .expect("create node")
}

pub fn link(store: &mut SqliteStore, source: &Node, target: &Node) -> Link {
    store
        .create_link(CreateLinkRequest {
            source_id: source.id.clone(),
            target_id: target.id.clone(),
            ..CreateLinkRequest::default()
        })
        .expect("create link")
}
