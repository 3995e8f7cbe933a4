#![forbid(unsafe_code)]

mod support;

use serde_json::json;
use support::Server;

#[test]
fn initialize_and_ping() {
    let mut server = Server::start();
    let init = server.request(json!({ "jsonrpc": "2.0", "id": 1, "method": "initialize" }));
    assert_eq!(init["result"]["serverInfo"]["name"], "nestgraph");

    let pong = server.request(json!({ "jsonrpc": "2.0", "id": "p", "method": "ping" }));
    assert_eq!(pong["id"], "p");
    assert_eq!(pong["result"], json!({}));
}

#[test]
fn methods_list_describes_every_method() {
    let mut server = Server::start();
    let resp = server.request(json!({ "jsonrpc": "2.0", "id": 1, "method": "methods/list" }));
    let names = resp["result"]["methods"]
        .as_array()
        .expect("methods array")
        .iter()
        .filter_map(|m| m["name"].as_str())
        .collect::<Vec<_>>();
    for expected in [
        "create_link",
        "create_node",
        "create_node_type",
        "delete_link",
        "delete_node",
        "get_graph",
        "get_node",
        "list_all_nodes",
        "list_links",
        "list_node_types",
        "list_nodes",
        "update_node",
        "update_node_positions",
    ] {
        assert!(names.contains(&expected), "missing {expected}");
    }
}

#[test]
fn protocol_errors_do_not_kill_the_server() {
    let mut server = Server::start();
    server.send_raw("{not json");
    let parse = server.recv();
    assert_eq!(parse["error"]["code"], -32700);

    let unknown = server.request(json!({ "jsonrpc": "2.0", "id": 9, "method": "drop_tables" }));
    assert_eq!(unknown["error"]["code"], -32601);

    // Notification: no response; the next request still gets its own answer.
    server.send(json!({ "jsonrpc": "2.0", "method": "ping" }));
    let pong = server.request(json!({ "jsonrpc": "2.0", "id": 10, "method": "ping" }));
    assert_eq!(pong["id"], 10);
}

#[test]
fn bad_params_yield_invalid_input_envelope() {
    let mut server = Server::start();
    let resp = server.call("create_node", json!({ "label": "no type" }));
    assert_eq!(resp["success"], false);
    assert_eq!(resp["error"]["code"], "INVALID_INPUT");

    let resp = server.call("get_node", json!("not an object"));
    assert_eq!(resp["error"]["code"], "INVALID_INPUT");
}

#[test]
fn no_seed_starts_without_types() {
    let mut server = Server::start_with_args(&["--no-seed"]);
    let types = server.call_ok("list_node_types", json!({}));
    assert_eq!(types, json!([]));
}

#[test]
fn graph_survives_restart() {
    let mut server = Server::start();
    let id = server.create_node("Durable", None);
    let storage = server.shutdown();
    assert!(storage.path().join("nestgraph.db").exists());

    let mut server = Server::start_in(storage, &[]);
    let node = server.call_ok("get_node", json!({ "id": id }));
    assert_eq!(node["data"]["label"], "Durable");
}

#[test]
fn in_memory_mode_leaves_storage_untouched() {
    let mut server = Server::start_with_args(&["--in-memory"]);
    server.create_node("Ephemeral", None);
    assert!(!server.storage_path().join("nestgraph.db").exists());
}
