#![forbid(unsafe_code)]

use serde_json::{Value, json};

fn position_schema() -> Value {
    json!({
        "type": "object",
        "properties": { "x": { "type": "number" }, "y": { "type": "number" } },
        "required": ["x", "y"]
    })
}

fn id_only(description: &str) -> Value {
    json!({
        "type": "object",
        "properties": { "id": { "type": "string", "description": description } },
        "required": ["id"]
    })
}

fn parent_filter() -> Value {
    json!({
        "type": "object",
        "properties": {
            "parent_id": { "type": ["string", "null"], "description": "Omit for root nodes." }
        },
        "required": []
    })
}

pub(crate) fn handler_definitions() -> Vec<Value> {
    let mut defs = vec![
        json!({
            "name": "list_node_types",
            "description": "List node types in creation order.",
            "paramsSchema": { "type": "object", "properties": {}, "required": [] }
        }),
        json!({
            "name": "create_node_type",
            "description": "Create a node type; the id is derived from the name and must be unused.",
            "paramsSchema": {
                "type": "object",
                "properties": {
                    "name": { "type": "string" },
                    "color": { "type": "string" }
                },
                "required": ["name", "color"]
            }
        }),
        json!({
            "name": "list_nodes",
            "description": "Direct children of parent_id (root nodes when omitted), renderer shape.",
            "paramsSchema": parent_filter()
        }),
        json!({
            "name": "list_all_nodes",
            "description": "Every node, with parentNode and parentName attached.",
            "paramsSchema": { "type": "object", "properties": {}, "required": [] }
        }),
        json!({
            "name": "get_node",
            "description": "One node in renderer shape.",
            "paramsSchema": id_only("Node id.")
        }),
        json!({
            "name": "create_node",
            "description": "Create a node, optionally inside parent_id.",
            "paramsSchema": {
                "type": "object",
                "properties": {
                    "type_id": { "type": "string" },
                    "label": { "type": "string" },
                    "position": position_schema(),
                    "parent_id": { "type": ["string", "null"] },
                    "description": { "type": ["string", "null"] },
                    "tags": { "type": "array", "items": { "type": "string" } },
                    "data": { "type": "object" }
                },
                "required": ["type_id", "label"]
            }
        }),
        json!({
            "name": "update_node",
            "description": "Partial update. data is merged shallowly; null values remove keys.",
            "paramsSchema": {
                "type": "object",
                "properties": {
                    "id": { "type": "string" },
                    "type_id": { "type": "string" },
                    "label": { "type": "string" },
                    "position": position_schema(),
                    "parent_id": { "type": ["string", "null"] },
                    "description": { "type": ["string", "null"] },
                    "tags": { "type": "array", "items": { "type": "string" } },
                    "data": { "type": "object" }
                },
                "required": ["id"]
            }
        }),
        json!({
            "name": "update_node_positions",
            "description": "Best-effort position writes; each entry succeeds or fails on its own.",
            "paramsSchema": {
                "type": "object",
                "properties": {
                    "positions": {
                        "type": "array",
                        "items": {
                            "type": "object",
                            "properties": {
                                "id": { "type": "string" },
                                "position": position_schema()
                            },
                            "required": ["id", "position"]
                        }
                    }
                },
                "required": ["positions"]
            }
        }),
        json!({
            "name": "delete_node",
            "description": "Delete a node, its whole subtree and every link touching them, atomically.",
            "paramsSchema": id_only("Node id.")
        }),
        json!({
            "name": "list_links",
            "description": "Every link in creation order.",
            "paramsSchema": { "type": "object", "properties": {}, "required": [] }
        }),
        json!({
            "name": "create_link",
            "description": "Create a directed link between two existing nodes.",
            "paramsSchema": {
                "type": "object",
                "properties": {
                    "source_id": { "type": "string" },
                    "target_id": { "type": "string" },
                    "label": { "type": ["string", "null"] },
                    "type": { "type": ["string", "null"] },
                    "data": { "type": "object" }
                },
                "required": ["source_id", "target_id"]
            }
        }),
        json!({
            "name": "delete_link",
            "description": "Delete one link.",
            "paramsSchema": id_only("Link id.")
        }),
        json!({
            "name": "get_graph",
            "description": "Nodes of one subgraph plus every edge touching them (edges may point outside).",
            "paramsSchema": parent_filter()
        }),
    ];
    defs.sort_by_key(|def| {
        def.get("name")
            .and_then(|v| v.as_str())
            .unwrap_or("")
            .to_string()
    });
    defs
}
