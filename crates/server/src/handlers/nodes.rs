#![forbid(unsafe_code)]

use crate::*;
use ng_storage::{CreateNodeRequest, UpdateNodeRequest};
use serde_json::{Value, json};

impl GraphServer {
    pub(crate) fn handle_list_nodes(&mut self, args: Value) -> Value {
        let parent_id = match args.as_object() {
            Some(args) => match optional_string(args, "parent_id") {
                Ok(v) => v,
                Err(resp) => return resp,
            },
            None => None,
        };
        respond(self.store.render_nodes(parent_id.as_deref()))
    }

    pub(crate) fn handle_list_all_nodes(&mut self, _args: Value) -> Value {
        respond(self.store.render_all_nodes())
    }

    pub(crate) fn handle_get_node(&mut self, args: Value) -> Value {
        let args = match require_object(&args) {
            Ok(v) => v,
            Err(resp) => return resp,
        };
        let id = match require_string(args, "id") {
            Ok(v) => v,
            Err(resp) => return resp,
        };
        respond(self.store.render_node(&id))
    }

    pub(crate) fn handle_create_node(&mut self, args: Value) -> Value {
        let args = match require_object(&args) {
            Ok(v) => v,
            Err(resp) => return resp,
        };
        let request = match create_request(args) {
            Ok(v) => v,
            Err(resp) => return resp,
        };
        let created = self
            .store
            .create_node(request)
            .and_then(|node| self.store.render_node(&node.id));
        respond(created)
    }

    pub(crate) fn handle_update_node(&mut self, args: Value) -> Value {
        let args = match require_object(&args) {
            Ok(v) => v,
            Err(resp) => return resp,
        };
        let id = match require_string(args, "id") {
            Ok(v) => v,
            Err(resp) => return resp,
        };
        let request = match update_request(args) {
            Ok(v) => v,
            Err(resp) => return resp,
        };
        let updated = self
            .store
            .update_node(&id, request)
            .and_then(|node| self.store.render_node(&node.id));
        respond(updated)
    }

    pub(crate) fn handle_update_node_positions(&mut self, args: Value) -> Value {
        let args = match require_object(&args) {
            Ok(v) => v,
            Err(resp) => return resp,
        };
        let entries = match require_array(args, "positions") {
            Ok(v) => v,
            Err(resp) => return resp,
        };
        let mut moves = Vec::with_capacity(entries.len());
        for entry in entries {
            let Some(id) = entry.get("id").and_then(|v| v.as_str()) else {
                return envelope_error("INVALID_INPUT", "positions[].id is required");
            };
            let position = match entry.get("position") {
                Some(value) => match parse_position(value, "positions[].position") {
                    Ok(v) => v,
                    Err(resp) => return resp,
                },
                None => return envelope_error("INVALID_INPUT", "positions[].position is required"),
            };
            moves.push((id.to_string(), position));
        }

        let outcomes = self
            .store
            .update_node_positions(&moves)
            .into_iter()
            .map(|write| match write.result {
                Ok(()) => json!({ "id": write.node_id, "success": true }),
                Err(err) => json!({
                    "id": write.node_id,
                    "success": false,
                    "error": { "code": err.code(), "message": err.to_string() }
                }),
            })
            .collect::<Vec<_>>();
        envelope_ok(Value::Array(outcomes))
    }

    pub(crate) fn handle_delete_node(&mut self, args: Value) -> Value {
        let args = match require_object(&args) {
            Ok(v) => v,
            Err(resp) => return resp,
        };
        let id = match require_string(args, "id") {
            Ok(v) => v,
            Err(resp) => return resp,
        };
        match self.store.delete_node(&id) {
            Ok(report) => envelope_ok(json!({
                "id": id,
                "nodes_deleted": report.nodes_deleted,
                "links_deleted": report.links_deleted
            })),
            Err(err) => store_error(err),
        }
    }
}

fn create_request(args: &Args) -> Result<CreateNodeRequest, Value> {
    Ok(CreateNodeRequest {
        type_id: require_string(args, "type_id")?,
        label: require_string(args, "label")?,
        position: optional_position(args, "position")?.unwrap_or_default(),
        parent_id: optional_string(args, "parent_id")?,
        description: optional_string(args, "description")?,
        tags: optional_string_array(args, "tags")?.unwrap_or_default(),
        data: optional_data(args, "data")?.unwrap_or_default(),
    })
}

fn update_request(args: &Args) -> Result<UpdateNodeRequest, Value> {
    Ok(UpdateNodeRequest {
        type_id: optional_non_null_string(args, "type_id")?,
        label: optional_non_null_string(args, "label")?,
        description: optional_nullable_string(args, "description")?,
        parent_id: optional_nullable_string(args, "parent_id")?,
        position: optional_position(args, "position")?,
        tags: optional_string_array(args, "tags")?,
        data: optional_data(args, "data")?,
    })
}
