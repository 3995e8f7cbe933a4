#![forbid(unsafe_code)]

use crate::*;
use ng_storage::CreateLinkRequest;
use serde_json::{Value, json};

impl GraphServer {
    pub(crate) fn handle_list_links(&mut self, _args: Value) -> Value {
        respond(self.store.list_links())
    }

    pub(crate) fn handle_create_link(&mut self, args: Value) -> Value {
        let args = match require_object(&args) {
            Ok(v) => v,
            Err(resp) => return resp,
        };
        let request = match link_request(args) {
            Ok(v) => v,
            Err(resp) => return resp,
        };
        respond(self.store.create_link(request))
    }

    pub(crate) fn handle_delete_link(&mut self, args: Value) -> Value {
        let args = match require_object(&args) {
            Ok(v) => v,
            Err(resp) => return resp,
        };
        let id = match require_string(args, "id") {
            Ok(v) => v,
            Err(resp) => return resp,
        };
        match self.store.delete_link(&id) {
            Ok(()) => envelope_ok(json!({ "id": id })),
            Err(err) => store_error(err),
        }
    }
}

fn link_request(args: &Args) -> Result<CreateLinkRequest, Value> {
    Ok(CreateLinkRequest {
        source_id: require_string(args, "source_id")?,
        target_id: require_string(args, "target_id")?,
        label: optional_string(args, "label")?,
        link_type: optional_string(args, "type")?,
        data: optional_data(args, "data")?.unwrap_or_default(),
    })
}
