#![forbid(unsafe_code)]

use crate::*;
use ng_storage::CreateNodeTypeRequest;
use serde_json::Value;

impl GraphServer {
    pub(crate) fn handle_list_node_types(&mut self, _args: Value) -> Value {
        respond(self.store.list_node_types())
    }

    pub(crate) fn handle_create_node_type(&mut self, args: Value) -> Value {
        let args = match require_object(&args) {
            Ok(v) => v,
            Err(resp) => return resp,
        };
        let name = match require_string(args, "name") {
            Ok(v) => v,
            Err(resp) => return resp,
        };
        let color = match require_string(args, "color") {
            Ok(v) => v,
            Err(resp) => return resp,
        };
        respond(
            self.store
                .create_node_type(CreateNodeTypeRequest { name, color }),
        )
    }
}
