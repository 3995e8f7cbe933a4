#![forbid(unsafe_code)]

use crate::handlers::{dispatch_handler, handler_definitions};
use crate::{
    JsonRpcRequest, METHOD_NOT_FOUND, SERVER_NAME, SERVER_VERSION, json_rpc_error,
    json_rpc_response,
};
use ng_storage::SqliteStore;
use serde_json::{Value, json};

pub(crate) struct GraphServer {
    pub(crate) store: SqliteStore,
}

impl GraphServer {
    pub(crate) fn new(store: SqliteStore) -> Self {
        Self { store }
    }

    /// Handles one request. Notifications (no id) never get a response.
    pub(crate) fn handle(&mut self, request: JsonRpcRequest) -> Option<Value> {
        let notification = request.is_notification();
        let JsonRpcRequest {
            method, id, params, ..
        } = request;
        tracing::debug!(method = %method, "dispatch");

        let result = match method.as_str() {
            "initialize" => json!({
                "serverInfo": { "name": SERVER_NAME, "version": SERVER_VERSION },
                "capabilities": { "methods": {} }
            }),
            "ping" => json!({}),
            "methods/list" => json!({ "methods": handler_definitions() }),
            name => {
                let params = params.unwrap_or_else(|| json!({}));
                match dispatch_handler(self, name, params) {
                    Some(resp) => resp,
                    None if notification => return None,
                    None => {
                        return Some(json_rpc_error(
                            id,
                            METHOD_NOT_FOUND,
                            &format!("Method not found: {name}"),
                        ));
                    }
                }
            }
        };

        if notification {
            None
        } else {
            Some(json_rpc_response(id, result))
        }
    }
}
