#![forbid(unsafe_code)]

use crate::*;
use serde_json::Value;

impl GraphServer {
    pub(crate) fn handle_get_graph(&mut self, args: Value) -> Value {
        let parent_id = match args.as_object() {
            Some(args) => match optional_string(args, "parent_id") {
                Ok(v) => v,
                Err(resp) => return resp,
            },
            None => None,
        };
        respond(self.store.get_graph(parent_id.as_deref()))
    }
}
