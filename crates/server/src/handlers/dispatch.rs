#![forbid(unsafe_code)]

use crate::GraphServer;
use serde_json::Value;

macro_rules! define_graph_dispatch {
    ($($method_name:literal => $method:ident),* $(,)?) => {
        pub(crate) fn dispatch_handler(
            server: &mut GraphServer,
            name: &str,
            args: Value,
        ) -> Option<Value> {
            let resp = match name {
                $($method_name => server.$method(args),)*
                _ => return None,
            };
            Some(resp)
        }

        #[cfg(test)]
        pub(crate) fn dispatch_handler_names() -> &'static [&'static str] {
            &[$($method_name),*]
        }
    };
}

define_graph_dispatch! {
    "list_node_types" => handle_list_node_types,
    "create_node_type" => handle_create_node_type,
    "list_nodes" => handle_list_nodes,
    "list_all_nodes" => handle_list_all_nodes,
    "get_node" => handle_get_node,
    "create_node" => handle_create_node,
    "update_node" => handle_update_node,
    "update_node_positions" => handle_update_node_positions,
    "delete_node" => handle_delete_node,
    "list_links" => handle_list_links,
    "create_link" => handle_create_link,
    "delete_link" => handle_delete_link,
    "get_graph" => handle_get_graph,
}
