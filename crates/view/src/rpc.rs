#![forbid(unsafe_code)]

//! `GraphApi` over newline-delimited JSON-RPC, the protocol `ng_server` speaks on stdio.

use crate::api::{ApiErrorBody, GraphApi, NewLink, NewNode, NodePatch, PositionOutcome};
use crate::{SessionError, TransportError};
use ng_core::graph::{GraphView, Link, NodeType, Position, RenderNode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use std::io::{BufRead, Write};

pub trait RpcTransport {
    /// Sends one request and returns the JSON-RPC `result`.
    fn call(&mut self, method: &str, params: Value) -> Result<Value, TransportError>;
}

/// One JSON object per line in each direction.
pub struct LineTransport<R, W> {
    reader: R,
    writer: W,
    next_id: u64,
}

impl<R: BufRead, W: Write> LineTransport<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self {
            reader,
            writer,
            next_id: 1,
        }
    }

    pub fn into_parts(self) -> (R, W) {
        (self.reader, self.writer)
    }
}

impl<R: BufRead, W: Write> RpcTransport for LineTransport<R, W> {
    fn call(&mut self, method: &str, params: Value) -> Result<Value, TransportError> {
        let id = self.next_id;
        self.next_id += 1;
        let request = json!({ "jsonrpc": "2.0", "id": id, "method": method, "params": params });
        writeln!(self.writer, "{request}")?;
        self.writer.flush()?;

        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Err(TransportError::Closed);
        }
        let mut response: Value = serde_json::from_str(line.trim())
            .map_err(|err| TransportError::Malformed(err.to_string()))?;

        if response.get("id").and_then(Value::as_u64) != Some(id) {
            return Err(TransportError::Malformed(format!(
                "expected response id {id}, got {}",
                response.get("id").unwrap_or(&Value::Null)
            )));
        }
        if let Some(error) = response.get("error") {
            return Err(TransportError::Rpc {
                code: error.get("code").and_then(Value::as_i64).unwrap_or(0),
                message: error
                    .get("message")
                    .and_then(Value::as_str)
                    .unwrap_or("unknown error")
                    .to_string(),
            });
        }
        response
            .get_mut("result")
            .map(Value::take)
            .ok_or_else(|| TransportError::Malformed("response has no result".to_string()))
    }
}

#[derive(Deserialize)]
struct Envelope {
    success: bool,
    #[serde(default)]
    data: Value,
    #[serde(default)]
    error: Option<ApiErrorBody>,
}

/// Unwraps a `{success, data, error}` envelope into `T`.
pub(crate) fn decode_envelope<T: DeserializeOwned>(envelope: Value) -> Result<T, SessionError> {
    let envelope: Envelope = serde_json::from_value(envelope)?;
    if !envelope.success {
        let error = envelope.error.unwrap_or_else(|| ApiErrorBody {
            code: "UNKNOWN".to_string(),
            message: "request failed".to_string(),
        });
        return Err(SessionError::Rejected {
            code: error.code,
            message: error.message,
        });
    }
    Ok(serde_json::from_value(envelope.data)?)
}

pub struct RpcClient<T> {
    transport: T,
}

impl<T: RpcTransport> RpcClient<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    fn invoke<D: DeserializeOwned>(&mut self, method: &str, params: Value) -> Result<D, SessionError> {
        let envelope = self.transport.call(method, params)?;
        decode_envelope(envelope)
    }
}

impl<T: RpcTransport> GraphApi for RpcClient<T> {
    fn list_node_types(&mut self) -> Result<Vec<NodeType>, SessionError> {
        self.invoke("list_node_types", json!({}))
    }

    fn create_node_type(&mut self, name: &str, color: &str) -> Result<NodeType, SessionError> {
        self.invoke("create_node_type", json!({ "name": name, "color": color }))
    }

    fn get_graph(&mut self, parent_id: Option<&str>) -> Result<GraphView, SessionError> {
        self.invoke("get_graph", json!({ "parent_id": parent_id }))
    }

    fn list_all_nodes(&mut self) -> Result<Vec<RenderNode>, SessionError> {
        self.invoke("list_all_nodes", json!({}))
    }

    fn create_node(&mut self, node: &NewNode) -> Result<RenderNode, SessionError> {
        self.invoke("create_node", serde_json::to_value(node)?)
    }

    fn update_node(&mut self, id: &str, patch: &NodePatch) -> Result<RenderNode, SessionError> {
        let mut params = serde_json::to_value(patch)?;
        if let Some(obj) = params.as_object_mut() {
            obj.insert("id".to_string(), Value::String(id.to_string()));
        }
        self.invoke("update_node", params)
    }

    fn update_node_positions(
        &mut self,
        moves: &[(String, Position)],
    ) -> Result<Vec<PositionOutcome>, SessionError> {
        let positions = moves
            .iter()
            .map(|(id, position)| json!({ "id": id, "position": position }))
            .collect::<Vec<_>>();
        self.invoke("update_node_positions", json!({ "positions": positions }))
    }

    fn delete_node(&mut self, id: &str) -> Result<(), SessionError> {
        self.invoke::<Value>("delete_node", json!({ "id": id }))
            .map(|_| ())
    }

    fn create_link(&mut self, link: &NewLink) -> Result<Link, SessionError> {
        self.invoke("create_link", serde_json::to_value(link)?)
    }

    fn delete_link(&mut self, id: &str) -> Result<(), SessionError> {
        self.invoke::<Value>("delete_link", json!({ "id": id }))
            .map(|_| ())
    }
}
