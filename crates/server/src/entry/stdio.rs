#![forbid(unsafe_code)]

use crate::{GraphServer, INVALID_REQUEST, JsonRpcRequest, PARSE_ERROR, json_rpc_error};
use serde_json::Value;
use std::io::{BufRead, Write};

pub(crate) fn run_stdio(server: &mut GraphServer) -> Result<(), Box<dyn std::error::Error>> {
    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout().lock();
    serve_lines(server, stdin.lock(), &mut stdout)
}

/// Newline-delimited JSON-RPC: one request per line, one response per line.
pub(crate) fn serve_lines<R: BufRead, W: Write>(
    server: &mut GraphServer,
    mut reader: R,
    writer: &mut W,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        let mut line = String::new();
        let read = reader.read_line(&mut line)?;
        if read == 0 {
            break;
        }
        let raw = line.trim();
        if raw.is_empty() {
            continue;
        }
        if let Some(resp) = handle_line(server, raw) {
            writeln!(writer, "{}", serde_json::to_string(&resp)?)?;
            writer.flush()?;
        }
    }
    Ok(())
}

fn handle_line(server: &mut GraphServer, raw: &str) -> Option<Value> {
    let data: Value = match serde_json::from_str(raw) {
        Ok(v) => v,
        Err(e) => return Some(json_rpc_error(None, PARSE_ERROR, &format!("Parse error: {e}"))),
    };

    let (id, has_method) = match data.as_object() {
        Some(obj) => (obj.get("id").cloned(), obj.contains_key("method")),
        None => return Some(json_rpc_error(None, INVALID_REQUEST, "Invalid Request")),
    };
    if !has_method {
        return Some(json_rpc_error(id, INVALID_REQUEST, "Invalid Request"));
    }

    match serde_json::from_value::<JsonRpcRequest>(data) {
        Ok(request) => server.handle(request),
        Err(e) => Some(json_rpc_error(
            id,
            INVALID_REQUEST,
            &format!("Invalid Request: {e}"),
        )),
    }
}
