#![forbid(unsafe_code)]
#![allow(dead_code)]

use serde_json::{Value, json};
use std::io::{BufRead, BufReader, Write};
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};
use tempfile::TempDir;

pub(crate) struct Server {
    child: Child,
    stdin: ChildStdin,
    stdout: BufReader<ChildStdout>,
    next_id: i64,
    storage: Option<TempDir>,
}

impl Server {
    pub(crate) fn start() -> Self {
        Self::start_with_args(&[])
    }

    pub(crate) fn start_with_args(extra_args: &[&str]) -> Self {
        let storage = tempfile::tempdir().expect("temp dir");
        Self::start_in(storage, extra_args)
    }

    pub(crate) fn start_in(storage: TempDir, extra_args: &[&str]) -> Self {
        let mut child = Command::new(env!("CARGO_BIN_EXE_ng_server"))
            .arg("--storage-dir")
            .arg(storage.path())
            .args(extra_args)
            .env_remove("NESTGRAPH_LOG")
            .env_remove("NESTGRAPH_STORAGE_DIR")
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .expect("spawn ng_server");

        let stdin = child.stdin.take().expect("stdin");
        let stdout = BufReader::new(child.stdout.take().expect("stdout"));

        Self {
            child,
            stdin,
            stdout,
            next_id: 1,
            storage: Some(storage),
        }
    }

    pub(crate) fn storage_path(&self) -> &std::path::Path {
        self.storage.as_ref().expect("storage dir").path()
    }

    /// Stops the process and hands back the storage directory so it can be reopened.
    pub(crate) fn shutdown(mut self) -> TempDir {
        let _ = self.child.kill();
        let _ = self.child.wait();
        self.storage.take().expect("storage dir")
    }

    pub(crate) fn send_raw(&mut self, line: &str) {
        writeln!(self.stdin, "{line}").expect("write request");
        self.stdin.flush().expect("flush request");
    }

    pub(crate) fn send(&mut self, req: Value) {
        self.send_raw(&req.to_string());
    }

    pub(crate) fn recv(&mut self) -> Value {
        let mut line = String::new();
        self.stdout.read_line(&mut line).expect("read response");
        assert!(!line.trim().is_empty(), "empty response line");
        serde_json::from_str(&line).expect("parse response json")
    }

    pub(crate) fn request(&mut self, req: Value) -> Value {
        self.send(req);
        self.recv()
    }

    /// Calls a graph method and returns its `{success, data, error}` envelope.
    pub(crate) fn call(&mut self, method: &str, params: Value) -> Value {
        let id = self.next_id;
        self.next_id += 1;
        let resp = self.request(json!({
            "jsonrpc": "2.0",
            "id": id,
            "method": method,
            "params": params
        }));
        assert_eq!(resp["id"], id, "response id mismatch: {resp}");
        resp.get("result")
            .cloned()
            .unwrap_or_else(|| panic!("no result in {resp}"))
    }

    /// Calls a method that must succeed and returns its data.
    pub(crate) fn call_ok(&mut self, method: &str, params: Value) -> Value {
        let envelope = self.call(method, params);
        assert_eq!(envelope["success"], true, "{method} failed: {envelope}");
        envelope["data"].clone()
    }

    pub(crate) fn create_node(&mut self, label: &str, parent_id: Option<&str>) -> String {
        let node = self.call_ok(
            "create_node",
            json!({
                "type_id": "task",
                "label": label,
                "position": { "x": 0, "y": 0 },
                "parent_id": parent_id
            }),
        );
        node["id"].as_str().expect("node id").to_string()
    }

    pub(crate) fn create_link(&mut self, source: &str, target: &str) -> String {
        let link = self.call_ok(
            "create_link",
            json!({ "source_id": source, "target_id": target }),
        );
        link["id"].as_str().expect("link id").to_string()
    }
}

impl Drop for Server {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}
