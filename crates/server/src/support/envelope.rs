#![forbid(unsafe_code)]

//! Handler results: `{success, data, error}` with `error = {code, message}`.

use ng_storage::StoreError;
use serde::Serialize;
use serde_json::{Value, json};

pub(crate) fn envelope_ok(data: Value) -> Value {
    json!({ "success": true, "data": data, "error": null })
}

pub(crate) fn envelope_error(code: &str, message: &str) -> Value {
    tracing::warn!(code, message, "request failed");
    json!({
        "success": false,
        "data": null,
        "error": { "code": code, "message": message.trim() }
    })
}

pub(crate) fn store_error(err: StoreError) -> Value {
    envelope_error(err.code(), &err.to_string())
}

/// Serializes a store result into the success envelope; any error becomes the error envelope.
pub(crate) fn respond<T: Serialize>(result: Result<T, StoreError>) -> Value {
    match result {
        Ok(value) => match serde_json::to_value(value) {
            Ok(data) => envelope_ok(data),
            Err(err) => store_error(err.into()),
        },
        Err(err) => store_error(err),
    }
}
