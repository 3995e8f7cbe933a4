#![forbid(unsafe_code)]

//! Param extraction. Every helper returns the `INVALID_INPUT` envelope on a type mismatch so
//! handlers can bail with `?`-style early returns.

use super::envelope::envelope_error;
use ng_core::graph::{DataBag, Position};
use serde_json::Value;

pub(crate) type Args = serde_json::Map<String, Value>;

fn invalid(message: String) -> Value {
    envelope_error("INVALID_INPUT", &message)
}

pub(crate) fn require_object(params: &Value) -> Result<&Args, Value> {
    params
        .as_object()
        .ok_or_else(|| invalid("params must be an object".to_string()))
}

pub(crate) fn require_string(args: &Args, key: &str) -> Result<String, Value> {
    let Some(v) = args.get(key).and_then(|v| v.as_str()) else {
        return Err(invalid(format!("{key} is required")));
    };
    Ok(v.to_string())
}

pub(crate) fn optional_string(args: &Args, key: &str) -> Result<Option<String>, Value> {
    match args.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(v)) => Ok(Some(v.to_string())),
        Some(_) => Err(invalid(format!("{key} must be a string"))),
    }
}

pub(crate) fn optional_non_null_string(args: &Args, key: &str) -> Result<Option<String>, Value> {
    match args.get(key) {
        None => Ok(None),
        Some(Value::String(v)) => Ok(Some(v.to_string())),
        Some(Value::Null) => Err(invalid(format!("{key} cannot be null"))),
        Some(_) => Err(invalid(format!("{key} must be a string"))),
    }
}

/// `None` when absent, `Some(None)` for an explicit null.
pub(crate) fn optional_nullable_string(
    args: &Args,
    key: &str,
) -> Result<Option<Option<String>>, Value> {
    match args.get(key) {
        None => Ok(None),
        Some(Value::Null) => Ok(Some(None)),
        Some(Value::String(v)) => Ok(Some(Some(v.to_string()))),
        Some(_) => Err(invalid(format!("{key} must be a string or null"))),
    }
}

pub(crate) fn optional_string_array(args: &Args, key: &str) -> Result<Option<Vec<String>>, Value> {
    let Some(value) = args.get(key) else {
        return Ok(None);
    };
    let Some(arr) = value.as_array() else {
        return Err(invalid(format!("{key} must be an array of strings")));
    };
    let mut out = Vec::with_capacity(arr.len());
    for item in arr {
        let Some(s) = item.as_str() else {
            return Err(invalid(format!("{key} must be an array of strings")));
        };
        out.push(s.to_string());
    }
    Ok(Some(out))
}

pub(crate) fn optional_data(args: &Args, key: &str) -> Result<Option<DataBag>, Value> {
    match args.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Object(map)) => Ok(Some(map.clone())),
        Some(_) => Err(invalid(format!("{key} must be an object"))),
    }
}

pub(crate) fn parse_position(value: &Value, key: &str) -> Result<Position, Value> {
    let coord = |axis: &str| {
        value
            .get(axis)
            .and_then(|v| v.as_f64())
            .ok_or_else(|| invalid(format!("{key}.{axis} must be a number")))
    };
    Ok(Position::new(coord("x")?, coord("y")?))
}

pub(crate) fn optional_position(args: &Args, key: &str) -> Result<Option<Position>, Value> {
    match args.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => parse_position(value, key).map(Some),
    }
}

pub(crate) fn require_array<'a>(args: &'a Args, key: &str) -> Result<&'a Vec<Value>, Value> {
    args.get(key)
        .and_then(|v| v.as_array())
        .ok_or_else(|| invalid(format!("{key} must be an array")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn args(value: Value) -> Args {
        value.as_object().cloned().expect("object")
    }

    #[test]
    fn nullable_string_distinguishes_absent_and_null() {
        let a = args(json!({ "parent_id": null, "description": "d" }));
        assert_eq!(optional_nullable_string(&a, "parent_id").ok(), Some(Some(None)));
        assert_eq!(
            optional_nullable_string(&a, "description").ok(),
            Some(Some(Some("d".to_string())))
        );
        assert_eq!(optional_nullable_string(&a, "missing").ok(), Some(None));
    }

    #[test]
    fn position_requires_numbers() {
        let a = args(json!({ "position": { "x": 1, "y": "2" } }));
        let err = optional_position(&a, "position").expect_err("y is a string");
        assert_eq!(err["error"]["code"], "INVALID_INPUT");

        let a = args(json!({ "position": { "x": 1.5, "y": -2 } }));
        assert_eq!(
            optional_position(&a, "position").ok().flatten(),
            Some(Position::new(1.5, -2.0))
        );
    }

    #[test]
    fn string_array_rejects_mixed_items() {
        let a = args(json!({ "tags": ["a", 1] }));
        assert!(optional_string_array(&a, "tags").is_err());
        let a = args(json!({ "tags": [] }));
        assert_eq!(optional_string_array(&a, "tags").ok(), Some(Some(Vec::new())));
    }
}
