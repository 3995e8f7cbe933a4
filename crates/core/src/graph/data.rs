#![forbid(unsafe_code)]

use super::DataBag;
use serde_json::Value;

pub const MAX_DATA_DEPTH: usize = 16;
pub const MAX_DATA_BYTES: usize = 64 * 1024;

/// Bounds a data bag by nesting depth and encoded size. The shape of the values is not checked.
pub fn validate_data_bag(data: &DataBag) -> Result<(), DataBagError> {
    for value in data.values() {
        if value_depth(value) + 1 > MAX_DATA_DEPTH {
            return Err(DataBagError::TooDeep);
        }
    }
    let encoded = serde_json::to_vec(data).map_err(|_| DataBagError::NotEncodable)?;
    if encoded.len() > MAX_DATA_BYTES {
        return Err(DataBagError::TooLarge);
    }
    Ok(())
}

fn value_depth(value: &Value) -> usize {
    // Iterative; stops descending once past MAX_DATA_DEPTH.
    let mut max = 0;
    let mut stack = vec![(value, 0usize)];
    while let Some((current, depth)) = stack.pop() {
        max = max.max(depth);
        if depth > MAX_DATA_DEPTH {
            break;
        }
        match current {
            Value::Array(items) => stack.extend(items.iter().map(|v| (v, depth + 1))),
            Value::Object(map) => stack.extend(map.values().map(|v| (v, depth + 1))),
            _ => {}
        }
    }
    max
}

/// Shallow merge: keys in `patch` overwrite, a `null` in `patch` removes the key.
pub fn merge_data_bag(existing: &mut DataBag, patch: DataBag) {
    for (key, value) in patch {
        if value.is_null() {
            existing.remove(&key);
        } else {
            existing.insert(key, value);
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DataBagError {
    TooDeep,
    TooLarge,
    NotEncodable,
}

impl DataBagError {
    pub fn message(&self) -> &'static str {
        match self {
            Self::TooDeep => "data is nested too deeply",
            Self::TooLarge => "data is too large",
            Self::NotEncodable => "data cannot be encoded",
        }
    }
}
