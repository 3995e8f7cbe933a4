#![forbid(unsafe_code)]

use serde::{Deserialize, Serialize};

/// Stable primary key of a node type, derived from its display name.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeTypeId(String);

impl NodeTypeId {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    /// Lower-cases the name and collapses each whitespace run into a single `-`.
    pub fn from_name(name: &str) -> Result<Self, NodeTypeNameError> {
        validate_type_name(name)?;
        let mut out = String::with_capacity(name.len());
        let mut in_space = false;
        for ch in name.chars() {
            if ch.is_whitespace() {
                if !in_space {
                    out.push('-');
                }
                in_space = true;
                continue;
            }
            in_space = false;
            out.extend(ch.to_lowercase());
        }
        Ok(Self(out))
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NodeTypeNameError {
    Empty,
    TooLong,
    ContainsControl,
}

impl NodeTypeNameError {
    pub fn message(&self) -> &'static str {
        match self {
            Self::Empty => "node type name must not be empty",
            Self::TooLong => "node type name is too long",
            Self::ContainsControl => "node type name contains control characters",
        }
    }
}

fn validate_type_name(value: &str) -> Result<(), NodeTypeNameError> {
    if value.trim().is_empty() {
        return Err(NodeTypeNameError::Empty);
    }
    if value.len() > 128 {
        return Err(NodeTypeNameError::TooLong);
    }
    if value.chars().any(|c| c.is_control()) {
        return Err(NodeTypeNameError::ContainsControl);
    }
    Ok(())
}
