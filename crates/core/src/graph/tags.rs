#![forbid(unsafe_code)]

use std::collections::HashSet;

pub const MAX_TAG_LEN: usize = 128;

/// Rejects tags the store cannot hold. Accepted tags are stored exactly as given.
pub fn validate_tags(tags: &[String]) -> Result<(), TagError> {
    for tag in tags {
        if tag.chars().any(|c| c.is_control()) {
            return Err(TagError::ContainsControl);
        }
        if tag.len() > MAX_TAG_LEN {
            return Err(TagError::TooLong);
        }
    }
    Ok(())
}

/// Edit-boundary cleanup: trims, drops empties and repeats. The first occurrence keeps its
/// position.
pub fn dedupe_tags(tags: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut out = Vec::with_capacity(tags.len());
    for tag in tags {
        let trimmed = tag.trim();
        if trimmed.is_empty() {
            continue;
        }
        if seen.insert(trimmed) {
            out.push(trimmed.to_string());
        }
    }
    out
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TagError {
    TooLong,
    ContainsControl,
}

impl TagError {
    pub fn message(&self) -> &'static str {
        match self {
            Self::TooLong => "tag is too long",
            Self::ContainsControl => "tag contains control characters",
        }
    }
}
