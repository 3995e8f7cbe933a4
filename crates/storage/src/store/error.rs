#![forbid(unsafe_code)]

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntityKind {
    Node,
    Link,
    NodeType,
}

impl EntityKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Node => "node",
            Self::Link => "link",
            Self::NodeType => "node type",
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
    #[error("sqlite: {0}")]
    Sql(#[from] rusqlite::Error),
    #[error("json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid input: {0}")]
    InvalidInput(&'static str),
    /// Referential integrity violated at write time (missing parent, type or endpoint).
    #[error("{0}")]
    Validation(String),
    #[error("{kind} not found: {id}")]
    NotFound { kind: EntityKind, id: String },
    /// The cascading delete failed part way and was rolled back.
    #[error("delete of node {node_id} rolled back: {source}")]
    Transaction {
        node_id: String,
        #[source]
        source: Box<StoreError>,
    },
}

impl StoreError {
    pub(crate) fn not_found(kind: EntityKind, id: &str) -> Self {
        Self::NotFound {
            kind,
            id: id.to_string(),
        }
    }

    /// Stable code used in transport envelopes.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::NotFound { .. } => "NOT_FOUND",
            Self::Transaction { .. } => "TRANSACTION_ERROR",
            Self::InvalidInput(_) => "INVALID_INPUT",
            Self::Io(_) | Self::Sql(_) | Self::Json(_) => "STORE_ERROR",
        }
    }
}
