#![forbid(unsafe_code)]

//! Client-side state for browsing a nested graph: the drill-down navigation stack, the table
//! hierarchy (filter, expand, flatten) and an optimistic session over a graph transport.

pub mod api;
pub mod hierarchy;
pub mod navigation;
pub mod rpc;
pub mod session;
pub mod state;

pub use api::{ApiErrorBody, GraphApi, NewLink, NewNode, NodePatch, PositionOutcome};
pub use hierarchy::{
    Forest, ForestEntry, HierarchyRow, available_tags, available_types, build_forest,
    filter_nodes, flatten,
};
pub use navigation::{Breadcrumb, NavigationStack};
pub use rpc::{LineTransport, RpcClient, RpcTransport};
pub use session::GraphSession;
pub use state::{ExpandState, FilterState, ViewState};

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
    #[error("connection closed")]
    Closed,
    #[error("malformed response: {0}")]
    Malformed(String),
    #[error("rpc error {code}: {message}")]
    Rpc { code: i64, message: String },
}

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    Transport(#[from] TransportError),
    /// The store answered with `success: false`.
    #[error("{code}: {message}")]
    Rejected { code: String, message: String },
    #[error("unexpected payload: {0}")]
    Decode(#[from] serde_json::Error),
}

impl SessionError {
    /// Message shown to the user. Only store rejections carry their own text; everything else
    /// falls back to `generic`.
    pub fn user_message(&self, generic: &str) -> String {
        match self {
            Self::Rejected { message, .. } => message.clone(),
            Self::Transport(_) | Self::Decode(_) => generic.to_string(),
        }
    }

    pub fn code(&self) -> Option<&str> {
        match self {
            Self::Rejected { code, .. } => Some(code),
            _ => None,
        }
    }
}
