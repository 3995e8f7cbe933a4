#![forbid(unsafe_code)]

use clap::Parser;
use ng_storage::{SqliteStore, StoreError, StoreOptions};
use std::path::PathBuf;

/// JSON-RPC server for the nestgraph hierarchical graph store (newline-delimited stdio).
#[derive(Parser, Debug)]
#[command(name = "ng_server", version)]
pub(crate) struct Config {
    /// Directory holding nestgraph.db
    #[arg(long, env = "NESTGRAPH_STORAGE_DIR", default_value = ".nestgraph")]
    pub(crate) storage_dir: PathBuf,

    /// Keep the graph in memory; nothing is written to disk
    #[arg(long)]
    pub(crate) in_memory: bool,

    /// Do not install the built-in node types
    #[arg(long)]
    pub(crate) no_seed: bool,

    /// Log filter directive, e.g. "debug" or "ng_storage=debug" (falls back to RUST_LOG)
    #[arg(long, env = "NESTGRAPH_LOG")]
    pub(crate) log_level: Option<String>,
}

impl Config {
    pub(crate) fn store_options(&self) -> StoreOptions {
        StoreOptions {
            seed_default_types: !self.no_seed,
        }
    }

    pub(crate) fn open_store(&self) -> Result<SqliteStore, StoreError> {
        if self.in_memory {
            SqliteStore::open_in_memory(self.store_options())
        } else {
            SqliteStore::open_with(&self.storage_dir, self.store_options())
        }
    }
}
