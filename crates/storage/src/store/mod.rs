#![forbid(unsafe_code)]

mod cascade;
mod error;
mod links;
mod node_types;
mod nodes;
mod projection;
mod requests;
mod support;

pub use error::{EntityKind, StoreError};
pub use requests::*;

use rusqlite::Connection;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DB_FILE_NAME: &str = "nestgraph.db";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StoreOptions {
    /// Install the built-in node types on open (create-or-ignore).
    pub seed_default_types: bool,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            seed_default_types: true,
        }
    }
}

/// Graph store over SQLite. Single writer: every mutation borrows the store mutably.
#[derive(Debug)]
pub struct SqliteStore {
    conn: Connection,
    storage_dir: Option<PathBuf>,
}

impl SqliteStore {
    pub fn open(storage_dir: impl AsRef<Path>) -> Result<Self, StoreError> {
        Self::open_with(storage_dir, StoreOptions::default())
    }

    pub fn open_with(
        storage_dir: impl AsRef<Path>,
        options: StoreOptions,
    ) -> Result<Self, StoreError> {
        let storage_dir = storage_dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&storage_dir)?;

        let conn = Connection::open(storage_dir.join(DB_FILE_NAME))?;
        conn.busy_timeout(Duration::from_secs(5))?;
        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA synchronous=NORMAL;")?;

        let store = Self::init(conn, Some(storage_dir), options)?;
        tracing::info!(path = ?store.db_path(), "graph store opened");
        Ok(store)
    }

    pub fn open_in_memory(options: StoreOptions) -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        Self::init(conn, None, options)
    }

    fn init(
        conn: Connection,
        storage_dir: Option<PathBuf>,
        options: StoreOptions,
    ) -> Result<Self, StoreError> {
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        support::install_schema(&conn)?;
        let mut store = Self { conn, storage_dir };
        if options.seed_default_types {
            store.seed_default_node_types()?;
        }
        Ok(store)
    }

    pub fn storage_dir(&self) -> Option<&Path> {
        self.storage_dir.as_deref()
    }

    pub fn db_path(&self) -> Option<PathBuf> {
        self.storage_dir.as_ref().map(|dir| dir.join(DB_FILE_NAME))
    }
}
