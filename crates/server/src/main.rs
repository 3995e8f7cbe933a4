#![forbid(unsafe_code)]

mod config;
mod entry;
mod handlers;
mod server;
mod support;

pub(crate) use server::GraphServer;
pub(crate) use support::*;

use clap::Parser;
use config::Config;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const SERVER_NAME: &str = "nestgraph";
const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");

fn init_tracing(config: &Config) {
    // stdout carries the protocol; logs go to stderr.
    let filter = match config.log_level.as_deref() {
        Some(level) => tracing_subscriber::EnvFilter::new(level),
        None => tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "info".into()),
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::parse();
    init_tracing(&config);

    let store = config.open_store()?;
    tracing::info!(
        in_memory = config.in_memory,
        storage_dir = %config.storage_dir.display(),
        "{SERVER_NAME} {SERVER_VERSION} ready"
    );

    let mut server = GraphServer::new(store);
    entry::run_stdio(&mut server)?;

    tracing::info!("stdin closed, shutting down");
    Ok(())
}
