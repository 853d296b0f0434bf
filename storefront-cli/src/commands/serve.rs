//! HTTP server command
//!
//! Runs the storefront API against PostgreSQL, or an in-memory store
//! with `--memory`.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use storefront_server::db::seed;
use storefront_server::{run_server, DataStore, MemoryStore, ServerConfig};

use super::DatabaseArgs;

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to
    #[arg(long, short = 'b', env = "STOREFRONT_BIND", default_value = "127.0.0.1:3030")]
    pub bind: SocketAddr,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long)]
    pub cors_permissive: bool,

    /// Keep everything in process memory instead of PostgreSQL.
    /// Any database URL from flags, environment or .env is ignored.
    #[arg(long)]
    pub memory: bool,

    /// Insert the sample rows before serving
    #[arg(long)]
    pub seed: bool,

    #[command(flatten)]
    pub db: DatabaseArgs,
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let store: Arc<dyn DataStore> = if args.memory {
        if args.db.database_url.is_some() {
            tracing::debug!("--memory set, ignoring database URL");
        }
        tracing::warn!("Using in-memory store; data is lost on shutdown");
        Arc::new(MemoryStore::new())
    } else {
        Arc::new(args.db.connect().await?)
    };

    store
        .create_all()
        .await
        .context("Failed to create tables")?;

    if args.seed {
        seed(store.as_ref())
            .await
            .context("Failed to seed tables")?;
    }

    tracing::info!("Starting storefront server on {}", args.bind);

    let config = ServerConfig {
        bind_addr: args.bind,
        cors_permissive: args.cors_permissive,
    };

    // Run server (blocks until shutdown)
    run_server(store, config).await.context("Server error")?;

    Ok(())
}
