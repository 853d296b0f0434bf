//! Command implementations for the storefront CLI

use anyhow::{Context, Result};
use clap::Args;
use storefront_server::db::{PgStore, DEFAULT_MAX_CONNECTIONS};

pub mod db;
pub mod serve;

pub use db::{run_create, run_drop, run_seed};
pub use serve::run_serve;

/// Connection options shared by every command that talks to PostgreSQL
#[derive(Args, Debug, Clone)]
pub struct DatabaseArgs {
    /// Database URL (overrides environment and .env)
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// Maximum pooled connections
    #[arg(long, default_value_t = DEFAULT_MAX_CONNECTIONS)]
    pub max_connections: u32,
}

impl DatabaseArgs {
    /// Database URL from the flag, DATABASE_URL, or the legacy DATABASE_URI.
    pub fn url(&self) -> Result<String> {
        self.database_url
            .clone()
            .or_else(|| std::env::var("DATABASE_URI").ok())
            .context("DATABASE_URL not set. Set via --database-url, DATABASE_URL env, or .env")
    }

    pub async fn connect(&self) -> Result<PgStore> {
        let url = self.url()?;
        PgStore::connect(&url, self.max_connections)
            .await
            .context("Failed to create database pool")
    }
}
