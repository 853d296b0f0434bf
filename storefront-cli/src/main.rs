//! storefront CLI - product and category API
//!
//! - `serve`: run the HTTP API
//! - `create` / `drop`: manage the products and categories tables
//! - `seed`: insert sample rows

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod tracing_setup;

use tracing_setup::TracingConfig;

#[derive(Parser, Debug)]
#[command(
    name = "storefront",
    author,
    version,
    about = "REST API for products and categories backed by PostgreSQL"
)]
struct Cli {
    /// Debug logging (unless RUST_LOG is set)
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP API server
    Serve(commands::serve::ServeArgs),
    /// Create the products and categories tables
    Create(commands::db::SchemaArgs),
    /// Drop the products and categories tables
    Drop(commands::db::SchemaArgs),
    /// Insert sample products and categories
    Seed(commands::db::SchemaArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env is fine; real environment variables win
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    tracing_setup::init(&TracingConfig { debug: cli.debug }).ok();

    match cli.command {
        Commands::Serve(args) => commands::run_serve(args).await?,
        Commands::Create(args) => commands::run_create(args).await?,
        Commands::Drop(args) => commands::run_drop(args).await?,
        Commands::Seed(args) => commands::run_seed(args).await?,
    }
    Ok(())
}
