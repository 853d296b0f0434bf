//! Schema administration: create, drop, seed

use anyhow::{Context, Result};
use clap::Parser;
use storefront_server::db::seed;
use storefront_server::DataStore;

use super::DatabaseArgs;

/// Arguments for the create/drop/seed commands
#[derive(Parser, Debug)]
pub struct SchemaArgs {
    #[command(flatten)]
    pub db: DatabaseArgs,
}

/// Create the products and categories tables
pub async fn run_create(args: SchemaArgs) -> Result<()> {
    let store = args.db.connect().await?;
    store.create_all().await.context("Failed to create tables")?;
    println!("Tables created!");
    Ok(())
}

/// Drop both tables
pub async fn run_drop(args: SchemaArgs) -> Result<()> {
    let store = args.db.connect().await?;
    store.drop_all().await.context("Failed to drop tables")?;
    println!("Tables dropped!");
    Ok(())
}

/// Insert the sample products and categories
pub async fn run_seed(args: SchemaArgs) -> Result<()> {
    let store = args.db.connect().await?;
    seed(&store).await.context("Failed to seed tables")?;
    println!("Table seeded successfully.");
    Ok(())
}
