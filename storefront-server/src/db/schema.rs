//! Table definitions for PostgreSQL

use sqlx::PgPool;

use super::DbError;

/// Create the products and categories tables (idempotent)
pub async fn create_all(pool: &PgPool) -> Result<(), DbError> {
    tracing::info!("Creating tables...");

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS products (
            id SERIAL PRIMARY KEY,
            name VARCHAR(100) NOT NULL,
            description VARCHAR(255),
            price DOUBLE PRECISION,
            stock INTEGER
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS categories (
            id SERIAL PRIMARY KEY,
            name VARCHAR(100) NOT NULL UNIQUE,
            description VARCHAR(255)
        )
        "#,
    )
    .execute(pool)
    .await?;

    tracing::info!("Tables ready");
    Ok(())
}

/// Drop both tables
pub async fn drop_all(pool: &PgPool) -> Result<(), DbError> {
    tracing::warn!("Dropping products and categories tables");

    sqlx::query("DROP TABLE IF EXISTS categories")
        .execute(pool)
        .await?;
    sqlx::query("DROP TABLE IF EXISTS products")
        .execute(pool)
        .await?;

    Ok(())
}
