//! PostgreSQL store
//!
//! - One sqlx transaction per session, rolled back on drop
//! - Ids come from SERIAL columns (`RETURNING` on insert)
//! - Category name uniqueness is the UNIQUE constraint; violations map
//!   to `DbError::Conflict`, no check-then-insert

use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Postgres, Transaction};

use super::{schema, DataStore, DbError, Session};
use crate::models::{Category, NewCategory, NewProduct, Product};

/// DataStore backed by a PgPool
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

/// Pool size used when the caller has no preference
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

impl PgStore {
    /// Open a pool of at most `max_connections` against `database_url`.
    ///
    /// # Errors
    ///
    /// Returns an error if the first connection cannot be established.
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, DbError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;
        Ok(Self { pool })
    }
}

#[async_trait]
impl DataStore for PgStore {
    fn backend(&self) -> &'static str {
        "postgres"
    }

    async fn begin(&self) -> Result<Box<dyn Session>, DbError> {
        let tx = self.pool.begin().await?;
        Ok(Box::new(PgSession { tx }))
    }

    async fn create_all(&self) -> Result<(), DbError> {
        schema::create_all(&self.pool).await
    }

    async fn drop_all(&self) -> Result<(), DbError> {
        schema::drop_all(&self.pool).await
    }
}

struct PgSession {
    tx: Transaction<'static, Postgres>,
}

/// Map a failed category write, turning unique violations into conflicts.
fn category_write_error(err: sqlx::Error, name: &str) -> DbError {
    match &err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            DbError::duplicate_category(name)
        }
        _ => DbError::Sqlx(err),
    }
}

#[async_trait]
impl Session for PgSession {
    async fn products(&mut self) -> Result<Vec<Product>, DbError> {
        let rows = sqlx::query_as::<_, Product>(
            "SELECT id, name, description, price, stock FROM products ORDER BY id",
        )
        .fetch_all(&mut *self.tx)
        .await?;
        Ok(rows)
    }

    async fn product(&mut self, id: i32) -> Result<Option<Product>, DbError> {
        let row = sqlx::query_as::<_, Product>(
            "SELECT id, name, description, price, stock FROM products WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&mut *self.tx)
        .await?;
        Ok(row)
    }

    async fn lock_product(&mut self, id: i32) -> Result<Option<Product>, DbError> {
        let row = sqlx::query_as::<_, Product>(
            "SELECT id, name, description, price, stock FROM products WHERE id = $1 FOR UPDATE",
        )
        .bind(id)
        .fetch_optional(&mut *self.tx)
        .await?;
        Ok(row)
    }

    async fn insert_product(&mut self, new: &NewProduct) -> Result<Product, DbError> {
        let row = sqlx::query_as::<_, Product>(
            r#"
            INSERT INTO products (name, description, price, stock)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, description, price, stock
            "#,
        )
        .bind(&new.name)
        .bind(new.description.as_deref())
        .bind(new.price)
        .bind(new.stock)
        .fetch_one(&mut *self.tx)
        .await?;
        Ok(row)
    }

    async fn update_product(&mut self, product: &Product) -> Result<(), DbError> {
        sqlx::query(
            r#"
            UPDATE products
            SET name = $2, description = $3, price = $4, stock = $5
            WHERE id = $1
            "#,
        )
        .bind(product.id)
        .bind(&product.name)
        .bind(product.description.as_deref())
        .bind(product.price)
        .bind(product.stock)
        .execute(&mut *self.tx)
        .await?;
        Ok(())
    }

    async fn delete_product(&mut self, id: i32) -> Result<(), DbError> {
        sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&mut *self.tx)
            .await?;
        Ok(())
    }

    async fn categories(&mut self) -> Result<Vec<Category>, DbError> {
        let rows = sqlx::query_as::<_, Category>(
            "SELECT id, name, description FROM categories ORDER BY id",
        )
        .fetch_all(&mut *self.tx)
        .await?;
        Ok(rows)
    }

    async fn category(&mut self, id: i32) -> Result<Option<Category>, DbError> {
        let row = sqlx::query_as::<_, Category>(
            "SELECT id, name, description FROM categories WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&mut *self.tx)
        .await?;
        Ok(row)
    }

    async fn lock_category(&mut self, id: i32) -> Result<Option<Category>, DbError> {
        let row = sqlx::query_as::<_, Category>(
            "SELECT id, name, description FROM categories WHERE id = $1 FOR UPDATE",
        )
        .bind(id)
        .fetch_optional(&mut *self.tx)
        .await?;
        Ok(row)
    }

    async fn insert_category(&mut self, new: &NewCategory) -> Result<Category, DbError> {
        sqlx::query_as::<_, Category>(
            r#"
            INSERT INTO categories (name, description)
            VALUES ($1, $2)
            RETURNING id, name, description
            "#,
        )
        .bind(&new.name)
        .bind(new.description.as_deref())
        .fetch_one(&mut *self.tx)
        .await
        .map_err(|e| category_write_error(e, &new.name))
    }

    async fn update_category(&mut self, category: &Category) -> Result<(), DbError> {
        sqlx::query("UPDATE categories SET name = $2, description = $3 WHERE id = $1")
            .bind(category.id)
            .bind(&category.name)
            .bind(category.description.as_deref())
            .execute(&mut *self.tx)
            .await
            .map_err(|e| category_write_error(e, &category.name))?;
        Ok(())
    }

    async fn delete_category(&mut self, id: i32) -> Result<(), DbError> {
        sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(&mut *self.tx)
            .await?;
        Ok(())
    }

    async fn commit(self: Box<Self>) -> Result<(), DbError> {
        let PgSession { tx } = *self;
        tx.commit().await?;
        Ok(())
    }
}
