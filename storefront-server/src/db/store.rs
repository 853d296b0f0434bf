//! DataStore and Session traits
//!
//! A `DataStore` is created once at startup and shared by every request.
//! Each request opens its own `Session` with [`DataStore::begin`]; all
//! reads and writes go through it and nothing is visible to other
//! sessions until [`Session::commit`]. Dropping a session without
//! committing rolls it back.

use async_trait::async_trait;

use crate::models::{Category, NewCategory, NewProduct, Product};

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    /// Unique constraint rejected the write
    #[error("conflict: {0}")]
    Conflict(String),
}

impl DbError {
    pub(crate) fn duplicate_category(name: &str) -> Self {
        Self::Conflict(format!("Category with name '{}' already exists", name))
    }
}

/// Transactional store for products and categories.
#[async_trait]
pub trait DataStore: Send + Sync + 'static {
    /// Short backend name reported by the health endpoint.
    fn backend(&self) -> &'static str;

    /// Open a request-scoped session.
    async fn begin(&self) -> Result<Box<dyn Session>, DbError>;

    /// Create the `products` and `categories` tables if missing.
    async fn create_all(&self) -> Result<(), DbError>;

    /// Drop both tables and everything in them.
    async fn drop_all(&self) -> Result<(), DbError>;
}

/// One unit of work against the store.
///
/// `product`/`category` are plain reads. `lock_product`/`lock_category`
/// read the row for a following update or delete and hold it until the
/// session ends.
#[async_trait]
pub trait Session: Send {
    async fn products(&mut self) -> Result<Vec<Product>, DbError>;
    async fn product(&mut self, id: i32) -> Result<Option<Product>, DbError>;
    async fn lock_product(&mut self, id: i32) -> Result<Option<Product>, DbError>;
    /// Insert and return the row with its generated id.
    async fn insert_product(&mut self, new: &NewProduct) -> Result<Product, DbError>;
    async fn update_product(&mut self, product: &Product) -> Result<(), DbError>;
    async fn delete_product(&mut self, id: i32) -> Result<(), DbError>;

    async fn categories(&mut self) -> Result<Vec<Category>, DbError>;
    async fn category(&mut self, id: i32) -> Result<Option<Category>, DbError>;
    async fn lock_category(&mut self, id: i32) -> Result<Option<Category>, DbError>;
    /// Fails with [`DbError::Conflict`] when the name is taken.
    async fn insert_category(&mut self, new: &NewCategory) -> Result<Category, DbError>;
    /// Fails with [`DbError::Conflict`] when renaming onto a taken name.
    async fn update_category(&mut self, category: &Category) -> Result<(), DbError>;
    async fn delete_category(&mut self, id: i32) -> Result<(), DbError>;

    /// Make every write of this session durable and visible.
    async fn commit(self: Box<Self>) -> Result<(), DbError>;
}
