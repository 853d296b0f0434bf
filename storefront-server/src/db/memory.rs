//! In-memory store for tests and `serve --memory`
//!
//! A session takes the table lock for its whole lifetime and works on a
//! staged copy; commit swaps the copy in. Sessions are therefore fully
//! serialized.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{Mutex, OwnedMutexGuard};

use super::{DataStore, DbError, Session};
use crate::models::{Category, NewCategory, NewProduct, Product};

#[derive(Debug, Clone, Default)]
struct Tables {
    products: BTreeMap<i32, Product>,
    categories: BTreeMap<i32, Category>,
    // Last ids handed out; like SERIAL they never go backwards
    product_seq: i32,
    category_seq: i32,
}

/// DataStore kept in process memory
#[derive(Clone, Default)]
pub struct MemoryStore {
    tables: Arc<Mutex<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DataStore for MemoryStore {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn begin(&self) -> Result<Box<dyn Session>, DbError> {
        let guard = self.tables.clone().lock_owned().await;
        let staged = guard.clone();
        Ok(Box::new(MemorySession { guard, staged }))
    }

    async fn create_all(&self) -> Result<(), DbError> {
        Ok(())
    }

    async fn drop_all(&self) -> Result<(), DbError> {
        *self.tables.lock().await = Tables::default();
        Ok(())
    }
}

struct MemorySession {
    guard: OwnedMutexGuard<Tables>,
    staged: Tables,
}

impl MemorySession {
    fn name_taken(&self, name: &str, except: Option<i32>) -> bool {
        self.staged
            .categories
            .values()
            .any(|c| c.name == name && Some(c.id) != except)
    }
}

#[async_trait]
impl Session for MemorySession {
    async fn products(&mut self) -> Result<Vec<Product>, DbError> {
        Ok(self.staged.products.values().cloned().collect())
    }

    async fn product(&mut self, id: i32) -> Result<Option<Product>, DbError> {
        Ok(self.staged.products.get(&id).cloned())
    }

    async fn lock_product(&mut self, id: i32) -> Result<Option<Product>, DbError> {
        // The whole table set is already locked by this session
        self.product(id).await
    }

    async fn insert_product(&mut self, new: &NewProduct) -> Result<Product, DbError> {
        self.staged.product_seq += 1;
        let product = Product {
            id: self.staged.product_seq,
            name: new.name.clone(),
            description: new.description.clone(),
            price: new.price,
            stock: new.stock,
        };
        self.staged.products.insert(product.id, product.clone());
        Ok(product)
    }

    async fn update_product(&mut self, product: &Product) -> Result<(), DbError> {
        if let Some(row) = self.staged.products.get_mut(&product.id) {
            *row = product.clone();
        }
        Ok(())
    }

    async fn delete_product(&mut self, id: i32) -> Result<(), DbError> {
        self.staged.products.remove(&id);
        Ok(())
    }

    async fn categories(&mut self) -> Result<Vec<Category>, DbError> {
        Ok(self.staged.categories.values().cloned().collect())
    }

    async fn category(&mut self, id: i32) -> Result<Option<Category>, DbError> {
        Ok(self.staged.categories.get(&id).cloned())
    }

    async fn lock_category(&mut self, id: i32) -> Result<Option<Category>, DbError> {
        self.category(id).await
    }

    async fn insert_category(&mut self, new: &NewCategory) -> Result<Category, DbError> {
        if self.name_taken(&new.name, None) {
            return Err(DbError::duplicate_category(&new.name));
        }
        self.staged.category_seq += 1;
        let category = Category {
            id: self.staged.category_seq,
            name: new.name.clone(),
            description: new.description.clone(),
        };
        self.staged.categories.insert(category.id, category.clone());
        Ok(category)
    }

    async fn update_category(&mut self, category: &Category) -> Result<(), DbError> {
        if self.name_taken(&category.name, Some(category.id)) {
            return Err(DbError::duplicate_category(&category.name));
        }
        if let Some(row) = self.staged.categories.get_mut(&category.id) {
            *row = category.clone();
        }
        Ok(())
    }

    async fn delete_category(&mut self, id: i32) -> Result<(), DbError> {
        self.staged.categories.remove(&id);
        Ok(())
    }

    async fn commit(self: Box<Self>) -> Result<(), DbError> {
        let MemorySession { mut guard, staged } = *self;
        *guard = staged;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn widget() -> NewProduct {
        NewProduct {
            name: "Widget".into(),
            description: None,
            price: Some(9.99),
            stock: Some(10),
        }
    }

    #[tokio::test]
    async fn ids_are_sequential_and_not_reused() {
        let store = MemoryStore::new();
        let mut session = store.begin().await.unwrap();

        let first = session.insert_product(&widget()).await.unwrap();
        let second = session.insert_product(&widget()).await.unwrap();
        assert_eq!((first.id, second.id), (1, 2));

        session.delete_product(second.id).await.unwrap();
        let third = session.insert_product(&widget()).await.unwrap();
        assert_eq!(third.id, 3);
    }

    #[tokio::test]
    async fn uncommitted_session_rolls_back() {
        let store = MemoryStore::new();
        {
            let mut session = store.begin().await.unwrap();
            session.insert_product(&widget()).await.unwrap();
        }

        let mut session = store.begin().await.unwrap();
        assert!(session.products().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn commit_publishes_writes() {
        let store = MemoryStore::new();
        let mut session = store.begin().await.unwrap();
        let product = session.insert_product(&widget()).await.unwrap();
        session.commit().await.unwrap();

        let mut session = store.begin().await.unwrap();
        assert_eq!(session.product(product.id).await.unwrap(), Some(product));
    }

    #[tokio::test]
    async fn duplicate_category_name_conflicts() {
        let store = MemoryStore::new();
        let mut session = store.begin().await.unwrap();

        let books = session
            .insert_category(&NewCategory::new("Books", None))
            .await
            .unwrap();
        let err = session
            .insert_category(&NewCategory::new("Books", Some("again")))
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::Conflict(_)));

        // Rewriting a row with its own name is not a conflict
        session.update_category(&books).await.unwrap();
    }

    #[tokio::test]
    async fn rename_onto_taken_name_conflicts() {
        let store = MemoryStore::new();
        let mut session = store.begin().await.unwrap();
        session
            .insert_category(&NewCategory::new("Books", None))
            .await
            .unwrap();
        let mut supplies = session
            .insert_category(&NewCategory::new("Supplies", None))
            .await
            .unwrap();

        supplies.name = "Books".into();
        let err = session.update_category(&supplies).await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "conflict: Category with name 'Books' already exists"
        );
    }

    #[tokio::test]
    async fn drop_all_resets_tables() {
        let store = MemoryStore::new();
        let mut session = store.begin().await.unwrap();
        session.insert_product(&widget()).await.unwrap();
        session.commit().await.unwrap();

        store.drop_all().await.unwrap();

        let mut session = store.begin().await.unwrap();
        assert!(session.products().await.unwrap().is_empty());
        assert_eq!(session.insert_product(&widget()).await.unwrap().id, 1);
    }
}
