//! Sample data for a fresh database

use super::{DataStore, DbError};
use crate::models::{NewCategory, NewProduct};

/// Rows written by [`seed`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedReport {
    pub products: usize,
    pub categories: usize,
}

fn sample_products() -> Vec<NewProduct> {
    vec![
        NewProduct {
            name: "Product 1".into(),
            description: Some("This is Product 1".into()),
            price: Some(12.99),
            stock: Some(5),
        },
        NewProduct {
            name: "Product 2".into(),
            description: Some("This is Product 2".into()),
            price: Some(13.0),
            stock: Some(0),
        },
    ]
}

fn sample_categories() -> Vec<NewCategory> {
    vec![
        NewCategory::new("Electronics", Some("Gadgets and tech")),
        NewCategory::new("Books", Some("Fiction, non fiction")),
        NewCategory::new("Supplies", None),
    ]
}

/// Insert the sample products, commit, then the sample categories, commit.
///
/// Seeding twice fails on the category names.
pub async fn seed(store: &dyn DataStore) -> Result<SeedReport, DbError> {
    let products = sample_products();
    let mut session = store.begin().await?;
    for product in &products {
        session.insert_product(product).await?;
    }
    session.commit().await?;

    let categories = sample_categories();
    let mut session = store.begin().await?;
    for category in &categories {
        session.insert_category(category).await?;
    }
    session.commit().await?;

    let report = SeedReport {
        products: products.len(),
        categories: categories.len(),
    };
    tracing::info!(
        products = report.products,
        categories = report.categories,
        "seeded tables"
    );
    Ok(report)
}
