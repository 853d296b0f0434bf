//! Product endpoints

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::Serialize;

use super::MessageResponse;
use crate::http::error::ApiError;
use crate::http::extractors::{DeferredJson, JsonBody, ValidId};
use crate::http::server::AppState;
use crate::models::{NewProduct, Product, ProductChanges, ProductInput, ProductPatch};

const RESOURCE: &str = "Product";

/// Product response. Every column is emitted, missing values as null.
#[derive(Debug, Serialize)]
pub struct ProductResponse {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub stock: Option<i32>,
}

impl From<Product> for ProductResponse {
    fn from(p: Product) -> Self {
        Self {
            id: p.id,
            name: p.name,
            description: p.description,
            price: p.price,
            stock: p.stock,
        }
    }
}

/// GET /products - list all products
async fn list_products(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<ProductResponse>>, ApiError> {
    let mut session = state.store.begin().await?;
    let products = session.products().await?;

    Ok(Json(products.into_iter().map(ProductResponse::from).collect()))
}

/// GET /products/{id} - get a single product
async fn get_product(
    State(state): State<Arc<AppState>>,
    ValidId(id): ValidId,
) -> Result<Json<ProductResponse>, ApiError> {
    let mut session = state.store.begin().await?;
    let product = session
        .product(id)
        .await?
        .ok_or_else(|| ApiError::not_found(RESOURCE, id))?;

    Ok(Json(ProductResponse::from(product)))
}

/// POST /products - create a product
async fn create_product(
    State(state): State<Arc<AppState>>,
    JsonBody(input): JsonBody<ProductInput>,
) -> Result<(StatusCode, Json<ProductResponse>), ApiError> {
    let new = NewProduct::try_from(input)?;

    let mut session = state.store.begin().await?;
    let product = session.insert_product(&new).await?;
    session.commit().await?;

    tracing::info!(id = product.id, name = %product.name, "created product");
    Ok((StatusCode::CREATED, Json(ProductResponse::from(product))))
}

/// PUT|PATCH /products/{id} - merge supplied fields into the product
///
/// A missing row is reported before the body is decoded.
async fn update_product(
    State(state): State<Arc<AppState>>,
    ValidId(id): ValidId,
    body: DeferredJson<ProductPatch>,
) -> Result<Json<ProductResponse>, ApiError> {
    let mut session = state.store.begin().await?;
    let mut product = session
        .lock_product(id)
        .await?
        .ok_or_else(|| ApiError::not_found(RESOURCE, id))?;

    let changes = ProductChanges::try_from(body.parse()?)?;
    if changes.is_empty() {
        return Ok(Json(ProductResponse::from(product)));
    }

    changes.apply(&mut product);
    session.update_product(&product).await?;
    session.commit().await?;

    tracing::debug!(id, "updated product");
    Ok(Json(ProductResponse::from(product)))
}

/// DELETE /products/{id} - delete a product
async fn delete_product(
    State(state): State<Arc<AppState>>,
    ValidId(id): ValidId,
) -> Result<Json<MessageResponse>, ApiError> {
    let mut session = state.store.begin().await?;
    if session.lock_product(id).await?.is_none() {
        return Err(ApiError::not_found(RESOURCE, id));
    }

    session.delete_product(id).await?;
    session.commit().await?;

    tracing::info!(id, "deleted product");
    Ok(Json(MessageResponse::deleted(RESOURCE, id)))
}

/// Product routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/products", get(list_products).post(create_product))
        .route(
            "/products/{id}",
            get(get_product)
                .put(update_product)
                .patch(update_product)
                .delete(delete_product),
        )
}
