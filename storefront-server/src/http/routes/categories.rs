//! Category endpoints

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::Serialize;

use super::MessageResponse;
use crate::http::error::ApiError;
use crate::http::extractors::{DeferredJson, JsonBody, ValidId};
use crate::http::server::AppState;
use crate::models::{Category, CategoryChanges, CategoryInput, CategoryPatch, NewCategory};

const RESOURCE: &str = "Category";

/// Category response
#[derive(Debug, Serialize)]
pub struct CategoryResponse {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
}

impl From<Category> for CategoryResponse {
    fn from(c: Category) -> Self {
        Self {
            id: c.id,
            name: c.name,
            description: c.description,
        }
    }
}

/// GET /categories
async fn list_categories(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<CategoryResponse>>, ApiError> {
    let mut session = state.store.begin().await?;
    let categories = session.categories().await?;

    Ok(Json(
        categories.into_iter().map(CategoryResponse::from).collect(),
    ))
}

/// GET /categories/{id}
async fn get_category(
    State(state): State<Arc<AppState>>,
    ValidId(id): ValidId,
) -> Result<Json<CategoryResponse>, ApiError> {
    let mut session = state.store.begin().await?;
    let category = session
        .category(id)
        .await?
        .ok_or_else(|| ApiError::not_found(RESOURCE, id))?;

    Ok(Json(CategoryResponse::from(category)))
}

/// POST /categories - 409 when the name is taken
async fn create_category(
    State(state): State<Arc<AppState>>,
    JsonBody(input): JsonBody<CategoryInput>,
) -> Result<(StatusCode, Json<CategoryResponse>), ApiError> {
    let new = NewCategory::try_from(input)?;

    let mut session = state.store.begin().await?;
    let category = session.insert_category(&new).await?;
    session.commit().await?;

    tracing::info!(id = category.id, name = %category.name, "created category");
    Ok((StatusCode::CREATED, Json(CategoryResponse::from(category))))
}

/// PUT|PATCH /categories/{id} - 404 before the body is looked at
async fn update_category(
    State(state): State<Arc<AppState>>,
    ValidId(id): ValidId,
    body: DeferredJson<CategoryPatch>,
) -> Result<Json<CategoryResponse>, ApiError> {
    let mut session = state.store.begin().await?;
    let mut category = session
        .lock_category(id)
        .await?
        .ok_or_else(|| ApiError::not_found(RESOURCE, id))?;

    let changes = CategoryChanges::try_from(body.parse()?)?;
    if changes.is_empty() {
        return Ok(Json(CategoryResponse::from(category)));
    }

    changes.apply(&mut category);
    session.update_category(&category).await?;
    session.commit().await?;

    Ok(Json(CategoryResponse::from(category)))
}

/// DELETE /categories/{id}
async fn delete_category(
    State(state): State<Arc<AppState>>,
    ValidId(id): ValidId,
) -> Result<Json<MessageResponse>, ApiError> {
    let mut session = state.store.begin().await?;
    if session.lock_category(id).await?.is_none() {
        return Err(ApiError::not_found(RESOURCE, id));
    }

    session.delete_category(id).await?;
    session.commit().await?;

    tracing::info!(id, "deleted category");
    Ok(Json(MessageResponse::deleted(RESOURCE, id)))
}

/// Category routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/categories", get(list_categories).post(create_category))
        .route(
            "/categories/{id}",
            get(get_category)
                .put(update_category)
                .patch(update_category)
                .delete(delete_category),
        )
}
