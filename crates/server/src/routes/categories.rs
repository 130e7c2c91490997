use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Redirect, Response},
    Json,
};
use serde::Serialize;

use service::inventory::{Category, CategoryInput, InventoryRepository, ItemListing};

use super::EntityId;
use crate::errors::JsonApiError;
use crate::state::AppState;

const CATEGORIES: &str = "/inventory/categories";

/// Category form payload; `category` is set when editing.
#[derive(Serialize)]
pub struct CategoryFormPage {
    pub title: &'static str,
    pub category: Option<Category>,
}

#[derive(Serialize)]
pub struct CategoryPage {
    pub category: Category,
    pub items: Vec<ItemListing>,
}

pub async fn list<R: InventoryRepository + 'static>(State(state): State<AppState<R>>) -> Result<Json<Vec<Category>>, JsonApiError> {
    Ok(Json(state.categories.list().await?))
}

pub async fn detail<R: InventoryRepository + 'static>(
    State(state): State<AppState<R>>,
    EntityId(id): EntityId,
) -> Result<Json<CategoryPage>, JsonApiError> {
    let (category, items) = state.categories.get_with_dependents(id).await?;
    Ok(Json(CategoryPage { category, items }))
}

pub async fn create_form() -> Json<CategoryFormPage> {
    Json(CategoryFormPage { title: "Create Category", category: None })
}

pub async fn create<R: InventoryRepository + 'static>(
    State(state): State<AppState<R>>,
    Json(input): Json<CategoryInput>,
) -> Result<Response, JsonApiError> {
    let result = state.categories.create_if_absent(input).await;
    state.metrics.observe("category", "create", &result);
    let category = result?;
    Ok((StatusCode::CREATED, [(header::LOCATION, category.url())], Json(category)).into_response())
}

pub async fn update_form<R: InventoryRepository + 'static>(
    State(state): State<AppState<R>>,
    EntityId(id): EntityId,
) -> Result<Json<CategoryFormPage>, JsonApiError> {
    let category = state.categories.get(id).await?;
    Ok(Json(CategoryFormPage { title: "Update Category", category: Some(category) }))
}

pub async fn update<R: InventoryRepository + 'static>(
    State(state): State<AppState<R>>,
    EntityId(id): EntityId,
    Json(input): Json<CategoryInput>,
) -> Result<Response, JsonApiError> {
    let result = state.categories.update(id, input).await;
    state.metrics.observe("category", "update", &result);
    let category = result?;
    Ok((StatusCode::OK, [(header::LOCATION, category.url())], Json(category)).into_response())
}

pub async fn delete_form<R: InventoryRepository + 'static>(
    State(state): State<AppState<R>>,
    EntityId(id): EntityId,
) -> Result<Response, JsonApiError> {
    Ok(match state.categories.delete_view(id).await? {
        Some(guard) => Json(guard).into_response(),
        None => Redirect::to(CATEGORIES).into_response(),
    })
}

pub async fn delete<R: InventoryRepository + 'static>(
    State(state): State<AppState<R>>,
    EntityId(id): EntityId,
) -> Result<Redirect, JsonApiError> {
    let result = state.categories.delete(id).await;
    state.metrics.observe("category", "delete", &result);
    result?;
    Ok(Redirect::to(CATEGORIES))
}
