use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Redirect, Response},
    Json,
};

use service::inventory::{InventoryRepository, ItemDetail, ItemForm, ItemFormState, ItemListing};

use super::EntityId;
use crate::errors::JsonApiError;
use crate::state::AppState;

const ITEMS: &str = "/inventory/items";

pub async fn list<R: InventoryRepository + 'static>(State(state): State<AppState<R>>) -> Result<Json<Vec<ItemListing>>, JsonApiError> {
    Ok(Json(state.items.list().await?))
}

pub async fn detail<R: InventoryRepository + 'static>(
    State(state): State<AppState<R>>,
    EntityId(id): EntityId,
) -> Result<Json<ItemDetail>, JsonApiError> {
    Ok(Json(state.items.get(id).await?))
}

pub async fn create_form<R: InventoryRepository + 'static>(State(state): State<AppState<R>>) -> Result<Json<ItemFormState>, JsonApiError> {
    Ok(Json(state.items.create_view().await?))
}

pub async fn create<R: InventoryRepository + 'static>(
    State(state): State<AppState<R>>,
    Json(form): Json<ItemForm>,
) -> Result<Response, JsonApiError> {
    let result = state.items.create(form).await;
    state.metrics.observe("item", "create", &result);
    let item = result?;
    Ok((StatusCode::CREATED, [(header::LOCATION, item.url())], Json(item)).into_response())
}

pub async fn update_form<R: InventoryRepository + 'static>(
    State(state): State<AppState<R>>,
    EntityId(id): EntityId,
) -> Result<Json<ItemFormState>, JsonApiError> {
    Ok(Json(state.items.edit_view(id).await?))
}

pub async fn update<R: InventoryRepository + 'static>(
    State(state): State<AppState<R>>,
    EntityId(id): EntityId,
    Json(form): Json<ItemForm>,
) -> Result<Response, JsonApiError> {
    let result = state.items.update(id, form).await;
    state.metrics.observe("item", "update", &result);
    let item = result?;
    Ok((StatusCode::OK, [(header::LOCATION, item.url())], Json(item)).into_response())
}

pub async fn delete_form<R: InventoryRepository + 'static>(
    State(state): State<AppState<R>>,
    EntityId(id): EntityId,
) -> Result<Response, JsonApiError> {
    Ok(match state.items.delete_view(id).await? {
        Some(item) => Json(item).into_response(),
        None => Redirect::to(ITEMS).into_response(),
    })
}

pub async fn delete<R: InventoryRepository + 'static>(
    State(state): State<AppState<R>>,
    EntityId(id): EntityId,
) -> Result<Redirect, JsonApiError> {
    let result = state.items.delete(id).await;
    // a missing id is not a write
    if !matches!(result, Ok(false)) {
        state.metrics.observe("item", "delete", &result);
    }
    result?;
    Ok(Redirect::to(ITEMS))
}
