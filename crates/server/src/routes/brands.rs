use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Redirect, Response},
    Json,
};
use serde::Serialize;

use service::inventory::{Brand, BrandInput, InventoryRepository, ItemListing};

use super::EntityId;
use crate::errors::JsonApiError;
use crate::state::AppState;

const BRANDS: &str = "/inventory/brands";

/// Brand form payload; `brand` is set when editing.
#[derive(Serialize)]
pub struct BrandFormPage {
    pub title: &'static str,
    pub brand: Option<Brand>,
}

#[derive(Serialize)]
pub struct BrandPage {
    pub brand: Brand,
    pub items: Vec<ItemListing>,
}

pub async fn list<R: InventoryRepository + 'static>(State(state): State<AppState<R>>) -> Result<Json<Vec<Brand>>, JsonApiError> {
    Ok(Json(state.brands.list().await?))
}

pub async fn detail<R: InventoryRepository + 'static>(
    State(state): State<AppState<R>>,
    EntityId(id): EntityId,
) -> Result<Json<BrandPage>, JsonApiError> {
    let (brand, items) = state.brands.get_with_dependents(id).await?;
    Ok(Json(BrandPage { brand, items }))
}

pub async fn create_form() -> Json<BrandFormPage> {
    Json(BrandFormPage { title: "Create Brand", brand: None })
}

pub async fn create<R: InventoryRepository + 'static>(
    State(state): State<AppState<R>>,
    Json(input): Json<BrandInput>,
) -> Result<Response, JsonApiError> {
    let result = state.brands.create_if_absent(input).await;
    state.metrics.observe("brand", "create", &result);
    let brand = result?;
    Ok((StatusCode::CREATED, [(header::LOCATION, brand.url())], Json(brand)).into_response())
}

pub async fn update_form<R: InventoryRepository + 'static>(
    State(state): State<AppState<R>>,
    EntityId(id): EntityId,
) -> Result<Json<BrandFormPage>, JsonApiError> {
    let brand = state.brands.get(id).await?;
    Ok(Json(BrandFormPage { title: "Update Brand", brand: Some(brand) }))
}

pub async fn update<R: InventoryRepository + 'static>(
    State(state): State<AppState<R>>,
    EntityId(id): EntityId,
    Json(input): Json<BrandInput>,
) -> Result<Response, JsonApiError> {
    let result = state.brands.update(id, input).await;
    state.metrics.observe("brand", "update", &result);
    let brand = result?;
    Ok((StatusCode::OK, [(header::LOCATION, brand.url())], Json(brand)).into_response())
}

pub async fn delete_form<R: InventoryRepository + 'static>(
    State(state): State<AppState<R>>,
    EntityId(id): EntityId,
) -> Result<Response, JsonApiError> {
    Ok(match state.brands.delete_view(id).await? {
        Some(guard) => Json(guard).into_response(),
        None => Redirect::to(BRANDS).into_response(),
    })
}

pub async fn delete<R: InventoryRepository + 'static>(
    State(state): State<AppState<R>>,
    EntityId(id): EntityId,
) -> Result<Redirect, JsonApiError> {
    let result = state.brands.delete(id).await;
    state.metrics.observe("brand", "delete", &result);
    result?;
    Ok(Redirect::to(BRANDS))
}
