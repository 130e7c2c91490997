use axum::{
    async_trait,
    extract::{FromRequestParts, Path, State},
    http::{header, request::Parts, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{error, Level};
use uuid::Uuid;

use common::types::Health;
use service::inventory::InventoryRepository;

use crate::errors::JsonApiError;
use crate::state::AppState;

pub mod brands;
pub mod categories;
pub mod items;

/// Record id taken from the path; anything that is not a UUID is a 404.
pub struct EntityId(pub Uuid);

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for EntityId {
    type Rejection = JsonApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| JsonApiError::not_found("record"))?;
        Uuid::parse_str(&raw).map(EntityId).map_err(|_| JsonApiError::not_found("record"))
    }
}

pub async fn health() -> Json<Health> {
    Json(Health::ok())
}

async fn metrics<R: InventoryRepository + 'static>(State(state): State<AppState<R>>) -> Response {
    match state.metrics.render() {
        Ok(body) => ([(header::CONTENT_TYPE, "text/plain; version=0.0.4")], body).into_response(),
        Err(e) => {
            error!(error = %e, "metrics encode failed");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// Build the application router: health, metrics, and the inventory pages.
pub fn build_router<R: InventoryRepository + 'static>(state: AppState<R>, cors: CorsLayer) -> Router {
    let inventory = Router::new()
        .route("/inventory", get(items::list::<R>))
        .route("/inventory/items", get(items::list::<R>))
        .route("/inventory/item/create", get(items::create_form::<R>).post(items::create::<R>))
        .route("/inventory/item/:id", get(items::detail::<R>))
        .route("/inventory/item/:id/update", get(items::update_form::<R>).post(items::update::<R>))
        .route("/inventory/item/:id/delete", get(items::delete_form::<R>).post(items::delete::<R>))
        .route("/inventory/brands", get(brands::list::<R>))
        .route("/inventory/brand/create", get(brands::create_form).post(brands::create::<R>))
        .route("/inventory/brand/:id", get(brands::detail::<R>))
        .route("/inventory/brand/:id/update", get(brands::update_form::<R>).post(brands::update::<R>))
        .route("/inventory/brand/:id/delete", get(brands::delete_form::<R>).post(brands::delete::<R>))
        .route("/inventory/categories", get(categories::list::<R>))
        .route("/inventory/category/create", get(categories::create_form).post(categories::create::<R>))
        .route("/inventory/category/:id", get(categories::detail::<R>))
        .route("/inventory/category/:id/update", get(categories::update_form::<R>).post(categories::update::<R>))
        .route("/inventory/category/:id/delete", get(categories::delete_form::<R>).post(categories::delete::<R>));

    Router::new()
        .route("/health", get(health))
        .route("/metrics", get(metrics::<R>))
        .merge(inventory)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
