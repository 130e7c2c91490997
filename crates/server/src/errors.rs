use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;
use tracing::error;

use service::errors::ServiceError;

/// Service failure rendered as a JSON response.
#[derive(Debug)]
pub struct JsonApiError(pub ServiceError);

impl From<ServiceError> for JsonApiError {
    fn from(e: ServiceError) -> Self { Self(e) }
}

impl JsonApiError {
    pub fn not_found(entity: &str) -> Self { Self(ServiceError::not_found(entity)) }

    pub fn status(&self) -> StatusCode {
        match &self.0 {
            ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
            ServiceError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ServiceError::Conflict(_) => StatusCode::CONFLICT,
            ServiceError::Db(_) | ServiceError::Model(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let code = self.0.code();
        let body = match self.0 {
            ServiceError::Validation(f) => json!({"error": "validation failed", "code": code, "errors": f.errors, "form": f.form}),
            ServiceError::Conflict(g) => json!({"error": g.to_string(), "code": code, "target": g.target, "dependents": g.dependents}),
            ServiceError::NotFound(msg) => json!({"error": msg, "code": code}),
            other => {
                error!(error = %other, code, "request failed");
                json!({"error": "internal error", "code": code})
            }
        };
        (status, Json(body)).into_response()
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("database unavailable: {0}")]
    Database(String),
    #[error("metrics registry: {0}")]
    Metrics(#[from] prometheus::Error),
    #[error(transparent)]
    Any(#[from] anyhow::Error),
}
