use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::inventory::view::{DeleteGuard, ItemFormState};

/// One violated form field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &str, message: &str) -> Self {
        Self { field: field.to_string(), message: message.to_string() }
    }
}

/// Field errors plus, for item forms, the state needed to re-render.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationFailure {
    pub errors: Vec<FieldError>,
    pub form: Option<ItemFormState>,
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msgs: Vec<String> = self.errors.iter().map(|e| format!("{}: {}", e.field, e.message)).collect();
        f.write_str(&msgs.join("; "))
    }
}

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("validation error: {0}")]
    Validation(Box<ValidationFailure>),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("delete blocked: {0}")]
    Conflict(Box<DeleteGuard>),
    #[error("database error: {0}")]
    Db(String),
    #[error("model error: {0}")]
    Model(#[from] models::errors::ModelError),
}

impl ServiceError {
    pub fn not_found(entity: &str) -> Self { Self::NotFound(format!("{} not found", entity)) }

    pub fn invalid(field: &str, message: &str) -> Self {
        Self::validation(vec![FieldError::new(field, message)], None)
    }

    pub fn validation(errors: Vec<FieldError>, form: Option<ItemFormState>) -> Self {
        Self::Validation(Box::new(ValidationFailure { errors, form }))
    }

    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            ServiceError::Validation(_) => 2001,
            ServiceError::NotFound(_) => 2002,
            ServiceError::Conflict(_) => 2003,
            ServiceError::Db(_) => 2100,
            ServiceError::Model(_) => 2101,
        }
    }
}

impl From<sea_orm::DbErr> for ServiceError {
    fn from(e: sea_orm::DbErr) -> Self { Self::Db(e.to_string()) }
}
