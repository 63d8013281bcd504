use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::store::StoreError;

// The application error type, with `thiserror` for better ergonomics.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("validation failed")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("This e-mail is already registered.")]
    EmailAlreadyExists,

    #[error("Invalid e-mail or password.")]
    InvalidCredentials,

    #[error("Authentication token is invalid or missing.")]
    InvalidToken,

    #[error("Your account has no role assigned yet.")]
    RoleMissing,

    #[error("Your role may not access the '{0}' area.")]
    AreaForbidden(&'static str),

    #[error("The requested {0} was not found.")]
    NotFound(&'static str),

    #[error("Unknown collection '{0}'.")]
    UnknownCollection(String),

    #[error("A category named '{0}' already exists.")]
    DuplicateCategory(String),

    #[error("Category '{0}' is still referenced by one or more resources.")]
    CategoryInUse(String),

    #[error("Quantity must be a positive integer.")]
    InvalidQuantity,

    #[error("Insufficient stock: {available} available, {requested} requested.")]
    InsufficientStock { available: i64, requested: i64 },

    #[error("Font not found: {0}")]
    FontNotFound(String),

    // Store failures have no local recovery; they surface as 500.
    #[error("document store failure")]
    StoreError(#[from] StoreError),

    // Generic variant for any other unexpected error.
    #[error("internal server error")]
    InternalServerError(#[from] anyhow::Error),

    #[error("bcrypt failure: {0}")]
    BcryptError(#[from] bcrypt::BcryptError),

    #[error("jwt failure: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            // Return every validation detail, keyed by field.
            AppError::ValidationError(errors) => {
                let mut details = std::collections::HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                let body = Json(json!({
                    "error": "One or more fields are invalid.",
                    "details": details,
                }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }

            AppError::InvalidQuantity => (StatusCode::BAD_REQUEST, self.to_string()),

            AppError::EmailAlreadyExists
            | AppError::DuplicateCategory(_)
            | AppError::CategoryInUse(_)
            | AppError::InsufficientStock { .. } => (StatusCode::CONFLICT, self.to_string()),

            AppError::InvalidCredentials | AppError::InvalidToken => {
                (StatusCode::UNAUTHORIZED, self.to_string())
            }

            AppError::RoleMissing | AppError::AreaForbidden(_) => {
                (StatusCode::FORBIDDEN, self.to_string())
            }

            AppError::NotFound(_) | AppError::UnknownCollection(_) => {
                (StatusCode::NOT_FOUND, self.to_string())
            }
            AppError::StoreError(StoreError::NotFound) => {
                (StatusCode::NOT_FOUND, "The requested record was not found.".to_string())
            }

            // Everything else (store backends, unexpected errors) becomes a 500.
            // The detailed message goes to the log, not the client.
            e => {
                tracing::error!("internal server error: {e}");
                (StatusCode::INTERNAL_SERVER_ERROR, "An unexpected error occurred.".to_string())
            }
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}

/// Builds a field-level validation error outside of a `#[derive(Validate)]`
/// pass, keeping the response shape identical to derived validations.
pub fn field_error(field: &'static str, code: &'static str, message: &'static str) -> AppError {
    let mut err = validator::ValidationError::new(code);
    err.message = Some(message.into());
    let mut errors = validator::ValidationErrors::new();
    errors.add(field, err);
    AppError::ValidationError(errors)
}
