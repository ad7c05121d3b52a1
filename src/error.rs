//! Error handling for the application

use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::models::{InvalidTransition, ValidationError};
use crate::pricing::PricingError;
use crate::store::StoreError;

/// Application error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("{0}")]
    BadRequest(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("{0}")]
    Conflict(String),

    #[error(transparent)]
    Transition(#[from] InvalidTransition),

    #[error(transparent)]
    Pricing(#[from] PricingError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

impl AppError {
    /// Map a store error for `entity`, naming it in not-found and conflict messages
    pub fn store(entity: &'static str, error: StoreError) -> Self {
        match error {
            StoreError::NotFound => AppError::NotFound(entity),
            StoreError::AlreadyExists => AppError::Conflict(format!("{} already exists", entity)),
            StoreError::Stale => {
                AppError::Conflict(format!("{} was changed by another request", entity))
            }
            other => AppError::Store(other),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, self.to_string()),
            AppError::BadRequest(_) | AppError::Validation(_) => {
                (StatusCode::BAD_REQUEST, self.to_string())
            }
            AppError::Conflict(_) | AppError::Transition(_) => {
                (StatusCode::CONFLICT, self.to_string())
            }
            AppError::Pricing(e) => match e {
                PricingError::InvalidStay { .. } => (StatusCode::BAD_REQUEST, e.to_string()),
                PricingError::UnknownRoom(_) => (StatusCode::NOT_FOUND, e.to_string()),
                PricingError::RoomUnavailable(_) => {
                    (StatusCode::UNPROCESSABLE_ENTITY, e.to_string())
                }
                PricingError::Store(inner) => {
                    tracing::error!("Store error while pricing: {}", inner);
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "Failed to retrieve data".to_string(),
                    )
                }
            },
            AppError::Store(e) => match e {
                StoreError::NotFound => (StatusCode::NOT_FOUND, "Not found".to_string()),
                StoreError::AlreadyExists | StoreError::Stale => {
                    (StatusCode::CONFLICT, e.to_string())
                }
                StoreError::InvalidData => (StatusCode::BAD_REQUEST, e.to_string()),
                StoreError::Database(inner) => {
                    tracing::error!("Database error: {}", inner);
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "Failed to retrieve data".to_string(),
                    )
                }
            },
        };

        (status, Json(json!({ "message": message }))).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
