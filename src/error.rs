use axum::{
    Json,
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::db::StoreError;

/// Every failure a handler can produce.
///
/// Converted into the `{ success: false, message }` envelope at the boundary.
/// Variants carrying internal detail log it and send a generic message instead.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Conflict(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Not authorized, please log in")]
    Unauthorized,

    #[error("{0}")]
    NotFound(String),

    #[error("Already favorited")]
    AlreadyFavorited,

    #[error("Favorite not found")]
    NotFavorited,

    #[error("Too many login attempts, please try again in {wait_secs}s")]
    TooManyRequests { wait_secs: u64 },

    #[error("Failed to fetch games")]
    CatalogUnavailable(#[source] StoreError),

    #[error("storage error: {0}")]
    Storage(#[from] StoreError),

    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::InvalidCredentials | AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            // Favorite toggles answer 400 in both directions.
            AppError::AlreadyFavorited | AppError::NotFavorited => StatusCode::BAD_REQUEST,
            AppError::TooManyRequests { .. } => StatusCode::TOO_MANY_REQUESTS,
            AppError::CatalogUnavailable(_) | AppError::Storage(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// The message that is safe to show to the client.
    fn public_message(&self) -> String {
        match self {
            AppError::CatalogUnavailable(_) => self.to_string(),
            AppError::Storage(_) | AppError::Internal(_) => "Internal server error".to_string(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        match &self {
            AppError::CatalogUnavailable(source) => {
                tracing::error!(error = %source, "catalog query failed");
            }
            AppError::Storage(_) | AppError::Internal(_) => {
                tracing::error!(error = %self, "request failed");
            }
            _ => tracing::debug!(%status, error = %self, "request rejected"),
        }

        let body = Json(json!({
            "success": false,
            "message": self.public_message(),
        }));

        (status, body).into_response()
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}
