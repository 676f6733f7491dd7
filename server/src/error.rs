//! Handler errors and their HTTP rendering.
//!
//! Every failure is answered with an `ErrorEnvelope`. Status codes:
//!
//! | Error | Status |
//! |---|---|
//! | `Decode` | 400 |
//! | `Body` | the rejection's status (413 over the body limit, else 400) |
//! | `InvalidId` | 400 |
//! | `Validation` | 422 |
//! | `Store` with `NotFound` | 404 |
//! | `Store` otherwise | 500 |

use axum::{
    extract::rejection::BytesRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use todo_core::{ErrorEnvelope, InvalidTodoId, StoreError};
use tracing::warn;

#[derive(Debug, Error)]
pub enum ApiError {
    /// The request body is not a valid todo payload.
    #[error("malformed todo payload: {0}")]
    Decode(String),

    /// The request body could not be read, usually because it is over the
    /// body size limit.
    #[error("unreadable request body: {0}")]
    Body(#[from] BytesRejection),

    /// The payload decoded but failed the title rule.
    #[error("todo validation failed")]
    Validation,

    #[error(transparent)]
    InvalidId(#[from] InvalidTodoId),

    /// A store operation failed; `action` becomes the envelope message.
    #[error("{action}: {source}")]
    Store {
        action: &'static str,
        #[source]
        source: StoreError,
    },
}

impl ApiError {
    pub fn store(action: &'static str) -> impl FnOnce(StoreError) -> Self {
        move |source| ApiError::Store { action, source }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Decode(_) | ApiError::InvalidId(_) => StatusCode::BAD_REQUEST,
            ApiError::Body(rejection) => rejection.status(),
            ApiError::Validation => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Store {
                source: StoreError::NotFound { .. },
                ..
            } => StatusCode::NOT_FOUND,
            ApiError::Store { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn envelope(&self) -> ErrorEnvelope {
        match self {
            ApiError::Decode(detail) => ErrorEnvelope::new("Invalid todo payload", detail.as_str()),
            ApiError::Body(rejection) => {
                ErrorEnvelope::new("Invalid todo payload", rejection.body_text())
            }
            ApiError::Validation => {
                ErrorEnvelope::new("Validation Error for TODO", "title must not be a single space")
            }
            ApiError::InvalidId(_) => ErrorEnvelope::new("Invalid todo id", "Object Id not present"),
            ApiError::Store { action, source } => ErrorEnvelope::new(*action, source.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            warn!(error = %self, "request failed");
        }
        (status, Json(self.envelope())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_store_errors_map_to_404() {
        let err = ApiError::store("Failed to delete todo")(StoreError::NotFound {
            id: "65a1b2c3d4e5f60718293a4b".to_string(),
        });
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        let envelope = err.envelope();
        assert_eq!(envelope.message, "Failed to delete todo");
        assert_eq!(envelope.error, "todo 65a1b2c3d4e5f60718293a4b not found");
    }

    #[test]
    fn backend_store_errors_map_to_500() {
        let err = ApiError::store("Failed to fetch todos")(StoreError::Backend("boom".into()));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn invalid_id_uses_fixed_envelope() {
        let err = ApiError::from(InvalidTodoId("nope".to_string()));
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.envelope().message, "Invalid todo id");
    }

    #[test]
    fn validation_is_unprocessable() {
        assert_eq!(ApiError::Validation.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
