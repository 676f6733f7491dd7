//! Error types shared by the server and the client.
//!
//! # Design
//! `StoreError` is what every document store implementation returns;
//! `NotFound` has its own variant because update and delete answer it with a
//! different status than a backend failure. `ClientError` is what
//! `TodoClient` parse methods return.

use thiserror::Error;

use crate::types::ErrorEnvelope;

/// A path identifier that is not a 24-character hex ObjectId.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid todo id: {0:?}")]
pub struct InvalidTodoId(pub String);

/// Errors returned by document store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The identifier could not be used as a document id.
    #[error("invalid document id: {0}")]
    InvalidId(String),

    /// No document matched the identifier, so nothing was changed.
    #[error("todo {id} not found")]
    NotFound { id: String },

    /// The underlying database reported a failure.
    #[error("database error: {0}")]
    Backend(String),
}

/// Errors returned by `TodoClient` build and parse methods.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The server answered with an unexpected status and an error envelope.
    #[error("HTTP {status}: {}", .envelope.message)]
    Api { status: u16, envelope: ErrorEnvelope },

    /// The server answered with an unexpected status and a body that is not
    /// an error envelope.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    SerializationError(String),
}

impl ClientError {
    /// HTTP status for `Api` and `HttpError`, `None` otherwise.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } | ClientError::HttpError { status, .. } => {
                Some(*status)
            }
            _ => None,
        }
    }
}
