//! Error types for the resource API client.
//!
//! # Design
//! `NotFound` gets a dedicated variant because callers frequently distinguish
//! "the entity does not exist" from "the server returned an unexpected
//! status." All other non-2xx responses land in `HttpError` with the raw
//! status code and body. Failures are never retried or reclassified here.

use thiserror::Error;

/// Errors returned by `ResourceClient` and `ResourceApi`.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server returned 404, or the entity reported a missing id in-band.
    #[error("resource not found")]
    NotFound,

    /// The server returned a non-2xx status other than 404.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    SerializationError(String),

    /// An argument was rejected before any request was issued.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The request never produced a response (connect, TLS, I/O).
    #[error("transport failed: {0}")]
    Transport(String),
}

impl ApiError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound)
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
