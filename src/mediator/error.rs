//! Error types for request dispatch.

use thiserror::Error;

use crate::store::StoreError;
use crate::validation::ValidationError;

/// Why a request did not produce a response.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// No handler registered for this request.
    #[error("no handler registered for request: {0}")]
    UnknownRequest(String),
    /// JSON input could not be decoded into the request type.
    #[error("decode failed: {0}")]
    DecodeFailed(String),
    /// Response could not be encoded as JSON.
    #[error("encode failed: {0}")]
    EncodeFailed(String),
    /// Validators rejected the request; the handler never ran.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// The store operation failed.
    #[error("storage error: {0}")]
    Storage(#[from] StoreError),
    /// The caller cancelled before the store was touched.
    #[error("operation cancelled")]
    Cancelled,
}

impl From<serde_json::Error> for DispatchError {
    fn from(err: serde_json::Error) -> Self {
        DispatchError::DecodeFailed(err.to_string())
    }
}

impl DispatchError {
    /// Map this error to an HTTP-style status code.
    pub fn status_code(&self) -> u16 {
        match self {
            DispatchError::UnknownRequest(_) => 404,
            DispatchError::DecodeFailed(_) => 400,
            DispatchError::EncodeFailed(_) => 500,
            DispatchError::Validation(_) => 422,
            DispatchError::Storage(StoreError::Conflict { .. })
            | DispatchError::Storage(StoreError::ConcurrentWrite { .. }) => 409,
            DispatchError::Storage(StoreError::Missing { .. }) => 404,
            DispatchError::Storage(_) => 500,
            DispatchError::Cancelled => 499,
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, DispatchError::Validation(_))
    }
}
