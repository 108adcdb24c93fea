use crate::domain::model::{ValidationError, WriteError};
use crate::infra::mail::RelayError;
use crate::storage::document::StoreError;
use crate::storage::uploads::UploadError;

/// Request-level failure categories; each maps to one HTTP status.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("{0}")]
    Conflict(String),
    #[error("persistence failure: {0}")]
    Persistence(StoreError),
    #[error(transparent)]
    Upload(#[from] UploadError),
    #[error(transparent)]
    Relay(#[from] RelayError),
}

impl From<StoreError> for ServiceError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::Duplicate { .. } => ServiceError::Conflict(error.to_string()),
            other => ServiceError::Persistence(other),
        }
    }
}

impl From<WriteError> for ServiceError {
    fn from(error: WriteError) -> Self {
        match error {
            WriteError::Invalid(e) => e.into(),
            WriteError::Store(e) => e.into(),
        }
    }
}
