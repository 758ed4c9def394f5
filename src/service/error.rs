//! Error kinds a laptop RPC can end with.

use std::fmt;

use crate::error::StoreError;
use crate::image::{ImageStoreError, UploadError};

/// The only error type that leaves the service. Every store, upload and
/// persistence failure is mapped to one of these kinds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    /// Malformed input: bad id, oversized upload, chunk without info.
    InvalidArgument(String),
    /// Reference to a laptop that isn't stored.
    NotFound(String),
    /// Create with an id that is already stored.
    AlreadyExists(String),
    /// The caller gave up or its inbound stream broke.
    Cancelled(String),
    /// A collaborator failed unexpectedly.
    Internal(String),
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceError::InvalidArgument(msg) => write!(f, "invalid argument: {}", msg),
            ServiceError::NotFound(msg) => write!(f, "not found: {}", msg),
            ServiceError::AlreadyExists(msg) => write!(f, "already exists: {}", msg),
            ServiceError::Cancelled(msg) => write!(f, "cancelled: {}", msg),
            ServiceError::Internal(msg) => write!(f, "internal error: {}", msg),
        }
    }
}

impl std::error::Error for ServiceError {}

impl ServiceError {
    /// The human-readable description without the kind prefix.
    pub fn message(&self) -> &str {
        match self {
            ServiceError::InvalidArgument(msg)
            | ServiceError::NotFound(msg)
            | ServiceError::AlreadyExists(msg)
            | ServiceError::Cancelled(msg)
            | ServiceError::Internal(msg) => msg,
        }
    }
}

impl From<StoreError> for ServiceError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::AlreadyExists(_) => ServiceError::AlreadyExists(err.to_string()),
            StoreError::LockPoisoned(_) => ServiceError::Internal(err.to_string()),
        }
    }
}

impl From<UploadError> for ServiceError {
    fn from(err: UploadError) -> Self {
        ServiceError::InvalidArgument(err.to_string())
    }
}

impl From<ImageStoreError> for ServiceError {
    fn from(err: ImageStoreError) -> Self {
        match err {
            ImageStoreError::InvalidImageType(_) => ServiceError::InvalidArgument(err.to_string()),
            _ => ServiceError::Internal(format!("cannot save image to the store: {}", err)),
        }
    }
}
