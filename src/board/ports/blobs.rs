//! Blob storage port for avatar images.

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for blob storage operations.
pub type BlobResult<T> = Result<T, BlobError>;

/// Blob storage contract.
#[async_trait]
pub trait BlobStorage: Send + Sync {
    /// Downloads the object at the given path.
    ///
    /// # Errors
    ///
    /// Returns [`BlobError::NotFound`] when no object exists at the path.
    async fn download(&self, path: &str) -> BlobResult<Vec<u8>>;

    /// Uploads an object, replacing any existing one at the path.
    async fn upload(&self, path: &str, bytes: Vec<u8>) -> BlobResult<()>;
}

/// Errors returned by blob storage implementations.
#[derive(Debug, Clone, Error)]
pub enum BlobError {
    /// No object exists at the path.
    #[error("blob not found: {0}")]
    NotFound(String),

    /// Storage-layer failure.
    #[error("blob storage error: {0}")]
    Storage(Arc<dyn std::error::Error + Send + Sync>),
}

impl BlobError {
    /// Wraps a storage error.
    pub fn storage(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Storage(Arc::new(err))
    }
}
