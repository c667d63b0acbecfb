//! In-memory blob storage for avatar flow tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::board::ports::{BlobError, BlobResult, BlobStorage};

/// Thread-safe in-memory blob store keyed by object path.
#[derive(Debug, Clone, Default)]
pub struct InMemoryBlobStorage {
    objects: Arc<RwLock<HashMap<String, Vec<u8>>>>,
}

impl InMemoryBlobStorage {
    /// Creates an empty blob store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the stored object paths, for assertions on key formats.
    ///
    /// # Errors
    ///
    /// Returns a storage error when the lock is poisoned.
    pub fn paths(&self) -> BlobResult<Vec<String>> {
        let objects = self
            .objects
            .read()
            .map_err(|err| BlobError::storage(std::io::Error::other(err.to_string())))?;
        Ok(objects.keys().cloned().collect())
    }
}

#[async_trait]
impl BlobStorage for InMemoryBlobStorage {
    async fn download(&self, path: &str) -> BlobResult<Vec<u8>> {
        let objects = self
            .objects
            .read()
            .map_err(|err| BlobError::storage(std::io::Error::other(err.to_string())))?;
        objects
            .get(path)
            .cloned()
            .ok_or_else(|| BlobError::NotFound(path.to_owned()))
    }

    async fn upload(&self, path: &str, bytes: Vec<u8>) -> BlobResult<()> {
        let mut objects = self
            .objects
            .write()
            .map_err(|err| BlobError::storage(std::io::Error::other(err.to_string())))?;
        objects.insert(path.to_owned(), bytes);
        Ok(())
    }
}
