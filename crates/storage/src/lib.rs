//! Pictor - Storage
//!
//! Object-storage collaborator boundary. The edge only ever needs one
//! primitive from the origin store: `get(bucket, key)`. The trait keeps the
//! orchestration layers independent of any concrete S3 client, and
//! [`MemoryStore`] backs the tests.

mod error;
mod memory;

pub use error::{Result, StoreError};
pub use memory::MemoryStore;

use async_trait::async_trait;
use bytes::Bytes;

/// One object fetched from the origin
#[derive(Debug, Clone)]
pub struct StoredObject {
    /// Raw object bytes
    pub body: Bytes,

    /// Content length as reported by the store
    ///
    /// Kept separate from `body.len()` because fan-out winner selection is
    /// defined over the store-reported length, and some stores report zero
    /// for placeholder objects.
    pub content_length: u64,
}

impl StoredObject {
    /// Build an object whose reported length matches its body
    pub fn new(body: impl Into<Bytes>) -> Self {
        let body = body.into();
        let content_length = body.len() as u64;
        Self {
            body,
            content_length,
        }
    }
}

/// Read-only origin object store
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Fetch one object by bucket and key
    ///
    /// # Errors
    /// - `StoreError::NotFound` if no object exists at the key
    /// - `StoreError::Backend` for transport or service failures
    async fn get(&self, bucket: &str, key: &str) -> Result<StoredObject>;
}
