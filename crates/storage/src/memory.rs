//! In-memory object store
//!
//! Backs orchestration tests. Objects are keyed by `(bucket, key)` exactly as
//! callers present them; there is no normalization, matching how an origin
//! store treats keys as opaque strings.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use bytes::Bytes;

use crate::{ObjectStore, Result, StoredObject, StoreError};

#[cfg(test)]
#[path = "memory_test.rs"]
mod tests;

/// In-memory `ObjectStore` implementation
#[derive(Default)]
pub struct MemoryStore {
    objects: RwLock<HashMap<(String, String), StoredObject>>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an object whose reported length matches its body
    pub fn put(&self, bucket: &str, key: &str, body: impl Into<Bytes>) {
        self.put_object(bucket, key, StoredObject::new(body));
    }

    /// Insert an object with an explicit reported content length
    ///
    /// Useful for modelling placeholder objects that report zero length.
    pub fn put_object(&self, bucket: &str, key: &str, object: StoredObject) {
        self.objects
            .write()
            .unwrap()
            .insert((bucket.to_string(), key.to_string()), object);
    }

    /// Number of stored objects
    pub fn len(&self) -> usize {
        self.objects.read().unwrap().len()
    }

    /// Whether the store holds no objects
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl ObjectStore for MemoryStore {
    async fn get(&self, bucket: &str, key: &str) -> Result<StoredObject> {
        self.objects
            .read()
            .unwrap()
            .get(&(bucket.to_string(), key.to_string()))
            .cloned()
            .ok_or_else(|| StoreError::not_found(bucket, key))
    }
}
