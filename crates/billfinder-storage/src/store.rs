use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use billfinder_core::keys::Collection;

use crate::error::StorageError;

/// A stored document: its id within the collection and its JSON body.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: String,
    pub data: Value,
}

/// Schema-less document storage, addressed by collection and id.
///
/// Handlers receive an `Arc<dyn DocumentStore>` through application state,
/// so any implementation can stand in for the S3 store.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Fetch one document. Missing documents are `Ok(None)`.
    async fn get(&self, collection: Collection, id: &str) -> Result<Option<Document>, StorageError>;

    /// Create or replace one document.
    async fn set(&self, collection: Collection, id: &str, data: Value) -> Result<(), StorageError>;

    /// Up to `limit` documents, most recently written first.
    async fn list_newest(
        &self,
        collection: Collection,
        limit: usize,
    ) -> Result<Vec<Document>, StorageError>;

    /// Up to `limit` documents in the store's natural order.
    async fn list(&self, collection: Collection, limit: usize) -> Result<Vec<Document>, StorageError>;

    /// Overlay top-level `fields` onto a document, creating it if needed.
    ///
    /// Fields not named in `fields` keep their stored values; named fields
    /// are replaced wholesale, never merged recursively.
    async fn merge(
        &self,
        collection: Collection,
        id: &str,
        fields: Map<String, Value>,
    ) -> Result<(), StorageError> {
        let mut merged = match self.get(collection, id).await? {
            Some(Document {
                data: Value::Object(existing),
                ..
            }) => existing,
            _ => Map::new(),
        };
        merged.extend(fields);
        self.set(collection, id, Value::Object(merged)).await
    }
}

/// Load and deserialize one document.
pub async fn load<T: DeserializeOwned>(
    store: &dyn DocumentStore,
    collection: Collection,
    id: &str,
) -> Result<Option<T>, StorageError> {
    match store.get(collection, id).await? {
        Some(doc) => Ok(Some(serde_json::from_value(doc.data)?)),
        None => Ok(None),
    }
}

/// Serialize and replace one document.
pub async fn save<T: Serialize>(
    store: &dyn DocumentStore,
    collection: Collection,
    id: &str,
    value: &T,
) -> Result<(), StorageError> {
    let data = serde_json::to_value(value)?;
    store.set(collection, id, data).await
}

/// Serialize `value` as an object and merge its fields into a document.
pub async fn save_merged<T: Serialize>(
    store: &dyn DocumentStore,
    collection: Collection,
    id: &str,
    value: &T,
) -> Result<(), StorageError> {
    let fields = match serde_json::to_value(value)? {
        Value::Object(map) => map,
        other => return store.set(collection, id, other).await,
    };
    store.merge(collection, id, fields).await
}
