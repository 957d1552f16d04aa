use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;

use billfinder_core::keys::{self, Collection};

use crate::error::StorageError;
use crate::store::{Document, DocumentStore};

/// In-process document store.
///
/// Natural order is document id order. Recency ordering follows the
/// document's `date` field; documents without a parseable `date` are left
/// out of [`DocumentStore::list_newest`], as an ordered query on a missing
/// field would.
///
/// Outages can be simulated with [`MemoryDocumentStore::set_unavailable`]
/// and [`MemoryDocumentStore::set_ordering_unavailable`].
#[derive(Default)]
pub struct MemoryDocumentStore {
    collections: RwLock<HashMap<Collection, BTreeMap<String, Value>>>,
    unavailable: AtomicBool,
    ordering_unavailable: AtomicBool,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every operation fail with [`StorageError::Unavailable`].
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Make only [`DocumentStore::list_newest`] fail.
    pub fn set_ordering_unavailable(&self, unavailable: bool) {
        self.ordering_unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn check_available(&self) -> Result<(), StorageError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StorageError::Unavailable("memory store switched off".to_string()));
        }
        Ok(())
    }

    /// Number of documents in a collection.
    pub async fn len(&self, collection: Collection) -> usize {
        self.collections
            .read()
            .await
            .get(&collection)
            .map_or(0, BTreeMap::len)
    }

    pub async fn is_empty(&self, collection: Collection) -> bool {
        self.len(collection).await == 0
    }
}

fn write_date(data: &Value) -> Option<jiff::Timestamp> {
    data.get("date")?.as_str()?.parse().ok()
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn get(&self, collection: Collection, id: &str) -> Result<Option<Document>, StorageError> {
        self.check_available()?;
        keys::document(collection, id)?;
        let collections = self.collections.read().await;
        Ok(collections
            .get(&collection)
            .and_then(|docs| docs.get(id))
            .map(|data| Document {
                id: id.to_string(),
                data: data.clone(),
            }))
    }

    async fn set(&self, collection: Collection, id: &str, data: Value) -> Result<(), StorageError> {
        self.check_available()?;
        keys::document(collection, id)?;
        self.collections
            .write()
            .await
            .entry(collection)
            .or_default()
            .insert(id.to_string(), data);
        Ok(())
    }

    async fn list_newest(
        &self,
        collection: Collection,
        limit: usize,
    ) -> Result<Vec<Document>, StorageError> {
        self.check_available()?;
        if self.ordering_unavailable.load(Ordering::SeqCst) {
            return Err(StorageError::Ordering("ordered listing switched off".to_string()));
        }

        let collections = self.collections.read().await;
        let Some(docs) = collections.get(&collection) else {
            return Ok(Vec::new());
        };

        let mut dated: Vec<(jiff::Timestamp, &String, &Value)> = docs
            .iter()
            .filter_map(|(id, data)| write_date(data).map(|date| (date, id, data)))
            .collect();
        dated.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| a.1.cmp(b.1)));

        Ok(dated
            .into_iter()
            .take(limit)
            .map(|(_, id, data)| Document {
                id: id.clone(),
                data: data.clone(),
            })
            .collect())
    }

    async fn list(&self, collection: Collection, limit: usize) -> Result<Vec<Document>, StorageError> {
        self.check_available()?;
        let collections = self.collections.read().await;
        Ok(collections
            .get(&collection)
            .map(|docs| {
                docs.iter()
                    .take(limit)
                    .map(|(id, data)| Document {
                        id: id.clone(),
                        data: data.clone(),
                    })
                    .collect()
            })
            .unwrap_or_default())
    }
}
