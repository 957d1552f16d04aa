use async_trait::async_trait;
use aws_sdk_s3::Client;
use serde_json::Value;
use tracing::{debug, warn};

use billfinder_core::keys::{self, Collection};

use crate::error::StorageError;
use crate::objects;
use crate::store::{Document, DocumentStore};

/// Documents stored as one JSON object per key in an S3 bucket.
///
/// Recency ordering uses each object's last-modified time, which is the
/// document's write time.
#[derive(Clone)]
pub struct S3DocumentStore {
    client: Client,
    bucket: String,
}

impl S3DocumentStore {
    pub fn new(client: Client, bucket: impl Into<String>) -> Self {
        Self {
            client,
            bucket: bucket.into(),
        }
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    /// Fetch the documents behind `object_keys`, skipping objects that
    /// vanished or no longer hold valid JSON.
    async fn fetch_all(
        &self,
        collection: Collection,
        object_keys: Vec<String>,
    ) -> Result<Vec<Document>, StorageError> {
        let mut docs = Vec::with_capacity(object_keys.len());
        for key in object_keys {
            let Some(id) = keys::document_id(collection, &key) else {
                continue;
            };
            let body = match objects::get_object(&self.client, &self.bucket, &key).await {
                Ok(body) => body,
                Err(StorageError::NotFound { .. }) => continue,
                Err(e) => return Err(e),
            };
            match serde_json::from_slice::<Value>(&body) {
                Ok(data) => docs.push(Document { id, data }),
                Err(e) => warn!(key = %key, error = %e, "skipping unreadable document"),
            }
        }
        Ok(docs)
    }
}

#[async_trait]
impl DocumentStore for S3DocumentStore {
    async fn get(&self, collection: Collection, id: &str) -> Result<Option<Document>, StorageError> {
        let key = keys::document(collection, id)?;
        match objects::get_object(&self.client, &self.bucket, &key).await {
            Ok(body) => Ok(Some(Document {
                id: id.to_string(),
                data: serde_json::from_slice(&body)?,
            })),
            Err(StorageError::NotFound { .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn set(&self, collection: Collection, id: &str, data: Value) -> Result<(), StorageError> {
        let key = keys::document(collection, id)?;
        let body = serde_json::to_vec_pretty(&data)?;
        objects::put_object(&self.client, &self.bucket, &key, body, Some("application/json")).await?;
        debug!(collection = %collection, id, "document written");
        Ok(())
    }

    async fn list_newest(
        &self,
        collection: Collection,
        limit: usize,
    ) -> Result<Vec<Document>, StorageError> {
        let metas =
            objects::list_objects_with_metadata(&self.client, &self.bucket, &collection.prefix())
                .await?;

        let mut stamped = Vec::with_capacity(metas.len());
        for meta in metas {
            let Some(modified) = meta.last_modified else {
                return Err(StorageError::Ordering(format!(
                    "object {} has no last-modified time",
                    meta.key
                )));
            };
            stamped.push(((modified.secs(), modified.subsec_nanos()), meta.key));
        }

        stamped.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| a.1.cmp(&b.1)));
        let newest: Vec<String> = stamped.into_iter().take(limit).map(|(_, key)| key).collect();

        self.fetch_all(collection, newest).await
    }

    async fn list(&self, collection: Collection, limit: usize) -> Result<Vec<Document>, StorageError> {
        let object_keys =
            objects::list_objects(&self.client, &self.bucket, &collection.prefix(), limit).await?;
        self.fetch_all(collection, object_keys).await
    }
}
