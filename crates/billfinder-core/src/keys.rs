//! Document key conventions.
//!
//! Pure string functions with no AWS SDK dependency. These define the canonical
//! layout of documents in the Bill Finder bucket: one JSON object per
//! document at `{collection}/{id}.json`.

use std::fmt;

use crate::error::CoreError;

/// A named group of documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Bills,
    Users,
    ChatHistories,
}

impl Collection {
    pub fn name(self) -> &'static str {
        match self {
            Collection::Bills => "bills",
            Collection::Users => "users",
            Collection::ChatHistories => "chat_histories",
        }
    }

    pub fn prefix(self) -> String {
        format!("{}/", self.name())
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

const SUFFIX: &str = ".json";

/// Object key for a document. Ids must be non-empty and free of `/`.
pub fn document(collection: Collection, id: &str) -> Result<String, CoreError> {
    if id.is_empty() || id.contains('/') || id.trim() != id {
        return Err(CoreError::InvalidDocumentId(id.to_string()));
    }
    Ok(format!("{}/{id}{SUFFIX}", collection.name()))
}

/// Recover the document id from an object key, if it belongs to `collection`.
pub fn document_id(collection: Collection, key: &str) -> Option<String> {
    key.strip_prefix(collection.name())
        .and_then(|rest| rest.strip_prefix('/'))
        .and_then(|rest| rest.strip_suffix(SUFFIX))
        .filter(|id| !id.is_empty() && !id.contains('/'))
        .map(str::to_string)
}

/// Document id for a bill, e.g. `119-hr-1234`.
///
/// Bill numbers repeat across chambers and congresses, so all three parts
/// are needed to keep keys unique.
pub fn bill_id(congress: u32, bill_type: &str, number: &str) -> String {
    format!("{congress}-{}-{number}", bill_type.to_lowercase())
}
