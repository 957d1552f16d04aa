//! In-process bill source for tests and offline runs.

use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::CongressError;
use crate::source::BillSource;
use crate::types::{BillPage, BillRef};

/// A [`BillSource`] that serves fixed payloads.
///
/// Per-bill lookups are keyed by [`BillRef::path`]. Documents are returned
/// as given, without markup stripping.
#[derive(Debug, Clone, Default)]
pub struct ScriptedBillSource {
    listing: Option<Value>,
    summaries: HashMap<String, String>,
    xml_links: HashMap<String, String>,
    documents: HashMap<String, String>,
    failing_bills: Vec<String>,
}

impl ScriptedBillSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `raw` as the listing payload. Without one, listing fails.
    pub fn with_listing(mut self, raw: Value) -> Self {
        self.listing = Some(raw);
        self
    }

    pub fn with_summary(mut self, bill: &BillRef, text: impl Into<String>) -> Self {
        self.summaries.insert(bill.path(), text.into());
        self
    }

    pub fn with_xml_link(mut self, bill: &BillRef, url: impl Into<String>) -> Self {
        self.xml_links.insert(bill.path(), url.into());
        self
    }

    pub fn with_document(mut self, url: impl Into<String>, text: impl Into<String>) -> Self {
        self.documents.insert(url.into(), text.into());
        self
    }

    /// Make every per-bill lookup for `bill` fail.
    pub fn with_failing_bill(mut self, bill: &BillRef) -> Self {
        self.failing_bills.push(bill.path());
        self
    }

    fn check(&self, bill: &BillRef) -> Result<String, CongressError> {
        let path = bill.path();
        if self.failing_bills.contains(&path) {
            return Err(CongressError::Status {
                status: 503,
                body: format!("{path} unavailable"),
            });
        }
        Ok(path)
    }
}

#[async_trait]
impl BillSource for ScriptedBillSource {
    async fn recent_bills(&self, limit: u32) -> Result<BillPage, CongressError> {
        let raw = self
            .listing
            .clone()
            .ok_or_else(|| CongressError::Request("bill source unavailable".to_string()))?;
        let mut page = BillPage::from_value(raw);
        if let Some(bills) = page.bills.as_mut() {
            bills.truncate(limit as usize);
        }
        Ok(page)
    }

    async fn latest_summary(&self, bill: &BillRef) -> Result<Option<String>, CongressError> {
        let path = self.check(bill)?;
        Ok(self.summaries.get(&path).cloned())
    }

    async fn formatted_xml_link(&self, bill: &BillRef) -> Result<Option<String>, CongressError> {
        let path = self.check(bill)?;
        Ok(self.xml_links.get(&path).cloned())
    }

    async fn fetch_document_text(&self, url: &str) -> Result<String, CongressError> {
        self.documents.get(url).cloned().ok_or_else(|| CongressError::Status {
            status: 404,
            body: format!("no document at {url}"),
        })
    }
}
