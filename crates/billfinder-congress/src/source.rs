use async_trait::async_trait;

use crate::error::CongressError;
use crate::types::{BillPage, BillRef};

/// Where bills come from.
#[async_trait]
pub trait BillSource: Send + Sync {
    /// Most recently updated bills, newest first.
    async fn recent_bills(&self, limit: u32) -> Result<BillPage, CongressError>;

    /// Text of the bill's latest official summary, if it has one.
    async fn latest_summary(&self, bill: &BillRef) -> Result<Option<String>, CongressError>;

    /// URL of the bill's latest formatted-XML text, if published.
    async fn formatted_xml_link(&self, bill: &BillRef) -> Result<Option<String>, CongressError>;

    /// Fetch a bill document and return its plain text.
    async fn fetch_document_text(&self, url: &str) -> Result<String, CongressError>;
}
