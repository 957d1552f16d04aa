//! HTTP client for the Congress.gov v3 API.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, info};

use crate::error::CongressError;
use crate::markup::strip_markup;
use crate::source::BillSource;
use crate::types::{BillPage, BillRef, SummariesResponse, TextVersionsResponse};

pub const DEFAULT_BASE_URL: &str = "https://api.congress.gov/v3";

pub const DEFAULT_PAGE_SIZE: u32 = 100;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Congress.gov client.
///
/// The listing endpoint authenticates with the `X-API-Key` header; per-bill
/// endpoints take the key as the `api_key` query parameter.
#[derive(Debug, Clone)]
pub struct CongressClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl CongressClient {
    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>) -> Result<Self, CongressError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| CongressError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_key: api_key.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_bill_resource<T: DeserializeOwned>(
        &self,
        bill: &BillRef,
        resource: &str,
    ) -> Result<T, CongressError> {
        let url = format!("{}/bill/{}/{resource}", self.base_url, bill.path());
        let response = self
            .client
            .get(&url)
            .query(&[("format", "json"), ("api_key", self.api_key.as_str())])
            .send()
            .await
            .map_err(|e| CongressError::Request(e.to_string()))?;

        let body = read_success_body(response).await?;
        serde_json::from_str(&body).map_err(|e| CongressError::Decode(format!("{resource}: {e}")))
    }
}

async fn read_success_body(response: reqwest::Response) -> Result<String, CongressError> {
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| CongressError::Request(format!("failed to read response body: {e}")))?;

    if !status.is_success() {
        return Err(CongressError::Status {
            status: status.as_u16(),
            body,
        });
    }
    Ok(body)
}

#[async_trait]
impl BillSource for CongressClient {
    async fn recent_bills(&self, limit: u32) -> Result<BillPage, CongressError> {
        let mut headers = HeaderMap::new();
        let mut key = HeaderValue::from_str(&self.api_key)
            .map_err(|e| CongressError::Config(format!("invalid API key header value: {e}")))?;
        key.set_sensitive(true);
        headers.insert("x-api-key", key);

        let limit = limit.to_string();
        let response = self
            .client
            .get(format!("{}/bill", self.base_url))
            .headers(headers)
            .query(&[
                ("limit", limit.as_str()),
                ("sort", "updateDate desc"),
                ("format", "json"),
            ])
            .send()
            .await
            .map_err(|e| CongressError::Request(e.to_string()))?;

        let body = read_success_body(response).await?;
        let raw: Value =
            serde_json::from_str(&body).map_err(|e| CongressError::Decode(format!("bill listing: {e}")))?;

        let page = BillPage::from_value(raw);
        info!(
            count = page.bills.as_ref().map(Vec::len),
            "fetched recent bills"
        );
        Ok(page)
    }

    async fn latest_summary(&self, bill: &BillRef) -> Result<Option<String>, CongressError> {
        let summaries: SummariesResponse = self.get_bill_resource(bill, "summaries").await?;
        Ok(summaries.latest())
    }

    async fn formatted_xml_link(&self, bill: &BillRef) -> Result<Option<String>, CongressError> {
        let versions: TextVersionsResponse = self.get_bill_resource(bill, "text").await?;
        let link = versions.formatted_xml_link();
        if link.is_none() {
            debug!(bill = %bill.path(), "no formatted XML text version");
        }
        Ok(link)
    }

    async fn fetch_document_text(&self, url: &str) -> Result<String, CongressError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| CongressError::Request(e.to_string()))?;

        let body = read_success_body(response).await?;
        Ok(strip_markup(&body))
    }
}
