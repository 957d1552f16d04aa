//! Wire types for the Congress.gov bill endpoints.

use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

/// Identifies one bill across the per-bill endpoints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BillRef {
    pub congress: u32,
    pub bill_type: String,
    pub number: String,
}

impl BillRef {
    /// Path segment `{congress}/{type}/{number}` with the type lowercased.
    pub fn path(&self) -> String {
        format!(
            "{}/{}/{}",
            self.congress,
            self.bill_type.to_lowercase(),
            self.number
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LatestAction {
    #[serde(default)]
    pub action_date: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
}

/// One element of the `/bill` listing.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillListItem {
    pub congress: u32,
    #[serde(rename = "type")]
    pub bill_type: String,
    pub number: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub update_date: Option<String>,
    #[serde(default)]
    pub latest_action: Option<LatestAction>,
}

impl BillListItem {
    pub fn reference(&self) -> BillRef {
        BillRef {
            congress: self.congress,
            bill_type: self.bill_type.clone(),
            number: self.number.clone(),
        }
    }

    pub fn latest_action_text(&self) -> Option<&str> {
        self.latest_action
            .as_ref()
            .and_then(|a| a.text.as_deref())
            .filter(|t| !t.trim().is_empty())
    }

    pub fn latest_action_date(&self) -> Option<&str> {
        self.latest_action
            .as_ref()
            .and_then(|a| a.action_date.as_deref())
            .filter(|d| !d.trim().is_empty())
    }
}

/// A page from the `/bill` listing.
///
/// The raw payload is kept so callers can surface it when the page does not
/// look like a bill listing.
#[derive(Debug, Clone)]
pub struct BillPage {
    pub raw: Value,
    /// `None` when the payload has no `bills` array.
    pub bills: Option<Vec<BillListItem>>,
}

impl BillPage {
    /// Interpret a listing payload. Elements that do not decode as bills are
    /// skipped with a warning.
    pub fn from_value(raw: Value) -> Self {
        let bills = raw.get("bills").and_then(Value::as_array).map(|items| {
            items
                .iter()
                .filter_map(|item| match serde_json::from_value::<BillListItem>(item.clone()) {
                    Ok(bill) => Some(bill),
                    Err(e) => {
                        warn!(error = %e, "skipping malformed bill listing entry");
                        None
                    }
                })
                .collect()
        });

        Self { raw, bills }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct SummariesResponse {
    #[serde(default)]
    pub summaries: Vec<SummaryItem>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SummaryItem {
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TextVersionsResponse {
    #[serde(default)]
    pub text_versions: Vec<TextVersion>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TextVersion {
    #[serde(default)]
    pub formats: Vec<TextFormat>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TextFormat {
    #[serde(rename = "type", default)]
    pub format_type: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

pub(crate) const FORMATTED_XML: &str = "Formatted XML";

impl SummariesResponse {
    /// Text of the first summary entry.
    pub fn latest(self) -> Option<String> {
        self.summaries
            .into_iter()
            .next()
            .and_then(|s| s.text)
            .filter(|t| !t.trim().is_empty())
    }
}

impl TextVersionsResponse {
    /// URL of the first text version's formatted-XML rendition.
    pub fn formatted_xml_link(self) -> Option<String> {
        self.text_versions
            .into_iter()
            .next()?
            .formats
            .into_iter()
            .find(|f| f.format_type.as_deref() == Some(FORMATTED_XML))
            .and_then(|f| f.url)
    }
}
