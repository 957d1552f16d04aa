use serde::{Deserialize, Serialize};
use serde_json::Value;
use ts_rs::TS;

use crate::classification::decode_stored;
use crate::error::CoreError;
use crate::models::demographics::Demographics;

/// A classified bill as written to the `bills` collection.
///
/// Field names on disk are the historical document keys, spaces included.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BillRecord {
    pub title: String,
    pub original: Option<String>,
    pub summary: Option<String>,
    /// Write timestamp, not a legislative date.
    pub date: jiff::Timestamp,
    pub demographics: Option<Demographics>,
    #[serde(rename = "population affect summary")]
    pub population_affect_summary: Option<String>,
    #[serde(rename = "latest action date")]
    pub latest_action_date: String,
    #[serde(rename = "xml link")]
    pub xml_link: String,
}

impl BillRecord {
    /// Build a record, enforcing that it has a title and at least one of
    /// `original` / `summary`.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        title: impl Into<String>,
        original: Option<String>,
        summary: Option<String>,
        demographics: Option<Demographics>,
        population_affect_summary: Option<String>,
        latest_action_date: Option<String>,
        xml_link: Option<String>,
        date: jiff::Timestamp,
    ) -> Result<Self, CoreError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(CoreError::MissingField("title".to_string()));
        }
        if original.is_none() && summary.is_none() {
            return Err(CoreError::MissingField("original or summary".to_string()));
        }

        Ok(Self {
            title,
            original,
            summary,
            date,
            demographics,
            population_affect_summary,
            latest_action_date: latest_action_date.unwrap_or_else(|| "N/A".to_string()),
            xml_link: xml_link.unwrap_or_default(),
        })
    }
}

/// A bill document as read back from the store.
///
/// Kept as raw JSON: older documents may hold the classification as a
/// string, or be missing fields entirely.
#[derive(Debug, Clone)]
pub struct StoredBill {
    pub id: String,
    pub data: Value,
}

/// Which date a [`BillCard`] reports as `update_date`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateDate {
    LatestAction,
    LatestActionOrWriteDate,
}

impl StoredBill {
    pub fn new(id: impl Into<String>, data: Value) -> Self {
        Self {
            id: id.into(),
            data,
        }
    }

    fn text(&self, field: &str) -> Option<&str> {
        self.data.get(field).and_then(Value::as_str)
    }

    pub fn title(&self) -> Option<&str> {
        self.text("title")
    }

    pub fn xml_link(&self) -> Option<&str> {
        self.text("xml link").filter(|s| !s.is_empty())
    }

    /// The stored `demographics` value as-is; `None` when the key is absent.
    pub fn raw_demographics(&self) -> Option<&Value> {
        self.data.get("demographics")
    }

    /// The parsed classification, if one is stored and decodable.
    pub fn demographics(&self) -> Option<Demographics> {
        self.raw_demographics().and_then(decode_stored)
    }

    pub fn to_card(&self, update_date: UpdateDate) -> BillCard {
        let latest_action = self.text("latest action date").filter(|s| !s.is_empty());
        let update_date = match update_date {
            UpdateDate::LatestAction => latest_action,
            UpdateDate::LatestActionOrWriteDate => {
                latest_action.or_else(|| self.text("date").filter(|s| !s.is_empty()))
            }
        }
        .unwrap_or("N/A")
        .to_string();

        let populations = self
            .raw_demographics()
            .cloned()
            .unwrap_or_else(|| Value::String(String::new()));

        BillCard {
            id: self.id.clone(),
            title: self.title().unwrap_or("No title available").to_string(),
            description: self
                .text("summary")
                .unwrap_or("No description available")
                .to_string(),
            update_date,
            affected_populations_summary: populations.clone(),
            categorized_populations: populations,
            population_affect_summary: self
                .text("population affect summary")
                .unwrap_or("No population analysis available")
                .to_string(),
            bill_number: self.id.clone(),
            xml_link: self.text("xml link").unwrap_or_default().to_string(),
        }
    }
}

/// A bill as presented to the frontend and attached as chat context.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct BillCard {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub update_date: String,
    #[serde(default)]
    pub affected_populations_summary: Value,
    #[serde(default)]
    pub categorized_populations: Value,
    #[serde(default)]
    pub population_affect_summary: String,
    #[serde(default)]
    pub bill_number: String,
    #[serde(rename = "xml link", default)]
    pub xml_link: String,
}
