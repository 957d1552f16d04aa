//! Classification diagnostics for stored bills.

use serde::Serialize;
use serde_json::Value;

use billfinder_core::category::Category;
use billfinder_core::classification::json_type_name;
use billfinder_core::keys::Collection;
use billfinder_core::models::bill::StoredBill;
use billfinder_core::models::demographics::Demographics;
use billfinder_storage::store::DocumentStore;

use crate::error::QueryError;
use crate::filter::matches;

pub const DIAGNOSTIC_LIMIT: usize = 5;

/// The age group every report entry is checked against.
pub const SAMPLE_AGE_GROUP: &str = "19-25";

/// How one stored bill's classification decodes and matches.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BillDiagnostic {
    pub bill_id: String,
    pub title: String,
    pub demographics_type: &'static str,
    pub demographics_content: Value,
    pub parsed_demographics: Option<Demographics>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub test_match: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bill_age_groups: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_age_groups: Option<Vec<String>>,
}

impl BillDiagnostic {
    pub fn inspect(bill: &StoredBill) -> Self {
        let raw = bill.raw_demographics().cloned().unwrap_or(Value::Null);
        let parsed = bill.demographics();

        let mut diagnostic = Self {
            bill_id: bill.id.clone(),
            title: bill.title().unwrap_or("No title").to_string(),
            demographics_type: json_type_name(&raw),
            demographics_content: raw,
            parsed_demographics: parsed.clone(),
            test_match: None,
            bill_age_groups: None,
            user_age_groups: None,
        };

        if let Some(parsed) = parsed.filter(|p| p.contains_key(Category::AgeGroups)) {
            let sample = Demographics::new().with(Category::AgeGroups, [SAMPLE_AGE_GROUP]);
            diagnostic.test_match = Some(matches(&sample, Some(&parsed)));
            diagnostic.bill_age_groups = Some(parsed.get(Category::AgeGroups).to_vec());
            diagnostic.user_age_groups = Some(sample.get(Category::AgeGroups).to_vec());
        }

        diagnostic
    }
}

/// Diagnostics for the first [`DIAGNOSTIC_LIMIT`] bills in store order.
pub async fn inspect_bills(store: &dyn DocumentStore) -> Result<Vec<BillDiagnostic>, QueryError> {
    let docs = store.list(Collection::Bills, DIAGNOSTIC_LIMIT).await?;
    Ok(docs
        .into_iter()
        .map(|doc| BillDiagnostic::inspect(&StoredBill::new(doc.id, doc.data)))
        .collect())
}
