//! Classification preview for a handful of live bills, nothing written.

use serde::Serialize;
use serde_json::Value;

use billfinder_congress::BillSource;
use billfinder_core::vocabulary::Vocabulary;
use billfinder_llm::model::CompletionModel;
use billfinder_storage::store::DocumentStore;

use crate::error::IngestError;
use crate::pipeline::{IngestOptions, IngestedBill, ingest};

pub const PREVIEW_BATCH: usize = 2;

/// One previewed bill as returned by `/api/analyze_bills`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalyzedBill {
    /// The bill's document id, as on bill cards.
    pub bill_number: String,
    pub title: String,
    pub description: String,
    pub update_date: String,
    pub affected_populations_summary: Option<String>,
    /// Parsed categories when the reply parsed, otherwise the raw reply.
    pub categorized_populations: Value,
}

impl From<IngestedBill> for AnalyzedBill {
    fn from(bill: IngestedBill) -> Self {
        let categorized_populations = match (bill.demographics, bill.raw_categories) {
            (Some(demographics), _) => serde_json::to_value(demographics).unwrap_or(Value::Null),
            (None, Some(raw)) => Value::String(raw),
            (None, None) => Value::Null,
        };

        Self {
            bill_number: bill.id,
            title: bill.title,
            description: bill.description,
            update_date: bill.update_date.unwrap_or_else(|| "N/A".to_string()),
            affected_populations_summary: bill.analysis,
            categorized_populations,
        }
    }
}

/// Classify the first [`PREVIEW_BATCH`] recent bills without enrichment or
/// persistence.
pub async fn analyze_preview(
    source: &dyn BillSource,
    model: &dyn CompletionModel,
    store: &dyn DocumentStore,
    vocabulary: &Vocabulary,
) -> Result<Vec<AnalyzedBill>, IngestError> {
    let options = IngestOptions {
        batch: PREVIEW_BATCH,
        enrich: false,
        persist: false,
        ..IngestOptions::default()
    };
    let report = ingest(source, model, store, vocabulary, &options).await?;
    Ok(report.bills.into_iter().map(AnalyzedBill::from).collect())
}
