//! The ingestion procedure.
//!
//! Fetch a page of recently updated bills, optionally look up each bill's
//! latest summary and formatted-XML link, classify it, and write a
//! [`BillRecord`]. Per-bill lookup and classification failures degrade to
//! nulls; only a failure to list bills aborts the run.

use tracing::{error, info, warn};

use billfinder_congress::BillSource;
use billfinder_congress::client::DEFAULT_PAGE_SIZE;
use billfinder_congress::types::{BillListItem, BillPage};
use billfinder_core::keys::{Collection, bill_id};
use billfinder_core::models::bill::BillRecord;
use billfinder_core::models::demographics::Demographics;
use billfinder_core::vocabulary::Vocabulary;
use billfinder_llm::classify::classify_bill;
use billfinder_llm::model::CompletionModel;
use billfinder_storage::store::{DocumentStore, save};

use crate::error::IngestError;

pub const NO_DESCRIPTION: &str = "No description available";

/// Title shown for untitled bills that are classified but not stored.
pub const NO_TITLE: &str = "No title available";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestOptions {
    /// Bills processed from the page.
    pub batch: usize,
    /// Bills requested from the listing.
    pub page_size: u32,
    /// Look up summaries and text links.
    pub enrich: bool,
    /// Write records to the store.
    pub persist: bool,
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self {
            batch: DEFAULT_PAGE_SIZE as usize,
            page_size: DEFAULT_PAGE_SIZE,
            enrich: true,
            persist: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BillOutcome {
    Stored,
    /// Classified but not written (`persist == false`).
    NotPersisted,
    /// The record failed validation.
    Skipped { reason: String },
    /// The store rejected the write.
    Failed { reason: String },
}

/// What happened to one bill.
#[derive(Debug, Clone)]
pub struct IngestedBill {
    pub id: String,
    pub number: String,
    pub title: String,
    pub description: String,
    pub update_date: Option<String>,
    pub summary: Option<String>,
    pub xml_link: Option<String>,
    /// Free-text analysis; `None` when the model call failed.
    pub analysis: Option<String>,
    /// Structured reply as returned by the model.
    pub raw_categories: Option<String>,
    pub demographics: Option<Demographics>,
    pub outcome: BillOutcome,
}

#[derive(Debug, Clone, Default)]
pub struct IngestReport {
    pub bills: Vec<IngestedBill>,
}

impl IngestReport {
    pub fn count(&self, pred: impl Fn(&BillOutcome) -> bool) -> usize {
        self.bills.iter().filter(|b| pred(&b.outcome)).count()
    }

    pub fn stored(&self) -> usize {
        self.count(|o| *o == BillOutcome::Stored)
    }

    pub fn classified(&self) -> usize {
        self.bills.iter().filter(|b| b.demographics.is_some()).count()
    }
}

/// Fetch a listing page, failing when it carries no `bills` array.
pub async fn fetch_page(source: &dyn BillSource, page_size: u32) -> Result<Vec<BillListItem>, IngestError> {
    let BillPage { raw, bills } = source.recent_bills(page_size).await?;
    bills.ok_or(IngestError::NoBills { payload: raw })
}

/// Run ingestion end to end.
pub async fn ingest(
    source: &dyn BillSource,
    model: &dyn CompletionModel,
    store: &dyn DocumentStore,
    vocabulary: &Vocabulary,
    options: &IngestOptions,
) -> Result<IngestReport, IngestError> {
    let listing = fetch_page(source, options.page_size).await?;
    info!(
        listed = listing.len(),
        batch = options.batch,
        enrich = options.enrich,
        persist = options.persist,
        "starting ingestion"
    );

    let mut report = IngestReport::default();
    for item in listing.iter().take(options.batch) {
        let bill = process_bill(source, model, store, vocabulary, options, item).await;
        report.bills.push(bill);
    }

    info!(
        processed = report.bills.len(),
        stored = report.stored(),
        classified = report.classified(),
        "ingestion finished"
    );
    Ok(report)
}

async fn process_bill(
    source: &dyn BillSource,
    model: &dyn CompletionModel,
    store: &dyn DocumentStore,
    vocabulary: &Vocabulary,
    options: &IngestOptions,
    item: &BillListItem,
) -> IngestedBill {
    let reference = item.reference();
    let id = bill_id(item.congress, &item.bill_type, &item.number);
    let description = item.latest_action_text().unwrap_or(NO_DESCRIPTION).to_string();
    let title = match item.title.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
        Some(title) => title.to_string(),
        None if options.persist => {
            warn!(bill = %id, "skipping untitled bill");
            return IngestedBill {
                id,
                number: item.number.clone(),
                title: String::new(),
                description,
                update_date: item.update_date.clone(),
                summary: None,
                xml_link: None,
                analysis: None,
                raw_categories: None,
                demographics: None,
                outcome: BillOutcome::Skipped {
                    reason: "bill has no title".to_string(),
                },
            };
        }
        None => NO_TITLE.to_string(),
    };

    let (summary, xml_link) = if options.enrich {
        let summary = source.latest_summary(&reference).await.unwrap_or_else(|e| {
            warn!(bill = %id, error = %e, "summary lookup failed");
            None
        });
        let xml_link = source.formatted_xml_link(&reference).await.unwrap_or_else(|e| {
            warn!(bill = %id, error = %e, "text version lookup failed");
            None
        });
        (summary, xml_link)
    } else {
        (None, None)
    };

    let (analysis, raw_categories, demographics) =
        match classify_bill(model, vocabulary, &title, &description).await {
            Ok(c) => (Some(c.analysis), Some(c.raw_categories), c.outcome.into_demographics()),
            Err(e) => {
                error!(bill = %id, error = %e, "classification failed");
                (None, None, None)
            }
        };

    let mut ingested = IngestedBill {
        id: id.clone(),
        number: item.number.clone(),
        title: title.clone(),
        description: description.clone(),
        update_date: item.update_date.clone(),
        summary: summary.clone(),
        xml_link: xml_link.clone(),
        analysis: analysis.clone(),
        raw_categories,
        demographics: demographics.clone(),
        outcome: BillOutcome::NotPersisted,
    };

    let record = match BillRecord::new(
        title,
        summary,
        Some(description),
        demographics,
        analysis,
        item.latest_action_date().map(str::to_string),
        xml_link,
        jiff::Timestamp::now(),
    ) {
        Ok(record) => record,
        Err(e) => {
            warn!(bill = %id, error = %e, "skipping bill");
            ingested.outcome = BillOutcome::Skipped {
                reason: e.to_string(),
            };
            return ingested;
        }
    };

    if options.persist {
        ingested.outcome = match save(store, Collection::Bills, &id, &record).await {
            Ok(()) => {
                info!(bill = %id, "bill stored");
                BillOutcome::Stored
            }
            Err(e) => {
                error!(bill = %id, error = %e, "writing bill failed");
                BillOutcome::Failed {
                    reason: e.to_string(),
                }
            }
        };
    }

    ingested
}
