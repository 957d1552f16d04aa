//! Bill listings for the frontend.
//!
//! The `try_*` functions surface storage failures; the plain variants log
//! them and answer with an empty list, which is what the HTTP layer serves.

use tracing::{error, info, warn};

use billfinder_core::keys::Collection;
use billfinder_core::models::bill::{BillCard, StoredBill, UpdateDate};
use billfinder_core::models::demographics::Demographics;
use billfinder_storage::error::StorageError;
use billfinder_storage::store::{Document, DocumentStore};

use crate::error::QueryError;
use crate::filter::matches;

/// Records examined per match request.
pub const SCAN_LIMIT: usize = 100;

/// Most matches returned per request.
pub const MATCH_LIMIT: usize = 10;

/// Default size of the unfiltered list.
pub const TOP_LIMIT: usize = 10;

/// Up to `limit` bills newest first, or in store order when the store
/// cannot order them.
async fn scan(store: &dyn DocumentStore, limit: usize) -> Result<Vec<StoredBill>, StorageError> {
    let docs = match store.list_newest(Collection::Bills, limit).await {
        Ok(docs) => docs,
        Err(e) => {
            warn!(error = %e, "newest-first listing failed, falling back to store order");
            store.list(Collection::Bills, limit).await?
        }
    };

    Ok(docs
        .into_iter()
        .map(|Document { id, data }| StoredBill::new(id, data))
        .collect())
}

pub async fn try_match_bills(
    store: &dyn DocumentStore,
    selection: &Demographics,
) -> Result<Vec<BillCard>, QueryError> {
    let scanned = scan(store, SCAN_LIMIT).await?;
    let scanned_count = scanned.len();

    let cards: Vec<BillCard> = scanned
        .iter()
        .filter(|bill| matches(selection, bill.demographics().as_ref()))
        .take(MATCH_LIMIT)
        .map(|bill| bill.to_card(UpdateDate::LatestAction))
        .collect();

    info!(scanned = scanned_count, matched = cards.len(), "matched bills");
    Ok(cards)
}

/// Up to [`MATCH_LIMIT`] of the newest [`SCAN_LIMIT`] bills that satisfy
/// `selection`.
pub async fn match_bills(store: &dyn DocumentStore, selection: &Demographics) -> Vec<BillCard> {
    try_match_bills(store, selection).await.unwrap_or_else(|e| {
        error!(error = %e, "bill matching failed");
        Vec::new()
    })
}

pub async fn try_top_bills(store: &dyn DocumentStore, limit: usize) -> Result<Vec<BillCard>, QueryError> {
    let cards = scan(store, limit)
        .await?
        .iter()
        .map(|bill| bill.to_card(UpdateDate::LatestActionOrWriteDate))
        .collect();
    Ok(cards)
}

/// The newest `limit` bills, unfiltered.
pub async fn top_bills(store: &dyn DocumentStore, limit: usize) -> Vec<BillCard> {
    try_top_bills(store, limit).await.unwrap_or_else(|e| {
        error!(error = %e, "listing top bills failed");
        Vec::new()
    })
}

/// One bill by id.
pub async fn get_bill(store: &dyn DocumentStore, id: &str) -> Result<Option<BillCard>, QueryError> {
    let card = store
        .get(Collection::Bills, id)
        .await?
        .map(|Document { id, data }| StoredBill::new(id, data).to_card(UpdateDate::LatestActionOrWriteDate));
    Ok(card)
}
