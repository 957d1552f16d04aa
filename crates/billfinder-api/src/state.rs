use std::sync::Arc;

use billfinder_congress::BillSource;
use billfinder_core::vocabulary::Vocabulary;
use billfinder_llm::model::CompletionModel;
use billfinder_storage::store::DocumentStore;

/// Shared application state, injected into all route handlers via Axum state.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn DocumentStore>,
    pub model: Arc<dyn CompletionModel>,
    pub bills: Arc<dyn BillSource>,
    pub vocabulary: Arc<Vocabulary>,
}
