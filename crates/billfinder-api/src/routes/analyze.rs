use axum::Json;
use axum::extract::State;
use serde::Serialize;

use billfinder_ingest::preview::{AnalyzedBill, analyze_preview};

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Serialize)]
pub struct AnalyzeResponse {
    pub success: bool,
    pub count: usize,
    pub bills: Vec<AnalyzedBill>,
}

/// Classify a couple of live bills without storing anything.
pub async fn analyze_bills(State(state): State<AppState>) -> Result<Json<AnalyzeResponse>, ApiError> {
    let bills = analyze_preview(
        state.bills.as_ref(),
        state.model.as_ref(),
        state.store.as_ref(),
        &state.vocabulary,
    )
    .await?;

    Ok(Json(AnalyzeResponse {
        success: true,
        count: bills.len(),
        bills,
    }))
}
