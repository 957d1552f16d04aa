use axum::Json;
use axum::extract::State;
use serde::Serialize;

use billfinder_query::diagnostics::{BillDiagnostic, inspect_bills};

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Serialize)]
pub struct DebugResponse {
    pub bills: Vec<BillDiagnostic>,
}

/// How the first stored bills' classifications decode and match a fixed
/// sample selection.
pub async fn debug_demographics(State(state): State<AppState>) -> Result<Json<DebugResponse>, ApiError> {
    let bills = inspect_bills(state.store.as_ref()).await?;
    Ok(Json(DebugResponse { bills }))
}
