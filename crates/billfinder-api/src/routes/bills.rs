use std::collections::HashMap;

use axum::Json;
use axum::extract::{Path, Query, State};
use serde::Serialize;

use billfinder_core::category::Category;
use billfinder_core::models::bill::BillCard;
use billfinder_core::models::demographics::Demographics;
use billfinder_query::bills::{TOP_LIMIT, get_bill, match_bills, top_bills};

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Serialize)]
pub struct DataResponse {
    pub success: bool,
    pub data: Vec<BillCard>,
    pub count: usize,
    pub filtered_by_demographics: bool,
}

/// Build a selection from comma-separated query parameters named after the
/// categories. Empty lists are left out.
pub fn selection_from_params(params: &HashMap<String, String>) -> Demographics {
    let mut selection = Demographics::new();
    for category in Category::ALL {
        if let Some(raw) = params.get(category.key()) {
            let values = Demographics::split_list(raw);
            if !values.is_empty() {
                selection.insert(category, values);
            }
        }
    }
    selection
}

/// Bills matching the demographics in the query string, or the newest bills
/// when none are given.
pub async fn get_data(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Json<DataResponse> {
    let selection = selection_from_params(&params);
    let filtered = !selection.is_blank();

    let data = if filtered {
        match_bills(state.store.as_ref(), &selection).await
    } else {
        top_bills(state.store.as_ref(), TOP_LIMIT).await
    };

    Json(DataResponse {
        success: true,
        count: data.len(),
        data,
        filtered_by_demographics: filtered,
    })
}

pub async fn get_bill_card(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<BillCard>, ApiError> {
    get_bill(state.store.as_ref(), &id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("bill not found: {id}")))
}
