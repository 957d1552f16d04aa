use axum::Json;
use axum::extract::{Path, State};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use billfinder_core::keys::Collection;
use billfinder_core::models::demographics::Demographics;
use billfinder_core::models::user::UserProfile;
use billfinder_storage::store::{load, save_merged};

use crate::error::ApiError;
use crate::extract::ApiJson;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SaveDemographicsRequest {
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    /// Either the category keys or the questionnaire's camelCase keys.
    #[serde(default)]
    pub demographics: Value,
}

#[derive(Serialize)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

#[derive(Serialize)]
pub struct ProfileResponse {
    pub success: bool,
    pub profile: UserProfile,
}

/// Trimmed, non-empty user id or a 400.
pub fn require_user_id(user_id: Option<&str>) -> Result<&str, ApiError> {
    user_id
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .ok_or_else(|| ApiError::BadRequest("User ID required".to_string()))
}

pub async fn save_demographics(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<SaveDemographicsRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let user_id = require_user_id(req.user_id.as_deref())?;
    let demographics = Demographics::from_value(&req.demographics).unwrap_or_default();

    let existing: Option<UserProfile> = load(state.store.as_ref(), Collection::Users, user_id).await?;
    let profile = UserProfile::upsert(existing, req.email, demographics, jiff::Timestamp::now());
    save_merged(state.store.as_ref(), Collection::Users, user_id, &profile).await?;

    tracing::info!(user_id, "demographics saved");
    Ok(Json(MessageResponse {
        success: true,
        message: "Demographics saved successfully".to_string(),
    }))
}

pub async fn get_demographics(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<ProfileResponse>, ApiError> {
    let profile: UserProfile = load(state.store.as_ref(), Collection::Users, &user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("user not found: {user_id}")))?;

    Ok(Json(ProfileResponse {
        success: true,
        profile,
    }))
}
