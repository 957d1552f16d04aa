use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::demographics::Demographics;

/// A user's saved demographic profile, keyed by auth user id.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct UserProfile {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    #[ts(type = "Record<string, Array<string>>")]
    pub demographics: Demographics,
    pub created_at: jiff::Timestamp,
    pub updated_at: jiff::Timestamp,
}

impl UserProfile {
    /// Apply a new submission on top of an existing profile.
    ///
    /// `created_at` survives from the existing profile; everything else is
    /// replaced.
    pub fn upsert(
        existing: Option<UserProfile>,
        email: Option<String>,
        demographics: Demographics,
        now: jiff::Timestamp,
    ) -> Self {
        let created_at = existing.map(|p| p.created_at).unwrap_or(now);
        Self {
            email,
            demographics,
            created_at,
            updated_at: now,
        }
    }
}
