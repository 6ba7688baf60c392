//! API models for alert thresholds.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{db::models::alert_settings::AlertSettingsDBResponse, types::AlertSettingsId};

// Request models
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AlertSettingsUpdate {
    /// Percentage at which the dashboard warns (0-100, below `criticalThreshold`)
    pub warning_threshold: i32,
    /// Percentage at which the dashboard flags critical (0-100)
    pub critical_threshold: i32,
    /// Saved dashboard query the thresholds apply to
    pub query_text: Option<String>,
}

// Response models
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AlertSettingsResponse {
    pub id: AlertSettingsId,
    pub warning_threshold: i32,
    pub critical_threshold: i32,
    pub query_text: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<AlertSettingsDBResponse> for AlertSettingsResponse {
    fn from(db: AlertSettingsDBResponse) -> Self {
        Self {
            id: db.id,
            warning_threshold: db.warning_threshold,
            critical_threshold: db.critical_threshold,
            query_text: db.query_text,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}
