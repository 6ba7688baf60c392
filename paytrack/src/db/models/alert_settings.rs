//! Stored alert threshold settings.

use chrono::{DateTime, Utc};

use crate::types::AlertSettingsId;

/// Upper bound for both thresholds (they are percentages)
pub const MAX_THRESHOLD: i32 = 100;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertSettingsDBResponse {
    pub id: AlertSettingsId,
    pub warning_threshold: i32,
    pub critical_threshold: i32,
    pub query_text: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct AlertSettingsCreateDBRequest {
    pub warning_threshold: i32,
    pub critical_threshold: i32,
    pub query_text: Option<String>,
}

impl AlertSettingsCreateDBRequest {
    pub fn new(warning_threshold: i32, critical_threshold: i32) -> Self {
        Self {
            warning_threshold,
            critical_threshold,
            query_text: None,
        }
    }
}

/// Check a warning/critical pair. Both must be percentages and warning must sit strictly
/// below critical.
pub fn validate_thresholds(warning_threshold: i32, critical_threshold: i32) -> Result<(), String> {
    if !(0..=MAX_THRESHOLD).contains(&warning_threshold) {
        return Err(format!("Warning threshold must be between 0 and {MAX_THRESHOLD}"));
    }
    if !(0..=MAX_THRESHOLD).contains(&critical_threshold) {
        return Err(format!("Critical threshold must be between 0 and {MAX_THRESHOLD}"));
    }
    if warning_threshold >= critical_threshold {
        return Err("Warning threshold must be less than critical threshold".to_string());
    }
    Ok(())
}
