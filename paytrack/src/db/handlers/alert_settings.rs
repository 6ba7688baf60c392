//! Alert settings store.
//!
//! Every save creates a new revision; readers only ever see the latest one.

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use tracing::{info, instrument};

use crate::{
    db::{
        errors::{DbError, Result},
        models::alert_settings::{AlertSettingsCreateDBRequest, AlertSettingsDBResponse, validate_thresholds},
    },
    types::AlertSettingsId,
};

#[async_trait]
pub trait AlertSettingsStore: Send + Sync {
    /// The most recently saved settings, if any
    async fn latest(&self) -> Result<Option<AlertSettingsDBResponse>>;

    /// Validate and save a new revision.
    ///
    /// Fails with [`DbError::Validation`] when the thresholds are out of range or not ordered.
    async fn save(&self, request: &AlertSettingsCreateDBRequest) -> Result<AlertSettingsDBResponse>;
}

#[derive(Debug)]
pub struct InMemoryAlertSettings {
    revisions: DashMap<AlertSettingsId, AlertSettingsDBResponse>,
    next_id: AtomicI64,
}

impl Default for InMemoryAlertSettings {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryAlertSettings {
    pub fn new() -> Self {
        Self {
            revisions: DashMap::new(),
            next_id: AtomicI64::new(1),
        }
    }
}

#[async_trait]
impl AlertSettingsStore for InMemoryAlertSettings {
    async fn latest(&self) -> Result<Option<AlertSettingsDBResponse>> {
        Ok(self
            .revisions
            .iter()
            .max_by_key(|entry| *entry.key())
            .map(|entry| entry.value().clone()))
    }

    #[instrument(skip(self, request), fields(warning = request.warning_threshold, critical = request.critical_threshold), err)]
    async fn save(&self, request: &AlertSettingsCreateDBRequest) -> Result<AlertSettingsDBResponse> {
        validate_thresholds(request.warning_threshold, request.critical_threshold).map_err(|message| DbError::Validation { message })?;

        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let now = Utc::now();
        let settings = AlertSettingsDBResponse {
            id,
            warning_threshold: request.warning_threshold,
            critical_threshold: request.critical_threshold,
            query_text: request.query_text.clone(),
            created_at: now,
            updated_at: now,
        };
        self.revisions.insert(id, settings.clone());
        info!(settings_id = id, "Saved alert settings");
        Ok(settings)
    }
}
