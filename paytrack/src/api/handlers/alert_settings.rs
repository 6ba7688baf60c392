use axum::{Json, extract::State};
use tracing::info;

use crate::{
    AppState,
    api::models::alert_settings::{AlertSettingsResponse, AlertSettingsUpdate},
    db::models::alert_settings::AlertSettingsCreateDBRequest,
    errors::Result,
};

#[utoipa::path(
    get,
    path = "/payments/alert-settings",
    tag = "alert-settings",
    summary = "Get alert settings",
    description = "The most recently saved thresholds. Saves and returns the configured defaults if none exist yet.",
    responses(
        (status = 200, description = "Current alert settings", body = AlertSettingsResponse),
        (status = 500, description = "Internal server error"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn get_alert_settings(State(state): State<AppState>) -> Result<Json<AlertSettingsResponse>> {
    if let Some(settings) = state.alert_settings.latest().await? {
        return Ok(Json(settings.into()));
    }

    let defaults = &state.config.alerts;
    info!(
        warning = defaults.warning_threshold,
        critical = defaults.critical_threshold,
        "No alert settings saved, storing defaults"
    );
    let settings = state
        .alert_settings
        .save(&AlertSettingsCreateDBRequest::new(defaults.warning_threshold, defaults.critical_threshold))
        .await?;
    Ok(Json(settings.into()))
}

#[utoipa::path(
    post,
    path = "/payments/alert-settings",
    tag = "alert-settings",
    summary = "Save alert settings",
    description = "Store a new revision of the thresholds. Both must be between 0 and 100 and warning must be below critical.",
    request_body = AlertSettingsUpdate,
    responses(
        (status = 200, description = "Saved alert settings", body = AlertSettingsResponse),
        (status = 400, description = "Invalid thresholds"),
        (status = 500, description = "Internal server error"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn save_alert_settings(State(state): State<AppState>, Json(data): Json<AlertSettingsUpdate>) -> Result<Json<AlertSettingsResponse>> {
    let request = AlertSettingsCreateDBRequest {
        warning_threshold: data.warning_threshold,
        critical_threshold: data.critical_threshold,
        query_text: data.query_text,
    };
    let settings = state.alert_settings.save(&request).await?;
    Ok(Json(settings.into()))
}
