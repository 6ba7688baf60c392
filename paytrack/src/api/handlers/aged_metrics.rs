use axum::{
    Json,
    extract::{Query, State},
};
use chrono::Utc;

use crate::{
    AppState,
    analytics::{self, Frequency},
    api::models::aged_metrics::{AgedMetricsQuery, AgedMetricsResponse},
    errors::Result,
};

/// Counter of generated reports, labelled by frequency
pub const REPORTS_TOTAL: &str = "paytrack_aged_metrics_reports_total";

#[utoipa::path(
    get,
    path = "/payments/aged-metrics",
    tag = "aged-metrics",
    summary = "Aged metrics report",
    description = "Group filtered payments into age buckets. The bucket count and width follow `frequency` and \
                   `dateFilter`. The total covers every payment that passed the filters, including those older than \
                   the last bucket.",
    params(AgedMetricsQuery),
    responses(
        (status = 200, description = "Bucketed report", body = AgedMetricsResponse),
        (status = 500, description = "Internal server error or incomplete stored payments"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn get_aged_metrics(State(state): State<AppState>, Query(query): Query<AgedMetricsQuery>) -> Result<Json<AgedMetricsResponse>> {
    // One snapshot per request; filters are not pushed down to the store
    let snapshot = state.payments.list_all().await?;
    let report = analytics::aged_metrics(snapshot, &query.criteria(), Some(query.frequency()), Utc::now())?;

    metrics::counter!(REPORTS_TOTAL, "frequency" => Frequency::parse(Some(query.frequency())).as_str()).increment(1);
    Ok(Json(report.into()))
}
