//! Options for the aged-metrics filter dropdowns.

use axum::Json;

use crate::{
    api::models::filters::FilterOption,
    db::models::payments::{PaymentMethod, PaymentStatus},
    sample_data::ORDER_TYPES,
};

#[utoipa::path(
    get,
    path = "/payments/filters/payment-statuses",
    tag = "filters",
    summary = "Payment state options",
    description = "Statuses offered in the state filter. REFUNDED and COMPLETED are not offered.",
    responses(
        (status = 200, description = "Status options", body = [FilterOption]),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn list_payment_statuses() -> Json<Vec<FilterOption>> {
    let options = PaymentStatus::ALL
        .into_iter()
        .filter(|status| !matches!(status, PaymentStatus::Refunded | PaymentStatus::Completed))
        .map(|status| FilterOption::from_token(status.as_str()))
        .collect();
    Json(options)
}

#[utoipa::path(
    get,
    path = "/payments/filters/payment-methods",
    tag = "filters",
    summary = "Payment method options",
    responses(
        (status = 200, description = "Method options", body = [FilterOption]),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn list_payment_methods() -> Json<Vec<FilterOption>> {
    Json(
        PaymentMethod::ALL
            .into_iter()
            .map(|method| FilterOption::from_token(method.as_str()))
            .collect(),
    )
}

#[utoipa::path(
    get,
    path = "/payments/filters/order-types",
    tag = "filters",
    summary = "Order type options",
    responses(
        (status = 200, description = "Order type options", body = [FilterOption]),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn list_order_types() -> Json<Vec<FilterOption>> {
    Json(ORDER_TYPES.iter().map(|(value, label)| FilterOption::new(*value, *label)).collect())
}
