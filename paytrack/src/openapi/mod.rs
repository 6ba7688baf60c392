//! OpenAPI documentation for the dashboard API served under `/api`.
//!
//! The document is served as JSON at `/api-docs/openapi.json` and rendered at `/docs`.

use utoipa::OpenApi;

use crate::{analytics, api, db};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "paytrack",
        description = "Payment tracking dashboard API"
    ),
    servers(
        (url = "/api", description = "Dashboard API")
    ),
    paths(
        api::handlers::payments::list_payments,
        api::handlers::payments::get_payment,
        api::handlers::payments::list_payments_by_status,
        api::handlers::payments::list_recent_payments,
        api::handlers::payments::get_payment_statistics,
        api::handlers::payments::create_payment,
        api::handlers::payments::update_payment_status,
        api::handlers::payments::generate_sample_data,
        api::handlers::aged_metrics::get_aged_metrics,
        api::handlers::filters::list_payment_statuses,
        api::handlers::filters::list_payment_methods,
        api::handlers::filters::list_order_types,
        api::handlers::alert_settings::get_alert_settings,
        api::handlers::alert_settings::save_alert_settings,
    ),
    components(
        schemas(
            db::models::payments::PaymentMethod,
            db::models::payments::PaymentStatus,
            api::models::payments::PaymentCreate,
            api::models::payments::PaymentResponse,
            api::models::payments::SampleDataResponse,
            api::models::aged_metrics::AgedMetricsResponse,
            api::models::aged_metrics::AgeBucketResponse,
            api::models::aged_metrics::TotalResponse,
            api::models::filters::FilterOption,
            api::models::alert_settings::AlertSettingsUpdate,
            api::models::alert_settings::AlertSettingsResponse,
            analytics::TransactionProjection,
            analytics::statistics::PaymentStatistics,
        )
    ),
    tags(
        (name = "payments", description = "Stored payments, status changes and statistics"),
        (name = "aged-metrics", description = "Payments grouped into age buckets. Frequency picks the bucket unit \
            (hours, days, weeks or months) and the date filter picks how many buckets there are."),
        (name = "filters", description = "Options for the aged-metrics filter dropdowns"),
        (name = "alert-settings", description = "Warning and critical thresholds for dashboard alerts"),
    )
)]
pub struct ApiDoc;
