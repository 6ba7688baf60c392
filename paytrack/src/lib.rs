//! # paytrack: Payment Tracking Dashboard Backend
//!
//! `paytrack` serves the API behind a payment tracking dashboard: it stores payments, reports on
//! them, and keeps the dashboard's alert thresholds.
//!
//! ## Overview
//!
//! The interesting part is the aged-metrics report ([`analytics`]). Given every stored payment
//! and a set of optional filters (order type, payment method, payment state, date range), it
//! groups the matching payments into age buckets. The bucket unit follows the requested
//! frequency (hours, days, weeks or calendar months) and the number of buckets follows the date
//! range. Each bucket carries a count, an amount and the payments in it; a grand total covers
//! every payment that passed the filters.
//!
//! Everything else is a thin layer around that: CRUD-style payment endpoints, summary
//! statistics, filter dropdown options, alert settings and a sample-data generator.
//!
//! ## Architecture
//!
//! The HTTP layer is built on [Axum](https://github.com/tokio-rs/axum). Handlers ([`api`]) read
//! from stores ([`db`]) held in [`AppState`] behind traits, so the in-memory stores used here
//! can be replaced without touching handlers. The report itself is a pure function over a
//! snapshot of payments taken once per request.
//!
//! ### Core Components
//!
//! - **[`analytics`]**: filtering, bucket layout, aggregation and statistics
//! - **[`api`]**: handlers and request/response models, all under `/api/payments`
//! - **[`db`]**: store traits, in-memory implementations and stored record types
//! - **[`sample_data`]**: sample payment generation
//! - **[`config`]**: YAML + environment configuration
//! - **[`telemetry`]**: tracing and optional OTLP export
//!
//! ## Getting Started
//!
//! ```no_run
//! use paytrack::{Application, Config};
//!
//! # async fn run() -> anyhow::Result<()> {
//! let config = Config::default();
//! Application::new(config).await?.serve(std::future::pending()).await
//! # }
//! ```

pub mod analytics;
pub mod api;
pub mod config;
pub mod db;
pub mod errors;
pub mod openapi;
pub mod sample_data;
pub mod telemetry;
#[cfg(test)]
pub mod test_utils;
pub mod types;

use std::sync::Arc;

use axum::{
    Json, Router,
    http::{HeaderValue, Method, header},
    routing::{get, post, put},
};
use axum_prometheus::PrometheusMetricLayer;
use bon::Builder;
use chrono::Utc;
use tokio::net::TcpListener;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{Level, debug, info, instrument};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

pub use config::Config;

use crate::{
    api::handlers::{aged_metrics, alert_settings, filters, payments},
    config::CorsOrigin,
    db::handlers::{AlertSettingsStore, InMemoryAlertSettings, InMemoryPayments, PaymentStore},
    openapi::ApiDoc,
};

/// Shared state for every handler.
///
/// ```ignore
/// let state = AppState::builder()
///     .payments(Arc::new(InMemoryPayments::new()))
///     .alert_settings(Arc::new(InMemoryAlertSettings::new()))
///     .config(config)
///     .build();
/// ```
#[derive(Clone, Builder)]
pub struct AppState {
    pub payments: Arc<dyn PaymentStore>,
    pub alert_settings: Arc<dyn AlertSettingsStore>,
    pub config: Config,
}

fn create_cors_layer(config: &Config) -> anyhow::Result<CorsLayer> {
    let cors = &config.cors;

    // tower-http rejects "*" inside an origin list
    let allow_origin = if cors.allowed_origins.iter().any(|origin| matches!(origin, CorsOrigin::Wildcard)) {
        AllowOrigin::any()
    } else {
        let mut origins = Vec::new();
        for origin in &cors.allowed_origins {
            if let CorsOrigin::Url(url) = origin {
                origins.push(url.origin().ascii_serialization().parse::<HeaderValue>()?);
            }
        }
        AllowOrigin::list(origins)
    };

    let mut layer = CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(cors.allow_credentials);

    if let Some(max_age) = cors.max_age {
        layer = layer.max_age(std::time::Duration::from_secs(max_age));
    }

    Ok(layer)
}

fn api_routes(state: &AppState) -> Router {
    Router::new()
        .route("/payments", get(payments::list_payments).post(payments::create_payment))
        .route("/payments/statistics", get(payments::get_payment_statistics))
        .route("/payments/generate-sample-data", post(payments::generate_sample_data))
        .route("/payments/status/{status}", get(payments::list_payments_by_status))
        .route("/payments/recent/{hours}", get(payments::list_recent_payments))
        .route("/payments/aged-metrics", get(aged_metrics::get_aged_metrics))
        .route("/payments/filters/payment-statuses", get(filters::list_payment_statuses))
        .route("/payments/filters/payment-methods", get(filters::list_payment_methods))
        .route("/payments/filters/order-types", get(filters::list_order_types))
        .route(
            "/payments/alert-settings",
            get(alert_settings::get_alert_settings).post(alert_settings::save_alert_settings),
        )
        .route("/payments/{id}", get(payments::get_payment))
        .route("/payments/{id}/status", put(payments::update_payment_status))
        .with_state(state.clone())
}

/// Build the application router.
///
/// - Dashboard API under `/api`
/// - `/healthz`
/// - OpenAPI JSON at `/api-docs/openapi.json` and rendered docs at `/docs`
/// - Prometheus metrics at `/internal/metrics` when enabled
/// - CORS and request tracing
#[instrument(skip_all)]
pub fn build_router(state: &AppState) -> anyhow::Result<Router> {
    let router = Router::new()
        .route("/healthz", get(|| async { "OK" }))
        .route("/api-docs/openapi.json", get(|| async { Json(ApiDoc::openapi()) }))
        .nest("/api", api_routes(state))
        .merge(Scalar::with_url("/docs", ApiDoc::openapi()));

    let mut router = router.layer(create_cors_layer(&state.config)?);

    if state.config.enable_metrics {
        let (prometheus_layer, metric_handle) = PrometheusMetricLayer::pair();
        router = router
            .route("/internal/metrics", get(|| async move { metric_handle.render() }))
            .layer(prometheus_layer);
    }

    let router = router.layer(
        TraceLayer::new_for_http()
            .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
            .on_request(DefaultOnRequest::new().level(Level::INFO))
            .on_response(DefaultOnResponse::new().level(Level::INFO)),
    );

    Ok(router)
}

pub struct Application {
    router: Router,
    app_state: AppState,
    config: Config,
}

impl Application {
    /// Create stores, seed sample data if configured, and build the router
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        debug!("Starting paytrack with configuration: {:#?}", config);

        let app_state = AppState::builder()
            .payments(Arc::new(InMemoryPayments::new()))
            .alert_settings(Arc::new(InMemoryAlertSettings::new()))
            .config(config.clone())
            .build();

        if config.sample_data.seed_on_startup {
            sample_data::seed_sample_data(app_state.payments.as_ref(), &config.sample_data, Utc::now()).await?;
        }

        let router = build_router(&app_state)?;

        Ok(Self {
            router,
            app_state,
            config,
        })
    }

    #[cfg(test)]
    pub fn into_test_server(self) -> (axum_test::TestServer, AppState) {
        let server = axum_test::TestServer::new(self.router.into_make_service()).expect("Failed to create test server");
        (server, self.app_state)
    }

    /// Start serving the application
    pub async fn serve<F>(self, shutdown: F) -> anyhow::Result<()>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let bind_addr = self.config.bind_address();
        let listener = TcpListener::bind(&bind_addr).await?;
        info!(
            "paytrack listening on http://{}, docs at http://localhost:{}/docs",
            bind_addr, self.config.port
        );

        axum::serve(listener, self.router.into_make_service())
            .with_graceful_shutdown(shutdown)
            .await?;

        info!("Shutting down telemetry...");
        telemetry::shutdown_telemetry();

        Ok(())
    }
}
