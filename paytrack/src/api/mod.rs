//! API layer for HTTP request handling and data models.
//!
//! - **[`handlers`]**: Axum route handlers
//! - **[`models`]**: Request/response data structures
//!
//! # API Structure
//!
//! Everything the dashboard calls lives under `/api/payments`:
//!
//! - **Payments** (`/api/payments`, `/api/payments/{id}`, ...): listing, lookup, creation and
//!   status changes
//! - **Aged metrics** (`/api/payments/aged-metrics`): the bucketed age report
//! - **Filters** (`/api/payments/filters/*`): dropdown options for the report filters
//! - **Alert settings** (`/api/payments/alert-settings`): warning/critical thresholds
//!
//! # OpenAPI Documentation
//!
//! All endpoints are documented with `utoipa`. The rendered docs are served at `/docs`.

pub mod handlers;
pub mod models;
