//! HTTP request handlers, one module per resource.
//!
//! - [`payments`]: payment CRUD, statistics and sample data
//! - [`aged_metrics`]: the aged-metrics report
//! - [`filters`]: dropdown options for report filters
//! - [`alert_settings`]: alert threshold retrieval and updates
//!
//! # Error Handling
//!
//! Handlers return [`crate::errors::Result`]; errors convert into HTTP responses with a
//! user-safe message.

pub mod aged_metrics;
pub mod alert_settings;
pub mod filters;
pub mod payments;
