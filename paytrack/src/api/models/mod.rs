//! API request/response models.

pub mod aged_metrics;
pub mod alert_settings;
pub mod filters;
pub mod payments;
