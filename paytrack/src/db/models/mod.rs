//! Stored record structures.
//!
//! - [`payments`]: Payment records, payment method/status enums and store requests
//! - [`alert_settings`]: Alert threshold revisions

pub mod alert_settings;
pub mod payments;
