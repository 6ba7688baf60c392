//! Common type definitions.
//!
//! Entity IDs are plain integers handed out by the stores, wrapped in type aliases so
//! signatures say which entity they refer to.
//!
//! - [`PaymentId`]: Payment record identifier
//! - [`AlertSettingsId`]: Alert settings revision identifier

// Type aliases for IDs
pub type PaymentId = i64;
pub type AlertSettingsId = i64;
