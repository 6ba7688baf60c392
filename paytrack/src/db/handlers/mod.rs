//! Store traits and their in-memory implementations.
//!
//! - [`PaymentStore`] / [`InMemoryPayments`]: payment records
//! - [`AlertSettingsStore`] / [`InMemoryAlertSettings`]: alert threshold revisions
//!
//! Handlers hold stores as `Arc<dyn Trait>` in [`crate::AppState`], so an alternative backend
//! only needs to implement the trait.

pub mod alert_settings;
pub mod payments;

pub use alert_settings::{AlertSettingsStore, InMemoryAlertSettings};
pub use payments::{InMemoryPayments, PaymentStore};
