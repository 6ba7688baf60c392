//! Data access layer for payment records and alert settings.
//!
//! Every store is an in-memory map behind an async trait. The rest of the application only
//! talks to the trait.
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  (API request handlers)
//! └──────┬──────┘
//!        │
//!        ↓
//! ┌─────────────┐
//! │   Stores    │  (db::handlers - PaymentStore, AlertSettingsStore)
//! └──────┬──────┘
//!        │
//!        ↓
//! ┌─────────────┐
//! │   Models    │  (db::models - stored records)
//! └─────────────┘
//! ```
//!
//! # Modules
//!
//! - [`handlers`]: Store traits and their in-memory implementations
//! - [`models`]: Stored record structures and request types
//! - [`errors`]: Store-specific error types

pub mod errors;
pub mod handlers;
pub mod models;
