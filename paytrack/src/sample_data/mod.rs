//! Sample payment generation.
//!
//! Fills an empty store with plausible payments so the dashboard has something to show.
//! Generation is deterministic in everything except amounts, creation times and transaction
//! ids.

use chrono::{DateTime, Duration as ChronoDuration, Utc};
use rand::prelude::RngExt;
use rand::rng;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::db::{
    errors::Result,
    handlers::PaymentStore,
    models::payments::{PaymentCreateDBRequest, PaymentMethod, PaymentStatus},
};

/// Configuration for sample payment generation.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct SampleDataConfig {
    /// Seed the store when the server starts and the store is empty
    pub seed_on_startup: bool,
    /// Number of payments to generate
    pub count: usize,
    /// Payments are created at a random whole hour within this long ago
    #[serde(with = "humantime_serde")]
    pub span: Duration,
}

impl Default for SampleDataConfig {
    fn default() -> Self {
        Self {
            seed_on_startup: false,
            count: 200,
            span: Duration::from_secs(1440 * 60 * 60), // 60 days
        }
    }
}

/// Order types offered by the dashboard, with their display labels
pub const ORDER_TYPES: [(&str, &str); 6] = [
    ("regular", "Regular"),
    ("subscription", "Subscription"),
    ("onetime", "Onetime"),
    ("cvc_no_show_penality", "CVC No Show Penality"),
    ("loyalty", "Loyalty"),
    ("cwav_telemedicine", "CWAV Telemedicine"),
];

const CUSTOMER_NAMES: [&str; 5] = ["John Doe", "Jane Smith", "Bob Johnson", "Alice Williams", "Charlie Brown"];
const COUNTRIES: [&str; 5] = ["USA", "UK", "Canada", "Australia", "Germany"];

/// Message stored on failed sample payments
pub const FAILED_PAYMENT_MESSAGE: &str = "Insufficient funds";

/// `TXN` followed by 16 upper-case hex characters
pub fn generate_transaction_id() -> String {
    let hex = Uuid::new_v4().simple().to_string();
    format!("TXN{}", hex[..16].to_uppercase())
}

fn sample_status(index: usize) -> PaymentStatus {
    // Every third payment succeeds, the rest walk the lifecycle
    if index % 3 == 0 {
        PaymentStatus::Success
    } else {
        PaymentStatus::LIFECYCLE[index % PaymentStatus::LIFECYCLE.len()]
    }
}

/// Build `config.count` sample payments created before `now`.
pub fn generate_sample_payments(config: &SampleDataConfig, now: DateTime<Utc>) -> Vec<PaymentCreateDBRequest> {
    let mut rng = rng();
    let span_hours = (config.span.as_secs() / 3600).max(1) as i64;

    (0..config.count)
        .map(|i| {
            let customer_name = CUSTOMER_NAMES[i % CUSTOMER_NAMES.len()];
            let status = sample_status(i);
            let cents: i64 = rng.random_range(1000..=51000);
            let hours_ago = rng.random_range(0..span_hours);

            PaymentCreateDBRequest {
                transaction_id: generate_transaction_id(),
                customer_id: format!("CUST{:05}", i + 1),
                customer_name: customer_name.to_string(),
                customer_email: format!("{}@example.com", customer_name.to_lowercase().replace(' ', ".")),
                amount: Decimal::new(cents, 2),
                currency: "USD".to_string(),
                status,
                payment_method: PaymentMethod::ALL[i % PaymentMethod::ALL.len()],
                created_at: now - ChronoDuration::hours(hours_ago),
                description: Some(format!("Order payment #{}", i + 1)),
                error_message: (status == PaymentStatus::Failed).then(|| FAILED_PAYMENT_MESSAGE.to_string()),
                order_id: Some(format!("ORD{:06}", i + 1)),
                order_type: Some(ORDER_TYPES[i % ORDER_TYPES.len()].0.to_string()),
                ip_address: Some(format!("192.168.{}.{}", i % 255, (i * 7) % 255)),
                country: Some(COUNTRIES[i % COUNTRIES.len()].to_string()),
            }
        })
        .collect()
}

/// Seed `store` with sample payments unless it already holds any.
///
/// Returns the number of payments created, 0 when the store was not empty.
#[instrument(skip_all, fields(count = config.count), err)]
pub async fn seed_sample_data(store: &dyn PaymentStore, config: &SampleDataConfig, now: DateTime<Utc>) -> Result<usize> {
    if store.count().await? > 0 {
        info!("Payments already present, skipping sample data");
        return Ok(0);
    }

    let requests = generate_sample_payments(config, now);
    let created = store.create_many_if_empty(&requests).await?;
    if created == 0 {
        info!("Payments were added concurrently, skipping sample data");
    } else {
        info!(created, "Generated sample payments");
    }
    Ok(created)
}
