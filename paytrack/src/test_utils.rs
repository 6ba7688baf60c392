//! Test utilities shared by handler and analytics tests.

use axum_test::TestServer;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::{
    AppState,
    analytics::PaymentRecord,
    config::Config,
    db::models::payments::{PaymentDBResponse, PaymentMethod, PaymentStatus},
    sample_data::SampleDataConfig,
    types::PaymentId,
};

pub async fn create_test_app() -> (TestServer, AppState) {
    let app = crate::Application::new(create_test_config())
        .await
        .expect("Failed to create application");

    app.into_test_server()
}

pub fn create_test_config() -> Config {
    Config {
        host: "127.0.0.1".to_string(),
        port: 0,
        sample_data: SampleDataConfig {
            seed_on_startup: false,
            count: 20,
            ..Default::default()
        },
        // The prometheus recorder is process-global
        enable_metrics: false,
        enable_otel_export: false,
        ..Default::default()
    }
}

/// A stored pending credit-card payment with the given age and amount
pub fn payment_row(id: PaymentId, created_at: DateTime<Utc>, amount: Decimal) -> PaymentDBResponse {
    PaymentDBResponse {
        id,
        transaction_id: format!("TXN{id:012}"),
        customer_id: format!("CUST{id:05}"),
        customer_name: "Jane Smith".to_string(),
        customer_email: "jane.smith@example.com".to_string(),
        amount: Some(amount),
        currency: "USD".to_string(),
        status: PaymentStatus::Pending,
        payment_method: PaymentMethod::CreditCard,
        created_at: Some(created_at),
        updated_at: None,
        description: Some(format!("Test payment {id}")),
        error_message: None,
        order_id: Some(format!("ORD{id:05}")),
        order_type: Some("regular".to_string()),
        ip_address: None,
        country: Some("US".to_string()),
    }
}

pub fn payment_record(id: PaymentId, created_at: DateTime<Utc>, amount: Decimal) -> PaymentRecord {
    PaymentRecord::try_from(payment_row(id, created_at, amount)).expect("complete test row")
}
