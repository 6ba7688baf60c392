//! API request/response models for payments.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::{
    db::models::payments::{PaymentDBResponse, PaymentMethod, PaymentStatus},
    types::PaymentId,
};

// Request models
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentCreate {
    pub customer_id: String,
    pub customer_name: String,
    pub customer_email: String,
    /// Non-negative amount in `currency`
    #[schema(value_type = f64)]
    pub amount: Decimal,
    /// ISO currency code (default `USD`)
    pub currency: Option<String>,
    pub payment_method: PaymentMethod,
    pub description: Option<String>,
    pub order_id: Option<String>,
    /// Free-form order type, e.g. `subscription`
    pub order_type: Option<String>,
    pub ip_address: Option<String>,
    pub country: Option<String>,
}

/// Query parameters for a status change
#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct StatusUpdateQuery {
    /// New status token, e.g. `FAILED` (case and `_` are ignored)
    pub status: String,
    /// Stored alongside the status; omitted keeps the current message
    pub error_message: Option<String>,
}

// Response models
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentResponse {
    pub id: PaymentId,
    pub transaction_id: String,
    pub customer_id: String,
    pub customer_name: String,
    pub customer_email: String,
    #[serde(with = "rust_decimal::serde::float_option")]
    #[schema(value_type = Option<f64>)]
    pub amount: Option<Decimal>,
    pub currency: String,
    pub status: PaymentStatus,
    pub payment_method: PaymentMethod,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub description: Option<String>,
    pub error_message: Option<String>,
    pub order_id: Option<String>,
    pub order_type: Option<String>,
    pub ip_address: Option<String>,
    pub country: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SampleDataResponse {
    pub message: String,
    /// Payments created by this call, 0 when the store already had data
    pub created: usize,
}

// Conversions
impl From<PaymentDBResponse> for PaymentResponse {
    fn from(db: PaymentDBResponse) -> Self {
        Self {
            id: db.id,
            transaction_id: db.transaction_id,
            customer_id: db.customer_id,
            customer_name: db.customer_name,
            customer_email: db.customer_email,
            amount: db.amount,
            currency: db.currency,
            status: db.status,
            payment_method: db.payment_method,
            created_at: db.created_at,
            updated_at: db.updated_at,
            description: db.description,
            error_message: db.error_message,
            order_id: db.order_id,
            order_type: db.order_type,
            ip_address: db.ip_address,
            country: db.country,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::payment_row;

    #[test]
    fn test_create_accepts_numeric_amount() {
        let body = serde_json::json!({
            "customerId": "CUST00009",
            "customerName": "Bob Johnson",
            "customerEmail": "bob.johnson@example.com",
            "amount": 19.99,
            "paymentMethod": "DEBIT_CARD",
            "orderType": "loyalty"
        });

        let create: PaymentCreate = serde_json::from_value(body).unwrap();
        assert_eq!(create.amount, Decimal::new(1999, 2));
        assert_eq!(create.payment_method, PaymentMethod::DebitCard);
        assert!(create.currency.is_none());
    }

    #[test]
    fn test_response_wire_shape() {
        let response = PaymentResponse::from(payment_row(5, Utc::now(), Decimal::new(1050, 2)));
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["id"], 5);
        assert_eq!(json["amount"], serde_json::json!(10.5));
        assert_eq!(json["status"], "PENDING");
        assert_eq!(json["paymentMethod"], "CREDIT_CARD");
        assert!(json.get("transactionId").is_some());
        assert!(json.get("updatedAt").is_some());
    }
}
