//! Stored payment records and their request types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use utoipa::ToSchema;

use crate::types::PaymentId;

/// How a customer paid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    CreditCard,
    DebitCard,
    Paypal,
    ApplePay,
    GooglePay,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 5] = [
        PaymentMethod::CreditCard,
        PaymentMethod::DebitCard,
        PaymentMethod::Paypal,
        PaymentMethod::ApplePay,
        PaymentMethod::GooglePay,
    ];

    /// Stored token, e.g. `CREDIT_CARD`
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::CreditCard => "CREDIT_CARD",
            PaymentMethod::DebitCard => "DEBIT_CARD",
            PaymentMethod::Paypal => "PAYPAL",
            PaymentMethod::ApplePay => "APPLE_PAY",
            PaymentMethod::GooglePay => "GOOGLE_PAY",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PaymentMethod::ALL
            .into_iter()
            .find(|method| same_token(method.as_str(), s))
            .ok_or_else(|| format!("Unknown payment method: {s}"))
    }
}

/// Lifecycle state of a payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    Pending,
    Processing,
    Completed,
    Failed,
    Refunded,
    Cancelled,
    /// Terminal state used by generated sample data and the dashboard's state filter
    Success,
}

impl PaymentStatus {
    pub const ALL: [PaymentStatus; 7] = [
        PaymentStatus::Pending,
        PaymentStatus::Processing,
        PaymentStatus::Completed,
        PaymentStatus::Failed,
        PaymentStatus::Refunded,
        PaymentStatus::Cancelled,
        PaymentStatus::Success,
    ];

    /// The regular processing lifecycle, without the sample-data `SUCCESS` state
    pub const LIFECYCLE: [PaymentStatus; 6] = [
        PaymentStatus::Pending,
        PaymentStatus::Processing,
        PaymentStatus::Completed,
        PaymentStatus::Failed,
        PaymentStatus::Refunded,
        PaymentStatus::Cancelled,
    ];

    /// Stored token, e.g. `PENDING`
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "PENDING",
            PaymentStatus::Processing => "PROCESSING",
            PaymentStatus::Completed => "COMPLETED",
            PaymentStatus::Failed => "FAILED",
            PaymentStatus::Refunded => "REFUNDED",
            PaymentStatus::Cancelled => "CANCELLED",
            PaymentStatus::Success => "SUCCESS",
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PaymentStatus::ALL
            .into_iter()
            .find(|status| same_token(status.as_str(), s))
            .ok_or_else(|| format!("Unknown payment status: {s}"))
    }
}

fn same_token(stored: &str, requested: &str) -> bool {
    crate::analytics::filter::tokens_match(stored, requested)
}

/// A payment as held by the store.
///
/// `amount` and `created_at` are optional here because rows may arrive from imports that
/// lack them. Anything computing over payments must validate them first (see
/// [`crate::analytics::PaymentRecord`]).
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentDBResponse {
    pub id: PaymentId,
    pub transaction_id: String,
    pub customer_id: String,
    pub customer_name: String,
    pub customer_email: String,
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

/// Request to store a new payment. The store assigns the id.
#[derive(Debug, Clone)]
pub struct PaymentCreateDBRequest {
    pub transaction_id: String,
    pub customer_id: String,
    pub customer_name: String,
    pub customer_email: String,
    pub amount: Decimal,
    pub currency: String,
    pub status: PaymentStatus,
    pub payment_method: PaymentMethod,
    pub created_at: DateTime<Utc>,
    pub description: Option<String>,
    pub error_message: Option<String>,
    pub order_id: Option<String>,
    pub order_type: Option<String>,
    pub ip_address: Option<String>,
    pub country: Option<String>,
}

/// Request to move a payment to a new status
#[derive(Debug, Clone)]
pub struct PaymentStatusUpdateDBRequest {
    pub status: PaymentStatus,
    /// Replaces the stored error message when present; `None` keeps the existing one
    pub error_message: Option<String>,
    pub updated_at: DateTime<Utc>,
}
