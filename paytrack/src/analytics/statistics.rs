//! Whole-store summary counts.

use rust_decimal::{Decimal, prelude::ToPrimitive};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::PaymentRecord;
use crate::db::models::payments::PaymentStatus;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentStatistics {
    pub total_payments: u64,
    pub completed_payments: u64,
    pub pending_payments: u64,
    pub failed_payments: u64,
    pub refunded_payments: u64,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub total_amount: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub completed_amount: Decimal,
    /// Percentage of payments in `COMPLETED`, 0 when there are none
    pub success_rate: f64,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub average_transaction_amount: Decimal,
}

pub fn payment_statistics(records: &[PaymentRecord]) -> PaymentStatistics {
    let count = |status: PaymentStatus| records.iter().filter(|r| r.status == status).count() as u64;

    let total_payments = records.len() as u64;
    let completed_payments = count(PaymentStatus::Completed);
    let total_amount: Decimal = records.iter().map(|r| r.amount).sum();
    let completed_amount: Decimal = records
        .iter()
        .filter(|r| r.status == PaymentStatus::Completed)
        .map(|r| r.amount)
        .sum();

    let (success_rate, average_transaction_amount) = if total_payments > 0 {
        (
            completed_payments as f64 * 100.0 / total_payments as f64,
            total_amount / Decimal::from(total_payments),
        )
    } else {
        (0.0, Decimal::ZERO)
    };

    PaymentStatistics {
        total_payments,
        completed_payments,
        pending_payments: count(PaymentStatus::Pending),
        failed_payments: count(PaymentStatus::Failed),
        refunded_payments: count(PaymentStatus::Refunded),
        total_amount,
        completed_amount,
        success_rate,
        average_transaction_amount,
    }
}

impl PaymentStatistics {
    /// Average as a float, for logging
    pub fn average_as_f64(&self) -> f64 {
        self.average_transaction_amount.to_f64().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::payment_record;
    use chrono::Utc;

    #[test]
    fn test_empty_store() {
        let stats = payment_statistics(&[]);
        assert_eq!(stats.total_payments, 0);
        assert_eq!(stats.success_rate, 0.0);
        assert_eq!(stats.average_transaction_amount, Decimal::ZERO);
    }

    #[test]
    fn test_counts_and_amounts() {
        let statuses = [
            PaymentStatus::Completed,
            PaymentStatus::Completed,
            PaymentStatus::Pending,
            PaymentStatus::Failed,
            PaymentStatus::Refunded,
            PaymentStatus::Success,
            PaymentStatus::Cancelled,
            PaymentStatus::Processing,
        ];
        let records: Vec<PaymentRecord> = statuses
            .iter()
            .enumerate()
            .map(|(i, status)| {
                let mut record = payment_record(i as i64 + 1, Utc::now(), Decimal::new(1000, 2));
                record.status = *status;
                record
            })
            .collect();

        let stats = payment_statistics(&records);
        assert_eq!(stats.total_payments, 8);
        assert_eq!(stats.completed_payments, 2);
        assert_eq!(stats.pending_payments, 1);
        assert_eq!(stats.failed_payments, 1);
        assert_eq!(stats.refunded_payments, 1);
        assert_eq!(stats.total_amount, Decimal::new(8000, 2));
        assert_eq!(stats.completed_amount, Decimal::new(2000, 2));
        assert_eq!(stats.success_rate, 25.0);
        assert_eq!(stats.average_transaction_amount, Decimal::TEN);
        assert_eq!(stats.average_as_f64(), 10.0);
    }

    #[test]
    fn test_wire_names() {
        let json = serde_json::to_value(payment_statistics(&[])).unwrap();
        for key in [
            "totalPayments",
            "completedPayments",
            "pendingPayments",
            "failedPayments",
            "refundedPayments",
            "totalAmount",
            "completedAmount",
            "successRate",
            "averageTransactionAmount",
        ] {
            assert!(json.get(key).is_some(), "{key}");
        }
    }
}
