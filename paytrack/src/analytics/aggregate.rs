//! Bucket assignment and totals.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{PaymentRecord, buckets::AgeGroup};
use crate::types::PaymentId;

/// Fixed-shape view of a payment inside a bucket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TransactionProjection {
    pub id: PaymentId,
    pub order_id: Option<String>,
    pub transaction_id: String,
    pub order_type: Option<String>,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub amount: Decimal,
    pub currency: String,
    /// Display label, e.g. `Credit Card`
    pub payment_method: String,
    /// Display label, e.g. `Pending`
    pub payment_state: String,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_id: String,
    /// Creation time
    pub date: DateTime<Utc>,
    /// Last status change, or creation time if never updated
    pub last_updated: DateTime<Utc>,
    pub description: Option<String>,
    pub country: Option<String>,
    pub ip_address: Option<String>,
    pub error_message: Option<String>,
}

impl From<&PaymentRecord> for TransactionProjection {
    fn from(record: &PaymentRecord) -> Self {
        Self {
            id: record.id,
            order_id: record.order_id.clone(),
            transaction_id: record.transaction_id.clone(),
            order_type: record.order_type.clone(),
            amount: record.amount,
            currency: record.currency.clone(),
            payment_method: humanize_token(record.payment_method.as_str()),
            payment_state: humanize_token(record.status.as_str()),
            customer_name: record.customer_name.clone(),
            customer_email: record.customer_email.clone(),
            customer_id: record.customer_id.clone(),
            date: record.created_at,
            last_updated: record.updated_at.unwrap_or(record.created_at),
            description: record.description.clone(),
            country: record.country.clone(),
            ip_address: record.ip_address.clone(),
            error_message: record.error_message.clone(),
        }
    }
}

/// One bucket of the report. `amount` is the exact sum; rounding is left to presentation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgeBucket {
    pub label: String,
    pub count: usize,
    pub amount: Decimal,
    pub transactions: Vec<TransactionProjection>,
}

/// Count and exact amount over every filtered payment
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportTotal {
    pub count: usize,
    pub amount: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgedMetricsReport {
    pub items: Vec<AgeBucket>,
    pub total: ReportTotal,
}

/// `CREDIT_CARD` -> `Credit Card`
pub fn humanize_token(token: &str) -> String {
    token
        .split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

/// Assign filtered payments to buckets and total them.
///
/// The total covers every payment in `filtered`, including those older than the last bucket.
pub fn aggregate(filtered: &[&PaymentRecord], groups: &[AgeGroup], now: DateTime<Utc>) -> AgedMetricsReport {
    let items = groups
        .iter()
        .map(|group| {
            let members: Vec<&PaymentRecord> = filtered
                .iter()
                .copied()
                .filter(|record| group.contains(group.unit.age(record.created_at, now)))
                .collect();

            AgeBucket {
                label: group.label.clone(),
                count: members.len(),
                amount: members.iter().map(|record| record.amount).sum(),
                transactions: members.into_iter().map(TransactionProjection::from).collect(),
            }
        })
        .collect();

    AgedMetricsReport {
        items,
        total: ReportTotal {
            count: filtered.len(),
            amount: filtered.iter().map(|record| record.amount).sum(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::buckets::{Frequency, build_age_groups};
    use crate::db::models::payments::{PaymentMethod, PaymentStatus};
    use crate::test_utils::payment_record;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 15, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_humanize_token() {
        assert_eq!(humanize_token("CREDIT_CARD"), "Credit Card");
        assert_eq!(humanize_token("PAYPAL"), "Paypal");
        assert_eq!(humanize_token("cwav_telemedicine"), "Cwav Telemedicine");
        assert_eq!(humanize_token(""), "");
    }

    #[test]
    fn test_bucket_amount_is_exact_sum() {
        let records = [
            payment_record(1, now() - Duration::minutes(10), Decimal::new(1000, 2)),
            payment_record(2, now() - Duration::minutes(20), Decimal::new(20005, 3)),
            payment_record(3, now() - Duration::minutes(30), Decimal::new(500, 2)),
        ];
        let filtered: Vec<&PaymentRecord> = records.iter().collect();
        let groups = build_age_groups(Some("last_7_days"), Frequency::Daily);

        let report = aggregate(&filtered, &groups, now());
        assert_eq!(report.items[0].count, 3);
        assert_eq!(report.items[0].amount, Decimal::new(35005, 3));
        assert_eq!(report.total.amount, Decimal::new(35005, 3));
    }

    #[test]
    fn test_tail_is_totalled_but_not_bucketed() {
        let records = [
            payment_record(1, now() - Duration::hours(3), Decimal::ONE),
            payment_record(2, now() - Duration::days(45), Decimal::TEN),
        ];
        let filtered: Vec<&PaymentRecord> = records.iter().collect();
        let groups = build_age_groups(None, Frequency::Weekly);

        let report = aggregate(&filtered, &groups, now());
        assert_eq!(report.items.len(), 1);
        assert_eq!(report.items[0].count, 1);
        assert_eq!(report.total.count, 2);
        assert_eq!(report.total.amount, Decimal::new(11, 0));

        let bucketed: usize = report.items.iter().map(|item| item.count).sum();
        assert!(bucketed < report.total.count);
    }

    #[test]
    fn test_each_payment_lands_in_at_most_one_bucket() {
        let records: Vec<PaymentRecord> = (0..50)
            .map(|i| payment_record(i, now() - Duration::hours(i * 7), Decimal::ONE))
            .collect();
        let filtered: Vec<&PaymentRecord> = records.iter().collect();

        for frequency in [Frequency::Hourly, Frequency::Daily, Frequency::Weekly, Frequency::Monthly] {
            let groups = build_age_groups(Some("last_90_days"), frequency);
            let report = aggregate(&filtered, &groups, now());

            let mut seen: Vec<PaymentId> = report
                .items
                .iter()
                .flat_map(|item| item.transactions.iter().map(|t| t.id))
                .collect();
            let bucketed = seen.len();
            seen.sort_unstable();
            seen.dedup();
            assert_eq!(seen.len(), bucketed, "{frequency:?}");
            assert!(bucketed <= report.total.count);
        }
    }

    #[test]
    fn test_projection_fields() {
        let mut record = payment_record(9, now() - Duration::hours(1), Decimal::new(12345, 2));
        record.payment_method = PaymentMethod::ApplePay;
        record.status = PaymentStatus::Failed;
        record.error_message = Some("Insufficient funds".to_string());
        record.updated_at = None;

        let projection = TransactionProjection::from(&record);
        assert_eq!(projection.payment_method, "Apple Pay");
        assert_eq!(projection.payment_state, "Failed");
        assert_eq!(projection.last_updated, record.created_at);
        assert_eq!(projection.error_message.as_deref(), Some("Insufficient funds"));

        record.updated_at = Some(now());
        assert_eq!(TransactionProjection::from(&record).last_updated, now());
    }

    #[test]
    fn test_projection_wire_shape() {
        let record = payment_record(1, now(), Decimal::new(4250, 2));
        let json = serde_json::to_value(TransactionProjection::from(&record)).unwrap();

        assert_eq!(json["amount"], serde_json::json!(42.5));
        assert_eq!(json["paymentMethod"], "Credit Card");
        assert_eq!(json["paymentState"], "Pending");
        assert!(json.get("lastUpdated").is_some());
        assert!(json.get("customerEmail").is_some());
    }
}
