//! Aged-metrics engine.
//!
//! Turns a snapshot of stored payments into a report of age buckets:
//!
//! ```text
//!   PaymentDBResponse[] ──validate──▶ PaymentRecord[]
//!                                         │
//!                                   filter (criteria, now)
//!                                         │
//!        build_age_groups(date_filter, frequency) ──▶ aggregate(now) ──▶ AgedMetricsReport
//! ```
//!
//! Everything here is synchronous and holds no state between calls. The same snapshot and
//! `now` always produce the same report.

pub mod aggregate;
pub mod buckets;
pub mod filter;
pub mod statistics;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use thiserror::Error;
use tracing::debug;

use crate::{
    db::models::payments::{PaymentDBResponse, PaymentMethod, PaymentStatus},
    types::PaymentId,
};

pub use aggregate::{AgeBucket, AgedMetricsReport, ReportTotal, TransactionProjection};
pub use buckets::{AgeGroup, AgeUnit, Frequency};
pub use filter::FilterCriteria;

/// A stored payment that cannot be aggregated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalyticsError {
    #[error("Payment {payment_id} has no creation timestamp")]
    MissingCreatedAt { payment_id: PaymentId },

    #[error("Payment {payment_id} has no amount")]
    MissingAmount { payment_id: PaymentId },
}

/// A payment with the fields the engine computes over guaranteed present.
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentRecord {
    pub id: PaymentId,
    pub transaction_id: String,
    pub customer_id: String,
    pub customer_name: String,
    pub customer_email: String,
    pub amount: Decimal,
    pub currency: String,
    pub status: PaymentStatus,
    pub payment_method: PaymentMethod,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    pub description: Option<String>,
    pub error_message: Option<String>,
    pub order_id: Option<String>,
    pub order_type: Option<String>,
    pub ip_address: Option<String>,
    pub country: Option<String>,
}

impl TryFrom<PaymentDBResponse> for PaymentRecord {
    type Error = AnalyticsError;

    fn try_from(row: PaymentDBResponse) -> Result<Self, Self::Error> {
        let created_at = row.created_at.ok_or(AnalyticsError::MissingCreatedAt { payment_id: row.id })?;
        let amount = row.amount.ok_or(AnalyticsError::MissingAmount { payment_id: row.id })?;

        Ok(Self {
            id: row.id,
            transaction_id: row.transaction_id,
            customer_id: row.customer_id,
            customer_name: row.customer_name,
            customer_email: row.customer_email,
            amount,
            currency: row.currency,
            status: row.status,
            payment_method: row.payment_method,
            created_at,
            updated_at: row.updated_at,
            description: row.description,
            error_message: row.error_message,
            order_id: row.order_id,
            order_type: row.order_type,
            ip_address: row.ip_address,
            country: row.country,
        })
    }
}

/// Validate a whole snapshot. The first invalid row fails the batch.
pub fn validate_records(rows: Vec<PaymentDBResponse>) -> Result<Vec<PaymentRecord>, AnalyticsError> {
    rows.into_iter().map(PaymentRecord::try_from).collect()
}

/// Build an aged-metrics report from a full payment snapshot.
///
/// `frequency` defaults to daily. Unknown frequency or date-filter tokens fall back
/// to defaults rather than failing. Payments older than the last bucket are left out of
/// every bucket but still counted in the total.
pub fn aged_metrics(
    rows: Vec<PaymentDBResponse>,
    criteria: &FilterCriteria,
    frequency: Option<&str>,
    now: DateTime<Utc>,
) -> Result<AgedMetricsReport, AnalyticsError> {
    let records = validate_records(rows)?;
    let filtered = filter::filter_payments(&records, criteria, now);
    let frequency = Frequency::parse(frequency);
    let groups = buckets::build_age_groups(criteria.date_filter.as_deref(), frequency);
    let report = aggregate::aggregate(&filtered, &groups, now);

    debug!(
        frequency = frequency.as_str(),
        snapshot = records.len(),
        filtered = report.total.count,
        buckets = report.items.len(),
        bucketed = report.items.iter().map(|item| item.count).sum::<usize>(),
        "Built aged metrics report"
    );
    Ok(report)
}
