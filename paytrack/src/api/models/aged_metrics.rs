//! API models for the aged-metrics report.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::analytics::{AgeBucket, AgedMetricsReport, FilterCriteria, ReportTotal, TransactionProjection};

/// Query parameters for the aged-metrics report.
///
/// Every filter accepts `all` to disable it. Unknown tokens are not errors.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct AgedMetricsQuery {
    /// Order type, matched case-insensitively (payments without one always match)
    pub order_type: Option<String>,
    /// Payment method, e.g. `credit_card` (case and `_` are ignored)
    pub payment_method: Option<String>,
    /// Payment status, e.g. `success` (case and `_` are ignored)
    pub payment_state: Option<String>,
    /// Date range token, e.g. `last_7_days`, `last_90_days`
    pub date_filter: Option<String>,
    /// `hourly`, `daily` (default), `weekly` or `monthly`
    pub frequency: Option<String>,
}

impl AgedMetricsQuery {
    pub const DEFAULT_FREQUENCY: &'static str = "daily";

    pub fn criteria(&self) -> FilterCriteria {
        FilterCriteria {
            order_type: self.order_type.clone(),
            payment_method: self.payment_method.clone(),
            payment_state: self.payment_state.clone(),
            date_filter: self.date_filter.clone(),
        }
    }

    pub fn frequency(&self) -> &str {
        self.frequency.as_deref().unwrap_or(Self::DEFAULT_FREQUENCY)
    }
}

/// Render an amount the way the dashboard shows it: `$` and exactly two decimals,
/// rounding halves away from zero.
pub fn format_currency(amount: Decimal) -> String {
    let mut rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    format!("${rounded}")
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AgeBucketResponse {
    /// e.g. `Today`, `3h ago`, `Week 2`
    pub label: String,
    pub count: usize,
    /// Formatted sum, e.g. `$35.01`
    pub amount: String,
    /// Reserved for the dashboard; always false
    pub highlight: bool,
    pub transactions: Vec<TransactionProjection>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TotalResponse {
    /// Every payment that passed the filters, including those older than the last bucket
    pub count: usize,
    pub amount: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AgedMetricsResponse {
    /// Buckets, youngest first
    pub items: Vec<AgeBucketResponse>,
    pub total: TotalResponse,
}

impl From<AgeBucket> for AgeBucketResponse {
    fn from(bucket: AgeBucket) -> Self {
        Self {
            label: bucket.label,
            count: bucket.count,
            amount: format_currency(bucket.amount),
            highlight: false,
            transactions: bucket.transactions,
        }
    }
}

impl From<ReportTotal> for TotalResponse {
    fn from(total: ReportTotal) -> Self {
        Self {
            count: total.count,
            amount: format_currency(total.amount),
        }
    }
}

impl From<AgedMetricsReport> for AgedMetricsResponse {
    fn from(report: AgedMetricsReport) -> Self {
        Self {
            items: report.items.into_iter().map(Into::into).collect(),
            total: report.total.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(Decimal::ZERO), "$0.00");
        assert_eq!(format_currency(Decimal::new(35005, 3)), "$35.01");
        assert_eq!(format_currency(Decimal::new(35004, 3)), "$35.00");
        assert_eq!(format_currency(Decimal::new(42, 0)), "$42.00");
        assert_eq!(format_currency(Decimal::new(1234567, 1)), "$123456.70");
    }

    #[test]
    fn test_sum_then_round() {
        let amounts = [Decimal::new(1000, 2), Decimal::new(20005, 3), Decimal::new(500, 2)];
        assert_eq!(format_currency(amounts.iter().sum()), "$35.01");
    }

    #[test]
    fn test_query_defaults() {
        let query = AgedMetricsQuery::default();
        assert_eq!(query.frequency(), "daily");
        assert_eq!(query.criteria(), FilterCriteria::default());
    }

    #[test]
    fn test_bucket_response_shape() {
        let response = AgeBucketResponse::from(AgeBucket {
            label: "Today".to_string(),
            count: 0,
            amount: Decimal::ZERO,
            transactions: vec![],
        });
        let json = serde_json::to_value(response).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "label": "Today",
                "count": 0,
                "amount": "$0.00",
                "highlight": false,
                "transactions": []
            })
        );
    }
}
