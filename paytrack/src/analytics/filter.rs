//! Request filters applied to a payment snapshot before bucketing.
//!
//! Every criterion is optional. An absent criterion, or the literal token `all`, does not
//! constrain. Active criteria are combined with AND.

use chrono::{DateTime, Utc};

use super::{PaymentRecord, buckets::{DateRange, whole_days}};

/// Token meaning "do not filter on this field"
pub const ALL_TOKEN: &str = "all";

/// Caller-supplied filter tokens, taken verbatim from the request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    pub order_type: Option<String>,
    pub payment_method: Option<String>,
    pub payment_state: Option<String>,
    pub date_filter: Option<String>,
}

impl FilterCriteria {
    fn active(value: &Option<String>) -> Option<&str> {
        value.as_deref().filter(|token| *token != ALL_TOKEN)
    }
}

/// Lower-case a token and drop `_` separators, so `CREDIT_CARD`, `credit_card` and
/// `creditcard` compare equal.
pub fn normalize_token(token: &str) -> String {
    token.chars().filter(|c| *c != '_').flat_map(char::to_lowercase).collect()
}

/// Compare a stored enum token against free text from a caller
pub fn tokens_match(stored: &str, requested: &str) -> bool {
    normalize_token(stored) == normalize_token(requested)
}

fn passes_date_filter(record: &PaymentRecord, date_filter: &str, now: DateTime<Utc>) -> bool {
    match DateRange::parse(date_filter).max_age_days() {
        Some(max_days) => whole_days(record.created_at, now) <= max_days,
        None => true,
    }
}

fn passes_order_type(record: &PaymentRecord, order_type: &str) -> bool {
    // Payments without an order type cannot be excluded by this filter
    match &record.order_type {
        Some(stored) => stored.to_lowercase() == order_type.to_lowercase(),
        None => true,
    }
}

/// Whether a single payment satisfies every active criterion
pub fn matches(record: &PaymentRecord, criteria: &FilterCriteria, now: DateTime<Utc>) -> bool {
    if let Some(date_filter) = FilterCriteria::active(&criteria.date_filter)
        && !passes_date_filter(record, date_filter, now)
    {
        return false;
    }
    if let Some(order_type) = FilterCriteria::active(&criteria.order_type)
        && !passes_order_type(record, order_type)
    {
        return false;
    }
    if let Some(method) = FilterCriteria::active(&criteria.payment_method)
        && !tokens_match(record.payment_method.as_str(), method)
    {
        return false;
    }
    if let Some(state) = FilterCriteria::active(&criteria.payment_state)
        && !tokens_match(record.status.as_str(), state)
    {
        return false;
    }
    true
}

/// Payments from `records` that pass `criteria`, in their original order.
pub fn filter_payments<'a>(records: &'a [PaymentRecord], criteria: &FilterCriteria, now: DateTime<Utc>) -> Vec<&'a PaymentRecord> {
    records.iter().filter(|record| matches(record, criteria, now)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::models::payments::{PaymentMethod, PaymentStatus};
    use crate::test_utils::payment_record;
    use chrono::{Duration, TimeZone};
    use rust_decimal::Decimal;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 15, 12, 0, 0).unwrap()
    }

    fn criteria() -> FilterCriteria {
        FilterCriteria::default()
    }

    fn ids(filtered: &[&PaymentRecord]) -> Vec<i64> {
        filtered.iter().map(|r| r.id).collect()
    }

    #[test]
    fn test_normalize_token() {
        assert_eq!(normalize_token("CREDIT_CARD"), "creditcard");
        assert_eq!(normalize_token("Credit_Card"), "creditcard");
        assert_eq!(normalize_token("creditcard"), "creditcard");
        assert_eq!(normalize_token("__pending__"), "pending");
    }

    #[test]
    fn test_no_criteria_keeps_everything() {
        let records = vec![
            payment_record(1, now() - Duration::days(400), Decimal::ONE),
            payment_record(2, now(), Decimal::ONE),
        ];
        assert_eq!(ids(&filter_payments(&records, &criteria(), now())), vec![1, 2]);
    }

    #[test]
    fn test_payment_method_ignores_case_and_separators() {
        let mut record = payment_record(1, now(), Decimal::ONE);
        record.payment_method = PaymentMethod::CreditCard;
        let records = vec![record];

        for (token, kept) in [("credit_card", true), ("creditcard", true), ("CREDIT_CARD", true), ("Credit_Card", true), ("debit_card", false)] {
            let criteria = FilterCriteria {
                payment_method: Some(token.to_string()),
                ..criteria()
            };
            assert_eq!(filter_payments(&records, &criteria, now()).len(), usize::from(kept), "{token}");
        }
    }

    #[test]
    fn test_payment_state_matches_status_token() {
        let mut failed = payment_record(1, now(), Decimal::ONE);
        failed.status = PaymentStatus::Failed;
        let records = vec![failed, payment_record(2, now(), Decimal::ONE)];

        let criteria = FilterCriteria {
            payment_state: Some("Failed".to_string()),
            ..criteria()
        };
        assert_eq!(ids(&filter_payments(&records, &criteria, now())), vec![1]);
    }

    #[test]
    fn test_all_token_is_exact() {
        let mut record = payment_record(1, now(), Decimal::ONE);
        record.payment_method = PaymentMethod::Paypal;
        let records = vec![record];

        let all = FilterCriteria {
            payment_method: Some("all".to_string()),
            ..criteria()
        };
        assert_eq!(filter_payments(&records, &all, now()).len(), 1);

        // "ALL" is not the wildcard, it is compared as a method and matches nothing
        let upper = FilterCriteria {
            payment_method: Some("ALL".to_string()),
            ..criteria()
        };
        assert!(filter_payments(&records, &upper, now()).is_empty());
    }

    #[test]
    fn test_order_type_is_case_insensitive_and_skips_missing() {
        let mut regular = payment_record(1, now(), Decimal::ONE);
        regular.order_type = Some("regular".to_string());
        let mut loyalty = payment_record(2, now(), Decimal::ONE);
        loyalty.order_type = Some("loyalty".to_string());
        let mut untyped = payment_record(3, now(), Decimal::ONE);
        untyped.order_type = None;
        let records = vec![regular, loyalty, untyped];

        let criteria = FilterCriteria {
            order_type: Some("REGULAR".to_string()),
            ..criteria()
        };
        assert_eq!(ids(&filter_payments(&records, &criteria, now())), vec![1, 3]);
    }

    #[test]
    fn test_date_filter_uses_whole_days_inclusive() {
        let records = vec![
            payment_record(1, now() - Duration::days(7), Decimal::ONE),
            payment_record(2, now() - Duration::days(7) - Duration::hours(23), Decimal::ONE),
            payment_record(3, now() - Duration::days(8), Decimal::ONE),
            payment_record(4, now() - Duration::days(29), Decimal::ONE),
        ];

        let last_7 = FilterCriteria {
            date_filter: Some("last_7_days".to_string()),
            ..criteria()
        };
        assert_eq!(ids(&filter_payments(&records, &last_7, now())), vec![1, 2]);

        let last_28 = FilterCriteria {
            date_filter: Some("last_28_days".to_string()),
            ..criteria()
        };
        assert_eq!(ids(&filter_payments(&records, &last_28, now())), vec![1, 2, 3]);

        let last_30 = FilterCriteria {
            date_filter: Some("last_30_days".to_string()),
            ..criteria()
        };
        assert_eq!(ids(&filter_payments(&records, &last_30, now())), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_other_date_tokens_do_not_constrain() {
        let records = vec![payment_record(1, now() - Duration::days(365), Decimal::ONE)];
        for token in ["today", "last_90_days", "last_15_min", "LAST_7_DAYS", "all"] {
            let criteria = FilterCriteria {
                date_filter: Some(token.to_string()),
                ..criteria()
            };
            assert_eq!(filter_payments(&records, &criteria, now()).len(), 1, "{token}");
        }
    }

    #[test]
    fn test_filters_are_conjunctive() {
        let mut a = payment_record(1, now(), Decimal::ONE);
        a.payment_method = PaymentMethod::CreditCard;
        a.status = PaymentStatus::Success;
        let mut b = payment_record(2, now(), Decimal::ONE);
        b.payment_method = PaymentMethod::CreditCard;
        b.status = PaymentStatus::Pending;
        let mut c = payment_record(3, now() - Duration::days(20), Decimal::ONE);
        c.payment_method = PaymentMethod::CreditCard;
        c.status = PaymentStatus::Success;
        let mut d = payment_record(4, now(), Decimal::ONE);
        d.payment_method = PaymentMethod::CreditCard;
        d.status = PaymentStatus::Success;
        d.order_type = Some("loyalty".to_string());
        let records = vec![a, b, c, d];

        let full = FilterCriteria {
            payment_method: Some("credit_card".to_string()),
            payment_state: Some("success".to_string()),
            date_filter: Some("last_7_days".to_string()),
            order_type: Some("regular".to_string()),
        };
        let narrow = filter_payments(&records, &full, now());
        assert_eq!(ids(&narrow), vec![1]);

        // Dropping any single active filter never shrinks the result
        let relaxed = [
            FilterCriteria { payment_method: None, ..full.clone() },
            FilterCriteria { payment_state: None, ..full.clone() },
            FilterCriteria { date_filter: None, ..full.clone() },
            FilterCriteria { order_type: None, ..full.clone() },
        ];
        for criteria in relaxed {
            let wider = filter_payments(&records, &criteria, now());
            assert!(narrow.iter().all(|r| wider.iter().any(|w| w.id == r.id)));
            assert!(wider.len() >= narrow.len());
        }

        let without_order_type = FilterCriteria { order_type: None, ..full.clone() };
        assert_eq!(ids(&filter_payments(&records, &without_order_type, now())), vec![1, 4]);
    }
}
