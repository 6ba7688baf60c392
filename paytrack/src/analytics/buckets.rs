//! Age bucket layout: how many buckets a report gets, how wide they are, and how old a
//! payment is in a bucket's unit.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::Serialize;

/// Reporting granularity requested by the caller.
///
/// Unknown or missing tokens fall back to [`Frequency::Daily`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Frequency {
    Hourly,
    #[default]
    Daily,
    Weekly,
    Monthly,
}

impl Frequency {
    /// Parse a caller-supplied token (case-insensitive)
    pub fn parse(token: Option<&str>) -> Self {
        match token.map(str::to_lowercase).as_deref() {
            Some("hourly") => Frequency::Hourly,
            Some("weekly") => Frequency::Weekly,
            Some("monthly") => Frequency::Monthly,
            _ => Frequency::Daily,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Frequency::Hourly => "hourly",
            Frequency::Daily => "daily",
            Frequency::Weekly => "weekly",
            Frequency::Monthly => "monthly",
        }
    }

    /// Width of one bucket
    pub fn unit(&self) -> AgeUnit {
        match self {
            Frequency::Hourly => AgeUnit::Hours,
            Frequency::Daily => AgeUnit::Days,
            Frequency::Weekly => AgeUnit::Weeks,
            Frequency::Monthly => AgeUnit::Months,
        }
    }

    fn label(&self, index: i64) -> String {
        match self {
            Frequency::Hourly => format!("{index}h ago"),
            Frequency::Weekly => format!("Week {}", index + 1),
            Frequency::Monthly => format!("Month {}", index + 1),
            Frequency::Daily => match index {
                0 => "Today".to_string(),
                1 => "Yesterday".to_string(),
                _ => format!("{index} days ago"),
            },
        }
    }
}

/// Unit in which a payment's age is measured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AgeUnit {
    Hours,
    Days,
    Weeks,
    Months,
}

impl AgeUnit {
    /// Whole units elapsed from `created_at` to `now`, truncated toward zero.
    pub fn age(&self, created_at: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
        match self {
            AgeUnit::Hours => whole_hours(created_at, now),
            AgeUnit::Days => whole_days(created_at, now),
            AgeUnit::Weeks => whole_days(created_at, now) / 7,
            AgeUnit::Months => whole_months(created_at, now),
        }
    }
}

pub fn whole_hours(from: DateTime<Utc>, to: DateTime<Utc>) -> i64 {
    (to - from).num_hours()
}

/// Whole days elapsed. In UTC every calendar day is 24 hours, so this is the number of
/// complete 24-hour spans.
pub fn whole_days(from: DateTime<Utc>, to: DateTime<Utc>) -> i64 {
    (to - from).num_days()
}

/// Whole calendar months elapsed.
///
/// A month counts once the same day-of-month and time-of-day has been reached, so
/// Jan 31 10:00 -> Feb 28 10:00 is zero months and Jan 15 10:00 -> Feb 15 10:00 is one.
pub fn whole_months(from: DateTime<Utc>, to: DateTime<Utc>) -> i64 {
    let start = from.naive_utc();
    let end = to.naive_utc();

    // An unfinished final day does not count
    let mut end_date = end.date();
    if end_date > start.date() && end.time() < start.time() {
        end_date = end_date.pred_opt().unwrap_or(end_date);
    } else if end_date < start.date() && end.time() > start.time() {
        end_date = end_date.succ_opt().unwrap_or(end_date);
    }

    (packed_month_day(end_date) - packed_month_day(start.date())) / 32
}

/// Months since year 0 scaled by 32, plus the day of month. Differences divided by 32
/// give whole months with the day-of-month taken into account.
fn packed_month_day(date: NaiveDate) -> i64 {
    (i64::from(date.year()) * 12 + i64::from(date.month0())) * 32 + i64::from(date.day())
}

/// A recognized date-filter token.
///
/// Tokens are matched exactly (they come from a fixed dropdown). Anything else is
/// [`DateRange::Unrecognized`], which never constrains the filter and selects the fallback
/// bucket count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateRange {
    Last24Hours,
    Today,
    Yesterday,
    Last7Days,
    LastWeek,
    Last28Days,
    Last30Days,
    LastMonth,
    Last1Month,
    Last90Days,
    Unrecognized,
}

impl DateRange {
    /// Token assumed by bucket derivation when the caller sends no date filter
    pub const DEFAULT_TOKEN: &'static str = "last_7_days";

    pub fn parse(token: &str) -> Self {
        match token {
            "last_24_hours" => DateRange::Last24Hours,
            "today" => DateRange::Today,
            "yesterday" => DateRange::Yesterday,
            "last_7_days" => DateRange::Last7Days,
            "last_week" => DateRange::LastWeek,
            "last_28_days" => DateRange::Last28Days,
            "last_30_days" => DateRange::Last30Days,
            "last_month" => DateRange::LastMonth,
            "last_1_month" => DateRange::Last1Month,
            "last_90_days" => DateRange::Last90Days,
            _ => DateRange::Unrecognized,
        }
    }

    /// Maximum age in whole days a payment may have to pass the recency filter.
    ///
    /// Only the day-count tokens constrain; every other token lets everything through.
    pub fn max_age_days(&self) -> Option<i64> {
        match self {
            DateRange::Last7Days => Some(7),
            DateRange::Last28Days => Some(28),
            DateRange::Last30Days => Some(30),
            _ => None,
        }
    }
}

/// Number of buckets for a report.
///
/// `date_filter` defaults to [`DateRange::DEFAULT_TOKEN`] independently of how the filter
/// stage treats the same parameter.
pub fn bucket_count(date_filter: Option<&str>, frequency: Frequency) -> i64 {
    use DateRange::*;

    let range = DateRange::parse(date_filter.unwrap_or(DateRange::DEFAULT_TOKEN));
    match frequency {
        Frequency::Hourly => 24,
        Frequency::Weekly => match range {
            Last7Days | LastWeek => 1,
            Last28Days => 4,
            Last30Days | LastMonth | Last1Month => 4,
            Last90Days => 13,
            _ => 8,
        },
        Frequency::Monthly => match range {
            Last30Days | LastMonth | Last1Month => 1,
            Last90Days => 3,
            Last7Days | Last28Days => 1,
            _ => 6,
        },
        Frequency::Daily => match range {
            Last24Hours | Today | Yesterday => 1,
            Last7Days | LastWeek => 7,
            Last28Days => 28,
            Last30Days | LastMonth | Last1Month => 30,
            Last90Days => 90,
            _ => 7,
        },
    }
}

/// Bucket count and unit in one lookup
pub fn bucket_layout(date_filter: Option<&str>, frequency: Frequency) -> (i64, AgeUnit) {
    (bucket_count(date_filter, frequency), frequency.unit())
}

/// One age bucket: payments whose age in `unit` lies in `[min_bound, max_bound)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgeGroup {
    pub label: String,
    pub min_bound: i64,
    pub max_bound: i64,
    pub unit: AgeUnit,
}

impl AgeGroup {
    pub fn contains(&self, age: i64) -> bool {
        self.min_bound <= age && age < self.max_bound
    }
}

/// Ordered buckets for a report, youngest first.
pub fn build_age_groups(date_filter: Option<&str>, frequency: Frequency) -> Vec<AgeGroup> {
    let (count, unit) = bucket_layout(date_filter, frequency);
    (0..count)
        .map(|index| AgeGroup {
            label: frequency.label(index),
            min_bound: index,
            max_bound: index + 1,
            unit,
        })
        .collect()
}
