//! Dropdown options for the aged-metrics filters.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::analytics::aggregate::humanize_token;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FilterOption {
    /// Token to send back as the filter value, e.g. `credit_card`
    pub value: String,
    /// Display label, e.g. `Credit Card`
    pub label: String,
}

impl FilterOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }

    /// Option for a stored enum token: lower-cased value, humanized label
    pub fn from_token(token: &str) -> Self {
        Self::new(token.to_lowercase(), humanize_token(token))
    }
}
