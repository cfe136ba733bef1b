//! Cashback offers and the effective-value rule.

use crate::model::{PlatformId, ViewMode};
use chrono::{DateTime, Utc};

/// A cashback rate offered by one partner platform for one store.
#[derive(Debug, Clone, PartialEq)]
pub struct Offer {
    /// Partner platform offering the rate.
    pub platform_id: PlatformId,
    /// Platform label shown in the badge.
    pub platform_name: String,
    /// Base cashback rate in percent.
    pub value: f64,
    /// Alternate rate, only considered in [`ViewMode::Max`].
    pub value_specific: Option<f64>,
    /// Free-text conditions of the offer.
    pub description: Option<String>,
    /// When the offer expires.
    pub date_end: Option<DateTime<Utc>>,
    /// Partnership landing page on the platform.
    pub url: Option<String>,
}

impl Offer {
    /// Create an offer without a specific rate.
    pub fn new(platform_id: impl Into<PlatformId>, platform_name: impl Into<String>, value: f64) -> Self {
        Self {
            platform_id: platform_id.into(),
            platform_name: platform_name.into(),
            value,
            value_specific: None,
            description: None,
            date_end: None,
            url: None,
        }
    }

    /// Builder-style setter for the specific rate.
    pub fn with_specific(mut self, value_specific: f64) -> Self {
        self.value_specific = Some(value_specific);
        self
    }

    /// Builder-style setter for the offer conditions.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Builder-style setter for the expiry time.
    pub fn with_date_end(mut self, date_end: DateTime<Utc>) -> Self {
        self.date_end = Some(date_end);
        self
    }

    /// Builder-style setter for the partnership url.
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Value compared and displayed for this offer under `mode`.
    ///
    /// `Global` always uses the base value. `Max` uses the specific rate
    /// only when it is strictly greater than the base value.
    pub fn effective_value(&self, mode: ViewMode) -> f64 {
        match (mode, self.value_specific) {
            (ViewMode::Max, Some(specific)) if specific > self.value => specific,
            _ => self.value,
        }
    }
}
