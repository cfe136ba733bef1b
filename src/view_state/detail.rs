//! Per-store breakdown for the detail pane: current offers and history.

use crate::model::{HistoryEntry, HistoryRange, PlatformId, Store};
use chrono::{DateTime, Utc};
use std::cmp::Ordering;
use std::collections::{BTreeSet, HashSet};

/// One platform's current offer for a store.
#[derive(Debug, Clone, PartialEq)]
pub struct DetailRow {
    /// Platform offering the rate.
    pub platform_id: PlatformId,
    /// Platform label.
    pub platform_name: String,
    /// Base rate.
    pub value: f64,
    /// Alternate rate, when known.
    pub value_specific: Option<f64>,
    /// Offer conditions.
    pub description: Option<String>,
    /// Offer expiry.
    pub date_end: Option<DateTime<Utc>>,
    /// Partnership page on the platform.
    pub url: Option<String>,
}

/// All offers of a store, one row per platform, best base value first.
///
/// When a platform appears more than once, its first offer in payload
/// order is kept. Rows with equal values keep payload order.
pub fn store_detail(store: &Store) -> Vec<DetailRow> {
    let mut seen = HashSet::new();
    let mut rows: Vec<DetailRow> = store
        .offers
        .iter()
        .filter(|offer| seen.insert(offer.platform_id))
        .map(|offer| DetailRow {
            platform_id: offer.platform_id,
            platform_name: offer.platform_name.clone(),
            value: offer.value,
            value_specific: offer.value_specific,
            description: offer.description.clone(),
            date_end: offer.date_end,
            url: offer.url.clone(),
        })
        .collect();

    rows.sort_by(|a, b| b.value.partial_cmp(&a.value).unwrap_or(Ordering::Equal));
    rows
}

/// History entries of a store inside `range`, oldest first.
///
/// An empty platform set keeps every platform.
pub fn store_history<'a>(
    store: &'a Store,
    platforms: &BTreeSet<PlatformId>,
    range: &HistoryRange,
) -> Vec<&'a HistoryEntry> {
    store
        .history
        .iter()
        .filter(|entry| platforms.is_empty() || platforms.contains(&entry.platform_id))
        .filter(|entry| range.contains(entry))
        .collect()
}
