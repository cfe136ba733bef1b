//! Stores, platforms and the loaded catalog.

use crate::model::{HistoryEntry, Offer, PlatformId, StoreName};
use chrono::{DateTime, Utc};

/// A store and every cashback offer known for it.
#[derive(Debug, Clone, PartialEq)]
pub struct Store {
    /// Upstream store id, when the payload carries one.
    pub id: Option<i64>,
    /// Validated store name.
    pub name: StoreName,
    /// Store landing page, when the payload carries one.
    pub url: Option<String>,
    /// Offers in payload order.
    pub offers: Vec<Offer>,
    /// Past offers, oldest first.
    pub history: Vec<HistoryEntry>,
}

impl Store {
    /// Create a store with no id, url or history.
    pub fn new(name: StoreName, offers: Vec<Offer>) -> Self {
        Self {
            id: None,
            name,
            url: None,
            offers,
            history: Vec::new(),
        }
    }
}

/// A partner platform that can be toggled in the platform filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Platform {
    /// Platform id referenced by offers.
    pub id: PlatformId,
    /// Display name.
    pub name: String,
}

/// The full data set loaded once at startup.
///
/// Read-only input to every recomputation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    /// Stores in payload order.
    pub stores: Vec<Store>,
    /// Platforms ordered by name, then id.
    pub platforms: Vec<Platform>,
    /// When the upstream data was last synchronized.
    pub synced_at: Option<DateTime<Utc>>,
}

impl Catalog {
    /// Look up a platform by id.
    pub fn platform(&self, id: PlatformId) -> Option<&Platform> {
        self.platforms.iter().find(|p| p.id == id)
    }

    /// Total number of stores regardless of filters.
    pub fn len(&self) -> usize {
        self.stores.len()
    }

    /// Whether the catalog holds no stores.
    pub fn is_empty(&self) -> bool {
        self.stores.is_empty()
    }
}
