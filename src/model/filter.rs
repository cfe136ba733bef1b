//! User-selected filter state.
//!
//! Owned by the host and handed to the recomputer on every change.
//! Unrecognized mode or sort strings fall back to permissive defaults
//! instead of failing.

use crate::model::PlatformId;
use std::collections::BTreeSet;
use std::fmt;
use unicode_normalization::UnicodeNormalization;

// ===== ViewMode =====

/// Which offer value is compared and shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ViewMode {
    /// Use the base value of each offer.
    #[default]
    Global,
    /// Use the greater of base and specific value.
    Max,
}

impl ViewMode {
    /// Parse a mode name. Anything other than `max` is `Global`.
    pub fn parse_lenient(raw: &str) -> Self {
        match raw.trim() {
            "max" => ViewMode::Max,
            _ => ViewMode::Global,
        }
    }

    /// Canonical name.
    pub fn as_str(self) -> &'static str {
        match self {
            ViewMode::Global => "global",
            ViewMode::Max => "max",
        }
    }

    /// The other mode.
    pub fn toggled(self) -> Self {
        match self {
            ViewMode::Global => ViewMode::Max,
            ViewMode::Max => ViewMode::Global,
        }
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ===== SortBy =====

/// Order of the visible store list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortBy {
    /// Highest displayed value first.
    #[default]
    CashbackDesc,
    /// Name, A to Z.
    NameAsc,
    /// Name, Z to A.
    NameDesc,
    /// Catalog order; what an unrecognized sort key resolves to.
    InputOrder,
}

impl SortBy {
    /// Parse a sort key. Unknown keys keep catalog order.
    pub fn parse_lenient(raw: &str) -> Self {
        match raw.trim() {
            "cashback-desc" => SortBy::CashbackDesc,
            "name-asc" => SortBy::NameAsc,
            "name-desc" => SortBy::NameDesc,
            _ => SortBy::InputOrder,
        }
    }

    /// Canonical key.
    pub fn as_str(self) -> &'static str {
        match self {
            SortBy::CashbackDesc => "cashback-desc",
            SortBy::NameAsc => "name-asc",
            SortBy::NameDesc => "name-desc",
            SortBy::InputOrder => "input-order",
        }
    }

    /// Next entry in the sort selector.
    ///
    /// `InputOrder` is not offered by the selector; cycling from it lands
    /// on `CashbackDesc`.
    pub fn next(self) -> Self {
        match self {
            SortBy::CashbackDesc => SortBy::NameAsc,
            SortBy::NameAsc => SortBy::NameDesc,
            SortBy::NameDesc | SortBy::InputOrder => SortBy::CashbackDesc,
        }
    }
}

impl fmt::Display for SortBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ===== FilterState =====

/// Complete input for one recomputation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    query: String,
    /// Platforms the user opted into. Empty means no platform filter.
    pub active_platforms: BTreeSet<PlatformId>,
    /// Value selection mode.
    pub view_mode: ViewMode,
    /// Visible list order.
    pub sort_by: SortBy,
}

impl FilterState {
    /// Filter state with the given raw query and default everything else.
    pub fn with_query(raw: &str) -> Self {
        let mut state = Self::default();
        state.set_query(raw);
        state
    }

    /// Normalized (trimmed, lower-cased) search text.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Replace the query, normalizing it the way store names are keyed.
    pub fn set_query(&mut self, raw: &str) {
        self.query = normalize_query(raw);
    }

    /// Whether the platform filter is off (best-of-all mode).
    pub fn platforms_disabled(&self) -> bool {
        self.active_platforms.is_empty()
    }

    /// Add the platform if absent, remove it if present.
    pub fn toggle_platform(&mut self, id: PlatformId) {
        if !self.active_platforms.remove(&id) {
            self.active_platforms.insert(id);
        }
    }
}

/// Trim, lower-case and NFC-normalize raw search input.
pub fn normalize_query(raw: &str) -> String {
    raw.trim().to_lowercase().nfc().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn view_mode_unknown_falls_back_to_global() {
        assert_eq!(ViewMode::parse_lenient("max"), ViewMode::Max);
        assert_eq!(ViewMode::parse_lenient("global"), ViewMode::Global);
        assert_eq!(ViewMode::parse_lenient("MAXIMUM"), ViewMode::Global);
        assert_eq!(ViewMode::parse_lenient(""), ViewMode::Global);
    }

    #[test]
    fn sort_by_unknown_keeps_input_order() {
        assert_eq!(SortBy::parse_lenient("name-asc"), SortBy::NameAsc);
        assert_eq!(SortBy::parse_lenient(" name-desc "), SortBy::NameDesc);
        assert_eq!(SortBy::parse_lenient("cashback-desc"), SortBy::CashbackDesc);
        assert_eq!(SortBy::parse_lenient("price-asc"), SortBy::InputOrder);
    }

    #[test]
    fn sort_by_cycle_skips_input_order() {
        assert_eq!(SortBy::CashbackDesc.next(), SortBy::NameAsc);
        assert_eq!(SortBy::NameAsc.next(), SortBy::NameDesc);
        assert_eq!(SortBy::NameDesc.next(), SortBy::CashbackDesc);
        assert_eq!(SortBy::InputOrder.next(), SortBy::CashbackDesc);
    }

    #[test]
    fn query_is_trimmed_and_lowercased() {
        let state = FilterState::with_query("  AlP ");
        assert_eq!(state.query(), "alp");
    }

    #[test]
    fn toggle_platform_adds_then_removes() {
        let mut state = FilterState::default();
        assert!(state.platforms_disabled());

        state.toggle_platform(PlatformId::new(3));
        assert!(state.active_platforms.contains(&PlatformId::new(3)));
        assert!(!state.platforms_disabled());

        state.toggle_platform(PlatformId::new(3));
        assert!(state.platforms_disabled());
    }

    #[test]
    fn view_mode_toggles_between_variants() {
        assert_eq!(ViewMode::Global.toggled(), ViewMode::Max);
        assert_eq!(ViewMode::Max.toggled(), ViewMode::Global);
    }
}
