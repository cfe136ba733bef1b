//! List recomputation (pure).
//!
//! [`recompute`] is the single entry point the host calls whenever any
//! filter or sort input changes. It returns a [`ViewModel`] describing
//! which stores are visible, what each one displays, and the render
//! order. Nothing is cached between calls.

pub mod collate;
pub mod detail;
pub mod format;

pub use collate::{collation_key, locale_compare, CollationKey};
pub use detail::{store_detail, store_history, DetailRow};
pub use format::{
    count_label, default_display_offset, format_percent, format_synced_at, format_timestamp,
    utc_offset_from_hours, DEFAULT_UTC_OFFSET_HOURS,
};

use crate::model::{FilterState, SortBy, Store};
use crate::resolve::resolve;
use std::cmp::{Ordering, Reverse};
use tracing::debug;

// ===== StoreView =====

/// Computed display state of one store.
#[derive(Debug, Clone, PartialEq)]
pub struct StoreView {
    /// Index of the store in the catalog.
    pub store_index: usize,
    /// Whether the store is shown at all.
    pub visible: bool,
    /// Effective value of the selected offer, or 0 when none.
    pub display_value: f64,
    /// Platform of the selected offer, or empty when none.
    pub display_platform_name: String,
    /// Whether the platform badge is rendered.
    pub show_badge: bool,
}

impl StoreView {
    fn hidden(store_index: usize) -> Self {
        Self {
            store_index,
            visible: false,
            display_value: 0.0,
            display_platform_name: String::new(),
            show_badge: false,
        }
    }

    fn shown(store_index: usize, display_value: f64, display_platform_name: String) -> Self {
        let show_badge = display_value > 0.0 && !display_platform_name.is_empty();
        Self {
            store_index,
            visible: true,
            display_value,
            display_platform_name,
            show_badge,
        }
    }
}

// ===== ViewModel =====

/// Output of one recomputation.
///
/// # Invariants
///
/// - `stores` has one entry per catalog store, in catalog order
/// - `order` holds exactly the indices of visible entries, in render order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewModel {
    stores: Vec<StoreView>,
    order: Vec<usize>,
}

impl ViewModel {
    /// Per-store annotations in catalog order.
    pub fn stores(&self) -> &[StoreView] {
        &self.stores
    }

    /// Annotation for one catalog store.
    pub fn get(&self, store_index: usize) -> Option<&StoreView> {
        self.stores.get(store_index)
    }

    /// Catalog indices of visible stores in render order.
    pub fn order(&self) -> &[usize] {
        &self.order
    }

    /// Visible stores in render order.
    pub fn ordered_visible(&self) -> impl Iterator<Item = &StoreView> + '_ {
        self.order.iter().map(move |&i| &self.stores[i])
    }

    /// Pair visible annotations with their stores, in render order.
    pub fn ordered_visible_stores<'s>(
        &'s self,
        stores: &'s [Store],
    ) -> impl Iterator<Item = (&'s Store, &'s StoreView)> + 's {
        self.ordered_visible()
            .filter_map(move |view| stores.get(view.store_index).map(|store| (store, view)))
    }

    /// Number of visible stores.
    pub fn visible_count(&self) -> usize {
        self.order.len()
    }
}

// ===== Recomputation =====

/// Recompute visibility, display values and order for every store.
///
/// Per store, in catalog order:
/// 1. A name that does not contain the query hides the store; its offers
///    are not consulted.
/// 2. With the platform filter off, the store is always shown, at the
///    best offer's value or 0.
/// 3. With the platform filter on, the store is shown only if one of its
///    offers belongs to an active platform.
///
/// Visible stores are then stably sorted by `filter.sort_by`.
pub fn recompute(stores: &[Store], filter: &FilterState) -> ViewModel {
    let platforms_disabled = filter.platforms_disabled();

    let views: Vec<StoreView> = stores
        .iter()
        .enumerate()
        .map(|(index, store)| {
            if !store.name.matches(filter.query()) {
                return StoreView::hidden(index);
            }

            match resolve(&store.offers, &filter.active_platforms, filter.view_mode) {
                Some(best) => {
                    StoreView::shown(index, best.effective_value, best.platform_name().to_string())
                }
                None if platforms_disabled => StoreView::shown(index, 0.0, String::new()),
                None => StoreView::hidden(index),
            }
        })
        .collect();

    let mut order: Vec<usize> = views.iter().filter(|v| v.visible).map(|v| v.store_index).collect();
    sort_visible(&mut order, stores, &views, filter.sort_by);

    debug!(
        query = filter.query(),
        platforms = filter.active_platforms.len(),
        view_mode = %filter.view_mode,
        sort_by = %filter.sort_by,
        visible = order.len(),
        total = stores.len(),
        "Recomputed store list"
    );

    ViewModel {
        stores: views,
        order,
    }
}

/// Stable in-place sort of visible indices.
fn sort_visible(order: &mut [usize], stores: &[Store], views: &[StoreView], sort_by: SortBy) {
    let key = |i: &usize| collation_key(stores[*i].name.key());
    match sort_by {
        SortBy::CashbackDesc => order.sort_by(|&a, &b| {
            views[b]
                .display_value
                .partial_cmp(&views[a].display_value)
                .unwrap_or(Ordering::Equal)
        }),
        SortBy::NameAsc => order.sort_by_cached_key(key),
        SortBy::NameDesc => order.sort_by_cached_key(|i| Reverse(key(i))),
        SortBy::InputOrder => {}
    }
}

#[cfg(test)]
#[path = "recompute_tests.rs"]
mod tests;
