//! Property-based tests for offer resolution and list recomputation.
//!
//! Tests validate:
//! 1. recompute is idempotent
//! 2. Enabling the platform filter never reveals extra stores
//! 3. cashback-desc order is non-increasing and stable
//! 4. max mode never lowers a displayed value
//! 5. The resolver picks a maximal candidate

use cashlens::model::{FilterState, Offer, PlatformId, SortBy, Store, StoreName, ViewMode};
use cashlens::resolve::resolve;
use cashlens::view_state::recompute;
use proptest::prelude::*;
use std::collections::BTreeSet;

// ===== Strategies =====

fn offer_strategy() -> impl Strategy<Value = Offer> {
    (
        1i64..6,
        prop_oneof![Just(0.0), 0.0f64..20.0, Just(5.0)],
        proptest::option::of(0.0f64..20.0),
    )
        .prop_map(|(id, value, specific)| {
            let offer = Offer::new(id, format!("Platform {id}"), value);
            match specific {
                Some(s) => offer.with_specific(s),
                None => offer,
            }
        })
}

fn store_strategy() -> impl Strategy<Value = Store> {
    (
        "[A-Za-zé]{1,8}",
        proptest::collection::vec(offer_strategy(), 0..4),
    )
        .prop_map(|(name, offers)| Store::new(StoreName::new(name).unwrap(), offers))
}

fn stores_strategy() -> impl Strategy<Value = Vec<Store>> {
    proptest::collection::vec(store_strategy(), 0..20)
}

fn filter_strategy() -> impl Strategy<Value = FilterState> {
    (
        "[a-z]{0,2}",
        proptest::collection::btree_set(1i64..7, 0..3),
        any::<bool>(),
        prop_oneof![
            Just(SortBy::CashbackDesc),
            Just(SortBy::NameAsc),
            Just(SortBy::NameDesc),
            Just(SortBy::InputOrder),
        ],
    )
        .prop_map(|(query, platforms, max, sort_by)| {
            let mut filter = FilterState::with_query(&query);
            filter.active_platforms = platforms.into_iter().map(PlatformId::new).collect();
            filter.view_mode = if max { ViewMode::Max } else { ViewMode::Global };
            filter.sort_by = sort_by;
            filter
        })
}

// ===== Properties =====

proptest! {
    #[test]
    fn recompute_is_idempotent(stores in stores_strategy(), filter in filter_strategy()) {
        let first = recompute(&stores, &filter);
        let second = recompute(&stores, &filter);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn order_lists_exactly_the_visible_stores(stores in stores_strategy(), filter in filter_strategy()) {
        let view = recompute(&stores, &filter);

        let visible: BTreeSet<usize> = view
            .stores()
            .iter()
            .filter(|v| v.visible)
            .map(|v| v.store_index)
            .collect();
        let ordered: BTreeSet<usize> = view.order().iter().copied().collect();

        prop_assert_eq!(view.stores().len(), stores.len());
        prop_assert_eq!(view.order().len(), view.visible_count());
        prop_assert_eq!(ordered, visible);
    }

    #[test]
    fn platform_filter_only_hides(stores in stores_strategy(), filter in filter_strategy()) {
        let mut unfiltered = filter.clone();
        unfiltered.active_platforms.clear();

        let filtered_view = recompute(&stores, &filter);
        let full_view = recompute(&stores, &unfiltered);

        for (filtered, full) in filtered_view.stores().iter().zip(full_view.stores()) {
            if filtered.visible {
                prop_assert!(full.visible, "store {} appeared only with filter", filtered.store_index);
            }
        }
    }

    #[test]
    fn cashback_order_is_non_increasing_and_stable(stores in stores_strategy(), filter in filter_strategy()) {
        let mut filter = filter;
        filter.sort_by = SortBy::CashbackDesc;
        let view = recompute(&stores, &filter);

        for pair in view.order().windows(2) {
            let a = view.get(pair[0]).unwrap();
            let b = view.get(pair[1]).unwrap();
            prop_assert!(a.display_value >= b.display_value);
            if a.display_value == b.display_value {
                prop_assert!(a.store_index < b.store_index, "tie broke input order");
            }
        }
    }

    #[test]
    fn max_mode_never_lowers_display_value(stores in stores_strategy(), filter in filter_strategy()) {
        let mut global = filter.clone();
        global.view_mode = ViewMode::Global;
        let mut max = filter;
        max.view_mode = ViewMode::Max;

        let global_view = recompute(&stores, &global);
        let max_view = recompute(&stores, &max);

        for (g, m) in global_view.stores().iter().zip(max_view.stores()) {
            prop_assert_eq!(g.visible, m.visible);
            prop_assert!(m.display_value >= g.display_value);
        }
    }

    #[test]
    fn badge_requires_positive_value_and_platform(stores in stores_strategy(), filter in filter_strategy()) {
        let view = recompute(&stores, &filter);
        for store_view in view.stores() {
            prop_assert_eq!(
                store_view.show_badge,
                store_view.visible
                    && store_view.display_value > 0.0
                    && !store_view.display_platform_name.is_empty()
            );
        }
    }

    #[test]
    fn resolver_selects_first_maximal_candidate(
        offers in proptest::collection::vec(offer_strategy(), 0..6),
        filter in filter_strategy(),
    ) {
        let candidates: Vec<(usize, f64)> = offers
            .iter()
            .enumerate()
            .filter(|(_, o)| {
                filter.active_platforms.is_empty() || filter.active_platforms.contains(&o.platform_id)
            })
            .map(|(i, o)| (i, o.effective_value(filter.view_mode)))
            .collect();

        match resolve(&offers, &filter.active_platforms, filter.view_mode) {
            None => prop_assert!(candidates.is_empty()),
            Some(best) => {
                let max = candidates.iter().map(|(_, v)| *v).fold(f64::MIN, f64::max);
                prop_assert_eq!(best.effective_value, max);
                let first = candidates.iter().find(|(_, v)| *v == max).map(|(i, _)| *i);
                prop_assert!(first.is_some_and(|i| std::ptr::eq(best.offer, &offers[i])));
            }
        }
    }
}
