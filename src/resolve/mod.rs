//! Offer selection (pure).
//!
//! Picks the single offer a store displays under the current platform
//! filter and view mode.

use crate::model::{Offer, PlatformId, ViewMode};
use std::collections::BTreeSet;

/// The offer chosen for display, with the value it is shown at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedOffer<'a> {
    /// Winning offer.
    pub offer: &'a Offer,
    /// `offer.effective_value(mode)` at resolution time.
    pub effective_value: f64,
}

impl ResolvedOffer<'_> {
    /// Platform label of the winning offer.
    pub fn platform_name(&self) -> &str {
        &self.offer.platform_name
    }
}

/// Select the best offer among the candidates.
///
/// Candidates are all offers when `active_platforms` is empty, otherwise
/// only offers whose platform is in the set. The candidate with the
/// strictly greatest effective value wins; on ties the earlier offer is
/// kept. Returns `None` when there are no candidates.
pub fn resolve<'a>(
    offers: &'a [Offer],
    active_platforms: &BTreeSet<PlatformId>,
    mode: ViewMode,
) -> Option<ResolvedOffer<'a>> {
    offers
        .iter()
        .filter(|offer| active_platforms.is_empty() || active_platforms.contains(&offer.platform_id))
        .map(|offer| ResolvedOffer {
            offer,
            effective_value: offer.effective_value(mode),
        })
        .fold(None, |best, candidate| match best {
            Some(current) if candidate.effective_value <= current.effective_value => Some(current),
            _ => Some(candidate),
        })
}
