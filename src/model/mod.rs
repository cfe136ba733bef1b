//! Domain model types (pure).
//!
//! All types in this module are pure data with smart constructors.

pub mod error;
pub mod filter;
pub mod history;
pub mod identifiers;
pub mod key_action;
pub mod offer;
pub mod store;

// Re-export for convenience
pub use error::{AppError, CatalogError, InputError, Record};
pub use filter::{normalize_query, FilterState, SortBy, ViewMode};
pub use history::{HistoryEntry, HistoryRange};
pub use identifiers::{InvalidStoreName, PlatformId, StoreName};
pub use key_action::KeyAction;
pub use offer::Offer;
pub use store::{Catalog, Platform, Store};
