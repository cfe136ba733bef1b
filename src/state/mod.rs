//! UI state machine (pure).
//!
//! All state transitions are pure functions testable without a terminal.

pub mod action_handler;
pub mod app_state;
pub mod search_input;

// Re-export for convenience
pub use action_handler::{handle_action, ActionOutcome};
pub use app_state::{AppState, FocusPane};
pub use search_input::SearchInput;
