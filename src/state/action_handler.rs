//! Maps domain actions onto state transitions.

use crate::model::KeyAction;
use crate::state::{AppState, FocusPane};
use tracing::debug;

/// What the event loop should do after an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    /// Keep running and redraw.
    Continue,
    /// Leave the event loop.
    Quit,
}

/// Apply one action to the state.
///
/// `TogglePlatform` only acts while the platform checklist has focus, so
/// Space in the store list does not silently change the filter.
pub fn handle_action(state: &mut AppState, action: KeyAction) -> ActionOutcome {
    debug!(?action, focus = ?state.focus, "Handling action");

    match action {
        KeyAction::Quit => return ActionOutcome::Quit,
        KeyAction::FocusSearch => state.focus_search(),
        KeyAction::CycleFocus => state.cycle_focus(),
        KeyAction::ToggleViewMode => state.toggle_view_mode(),
        KeyAction::CycleSort => state.cycle_sort(),
        KeyAction::TogglePlatform => {
            if state.focus == FocusPane::Platforms {
                state.toggle_highlighted_platform();
            }
        }
        KeyAction::ClearPlatforms => state.clear_platforms(),
        KeyAction::ClearQuery => state.clear_query(),
        KeyAction::MoveUp => state.move_selection(-1),
        KeyAction::MoveDown => state.move_selection(1),
        KeyAction::MoveToTop => state.move_to_top(),
        KeyAction::MoveToBottom => state.move_to_bottom(),
        KeyAction::ToggleDetail => state.toggle_detail(),
    }

    ActionOutcome::Continue
}
