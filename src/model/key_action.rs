//! Domain-level keyboard actions independent of key bindings.

/// User intents the interactive host understands.
///
/// The mapping from `crossterm::event::KeyEvent` to `KeyAction` is owned
/// by [`crate::config::KeyBindings`]. Text typed into the search box is
/// not an action; it is routed as raw characters while the search box has
/// focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    /// Leave the application. Default: q / Ctrl+c
    Quit,
    /// Move keyboard focus into the search box. Default: /
    FocusSearch,
    /// Cycle focus between store list and platform list. Default: Tab
    CycleFocus,
    /// Switch between `global` and `max` view modes. Default: m
    ToggleViewMode,
    /// Advance the sort selector. Default: s
    CycleSort,
    /// Toggle the highlighted platform in the filter. Default: Space
    TogglePlatform,
    /// Clear the platform filter. Default: c
    ClearPlatforms,
    /// Clear the search query. Default: x
    ClearQuery,
    /// Move the highlight up. Default: k / Up
    MoveUp,
    /// Move the highlight down. Default: j / Down
    MoveDown,
    /// Jump to the first row. Default: g / Home
    MoveToTop,
    /// Jump to the last row. Default: G / End
    MoveToBottom,
    /// Show or hide the detail pane for the highlighted store. Default: Enter
    ToggleDetail,
}
