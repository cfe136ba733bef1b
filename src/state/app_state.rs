//! Application state and transitions.
//!
//! AppState owns the catalog, the current [`FilterState`] and the last
//! [`ViewModel`]. Every mutation of the filter goes through
//! [`AppState::refresh`], the single point where the list is recomputed.
//! The store highlight follows the store itself, not its row, so it
//! survives re-sorting and mode changes while the store stays visible.

use crate::model::{Catalog, FilterState, HistoryEntry, HistoryRange, Platform, PlatformId, Store};
use crate::state::search_input::{self, SearchInput};
use crate::view_state::{default_display_offset, recompute, store_history, StoreView, ViewModel};
use chrono::FixedOffset;

// ===== FocusPane =====

/// Which widget receives keyboard input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FocusPane {
    /// Store list; movement keys change the highlighted store.
    #[default]
    Stores,
    /// Platform checklist; movement keys change the highlighted platform.
    Platforms,
    /// Search box; printable keys edit the query.
    Search,
}

// ===== AppState =====

/// Application state. Pure data, no terminal access.
#[derive(Debug, Clone)]
pub struct AppState {
    catalog: Catalog,
    filter: FilterState,
    view: ViewModel,
    search: SearchInput,
    /// Widget with keyboard focus.
    pub focus: FocusPane,
    /// Catalog index of the highlighted store.
    selected_store: Option<usize>,
    /// Index of the highlighted platform in `catalog.platforms`.
    selected_platform: usize,
    /// Whether the offer breakdown of the highlighted store is shown.
    pub detail_visible: bool,
    display_offset: FixedOffset,
    history_range: HistoryRange,
}

impl AppState {
    /// Build the state and run the initial recomputation.
    pub fn new(catalog: Catalog, filter: FilterState) -> Self {
        let search = SearchInput::new(filter.query());
        let mut state = Self {
            catalog,
            filter,
            view: ViewModel::default(),
            search,
            focus: FocusPane::default(),
            selected_store: None,
            selected_platform: 0,
            detail_visible: false,
            display_offset: default_display_offset(),
            history_range: HistoryRange::default(),
        };
        state.refresh();
        state
    }

    /// Builder-style setter for the offset timestamps are shown in.
    pub fn with_display_offset(mut self, offset: FixedOffset) -> Self {
        self.display_offset = offset;
        self
    }

    /// Builder-style setter for the window of the history section.
    pub fn with_history_range(mut self, range: HistoryRange) -> Self {
        self.history_range = range;
        self
    }

    /// Offset timestamps are shown in.
    pub fn display_offset(&self) -> FixedOffset {
        self.display_offset
    }

    /// Window of the history section.
    pub fn history_range(&self) -> &HistoryRange {
        &self.history_range
    }

    /// Loaded catalog.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Current filter inputs.
    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    /// Result of the last recomputation.
    pub fn view(&self) -> &ViewModel {
        &self.view
    }

    /// Search box contents.
    pub fn search_input(&self) -> &SearchInput {
        &self.search
    }

    /// Recompute the list from the current filter.
    ///
    /// The highlighted store stays highlighted while it is visible. When it
    /// is filtered out, the store now at its old row is highlighted, or the
    /// last row when the list got shorter.
    fn refresh(&mut self) {
        let previous_position = self.selected_position().unwrap_or(0);
        self.view = recompute(&self.catalog.stores, &self.filter);

        let still_visible = self
            .selected_store
            .and_then(|index| self.view.get(index))
            .is_some_and(|view| view.visible);
        if !still_visible {
            let last = self.view.visible_count().saturating_sub(1);
            self.select_position(previous_position.min(last));
        }
    }

    fn select_position(&mut self, position: usize) {
        self.selected_store = self.view.order().get(position).copied();
    }

    // ===== Filter transitions =====

    /// Switch between `global` and `max`.
    pub fn toggle_view_mode(&mut self) {
        self.filter.view_mode = self.filter.view_mode.toggled();
        self.refresh();
    }

    /// Advance the sort selector.
    pub fn cycle_sort(&mut self) {
        self.filter.sort_by = self.filter.sort_by.next();
        self.refresh();
    }

    /// Toggle a platform in the filter.
    pub fn toggle_platform(&mut self, id: PlatformId) {
        self.filter.toggle_platform(id);
        self.refresh();
    }

    /// Toggle the highlighted platform. No-op without platforms.
    pub fn toggle_highlighted_platform(&mut self) {
        if let Some(id) = self.highlighted_platform().map(|p| p.id) {
            self.toggle_platform(id);
        }
    }

    /// Turn the platform filter off.
    pub fn clear_platforms(&mut self) {
        if !self.filter.active_platforms.is_empty() {
            self.filter.active_platforms.clear();
            self.refresh();
        }
    }

    /// Empty the search box and the query.
    pub fn clear_query(&mut self) {
        self.search = SearchInput::default();
        self.sync_query();
    }

    /// Whether `id` is in the active platform set.
    pub fn is_platform_active(&self, id: PlatformId) -> bool {
        self.filter.active_platforms.contains(&id)
    }

    // ===== Search box =====

    /// Give the search box keyboard focus.
    pub fn focus_search(&mut self) {
        self.focus = FocusPane::Search;
    }

    /// Return focus from the search box to the store list. The query stays.
    pub fn leave_search(&mut self) {
        if self.focus == FocusPane::Search {
            self.focus = FocusPane::Stores;
        }
    }

    /// Type a character into the search box. Recomputes on every keystroke.
    pub fn search_char(&mut self, ch: char) {
        self.search = search_input::handle_char_input(std::mem::take(&mut self.search), ch);
        self.sync_query();
    }

    /// Delete the character before the cursor.
    pub fn search_backspace(&mut self) {
        self.search = search_input::handle_backspace(std::mem::take(&mut self.search));
        self.sync_query();
    }

    /// Move the search cursor left.
    pub fn search_cursor_left(&mut self) {
        self.search = search_input::handle_cursor_left(std::mem::take(&mut self.search));
    }

    /// Move the search cursor right.
    pub fn search_cursor_right(&mut self) {
        self.search = search_input::handle_cursor_right(std::mem::take(&mut self.search));
    }

    fn sync_query(&mut self) {
        let before = self.filter.query().to_string();
        self.filter.set_query(self.search.text());
        // Whitespace-only edits normalize to the same query.
        if self.filter.query() != before {
            self.refresh();
        }
    }

    // ===== Focus and highlight =====

    /// Cycle focus between the store list and the platform checklist.
    pub fn cycle_focus(&mut self) {
        self.focus = match self.focus {
            FocusPane::Stores => FocusPane::Platforms,
            FocusPane::Platforms | FocusPane::Search => FocusPane::Stores,
        };
    }

    /// Move the highlight in the focused list by `delta` rows.
    pub fn move_selection(&mut self, delta: isize) {
        match self.focus {
            FocusPane::Stores => {
                if let Some(position) = self.selected_position() {
                    self.select_position(step(position, delta, self.view.visible_count()));
                }
            }
            FocusPane::Platforms => {
                self.selected_platform =
                    step(self.selected_platform, delta, self.catalog.platforms.len());
            }
            FocusPane::Search => {}
        }
    }

    /// Highlight the first row of the focused list.
    pub fn move_to_top(&mut self) {
        match self.focus {
            FocusPane::Stores => self.select_position(0),
            FocusPane::Platforms => self.selected_platform = 0,
            FocusPane::Search => {}
        }
    }

    /// Highlight the last row of the focused list.
    pub fn move_to_bottom(&mut self) {
        match self.focus {
            FocusPane::Stores => {
                self.select_position(self.view.visible_count().saturating_sub(1));
            }
            FocusPane::Platforms => {
                self.selected_platform = self.catalog.platforms.len().saturating_sub(1);
            }
            FocusPane::Search => {}
        }
    }

    /// Show or hide the detail pane.
    pub fn toggle_detail(&mut self) {
        self.detail_visible = !self.detail_visible;
    }

    /// Position of the highlighted store in the visible order, if any.
    pub fn selected_position(&self) -> Option<usize> {
        let index = self.selected_store?;
        self.view.order().iter().position(|&i| i == index)
    }

    /// Highlighted store and its computed view.
    pub fn selected_store(&self) -> Option<(&Store, &StoreView)> {
        let index = self.selected_store?;
        let store = self.catalog.stores.get(index)?;
        let view = self.view.get(index)?;
        Some((store, view))
    }

    /// History of the highlighted store inside the history window,
    /// restricted to the active platforms when the filter is on.
    pub fn selected_history(&self) -> Vec<&HistoryEntry> {
        match self.selected_store() {
            Some((store, _)) => {
                store_history(store, &self.filter.active_platforms, &self.history_range)
            }
            None => Vec::new(),
        }
    }

    /// Index of the highlighted platform, if the catalog has any.
    pub fn highlighted_platform_index(&self) -> Option<usize> {
        (self.selected_platform < self.catalog.platforms.len()).then_some(self.selected_platform)
    }

    /// Highlighted platform in the checklist.
    pub fn highlighted_platform(&self) -> Option<&Platform> {
        self.catalog.platforms.get(self.selected_platform)
    }
}

/// Move `current` by `delta` within `0..len`, clamping at both ends.
fn step(current: usize, delta: isize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    let max = len - 1;
    if delta.is_negative() {
        current.saturating_sub(delta.unsigned_abs())
    } else {
        current.saturating_add(delta.unsigned_abs()).min(max)
    }
}

// ===== Tests =====

#[cfg(test)]
#[path = "app_state_tests.rs"]
mod tests;
