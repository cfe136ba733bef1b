//! Keyboard bindings configuration.

use crate::model::KeyAction;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

/// Maps keyboard events to domain actions.
///
/// Only consulted while the search box does not have focus; typing in the
/// search box is routed as text.
#[derive(Debug, Clone)]
pub struct KeyBindings {
    bindings: HashMap<KeyEvent, KeyAction>,
}

impl KeyBindings {
    /// Look up the action for a key event.
    ///
    /// Shifted characters are matched with and without the SHIFT modifier,
    /// since terminals disagree on whether to report it.
    pub fn get(&self, key: KeyEvent) -> Option<KeyAction> {
        let normalized = KeyEvent::new(key.code, key.modifiers);
        self.bindings.get(&normalized).copied().or_else(|| {
            if normalized.modifiers.contains(KeyModifiers::SHIFT) {
                let unshifted = KeyEvent::new(key.code, key.modifiers.difference(KeyModifiers::SHIFT));
                self.bindings.get(&unshifted).copied()
            } else {
                None
            }
        })
    }

    fn bind(&mut self, code: KeyCode, modifiers: KeyModifiers, action: KeyAction) {
        self.bindings.insert(KeyEvent::new(code, modifiers), action);
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        let mut kb = Self {
            bindings: HashMap::new(),
        };
        let none = KeyModifiers::NONE;

        kb.bind(KeyCode::Char('q'), none, KeyAction::Quit);
        kb.bind(KeyCode::Char('c'), KeyModifiers::CONTROL, KeyAction::Quit);

        // Filter controls
        kb.bind(KeyCode::Char('/'), none, KeyAction::FocusSearch);
        kb.bind(KeyCode::Char('x'), none, KeyAction::ClearQuery);
        kb.bind(KeyCode::Char('m'), none, KeyAction::ToggleViewMode);
        kb.bind(KeyCode::Char('s'), none, KeyAction::CycleSort);
        kb.bind(KeyCode::Char(' '), none, KeyAction::TogglePlatform);
        kb.bind(KeyCode::Char('c'), none, KeyAction::ClearPlatforms);
        kb.bind(KeyCode::Tab, none, KeyAction::CycleFocus);

        // Vim-style movement
        kb.bind(KeyCode::Char('j'), none, KeyAction::MoveDown);
        kb.bind(KeyCode::Char('k'), none, KeyAction::MoveUp);
        kb.bind(KeyCode::Char('g'), none, KeyAction::MoveToTop);
        kb.bind(KeyCode::Char('G'), none, KeyAction::MoveToBottom);

        // Arrow keys
        kb.bind(KeyCode::Down, none, KeyAction::MoveDown);
        kb.bind(KeyCode::Up, none, KeyAction::MoveUp);
        kb.bind(KeyCode::Home, none, KeyAction::MoveToTop);
        kb.bind(KeyCode::End, none, KeyAction::MoveToBottom);

        kb.bind(KeyCode::Enter, none, KeyAction::ToggleDetail);

        kb
    }
}
