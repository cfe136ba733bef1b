//! Search box editing (pure state transitions).
//!
//! The cursor is a character index, so multi-byte input such as accented
//! store names edits correctly.

/// Text and cursor of the search box.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchInput {
    text: String,
    cursor: usize,
}

impl SearchInput {
    /// Search box pre-filled with `text`, cursor at the end.
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let cursor = text.chars().count();
        Self { text, cursor }
    }

    /// Raw text as typed.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Cursor position in characters.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_index)
            .map_or(self.text.len(), |(i, _)| i)
    }
}

/// Insert a character at the cursor and advance it.
pub fn handle_char_input(mut input: SearchInput, ch: char) -> SearchInput {
    let at = input.byte_index(input.cursor);
    input.text.insert(at, ch);
    input.cursor += 1;
    input
}

/// Delete the character before the cursor. No-op at position 0.
pub fn handle_backspace(mut input: SearchInput) -> SearchInput {
    if input.cursor > 0 {
        let at = input.byte_index(input.cursor - 1);
        input.text.remove(at);
        input.cursor -= 1;
    }
    input
}

/// Move the cursor left, saturating at 0.
pub fn handle_cursor_left(mut input: SearchInput) -> SearchInput {
    input.cursor = input.cursor.saturating_sub(1);
    input
}

/// Move the cursor right, saturating at the end of the text.
pub fn handle_cursor_right(mut input: SearchInput) -> SearchInput {
    input.cursor = (input.cursor + 1).min(input.text.chars().count());
    input
}
