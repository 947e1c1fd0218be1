//! Application state for input modes and UI context.

/// Top-level input mode determining key handling and the input line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputMode {
    /// Map navigation and single-key commands.
    Normal,
    /// Typing a yes/no question.
    AskQuestion,
    /// Typing a guess, with catalog suggestions.
    MakeGuess,
}

impl InputMode {
    pub const fn prompt(self) -> &'static str {
        match self {
            InputMode::Normal => "",
            InputMode::AskQuestion => "Question",
            InputMode::MakeGuess => "Guess",
        }
    }
}

/// Mutable UI state owned by the event loop.
#[derive(Clone, Debug)]
pub struct AppState {
    pub mode: InputMode,
    /// Text typed into the active input.
    pub buffer: String,
    /// Highlighted suggestion in guess mode. `None` submits free text.
    pub highlighted: Option<usize>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            mode: InputMode::Normal,
            buffer: String::new(),
            highlighted: None,
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_editing(&self) -> bool {
        self.mode != InputMode::Normal
    }

    pub fn enter(&mut self, mode: InputMode) {
        self.mode = mode;
        self.buffer.clear();
        self.highlighted = None;
    }

    /// Exits to Normal mode, discarding the input.
    pub fn exit_to_normal(&mut self) {
        self.enter(InputMode::Normal);
    }

    /// Appends `ch` unless the input already holds `limit` characters.
    pub fn push_char(&mut self, ch: char, limit: usize) -> bool {
        if self.buffer.chars().count() >= limit {
            return false;
        }
        self.buffer.push(ch);
        self.highlighted = None;
        true
    }

    pub fn pop_char(&mut self) {
        self.buffer.pop();
        self.highlighted = None;
    }

    /// Moves the suggestion highlight, wrapping through "no highlight".
    pub fn move_highlight(&mut self, forward: bool, available: usize) {
        if available == 0 {
            self.highlighted = None;
            return;
        }
        self.highlighted = match (self.highlighted, forward) {
            (None, true) => Some(0),
            (None, false) => Some(available - 1),
            (Some(index), true) if index + 1 < available => Some(index + 1),
            (Some(index), false) if index > 0 => Some(index - 1),
            _ => None,
        };
    }

    /// Takes the trimmed input and returns to Normal mode.
    pub fn take_input(&mut self) -> String {
        let text = self.buffer.trim().to_string();
        self.exit_to_normal();
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_mode_is_normal() {
        let state = AppState::new();
        assert_eq!(state.mode, InputMode::Normal);
        assert!(!state.is_editing());
    }

    #[test]
    fn push_char_respects_limit() {
        let mut state = AppState::new();
        state.enter(InputMode::AskQuestion);
        assert!(state.push_char('ą', 2));
        assert!(state.push_char('b', 2));
        assert!(!state.push_char('c', 2));
        assert_eq!(state.buffer, "ąb");
    }

    #[test]
    fn highlight_wraps_through_free_text() {
        let mut state = AppState::new();
        state.enter(InputMode::MakeGuess);

        state.move_highlight(true, 2);
        assert_eq!(state.highlighted, Some(0));
        state.move_highlight(true, 2);
        assert_eq!(state.highlighted, Some(1));
        state.move_highlight(true, 2);
        assert_eq!(state.highlighted, None);
        state.move_highlight(false, 2);
        assert_eq!(state.highlighted, Some(1));

        state.push_char('x', 10);
        assert_eq!(state.highlighted, None);
    }

    #[test]
    fn take_input_trims_and_resets() {
        let mut state = AppState::new();
        state.enter(InputMode::AskQuestion);
        for ch in "  Is it big?  ".chars() {
            state.push_char(ch, 100);
        }
        assert_eq!(state.take_input(), "Is it big?");
        assert_eq!(state.mode, InputMode::Normal);
        assert!(state.buffer.is_empty());
    }
}
