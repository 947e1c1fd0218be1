//! Input processing for the CLI client.
//!
//! This module owns the keyboard-to-command mapping so the rest of the
//! application can remain agnostic about concrete key bindings or the
//! specifics of `crossterm` events. Text editing is applied to [`AppState`]
//! directly; anything that needs the runtime or the map comes back as a
//! [`KeyAction`].

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use game_core::EntityId;

use client_frontend_core::view_model::Suggestion;

use crate::state::{AppState, InputMode};

const ZOOM_STEP: f64 = 1.5;
const PAN_STEP: f64 = 0.2;

/// High-level outcome of processing a keyboard event.
#[derive(Debug, Clone, PartialEq)]
pub enum KeyAction {
    /// Exit the application.
    Quit,
    Ask(String),
    Guess {
        text: String,
        entity_id: Option<EntityId>,
    },
    /// Abandon the current mode and mount the next one.
    SwitchMode,
    /// Fly to the correct entity again.
    Reveal,
    ClearSelection,
    DismissError,
    /// Pan by a fraction of the visible span.
    Pan(f64, f64),
    Zoom(f64),
    ResetView,
    /// Explain why a key did nothing.
    Notice(String),
    /// Only UI state changed.
    Redraw,
    /// No meaningful command was produced.
    None,
}

/// Session facts key handling depends on, captured right before each key.
#[derive(Debug, Clone, Default)]
pub struct InputContext<'a> {
    pub can_ask: bool,
    pub can_guess: bool,
    pub max_question_len: usize,
    pub suggestions: &'a [Suggestion],
    /// Catalog entry whose name equals the typed guess, if any.
    pub exact_match: Option<EntityId>,
}

/// Translates `KeyEvent`s into commands based on the current input mode.
#[derive(Debug, Default)]
pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        Self
    }

    /// Converts a raw key event into a higher-level command.
    pub fn handle_key(
        &self,
        key: KeyEvent,
        state: &mut AppState,
        ctx: &InputContext<'_>,
    ) -> KeyAction {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return KeyAction::Quit;
        }

        match state.mode {
            InputMode::Normal => self.handle_normal(key, state, ctx),
            InputMode::AskQuestion => self.handle_question(key, state, ctx),
            InputMode::MakeGuess => self.handle_guess(key, state, ctx),
        }
    }

    fn handle_normal(&self, key: KeyEvent, state: &mut AppState, ctx: &InputContext<'_>) -> KeyAction {
        match key.code {
            KeyCode::Char(ch) => match ch.to_ascii_lowercase() {
                'q' => KeyAction::Quit,
                'a' | '?' => {
                    if ctx.can_ask {
                        state.enter(InputMode::AskQuestion);
                        KeyAction::Redraw
                    } else {
                        KeyAction::Notice("Questions are closed right now.".into())
                    }
                }
                'g' => {
                    if ctx.can_guess {
                        state.enter(InputMode::MakeGuess);
                        KeyAction::Redraw
                    } else {
                        KeyAction::Notice("Guesses are closed right now.".into())
                    }
                }
                'm' => KeyAction::SwitchMode,
                'r' => KeyAction::Reveal,
                'c' => KeyAction::ClearSelection,
                'x' => KeyAction::DismissError,
                '+' | '=' => KeyAction::Zoom(ZOOM_STEP),
                '-' => KeyAction::Zoom(1.0 / ZOOM_STEP),
                '0' => KeyAction::ResetView,
                'h' => KeyAction::Pan(-PAN_STEP, 0.0),
                'l' => KeyAction::Pan(PAN_STEP, 0.0),
                'k' => KeyAction::Pan(0.0, PAN_STEP),
                'j' => KeyAction::Pan(0.0, -PAN_STEP),
                _ => KeyAction::None,
            },
            KeyCode::Esc => KeyAction::DismissError,
            KeyCode::Left => KeyAction::Pan(-PAN_STEP, 0.0),
            KeyCode::Right => KeyAction::Pan(PAN_STEP, 0.0),
            KeyCode::Up => KeyAction::Pan(0.0, PAN_STEP),
            KeyCode::Down => KeyAction::Pan(0.0, -PAN_STEP),
            _ => KeyAction::None,
        }
    }

    fn handle_question(
        &self,
        key: KeyEvent,
        state: &mut AppState,
        ctx: &InputContext<'_>,
    ) -> KeyAction {
        match key.code {
            KeyCode::Esc => {
                state.exit_to_normal();
                KeyAction::Redraw
            }
            KeyCode::Enter => {
                if !ctx.can_ask {
                    return KeyAction::Notice("Questions are closed right now.".into());
                }
                let text = state.take_input();
                if text.is_empty() {
                    KeyAction::Redraw
                } else {
                    KeyAction::Ask(text)
                }
            }
            KeyCode::Backspace => {
                state.pop_char();
                KeyAction::Redraw
            }
            KeyCode::Char(ch) => {
                if state.push_char(ch, ctx.max_question_len) {
                    KeyAction::Redraw
                } else {
                    KeyAction::Notice(format!(
                        "Questions are limited to {} characters.",
                        ctx.max_question_len
                    ))
                }
            }
            _ => KeyAction::None,
        }
    }

    fn handle_guess(&self, key: KeyEvent, state: &mut AppState, ctx: &InputContext<'_>) -> KeyAction {
        match key.code {
            KeyCode::Esc => {
                state.exit_to_normal();
                KeyAction::Redraw
            }
            KeyCode::Down => {
                state.move_highlight(true, ctx.suggestions.len());
                KeyAction::Redraw
            }
            KeyCode::Up => {
                state.move_highlight(false, ctx.suggestions.len());
                KeyAction::Redraw
            }
            KeyCode::Tab => {
                let target = state.highlighted.unwrap_or(0);
                match ctx.suggestions.get(target) {
                    Some(suggestion) => {
                        state.buffer = suggestion.name.clone();
                        state.highlighted = Some(0);
                        KeyAction::Redraw
                    }
                    None => KeyAction::None,
                }
            }
            KeyCode::Enter => {
                if !ctx.can_guess {
                    return KeyAction::Notice("Guesses are closed right now.".into());
                }
                let picked = state
                    .highlighted
                    .and_then(|index| ctx.suggestions.get(index))
                    .cloned();
                let exact_match = ctx.exact_match;
                let text = state.take_input();
                match picked {
                    Some(suggestion) => KeyAction::Guess {
                        text: suggestion.name,
                        entity_id: Some(suggestion.id),
                    },
                    None if text.is_empty() => KeyAction::Redraw,
                    None => KeyAction::Guess {
                        text,
                        entity_id: exact_match,
                    },
                }
            }
            KeyCode::Backspace => {
                state.pop_char();
                KeyAction::Redraw
            }
            KeyCode::Char(ch) => {
                state.push_char(ch, usize::MAX);
                KeyAction::Redraw
            }
            _ => KeyAction::None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::empty(),
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn open() -> InputContext<'static> {
        InputContext {
            can_ask: true,
            can_guess: true,
            max_question_len: 50,
            suggestions: &[],
            exact_match: None,
        }
    }

    fn type_text(handler: &InputHandler, state: &mut AppState, ctx: &InputContext<'_>, text: &str) {
        for ch in text.chars() {
            handler.handle_key(key(KeyCode::Char(ch)), state, ctx);
        }
    }

    #[test]
    fn maps_normal_mode_keys() {
        let handler = InputHandler::new();
        let mut state = AppState::new();
        let ctx = open();

        assert_eq!(handler.handle_key(key(KeyCode::Char('q')), &mut state, &ctx), KeyAction::Quit);
        assert_eq!(handler.handle_key(key(KeyCode::Char('m')), &mut state, &ctx), KeyAction::SwitchMode);
        assert_eq!(handler.handle_key(key(KeyCode::Char('r')), &mut state, &ctx), KeyAction::Reveal);
        assert_eq!(handler.handle_key(key(KeyCode::Esc), &mut state, &ctx), KeyAction::DismissError);
        assert!(matches!(
            handler.handle_key(key(KeyCode::Left), &mut state, &ctx),
            KeyAction::Pan(dx, _) if dx < 0.0
        ));
        assert_eq!(handler.handle_key(key(KeyCode::F(5)), &mut state, &ctx), KeyAction::None);
    }

    #[test]
    fn closed_session_refuses_input_modes() {
        let handler = InputHandler::new();
        let mut state = AppState::new();
        let ctx = InputContext {
            can_ask: false,
            can_guess: false,
            ..open()
        };

        assert!(matches!(
            handler.handle_key(key(KeyCode::Char('a')), &mut state, &ctx),
            KeyAction::Notice(_)
        ));
        assert!(matches!(
            handler.handle_key(key(KeyCode::Char('g')), &mut state, &ctx),
            KeyAction::Notice(_)
        ));
        assert_eq!(state.mode, InputMode::Normal);
    }

    #[test]
    fn question_is_capped_and_trimmed() {
        let handler = InputHandler::new();
        let mut state = AppState::new();
        let ctx = InputContext {
            max_question_len: 12,
            ..open()
        };

        handler.handle_key(key(KeyCode::Char('?')), &mut state, &ctx);
        assert_eq!(state.mode, InputMode::AskQuestion);
        type_text(&handler, &mut state, &ctx, " Is it big?");
        assert!(matches!(
            handler.handle_key(key(KeyCode::Char('x')), &mut state, &ctx),
            KeyAction::Redraw
        ));
        assert!(matches!(
            handler.handle_key(key(KeyCode::Char('y')), &mut state, &ctx),
            KeyAction::Notice(_)
        ));

        assert_eq!(
            handler.handle_key(key(KeyCode::Enter), &mut state, &ctx),
            KeyAction::Ask("Is it big?x".into())
        );
        assert_eq!(state.mode, InputMode::Normal);
    }

    #[test]
    fn blank_question_is_not_sent() {
        let handler = InputHandler::new();
        let mut state = AppState::new();
        let ctx = open();

        handler.handle_key(key(KeyCode::Char('a')), &mut state, &ctx);
        type_text(&handler, &mut state, &ctx, "   ");
        assert_eq!(handler.handle_key(key(KeyCode::Enter), &mut state, &ctx), KeyAction::Redraw);
    }

    #[test]
    fn highlighted_suggestion_submits_with_id() {
        let handler = InputHandler::new();
        let mut state = AppState::new();
        let suggestions = vec![
            Suggestion {
                id: EntityId(1),
                name: "Niger".into(),
                secondary_name: None,
            },
            Suggestion {
                id: EntityId(2),
                name: "Nigeria".into(),
                secondary_name: None,
            },
        ];
        let ctx = InputContext {
            suggestions: &suggestions,
            ..open()
        };

        handler.handle_key(key(KeyCode::Char('g')), &mut state, &ctx);
        type_text(&handler, &mut state, &ctx, "nig");
        handler.handle_key(key(KeyCode::Down), &mut state, &ctx);
        handler.handle_key(key(KeyCode::Down), &mut state, &ctx);

        assert_eq!(
            handler.handle_key(key(KeyCode::Enter), &mut state, &ctx),
            KeyAction::Guess {
                text: "Nigeria".into(),
                entity_id: Some(EntityId(2)),
            }
        );
    }

    #[test]
    fn free_text_guess_uses_exact_match_only() {
        let handler = InputHandler::new();
        let mut state = AppState::new();
        let ctx = open();

        handler.handle_key(key(KeyCode::Char('g')), &mut state, &ctx);
        type_text(&handler, &mut state, &ctx, "Atlantis");
        assert_eq!(
            handler.handle_key(key(KeyCode::Enter), &mut state, &ctx),
            KeyAction::Guess {
                text: "Atlantis".into(),
                entity_id: None,
            }
        );

        let ctx = InputContext {
            exact_match: Some(EntityId(9)),
            ..open()
        };
        handler.handle_key(key(KeyCode::Char('g')), &mut state, &ctx);
        type_text(&handler, &mut state, &ctx, "Chile");
        assert_eq!(
            handler.handle_key(key(KeyCode::Enter), &mut state, &ctx),
            KeyAction::Guess {
                text: "Chile".into(),
                entity_id: Some(EntityId(9)),
            }
        );
    }

    #[test]
    fn ctrl_c_quits_while_typing() {
        let handler = InputHandler::new();
        let mut state = AppState::new();
        let ctx = open();
        handler.handle_key(key(KeyCode::Char('a')), &mut state, &ctx);

        let ctrl_c = KeyEvent {
            modifiers: KeyModifiers::CONTROL,
            ..key(KeyCode::Char('c'))
        };
        assert_eq!(handler.handle_key(ctrl_c, &mut state, &ctx), KeyAction::Quit);
    }
}
