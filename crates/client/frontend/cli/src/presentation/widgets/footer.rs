//! Footer widget listing key bindings for the current input mode.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::state::InputMode;

const NORMAL_KEYS: &[(&str, &str)] = &[
    ("a", "ask"),
    ("g", "guess"),
    ("click", "select"),
    ("c", "clear"),
    ("r", "reveal"),
    ("arrows/+/-/0", "map"),
    ("m", "mode"),
    ("q", "quit"),
];
const QUESTION_KEYS: &[(&str, &str)] = &[("enter", "ask"), ("esc", "cancel")];
const GUESS_KEYS: &[(&str, &str)] = &[
    ("↑/↓", "pick"),
    ("tab", "complete"),
    ("enter", "guess"),
    ("esc", "cancel"),
];

pub fn render(frame: &mut Frame, area: Rect, mode: InputMode) {
    let keys = match mode {
        InputMode::Normal => NORMAL_KEYS,
        InputMode::AskQuestion => QUESTION_KEYS,
        InputMode::MakeGuess => GUESS_KEYS,
    };

    let mut spans = Vec::with_capacity(keys.len() * 2);
    for (key, action) in keys {
        spans.push(Span::styled(
            format!(" {key} "),
            Style::default().fg(Color::Black).bg(Color::Gray),
        ));
        spans.push(Span::raw(format!(" {action}  ")));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
