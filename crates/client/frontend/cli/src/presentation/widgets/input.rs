//! Input line, error banner and guess suggestions.

use client_frontend_core::view_model::Suggestion;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
};

use crate::state::{AppState, InputMode};

/// Render the input panel.
///
/// Shows the text being typed, otherwise the pending error, otherwise a
/// hint about what can be done.
pub fn render(
    frame: &mut Frame,
    area: Rect,
    app_state: &AppState,
    error: Option<&str>,
    loading: bool,
    max_question_len: usize,
) {
    let (title, line) = match app_state.mode {
        InputMode::Normal => match error {
            Some(error) => (
                " Error ".to_string(),
                Line::from(vec![
                    Span::styled(error.to_string(), Style::default().fg(Color::LightRed)),
                    Span::styled("  (x to dismiss)", Style::default().fg(Color::DarkGray)),
                ]),
            ),
            None if loading => (
                " Input ".to_string(),
                Line::from(Span::styled(
                    "Waiting for the server…",
                    Style::default().fg(Color::Yellow),
                )),
            ),
            None => (
                " Input ".to_string(),
                Line::from(Span::styled(
                    "Press a to ask a question or g to guess.",
                    Style::default().fg(Color::DarkGray),
                )),
            ),
        },
        mode => {
            let title = if mode == InputMode::AskQuestion {
                format!(
                    " {} {}/{} ",
                    mode.prompt(),
                    app_state.buffer.chars().count(),
                    max_question_len
                )
            } else {
                format!(" {} ", mode.prompt())
            };
            (
                title,
                Line::from(vec![
                    Span::raw(app_state.buffer.clone()),
                    Span::styled("_", Style::default().add_modifier(Modifier::SLOW_BLINK)),
                ]),
            )
        }
    };

    let paragraph = Paragraph::new(line).block(Block::default().borders(Borders::ALL).title(title));
    frame.render_widget(paragraph, area);
}

/// Render suggestions in a popup directly above `anchor`.
pub fn render_suggestions(
    frame: &mut Frame,
    anchor: Rect,
    suggestions: &[Suggestion],
    highlighted: Option<usize>,
) {
    if suggestions.is_empty() {
        return;
    }

    let height = (suggestions.len() as u16 + 2).min(anchor.y);
    if height < 3 {
        return;
    }
    let width = suggestions
        .iter()
        .map(|suggestion| suggestion.display().chars().count() as u16 + 4)
        .max()
        .unwrap_or(20)
        .max(20)
        .min(anchor.width);
    let area = Rect::new(anchor.x, anchor.y - height, width, height);

    let items: Vec<ListItem> = suggestions
        .iter()
        .map(|suggestion| ListItem::new(suggestion.display()))
        .collect();
    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(" Suggestions "))
        .highlight_style(
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        );
    let mut state = ListState::default().with_selected(highlighted);

    frame.render_widget(Clear, area);
    frame.render_stateful_widget(list, area, &mut state);
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::EntityId;
    use ratatui::{Terminal, backend::TestBackend};

    fn fiji() -> Vec<Suggestion> {
        vec![Suggestion {
            id: EntityId(7),
            name: "Fiji".to_string(),
            secondary_name: Some("Republic of Fiji".to_string()),
        }]
    }

    #[test]
    fn suggestions_fit_terminals_narrower_than_the_popup() {
        let mut terminal = Terminal::new(TestBackend::new(15, 20)).unwrap();
        terminal
            .draw(|frame| render_suggestions(frame, Rect::new(0, 15, 15, 3), &fiji(), None))
            .unwrap();

        let buffer = terminal.backend().buffer();
        let row: String = (0..15u16).map(|x| buffer[(x, 13u16)].symbol()).collect();
        assert!(row.contains("Fiji"));
    }

    #[test]
    fn suggestions_sit_above_the_anchor() {
        let mut terminal = Terminal::new(TestBackend::new(60, 20)).unwrap();
        terminal
            .draw(|frame| render_suggestions(frame, Rect::new(0, 15, 60, 3), &fiji(), Some(0)))
            .unwrap();

        let buffer = terminal.backend().buffer();
        let row: String = (0..60u16).map(|x| buffer[(x, 13u16)].symbol()).collect();
        assert!(row.contains("Fiji (Republic of Fiji)"));
        let anchor_row: String = (0..60u16).map(|x| buffer[(x, 15u16)].symbol()).collect();
        assert!(anchor_row.trim().is_empty());
    }
}
