//! Header widget displaying the puzzle, quotas and the next-puzzle countdown.

use client_frontend_core::view_model::{HeaderView, PresentationMapper};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

fn quota(value: Option<u32>) -> String {
    value.map_or_else(|| "-".to_string(), |n| n.to_string())
}

/// Render the header panel.
///
/// Displays date, status, remaining questions and guesses, points once the
/// game is over, and the time until the next puzzle.
pub fn render<T: PresentationMapper<Style = Style>>(
    frame: &mut Frame,
    area: Rect,
    header: &HeaderView,
    theme: &T,
) {
    let date = header
        .date
        .map_or_else(|| "----------".to_string(), |date| date.to_string());

    let mut spans = vec![
        Span::raw("Date: "),
        Span::styled(date, Style::default().fg(Color::Yellow)),
        Span::raw(" | "),
        Span::styled(
            header.status.label(),
            theme.emphasize(theme.style_status(header.status)),
        ),
        Span::raw(" | Questions: "),
        Span::styled(
            quota(header.remaining_questions),
            Style::default().fg(Color::Cyan),
        ),
        Span::raw(" | Guesses: "),
        Span::styled(
            quota(header.remaining_guesses),
            Style::default().fg(Color::LightGreen),
        ),
    ];
    if let Some(points) = header.points {
        spans.push(Span::raw(" | Points: "));
        spans.push(Span::styled(
            points.to_string(),
            Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
        ));
    }
    spans.push(Span::raw(" | Next puzzle in "));
    spans.push(Span::styled(
        header.countdown.clone(),
        Style::default().fg(Color::Gray),
    ));

    let paragraph = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(" {} ", header.mode.title())),
    );

    frame.render_widget(paragraph, area);
}
