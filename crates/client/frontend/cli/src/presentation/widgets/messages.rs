//! Message log panel.

use client_frontend_core::{message::MessageEntry, view_model::PresentationMapper};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

/// Render recent messages, newest at the bottom.
pub fn render<T: PresentationMapper<Style = Style>>(
    frame: &mut Frame,
    area: Rect,
    recent: &[&MessageEntry],
    theme: &T,
) {
    let lines: Vec<Line> = recent
        .iter()
        .rev()
        .map(|entry| {
            let mut spans = Vec::with_capacity(2);
            if let Some(timestamp) = entry.timestamp {
                spans.push(Span::styled(
                    timestamp.format("%H:%M:%S ").to_string(),
                    Style::default().fg(Color::DarkGray),
                ));
            }
            spans.push(Span::styled(
                entry.text.clone(),
                theme.style_message(entry.level),
            ));
            Line::from(spans)
        })
        .collect();

    let paragraph =
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(" Messages "));
    frame.render_widget(paragraph, area);
}
