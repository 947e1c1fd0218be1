//! Question and guess history panel.

use client_frontend_core::view_model::{PresentationMapper, ViewModel};
use game_core::Verdict;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

fn verdict_label(verdict: Verdict) -> &'static str {
    match verdict {
        Verdict::Yes => "YES",
        Verdict::No => "NO",
        Verdict::Unknown => "UNKNOWN",
        Verdict::Invalid => "INVALID",
    }
}

/// Render questions on top and guesses below, newest first.
pub fn render<T: PresentationMapper<Style = Style>>(
    frame: &mut Frame,
    area: Rect,
    view_model: &ViewModel,
    theme: &T,
) {
    let guess_height = (view_model.guesses.len() as u16 + 2).clamp(4, area.height / 2);
    let correct_height = if view_model.correct.is_some() { 3 } else { 0 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(correct_height),
            Constraint::Min(3),
            Constraint::Length(guess_height),
        ])
        .split(area);

    if let Some(correct) = &view_model.correct {
        let banner = Paragraph::new(Line::from(vec![
            Span::raw("Answer: "),
            Span::styled(
                correct.clone(),
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
        ]))
        .block(Block::default().borders(Borders::ALL));
        frame.render_widget(banner, chunks[0]);
    }

    let mut question_lines = Vec::new();
    for row in &view_model.questions {
        question_lines.push(Line::from(vec![
            Span::styled(format!("#{} ", row.number), Style::default().fg(Color::DarkGray)),
            Span::raw(row.text.clone()),
            Span::raw(" "),
            Span::styled(
                verdict_label(row.verdict),
                theme.emphasize(theme.style_verdict(row.verdict)),
            ),
        ]));
        if let Some(explanation) = &row.explanation {
            question_lines.push(Line::from(Span::styled(
                format!("    {explanation}"),
                Style::default()
                    .fg(Color::Gray)
                    .add_modifier(Modifier::ITALIC),
            )));
        }
    }
    if question_lines.is_empty() {
        question_lines.push(Line::from(Span::styled(
            "No questions yet.",
            Style::default().fg(Color::DarkGray),
        )));
    }
    let questions = Paragraph::new(question_lines)
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).title(" Questions "));
    frame.render_widget(questions, chunks[1]);

    let guess_lines: Vec<Line> = view_model
        .guesses
        .iter()
        .map(|row| {
            Line::from(vec![
                Span::styled(format!("#{} ", row.number), Style::default().fg(Color::DarkGray)),
                Span::styled(row.text.clone(), theme.style_guess(row.verdict)),
            ])
        })
        .collect();
    let guesses = Paragraph::new(guess_lines)
        .block(Block::default().borders(Borders::ALL).title(" Guesses "));
    frame.render_widget(guesses, chunks[2]);
}
