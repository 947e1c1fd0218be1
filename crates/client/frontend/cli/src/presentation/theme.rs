//! Ratatui theme implementation of PresentationMapper.
//!
//! This module provides concrete styling for the terminal UI, implementing
//! the framework-agnostic PresentationMapper trait from frontend-core.

use client_frontend_core::{
    map::{PaintRole, RegionStyle, Rgb},
    message::MessageLevel,
    view_model::{PresentationMapper, SessionStatus},
};
use game_core::{GuessVerdict, Verdict};
use ratatui::style::{Color, Modifier, Style};

/// Ratatui-specific theme implementing PresentationMapper.
///
/// This provides consistent color schemes and styling rules for the CLI.
#[derive(Clone, Copy, Debug, Default)]
pub struct RatatuiTheme;

impl PresentationMapper for RatatuiTheme {
    type Style = Style;

    fn style_verdict(&self, verdict: Verdict) -> Self::Style {
        let color = match verdict {
            Verdict::Yes => Color::Green,
            Verdict::No => Color::Red,
            Verdict::Unknown => Color::Yellow,
            Verdict::Invalid => Color::LightRed,
        };
        Style::default().fg(color)
    }

    fn style_guess(&self, verdict: GuessVerdict) -> Self::Style {
        match verdict {
            GuessVerdict::Correct => Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
            GuessVerdict::Incorrect => Style::default().fg(Color::Red),
            GuessVerdict::Pending => Style::default().fg(Color::Gray),
        }
    }

    fn style_status(&self, status: SessionStatus) -> Self::Style {
        let color = match status {
            SessionStatus::NotLoaded => Color::DarkGray,
            SessionStatus::Loading => Color::Yellow,
            SessionStatus::Playing => Color::Cyan,
            SessionStatus::Won => Color::Green,
            SessionStatus::Lost => Color::LightRed,
        };
        Style::default().fg(color)
    }

    fn style_message(&self, level: MessageLevel) -> Self::Style {
        match level {
            MessageLevel::Info => Style::default().fg(Color::White),
            MessageLevel::Success => Style::default().fg(Color::Green),
            MessageLevel::Warning => Style::default().fg(Color::Yellow),
            MessageLevel::Error => Style::default().fg(Color::LightRed),
        }
    }

    fn style_region(&self, role: PaintRole) -> Self::Style {
        Style::default().fg(to_color(role.fill()))
    }

    fn emphasize(&self, base_style: Self::Style) -> Self::Style {
        base_style.add_modifier(Modifier::BOLD)
    }
}

impl RatatuiTheme {
    pub fn new() -> Self {
        Self
    }

    /// Fill color blended over the black terminal background.
    pub fn region_fill(&self, style: &RegionStyle) -> Color {
        let Rgb(r, g, b) = style.fill;
        let blend = |channel: u8| (f32::from(channel) * style.fill_opacity.clamp(0.0, 1.0)) as u8;
        Color::Rgb(blend(r), blend(g), blend(b))
    }

    /// Outline color; thicker borders render brighter.
    pub fn region_border(&self, style: &RegionStyle) -> Color {
        if style.weight > 1.0 {
            Color::Yellow
        } else {
            let Rgb(r, g, b) = style.border;
            let dim = |channel: u8| (f32::from(channel) * 0.55 * style.opacity) as u8;
            Color::Rgb(dim(r), dim(g), dim(b))
        }
    }
}

fn to_color(Rgb(r, g, b): Rgb) -> Color {
    Color::Rgb(r, g, b)
}
