//! UI rendering composing all widgets from a ViewModel.
//!
//! This module provides the main render entry point that lays out the
//! header, map, history, messages, input and footer.
use anyhow::Result;
use ratatui::layout::{Constraint, Direction, Layout, Rect};

use crate::{
    config::UiConfig,
    presentation::{
        terminal::Tui,
        theme::RatatuiTheme,
        widgets::{self, MapViewport},
    },
    state::{AppState, InputMode},
};
use client_frontend_core::{
    map::MapLayer,
    message::MessageLog,
    view_model::{Suggestion, ViewModel},
};

/// What the map panel can show.
pub enum MapPane<'a> {
    Loading,
    Failed(&'a str),
    Ready { map: &'a MapLayer, selected: usize },
}

/// Rendering context containing all state and configuration needed for UI rendering.
pub struct RenderContext<'a> {
    pub view_model: &'a ViewModel,
    pub messages: &'a MessageLog,
    pub app_state: &'a AppState,
    pub map: MapPane<'a>,
    pub suggestions: &'a [Suggestion],
    pub loading: bool,
    pub max_question_len: usize,
    pub ui: &'a UiConfig,
}

/// Draw one frame.
///
/// Returns the map viewport so mouse positions can be mapped back to
/// geographic coordinates until the next frame.
pub fn render(terminal: &mut Tui, ctx: &RenderContext) -> Result<Option<MapViewport>> {
    let theme = RatatuiTheme::new();
    let mut viewport = None;

    terminal.draw(|frame| {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),                           // Header
                Constraint::Min(0),                              // Map + history
                Constraint::Length(ctx.ui.message_panel_height), // Messages
                Constraint::Length(3),                           // Input
                Constraint::Length(1),                           // Footer
            ])
            .split(frame.area());

        widgets::header::render(frame, chunks[0], &ctx.view_model.header, &theme);

        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(100 - ctx.ui.history_panel_percent),
                Constraint::Percentage(ctx.ui.history_panel_percent),
            ])
            .split(chunks[1]);

        viewport = render_map(frame, body[0], &ctx.map, &theme);
        widgets::history::render(frame, body[1], ctx.view_model, &theme);

        let rows = ctx.ui.message_panel_height.saturating_sub(2) as usize;
        let recent: Vec<_> = ctx.messages.recent(rows).collect();
        widgets::messages::render(frame, chunks[2], &recent, &theme);

        widgets::input::render(
            frame,
            chunks[3],
            ctx.app_state,
            ctx.view_model.error.as_deref(),
            ctx.loading,
            ctx.max_question_len,
        );
        if ctx.app_state.mode == InputMode::MakeGuess {
            widgets::input::render_suggestions(
                frame,
                chunks[3],
                ctx.suggestions,
                ctx.app_state.highlighted,
            );
        }

        widgets::footer::render(frame, chunks[4], ctx.app_state.mode);
    })?;

    Ok(viewport)
}

fn render_map(
    frame: &mut ratatui::Frame,
    area: Rect,
    pane: &MapPane,
    theme: &RatatuiTheme,
) -> Option<MapViewport> {
    match pane {
        MapPane::Loading => {
            widgets::map::render_placeholder(frame, area, "Loading map…", false);
            None
        }
        MapPane::Failed(reason) => {
            widgets::map::render_placeholder(frame, area, reason, true);
            None
        }
        MapPane::Ready { map, selected } => {
            Some(widgets::map::render(frame, area, map, *selected, theme))
        }
    }
}
