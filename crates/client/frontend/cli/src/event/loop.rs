//! Event loop orchestrating runtime events, user input, and rendering.
//!
//! This module coordinates four concerns:
//! - Runtime event consumption into the message log
//! - Keyboard and mouse input (session actions, map navigation, selection)
//! - Keeping the map layer in step with the published session view
//! - Rendering, only when something changed

use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use chrono::Utc;
use crossterm::event::{
    self, Event as TermEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
};
use game_core::{GameDate, GameMode};
use runtime::{Event as RuntimeEvent, RuntimeHandle};
use tokio::{
    sync::broadcast::error::RecvError,
    time::{self, Duration},
};

use crate::{
    config::CliConfig,
    input::{InputContext, InputHandler, KeyAction},
    presentation::{
        terminal::Tui,
        ui::{self, MapPane, RenderContext},
        widgets::MapViewport,
    },
    state::{AppState, InputMode},
};
use client_frontend_core::{
    EventConsumer, FrontendConfig, SessionMessages, SessionProvider,
    map::GeoPoint,
    message::MessageEntry,
    view_model::{Suggestion, ViewModel, suggestions},
};

use super::session::{ActiveSession, MapState, Subscriptions};

const FRAME_INTERVAL_MS: u64 = 16;
const CLOCK_INTERVAL_MS: u64 = 1000;
const SCROLL_ZOOM: f64 = 1.25;

/// What the loop should do after handling one input.
enum Flow {
    Continue,
    Quit,
    SwitchMode(GameMode),
}

/// Event loop owning the mounted mode and all UI state.
pub struct EventLoop<C>
where
    C: EventConsumer,
{
    sessions: Arc<dyn SessionProvider>,
    session: Option<ActiveSession>,
    input: InputHandler,
    consumer: C,
    app_state: AppState,
    viewport: Option<MapViewport>,
    frontend_config: FrontendConfig,
    cli_config: CliConfig,
    /// UTC puzzle day the loop last saw, for refetching at midnight.
    today: GameDate,
    dirty: bool,
}

impl EventLoop<SessionMessages> {
    pub fn new(
        sessions: Arc<dyn SessionProvider>,
        frontend_config: FrontendConfig,
        cli_config: CliConfig,
    ) -> Self {
        let consumer = SessionMessages::new(frontend_config.messages.capacity);
        Self::with_consumer(sessions, consumer, frontend_config, cli_config)
    }
}

impl<C> EventLoop<C>
where
    C: EventConsumer,
{
    pub fn with_consumer(
        sessions: Arc<dyn SessionProvider>,
        consumer: C,
        frontend_config: FrontendConfig,
        cli_config: CliConfig,
    ) -> Self {
        Self {
            sessions,
            session: None,
            input: InputHandler::new(),
            consumer,
            app_state: AppState::new(),
            viewport: None,
            frontend_config,
            cli_config,
            today: GameDate::from_instant(Utc::now()),
            dirty: true,
        }
    }

    pub async fn run(mut self, terminal: &mut Tui, mode: GameMode) -> Result<C> {
        let mut subscriptions = self.mount(mode).await?;
        self.render(terminal)?;

        let mut clock = time::interval(Duration::from_millis(CLOCK_INTERVAL_MS));
        clock.set_missed_tick_behavior(time::MissedTickBehavior::Skip);

        loop {
            let flow = tokio::select! {
                result = subscriptions.session.recv() => self.handle_runtime_event(result),
                result = subscriptions.catalog.recv() => self.handle_runtime_event(result),
                _ = time::sleep(Duration::from_millis(FRAME_INTERVAL_MS)) => self.handle_input_tick()?,
                _ = clock.tick() => self.handle_clock_tick(),
            };

            match flow {
                Flow::Continue => {}
                Flow::Quit => break,
                Flow::SwitchMode(next) => match self.mount(next).await {
                    Ok(fresh) => subscriptions = fresh,
                    Err(e) => {
                        tracing::error!("Failed to open {}: {:#}", next, e);
                        self.notify(MessageEntry::warning(format!(
                            "Could not switch to {}: {e:#}",
                            next.title()
                        )));
                    }
                },
            }

            self.sync_map();
            if self.dirty {
                self.render(terminal)?;
            }
        }

        Ok(self.consumer)
    }

    /// Abandon the current mode, if any, and mount `mode`.
    async fn mount(&mut self, mode: GameMode) -> Result<Subscriptions> {
        let (session, subscriptions) = ActiveSession::mount(&self.sessions, mode).await?;
        if let Some(previous) = self.session.replace(session) {
            tracing::info!("Abandoned {} session", previous.mode());
        }

        self.app_state.exit_to_normal();
        self.viewport = None;
        self.dirty = true;
        self.notify(MessageEntry::info(format!("Playing {}.", mode.title())));
        Ok(subscriptions)
    }

    fn notify(&mut self, entry: MessageEntry) {
        self.consumer.message_log_mut().push(entry);
        self.dirty = true;
    }

    fn handle_runtime_event(&mut self, result: Result<RuntimeEvent, RecvError>) -> Flow {
        match result {
            Ok(event) => {
                let impact = self.consumer.on_event(&event);
                self.dirty |= impact.requires_redraw;
                Flow::Continue
            }
            Err(RecvError::Closed) => {
                tracing::warn!("Event stream closed");
                Flow::Quit
            }
            Err(RecvError::Lagged(skipped)) => {
                tracing::warn!("Dropped {} stale events", skipped);
                Flow::Continue
            }
        }
    }

    /// Countdown redraw, plus a refetch when the UTC day changes.
    fn handle_clock_tick(&mut self) -> Flow {
        self.dirty = true;

        let today = GameDate::from_instant(Utc::now());
        if today != self.today {
            self.today = today;
            if let Some(session) = &self.session {
                tracing::info!("UTC day changed to {}, refetching", today);
                let handle = session.handle().clone();
                spawn_request("fetch state", async move { handle.fetch_state().await });
            }
        }
        Flow::Continue
    }

    fn handle_input_tick(&mut self) -> Result<Flow> {
        while event::poll(Duration::from_millis(0))? {
            let flow = match event::read()? {
                TermEvent::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key),
                TermEvent::Mouse(mouse) => {
                    self.handle_mouse(mouse);
                    Flow::Continue
                }
                TermEvent::Resize(_, _) => {
                    self.dirty = true;
                    Flow::Continue
                }
                _ => Flow::Continue,
            };
            if !matches!(flow, Flow::Continue) {
                return Ok(flow);
            }
        }
        Ok(Flow::Continue)
    }

    fn handle_key(&mut self, key: crossterm::event::KeyEvent) -> Flow {
        let Some(session) = &self.session else {
            return Flow::Quit;
        };
        let handle = session.handle().clone();
        let mode = handle.mode();

        let (can_ask, can_guess, catalog) = {
            let view = handle.view();
            (view.can_ask(), view.can_guess(), Arc::clone(&view.catalog))
        };
        let candidates = if self.app_state.mode == InputMode::MakeGuess {
            suggestions(
                &catalog,
                &self.app_state.buffer,
                self.frontend_config.guesses.suggestion_limit,
            )
        } else {
            Vec::new()
        };
        let exact_match = catalog
            .find_by_name(self.app_state.buffer.trim())
            .map(|entity| entity.id);

        let ctx = InputContext {
            can_ask,
            can_guess,
            max_question_len: mode.max_question_len(),
            suggestions: &candidates,
            exact_match,
        };
        let action = self.input.handle_key(key, &mut self.app_state, &ctx);
        self.apply(action, handle)
    }

    fn apply(&mut self, action: KeyAction, handle: RuntimeHandle) -> Flow {
        match action {
            KeyAction::Quit => return Flow::Quit,
            KeyAction::SwitchMode => return Flow::SwitchMode(handle.mode().next()),
            KeyAction::Ask(text) => {
                spawn_request("ask question", async move { handle.ask_question(text).await });
            }
            KeyAction::Guess { text, entity_id } => {
                spawn_request("make guess", async move {
                    handle.make_guess(text, entity_id).await
                });
            }
            KeyAction::DismissError => {
                if handle.view().error.is_some() {
                    spawn_request("dismiss error", async move { handle.dismiss_error().await });
                }
            }
            KeyAction::ClearSelection => handle.selection().clear(),
            KeyAction::Reveal => {
                let revealed = match self.map_layer_mut() {
                    Some(map) => map.reveal(&handle.view(), Instant::now()),
                    None => false,
                };
                if !revealed {
                    self.notify(MessageEntry::info("Nothing to reveal yet."));
                }
            }
            KeyAction::Pan(dx, dy) => {
                if let Some(map) = self.map_layer_mut() {
                    map.camera_mut().pan(dx, dy);
                }
            }
            KeyAction::Zoom(factor) => {
                if let Some(map) = self.map_layer_mut() {
                    map.camera_mut().zoom_by(factor);
                }
            }
            KeyAction::ResetView => {
                if let Some(map) = self.map_layer_mut() {
                    map.camera_mut().reset();
                }
            }
            KeyAction::Notice(text) => self.notify(MessageEntry::info(text)),
            KeyAction::Redraw => {}
            KeyAction::None => return Flow::Continue,
        }
        self.dirty = true;
        Flow::Continue
    }

    fn map_layer_mut(&mut self) -> Option<&mut client_frontend_core::map::MapLayer> {
        self.session
            .as_mut()
            .and_then(|session| session.map.layer_mut())
    }

    /// Hover, click-to-select and wheel zoom on the map panel.
    fn handle_mouse(&mut self, mouse: MouseEvent) {
        let point: Option<GeoPoint> = self
            .viewport
            .and_then(|viewport| viewport.geo_at(mouse.column, mouse.row));
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let handle = session.handle().clone();
        let Some(map) = session.map.layer_mut() else {
            return;
        };

        match mouse.kind {
            MouseEventKind::Moved | MouseEventKind::Drag(_) => {
                let view = handle.view();
                self.dirty |= map.pointer_moved(point, &view, handle.selection());
            }
            MouseEventKind::Down(MouseButton::Left) => {
                if let Some(point) = point {
                    // Paint follows on the next sync.
                    if map.click(point, handle.selection()).is_some() {
                        self.dirty = true;
                    }
                }
            }
            MouseEventKind::ScrollUp if point.is_some() => {
                map.camera_mut().zoom_by(SCROLL_ZOOM);
                self.dirty = true;
            }
            MouseEventKind::ScrollDown if point.is_some() => {
                map.camera_mut().zoom_by(1.0 / SCROLL_ZOOM);
                self.dirty = true;
            }
            _ => {}
        }
    }

    /// Observe the session view and selection, keeping paint and camera current.
    fn sync_map(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        self.dirty |= session.poll_dataset(&self.frontend_config.map);

        let handle = session.handle().clone();
        let Some(map) = session.map.layer_mut() else {
            return;
        };
        let now = Instant::now();
        let outcome = {
            let view = handle.view();
            map.sync(&view, handle.selection(), now)
        };
        let animating = map.tick(now);
        self.dirty |= outcome.restyled || animating;
    }

    fn render(&mut self, terminal: &mut Tui) -> Result<()> {
        let Some(session) = &self.session else {
            return Ok(());
        };
        let handle = session.handle();
        let mode = handle.mode();

        let (view_model, loading, candidates) = {
            let view = handle.view();
            let candidates: Vec<Suggestion> = if self.app_state.mode == InputMode::MakeGuess {
                suggestions(
                    &view.catalog,
                    &self.app_state.buffer,
                    self.frontend_config.guesses.suggestion_limit,
                )
            } else {
                Vec::new()
            };
            (
                ViewModel::from_view(&view, Utc::now()),
                view.is_loading(),
                candidates,
            )
        };

        let map = match &session.map {
            MapState::Loading(_) => MapPane::Loading,
            MapState::Failed(reason) => MapPane::Failed(reason),
            MapState::Ready(layer) => MapPane::Ready {
                map: layer,
                selected: handle.selection().len(),
            },
        };

        let ctx = RenderContext {
            view_model: &view_model,
            messages: self.consumer.message_log(),
            app_state: &self.app_state,
            map,
            suggestions: &candidates,
            loading,
            max_question_len: mode.max_question_len(),
            ui: &self.cli_config.ui,
        };

        self.viewport = ui::render(terminal, &ctx)?;
        self.dirty = false;
        Ok(())
    }
}

/// Run a runtime request without blocking the loop. Outcomes reach the UI
/// through the published view and the event bus.
fn spawn_request<T, F>(label: &'static str, request: F)
where
    T: Send + 'static,
    F: std::future::Future<Output = runtime::Result<T>> + Send + 'static,
{
    tokio::spawn(async move {
        if let Err(e) = request.await {
            tracing::warn!("{} failed: {}", label, e);
        }
    });
}
