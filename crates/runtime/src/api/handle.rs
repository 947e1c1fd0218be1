//! Cloneable façade for issuing commands to the runtime.
//!
//! [`RuntimeHandle`] hides channel plumbing, offers async helpers for each
//! session operation, and exposes the synchronous snapshot accessor map event
//! handlers read from.
use std::collections::HashMap;

use tokio::sync::{broadcast, mpsc, oneshot, watch};

use game_core::{EntityId, GameMode};

use super::errors::{Result, RuntimeError};
use super::outcome::ActionOutcome;
use crate::engine::SessionView;
use crate::events::{Event, EventBus, Topic};
use crate::selection::SharedSelection;
use crate::workers::Command;

/// Client-facing handle to interact with the runtime
#[derive(Clone)]
pub struct RuntimeHandle {
    mode: GameMode,
    command_tx: mpsc::Sender<Command>,
    event_bus: EventBus,
    view_rx: watch::Receiver<SessionView>,
    selection: SharedSelection,
}

impl RuntimeHandle {
    pub(crate) fn new(
        mode: GameMode,
        command_tx: mpsc::Sender<Command>,
        event_bus: EventBus,
        view_rx: watch::Receiver<SessionView>,
        selection: SharedSelection,
    ) -> Self {
        Self {
            mode,
            command_tx,
            event_bus,
            view_rx,
            selection,
        }
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    async fn request<T>(&self, build: impl FnOnce(oneshot::Sender<T>) -> Command) -> Result<T> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(build(reply_tx))
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    /// Load the catalog, then the session state, for a freshly mounted mode.
    pub async fn activate(&self) -> Result<ActionOutcome> {
        self.fetch_entities().await?;
        self.fetch_state().await
    }

    /// Refetch the authoritative session state.
    pub async fn fetch_state(&self) -> Result<ActionOutcome> {
        self.request(|reply| Command::FetchState { reply }).await
    }

    /// Reload the entity catalog. A failure keeps the previous catalog.
    pub async fn fetch_entities(&self) -> Result<ActionOutcome> {
        self.request(|reply| Command::FetchEntities { reply }).await
    }

    /// Ask a yes/no question, then reconcile.
    ///
    /// Skipped without a remote call when the game is over or no questions
    /// remain.
    pub async fn ask_question(&self, text: impl Into<String>) -> Result<ActionOutcome> {
        let text = text.into();
        self.request(|reply| Command::AskQuestion { text, reply })
            .await
    }

    /// Submit a guess, then reconcile.
    pub async fn make_guess(
        &self,
        text: impl Into<String>,
        entity_id: Option<EntityId>,
    ) -> Result<ActionOutcome> {
        let text = text.into();
        self.request(|reply| Command::MakeGuess {
            text,
            entity_id,
            reply,
        })
        .await
    }

    pub async fn reset_for_new_day(&self) -> Result<()> {
        self.request(|reply| Command::ResetForNewDay { reply })
            .await
    }

    pub async fn dismiss_error(&self) -> Result<()> {
        self.request(|reply| Command::DismissError { reply }).await
    }

    /// Current session view, borrowed without waiting.
    ///
    /// Keep the returned guard short-lived: the worker cannot publish while
    /// it is held.
    pub fn view(&self) -> watch::Ref<'_, SessionView> {
        self.view_rx.borrow()
    }

    /// Owned receiver for change notifications.
    pub fn watch(&self) -> watch::Receiver<SessionView> {
        self.view_rx.clone()
    }

    pub fn selection(&self) -> &SharedSelection {
        &self.selection
    }

    /// Subscribe to events from a specific topic
    ///
    /// # Topics
    ///
    /// - `Topic::Session` - Refreshes, rollover, game over, skipped and failed actions
    /// - `Topic::Catalog` - Entity catalog loads
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.event_bus.subscribe(topic)
    }

    /// Subscribe to multiple topics at once
    pub fn subscribe_multiple(&self, topics: &[Topic]) -> HashMap<Topic, broadcast::Receiver<Event>> {
        self.event_bus.subscribe_multiple(topics)
    }

    /// Get a reference to the event bus for advanced usage
    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }
}
