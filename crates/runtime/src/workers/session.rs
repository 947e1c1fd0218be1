//! Session worker that owns the [`SessionEngine`].
//!
//! Receives commands from [`crate::RuntimeHandle`] and processes them FIFO.
//! Being the only task that touches the engine, it needs no locking around
//! the session state.

use tokio::sync::{mpsc, oneshot};
use tracing::debug;

use game_core::EntityId;

use crate::api::ActionOutcome;
use crate::engine::SessionEngine;

/// Commands that can be sent to the session worker
pub enum Command {
    FetchState {
        reply: oneshot::Sender<ActionOutcome>,
    },
    FetchEntities {
        reply: oneshot::Sender<ActionOutcome>,
    },
    AskQuestion {
        text: String,
        reply: oneshot::Sender<ActionOutcome>,
    },
    MakeGuess {
        text: String,
        entity_id: Option<EntityId>,
        reply: oneshot::Sender<ActionOutcome>,
    },
    ResetForNewDay {
        reply: oneshot::Sender<()>,
    },
    DismissError {
        reply: oneshot::Sender<()>,
    },
}

/// Background task that processes session commands.
pub struct SessionWorker {
    engine: SessionEngine,
    command_rx: mpsc::Receiver<Command>,
}

impl SessionWorker {
    pub fn new(engine: SessionEngine, command_rx: mpsc::Receiver<Command>) -> Self {
        tracing::info!("SessionWorker initialized for mode {}", engine.view().mode);
        Self { engine, command_rx }
    }

    /// Main worker loop. Exits once every handle is dropped.
    pub async fn run(mut self) {
        loop {
            tokio::select! {
                Some(cmd) = self.command_rx.recv() => {
                    self.handle_command(cmd).await;
                }
                else => break,
            }
        }
        debug!("SessionWorker stopped for mode {}", self.engine.view().mode);
    }

    async fn handle_command(&mut self, cmd: Command) {
        match cmd {
            Command::FetchState { reply } => {
                let outcome = self.engine.fetch_state().await;
                if reply.send(outcome).is_err() {
                    debug!("FetchState reply channel closed (caller dropped)");
                }
            }
            Command::FetchEntities { reply } => {
                let outcome = self.engine.fetch_entities().await;
                if reply.send(outcome).is_err() {
                    debug!("FetchEntities reply channel closed (caller dropped)");
                }
            }
            Command::AskQuestion { text, reply } => {
                let outcome = self.engine.ask_question(&text).await;
                if reply.send(outcome).is_err() {
                    debug!("AskQuestion reply channel closed (caller dropped)");
                }
            }
            Command::MakeGuess {
                text,
                entity_id,
                reply,
            } => {
                let outcome = self.engine.make_guess(&text, entity_id).await;
                if reply.send(outcome).is_err() {
                    debug!("MakeGuess reply channel closed (caller dropped)");
                }
            }
            Command::ResetForNewDay { reply } => {
                self.engine.reset_for_new_day();
                if reply.send(()).is_err() {
                    debug!("ResetForNewDay reply channel closed (caller dropped)");
                }
            }
            Command::DismissError { reply } => {
                self.engine.dismiss_error();
                if reply.send(()).is_err() {
                    debug!("DismissError reply channel closed (caller dropped)");
                }
            }
        }
    }
}
