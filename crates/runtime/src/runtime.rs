//! High-level runtime orchestrator.
//!
//! The runtime owns the session worker for one game mode, wires up the
//! command, view and event channels, and exposes a builder-based API. A
//! frontend mounts one runtime per mode and drops it to abandon the mode.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use game_core::GameMode;

use crate::api::{GameAuthority, Result, RuntimeError, RuntimeHandle};
use crate::clock::{DayClock, UtcClock};
use crate::engine::SessionEngine;
use crate::events::EventBus;
use crate::selection::SharedSelection;
use crate::workers::{Command, SessionWorker};

/// Runtime configuration shared across the orchestrator and workers.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub mode: GameMode,
    pub event_buffer_size: usize,
    pub command_buffer_size: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            mode: GameMode::default(),
            event_buffer_size: 64,
            command_buffer_size: 32,
        }
    }
}

impl RuntimeConfig {
    pub fn for_mode(mode: GameMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }
}

/// Session runtime for a single game mode.
///
/// Design: Runtime owns the worker task.
/// [`RuntimeHandle`] provides a cloneable façade for clients.
pub struct Runtime {
    handle: RuntimeHandle,
    worker_handle: JoinHandle<()>,
}

impl Runtime {
    /// Create a new runtime builder
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    pub fn mode(&self) -> GameMode {
        self.handle.mode()
    }

    /// Get a cloneable handle to this runtime
    ///
    /// The handle can be shared across clients and async tasks.
    pub fn handle(&self) -> RuntimeHandle {
        self.handle.clone()
    }

    /// Shutdown the runtime gracefully
    ///
    /// Waits for the worker to drain queued commands. Every other handle
    /// clone must be dropped first, otherwise the worker keeps running.
    pub async fn shutdown(self) -> Result<()> {
        drop(self.handle);
        self.worker_handle.await.map_err(RuntimeError::WorkerJoin)
    }
}

/// Builder for [`Runtime`] with flexible configuration.
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    authority: Option<Arc<dyn GameAuthority>>,
    clock: Option<Arc<dyn DayClock>>,
}

impl RuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            authority: None,
            clock: None,
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the remote authority backing this mode (required)
    pub fn authority(mut self, authority: impl GameAuthority + 'static) -> Self {
        self.authority = Some(Arc::new(authority));
        self
    }

    pub fn shared_authority(mut self, authority: Arc<dyn GameAuthority>) -> Self {
        self.authority = Some(authority);
        self
    }

    /// Override the clock used for the day-rollover check (default: UTC wall clock)
    pub fn clock(mut self, clock: impl DayClock + 'static) -> Self {
        self.clock = Some(Arc::new(clock));
        self
    }

    /// Build the runtime and spawn its worker
    pub async fn build(self) -> Result<Runtime> {
        let authority = self.authority.ok_or(RuntimeError::MissingAuthority)?;
        if authority.mode() != self.config.mode {
            return Err(RuntimeError::ModeMismatch {
                expected: self.config.mode,
                provided: authority.mode(),
            });
        }
        let clock = self.clock.unwrap_or_else(|| Arc::new(UtcClock));

        let (command_tx, command_rx) = mpsc::channel::<Command>(self.config.command_buffer_size);
        let event_bus = EventBus::with_capacity(self.config.event_buffer_size);
        let selection = SharedSelection::new();

        let (engine, view_rx) =
            SessionEngine::new(authority, clock, selection.clone(), event_bus.clone());
        let worker = SessionWorker::new(engine, command_rx);
        let worker_handle = tokio::spawn(worker.run());

        let handle = RuntimeHandle::new(
            self.config.mode,
            command_tx,
            event_bus,
            view_rx,
            selection,
        );

        tracing::info!("Runtime started for mode {}", self.config.mode);

        Ok(Runtime {
            handle,
            worker_handle,
        })
    }
}
