//! Glue code tying the session provider and the terminal UI together.
use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;

use crate::config::CliConfig;
use crate::event::EventLoop;
use crate::presentation::terminal;
use client_frontend_core::{Frontend, FrontendConfig, SessionProvider};

/// Terminal frontend.
///
/// Does not own any runtime itself: each mode's runtime is opened through
/// the [`SessionProvider`] and dropped when the player switches away.
pub struct CliFrontend {
    frontend_config: FrontendConfig,
    cli_config: CliConfig,
}

impl CliFrontend {
    pub fn new(frontend_config: FrontendConfig, cli_config: CliConfig) -> Self {
        Self {
            frontend_config,
            cli_config,
        }
    }
}

#[async_trait]
impl Frontend for CliFrontend {
    async fn run(&mut self, sessions: Arc<dyn SessionProvider>) -> Result<()> {
        tracing::info!("CLI client starting...");

        let mode = sessions.default_mode();
        let event_loop = EventLoop::new(
            sessions,
            self.frontend_config.clone(),
            self.cli_config.clone(),
        );

        let mut terminal = terminal::init()?;
        let _guard = terminal::TerminalGuard;

        let _consumer = event_loop.run(&mut terminal, mode).await?;

        terminal::restore()?;
        tracing::info!("CLI client exiting");

        Ok(())
    }
}
