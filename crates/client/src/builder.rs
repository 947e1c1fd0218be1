//! Client builder with dependency injection pattern.

use std::sync::Arc;

use crate::{Client, Frontend};
use anyhow::{Context, Result};
use client_frontend_core::SessionProvider;

/// Builder for constructing a Client with proper validation.
///
/// Both the session provider and the frontend are required; missing either
/// fails `build()`.
#[derive(Default)]
pub struct ClientBuilder {
    sessions: Option<Arc<dyn SessionProvider>>,
    frontend: Option<Box<dyn Frontend>>,
}

impl ClientBuilder {
    /// Create a new ClientBuilder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the session provider (required).
    ///
    /// It opens one runtime per game mode and loads map datasets. It should be
    /// constructed via `SessionFactory` from the `client-bootstrap` crate.
    pub fn sessions(mut self, sessions: impl SessionProvider + 'static) -> Self {
        self.sessions = Some(Arc::new(sessions));
        self
    }

    /// Set the frontend (required).
    ///
    /// The frontend handles UI rendering and user input, opening sessions
    /// through the provider as the player switches modes.
    pub fn frontend(mut self, frontend: impl Frontend + 'static) -> Self {
        self.frontend = Some(Box::new(frontend));
        self
    }

    /// Build the Client.
    ///
    /// # Errors
    ///
    /// Returns an error if the session provider or the frontend is not set.
    pub fn build(self) -> Result<Client> {
        let sessions = self
            .sessions
            .context("Session provider is required. Use .sessions() to set it.")?;

        let frontend = self
            .frontend
            .context("Frontend is required. Use .frontend() to set it.")?;

        Ok(Client { sessions, frontend })
    }
}
