//! Traits describing a runnable client front-end and what it runs against.
use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use game_core::GameMode;
use runtime::Runtime;

use crate::map::RegionDataset;

/// Opens per-mode sessions for a frontend.
///
/// Each call to [`SessionProvider::open`] returns a fresh [`Runtime`] with
/// its own session engine and selection set. Frontends drop the runtime to
/// abandon a mode; in-flight requests settle unobserved.
#[async_trait]
pub trait SessionProvider: Send + Sync {
    /// Mode to open on startup.
    fn default_mode(&self) -> GameMode;

    async fn open(&self, mode: GameMode) -> Result<Runtime>;

    /// Load the static polygon dataset for `mode`. Called once per mount.
    async fn load_dataset(&self, mode: GameMode) -> Result<RegionDataset>;
}

/// Frontend abstraction for UI layers.
///
/// Frontends communicate with a mode's session via its
/// [`runtime::RuntimeHandle`]:
/// - Read the current [`runtime::SessionView`] synchronously
/// - Subscribe to session and catalog events
/// - Submit questions and guesses
///
/// # Example Implementation
///
/// ```no_run
/// use std::sync::Arc;
///
/// use anyhow::Result;
/// use async_trait::async_trait;
/// use client_frontend_core::{Frontend, SessionProvider};
///
/// struct PrintFrontend;
///
/// #[async_trait]
/// impl Frontend for PrintFrontend {
///     async fn run(&mut self, sessions: Arc<dyn SessionProvider>) -> Result<()> {
///         let runtime = sessions.open(sessions.default_mode()).await?;
///         let handle = runtime.handle();
///         handle.activate().await?;
///         println!("{:?}", handle.view().snapshot());
///         Ok(())
///     }
/// }
/// ```
#[async_trait]
pub trait Frontend: Send {
    /// Run the frontend event loop.
    ///
    /// Should block until the user quits the application.
    ///
    /// # Errors
    ///
    /// Returns an error if the frontend encounters a fatal error.
    async fn run(&mut self, sessions: Arc<dyn SessionProvider>) -> Result<()>;
}
