//! Top-level client orchestrating session wiring and the frontend.
//!
//! # Architecture
//!
//! ```text
//! Client (Top-level container)
//!   ├─→ SessionProvider (per-mode runtimes, map datasets)
//!   └─→ Frontend (UI layer - CLI, GUI, etc.)
//! ```
//!
//! The client is the composition root: it owns no game logic itself and hands
//! the provider to the frontend, which mounts and abandons modes on demand.

mod builder;

pub use builder::ClientBuilder;

// Re-export frontend traits from client-frontend-core
pub use client_frontend_core::{Frontend, SessionProvider};

use std::sync::Arc;

use anyhow::Result;

/// Top-level client container.
///
/// # Lifecycle
///
/// 1. `Client::builder()` receives the provider and the frontend
/// 2. `Client::run()` transfers control to the frontend until the user quits
/// 3. Runtimes opened by the frontend are dropped with it
pub struct Client {
    sessions: Arc<dyn SessionProvider>,
    frontend: Box<dyn Frontend>,
}

impl Client {
    /// Create a new ClientBuilder.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Run the frontend to completion.
    ///
    /// # Errors
    ///
    /// Returns whatever the frontend fails with, e.g. the terminal could not
    /// be initialized or the first mode could not be opened.
    pub async fn run(self) -> Result<()> {
        let Client {
            sessions,
            mut frontend,
        } = self;

        tracing::info!("Client running with default mode {}", sessions.default_mode());
        let result = frontend.run(sessions).await;

        if let Err(e) = &result {
            tracing::error!("Frontend error: {:#}", e);
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use client_frontend_core::map::RegionDataset;
    use game_core::GameMode;
    use runtime::{Runtime, mock::MockAuthority};

    struct MockSessions;

    #[async_trait]
    impl SessionProvider for MockSessions {
        fn default_mode(&self) -> GameMode {
            GameMode::Powiaty
        }

        async fn open(&self, mode: GameMode) -> Result<Runtime> {
            Ok(Runtime::builder()
                .config(runtime::RuntimeConfig::for_mode(mode))
                .authority(MockAuthority::builder(mode).build())
                .build()
                .await?)
        }

        async fn load_dataset(&self, _mode: GameMode) -> Result<RegionDataset> {
            anyhow::bail!("no maps in tests")
        }
    }

    struct CountingFrontend(Arc<AtomicUsize>);

    #[async_trait]
    impl Frontend for CountingFrontend {
        async fn run(&mut self, sessions: Arc<dyn SessionProvider>) -> Result<()> {
            let runtime = sessions.open(sessions.default_mode()).await?;
            assert_eq!(runtime.mode(), GameMode::Powiaty);
            self.0.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    #[test]
    fn build_requires_both_layers() {
        let missing_frontend = Client::builder().sessions(MockSessions).build();
        assert!(
            missing_frontend
                .err()
                .is_some_and(|e| e.to_string().contains(".frontend()"))
        );

        let runs = Arc::new(AtomicUsize::new(0));
        let missing_sessions = Client::builder()
            .frontend(CountingFrontend(runs))
            .build();
        assert!(
            missing_sessions
                .err()
                .is_some_and(|e| e.to_string().contains(".sessions()"))
        );
    }

    #[tokio::test]
    async fn run_hands_provider_to_frontend() {
        let runs = Arc::new(AtomicUsize::new(0));
        let client = Client::builder()
            .sessions(MockSessions)
            .frontend(CountingFrontend(Arc::clone(&runs)))
            .build()
            .unwrap();

        client.run().await.unwrap();
        assert_eq!(runs.load(Ordering::SeqCst), 1);
    }
}
