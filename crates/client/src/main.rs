//! Geodle client binary.
//!
//! Main entry point for the daily geography puzzle client.
//!
//! # Architecture
//!
//! This binary is the composition root that assembles:
//! 1. Session wiring (HTTP authorities, map datasets) via `SessionFactory`
//! 2. Frontend (UI) - CLI, GUI, etc.
//!
//! Both are built independently and injected into the Client container.
//!
//! # Features
//!
//! - `frontend-cli`: Terminal-based UI (default)
//!
//! # Examples
//!
//! ```bash
//! GEODLE_API_URL=http://localhost:8000 GEODLE_MODE=powiaty cargo run -p geodle-client
//! ```

use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    #[cfg(feature = "frontend-cli")]
    {
        run_cli().await?;
    }

    #[cfg(not(feature = "frontend-cli"))]
    {
        compile_error!("At least one frontend feature must be enabled (frontend-cli, etc.)");
    }

    Ok(())
}

/// Run the CLI frontend.
#[cfg(feature = "frontend-cli")]
async fn run_cli() -> Result<()> {
    use anyhow::Context;
    use client_bootstrap::{BootstrapConfig, SessionFactory};
    use client_frontend_cli::{CliConfig, CliFrontend, FrontendConfig, logging};
    use geodle_client::Client;

    // 1. Load configuration from environment
    let bootstrap_config = BootstrapConfig::from_env().context("invalid GEODLE_* configuration")?;
    let frontend_config = FrontendConfig::from_env();
    let cli_config = CliConfig::from_env();

    // 2. Setup logging
    logging::setup_logging(&bootstrap_config.session_id)?;

    tracing::info!("Starting Geodle client");
    tracing::info!("API: {}", bootstrap_config.api.base_url);
    tracing::info!("Mode: {}", bootstrap_config.mode);
    tracing::info!("Maps: {:?}", bootstrap_config.dataset);

    // 3. Build session wiring (independent layer)
    tracing::debug!("Building session factory...");
    let sessions = SessionFactory::new(bootstrap_config)?;

    // 4. Build Frontend (independent layer)
    tracing::debug!("Building CLI frontend...");
    let frontend = CliFrontend::new(frontend_config, cli_config);

    // 5. Build and run
    let client = Client::builder()
        .sessions(sessions)
        .frontend(frontend)
        .build()?;

    tracing::info!("Client assembled, starting...");
    client.run().await?;

    tracing::info!("Client shutdown complete");
    Ok(())
}
