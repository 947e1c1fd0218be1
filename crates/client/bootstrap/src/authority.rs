//! Helpers for constructing the per-mode remote authority.
use std::sync::Arc;

use anyhow::{Context, Result};
use client_authority_http::HttpAuthority;
use game_core::GameMode;
use runtime::GameAuthority;

use crate::config::ApiConfig;

pub trait AuthorityFactory: Send + Sync {
    fn build(&self, mode: GameMode) -> Result<Arc<dyn GameAuthority>>;
}

/// Authorities talking to the game's HTTP API.
///
/// All modes share one connection pool.
#[derive(Clone, Debug)]
pub struct HttpAuthorityFactory {
    api: ApiConfig,
    http: reqwest::Client,
}

impl HttpAuthorityFactory {
    pub fn new(api: ApiConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(api.timeout)
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self { api, http })
    }
}

impl AuthorityFactory for HttpAuthorityFactory {
    fn build(&self, mode: GameMode) -> Result<Arc<dyn GameAuthority>> {
        let authority =
            HttpAuthority::with_client(mode, self.api.authority_config(), self.http.clone())
                .with_context(|| format!("failed to configure {mode} authority"))?;
        Ok(Arc::new(authority))
    }
}
