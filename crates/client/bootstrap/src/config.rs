//! Client bootstrap configuration structures and loaders.
use std::env;
use std::path::PathBuf;
use std::time::Duration;

use client_authority_http::HttpAuthorityConfig;
use game_core::GameMode;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{key}={value:?} is invalid, expected {expected}")]
    InvalidValue {
        key: &'static str,
        value: String,
        expected: &'static str,
    },
}

/// Where per-mode map datasets are read from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DatasetSource {
    Directory(PathBuf),
    /// Base URL; the mode's file name is appended.
    Url(String),
}

impl Default for DatasetSource {
    fn default() -> Self {
        Self::Directory(PathBuf::from("./data"))
    }
}

/// Configuration required to bootstrap per-mode sessions.
#[derive(Clone, Debug)]
pub struct BootstrapConfig {
    pub api: ApiConfig,
    pub mode: GameMode,
    pub dataset: DatasetSource,
    pub channels: ChannelConfig,
    /// Names the log directory; generated when absent.
    pub session_id: Option<String>,
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            mode: GameMode::default(),
            dataset: DatasetSource::default(),
            channels: ChannelConfig::default(),
            session_id: None,
        }
    }
}

impl BootstrapConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `GEODLE_API_URL` - Game API base URL (default: http://localhost:8000)
    /// - `GEODLE_MODE` - Starting mode: country, us_states, powiaty, wojewodztwa (default: country)
    /// - `GEODLE_ACCESS_TOKEN` - Value of the `access_token` login cookie (optional)
    /// - `GEODLE_DATASET_DIR` - Directory holding the GeoJSON files (default: ./data)
    /// - `GEODLE_DATASET_URL` - Base URL for the GeoJSON files, overrides the directory
    /// - `GEODLE_REQUEST_TIMEOUT_SECS` - HTTP request timeout (default: 15)
    /// - `GEODLE_COMMAND_BUFFER` - Session command queue size (default: 32)
    /// - `GEODLE_EVENT_BUFFER` - Event bus capacity per topic (default: 64)
    /// - `GEODLE_SESSION_ID` - Log directory name (default: auto-generated)
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(url) = read_env_string("GEODLE_API_URL") {
            config.api.base_url = url;
        }
        config.api.access_token = read_env_string("GEODLE_ACCESS_TOKEN");
        if let Some(secs) = read_env::<u64>("GEODLE_REQUEST_TIMEOUT_SECS") {
            config.api.timeout = Duration::from_secs(secs.max(1));
        }

        if let Some(mode) = read_env_string("GEODLE_MODE") {
            config.mode = mode.parse().map_err(|_| ConfigError::InvalidValue {
                key: "GEODLE_MODE",
                value: mode.clone(),
                expected: "one of country, us_states, powiaty, wojewodztwa",
            })?;
        }

        if let Some(url) = read_env_string("GEODLE_DATASET_URL") {
            config.dataset = DatasetSource::Url(url);
        } else if let Some(dir) = read_env_string("GEODLE_DATASET_DIR") {
            config.dataset = DatasetSource::Directory(PathBuf::from(dir));
        }

        if let Some(capacity) = read_env::<usize>("GEODLE_COMMAND_BUFFER") {
            config.channels.command_buffer = capacity.max(1);
        }
        if let Some(capacity) = read_env::<usize>("GEODLE_EVENT_BUFFER") {
            config.channels.event_buffer = capacity.max(1);
        }

        config.session_id = read_env_string("GEODLE_SESSION_ID");

        Ok(config)
    }
}

#[derive(Clone, Debug)]
pub struct ApiConfig {
    pub base_url: String,
    pub access_token: Option<String>,
    pub timeout: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            access_token: None,
            timeout: HttpAuthorityConfig::DEFAULT_TIMEOUT,
        }
    }
}

impl ApiConfig {
    pub fn authority_config(&self) -> HttpAuthorityConfig {
        let config = HttpAuthorityConfig::new(self.base_url.clone()).with_timeout(self.timeout);
        match &self.access_token {
            Some(token) => config.with_access_token(token.clone()),
            None => config,
        }
    }
}

#[derive(Clone, Debug)]
pub struct ChannelConfig {
    pub command_buffer: usize,
    pub event_buffer: usize,
}

impl Default for ChannelConfig {
    fn default() -> Self {
        Self {
            command_buffer: 32,
            event_buffer: 64,
        }
    }
}

fn read_env_string(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    read_env_string(key)?.parse().ok()
}
