//! Frontend configuration structures and loaders.
//!
//! This module contains UI-specific configuration that is shared across
//! different frontend implementations.

use std::env;
use std::time::Duration;

use game_core::EntityCatalog;

/// Frontend-specific configuration.
#[derive(Clone, Debug, Default)]
pub struct FrontendConfig {
    pub messages: MessageConfig,
    pub guesses: GuessConfig,
    pub map: MapConfig,
}

impl FrontendConfig {
    pub const fn new(messages: MessageConfig, guesses: GuessConfig, map: MapConfig) -> Self {
        Self {
            messages,
            guesses,
            map,
        }
    }

    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `GEODLE_MESSAGE_CAPACITY` - Message log capacity (default: 64)
    /// - `GEODLE_SUGGESTION_LIMIT` - Autocomplete suggestions shown (default: 5)
    /// - `GEODLE_FLY_DURATION_MS` - Camera transition length (default: 2000)
    /// - `GEODLE_MAX_ZOOM` - Maximum map zoom factor (default: 64)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(capacity) = read_env::<usize>("GEODLE_MESSAGE_CAPACITY") {
            config.messages.capacity = capacity.max(1);
        }

        if let Some(limit) = read_env::<usize>("GEODLE_SUGGESTION_LIMIT") {
            config.guesses.suggestion_limit = limit.max(1);
        }

        if let Some(millis) = read_env::<u64>("GEODLE_FLY_DURATION_MS") {
            config.map.fly_duration = Duration::from_millis(millis);
        }
        if let Some(zoom) = read_env::<f64>("GEODLE_MAX_ZOOM") {
            if zoom.is_finite() {
                config.map.max_zoom = zoom.max(1.0);
            }
        }

        config
    }
}

#[derive(Clone, Debug)]
pub struct MessageConfig {
    pub capacity: usize,
}

impl Default for MessageConfig {
    fn default() -> Self {
        Self { capacity: 64 }
    }
}

#[derive(Clone, Debug)]
pub struct GuessConfig {
    pub suggestion_limit: usize,
}

impl Default for GuessConfig {
    fn default() -> Self {
        Self {
            suggestion_limit: EntityCatalog::DEFAULT_SUGGESTION_LIMIT,
        }
    }
}

#[derive(Clone, Debug)]
pub struct MapConfig {
    pub fly_duration: Duration,
    pub max_zoom: f64,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            fly_duration: Duration::from_secs(2),
            max_zoom: 64.0,
        }
    }
}

pub fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.trim().parse().ok()
}
