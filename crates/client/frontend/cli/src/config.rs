//! CLI-specific configuration for terminal UI.
use client_frontend_core::config::read_env;

/// CLI terminal UI configuration.
///
/// This contains settings specific to the terminal interface,
/// separate from cross-frontend client configuration.
#[derive(Clone, Debug, Default)]
pub struct CliConfig {
    pub ui: UiConfig,
}

impl CliConfig {
    /// Construct CLI configuration from environment variables.
    ///
    /// Environment variables:
    /// - `CLI_MESSAGE_PANEL_HEIGHT` - Message panel height in lines (default: 6)
    /// - `CLI_HISTORY_PANEL_PERCENT` - Width share of the history panel (default: 35)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(height) = read_env::<u16>("CLI_MESSAGE_PANEL_HEIGHT") {
            config.ui.message_panel_height = height.max(3);
        }
        if let Some(percent) = read_env::<u16>("CLI_HISTORY_PANEL_PERCENT") {
            config.ui.history_panel_percent = percent.clamp(20, 70);
        }

        config
    }
}

/// UI layout and display configuration.
#[derive(Clone, Debug)]
pub struct UiConfig {
    /// Height of message panel in lines (including borders).
    pub message_panel_height: u16,
    /// Share of the width given to the question/guess history.
    pub history_panel_percent: u16,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            message_panel_height: 6,
            history_panel_percent: 35,
        }
    }
}
