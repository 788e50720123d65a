use crate::{
    ConfigError, ConfigErrorResult, DEFAULT_NOTIFICATION_TIMEOUT_MS, DEFAULT_SEARCH_DEBOUNCE_MS,
    MAX_NOTIFICATION_TIMEOUT_MS, MAX_SEARCH_DEBOUNCE_MS,
};

use std::time::Duration;

use serde::Deserialize;

/// Dashboard timing.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Quiet period after the last search keystroke before the list reloads
    pub search_debounce_ms: u64,
    /// How long a notification stays visible
    pub notification_timeout_ms: u64,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            search_debounce_ms: DEFAULT_SEARCH_DEBOUNCE_MS,
            notification_timeout_ms: DEFAULT_NOTIFICATION_TIMEOUT_MS,
        }
    }
}

impl UiConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.search_debounce_ms == 0 || self.search_debounce_ms > MAX_SEARCH_DEBOUNCE_MS {
            return Err(ConfigError::ui(format!(
                "ui.search_debounce_ms must be 1-{}, got {}",
                MAX_SEARCH_DEBOUNCE_MS, self.search_debounce_ms
            )));
        }

        if self.notification_timeout_ms == 0
            || self.notification_timeout_ms > MAX_NOTIFICATION_TIMEOUT_MS
        {
            return Err(ConfigError::ui(format!(
                "ui.notification_timeout_ms must be 1-{}, got {}",
                MAX_NOTIFICATION_TIMEOUT_MS, self.notification_timeout_ms
            )));
        }

        Ok(())
    }

    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }

    pub fn notification_timeout(&self) -> Duration {
        Duration::from_millis(self.notification_timeout_ms)
    }
}
