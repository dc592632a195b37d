//! Pushover configuration.

use std::time::Duration;

use serde::Deserialize;

/// Credentials and endpoint for the Pushover messages API.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PushoverConfig {
    /// User (or group) key receiving the notifications.
    pub user: String,
    /// Application API token.
    pub token: String,
    /// Messages endpoint.
    pub api_url: String,
    /// HTTP request timeout in seconds.
    pub timeout_secs: u64,
}

impl PushoverConfig {
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Whether both the user key and the application token are set.
    #[must_use]
    pub fn has_credentials(&self) -> bool {
        !self.user.trim().is_empty() && !self.token.trim().is_empty()
    }
}

impl Default for PushoverConfig {
    fn default() -> Self {
        Self {
            user: String::new(),
            token: String::new(),
            api_url: "https://api.pushover.net/1/messages.json".to_string(),
            timeout_secs: 10,
        }
    }
}
