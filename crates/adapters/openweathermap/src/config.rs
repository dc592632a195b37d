//! OpenWeatherMap configuration.

use std::time::Duration;

use serde::Deserialize;

/// Configuration for the current-weather endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WeatherConfig {
    /// API key sent as the `APPID` query parameter.
    pub api_key: String,
    /// Current-weather endpoint.
    pub api_url: String,
    /// Unit system (`metric`, `imperial` or `standard`).
    pub units: String,
    /// HTTP request timeout in seconds.
    pub timeout_secs: u64,
}

impl WeatherConfig {
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            api_url: "http://api.openweathermap.org/data/2.5/weather".to_string(),
            units: "metric".to_string(),
            timeout_secs: 10,
        }
    }
}
