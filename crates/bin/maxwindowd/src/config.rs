//! Configuration loading: TOML file with environment variable overrides.
//!
//! Looks for `maxwindow.toml` in the working directory unless another path is
//! given. Every field has a default so the file is optional. Environment
//! variables take precedence over file values; command-line flags are applied
//! on top by `main`.

use std::path::Path;

use serde::Deserialize;

use maxwindow_adapter_cube::CubeConfig;
use maxwindow_adapter_cube::subnet::Ipv4Subnet;
use maxwindow_adapter_openweathermap::WeatherConfig;
use maxwindow_adapter_pushover::PushoverConfig;
use maxwindow_app::services::monitor::MonitorSettings;

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Cube discovery and polling.
    pub cube: CubeConfig,
    /// Poll cycle settings.
    pub monitor: MonitorConfig,
    /// OpenWeatherMap settings.
    pub weather: WeatherConfig,
    /// Pushover settings.
    pub notifier: PushoverConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
}

/// Poll cycle configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MonitorConfig {
    /// Minutes between two polls.
    pub interval_minutes: u64,
    /// City name or code for the temperature lookup.
    pub city: String,
    /// Notifications are suppressed above this temperature.
    pub threshold: f64,
    /// Force one random window open on every cycle.
    pub simulation: bool,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

impl Config {
    /// Load configuration from `path` (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but is malformed, or if an
    /// environment variable holds an unparsable value.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::from_file(path)?;
        config.apply_env_overrides(|name| std::env::var(name).ok())?;
        Ok(config)
    }

    fn from_file(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    /// Apply overrides read through `lookup`, which maps a variable name to
    /// its value.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Env`] when a numeric or address variable does
    /// not parse.
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(val) = lookup("MAXWINDOW_NETWORK") {
            self.cube.network = val;
        }
        if let Some(val) = lookup("MAXWINDOW_CUBE_ADDRESS") {
            self.cube.address = Some(parse_env("MAXWINDOW_CUBE_ADDRESS", &val)?);
        }
        if let Some(val) = lookup("MAXWINDOW_CITY") {
            self.monitor.city = val;
        }
        if let Some(val) = lookup("MAXWINDOW_THRESHOLD") {
            self.monitor.threshold = parse_env("MAXWINDOW_THRESHOLD", &val)?;
        }
        if let Some(val) = lookup("MAXWINDOW_INTERVAL") {
            self.monitor.interval_minutes = parse_env("MAXWINDOW_INTERVAL", &val)?;
        }
        if let Some(val) = lookup("MAXWINDOW_OWM_APPID") {
            self.weather.api_key = val;
        }
        if let Some(val) = lookup("MAXWINDOW_PUSHOVER_USER") {
            self.notifier.user = val;
        }
        if let Some(val) = lookup("MAXWINDOW_PUSHOVER_TOKEN") {
            self.notifier.token = val;
        }
        if let Some(val) = lookup("MAXWINDOW_LOG") {
            self.logging.filter = val;
        }
        if let Some(val) = lookup("RUST_LOG") {
            self.logging.filter = val;
        }
        Ok(())
    }

    /// Check the final configuration before anything is started.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] describing the first problem.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |reason: &str| Err(ConfigError::Validation(reason.to_string()));

        if self.cube.port == 0 || self.cube.discovery_port == 0 {
            return invalid("cube ports must be non-zero");
        }
        if self.cube.connect_timeout_ms == 0
            || self.cube.read_timeout_ms == 0
            || self.cube.scan_timeout_ms == 0
            || self.cube.discovery_timeout_ms == 0
        {
            return invalid("cube timeouts must be non-zero");
        }
        if self.weather.timeout_secs == 0 || self.notifier.timeout_secs == 0 {
            return invalid("http timeouts must be non-zero");
        }
        if self.cube.address.is_none() && self.cube.network.parse::<Ipv4Subnet>().is_err() {
            return Err(ConfigError::Validation(format!(
                "cube network {:?} is not an IPv4 CIDR range",
                self.cube.network
            )));
        }
        if self.monitor.interval_minutes == 0 {
            return invalid("poll interval must be non-zero");
        }
        if !self.monitor.threshold.is_finite() {
            return invalid("temperature threshold must be a finite number");
        }
        if self.weather.api_key.trim().is_empty() {
            return invalid("an OpenWeatherMap API key is required");
        }
        if !self.notifier.has_credentials() {
            return invalid("both the Pushover user key and app token are required");
        }
        Ok(())
    }

    /// Settings for the poll cycle.
    #[must_use]
    pub fn monitor_settings(&self) -> MonitorSettings {
        MonitorSettings {
            city: self.monitor.city.clone(),
            threshold: self.monitor.threshold,
            interval_minutes: self.monitor.interval_minutes,
            simulation: self.monitor.simulation,
        }
    }
}

fn parse_env<T: std::str::FromStr>(name: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::Env {
        name,
        value: value.to_string(),
    })
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            interval_minutes: 30,
            city: "munich,DE".to_string(),
            threshold: 12.0,
            simulation: false,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "warn,maxwindow=info".to_string(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Environment variable with an unparsable value.
    #[error("invalid value {value:?} for {name}")]
    Env { name: &'static str, value: String },
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn valid() -> Config {
        let mut config = Config::default();
        config.weather.api_key = "owm-key".to_string();
        config.notifier.user = "u123".to_string();
        config.notifier.token = "a456".to_string();
        config
    }

    fn env(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn should_produce_sensible_defaults() {
        let config = Config::default();
        assert_eq!(config.cube.network, "192.168.178.0/24");
        assert_eq!(config.monitor.interval_minutes, 30);
        assert_eq!(config.monitor.city, "munich,DE");
        assert!((config.monitor.threshold - 12.0).abs() < f64::EPSILON);
        assert!(!config.monitor.simulation);
        assert_eq!(config.weather.units, "metric");
        assert_eq!(config.logging.filter, "warn,maxwindow=info");
    }

    #[test]
    fn should_parse_minimal_toml() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.cube.port, 62910);
    }

    #[test]
    fn should_parse_full_toml() {
        let toml = "
            [cube]
            network = '10.0.0.0/24'
            address = '10.0.0.7'
            read_timeout_ms = 1000

            [monitor]
            interval_minutes = 15
            city = 'berlin,DE'
            threshold = 8.5
            simulation = true

            [weather]
            api_key = 'owm-key'
            units = 'imperial'

            [notifier]
            user = 'u123'
            token = 'a456'

            [logging]
            filter = 'debug'
        ";
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.cube.network, "10.0.0.0/24");
        assert_eq!(config.cube.address, Some("10.0.0.7".parse().unwrap()));
        assert_eq!(config.cube.read_timeout_ms, 1000);
        assert_eq!(config.monitor.interval_minutes, 15);
        assert_eq!(config.monitor.city, "berlin,DE");
        assert!((config.monitor.threshold - 8.5).abs() < f64::EPSILON);
        assert!(config.monitor.simulation);
        assert_eq!(config.weather.api_key, "owm-key");
        assert_eq!(config.weather.units, "imperial");
        assert!(config.notifier.has_credentials());
        assert_eq!(config.logging.filter, "debug");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn should_return_default_when_file_not_found() {
        let config = Config::from_file(Path::new("nonexistent.toml")).unwrap();
        assert_eq!(config.cube.port, 62910);
    }

    #[test]
    fn should_report_parse_error_for_invalid_toml() {
        let result: Result<Config, _> = toml::from_str("invalid {{{");
        assert!(result.is_err());
    }

    #[test]
    fn should_apply_env_overrides() {
        let mut config = Config::default();
        config
            .apply_env_overrides(env(&[
                ("MAXWINDOW_NETWORK", "10.1.0.0/16"),
                ("MAXWINDOW_CUBE_ADDRESS", "10.1.2.3"),
                ("MAXWINDOW_CITY", "hamburg,DE"),
                ("MAXWINDOW_THRESHOLD", "10.5"),
                ("MAXWINDOW_INTERVAL", "5"),
                ("MAXWINDOW_OWM_APPID", "owm-key"),
                ("MAXWINDOW_PUSHOVER_USER", "u123"),
                ("MAXWINDOW_PUSHOVER_TOKEN", "a456"),
                ("MAXWINDOW_LOG", "info"),
            ]))
            .unwrap();

        assert_eq!(config.cube.network, "10.1.0.0/16");
        assert_eq!(config.cube.address, Some("10.1.2.3".parse().unwrap()));
        assert_eq!(config.monitor.city, "hamburg,DE");
        assert!((config.monitor.threshold - 10.5).abs() < f64::EPSILON);
        assert_eq!(config.monitor.interval_minutes, 5);
        assert_eq!(config.weather.api_key, "owm-key");
        assert!(config.notifier.has_credentials());
        assert_eq!(config.logging.filter, "info");
    }

    #[test]
    fn should_prefer_rust_log_over_maxwindow_log() {
        let mut config = Config::default();
        config
            .apply_env_overrides(env(&[("MAXWINDOW_LOG", "info"), ("RUST_LOG", "trace")]))
            .unwrap();
        assert_eq!(config.logging.filter, "trace");
    }

    #[test]
    fn should_reject_unparsable_env_value() {
        let mut config = Config::default();
        let err = config
            .apply_env_overrides(env(&[("MAXWINDOW_INTERVAL", "soon")]))
            .unwrap_err();
        assert_eq!(err.to_string(), r#"invalid value "soon" for MAXWINDOW_INTERVAL"#);
    }

    #[test]
    fn should_accept_valid_config() {
        assert!(valid().validate().is_ok());
    }

    #[test]
    fn should_require_weather_api_key() {
        let mut config = valid();
        config.weather.api_key = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn should_require_both_notifier_credentials() {
        let mut config = valid();
        config.notifier.token = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn should_reject_zero_interval() {
        let mut config = valid();
        config.monitor.interval_minutes = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn should_reject_zero_port() {
        let mut config = valid();
        config.cube.port = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn should_reject_zero_http_timeouts() {
        let mut config = valid();
        config.weather.timeout_secs = 0;
        assert!(config.validate().is_err());

        let mut config = valid();
        config.notifier.timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn should_reject_invalid_network() {
        let mut config = valid();
        config.cube.network = "192.168.178.0/40".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn should_ignore_network_when_address_is_fixed() {
        let mut config = valid();
        config.cube.network = "unused".to_string();
        config.cube.address = Some("192.168.178.20".parse().unwrap());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn should_build_monitor_settings() {
        let settings = valid().monitor_settings();
        assert_eq!(settings.city, "munich,DE");
        assert_eq!(settings.interval_minutes, 30);
        assert!(!settings.simulation);
    }
}
