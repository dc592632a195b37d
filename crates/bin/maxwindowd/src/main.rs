//! # maxwindowd: open window notification daemon
//!
//! Composition root that wires the adapters together and runs the poll loop.
//!
//! ## Responsibilities
//! - Parse configuration (config file, env vars, CLI flags)
//! - Install the `tracing` subscriber
//! - Build the OpenWeatherMap and Pushover clients
//! - Locate the MAX! Cube (exits with status 1 when none is found)
//! - Run one [`WindowMonitor`] cycle per poll interval, forever
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer: no domain logic belongs here.

mod config;

use std::net::IpAddr;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context as _;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use maxwindow_adapter_cube::CubeConnection;
use maxwindow_adapter_openweathermap::OpenWeatherMap;
use maxwindow_adapter_pushover::Pushover;
use maxwindow_app::random::ThreadRandom;
use maxwindow_app::services::monitor::WindowMonitor;

use crate::config::{Config, LoggingConfig};

/// Polls the MAX! Cube for window states. If a window stays open for more
/// than one poll interval while it is cold outside, a notification is sent.
#[derive(Parser, Debug)]
#[command(name = "maxwindowd")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Configuration file.
    #[arg(long, default_value = "maxwindow.toml")]
    config: PathBuf,

    /// Polling interval in minutes.
    #[arg(short, long)]
    interval: Option<u64>,

    /// Network range (CIDR) to search for the Cube.
    #[arg(short, long)]
    network: Option<String>,

    /// Fixed Cube address; skips discovery.
    #[arg(long)]
    cube_address: Option<IpAddr>,

    /// City name or code for the outside temperature.
    #[arg(short, long)]
    city: Option<String>,

    /// Notifications are suppressed above this temperature.
    #[arg(short, long, allow_negative_numbers = true)]
    threshold: Option<f64>,

    /// OpenWeatherMap API key.
    #[arg(short = 'k', long)]
    owmappid: Option<String>,

    /// Randomly simulate open windows.
    #[arg(short, long)]
    simulation: bool,

    /// Pushover user key.
    #[arg(short, long)]
    user: Option<String>,

    /// Pushover application token.
    #[arg(short = 'p', long)]
    token: Option<String>,

    /// Log at debug level.
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn apply_to(&self, config: &mut Config) {
        if let Some(interval) = self.interval {
            config.monitor.interval_minutes = interval;
        }
        if let Some(network) = &self.network {
            config.cube.network.clone_from(network);
        }
        if let Some(address) = self.cube_address {
            config.cube.address = Some(address);
        }
        if let Some(city) = &self.city {
            config.monitor.city.clone_from(city);
        }
        if let Some(threshold) = self.threshold {
            config.monitor.threshold = threshold;
        }
        if let Some(key) = &self.owmappid {
            config.weather.api_key.clone_from(key);
        }
        if self.simulation {
            config.monitor.simulation = true;
        }
        if let Some(user) = &self.user {
            config.notifier.user.clone_from(user);
        }
        if let Some(token) = &self.token {
            config.notifier.token.clone_from(token);
        }
        if self.verbose {
            config.logging.filter = "debug".to_string();
        }
    }
}

fn init_logging(directives: &str) {
    let (filter, rejected) = match EnvFilter::try_new(directives) {
        Ok(filter) => (filter, None),
        Err(err) => (EnvFilter::new(LoggingConfig::default().filter), Some(err)),
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();
    if let Some(err) = rejected {
        tracing::warn!(error = %err, directives, "invalid log filter, using default");
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load(&cli.config)
        .with_context(|| format!("loading {}", cli.config.display()))?;
    cli.apply_to(&mut config);
    config.validate()?;

    init_logging(&config.logging.filter);

    let weather = OpenWeatherMap::new(config.weather.clone())?;
    let notifier = Pushover::new(config.notifier.clone())?;

    tracing::info!("searching for MAX! Cube in the network");
    let cube = CubeConnection::discover(config.cube.clone())?;
    tracing::info!(address = %cube.socket_addr(), "polling MAX! Cube");

    let settings = config.monitor_settings();
    let interval = Duration::from_secs(settings.interval_minutes.saturating_mul(60));
    let mut monitor = WindowMonitor::new(cube, weather, notifier, ThreadRandom, settings);

    loop {
        let outcome = monitor.poll_once();
        tracing::debug!(?outcome, "cycle finished");
        std::thread::sleep(interval);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_parse_short_flags() {
        let cli = Cli::try_parse_from([
            "maxwindowd", "-i", "15", "-n", "10.0.0.0/24", "-c", "berlin,DE", "-t", "8", "-k",
            "owm-key", "-s", "-u", "u123", "-p", "a456", "-v",
        ])
        .unwrap();

        let mut config = Config::default();
        cli.apply_to(&mut config);

        assert_eq!(config.monitor.interval_minutes, 15);
        assert_eq!(config.cube.network, "10.0.0.0/24");
        assert_eq!(config.monitor.city, "berlin,DE");
        assert!((config.monitor.threshold - 8.0).abs() < f64::EPSILON);
        assert_eq!(config.weather.api_key, "owm-key");
        assert!(config.monitor.simulation);
        assert_eq!(config.notifier.user, "u123");
        assert_eq!(config.notifier.token, "a456");
        assert_eq!(config.logging.filter, "debug");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn should_keep_config_values_without_flags() {
        let cli = Cli::try_parse_from(["maxwindowd"]).unwrap();
        assert_eq!(cli.config, PathBuf::from("maxwindow.toml"));

        let mut config = Config::default();
        config.monitor.city = "hamburg,DE".to_string();
        cli.apply_to(&mut config);

        assert_eq!(config.monitor.city, "hamburg,DE");
        assert!(!config.monitor.simulation);
        assert_eq!(config.logging.filter, "warn,maxwindow=info");
    }

    #[test]
    fn should_accept_fixed_cube_address() {
        let cli = Cli::try_parse_from(["maxwindowd", "--cube-address", "192.168.178.20"]).unwrap();
        let mut config = Config::default();
        cli.apply_to(&mut config);
        assert_eq!(config.cube.address, Some("192.168.178.20".parse().unwrap()));
    }

    #[test]
    fn should_accept_negative_threshold() {
        let cli = Cli::try_parse_from(["maxwindowd", "-t", "-5"]).unwrap();
        assert_eq!(cli.threshold, Some(-5.0));
    }

    #[test]
    fn should_reject_malformed_threshold() {
        assert!(Cli::try_parse_from(["maxwindowd", "-t", "cold"]).is_err());
    }
}
