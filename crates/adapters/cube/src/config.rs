//! Cube integration configuration.

use std::net::IpAddr;
use std::time::Duration;

use serde::Deserialize;

/// Configuration for locating and polling the Cube.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CubeConfig {
    /// IPv4 network range (CIDR) to search for the Cube.
    pub network: String,
    /// UDP port of the discovery broadcast.
    pub discovery_port: u16,
    /// TCP port the Cube pushes its status dump on.
    pub port: u16,
    /// Fixed Cube address. When set, discovery is skipped.
    pub address: Option<IpAddr>,
    /// How long to wait for a broadcast reply, in milliseconds.
    pub discovery_timeout_ms: u64,
    /// Per-host connect timeout of the fallback TCP scan, in milliseconds.
    pub scan_timeout_ms: u64,
    /// Connect timeout when fetching the dump, in milliseconds.
    pub connect_timeout_ms: u64,
    /// Read timeout that marks the end of a dump, in milliseconds.
    pub read_timeout_ms: u64,
}

impl CubeConfig {
    #[must_use]
    pub fn discovery_timeout(&self) -> Duration {
        Duration::from_millis(self.discovery_timeout_ms)
    }

    #[must_use]
    pub fn scan_timeout(&self) -> Duration {
        Duration::from_millis(self.scan_timeout_ms)
    }

    #[must_use]
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }

    #[must_use]
    pub fn read_timeout(&self) -> Duration {
        Duration::from_millis(self.read_timeout_ms)
    }
}

impl Default for CubeConfig {
    fn default() -> Self {
        Self {
            network: "192.168.178.0/24".to_string(),
            discovery_port: 23272,
            port: 62910,
            address: None,
            discovery_timeout_ms: 5000,
            scan_timeout_ms: 500,
            connect_timeout_ms: 3000,
            read_timeout_ms: 3000,
        }
    }
}
