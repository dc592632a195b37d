//! # maxwindow-adapter-cube
//!
//! eQ-3 MAX! Cube adapter: locates the Cube on the LAN, pulls its status
//! dump over TCP and decodes it into a [`CubeSnapshot`].
//!
//! ## How it works
//!
//! 1. Discovery broadcasts a UDP probe on port 23272 and falls back to a
//!    TCP scan of the configured range on port 62910.
//! 2. Every poll opens a fresh TCP connection. The Cube pushes its state
//!    immediately and the dump ends when the socket stays silent for the
//!    read timeout.
//! 3. The `M:` line (directory) and `L:` line (live status) are base64
//!    decoded and parsed into domain types.
//!
//! ## Dependency rule
//!
//! Depends on `maxwindow-app` (for the [`CubeGateway`] port) and
//! `maxwindow-domain`.

mod config;
mod cursor;
pub mod directory;
pub mod discovery;
mod error;
pub mod frame;
pub mod status;
pub mod subnet;
pub mod transport;

pub use config::CubeConfig;
pub use discovery::{CubeLocation, DiscoveryInfo};
pub use error::{CubeError, DiscoveryError, FetchError, FrameError, InvalidSubnet, PayloadError};

use std::net::SocketAddr;

use maxwindow_app::ports::CubeGateway;
use maxwindow_domain::error::MaxWindowError;
use maxwindow_domain::snapshot::CubeSnapshot;

/// A located Cube that can be polled for snapshots.
#[derive(Debug, Clone)]
pub struct CubeConnection {
    config: CubeConfig,
    location: CubeLocation,
}

impl CubeConnection {
    /// Locate the Cube, or use the configured address when one is set.
    ///
    /// # Errors
    ///
    /// Returns [`CubeError::Discovery`] when no Cube can be found.
    pub fn discover(config: CubeConfig) -> Result<Self, CubeError> {
        let location = match config.address {
            Some(address) => {
                tracing::info!(%address, "using configured cube address, skipping discovery");
                CubeLocation {
                    address,
                    info: None,
                }
            }
            None => discovery::discover(&config)?,
        };
        Ok(Self::new(config, location))
    }

    /// Use an already known location.
    #[must_use]
    pub fn new(config: CubeConfig, location: CubeLocation) -> Self {
        Self { config, location }
    }

    #[must_use]
    pub fn location(&self) -> &CubeLocation {
        &self.location
    }

    /// Address of the Cube's TCP endpoint.
    #[must_use]
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.location.address, self.config.port)
    }

    /// Pull and decode one dump.
    ///
    /// # Errors
    ///
    /// Returns [`CubeError::Fetch`] if no data could be read and
    /// [`CubeError::MalformedFrame`] if it could not be decoded.
    pub fn fetch(&self) -> Result<CubeSnapshot, CubeError> {
        let dump = transport::fetch_dump(
            self.socket_addr(),
            self.config.connect_timeout(),
            self.config.read_timeout(),
        )?;
        Ok(frame::parse_dump(&dump)?)
    }
}

impl CubeGateway for CubeConnection {
    fn snapshot(&self) -> Result<CubeSnapshot, MaxWindowError> {
        self.fetch()
            .inspect_err(|err| tracing::debug!(error = ?err, "cube snapshot failed"))
            .map_err(CubeError::into_domain)
    }
}
