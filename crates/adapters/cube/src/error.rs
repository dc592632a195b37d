//! Cube adapter error types.

use std::net::SocketAddr;

use maxwindow_domain::error::MaxWindowError;

/// Errors specific to the Cube adapter.
#[derive(Debug, thiserror::Error)]
pub enum CubeError {
    /// The Cube could not be located. Fatal for the daemon.
    #[error("cube discovery failed")]
    Discovery(#[from] DiscoveryError),

    /// The status dump could not be pulled from the Cube.
    #[error("could not fetch data from the cube")]
    Fetch(#[from] FetchError),

    /// The status dump could not be decoded.
    #[error("malformed cube frame")]
    MalformedFrame(#[from] FrameError),
}

/// Why the Cube could not be located.
#[derive(Debug, thiserror::Error)]
pub enum DiscoveryError {
    /// The configured network range is not an IPv4 CIDR.
    #[error("invalid discovery network")]
    InvalidNetwork(#[from] InvalidSubnet),

    /// Neither the broadcast probe nor the TCP scan found a Cube.
    #[error("could not find any cube in {network}")]
    NotFound {
        /// The network range that was searched.
        network: String,
    },
}

/// A network range that could not be parsed.
#[derive(Debug, thiserror::Error)]
#[error("invalid IPv4 network range {0:?}")]
pub struct InvalidSubnet(pub String);

/// Why no dump could be pulled from the Cube.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// The TCP connection could not be established.
    #[error("could not open TCP connection to cube at {addr}")]
    Connect {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    /// The connected socket could not be configured.
    #[error("could not configure cube socket")]
    Socket(#[source] std::io::Error),

    /// The Cube accepted the connection but sent nothing.
    #[error("cube at {addr} sent no data")]
    Empty { addr: SocketAddr },
}

/// Why a dump could not be decoded.
#[derive(Debug, thiserror::Error)]
pub enum FrameError {
    /// An `M:` line could not be decoded.
    #[error("malformed directory frame")]
    MalformedDirectory(#[source] PayloadError),

    /// An `L:` line could not be decoded.
    #[error("malformed status frame")]
    MalformedStatus(#[source] PayloadError),

    /// The dump did not contain any `M:` line.
    #[error("dump contains no directory frame")]
    MissingDirectory,
}

/// Details about why a frame payload could not be read.
#[derive(Debug, thiserror::Error)]
pub enum PayloadError {
    /// The line has no payload section.
    #[error("line carries no payload")]
    MissingPayload,

    /// The payload is not valid base64.
    #[error("invalid base64 payload")]
    Base64(#[from] base64::DecodeError),

    /// The payload ended before a field could be read.
    #[error("truncated payload: needed {needed} bytes at offset {offset}, {remaining} left")]
    Truncated {
        /// Offset of the field that could not be read.
        offset: usize,
        /// Byte count the field requires.
        needed: usize,
        /// Bytes left in the payload.
        remaining: usize,
    },
}

impl CubeError {
    /// Convert into a [`MaxWindowError`] for propagation across port
    /// boundaries.
    #[must_use]
    pub fn into_domain(self) -> MaxWindowError {
        match self {
            Self::MalformedFrame(err) => MaxWindowError::MalformedFrame(Box::new(err)),
            other => MaxWindowError::Fetch(Box::new(other)),
        }
    }
}

impl From<CubeError> for MaxWindowError {
    fn from(err: CubeError) -> Self {
        err.into_domain()
    }
}
