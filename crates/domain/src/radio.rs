//! Radio address: the 3-byte identity of a device on the Cube's radio network.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// 3-byte radio address, rendered as 6 lowercase hex digits (e.g. `"0a1b2c"`).
///
/// Rooms, devices and status records all share this identity space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RadioAddress([u8; 3]);

impl RadioAddress {
    /// Wrap raw address bytes as read off the wire.
    #[must_use]
    pub const fn new(bytes: [u8; 3]) -> Self {
        Self(bytes)
    }

    /// Access the raw address bytes.
    #[must_use]
    pub const fn as_bytes(self) -> [u8; 3] {
        self.0
    }
}

impl fmt::Display for RadioAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

/// Why a string could not be parsed as a [`RadioAddress`].
#[derive(Debug, thiserror::Error)]
pub enum RadioAddressParseError {
    /// The string is not valid hex.
    #[error("radio address is not valid hex")]
    InvalidHex(#[from] hex::FromHexError),

    /// The hex decoded to the wrong number of bytes.
    #[error("radio address must be 3 bytes, got {0}")]
    WrongLength(usize),
}

impl FromStr for RadioAddress {
    type Err = RadioAddressParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = hex::decode(s)?;
        let bytes: [u8; 3] = bytes
            .as_slice()
            .try_into()
            .map_err(|_| RadioAddressParseError::WrongLength(bytes.len()))?;
        Ok(Self(bytes))
    }
}

impl TryFrom<String> for RadioAddress {
    type Error = RadioAddressParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<RadioAddress> for String {
    fn from(value: RadioAddress) -> Self {
        value.to_string()
    }
}
