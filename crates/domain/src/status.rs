//! Status records: the per-device flag bytes reported in the Cube's status frame.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::radio::RadioAddress;

/// Bit of the second flag byte that is set while a window contact is open.
pub const WINDOW_OPEN_BIT: u8 = 0b0000_0010;

/// Live status of one device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusRecord {
    pub radio_address: RadioAddress,
    pub flags_1: u8,
    pub flags_2: u8,
    /// Device-type-specific trailing bytes. Not interpreted.
    pub payload: Vec<u8>,
}

impl StatusRecord {
    /// Whether the window-open bit is set in the second flag byte.
    #[must_use]
    pub const fn is_window_open(&self) -> bool {
        self.flags_2 & WINDOW_OPEN_BIT != 0
    }
}

/// Status records keyed by radio address.
pub type StatusTable = HashMap<RadioAddress, StatusRecord>;

#[cfg(test)]
mod tests {
    use super::*;

    fn record(flags_2: u8) -> StatusRecord {
        StatusRecord {
            radio_address: RadioAddress::new([0xAA, 0xBB, 0xCC]),
            flags_1: 0xFF,
            flags_2,
            payload: Vec::new(),
        }
    }

    #[test]
    fn should_report_open_when_bit_is_set() {
        assert!(record(0b0000_0010).is_window_open());
    }

    #[test]
    fn should_report_closed_when_bit_is_cleared() {
        assert!(!record(0).is_window_open());
    }

    #[test]
    fn should_ignore_every_other_bit() {
        for flags in 0..=u8::MAX {
            assert_eq!(
                record(flags).is_window_open(),
                record(flags & WINDOW_OPEN_BIT).is_window_open()
            );
        }
        assert!(!record(!WINDOW_OPEN_BIT).is_window_open());
    }
}
