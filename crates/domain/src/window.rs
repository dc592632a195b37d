//! Window sensor resolution: joins the directory with the status table.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::directory::Directory;
use crate::radio::RadioAddress;
use crate::status::StatusTable;

/// Open/closed state of a window contact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WindowStatus {
    Open,
    Closed,
}

impl WindowStatus {
    #[must_use]
    pub const fn is_open(self) -> bool {
        matches!(self, Self::Open)
    }
}

impl std::fmt::Display for WindowStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Open => f.write_str("open"),
            Self::Closed => f.write_str("closed"),
        }
    }
}

/// Resolved state of one window contact sensor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowSensorState {
    pub radio_address: RadioAddress,
    pub name: String,
    pub status: WindowStatus,
}

/// Window sensor states keyed by radio address.
///
/// An empty report means the Cube answered but has no window contact with a
/// known status; it is not the same thing as "no data".
pub type WindowReport = BTreeMap<RadioAddress, WindowSensorState>;

/// Resolve the state of every window contact in `directory`.
///
/// Sensors without a matching record in `statuses` are left out of the
/// report rather than defaulted to closed.
#[must_use]
pub fn resolve(directory: &Directory, statuses: &StatusTable) -> WindowReport {
    directory
        .window_contacts()
        .filter_map(|device| {
            let record = statuses.get(&device.radio_address)?;
            let status = if record.is_window_open() {
                WindowStatus::Open
            } else {
                WindowStatus::Closed
            };
            Some((
                device.radio_address,
                WindowSensorState {
                    radio_address: device.radio_address,
                    name: device.name.clone(),
                    status,
                },
            ))
        })
        .collect()
}
