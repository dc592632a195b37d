//! Directory: the rooms and devices the Cube announces in its metadata frame.
//!
//! A [`Directory`] is rebuilt from scratch on every decode; it is never
//! merged with a previously decoded one.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::radio::RadioAddress;

/// Type code the Cube uses for window contact ("shutter contact") sensors.
pub const WINDOW_CONTACT_TYPE: u8 = 4;

/// Device family, derived from the raw type code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceKind {
    Cube,
    HeatingThermostat,
    HeatingThermostatPlus,
    WallThermostat,
    WindowContact,
    PushButton,
    Unknown(u8),
}

impl DeviceKind {
    /// Map a raw type code onto a device family.
    #[must_use]
    pub const fn from_code(code: u8) -> Self {
        match code {
            0 => Self::Cube,
            1 => Self::HeatingThermostat,
            2 => Self::HeatingThermostatPlus,
            3 => Self::WallThermostat,
            WINDOW_CONTACT_TYPE => Self::WindowContact,
            5 => Self::PushButton,
            other => Self::Unknown(other),
        }
    }

    /// The raw type code for this family.
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::Cube => 0,
            Self::HeatingThermostat => 1,
            Self::HeatingThermostatPlus => 2,
            Self::WallThermostat => 3,
            Self::WindowContact => WINDOW_CONTACT_TYPE,
            Self::PushButton => 5,
            Self::Unknown(code) => code,
        }
    }
}

/// A room configured on the Cube.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub id: u8,
    pub name: String,
    pub radio_address: RadioAddress,
}

/// A physical device paired with the Cube.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Device {
    pub type_code: u8,
    pub radio_address: RadioAddress,
    /// 10-character ASCII serial number.
    pub serial: String,
    pub name: String,
    /// Identifier of the owning [`Room`].
    pub room_id: u8,
}

impl Device {
    /// Device family derived from [`type_code`](Self::type_code).
    #[must_use]
    pub const fn kind(&self) -> DeviceKind {
        DeviceKind::from_code(self.type_code)
    }

    /// Whether this device is a window contact sensor.
    #[must_use]
    pub const fn is_window_contact(&self) -> bool {
        self.type_code == WINDOW_CONTACT_TYPE
    }
}

/// Rooms and devices decoded from one metadata frame.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Directory {
    /// Room count as declared by the frame.
    pub room_count: u8,
    /// Rooms keyed by identifier; a later duplicate replaces the earlier one.
    pub rooms: BTreeMap<u8, Room>,
    /// Device count as declared by the frame.
    pub device_count: u8,
    /// Devices in the order the frame lists them.
    pub devices: Vec<Device>,
}

impl Directory {
    /// Look up a room by identifier.
    #[must_use]
    pub fn room(&self, id: u8) -> Option<&Room> {
        self.rooms.get(&id)
    }

    /// Iterate over the window contact sensors, in frame order.
    pub fn window_contacts(&self) -> impl Iterator<Item = &Device> {
        self.devices.iter().filter(|device| device.is_window_contact())
    }
}
