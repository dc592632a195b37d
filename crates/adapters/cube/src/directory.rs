//! Decoder for `M:` lines, the Cube's room and device directory.
//!
//! Line format: `M:<index>,<count>,<base64 payload>`. Decoded payload layout:
//!
//! ```text
//! 2 bytes   unused
//! 1 byte    room count
//!           per room: id, name length, name, 3-byte radio address
//! 1 byte    device count
//!           per device: type, 3-byte radio address, 10-byte serial,
//!                       name length, name, room id
//! 1 byte    trailer, not validated
//! ```

use std::collections::BTreeMap;

use maxwindow_domain::directory::{Device, Directory, Room};
use maxwindow_domain::radio::RadioAddress;

use crate::cursor::ByteCursor;
use crate::error::{FrameError, PayloadError};
use crate::frame::decode_base64;

const SERIAL_LEN: usize = 10;

/// Decode a full `M:` line.
///
/// # Errors
///
/// Returns [`FrameError::MalformedDirectory`] if the line has no payload
/// section, the payload is not base64, or it ends before a declared field.
pub fn decode_directory_line(line: &[u8]) -> Result<Directory, FrameError> {
    directory_payload(line)
        .and_then(|payload| decode_directory(&payload))
        .map_err(FrameError::MalformedDirectory)
}

fn directory_payload(line: &[u8]) -> Result<Vec<u8>, PayloadError> {
    let encoded = line
        .splitn(3, |&b| b == b',')
        .nth(2)
        .ok_or(PayloadError::MissingPayload)?;
    decode_base64(encoded)
}

/// Decode an already base64-decoded directory payload.
///
/// # Errors
///
/// Returns [`PayloadError::Truncated`] if the payload ends before a
/// declared field. The trailing byte is optional.
pub fn decode_directory(bytes: &[u8]) -> Result<Directory, PayloadError> {
    let mut cursor = ByteCursor::new(bytes);
    cursor.skip(2)?;

    let room_count = cursor.read_u8()?;
    let mut rooms = BTreeMap::new();
    for _ in 0..room_count {
        let id = cursor.read_u8()?;
        let name_len = cursor.read_u8()?;
        let name = cursor.read_text(usize::from(name_len))?;
        let radio_address = RadioAddress::new(cursor.read_array()?);
        rooms.insert(
            id,
            Room {
                id,
                name,
                radio_address,
            },
        );
    }

    let device_count = cursor.read_u8()?;
    let mut devices = Vec::with_capacity(usize::from(device_count));
    for _ in 0..device_count {
        let type_code = cursor.read_u8()?;
        let radio_address = RadioAddress::new(cursor.read_array()?);
        let serial = cursor.read_text(SERIAL_LEN)?;
        let name_len = cursor.read_u8()?;
        let name = cursor.read_text(usize::from(name_len))?;
        let room_id = cursor.read_u8()?;
        devices.push(Device {
            type_code,
            radio_address,
            serial,
            name,
            room_id,
        });
    }

    if cursor.skip(1).is_err() {
        tracing::trace!("directory payload has no trailer byte");
    }

    Ok(Directory {
        room_count,
        rooms,
        device_count,
        devices,
    })
}
