//! Decoder for `L:` lines, the Cube's per-device live status.
//!
//! Line format: `L:<base64 payload>`. The decoded payload is a sequence of
//! records, each prefixed by its length:
//!
//! ```text
//! 1 byte    length (counts the bytes after itself)
//! 3 bytes   radio address
//! 1 byte    unused
//! 1 byte    flags 1
//! 1 byte    flags 2
//! n bytes   device-specific data, n = length - 6
//! ```

use maxwindow_domain::radio::RadioAddress;
use maxwindow_domain::status::{StatusRecord, StatusTable};

use crate::cursor::ByteCursor;
use crate::error::{FrameError, PayloadError};
use crate::frame::decode_base64;

/// Bytes of a record after the length byte that are always present.
const FIXED_RECORD_LEN: usize = 6;

/// Decode a full `L:` line.
///
/// # Errors
///
/// Returns [`FrameError::MalformedStatus`] if the payload is not base64 or
/// a record is cut short before its flags.
pub fn decode_status_line(line: &[u8]) -> Result<StatusTable, FrameError> {
    line.strip_prefix(b"L:")
        .ok_or(PayloadError::MissingPayload)
        .and_then(decode_base64)
        .and_then(|payload| decode_statuses(&payload))
        .map_err(FrameError::MalformedStatus)
}

/// Decode an already base64-decoded status payload.
///
/// Running out of bytes exactly at a record boundary ends the table. A record
/// whose device-specific data is cut short keeps its flags and ends the table.
/// When the same address appears more than once, the last record wins.
///
/// # Errors
///
/// Returns [`PayloadError::Truncated`] if a record ends before its fixed
/// fields.
pub fn decode_statuses(bytes: &[u8]) -> Result<StatusTable, PayloadError> {
    let mut cursor = ByteCursor::new(bytes);
    let mut table = StatusTable::new();

    while !cursor.is_empty() {
        let length = usize::from(cursor.read_u8()?);
        let radio_address = RadioAddress::new(cursor.read_array()?);
        cursor.skip(1)?;
        let flags_1 = cursor.read_u8()?;
        let flags_2 = cursor.read_u8()?;
        let declared = length.saturating_sub(FIXED_RECORD_LEN);
        let available = declared.min(cursor.remaining());
        let payload = cursor.take(available)?.to_vec();

        table.insert(
            radio_address,
            StatusRecord {
                radio_address,
                flags_1,
                flags_2,
                payload,
            },
        );

        if available < declared {
            tracing::trace!(
                address = %radio_address,
                declared,
                available,
                "status record data cut short, ending table"
            );
            break;
        }
    }

    Ok(table)
}
