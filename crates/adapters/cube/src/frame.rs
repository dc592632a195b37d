//! Splits a raw Cube dump into lines and assembles a [`CubeSnapshot`].
//!
//! The dump is a CRLF-separated sequence of `<letter>:<data>` lines. Only
//! `M:` (directory) and `L:` (live status) lines are decoded, everything
//! else is ignored. Reading stops at the first empty line.

use base64::Engine as _;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};

use maxwindow_domain::snapshot::CubeSnapshot;

use crate::directory::decode_directory_line;
use crate::error::{FrameError, PayloadError};
use crate::status::decode_status_line;

const DIRECTORY_PREFIX: &[u8] = b"M:";
const STATUS_PREFIX: &[u8] = b"L:";

/// Standard alphabet, padding optional.
const PAYLOAD_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Decode a base64 frame payload, ignoring surrounding whitespace.
pub(crate) fn decode_base64(encoded: &[u8]) -> Result<Vec<u8>, PayloadError> {
    Ok(PAYLOAD_ENGINE.decode(encoded.trim_ascii())?)
}

/// Decode a full dump into a snapshot.
///
/// When several `M:` or `L:` lines are present, the last of each kind wins.
/// A dump without `L:` line yields an empty status table.
///
/// # Errors
///
/// Returns [`FrameError::MissingDirectory`] when no `M:` line precedes the
/// first empty line, or the decoding error of the first malformed line.
pub fn parse_dump(dump: &[u8]) -> Result<CubeSnapshot, FrameError> {
    let mut directory = None;
    let mut statuses = None;

    for line in crlf_lines(dump) {
        if line.is_empty() {
            break;
        }
        if line.starts_with(DIRECTORY_PREFIX) {
            directory = Some(decode_directory_line(line)?);
        } else if line.starts_with(STATUS_PREFIX) {
            statuses = Some(decode_status_line(line)?);
        }
    }

    Ok(CubeSnapshot {
        directory: directory.ok_or(FrameError::MissingDirectory)?,
        statuses: statuses.unwrap_or_default(),
    })
}

fn crlf_lines(dump: &[u8]) -> CrlfLines<'_> {
    CrlfLines { rest: Some(dump) }
}

/// Iterator over CRLF-separated lines. A trailing CRLF yields a final
/// empty line.
struct CrlfLines<'a> {
    rest: Option<&'a [u8]>,
}

impl<'a> Iterator for CrlfLines<'a> {
    type Item = &'a [u8];

    fn next(&mut self) -> Option<Self::Item> {
        let rest = self.rest?;
        if let Some(end) = rest.windows(2).position(|pair| pair == b"\r\n") {
            self.rest = Some(&rest[end + 2..]);
            Some(&rest[..end])
        } else {
            self.rest = None;
            Some(rest)
        }
    }
}
