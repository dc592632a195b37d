//! Forward-only reader over a decoded frame payload.

use crate::error::PayloadError;

/// Reads fixed-width fields from a byte slice, failing with
/// [`PayloadError::Truncated`] instead of panicking when the slice runs out.
pub(crate) struct ByteCursor<'a> {
    data: &'a [u8],
    offset: usize,
}

impl<'a> ByteCursor<'a> {
    pub(crate) fn new(data: &'a [u8]) -> Self {
        Self { data, offset: 0 }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    pub(crate) fn remaining(&self) -> usize {
        self.data.len() - self.offset
    }

    pub(crate) fn take(&mut self, count: usize) -> Result<&'a [u8], PayloadError> {
        if count > self.remaining() {
            return Err(PayloadError::Truncated {
                offset: self.offset,
                needed: count,
                remaining: self.remaining(),
            });
        }
        let slice = &self.data[self.offset..self.offset + count];
        self.offset += count;
        Ok(slice)
    }

    pub(crate) fn skip(&mut self, count: usize) -> Result<(), PayloadError> {
        self.take(count).map(|_| ())
    }

    pub(crate) fn read_u8(&mut self) -> Result<u8, PayloadError> {
        Ok(self.take(1)?[0])
    }

    pub(crate) fn read_array<const N: usize>(&mut self) -> Result<[u8; N], PayloadError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(N)?);
        Ok(out)
    }

    /// Read `count` bytes as text, replacing invalid UTF-8 sequences.
    pub(crate) fn read_text(&mut self, count: usize) -> Result<String, PayloadError> {
        Ok(String::from_utf8_lossy(self.take(count)?).into_owned())
    }
}
