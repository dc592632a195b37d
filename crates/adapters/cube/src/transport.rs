//! TCP retrieval of the Cube's status dump.
//!
//! The Cube pushes its whole state as soon as a client connects and then
//! keeps the connection open, so the end of a dump is detected by a read
//! timeout rather than by the peer closing the socket.

use std::io::{ErrorKind, Read};
use std::net::{SocketAddr, TcpStream};
use std::time::Duration;

use crate::error::FetchError;

const CHUNK_SIZE: usize = 4096;

/// Result of a single read on the Cube connection.
#[derive(Debug)]
pub enum ReadOutcome {
    /// Bytes were received.
    Data(usize),
    /// No data arrived within the read timeout. The dump is complete.
    TimedOut,
    /// The Cube closed the connection.
    Closed,
    /// Any other socket error.
    Errored(std::io::Error),
}

/// Perform one read into `buffer` and classify the result.
pub fn read_chunk<R: Read>(stream: &mut R, buffer: &mut [u8]) -> ReadOutcome {
    match stream.read(buffer) {
        Ok(0) => ReadOutcome::Closed,
        Ok(size) => ReadOutcome::Data(size),
        Err(err) if err.kind() == ErrorKind::Interrupted => ReadOutcome::Data(0),
        Err(err) if is_timeout(&err) => ReadOutcome::TimedOut,
        Err(err) => ReadOutcome::Errored(err),
    }
}

pub(crate) fn is_timeout(err: &std::io::Error) -> bool {
    matches!(err.kind(), ErrorKind::WouldBlock | ErrorKind::TimedOut)
}

/// Read until the stream times out, closes or fails, keeping everything
/// received until then.
pub fn drain<R: Read>(stream: &mut R) -> Vec<u8> {
    let mut dump = Vec::new();
    let mut buffer = [0u8; CHUNK_SIZE];
    loop {
        match read_chunk(stream, &mut buffer) {
            ReadOutcome::Data(size) => dump.extend_from_slice(&buffer[..size]),
            ReadOutcome::TimedOut => {
                tracing::trace!(bytes = dump.len(), "read timed out, dump complete");
                break;
            }
            ReadOutcome::Closed => {
                tracing::trace!(bytes = dump.len(), "cube closed the connection");
                break;
            }
            ReadOutcome::Errored(err) => {
                tracing::debug!(
                    error = %err,
                    bytes = dump.len(),
                    "read failed, keeping partial dump"
                );
                break;
            }
        }
    }
    dump
}

/// Connect to the Cube and pull one full dump.
///
/// # Errors
///
/// Returns [`FetchError::Connect`] if the connection cannot be opened,
/// [`FetchError::Socket`] if the read timeout cannot be set, and
/// [`FetchError::Empty`] if the Cube sends nothing.
pub fn fetch_dump(
    addr: SocketAddr,
    connect_timeout: Duration,
    read_timeout: Duration,
) -> Result<Vec<u8>, FetchError> {
    let mut stream = TcpStream::connect_timeout(&addr, connect_timeout)
        .map_err(|source| FetchError::Connect { addr, source })?;
    stream
        .set_read_timeout(Some(read_timeout))
        .map_err(FetchError::Socket)?;

    tracing::info!(%addr, "connected to cube, retrieving data");
    let dump = drain(&mut stream);
    if dump.is_empty() {
        return Err(FetchError::Empty { addr });
    }
    tracing::debug!(%addr, bytes = dump.len(), "received cube dump");
    Ok(dump)
}
