//! Cube port: pull the current state of the Cube.

use maxwindow_domain::error::MaxWindowError;
use maxwindow_domain::snapshot::CubeSnapshot;

/// Source of decoded Cube dumps.
///
/// Implementations open a connection, drain the dump and decode it. Each call
/// is independent: nothing is cached between calls except the Cube address.
pub trait CubeGateway {
    /// Fetch and decode one status dump.
    ///
    /// # Errors
    ///
    /// Returns [`MaxWindowError::Fetch`] when no data could be received and
    /// [`MaxWindowError::MalformedFrame`] when the dump could not be decoded.
    fn snapshot(&self) -> Result<CubeSnapshot, MaxWindowError>;
}

impl<T: CubeGateway + ?Sized> CubeGateway for &T {
    fn snapshot(&self) -> Result<CubeSnapshot, MaxWindowError> {
        (**self).snapshot()
    }
}
