//! Cube snapshot: everything decoded from one status dump.

use crate::directory::Directory;
use crate::status::StatusTable;
use crate::window::{self, WindowReport};

/// Directory and status table decoded from a single dump.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CubeSnapshot {
    pub directory: Directory,
    pub statuses: StatusTable,
}

impl CubeSnapshot {
    /// Resolve the window contact states contained in this snapshot.
    #[must_use]
    pub fn window_report(&self) -> WindowReport {
        window::resolve(&self.directory, &self.statuses)
    }
}
