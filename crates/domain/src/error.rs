//! Common error types used across the workspace.
//!
//! Each adapter defines its own typed errors and funnels them into
//! [`MaxWindowError`] when they cross a port boundary.

/// Boxed error carried across port boundaries.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors surfaced to the application layer.
///
/// Every variant is recoverable: the poll loop logs it and skips the current
/// cycle. Discovery failures never reach this type, they abort the process
/// before the first cycle runs.
#[derive(Debug, thiserror::Error)]
pub enum MaxWindowError {
    /// No bytes could be pulled from the Cube this cycle.
    #[error("no data received from the cube")]
    Fetch(#[source] BoxError),

    /// The Cube dump contained a frame that could not be decoded.
    #[error("malformed cube frame")]
    MalformedFrame(#[source] BoxError),

    /// The outside temperature could not be looked up.
    #[error("temperature lookup failed")]
    Weather(#[source] BoxError),

    /// A notification could not be delivered.
    #[error("notification delivery failed")]
    Notify(#[source] BoxError),
}
