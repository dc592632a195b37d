//! Pushover adapter error types.

use maxwindow_domain::error::MaxWindowError;

/// Errors specific to the Pushover adapter.
#[derive(Debug, thiserror::Error)]
pub enum PushoverError {
    /// The HTTP client could not be built.
    #[error("could not build http client")]
    Client(#[source] reqwest::Error),

    /// The request could not be sent.
    #[error("pushover request failed")]
    Request(#[source] reqwest::Error),

    /// Pushover refused the message.
    #[error("pushover returned status {status}: {body}")]
    Status { status: u16, body: String },
}

impl PushoverError {
    /// Convert into a [`MaxWindowError`] for propagation across port
    /// boundaries.
    #[must_use]
    pub fn into_domain(self) -> MaxWindowError {
        MaxWindowError::Notify(Box::new(self))
    }
}

impl From<PushoverError> for MaxWindowError {
    fn from(err: PushoverError) -> Self {
        err.into_domain()
    }
}
