//! Notifier port: push a text message to the user.

use maxwindow_domain::error::MaxWindowError;

/// Receipt returned by the delivery service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delivery {
    /// Status code reported by the service (e.g. `200`).
    pub status: u16,
    /// Reason phrase for the status (e.g. `"OK"`).
    pub reason: String,
}

/// Delivers notifications.
pub trait Notifier {
    /// Send `message`.
    ///
    /// # Errors
    ///
    /// Returns [`MaxWindowError::Notify`] when the message was not accepted.
    fn send(&self, message: &str) -> Result<Delivery, MaxWindowError>;
}
