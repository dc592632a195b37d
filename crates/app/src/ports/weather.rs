//! Weather port: outside temperature lookup.

use maxwindow_domain::error::MaxWindowError;

/// Provides the current outside temperature.
pub trait TemperatureProvider {
    /// Current temperature for `city`, in the provider's configured unit.
    ///
    /// # Errors
    ///
    /// Returns [`MaxWindowError::Weather`] when the temperature could not be
    /// retrieved.
    fn current_temperature(&self, city: &str) -> Result<f64, MaxWindowError>;
}
