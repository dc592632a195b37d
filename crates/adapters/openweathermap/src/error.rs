//! OpenWeatherMap adapter error types.

use maxwindow_domain::error::MaxWindowError;

/// Errors specific to the OpenWeatherMap adapter.
///
/// Wrapped `reqwest` errors have their URL stripped, so the API key never
/// ends up in a log line.
#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    /// The HTTP client could not be built.
    #[error("could not build http client")]
    Client(#[source] reqwest::Error),

    /// The request could not be sent or the response not read.
    #[error("weather request failed")]
    Request(#[source] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("weather api returned status {status}: {body}")]
    Status { status: u16, body: String },

    /// The response body is not the expected JSON document.
    #[error("unexpected weather response")]
    Decode(#[source] reqwest::Error),
}

impl WeatherError {
    pub(crate) fn request(err: reqwest::Error) -> Self {
        Self::Request(err.without_url())
    }

    pub(crate) fn decode(err: reqwest::Error) -> Self {
        Self::Decode(err.without_url())
    }

    /// Convert into a [`MaxWindowError`] for propagation across port
    /// boundaries.
    #[must_use]
    pub fn into_domain(self) -> MaxWindowError {
        MaxWindowError::Weather(Box::new(self))
    }
}

impl From<WeatherError> for MaxWindowError {
    fn from(err: WeatherError) -> Self {
        err.into_domain()
    }
}
