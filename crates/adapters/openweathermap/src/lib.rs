//! # maxwindow-adapter-openweathermap
//!
//! Looks up the current outside temperature of a city through the
//! OpenWeatherMap current-weather API.
//!
//! ## Dependency rule
//!
//! Depends on `maxwindow-app` (for the [`TemperatureProvider`] port) and
//! `maxwindow-domain`.

mod config;
mod error;

pub use config::WeatherConfig;
pub use error::WeatherError;

use serde::Deserialize;

use maxwindow_app::ports::TemperatureProvider;
use maxwindow_domain::error::MaxWindowError;

#[derive(Debug, Deserialize)]
struct CurrentWeather {
    main: MainReadings,
}

#[derive(Debug, Deserialize)]
struct MainReadings {
    temp: f64,
}

/// Blocking OpenWeatherMap client.
pub struct OpenWeatherMap {
    config: WeatherConfig,
    client: reqwest::blocking::Client,
}

impl OpenWeatherMap {
    /// Build a client for the configured endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`WeatherError::Client`] if the HTTP client cannot be built.
    pub fn new(config: WeatherConfig) -> Result<Self, WeatherError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(WeatherError::Client)?;
        Ok(Self { config, client })
    }

    /// Current temperature of `city`, in the configured units.
    ///
    /// # Errors
    ///
    /// Returns [`WeatherError`] on transport failure, non-success status or
    /// a body without `main.temp`.
    pub fn temperature(&self, city: &str) -> Result<f64, WeatherError> {
        let response = self
            .client
            .get(&self.config.api_url)
            .query(&[
                ("q", city),
                ("APPID", self.config.api_key.as_str()),
                ("units", self.config.units.as_str()),
            ])
            .send()
            .map_err(WeatherError::request)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            tracing::warn!(status = status.as_u16(), %body, "weather lookup rejected");
            return Err(WeatherError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let weather: CurrentWeather = response.json().map_err(WeatherError::decode)?;
        tracing::debug!(city, temperature = weather.main.temp, "current weather");
        Ok(weather.main.temp)
    }
}

impl TemperatureProvider for OpenWeatherMap {
    fn current_temperature(&self, city: &str) -> Result<f64, MaxWindowError> {
        self.temperature(city).map_err(WeatherError::into_domain)
    }
}
