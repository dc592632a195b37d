//! Window monitor: one poll cycle of the daemon.
//!
//! A cycle reads the window report, checks the outside temperature against
//! the threshold and notifies about every window that was already open on the
//! previous cycle. The first report only seeds the comparison.

use maxwindow_domain::window::{WindowReport, WindowSensorState};

use crate::ports::{CubeGateway, Notifier, RandomSource, TemperatureProvider};
use crate::services::window_service::WindowService;

/// Tunables for [`WindowMonitor`].
#[derive(Debug, Clone)]
pub struct MonitorSettings {
    /// City name or code understood by the temperature provider.
    pub city: String,
    /// Notifications are suppressed while the temperature is above this value.
    pub threshold: f64,
    /// Poll interval in minutes, quoted in notification messages.
    pub interval_minutes: u64,
    /// Force one random window open on every cycle.
    pub simulation: bool,
}

/// Why a cycle did not check for open windows.
#[derive(Debug, Clone, PartialEq)]
pub enum SkipReason {
    /// The Cube could not be read or its dump could not be decoded.
    NoCubeData,
    /// The outside temperature could not be looked up.
    NoTemperature,
    /// The outside temperature is above the threshold.
    AboveThreshold { temperature: f64 },
}

/// Result of a single [`WindowMonitor::poll_once`] call.
#[derive(Debug, Clone, PartialEq)]
pub enum CycleOutcome {
    Skipped(SkipReason),
    Checked {
        /// Number of windows currently open.
        open: usize,
        /// Number of notifications delivered.
        notified: usize,
    },
}

/// Drives the poll cycle over injected ports.
pub struct WindowMonitor<C, W, N, R> {
    windows: WindowService<C>,
    weather: W,
    notifier: N,
    random: R,
    settings: MonitorSettings,
    last_report: Option<WindowReport>,
}

impl<C, W, N, R> WindowMonitor<C, W, N, R>
where
    C: CubeGateway,
    W: TemperatureProvider,
    N: Notifier,
    R: RandomSource,
{
    /// Create a monitor with no previous report.
    pub fn new(cube: C, weather: W, notifier: N, random: R, settings: MonitorSettings) -> Self {
        Self {
            windows: WindowService::new(cube),
            weather,
            notifier,
            random,
            settings,
            last_report: None,
        }
    }

    /// The report the next cycle will compare against.
    #[must_use]
    pub fn last_report(&self) -> Option<&WindowReport> {
        self.last_report.as_ref()
    }

    /// Run one poll cycle.
    ///
    /// Failures are logged and turn into [`CycleOutcome::Skipped`]; a failed
    /// Cube read keeps the previous report for the next comparison.
    pub fn poll_once(&mut self) -> CycleOutcome {
        let result = if self.settings.simulation {
            self.windows.simulated_report(&mut self.random)
        } else {
            self.windows.report()
        };

        let report = match result {
            Ok(report) => report,
            Err(err) => {
                tracing::warn!(%err, "did not receive any data from the cube, skipping this cycle");
                return CycleOutcome::Skipped(SkipReason::NoCubeData);
            }
        };
        tracing::info!(sensors = report.len(), "current window data");

        let previous = self.last_report.replace(report.clone());

        let temperature = match self.weather.current_temperature(&self.settings.city) {
            Ok(temperature) => temperature,
            Err(err) => {
                tracing::warn!(
                    %err,
                    city = %self.settings.city,
                    "did not receive any temperature data, skipping this cycle"
                );
                return CycleOutcome::Skipped(SkipReason::NoTemperature);
            }
        };
        tracing::info!(city = %self.settings.city, temperature, "current outside temperature");

        if temperature > self.settings.threshold {
            tracing::info!(
                temperature,
                threshold = self.settings.threshold,
                "outside temperature above threshold, skipping this cycle"
            );
            return CycleOutcome::Skipped(SkipReason::AboveThreshold { temperature });
        }

        let mut open = 0;
        let mut notified = 0;
        for sensor in report.values().filter(|s| s.status.is_open()) {
            open += 1;
            let was_open = previous
                .as_ref()
                .and_then(|previous| previous.get(&sensor.radio_address))
                .is_some_and(|before| before.status.is_open());
            if !was_open {
                tracing::debug!(
                    address = %sensor.radio_address,
                    name = %sensor.name,
                    "window newly open"
                );
                continue;
            }

            let message = self.message_for(sensor, temperature);
            match self.notifier.send(&message) {
                Ok(delivery) => {
                    notified += 1;
                    tracing::info!(
                        address = %sensor.radio_address,
                        status = delivery.status,
                        reason = %delivery.reason,
                        "sent open window notification"
                    );
                }
                Err(err) => {
                    tracing::warn!(
                        %err,
                        address = %sensor.radio_address,
                        "failed to send open window notification"
                    );
                }
            }
        }

        CycleOutcome::Checked { open, notified }
    }

    fn message_for(&self, sensor: &WindowSensorState, temperature: f64) -> String {
        format!(
            "{} was open for more than {} minutes, and the temperature in {} is {:?}",
            sensor.name, self.settings.interval_minutes, self.settings.city, temperature
        )
    }
}
