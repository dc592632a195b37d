//! Window service: use-cases for reading window sensor states.

use maxwindow_domain::error::MaxWindowError;
use maxwindow_domain::radio::RadioAddress;
use maxwindow_domain::window::{WindowReport, WindowStatus};

use crate::ports::{CubeGateway, RandomSource};

/// Application service producing [`WindowReport`]s from a Cube.
pub struct WindowService<C> {
    cube: C,
}

impl<C: CubeGateway> WindowService<C> {
    /// Create a new service backed by the given Cube gateway.
    pub fn new(cube: C) -> Self {
        Self { cube }
    }

    /// Fetch a dump and resolve every window contact it reports.
    ///
    /// # Errors
    ///
    /// Propagates [`MaxWindowError::Fetch`] and
    /// [`MaxWindowError::MalformedFrame`] from the gateway.
    #[tracing::instrument(skip(self))]
    pub fn report(&self) -> Result<WindowReport, MaxWindowError> {
        let snapshot = self.cube.snapshot()?;
        let report = snapshot.window_report();
        tracing::debug!(
            devices = snapshot.directory.devices.len(),
            statuses = snapshot.statuses.len(),
            sensors = report.len(),
            "resolved window sensors"
        );
        Ok(report)
    }

    /// Like [`report`](Self::report), then flip one random sensor to open.
    ///
    /// # Errors
    ///
    /// Same as [`report`](Self::report).
    pub fn simulated_report<R: RandomSource>(
        &self,
        random: &mut R,
    ) -> Result<WindowReport, MaxWindowError> {
        let mut report = self.report()?;
        if let Some(address) = simulate_open(&mut report, random) {
            tracing::info!(%address, "simulation: forcing window open");
        }
        Ok(report)
    }
}

/// Overwrite the status of one uniformly chosen entry with [`WindowStatus::Open`].
///
/// Returns the address of the flipped entry, or `None` when the report is empty.
pub fn simulate_open<R: RandomSource>(
    report: &mut WindowReport,
    random: &mut R,
) -> Option<RadioAddress> {
    if report.is_empty() {
        return None;
    }
    let index = random.pick(report.len());
    let sensor = report.values_mut().nth(index)?;
    sensor.status = WindowStatus::Open;
    Some(sensor.radio_address)
}
