//! Frame callback that reports the town's state once per in-game minute.

use paradise_core::runner::FrameCallback;
use paradise_core::tick::{FrameSummary, Simulation};
use tracing::{debug, info};

/// Logs a status line whenever the minute changes.
#[derive(Debug, Default)]
pub struct MinuteReport {
    deaths: usize,
}

impl MinuteReport {
    /// A fresh report.
    pub const fn new() -> Self {
        Self { deaths: 0 }
    }

    /// Residents who died since the run started.
    pub const fn deaths(&self) -> usize {
        self.deaths
    }
}

impl FrameCallback for MinuteReport {
    fn on_frame(&mut self, summary: &FrameSummary, sim: &Simulation) {
        self.deaths = self.deaths.saturating_add(summary.deaths);
        if summary.deaths > 0 {
            debug!(frame = summary.frame, deaths = summary.deaths, "Deaths this frame");
        }
        if !summary.reading.minute_changed {
            return;
        }

        let population = sim.population();
        let coordinator = sim.coordinator();
        info!(
            frame = summary.frame,
            minute = summary.reading.minute,
            label = summary.reading.label(),
            alive = population.alive,
            hospitalized = population.hospitalized,
            households = population.households,
            ride = ?coordinator.coaster().status(),
            ambulance = ?coordinator.ambulance().status(),
            travel = ?coordinator.travel().status(),
            "Town status"
        );
    }
}
