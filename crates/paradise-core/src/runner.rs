//! Frame loop with operator controls.
//!
//! [`run_simulation`] drives [`Simulation::advance`] until one of these
//! holds:
//!
//! - **Frame bound**: `max_frames` frames have run
//! - **Real-time bound**: `max_real_time_seconds` of wall time have passed
//! - **Operator stop**: [`RunControls::request_stop`] was called
//! - **Extinction**: nobody is left alive
//!
//! Simulated time advances by a fixed step per frame, independent of how
//! long the real-time pause between frames is. A warp requested through
//! [`RunControls::request_warp`] is handed to the clock before the next
//! frame.

use std::sync::Arc;

use tracing::{info, warn};

use crate::controls::{RunControls, RunEndReason};
use crate::tick::{FrameSummary, Simulation, SimulationError};

/// Errors that can occur during a run.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    /// A frame failed.
    #[error("frame error: {source}")]
    Simulation {
        /// The underlying simulation error.
        #[from]
        source: SimulationError,
    },
}

/// How a run ended.
#[derive(Debug)]
pub struct SimulationResult {
    /// Why it ended.
    pub end_reason: RunEndReason,
    /// Summary of the last frame, if any ran.
    pub final_summary: Option<FrameSummary>,
    /// Frames run by this call.
    pub total_frames: u64,
}

/// Called after every frame, e.g. to hand a snapshot to a renderer.
pub trait FrameCallback: Send {
    /// Called after a frame completes.
    fn on_frame(&mut self, summary: &FrameSummary, sim: &Simulation);
}

/// A callback that does nothing.
pub struct NoOpCallback;

impl FrameCallback for NoOpCallback {
    fn on_frame(&mut self, _summary: &FrameSummary, _sim: &Simulation) {}
}

/// Run frames until a termination condition is met.
///
/// Each frame advances simulated time by `step` seconds.
///
/// # Errors
///
/// Returns [`RunnerError`] if a frame fails.
pub async fn run_simulation(
    sim: &mut Simulation,
    step: f64,
    controls: &Arc<RunControls>,
    callback: &mut dyn FrameCallback,
) -> Result<SimulationResult, RunnerError> {
    let mut last_summary: Option<FrameSummary> = None;
    let mut total_frames: u64 = 0;

    info!(
        run_id = %sim.run_id(),
        max_frames = controls.max_frames(),
        max_real_time_seconds = controls.max_real_time_seconds(),
        frame_interval_ms = controls.frame_interval_ms(),
        step,
        "Simulation starting"
    );

    loop {
        if controls.is_paused() {
            info!("Simulation paused, waiting for resume...");
            controls.wait_if_paused().await;
            info!("Simulation resumed");
        }

        if controls.is_stop_requested() {
            info!("Operator stop requested");
            return finish(controls, RunEndReason::OperatorStop, last_summary, total_frames).await;
        }

        if controls.time_limit_reached() {
            info!(
                max_seconds = controls.max_real_time_seconds(),
                elapsed = controls.elapsed_seconds(),
                "Real-time limit reached"
            );
            return finish(controls, RunEndReason::MaxRealTimeReached, last_summary, total_frames)
                .await;
        }

        if let Some(minute) = controls.take_warp() {
            sim.warp(minute)?;
        }

        let elapsed = if sim.frame() == 0 {
            0.0
        } else {
            sim.elapsed() + step
        };
        let summary = sim.advance(elapsed)?;
        total_frames = total_frames.saturating_add(1);

        callback.on_frame(&summary, sim);

        if summary.alive == 0 {
            info!(frame = summary.frame, "Everyone is dead");
            return finish(controls, RunEndReason::Extinction, Some(summary), total_frames).await;
        }

        if controls.frame_limit_reached(summary.frame) {
            info!(
                frame = summary.frame,
                max_frames = controls.max_frames(),
                "Frame limit reached"
            );
            return finish(controls, RunEndReason::MaxFramesReached, Some(summary), total_frames)
                .await;
        }

        last_summary = Some(summary);

        let interval_ms = controls.frame_interval_ms();
        if interval_ms > 0 {
            tokio::time::sleep(tokio::time::Duration::from_millis(interval_ms)).await;
        } else {
            tokio::task::yield_now().await;
        }
    }
}

async fn finish(
    controls: &RunControls,
    reason: RunEndReason,
    final_summary: Option<FrameSummary>,
    total_frames: u64,
) -> Result<SimulationResult, RunnerError> {
    controls.set_end_reason(reason).await;
    Ok(SimulationResult {
        end_reason: reason,
        final_summary,
        total_frames,
    })
}

/// Log how the run ended.
pub fn log_simulation_end(result: &SimulationResult, sim: &Simulation) {
    let population = sim.population();
    info!(
        reason = ?result.end_reason,
        total_frames = result.total_frames,
        final_frame = result.final_summary.as_ref().map(|s| s.frame),
        alive = population.alive,
        hospitalized = population.hospitalized,
        households = population.households,
        dead_households = population.dead_households,
        "Simulation ended"
    );

    if let Some(ref summary) = result.final_summary {
        info!(
            frame = summary.frame,
            minute = summary.reading.minute,
            label = summary.reading.label(),
            alive = summary.alive,
            "Final frame"
        );
    } else {
        warn!("Simulation ended with no frames run");
    }
}
