//! Operator controls for a running simulation.
//!
//! [`RunControls`] is shared between the frame loop and whatever drives
//! it (the headless binary's signal handler, a test, a debug overlay).
//! The operator can pause and resume, change the pacing, request a time
//! warp, and stop the run cleanly.
//!
//! All fields the frame loop reads every frame are atomics, so checking
//! them never takes a lock.

use std::sync::atomic::{AtomicBool, AtomicU8, AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::{Mutex, Notify};

use crate::clock::{ClockError, MINUTES_PER_DAY};
use crate::config::EngineConfig;

/// Why a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunEndReason {
    /// Reached `max_frames`.
    MaxFramesReached,
    /// Reached `max_real_time_seconds`.
    MaxRealTimeReached,
    /// The operator asked to stop.
    OperatorStop,
    /// Every resident is dead.
    Extinction,
}

/// Shared operator state, wrapped in an `Arc` by the caller.
#[derive(Debug)]
pub struct RunControls {
    paused: AtomicBool,
    resume_notify: Notify,
    stop_requested: AtomicBool,

    /// Real-time pause between frames. 0 runs frames back to back.
    frame_interval_ms: AtomicU64,

    /// Requested warp minute. 0 means none.
    pending_warp: AtomicU8,

    started_at: DateTime<Utc>,
    max_frames: u64,
    max_real_time_seconds: u64,
    end_reason: Mutex<Option<RunEndReason>>,
}

impl RunControls {
    /// Controls paced at `engine.frame_rate` with the configured bounds.
    pub fn new(engine: &EngineConfig) -> Self {
        Self::with_interval(frame_interval_for(engine.frame_rate), engine)
    }

    /// Controls with an explicit frame interval in milliseconds.
    pub fn with_interval(frame_interval_ms: u64, engine: &EngineConfig) -> Self {
        Self {
            paused: AtomicBool::new(false),
            resume_notify: Notify::new(),
            stop_requested: AtomicBool::new(false),
            frame_interval_ms: AtomicU64::new(frame_interval_ms),
            pending_warp: AtomicU8::new(0),
            started_at: Utc::now(),
            max_frames: engine.max_frames,
            max_real_time_seconds: engine.max_real_time_seconds,
            end_reason: Mutex::new(None),
        }
    }

    // -----------------------------------------------------------------------
    // Pause / Resume
    // -----------------------------------------------------------------------

    /// Whether the run is paused.
    pub fn is_paused(&self) -> bool {
        self.paused.load(Ordering::Acquire)
    }

    /// Pause. The frame loop sleeps until resumed.
    pub fn pause(&self) {
        self.paused.store(true, Ordering::Release);
    }

    /// Resume and wake the frame loop.
    pub fn resume(&self) {
        self.paused.store(false, Ordering::Release);
        self.resume_notify.notify_one();
    }

    /// Wait until the run is no longer paused.
    pub async fn wait_if_paused(&self) {
        while self.paused.load(Ordering::Acquire) {
            self.resume_notify.notified().await;
        }
    }

    // -----------------------------------------------------------------------
    // Stop
    // -----------------------------------------------------------------------

    /// Ask the frame loop to stop after the current frame.
    ///
    /// Also wakes a paused loop so it can notice.
    pub fn request_stop(&self) {
        self.stop_requested.store(true, Ordering::Release);
        self.paused.store(false, Ordering::Release);
        self.resume_notify.notify_one();
    }

    /// Whether a stop was requested.
    pub fn is_stop_requested(&self) -> bool {
        self.stop_requested.load(Ordering::Acquire)
    }

    /// Record why the run ended.
    pub async fn set_end_reason(&self, reason: RunEndReason) {
        let mut guard = self.end_reason.lock().await;
        *guard = Some(reason);
    }

    /// Why the run ended, if it has.
    pub async fn end_reason(&self) -> Option<RunEndReason> {
        *self.end_reason.lock().await
    }

    // -----------------------------------------------------------------------
    // Pacing
    // -----------------------------------------------------------------------

    /// Current pause between frames in milliseconds.
    pub fn frame_interval_ms(&self) -> u64 {
        self.frame_interval_ms.load(Ordering::Acquire)
    }

    /// Change the pause between frames. Returns the previous value.
    pub fn set_frame_interval_ms(&self, ms: u64) -> u64 {
        self.frame_interval_ms.swap(ms, Ordering::AcqRel)
    }

    // -----------------------------------------------------------------------
    // Time warp
    // -----------------------------------------------------------------------

    /// Ask for the next frame to land on the first second of `minute`.
    ///
    /// A second request before the frame loop picks up the first one
    /// replaces it.
    ///
    /// # Errors
    ///
    /// Returns [`ClockError::InvalidMinute`] if `minute` is not in `1..=6`.
    pub fn request_warp(&self, minute: u8) -> Result<(), ClockError> {
        if !(1..=MINUTES_PER_DAY).contains(&minute) {
            return Err(ClockError::InvalidMinute(minute));
        }
        self.pending_warp.store(minute, Ordering::Release);
        Ok(())
    }

    /// Consume the pending warp, if any.
    pub fn take_warp(&self) -> Option<u8> {
        match self.pending_warp.swap(0, Ordering::AcqRel) {
            0 => None,
            minute => Some(minute),
        }
    }

    // -----------------------------------------------------------------------
    // Boundaries
    // -----------------------------------------------------------------------

    /// True if `max_frames > 0` and `frame >= max_frames`.
    pub const fn frame_limit_reached(&self, frame: u64) -> bool {
        self.max_frames > 0 && frame >= self.max_frames
    }

    /// True if `max_real_time_seconds > 0` and that much wall time has
    /// passed since the run started.
    pub fn time_limit_reached(&self) -> bool {
        self.max_real_time_seconds > 0 && self.elapsed_seconds() >= self.max_real_time_seconds
    }

    /// Wall-clock start of the run.
    pub const fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Wall-clock seconds since the run started.
    pub fn elapsed_seconds(&self) -> u64 {
        let elapsed = Utc::now()
            .signed_duration_since(self.started_at)
            .num_seconds();
        u64::try_from(elapsed.max(0)).unwrap_or(u64::MAX)
    }

    /// Configured frame bound.
    pub const fn max_frames(&self) -> u64 {
        self.max_frames
    }

    /// Configured real-time bound.
    pub const fn max_real_time_seconds(&self) -> u64 {
        self.max_real_time_seconds
    }
}

/// Milliseconds between frames at `frame_rate` frames per second.
pub fn frame_interval_for(frame_rate: u32) -> u64 {
    1_000_u64.checked_div(u64::from(frame_rate)).unwrap_or(0)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn bounded(max_frames: u64) -> EngineConfig {
        EngineConfig {
            max_frames,
            ..EngineConfig::default()
        }
    }

    #[test]
    fn starts_running() {
        let controls = RunControls::new(&EngineConfig::default());
        assert!(!controls.is_paused());
        assert!(!controls.is_stop_requested());
        assert_eq!(controls.frame_interval_ms(), 16);
    }

    #[test]
    fn pause_and_resume() {
        let controls = RunControls::new(&EngineConfig::default());
        controls.pause();
        assert!(controls.is_paused());
        controls.resume();
        assert!(!controls.is_paused());
    }

    #[test]
    fn stop_unpauses() {
        let controls = RunControls::new(&EngineConfig::default());
        controls.pause();
        controls.request_stop();
        assert!(controls.is_stop_requested());
        assert!(!controls.is_paused());
    }

    #[test]
    fn warp_is_taken_once() {
        let controls = RunControls::new(&EngineConfig::default());
        assert_eq!(controls.take_warp(), None);
        controls.request_warp(3).unwrap();
        controls.request_warp(5).unwrap();
        assert_eq!(controls.take_warp(), Some(5));
        assert_eq!(controls.take_warp(), None);
    }

    #[test]
    fn warp_outside_the_day_is_rejected() {
        let controls = RunControls::new(&EngineConfig::default());
        assert_eq!(controls.request_warp(0), Err(ClockError::InvalidMinute(0)));
        assert_eq!(controls.request_warp(7), Err(ClockError::InvalidMinute(7)));
        assert_eq!(controls.take_warp(), None);
    }

    #[test]
    fn frame_limit() {
        assert!(!RunControls::new(&bounded(0)).frame_limit_reached(1_000_000));
        let controls = RunControls::new(&bounded(100));
        assert!(!controls.frame_limit_reached(99));
        assert!(controls.frame_limit_reached(100));
    }

    #[test]
    fn time_limit_zero_means_unlimited() {
        let controls = RunControls::new(&EngineConfig::default());
        assert!(!controls.time_limit_reached());
    }

    #[test]
    fn interval_from_rate() {
        assert_eq!(frame_interval_for(60), 16);
        assert_eq!(frame_interval_for(1), 1000);
        assert_eq!(frame_interval_for(0), 0);
    }

    #[tokio::test]
    async fn end_reason_is_recorded() {
        let controls = RunControls::new(&EngineConfig::default());
        assert_eq!(controls.end_reason().await, None);
        controls.set_end_reason(RunEndReason::Extinction).await;
        assert_eq!(controls.end_reason().await, Some(RunEndReason::Extinction));
    }
}
