//! The game clock and time warp.
//!
//! The clock turns elapsed wall time into a repeating 360-second day. Each
//! reading carries the in-game minute (1-6), the night flag, and whether
//! the minute changed since the previous reading. Minute-boundary routines
//! (travel lottery, hospital rounds) run only on readings with
//! `minute_changed` set.
//!
//! # Design Principles
//!
//! - The clock never reads a system timer. The frame driver passes the
//!   elapsed seconds in, so tests control time completely.
//! - The warp offset is clock state, not view state. It survives as long
//!   as the clock does.
//! - A warp is applied against the elapsed time of the next tick, so that
//!   tick lands exactly on the first second of the target minute.

use paradise_agents::DayTime;
use serde::Serialize;
use tracing::{debug, info};

const DAY: f64 = 360.0;
const MINUTE: f64 = 60.0;
const NIGHT_ENDS: f64 = 60.0;
const NIGHT_BEGINS: f64 = 300.0;

/// Number of in-game minutes in a day.
pub const MINUTES_PER_DAY: u8 = 6;

/// Errors that can occur during clock operations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ClockError {
    /// A warp target outside `1..=6`.
    #[error("invalid minute {0}: expected 1 to {MINUTES_PER_DAY}")]
    InvalidMinute(u8),

    /// The frame driver passed NaN or an infinity.
    #[error("elapsed time must be finite, got {0}")]
    NonFiniteElapsed(f64),
}

/// What each minute of the day is for.
pub const fn day_label(minute: u8) -> &'static str {
    match minute {
        1 => "SLEEPING / WAKING UP",
        2 => "FREE / ARCADE / BEACH / SHOP",
        3 => "SCHOOL / WORK / TRAVEL",
        4 => "FREE TIME",
        5 => "PARK / BEACH / SHOP",
        _ => "SLEEP",
    }
}

/// One evaluation of the clock.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ClockReading {
    /// In-game minute, `1..=6`.
    pub minute: u8,
    /// Seconds into the day, `[0, 360)`.
    pub cycle_time: f64,
    /// `cycle_time / 360`.
    pub cycle_fraction: f64,
    /// First or last minute of the day.
    pub is_night: bool,
    /// Set on the first reading, on every change of minute, and on the
    /// first reading after a warp.
    pub minute_changed: bool,
}

impl ClockReading {
    /// Label for the current minute.
    pub const fn label(&self) -> &'static str {
        day_label(self.minute)
    }

    /// The same time of day as the residents see it.
    #[allow(clippy::cast_possible_truncation)]
    pub fn day_time(&self) -> DayTime {
        DayTime::new(self.cycle_time as f32)
    }
}

/// Converts elapsed time plus a persistent offset into day readings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GameClock {
    /// Seconds added to the elapsed time, kept within one day.
    offset: f64,

    /// Minute seen by the previous reading.
    last_minute: Option<u8>,

    /// Warp target to apply on the next reading.
    pending_warp: Option<u8>,

    /// Fire `minute_changed` on the next reading unconditionally.
    force_fire: bool,
}

impl GameClock {
    /// A clock with no offset. The first reading always fires.
    pub const fn new() -> Self {
        Self {
            offset: 0.0,
            last_minute: None,
            pending_warp: None,
            force_fire: false,
        }
    }

    /// Current warp offset in seconds.
    pub const fn offset(&self) -> f64 {
        self.offset
    }

    /// Warp target waiting for the next reading, if any.
    pub const fn pending_warp(&self) -> Option<u8> {
        self.pending_warp
    }

    /// Ask for the next reading to land on the first second of `minute`.
    ///
    /// Warping to the current minute still fires `minute_changed`.
    ///
    /// # Errors
    ///
    /// Returns [`ClockError::InvalidMinute`] if `minute` is not in `1..=6`.
    pub fn warp(&mut self, minute: u8) -> Result<(), ClockError> {
        if !(1..=MINUTES_PER_DAY).contains(&minute) {
            return Err(ClockError::InvalidMinute(minute));
        }
        info!(minute, "Time warp requested");
        self.pending_warp = Some(minute);
        Ok(())
    }

    /// Evaluate the clock at `elapsed` seconds since the session started.
    ///
    /// # Errors
    ///
    /// Returns [`ClockError::NonFiniteElapsed`] if `elapsed` is NaN or
    /// infinite. The clock is left untouched in that case.
    pub fn tick(&mut self, elapsed: f64) -> Result<ClockReading, ClockError> {
        if !elapsed.is_finite() {
            return Err(ClockError::NonFiniteElapsed(elapsed));
        }

        if let Some(target) = self.pending_warp.take() {
            let landing = f64::from(target.saturating_sub(1)).mul_add(MINUTE, 1.0);
            let current = cycle_of(elapsed + self.offset);
            self.offset = (self.offset + landing - current).rem_euclid(DAY);
            self.force_fire = true;
            debug!(minute = target, offset = self.offset, "Time warp applied");
        }

        let cycle_time = cycle_of(elapsed + self.offset);
        let minute = minute_of(cycle_time);
        let minute_changed = self.force_fire || self.last_minute != Some(minute);
        self.force_fire = false;
        self.last_minute = Some(minute);

        Ok(ClockReading {
            minute,
            cycle_time,
            cycle_fraction: cycle_time / DAY,
            is_night: !(NIGHT_ENDS..NIGHT_BEGINS).contains(&cycle_time),
            minute_changed,
        })
    }
}

/// Wrap seconds into `[0, 360)`.
fn cycle_of(seconds: f64) -> f64 {
    let cycle = seconds.rem_euclid(DAY);
    // rem_euclid can round up to the divisor for tiny negative inputs.
    if cycle >= DAY { 0.0 } else { cycle }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn minute_of(cycle_time: f64) -> u8 {
    let index = (cycle_time / MINUTE).floor().clamp(0.0, 5.0) as u8;
    index.saturating_add(1)
}
