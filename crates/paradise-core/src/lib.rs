//! Game clock, shared-resource coordination, and the frame loop for the
//! Stickman Paradise simulation.
//!
//! This crate owns everything that changes once per frame and is not a
//! single resident's business: the time of day, the coaster, the ambulance
//! and hospital ward, the job board, and the travel plans. It also owns the
//! narrative event log and the loop that drives frames under operator
//! control.
//!
//! # Modules
//!
//! - [`clock`] -- 360-second day, minute boundaries, and time warp
//! - [`config`] -- Configuration loading from `paradise-config.yaml`
//! - [`controls`] -- Pause, resume, pacing, warp, and stop for a running loop
//! - [`coordinator`] -- Coaster, ambulance, hospital, jobs, and travel
//! - [`event_log`] -- [`EventSink`] and the bounded recent-events feed
//! - [`runner`] -- [`run_simulation`]: the frame loop
//! - [`tick`] -- [`Simulation`]: the per-frame pipeline and snapshots
//!
//! [`EventSink`]: event_log::EventSink
//! [`run_simulation`]: runner::run_simulation
//! [`Simulation`]: tick::Simulation

pub mod clock;
pub mod config;
pub mod controls;
pub mod coordinator;
pub mod event_log;
pub mod runner;
pub mod tick;

pub use clock::{ClockError, ClockReading, GameClock};
pub use config::{ConfigError, SimulationConfig};
pub use controls::{RunControls, RunEndReason};
pub use coordinator::Coordinator;
pub use event_log::{EventSink, Journal, NullSink, RecentEvents, TracingSink};
pub use runner::{FrameCallback, NoOpCallback, SimulationResult, run_simulation};
pub use tick::{FrameSummary, Population, Simulation, SimulationError};
