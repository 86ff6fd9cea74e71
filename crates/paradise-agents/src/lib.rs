//! Resident state machine for the Stickman Paradise simulation.
//!
//! This crate is the logic layer for residents: everything that decides what
//! a resident does next, without owning any shared resource. Shared state
//! (coaster roster, travel plans) is read through [`SharedResources`], and
//! every roll goes through the world's `Chance` seam.
//!
//! # Modules
//!
//! - [`agent`] -- The [`Agent`] record and operations on it
//! - [`behavior`] -- [`evaluate`]: the prioritized per-frame transition function
//! - [`config`] -- [`BehaviorConfig`]: speeds, hold timers, leisure odds
//! - [`error`] -- [`BoardingRefused`]
//! - [`leisure`] -- Bracket tables and first-eligible-match selection
//! - [`movement`] -- [`integrate`]: seek-and-arrive with arrival actions
//! - [`resources`] -- The [`SharedResources`] read/request trait
//! - [`schedule`] -- [`DayTime`] and children's day phases
//! - [`state`] -- The [`AgentState`] tagged union

pub mod agent;
pub mod behavior;
pub mod config;
pub mod error;
pub mod leisure;
pub mod movement;
pub mod resources;
pub mod schedule;
pub mod state;

// Re-export primary types at crate root for convenience.
pub use agent::Agent;
pub use behavior::{AgentEvent, Context, Flow, enter_sleep, evaluate};
pub use config::BehaviorConfig;
pub use error::BoardingRefused;
pub use leisure::{Bracket, Eligibility, Leisure};
pub use movement::integrate;
pub use resources::SharedResources;
pub use schedule::{ChildPhase, DAY_LENGTH, DayTime, MINUTE_LENGTH};
pub use state::{AgentState, TravelStep};
