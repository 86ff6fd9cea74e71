//! Renderer-facing snapshot structs and event-log entries.
//!
//! A [`WorldSnapshot`] is sampled once per frame. Positions are `glam`
//! vectors that serialize as `[x, y, z]` arrays.

use chrono::{DateTime, Utc};
use glam::Vec3;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::{Activity, AmbulanceStatus, Job, RideStatus, Role, Severity, TravelStatus};
use crate::ids::{AgentId, EventId, HouseId};

// ---------------------------------------------------------------------------
// Agents
// ---------------------------------------------------------------------------

/// Inventory and injury flags carried by a resident.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
#[allow(clippy::struct_excessive_bools)]
pub struct Inventory {
    /// Holding an ice cream cone.
    pub has_ice_cream: bool,
    /// Carrying a grocery bag home.
    pub has_groceries: bool,
    /// Carrying a claw-machine toy.
    pub has_toy: bool,
    /// Discharged from hospital in a wheelchair.
    pub has_wheelchair: bool,
    /// Discharged from hospital without arms.
    pub missing_arms: bool,
}

/// Per-frame view of one resident.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct AgentSnapshot {
    /// Resident identifier.
    pub id: AgentId,
    /// Display name (`parent-N` / `child-N`).
    pub name: String,
    /// Household role.
    pub role: Role,
    /// Household the resident belongs to.
    pub home: HouseId,
    /// Shirt colour, inherited from the house.
    pub color: String,
    /// World position.
    #[ts(type = "[number, number, number]")]
    pub position: Vec3,
    /// Facing angle around the vertical axis, in radians.
    pub yaw: f32,
    /// Current activity.
    pub activity: Activity,
    /// Where the resident is walking, if anywhere.
    #[ts(type = "[number, number, number] | null")]
    pub target: Option<Vec3>,
    /// Inventory and injury flags.
    pub inventory: Inventory,
    /// Job currently held.
    pub job: Option<Job>,
    /// False once the resident has died.
    pub alive: bool,
    /// False while hidden inside the plane or the ambulance.
    pub visible: bool,
}

// ---------------------------------------------------------------------------
// Shared resources
// ---------------------------------------------------------------------------

/// Rollercoaster cart state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct CartSnapshot {
    /// Ride status.
    pub status: RideStatus,
    /// Seated riders, seat index = list index.
    pub riders: Vec<AgentId>,
    /// Cart position on the track.
    #[ts(type = "[number, number, number]")]
    pub position: Vec3,
    /// Unit tangent of the track at the cart.
    #[ts(type = "[number, number, number]")]
    pub forward: Vec3,
    /// Cart heading around the vertical axis, in radians.
    pub yaw: f32,
    /// Lap progress in `[0, 1)`.
    pub progress: f32,
}

/// Ambulance state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct AmbulanceSnapshot {
    /// Dispatch status.
    pub status: AmbulanceStatus,
    /// Current position.
    #[ts(type = "[number, number, number]")]
    pub position: Vec3,
    /// Patients on board or being collected.
    pub patients: Vec<AgentId>,
}

/// Household travel state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct TravelSnapshot {
    /// Travel status.
    pub status: TravelStatus,
    /// The traveling household, if any.
    pub house: Option<HouseId>,
    /// Completed vacation days.
    pub days_away: u32,
}

/// Hospital occupancy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct HospitalSnapshot {
    /// Total bed count.
    pub capacity: u32,
    /// Occupant per bed index, `None` for a free bed.
    pub beds: Vec<Option<AgentId>>,
}

// ---------------------------------------------------------------------------
// World
// ---------------------------------------------------------------------------

/// Everything the renderer draws in one frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct WorldSnapshot {
    /// Frames advanced so far.
    pub frame: u64,
    /// Current in-game minute, `1..=6`.
    pub minute: u8,
    /// Whether the night window is active.
    pub is_night: bool,
    /// Position in the day cycle, `[0, 1)`.
    pub cycle_fraction: f32,
    /// Schedule label for the current minute.
    pub label: String,
    /// All residents whose household still exists.
    pub agents: Vec<AgentSnapshot>,
    /// Rollercoaster cart.
    pub cart: CartSnapshot,
    /// Ambulance.
    pub ambulance: AmbulanceSnapshot,
    /// Travel state.
    pub travel: TravelSnapshot,
    /// Hospital beds.
    pub hospital: HospitalSnapshot,
}

// ---------------------------------------------------------------------------
// Event log
// ---------------------------------------------------------------------------

/// One line in the on-screen event feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct LogEntry {
    /// Unique entry id.
    pub id: EventId,
    /// Wall-clock time the line was logged.
    pub timestamp: DateTime<Utc>,
    /// Narrative text.
    pub message: String,
    /// Display severity.
    pub severity: Severity,
}

impl LogEntry {
    /// Create an entry stamped with the current time.
    pub fn new(message: impl Into<String>, severity: Severity) -> Self {
        Self {
            id: EventId::new(),
            timestamp: Utc::now(),
            message: message.into(),
            severity,
        }
    }
}
