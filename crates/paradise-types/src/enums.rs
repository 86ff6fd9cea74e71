//! Enumeration types for the Stickman Paradise simulation.
//!
//! Everything the renderer needs to switch on (activity, role, job, the
//! status of each shared resource) plus the event-log severity.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// ---------------------------------------------------------------------------
// Residents
// ---------------------------------------------------------------------------

/// Household role of a resident.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum Role {
    /// Adult; may hold a job and decides its own leisure at low rates.
    Parent,
    /// Child; attends school and plays most of the day.
    Child,
}

/// A job slot in town. At most one resident holds each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum Job {
    /// Teaches at the school.
    Teacher,
    /// Staffs a store register.
    Cashier,
    /// Works the hospital doctor station.
    Doctor,
}

impl Job {
    /// All job types, in assignment order.
    pub const ALL: [Self; 3] = [Self::Teacher, Self::Cashier, Self::Doctor];
}

impl core::fmt::Display for Job {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Teacher => write!(f, "TEACHER"),
            Self::Cashier => write!(f, "CASHIER"),
            Self::Doctor => write!(f, "DOCTOR"),
        }
    }
}

/// Flat activity discriminant shown to the renderer.
///
/// Exactly one holds per resident at any time. The state machine keeps a
/// richer tagged state internally and projects it onto this enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Activity {
    /// Standing around, ready to pick something to do.
    Idle,
    /// Walking somewhere with no further purpose.
    Walking,
    /// Eating ice cream on the couch.
    Eating,
    /// In bed.
    Sleeping,
    /// Walking to the ice-cream shop.
    Buying,
    /// Sitting at a school desk.
    Learning,
    /// Playing in the park.
    Playing,
    /// On the couch in front of the TV.
    WatchingTv,
    /// Teaching at the school (job).
    Teaching,
    /// Walking to a store shelf.
    Shopping,
    /// Picking an item off the shelf.
    Browsing,
    /// Paying at a register.
    Checkout,
    /// Working a register (job).
    Working,
    /// Building a sand castle at the beach.
    BuildingSand,
    /// Playing a claw machine.
    PlayingArcade,
    /// Celebrating a claw-machine win.
    Cheering,
    /// Moving through the airport.
    Traveling,
    /// Seated at the gate until the flight is resolved.
    WaitingForFlight,
    /// On board the plane.
    Flying,
    /// On vacation at the island.
    Relaxing,
    /// Dead; drifting in heaven.
    Floating,
    /// Walking to the rollercoaster queue.
    WaitingForRide,
    /// Seated in the coaster cart.
    RidingCoaster,
    /// Lying in a hospital bed.
    InHospital,
    /// Working the doctor station (job).
    TreatingPatient,
    /// Injured at a crash site.
    WaitingForAmbulance,
    /// Being carried by the ambulance.
    InAmbulance,
    /// Sacrificed at the volcano.
    Burning,
}

impl Activity {
    /// Whether the renderer should draw the resident.
    pub const fn is_visible(self) -> bool {
        !matches!(self, Self::Flying | Self::InAmbulance)
    }
}

// ---------------------------------------------------------------------------
// Shared resources
// ---------------------------------------------------------------------------

/// Rollercoaster cart status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RideStatus {
    /// Parked at the platform, taking riders.
    Boarding,
    /// Running the loop with a full cart.
    Running,
    /// Wrecked; resets after a cooldown.
    Crashed,
}

/// Ambulance status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AmbulanceStatus {
    /// Parked at the hospital.
    Idle,
    /// Driving to a crash site.
    Dispatched,
    /// Loading patients at the scene.
    Loading,
    /// Driving back to the hospital.
    Returning,
}

/// Household travel status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TravelStatus {
    /// Nobody is traveling.
    Idle,
    /// A family is making its way through the airport.
    Boarding,
    /// The family is on vacation.
    Away,
    /// The family has landed and is walking home.
    Returning,
    /// The plane went down; the wreck clears after a cooldown.
    Crashed,
}

// ---------------------------------------------------------------------------
// Houses
// ---------------------------------------------------------------------------

/// Kind of furniture anchor inside a house.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum FurnitureKind {
    /// A bed; parents use the first, children the second.
    Bed,
    /// The couch, used for TV and eating.
    Couch,
    /// The television.
    Tv,
    /// An empty corner.
    Corner,
}

// ---------------------------------------------------------------------------
// Event log
// ---------------------------------------------------------------------------

/// Severity of an event-log line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Everyday news.
    Normal,
    /// Crashes, deaths, overflow.
    Alert,
    /// Admissions, recoveries.
    Success,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn activity_serializes_screaming_snake() {
        let json = serde_json::to_string(&Activity::WaitingForAmbulance).ok();
        assert_eq!(json.as_deref(), Some("\"WAITING_FOR_AMBULANCE\""));
    }

    #[test]
    fn flying_and_ambulance_are_hidden() {
        assert!(!Activity::Flying.is_visible());
        assert!(!Activity::InAmbulance.is_visible());
        assert!(Activity::Floating.is_visible());
    }

    #[test]
    fn severity_is_lowercase_on_the_wire() {
        let json = serde_json::to_string(&Severity::Success).ok();
        assert_eq!(json.as_deref(), Some("\"success\""));
    }

    #[test]
    fn job_display_matches_log_wording() {
        assert_eq!(Job::Teacher.to_string(), "TEACHER");
        assert_eq!(Job::ALL.len(), 3);
    }
}
