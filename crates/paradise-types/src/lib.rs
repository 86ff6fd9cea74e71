//! Shared type definitions for the Stickman Paradise simulation.
//!
//! Everything the renderer reads lives here. Types flow to `TypeScript`
//! via `ts-rs` for the browser front end.
//!
//! # Modules
//!
//! - [`ids`] -- Typed identifiers for residents, houses, and log entries
//! - [`enums`] -- Roles, jobs, activities, resource statuses, log severity
//! - [`snapshot`] -- Per-frame renderer snapshot and event-log entries

pub mod enums;
pub mod ids;
pub mod snapshot;

// Re-export all public types at crate root for convenience.
pub use enums::{
    Activity, AmbulanceStatus, FurnitureKind, Job, RideStatus, Role, Severity, TravelStatus,
};
pub use glam::Vec3;
pub use ids::{AgentId, EventId, HouseId};
pub use snapshot::{
    AgentSnapshot, AmbulanceSnapshot, CartSnapshot, HospitalSnapshot, Inventory, LogEntry,
    TravelSnapshot, WorldSnapshot,
};

#[cfg(test)]
mod tests {
    //! `TypeScript` binding generation.

    #[test]
    fn export_bindings() {
        // ts-rs writes bindings for every #[ts(export)] type when asked.
        // Files land in `bindings/` relative to the crate root.
        use ts_rs::TS;

        // IDs
        let _ = crate::ids::AgentId::export_all();
        let _ = crate::ids::HouseId::export_all();
        let _ = crate::ids::EventId::export_all();

        // Enums
        let _ = crate::enums::Role::export_all();
        let _ = crate::enums::Job::export_all();
        let _ = crate::enums::Activity::export_all();
        let _ = crate::enums::RideStatus::export_all();
        let _ = crate::enums::AmbulanceStatus::export_all();
        let _ = crate::enums::TravelStatus::export_all();
        let _ = crate::enums::FurnitureKind::export_all();
        let _ = crate::enums::Severity::export_all();

        // Snapshots
        let _ = crate::snapshot::WorldSnapshot::export_all();
        let _ = crate::snapshot::LogEntry::export_all();
    }
}
