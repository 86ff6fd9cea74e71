//! Town layout, world generation, and randomness for Stickman Paradise.
//!
//! This crate holds everything that is fixed once the town exists: the house
//! grid, furniture anchors, building anchors, the coaster track, and the
//! residents' homes and starting jobs. It also owns the [`Chance`] seam every
//! probability roll in the simulation goes through.
//!
//! # Modules
//!
//! - [`chance`] -- Injectable uniform rolls (seeded, entropy, or scripted)
//! - [`error`] -- Error types for generation and lookups
//! - [`generation`] -- [`Town::generate`]: houses, residents, starting jobs
//! - [`house`] -- Houses and furniture anchors
//! - [`layout`] -- Building anchors and derived walk targets
//! - [`track`] -- Closed Catmull-Rom coaster loop with arc-length lookup

pub mod chance;
pub mod error;
pub mod generation;
pub mod house;
pub mod layout;
pub mod track;

// Re-export primary types at crate root.
pub use chance::{Chance, RngChance, ScriptedChance};
pub use error::WorldError;
pub use generation::{DEFAULT_PALETTE, PARENT_COLOR, Resident, Town, WorldParams};
pub use house::{Furniture, House};
pub use layout::{AIRPORT_POSITION, GridFrame, Landmarks, SCHOOL_DESKS};
pub use track::{CartTransform, CoasterTrack, SEAT_OFFSETS};
