//! Error types for the `paradise-world` crate.
//!
//! World generation is the only fallible operation here. Everything that
//! happens after generation is a simulation outcome, not an error.

use paradise_types::{AgentId, HouseId};

/// Errors that can occur while building or querying the town.
#[derive(Debug, thiserror::Error)]
pub enum WorldError {
    /// The grid cannot hold the five reserved buildings plus a house.
    #[error("grid {rows}x{cols} is too small: need at least 3x3")]
    GridTooSmall {
        /// Requested row count.
        rows: u32,
        /// Requested column count.
        cols: u32,
    },

    /// Cell spacing must be a positive, finite distance.
    #[error("invalid grid spacing: {0}")]
    InvalidSpacing(f32),

    /// The house colour palette is empty.
    #[error("house palette is empty")]
    EmptyPalette,

    /// A house id does not exist in the town.
    #[error("house not found: {0}")]
    HouseNotFound(HouseId),

    /// A resident id does not exist in the town.
    #[error("resident not found: {0}")]
    ResidentNotFound(AgentId),
}
