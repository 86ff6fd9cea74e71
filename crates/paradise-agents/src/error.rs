//! Error types for the `paradise-agents` crate.

use paradise_types::RideStatus;

/// Why a resident could not take a coaster seat.
///
/// Refusal is an expected outcome: the resident simply goes back to idle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum BoardingRefused {
    /// The cart left the platform or crashed before the resident arrived.
    #[error("ride is not boarding (status: {0:?})")]
    NotBoarding(RideStatus),

    /// Every seat was taken before the resident arrived.
    #[error("ride is full ({seats} seats)")]
    Full {
        /// Seat count of the cart.
        seats: usize,
    },
}
