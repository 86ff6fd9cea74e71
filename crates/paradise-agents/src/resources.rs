//! The read and request interface residents have onto shared resources.
//!
//! Residents never mutate the coaster roster or the travel state directly.
//! They read through [`SharedResources`] and request a seat with
//! [`SharedResources::try_board`], which either succeeds at once or fails.

use paradise_types::{AgentId, HouseId, RideStatus, TravelStatus};
use paradise_world::CartTransform;

use crate::error::BoardingRefused;

/// Shared-resource view handed to the state machine each frame.
pub trait SharedResources {
    /// Current coaster status.
    fn ride_status(&self) -> RideStatus;

    /// The cart is boarding and has a free seat.
    fn ride_has_room(&self) -> bool;

    /// Seat held by `agent`, if it is on the roster.
    fn seat_of(&self, agent: AgentId) -> Option<usize>;

    /// Where the cart is this frame.
    fn cart(&self) -> CartTransform;

    /// Ask for a seat. On success the resident is on the roster before any
    /// other resident is evaluated.
    fn try_board(&mut self, agent: AgentId) -> Result<usize, BoardingRefused>;

    /// Current travel status.
    fn travel_status(&self) -> TravelStatus;

    /// The household currently travelling, if any.
    fn traveling_house(&self) -> Option<HouseId>;
}
