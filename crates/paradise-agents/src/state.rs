//! The per-resident state.
//!
//! [`AgentState`] is a tagged union: states that carry data (travel step,
//! hospital bed, burn countdown) keep it in the variant instead of in loose
//! fields on the agent. [`AgentState::activity`] flattens it for the
//! renderer.

use paradise_types::Activity;

/// Where a traveller is in the airport sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TravelStep {
    /// Walking to, or queueing at, the check-in desk.
    CheckIn,
    /// Walking to, or queueing at, security.
    Security,
    /// Walking to the gate.
    Gate,
}

/// Current state of one resident. Exactly one holds at a time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AgentState {
    /// Ready to pick something to do.
    Idle,
    /// Walking with no purpose beyond arriving.
    Walking,
    /// Eating ice cream on the couch.
    Eating,
    /// In bed.
    Sleeping,
    /// Walking to the ice-cream shop.
    Buying,
    /// At a school desk.
    Learning,
    /// Playing in the park.
    Playing,
    /// On the couch watching TV.
    WatchingTv,
    /// Teacher at work.
    Teaching,
    /// Walking to a store shelf.
    Shopping,
    /// Picking groceries off the shelf.
    Browsing,
    /// Paying at a register.
    Checkout,
    /// Cashier at work.
    Working,
    /// Building a sand castle.
    BuildingSand,
    /// At a claw machine.
    PlayingArcade,
    /// Celebrating a claw-machine win.
    Cheering,
    /// Moving through the airport.
    Traveling {
        /// Current airport step.
        step: TravelStep,
    },
    /// Seated at the gate.
    WaitingForFlight,
    /// On board the plane.
    Flying,
    /// On vacation.
    Relaxing,
    /// Dead, in heaven.
    Floating,
    /// Walking to the coaster queue.
    WaitingForRide,
    /// Seated in the coaster cart.
    RidingCoaster,
    /// Admitted to the hospital.
    InHospital {
        /// Assigned bed index.
        bed: u32,
        /// Rounds left before a delayed death, if one is pending.
        days_until_death: Option<u32>,
    },
    /// Doctor at work.
    TreatingPatient,
    /// Injured, waiting at a crash site.
    WaitingForAmbulance,
    /// Inside the ambulance.
    InAmbulance,
    /// At the volcano.
    Burning {
        /// Seconds until death.
        remaining: f32,
    },
}

impl AgentState {
    /// Flat activity for the renderer.
    pub const fn activity(&self) -> Activity {
        match self {
            Self::Idle => Activity::Idle,
            Self::Walking => Activity::Walking,
            Self::Eating => Activity::Eating,
            Self::Sleeping => Activity::Sleeping,
            Self::Buying => Activity::Buying,
            Self::Learning => Activity::Learning,
            Self::Playing => Activity::Playing,
            Self::WatchingTv => Activity::WatchingTv,
            Self::Teaching => Activity::Teaching,
            Self::Shopping => Activity::Shopping,
            Self::Browsing => Activity::Browsing,
            Self::Checkout => Activity::Checkout,
            Self::Working => Activity::Working,
            Self::BuildingSand => Activity::BuildingSand,
            Self::PlayingArcade => Activity::PlayingArcade,
            Self::Cheering => Activity::Cheering,
            Self::Traveling { .. } => Activity::Traveling,
            Self::WaitingForFlight => Activity::WaitingForFlight,
            Self::Flying => Activity::Flying,
            Self::Relaxing => Activity::Relaxing,
            Self::Floating => Activity::Floating,
            Self::WaitingForRide => Activity::WaitingForRide,
            Self::RidingCoaster => Activity::RidingCoaster,
            Self::InHospital { .. } => Activity::InHospital,
            Self::TreatingPatient => Activity::TreatingPatient,
            Self::WaitingForAmbulance => Activity::WaitingForAmbulance,
            Self::InAmbulance => Activity::InAmbulance,
            Self::Burning { .. } => Activity::Burning,
        }
    }

    /// On the way to, or through, a flight.
    pub const fn is_travel(&self) -> bool {
        matches!(
            self,
            Self::Traveling { .. } | Self::WaitingForFlight | Self::Flying | Self::Relaxing
        )
    }

    /// Still in the airport, not yet airborne.
    pub const fn is_departing(&self) -> bool {
        matches!(self, Self::Traveling { .. } | Self::WaitingForFlight)
    }

    /// At a job post.
    pub const fn is_work(&self) -> bool {
        matches!(self, Self::Teaching | Self::Working | Self::TreatingPatient)
    }

    /// In the hands of the hospital or ambulance crew.
    pub const fn is_medical(&self) -> bool {
        matches!(
            self,
            Self::InHospital { .. } | Self::WaitingForAmbulance | Self::InAmbulance
        )
    }

    /// Hospital bed, if admitted.
    pub const fn hospital_bed(&self) -> Option<u32> {
        match self {
            Self::InHospital { bed, .. } => Some(*bed),
            _ => None,
        }
    }

    /// Whether the household's travel plans can pull this resident along.
    ///
    /// Patients, seated riders, the burning, and the dead stay behind.
    pub const fn can_join_trip(&self) -> bool {
        !self.is_medical()
            && !matches!(
                self,
                Self::RidingCoaster | Self::Burning { .. } | Self::Floating
            )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tagged_states_flatten() {
        let state = AgentState::InHospital {
            bed: 3,
            days_until_death: Some(2),
        };
        assert_eq!(state.activity(), Activity::InHospital);
        assert_eq!(state.hospital_bed(), Some(3));
        assert_eq!(
            AgentState::Traveling {
                step: TravelStep::Gate
            }
            .activity(),
            Activity::Traveling
        );
    }

    #[test]
    fn patients_and_riders_stay_home() {
        assert!(!AgentState::RidingCoaster.can_join_trip());
        assert!(!AgentState::InAmbulance.can_join_trip());
        assert!(AgentState::WaitingForRide.can_join_trip());
        assert!(AgentState::Sleeping.can_join_trip());
    }

    #[test]
    fn departing_is_a_subset_of_travel() {
        let step = AgentState::Traveling {
            step: TravelStep::CheckIn,
        };
        assert!(step.is_departing() && step.is_travel());
        assert!(AgentState::Relaxing.is_travel());
        assert!(!AgentState::Relaxing.is_departing());
    }
}
