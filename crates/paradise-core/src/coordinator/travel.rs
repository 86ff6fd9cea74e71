//! The travel lottery and the family's trip.
//!
//! | Minute | Status before | What happens                                  |
//! |--------|---------------|-----------------------------------------------|
//! | 2      | IDLE          | lottery picks a household, job cover, BOARDING|
//! | 3      | BOARDING      | takeoff: CRASHED or AWAY                      |
//! | 1      | AWAY          | one more day away; RETURNING after the last   |
//!
//! CRASHED and RETURNING fall back to IDLE on their own after a cooldown.

use paradise_agents::Agent;
use paradise_types::{AgentId, HouseId, Role, Severity, TravelSnapshot, TravelStatus};
use paradise_world::{Chance, Town};
use tracing::{debug, info};

use crate::config::{HazardConfig, ResourceConfig};
use crate::coordinator::jobs;
use crate::event_log::EventSink;

/// How the takeoff went.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Takeoff {
    /// The plane is in the air.
    Departed,
    /// The plane went down. These residents were aboard.
    Crashed(Vec<AgentId>),
}

/// Coordinator-owned travel state.
#[derive(Debug, Clone)]
pub struct Travel {
    status: TravelStatus,
    house: Option<HouseId>,
    days_away: u32,
    cooldown: f32,
}

impl Travel {
    /// Nobody travelling.
    pub const fn new() -> Self {
        Self {
            status: TravelStatus::Idle,
            house: None,
            days_away: 0,
            cooldown: 0.0,
        }
    }

    /// Current status.
    pub const fn status(&self) -> TravelStatus {
        self.status
    }

    /// Household on the trip.
    pub const fn house(&self) -> Option<HouseId> {
        self.house
    }

    /// Mornings spent away so far.
    pub const fn days_away(&self) -> u32 {
        self.days_away
    }

    /// Minute 2: pick a household with a living member and send it to the
    /// airport. Its parent's job is covered first.
    pub fn draw_lottery(
        &mut self,
        agents: &mut [Agent],
        town: &Town,
        chance: &mut dyn Chance,
        log: &mut dyn EventSink,
    ) -> Option<HouseId> {
        if self.status != TravelStatus::Idle {
            return None;
        }
        let households: Vec<HouseId> = town
            .houses
            .iter()
            .map(|h| h.id)
            .filter(|id| agents.iter().any(|a| a.alive && a.home == *id))
            .collect();
        let house = chance.pick(households.len()).and_then(|i| households.get(i).copied())?;

        info!(%house, "Travel lottery drawn");
        log.log(
            &format!("Family from {house} is heading to the airport!"),
            Severity::Normal,
        );

        let traveler = agents
            .iter()
            .find(|a| a.alive && a.home == house && a.role == Role::Parent && a.job.is_some())
            .map(|a| a.id);
        if let Some(traveler) = traveler {
            let _ = jobs::cover_for_traveler(traveler, agents, chance, log);
        }

        self.status = TravelStatus::Boarding;
        self.house = Some(house);
        self.days_away = 0;
        Some(house)
    }

    /// Minute 3: roll the takeoff.
    ///
    /// On a crash the household members still at the airport are the
    /// passengers; the caller resolves their survival.
    pub fn resolve_flight(
        &mut self,
        agents: &[Agent],
        hazards: &HazardConfig,
        resources: &ResourceConfig,
        chance: &mut dyn Chance,
        log: &mut dyn EventSink,
    ) -> Option<Takeoff> {
        if self.status != TravelStatus::Boarding {
            return None;
        }
        let house = self.house?;

        if chance.chance(hazards.flight_crash_chance) {
            let passengers: Vec<AgentId> = agents
                .iter()
                .filter(|a| a.alive && a.home == house && a.state.is_departing())
                .map(|a| a.id)
                .collect();
            self.status = TravelStatus::Crashed;
            self.cooldown = resources.plane_wreck_cooldown;
            info!(%house, passengers = passengers.len(), "Plane crashed");
            log.log(
                "BREAKING NEWS: A plane has crashed at the end of the runway!",
                Severity::Alert,
            );
            Some(Takeoff::Crashed(passengers))
        } else {
            self.status = TravelStatus::Away;
            info!(%house, "Plane departed");
            log.log("Flight 747 has departed safely.", Severity::Normal);
            Some(Takeoff::Departed)
        }
    }

    /// Minute 1: another morning on the island.
    pub fn resolve_return(&mut self, resources: &ResourceConfig, log: &mut dyn EventSink) {
        if self.status != TravelStatus::Away {
            return;
        }
        self.days_away = self.days_away.saturating_add(1);
        if self.days_away >= resources.vacation_days {
            self.status = TravelStatus::Returning;
            self.cooldown = resources.returning_reset;
            info!(days = self.days_away, "Flight landed");
            log.log("Flight 747 has landed. Welcome home!", Severity::Normal);
        } else {
            log.log(
                &format!(
                    "Travel Update: Family is enjoying day {} of vacation.",
                    self.days_away
                ),
                Severity::Normal,
            );
        }
    }

    /// Count down the wreck or the arrivals hall.
    pub fn advance(&mut self, delta: f32, log: &mut dyn EventSink) {
        if !matches!(self.status, TravelStatus::Crashed | TravelStatus::Returning) {
            return;
        }
        self.cooldown = (self.cooldown - delta).max(0.0);
        if self.cooldown > 0.0 {
            return;
        }
        if self.status == TravelStatus::Crashed {
            log.log("The runway has been cleared of wreckage.", Severity::Normal);
        }
        debug!(from = ?self.status, "Travel reset");
        *self = Self::new();
    }

    /// Renderer view.
    pub const fn snapshot(&self) -> TravelSnapshot {
        TravelSnapshot {
            status: self.status,
            house: self.house,
            days_away: self.days_away,
        }
    }
}

impl Default for Travel {
    fn default() -> Self {
        Self::new()
    }
}
