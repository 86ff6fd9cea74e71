//! Arbitration of everything residents share.
//!
//! The [`Coordinator`] owns the coaster roster, the ambulance, and the
//! travel plans, and runs the ward and job-board routines against the
//! roster. Residents only read through [`SharedResources`] and request a
//! coaster seat. All other mutation happens here, inside a single frame.
//!
//! # Modules
//!
//! - [`ambulance`] -- Dispatch, loading, and the pending-call queue
//! - [`coaster`] -- Roster, ride progress, and the crash checkpoint
//! - [`hospital`] -- Admission to the lowest free bed and the morning rounds
//! - [`jobs`] -- Holders, traveller cover, and vacancy filling
//! - [`travel`] -- Lottery, takeoff, and return

pub mod ambulance;
pub mod coaster;
pub mod hospital;
pub mod jobs;
pub mod travel;

use glam::Vec3;
use paradise_agents::{Agent, AgentState, BehaviorConfig, BoardingRefused, SharedResources};
use paradise_types::{AgentId, HouseId, Job, RideStatus, Severity, TravelStatus};
use paradise_world::{CartTransform, Chance, Town};
use tracing::{debug, info};

use crate::config::{HazardConfig, ResourceConfig};
use crate::event_log::EventSink;

pub use ambulance::{Ambulance, Call};
pub use coaster::{CRASH_CHECKPOINT, Coaster, RideOutcome};
pub use hospital::{Admission, RoundsOutcome};
pub use travel::{Takeoff, Travel};

/// Which kind of crash produced the victims. Survival odds differ.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrashSite {
    /// The rollercoaster came off the loop.
    Coaster,
    /// The plane went down on takeoff.
    Runway,
}

/// Per-victim outcome of a crash.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrashReport {
    /// Victims waiting for the ambulance.
    pub survivors: Vec<AgentId>,
    /// Victims killed outright.
    pub dead: Vec<AgentId>,
}

/// Everything a coordinator routine needs besides the coordinator itself.
pub struct Scene<'a> {
    /// The roster.
    pub agents: &'a mut [Agent],
    /// Static layout.
    pub town: &'a Town,
    /// Behaviour tuning, for the burn delay.
    pub behavior: &'a BehaviorConfig,
    /// Randomness.
    pub chance: &'a mut dyn Chance,
    /// Narrative log.
    pub log: &'a mut dyn EventSink,
}

/// Owner of all shared resources.
#[derive(Debug, Clone)]
pub struct Coordinator {
    coaster: Coaster,
    ambulance: Ambulance,
    travel: Travel,
    hazards: HazardConfig,
    resources: ResourceConfig,
}

impl Coordinator {
    /// Everything idle, cart on the platform, ambulance in its bay.
    pub fn new(town: &Town, hazards: HazardConfig, resources: ResourceConfig) -> Self {
        Self {
            coaster: Coaster::new(
                &town.track,
                resources.coaster_seats,
                resources.coaster_crash_cooldown,
            ),
            ambulance: Ambulance::new(town.landmarks.ambulance_bay()),
            travel: Travel::new(),
            hazards,
            resources,
        }
    }

    /// The coaster.
    pub const fn coaster(&self) -> &Coaster {
        &self.coaster
    }

    /// The ambulance.
    pub const fn ambulance(&self) -> &Ambulance {
        &self.ambulance
    }

    /// Travel plans.
    pub const fn travel(&self) -> &Travel {
        &self.travel
    }

    /// Crash and medical odds in use.
    pub const fn hazards(&self) -> &HazardConfig {
        &self.hazards
    }

    // -----------------------------------------------------------------------
    // Minute boundaries
    // -----------------------------------------------------------------------

    /// Run the routines tied to the start of `minute`.
    ///
    /// Minute 1 holds the hospital rounds and the return check, minute 2 the
    /// travel lottery, minute 3 the takeoff.
    pub fn on_minute(&mut self, minute: u8, scene: &mut Scene<'_>) {
        match minute {
            1 => {
                self.hospital_rounds(scene);
                self.travel.resolve_return(&self.resources, scene.log);
            }
            2 => {
                let _ = self
                    .travel
                    .draw_lottery(scene.agents, scene.town, scene.chance, scene.log);
            }
            3 => {
                let takeoff = self.travel.resolve_flight(
                    scene.agents,
                    &self.hazards,
                    &self.resources,
                    scene.chance,
                    scene.log,
                );
                if let Some(Takeoff::Crashed(passengers)) = takeoff {
                    let site = scene.town.landmarks.runway_end();
                    let _ = self.crash(CrashSite::Runway, &passengers, site, scene);
                }
            }
            _ => {}
        }
    }

    fn hospital_rounds(&self, scene: &mut Scene<'_>) {
        let outcomes = hospital::rounds(
            scene.agents,
            scene.town,
            &self.hazards,
            scene.chance,
            scene.log,
        );
        for (_, outcome) in outcomes {
            if let RoundsOutcome::Died {
                vacated: Some(job),
            } = outcome
            {
                let _ = jobs::replace_deceased(
                    job,
                    self.travel.house(),
                    scene.agents,
                    scene.chance,
                    scene.log,
                );
            }
        }
    }

    // -----------------------------------------------------------------------
    // Per frame
    // -----------------------------------------------------------------------

    /// Advance the coaster, the travel cooldowns, and the ambulance.
    pub fn advance(&mut self, delta: f32, scene: &mut Scene<'_>) {
        match self.coaster.advance(
            delta,
            &scene.town.track,
            self.hazards.coaster_crash_chance,
            scene.chance,
        ) {
            Some(RideOutcome::Crashed(victims)) => {
                scene.log.log(
                    "BREAKING NEWS: The rollercoaster has crashed!",
                    Severity::Alert,
                );
                let site = self.coaster.transform().position;
                let _ = self.crash(CrashSite::Coaster, &victims, site, scene);
            }
            Some(RideOutcome::Completed(riders)) => {
                for agent in scene
                    .agents
                    .iter_mut()
                    .filter(|a| a.alive && a.state == AgentState::RidingCoaster)
                    .filter(|a| riders.contains(&a.id))
                {
                    agent.place(AgentState::Idle, scene.town.landmarks.coaster_queue());
                }
                debug!(riders = riders.len(), "Riders disembarked");
            }
            None => {}
        }

        self.travel.advance(delta, scene.log);

        if let Some(patients) = self.ambulance.advance(delta, &self.resources, scene.agents) {
            let _ = hospital::admit(
                &patients,
                scene.agents,
                scene.town,
                scene.behavior,
                scene.log,
            );
        }
    }

    /// Resolve a crash: roll survival per victim, kill the rest, and call
    /// the ambulance for the survivors.
    pub fn crash(
        &mut self,
        site: CrashSite,
        victims: &[AgentId],
        scene_position: Vec3,
        scene: &mut Scene<'_>,
    ) -> CrashReport {
        let survival = match site {
            CrashSite::Coaster => self.hazards.coaster_survival,
            CrashSite::Runway => self.hazards.plane_survival,
        };
        let mut report = CrashReport::default();
        let mut vacated = Vec::new();

        for id in victims {
            let Some(agent) = scene.agents.iter_mut().find(|a| a.id == *id && a.alive) else {
                continue;
            };
            if scene.chance.chance(survival) {
                agent.place(AgentState::WaitingForAmbulance, scene_position);
                report.survivors.push(agent.id);
            } else {
                vacated.extend(agent.die(scene.town.landmarks.heaven_spot(scene.chance)));
                report.dead.push(agent.id);
            }
        }

        info!(
            ?site,
            survivors = report.survivors.len(),
            dead = report.dead.len(),
            "Crash resolved"
        );
        if !victims.is_empty() {
            scene.log.log(
                &format!(
                    "{} dead, {} waiting for an ambulance.",
                    report.dead.len(),
                    report.survivors.len()
                ),
                Severity::Alert,
            );
        }

        for job in vacated {
            let _ = jobs::replace_deceased(
                job,
                self.travel.house(),
                scene.agents,
                scene.chance,
                scene.log,
            );
        }
        self.ambulance.call(scene_position, report.survivors.clone());
        report
    }

    /// Find a successor for a job left by a death outside the coordinator
    /// (the volcano).
    pub fn job_vacated(&self, job: Job, scene: &mut Scene<'_>) -> Option<AgentId> {
        jobs::replace_deceased(job, self.travel.house(), scene.agents, scene.chance, scene.log)
    }
}

impl SharedResources for Coordinator {
    fn ride_status(&self) -> RideStatus {
        self.coaster.status()
    }

    fn ride_has_room(&self) -> bool {
        self.coaster.has_room()
    }

    fn seat_of(&self, agent: AgentId) -> Option<usize> {
        self.coaster.seat_of(agent)
    }

    fn cart(&self) -> CartTransform {
        self.coaster.transform()
    }

    fn try_board(&mut self, agent: AgentId) -> Result<usize, BoardingRefused> {
        self.coaster.try_board(agent)
    }

    fn travel_status(&self) -> TravelStatus {
        self.travel.status()
    }

    fn traveling_house(&self) -> Option<HouseId> {
        self.travel.house()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use paradise_world::{ScriptedChance, WorldParams};

    use super::*;
    use crate::event_log::RecentEvents;

    fn setup() -> (Town, Vec<Agent>, Coordinator) {
        let mut chance = ScriptedChance::new([0.0]);
        let town = Town::generate(&WorldParams::default(), &mut chance).unwrap();
        let agents = town.residents.iter().map(Agent::from_resident).collect();
        let coordinator =
            Coordinator::new(&town, HazardConfig::default(), ResourceConfig::default());
        (town, agents, coordinator)
    }

    #[test]
    fn coaster_crash_splits_victims() {
        let (town, mut agents, mut coordinator) = setup();
        let behavior = BehaviorConfig::default();
        let mut log = RecentEvents::default();
        // Survive, die (plus three heaven jitter rolls), survive.
        let mut chance = ScriptedChance::new([0.1, 0.9, 0.5, 0.5, 0.5, 0.2]);
        let victims = [AgentId::new(11), AgentId::new(13), AgentId::new(15)];
        let mut scene = Scene {
            agents: &mut agents,
            town: &town,
            behavior: &behavior,
            chance: &mut chance,
            log: &mut log,
        };
        let report = coordinator.crash(CrashSite::Coaster, &victims, Vec3::ZERO, &mut scene);
        assert_eq!(report.survivors, vec![AgentId::new(11), AgentId::new(15)]);
        assert_eq!(report.dead, vec![AgentId::new(13)]);
        assert_eq!(agents[11].state, AgentState::WaitingForAmbulance);
        assert!(!agents[13].alive);
        assert_eq!(coordinator.ambulance().pending(), 1);
    }

    #[test]
    fn crash_death_of_job_holder_is_replaced() {
        let (town, mut agents, mut coordinator) = setup();
        let behavior = BehaviorConfig::default();
        let mut log = RecentEvents::default();
        // The teacher dies; the replacement roll picks the first free parent.
        let mut chance = ScriptedChance::new([0.95, 0.5, 0.5, 0.5, 0.0]);
        let mut scene = Scene {
            agents: &mut agents,
            town: &town,
            behavior: &behavior,
            chance: &mut chance,
            log: &mut log,
        };
        let report = coordinator.crash(CrashSite::Runway, &[AgentId::new(0)], Vec3::ZERO, &mut scene);
        assert_eq!(report.dead, vec![AgentId::new(0)]);
        assert_eq!(jobs::holder(&agents, Job::Teacher), Some(AgentId::new(6)));
        assert_eq!(coordinator.ambulance().pending(), 0);
    }

    #[test]
    fn shared_view_tracks_the_cart() {
        let (_, _, mut coordinator) = setup();
        assert!(coordinator.ride_has_room());
        assert_eq!(coordinator.try_board(AgentId::new(3)), Ok(0));
        assert_eq!(coordinator.seat_of(AgentId::new(3)), Some(0));
        assert_eq!(coordinator.travel_status(), TravelStatus::Idle);
        assert_eq!(coordinator.traveling_house(), None);
    }
}
