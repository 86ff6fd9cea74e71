//! The frame pipeline.
//!
//! [`Simulation::advance`] runs one frame, in this order:
//!
//! 1. **Clock** -- apply any pending warp and read the time of day.
//! 2. **Minute routines** -- only when the minute changed: hospital rounds
//!    and the return check (minute 1), travel lottery (2), takeoff (3).
//! 3. **Shared resources** -- coaster progress and crash roll, travel
//!    cooldowns, ambulance driving and hospital admission.
//! 4. **Residents** -- one pass of the state machine for everyone, in
//!    roster order. A seat taken by one resident is visible to the next.
//! 5. **Movement** -- seek-and-arrive for everyone with a target.
//! 6. **Aftermath** -- vacated jobs are refilled and households without a
//!    living member are marked dead.
//!
//! Everything runs on one thread. Shared resources are only mutated by the
//! coordinator, or through its seat request, within the frame.

use std::collections::BTreeSet;

use paradise_agents::{Agent, AgentEvent, BehaviorConfig, Context, evaluate, integrate};
use paradise_types::{AgentId, HouseId, Severity, WorldSnapshot};
use paradise_world::{Chance, RngChance, Town};
use serde::Serialize;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::clock::{ClockError, ClockReading, GameClock, day_label};
use crate::config::{ConfigError, SimulationConfig};
use crate::coordinator::{Coordinator, Scene, hospital};
use crate::event_log::{EventSink, Journal, RecentEvents};

/// Errors that can occur while building or advancing a simulation.
#[derive(Debug, thiserror::Error)]
pub enum SimulationError {
    /// A clock operation failed.
    #[error("clock error: {source}")]
    Clock {
        /// The underlying clock error.
        #[from]
        source: ClockError,
    },

    /// World generation failed.
    #[error("world error: {source}")]
    World {
        /// The underlying world error.
        #[from]
        source: paradise_world::WorldError,
    },

    /// The configuration is unusable.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: ConfigError,
    },

    /// A snapshot could not be serialized.
    #[error("snapshot serialization failed: {source}")]
    Serialize {
        /// The underlying JSON error.
        #[from]
        source: serde_json::Error,
    },
}

/// What one frame did.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FrameSummary {
    /// Frame number, starting at 1.
    pub frame: u64,
    /// Clock reading for the frame.
    pub reading: ClockReading,
    /// Seconds since the previous frame.
    pub delta: f32,
    /// Residents alive at the end of the frame.
    pub alive: usize,
    /// Residents who died during the frame.
    pub deaths: usize,
}

/// Head count.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Population {
    /// Everyone ever generated.
    pub residents: usize,
    /// Still alive.
    pub alive: usize,
    /// In a hospital bed.
    pub hospitalized: usize,
    /// Households with at least one living member.
    pub households: usize,
    /// Households without.
    pub dead_households: usize,
}

/// The whole simulation: town, roster, clock, and shared resources.
pub struct Simulation {
    run_id: Uuid,
    town: Town,
    agents: Vec<Agent>,
    clock: GameClock,
    coordinator: Coordinator,
    behavior: BehaviorConfig,
    chance: Box<dyn Chance + Send>,
    journal: Journal,
    dead_households: BTreeSet<HouseId>,
    frame: u64,
    last_elapsed: Option<f64>,
    last_reading: Option<ClockReading>,
}

impl Simulation {
    /// Generate a town from `config` and populate it.
    ///
    /// Randomness is seeded from `world.seed`, or from OS entropy when it
    /// is absent.
    ///
    /// # Errors
    ///
    /// Returns [`SimulationError::Config`] if the configuration does not
    /// validate, or [`SimulationError::World`] if the town cannot be laid
    /// out.
    pub fn new(
        config: &SimulationConfig,
        sink: Box<dyn EventSink + Send>,
    ) -> Result<Self, SimulationError> {
        Self::with_chance(config, Box::new(RngChance::new(config.world.seed)), sink)
    }

    /// Like [`Simulation::new`] with an explicit source of randomness.
    ///
    /// # Errors
    ///
    /// See [`Simulation::new`].
    pub fn with_chance(
        config: &SimulationConfig,
        mut chance: Box<dyn Chance + Send>,
        sink: Box<dyn EventSink + Send>,
    ) -> Result<Self, SimulationError> {
        config.validate()?;
        let town = Town::generate(&config.world_params(), chance.as_mut())?;
        Ok(Self::from_town(config, town, chance, sink))
    }

    /// Populate an already generated town.
    pub fn from_town(
        config: &SimulationConfig,
        town: Town,
        chance: Box<dyn Chance + Send>,
        sink: Box<dyn EventSink + Send>,
    ) -> Self {
        let agents: Vec<Agent> = town.residents.iter().map(Agent::from_resident).collect();
        let coordinator = Coordinator::new(&town, config.hazards.clone(), config.resources.clone());
        let run_id = Uuid::now_v7();
        info!(
            %run_id,
            houses = town.houses.len(),
            residents = agents.len(),
            seed = ?config.world.seed,
            "Simulation created"
        );
        Self {
            run_id,
            town,
            agents,
            clock: GameClock::new(),
            coordinator,
            behavior: config.behavior.clone(),
            chance,
            journal: Journal::new(config.engine.feed_capacity, sink),
            dead_households: BTreeSet::new(),
            frame: 0,
            last_elapsed: None,
            last_reading: None,
        }
    }

    // -----------------------------------------------------------------------
    // Frame
    // -----------------------------------------------------------------------

    /// Run one frame at `elapsed` seconds since the session started.
    ///
    /// The first frame has a delta of zero. Time running backwards is
    /// treated as a zero delta.
    ///
    /// # Errors
    ///
    /// Returns [`SimulationError::Clock`] if `elapsed` is not finite. The
    /// simulation is unchanged in that case.
    pub fn advance(&mut self, elapsed: f64) -> Result<FrameSummary, SimulationError> {
        let reading = self.clock.tick(elapsed)?;
        let delta = frame_delta(self.last_elapsed, elapsed);
        self.last_elapsed = Some(elapsed);
        self.frame = self.frame.saturating_add(1);
        let alive_before = self.living();

        {
            let mut scene = Scene {
                agents: &mut self.agents,
                town: &self.town,
                behavior: &self.behavior,
                chance: self.chance.as_mut(),
                log: &mut self.journal,
            };
            if reading.minute_changed {
                info!(minute = reading.minute, label = reading.label(), "Minute changed");
                self.coordinator.on_minute(reading.minute, &mut scene);
            }
            self.coordinator.advance(delta, &mut scene);
        }

        let mut events: Vec<(AgentId, AgentEvent)> = Vec::new();
        {
            let mut ctx = Context {
                delta,
                day: reading.day_time(),
                town: &self.town,
                config: &self.behavior,
                resources: &mut self.coordinator,
                chance: self.chance.as_mut(),
            };
            for agent in &mut self.agents {
                if let Some(event) = evaluate(agent, &mut ctx) {
                    events.push((agent.id, event));
                }
            }
            for agent in &mut self.agents {
                if let Some(event) = integrate(agent, &mut ctx) {
                    events.push((agent.id, event));
                }
            }
        }
        self.handle_events(&events);
        self.mark_dead_households();

        self.last_reading = Some(reading);
        let alive = self.living();
        Ok(FrameSummary {
            frame: self.frame,
            reading,
            delta,
            alive,
            deaths: alive_before.saturating_sub(alive),
        })
    }

    fn handle_events(&mut self, events: &[(AgentId, AgentEvent)]) {
        for (id, event) in events {
            match event {
                AgentEvent::BurnedUp { vacated } => {
                    let name = self.agent(*id).map_or_else(|| id.to_string(), |a| a.name.clone());
                    self.journal.log(
                        &format!("{name} was sacrificed to the volcano."),
                        Severity::Alert,
                    );
                    if let Some(job) = vacated {
                        let mut scene = Scene {
                            agents: &mut self.agents,
                            town: &self.town,
                            behavior: &self.behavior,
                            chance: self.chance.as_mut(),
                            log: &mut self.journal,
                        };
                        let _ = self.coordinator.job_vacated(*job, &mut scene);
                    }
                }
                AgentEvent::Boarded { seat } => debug!(agent = %id, seat, "Seat taken"),
                AgentEvent::RideRefused => debug!(agent = %id, "Turned away at the coaster"),
            }
        }
    }

    fn mark_dead_households(&mut self) {
        for house in &self.town.houses {
            if self.dead_households.contains(&house.id) {
                continue;
            }
            if !self.agents.iter().any(|a| a.alive && a.home == house.id) {
                self.dead_households.insert(house.id);
                warn!(house = %house.id, "Household wiped out");
                self.journal.log(
                    &format!("The family from {} is gone.", house.id),
                    Severity::Alert,
                );
            }
        }
    }

    // -----------------------------------------------------------------------
    // Operator input
    // -----------------------------------------------------------------------

    /// Make the next frame land on the first second of `minute`.
    ///
    /// # Errors
    ///
    /// Returns [`SimulationError::Clock`] if `minute` is not in `1..=6`.
    pub fn warp(&mut self, minute: u8) -> Result<(), SimulationError> {
        self.clock.warp(minute)?;
        Ok(())
    }

    /// The roster, for scenario setup and operator tools.
    pub fn agents_mut(&mut self) -> &mut [Agent] {
        &mut self.agents
    }

    // -----------------------------------------------------------------------
    // Views
    // -----------------------------------------------------------------------

    /// Identifier of this run, for log correlation.
    pub const fn run_id(&self) -> Uuid {
        self.run_id
    }

    /// Frames advanced so far.
    pub const fn frame(&self) -> u64 {
        self.frame
    }

    /// Session seconds of the last frame, or 0 before the first.
    pub fn elapsed(&self) -> f64 {
        self.last_elapsed.unwrap_or(0.0)
    }

    /// The town.
    pub const fn town(&self) -> &Town {
        &self.town
    }

    /// Every resident, living or not.
    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    /// One resident.
    pub fn agent(&self, id: AgentId) -> Option<&Agent> {
        self.agents.iter().find(|a| a.id == id)
    }

    /// The clock.
    pub const fn clock(&self) -> &GameClock {
        &self.clock
    }

    /// Reading of the last frame.
    pub const fn last_reading(&self) -> Option<ClockReading> {
        self.last_reading
    }

    /// Shared resources.
    pub const fn coordinator(&self) -> &Coordinator {
        &self.coordinator
    }

    /// Last few log lines, newest first.
    pub const fn recent_events(&self) -> &RecentEvents {
        self.journal.feed()
    }

    /// Households without a living member.
    pub const fn dead_households(&self) -> &BTreeSet<HouseId> {
        &self.dead_households
    }

    fn living(&self) -> usize {
        self.agents.iter().filter(|a| a.alive).count()
    }

    /// Head count.
    pub fn population(&self) -> Population {
        let houses = self.town.houses.len();
        Population {
            residents: self.agents.len(),
            alive: self.living(),
            hospitalized: self
                .agents
                .iter()
                .filter(|a| a.alive && a.state.hospital_bed().is_some())
                .count(),
            households: houses.saturating_sub(self.dead_households.len()),
            dead_households: self.dead_households.len(),
        }
    }

    /// Renderer view of the current frame.
    ///
    /// Residents whose household is gone, or whose home is unknown, are
    /// left out.
    pub fn snapshot(&self) -> WorldSnapshot {
        let (minute, is_night, cycle_fraction) = self
            .last_reading
            .map_or((1, true, 0.0), |r| (r.minute, r.is_night, r.cycle_fraction));
        let agents = self
            .agents
            .iter()
            .filter(|a| self.town.house(a.home).is_some())
            .filter(|a| !self.dead_households.contains(&a.home))
            .map(Agent::snapshot)
            .collect();

        WorldSnapshot {
            frame: self.frame,
            minute,
            is_night,
            cycle_fraction: narrow(cycle_fraction),
            label: day_label(minute).to_owned(),
            agents,
            cart: self.coordinator.coaster().snapshot(),
            ambulance: self.coordinator.ambulance().snapshot(),
            travel: self.coordinator.travel().snapshot(),
            hospital: hospital::snapshot(self.town.landmarks.hospital_beds, &self.agents),
        }
    }

    /// [`Simulation::snapshot`] as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`SimulationError::Serialize`] if serialization fails.
    pub fn snapshot_json(&self) -> Result<String, SimulationError> {
        Ok(serde_json::to_string(&self.snapshot())?)
    }
}

impl std::fmt::Debug for Simulation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Simulation")
            .field("run_id", &self.run_id)
            .field("frame", &self.frame)
            .field("agents", &self.agents.len())
            .field("dead_households", &self.dead_households)
            .finish_non_exhaustive()
    }
}

fn frame_delta(previous: Option<f64>, elapsed: f64) -> f32 {
    previous.map_or(0.0, |prev| narrow((elapsed - prev).max(0.0)))
}

#[allow(clippy::cast_possible_truncation)]
const fn narrow(value: f64) -> f32 {
    value as f32
}
