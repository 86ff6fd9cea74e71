//! Frame-by-frame scenarios for the resident state machine.
//!
//! A hand-rolled [`SharedResources`] stands in for the coordinator so each
//! test controls the coaster roster and travel state directly. Rolls come
//! from a [`ScriptedChance`], so every branch is forced.

#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::missing_panics_doc
)]

use glam::Vec3;
use paradise_agents::{
    Agent, AgentEvent, AgentState, BehaviorConfig, BoardingRefused, Context, DayTime,
    SharedResources, TravelStep, evaluate, integrate,
};
use paradise_types::{AgentId, HouseId, Job, RideStatus, TravelStatus};
use paradise_world::{CartTransform, ScriptedChance, Town, WorldParams};

struct FakeResources {
    status: RideStatus,
    roster: Vec<AgentId>,
    seats: usize,
    travel: TravelStatus,
    house: Option<HouseId>,
}

impl Default for FakeResources {
    fn default() -> Self {
        Self {
            status: RideStatus::Boarding,
            roster: Vec::new(),
            seats: 4,
            travel: TravelStatus::Idle,
            house: None,
        }
    }
}

impl SharedResources for FakeResources {
    fn ride_status(&self) -> RideStatus {
        self.status
    }

    fn ride_has_room(&self) -> bool {
        self.status == RideStatus::Boarding && self.roster.len() < self.seats
    }

    fn seat_of(&self, agent: AgentId) -> Option<usize> {
        self.roster.iter().position(|id| *id == agent)
    }

    fn cart(&self) -> CartTransform {
        CartTransform {
            position: Vec3::new(0.0, 10.0, 0.0),
            forward: Vec3::Z,
            yaw: 0.0,
        }
    }

    fn try_board(&mut self, agent: AgentId) -> Result<usize, BoardingRefused> {
        if self.status != RideStatus::Boarding {
            return Err(BoardingRefused::NotBoarding(self.status));
        }
        if self.roster.len() >= self.seats {
            return Err(BoardingRefused::Full { seats: self.seats });
        }
        self.roster.push(agent);
        Ok(self.roster.len() - 1)
    }

    fn travel_status(&self) -> TravelStatus {
        self.travel
    }

    fn traveling_house(&self) -> Option<HouseId> {
        self.house
    }
}

struct Harness {
    town: Town,
    config: BehaviorConfig,
    resources: FakeResources,
    chance: ScriptedChance,
}

impl Harness {
    /// Teacher in house 0, cashier in house 1, doctor in house 2.
    fn new() -> Self {
        let mut chance = ScriptedChance::new([0.0]);
        let town = Town::generate(&WorldParams::default(), &mut chance).unwrap();
        Self {
            town,
            config: BehaviorConfig::default(),
            resources: FakeResources::default(),
            chance: ScriptedChance::new([]),
        }
    }

    fn agent(&self, name: &str) -> Agent {
        let resident = self.town.residents.iter().find(|r| r.name == name).unwrap();
        Agent::from_resident(resident)
    }

    fn script(&mut self, rolls: impl IntoIterator<Item = f64>) {
        self.chance = ScriptedChance::new(rolls);
    }

    fn ctx(&mut self, cycle: f32, delta: f32) -> Context<'_> {
        Context {
            delta,
            day: DayTime::new(cycle),
            town: &self.town,
            config: &self.config,
            resources: &mut self.resources,
            chance: &mut self.chance,
        }
    }

    fn evaluate(&mut self, agent: &mut Agent, cycle: f32, delta: f32) -> Option<AgentEvent> {
        evaluate(agent, &mut self.ctx(cycle, delta))
    }

    /// Teleport onto the target and run the arrival action.
    fn arrive(&mut self, agent: &mut Agent, cycle: f32) -> Option<AgentEvent> {
        agent.position = agent.target.expect("agent has a target");
        integrate(agent, &mut self.ctx(cycle, 1.0 / 60.0))
    }
}

const FREE: f32 = 90.0;
const SCHOOL: f32 = 150.0;
const NIGHT: f32 = 310.0;

// ---------------------------------------------------------------------------
// Schedule
// ---------------------------------------------------------------------------

#[test]
fn children_go_to_their_desk_and_drop_ice_cream() {
    let mut h = Harness::new();
    let mut child = h.agent("child-0");
    child.inventory.has_ice_cream = true;

    h.evaluate(&mut child, SCHOOL, 0.016);

    assert_eq!(child.state, AgentState::Learning);
    assert_eq!(child.target, Some(h.town.landmarks.school_desk(0)));
    assert!(!child.inventory.has_ice_cream);
}

#[test]
fn free_phase_releases_school() {
    let mut h = Harness::new();
    let mut child = h.agent("child-3");
    child.state = AgentState::Learning;

    h.evaluate(&mut child, 200.0, 0.016);

    // Fallback roll 0.99 matches no bracket and the child has no ice cream.
    assert_eq!(child.state, AgentState::Walking);
    assert!(child.target.is_some());
}

#[test]
fn entering_sleep_clears_the_toy_once() {
    let mut h = Harness::new();
    let mut child = h.agent("child-3");
    child.inventory.has_toy = true;

    h.evaluate(&mut child, NIGHT, 0.016);
    assert_eq!(child.state, AgentState::Sleeping);
    assert!(!child.inventory.has_toy);
    let bed = h.town.house(child.home).unwrap().furniture.bed(1);
    assert_eq!(child.target, Some(bed));

    child.inventory.has_toy = true;
    h.evaluate(&mut child, NIGHT, 0.016);
    h.evaluate(&mut child, NIGHT, 0.016);
    assert_eq!(child.state, AgentState::Sleeping);
    assert!(child.inventory.has_toy);
}

#[test]
fn parents_roll_for_the_arcade_once_per_night() {
    let mut h = Harness::new();
    let mut parent = h.agent("parent-3");
    parent.inventory.has_groceries = true;
    h.script([0.9, 0.1]);

    h.evaluate(&mut parent, NIGHT, 0.016);
    assert_eq!(parent.state, AgentState::Sleeping);
    assert!(parent.checked_night_activity);
    assert!(!parent.inventory.has_groceries);

    h.evaluate(&mut parent, NIGHT, 0.016);
    assert_eq!(h.chance.remaining(), 1);
}

#[test]
fn night_arcade_runs_to_completion_then_bed() {
    let mut h = Harness::new();
    let mut parent = h.agent("parent-3");
    h.script([0.1, 0.0]);

    h.evaluate(&mut parent, NIGHT, 0.016);
    assert_eq!(parent.state, AgentState::PlayingArcade);
    assert_eq!(parent.target, Some(h.town.landmarks.claw_spots()[0]));

    h.arrive(&mut parent, NIGHT);
    assert!((parent.wait_timer - 3.0).abs() < f32::EPSILON);
    h.evaluate(&mut parent, NIGHT, 3.0);
    h.evaluate(&mut parent, NIGHT, 0.016);
    assert_eq!(parent.state, AgentState::Cheering);
    h.evaluate(&mut parent, NIGHT, 2.0);
    h.evaluate(&mut parent, NIGHT, 0.016);
    assert!(parent.inventory.has_toy);
    assert_eq!(parent.state, AgentState::Idle);

    h.evaluate(&mut parent, NIGHT, 0.016);
    assert_eq!(parent.state, AgentState::Sleeping);

    // Daybreak clears the nightly flag and the toy, and wakes the parent.
    h.evaluate(&mut parent, 70.0, 0.016);
    assert!(!parent.checked_night_activity);
    assert!(!parent.inventory.has_toy);
    assert_eq!(parent.state, AgentState::Idle);
}

#[test]
fn parent_already_at_the_arcade_keeps_playing_at_dusk() {
    let mut h = Harness::new();
    let mut parent = h.agent("parent-5");
    let spot = h.town.landmarks.claw_spots()[0];
    parent.go(AgentState::PlayingArcade, spot);
    h.script([0.9]);

    h.evaluate(&mut parent, NIGHT, 0.016);
    assert_eq!(parent.state, AgentState::PlayingArcade);
    assert_eq!(parent.target, Some(spot));
    assert!(parent.checked_night_activity);
    assert_eq!(h.chance.remaining(), 1);

    parent.state = AgentState::Cheering;
    parent.target = None;
    parent.checked_night_activity = false;
    h.evaluate(&mut parent, NIGHT, 0.016);
    assert!(parent.inventory.has_toy);
    assert_eq!(parent.state, AgentState::Idle);
    assert_eq!(h.chance.remaining(), 1);

    // Done playing: bed, with no second roll.
    h.evaluate(&mut parent, NIGHT, 0.016);
    assert_eq!(parent.state, AgentState::Sleeping);
    assert_eq!(h.chance.remaining(), 1);
}

// ---------------------------------------------------------------------------
// Jobs
// ---------------------------------------------------------------------------

#[test]
fn teacher_works_by_day_and_sleeps_by_night() {
    let mut h = Harness::new();
    let mut teacher = h.agent("parent-0");
    assert_eq!(teacher.job, Some(Job::Teacher));

    h.evaluate(&mut teacher, FREE, 0.016);
    assert_eq!(teacher.state, AgentState::Teaching);
    assert_eq!(teacher.target, Some(h.town.landmarks.teacher_spot()));

    h.evaluate(&mut teacher, NIGHT, 0.016);
    assert_eq!(teacher.state, AgentState::Sleeping);
}

#[test]
fn revoked_job_sends_worker_idle() {
    let mut h = Harness::new();
    let mut cashier = h.agent("parent-1");
    h.evaluate(&mut cashier, FREE, 0.016);
    assert_eq!(cashier.state, AgentState::Working);

    cashier.job = None;
    h.evaluate(&mut cashier, FREE, 0.016);
    assert!(!cashier.state.is_work());
}

// ---------------------------------------------------------------------------
// Holds and completions
// ---------------------------------------------------------------------------

#[test]
fn hold_timer_blocks_evaluation() {
    let mut h = Harness::new();
    let mut child = h.agent("child-3");
    child.state = AgentState::BuildingSand;
    child.wait_timer = 1.0;

    h.evaluate(&mut child, FREE, 0.5);
    assert_eq!(child.state, AgentState::BuildingSand);
    assert!((child.wait_timer - 0.5).abs() < f32::EPSILON);

    h.evaluate(&mut child, FREE, 0.8);
    assert!(child.wait_timer.abs() < f32::EPSILON);
    assert_eq!(child.state, AgentState::BuildingSand);

    h.evaluate(&mut child, FREE, 0.016);
    assert_eq!(child.state, AgentState::Idle);
}

#[test]
fn browsing_picks_up_groceries_and_heads_to_a_register() {
    let mut h = Harness::new();
    let mut parent = h.agent("parent-3");
    parent.state = AgentState::Browsing;

    h.evaluate(&mut parent, FREE, 0.016);

    assert!(parent.inventory.has_groceries);
    assert_eq!(parent.state, AgentState::Checkout);
    let registers = h.town.landmarks.registers();
    assert!(registers.contains(&parent.target.unwrap()));
}

#[test]
fn ice_cream_run_ends_with_a_cone() {
    let mut h = Harness::new();
    let mut child = h.agent("child-3");
    h.script([0.0]);

    h.evaluate(&mut child, FREE, 0.016);
    assert_eq!(child.state, AgentState::Buying);
    assert_eq!(child.target, Some(h.town.landmarks.shop_counter()));

    h.arrive(&mut child, FREE);
    assert!(child.inventory.has_ice_cream);
    assert_eq!(child.state, AgentState::Walking);
}

#[test]
fn child_with_a_cone_sits_down_to_eat_it() {
    let mut h = Harness::new();
    let mut child = h.agent("child-5");
    child.inventory.has_ice_cream = true;
    h.script([0.99]);

    h.evaluate(&mut child, FREE, 0.016);
    assert_eq!(child.state, AgentState::Eating);
    let seat = h.town.house(child.home).unwrap().furniture.couch_seat();
    assert_eq!(child.target, Some(seat));

    let hold = h.config.eating_hold;
    h.arrive(&mut child, FREE);
    assert!((child.wait_timer - hold).abs() < f32::EPSILON);
    h.evaluate(&mut child, FREE, hold);
    h.evaluate(&mut child, FREE, 0.016);
    assert!(!child.inventory.has_ice_cream);
    assert_eq!(child.state, AgentState::Idle);
}

#[test]
fn child_with_nothing_to_do_wanders_near_home() {
    let mut h = Harness::new();
    let mut child = h.agent("child-5");
    h.script([0.99, 0.0, 0.99]);

    h.evaluate(&mut child, FREE, 0.016);
    assert_eq!(child.state, AgentState::Walking);
    let home = h.town.house(child.home).unwrap().position;
    let offset = child.target.unwrap() - home;
    assert!((offset.x + 12.5).abs() < 1e-4);
    assert!((offset.z - 12.25).abs() < 1e-4);
    assert!(offset.y.abs() < f32::EPSILON);
}

// ---------------------------------------------------------------------------
// Movement
// ---------------------------------------------------------------------------

#[test]
fn movement_is_tick_scaled() {
    let mut h = Harness::new();
    let mut child = h.agent("child-3");
    let start = child.position;
    child.state = AgentState::Walking;
    child.target = Some(start + Vec3::new(10.0, 0.0, 0.0));

    integrate(&mut child, &mut h.ctx(FREE, 1.0 / 60.0));
    assert!((child.position.x - start.x - 0.12).abs() < 1e-4);

    child.inventory.has_wheelchair = true;
    let before = child.position;
    integrate(&mut child, &mut h.ctx(FREE, 1.0 / 30.0));
    assert!((child.position.x - before.x - 0.06).abs() < 1e-4);
}

#[test]
fn arrival_snaps_within_radius() {
    let mut h = Harness::new();
    let mut child = h.agent("child-3");
    let goal = child.position + Vec3::new(0.15, 0.0, 0.0);
    child.state = AgentState::Walking;
    child.target = Some(goal);

    integrate(&mut child, &mut h.ctx(FREE, 1.0 / 60.0));
    assert_eq!(child.position, goal);
    assert!(child.target.is_none());
    assert_eq!(child.state, AgentState::Idle);
}

// ---------------------------------------------------------------------------
// Coaster
// ---------------------------------------------------------------------------

#[test]
fn queueing_child_takes_the_first_seat() {
    let mut h = Harness::new();
    let mut child = h.agent("child-3");
    child.go(AgentState::WaitingForRide, h.town.landmarks.coaster_queue());

    let event = h.arrive(&mut child, FREE);

    assert_eq!(event, Some(AgentEvent::Boarded { seat: 0 }));
    assert_eq!(child.state, AgentState::RidingCoaster);
    assert_eq!(h.resources.roster, vec![child.id]);
    assert_eq!(child.position, Vec3::new(0.0, 11.0, -1.5));
}

#[test]
fn full_cart_turns_the_latecomer_away() {
    let mut h = Harness::new();
    h.resources.roster = (100..104).map(AgentId::new).collect();
    let mut child = h.agent("child-3");
    child.go(AgentState::WaitingForRide, h.town.landmarks.coaster_queue());

    let event = h.arrive(&mut child, FREE);

    assert_eq!(event, Some(AgentEvent::RideRefused));
    assert_eq!(child.state, AgentState::Idle);
    assert_eq!(h.resources.roster.len(), 4);
}

#[test]
fn riders_follow_the_cart_until_dropped() {
    let mut h = Harness::new();
    let mut child = h.agent("child-3");
    child.state = AgentState::RidingCoaster;
    h.resources.roster = vec![AgentId::new(99), child.id];

    h.evaluate(&mut child, FREE, 0.016);
    assert_eq!(child.position, h.resources.cart().seat(1));
    assert_eq!(child.state, AgentState::RidingCoaster);

    h.resources.roster.clear();
    h.evaluate(&mut child, FREE, 0.016);
    assert_ne!(child.state, AgentState::RidingCoaster);
}

#[test]
fn crashed_riders_wait_for_the_coordinator() {
    let mut h = Harness::new();
    let mut child = h.agent("child-3");
    child.state = AgentState::RidingCoaster;
    child.position = Vec3::new(5.0, 5.0, 5.0);
    h.resources.roster = vec![child.id];
    h.resources.status = RideStatus::Crashed;

    h.evaluate(&mut child, FREE, 0.016);

    assert_eq!(child.state, AgentState::RidingCoaster);
    assert_eq!(child.position, Vec3::new(5.0, 5.0, 5.0));
}

// ---------------------------------------------------------------------------
// Travel
// ---------------------------------------------------------------------------

#[test]
fn travellers_walk_the_airport_fly_and_return() {
    let mut h = Harness::new();
    let mut parent = h.agent("parent-3");
    h.resources.travel = TravelStatus::Boarding;
    h.resources.house = Some(parent.home);

    h.evaluate(&mut parent, FREE, 0.016);
    assert_eq!(
        parent.state,
        AgentState::Traveling {
            step: TravelStep::CheckIn
        }
    );

    for expected in [TravelStep::Security, TravelStep::Gate] {
        h.arrive(&mut parent, FREE);
        assert!((parent.wait_timer - 1.5).abs() < f32::EPSILON);
        h.evaluate(&mut parent, FREE, 1.5);
        h.evaluate(&mut parent, FREE, 0.016);
        assert_eq!(parent.state, AgentState::Traveling { step: expected });
    }
    h.arrive(&mut parent, FREE);
    assert_eq!(parent.state, AgentState::WaitingForFlight);

    h.resources.travel = TravelStatus::Away;
    h.evaluate(&mut parent, FREE, 0.016);
    assert_eq!(parent.state, AgentState::Flying);
    assert!(!parent.snapshot().visible);
    h.evaluate(&mut parent, FREE, 8.0);
    h.evaluate(&mut parent, FREE, 0.016);
    assert_eq!(parent.state, AgentState::Relaxing);
    assert!(parent.position.distance(h.town.landmarks.island) < 25.0);

    h.resources.travel = TravelStatus::Returning;
    h.evaluate(&mut parent, FREE, 0.016);
    let home = h.town.house(parent.home).unwrap().position;
    assert_eq!(parent.state, AgentState::Walking);
    assert_eq!(parent.position, h.town.landmarks.terminal_exit());
    assert_eq!(parent.target, Some(home));
}

#[test]
fn patients_are_left_behind_by_the_trip() {
    let mut h = Harness::new();
    let mut child = h.agent("child-3");
    child.state = AgentState::InHospital {
        bed: 2,
        days_until_death: None,
    };
    h.resources.travel = TravelStatus::Boarding;
    h.resources.house = Some(child.home);

    h.evaluate(&mut child, FREE, 0.016);

    assert!(matches!(child.state, AgentState::InHospital { bed: 2, .. }));
    assert_eq!(Some(child.position), h.town.landmarks.hospital_bed(2));
}

#[test]
fn other_households_ignore_the_trip() {
    let mut h = Harness::new();
    let mut parent = h.agent("parent-4");
    h.resources.travel = TravelStatus::Boarding;
    h.resources.house = Some(HouseId::new(3));

    h.evaluate(&mut parent, FREE, 0.016);
    assert!(!parent.state.is_travel());
}

// ---------------------------------------------------------------------------
// Death
// ---------------------------------------------------------------------------

#[test]
fn burning_resident_dies_after_the_delay() {
    let mut h = Harness::new();
    let mut teacher = h.agent("parent-0");
    teacher.state = AgentState::Burning { remaining: 0.5 };

    assert_eq!(h.evaluate(&mut teacher, FREE, 0.3), None);
    assert!(teacher.alive);

    let event = h.evaluate(&mut teacher, FREE, 0.3);
    assert_eq!(
        event,
        Some(AgentEvent::BurnedUp {
            vacated: Some(Job::Teacher)
        })
    );
    assert!(!teacher.alive);
    assert_eq!(teacher.state, AgentState::Floating);
    assert!(teacher.job.is_none());
}

#[test]
fn the_dead_stay_put() {
    let mut h = Harness::new();
    let mut child = h.agent("child-3");
    child.die(Vec3::new(0.0, 120.0, 0.0));
    child.target = Some(Vec3::ZERO);

    h.evaluate(&mut child, SCHOOL, 0.016);
    integrate(&mut child, &mut h.ctx(SCHOOL, 0.016));

    assert_eq!(child.state, AgentState::Floating);
    assert_eq!(child.position, Vec3::new(0.0, 120.0, 0.0));
    assert!(child.target.is_none());
}
