//! The per-frame transition function.
//!
//! [`evaluate`] runs a resident's rules in fixed priority order. Each rule
//! either handles the frame ([`Flow::Handled`]) or lets the next rule look
//! at it ([`Flow::Continue`]):
//!
//! 1. dead residents float in heaven
//! 2. the burn countdown at the volcano
//! 3. ambulance patients are frozen
//! 4. hospital patients lie in their bed
//! 5. coaster riders follow the cart
//! 6. an active hold timer blocks everything else
//! 7. the household's trip takes over its members
//! 8. job holders go to work
//! 9. everyone goes to bed at night
//! 10. finished activities complete
//! 11. children follow their day phase, parents pick leisure

use glam::Vec3;
use paradise_types::{Job, RideStatus, Role, TravelStatus};
use paradise_world::{Chance, House, Town};
use tracing::{debug, trace};

use crate::agent::Agent;
use crate::config::BehaviorConfig;
use crate::leisure::{self, Eligibility, Leisure};
use crate::resources::SharedResources;
use crate::schedule::{ChildPhase, DayTime};
use crate::state::{AgentState, TravelStep};

/// Everything a resident can see and touch during one frame.
pub struct Context<'a> {
    /// Seconds since the previous frame.
    pub delta: f32,
    /// Time of day after this frame's clock tick.
    pub day: DayTime,
    /// Static layout.
    pub town: &'a Town,
    /// Behaviour tuning.
    pub config: &'a BehaviorConfig,
    /// Shared-resource view.
    pub resources: &'a mut dyn SharedResources,
    /// Randomness.
    pub chance: &'a mut dyn Chance,
}

/// Something the owner of the roster should hear about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgentEvent {
    /// The resident burned up at the volcano.
    BurnedUp {
        /// The job left vacant, if any.
        vacated: Option<Job>,
    },
    /// The resident took a coaster seat.
    Boarded {
        /// Seat index.
        seat: usize,
    },
    /// The resident reached the queue too late.
    RideRefused,
}

/// Whether a rule consumed the frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Stop evaluating.
    Handled,
    /// Try the next rule.
    Continue,
}

/// Run one frame of the state machine for `agent`.
pub fn evaluate(agent: &mut Agent, ctx: &mut Context<'_>) -> Option<AgentEvent> {
    if !agent.alive {
        if agent.state != AgentState::Floating {
            agent.place(AgentState::Floating, agent.position);
        }
        return None;
    }

    if let AgentState::Burning { remaining } = agent.state {
        let remaining = remaining - ctx.delta;
        if remaining > 0.0 {
            agent.state = AgentState::Burning { remaining };
            return None;
        }
        let spot = ctx.town.landmarks.heaven_spot(ctx.chance);
        let vacated = agent.die(spot);
        debug!(agent = %agent.name, "Burned up at the volcano");
        return Some(AgentEvent::BurnedUp { vacated });
    }

    if matches!(
        agent.state,
        AgentState::InAmbulance | AgentState::WaitingForAmbulance
    ) {
        return None;
    }

    if let AgentState::InHospital { bed, .. } = agent.state {
        if let Some(spot) = ctx.town.landmarks.hospital_bed(bed) {
            agent.position = spot;
        }
        agent.target = None;
        return None;
    }

    if ride_rule(agent, ctx) == Flow::Handled {
        return None;
    }

    if agent.wait_timer > 0.0 {
        agent.wait_timer = (agent.wait_timer - ctx.delta).max(0.0);
        return None;
    }

    let town = ctx.town;
    let Some(house) = town.house(agent.home) else {
        return None;
    };

    let rules: [fn(&mut Agent, &House, &mut Context<'_>) -> Flow; 5] = [
        travel_rule,
        job_rule,
        sleep_rule,
        completion_rule,
        leisure_rule,
    ];
    for rule in rules {
        if rule(agent, house, ctx) == Flow::Handled {
            break;
        }
    }
    None
}

// ---------------------------------------------------------------------------
// 5. Coaster
// ---------------------------------------------------------------------------

fn ride_rule(agent: &mut Agent, ctx: &Context<'_>) -> Flow {
    if !matches!(
        agent.state,
        AgentState::RidingCoaster | AgentState::WaitingForRide
    ) {
        return Flow::Continue;
    }
    let seat = ctx.resources.seat_of(agent.id);
    if ctx.resources.ride_status() == RideStatus::Crashed && seat.is_some() {
        // Crash resolution belongs to the coordinator.
        return Flow::Handled;
    }
    if agent.state != AgentState::RidingCoaster {
        return Flow::Continue;
    }
    let Some(seat) = seat else {
        agent.state = AgentState::Idle;
        return Flow::Continue;
    };
    let cart = ctx.resources.cart();
    agent.position = cart.seat(seat);
    agent.yaw = cart.yaw;
    agent.target = None;
    Flow::Handled
}

// ---------------------------------------------------------------------------
// 7. Travel
// ---------------------------------------------------------------------------

fn travel_rule(agent: &mut Agent, house: &House, ctx: &mut Context<'_>) -> Flow {
    let status = ctx.resources.travel_status();
    let ours = ctx.resources.traveling_house() == Some(agent.home);

    if !ours || matches!(status, TravelStatus::Idle | TravelStatus::Crashed) {
        return release_stranded(agent, house, ctx);
    }

    let town = ctx.town;
    let marks = &town.landmarks;
    match status {
        TravelStatus::Boarding => {
            if !agent.state.can_join_trip() {
                return Flow::Continue;
            }
            match agent.state {
                AgentState::Traveling { step } if agent.target.is_none() => {
                    let next = match step {
                        TravelStep::CheckIn => {
                            Some((TravelStep::Security, marks.security(ctx.chance)))
                        }
                        TravelStep::Security => Some((TravelStep::Gate, marks.gate(ctx.chance))),
                        TravelStep::Gate => None,
                    };
                    if let Some((step, spot)) = next {
                        agent.go(AgentState::Traveling { step }, spot);
                    }
                }
                AgentState::Traveling { .. } | AgentState::WaitingForFlight => {}
                _ => {
                    trace!(agent = %agent.name, "Heading to check-in");
                    agent.go(
                        AgentState::Traveling {
                            step: TravelStep::CheckIn,
                        },
                        marks.check_in(ctx.chance),
                    );
                }
            }
            Flow::Handled
        }
        TravelStatus::Away => match agent.state {
            AgentState::Traveling { .. } | AgentState::WaitingForFlight => {
                agent.target = None;
                agent.hold(AgentState::Flying, ctx.config.flight_hold);
                Flow::Handled
            }
            AgentState::Flying => {
                let spot = marks.island_spot(ctx.chance);
                agent.place(AgentState::Relaxing, spot);
                Flow::Handled
            }
            AgentState::Relaxing => Flow::Handled,
            _ => Flow::Continue,
        },
        TravelStatus::Returning => {
            if agent.state.is_travel() {
                walk_home_from_airport(agent, house, ctx);
                Flow::Handled
            } else {
                Flow::Continue
            }
        }
        TravelStatus::Idle | TravelStatus::Crashed => Flow::Continue,
    }
}

/// Residents still in a travel state after their trip ended (or that were
/// never part of the current one) go home.
fn release_stranded(agent: &mut Agent, house: &House, ctx: &Context<'_>) -> Flow {
    match agent.state {
        AgentState::Flying | AgentState::Relaxing => {
            walk_home_from_airport(agent, house, ctx);
            Flow::Handled
        }
        AgentState::Traveling { .. } | AgentState::WaitingForFlight => {
            agent.target = None;
            agent.state = AgentState::Idle;
            Flow::Continue
        }
        _ => Flow::Continue,
    }
}

fn walk_home_from_airport(agent: &mut Agent, house: &House, ctx: &Context<'_>) {
    agent.place(AgentState::Walking, ctx.town.landmarks.terminal_exit());
    agent.target = Some(house.position);
}

// ---------------------------------------------------------------------------
// 8. Jobs
// ---------------------------------------------------------------------------

fn job_rule(agent: &mut Agent, _house: &House, ctx: &mut Context<'_>) -> Flow {
    let Some(job) = agent.job else {
        if agent.state.is_work() {
            agent.target = None;
            agent.state = AgentState::Idle;
        }
        return Flow::Continue;
    };
    if !ctx.day.is_work_time() {
        if agent.state.is_work() {
            agent.target = None;
            agent.state = AgentState::Idle;
        }
        return Flow::Continue;
    }
    let duty = match job {
        Job::Teacher => AgentState::Teaching,
        Job::Cashier => AgentState::Working,
        Job::Doctor => AgentState::TreatingPatient,
    };
    if agent.state != duty {
        debug!(agent = %agent.name, %job, "Going to work");
        agent.go(duty, ctx.town.landmarks.job_post(job, agent.number));
    }
    Flow::Handled
}

// ---------------------------------------------------------------------------
// 9. Sleep
// ---------------------------------------------------------------------------

fn sleep_rule(agent: &mut Agent, house: &House, ctx: &mut Context<'_>) -> Flow {
    if !ctx.day.is_night() {
        if agent.checked_night_activity {
            agent.checked_night_activity = false;
            agent.inventory.has_toy = false;
        }
        if agent.role == Role::Parent && agent.state == AgentState::Sleeping {
            agent.target = None;
            agent.state = AgentState::Idle;
        }
        return Flow::Continue;
    }

    if agent.role == Role::Parent {
        if matches!(
            agent.state,
            AgentState::PlayingArcade | AgentState::Cheering
        ) {
            agent.checked_night_activity = true;
            return Flow::Continue;
        }
        if !agent.checked_night_activity && agent.state != AgentState::Sleeping {
            agent.checked_night_activity = true;
            if ctx.chance.chance(ctx.config.night_arcade_chance) {
                debug!(agent = %agent.name, "Late night at the arcade");
                let spot = ctx.town.landmarks.random_claw_spot(ctx.chance);
                agent.go(AgentState::PlayingArcade, spot);
                return Flow::Handled;
            }
        }
    }

    enter_sleep(agent, house);
    Flow::Handled
}

/// Go to bed. Entry effects run only on the transition into sleep.
pub fn enter_sleep(agent: &mut Agent, house: &House) {
    if agent.state == AgentState::Sleeping {
        return;
    }
    let bed = match agent.role {
        Role::Parent => {
            agent.inventory.has_groceries = false;
            house.furniture.bed(0)
        }
        Role::Child => {
            agent.inventory.has_toy = false;
            house.furniture.bed(1)
        }
    };
    agent.go(AgentState::Sleeping, bed);
}

// ---------------------------------------------------------------------------
// 10. Completions
// ---------------------------------------------------------------------------

fn completion_rule(agent: &mut Agent, _house: &House, ctx: &mut Context<'_>) -> Flow {
    if agent.target.is_some() {
        return Flow::Continue;
    }
    match agent.state {
        AgentState::Browsing => {
            agent.inventory.has_groceries = true;
            let register = ctx.town.landmarks.random_register(ctx.chance);
            agent.go(AgentState::Checkout, register);
        }
        AgentState::PlayingArcade => {
            agent.hold(AgentState::Cheering, ctx.config.cheer_hold);
        }
        AgentState::Cheering => {
            agent.inventory.has_toy = true;
            agent.state = AgentState::Idle;
        }
        AgentState::Eating => {
            agent.inventory.has_ice_cream = false;
            agent.state = AgentState::Idle;
        }
        AgentState::Checkout | AgentState::BuildingSand => {
            agent.state = AgentState::Idle;
        }
        _ => return Flow::Continue,
    }
    Flow::Handled
}

// ---------------------------------------------------------------------------
// 11. Day phases and leisure
// ---------------------------------------------------------------------------

fn leisure_rule(agent: &mut Agent, house: &House, ctx: &mut Context<'_>) -> Flow {
    match agent.role {
        Role::Child => child_day(agent, house, ctx),
        Role::Parent => parent_day(agent, house, ctx),
    }
}

const fn is_free(agent: &Agent) -> bool {
    agent.target.is_none() && matches!(agent.state, AgentState::Idle | AgentState::Walking)
}

fn child_day(agent: &mut Agent, house: &House, ctx: &mut Context<'_>) -> Flow {
    match ctx.day.child_phase() {
        ChildPhase::Sleep => {
            enter_sleep(agent, house);
        }
        ChildPhase::School => {
            if agent.state != AgentState::Learning {
                agent.inventory.has_ice_cream = false;
                let desk = ctx.town.landmarks.school_desk(agent.number);
                agent.go(AgentState::Learning, desk);
            }
        }
        ChildPhase::Park => {
            if matches!(agent.state, AgentState::Learning | AgentState::Sleeping) {
                agent.target = None;
                agent.state = AgentState::Idle;
            }
            if is_free(agent) {
                let roll = ctx.chance.roll();
                let choice = leisure::choose(
                    &leisure::CHILD_PARK,
                    roll,
                    &Eligibility::unrestricted(),
                )
                .unwrap_or(Leisure::Park);
                start(agent, choice, house, ctx);
            }
        }
        ChildPhase::Free => {
            if matches!(
                agent.state,
                AgentState::Learning | AgentState::Playing | AgentState::Sleeping
            ) {
                agent.target = None;
                agent.state = AgentState::Idle;
            }
            if is_free(agent) {
                let roll = ctx.chance.roll();
                let eligibility =
                    Eligibility::new(&agent.inventory, ctx.resources.ride_has_room());
                match leisure::choose(&leisure::CHILD_FREE, roll, &eligibility) {
                    Some(choice) => start(agent, choice, house, ctx),
                    None if agent.inventory.has_ice_cream => {
                        agent.go(AgentState::Eating, house.furniture.couch_seat());
                    }
                    None => start(agent, Leisure::Wander, house, ctx),
                }
            }
        }
    }
    Flow::Handled
}

fn parent_day(agent: &mut Agent, house: &House, ctx: &mut Context<'_>) -> Flow {
    if is_free(agent) {
        let roll = ctx.chance.roll();
        let eligibility = Eligibility::new(&agent.inventory, ctx.resources.ride_has_room());
        if let Some(choice) = leisure::choose(&leisure::PARENT_DAY, roll, &eligibility) {
            start(agent, choice, house, ctx);
        }
    }
    Flow::Handled
}

/// Begin a leisure activity.
fn start(agent: &mut Agent, choice: Leisure, house: &House, ctx: &mut Context<'_>) {
    let town = ctx.town;
    let marks = &town.landmarks;
    let (state, target) = match choice {
        Leisure::IceCream => (AgentState::Buying, marks.shop_counter()),
        Leisure::Shopping => (AgentState::Shopping, marks.shelf_spot(ctx.chance)),
        Leisure::SandCastle => (AgentState::BuildingSand, marks.beach_spot(ctx.chance)),
        Leisure::Arcade => (AgentState::PlayingArcade, marks.random_claw_spot(ctx.chance)),
        Leisure::Coaster => (AgentState::WaitingForRide, marks.coaster_queue()),
        Leisure::Park => (AgentState::Playing, marks.park_spot(ctx.chance)),
        Leisure::Tv => (AgentState::WatchingTv, house.furniture.couch_seat()),
        Leisure::Wander => {
            let width = match agent.role {
                Role::Parent => ctx.config.parent_wander_span,
                Role::Child => ctx.config.child_wander_span,
            };
            let offset = Vec3::new(ctx.chance.spread(width), 0.0, ctx.chance.spread(width));
            (AgentState::Walking, house.position + offset)
        }
    };
    trace!(agent = %agent.name, ?choice, "Leisure picked");
    agent.go(state, target);
}
