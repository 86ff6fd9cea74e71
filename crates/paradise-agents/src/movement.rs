//! Seek-and-arrive movement.
//!
//! Residents with a target walk straight at it. Within the arrival radius
//! they snap onto it, the target clears, and the state's arrival action
//! runs.

use tracing::trace;

use crate::agent::Agent;
use crate::behavior::{AgentEvent, Context};
use crate::state::{AgentState, TravelStep};

/// Advance `agent` toward its target by one frame.
pub fn integrate(agent: &mut Agent, ctx: &mut Context<'_>) -> Option<AgentEvent> {
    let target = agent.target?;
    if !agent.alive {
        agent.target = None;
        return None;
    }

    let offset = target - agent.position;
    let distance = offset.length();
    if distance <= ctx.config.arrival_radius {
        agent.position = target;
        agent.target = None;
        return arrive(agent, ctx);
    }

    let step = agent.speed(ctx.config) * ctx.delta * ctx.config.reference_fps;
    let direction = offset / distance;
    agent.position += direction * step.min(distance);
    agent.yaw = direction.x.atan2(direction.z);
    None
}

/// Run the arrival action for the agent's current state.
fn arrive(agent: &mut Agent, ctx: &mut Context<'_>) -> Option<AgentEvent> {
    let config = ctx.config;
    match agent.state {
        AgentState::Buying => {
            agent.inventory.has_ice_cream = true;
            agent.state = AgentState::Walking;
        }
        AgentState::Shopping => agent.hold(AgentState::Browsing, config.browse_hold),
        AgentState::Checkout => agent.wait_timer = config.checkout_hold,
        AgentState::PlayingArcade => agent.wait_timer = config.arcade_hold,
        AgentState::BuildingSand => agent.wait_timer = config.sand_hold,
        AgentState::Eating => agent.wait_timer = config.eating_hold,
        AgentState::Walking => agent.state = AgentState::Idle,
        AgentState::Traveling {
            step: TravelStep::CheckIn | TravelStep::Security,
        } => agent.wait_timer = config.travel_desk_hold,
        AgentState::Traveling {
            step: TravelStep::Gate,
        } => agent.state = AgentState::WaitingForFlight,
        AgentState::WaitingForRide => {
            return Some(match ctx.resources.try_board(agent.id) {
                Ok(seat) => {
                    agent.state = AgentState::RidingCoaster;
                    agent.position = ctx.resources.cart().seat(seat);
                    AgentEvent::Boarded { seat }
                }
                Err(refused) => {
                    trace!(agent = %agent.name, %refused, "Missed the ride");
                    agent.state = AgentState::Idle;
                    AgentEvent::RideRefused
                }
            });
        }
        _ => {}
    }
    None
}
