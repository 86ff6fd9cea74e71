//! A resident and the operations other subsystems perform on it.

use glam::Vec3;
use paradise_types::{AgentId, AgentSnapshot, HouseId, Inventory, Job, Role};
use paradise_world::Resident;

use crate::config::BehaviorConfig;
use crate::state::AgentState;

/// One resident. Never removed from the roster, only flagged dead.
#[derive(Debug, Clone, PartialEq)]
pub struct Agent {
    /// Resident identifier.
    pub id: AgentId,
    /// Display name.
    pub name: String,
    /// Household role.
    pub role: Role,
    /// Home house.
    pub home: HouseId,
    /// Household number, used for desk and register assignment.
    pub number: u32,
    /// Shirt colour.
    pub color: String,
    /// Job currently held.
    pub job: Option<Job>,
    /// Current state.
    pub state: AgentState,
    /// Walk target, if walking somewhere.
    pub target: Option<Vec3>,
    /// World position.
    pub position: Vec3,
    /// Facing around the vertical axis.
    pub yaw: f32,
    /// Inventory and injury flags.
    pub inventory: Inventory,
    /// Seconds left on the current hold. Nothing else is evaluated while
    /// this is positive.
    pub wait_timer: f32,
    /// Parents roll for the night arcade once per night.
    pub checked_night_activity: bool,
    /// False once dead. Permanent.
    pub alive: bool,
}

impl Agent {
    /// Move a freshly generated resident into town.
    pub fn from_resident(resident: &Resident) -> Self {
        Self {
            id: resident.id,
            name: resident.name.clone(),
            role: resident.role,
            home: resident.home,
            number: resident.number,
            color: resident.color.clone(),
            job: resident.job,
            state: AgentState::Idle,
            target: None,
            position: resident.spawn,
            yaw: 0.0,
            inventory: Inventory::default(),
            wait_timer: 0.0,
            checked_night_activity: false,
            alive: true,
        }
    }

    /// Enter `state` and walk to `target`.
    pub const fn go(&mut self, state: AgentState, target: Vec3) {
        self.state = state;
        self.target = Some(target);
    }

    /// Enter `state` in place, holding it for `seconds`.
    pub const fn hold(&mut self, state: AgentState, seconds: f32) {
        self.state = state;
        self.wait_timer = seconds;
    }

    /// Enter `state` at `position`, dropping any walk target or hold.
    pub const fn place(&mut self, state: AgentState, position: Vec3) {
        self.state = state;
        self.position = position;
        self.target = None;
        self.wait_timer = 0.0;
    }

    /// Kill the resident and move them to `resting_place` in heaven.
    ///
    /// Returns the job they held, now vacant. A second call is a no-op.
    pub const fn die(&mut self, resting_place: Vec3) -> Option<Job> {
        if !self.alive {
            return None;
        }
        self.alive = false;
        self.place(AgentState::Floating, resting_place);
        self.job.take()
    }

    /// Walking speed per reference frame.
    pub fn speed(&self, config: &BehaviorConfig) -> f32 {
        if self.inventory.has_wheelchair {
            config.wheelchair_speed
        } else {
            match self.role {
                Role::Parent => config.parent_speed,
                Role::Child => config.child_speed,
            }
        }
    }

    /// Renderer view of the resident.
    pub fn snapshot(&self) -> AgentSnapshot {
        let activity = self.state.activity();
        AgentSnapshot {
            id: self.id,
            name: self.name.clone(),
            role: self.role,
            home: self.home,
            color: self.color.clone(),
            position: self.position,
            yaw: self.yaw,
            activity,
            target: self.target,
            inventory: self.inventory,
            job: self.job,
            alive: self.alive,
            visible: activity.is_visible(),
        }
    }
}
