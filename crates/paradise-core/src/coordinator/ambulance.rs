//! The town's single ambulance.
//!
//! ```text
//! IDLE --(call)--> DISPATCHED --(at scene)--> LOADING --(timer)--> RETURNING
//!   ^                                                                  |
//!   +----------------------(at bay: hand patients over)----------------+
//! ```
//!
//! The ambulance never takes a second call while out. Calls that arrive in
//! the meantime wait in a queue and are picked up as soon as it is idle.

use std::collections::VecDeque;

use glam::Vec3;
use paradise_agents::{Agent, AgentState};
use paradise_types::{AgentId, AmbulanceSnapshot, AmbulanceStatus};
use tracing::{debug, info};

use crate::config::ResourceConfig;

/// A crash scene waiting for pickup.
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    /// Where the survivors are.
    pub scene: Vec3,
    /// Survivors to pick up.
    pub patients: Vec<AgentId>,
}

/// Ambulance state.
#[derive(Debug, Clone)]
pub struct Ambulance {
    status: AmbulanceStatus,
    position: Vec3,
    bay: Vec3,
    target: Vec3,
    patients: Vec<AgentId>,
    loading: f32,
    pending: VecDeque<Call>,
}

impl Ambulance {
    /// An idle ambulance parked at `bay`.
    pub const fn new(bay: Vec3) -> Self {
        Self {
            status: AmbulanceStatus::Idle,
            position: bay,
            bay,
            target: bay,
            patients: Vec::new(),
            loading: 0.0,
            pending: VecDeque::new(),
        }
    }

    /// Current status.
    pub const fn status(&self) -> AmbulanceStatus {
        self.status
    }

    /// Current position.
    pub const fn position(&self) -> Vec3 {
        self.position
    }

    /// Patients on board or being fetched.
    pub fn patients(&self) -> &[AgentId] {
        &self.patients
    }

    /// Calls waiting for the ambulance to be free.
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Queue a call. It is dispatched on the next frame the ambulance is idle.
    pub fn call(&mut self, scene: Vec3, patients: Vec<AgentId>) {
        if patients.is_empty() {
            return;
        }
        debug!(patients = patients.len(), queued = self.pending.len(), "Ambulance called");
        self.pending.push_back(Call { scene, patients });
    }

    /// Advance one frame.
    ///
    /// Returns the patients handed to the hospital on the frame the
    /// ambulance arrives back at the bay.
    pub fn advance(
        &mut self,
        delta: f32,
        resources: &ResourceConfig,
        agents: &mut [Agent],
    ) -> Option<Vec<AgentId>> {
        match self.status {
            AmbulanceStatus::Idle => {
                if let Some(call) = self.pending.pop_front() {
                    self.status = AmbulanceStatus::Dispatched;
                    self.target = call.scene;
                    self.patients = call.patients;
                    info!(patients = self.patients.len(), "Ambulance dispatched");
                }
                None
            }
            AmbulanceStatus::Dispatched => {
                if self.drive(delta, resources) {
                    self.status = AmbulanceStatus::Loading;
                    self.loading = resources.ambulance_loading;
                    for agent in agents.iter_mut().filter(|a| self.patients.contains(&a.id)) {
                        if agent.alive && agent.state == AgentState::WaitingForAmbulance {
                            agent.place(AgentState::InAmbulance, self.position);
                        }
                    }
                    debug!("Ambulance loading");
                }
                None
            }
            AmbulanceStatus::Loading => {
                self.loading = (self.loading - delta).max(0.0);
                if self.loading <= 0.0 {
                    self.status = AmbulanceStatus::Returning;
                    self.target = self.bay;
                    debug!("Ambulance returning");
                }
                None
            }
            AmbulanceStatus::Returning => {
                let arrived = self.drive(delta, resources);
                self.carry(agents);
                if arrived {
                    self.status = AmbulanceStatus::Idle;
                    info!(patients = self.patients.len(), "Ambulance back at the hospital");
                    return Some(std::mem::take(&mut self.patients));
                }
                None
            }
        }
    }

    /// Drive toward the target. Returns true on arrival.
    fn drive(&mut self, delta: f32, resources: &ResourceConfig) -> bool {
        let offset = self.target - self.position;
        let distance = offset.length();
        if distance <= resources.ambulance_arrival_radius {
            self.position = self.target;
            return true;
        }
        let step = (resources.ambulance_speed * delta).min(distance);
        self.position += offset / distance * step;
        false
    }

    /// Patients on board ride along.
    fn carry(&self, agents: &mut [Agent]) {
        for agent in agents
            .iter_mut()
            .filter(|a| a.state == AgentState::InAmbulance && self.patients.contains(&a.id))
        {
            agent.position = self.position;
        }
    }

    /// Renderer view.
    pub fn snapshot(&self) -> AmbulanceSnapshot {
        AmbulanceSnapshot {
            status: self.status,
            position: self.position,
            patients: self.patients.clone(),
        }
    }
}
