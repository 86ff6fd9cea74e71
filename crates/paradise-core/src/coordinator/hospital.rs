//! Hospital admission and the morning rounds.
//!
//! The ward has no table of its own. A bed is occupied exactly when a living
//! resident is `InHospital` with that bed index, so the roster is the single
//! source of truth and a stale bed table cannot exist.

use std::collections::BTreeSet;

use paradise_agents::{Agent, AgentState, BehaviorConfig};
use paradise_types::{AgentId, HospitalSnapshot, Job, Severity};
use paradise_world::{Chance, Town};
use tracing::{debug, info, warn};

use crate::config::HazardConfig;
use crate::event_log::EventSink;

/// Result of an ambulance delivery.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Admission {
    /// Patients given a bed, with the bed index.
    pub admitted: Vec<(AgentId, u32)>,
    /// Patients turned away and sent to the volcano.
    pub overflow: Vec<AgentId>,
}

/// How a patient left the morning rounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundsOutcome {
    /// Died in bed.
    Died {
        /// Job left vacant.
        vacated: Option<Job>,
    },
    /// Discharged in a wheelchair.
    Wheelchair,
    /// Discharged without arms.
    MissingArms,
    /// Kept in bed with days to live.
    Terminal {
        /// Days until death.
        days: u32,
    },
    /// One day closer to death.
    CountingDown {
        /// Days left.
        days: u32,
    },
    /// Discharged fully recovered.
    Recovered,
}

/// Beds held by living patients.
pub fn occupied_beds(agents: &[Agent]) -> BTreeSet<u32> {
    agents
        .iter()
        .filter(|a| a.alive)
        .filter_map(|a| a.state.hospital_bed())
        .collect()
}

/// Renderer view of the ward.
pub fn snapshot(capacity: u32, agents: &[Agent]) -> HospitalSnapshot {
    let beds = (0..capacity)
        .map(|bed| {
            agents
                .iter()
                .find(|a| a.alive && a.state.hospital_bed() == Some(bed))
                .map(|a| a.id)
        })
        .collect();
    HospitalSnapshot { capacity, beds }
}

/// Admit `patients` in order, each to the lowest free bed.
///
/// Patients beyond the free capacity are set `Burning` at the volcano
/// crater. Patients who are no longer alive are skipped.
pub fn admit(
    patients: &[AgentId],
    agents: &mut [Agent],
    town: &Town,
    behavior: &BehaviorConfig,
    log: &mut dyn EventSink,
) -> Admission {
    let capacity = town.landmarks.hospital_beds;
    let occupied = occupied_beds(agents);
    let mut free = (0..capacity).filter(|bed| !occupied.contains(bed));
    let mut admission = Admission::default();

    for id in patients {
        let Some(agent) = agents.iter_mut().find(|a| a.id == *id && a.alive) else {
            continue;
        };
        match free.next().and_then(|bed| Some((bed, town.landmarks.hospital_bed(bed)?))) {
            Some((bed, spot)) => {
                agent.place(
                    AgentState::InHospital {
                        bed,
                        days_until_death: None,
                    },
                    spot,
                );
                debug!(agent = %agent.name, bed, "Admitted");
                admission.admitted.push((agent.id, bed));
            }
            None => {
                agent.place(
                    AgentState::Burning {
                        remaining: behavior.burn_delay,
                    },
                    town.landmarks.volcano_crater(),
                );
                warn!(agent = %agent.name, "Hospital full, sent to the volcano");
                admission.overflow.push(agent.id);
            }
        }
    }

    if !admission.admitted.is_empty() {
        log.log(
            &format!(
                "Hospital admitted {} patient(s).",
                admission.admitted.len()
            ),
            Severity::Success,
        );
    }
    if !admission.overflow.is_empty() {
        log.log(
            &format!(
                "Hospital is full! {} patient(s) sacrificed to the volcano.",
                admission.overflow.len()
            ),
            Severity::Alert,
        );
    }
    admission
}

/// The minute-1 rounds: every living patient's fate for the day.
///
/// Patients on a delayed death only count down. Everyone else rolls
/// survival, then one disjoint outcome roll.
pub fn rounds(
    agents: &mut [Agent],
    town: &Town,
    hazards: &HazardConfig,
    chance: &mut dyn Chance,
    log: &mut dyn EventSink,
) -> Vec<(AgentId, RoundsOutcome)> {
    let mut outcomes = Vec::new();

    for agent in agents.iter_mut().filter(|a| a.alive) {
        let AgentState::InHospital {
            bed,
            days_until_death,
        } = agent.state
        else {
            continue;
        };

        let outcome = if let Some(days) = days_until_death {
            let days = days.saturating_sub(1);
            if days == 0 {
                let vacated = agent.die(town.landmarks.heaven_spot(chance));
                log.log(
                    &format!("{} passed away in the hospital.", agent.name),
                    Severity::Alert,
                );
                RoundsOutcome::Died { vacated }
            } else {
                agent.state = AgentState::InHospital {
                    bed,
                    days_until_death: Some(days),
                };
                RoundsOutcome::CountingDown { days }
            }
        } else if !chance.chance(hazards.hospital_survival) {
            let vacated = agent.die(town.landmarks.heaven_spot(chance));
            log.log(
                &format!("{} did not survive the night in the hospital.", agent.name),
                Severity::Alert,
            );
            RoundsOutcome::Died { vacated }
        } else {
            let roll = chance.roll();
            let wheelchair = hazards.wheelchair_chance;
            let arms = wheelchair + hazards.missing_arms_chance;
            let delayed = arms + hazards.delayed_death_chance;
            let exit = town.landmarks.hospital_exit();

            if roll < wheelchair {
                agent.inventory.has_wheelchair = true;
                agent.place(AgentState::Idle, exit);
                log.log(
                    &format!("{} left the hospital in a wheelchair.", agent.name),
                    Severity::Normal,
                );
                RoundsOutcome::Wheelchair
            } else if roll < arms {
                agent.inventory.missing_arms = true;
                agent.place(AgentState::Idle, exit);
                log.log(
                    &format!("{} left the hospital without arms.", agent.name),
                    Severity::Normal,
                );
                RoundsOutcome::MissingArms
            } else if roll < delayed {
                let days = hazards.delayed_death_days.max(1);
                agent.state = AgentState::InHospital {
                    bed,
                    days_until_death: Some(days),
                };
                log.log(
                    &format!("Doctors give {} only {days} days to live.", agent.name),
                    Severity::Alert,
                );
                RoundsOutcome::Terminal { days }
            } else {
                agent.place(AgentState::Idle, exit);
                log.log(
                    &format!("{} made a full recovery!", agent.name),
                    Severity::Success,
                );
                RoundsOutcome::Recovered
            }
        };
        outcomes.push((agent.id, outcome));
    }

    if !outcomes.is_empty() {
        info!(patients = outcomes.len(), "Hospital rounds done");
    }
    outcomes
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use paradise_world::{ScriptedChance, WorldParams};

    use super::*;
    use crate::event_log::RecentEvents;

    fn town() -> (Town, Vec<Agent>) {
        let mut chance = ScriptedChance::new([0.0]);
        let town = Town::generate(&WorldParams::default(), &mut chance).unwrap();
        let agents = town.residents.iter().map(Agent::from_resident).collect();
        (town, agents)
    }

    fn hospitalize(agent: &mut Agent, bed: u32, days: Option<u32>) {
        agent.state = AgentState::InHospital {
            bed,
            days_until_death: days,
        };
    }

    #[test]
    fn admission_takes_lowest_free_beds() {
        let (town, mut agents) = town();
        hospitalize(&mut agents[0], 0, None);
        hospitalize(&mut agents[1], 2, None);
        let mut log = RecentEvents::default();

        let patients = [agents[4].id, agents[5].id];
        let admission = admit(&patients, &mut agents, &town, &BehaviorConfig::default(), &mut log);
        assert_eq!(admission.admitted, vec![(agents[4].id, 1), (agents[5].id, 3)]);
        assert!(admission.overflow.is_empty());
        assert_eq!(agents[4].position, town.landmarks.hospital_bed(1).unwrap());
        assert_eq!(log.latest().unwrap().severity, Severity::Success);
    }

    #[test]
    fn dead_beds_are_free() {
        let (town, mut agents) = town();
        hospitalize(&mut agents[0], 0, None);
        agents[0].alive = false;
        assert!(occupied_beds(&agents).is_empty());
        let snap = snapshot(town.landmarks.hospital_beds, &agents);
        assert_eq!(snap.beds.len(), 8);
        assert!(snap.beds.iter().all(Option::is_none));
    }

    #[test]
    fn terminal_roll_keeps_patient_in_bed() {
        let (town, mut agents) = town();
        hospitalize(&mut agents[3], 5, None);
        // Survive, then land in the delayed-death band [0.40, 0.45).
        let mut chance = ScriptedChance::new([0.1, 0.42]);
        let mut log = RecentEvents::default();
        let outcomes = rounds(&mut agents, &town, &HazardConfig::default(), &mut chance, &mut log);
        assert_eq!(outcomes, vec![(agents[3].id, RoundsOutcome::Terminal { days: 2 })]);
        assert_eq!(
            agents[3].state,
            AgentState::InHospital {
                bed: 5,
                days_until_death: Some(2)
            }
        );

        // Next morning: counts down without rolling.
        let outcomes = rounds(&mut agents, &town, &HazardConfig::default(), &mut chance, &mut log);
        assert_eq!(outcomes[0].1, RoundsOutcome::CountingDown { days: 1 });
        assert_eq!(chance.remaining(), 0);
    }

    #[test]
    fn outcome_bands() {
        let hazards = HazardConfig::default();
        for (roll, expected) in [
            (0.0, RoundsOutcome::Wheelchair),
            (0.30, RoundsOutcome::MissingArms),
            (0.50, RoundsOutcome::Recovered),
        ] {
            let (town, mut agents) = town();
            hospitalize(&mut agents[1], 0, None);
            let mut chance = ScriptedChance::new([0.0, roll]);
            let outcomes = rounds(&mut agents, &town, &hazards, &mut chance, &mut RecentEvents::default());
            assert_eq!(outcomes[0].1, expected, "roll {roll}");
            assert_eq!(agents[1].state, AgentState::Idle);
            assert_eq!(agents[1].position, town.landmarks.hospital_exit());
        }
    }

    #[test]
    fn failed_survival_roll_kills() {
        let (town, mut agents) = town();
        hospitalize(&mut agents[0], 0, None);
        let mut chance = ScriptedChance::new([0.9]);
        let outcomes = rounds(&mut agents, &town, &HazardConfig::default(), &mut chance, &mut RecentEvents::default());
        // House 0 holds the teacher.
        assert_eq!(outcomes[0].1, RoundsOutcome::Died { vacated: Some(Job::Teacher) });
        assert!(!agents[0].alive);
        assert_eq!(agents[0].state, AgentState::Floating);
    }
}
