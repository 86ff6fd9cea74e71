//! The job board: who holds the teacher, cashier, and doctor posts.
//!
//! Like the hospital ward, the board is derived from the roster. A job is
//! held by whichever living resident has it in their `job` field. Every
//! change happens inside one call, so no frame ever sees two holders or a
//! half-finished transfer.

use paradise_agents::Agent;
use paradise_types::{AgentId, HouseId, Job, Role, Severity};
use paradise_world::Chance;
use tracing::info;

use crate::event_log::EventSink;

/// Living holder of `job`.
pub fn holder(agents: &[Agent], job: Job) -> Option<AgentId> {
    agents
        .iter()
        .find(|a| a.alive && a.job == Some(job))
        .map(|a| a.id)
}

/// Hand a vacant `job` to a random eligible parent.
///
/// Eligible: alive, a parent, no job yet, and not from `excluded`. Does
/// nothing if someone alive already holds the job. Returns the new holder.
pub fn fill_vacancy(
    job: Job,
    excluded: Option<HouseId>,
    agents: &mut [Agent],
    chance: &mut dyn Chance,
    log: &mut dyn EventSink,
) -> Option<AgentId> {
    if holder(agents, job).is_some() {
        return None;
    }

    let candidates: Vec<usize> = agents
        .iter()
        .enumerate()
        .filter(|(_, a)| {
            a.alive && a.role == Role::Parent && a.job.is_none() && Some(a.home) != excluded
        })
        .map(|(i, _)| i)
        .collect();

    let chosen = chance
        .pick(candidates.len())
        .and_then(|i| candidates.get(i).copied())
        .and_then(|i| agents.get_mut(i));

    if let Some(replacement) = chosen {
        replacement.job = Some(job);
        info!(agent = %replacement.name, %job, "Job reassigned");
        log.log(
            &format!("Hired {} as new {job}.", replacement.name),
            Severity::Normal,
        );
        Some(replacement.id)
    } else {
        info!(%job, "Job left vacant");
        log.log(
            "No replacements found! Store/School might be closed.",
            Severity::Alert,
        );
        None
    }
}

/// Take the job away from a parent leaving on a trip and find a stand-in
/// from another household.
pub fn cover_for_traveler(
    traveler: AgentId,
    agents: &mut [Agent],
    chance: &mut dyn Chance,
    log: &mut dyn EventSink,
) -> Option<AgentId> {
    let agent = agents.iter_mut().find(|a| a.id == traveler && a.alive)?;
    let job = agent.job.take()?;
    let home = agent.home;
    log.log(
        &format!("Alert: {job} is going on vacation. Finding replacement..."),
        Severity::Alert,
    );
    fill_vacancy(job, Some(home), agents, chance, log)
}

/// Find a successor for a job left by a death.
///
/// Parents of the household on a trip (`away`) are not asked.
pub fn replace_deceased(
    job: Job,
    away: Option<HouseId>,
    agents: &mut [Agent],
    chance: &mut dyn Chance,
    log: &mut dyn EventSink,
) -> Option<AgentId> {
    log.log(
        &format!("Alert: the {job} has died. Finding replacement..."),
        Severity::Alert,
    );
    fill_vacancy(job, away, agents, chance, log)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use paradise_world::{ScriptedChance, Town, WorldParams};

    use super::*;
    use crate::event_log::RecentEvents;

    fn agents() -> Vec<Agent> {
        // Teacher in house 0, cashier in 1, doctor in 2.
        let mut chance = ScriptedChance::new([0.0]);
        let town = Town::generate(&WorldParams::default(), &mut chance).unwrap();
        town.residents.iter().map(Agent::from_resident).collect()
    }

    #[test]
    fn starting_holders() {
        let agents = agents();
        assert_eq!(holder(&agents, Job::Teacher), Some(AgentId::new(0)));
        assert_eq!(holder(&agents, Job::Cashier), Some(AgentId::new(2)));
        assert_eq!(holder(&agents, Job::Doctor), Some(AgentId::new(4)));
    }

    #[test]
    fn traveler_job_moves_to_another_household() {
        let mut agents = agents();
        let mut log = RecentEvents::default();
        // Jobless parents live in houses 3 to 19; roll 0 picks house 3.
        let mut chance = ScriptedChance::new([0.0]);
        let hired = cover_for_traveler(AgentId::new(0), &mut agents, &mut chance, &mut log);
        assert_eq!(hired, Some(AgentId::new(6)));
        assert_eq!(agents[0].job, None);
        assert_eq!(agents[6].job, Some(Job::Teacher));
        let holders: Vec<_> = agents.iter().filter(|a| a.job == Some(Job::Teacher)).collect();
        assert_eq!(holders.len(), 1);
        assert_eq!(log.latest().unwrap().message, "Hired parent-3 as new TEACHER.");
    }

    #[test]
    fn no_candidate_leaves_post_empty() {
        let mut agents = agents();
        for agent in agents.iter_mut().filter(|a| a.job.is_none() && a.role == Role::Parent) {
            agent.alive = false;
        }
        let mut log = RecentEvents::default();
        let mut chance = ScriptedChance::new([0.0]);
        assert_eq!(
            cover_for_traveler(AgentId::new(2), &mut agents, &mut chance, &mut log),
            None
        );
        assert_eq!(holder(&agents, Job::Cashier), None);
        assert_eq!(log.latest().unwrap().severity, Severity::Alert);
    }

    #[test]
    fn held_job_is_not_refilled() {
        let mut agents = agents();
        let mut chance = ScriptedChance::new([0.0]);
        let mut log = RecentEvents::default();
        assert_eq!(
            fill_vacancy(Job::Doctor, None, &mut agents, &mut chance, &mut log),
            None
        );
        assert!(log.is_empty());
        assert_eq!(chance.remaining(), 1);
    }

    #[test]
    fn deceased_job_goes_to_anyone_free() {
        let mut agents = agents();
        let vacated = agents[4].die(glam::Vec3::Y);
        let mut chance = ScriptedChance::new([0.0]);
        let hired = replace_deceased(
            vacated.unwrap(),
            None,
            &mut agents,
            &mut chance,
            &mut RecentEvents::default(),
        );
        assert_eq!(hired, Some(AgentId::new(6)));
    }

    #[test]
    fn deceased_job_skips_the_household_on_vacation() {
        let mut agents = agents();
        let vacated = agents[4].die(glam::Vec3::Y);
        // Roll 0 would pick house 3; with house 3 away it picks house 4.
        let mut chance = ScriptedChance::new([0.0]);
        let hired = replace_deceased(
            vacated.unwrap(),
            Some(HouseId::new(3)),
            &mut agents,
            &mut chance,
            &mut RecentEvents::default(),
        );
        assert_eq!(hired, Some(AgentId::new(8)));
        assert_eq!(agents[6].job, None);
        assert_eq!(agents[8].job, Some(Job::Doctor));
    }
}
