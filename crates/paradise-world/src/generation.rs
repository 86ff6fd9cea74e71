//! Town generation.
//!
//! Lays out the house grid, furnishes every house, moves one parent and
//! one child into each, and hands out the three starting jobs.

use glam::Vec3;
use paradise_types::{AgentId, HouseId, Job, Role};
use serde::Serialize;
use tracing::{debug, info};

use crate::chance::Chance;
use crate::error::WorldError;
use crate::house::House;
use crate::layout::{GridFrame, Landmarks};
use crate::track::CoasterTrack;

/// Default house palette.
pub const DEFAULT_PALETTE: [&str; 8] = [
    "#ef4444", // red
    "#3b82f6", // blue
    "#22c55e", // green
    "#eab308", // yellow
    "#a855f7", // purple
    "#ec4899", // pink
    "#f97316", // orange
    "#06b6d4", // cyan
];

/// Parents all wear the same dark shirt.
pub const PARENT_COLOR: &str = "#333333";

/// Inputs to world generation.
#[derive(Debug, Clone, PartialEq)]
pub struct WorldParams {
    /// Grid rows.
    pub rows: u32,
    /// Grid columns.
    pub cols: u32,
    /// Distance between cell centres.
    pub spacing: f32,
    /// House colours, assigned round-robin.
    pub palette: Vec<String>,
    /// Hospital ward size.
    pub hospital_beds: u32,
}

impl Default for WorldParams {
    fn default() -> Self {
        Self {
            rows: 5,
            cols: 5,
            spacing: 25.0,
            palette: DEFAULT_PALETTE.iter().map(|c| (*c).to_owned()).collect(),
            hospital_beds: 8,
        }
    }
}

/// A resident as created at world generation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Resident {
    /// Resident identifier.
    pub id: AgentId,
    /// Display name, `parent-N` or `child-N`.
    pub name: String,
    /// Household role.
    pub role: Role,
    /// Home house.
    pub home: HouseId,
    /// Household number `N`.
    pub number: u32,
    /// Shirt colour.
    pub color: String,
    /// Spawn point in front of the house.
    pub spawn: Vec3,
    /// Starting job, parents only.
    pub job: Option<Job>,
}

/// The generated town.
#[derive(Debug, Clone)]
pub struct Town {
    /// Grid the town was laid out on.
    pub frame: GridFrame,
    /// Houses in generation order. `houses[n].id == HouseId(n)`.
    pub houses: Vec<House>,
    /// Residents in generation order, parent then child per house.
    pub residents: Vec<Resident>,
    /// Building anchors.
    pub landmarks: Landmarks,
    /// Coaster loop.
    pub track: CoasterTrack,
}

impl Town {
    /// Generate a town. `chance` picks the teacher's house.
    pub fn generate(params: &WorldParams, chance: &mut dyn Chance) -> Result<Self, WorldError> {
        validate(params)?;

        let frame = GridFrame {
            rows: params.rows,
            cols: params.cols,
            spacing: params.spacing,
        };
        let landmarks = Landmarks::around(&frame, params.hospital_beds);
        let track = CoasterTrack::new(landmarks.coaster);

        let mut houses = Vec::new();
        for row in 0..frame.rows {
            for col in 0..frame.cols {
                if frame.is_reserved(row, col) {
                    continue;
                }
                let number = u32::try_from(houses.len()).unwrap_or(u32::MAX);
                let color = params
                    .palette
                    .get(houses.len() % params.palette.len())
                    .cloned()
                    .ok_or(WorldError::EmptyPalette)?;
                houses.push(House::new(HouseId::new(number), frame.cell(row, col), color));
            }
        }

        let jobs = starting_jobs(houses.len(), chance);
        let mut residents = Vec::with_capacity(houses.len().saturating_mul(2));
        for house in &houses {
            let number = house.id.index();
            let job = jobs
                .iter()
                .rev()
                .find(|(index, _)| *index == house_index(house.id))
                .map(|(_, job)| *job);
            let base = number.saturating_mul(2);

            residents.push(Resident {
                id: AgentId::new(base),
                name: format!("parent-{number}"),
                role: Role::Parent,
                home: house.id,
                number,
                color: PARENT_COLOR.to_owned(),
                spawn: house.position + Vec3::new(-1.0, 0.0, 4.0),
                job,
            });
            residents.push(Resident {
                id: AgentId::new(base.saturating_add(1)),
                name: format!("child-{number}"),
                role: Role::Child,
                home: house.id,
                number,
                color: house.color.clone(),
                spawn: house.position + Vec3::new(1.0, 0.0, 4.0),
                job: None,
            });
        }

        for resident in residents.iter().filter(|r| r.job.is_some()) {
            debug!(resident = %resident.name, job = ?resident.job, "Starting job assigned");
        }
        info!(
            houses = houses.len(),
            residents = residents.len(),
            "Town generated"
        );

        Ok(Self {
            frame,
            houses,
            residents,
            landmarks,
            track,
        })
    }

    /// Look up a house.
    pub fn house(&self, id: HouseId) -> Option<&House> {
        self.houses.get(house_index(id))
    }

    /// Look up a house, failing with [`WorldError::HouseNotFound`].
    pub fn require_house(&self, id: HouseId) -> Result<&House, WorldError> {
        self.house(id).ok_or(WorldError::HouseNotFound(id))
    }

    /// Look up a resident.
    pub fn resident(&self, id: AgentId) -> Option<&Resident> {
        self.residents.iter().find(|r| r.id == id)
    }

    /// Look up a resident, failing with [`WorldError::ResidentNotFound`].
    pub fn require_resident(&self, id: AgentId) -> Result<&Resident, WorldError> {
        self.resident(id).ok_or(WorldError::ResidentNotFound(id))
    }
}

fn validate(params: &WorldParams) -> Result<(), WorldError> {
    if params.rows < 3 || params.cols < 3 {
        return Err(WorldError::GridTooSmall {
            rows: params.rows,
            cols: params.cols,
        });
    }
    if !params.spacing.is_finite() || params.spacing <= 0.0 {
        return Err(WorldError::InvalidSpacing(params.spacing));
    }
    if params.palette.is_empty() {
        return Err(WorldError::EmptyPalette);
    }
    Ok(())
}

fn house_index(id: HouseId) -> usize {
    usize::try_from(id.index()).unwrap_or(usize::MAX)
}

/// Teacher in a random house, cashier next door, doctor after that. On very
/// small grids later jobs overwrite earlier ones in the same house.
fn starting_jobs(house_count: usize, chance: &mut dyn Chance) -> Vec<(usize, Job)> {
    let Some(teacher) = chance.pick(house_count) else {
        return Vec::new();
    };
    Job::ALL
        .iter()
        .zip(0_usize..)
        .map(|(job, step)| (teacher.wrapping_add(step) % house_count, *job))
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::chance::{RngChance, ScriptedChance};

    #[test]
    fn default_town_has_twenty_houses() {
        let mut chance = RngChance::from_seed(42);
        let town = Town::generate(&WorldParams::default(), &mut chance).unwrap();
        assert_eq!(town.houses.len(), 20);
        assert_eq!(town.residents.len(), 40);
        for (n, house) in town.houses.iter().enumerate() {
            assert_eq!(house_index(house.id), n);
        }
    }

    #[test]
    fn each_job_has_exactly_one_holder() {
        let mut chance = RngChance::from_seed(7);
        let town = Town::generate(&WorldParams::default(), &mut chance).unwrap();
        for job in Job::ALL {
            let holders = town.residents.iter().filter(|r| r.job == Some(job)).count();
            assert_eq!(holders, 1, "{job} should have one holder");
        }
        assert!(
            town.residents
                .iter()
                .filter(|r| r.job.is_some())
                .all(|r| r.role == Role::Parent)
        );
    }

    #[test]
    fn jobs_go_to_consecutive_houses() {
        // 0.97 * 20 picks house 19; cashier and doctor wrap to 0 and 1.
        let mut chance = ScriptedChance::new([0.97]);
        let town = Town::generate(&WorldParams::default(), &mut chance).unwrap();
        let holder = |job| {
            town.residents
                .iter()
                .find(|r| r.job == Some(job))
                .map(|r| r.number)
        };
        assert_eq!(holder(Job::Teacher), Some(19));
        assert_eq!(holder(Job::Cashier), Some(0));
        assert_eq!(holder(Job::Doctor), Some(1));
    }

    #[test]
    fn children_wear_the_house_colour() {
        let mut chance = ScriptedChance::new([0.0]);
        let town = Town::generate(&WorldParams::default(), &mut chance).unwrap();
        let child = town.residents.iter().find(|r| r.name == "child-9").unwrap();
        let house = town.house(child.home).unwrap();
        assert_eq!(child.color, house.color);
        assert_eq!(house.color, DEFAULT_PALETTE[1]);
    }

    #[test]
    fn rejects_tiny_grids_and_bad_spacing() {
        let mut chance = ScriptedChance::new([]);
        let tiny = WorldParams {
            rows: 2,
            ..WorldParams::default()
        };
        assert!(matches!(
            Town::generate(&tiny, &mut chance),
            Err(WorldError::GridTooSmall { rows: 2, cols: 5 })
        ));
        let flat = WorldParams {
            spacing: 0.0,
            ..WorldParams::default()
        };
        assert!(Town::generate(&flat, &mut chance).is_err());
        let bare = WorldParams {
            palette: Vec::new(),
            ..WorldParams::default()
        };
        assert!(matches!(
            Town::generate(&bare, &mut chance),
            Err(WorldError::EmptyPalette)
        ));
    }

    #[test]
    fn lookups_fail_cleanly() {
        let mut chance = ScriptedChance::new([0.0]);
        let town = Town::generate(&WorldParams::default(), &mut chance).unwrap();
        assert!(town.require_house(HouseId::new(99)).is_err());
        assert!(town.require_resident(AgentId::new(999)).is_err());
        assert_eq!(town.require_resident(AgentId::new(1)).unwrap().name, "child-0");
    }
}
