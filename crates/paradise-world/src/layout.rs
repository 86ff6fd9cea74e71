//! Building anchors and the spots residents walk to.
//!
//! Grid buildings sit in reserved cells of the house grid. Everything else
//! (beach, airport, hospital, coaster, island, heaven, volcano) is placed
//! around the grid, relative to its edges.
//!
//! Spot helpers that involve randomness take a [`Chance`] so that layout
//! jitter is reproducible under a seeded source.

use glam::Vec3;
use paradise_types::Job;
use serde::Serialize;

use crate::chance::Chance;

/// Fixed airport position, east of town.
pub const AIRPORT_POSITION: Vec3 = Vec3::new(120.0, 0.0, 0.0);

/// Number of school desks (a 5x5 block).
pub const SCHOOL_DESKS: u32 = 25;

/// Sand-castle spots per beach row and column.
const BEACH_GRID: u32 = 9;

/// Distance between sand-castle spots.
const BEACH_SPOT_SPACING: f32 = 2.5;

/// Hospital beds per ward row.
const BEDS_PER_ROW: u32 = 4;

/// Centre and reach of the grid the anchors are derived from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridFrame {
    /// Rows in the grid.
    pub rows: u32,
    /// Columns in the grid.
    pub cols: u32,
    /// Distance between neighbouring cells.
    pub spacing: f32,
}

impl GridFrame {
    /// X of the first column.
    pub fn start_x(&self) -> f32 {
        -(index_f32(self.cols.saturating_sub(1)) * self.spacing) / 2.0
    }

    /// Z of the first row.
    pub fn start_z(&self) -> f32 {
        -(index_f32(self.rows.saturating_sub(1)) * self.spacing) / 2.0
    }

    /// World position of cell `(row, col)`.
    pub fn cell(&self, row: u32, col: u32) -> Vec3 {
        Vec3::new(
            self.start_x() + index_f32(col) * self.spacing,
            0.0,
            self.start_z() + index_f32(row) * self.spacing,
        )
    }

    /// Row of the ice-cream shop (the centre cell).
    pub const fn centre_row(&self) -> u32 {
        self.rows / 2
    }

    /// Column of the ice-cream shop (the centre cell).
    pub const fn centre_col(&self) -> u32 {
        self.cols / 2
    }

    /// Whether `(row, col)` holds a grid building instead of a house.
    pub const fn is_reserved(&self, row: u32, col: u32) -> bool {
        let last_row = self.rows.saturating_sub(1);
        let last_col = self.cols.saturating_sub(1);
        (row == self.centre_row() && col == self.centre_col())
            || (row == 0 && col == 0)
            || (row == last_row && col == last_col)
            || (row == 0 && col == last_col)
            || (row == last_row && col == 0)
    }
}

/// Small grid indices convert to `f32` exactly.
#[allow(clippy::cast_precision_loss)]
pub(crate) const fn index_f32(index: u32) -> f32 {
    index as f32
}

/// Anchor positions of every building in town.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Landmarks {
    /// Ice-cream shop, centre of town.
    pub shop: Vec3,
    /// School, first cell.
    pub school: Vec3,
    /// Park, last cell.
    pub park: Vec3,
    /// Grocery store, end of the first row.
    pub store: Vec3,
    /// Arcade, start of the last row.
    pub arcade: Vec3,
    /// Beach, beyond the south-west corner.
    pub beach: Vec3,
    /// Airport, east of town.
    pub airport: Vec3,
    /// Hospital, north of town.
    pub hospital: Vec3,
    /// Origin of the rollercoaster track.
    pub coaster: Vec3,
    /// Centre of the vacation island.
    pub island: Vec3,
    /// Centre of heaven, high above town.
    pub heaven: Vec3,
    /// Volcano base.
    pub volcano: Vec3,
    /// Number of hospital beds laid out in the ward.
    pub hospital_beds: u32,
}

impl Landmarks {
    /// Lay out every anchor around a grid.
    pub fn around(frame: &GridFrame, hospital_beds: u32) -> Self {
        let last_row = frame.rows.saturating_sub(1);
        let last_col = frame.cols.saturating_sub(1);
        let start_x = frame.start_x();
        let start_z = frame.start_z();
        let end_x = frame.cell(0, last_col).x;
        let end_z = frame.cell(last_row, 0).z;

        Self {
            shop: frame.cell(frame.centre_row(), frame.centre_col()),
            school: frame.cell(0, 0),
            park: frame.cell(last_row, last_col),
            store: frame.cell(0, last_col),
            arcade: frame.cell(last_row, 0),
            beach: Vec3::new(start_x - 30.0, 0.0, end_z + 30.0),
            airport: AIRPORT_POSITION,
            hospital: Vec3::new(0.0, 0.0, start_z - 45.0),
            coaster: Vec3::new(end_x + 60.0, 0.0, end_z + 50.0),
            island: Vec3::new(0.0, 0.0, start_z - 260.0),
            heaven: Vec3::new(0.0, 120.0, 0.0),
            volcano: Vec3::new(start_x - 80.0, 0.0, start_z - 60.0),
            hospital_beds,
        }
    }

    /// Where the holder of `job` works. `number` is the holder's household
    /// number and picks the cashier's register.
    pub fn job_post(&self, job: Job, number: u32) -> Vec3 {
        match job {
            Job::Teacher => self.teacher_spot(),
            Job::Cashier => self.register(number),
            Job::Doctor => self.doctor_station(),
        }
    }

    // -- School ------------------------------------------------------------

    /// Desk for child number `n`. Desks repeat after 25 children.
    pub fn school_desk(&self, n: u32) -> Vec3 {
        let desk = n % SCHOOL_DESKS;
        let row = index_f32(desk / 5);
        let col = index_f32(desk % 5);
        self.school + Vec3::new(-6.0 + 3.0 * col, 0.0, -4.0 + 2.5 * row + 0.75)
    }

    /// Where the teacher stands.
    pub fn teacher_spot(&self) -> Vec3 {
        self.school + Vec3::new(0.0, 0.0, -7.0)
    }

    // -- Store -------------------------------------------------------------

    /// The two store registers.
    pub fn registers(&self) -> [Vec3; 2] {
        [
            self.store + Vec3::new(8.0, 0.0, -5.0),
            self.store + Vec3::new(4.0, 0.0, -5.0),
        ]
    }

    /// Register `n % 2`.
    pub fn register(&self, n: u32) -> Vec3 {
        let [first, second] = self.registers();
        if n % 2 == 0 { first } else { second }
    }

    /// A random register.
    pub fn random_register(&self, chance: &mut dyn Chance) -> Vec3 {
        let [first, second] = self.registers();
        if chance.chance(0.5) { first } else { second }
    }

    /// A random shelf point within 6 units of the store centre.
    pub fn shelf_spot(&self, chance: &mut dyn Chance) -> Vec3 {
        self.store + Vec3::new(chance.spread(12.0), 0.0, chance.spread(12.0))
    }

    // -- Leisure -----------------------------------------------------------

    /// Ice-cream counter.
    pub const fn shop_counter(&self) -> Vec3 {
        self.shop
    }

    /// A random sand-castle spot on the 9x9 beach grid.
    pub fn beach_spot(&self, chance: &mut dyn Chance) -> Vec3 {
        let spots = usize::try_from(BEACH_GRID.saturating_mul(BEACH_GRID)).unwrap_or(81);
        let index = chance
            .pick(spots)
            .and_then(|i| u32::try_from(i).ok())
            .unwrap_or(0);
        let row = index_f32(index / BEACH_GRID);
        let col = index_f32(index % BEACH_GRID);
        self.beach
            + Vec3::new(
                -10.0 + col * BEACH_SPOT_SPACING,
                0.0,
                -10.0 + row * BEACH_SPOT_SPACING,
            )
    }

    /// Where a player stands in front of each claw machine.
    pub fn claw_spots(&self) -> [Vec3; 3] {
        [-4.0, 0.0, 4.0].map(|z| self.arcade + Vec3::new(-5.0, 0.0, z))
    }

    /// A random claw machine.
    pub fn random_claw_spot(&self, chance: &mut dyn Chance) -> Vec3 {
        let spots = self.claw_spots();
        let index = chance.pick(spots.len()).unwrap_or(0);
        spots.get(index).copied().unwrap_or(self.arcade)
    }

    /// A random point within 4 units of the park centre.
    pub fn park_spot(&self, chance: &mut dyn Chance) -> Vec3 {
        self.park + Vec3::new(chance.spread(8.0), 0.0, chance.spread(8.0))
    }

    /// Queue point next to the coaster boarding platform.
    pub fn coaster_queue(&self) -> Vec3 {
        self.coaster + Vec3::new(34.0, 0.0, 34.0)
    }

    // -- Airport -----------------------------------------------------------

    /// Terminal building.
    pub fn terminal(&self) -> Vec3 {
        self.airport + Vec3::new(15.0, 0.0, 10.0)
    }

    /// Check-in desk, jittered by up to half a unit.
    pub fn check_in(&self, chance: &mut dyn Chance) -> Vec3 {
        self.terminal() + Vec3::new(-4.0, 0.0, 6.0) + jitter(chance, 1.0, 1.0)
    }

    /// Security line, jittered by up to half a unit.
    pub fn security(&self, chance: &mut dyn Chance) -> Vec3 {
        self.terminal() + Vec3::new(4.0, 0.0, 4.0) + jitter(chance, 1.0, 1.0)
    }

    /// Gate seating, spread along 3 units of bench.
    pub fn gate(&self, chance: &mut dyn Chance) -> Vec3 {
        self.terminal() + Vec3::new(0.0, 0.0, -4.0) + jitter(chance, 3.0, 1.0)
    }

    /// Where returning travellers walk out of the terminal.
    pub fn terminal_exit(&self) -> Vec3 {
        self.terminal() + Vec3::new(0.0, 0.0, 10.0)
    }

    /// End of the runway, where a crashed plane comes to rest.
    pub fn runway_end(&self) -> Vec3 {
        self.airport + Vec3::new(0.0, 0.0, -40.0)
    }

    /// A random point on the vacation island.
    pub fn island_spot(&self, chance: &mut dyn Chance) -> Vec3 {
        self.island + Vec3::new(chance.spread(30.0), 0.0, chance.spread(30.0))
    }

    // -- Hospital ----------------------------------------------------------

    /// Bed `index` in the ward, or `None` past capacity.
    pub fn hospital_bed(&self, index: u32) -> Option<Vec3> {
        if index >= self.hospital_beds {
            return None;
        }
        let row = index_f32(index / BEDS_PER_ROW);
        let col = index_f32(index % BEDS_PER_ROW);
        Some(self.hospital + Vec3::new(-9.0 + 6.0 * col, 1.0, -4.0 + 8.0 * row))
    }

    /// Where the doctor stands.
    pub fn doctor_station(&self) -> Vec3 {
        self.hospital + Vec3::new(-4.0, 0.0, 3.0)
    }

    /// Where discharged patients step out.
    pub fn hospital_exit(&self) -> Vec3 {
        self.hospital + Vec3::new(0.0, 0.0, 14.0)
    }

    /// Where the ambulance parks.
    pub fn ambulance_bay(&self) -> Vec3 {
        self.hospital + Vec3::new(10.0, 0.0, 14.0)
    }

    // -- Afterlife ---------------------------------------------------------

    /// A random cloud in heaven.
    pub fn heaven_spot(&self, chance: &mut dyn Chance) -> Vec3 {
        self.heaven + Vec3::new(chance.spread(40.0), chance.spread(6.0), chance.spread(40.0))
    }

    /// The crater rim, where overflow patients are sacrificed.
    pub fn volcano_crater(&self) -> Vec3 {
        self.volcano + Vec3::new(0.0, 18.0, 0.0)
    }
}

fn jitter(chance: &mut dyn Chance, width_x: f32, width_z: f32) -> Vec3 {
    Vec3::new(chance.spread(width_x), 0.0, chance.spread(width_z))
}
