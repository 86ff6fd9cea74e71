//! Injectable randomness.
//!
//! Every probability roll in the simulation (leisure brackets, crash and
//! survival rolls, lottery draws, layout jitter) goes through a [`Chance`]
//! source. Production runs use [`RngChance`]; tests either seed it or
//! replay exact rolls through [`ScriptedChance`].

use std::collections::VecDeque;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// A source of uniform rolls in `[0, 1)`.
pub trait Chance {
    /// Draw a uniform value in `[0, 1)`.
    fn roll(&mut self) -> f64;

    /// Return `true` with probability `p`.
    fn chance(&mut self, p: f64) -> bool {
        self.roll() < p
    }

    /// Pick a uniform index in `0..len`, or `None` when `len` is zero.
    fn pick(&mut self, len: usize) -> Option<usize> {
        let last = len.checked_sub(1)?;
        #[allow(
            clippy::cast_precision_loss,
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss
        )]
        let index = (self.roll() * len as f64).floor() as usize;
        Some(index.min(last))
    }

    /// A uniform offset in `[-width / 2, width / 2)`.
    #[allow(clippy::cast_possible_truncation)]
    fn spread(&mut self, width: f32) -> f32 {
        (self.roll() as f32 - 0.5) * width
    }
}

/// [`Chance`] backed by a small, fast PRNG.
#[derive(Debug, Clone)]
pub struct RngChance {
    rng: SmallRng,
}

impl RngChance {
    /// A generator seeded from OS entropy. Every run differs.
    pub fn from_entropy() -> Self {
        Self {
            rng: SmallRng::from_os_rng(),
        }
    }

    /// A reproducible generator.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Seeded when `seed` is set, entropy otherwise.
    pub fn new(seed: Option<u64>) -> Self {
        seed.map_or_else(Self::from_entropy, Self::from_seed)
    }
}

impl Chance for RngChance {
    fn roll(&mut self) -> f64 {
        self.rng.random::<f64>()
    }
}

/// [`Chance`] that replays a fixed script of rolls.
///
/// Once the script runs out every further roll returns `fallback`.
#[derive(Debug, Clone)]
pub struct ScriptedChance {
    rolls: VecDeque<f64>,
    fallback: f64,
}

impl ScriptedChance {
    /// Replay `rolls` in order, then return `0.99` forever.
    pub fn new(rolls: impl IntoIterator<Item = f64>) -> Self {
        Self::with_fallback(rolls, 0.99)
    }

    /// Replay `rolls` in order, then return `fallback` forever.
    pub fn with_fallback(rolls: impl IntoIterator<Item = f64>, fallback: f64) -> Self {
        Self {
            rolls: rolls.into_iter().collect(),
            fallback,
        }
    }

    /// Append more rolls to the end of the script.
    pub fn extend(&mut self, rolls: impl IntoIterator<Item = f64>) {
        self.rolls.extend(rolls);
    }

    /// Number of scripted rolls not yet consumed.
    pub fn remaining(&self) -> usize {
        self.rolls.len()
    }
}

impl Chance for ScriptedChance {
    fn roll(&mut self) -> f64 {
        self.rolls.pop_front().unwrap_or(self.fallback)
    }
}
