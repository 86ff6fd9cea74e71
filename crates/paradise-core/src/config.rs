//! Configuration loading and typed config structures for the simulation.
//!
//! The configuration lives in a YAML file (by default `paradise-config.yaml`
//! next to the binary). Every section and every field has a default, so an
//! empty file is a valid configuration.
//!
//! Sections:
//!
//! | Section     | Struct              | Contents                               |
//! |-------------|---------------------|----------------------------------------|
//! | `world`     | [`WorldConfig`]     | seed, house grid, palette              |
//! | `behavior`  | [`BehaviorConfig`]  | speeds, hold timers, leisure odds      |
//! | `hazards`   | [`HazardConfig`]    | crash and survival probabilities       |
//! | `resources` | [`ResourceConfig`]  | beds, seats, cooldowns, ambulance      |
//! | `engine`    | [`EngineConfig`]    | frame rate, time bound, feed size      |
//! | `logging`   | [`LoggingConfig`]   | tracing filter                         |

use std::path::Path;

use paradise_agents::BehaviorConfig;
use paradise_world::{DEFAULT_PALETTE, WorldParams};
use serde::Deserialize;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// The YAML parsed but a value is out of range.
    #[error("invalid configuration: {reason}")]
    Invalid {
        /// Which value is wrong and why.
        reason: String,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level simulation configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SimulationConfig {
    /// Seed and town layout.
    #[serde(default)]
    pub world: WorldConfig,

    /// Resident behaviour tuning.
    #[serde(default)]
    pub behavior: BehaviorConfig,

    /// Crash and medical odds.
    #[serde(default)]
    pub hazards: HazardConfig,

    /// Shared-resource sizes and timers.
    #[serde(default)]
    pub resources: ResourceConfig,

    /// Frame loop settings.
    #[serde(default)]
    pub engine: EngineConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl SimulationConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// `PARADISE_SEED` overrides `world.seed` when set to an integer.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::Yaml`] if the content is not valid YAML, or
    /// [`ConfigError::Invalid`] if a value is out of range.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML, or
    /// [`ConfigError::Invalid`] if a value is out of range.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let mut config: Self = if yaml.trim().is_empty() {
            Self::default()
        } else {
            serde_yml::from_str(yaml)?
        };
        config.world.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Check every value that would make the simulation meaningless.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first bad value.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let h = &self.hazards;
        for (name, p) in [
            ("hazards.coaster_crash_chance", h.coaster_crash_chance),
            ("hazards.coaster_survival", h.coaster_survival),
            ("hazards.flight_crash_chance", h.flight_crash_chance),
            ("hazards.plane_survival", h.plane_survival),
            ("hazards.hospital_survival", h.hospital_survival),
            ("hazards.wheelchair_chance", h.wheelchair_chance),
            ("hazards.missing_arms_chance", h.missing_arms_chance),
            ("hazards.delayed_death_chance", h.delayed_death_chance),
            ("behavior.night_arcade_chance", self.behavior.night_arcade_chance),
        ] {
            probability(name, p)?;
        }
        let outcomes = h.wheelchair_chance + h.missing_arms_chance + h.delayed_death_chance;
        if outcomes > 1.0 {
            return Err(invalid(format!(
                "hazards: wheelchair, missing arms and delayed death add up to {outcomes}, above 1"
            )));
        }

        let r = &self.resources;
        if r.hospital_beds == 0 {
            return Err(invalid("resources.hospital_beds must be at least 1".to_owned()));
        }
        if r.coaster_seats == 0 {
            return Err(invalid("resources.coaster_seats must be at least 1".to_owned()));
        }
        for (name, value) in [
            ("resources.ambulance_speed", r.ambulance_speed),
            ("resources.ambulance_arrival_radius", r.ambulance_arrival_radius),
            ("behavior.parent_speed", self.behavior.parent_speed),
            ("behavior.child_speed", self.behavior.child_speed),
            ("behavior.wheelchair_speed", self.behavior.wheelchair_speed),
            ("behavior.reference_fps", self.behavior.reference_fps),
            ("behavior.arrival_radius", self.behavior.arrival_radius),
            ("world.grid_spacing", self.world.grid_spacing),
        ] {
            positive(name, value)?;
        }
        if self.engine.frame_rate == 0 {
            return Err(invalid("engine.frame_rate must be at least 1".to_owned()));
        }
        if self.engine.feed_capacity == 0 {
            return Err(invalid("engine.feed_capacity must be at least 1".to_owned()));
        }
        Ok(())
    }

    /// World generation inputs derived from `world` and `resources`.
    pub fn world_params(&self) -> WorldParams {
        WorldParams {
            rows: self.world.grid_rows,
            cols: self.world.grid_cols,
            spacing: self.world.grid_spacing,
            palette: self.world.palette.clone(),
            hospital_beds: self.resources.hospital_beds,
        }
    }
}

fn invalid(reason: String) -> ConfigError {
    ConfigError::Invalid { reason }
}

fn probability(name: &str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(invalid(format!("{name} must be within [0, 1], got {value}")))
    }
}

fn positive(name: &str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(invalid(format!("{name} must be positive, got {value}")))
    }
}

// ---------------------------------------------------------------------------
// world
// ---------------------------------------------------------------------------

/// Seed and town layout.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WorldConfig {
    /// Random seed. Absent means every run differs.
    #[serde(default)]
    pub seed: Option<u64>,

    /// House grid rows, including the five reserved building cells.
    #[serde(default = "default_grid_rows")]
    pub grid_rows: u32,

    /// House grid columns.
    #[serde(default = "default_grid_cols")]
    pub grid_cols: u32,

    /// Distance between grid cell centres.
    #[serde(default = "default_grid_spacing")]
    pub grid_spacing: f32,

    /// House colours, assigned round-robin.
    #[serde(default = "default_palette")]
    pub palette: Vec<String>,
}

impl WorldConfig {
    /// Apply environment variable overrides.
    ///
    /// - `PARADISE_SEED` overrides `seed` when it parses as a `u64`
    pub fn apply_env_overrides(&mut self) {
        if let Some(seed) = std::env::var("PARADISE_SEED")
            .ok()
            .and_then(|val| val.trim().parse::<u64>().ok())
        {
            self.seed = Some(seed);
        }
    }
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            seed: None,
            grid_rows: default_grid_rows(),
            grid_cols: default_grid_cols(),
            grid_spacing: default_grid_spacing(),
            palette: default_palette(),
        }
    }
}

const fn default_grid_rows() -> u32 {
    5
}

const fn default_grid_cols() -> u32 {
    5
}

const fn default_grid_spacing() -> f32 {
    25.0
}

fn default_palette() -> Vec<String> {
    DEFAULT_PALETTE.iter().map(|c| (*c).to_owned()).collect()
}

// ---------------------------------------------------------------------------
// hazards
// ---------------------------------------------------------------------------

/// Crash and medical probabilities.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HazardConfig {
    /// Chance the coaster crashes at the top of the loop (default: 0.5).
    #[serde(default = "default_coaster_crash_chance")]
    pub coaster_crash_chance: f64,

    /// Chance a coaster crash victim survives (default: 0.5).
    #[serde(default = "default_coaster_survival")]
    pub coaster_survival: f64,

    /// Chance the flight crashes on takeoff (default: 0.75).
    #[serde(default = "default_flight_crash_chance")]
    pub flight_crash_chance: f64,

    /// Chance a plane crash victim survives (default: 0.9).
    #[serde(default = "default_plane_survival")]
    pub plane_survival: f64,

    /// Chance a patient survives the morning rounds (default: 0.75).
    #[serde(default = "default_hospital_survival")]
    pub hospital_survival: f64,

    /// Chance a survivor leaves in a wheelchair (default: 0.25).
    #[serde(default = "default_wheelchair_chance")]
    pub wheelchair_chance: f64,

    /// Chance a survivor loses both arms (default: 0.15).
    #[serde(default = "default_missing_arms_chance")]
    pub missing_arms_chance: f64,

    /// Chance a survivor is given days to live (default: 0.05).
    #[serde(default = "default_delayed_death_chance")]
    pub delayed_death_chance: f64,

    /// Days to live on a delayed death (default: 2).
    #[serde(default = "default_delayed_death_days")]
    pub delayed_death_days: u32,
}

impl Default for HazardConfig {
    fn default() -> Self {
        Self {
            coaster_crash_chance: default_coaster_crash_chance(),
            coaster_survival: default_coaster_survival(),
            flight_crash_chance: default_flight_crash_chance(),
            plane_survival: default_plane_survival(),
            hospital_survival: default_hospital_survival(),
            wheelchair_chance: default_wheelchair_chance(),
            missing_arms_chance: default_missing_arms_chance(),
            delayed_death_chance: default_delayed_death_chance(),
            delayed_death_days: default_delayed_death_days(),
        }
    }
}

const fn default_coaster_crash_chance() -> f64 {
    0.5
}

const fn default_coaster_survival() -> f64 {
    0.5
}

const fn default_flight_crash_chance() -> f64 {
    0.75
}

const fn default_plane_survival() -> f64 {
    0.9
}

const fn default_hospital_survival() -> f64 {
    0.75
}

const fn default_wheelchair_chance() -> f64 {
    0.25
}

const fn default_missing_arms_chance() -> f64 {
    0.15
}

const fn default_delayed_death_chance() -> f64 {
    0.05
}

const fn default_delayed_death_days() -> u32 {
    2
}

// ---------------------------------------------------------------------------
// resources
// ---------------------------------------------------------------------------

/// Shared-resource sizes and timers. Times are in seconds.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ResourceConfig {
    /// Hospital ward size (default: 8).
    #[serde(default = "default_hospital_beds")]
    pub hospital_beds: u32,

    /// Coaster seats; the ride leaves when all are taken (default: 4).
    #[serde(default = "default_coaster_seats")]
    pub coaster_seats: usize,

    /// Time the wreck blocks the coaster after a crash (default: 5).
    #[serde(default = "default_coaster_crash_cooldown")]
    pub coaster_crash_cooldown: f32,

    /// Time the plane wreck blocks the airport (default: 30).
    #[serde(default = "default_plane_wreck_cooldown")]
    pub plane_wreck_cooldown: f32,

    /// Time between landing and the next trip becoming possible
    /// (default: 10).
    #[serde(default = "default_returning_reset")]
    pub returning_reset: f32,

    /// Time the ambulance spends loading at a crash site (default: 2).
    #[serde(default = "default_ambulance_loading")]
    pub ambulance_loading: f32,

    /// Ambulance driving speed in units per second (default: 40).
    #[serde(default = "default_ambulance_speed")]
    pub ambulance_speed: f32,

    /// Distance at which the ambulance counts as arrived (default: 1).
    #[serde(default = "default_ambulance_arrival_radius")]
    pub ambulance_arrival_radius: f32,

    /// Days a family stays on the island (default: 2).
    #[serde(default = "default_vacation_days")]
    pub vacation_days: u32,
}

impl Default for ResourceConfig {
    fn default() -> Self {
        Self {
            hospital_beds: default_hospital_beds(),
            coaster_seats: default_coaster_seats(),
            coaster_crash_cooldown: default_coaster_crash_cooldown(),
            plane_wreck_cooldown: default_plane_wreck_cooldown(),
            returning_reset: default_returning_reset(),
            ambulance_loading: default_ambulance_loading(),
            ambulance_speed: default_ambulance_speed(),
            ambulance_arrival_radius: default_ambulance_arrival_radius(),
            vacation_days: default_vacation_days(),
        }
    }
}

const fn default_hospital_beds() -> u32 {
    8
}

const fn default_coaster_seats() -> usize {
    4
}

const fn default_coaster_crash_cooldown() -> f32 {
    5.0
}

const fn default_plane_wreck_cooldown() -> f32 {
    30.0
}

const fn default_returning_reset() -> f32 {
    10.0
}

const fn default_ambulance_loading() -> f32 {
    2.0
}

const fn default_ambulance_speed() -> f32 {
    40.0
}

const fn default_ambulance_arrival_radius() -> f32 {
    1.0
}

const fn default_vacation_days() -> u32 {
    2
}

// ---------------------------------------------------------------------------
// engine
// ---------------------------------------------------------------------------

/// Frame loop settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EngineConfig {
    /// Frames per second the headless driver aims for (default: 60).
    #[serde(default = "default_frame_rate")]
    pub frame_rate: u32,

    /// Real-time bound in seconds. 0 means run until stopped.
    #[serde(default)]
    pub max_real_time_seconds: u64,

    /// Frame bound. 0 means run until stopped.
    #[serde(default)]
    pub max_frames: u64,

    /// Entries kept in the recent-events feed (default: 10).
    #[serde(default = "default_feed_capacity")]
    pub feed_capacity: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            frame_rate: default_frame_rate(),
            max_real_time_seconds: 0,
            max_frames: 0,
            feed_capacity: default_feed_capacity(),
        }
    }
}

const fn default_frame_rate() -> u32 {
    60
}

const fn default_feed_capacity() -> usize {
    10
}

// ---------------------------------------------------------------------------
// logging
// ---------------------------------------------------------------------------

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Log level or `EnvFilter` directive (default: `info`).
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_owned()
}
