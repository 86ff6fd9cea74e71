//! Tunable parameters for resident behaviour.
//!
//! [`BehaviorConfig`] is the `behavior` section of the simulation YAML.
//! Speeds are in world units per reference frame; the movement integrator
//! scales them by `delta * reference_fps` so behaviour is frame-rate
//! independent. Hold timers are in seconds.

use serde::{Deserialize, Serialize};

/// Configuration for resident movement, hold timers, and leisure odds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BehaviorConfig {
    /// Parent walking speed (default: 0.05).
    #[serde(default = "default_parent_speed")]
    pub parent_speed: f32,

    /// Child walking speed (default: 0.12).
    #[serde(default = "default_child_speed")]
    pub child_speed: f32,

    /// Speed of anyone in a wheelchair (default: 0.03).
    #[serde(default = "default_wheelchair_speed")]
    pub wheelchair_speed: f32,

    /// Frame rate the speeds were tuned for (default: 60).
    #[serde(default = "default_reference_fps")]
    pub reference_fps: f32,

    /// Distance at which a walker counts as arrived (default: 0.2).
    #[serde(default = "default_arrival_radius")]
    pub arrival_radius: f32,

    /// Time spent picking groceries (default: 2.0).
    #[serde(default = "default_browse_hold")]
    pub browse_hold: f32,

    /// Time spent paying (default: 1.0).
    #[serde(default = "default_checkout_hold")]
    pub checkout_hold: f32,

    /// Time spent at the claw machine (default: 3.0).
    #[serde(default = "default_arcade_hold")]
    pub arcade_hold: f32,

    /// Time spent celebrating a win (default: 2.0).
    #[serde(default = "default_cheer_hold")]
    pub cheer_hold: f32,

    /// Queue time at check-in and security (default: 1.5).
    #[serde(default = "default_travel_desk_hold")]
    pub travel_desk_hold: f32,

    /// Time spent building a sand castle (default: 4.0).
    #[serde(default = "default_sand_hold")]
    pub sand_hold: f32,

    /// Time spent eating ice cream (default: 4.0).
    #[serde(default = "default_eating_hold")]
    pub eating_hold: f32,

    /// Takeoff time before travellers reach the island (default: 8.0).
    #[serde(default = "default_flight_hold")]
    pub flight_hold: f32,

    /// Time at the volcano before death (default: 3.0).
    #[serde(default = "default_burn_delay")]
    pub burn_delay: f32,

    /// Chance a parent plays the claw machine before bed (default: 0.25).
    #[serde(default = "default_night_arcade_chance")]
    pub night_arcade_chance: f64,

    /// Width of the square a child wanders in around home (default: 25).
    #[serde(default = "default_child_wander_span")]
    pub child_wander_span: f32,

    /// Width of the square a parent strolls in around home (default: 8).
    #[serde(default = "default_parent_wander_span")]
    pub parent_wander_span: f32,
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        Self {
            parent_speed: default_parent_speed(),
            child_speed: default_child_speed(),
            wheelchair_speed: default_wheelchair_speed(),
            reference_fps: default_reference_fps(),
            arrival_radius: default_arrival_radius(),
            browse_hold: default_browse_hold(),
            checkout_hold: default_checkout_hold(),
            arcade_hold: default_arcade_hold(),
            cheer_hold: default_cheer_hold(),
            travel_desk_hold: default_travel_desk_hold(),
            sand_hold: default_sand_hold(),
            eating_hold: default_eating_hold(),
            flight_hold: default_flight_hold(),
            burn_delay: default_burn_delay(),
            night_arcade_chance: default_night_arcade_chance(),
            child_wander_span: default_child_wander_span(),
            parent_wander_span: default_parent_wander_span(),
        }
    }
}

const fn default_parent_speed() -> f32 {
    0.05
}

const fn default_child_speed() -> f32 {
    0.12
}

const fn default_wheelchair_speed() -> f32 {
    0.03
}

const fn default_reference_fps() -> f32 {
    60.0
}

const fn default_arrival_radius() -> f32 {
    0.2
}

const fn default_browse_hold() -> f32 {
    2.0
}

const fn default_checkout_hold() -> f32 {
    1.0
}

const fn default_arcade_hold() -> f32 {
    3.0
}

const fn default_cheer_hold() -> f32 {
    2.0
}

const fn default_travel_desk_hold() -> f32 {
    1.5
}

const fn default_sand_hold() -> f32 {
    4.0
}

const fn default_eating_hold() -> f32 {
    4.0
}

const fn default_flight_hold() -> f32 {
    8.0
}

const fn default_burn_delay() -> f32 {
    3.0
}

const fn default_night_arcade_chance() -> f64 {
    0.25
}

const fn default_child_wander_span() -> f32 {
    25.0
}

const fn default_parent_wander_span() -> f32 {
    8.0
}
