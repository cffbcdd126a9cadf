//! Tunables for the drone, the arena and the spawn search.
//!
//! Every struct deserializes with `#[serde(default)]`, so a config file only
//! has to name the values it overrides.

use crate::error::EnvError;
use physics::Vec3;
use serde::Deserialize;
use std::path::Path;

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct DroneConfig {
    /// Force applied per unit of translational action.
    pub move_force: f32,
    /// Degrees of yaw per second at a smoothed yaw rate of 1.
    pub yaw_speed: f32,
    /// How fast the smoothed yaw rate chases the command, per second.
    pub yaw_smoothing: f32,
    /// Fixed pitch of the airframe in degrees.
    pub flight_pitch: f32,
    pub training_mode: bool,
    /// Episode length in ticks while training. Ignored outside training.
    pub max_step: u32,
    /// Ice requested from a patch on every contact tick.
    pub salt_per_contact: f32,
    pub salt_reward: f32,
    pub salt_bonus: f32,
    pub boundary_penalty: f32,
    /// Probability of spawning next to a patch while training.
    pub near_patch_spawn_chance: f32,
    pub body_radius: f32,
    pub body_mass: f32,
    pub linear_damping: f32,
}

impl Default for DroneConfig {
    fn default() -> Self {
        Self {
            move_force: 2.0,
            yaw_speed: 100.0,
            yaw_smoothing: 2.0,
            flight_pitch: 270.0,
            training_mode: false,
            max_step: 5000,
            salt_per_contact: 0.5,
            salt_reward: 0.01,
            salt_bonus: 0.02,
            boundary_penalty: -0.5,
            near_patch_spawn_chance: 0.5,
            body_radius: 0.15,
            body_mass: 1.0,
            linear_damping: 1.0,
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct ArenaConfig {
    /// Normalizer for the distance observation.
    pub diameter: f32,
    pub center: [f32; 3],
    /// A reset patch becomes active when a uniform draw exceeds this.
    pub activation_threshold: f32,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            diameter: 20.0,
            center: [0.0; 3],
            activation_threshold: 0.7,
        }
    }
}

impl ArenaConfig {
    #[must_use]
    pub fn center(&self) -> Vec3 {
        Vec3::from(self.center)
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct SpawnConfig {
    pub max_attempts: u32,
    /// Radius of the overlap probe at a candidate position.
    pub clearance_radius: f32,
    /// Distance range along a patch's up vector for near-patch spawns.
    pub patch_distance: [f32; 2],
    /// Height range above the arena centre for open-air spawns.
    pub height: [f32; 2],
    /// Horizontal distance range from the arena centre for open-air spawns.
    pub radius: [f32; 2],
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            max_attempts: 100,
            clearance_radius: 0.05,
            patch_distance: [0.1, 0.2],
            height: [1.2, 2.5],
            radius: [2.0, 7.0],
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct EnvConfig {
    /// Duration of one physics tick in seconds.
    pub tick: f32,
    pub drone: DroneConfig,
    pub arena: ArenaConfig,
    pub spawn: SpawnConfig,
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self {
            tick: 0.02,
            drone: DroneConfig::default(),
            arena: ArenaConfig::default(),
            spawn: SpawnConfig::default(),
        }
    }
}

impl EnvConfig {
    /// # Errors
    ///
    /// Returns [`EnvError::Config`] when the JSON does not match the schema
    /// and [`EnvError::NonPositive`] when it fails [`EnvConfig::validate`].
    pub fn from_json(json: &str) -> Result<Self, EnvError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the values that divide or scale the simulation.
    ///
    /// # Errors
    ///
    /// [`EnvError::NonPositive`] naming the first offending field.
    pub fn validate(&self) -> Result<(), EnvError> {
        let fields = [
            ("tick", self.tick),
            ("drone.body_mass", self.drone.body_mass),
            ("drone.body_radius", self.drone.body_radius),
            ("arena.diameter", self.arena.diameter),
            ("spawn.clearance_radius", self.spawn.clearance_radius),
        ];
        match fields.into_iter().find(|(_, value)| !value.is_finite() || *value <= 0.0) {
            Some((field, value)) => Err(EnvError::NonPositive { field, value }),
            None => Ok(()),
        }
    }

    /// # Errors
    ///
    /// Returns [`EnvError::Io`] or [`EnvError::Config`].
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, EnvError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    #[must_use]
    pub fn with_training(mut self, training: bool) -> Self {
        self.drone.training_mode = training;
        self
    }
}
