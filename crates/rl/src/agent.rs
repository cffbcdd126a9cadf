//! The drone agent: action handling, observations, rewards and the
//! per-episode state that goes with them.

use crate::arena::{Arena, BOUNDARY_TAG, ICE_PATCH_TAG};
use crate::bridge::{ColliderSwitch, Mover, OverlapQuery};
use crate::config::{DroneConfig, SpawnConfig};
use crate::error::EnvError;
use crate::patch::PatchId;
use crate::spawn::find_safe_pose;
use physics::{euler_degrees, ColliderHandle, Pose, Vec3};

/// Lifecycle of a [`DroneAgent`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AgentState {
    Uninitialized,
    Active,
    /// Parked by the player; actions are ignored and the body sleeps.
    Frozen,
}

/// One tick of control.
///
/// `movement` is a world-space force direction, `yaw` a turn-rate command
/// (+1 turns right). Every component lies in `[-1, 1]`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Action {
    pub movement: Vec3,
    pub yaw: f32,
}

impl Action {
    pub const SIZE: usize = 4;
    pub const IDLE: Self = Self {
        movement: Vec3::ZERO,
        yaw: 0.0,
    };

    #[must_use]
    pub fn new(x: f32, y: f32, z: f32, yaw: f32) -> Self {
        Self {
            movement: Vec3::new(x, y, z),
            yaw,
        }
    }

    /// Read an action vector, clipping each component to `[-1, 1]`.
    ///
    /// # Errors
    ///
    /// [`EnvError::BadAction`] unless exactly four values are given.
    pub fn from_slice(values: &[f32]) -> Result<Self, EnvError> {
        let &[x, y, z, yaw] = values else {
            return Err(EnvError::BadAction {
                expected: Self::SIZE,
                got: values.len(),
            });
        };
        let clip = |v: f32| if v.is_nan() { 0.0 } else { v.clamp(-1.0, 1.0) };
        Ok(Self::new(clip(x), clip(y), clip(z), clip(yaw)))
    }

    #[must_use]
    pub fn to_array(&self) -> [f32; 4] {
        [self.movement.x, self.movement.y, self.movement.z, self.yaw]
    }
}

/// Nine floats: attitude quaternion (x, y, z, w), unit vector to the nearest
/// patch, facing alignment with that patch, and distance to it relative to
/// the arena diameter. All zeros when there is nothing to chase.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Observation(pub [f32; 9]);

impl Observation {
    pub const SIZE: usize = 9;

    #[must_use]
    pub fn zeros() -> Self {
        Self([0.0; Self::SIZE])
    }

    #[must_use]
    pub fn as_slice(&self) -> &[f32] {
        &self.0
    }

    #[must_use]
    pub fn to_vec(&self) -> Vec<f32> {
        self.0.to_vec()
    }
}

/// Move `current` towards `target` by at most `max_delta`.
#[must_use]
pub fn move_towards(current: f32, target: f32, max_delta: f32) -> f32 {
    if (target - current).abs() <= max_delta {
        target
    } else {
        current + (target - current).signum() * max_delta
    }
}

fn wrap_degrees(angle: f32) -> f32 {
    (angle + 180.0).rem_euclid(360.0) - 180.0
}

#[derive(Clone, Debug)]
pub struct DroneAgent {
    config: DroneConfig,
    spawn: SpawnConfig,
    state: AgentState,
    max_step: u32,
    nearest: Option<PatchId>,
    ice_obtained: f32,
    smooth_yaw_change: f32,
    yaw: f32,
    pending_reward: f32,
}

impl DroneAgent {
    #[must_use]
    pub fn new(config: DroneConfig, spawn: SpawnConfig) -> Self {
        Self {
            max_step: config.max_step,
            config,
            spawn,
            state: AgentState::Uninitialized,
            nearest: None,
            ice_obtained: 0.0,
            smooth_yaw_change: 0.0,
            yaw: 0.0,
            pending_reward: 0.0,
        }
    }

    /// Make the agent ready to act. Outside training episodes never time out.
    pub fn initialize(&mut self) {
        if !self.config.training_mode {
            self.max_step = 0;
        }
        self.state = AgentState::Active;
    }

    /// Start a new episode: refill the ice when training, clear per-episode
    /// state, move the body to a safe spawn and pick the nearest patch.
    ///
    /// Patch colliders are synced before the spawn search, so it sees the
    /// patches of the new episode.
    ///
    /// # Errors
    ///
    /// Propagates collider switch failures.
    pub fn on_episode_begin<B>(
        &mut self,
        arena: &mut Arena,
        body: &mut B,
        rng: &mut fastrand::Rng,
    ) -> Result<(), EnvError>
    where
        B: Mover + OverlapQuery + ColliderSwitch,
    {
        if self.config.training_mode {
            arena.reset_ice(rng);
        }
        arena.sync_colliders(&mut *body)?;

        self.ice_obtained = 0.0;
        self.pending_reward = 0.0;
        self.smooth_yaw_change = 0.0;
        body.set_velocities(Vec3::ZERO, Vec3::ZERO);

        // Outside training always start by a patch
        let near_patch = !self.config.training_mode || rng.f32() < self.config.near_patch_spawn_chance;
        let outcome = find_safe_pose(&*arena, &*body, rng, near_patch, &self.spawn, self.config.flight_pitch);
        body.set_pose(outcome.pose);
        self.yaw = outcome.yaw;

        self.nearest = None;
        self.update_nearest_patch(arena, outcome.pose.position);
        Ok(())
    }

    /// Apply one action: a force for translation and a smoothed yaw turn.
    /// Ignored unless the agent is active.
    pub fn on_action_received(&mut self, action: &Action, body: &mut impl Mover, dt: f32) {
        if self.state != AgentState::Active {
            return;
        }

        body.add_force(action.movement * self.config.move_force);

        self.smooth_yaw_change = move_towards(
            self.smooth_yaw_change,
            action.yaw,
            self.config.yaw_smoothing * dt,
        );
        self.yaw = wrap_degrees(self.yaw + self.smooth_yaw_change * dt * self.config.yaw_speed);

        let pose = body.pose();
        body.set_pose(Pose::new(
            pose.position,
            euler_degrees(self.config.flight_pitch, self.yaw, 0.0),
        ));
    }

    #[must_use]
    pub fn collect_observations(&self, arena: &Arena, body: &impl Mover) -> Observation {
        let Some(patch) = self.nearest.and_then(|id| arena.patch(id)) else {
            return Observation::zeros();
        };

        let pose = body.pose();
        let rotation = pose.rotation.normalize();
        let to_patch = patch.position() - pose.position;
        let direction = to_patch.normalize_or_zero();
        let alignment = pose
            .forward()
            .normalize_or_zero()
            .dot(-patch.up().normalize_or_zero());
        let distance = to_patch.length() / arena.diameter();

        Observation([
            rotation.x,
            rotation.y,
            rotation.z,
            rotation.w,
            direction.x,
            direction.y,
            direction.z,
            alignment,
            distance,
        ])
    }

    /// Handle the body entering or resting in a trigger.
    ///
    /// Touching a patch salts it and, while training, earns the salting
    /// reward. Returns the ice received; other triggers yield zero.
    ///
    /// # Errors
    ///
    /// [`EnvError::UnknownCollider`] if a patch-tagged collider belongs to no
    /// patch of `arena`.
    pub fn on_trigger_enter_or_stay(
        &mut self,
        arena: &mut Arena,
        collider: ColliderHandle,
        tag: &str,
        position: Vec3,
    ) -> Result<f32, EnvError> {
        if tag != ICE_PATCH_TAG {
            return Ok(0.0);
        }

        let id = arena
            .patch_for_collider(collider)
            .ok_or(EnvError::UnknownCollider(collider))?;
        let patch = arena.patch_mut(id).ok_or(EnvError::UnknownCollider(collider))?;

        let received = patch.salt(self.config.salt_per_contact);
        let emptied = !patch.has_ice();
        self.ice_obtained += received;

        if self.config.training_mode && received > 0.0 {
            self.add_reward(self.config.salt_reward + self.config.salt_bonus);
        }

        if emptied {
            self.update_nearest_patch(arena, position);
        }
        Ok(received)
    }

    /// Handle the body hitting something solid.
    pub fn on_collision_enter(&mut self, tag: &str) {
        if self.config.training_mode && tag == BOUNDARY_TAG {
            self.add_reward(self.config.boundary_penalty);
        }
    }

    /// Per-tick housekeeping: retarget if the tracked patch ran dry.
    pub fn fixed_update(&mut self, arena: &Arena, position: Vec3) {
        let stale = self
            .nearest
            .is_some_and(|id| arena.patch(id).map_or(true, |p| !p.has_ice()));
        if stale {
            self.update_nearest_patch(arena, position);
        }
    }

    pub fn update_nearest_patch(&mut self, arena: &Arena, position: Vec3) {
        self.nearest = arena.nearest_with_ice(position, self.nearest);
    }

    /// # Panics
    ///
    /// Freezing is a gameplay feature and is not allowed while training.
    pub fn freeze(&mut self, body: &mut impl Mover) {
        assert!(!self.config.training_mode, "freeze/unfreeze not supported in training");
        self.state = AgentState::Frozen;
        body.sleep();
    }

    /// # Panics
    ///
    /// Freezing is a gameplay feature and is not allowed while training.
    pub fn unfreeze(&mut self, body: &mut impl Mover) {
        assert!(!self.config.training_mode, "freeze/unfreeze not supported in training");
        self.state = AgentState::Active;
        body.wake();
    }

    pub fn add_reward(&mut self, reward: f32) {
        self.pending_reward += reward;
    }

    /// Reward earned since the previous call.
    pub fn take_reward(&mut self) -> f32 {
        std::mem::take(&mut self.pending_reward)
    }

    #[must_use]
    pub fn state(&self) -> AgentState {
        self.state
    }

    #[must_use]
    pub fn is_training(&self) -> bool {
        self.config.training_mode
    }

    /// Episode length in ticks; zero means unlimited.
    #[must_use]
    pub fn max_step(&self) -> u32 {
        self.max_step
    }

    #[must_use]
    pub fn nearest_patch(&self) -> Option<PatchId> {
        self.nearest
    }

    /// Ice salted away this episode.
    #[must_use]
    pub fn ice_obtained(&self) -> f32 {
        self.ice_obtained
    }

    #[must_use]
    pub fn smoothed_yaw_rate(&self) -> f32 {
        self.smooth_yaw_change
    }

    /// Heading in degrees, in `[-180, 180)`.
    #[must_use]
    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    #[must_use]
    pub fn config(&self) -> &DroneConfig {
        &self.config
    }
}
