//! Seams between the episode core and the physics engine.
//!
//! The core only needs three things from physics: an overlap query for
//! the spawn search, a force-driven mover for the drone's body, and a way
//! to switch patch colliders on and off. [`SimRig`] provides all three on
//! top of [`PhysicsSim`]; tests substitute their own oracles.

use crate::error::EnvError;
use physics::{ColliderHandle, PhysicsEvent, PhysicsSim, Pose, RigidBody, Vec3};

pub trait OverlapQuery {
    /// Handles of every collider overlapping the sphere.
    fn overlap_sphere(&self, center: Vec3, radius: f32) -> Vec<ColliderHandle>;
}

/// Pose access and force-based motion for one rigid body.
pub trait Mover {
    fn pose(&self) -> Pose;
    fn set_pose(&mut self, pose: Pose);
    fn set_velocities(&mut self, linear: Vec3, angular: Vec3);
    /// Force applied over the next physics tick.
    fn add_force(&mut self, force: Vec3);
    fn sleep(&mut self);
    fn wake(&mut self);
}

pub trait ColliderSwitch {
    /// # Errors
    ///
    /// Fails when the handle does not name a collider.
    fn set_collider_enabled(&mut self, handle: ColliderHandle, enabled: bool) -> Result<(), EnvError>;
}

/// A [`PhysicsSim`] together with the body the drone flies.
#[derive(Clone, Debug)]
pub struct SimRig {
    sim: PhysicsSim,
    body: usize,
}

impl SimRig {
    /// # Errors
    ///
    /// Returns [`EnvError::Physics`] if `body` is not a body of `sim`.
    pub fn new(sim: PhysicsSim, body: usize) -> Result<Self, EnvError> {
        sim.body(body)?;
        Ok(Self { sim, body })
    }

    #[must_use]
    pub fn sim(&self) -> &PhysicsSim {
        &self.sim
    }

    pub fn sim_mut(&mut self) -> &mut PhysicsSim {
        &mut self.sim
    }

    #[must_use]
    pub fn body_index(&self) -> usize {
        self.body
    }

    #[must_use]
    pub fn body(&self) -> &RigidBody {
        &self.sim.bodies[self.body]
    }

    fn body_mut(&mut self) -> &mut RigidBody {
        &mut self.sim.bodies[self.body]
    }

    /// Advance one tick and return what happened during it.
    pub fn step(&mut self) -> Vec<PhysicsEvent> {
        self.sim.step_cpu();
        self.sim.drain_events()
    }
}

impl OverlapQuery for SimRig {
    fn overlap_sphere(&self, center: Vec3, radius: f32) -> Vec<ColliderHandle> {
        self.sim.overlap_sphere(center, radius)
    }
}

// Bodies are never removed, so the index checked in `new` stays valid.
impl Mover for SimRig {
    fn pose(&self) -> Pose {
        self.body().pose
    }

    fn set_pose(&mut self, pose: Pose) {
        self.body_mut().pose = pose;
    }

    fn set_velocities(&mut self, linear: Vec3, angular: Vec3) {
        let body = self.body_mut();
        body.vel = linear;
        body.angular_vel = angular;
    }

    fn add_force(&mut self, force: Vec3) {
        self.body_mut().add_force(force);
    }

    fn sleep(&mut self) {
        self.body_mut().sleep();
    }

    fn wake(&mut self) {
        self.body_mut().wake();
    }
}

impl ColliderSwitch for SimRig {
    fn set_collider_enabled(&mut self, handle: ColliderHandle, enabled: bool) -> Result<(), EnvError> {
        Ok(self.sim.set_collider_enabled(handle, enabled)?)
    }
}
