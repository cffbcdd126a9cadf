//! # Physics Simulation Core
//!
//! This module provides the main physics simulation structure. It owns the
//! dynamic bodies and static colliders, steps the bodies forward in time and
//! turns the resulting overlaps into trigger and collision events.

use crate::collision::{detect_sphere_collider, resolve_body_contact};
use crate::error::PhysicsError;
use crate::integrator::integrate_bodies;
use crate::pose::Pose;
use crate::types::{Collider, ColliderHandle, ContactKind, PhysParams, PhysicsEvent, RigidBody, Vec3};
use std::collections::HashSet;

/// Main physics simulation container
#[derive(Clone, Debug, Default)]
pub struct PhysicsSim {
    pub bodies: Vec<RigidBody>,
    pub colliders: Vec<Collider>,
    pub params: PhysParams,

    // (body, collider) pairs in contact after the last step
    touching: HashSet<(usize, ColliderHandle)>,
    events: Vec<PhysicsEvent>,
}

impl PhysicsSim {
    /// Create a new empty simulation
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a simulation with a custom parameter set
    #[must_use]
    pub fn with_params(params: PhysParams) -> Self {
        Self {
            params,
            ..Self::default()
        }
    }

    /// # Errors
    ///
    /// Returns [`PhysicsError::UnknownBody`] for an out-of-range index.
    pub fn body(&self, index: usize) -> Result<&RigidBody, PhysicsError> {
        self.bodies.get(index).ok_or(PhysicsError::UnknownBody(index))
    }

    /// # Errors
    ///
    /// Returns [`PhysicsError::UnknownBody`] for an out-of-range index.
    pub fn body_mut(&mut self, index: usize) -> Result<&mut RigidBody, PhysicsError> {
        self.bodies.get_mut(index).ok_or(PhysicsError::UnknownBody(index))
    }

    #[must_use]
    pub fn collider(&self, handle: ColliderHandle) -> Option<&Collider> {
        self.colliders.get(handle.0 as usize)
    }

    /// Accumulate a force to be applied during the next step
    ///
    /// # Errors
    ///
    /// Returns [`PhysicsError::UnknownBody`] for an out-of-range index.
    pub fn add_force(&mut self, index: usize, force: Vec3) -> Result<(), PhysicsError> {
        self.body_mut(index)?.add_force(force);
        Ok(())
    }

    /// Teleport a body
    ///
    /// # Errors
    ///
    /// Returns [`PhysicsError::UnknownBody`] for an out-of-range index.
    pub fn set_pose(&mut self, index: usize, pose: Pose) -> Result<(), PhysicsError> {
        self.body_mut(index)?.pose = pose;
        Ok(())
    }

    /// # Errors
    ///
    /// Returns [`PhysicsError::UnknownBody`] for an out-of-range index.
    pub fn set_velocities(&mut self, index: usize, linear: Vec3, angular: Vec3) -> Result<(), PhysicsError> {
        let body = self.body_mut(index)?;
        body.vel = linear;
        body.angular_vel = angular;
        Ok(())
    }

    /// Stop integrating a body until [`PhysicsSim::wake`] is called.
    ///
    /// # Errors
    ///
    /// Returns [`PhysicsError::UnknownBody`] for an out-of-range index.
    pub fn sleep(&mut self, index: usize) -> Result<(), PhysicsError> {
        self.body_mut(index)?.sleep();
        Ok(())
    }

    /// # Errors
    ///
    /// Returns [`PhysicsError::UnknownBody`] for an out-of-range index.
    pub fn wake(&mut self, index: usize) -> Result<(), PhysicsError> {
        self.body_mut(index)?.wake();
        Ok(())
    }

    /// # Errors
    ///
    /// Returns [`PhysicsError::UnknownCollider`] for a handle this simulation
    /// never issued.
    pub fn set_collider_enabled(&mut self, handle: ColliderHandle, enabled: bool) -> Result<(), PhysicsError> {
        let collider = self
            .colliders
            .get_mut(handle.0 as usize)
            .ok_or(PhysicsError::UnknownCollider(handle))?;
        collider.enabled = enabled;
        Ok(())
    }

    /// Handles of all enabled colliders (triggers included) overlapping a sphere
    #[must_use]
    pub fn overlap_sphere(&self, center: Vec3, radius: f32) -> Vec<ColliderHandle> {
        self.colliders
            .iter()
            .filter(|c| c.enabled)
            .filter(|c| detect_sphere_collider(center, radius, c).is_some_and(|contact| contact.overlapping()))
            .map(|c| c.handle)
            .collect()
    }

    /// Execute one physics step on CPU
    pub fn step_cpu(&mut self) {
        let dt = self.params.dt;

        // 1. Apply forces and integrate positions
        integrate_bodies(&mut self.bodies, self.params.gravity, dt);

        // 2. Detect contacts, resolve solids and report events
        self.detect_contacts();
    }

    /// Run simulation for multiple steps
    pub fn run_cpu(&mut self, dt: f32, steps: usize) {
        self.params.dt = dt;
        for _ in 0..steps {
            self.step_cpu();
        }
    }

    /// Take the events produced since the last call
    pub fn drain_events(&mut self) -> Vec<PhysicsEvent> {
        std::mem::take(&mut self.events)
    }

    fn detect_contacts(&mut self) {
        let mut touching = HashSet::with_capacity(self.touching.len());

        for (body_index, body) in self.bodies.iter_mut().enumerate() {
            if body.asleep {
                continue;
            }

            for collider in self.colliders.iter().filter(|c| c.enabled) {
                let Some(contact) = detect_sphere_collider(body.pose.position, body.radius, collider) else {
                    continue;
                };

                let key = (body_index, collider.handle);
                let was_touching = self.touching.contains(&key);

                if collider.trigger {
                    // Triggers only count real overlap, not the contact skin
                    if !contact.overlapping() {
                        continue;
                    }
                    touching.insert(key);
                    let kind = if was_touching { ContactKind::Stay } else { ContactKind::Enter };
                    self.events.push(PhysicsEvent::Trigger {
                        body: body_index,
                        collider: collider.handle,
                        kind,
                    });
                } else {
                    touching.insert(key);
                    resolve_body_contact(body, &contact);
                    if !was_touching {
                        tracing::trace!(body = body_index, collider = collider.handle.0, tag = %collider.tag, "collision enter");
                        self.events.push(PhysicsEvent::CollisionEnter {
                            body: body_index,
                            collider: collider.handle,
                        });
                    }
                }
            }
        }

        self.touching = touching;
    }
}
