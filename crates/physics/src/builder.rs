//! # Physics Simulation Builder
//!
//! Builder functions for adding bodies and static colliders to the
//! simulation.

use crate::error::PhysicsError;
use crate::pose::Pose;
use crate::types::{Collider, ColliderHandle, RigidBody, Shape};
use crate::PhysicsSim;

impl PhysicsSim {
    /// Add a dynamic body with a spherical hull, returning its index
    pub fn add_body(&mut self, pose: Pose, radius: f32, mass: f32) -> usize {
        self.bodies.push(RigidBody::new(pose, radius, mass));
        self.bodies.len() - 1
    }

    /// Add a static collider
    ///
    /// # Errors
    ///
    /// Returns [`PhysicsError::InvalidShape`] for degenerate geometry.
    pub fn add_collider(
        &mut self,
        shape: Shape,
        pose: Pose,
        trigger: bool,
        tag: impl Into<String>,
    ) -> Result<ColliderHandle, PhysicsError> {
        shape.validate()?;
        let handle = ColliderHandle(
            u32::try_from(self.colliders.len()).map_err(|_| PhysicsError::InvalidShape("too many colliders"))?,
        );
        self.colliders.push(Collider {
            handle,
            shape,
            pose,
            trigger,
            tag: tag.into(),
            enabled: true,
        });
        Ok(handle)
    }
}
