//! Rigid bodies, static colliders and the events the simulation reports.

pub use glam::{Quat, Vec3};

use crate::pose::Pose;

/// Stable identifier of a static collider.
///
/// Handles are allocated sequentially by [`crate::PhysicsSim::add_collider`]
/// and are never reused, so they are safe to use as map keys for the
/// lifetime of a simulation.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ColliderHandle(pub u32);

/// Collider geometry, expressed in the collider's local frame.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Shape {
    Sphere { radius: f32 },
    /// Oriented box; `half_extents` along the local axes.
    Box { half_extents: Vec3 },
    /// Half-space below a plane through the collider origin, shifted by
    /// `offset` along the (local) `normal`.
    Plane { normal: Vec3, offset: f32 },
}

impl Shape {
    pub(crate) fn validate(&self) -> Result<(), crate::PhysicsError> {
        use crate::PhysicsError::InvalidShape;
        match *self {
            Shape::Sphere { radius } if radius.is_nan() || radius <= 0.0 => {
                Err(InvalidShape("sphere radius must be positive"))
            }
            Shape::Box { half_extents } if half_extents.is_nan() || half_extents.min_element() <= 0.0 => {
                Err(InvalidShape("box half extents must be positive"))
            }
            Shape::Plane { normal, .. } if normal.length_squared() < 1e-8 => {
                Err(InvalidShape("plane normal must be non-zero"))
            }
            _ => Ok(()),
        }
    }
}

/// A static collider. Triggers report overlaps but never push bodies.
#[derive(Clone, Debug)]
pub struct Collider {
    pub handle: ColliderHandle,
    pub shape: Shape,
    pub pose: Pose,
    pub trigger: bool,
    pub tag: String,
    /// Disabled colliders take no part in contacts or overlap queries.
    pub enabled: bool,
}

/// Dynamic body with a spherical hull.
#[derive(Copy, Clone, Debug)]
pub struct RigidBody {
    pub pose: Pose,
    pub vel: Vec3,
    pub angular_vel: Vec3,
    pub mass: f32,
    pub radius: f32,
    pub linear_damping: f32,
    pub angular_damping: f32,
    /// Force accumulated since the last step; cleared by integration.
    pub force: Vec3,
    pub asleep: bool,
}

impl RigidBody {
    #[must_use]
    pub fn new(pose: Pose, radius: f32, mass: f32) -> Self {
        Self {
            pose,
            vel: Vec3::ZERO,
            angular_vel: Vec3::ZERO,
            mass,
            radius,
            linear_damping: 0.0,
            angular_damping: 0.05,
            force: Vec3::ZERO,
            asleep: false,
        }
    }

    /// Accumulate a force for the next step; sleeping bodies ignore it.
    pub fn add_force(&mut self, force: Vec3) {
        if !self.asleep {
            self.force += force;
        }
    }

    /// Stop the body dead and exclude it from integration and contacts.
    pub fn sleep(&mut self) {
        self.asleep = true;
        self.vel = Vec3::ZERO;
        self.angular_vel = Vec3::ZERO;
        self.force = Vec3::ZERO;
    }

    pub fn wake(&mut self) {
        self.asleep = false;
    }
}

/// Global simulation parameters.
#[derive(Copy, Clone, Debug)]
pub struct PhysParams {
    pub gravity: Vec3,
    /// Fixed step duration in seconds.
    pub dt: f32,
}

impl Default for PhysParams {
    fn default() -> Self {
        Self {
            gravity: Vec3::ZERO,
            dt: 0.02,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ContactKind {
    Enter,
    Stay,
}

/// Something the last step observed between a body and a collider.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PhysicsEvent {
    /// The body overlaps a trigger collider.
    Trigger {
        body: usize,
        collider: ColliderHandle,
        kind: ContactKind,
    },
    /// The body started touching a solid collider.
    CollisionEnter { body: usize, collider: ColliderHandle },
}
