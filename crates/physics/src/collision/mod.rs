//! # Collision Detection and Response
//!
//! Bodies carry a spherical hull, so every test here is sphere versus one
//! of the static collider shapes. Detection reports a [`Contact`] while the
//! hull is within [`CONTACT_OFFSET`] of the surface; only positive depth
//! counts as a real overlap.

mod sphere_box;
mod sphere_plane;
mod sphere_sphere;

pub use sphere_box::detect_sphere_box;
pub use sphere_plane::detect_sphere_plane;
pub use sphere_sphere::detect_sphere_sphere;

use crate::types::{Collider, RigidBody, Shape, Vec3};

/// Skin distance that keeps a resting contact "touching" between steps.
pub const CONTACT_OFFSET: f32 = 0.01;

/// Contact information for collision response
#[derive(Debug, Clone, Copy)]
pub struct Contact {
    /// Unit normal pointing from the collider towards the sphere centre
    pub normal: Vec3,
    /// Penetration depth (negative means separated but within the skin)
    pub depth: f32,
}

impl Contact {
    #[must_use]
    pub fn overlapping(&self) -> bool {
        self.depth > 0.0
    }
}

/// Test a sphere against any collider shape.
#[must_use]
pub fn detect_sphere_collider(center: Vec3, radius: f32, collider: &Collider) -> Option<Contact> {
    match collider.shape {
        Shape::Sphere { radius: other } => {
            detect_sphere_sphere(center, radius, collider.pose.position, other)
        }
        Shape::Box { half_extents } => detect_sphere_box(center, radius, &collider.pose, half_extents),
        Shape::Plane { normal, offset } => {
            detect_sphere_plane(center, radius, &collider.pose, normal, offset)
        }
    }
}

/// Push a body out of a solid collider and cancel its inward velocity.
pub fn resolve_body_contact(body: &mut RigidBody, contact: &Contact) {
    if contact.depth > 0.0 {
        body.pose.position += contact.normal * contact.depth;
    }

    let velocity_along_normal = body.vel.dot(contact.normal);
    if velocity_along_normal < 0.0 {
        body.vel -= contact.normal * velocity_along_normal;
    }
}
