//! Sphere-plane collision detection

use super::{Contact, CONTACT_OFFSET};
use crate::pose::Pose;
use crate::types::Vec3;

/// Detect contact between a sphere hull and a plane collider
#[must_use]
pub fn detect_sphere_plane(
    center: Vec3,
    radius: f32,
    pose: &Pose,
    normal: Vec3,
    offset: f32,
) -> Option<Contact> {
    let normal = (pose.rotation * normal).normalize();
    // Signed distance from sphere center to plane
    let distance = (center - pose.position).dot(normal) - offset;

    if distance >= radius + CONTACT_OFFSET {
        return None;
    }

    Some(Contact {
        normal,
        depth: radius - distance,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn floor_contact() {
        let c = detect_sphere_plane(Vec3::new(0.0, 0.05, 0.0), 0.1, &Pose::IDENTITY, Vec3::Y, 0.0)
            .unwrap();
        assert!(c.overlapping());
        assert_eq!(c.normal, Vec3::Y);
    }

    #[test]
    fn below_floor_is_deep() {
        let c = detect_sphere_plane(Vec3::new(0.0, -1.0, 0.0), 0.1, &Pose::IDENTITY, Vec3::Y, 0.0)
            .unwrap();
        assert!((c.depth - 1.1).abs() < 1e-6);
    }

    #[test]
    fn above_floor_is_clear() {
        assert!(detect_sphere_plane(Vec3::new(0.0, 2.0, 0.0), 0.1, &Pose::IDENTITY, Vec3::Y, 0.0).is_none());
    }
}
