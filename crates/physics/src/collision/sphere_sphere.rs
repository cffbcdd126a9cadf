//! Sphere-sphere collision detection

use super::{Contact, CONTACT_OFFSET};
use crate::types::Vec3;

/// Detect contact between a sphere hull and a sphere collider
#[must_use]
pub fn detect_sphere_sphere(center: Vec3, radius: f32, other: Vec3, other_radius: f32) -> Option<Contact> {
    let delta = center - other;
    let distance = delta.length();
    let min_distance = radius + other_radius;

    if distance >= min_distance + CONTACT_OFFSET {
        return None;
    }

    // Handle case where spheres are at same position
    let normal = if distance > 0.0001 {
        delta / distance
    } else {
        Vec3::Y
    };

    Some(Contact {
        normal,
        depth: min_distance - distance,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn touching_spheres_overlap() {
        let c = detect_sphere_sphere(Vec3::ZERO, 1.0, Vec3::new(1.5, 0.0, 0.0), 1.0).unwrap();
        assert!(c.overlapping());
        assert!((c.depth - 0.5).abs() < 1e-6);
        assert_eq!(c.normal, Vec3::new(-1.0, 0.0, 0.0));
    }

    #[test]
    fn distant_spheres_do_not_touch() {
        assert!(detect_sphere_sphere(Vec3::ZERO, 1.0, Vec3::new(3.0, 0.0, 0.0), 1.0).is_none());
    }

    #[test]
    fn skin_contact_is_not_an_overlap() {
        let c = detect_sphere_sphere(Vec3::ZERO, 1.0, Vec3::new(2.005, 0.0, 0.0), 1.0).unwrap();
        assert!(!c.overlapping());
    }
}
