//! Sphere-box collision detection

use super::{Contact, CONTACT_OFFSET};
use crate::pose::Pose;
use crate::types::Vec3;

/// Detect contact between a sphere hull and an oriented box
#[must_use]
pub fn detect_sphere_box(center: Vec3, radius: f32, pose: &Pose, half_extents: Vec3) -> Option<Contact> {
    // Work in the box frame so the box is axis-aligned
    let local = pose.inverse_transform_point(center);
    let closest = local.clamp(-half_extents, half_extents);
    let delta = local - closest;
    let distance = delta.length();

    if distance >= radius + CONTACT_OFFSET {
        return None;
    }

    let (local_normal, depth) = if distance > 0.0001 {
        (delta / distance, radius - distance)
    } else {
        // Sphere center is inside box, push out through the nearest face
        let (axis, gap) = closest_face(local, half_extents);
        (axis, radius + gap)
    };

    Some(Contact {
        normal: pose.rotation * local_normal,
        depth,
    })
}

/// Outward normal of the nearest face and the distance to it.
fn closest_face(local: Vec3, half_extents: Vec3) -> (Vec3, f32) {
    let gaps = half_extents - local.abs();
    let signs = local.signum();

    if gaps.x <= gaps.y && gaps.x <= gaps.z {
        (Vec3::new(signs.x, 0.0, 0.0), gaps.x)
    } else if gaps.y <= gaps.z {
        (Vec3::new(0.0, signs.y, 0.0), gaps.y)
    } else {
        (Vec3::new(0.0, 0.0, signs.z), gaps.z)
    }
}
