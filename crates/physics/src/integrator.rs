//! # Physics Integration
//!
//! Semi-implicit Euler integration of body velocities and poses, including
//! force application and damping.

use crate::types::{Quat, RigidBody, Vec3};

/// Integrate awake bodies forward by `dt`, consuming their accumulated forces.
pub fn integrate_bodies(bodies: &mut [RigidBody], gravity: Vec3, dt: f32) {
    for body in bodies.iter_mut() {
        if body.asleep {
            body.force = Vec3::ZERO;
            continue;
        }

        let acceleration = body.force / body.mass + gravity;
        body.vel += acceleration * dt;
        body.vel *= (1.0 - body.linear_damping * dt).max(0.0);
        body.angular_vel *= (1.0 - body.angular_damping * dt).max(0.0);

        body.pose.position += body.vel * dt;
        if body.angular_vel.length_squared() > 1e-12 {
            let spin = Quat::from_scaled_axis(body.angular_vel * dt);
            body.pose.rotation = (spin * body.pose.rotation).normalize();
        }

        body.force = Vec3::ZERO;
    }
}
