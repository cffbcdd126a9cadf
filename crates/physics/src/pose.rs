//! Pose utilities for bodies and colliders
//!
//! A [`Pose`] is a position plus a unit quaternion. The axis conventions
//! follow the flight-sim frame used by the drone: `forward` is local +Z,
//! `up` is local +Y and `right` is local +X.

use glam::{EulerRot, Mat4, Quat, Vec3};

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Pose {
    pub position: Vec3,
    pub rotation: Quat,
}

impl Default for Pose {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Pose {
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        rotation: Quat::IDENTITY,
    };

    #[must_use]
    pub const fn new(position: Vec3, rotation: Quat) -> Self {
        Self { position, rotation }
    }

    /// Build a pose from Euler angles in degrees: roll about Z, then pitch
    /// about X, then yaw about Y.
    #[must_use]
    pub fn from_euler_degrees(position: Vec3, pitch: f32, yaw: f32, roll: f32) -> Self {
        Self::new(position, euler_degrees(pitch, yaw, roll))
    }

    #[must_use]
    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::Z
    }

    #[must_use]
    pub fn up(&self) -> Vec3 {
        self.rotation * Vec3::Y
    }

    #[must_use]
    pub fn right(&self) -> Vec3 {
        self.rotation * Vec3::X
    }

    /// Map a point from this pose's local frame into the parent frame.
    #[must_use]
    pub fn transform_point(&self, local: Vec3) -> Vec3 {
        self.position + self.rotation * local
    }

    /// Map a point from the parent frame into this pose's local frame.
    #[must_use]
    pub fn inverse_transform_point(&self, world: Vec3) -> Vec3 {
        self.rotation.inverse() * (world - self.position)
    }

    /// World pose of a child whose pose is given relative to `self`.
    #[must_use]
    pub fn compose(&self, child: &Pose) -> Pose {
        Pose {
            position: self.transform_point(child.position),
            rotation: (self.rotation * child.rotation).normalize(),
        }
    }

    /// Column-major 4x4 transform matrix.
    #[must_use]
    pub fn to_matrix(&self) -> [[f32; 4]; 4] {
        Mat4::from_rotation_translation(self.rotation, self.position).to_cols_array_2d()
    }
}

/// Rotation from Euler angles in degrees, yaw-pitch-roll composition.
#[must_use]
pub fn euler_degrees(pitch: f32, yaw: f32, roll: f32) -> Quat {
    Quat::from_euler(
        EulerRot::YXZ,
        yaw.to_radians(),
        pitch.to_radians(),
        roll.to_radians(),
    )
}
