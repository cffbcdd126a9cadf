//! Human-input adapter: maps held controls to an [`Action`].

use crate::agent::Action;
use physics::{Pose, Vec3};

/// Which controls are held this tick. Opposing pairs resolve to the
/// second of the two (back over forward, right over left, down over up,
/// turn right over turn left).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct ManualControls {
    pub forward: bool,
    pub back: bool,
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    pub turn_left: bool,
    pub turn_right: bool,
}

impl ManualControls {
    /// Build the action for a drone at `pose`.
    ///
    /// The drone flies pitched so its nose points at the sky, which makes
    /// its local up the backwards axis and its local forward the climb axis.
    #[must_use]
    pub fn to_action(&self, pose: &Pose) -> Action {
        let mut forward = Vec3::ZERO;
        if self.forward {
            forward = -pose.up();
        }
        if self.back {
            forward = pose.up();
        }

        let mut side = Vec3::ZERO;
        if self.left {
            side = -pose.right();
        }
        if self.right {
            side = pose.right();
        }

        let mut lift = Vec3::ZERO;
        if self.up {
            lift = pose.forward();
        }
        if self.down {
            lift = -pose.forward();
        }

        let mut yaw = 0.0;
        if self.turn_left {
            yaw = -1.0;
        }
        if self.turn_right {
            yaw = 1.0;
        }

        Action {
            movement: (forward + side + lift).normalize_or_zero(),
            yaw,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use physics::euler_degrees;

    fn flying() -> Pose {
        Pose::new(Vec3::new(0.0, 2.0, 0.0), euler_degrees(270.0, 0.0, 0.0))
    }

    #[test]
    fn idle_controls_give_idle_action() {
        assert_eq!(ManualControls::default().to_action(&flying()), Action::IDLE);
    }

    #[test]
    fn up_climbs_along_world_y() {
        let controls = ManualControls {
            up: true,
            ..ManualControls::default()
        };
        let action = controls.to_action(&flying());
        assert!((action.movement - Vec3::Y).length() < 1e-5);
    }

    #[test]
    fn later_key_wins_and_result_is_unit_length() {
        let controls = ManualControls {
            forward: true,
            back: true,
            right: true,
            turn_left: true,
            turn_right: true,
            ..ManualControls::default()
        };
        let pose = flying();
        let action = controls.to_action(&pose);
        let expected = (pose.up() + pose.right()).normalize();
        assert!((action.movement - expected).length() < 1e-5);
        assert!((action.movement.length() - 1.0).abs() < 1e-5);
        assert_eq!(action.yaw, 1.0);
    }
}
