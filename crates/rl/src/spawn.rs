//! Rejection-sampled search for a spawn pose that overlaps nothing.

use crate::arena::Arena;
use crate::bridge::OverlapQuery;
use crate::config::SpawnConfig;
use crate::patch::IcePatch;
use physics::{euler_degrees, Pose, Vec3};

/// Result of [`find_safe_pose`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SpawnOutcome {
    pub pose: Pose,
    /// Yaw of `pose` in degrees.
    pub yaw: f32,
    pub attempts: u32,
    /// `false` when every attempt overlapped something and `pose` is just
    /// the last candidate.
    pub safe: bool,
}

/// Uniform sample from `[range[0], range[1])`.
pub(crate) fn uniform(rng: &mut fastrand::Rng, range: [f32; 2]) -> f32 {
    range[0] + rng.f32() * (range[1] - range[0])
}

/// Look for a spawn pose whose clearance probe touches no collider.
///
/// With `near_patch` the candidate hovers above a random patch, offset
/// along the patch's up vector; otherwise it floats at a random height and
/// distance from the arena centre. Either way the airframe keeps its flight
/// pitch and gets a random yaw. After `max_attempts` failures the last
/// candidate is returned anyway.
pub fn find_safe_pose(
    arena: &Arena,
    query: &impl OverlapQuery,
    rng: &mut fastrand::Rng,
    near_patch: bool,
    config: &SpawnConfig,
    flight_pitch: f32,
) -> SpawnOutcome {
    let max_attempts = config.max_attempts.max(1);
    let mut outcome = SpawnOutcome {
        pose: Pose::IDENTITY,
        yaw: 0.0,
        attempts: 0,
        safe: false,
    };

    while !outcome.safe && outcome.attempts < max_attempts {
        outcome.attempts += 1;

        let patch = if near_patch { arena.random_patch(rng) } else { None };
        let position = match patch {
            Some(patch) => above_patch(patch, rng, config),
            // An arena without patches falls back to open air
            None => open_air(arena.center(), rng, config),
        };
        outcome.yaw = uniform(rng, [-180.0, 180.0]);
        outcome.pose = Pose::new(position, euler_degrees(flight_pitch, outcome.yaw, 0.0));

        outcome.safe = query
            .overlap_sphere(position, config.clearance_radius)
            .is_empty();
    }

    if outcome.safe {
        tracing::debug!(attempts = outcome.attempts, position = ?outcome.pose.position, "spawn position found");
    } else {
        tracing::warn!(
            attempts = outcome.attempts,
            position = ?outcome.pose.position,
            "could not find a safe spawn position, using last candidate"
        );
    }
    outcome
}

fn above_patch(patch: &IcePatch, rng: &mut fastrand::Rng, config: &SpawnConfig) -> Vec3 {
    patch.position() + patch.up() * uniform(rng, config.patch_distance)
}

fn open_air(center: Vec3, rng: &mut fastrand::Rng, config: &SpawnConfig) -> Vec3 {
    let height = uniform(rng, config.height);
    let radius = uniform(rng, config.radius);
    let direction = euler_degrees(0.0, uniform(rng, [-180.0, 180.0]), 0.0) * Vec3::Z;
    center + Vec3::Y * height + direction * radius
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ArenaConfig;
    use physics::ColliderHandle;
    use scene::SceneNode;
    use std::cell::Cell;

    struct Oracle {
        blocked_calls: u32,
        calls: Cell<u32>,
    }

    impl OverlapQuery for Oracle {
        fn overlap_sphere(&self, _center: Vec3, _radius: f32) -> Vec<ColliderHandle> {
            let n = self.calls.get() + 1;
            self.calls.set(n);
            if n <= self.blocked_calls {
                vec![ColliderHandle(0)]
            } else {
                Vec::new()
            }
        }
    }

    fn empty_arena() -> Arena {
        let root = SceneNode {
            name: "area".into(),
            tag: None,
            pose: Pose::IDENTITY,
            collider: None,
            ice_patch: false,
            children: vec![],
        };
        Arena::build(&root, &ArenaConfig::default()).unwrap()
    }

    #[test]
    fn clear_world_accepts_first_candidate() {
        let oracle = Oracle { blocked_calls: 0, calls: Cell::new(0) };
        let mut rng = fastrand::Rng::with_seed(3);
        let out = find_safe_pose(&empty_arena(), &oracle, &mut rng, false, &SpawnConfig::default(), 270.0);
        assert!(out.safe);
        assert_eq!(out.attempts, 1);
        assert_eq!(oracle.calls.get(), 1);
    }

    #[test]
    fn retries_until_clear() {
        let oracle = Oracle { blocked_calls: 4, calls: Cell::new(0) };
        let mut rng = fastrand::Rng::with_seed(3);
        let out = find_safe_pose(&empty_arena(), &oracle, &mut rng, false, &SpawnConfig::default(), 270.0);
        assert!(out.safe);
        assert_eq!(out.attempts, 5);
    }

    #[test]
    fn exhausted_search_keeps_last_candidate() {
        let oracle = Oracle { blocked_calls: u32::MAX, calls: Cell::new(0) };
        let mut rng = fastrand::Rng::with_seed(3);
        let out = find_safe_pose(&empty_arena(), &oracle, &mut rng, false, &SpawnConfig::default(), 270.0);
        assert!(!out.safe);
        assert_eq!(out.attempts, 100);
        assert_eq!(oracle.calls.get(), 100);
        assert_ne!(out.pose.position, Vec3::ZERO);
    }

    fn tilted_patch_arena() -> Arena {
        let patch = SceneNode {
            name: "tilted".into(),
            tag: Some(crate::arena::ICE_PATCH_TAG.into()),
            pose: Pose::new(Vec3::new(3.0, 0.5, -2.0), euler_degrees(30.0, 45.0, 0.0)),
            collider: Some(ColliderHandle(0)),
            ice_patch: true,
            children: vec![],
        };
        let root = SceneNode {
            name: "area".into(),
            tag: None,
            pose: Pose::IDENTITY,
            collider: None,
            ice_patch: false,
            children: vec![patch],
        };
        Arena::build(&root, &ArenaConfig::default()).unwrap()
    }

    #[test]
    fn clear_world_accepts_first_candidate_above_a_patch() {
        let arena = tilted_patch_arena();
        let patch = &arena.patches()[0];
        let config = SpawnConfig::default();

        for seed in 0..50 {
            let oracle = Oracle { blocked_calls: 0, calls: Cell::new(0) };
            let mut rng = fastrand::Rng::with_seed(seed);
            let out = find_safe_pose(&arena, &oracle, &mut rng, true, &config, 270.0);
            assert!(out.safe);
            assert_eq!(out.attempts, 1);
            assert_eq!(oracle.calls.get(), 1);

            let offset = out.pose.position - patch.position();
            let along_up = offset.dot(patch.up());
            assert!((0.1 - 1e-4..=0.2 + 1e-4).contains(&along_up), "seed {seed}: {along_up}");
            assert!((offset - patch.up() * along_up).length() < 1e-5, "seed {seed}: sideways drift");
        }
    }

    #[test]
    fn near_patch_spawn_keeps_flight_pitch() {
        let arena = tilted_patch_arena();
        let oracle = Oracle { blocked_calls: 2, calls: Cell::new(0) };
        let mut rng = fastrand::Rng::with_seed(5);
        let out = find_safe_pose(&arena, &oracle, &mut rng, true, &SpawnConfig::default(), 270.0);
        assert_eq!(out.attempts, 3);
        assert!((out.pose.forward() - Vec3::Y).length() < 1e-5);
        let expected = euler_degrees(270.0, out.yaw, 0.0);
        assert!(out.pose.rotation.dot(expected).abs() > 1.0 - 1e-5);
    }

    #[test]
    fn open_air_candidates_stay_in_the_ring() {
        let config = SpawnConfig::default();
        let mut rng = fastrand::Rng::with_seed(11);
        for _ in 0..200 {
            let p = open_air(Vec3::ZERO, &mut rng, &config);
            let horizontal = Vec3::new(p.x, 0.0, p.z).length();
            assert!((1.2..=2.5).contains(&p.y));
            assert!((2.0 - 1e-4..=7.0 + 1e-4).contains(&horizontal));
        }
    }
}
