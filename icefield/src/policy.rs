use clap::ValueEnum;
use physics::Pose;
use rl::{Action, ManualControls, Observation};

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum PolicyKind {
    /// Uniform random actions
    Random,
    /// Fly straight at the nearest patch
    Seek,
    /// Hold forward and turn right, as a player would
    Patrol,
    /// Do nothing
    Idle,
}

pub struct Policy {
    kind: PolicyKind,
    rng: fastrand::Rng,
}

impl Policy {
    pub fn new(kind: PolicyKind, seed: u64) -> Self {
        Self {
            kind,
            rng: fastrand::Rng::with_seed(seed),
        }
    }

    pub fn act(&mut self, observation: &Observation, pose: &Pose) -> Action {
        match self.kind {
            PolicyKind::Random => {
                let mut sample = || self.rng.f32() * 2.0 - 1.0;
                Action::new(sample(), sample(), sample(), sample())
            }
            PolicyKind::Seek => {
                let obs = observation.as_slice();
                Action::new(obs[4], obs[5], obs[6], 0.0)
            }
            PolicyKind::Patrol => ManualControls {
                forward: true,
                turn_right: true,
                ..ManualControls::default()
            }
            .to_action(pose),
            PolicyKind::Idle => Action::IDLE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seek_follows_the_patch_direction() {
        let mut obs = Observation::zeros();
        obs.0[4..7].copy_from_slice(&[0.0, -0.6, 0.8]);
        let action = Policy::new(PolicyKind::Seek, 0).act(&obs, &Pose::IDENTITY);
        assert_eq!(action.to_array(), [0.0, -0.6, 0.8, 0.0]);
    }

    #[test]
    fn random_actions_stay_in_range() {
        let mut policy = Policy::new(PolicyKind::Random, 4);
        for _ in 0..100 {
            let action = policy.act(&Observation::zeros(), &Pose::IDENTITY);
            assert!(action.to_array().iter().all(|v| (-1.0..=1.0).contains(v)));
        }
    }
}
