//! The episode loop tying the agent, the arena and the physics rig together.

use crate::agent::{Action, DroneAgent, Observation};
use crate::arena::Arena;
use crate::bridge::{Mover, SimRig};
use crate::config::EnvConfig;
use crate::env::Env;
use crate::error::EnvError;
use physics::{PhysicsEvent, PhysicsSim, Pose};
use scene::{Scene, SceneNode};
use tracing::{debug, info, warn};

/// What one tick produced.
#[derive(Clone, Debug, PartialEq)]
pub struct StepOutcome {
    pub observation: Observation,
    pub reward: f32,
    pub done: bool,
}

/// Totals for the episode so far.
#[derive(Clone, Debug, PartialEq)]
pub struct EpisodeSummary {
    pub episode: u64,
    pub steps: u32,
    pub reward: f32,
    pub ice_obtained: f32,
    pub patches_with_ice: usize,
}

pub struct DroneEnv {
    config: EnvConfig,
    rig: SimRig,
    arena: Arena,
    agent: DroneAgent,
    rng: fastrand::Rng,
    step_count: u32,
    episode: u64,
    episode_reward: f32,
    end_requested: bool,
}

impl DroneEnv {
    /// Build an environment over an already instantiated scene.
    ///
    /// The drone body is added to `sim` here and the arena registry is
    /// built from `root`.
    ///
    /// # Errors
    ///
    /// Fails on an invalid config or if the arena registry cannot be built.
    pub fn new(config: EnvConfig, mut sim: PhysicsSim, root: &SceneNode, seed: u64) -> Result<Self, EnvError> {
        config.validate()?;
        sim.params.dt = config.tick;
        let arena = Arena::build(root, &config.arena)?;

        let body = sim.add_body(Pose::IDENTITY, config.drone.body_radius, config.drone.body_mass);
        sim.body_mut(body)?.linear_damping = config.drone.linear_damping;
        let mut rig = SimRig::new(sim, body)?;
        arena.sync_colliders(&mut rig)?;

        let mut agent = DroneAgent::new(config.drone.clone(), config.spawn.clone());
        agent.initialize();

        info!(
            patches = arena.len(),
            training = config.drone.training_mode,
            seed,
            "drone environment ready"
        );

        Ok(Self {
            config,
            rig,
            arena,
            agent,
            rng: fastrand::Rng::with_seed(seed),
            step_count: 0,
            episode: 0,
            episode_reward: 0.0,
            end_requested: false,
        })
    }

    /// Instantiate `scene` into a fresh simulation and build on it.
    ///
    /// # Errors
    ///
    /// [`EnvError::Scene`] if the scene cannot be instantiated, otherwise as
    /// for [`DroneEnv::new`].
    pub fn from_scene(config: EnvConfig, scene: &Scene, seed: u64) -> Result<Self, EnvError> {
        let mut sim = PhysicsSim::new();
        let root = scene
            .instantiate(&mut sim)
            .map_err(EnvError::Scene)?;
        Self::new(config, sim, &root, seed)
    }

    /// Reset the arena and the drone and return the first observation.
    ///
    /// # Errors
    ///
    /// Propagates collider switch failures.
    pub fn begin_episode(&mut self) -> Result<Observation, EnvError> {
        self.agent
            .on_episode_begin(&mut self.arena, &mut self.rig, &mut self.rng)?;
        self.rig.sim_mut().drain_events();

        self.episode += 1;
        self.step_count = 0;
        self.episode_reward = 0.0;
        self.end_requested = false;

        debug!(
            episode = self.episode,
            active = self.arena.active_count(),
            nearest = ?self.agent.nearest_patch(),
            "episode begin"
        );
        Ok(self.observe())
    }

    /// Run one tick: act, advance physics, react to contacts, then report.
    ///
    /// # Errors
    ///
    /// Propagates collider switch failures.
    pub fn step_action(&mut self, action: &Action) -> Result<StepOutcome, EnvError> {
        self.agent
            .on_action_received(action, &mut self.rig, self.config.tick);

        for event in self.rig.step() {
            self.dispatch(event)?;
        }

        let position = self.rig.pose().position;
        self.agent.fixed_update(&self.arena, position);
        self.arena.sync_colliders(&mut self.rig)?;

        self.step_count += 1;
        let reward = self.agent.take_reward();
        self.episode_reward += reward;

        let max_step = self.agent.max_step();
        let done = self.end_requested || (max_step > 0 && self.step_count >= max_step);
        if done {
            let summary = self.summary();
            info!(
                episode = summary.episode,
                steps = summary.steps,
                reward = summary.reward,
                ice = summary.ice_obtained,
                remaining = summary.patches_with_ice,
                "episode end"
            );
        }

        Ok(StepOutcome {
            observation: self.observe(),
            reward,
            done,
        })
    }

    fn dispatch(&mut self, event: PhysicsEvent) -> Result<(), EnvError> {
        let body = self.rig.body_index();
        let (collider, is_trigger) = match event {
            PhysicsEvent::Trigger { body: b, collider, .. } if b == body => (collider, true),
            PhysicsEvent::CollisionEnter { body: b, collider } if b == body => (collider, false),
            _ => return Ok(()),
        };

        let Some(tag) = self.rig.sim().collider(collider).map(|c| c.tag.clone()) else {
            warn!(collider = collider.0, "contact with unknown collider");
            return Ok(());
        };

        if !is_trigger {
            self.agent.on_collision_enter(&tag);
            return Ok(());
        }

        let position = self.rig.pose().position;
        match self
            .agent
            .on_trigger_enter_or_stay(&mut self.arena, collider, &tag, position)
        {
            Ok(_) => Ok(()),
            Err(EnvError::UnknownCollider(handle)) => {
                warn!(collider = handle.0, "patch-tagged collider outside the arena");
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    #[must_use]
    pub fn observe(&self) -> Observation {
        self.agent.collect_observations(&self.arena, &self.rig)
    }

    /// End the episode after the next tick.
    pub fn request_episode_end(&mut self) {
        self.end_requested = true;
    }

    /// Park the drone in place. Play mode only.
    ///
    /// # Panics
    ///
    /// Panics in training mode.
    pub fn freeze(&mut self) {
        self.agent.freeze(&mut self.rig);
    }

    /// # Panics
    ///
    /// Panics in training mode.
    pub fn unfreeze(&mut self) {
        self.agent.unfreeze(&mut self.rig);
    }

    #[must_use]
    pub fn summary(&self) -> EpisodeSummary {
        EpisodeSummary {
            episode: self.episode,
            steps: self.step_count,
            reward: self.episode_reward,
            ice_obtained: self.agent.ice_obtained(),
            patches_with_ice: self.arena.patches().iter().filter(|p| p.has_ice()).count(),
        }
    }

    #[must_use]
    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    #[must_use]
    pub fn agent(&self) -> &DroneAgent {
        &self.agent
    }

    #[must_use]
    pub fn rig(&self) -> &SimRig {
        &self.rig
    }

    #[must_use]
    pub fn drone_pose(&self) -> Pose {
        self.rig.pose()
    }

    #[must_use]
    pub fn step_count(&self) -> u32 {
        self.step_count
    }

    #[must_use]
    pub fn config(&self) -> &EnvConfig {
        &self.config
    }
}

impl Env for DroneEnv {
    fn obs_size(&self) -> usize {
        Observation::SIZE
    }

    fn action_size(&self) -> usize {
        Action::SIZE
    }

    fn reset(&mut self) -> Result<Vec<f32>, EnvError> {
        Ok(self.begin_episode()?.to_vec())
    }

    fn step(&mut self, action: &[f32]) -> Result<(Vec<f32>, f32, bool), EnvError> {
        let action = Action::from_slice(action)?;
        let outcome = self.step_action(&action)?;
        Ok((outcome.observation.to_vec(), outcome.reward, outcome.done))
    }
}
