//! The driver loop: build environments, run episodes, report totals.

use anyhow::{Context, Result};
use rayon::prelude::*;
use rl::{DroneEnv, EnvConfig, EpisodeSummary};
use scene::Scene;

use crate::policy::Policy;
use crate::Cli;

/// Run every instance to completion and log the combined result.
///
/// # Errors
///
/// Returns the first scene, config or environment failure.
pub fn run(cli: &Cli) -> Result<()> {
    let scene = match &cli.scene {
        Some(path) => Scene::from_path(path)?,
        None => Scene::quad_area()?,
    };
    let config = match &cli.config {
        Some(path) => EnvConfig::from_path(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => EnvConfig::default(),
    }
    .with_training(cli.training);

    tracing::info!(
        instances = cli.instances,
        episodes = cli.episodes,
        policy = ?cli.policy,
        training = cli.training,
        "starting"
    );

    let results = (0..u64::from(cli.instances))
        .into_par_iter()
        .map(|instance| run_instance(cli, &scene, config.clone(), cli.seed.wrapping_add(instance)))
        .collect::<Result<Vec<_>>>()?;

    let summaries: Vec<&EpisodeSummary> = results.iter().flatten().collect();
    let episodes = summaries.len().max(1) as f32;
    let mean_reward = summaries.iter().map(|s| s.reward).sum::<f32>() / episodes;
    let mean_ice = summaries.iter().map(|s| s.ice_obtained).sum::<f32>() / episodes;
    tracing::info!(episodes = summaries.len(), mean_reward, mean_ice, "done");
    Ok(())
}

fn run_instance(cli: &Cli, scene: &Scene, config: EnvConfig, seed: u64) -> Result<Vec<EpisodeSummary>> {
    let mut env = DroneEnv::from_scene(config, scene, seed)
        .with_context(|| format!("building environment {seed}"))?;
    let mut policy = Policy::new(cli.policy, seed);
    let mut summaries = Vec::with_capacity(cli.episodes as usize);

    for _ in 0..cli.episodes {
        let mut observation = env.begin_episode()?;
        loop {
            let action = policy.act(&observation, &env.drone_pose());
            let outcome = env.step_action(&action)?;
            observation = outcome.observation;
            if outcome.done {
                break;
            }
            if env.step_count() >= cli.max_ticks {
                env.request_episode_end();
            }
        }
        let summary = env.summary();
        tracing::debug!(seed, episode = summary.episode, reward = summary.reward, "instance episode");
        summaries.push(summary);
    }
    Ok(summaries)
}
