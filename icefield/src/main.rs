//! # Icefield
//!
//! Runs drone episodes in the quad area, or any scene given with `--scene`,
//! against one of the built-in policies. Several independent instances can
//! run side by side with `--instances`.

mod app;
mod policy;

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use policy::PolicyKind;

#[derive(Parser, Debug)]
#[command(name = "icefield", about = "Drive the icefield drone environment")]
pub struct Cli {
    /// Scene JSON; the bundled quad area when omitted
    #[arg(long)]
    scene: Option<PathBuf>,
    /// Environment config JSON; defaults when omitted
    #[arg(long)]
    config: Option<PathBuf>,
    /// Episodes per instance
    #[arg(long, default_value_t = 3)]
    episodes: u32,
    /// Independent environments run in parallel
    #[arg(long, default_value_t = 1)]
    instances: u32,
    /// Base seed; instance `i` uses `seed + i`
    #[arg(long, default_value_t = 0)]
    seed: u64,
    /// Training mode: random ice, step limit, rewards
    #[arg(long)]
    training: bool,
    #[arg(long, value_enum, default_value_t = PolicyKind::Seek)]
    policy: PolicyKind,
    /// Tick limit for episodes that have no step limit of their own
    #[arg(long, default_value_t = 3000)]
    max_ticks: u32,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    app::run(&cli)
}
