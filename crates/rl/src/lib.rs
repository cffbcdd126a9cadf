#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions, clippy::must_use_candidate)]
//! # Icefield RL
//!
//! The episode core of the drone environment: a drone has to find ice
//! patches in a walled arena and salt them away, without flying into the
//! walls.
//!
//! -   [`Arena`] owns every [`IcePatch`], maps colliders back to patches and
//!     tracks which patch is nearest.
//! -   [`DroneAgent`] turns [`Action`]s into forces, builds
//!     [`Observation`]s and scores contacts.
//! -   [`DroneEnv`] runs episodes on top of a [`physics::PhysicsSim`] and
//!     implements [`Env`] for learners that deal in flat vectors.

pub mod agent;
pub mod arena;
pub mod bridge;
pub mod config;
pub mod env;
pub mod episode;
pub mod error;
pub mod heuristic;
pub mod patch;
pub mod spawn;

pub use agent::{move_towards, Action, AgentState, DroneAgent, Observation};
pub use arena::{Arena, BOUNDARY_TAG, ICE_PATCH_TAG};
pub use bridge::{ColliderSwitch, Mover, OverlapQuery, SimRig};
pub use config::{ArenaConfig, DroneConfig, EnvConfig, SpawnConfig};
pub use env::Env;
pub use episode::{DroneEnv, EpisodeSummary, StepOutcome};
pub use error::EnvError;
pub use heuristic::ManualControls;
pub use patch::{IcePatch, PatchId};
pub use spawn::{find_safe_pose, SpawnOutcome};
