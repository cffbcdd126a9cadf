#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
//! # Icefield Physics
//!
//! A small CPU rigid-body simulation that plays the role of the physics
//! engine for the drone environment.
//!
//! ## Key Components
//!
//! -   **Bodies:** [`RigidBody`] is a dynamic body with a spherical hull,
//!     moved by accumulated forces. Bodies can be put to sleep and woken.
//! -   **Colliders:** [`Collider`] is static geometry ([`Shape::Sphere`],
//!     [`Shape::Box`], [`Shape::Plane`]) identified by a stable
//!     [`ColliderHandle`]. Trigger colliders report overlaps without
//!     pushing bodies; solid ones push bodies out.
//! -   **Simulation:** [`PhysicsSim`] steps bodies at a fixed `dt`, answers
//!     overlap queries and reports [`PhysicsEvent`]s.
//!
//! ## Usage
//!
//! ```rust
//! use physics::{PhysicsSim, Pose, Shape, Vec3};
//!
//! let mut sim = PhysicsSim::new();
//! let wall = sim
//!     .add_collider(Shape::Sphere { radius: 0.5 }, Pose::IDENTITY, false, "boundary")
//!     .unwrap();
//! let body = sim.add_body(Pose::new(Vec3::new(0.0, 2.0, 0.0), Default::default()), 0.1, 1.0);
//! sim.add_force(body, Vec3::new(0.0, -50.0, 0.0)).unwrap();
//! sim.run_cpu(0.02, 10);
//! assert_eq!(sim.overlap_sphere(Vec3::ZERO, 0.05), vec![wall]);
//! ```

pub mod builder;
pub mod collision;
pub mod error;
pub mod integrator;
pub mod pose;
pub mod simulation;
pub mod types;

pub use error::PhysicsError;
pub use pose::{euler_degrees, Pose};
pub use simulation::PhysicsSim;
pub use types::{Collider, ColliderHandle, ContactKind, PhysParams, PhysicsEvent, Quat, RigidBody, Shape, Vec3};
