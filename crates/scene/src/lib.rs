#![deny(clippy::all)]
//! # Scene descriptions
//!
//! A scene is a JSON tree of named nodes. Each node has a local transform,
//! an optional tag, an optional collider and an optional `ice_patch`
//! marker. [`Scene::instantiate`] turns the description into colliders in a
//! [`PhysicsSim`] and returns the immutable [`SceneNode`] tree the arena is
//! built from.

use anyhow::{Context, Result};
use physics::{euler_degrees, ColliderHandle, PhysicsSim, Pose, Shape, Vec3};
use serde::Deserialize;
use std::path::Path;

/// Tag carried by colliders of nodes that declare none.
pub const UNTAGGED: &str = "untagged";

const QUAD_AREA: &str = include_str!("../data/quad_area.json");

#[derive(Deserialize, Debug, Clone)]
pub struct Scene {
    #[serde(flatten)]
    pub root: NodeDef,
}

#[derive(Deserialize, Debug, Clone)]
pub struct NodeDef {
    pub name: String,
    #[serde(default)]
    pub tag: Option<String>,
    #[serde(default)]
    pub position: [f32; 3],
    /// Euler angles in degrees: pitch, yaw, roll.
    #[serde(default)]
    pub rotation: [f32; 3],
    #[serde(default)]
    pub collider: Option<ColliderDef>,
    #[serde(default)]
    pub ice_patch: bool,
    #[serde(default)]
    pub children: Vec<NodeDef>,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(tag = "shape")]
pub enum ColliderDef {
    #[serde(rename = "sphere")]
    Sphere {
        radius: f32,
        #[serde(default)]
        trigger: bool,
    },
    #[serde(rename = "box")]
    Box {
        half_extents: [f32; 3],
        #[serde(default)]
        trigger: bool,
    },
    #[serde(rename = "plane")]
    Plane {
        normal: [f32; 3],
        #[serde(default)]
        offset: f32,
        #[serde(default)]
        trigger: bool,
    },
}

impl ColliderDef {
    fn shape(&self) -> Shape {
        match *self {
            ColliderDef::Sphere { radius, .. } => Shape::Sphere { radius },
            ColliderDef::Box { half_extents, .. } => Shape::Box {
                half_extents: Vec3::from(half_extents),
            },
            ColliderDef::Plane { normal, offset, .. } => Shape::Plane {
                normal: Vec3::from(normal),
                offset,
            },
        }
    }

    fn trigger(&self) -> bool {
        match *self {
            ColliderDef::Sphere { trigger, .. }
            | ColliderDef::Box { trigger, .. }
            | ColliderDef::Plane { trigger, .. } => trigger,
        }
    }
}

/// An instantiated node: world pose plus the collider created for it.
#[derive(Debug, Clone)]
pub struct SceneNode {
    pub name: String,
    pub tag: Option<String>,
    pub pose: Pose,
    pub collider: Option<ColliderHandle>,
    pub ice_patch: bool,
    pub children: Vec<SceneNode>,
}

impl SceneNode {
    /// Depth-first, pre-order walk over this node and its descendants.
    pub fn walk(&self) -> impl Iterator<Item = &SceneNode> {
        let mut stack = vec![self];
        std::iter::from_fn(move || {
            let node = stack.pop()?;
            stack.extend(node.children.iter().rev());
            Some(node)
        })
    }

    #[must_use]
    pub fn find(&self, name: &str) -> Option<&SceneNode> {
        self.walk().find(|node| node.name == name)
    }
}

impl Scene {
    /// # Errors
    ///
    /// Fails when the JSON does not describe a scene.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// # Errors
    ///
    /// Fails when the file cannot be read or parsed.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("reading scene {}", path.display()))?;
        Self::from_str(&json).with_context(|| format!("parsing scene {}", path.display()))
    }

    /// The bundled quad area: a walled 20 x 20 arena with ten ice patches.
    ///
    /// # Errors
    ///
    /// Only if the bundled JSON is broken.
    pub fn quad_area() -> Result<Self> {
        Self::from_str(QUAD_AREA).context("parsing bundled quad area")
    }

    /// Create a collider for every node that declares one and return the
    /// world-space node tree.
    ///
    /// # Errors
    ///
    /// Fails on the first invalid collider shape, naming its node.
    pub fn instantiate(&self, sim: &mut PhysicsSim) -> Result<SceneNode> {
        let root = instantiate_node(&self.root, &Pose::IDENTITY, sim)?;
        tracing::debug!(
            scene = %root.name,
            colliders = sim.colliders.len(),
            "scene instantiated"
        );
        Ok(root)
    }
}

fn instantiate_node(def: &NodeDef, parent: &Pose, sim: &mut PhysicsSim) -> Result<SceneNode> {
    let local = Pose::new(
        Vec3::from(def.position),
        euler_degrees(def.rotation[0], def.rotation[1], def.rotation[2]),
    );
    let pose = parent.compose(&local);

    let collider = match &def.collider {
        Some(collider) => {
            let tag = def.tag.as_deref().unwrap_or(UNTAGGED);
            let handle = sim
                .add_collider(collider.shape(), pose, collider.trigger(), tag)
                .with_context(|| format!("collider of node {}", def.name))?;
            Some(handle)
        }
        None => None,
    };

    let children = def
        .children
        .iter()
        .map(|child| instantiate_node(child, &pose, sim))
        .collect::<Result<Vec<_>>>()?;

    Ok(SceneNode {
        name: def.name.clone(),
        tag: def.tag.clone(),
        pose,
        collider,
        ice_patch: def.ice_patch,
        children,
    })
}
