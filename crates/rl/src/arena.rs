//! The arena: every ice patch in one area and the collider lookup for them.

use crate::bridge::ColliderSwitch;
use crate::config::ArenaConfig;
use crate::error::EnvError;
use crate::patch::{IcePatch, PatchId};
use physics::{ColliderHandle, Vec3};
use scene::SceneNode;
use std::collections::HashMap;

/// Tag carried by patch colliders.
pub const ICE_PATCH_TAG: &str = "ice_patch";
/// Tag carried by the arena walls.
pub const BOUNDARY_TAG: &str = "boundary";

#[derive(Clone, Debug)]
pub struct Arena {
    patches: Vec<IcePatch>,
    by_collider: HashMap<ColliderHandle, PatchId>,
    diameter: f32,
    center: Vec3,
    activation_threshold: f32,
}

impl Arena {
    /// Register every ice patch below `root`.
    ///
    /// Nodes marked as patches are collected in tree order; other nodes are
    /// searched recursively. The registry is fixed once built.
    ///
    /// # Errors
    ///
    /// [`EnvError::PatchWithoutCollider`] if a patch node has no collider and
    /// [`EnvError::DuplicateCollider`] if two patches share one.
    pub fn build(root: &SceneNode, config: &ArenaConfig) -> Result<Self, EnvError> {
        let mut arena = Self {
            patches: Vec::new(),
            by_collider: HashMap::new(),
            diameter: config.diameter,
            center: config.center(),
            activation_threshold: config.activation_threshold,
        };
        arena.collect_patches(root)?;

        tracing::debug!(patches = arena.patches.len(), "arena registry built");
        Ok(arena)
    }

    fn collect_patches(&mut self, parent: &SceneNode) -> Result<(), EnvError> {
        for child in &parent.children {
            if !child.ice_patch {
                self.collect_patches(child)?;
                continue;
            }

            let collider = child
                .collider
                .ok_or_else(|| EnvError::PatchWithoutCollider(child.name.clone()))?;
            let id = PatchId(self.patches.len());
            if self.by_collider.insert(collider, id).is_some() {
                return Err(EnvError::DuplicateCollider(collider));
            }
            self.patches.push(IcePatch::new(&child.name, child.pose, collider));
        }
        Ok(())
    }

    #[must_use]
    pub fn patches(&self) -> &[IcePatch] {
        &self.patches
    }

    #[must_use]
    pub fn patch(&self, id: PatchId) -> Option<&IcePatch> {
        self.patches.get(id.0)
    }

    pub fn patch_mut(&mut self, id: PatchId) -> Option<&mut IcePatch> {
        self.patches.get_mut(id.0)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.patches.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.patches.is_empty()
    }

    #[must_use]
    pub fn diameter(&self) -> f32 {
        self.diameter
    }

    #[must_use]
    pub fn center(&self) -> Vec3 {
        self.center
    }

    /// The patch a collider belongs to, if any.
    #[must_use]
    pub fn patch_for_collider(&self, collider: ColliderHandle) -> Option<PatchId> {
        self.by_collider.get(&collider).copied()
    }

    /// Refill every patch; each one independently ends up active or not.
    pub fn reset_ice(&mut self, rng: &mut fastrand::Rng) {
        for patch in &mut self.patches {
            patch.reset(rng, self.activation_threshold);
        }
        tracing::trace!(active = self.active_count(), "ice reset");
    }

    #[must_use]
    pub fn active_count(&self) -> usize {
        self.patches.iter().filter(|p| p.is_active()).count()
    }

    /// A uniformly chosen patch, or `None` for an empty arena.
    pub fn random_patch(&self, rng: &mut fastrand::Rng) -> Option<&IcePatch> {
        if self.patches.is_empty() {
            return None;
        }
        self.patches.get(rng.usize(..self.patches.len()))
    }

    /// One pass over the patches looking for the closest one with ice.
    ///
    /// Starting from `current`, a candidate replaces the running choice when
    /// there is none yet, when the running choice has run dry, or when the
    /// candidate is strictly closer to `from`. The result never names an
    /// empty patch.
    #[must_use]
    pub fn nearest_with_ice(&self, from: Vec3, current: Option<PatchId>) -> Option<PatchId> {
        let mut nearest = current.filter(|id| id.0 < self.patches.len());

        for (index, patch) in self.patches.iter().enumerate() {
            if !patch.has_ice() {
                continue;
            }

            let replace = match nearest {
                None => true,
                Some(id) => {
                    let best = &self.patches[id.0];
                    !best.has_ice() || patch.position().distance(from) < best.position().distance(from)
                }
            };
            if replace {
                nearest = Some(PatchId(index));
            }
        }

        nearest.filter(|id| self.patches[id.0].has_ice())
    }

    /// Enable exactly the colliders of active patches.
    ///
    /// # Errors
    ///
    /// Propagates failures from the collider switch.
    pub fn sync_colliders(&self, switch: &mut impl ColliderSwitch) -> Result<(), EnvError> {
        for patch in &self.patches {
            switch.set_collider_enabled(patch.collider(), patch.is_active())?;
        }
        Ok(())
    }
}
