//! Depletable ice patches.

use physics::{ColliderHandle, Pose, Vec3};

/// Index of a patch inside its [`crate::Arena`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PatchId(pub usize);

/// A patch of ice the drone can salt away.
///
/// `active` mirrors whether the patch is present in the world. Salting a
/// patch empty deactivates it, but a reset refills every patch and then
/// activates only a random subset, so a full patch may still be inactive.
#[derive(Clone, Debug)]
pub struct IcePatch {
    name: String,
    position: Vec3,
    up: Vec3,
    collider: ColliderHandle,
    amount: f32,
    active: bool,
}

impl IcePatch {
    /// A full, active patch at `pose`.
    #[must_use]
    pub fn new(name: impl Into<String>, pose: Pose, collider: ColliderHandle) -> Self {
        Self {
            name: name.into(),
            position: pose.position,
            up: pose.up(),
            collider,
            amount: 1.0,
            active: true,
        }
    }

    /// Replace the remaining amount; the patch is active iff it has ice.
    #[must_use]
    pub fn with_amount(mut self, amount: f32) -> Self {
        self.amount = amount.max(0.0);
        self.active = self.amount > 0.0;
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Unit vector pointing straight out of the patch.
    #[must_use]
    pub fn up(&self) -> Vec3 {
        self.up
    }

    #[must_use]
    pub fn collider(&self) -> ColliderHandle {
        self.collider
    }

    #[must_use]
    pub fn ice_amount(&self) -> f32 {
        self.amount
    }

    #[must_use]
    pub fn has_ice(&self) -> bool {
        self.amount > 0.0
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Remove up to `amount` of ice and return how much was actually taken.
    ///
    /// The full request is subtracted before flooring at zero; emptying the
    /// patch deactivates it.
    pub fn salt(&mut self, amount: f32) -> f32 {
        // NaN requests remove nothing
        if amount.is_nan() {
            return 0.0;
        }

        let taken = amount.clamp(0.0, self.amount);
        self.amount -= amount;

        if self.amount <= 0.0 {
            self.amount = 0.0;
            self.active = false;
        }

        taken
    }

    /// Refill the patch and activate it with probability `1 - threshold`.
    pub fn reset(&mut self, rng: &mut fastrand::Rng, threshold: f32) {
        self.active = false;
        self.amount = 1.0;

        if rng.f32() > threshold {
            self.active = true;
        }
    }
}
