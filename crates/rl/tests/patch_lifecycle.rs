use physics::{ColliderHandle, PhysicsSim, Pose, Vec3};
use rl::{
    Arena, ArenaConfig, ColliderSwitch, DroneAgent, DroneConfig, EnvError, Mover, OverlapQuery, PatchId, SimRig,
    SpawnConfig, ICE_PATCH_TAG,
};
use scene::Scene;
use std::cell::Cell;

fn arena() -> (Arena, PhysicsSim) {
    let scene = Scene::from_path(concat!(env!("CARGO_MANIFEST_DIR"), "/tests/data/three_patches.json")).unwrap();
    let mut sim = PhysicsSim::new();
    let root = scene.instantiate(&mut sim).unwrap();
    (Arena::build(&root, &ArenaConfig::default()).unwrap(), sim)
}

fn trainee() -> DroneAgent {
    let config = DroneConfig {
        training_mode: true,
        ..DroneConfig::default()
    };
    let mut agent = DroneAgent::new(config, SpawnConfig::default());
    agent.initialize();
    agent
}

#[test]
fn registry_maps_every_patch_collider() {
    let (arena, sim) = arena();
    assert_eq!(arena.len(), 3);
    for collider in &sim.colliders {
        let id = arena.patch_for_collider(collider.handle).unwrap();
        assert_eq!(arena.patch(id).unwrap().collider(), collider.handle);
    }
}

#[test]
fn two_contacts_empty_a_patch_and_retarget() {
    let (mut arena, _sim) = arena();
    let mut agent = trainee();
    let at_near = Vec3::new(1.0, 0.15, 0.0);
    agent.update_nearest_patch(&arena, at_near);
    assert_eq!(agent.nearest_patch(), Some(PatchId(0)));

    let collider = arena.patch(PatchId(0)).unwrap().collider();

    // First contact takes half and leaves the patch in play
    let received = agent
        .on_trigger_enter_or_stay(&mut arena, collider, ICE_PATCH_TAG, at_near)
        .unwrap();
    assert_eq!(received, 0.5);
    let patch = arena.patch(PatchId(0)).unwrap();
    assert_eq!(patch.ice_amount(), 0.5);
    assert!(patch.is_active());
    assert!((agent.take_reward() - 0.03).abs() < 1e-6);

    // Second contact empties it and the agent moves on
    let received = agent
        .on_trigger_enter_or_stay(&mut arena, collider, ICE_PATCH_TAG, at_near)
        .unwrap();
    assert_eq!(received, 0.5);
    let patch = arena.patch(PatchId(0)).unwrap();
    assert_eq!(patch.ice_amount(), 0.0);
    assert!(!patch.is_active());
    assert_eq!(agent.nearest_patch(), Some(PatchId(1)));
    assert_eq!(agent.ice_obtained(), 1.0);

    // An empty patch pays nothing
    agent.take_reward();
    let received = agent
        .on_trigger_enter_or_stay(&mut arena, collider, ICE_PATCH_TAG, at_near)
        .unwrap();
    assert_eq!(received, 0.0);
    assert_eq!(agent.take_reward(), 0.0);
}

#[test]
fn foreign_collider_is_reported() {
    let (mut arena, _sim) = arena();
    let mut agent = trainee();
    let stray = physics::ColliderHandle(99);
    assert!(matches!(
        agent.on_trigger_enter_or_stay(&mut arena, stray, ICE_PATCH_TAG, Vec3::ZERO),
        Err(rl::EnvError::UnknownCollider(h)) if h == stray
    ));
    // Non-patch triggers are ignored outright
    assert_eq!(
        agent
            .on_trigger_enter_or_stay(&mut arena, stray, "ground", Vec3::ZERO)
            .unwrap(),
        0.0
    );
}

#[test]
fn resets_activate_about_thirty_percent() {
    let scene = Scene::quad_area().unwrap();
    let mut sim = PhysicsSim::new();
    let root = scene.instantiate(&mut sim).unwrap();
    let mut arena = Arena::build(&root, &ArenaConfig::default()).unwrap();
    assert_eq!(arena.len(), 10);

    let mut rng = fastrand::Rng::with_seed(42);
    let mut active = 0;
    for _ in 0..1000 {
        arena.reset_ice(&mut rng);
        assert!(arena.patches().iter().all(|p| p.ice_amount() == 1.0));
        active += arena.active_count();
    }

    let fraction = active as f32 / 10_000.0;
    assert!((fraction - 0.3).abs() < 0.05, "active fraction {fraction}");
}

#[test]
fn nearest_skips_empty_patches_wherever_the_drone_is() {
    let (mut arena, _sim) = arena();
    let mut rng = fastrand::Rng::with_seed(3);

    for round in 0..200 {
        // Drain a random subset of patches
        arena.reset_ice(&mut rng);
        for index in 0..arena.len() {
            if rng.bool() {
                arena.patch_mut(PatchId(index)).unwrap().salt(1.0);
            }
        }
        let from = Vec3::new(rng.f32() * 20.0 - 10.0, 1.0, rng.f32() * 20.0 - 10.0);
        let current = Some(PatchId(rng.usize(..arena.len())));

        let any_left = arena.patches().iter().any(|p| p.has_ice());
        match arena.nearest_with_ice(from, current) {
            Some(id) => assert!(arena.patch(id).unwrap().has_ice(), "round {round}"),
            None => assert!(!any_left, "round {round}: missed a patch with ice"),
        }
    }
}

/// Counts spawn probes on top of a real rig.
struct CountingRig {
    rig: SimRig,
    probes: Cell<u32>,
}

impl OverlapQuery for CountingRig {
    fn overlap_sphere(&self, center: Vec3, radius: f32) -> Vec<ColliderHandle> {
        self.probes.set(self.probes.get() + 1);
        self.rig.overlap_sphere(center, radius)
    }
}

impl Mover for CountingRig {
    fn pose(&self) -> Pose {
        self.rig.pose()
    }
    fn set_pose(&mut self, pose: Pose) {
        self.rig.set_pose(pose);
    }
    fn set_velocities(&mut self, linear: Vec3, angular: Vec3) {
        self.rig.set_velocities(linear, angular);
    }
    fn add_force(&mut self, force: Vec3) {
        self.rig.add_force(force);
    }
    fn sleep(&mut self) {
        self.rig.sleep();
    }
    fn wake(&mut self) {
        self.rig.wake();
    }
}

impl ColliderSwitch for CountingRig {
    fn set_collider_enabled(&mut self, handle: ColliderHandle, enabled: bool) -> Result<(), EnvError> {
        self.rig.set_collider_enabled(handle, enabled)
    }
}

#[test]
fn spawn_search_sees_patches_reactivated_by_the_reset() {
    // One patch large enough to cover every spawn candidate
    let json = r#"{
        "name": "area",
        "children": [{
            "name": "blanket",
            "tag": "ice_patch",
            "ice_patch": true,
            "collider": { "shape": "sphere", "radius": 20.0, "trigger": true }
        }]
    }"#;
    let mut sim = PhysicsSim::new();
    let root = Scene::from_str(json).unwrap().instantiate(&mut sim).unwrap();
    let config = ArenaConfig {
        activation_threshold: -1.0,
        ..ArenaConfig::default()
    };
    let mut arena = Arena::build(&root, &config).unwrap();

    let body = sim.add_body(Pose::IDENTITY, 0.15, 1.0);
    let mut rig = CountingRig {
        rig: SimRig::new(sim, body).unwrap(),
        probes: Cell::new(0),
    };

    // Last episode ended with the patch salted away and switched off
    arena.patch_mut(PatchId(0)).unwrap().salt(1.0);
    arena.sync_colliders(&mut rig).unwrap();
    assert!(!rig.rig.sim().colliders[0].enabled);

    let mut agent = trainee();
    let mut rng = fastrand::Rng::with_seed(8);
    agent.on_episode_begin(&mut arena, &mut rig, &mut rng).unwrap();

    assert!(arena.patch(PatchId(0)).unwrap().is_active());
    assert!(rig.rig.sim().colliders[0].enabled);
    // Every candidate lies inside the live patch, so none is accepted
    assert_eq!(rig.probes.get(), SpawnConfig::default().max_attempts);
    let spawned = rig.pose().position;
    assert!(!rig.rig.overlap_sphere(spawned, 0.05).is_empty());
}
