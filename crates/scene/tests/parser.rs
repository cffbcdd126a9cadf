use physics::{PhysicsSim, Shape, Vec3};
use scene::Scene;
use std::fs;

#[test]
fn parse_two_patches() {
    let json = fs::read_to_string("tests/data/two_patches.json").unwrap();
    let scene = Scene::from_str(&json).unwrap();
    assert_eq!(scene.root.name, "tiny");
    assert_eq!(scene.root.children.len(), 2);
    assert!(scene.root.children[1].children.iter().all(|c| c.ice_patch));
}

#[test]
fn instantiate_creates_tagged_colliders() {
    let scene = Scene::from_path("tests/data/two_patches.json").unwrap();
    let mut sim = PhysicsSim::new();
    let root = scene.instantiate(&mut sim).unwrap();

    assert_eq!(sim.colliders.len(), 3);
    let p0 = root.find("p0").unwrap();
    let handle = p0.collider.unwrap();
    let collider = sim.collider(handle).unwrap();
    assert_eq!(collider.tag, "ice_patch");
    assert!(collider.trigger);
    assert!(matches!(collider.shape, Shape::Sphere { .. }));
    assert!((collider.pose.position - Vec3::new(1.0, 1.0, 0.0)).length() < 1e-6);

    let wall = root.find("wall").unwrap();
    assert!(!sim.collider(wall.collider.unwrap()).unwrap().trigger);
}

#[test]
fn bad_collider_is_rejected() {
    let scene = Scene::from_path("tests/data/bad_radius.json").unwrap();
    let mut sim = PhysicsSim::new();
    let err = scene.instantiate(&mut sim).unwrap_err();
    assert!(format!("{err:#}").contains("p0"));
}

#[test]
fn missing_file_reports_path() {
    let err = Scene::from_path("tests/data/nope.json").unwrap_err();
    assert!(format!("{err:#}").contains("nope.json"));
}

#[test]
fn bundled_quad_area_has_ten_patches() {
    let scene = Scene::quad_area().unwrap();
    let mut sim = PhysicsSim::new();
    let root = scene.instantiate(&mut sim).unwrap();
    assert_eq!(root.walk().filter(|n| n.ice_patch).count(), 10);
    assert!(sim.colliders.iter().any(|c| c.tag == "boundary"));
    // Arena centre is clear for spawning
    assert!(sim.overlap_sphere(Vec3::new(0.0, 1.5, 0.0), 0.05).is_empty());
}

#[test]
fn malformed_json_is_an_error() {
    assert!(Scene::from_str(r#"{ "name": "x", "children": 3 }"#).is_err());
}
