#![cfg(target_arch = "wasm32")]

use sprite_physics::World;
use wasm_bindgen_test::*;

#[wasm_bindgen_test]
fn facade_round_trip() {
    let mut world = World::new();
    world.register_collision_rule("default", "default", "hit");
    let a = world.create_circle(0.0, 0.0, 1.0, 1.0).unwrap();
    let b = world.create_rect(1.5, 0.0, 1.0, 1.0, 1.0).unwrap();
    world.set_gravity(0.0, 0.0).unwrap();
    world.set_velocity(a, 1.0, 0.0).unwrap();
    world.step(1.0 / 60.0);

    assert_eq!(world.body_count(), 2);
    assert_eq!(world.position(a).map(|p| p.len()), Some(2));
    assert!(world.contacts_json().unwrap().contains("\"hit\""));

    world.destroy_body(b);
    assert!(world.bounding_box(b).is_none());
    assert!(world.create_body("{\"shape\":{\"kind\":\"circle\",\"radius\":-1}}").is_err());
}

#[wasm_bindgen_test]
fn facade_touch_test_and_heading() {
    let mut world = World::new();
    let a = world.create_circle(0.0, 0.0, 1.0, 1.0).unwrap();
    let b = world.create_circle(1.5, 0.0, 1.0, 1.0).unwrap();
    assert_eq!(world.is_touching(a, b).ok(), Some(false));

    world.register_collision_rule("default", "default", "hit");
    assert_eq!(world.is_touching(a, b).ok(), Some(true));
    assert!(world.is_touching(a, 99).is_err());

    world.set_angle(a, 45.0).unwrap();
    assert!(world.set_angle(99, 0.0).is_err());
}
