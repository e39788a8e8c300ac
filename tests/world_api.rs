use sprite_physics::{BodyDesc, BroadphaseKind, PhysicsError, PhysicsWorld, Vec2, WorldBounds, WorldConfig};

fn arena() -> PhysicsWorld {
    let config = WorldConfig {
        gravity: Vec2::new(0.0, 200.0),
        bounds: WorldBounds::new(0.0, 480.0, 0.0, 360.0).unwrap(),
        ..Default::default()
    };
    PhysicsWorld::with_config(config).unwrap()
}

#[test]
fn balls_settle_inside_the_stage() {
    let mut world = arena();
    world.register_collision_rule("ball", "ball", "clack");
    world.register_collision_rule("ball", "floor", "land");
    world
        .create_body(BodyDesc::rect(240.0, 10.0).at(240.0, 350.0).immovable().in_groups(["floor"]))
        .unwrap();

    let ids: Vec<_> = (0..12)
        .map(|i| {
            let desc = BodyDesc::circle(8.0)
                .at(40.0 + i as f32 * 35.0, 40.0 + (i % 3) as f32 * 20.0)
                .with_velocity((i as f32 - 6.0) * 10.0, 0.0)
                .with_bounce(0.4)
                .in_groups(["ball"]);
            world.create_body(desc).unwrap()
        })
        .collect();

    for _ in 0..600 {
        world.step(1.0 / 60.0);
    }

    for id in ids {
        let bb = world.bounding_box(id).unwrap();
        assert!(bb.left >= 0.0 && bb.right <= 480.0, "{id} escaped sideways: {bb:?}");
        assert!(bb.top >= 0.0 && bb.bottom <= 360.0, "{id} escaped vertically: {bb:?}");
        assert!(world.position(id).unwrap().is_finite());
    }
}

#[test]
fn errors_leave_the_world_untouched() {
    let mut world = arena();
    let id = world.create_body(BodyDesc::circle(4.0).at(10.0, 10.0)).unwrap();

    assert!(matches!(
        world.create_body(BodyDesc::circle(4.0).with_id(id)),
        Err(PhysicsError::DuplicateId(_))
    ));
    assert!(matches!(
        world.create_body(BodyDesc::circle(1.0).with_bounce(3.0)),
        Err(PhysicsError::InvalidBody(_))
    ));
    assert!(world.set_gravity(f32::NAN, 0.0).is_err());
    assert_eq!(world.gravity(), Vec2::new(0.0, 200.0));
    assert_eq!(world.body_count(), 1);
}

#[test]
fn strategies_are_interchangeable() {
    let run = |broadphase: BroadphaseKind| {
        let mut world = PhysicsWorld::with_config(WorldConfig {
            broadphase,
            bounds: WorldBounds::new(0.0, 200.0, 0.0, 200.0).unwrap(),
            ..Default::default()
        })
        .unwrap();
        world.register_collision_rule("default", "default", "hit");
        for i in 0..30 {
            let x = 10.0 + (i * 37 % 180) as f32;
            let y = 10.0 + (i * 53 % 180) as f32;
            world.create_body(BodyDesc::circle(6.0).at(x, y)).unwrap();
        }
        let mut seen = Vec::new();
        for _ in 0..5 {
            world.step(1.0 / 30.0);
            seen.push(world.contacts().iter().map(|c| (c.a, c.b)).collect::<Vec<_>>());
        }
        seen
    };

    let brute = run(BroadphaseKind::BruteForce);
    let tree = run(BroadphaseKind::QuadTree { capacity: 3, max_depth: 5 });
    assert_eq!(brute, tree);
}

#[test]
fn contacts_serialize_for_the_frontend() {
    let mut world = PhysicsWorld::with_config(WorldConfig { gravity: Vec2::ZERO, ..Default::default() }).unwrap();
    world.register_collision_rule("default", "default", "touch");
    world.create_body(BodyDesc::circle(1.0)).unwrap();
    world.create_body(BodyDesc::circle(1.0).at(1.5, 0.0)).unwrap();
    world.step(0.01);

    let json = serde_json::to_value(world.contacts()).unwrap();
    assert_eq!(json[0]["a"], 1);
    assert_eq!(json[0]["b"], 2);
    assert_eq!(json[0]["tag"], "touch");
}
