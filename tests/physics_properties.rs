use blobtone_engine::audio::snap_to_note;
use blobtone_engine::input::{InputMapper, Joint, Landmark, PoseFrame};
use blobtone_engine::math::Vec2;
use blobtone_engine::systems::{CollisionResolver, PointMass, SoftBody};
use blobtone_engine::{SimConfig, WorldCore};

const DT: f32 = 1.0 / 120.0;

fn positions(bodies: &[PointMass]) -> Vec<Vec2> {
    bodies.iter().map(|b| b.pos).collect()
}

fn resolve(resolver: &mut CollisionResolver, bodies: &mut [PointMass]) {
    let mut refs: Vec<&mut PointMass> = bodies.iter_mut().collect();
    resolver.resolve_all(&mut refs);
}

#[test]
fn undamped_point_mass_is_ballistic() {
    let mut p = PointMass::new(Vec2::new(50.0, 80.0), 4.0);
    p.prev_pos = Vec2::new(48.0, 81.0);
    for _ in 0..10 {
        let before = p.pos;
        let displacement = p.pos - p.prev_pos;
        p.integrate(DT, 0.0);
        assert_eq!(p.pos, before + displacement);
    }
    assert_eq!(p.pos, Vec2::new(70.0, 70.0));
}

#[test]
fn soft_body_area_settles_near_rest_area() {
    let mut blob = SoftBody::new(Vec2::new(800.0, 450.0), 16, 150.0, 0.0, [1.0, 1.0, 1.0], 0.0);
    for _ in 0..3000 {
        blob.update(DT, 0.02, 1600.0, 900.0, 0.5);
    }
    let ratio = blob.area() / blob.rest_area;
    assert!((ratio - 1.0).abs() < 0.01, "area ratio {ratio}");
}

#[test]
fn separated_pair_is_untouched() {
    let mut resolver = CollisionResolver::new(100.0);
    let mut bodies = vec![
        PointMass::new(Vec2::new(100.0, 100.0), 10.0),
        PointMass::new(Vec2::new(120.0, 100.0), 10.0),
        PointMass::new(Vec2::new(300.0, 300.0), 10.0),
    ];
    let before = positions(&bodies);
    resolve(&mut resolver, &mut bodies);
    assert_eq!(positions(&bodies), before);
}

#[test]
fn overlapping_pair_splits_symmetrically_to_contact() {
    let mut resolver = CollisionResolver::new(100.0);
    let mut bodies = vec![
        PointMass::new(Vec2::new(100.0, 100.0), 10.0),
        PointMass::new(Vec2::new(105.0, 100.0), 10.0),
    ];
    resolve(&mut resolver, &mut bodies);

    assert_eq!(bodies[0].pos.distance(bodies[1].pos), 20.0);
    assert_eq!(bodies[0].pos, Vec2::new(92.5, 100.0));
    assert_eq!(bodies[1].pos, Vec2::new(112.5, 100.0));
}

#[test]
fn immune_body_holds_while_the_other_moves() {
    let mut resolver = CollisionResolver::new(100.0);
    let mut bodies = vec![
        PointMass::new(Vec2::new(100.0, 100.0), 10.0).immune(),
        PointMass::new(Vec2::new(105.0, 100.0), 10.0),
    ];
    resolve(&mut resolver, &mut bodies);

    assert_eq!(bodies[0].pos, Vec2::new(100.0, 100.0));
    assert_eq!(bodies[0].pos.distance(bodies[1].pos), 20.0);

    // Same outcome with the immune body second in line
    let mut bodies = vec![
        PointMass::new(Vec2::new(105.0, 100.0), 10.0),
        PointMass::new(Vec2::new(100.0, 100.0), 10.0).immune(),
    ];
    resolve(&mut resolver, &mut bodies);
    assert_eq!(bodies[1].pos, Vec2::new(100.0, 100.0));
    assert_eq!(bodies[0].pos, Vec2::new(120.0, 100.0));
}

#[test]
fn second_resolve_on_separated_bodies_is_a_no_op() {
    let mut resolver = CollisionResolver::new(100.0);
    let mut bodies = vec![
        PointMass::new(Vec2::new(100.0, 100.0), 10.0),
        PointMass::new(Vec2::new(105.0, 100.0), 10.0),
        PointMass::new(Vec2::new(400.0, 100.0), 10.0),
    ];
    resolve(&mut resolver, &mut bodies);
    let settled = positions(&bodies);

    let mut refs: Vec<&mut PointMass> = bodies.iter_mut().collect();
    let stats = resolver.resolve_all(&mut refs);
    assert_eq!(stats.collisions, 0);
    assert_eq!(positions(&bodies), settled);
}

#[test]
fn expired_soft_body_fragments_into_one_particle_per_ring_point() {
    let mut world = WorldCore::new(SimConfig::default()).unwrap();
    world.spawn_blob(Vec2::new(800.0, 450.0), 150.0, 0.0);

    let mut now = 0.0;
    for _ in 0..30 {
        now += DT as f64;
        world.step(DT, now, None);
    }
    let ring: Vec<Vec2> = world.blobs()[0].points().iter().map(|p| p.pos).collect();

    world.expire(10.001);
    assert_eq!(world.blob_count(), 0);
    assert_eq!(world.particle_count(), 16);
    let children: Vec<Vec2> = world.particles().iter().map(|p| p.body.pos).collect();
    assert_eq!(children, ring);
}

#[test]
fn still_wrist_never_spawns() {
    let config = SimConfig::default();
    let mut mapper = InputMapper::new(&config);
    let frame = PoseFrame::default().with(Joint::LeftWrist, Landmark::new(0.3, 0.6, 1.0));

    for i in 0..1000 {
        let out = mapper.map(Some(&frame), i as f64 * 5.0, &config);
        assert!(out.spawn.is_none());
    }
}

#[test]
fn low_visibility_wrist_counts_as_still() {
    let config = SimConfig::default();
    let mut mapper = InputMapper::new(&config);
    mapper.map(
        Some(&PoseFrame::default().with(Joint::LeftWrist, Landmark::new(0.1, 0.5, 1.0))),
        0.0,
        &config,
    );
    let blurry = PoseFrame::default().with(Joint::LeftWrist, Landmark::new(0.4, 0.5, 0.2));
    assert!(mapper.map(Some(&blurry), 1.0, &config).spawn.is_none());
}

#[test]
fn tone_snaps_to_nearest_semitone() {
    assert!((snap_to_note(450.0, 440.0, 12.0) - 440.0).abs() < 1e-3);
    assert_eq!(snap_to_note(0.0, 440.0, 12.0), 0.0);
}
