use blobtone_engine::math::Vec2;
use blobtone_engine::{SimConfig, WorldCore};

#[test]
fn perf_smoke_step() {
    let mut world = WorldCore::new(SimConfig::default()).unwrap();
    world.enable_perf_metrics(true);
    for i in 0..400 {
        let x = 20.0 + (i % 40) as f32 * 35.0;
        let y = 20.0 + (i / 40) as f32 * 35.0;
        world.spawn_particle(Vec2::new(x, y), 10.0 + (i % 7) as f32 * 2.0, 0.0);
    }
    world.spawn_blob(Vec2::new(800.0, 450.0), 150.0, 0.0);

    let dt = 1.0 / 120.0;
    for frame in 1..=60 {
        world.step(dt, frame as f64 * dt as f64, None);
    }
    let stats = world.get_perf_stats();
    assert!(stats.step_ms() >= 0.0);
    assert!(stats.pairs_checked() > 0);
    assert_eq!(stats.particle_count(), 400);
    assert_eq!(stats.ring_points(), 16);
}
