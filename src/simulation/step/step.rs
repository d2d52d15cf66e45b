use tracing::debug;

use crate::input::PoseFrame;
use crate::systems::{CollisionStats, ExpiryReport, PointMass, SpawnOutcome};

use super::perf_timer::lap;
use super::{PerfTimer, WorldCore};

pub(super) fn step(world: &mut WorldCore, dt: f32, now: f64, pose: Option<&PoseFrame>) {
    let perf_on = world.perf_enabled;
    if perf_on {
        world.perf_stats.reset();
    }
    let step_start = PerfTimer::start_if(perf_on);

    // Bad frame clocks (paused tab, NaN) integrate as a zero-length step.
    let dt = if dt.is_finite() && dt > 0.0 { dt } else { 0.0 };
    world.now = now;

    // === INPUT ===
    let t0 = PerfTimer::start_if(perf_on);
    let mapped = world.mapper.map(pose, now, &world.config);
    world.pointer.place(mapped.pointer);
    if let Some(command) = mapped.spawn {
        let outcome = world.spawn(&command, now);
        if perf_on {
            match outcome {
                SpawnOutcome::Particle | SpawnOutcome::SoftBody => world.perf_stats.spawned += 1,
                SpawnOutcome::Rejected => world.perf_stats.spawns_rejected += 1,
                SpawnOutcome::Discarded => {}
            }
        }
    }
    world.perf_stats.input_ms = lap(t0);

    // === EXPIRY ===
    // Removals and fragment children land here, before anything collides.
    let t0 = PerfTimer::start_if(perf_on);
    let report = expire(world, now);
    world.perf_stats.expiry_ms = lap(t0);
    if perf_on {
        world.perf_stats.particles_expired = report.particles_removed;
        world.perf_stats.blobs_fragmented = report.blobs_fragmented;
        world.perf_stats.children_spawned = report.children_spawned;
        world.perf_stats.children_dropped = report.children_dropped;
    }

    // === SOFT BODIES ===
    let t0 = PerfTimer::start_if(perf_on);
    update_soft_bodies(world, dt);
    world.perf_stats.soft_body_ms = lap(t0);

    // === COLLISIONS ===
    let t0 = PerfTimer::start_if(perf_on);
    let stats = resolve_collisions(world);
    world.perf_stats.collision_ms = lap(t0);

    // === PARTICLES ===
    let t0 = PerfTimer::start_if(perf_on);
    update_particles(world, dt, now);
    world.perf_stats.particle_ms = lap(t0);

    if perf_on {
        world.perf_stats.pairs_checked = stats.pairs_checked;
        world.perf_stats.collisions = stats.collisions;
        world.perf_stats.particle_count = world.particles.len() as u32;
        world.perf_stats.blob_count = world.blobs.len() as u32;
        world.perf_stats.ring_points = world.blobs.iter().map(|b| b.len() as u32).sum();
        world.perf_stats.step_ms = lap(step_start);
    }

    world.frame += 1;
}

pub(super) fn expire(world: &mut WorldCore, now: f64) -> ExpiryReport {
    let report = world.lifecycle.expire(
        now,
        &world.config,
        &mut world.particles,
        &mut world.blobs,
        &mut world.rng_state,
    );
    if report.children_dropped > 0 {
        debug!(dropped = report.children_dropped, "fragment children dropped at entity ceiling");
    }
    report
}

/// Every point-mass takes part: particles, then ring points, then the pointer.
pub(super) fn resolve_collisions(world: &mut WorldCore) -> CollisionStats {
    let ring_points: usize = world.blobs.iter().map(|b| b.len()).sum();
    let mut bodies: Vec<&mut PointMass> = Vec::with_capacity(world.particles.len() + ring_points + 1);

    bodies.extend(world.particles.iter_mut().map(|p| &mut p.body));
    for blob in world.blobs.iter_mut() {
        bodies.extend(blob.points_mut().iter_mut());
    }
    bodies.push(&mut world.pointer);

    world.resolver.resolve_all(&mut bodies)
}

#[cfg(feature = "parallel")]
fn update_soft_bodies(world: &mut WorldCore, dt: f32) {
    use rayon::prelude::*;

    let config = &*world.config;
    world
        .blobs
        .par_iter_mut()
        .for_each(|blob| blob.update(dt, config.friction, config.width, config.height, config.bounce));
}

#[cfg(not(feature = "parallel"))]
fn update_soft_bodies(world: &mut WorldCore, dt: f32) {
    let config = &*world.config;
    for blob in world.blobs.iter_mut() {
        blob.update(dt, config.friction, config.width, config.height, config.bounce);
    }
}

#[cfg(feature = "parallel")]
fn update_particles(world: &mut WorldCore, dt: f32, now: f64) {
    use rayon::prelude::*;

    let config = &*world.config;
    world
        .particles
        .par_iter_mut()
        .for_each(|particle| particle.update(dt, now, config));
}

#[cfg(not(feature = "parallel"))]
fn update_particles(world: &mut WorldCore, dt: f32, now: f64) {
    let config = &*world.config;
    for particle in world.particles.iter_mut() {
        particle.update(dt, now, config);
    }
}
