use tracing::warn;

use crate::input::{SpawnCommand, SpawnKind};
use crate::math::Vec2;
use crate::systems::SpawnOutcome;

use super::WorldCore;

pub(super) fn spawn(world: &mut WorldCore, command: &SpawnCommand, now: f64) -> SpawnOutcome {
    if !command.position.x.is_finite() || !command.position.y.is_finite() {
        warn!(?command, "spawn with non-finite position ignored");
        return SpawnOutcome::Discarded;
    }
    world.lifecycle.spawn(
        command,
        now,
        &world.config,
        &mut world.particles,
        &mut world.blobs,
    )
}

pub(super) fn spawn_particle(world: &mut WorldCore, pos: Vec2, radius: f32, now: f64) -> SpawnOutcome {
    spawn_kind(world, SpawnKind::Particle, pos, radius, now)
}

pub(super) fn spawn_blob(world: &mut WorldCore, pos: Vec2, radius: f32, now: f64) -> SpawnOutcome {
    spawn_kind(world, SpawnKind::SoftBody, pos, radius, now)
}

fn spawn_kind(world: &mut WorldCore, kind: SpawnKind, pos: Vec2, radius: f32, now: f64) -> SpawnOutcome {
    if !(radius.is_finite() && radius > 0.0) {
        return SpawnOutcome::Discarded;
    }
    let command = SpawnCommand {
        kind,
        position: pos,
        implied_radius: radius,
        direction_hint: Vec2::zero(),
        color_index: world.mapper.next_color(&world.config),
    };
    spawn(world, &command, now)
}

pub(super) fn clear(world: &mut WorldCore) {
    world.particles.clear();
    world.blobs.clear();
    world.frame = 0;
}
