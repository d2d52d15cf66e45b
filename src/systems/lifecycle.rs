//! Lifecycle - spawning, ageing out and fragmentation.
//!
//! Per-entity state machine: `Spawned -> Active -> Expiring -> Removed`.
//! Expired entities are only *marked* during the scan; removals and fragment
//! children are staged and applied together at the end of `expire`, so no
//! list is mutated while it is being walked and no child ever shares a
//! collision pass with its parent.

use serde::Serialize;
use tracing::debug;

use crate::domain::SimConfig;
use crate::input::{SpawnCommand, SpawnKind};
use crate::math::{range_f32, unit_f32};

use super::particle::Particle;
use super::soft_body::SoftBody;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum LifePhase {
    /// Created this frame, not yet integrated
    Spawned,
    Active,
    /// Past max age; leaves the world at the end of the expiry pass
    Expiring,
    /// Terminal. Never observed on a live entity.
    Removed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpawnOutcome {
    Particle,
    SoftBody,
    /// Implied radius too small to be worth spawning
    Discarded,
    /// Entity ceiling reached
    Rejected,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ExpiryReport {
    pub particles_removed: u32,
    pub blobs_fragmented: u32,
    pub children_spawned: u32,
    /// Children not created because the entity ceiling was reached
    pub children_dropped: u32,
}

/// Owns the staging buffers; reused every frame.
#[derive(Default)]
pub struct Lifecycle {
    staged_children: Vec<Particle>,
}

impl Lifecycle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create the entity a spawn command asks for, unless the ceiling is hit.
    pub fn spawn(
        &mut self,
        command: &SpawnCommand,
        now: f64,
        config: &SimConfig,
        particles: &mut Vec<Particle>,
        blobs: &mut Vec<SoftBody>,
    ) -> SpawnOutcome {
        if command.kind == SpawnKind::None {
            return SpawnOutcome::Discarded;
        }

        let live = particles.len() + blobs.len();
        if live >= config.max_entities {
            debug!(live, max = config.max_entities, "spawn rejected: entity ceiling reached");
            return SpawnOutcome::Rejected;
        }

        let color = config.color(command.color_index);
        match command.kind {
            SpawnKind::SoftBody => {
                blobs.push(SoftBody::new(
                    command.position,
                    config.blob_points,
                    command.implied_radius,
                    config.ring_point_radius,
                    color,
                    now,
                ));
                debug!(radius = command.implied_radius, "spawned soft body");
                SpawnOutcome::SoftBody
            }
            SpawnKind::Particle => {
                let mut particle = Particle::new(command.position, command.implied_radius, color, now, config);
                particle
                    .body
                    .apply_acceleration(command.direction_hint * config.spawn_impulse);
                particles.push(particle);
                debug!(radius = command.implied_radius, "spawned particle");
                SpawnOutcome::Particle
            }
            SpawnKind::None => SpawnOutcome::Discarded,
        }
    }

    /// Age everything out against `now`.
    ///
    /// Particles past `max_age` are dropped. Soft bodies past `max_age` are
    /// dropped and replaced, in the same call, by one child particle per ring
    /// point carrying the parent's color and an outward kick.
    pub fn expire(
        &mut self,
        now: f64,
        config: &SimConfig,
        particles: &mut Vec<Particle>,
        blobs: &mut Vec<SoftBody>,
        rng_state: &mut u32,
    ) -> ExpiryReport {
        let mut report = ExpiryReport::default();
        self.staged_children.clear();

        // === Scan: mark only ===
        let mut surviving = 0usize;
        for particle in particles.iter_mut() {
            if particle.age(now) > config.max_age {
                particle.phase = LifePhase::Expiring;
                report.particles_removed += 1;
            } else {
                surviving += 1;
            }
        }
        for blob in blobs.iter_mut() {
            if blob.age(now) > config.max_age {
                blob.phase = LifePhase::Expiring;
            } else {
                surviving += 1;
            }
        }

        let mut room = config.max_entities.saturating_sub(surviving);
        for blob in blobs.iter().filter(|b| b.phase == LifePhase::Expiring) {
            report.blobs_fragmented += 1;
            let (spawned, dropped) = self.stage_fragments(blob, now, config, rng_state, room);
            room -= spawned;
            report.children_spawned += spawned as u32;
            report.children_dropped += dropped as u32;
            debug!(points = blob.len(), spawned, dropped, "soft body fragmented");
        }

        // === Apply: single swap point ===
        particles.retain(|p| p.phase != LifePhase::Expiring);
        blobs.retain(|b| b.phase != LifePhase::Expiring);
        particles.append(&mut self.staged_children);

        report
    }

    fn stage_fragments(
        &mut self,
        blob: &SoftBody,
        now: f64,
        config: &SimConfig,
        rng_state: &mut u32,
        room: usize,
    ) -> (usize, usize) {
        let center = blob.centroid();
        let min_r = config.min_particle_radius;
        let max_r = config.fragment_max_radius.max(min_r);
        let mut spawned = 0usize;

        for point in blob.points().iter().take(room) {
            let radius = range_f32(rng_state, min_r, max_r);
            let mut child = Particle::new(point.pos, radius, blob.color, now, config);
            if let Some(outward) = (point.pos - center).try_normalize() {
                let kick = unit_f32(rng_state) * config.fragment_impulse;
                child.body.apply_acceleration(outward * kick);
            }
            self.staged_children.push(child);
            spawned += 1;
        }

        (spawned, blob.len() - spawned)
    }
}
