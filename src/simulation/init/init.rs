use std::sync::Arc;

use crate::audio::{AudioMixer, ToneShape};
use crate::domain::SimConfig;
use crate::input::InputMapper;
use crate::math::seed_state;
use crate::systems::{CollisionResolver, Lifecycle, PointMass};

use super::perf_stats::PerfStats;
use super::WorldCore;

pub(super) fn create_world_core(config: SimConfig) -> WorldCore {
    let mapper = InputMapper::new(&config);
    let pointer = PointMass::new(mapper.pointer(), config.pointer_radius).immune();

    WorldCore {
        particles: Vec::with_capacity(config.max_entities.min(4096)),
        blobs: Vec::new(),
        pointer,

        mapper,
        lifecycle: Lifecycle::new(),
        resolver: CollisionResolver::new(config.cell_size),
        mixer: AudioMixer::new(ToneShape::from_config(&config)),

        now: 0.0,
        frame: 0,
        rng_state: seed_state(config.seed),

        // Start small; both grow on demand and are then reused.
        render_buffer: Vec::with_capacity(1024),
        audio_buffer: Vec::with_capacity(1024),

        perf_enabled: false,
        perf_stats: PerfStats::default(),

        config: Arc::new(config),
    }
}
