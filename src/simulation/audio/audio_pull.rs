use std::sync::Arc;

use crate::audio::Tone;

use super::WorldCore;

pub(super) fn voices(world: &WorldCore) -> Vec<Arc<Tone>> {
    world
        .particles
        .iter()
        .filter_map(|p| p.tone().cloned())
        .collect()
}

pub(super) fn fill_audio(world: &WorldCore, out: &mut [f32]) -> f32 {
    let voices = world.particles.iter().filter_map(|p| p.tone().map(|t| &**t));
    world.mixer.mix(voices, out)
}

pub(super) fn fill_audio_buffer(world: &mut WorldCore, frames: usize) -> &[f32] {
    let mut buffer = std::mem::take(&mut world.audio_buffer);
    buffer.resize(frames, 0.0);
    fill_audio(world, &mut buffer);
    world.audio_buffer = buffer;
    &world.audio_buffer
}
