//! World - the per-frame simulation of blobs, particles and the pointer.
//!
//! WorldCore only orchestrates; the math lives in systems/:
//! - soft_body.rs  constraint solve + integration
//! - particle.rs   integration, tone retune, trails
//! - collision.rs  spatial-hash overlap resolution
//! - lifecycle.rs  spawn, expiry, fragmentation
//!
//! Frame order (see step/step.rs): input -> spawn -> expiry (staged) ->
//! soft bodies -> collisions -> particles.

use std::sync::Arc;

use crate::audio::{AudioMixer, Tone, ToneShape};
use crate::domain::SimConfig;
use crate::input::{InputMapper, PoseFrame, SpawnCommand};
use crate::math::Vec2;
use crate::render::RenderShape;
use crate::systems::{
    CollisionResolver, CollisionStats, ExpiryReport, Lifecycle, Particle, PointMass, SoftBody,
    SpawnOutcome,
};

#[path = "perf/perf_timer.rs"]
mod perf_timer;
#[path = "perf/perf_stats.rs"]
mod perf_stats;
#[path = "step/step.rs"]
mod step;
#[path = "commands/commands.rs"]
mod commands;
#[path = "render/render_extract.rs"]
mod render_extract;
#[path = "audio/audio_pull.rs"]
mod audio_pull;
#[path = "init/init.rs"]
mod init;
#[path = "init/settings.rs"]
mod settings;
mod facade;

pub use facade::{AbiLayout, World};
pub use perf_stats::PerfStats;

use perf_timer::PerfTimer;

/// The simulation world
pub struct WorldCore {
    config: Arc<SimConfig>,

    particles: Vec<Particle>,
    blobs: Vec<SoftBody>,
    /// Immune body driven by the right wrist; never ages, never fragments
    pointer: PointMass,

    mapper: InputMapper,
    lifecycle: Lifecycle,
    resolver: CollisionResolver,
    mixer: AudioMixer,

    // State
    now: f64,
    frame: u64,
    rng_state: u32,

    // Reused output buffers
    render_buffer: Vec<f32>,
    audio_buffer: Vec<f32>,

    // Perf metrics
    perf_enabled: bool,
    perf_stats: PerfStats,
}

impl WorldCore {
    /// Create a world; the config is validated first.
    pub fn new(config: SimConfig) -> Result<Self, String> {
        config.validate()?;
        Ok(init::create_world_core(config))
    }

    pub fn from_json(json: &str) -> Result<Self, String> {
        let config = SimConfig::from_json(json)?;
        Ok(init::create_world_core(config))
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn blobs(&self) -> &[SoftBody] {
        &self.blobs
    }

    pub fn pointer(&self) -> &PointMass {
        &self.pointer
    }

    pub fn particle_count(&self) -> usize {
        self.particles.len()
    }

    pub fn blob_count(&self) -> usize {
        self.blobs.len()
    }

    /// Particles plus blobs; the quantity capped by `max_entities`.
    pub fn entity_count(&self) -> usize {
        self.particles.len() + self.blobs.len()
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Clock value of the last step
    pub fn now(&self) -> f64 {
        self.now
    }

    /// Enable or disable per-step perf metrics (adds timing overhead when enabled)
    pub fn enable_perf_metrics(&mut self, enabled: bool) {
        settings::enable_perf_metrics(self, enabled);
    }

    /// Last step perf snapshot (zeros when perf disabled)
    pub fn get_perf_stats(&self) -> PerfStats {
        settings::get_perf_stats(self)
    }

    /// Park the pointer somewhere without giving it velocity
    pub fn set_pointer(&mut self, pos: Vec2) {
        settings::set_pointer(self, pos);
    }

    // === SPAWNING ===

    /// Apply one spawn command at clock `now`
    pub fn spawn(&mut self, command: &SpawnCommand, now: f64) -> SpawnOutcome {
        commands::spawn(self, command, now)
    }

    pub fn spawn_particle(&mut self, pos: Vec2, radius: f32, now: f64) -> SpawnOutcome {
        commands::spawn_particle(self, pos, radius, now)
    }

    pub fn spawn_blob(&mut self, pos: Vec2, radius: f32, now: f64) -> SpawnOutcome {
        commands::spawn_blob(self, pos, radius, now)
    }

    /// Remove every particle and blob
    pub fn clear(&mut self) {
        commands::clear(self)
    }

    // === FRAME ===

    /// Advance one display frame.
    ///
    /// `pose` is `None` when capture or inference produced nothing; that only
    /// suppresses spawning for this frame.
    pub fn step(&mut self, dt: f32, now: f64, pose: Option<&PoseFrame>) {
        step::step(self, dt, now, pose);
    }

    /// Expiry pass alone: removes expired entities and fragments blobs.
    pub fn expire(&mut self, now: f64) -> ExpiryReport {
        step::expire(self, now)
    }

    /// Collision pass alone over particles, ring points and the pointer.
    pub fn resolve_collisions(&mut self) -> CollisionStats {
        step::resolve_collisions(self)
    }

    // === RENDER / AUDIO PULL ===

    /// Draw data for every live entity
    pub fn render_shapes(&self) -> Vec<RenderShape> {
        render_extract::collect_shapes(self)
    }

    /// Encode the render snapshot into the internal flat buffer.
    /// Returns the number of `f32`s written.
    pub fn extract_render_buffer(&mut self) -> usize {
        render_extract::extract_render_buffer(self)
    }

    pub fn render_buffer(&self) -> &[f32] {
        &self.render_buffer
    }

    /// Handles to every audible voice, for an audio thread to hold on to.
    pub fn voices(&self) -> Vec<Arc<Tone>> {
        audio_pull::voices(self)
    }

    /// Mix all live voices into `out`; returns the pre-normalization peak.
    pub fn fill_audio(&self, out: &mut [f32]) -> f32 {
        audio_pull::fill_audio(self, out)
    }

    /// Mix `frames` samples into the internal audio buffer.
    pub fn fill_audio_buffer(&mut self, frames: usize) -> &[f32] {
        audio_pull::fill_audio_buffer(self, frames)
    }

    pub fn audio_buffer(&self) -> &[f32] {
        &self.audio_buffer
    }

    pub fn tone_shape(&self) -> &ToneShape {
        self.mixer.shape()
    }
}

#[cfg(test)]
#[path = "tests/tests.rs"]
mod tests;
