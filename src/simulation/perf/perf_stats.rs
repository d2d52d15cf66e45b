use wasm_bindgen::prelude::*;

/// Timings and counters for the last step (all zero while perf is disabled)
#[wasm_bindgen]
#[derive(Clone, Debug, Default)]
pub struct PerfStats {
    pub(super) step_ms: f64,
    pub(super) input_ms: f64,
    pub(super) expiry_ms: f64,
    pub(super) soft_body_ms: f64,
    pub(super) collision_ms: f64,
    pub(super) particle_ms: f64,

    pub(super) particle_count: u32,
    pub(super) blob_count: u32,
    pub(super) ring_points: u32,
    pub(super) pairs_checked: u32,
    pub(super) collisions: u32,
    pub(super) spawned: u32,
    pub(super) spawns_rejected: u32,
    pub(super) particles_expired: u32,
    pub(super) blobs_fragmented: u32,
    pub(super) children_spawned: u32,
    pub(super) children_dropped: u32,
}

impl PerfStats {
    pub(crate) fn reset(&mut self) {
        *self = PerfStats::default();
    }
}

#[wasm_bindgen]
impl PerfStats {
    #[wasm_bindgen(getter)]
    pub fn step_ms(&self) -> f64 { self.step_ms }
    #[wasm_bindgen(getter)]
    pub fn input_ms(&self) -> f64 { self.input_ms }
    #[wasm_bindgen(getter)]
    pub fn expiry_ms(&self) -> f64 { self.expiry_ms }
    #[wasm_bindgen(getter)]
    pub fn soft_body_ms(&self) -> f64 { self.soft_body_ms }
    #[wasm_bindgen(getter)]
    pub fn collision_ms(&self) -> f64 { self.collision_ms }
    #[wasm_bindgen(getter)]
    pub fn particle_ms(&self) -> f64 { self.particle_ms }
    #[wasm_bindgen(getter)]
    pub fn particle_count(&self) -> u32 { self.particle_count }
    #[wasm_bindgen(getter)]
    pub fn blob_count(&self) -> u32 { self.blob_count }
    #[wasm_bindgen(getter)]
    pub fn ring_points(&self) -> u32 { self.ring_points }
    #[wasm_bindgen(getter)]
    pub fn pairs_checked(&self) -> u32 { self.pairs_checked }
    #[wasm_bindgen(getter)]
    pub fn collisions(&self) -> u32 { self.collisions }
    #[wasm_bindgen(getter)]
    pub fn spawned(&self) -> u32 { self.spawned }
    #[wasm_bindgen(getter)]
    pub fn spawns_rejected(&self) -> u32 { self.spawns_rejected }
    #[wasm_bindgen(getter)]
    pub fn particles_expired(&self) -> u32 { self.particles_expired }
    #[wasm_bindgen(getter)]
    pub fn blobs_fragmented(&self) -> u32 { self.blobs_fragmented }
    #[wasm_bindgen(getter)]
    pub fn children_spawned(&self) -> u32 { self.children_spawned }
    #[wasm_bindgen(getter)]
    pub fn children_dropped(&self) -> u32 { self.children_dropped }
}
