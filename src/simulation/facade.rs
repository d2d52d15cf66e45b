use wasm_bindgen::prelude::*;

use crate::input::{Landmark, PoseFrame};
use crate::math::Vec2;
use crate::systems::SpawnOutcome;

use super::perf_stats::PerfStats;
use super::WorldCore;

/// Where the shared output buffers live in wasm memory.
///
/// Pointers go stale whenever a buffer grows, so JS should re-read the
/// layout after every `extract_render_buffer` / `fill_audio_buffer`.
#[wasm_bindgen]
pub struct AbiLayout {
    render_ptr: u32,
    render_len_elements: u32,
    render_len_bytes: u32,
    audio_ptr: u32,
    audio_len_elements: u32,
    audio_len_bytes: u32,
}

#[wasm_bindgen]
impl AbiLayout {
    #[wasm_bindgen(getter)]
    pub fn render_ptr(&self) -> u32 { self.render_ptr }
    #[wasm_bindgen(getter)]
    pub fn render_len_elements(&self) -> u32 { self.render_len_elements }
    #[wasm_bindgen(getter)]
    pub fn render_len_bytes(&self) -> u32 { self.render_len_bytes }

    #[wasm_bindgen(getter)]
    pub fn audio_ptr(&self) -> u32 { self.audio_ptr }
    #[wasm_bindgen(getter)]
    pub fn audio_len_elements(&self) -> u32 { self.audio_len_elements }
    #[wasm_bindgen(getter)]
    pub fn audio_len_bytes(&self) -> u32 { self.audio_len_bytes }
}

/// Encode a spawn outcome for JS: 0 particle, 1 soft body, 2 discarded, 3 rejected
fn outcome_code(outcome: SpawnOutcome) -> u8 {
    match outcome {
        SpawnOutcome::Particle => 0,
        SpawnOutcome::SoftBody => 1,
        SpawnOutcome::Discarded => 2,
        SpawnOutcome::Rejected => 3,
    }
}

#[wasm_bindgen]
pub struct World {
    core: WorldCore,
}

#[wasm_bindgen]
impl World {
    /// Create a world from a JSON config; missing keys take defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: Option<String>) -> Result<World, JsValue> {
        let core = match config_json {
            Some(json) => WorldCore::from_json(&json),
            None => WorldCore::new(Default::default()),
        }
        .map_err(|e| JsValue::from_str(&e))?;
        Ok(Self { core })
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> f32 { self.core.config().width }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> f32 { self.core.config().height }

    #[wasm_bindgen(getter)]
    pub fn particle_count(&self) -> u32 { self.core.particle_count() as u32 }

    #[wasm_bindgen(getter)]
    pub fn blob_count(&self) -> u32 { self.core.blob_count() as u32 }

    #[wasm_bindgen(getter)]
    pub fn frame(&self) -> u64 { self.core.frame() }

    #[wasm_bindgen(getter)]
    pub fn sample_rate(&self) -> f32 { self.core.tone_shape().sample_rate }

    /// Active config serialized back to JSON
    pub fn config_json(&self) -> Result<String, JsValue> {
        self.core.config().to_json().map_err(|e| JsValue::from_str(&e))
    }

    /// Enable or disable per-step perf metrics (adds timing overhead when enabled)
    pub fn enable_perf_metrics(&mut self, enabled: bool) {
        self.core.enable_perf_metrics(enabled);
    }

    /// Last step perf snapshot (zeros when perf disabled)
    pub fn get_perf_stats(&self) -> PerfStats {
        self.core.get_perf_stats()
    }

    pub fn spawn_particle(&mut self, x: f32, y: f32, radius: f32, now: f64) -> u8 {
        outcome_code(self.core.spawn_particle(Vec2::new(x, y), radius, now))
    }

    pub fn spawn_blob(&mut self, x: f32, y: f32, radius: f32, now: f64) -> u8 {
        outcome_code(self.core.spawn_blob(Vec2::new(x, y), radius, now))
    }

    pub fn set_pointer(&mut self, x: f32, y: f32) {
        self.core.set_pointer(Vec2::new(x, y));
    }

    pub fn clear(&mut self) {
        self.core.clear();
    }

    /// Step with no tracking data this frame
    pub fn step(&mut self, dt: f32, now: f64) {
        self.core.step(dt, now, None);
    }

    /// Step with a pose frame as JSON (`{"landmarks": {"leftWrist": {..}}}`)
    pub fn step_with_pose_json(&mut self, dt: f32, now: f64, pose_json: &str) -> Result<(), JsValue> {
        let pose = PoseFrame::from_json(pose_json).map_err(|e| JsValue::from_str(&e))?;
        self.core.step(dt, now, Some(&pose));
        Ok(())
    }

    /// Step with a flat BlazePose list: `x, y, visibility` per landmark.
    /// An empty slice counts as "no pose this frame".
    pub fn step_with_landmarks(&mut self, dt: f32, now: f64, landmarks: &[f32]) {
        if landmarks.len() < 3 {
            self.core.step(dt, now, None);
            return;
        }
        let points: Vec<Landmark> = landmarks
            .chunks_exact(3)
            .map(|c| Landmark::new(c[0], c[1], c[2]))
            .collect();
        let pose = PoseFrame::from_blazepose(&points);
        self.core.step(dt, now, Some(&pose));
    }

    // === RENDER ===

    /// Encode the current shapes; returns the number of f32s written.
    pub fn extract_render_buffer(&mut self) -> usize {
        self.core.extract_render_buffer()
    }

    pub fn render_buffer_ptr(&self) -> *const f32 {
        self.core.render_buffer().as_ptr()
    }

    pub fn render_buffer_len(&self) -> usize {
        self.core.render_buffer().len()
    }

    /// Shapes as JSON, for debugging and non-wasm hosts
    pub fn render_snapshot_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.core.render_shapes()).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    // === AUDIO ===

    /// Mix `frames` samples into the shared audio buffer; returns its length.
    pub fn fill_audio_buffer(&mut self, frames: usize) -> usize {
        self.core.fill_audio_buffer(frames).len()
    }

    pub fn audio_buffer_ptr(&self) -> *const f32 {
        self.core.audio_buffer().as_ptr()
    }

    /// Copying variant of `fill_audio_buffer`
    pub fn fill_audio(&self, frames: usize) -> Vec<f32> {
        let mut out = vec![0.0; frames];
        self.core.fill_audio(&mut out);
        out
    }

    pub fn abi_layout(&self) -> AbiLayout {
        let render = self.core.render_buffer();
        let audio = self.core.audio_buffer();
        let f32_bytes = std::mem::size_of::<f32>() as u32;
        AbiLayout {
            render_ptr: render.as_ptr() as usize as u32,
            render_len_elements: render.len() as u32,
            render_len_bytes: render.len() as u32 * f32_bytes,
            audio_ptr: audio.as_ptr() as usize as u32,
            audio_len_elements: audio.len() as u32,
            audio_len_bytes: audio.len() as u32 * f32_bytes,
        }
    }
}
