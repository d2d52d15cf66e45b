//! Blobtone Engine - gesture-driven soft bodies and singing particles in WASM
//!
//! Every spawned particle carries a tone whose pitch follows its speed and
//! whose envelope restarts on every collision. Soft bodies are Verlet rings
//! held together by edge and area constraints; when they age out they burst
//! into one particle per ring point.
//!
//! Architecture:
//! - math/        - Vec2 and the engine RNG
//! - domain/      - SimConfig and palette
//! - spatial/     - per-frame spatial hash
//! - systems/     - point-mass, soft body, particle, collision, lifecycle
//! - audio/       - tone voices and the mixer
//! - input/       - pose landmarks -> spawn commands + pointer
//! - render/      - data-only shape snapshots
//! - simulation/  - WorldCore orchestration and the wasm facade

pub mod math;
pub mod domain;
pub mod spatial;
pub mod systems;
pub mod audio;
pub mod input;
pub mod render;
pub mod simulation;

use wasm_bindgen::prelude::*;

// Re-export wasm-bindgen-rayon for thread pool initialization
#[cfg(feature = "parallel")]
pub use wasm_bindgen_rayon::init_thread_pool;

// Better error messages in debug mode
#[cfg(feature = "console_error_panic_hook")]
pub fn set_panic_hook() {
    console_error_panic_hook::set_once();
}

/// Initialize the engine
#[wasm_bindgen]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    set_panic_hook();

    web_sys::console::log_1(&"Blobtone engine initialized".into());
}

/// Get engine version
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Snap a frequency to the nearest note of an equal-tempered scale
#[wasm_bindgen]
pub fn snap_frequency(freq: f32, reference: f32, divisions: f32) -> f32 {
    audio::snap_to_note(freq, reference, divisions)
}

// Re-export main types
pub use domain::SimConfig;
pub use input::{Joint, Landmark, PoseFrame, SpawnCommand, SpawnKind};
pub use simulation::{AbiLayout, PerfStats, World, WorldCore};
pub use systems::{LifePhase, SpawnOutcome};
