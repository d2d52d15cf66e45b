use serde::{Deserialize, Serialize};
use tracing::warn;

/// Linear RGB in [0, 1]
pub type Rgb = [f32; 3];

/// Default round-robin spawn palette
pub const DEFAULT_PALETTE: [Rgb; 8] = [
    [1.0, 0.14, 0.0],
    [1.0, 0.0, 0.45],
    [1.0, 0.52, 0.0],
    [1.0, 0.89, 0.78],
    [0.58, 1.0, 0.0],
    [0.05, 0.08, 1.0],
    [0.96, 0.0, 1.0],
    [1.0, 1.0, 1.0],
];

/// Immutable simulation settings.
///
/// Built once (defaults or JSON) and handed by reference to every system.
/// Lengths are canvas pixels, times are seconds unless the name says `_ms`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SimConfig {
    // === Canvas / loop ===
    pub width: f32,
    pub height: f32,
    pub target_fps: f32,

    // === Population ===
    /// Ceiling on live particles + blobs; spawns past it are rejected.
    pub max_entities: usize,
    pub spawn_delay_ms: f32,
    pub max_age: f64,
    pub max_particle_radius: f32,
    /// Implied radius below this is discarded instead of spawned.
    pub min_particle_radius: f32,
    /// Implied radius above `max_particle_radius / blob_radius_divisor` spawns a blob.
    pub blob_radius_divisor: f32,
    pub blob_points: usize,
    pub ring_point_radius: f32,
    pub spawn_impulse: f32,
    pub fragment_max_radius: f32,
    pub fragment_impulse: f32,

    // === Physics ===
    pub friction: f32,
    pub bounce: f32,
    pub cell_size: f32,

    // === Trails ===
    pub max_trail_age: f64,
    pub trail_min_step: f32,

    // === Pointer / input ===
    pub pointer_radius: f32,
    pub visibility_threshold: f32,

    // === Tone ===
    /// Tone amplitude per pixel of radius.
    pub area_scale: f32,
    pub speed_to_frequency: f32,
    pub reference_frequency: f32,
    pub divisions_per_octave: f32,
    pub sample_rate: f32,
    pub attack_secs: f32,
    pub decay_secs: f32,
    pub loop_envelope: bool,
    pub envelope_period_secs: f32,

    // === Render ===
    pub outline_segments: usize,
    pub pointer_alpha: f32,

    pub palette: Vec<Rgb>,
    pub seed: u32,
}

impl Default for SimConfig {
    fn default() -> Self {
        SimConfig {
            width: 1600.0,
            height: 900.0,
            target_fps: 120.0,

            max_entities: 4000,
            spawn_delay_ms: 1000.0,
            max_age: 10.0,
            max_particle_radius: 300.0,
            min_particle_radius: 1.0,
            blob_radius_divisor: 3.0,
            blob_points: 16,
            ring_point_radius: 0.0,
            spawn_impulse: 10.0,
            fragment_max_radius: 30.0,
            fragment_impulse: 200.0,

            friction: 0.02,
            bounce: 1.0,
            cell_size: 50.0,

            max_trail_age: 0.5,
            trail_min_step: 1.0,

            pointer_radius: 100.0,
            visibility_threshold: 0.5,

            area_scale: 0.003,
            speed_to_frequency: 70.0,
            reference_frequency: 440.0,
            divisions_per_octave: 12.0,
            sample_rate: 44_100.0,
            attack_secs: 0.1,
            decay_secs: 0.4,
            loop_envelope: false,
            envelope_period_secs: 2.0,

            outline_segments: 20,
            pointer_alpha: 0.1,

            palette: DEFAULT_PALETTE.to_vec(),
            seed: 12345,
        }
    }
}

impl SimConfig {
    /// Parse a (possibly partial) JSON config; missing keys take defaults.
    pub fn from_json(json: &str) -> Result<Self, String> {
        let config: SimConfig = serde_json::from_str(json).map_err(|e| e.to_string())?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, String> {
        serde_json::to_string(self).map_err(|e| e.to_string())
    }

    pub fn validate(&self) -> Result<(), String> {
        if !(self.width > 0.0 && self.height > 0.0) {
            return Err(format!("canvas must be non-empty, got {}x{}", self.width, self.height));
        }
        if !(self.cell_size > 0.0) {
            return Err(format!("cellSize must be positive, got {}", self.cell_size));
        }
        if !(self.target_fps > 0.0) {
            return Err(format!("targetFps must be positive, got {}", self.target_fps));
        }
        if !(0.0..1.0).contains(&self.friction) {
            return Err(format!("friction must be in [0, 1), got {}", self.friction));
        }
        if !(self.sample_rate > 0.0) {
            return Err(format!("sampleRate must be positive, got {}", self.sample_rate));
        }
        if !(self.reference_frequency > 0.0 && self.divisions_per_octave > 0.0) {
            return Err("referenceFrequency and divisionsPerOctave must be positive".to_string());
        }
        if !(self.blob_radius_divisor > 0.0) {
            return Err(format!("blobRadiusDivisor must be positive, got {}", self.blob_radius_divisor));
        }
        if self.palette.is_empty() {
            return Err("palette must contain at least one color".to_string());
        }

        // The resolver widens its grid to fit, so this only costs a resize.
        let widest = 2.0 * self.largest_body_radius();
        if self.cell_size < widest {
            warn!(
                cell_size = self.cell_size,
                widest,
                "cell size is smaller than the widest body; collision grid will be widened"
            );
        }
        Ok(())
    }

    /// Largest radius any colliding body can have: spawned and fragment
    /// particles, and the pointer.
    pub fn largest_body_radius(&self) -> f32 {
        let spawned = self.max_particle_radius / self.blob_radius_divisor;
        spawned.max(self.fragment_max_radius).max(self.pointer_radius)
    }

    pub fn target_dt(&self) -> f32 {
        1.0 / self.target_fps
    }

    pub fn color(&self, index: usize) -> Rgb {
        match self.palette.len() {
            0 => [1.0, 1.0, 1.0],
            n => self.palette[index % n],
        }
    }
}
