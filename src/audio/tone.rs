//! Tone voice owned by a particle and read by the audio callback.
//!
//! The simulation writes frequency/amplitude once per frame and plucks on
//! collision; the audio side advances the time offset once per buffer. Every
//! field is a plain scalar in an atomic, so a reader on another thread sees at
//! worst a value one frame stale. No lock, no queue.

use std::f64::consts::TAU;
use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};

use crate::domain::SimConfig;

/// Snap `freq` to the nearest node of the log scale anchored at `reference`.
///
/// Non-positive input is silence (0 Hz).
pub fn snap_to_note(freq: f32, reference: f32, divisions: f32) -> f32 {
    if !(freq > 0.0) {
        return 0.0;
    }
    let index = (divisions * (freq / reference).log2()).round();
    reference * 2f32.powf(index / divisions)
}

/// Partial layout and envelope shared by every voice.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ToneShape {
    pub sample_rate: f32,
    pub attack_secs: f32,
    pub decay_secs: f32,
    pub loop_envelope: bool,
    pub envelope_period_secs: f32,
}

impl ToneShape {
    pub fn from_config(config: &SimConfig) -> Self {
        Self {
            sample_rate: config.sample_rate,
            attack_secs: config.attack_secs,
            decay_secs: config.decay_secs,
            loop_envelope: config.loop_envelope,
            envelope_period_secs: config.envelope_period_secs,
        }
    }

    #[inline]
    fn envelope(&self, t: f64) -> f64 {
        let attack = self.attack_secs as f64;
        if t < attack {
            if attack > 0.0 { t / attack } else { 1.0 }
        } else if self.decay_secs > 0.0 {
            (-(t - attack) / self.decay_secs as f64).exp()
        } else {
            0.0
        }
    }
}

impl Default for ToneShape {
    fn default() -> Self {
        Self::from_config(&SimConfig::default())
    }
}

#[derive(Debug)]
pub struct Tone {
    frequency: AtomicU32,
    amplitude: AtomicU32,
    /// Seconds of playback since the last pluck (f64 bits)
    time_offset: AtomicU64,
    /// Bumped by every pluck so a render in flight can tell it was reset
    plucks: AtomicU32,
}

impl Tone {
    pub fn new(frequency: f32, amplitude: f32) -> Self {
        Self {
            frequency: AtomicU32::new(frequency.to_bits()),
            amplitude: AtomicU32::new(amplitude.to_bits()),
            time_offset: AtomicU64::new(0f64.to_bits()),
            plucks: AtomicU32::new(0),
        }
    }

    pub fn frequency(&self) -> f32 {
        f32::from_bits(self.frequency.load(Ordering::Relaxed))
    }

    pub fn set_frequency(&self, hz: f32) {
        self.frequency.store(hz.to_bits(), Ordering::Relaxed);
    }

    pub fn amplitude(&self) -> f32 {
        f32::from_bits(self.amplitude.load(Ordering::Relaxed))
    }

    pub fn set_amplitude(&self, amplitude: f32) {
        self.amplitude.store(amplitude.to_bits(), Ordering::Relaxed);
    }

    pub fn time_offset(&self) -> f64 {
        f64::from_bits(self.time_offset.load(Ordering::Relaxed))
    }

    /// Restart the envelope: the next buffer begins with a fresh attack.
    pub fn pluck(&self) {
        self.plucks.fetch_add(1, Ordering::SeqCst);
        self.time_offset.store(0f64.to_bits(), Ordering::SeqCst);
    }

    /// Add `out.len()` samples of this voice into `out` and advance the clock.
    pub fn render_into(&self, out: &mut [f32], shape: &ToneShape) {
        let sr = shape.sample_rate as f64;
        let freq = self.frequency() as f64;
        let amp = self.amplitude() as f64;
        let generation = self.plucks.load(Ordering::SeqCst);
        let start = f64::from_bits(self.time_offset.load(Ordering::SeqCst));
        let nyquist = sr / 2.0;
        let period = shape.envelope_period_secs as f64;

        for (i, sample) in out.iter_mut().enumerate() {
            let mut t = start + i as f64 / sr;
            if shape.loop_envelope && period > 0.0 {
                t %= period;
            }

            let mut wave = 0.8 * (TAU * freq * t).sin();
            if freq * 2.0 < nyquist {
                wave += 0.3 * (TAU * freq * 2.0 * t).sin();
            }
            if freq * 3.0 < nyquist {
                wave += 0.2 * (TAU * freq * 3.0 * t).sin();
            }

            *sample += (amp * wave * shape.envelope(t)) as f32;
        }

        // A pluck that arrived while rendering wins over the advance.
        let advanced = start + out.len() as f64 / sr;
        self.time_offset.store(advanced.to_bits(), Ordering::SeqCst);
        if self.plucks.load(Ordering::SeqCst) != generation {
            self.time_offset.store(0f64.to_bits(), Ordering::SeqCst);
        }
    }

    /// Fresh buffer of `frame_count` samples for this voice alone.
    pub fn waveform_samples(&self, frame_count: usize, shape: &ToneShape) -> Vec<f32> {
        let mut out = vec![0.0f32; frame_count];
        self.render_into(&mut out, shape);
        out
    }
}
