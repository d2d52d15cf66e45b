use std::collections::VecDeque;
use std::sync::Arc;

use crate::audio::{snap_to_note, Tone};
use crate::domain::{Rgb, SimConfig};
use crate::math::Vec2;

use super::lifecycle::LifePhase;
use super::point_mass::PointMass;

/// One historical position of a particle
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrailSample {
    pub pos: Vec2,
    pub time: f64,
}

/// Time-ordered trail; only the age window bounds it, not a count.
#[derive(Clone, Debug, Default)]
pub struct Trail {
    samples: VecDeque<TrailSample>,
}

impl Trail {
    pub fn push(&mut self, pos: Vec2, time: f64) {
        self.samples.push_back(TrailSample { pos, time });
    }

    /// Drop every sample at least `max_age` old. Samples are time-ordered,
    /// so pruning stops at the first young one.
    pub fn prune(&mut self, now: f64, max_age: f64) {
        while let Some(front) = self.samples.front() {
            if now - front.time < max_age {
                break;
            }
            self.samples.pop_front();
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &TrailSample> {
        self.samples.iter()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

/// A single tone-bearing point-mass with a fading trail
pub struct Particle {
    pub body: PointMass,
    pub born_at: f64,
    pub color: Rgb,
    pub trail: Trail,
    pub phase: LifePhase,
}

impl Particle {
    /// Audible particle; amplitude scales with radius.
    pub fn new(pos: Vec2, radius: f32, color: Rgb, born_at: f64, config: &SimConfig) -> Self {
        let tone = Arc::new(Tone::new(0.0, radius * config.area_scale));
        Self {
            body: PointMass::new(pos, radius).with_tone(tone),
            born_at,
            color,
            trail: Trail::default(),
            phase: LifePhase::Spawned,
        }
    }

    pub fn tone(&self) -> Option<&Arc<Tone>> {
        self.body.tone.as_ref()
    }

    pub fn age(&self, now: f64) -> f64 {
        now - self.born_at
    }

    /// Integrate, retune from speed, record and prune the trail, clamp.
    pub fn update(&mut self, dt: f32, now: f64, config: &SimConfig) {
        let vel = self.body.integrate(dt, config.friction);

        if let Some(tone) = &self.body.tone {
            let raw = vel.length() * config.speed_to_frequency;
            tone.set_frequency(snap_to_note(raw, config.reference_frequency, config.divisions_per_octave));
        }

        let step = self.body.pos - self.body.prev_pos;
        if step.length_squared() > config.trail_min_step * config.trail_min_step {
            self.trail.push(self.body.prev_pos, now);
        }
        self.trail.prune(now, config.max_trail_age);

        self.body.constrain_to_bounds(config.width, config.height, config.bounce);

        if self.phase == LifePhase::Spawned {
            self.phase = LifePhase::Active;
        }
    }
}
