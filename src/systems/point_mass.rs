use std::sync::Arc;

use crate::audio::Tone;
use crate::math::Vec2;

/// A simulated point with position history but no velocity field.
///
/// Velocity is always `pos - prev_pos`, so any external correction to `pos`
/// (collision push-out, bounds clamp) feeds into the next step for free.
#[derive(Clone, Debug)]
pub struct PointMass {
    pub pos: Vec2,
    pub prev_pos: Vec2,
    /// Accumulated acceleration, cleared by `integrate`
    pub acc: Vec2,
    pub radius: f32,
    /// Displaces others in collisions but is never displaced itself
    pub immune: bool,
    pub tone: Option<Arc<Tone>>,
}

impl PointMass {
    pub fn new(pos: Vec2, radius: f32) -> Self {
        Self {
            pos,
            prev_pos: pos,
            acc: Vec2::zero(),
            radius,
            immune: false,
            tone: None,
        }
    }

    pub fn immune(mut self) -> Self {
        self.immune = true;
        self
    }

    pub fn with_tone(mut self, tone: Arc<Tone>) -> Self {
        self.tone = Some(tone);
        self
    }

    #[inline]
    pub fn velocity(&self) -> Vec2 {
        self.pos - self.prev_pos
    }

    #[inline]
    pub fn apply_acceleration(&mut self, acc: Vec2) {
        self.acc += acc;
    }

    /// Teleport without introducing velocity.
    pub fn place(&mut self, pos: Vec2) {
        self.pos = pos;
        self.prev_pos = pos;
    }

    /// One Verlet-style step. Returns the damped velocity that was applied.
    #[inline]
    pub fn integrate(&mut self, dt: f32, friction: f32) -> Vec2 {
        let vel = self.velocity() * (1.0 - friction);
        self.prev_pos = self.pos;
        self.pos += vel;
        self.pos += self.acc * dt;
        self.acc = Vec2::zero();
        vel
    }

    /// Clamp into `[radius, dim - radius]` and mirror the crossing axis'
    /// velocity, scaled by `bounce`.
    pub fn constrain_to_bounds(&mut self, width: f32, height: f32, bounce: f32) {
        let vel = self.velocity();
        let r = self.radius;

        if self.pos.x - r < 0.0 {
            self.pos.x = r;
            self.prev_pos.x = self.pos.x + vel.x * bounce;
        }
        if self.pos.x + r > width {
            self.pos.x = width - r;
            self.prev_pos.x = self.pos.x + vel.x * bounce;
        }
        if self.pos.y - r < 0.0 {
            self.pos.y = r;
            self.prev_pos.y = self.pos.y + vel.y * bounce;
        }
        if self.pos.y + r > height {
            self.pos.y = height - r;
            self.prev_pos.y = self.pos.y + vel.y * bounce;
        }
    }

    /// Collision push: move by `delta` and restart the tone's envelope.
    #[inline]
    pub(crate) fn displace(&mut self, delta: Vec2) {
        self.pos += delta;
        if let Some(tone) = &self.tone {
            tone.pluck();
        }
    }
}
