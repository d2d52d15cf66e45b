use serde::Serialize;

use crate::domain::SimConfig;
use crate::math::Vec2;

use super::pose::{Joint, PoseFrame};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum SpawnKind {
    Particle,
    SoftBody,
    /// Gated spawn whose radius was too small; still consumes a palette slot
    None,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpawnCommand {
    pub kind: SpawnKind,
    pub position: Vec2,
    pub implied_radius: f32,
    /// Wrist displacement over the last frame, in pixels
    pub direction_hint: Vec2,
    pub color_index: usize,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MapperOutput {
    pub spawn: Option<SpawnCommand>,
    pub pointer: Vec2,
}

/// Turns the landmark stream into spawn commands and the pointer position.
///
/// The left wrist drives spawning: faster motion spawns sooner and smaller.
/// The right wrist drives the immune pointer.
#[derive(Clone, Debug)]
pub struct InputMapper {
    last_wrist: Option<Vec2>,
    last_spawn_at: Option<f64>,
    color_counter: usize,
    pointer: Vec2,
}

impl InputMapper {
    pub fn new(config: &SimConfig) -> Self {
        Self {
            last_wrist: None,
            last_spawn_at: None,
            color_counter: 0,
            pointer: off_canvas(config),
        }
    }

    pub fn pointer(&self) -> Vec2 {
        self.pointer
    }

    pub fn color_counter(&self) -> usize {
        self.color_counter
    }

    /// Hand out the next palette slot. Shared by gated and scripted spawns.
    pub fn next_color(&mut self, config: &SimConfig) -> usize {
        let index = self.color_counter;
        self.color_counter = (self.color_counter + 1) % config.palette.len().max(1);
        index
    }

    /// Consume one frame of tracking. `None` means capture or inference
    /// produced nothing this frame.
    pub fn map(&mut self, frame: Option<&PoseFrame>, now: f64, config: &SimConfig) -> MapperOutput {
        let Some(frame) = frame else {
            self.pointer = off_canvas(config);
            return MapperOutput { spawn: None, pointer: self.pointer };
        };

        if let Some(right) = frame.get(Joint::RightWrist) {
            self.pointer = right.to_pixels(config.width, config.height);
        }

        let Some(left) = frame.get(Joint::LeftWrist) else {
            self.last_wrist = None;
            return MapperOutput { spawn: None, pointer: self.pointer };
        };

        let wrist = left.to_pixels(config.width, config.height);
        // No reference yet, or an unreliable one: this frame has zero speed.
        let last = match self.last_wrist {
            Some(last) if left.visibility >= config.visibility_threshold => last,
            _ => wrist,
        };
        self.last_wrist = Some(wrist);

        let delta = wrist - last;
        let speed = delta.length();
        let spawn = self.gate(speed, now, config).then(|| self.command(wrist, delta, speed, now, config));

        MapperOutput { spawn, pointer: self.pointer }
    }

    fn gate(&self, speed: f32, now: f64, config: &SimConfig) -> bool {
        if !(speed > 0.0) {
            return false;
        }
        match self.last_spawn_at {
            None => true,
            Some(at) => (now - at) * 1000.0 > (config.spawn_delay_ms / speed) as f64,
        }
    }

    fn command(&mut self, wrist: Vec2, delta: Vec2, speed: f32, now: f64, config: &SimConfig) -> SpawnCommand {
        let radius = config.max_particle_radius / speed;
        let kind = if radius > config.max_particle_radius / config.blob_radius_divisor {
            SpawnKind::SoftBody
        } else if radius > config.min_particle_radius {
            SpawnKind::Particle
        } else {
            SpawnKind::None
        };

        let command = SpawnCommand {
            kind,
            position: wrist,
            implied_radius: radius,
            direction_hint: delta,
            color_index: self.next_color(config),
        };
        self.last_spawn_at = Some(now);
        command
    }
}

/// Parking spot for the pointer while tracking is lost
fn off_canvas(config: &SimConfig) -> Vec2 {
    Vec2::new(-config.pointer_radius, -config.pointer_radius)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Landmark;

    fn wrist_frame(x: f32, y: f32) -> PoseFrame {
        PoseFrame::default()
            .with(Joint::LeftWrist, Landmark::new(x, y, 1.0))
            .with(Joint::RightWrist, Landmark::new(0.5, 0.5, 1.0))
    }

    #[test]
    fn still_wrist_never_spawns() {
        let config = SimConfig::default();
        let mut mapper = InputMapper::new(&config);
        let frame = wrist_frame(0.25, 0.25);
        for i in 0..100 {
            let out = mapper.map(Some(&frame), i as f64 * 10.0, &config);
            assert!(out.spawn.is_none());
        }
    }

    #[test]
    fn radius_decides_kind() {
        let config = SimConfig::default();
        let mut mapper = InputMapper::new(&config);
        mapper.map(Some(&wrist_frame(0.0, 0.5)), 0.0, &config);

        // 2 px of motion: radius 150 > 100 => soft body
        let out = mapper.map(Some(&wrist_frame(2.0 / 1600.0, 0.5)), 10.0, &config);
        let cmd = out.spawn.unwrap();
        assert_eq!(cmd.kind, SpawnKind::SoftBody);
        assert!((cmd.implied_radius - 150.0).abs() < 0.01);

        // +16 px: radius 18.75 => particle
        let out = mapper.map(Some(&wrist_frame(18.0 / 1600.0, 0.5)), 20.0, &config);
        assert_eq!(out.spawn.unwrap().kind, SpawnKind::Particle);

        // +400 px: radius 0.75 => discarded but palette still advances
        let out = mapper.map(Some(&wrist_frame(418.0 / 1600.0, 0.5)), 30.0, &config);
        let cmd = out.spawn.unwrap();
        assert_eq!(cmd.kind, SpawnKind::None);
        assert_eq!(cmd.color_index, 2);
        assert_eq!(mapper.color_counter(), 3);
    }

    #[test]
    fn slow_motion_waits_longer() {
        let config = SimConfig::default();
        let mut mapper = InputMapper::new(&config);
        mapper.map(Some(&wrist_frame(0.0, 0.5)), 0.0, &config);
        assert!(mapper.map(Some(&wrist_frame(16.0 / 1600.0, 0.5)), 0.01, &config).spawn.is_some());

        // 16 px/frame => 62.5 ms gate; 10 ms later is too soon
        let out = mapper.map(Some(&wrist_frame(32.0 / 1600.0, 0.5)), 0.02, &config);
        assert!(out.spawn.is_none());
        let out = mapper.map(Some(&wrist_frame(48.0 / 1600.0, 0.5)), 0.1, &config);
        assert!(out.spawn.is_some());
    }

    #[test]
    fn lost_tracking_parks_pointer_off_canvas() {
        let config = SimConfig::default();
        let mut mapper = InputMapper::new(&config);
        let out = mapper.map(Some(&wrist_frame(0.1, 0.1)), 0.0, &config);
        assert_eq!(out.pointer, Vec2::new(800.0, 450.0));

        let out = mapper.map(None, 0.1, &config);
        assert!(out.spawn.is_none());
        assert_eq!(out.pointer, Vec2::new(-100.0, -100.0));
    }
}
