//! SoftBody - a closed ring of point-masses held together by a stretch-only
//! edge constraint and an area (pressure) constraint.
//!
//! One edge pass, one area pass and one integration per frame. No solver
//! iterations and no self-collision.

use std::f32::consts::{PI, TAU};

use crate::domain::Rgb;
use crate::math::Vec2;

use super::lifecycle::LifePhase;
use super::point_mass::PointMass;

pub struct SoftBody {
    pub origin: Vec2,
    pub radius: f32,
    /// Rest arc length between ring neighbours (`2πr / n`)
    pub cord_len: f32,
    /// Rest enclosed area (`πr²`)
    pub rest_area: f32,
    pub color: Rgb,
    pub born_at: f64,
    pub phase: LifePhase,
    /// Ring in topology order; size is fixed for the body's lifetime
    points: Vec<PointMass>,
}

impl SoftBody {
    /// Lay `num_points` out counter-clockwise on a circle around `origin`.
    pub fn new(origin: Vec2, num_points: usize, radius: f32, point_radius: f32, color: Rgb, born_at: f64) -> Self {
        let n = num_points.max(1) as f32;
        let points = (0..num_points)
            .map(|i| {
                let angle = TAU * i as f32 / n;
                let pos = Vec2::new(origin.x + angle.cos() * radius, origin.y + angle.sin() * radius);
                PointMass::new(pos, point_radius)
            })
            .collect();

        Self {
            origin,
            radius,
            cord_len: TAU * radius / n,
            rest_area: PI * radius * radius,
            color,
            born_at,
            phase: LifePhase::Spawned,
            points,
        }
    }

    pub fn points(&self) -> &[PointMass] {
        &self.points
    }

    /// Mutable access to the ring points; the ring itself cannot be resized.
    pub fn points_mut(&mut self) -> &mut [PointMass] {
        &mut self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn age(&self, now: f64) -> f64 {
        now - self.born_at
    }

    /// Signed shoelace area; positive for a counter-clockwise ring.
    pub fn area(&self) -> f32 {
        let n = self.points.len();
        let mut area = 0.0f32;
        for i in 0..n {
            let cur = self.points[i].pos;
            let next = self.points[(i + 1) % n].pos;
            area += (cur.x - next.x) * (cur.y + next.y) / 2.0;
        }
        area
    }

    pub fn centroid(&self) -> Vec2 {
        if self.points.is_empty() {
            return self.origin;
        }
        let sum = self.points.iter().fold(Vec2::zero(), |acc, p| acc + p.pos);
        sum / self.points.len() as f32
    }

    /// Stretch-only spring pass: each over-long edge pulls its two ends
    /// together by half the excess each.
    fn apply_edge_constraints(&mut self) {
        let n = self.points.len();
        for i in 0..n {
            let j = (i + 1) % n;
            let cur = self.points[i].pos;
            let next = self.points[j].pos;
            let dist = cur.distance(next);
            if dist <= self.cord_len {
                continue;
            }
            let mid = (cur + next) / 2.0;
            let Some(dir) = (mid - cur).try_normalize() else {
                continue;
            };
            let correction = dir * ((dist - self.cord_len) / 2.0);
            self.points[i].acc += correction;
            self.points[j].acc -= correction;
        }
    }

    /// Pressure pass: push every point along its local outward normal by the
    /// normalized area deficit.
    fn apply_area_constraint(&mut self) {
        let n = self.points.len();
        let perimeter = TAU * self.radius;
        if perimeter <= 0.0 {
            return;
        }
        let area_error = (self.rest_area - self.area()) / perimeter;

        for i in 0..n {
            let prev = self.points[(i + n - 1) % n].pos;
            let next = self.points[(i + 1) % n].pos;
            let Some(secant) = (next - prev).try_normalize() else {
                continue;
            };
            self.points[i].acc += secant.perp() * area_error;
        }
    }

    /// Solve both constraints once, integrate every point, clamp to canvas.
    pub fn update(&mut self, dt: f32, friction: f32, width: f32, height: f32, bounce: f32) {
        if self.points.len() >= 3 {
            self.apply_edge_constraints();
            self.apply_area_constraint();
        }
        for point in self.points.iter_mut() {
            point.integrate(dt, friction);
            point.constrain_to_bounds(width, height, bounce);
        }
        if self.phase == LifePhase::Spawned {
            self.phase = LifePhase::Active;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_ring_is_counter_clockwise_and_slightly_deflated() {
        let blob = SoftBody::new(Vec2::new(400.0, 300.0), 16, 100.0, 0.0, [1.0, 0.0, 0.0], 0.0);
        let ratio = blob.area() / blob.rest_area;
        // Inscribed 16-gon: 8 sin(pi/8) / pi
        assert!((ratio - 0.9745).abs() < 1e-3, "ratio {ratio}");
        let c = blob.centroid();
        assert!(c.distance(Vec2::new(400.0, 300.0)) < 1e-3);
    }

    #[test]
    fn pressure_inflates_deflated_ring() {
        let mut blob = SoftBody::new(Vec2::new(400.0, 300.0), 16, 100.0, 0.0, [1.0, 0.0, 0.0], 0.0);
        let before = blob.area();
        for _ in 0..200 {
            blob.update(1.0 / 120.0, 0.02, 800.0, 600.0, 0.5);
        }
        assert!(blob.area() > before);
        assert_eq!(blob.phase, LifePhase::Active);
    }

    #[test]
    fn coincident_neighbours_contribute_nothing() {
        let mut blob = SoftBody::new(Vec2::new(400.0, 300.0), 4, 50.0, 0.0, [1.0, 0.0, 0.0], 0.0);
        // Fold point 2 onto point 0: point 1's secant has zero length
        let folded = blob.points()[0].pos;
        blob.points_mut()[2].place(folded);

        blob.apply_area_constraint();
        assert_eq!(blob.points()[1].acc, Vec2::zero());
        for p in blob.points() {
            assert!(p.acc.x.is_finite() && p.acc.y.is_finite());
        }

        for _ in 0..10 {
            blob.update(1.0 / 120.0, 0.02, 800.0, 600.0, 0.5);
        }
        for p in blob.points() {
            assert!(p.pos.x.is_finite() && p.pos.y.is_finite());
        }
        assert!(blob.area().is_finite());
    }

    #[test]
    fn two_point_ring_only_integrates() {
        let mut blob = SoftBody::new(Vec2::new(400.0, 300.0), 2, 50.0, 0.0, [1.0, 0.0, 0.0], 0.0);
        let before: Vec<Vec2> = blob.points().iter().map(|p| p.pos).collect();
        blob.update(1.0 / 120.0, 0.02, 800.0, 600.0, 0.5);
        let after: Vec<Vec2> = blob.points().iter().map(|p| p.pos).collect();
        assert_eq!(before, after);
    }
}
