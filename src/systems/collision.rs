//! Circle-circle overlap resolution over a spatial hash.
//!
//! Every body in an occupied cell is tested against every body in the 3x3
//! block around that cell. Buckets are built once from frame-start positions
//! and not refreshed while pairs are pushed apart, so the result depends on
//! traversal order once three or more bodies overlap.
//!
//! The cell edge is widened every frame to at least the widest body's
//! diameter, so any overlapping pair always lands in adjacent cells.

use crate::math::Vec2;
use crate::spatial::SpatialHash;

use super::point_mass::PointMass;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CollisionStats {
    pub pairs_checked: u32,
    pub collisions: u32,
}

impl CollisionStats {
    /// Count one tested pair. Saturates; a dense cluster of ring points can
    /// exceed `u32::MAX` pair checks in a single frame.
    #[inline]
    pub fn record(&mut self, collided: bool) {
        self.pairs_checked = self.pairs_checked.saturating_add(1);
        if collided {
            self.collisions = self.collisions.saturating_add(1);
        }
    }
}

pub struct CollisionResolver {
    grid: SpatialHash,
    candidates: Vec<usize>,
    /// Configured cell edge; the grid never goes below it
    min_cell_size: f32,
}

impl CollisionResolver {
    pub fn new(cell_size: f32) -> Self {
        Self {
            grid: SpatialHash::new(cell_size),
            candidates: Vec::new(),
            min_cell_size: cell_size,
        }
    }

    /// Cell edge used by the last `resolve_all`.
    pub fn cell_size(&self) -> f32 {
        self.grid.cell_size()
    }

    /// Push every overlapping pair apart for one frame.
    pub fn resolve_all(&mut self, bodies: &mut [&mut PointMass]) -> CollisionStats {
        let mut stats = CollisionStats::default();
        let Self { grid, candidates, min_cell_size } = self;

        let widest = bodies.iter().fold(0.0f32, |m, b| m.max(2.0 * b.radius));
        let cell_size = (*min_cell_size).max(widest);
        if cell_size != grid.cell_size() {
            grid.set_cell_size(cell_size);
        }
        grid.rebuild(bodies.iter().map(|b| b.pos));

        for &key in grid.occupied() {
            grid.neighborhood(key, candidates);
            for &a in grid.cell(key) {
                for &b in candidates.iter() {
                    if a == b {
                        continue;
                    }
                    let (body_a, body_b) = pair_mut(bodies, a, b);
                    stats.record(resolve_pair(body_a, body_b));
                }
            }
        }

        stats
    }
}

/// Separate one pair. Returns true if they overlapped.
///
/// Two movable bodies split the overlap evenly. A movable body facing an
/// immune one takes the whole overlap so the pair ends exactly touching.
/// Coincident centers have no separation axis and are skipped.
pub fn resolve_pair(a: &mut PointMass, b: &mut PointMass) -> bool {
    let delta = b.pos - a.pos;
    let dist_sq = delta.length_squared();
    let radius_sum = a.radius + b.radius;

    if dist_sq == 0.0 || dist_sq >= radius_sum * radius_sum {
        return false;
    }

    let dist = dist_sq.sqrt();
    let overlap = radius_sum - dist;
    let normal: Vec2 = delta / dist;

    match (a.immune, b.immune) {
        (false, false) => {
            let half = normal * (overlap / 2.0);
            a.displace(-half);
            b.displace(half);
        }
        (true, false) => b.displace(normal * overlap),
        (false, true) => a.displace(-(normal * overlap)),
        (true, true) => {}
    }
    true
}

#[inline]
fn pair_mut<T>(items: &mut [T], a: usize, b: usize) -> (&mut T, &mut T) {
    debug_assert_ne!(a, b);
    if a < b {
        let (lo, hi) = items.split_at_mut(b);
        (&mut lo[a], &mut hi[0])
    } else {
        let (lo, hi) = items.split_at_mut(a);
        (&mut hi[0], &mut lo[b])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::Tone;
    use std::sync::Arc;

    #[test]
    fn stats_saturate_instead_of_wrapping() {
        let mut stats = CollisionStats {
            pairs_checked: u32::MAX - 1,
            collisions: u32::MAX,
        };
        stats.record(true);
        stats.record(true);
        assert_eq!(stats.pairs_checked, u32::MAX);
        assert_eq!(stats.collisions, u32::MAX);
    }

    #[test]
    fn wide_bodies_widen_the_grid() {
        let mut resolver = CollisionResolver::new(50.0);

        // Pointer-sized body reaching three 50 px cells away
        let mut big = PointMass::new(Vec2::new(100.0, 100.0), 100.0).immune();
        let mut small = PointMass::new(Vec2::new(205.0, 100.0), 10.0);
        let stats = resolver.resolve_all(&mut [&mut big, &mut small]);
        assert_eq!(stats.collisions, 1);
        assert_eq!(resolver.cell_size(), 200.0);
        assert_eq!(big.pos, Vec2::new(100.0, 100.0));
        assert_eq!(small.pos, Vec2::new(210.0, 100.0));

        // Back to small bodies: the configured edge is restored
        let mut a = PointMass::new(Vec2::new(10.0, 10.0), 5.0);
        let mut b = PointMass::new(Vec2::new(300.0, 10.0), 5.0);
        resolver.resolve_all(&mut [&mut a, &mut b]);
        assert_eq!(resolver.cell_size(), 50.0);
    }

    #[test]
    fn coincident_centers_are_skipped() {
        let mut a = PointMass::new(Vec2::new(50.0, 50.0), 10.0);
        let mut b = PointMass::new(Vec2::new(50.0, 50.0), 10.0);
        assert!(!resolve_pair(&mut a, &mut b));
        assert_eq!(a.pos, b.pos);
    }

    #[test]
    fn both_immune_stay_put() {
        let mut a = PointMass::new(Vec2::new(50.0, 50.0), 10.0).immune();
        let mut b = PointMass::new(Vec2::new(55.0, 50.0), 10.0).immune();
        assert!(resolve_pair(&mut a, &mut b));
        assert_eq!(a.pos, Vec2::new(50.0, 50.0));
        assert_eq!(b.pos, Vec2::new(55.0, 50.0));
    }

    #[test]
    fn neighbours_across_cell_edges_are_found() {
        let tone = Arc::new(Tone::new(220.0, 1.0));
        tone.render_into(&mut [0.0; 32], &Default::default());
        let mut a = PointMass::new(Vec2::new(95.0, 50.0), 10.0).with_tone(tone.clone());
        let mut b = PointMass::new(Vec2::new(105.0, 50.0), 10.0);

        let mut resolver = CollisionResolver::new(100.0);
        let stats = resolver.resolve_all(&mut [&mut a, &mut b]);
        assert_eq!(stats.collisions, 1);
        assert_eq!(a.pos.distance(b.pos), 20.0);
        assert_eq!(tone.time_offset(), 0.0);
    }
}
