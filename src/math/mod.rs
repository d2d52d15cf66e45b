//! Small math kit shared by every system: 2D vectors and the engine RNG.

mod random;
mod vec2;

pub use random::{range_f32, seed_state, unit_f32, xorshift32};
pub use vec2::Vec2;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn try_normalize_rejects_zero_vector() {
        assert!(Vec2::zero().try_normalize().is_none());
        let n = Vec2::new(3.0, 4.0).try_normalize().unwrap();
        assert!((n.length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn unit_f32_stays_in_half_open_range() {
        let mut state = seed_state(0);
        for _ in 0..10_000 {
            let v = unit_f32(&mut state);
            assert!((0.0..1.0).contains(&v));
        }
    }
}
