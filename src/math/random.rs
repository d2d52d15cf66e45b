/// Random number generator (xorshift32)
///
/// State must never be zero; `seed_state` maps 0 to a fixed odd constant.
#[inline]
pub fn xorshift32(state: &mut u32) -> u32 {
    let mut x = *state;
    x ^= x << 13;
    x ^= x >> 17;
    x ^= x << 5;
    *state = x;
    x
}

#[inline]
pub fn seed_state(seed: u32) -> u32 {
    if seed == 0 { 0x9E37_79B9 } else { seed }
}

/// Uniform float in [0, 1)
#[inline]
pub fn unit_f32(state: &mut u32) -> f32 {
    // 24 high bits fit exactly in an f32 mantissa
    (xorshift32(state) >> 8) as f32 / (1u32 << 24) as f32
}

/// Uniform float in [lo, hi)
#[inline]
pub fn range_f32(state: &mut u32, lo: f32, hi: f32) -> f32 {
    lo + (hi - lo) * unit_f32(state)
}
