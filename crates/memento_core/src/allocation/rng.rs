//! Seeded 32-bit linear congruential generator.
//!
//! Shuffles must be reproducible across runs and platforms, so allocation
//! never touches an OS or thread-local random source.

const LCG_MULTIPLIER: u32 = 1_664_525;
const LCG_INCREMENT: u32 = 1_013_904_223;

/// Numerical Recipes LCG: `state = 1664525 * state + 1013904223 mod 2^32`.
#[derive(Debug, Clone)]
pub struct Lcg32 {
    state: u32,
}

impl Lcg32 {
    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    /// Advances the generator and returns the new raw state.
    pub fn next_u32(&mut self) -> u32 {
        self.state = self
            .state
            .wrapping_mul(LCG_MULTIPLIER)
            .wrapping_add(LCG_INCREMENT);
        self.state
    }

    /// Next value in `[0, 1)`, i.e. `state / 2^32`.
    pub fn next_unit(&mut self) -> f64 {
        f64::from(self.next_u32()) / 4_294_967_296.0
    }

    /// Next index in `[0, bound)`, equal to `floor(next_unit() * bound)`.
    ///
    /// Computed in integers so the result is exact for every `bound`.
    pub fn next_index(&mut self, bound: usize) -> usize {
        ((u128::from(self.next_u32()) * bound as u128) >> 32) as usize
    }
}
