//! RNG module - injectable random sources for piece selection
//!
//! The game never reaches for process-wide randomness. A [`GameState`](crate::GameState)
//! owns whatever [`RandomSource`] it is constructed with:
//!
//! - [`SimpleRng`]: a small LCG, deterministic for tests and benchmarks
//! - [`rand::rngs::StdRng`]: the runtime source used by the terminal binary

use rand::rngs::StdRng;
use rand::Rng;

/// A source of uniformly distributed integers.
pub trait RandomSource {
    /// Generate a value in `[0, max)`. `max` must be non-zero.
    fn next_range(&mut self, max: u32) -> u32;
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn next_range(&mut self, max: u32) -> u32 {
        (**self).next_range(max)
    }
}

impl<R: RandomSource + ?Sized> RandomSource for Box<R> {
    fn next_range(&mut self, max: u32) -> u32 {
        (**self).next_range(max)
    }
}

impl RandomSource for StdRng {
    fn next_range(&mut self, max: u32) -> u32 {
        self.gen_range(0..max)
    }
}

// Numerical Recipes LCG parameters (modulus 2^32).
const LCG_MUL: u32 = 1_664_525;
const LCG_INC: u32 = 1_013_904_223;

/// Small linear congruential generator.
///
/// Same seed, same piece sequence; good enough for tests, benches and replays.
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// A zero seed is remapped to 1.
    pub fn new(seed: u32) -> Self {
        Self { state: seed.max(1) }
    }

    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(LCG_MUL).wrapping_add(LCG_INC);
        self.state
    }

    /// Current state; a generator built from it continues the same sequence.
    pub fn seed(&self) -> u32 {
        self.state
    }
}

impl RandomSource for SimpleRng {
    fn next_range(&mut self, max: u32) -> u32 {
        // Low LCG bits have short periods; draw from the high half.
        (self.next_u32() >> 16) % max
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_rng_deterministic() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(12345);

        for _ in 0..100 {
            assert_eq!(rng1.next_u32(), rng2.next_u32());
        }
    }

    #[test]
    fn test_rng_different_seeds() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(54321);

        assert_ne!(rng1.next_u32(), rng2.next_u32());
    }

    #[test]
    fn test_zero_seed_is_remapped() {
        let mut zero = SimpleRng::new(0);
        let mut one = SimpleRng::new(1);
        assert_eq!(zero.next_u32(), one.next_u32());
    }

    #[test]
    fn test_next_range_stays_in_bounds() {
        let mut simple = SimpleRng::new(99);
        let mut std = StdRng::seed_from_u64(99);
        for _ in 0..1000 {
            assert!(simple.next_range(7) < 7);
            assert!(std.next_range(7) < 7);
        }
    }

    #[test]
    fn test_boxed_source_delegates() {
        let mut boxed: Box<dyn RandomSource> = Box::new(SimpleRng::new(5));
        let mut plain = SimpleRng::new(5);
        for _ in 0..20 {
            assert_eq!(boxed.next_range(7), plain.next_range(7));
        }
    }
}
