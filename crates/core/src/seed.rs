//! Deterministic seed mixing, seeded random streams, and the Fisher-Yates shuffle.
//!
//! All randomness in map generation flows from an explicitly constructed
//! [`SeededRng`]. ChaCha8 output is defined bit-for-bit, so the same seed yields
//! the same permutation on every platform.

use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::{Rng, SeedableRng};

/// Stream id for per-obstacle height rolls.
pub const HEIGHT_STREAM: u64 = 0x4845_4947_4854;

pub fn mix_seed_stream(seed: u64, stream: u64) -> u64 {
    let mut mixed = seed ^ stream.wrapping_mul(0xD6E8_FD9A_5B89_7A4D);
    mixed ^= mixed >> 33;
    mixed = mixed.wrapping_mul(0xFF51_AFD7_ED55_8CCD);
    mixed ^= mixed >> 33;
    mixed = mixed.wrapping_mul(0xC4CE_B9FE_1A85_EC53);
    mixed ^ (mixed >> 33)
}

pub struct SeededRng {
    rng: ChaCha8Rng,
}

impl SeededRng {
    pub fn new(seed: u64) -> Self {
        Self { rng: ChaCha8Rng::seed_from_u64(seed) }
    }

    /// Independent stream derived from `seed`, so extra draws never disturb
    /// the shuffle sequence.
    pub fn for_stream(seed: u64, stream: u64) -> Self {
        Self::new(mix_seed_stream(seed, stream))
    }

    pub fn next_u64(&mut self) -> u64 {
        self.rng.next_u64()
    }

    /// Uniform value in `0..bound` without modulo bias.
    pub fn next_below(&mut self, bound: u64) -> u64 {
        debug_assert!(bound > 0);
        let zone = u64::MAX - (u64::MAX % bound);
        loop {
            let value = self.rng.next_u64();
            if value < zone {
                return value % bound;
            }
        }
    }

    /// Uniform index in `min..max`.
    pub fn range(&mut self, min: usize, max: usize) -> usize {
        debug_assert!(min < max);
        min + self.next_below((max - min) as u64) as usize
    }

    /// Uniform value in `[0, 1)` with 24 bits of precision.
    pub fn next_unit_f32(&mut self) -> f32 {
        (self.rng.next_u64() >> 40) as f32 / (1_u32 << 24) as f32
    }
}

/// In-place Fisher-Yates shuffle seeded by `seed`.
pub fn shuffle<T>(items: &mut [T], seed: u64) {
    let mut rng = SeededRng::new(seed);
    shuffle_with(items, &mut rng);
}

pub fn shuffle_with<T>(items: &mut [T], rng: &mut SeededRng) {
    let len = items.len();
    if len < 2 {
        return;
    }
    for index in 0..(len - 1) {
        let swap_with = rng.range(index, len);
        items.swap(index, swap_with);
    }
}
