//! Seeded Randomness
//!
//! Xorshift128+ (Vigna's 23/17/26 variant) seeded through SplitMix64.
//! Every random decision in the simulation (spawn speeds, collectible
//! kinds, challenge draws) goes through one instance of this type, in a
//! fixed order, so a session replays identically from its seed.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

const SPLITMIX_GAMMA: u64 = 0x9E37_79B9_7F4A_7C15;

/// Xorshift128+ generator.
///
/// ```
/// use zero_waste::core::rng::DeterministicRng;
///
/// let mut market = DeterministicRng::new(2024);
/// let mut replay = DeterministicRng::new(2024);
/// assert_eq!(market.next_int(5), replay.next_int(5));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeterministicRng {
    s0: u64,
    s1: u64,
}

impl Default for DeterministicRng {
    fn default() -> Self {
        Self::new(0)
    }
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        let mut mix = seed;
        let s0 = splitmix64(&mut mix);
        let s1 = splitmix64(&mut mix);

        // All-zero state is a fixed point
        if s0 | s1 == 0 {
            return Self { s0: 1, s1: 1 };
        }
        Self { s0, s1 }
    }

    #[inline]
    pub fn next_u64(&mut self) -> u64 {
        let mut x = self.s0;
        let y = self.s1;
        self.s0 = y;
        x ^= x << 23;
        self.s1 = x ^ y ^ (x >> 17) ^ (y >> 26);
        self.s1.wrapping_add(y)
    }

    /// Uniform-ish integer in `[0, bound)`; 0 when `bound` is 0.
    #[inline]
    pub fn next_int(&mut self, bound: u32) -> u32 {
        match bound {
            0 => 0,
            _ => (self.next_u64() % u64::from(bound)) as u32,
        }
    }

    /// f32 in `[0, 1)` built from the top 24 bits.
    #[inline]
    pub fn next_f32(&mut self) -> f32 {
        const SCALE: f32 = 1.0 / (1u32 << 24) as f32;
        (self.next_u64() >> 40) as f32 * SCALE
    }

    /// f32 in `[min, max)`. An empty or inverted range yields `min` without
    /// advancing the generator.
    #[inline]
    pub fn next_f32_range(&mut self, min: f32, max: f32) -> f32 {
        if min >= max {
            return min;
        }
        min + (max - min) * self.next_f32()
    }

    pub fn choose<'a, T>(&mut self, options: &'a [T]) -> Option<&'a T> {
        if options.is_empty() {
            return None;
        }
        options.get(self.next_int(options.len() as u32) as usize)
    }

    /// Raw generator state.
    pub fn state(&self) -> [u64; 2] {
        [self.s0, self.s1]
    }

    pub fn set_state(&mut self, [s0, s1]: [u64; 2]) {
        self.s0 = s0;
        self.s1 = s1;
    }
}

#[inline]
fn splitmix64(state: &mut u64) -> u64 {
    *state = state.wrapping_add(SPLITMIX_GAMMA);
    let mut z = *state;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Turn a shareable label ("seed phrase") into a session seed.
pub fn derive_session_seed(label: &str) -> u64 {
    let digest = Sha256::new()
        .chain_update(b"ZERO_WASTE_SEED_V1")
        .chain_update(label.as_bytes())
        .finalize();

    let mut head = [0u8; 8];
    head.copy_from_slice(&digest[..8]);
    u64::from_le_bytes(head)
}
