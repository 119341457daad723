//! State Digest
//!
//! SHA-256 over a canonical little-endian encoding of game state. Replaying
//! the same intent log must reproduce the same digest, which is what the
//! replay check in the binary and the replay tests compare.

use sha2::{Digest, Sha256};

use super::geom::Vec2;

/// 32-byte SHA-256 digest.
pub type StateHash = [u8; 32];

const GAME_STATE_DOMAIN: &[u8] = b"ZERO_WASTE_STATE_V1";

/// Field-by-field state encoder. Write order is part of the format.
pub struct StateHasher {
    digest: Sha256,
}

impl StateHasher {
    /// Start a digest under the given domain tag.
    pub fn new(domain: &[u8]) -> Self {
        let mut digest = Sha256::new();
        digest.update(domain);
        Self { digest }
    }

    pub fn for_game_state() -> Self {
        Self::new(GAME_STATE_DOMAIN)
    }

    #[inline]
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.digest.update(bytes);
    }

    /// Length-prefixed, so adjacent strings cannot run together.
    #[inline]
    pub fn write_str(&mut self, value: &str) {
        self.write_u32(value.len() as u32);
        self.write_bytes(value.as_bytes());
    }

    #[inline]
    pub fn write_u8(&mut self, value: u8) {
        self.write_bytes(&[value]);
    }

    #[inline]
    pub fn write_bool(&mut self, value: bool) {
        self.write_u8(u8::from(value));
    }

    #[inline]
    pub fn write_u32(&mut self, value: u32) {
        self.write_bytes(&value.to_le_bytes());
    }

    #[inline]
    pub fn write_u64(&mut self, value: u64) {
        self.write_bytes(&value.to_le_bytes());
    }

    #[inline]
    pub fn write_i64(&mut self, value: i64) {
        self.write_bytes(&value.to_le_bytes());
    }

    /// Exact bit pattern, so -0.0 and 0.0 differ.
    #[inline]
    pub fn write_f32(&mut self, value: f32) {
        self.write_u32(value.to_bits());
    }

    #[inline]
    pub fn write_vec2(&mut self, value: Vec2) {
        self.write_f32(value.x);
        self.write_f32(value.y);
    }

    pub fn finish(self) -> StateHash {
        self.digest.finalize().into()
    }
}

/// Digest of a game state: a fixed header (day, seed) followed by whatever
/// `body` writes.
pub fn compute_state_hash<F>(day: u32, rng_seed: u64, body: F) -> StateHash
where
    F: FnOnce(&mut StateHasher),
{
    let mut hasher = StateHasher::for_game_state();
    hasher.write_u32(day);
    hasher.write_u64(rng_seed);
    body(&mut hasher);
    hasher.finish()
}
