//! Core deterministic primitives.
//!
//! Seeded randomness, state hashing and playfield geometry shared by the
//! game modules.

pub mod geom;
pub mod rng;
pub mod hash;

// Re-export core types
pub use geom::{Aabb, Vec2};
pub use rng::DeterministicRng;
pub use hash::{compute_state_hash, StateHash, StateHasher};
