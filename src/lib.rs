//! # Zero Waste Kitchen
//!
//! Deterministic simulation core for a day-based cooking game: buy
//! ingredients in a side-scrolling supermarket runner, cook them on three
//! stoves before the day clock runs out, and waste as little as possible.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    ZERO WASTE KITCHEN                        │
//! ├─────────────────────────────────────────────────────────────┤
//! │  core/           - Deterministic primitives                  │
//! │  ├── rng.rs      - Seeded Xorshift128+ PRNG                  │
//! │  ├── hash.rs     - State hashing for replay checks           │
//! │  └── geom.rs     - Vectors and boxes for the runner          │
//! │                                                              │
//! │  game/           - Game logic (deterministic)                │
//! │  ├── catalog.rs  - Items, recipes, challenges                │
//! │  ├── state.rs    - Game state, phases, views                 │
//! │  ├── tick.rs     - Applies one intent                        │
//! │  ├── day.rs      - Day lifecycle and summaries               │
//! │  ├── stove.rs    - Cooking slots                             │
//! │  ├── runner.rs   - Runner physics and spawning               │
//! │  └── ...                                                     │
//! │                                                              │
//! │  simulation.rs   - Intent queue, observers, replay           │
//! │  config.rs       - Tunables, JSON config, environment        │
//! │                                                              │
//! │  driver/         - Timers and players (non-deterministic)    │
//! │  ├── headless.rs - Synthetic time                            │
//! │  ├── realtime.rs - tokio timers and commands                 │
//! │  └── autopilot.rs- Scripted player                           │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Determinism
//!
//! Everything under `core/` and `game/` is a pure function of the seed and
//! the ordered intent log:
//! - No wall-clock reads; time arrives as `ClockTick` and `Frame` intents
//! - All randomness from one seeded generator, drawn in a fixed order
//! - Ordered collections only
//!
//! Replaying a recorded log reproduces the same state hash.

#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod config;
pub mod core;
pub mod driver;
pub mod game;
pub mod simulation;

// Re-export commonly used types
pub use config::{ConfigError, GameConfig};
pub use core::rng::DeterministicRng;
pub use game::intent::Intent;
pub use game::state::{GamePhase, GameState, View};
pub use simulation::{replay_session, Simulation};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
