//! Game Logic Module
//!
//! All game simulation code. Deterministic given a seed and an intent log.
//!
//! ## Module Structure
//!
//! - `catalog`: Items, recipes, challenge pool
//! - `state`: Shared game state, phases, views
//! - `intent`: Queued player commands and timer ticks
//! - `tick`: Applies one intent to the state
//! - `clock`: Day countdown
//! - `stove`: Cooking slots and dish rewards
//! - `inventory`: Held items, reservation, spoilage
//! - `market`: Buying and runner pickups
//! - `challenge`: Daily bonus objective
//! - `day`: Day start, view switches, day end
//! - `runner`: Side-game physics and spawning
//! - `collision`: Actor vs entity box tests
//! - `scene`: Draw commands for the runner
//! - `events`: Events and audio cues for observers
//! - `observer`: UI and audio seams

pub mod catalog;
pub mod challenge;
pub mod clock;
pub mod collision;
pub mod day;
pub mod error;
pub mod events;
pub mod intent;
pub mod inventory;
pub mod market;
pub mod observer;
pub mod runner;
pub mod scene;
pub mod state;
pub mod stove;
pub mod summary;
pub mod tick;

// Re-export key types
pub use catalog::{Catalog, ChallengeGoal, ItemKind, Recipe, ShopItem};
pub use error::GameError;
pub use events::{AudioCue, GameEvent, GameEventData, Severity};
pub use intent::Intent;
pub use observer::{AudioSink, EventLog, GameObserver};
pub use runner::{Runner, RunnerConfig};
pub use state::{GamePhase, GameState, View};
pub use stove::STOVE_COUNT;
pub use summary::{DaySummary, FinalResults};
pub use tick::TickResult;
