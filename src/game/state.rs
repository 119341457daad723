//! Game State
//!
//! The single mutable state object shared by the day clock, the stoves and
//! the runner. Owned by the `Simulation`; everything else borrows it.

use serde::{Serialize, Deserialize};

use crate::config::GameConfig;
use crate::core::hash::{compute_state_hash, StateHash};
use crate::core::rng::DeterministicRng;
use crate::game::challenge::DailyChallenge;
use crate::game::clock::DayClock;
use crate::game::events::{AudioCue, GameEvent, GameEventData, Severity};
use crate::game::inventory::Inventory;
use crate::game::runner::Runner;
use crate::game::stove::{CompletedDish, Stoves};
use crate::game::summary::{DaySummary, FinalResults};

// =============================================================================
// PHASES & VIEWS
// =============================================================================

/// Where the game is in its day cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Before the first day
    #[default]
    Welcome,
    /// A day is running
    Playing,
    /// Between days, showing the summary
    DaySummary,
    /// All days played
    Finished,
}

/// Screen the player is looking at.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum View {
    #[default]
    Welcome,
    /// Supermarket with the runner
    Shop,
    Kitchen,
    Summary,
    FinalResults,
}

// =============================================================================
// GAME STATE
// =============================================================================

/// Complete game state.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GameState {
    /// RNG seed (for verification)
    pub rng_seed: u64,

    /// Deterministic RNG state
    #[serde(skip)]
    pub rng: DeterministicRng,

    pub phase: GamePhase,
    pub view: View,

    /// Current day, 1-based once the first day starts
    pub day: u32,
    pub max_days: u32,

    /// Clock ticks processed since the game started
    pub tick: u32,

    /// Balance in VND; penalties can push it negative
    pub money: i64,

    /// Cumulative waste score
    pub waste_score: u32,

    pub inventory: Inventory,
    pub stoves: Stoves,
    pub challenge: Option<DailyChallenge>,

    /// Dishes finished today, in completion order
    pub completed_dishes: Vec<CompletedDish>,

    pub clock: DayClock,
    pub runner: Runner,

    /// Most recent day summary
    pub last_summary: Option<DaySummary>,

    /// Set once the last day ends
    pub final_results: Option<FinalResults>,

    /// Events not yet dispatched
    #[serde(skip)]
    pending_events: Vec<GameEvent>,

    /// Audio cues not yet played
    #[serde(skip)]
    pending_cues: Vec<AudioCue>,
}

impl GameState {
    /// Fresh game on the welcome screen.
    pub fn new(config: &GameConfig) -> Self {
        Self {
            rng_seed: config.seed,
            rng: DeterministicRng::new(config.seed),
            phase: GamePhase::Welcome,
            view: View::Welcome,
            day: 0,
            max_days: config.max_days,
            tick: 0,
            money: config.starting_money,
            waste_score: 0,
            inventory: Inventory::new(),
            stoves: Stoves::new(),
            challenge: None,
            completed_dishes: Vec::new(),
            clock: DayClock::new(config.day_duration_ms, config.clock_tick_ms),
            runner: Runner::new(&config.runner),
            last_summary: None,
            final_results: None,
            pending_events: Vec::new(),
            pending_cues: Vec::new(),
        }
    }

    #[inline]
    pub fn is_playing(&self) -> bool {
        self.phase == GamePhase::Playing
    }

    #[inline]
    pub fn is_finished(&self) -> bool {
        self.phase == GamePhase::Finished
    }

    /// Push an event stamped with the current tick and day.
    pub fn push_event(&mut self, data: GameEventData) {
        self.pending_events.push(GameEvent::new(self.tick, self.day, data));
    }

    /// Push a user-facing notification.
    pub fn notify(&mut self, message: impl Into<String>, severity: Severity) {
        self.push_event(GameEventData::Notify {
            message: message.into(),
            severity,
        });
    }

    pub fn push_cue(&mut self, cue: AudioCue) {
        self.pending_cues.push(cue);
    }

    /// Take pending events (consumes them).
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.pending_events)
    }

    /// Take pending audio cues (consumes them).
    pub fn take_cues(&mut self) -> Vec<AudioCue> {
        std::mem::take(&mut self.pending_cues)
    }

    /// Compute state hash for replay verification.
    pub fn compute_hash(&self) -> StateHash {
        compute_state_hash(self.day, self.rng_seed, |hasher| {
            hasher.write_u32(self.tick);
            hasher.write_u8(self.phase as u8);
            hasher.write_u8(self.view as u8);
            hasher.write_i64(self.money);
            hasher.write_u32(self.waste_score);

            // Clock
            hasher.write_u32(self.clock.remaining_ms());
            hasher.write_bool(self.clock.is_running());
            hasher.write_bool(self.clock.is_expired());

            // Inventory, oldest first
            for item in self.inventory.items() {
                hasher.write_u32(item.instance_id);
                hasher.write_u8(item.kind as u8);
                hasher.write_u32(item.expiry_day);
                hasher.write_bool(item.consumed);
                hasher.write_bool(item.spoiled);
            }

            // Stoves, in slot order
            for slot in self.stoves.slots() {
                match slot.recipe() {
                    Some(recipe) => {
                        hasher.write_str(&recipe.id);
                        hasher.write_u32(slot.remaining_ms());
                    }
                    None => hasher.write_str(""),
                }
            }

            // Today's dishes
            for dish in &self.completed_dishes {
                hasher.write_str(&dish.recipe_id);
                hasher.write_i64(dish.reward);
            }

            // Challenge
            if let Some(challenge) = &self.challenge {
                hasher.write_str(&challenge.text);
                hasher.write_bool(challenge.completed);
            }

            // Runner
            let runner = &self.runner;
            hasher.write_bool(runner.is_running());
            hasher.write_f32(runner.actor.y);
            hasher.write_f32(runner.actor.vy);
            hasher.write_f32(runner.actor.display_y);
            hasher.write_bool(runner.actor.on_ground);
            for entity in runner.collectibles.iter().chain(&runner.obstacles) {
                hasher.write_u32(entity.id);
                hasher.write_vec2(entity.position);
                hasher.write_f32(entity.velocity_x);
            }

            // RNG position
            let [s0, s1] = self.rng.state();
            hasher.write_u64(s0);
            hasher.write_u64(s1);
        })
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::catalog::ItemKind;

    #[test]
    fn test_new_state_from_config() {
        let config = GameConfig::default();
        let state = GameState::new(&config);

        assert_eq!(state.phase, GamePhase::Welcome);
        assert_eq!(state.view, View::Welcome);
        assert_eq!(state.day, 0);
        assert_eq!(state.money, 100_000);
        assert_eq!(state.clock.remaining_ms(), 60_000);
        assert_eq!(state.stoves.busy_count(), 0);
    }

    #[test]
    fn test_events_stamped_and_drained() {
        let mut state = GameState::new(&GameConfig::default());
        state.tick = 7;
        state.day = 2;
        state.notify("hello", Severity::Info);
        state.push_cue(AudioCue::Click);

        let events = state.take_events();
        assert_eq!(events.len(), 1);
        assert_eq!((events[0].tick, events[0].day), (7, 2));
        assert!(state.take_events().is_empty());

        assert_eq!(state.take_cues(), vec![AudioCue::Click]);
        assert!(state.take_cues().is_empty());
    }

    #[test]
    fn test_hash_determinism() {
        let config = GameConfig::default();
        let state1 = GameState::new(&config);
        let state2 = GameState::new(&config);
        assert_eq!(state1.compute_hash(), state2.compute_hash());
    }

    #[test]
    fn test_hash_tracks_inventory_and_money() {
        let config = GameConfig::default();
        let base = GameState::new(&config);

        let mut richer = base.clone();
        richer.money += 1;
        assert_ne!(base.compute_hash(), richer.compute_hash());

        let mut stocked = base.clone();
        let rice = config.catalog.item(ItemKind::Rice).unwrap();
        stocked.inventory.add(rice, 1);
        assert_ne!(base.compute_hash(), stocked.compute_hash());
    }

    #[test]
    fn test_hash_depends_on_seed() {
        let state1 = GameState::new(&GameConfig::default());
        let state2 = GameState::new(&GameConfig { seed: 99, ..GameConfig::default() });
        assert_ne!(state1.compute_hash(), state2.compute_hash());
    }
}
