//! Simulation Controller
//!
//! Owns the game state and config, processes intents in FIFO order and
//! fans the resulting events and cues out to observers. Both timer sources
//! and every player command go through the same queue, so tick boundaries
//! are explicit and a recorded intent log replays exactly.

use std::collections::VecDeque;
use tracing::debug;

use crate::config::{ConfigError, GameConfig};
use crate::core::hash::StateHash;
use crate::game::catalog::ItemKind;
use crate::game::error::GameError;
use crate::game::events::{AudioCue, GameEvent, Severity};
use crate::game::intent::Intent;
use crate::game::observer::{play_cue, AudioSink, EventLog, GameObserver};
use crate::game::scene::{build_scene, DrawCommand};
use crate::game::state::GameState;
use crate::game::summary::{DaySummary, FinalResults};
use crate::game::tick::{apply_intent, TickResult};

/// The game controller.
pub struct Simulation {
    state: GameState,
    config: GameConfig,
    queue: VecDeque<Intent>,
    observers: Vec<Box<dyn GameObserver>>,
    audio: Option<Box<dyn AudioSink>>,
    /// Every applied intent, when recording is on
    history: Option<Vec<Intent>>,
}

impl Simulation {
    /// Create a simulation on the welcome screen.
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            state: GameState::new(&config),
            config,
            queue: VecDeque::new(),
            observers: Vec::new(),
            audio: None,
            history: None,
        })
    }

    /// Attach an observer (builder style).
    pub fn with_observer(mut self, observer: impl GameObserver + 'static) -> Self {
        self.add_observer(Box::new(observer));
        self
    }

    pub fn add_observer(&mut self, observer: Box<dyn GameObserver>) {
        self.observers.push(observer);
    }

    pub fn set_audio_sink(&mut self, sink: Box<dyn AudioSink>) {
        self.audio = Some(sink);
    }

    /// Start recording applied intents for later replay.
    pub fn record_intents(&mut self) {
        self.history.get_or_insert_with(Vec::new);
    }

    /// Intents applied since recording started.
    pub fn recorded_intents(&self) -> &[Intent] {
        self.history.as_deref().unwrap_or(&[])
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn into_state(self) -> GameState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    pub fn final_results(&self) -> Option<&FinalResults> {
        self.state.final_results.as_ref()
    }

    pub fn state_hash(&self) -> StateHash {
        self.state.compute_hash()
    }

    /// Draw commands for the runner view.
    pub fn scene(&self) -> Vec<DrawCommand> {
        build_scene(&self.state.runner, &self.config.runner, &self.config.catalog)
    }

    // =========================================================================
    // QUEUE
    // =========================================================================

    /// Queue an intent for the next `pump`.
    pub fn submit(&mut self, intent: Intent) {
        self.queue.push_back(intent);
    }

    /// Queued intents not yet applied.
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Apply every queued intent in order. Returns how many were applied.
    ///
    /// Rejections are reported to observers as error notifications.
    pub fn pump(&mut self) -> usize {
        let mut applied = 0;
        while let Some(intent) = self.queue.pop_front() {
            let _ = self.apply(intent);
            applied += 1;
        }
        applied
    }

    /// Apply one intent immediately, bypassing the queue.
    pub fn apply(&mut self, intent: Intent) -> Result<TickResult, GameError> {
        if let Some(history) = &mut self.history {
            history.push(intent.clone());
        }

        match apply_intent(&mut self.state, &self.config, &intent) {
            Ok(result) => {
                self.dispatch(&result.events, &result.cues);
                Ok(result)
            }
            Err(err) => {
                debug!(%intent, error = %err, "Intent rejected");
                self.state.notify(err.to_string(), Severity::Error);
                self.state.push_cue(AudioCue::Error);

                let events = self.state.take_events();
                let cues = self.state.take_cues();
                self.dispatch(&events, &cues);
                Err(err)
            }
        }
    }

    fn dispatch(&mut self, events: &[GameEvent], cues: &[AudioCue]) {
        for event in events {
            for observer in &mut self.observers {
                observer.on_event(event);
            }
        }

        if let Some(audio) = self.audio.as_deref_mut() {
            for cue in cues {
                play_cue(audio, *cue);
            }
        }
    }

    // =========================================================================
    // ENTRY POINTS
    // =========================================================================

    pub fn start_day(&mut self) -> Result<(), GameError> {
        self.apply(Intent::StartDay).map(|_| ())
    }

    pub fn cook(&mut self, recipe_id: &str) -> Result<(), GameError> {
        self.apply(Intent::Cook { recipe_id: recipe_id.to_string() }).map(|_| ())
    }

    pub fn buy(&mut self, kind: ItemKind) -> Result<(), GameError> {
        self.apply(Intent::Buy { kind }).map(|_| ())
    }

    pub fn jump(&mut self) -> Result<(), GameError> {
        self.apply(Intent::Jump).map(|_| ())
    }

    pub fn enter_shop(&mut self) -> Result<(), GameError> {
        self.apply(Intent::EnterShop).map(|_| ())
    }

    pub fn enter_kitchen(&mut self) -> Result<(), GameError> {
        self.apply(Intent::EnterKitchen).map(|_| ())
    }

    pub fn end_day(&mut self) -> Result<DaySummary, GameError> {
        self.apply(Intent::EndDay)?
            .day_ended
            .ok_or(GameError::NoActiveDay)
    }

    /// One day-clock tick. Timer intents are never rejected.
    pub fn clock_tick(&mut self) -> TickResult {
        self.apply(Intent::ClockTick).unwrap_or_default()
    }

    /// One runner frame at `now_ms`.
    pub fn frame(&mut self, now_ms: f64) -> TickResult {
        self.apply(Intent::Frame { now_ms }).unwrap_or_default()
    }
}

/// Replay an intent log from a fresh state.
///
/// Returns the final state and every event observers would have seen,
/// including rejection notices.
pub fn replay_session(
    config: &GameConfig,
    intents: &[Intent],
) -> Result<(GameState, Vec<GameEvent>), ConfigError> {
    let log = EventLog::new();
    let mut sim = Simulation::new(config.clone())?.with_observer(log.clone());

    for intent in intents {
        let _ = sim.apply(intent.clone());
    }

    Ok((sim.into_state(), log.events()))
}
