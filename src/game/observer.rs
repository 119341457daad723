//! Observers
//!
//! Seams for the UI and audio collaborators. The simulation pushes events
//! and cues out through these traits and never reads anything back.

use std::sync::{Arc, Mutex};
use tracing::{debug, info};

use crate::game::events::{AudioCue, GameEvent, GameEventData, Severity};

/// Receives every event, in emission order.
pub trait GameObserver: Send {
    fn on_event(&mut self, event: &GameEvent);
}

/// Audio playback failure. Never fatal.
#[derive(Debug, Clone, thiserror::Error)]
pub enum AudioError {
    #[error("Audio device unavailable")]
    Unavailable,

    #[error("Playback failed for {cue}: {reason}")]
    Playback { cue: &'static str, reason: String },
}

/// Plays sound cues.
pub trait AudioSink: Send {
    fn play(&mut self, cue: AudioCue) -> Result<(), AudioError>;
}

/// Play a cue and swallow any failure.
pub fn play_cue(sink: &mut dyn AudioSink, cue: AudioCue) {
    if let Err(err) = sink.play(cue) {
        debug!(cue = cue.name(), error = %err, "Audio cue dropped");
    }
}

// =============================================================================
// BUILT-IN OBSERVERS
// =============================================================================

/// Records events into a shared buffer. Clones share the same buffer.
#[derive(Clone, Default)]
pub struct EventLog {
    events: Arc<Mutex<Vec<GameEvent>>>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything recorded so far.
    pub fn events(&self) -> Vec<GameEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.events.lock().map(|events| events.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl GameObserver for EventLog {
    fn on_event(&mut self, event: &GameEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event.clone());
        }
    }
}

/// Logs the events a player would notice. High-frequency ticks are skipped.
#[derive(Debug, Default)]
pub struct TracingObserver;

impl GameObserver for TracingObserver {
    fn on_event(&mut self, event: &GameEvent) {
        match &event.data {
            GameEventData::DayStarted { day, money } => {
                info!(day, money, "Day started");
            }
            GameEventData::ChallengeAssigned { text, bonus } => {
                info!(day = event.day, %text, bonus, "Challenge assigned");
            }
            GameEventData::DishCompleted { recipe_name, reward, dish_index, .. } => {
                info!(day = event.day, recipe = %recipe_name, reward, dish_index, "Dish served");
            }
            GameEventData::DayEnded { summary } => {
                info!(
                    day = summary.day,
                    dishes = summary.dishes.len(),
                    earnings = summary.earnings,
                    wasted = summary.wasted.len(),
                    waste_penalty = summary.waste_penalty,
                    challenge_bonus = summary.challenge_bonus,
                    net_profit = summary.net_profit,
                    money = summary.money,
                    "Day ended"
                );
            }
            GameEventData::GameFinished { results } => {
                info!(
                    days = results.days_played,
                    money = results.final_money,
                    waste_score = results.waste_score,
                    final_score = results.final_score,
                    "Game finished"
                );
            }
            GameEventData::Notify { message, severity: Severity::Error } => {
                info!(day = event.day, %message, "Action rejected");
            }
            GameEventData::ClockTicked { .. }
            | GameEventData::StoveTick { .. }
            | GameEventData::EntitySpawned { .. }
            | GameEventData::EntityRemoved { .. } => {}
            other => {
                debug!(tick = event.tick, day = event.day, event = ?other, "Game event");
            }
        }
    }
}

/// Audio sink that only logs cue names.
#[derive(Debug, Default)]
pub struct LoggingAudio;

impl AudioSink for LoggingAudio {
    fn play(&mut self, cue: AudioCue) -> Result<(), AudioError> {
        debug!(cue = cue.name(), "Audio cue");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct BrokenSpeaker {
        attempts: usize,
    }

    impl AudioSink for BrokenSpeaker {
        fn play(&mut self, _cue: AudioCue) -> Result<(), AudioError> {
            self.attempts += 1;
            Err(AudioError::Unavailable)
        }
    }

    #[test]
    fn test_event_log_clones_share_buffer() {
        let log = EventLog::new();
        let mut handle = log.clone();

        handle.on_event(&GameEvent::new(0, 1, GameEventData::DayStarted { day: 1, money: 100_000 }));

        assert_eq!(log.len(), 1);
        assert!(matches!(log.events()[0].data, GameEventData::DayStarted { day: 1, .. }));
    }

    #[test]
    fn test_audio_failure_is_swallowed() {
        let mut speaker = BrokenSpeaker { attempts: 0 };
        play_cue(&mut speaker, AudioCue::Jump);
        play_cue(&mut speaker, AudioCue::Hit);
        assert_eq!(speaker.attempts, 2);
    }
}
