//! Simulation Tick
//!
//! Applies one intent to the game state. Clock ticks drive the day
//! countdown and the stoves; frames drive the runner. Both only mutate
//! state and queue events, so the same intents always produce the same
//! state.

use tracing::debug;

use crate::config::GameConfig;
use crate::game::clock::ClockTick;
use crate::game::day;
use crate::game::error::GameError;
use crate::game::events::{AudioCue, GameEvent, GameEventData, Severity};
use crate::game::intent::Intent;
use crate::game::market;
use crate::game::runner::{RemovalReason, RunnerOutcome};
use crate::game::state::GameState;
use crate::game::stove;
use crate::game::summary::DaySummary;

/// Result of applying one intent.
#[derive(Debug, Default)]
pub struct TickResult {
    /// Events generated, in order
    pub events: Vec<GameEvent>,
    /// Audio cues to play, in order
    pub cues: Vec<AudioCue>,
    /// Set when this intent closed a day
    pub day_ended: Option<DaySummary>,
    /// Whether the game finished on this intent
    pub game_finished: bool,
}

/// Apply any intent.
///
/// Rejected intents leave the state untouched and return the reason.
pub fn apply_intent(
    state: &mut GameState,
    config: &GameConfig,
    intent: &Intent,
) -> Result<TickResult, GameError> {
    let mut result = TickResult::default();

    match intent {
        Intent::ClockTick => return Ok(clock_tick(state, config)),
        Intent::Frame { now_ms } => return Ok(frame_tick(state, config, *now_ms)),
        Intent::StartDay => day::start_day(state, config)?,
        Intent::EnterShop => {
            day::enter_shop(state, config)?;
            state.push_cue(AudioCue::Click);
        }
        Intent::EnterKitchen => {
            day::enter_kitchen(state)?;
            state.push_cue(AudioCue::Click);
        }
        Intent::EndDay => {
            result.day_ended = Some(day::end_day(state, config)?);
        }
        Intent::Cook { recipe_id } => {
            require_not_finished(state)?;
            stove::start_cooking(state, &config.catalog, recipe_id)?;
        }
        Intent::Buy { kind } => {
            require_not_finished(state)?;
            market::buy_item(state, &config.catalog, *kind)?;
        }
        Intent::Jump => {
            if state.runner.jump(&config.runner) {
                state.push_cue(AudioCue::Jump);
            }
        }
    }

    result.game_finished = state.is_finished();
    Ok(finish(state, result))
}

/// One day-clock tick.
///
/// Order: countdown, stoves (slot order), then day end if the countdown
/// hit zero on this tick.
pub fn clock_tick(state: &mut GameState, config: &GameConfig) -> TickResult {
    let mut result = TickResult::default();

    if !state.is_playing() {
        return result;
    }

    let outcome = state.clock.tick();
    if outcome == ClockTick::Halted {
        return result;
    }

    state.tick += 1;
    state.push_event(GameEventData::ClockTicked {
        remaining_ms: state.clock.remaining_ms(),
        ratio: state.clock.ratio(),
    });

    stove::advance_stoves(state, &config.economy, config.clock_tick_ms);

    if outcome == ClockTick::Expired {
        // Only fails when no day is running, which was checked above
        result.day_ended = day::end_day(state, config).ok();
    }

    result.game_finished = state.is_finished();
    finish(state, result)
}

/// One animation frame of the runner.
pub fn frame_tick(state: &mut GameState, config: &GameConfig, now_ms: f64) -> TickResult {
    let result = TickResult::default();

    if !state.is_playing() || !state.runner.is_running() {
        return result;
    }

    let dt = state.runner.frame_delta(now_ms, &config.runner);
    let outcomes = state
        .runner
        .step(dt, &config.runner, &mut state.rng, &config.catalog.items);

    for outcome in outcomes {
        match outcome {
            RunnerOutcome::Spawned(entity) => {
                state.push_event(GameEventData::EntitySpawned {
                    entity_id: entity.id,
                    kind: entity.kind,
                    item: entity.item,
                    position: entity.position,
                });
            }
            RunnerOutcome::Removed { entity, reason } => {
                state.push_event(GameEventData::EntityRemoved {
                    entity_id: entity.id,
                    kind: entity.kind,
                    reason,
                });

                match reason {
                    RemovalReason::Collected => {
                        if let Some(kind) = entity.item {
                            market::collect_item(state, &config.catalog, kind);
                        }
                    }
                    RemovalReason::Hit => apply_obstacle_penalty(state, config),
                    RemovalReason::OffScreen => {}
                }
            }
        }
    }

    finish(state, result)
}

fn apply_obstacle_penalty(state: &mut GameState, config: &GameConfig) {
    let penalty_ms = config.economy.obstacle_penalty_ms;
    let remaining_ms = state.clock.penalize(penalty_ms);

    debug!(penalty_ms, remaining_ms, "Obstacle hit");

    state.push_event(GameEventData::TimePenalty { penalty_ms, remaining_ms });
    state.push_cue(AudioCue::Hit);
    state.notify(
        format!("Ouch! Lost {} seconds", penalty_ms / 1000),
        Severity::Error,
    );
}

fn require_not_finished(state: &GameState) -> Result<(), GameError> {
    if state.is_finished() {
        return Err(GameError::GameOver);
    }
    Ok(())
}

fn finish(state: &mut GameState, mut result: TickResult) -> TickResult {
    result.events = state.take_events();
    result.cues = state.take_cues();
    result
}
