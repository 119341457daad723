//! Day Transitions
//!
//! Starting a day, switching between shop and kitchen, and closing a day
//! out into a summary. After the last day the game moves to final results
//! and refuses to start another.

use tracing::{debug, info};

use crate::config::GameConfig;
use crate::game::challenge::DailyChallenge;
use crate::game::error::GameError;
use crate::game::events::{AudioCue, GameEventData, Severity};
use crate::game::state::{GamePhase, GameState, View};
use crate::game::summary::{ChallengeOutcome, DaySummary, FinalResults, WastedItem};

/// Begin the next day and open the shop.
pub fn start_day(state: &mut GameState, config: &GameConfig) -> Result<(), GameError> {
    match state.phase {
        GamePhase::Welcome | GamePhase::DaySummary => {}
        GamePhase::Playing => return Err(GameError::DayNotStartable),
        GamePhase::Finished => return Err(GameError::GameOver),
    }

    state.day += 1;
    state.phase = GamePhase::Playing;
    state.clock.reset();
    state.clock.start();
    state.completed_dishes.clear();
    state.challenge = DailyChallenge::draw(&mut state.rng, &config.catalog);

    info!(day = state.day, money = state.money, "Day started");

    state.push_event(GameEventData::DayStarted {
        day: state.day,
        money: state.money,
    });
    if let Some(challenge) = &state.challenge {
        let (text, bonus) = (challenge.text.clone(), challenge.bonus);
        state.push_event(GameEventData::ChallengeAssigned { text, bonus });
    }
    state.push_cue(AudioCue::Click);

    enter_shop(state, config)
}

/// Switch to the supermarket and (re)start the runner from a clean field.
pub fn enter_shop(state: &mut GameState, config: &GameConfig) -> Result<(), GameError> {
    require_day(state)?;

    if state.view == View::Shop && state.runner.is_running() {
        return Ok(());
    }

    state.runner.reset(&config.runner);
    state.runner.start();
    change_view(state, View::Shop);
    Ok(())
}

/// Switch to the kitchen. The runner stops; the clock keeps going.
pub fn enter_kitchen(state: &mut GameState) -> Result<(), GameError> {
    require_day(state)?;

    state.runner.stop();
    if state.view != View::Kitchen {
        change_view(state, View::Kitchen);
    }
    Ok(())
}

/// Close out the current day.
///
/// Dish earnings were credited as each dish finished, so they only appear
/// in the summary. The waste penalty is deducted and the challenge bonus
/// credited here.
pub fn end_day(state: &mut GameState, config: &GameConfig) -> Result<DaySummary, GameError> {
    require_day(state)?;

    let economy = &config.economy;

    state.clock.stop();
    state.runner.stop();

    // Dishes
    let dishes = std::mem::take(&mut state.completed_dishes);
    let earnings = economy.earnings_for(dishes.len());

    // Waste
    let wasted: Vec<WastedItem> = state
        .inventory
        .spoil_available()
        .into_iter()
        .map(|item| WastedItem {
            instance_id: item.instance_id,
            kind: item.kind,
            name: item.name,
            emoji: item.emoji,
            purchase_cost: item.purchase_cost,
        })
        .collect();
    let waste_penalty = wasted.len() as i64 * economy.waste_penalty_per_item;
    state.money -= waste_penalty;
    state.waste_score += wasted.len() as u32 * economy.waste_score_per_item;

    // Challenge
    let challenge = state.challenge.take().map(|challenge| ChallengeOutcome {
        bonus: if challenge.completed { challenge.bonus } else { 0 },
        text: challenge.text,
        completed: challenge.completed,
    });
    let challenge_bonus = challenge.as_ref().map_or(0, |outcome| outcome.bonus);
    state.money += challenge_bonus;

    let purged = state.inventory.purge_consumed();
    debug!(day = state.day, purged, "Inventory purged");

    let summary = DaySummary {
        day: state.day,
        dishes,
        earnings,
        wasted,
        waste_penalty,
        challenge,
        challenge_bonus,
        net_profit: earnings - waste_penalty + challenge_bonus,
        money: state.money,
        waste_score: state.waste_score,
    };

    info!(
        day = summary.day,
        earnings,
        waste_penalty,
        challenge_bonus,
        net_profit = summary.net_profit,
        "Day ended"
    );

    state.last_summary = Some(summary.clone());
    state.push_event(GameEventData::DayEnded { summary: summary.clone() });
    state.push_cue(if summary.wasted.is_empty() { AudioCue::Success } else { AudioCue::Error });
    state.notify(format!("Day {} has ended!", summary.day), Severity::Info);

    if state.day >= state.max_days {
        let results = FinalResults::new(state.day, state.money, state.waste_score);
        info!(
            days = results.days_played,
            money = results.final_money,
            final_score = results.final_score,
            "Game finished"
        );

        state.phase = GamePhase::Finished;
        state.final_results = Some(results.clone());
        change_view(state, View::FinalResults);
        state.push_event(GameEventData::GameFinished { results });
    } else {
        state.phase = GamePhase::DaySummary;
        change_view(state, View::Summary);
    }

    Ok(summary)
}

fn require_day(state: &GameState) -> Result<(), GameError> {
    match state.phase {
        GamePhase::Playing => Ok(()),
        GamePhase::Finished => Err(GameError::GameOver),
        GamePhase::Welcome | GamePhase::DaySummary => Err(GameError::NoActiveDay),
    }
}

fn change_view(state: &mut GameState, view: View) {
    state.view = view;
    state.push_event(GameEventData::ViewChanged { view });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::catalog::ItemKind;
    use crate::game::market::buy_item;
    use crate::game::runner::RunnerPhase;
    use crate::game::stove::start_cooking;

    fn started() -> (GameState, GameConfig) {
        let config = GameConfig::default();
        let mut state = GameState::new(&config);
        start_day(&mut state, &config).unwrap();
        (state, config)
    }

    #[test]
    fn test_start_day_opens_shop() {
        let (state, _) = started();

        assert_eq!(state.day, 1);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.view, View::Shop);
        assert!(state.clock.is_running());
        assert_eq!(state.runner.phase, RunnerPhase::Running);
        assert!(state.challenge.is_some());
    }

    #[test]
    fn test_cannot_start_mid_day() {
        let (mut state, config) = started();
        assert_eq!(start_day(&mut state, &config), Err(GameError::DayNotStartable));
        assert_eq!(state.day, 1);
    }

    #[test]
    fn test_views_need_a_day() {
        let config = GameConfig::default();
        let mut state = GameState::new(&config);
        assert_eq!(enter_shop(&mut state, &config), Err(GameError::NoActiveDay));
        assert_eq!(enter_kitchen(&mut state), Err(GameError::NoActiveDay));
        assert_eq!(end_day(&mut state, &config).unwrap_err(), GameError::NoActiveDay);
    }

    #[test]
    fn test_kitchen_stops_runner_and_shop_restarts_it() {
        let (mut state, config) = started();

        enter_kitchen(&mut state).unwrap();
        assert!(!state.runner.is_running());
        assert!(state.clock.is_running());

        enter_shop(&mut state, &config).unwrap();
        assert!(state.runner.is_running());
        assert_eq!(state.runner.entity_count(), 0);
    }

    #[test]
    fn test_end_day_penalizes_waste() {
        let (mut state, config) = started();
        state.challenge = None;

        buy_item(&mut state, &config.catalog, ItemKind::Rice).unwrap();
        buy_item(&mut state, &config.catalog, ItemKind::Egg).unwrap();
        buy_item(&mut state, &config.catalog, ItemKind::Carrot).unwrap();
        start_cooking(&mut state, &config.catalog, "fried_rice").unwrap();
        let money_before = state.money;

        let summary = end_day(&mut state, &config).unwrap();

        assert_eq!(summary.wasted.len(), 1);
        assert_eq!(summary.wasted[0].kind, ItemKind::Carrot);
        assert_eq!(summary.waste_penalty, 20_000);
        assert_eq!(summary.net_profit, -20_000);
        assert_eq!(state.money, money_before - 20_000);
        assert_eq!(state.waste_score, 15);
        assert!(state.inventory.is_empty());
        assert_eq!(state.phase, GamePhase::DaySummary);
        assert_eq!(state.view, View::Summary);

        // Dish still on the stove carries over
        assert_eq!(state.stoves.busy_count(), 1);
    }

    #[test]
    fn test_end_day_credits_completed_challenge() {
        let (mut state, config) = started();
        state.challenge = Some(DailyChallenge {
            text: "Collect beef".to_string(),
            goal: crate::game::catalog::ChallengeGoal::Collect { kind: ItemKind::Beef },
            bonus: 15_000,
            completed: true,
        });
        let money_before = state.money;

        let summary = end_day(&mut state, &config).unwrap();
        assert_eq!(summary.challenge_bonus, 15_000);
        assert_eq!(state.money, money_before + 15_000);
        assert!(state.challenge.is_none());
    }

    #[test]
    fn test_last_day_finishes_game() {
        let config = GameConfig { max_days: 2, ..GameConfig::default() };
        let mut state = GameState::new(&config);

        start_day(&mut state, &config).unwrap();
        end_day(&mut state, &config).unwrap();
        assert_eq!(state.phase, GamePhase::DaySummary);

        start_day(&mut state, &config).unwrap();
        end_day(&mut state, &config).unwrap();
        assert_eq!(state.phase, GamePhase::Finished);
        assert_eq!(state.view, View::FinalResults);

        let results = state.final_results.clone().unwrap();
        assert_eq!(results.days_played, 2);
        assert_eq!(results.final_score, 100);

        assert_eq!(start_day(&mut state, &config), Err(GameError::GameOver));
    }
}
