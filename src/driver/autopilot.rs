//! Scripted Player
//!
//! A simple policy that plays the game through intents: run the shop for
//! the first part of the day, jumping over whatever approaches, then cook
//! whatever the inventory allows. Used by the binary and by driver tests.

use crate::config::GameConfig;
use crate::game::catalog::Recipe;
use crate::game::intent::Intent;
use crate::game::state::{GamePhase, GameState, View};

/// Autopilot tuning.
#[derive(Clone, Debug)]
pub struct Autopilot {
    /// Leave the shop once this fraction of the day remains
    pub leave_shop_at_ratio: f32,
    /// Jump when an entity is this close to the actor's front edge
    pub jump_window_px: f32,
    /// Never spend below this balance
    pub cash_reserve: i64,
}

impl Default for Autopilot {
    fn default() -> Self {
        Self {
            leave_shop_at_ratio: 0.6,
            jump_window_px: 45.0,
            cash_reserve: 40_000,
        }
    }
}

impl Autopilot {
    /// Decide what to do next. Returns at most one intent so each decision
    /// sees the effect of the previous one.
    pub fn decide(&self, state: &GameState, config: &GameConfig) -> Option<Intent> {
        match state.phase {
            GamePhase::Finished => None,
            GamePhase::Welcome | GamePhase::DaySummary => Some(Intent::StartDay),
            GamePhase::Playing => match state.view {
                View::Shop => self.in_shop(state),
                View::Kitchen => self.in_kitchen(state, config),
                _ => None,
            },
        }
    }

    fn in_shop(&self, state: &GameState) -> Option<Intent> {
        if state.clock.ratio() <= self.leave_shop_at_ratio {
            return Some(Intent::EnterKitchen);
        }

        let runner = &state.runner;
        if !runner.is_running() || !runner.actor.on_ground {
            return None;
        }

        let front = runner.actor.x + runner.actor.size.x;
        let approaching = runner
            .collectibles
            .iter()
            .chain(&runner.obstacles)
            .any(|entity| {
                let gap = entity.position.x - front;
                (0.0..=self.jump_window_px).contains(&gap)
            });

        approaching.then_some(Intent::Jump)
    }

    fn in_kitchen(&self, state: &GameState, config: &GameConfig) -> Option<Intent> {
        state.stoves.free_slot()?;

        // Cook anything we already have
        if let Some(recipe) = config
            .catalog
            .recipes
            .iter()
            .find(|recipe| state.inventory.missing_kinds(&recipe.required).is_empty())
        {
            return Some(Intent::Cook { recipe_id: recipe.id.clone() });
        }

        // Otherwise top up the cheapest recipe that still finishes today
        let remaining_ms = state.clock.remaining_ms();
        let budget = state.money - self.cash_reserve;
        let (recipe, _) = config
            .catalog
            .recipes
            .iter()
            .filter(|recipe| recipe.cooking_ms < remaining_ms)
            .map(|recipe| (recipe, missing_cost(state, config, recipe)))
            .filter(|(_, cost)| *cost <= budget)
            .min_by_key(|(_, cost)| *cost)?;

        let kind = state.inventory.missing_kinds(&recipe.required).into_iter().next()?;
        Some(Intent::Buy { kind })
    }
}

fn missing_cost(state: &GameState, config: &GameConfig, recipe: &Recipe) -> i64 {
    state
        .inventory
        .missing_kinds(&recipe.required)
        .into_iter()
        .filter_map(|kind| config.catalog.item(kind))
        .map(|item| item.cost)
        .sum()
}
