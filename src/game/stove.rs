//! Stove Simulator
//!
//! Three independent cooking slots driven by the day clock. Starting a
//! recipe reserves its ingredients; finishing one credits the dish reward.

use serde::{Serialize, Deserialize};
use tracing::debug;

use crate::config::EconomyConfig;
use crate::game::catalog::{Catalog, Recipe};
use crate::game::challenge;
use crate::game::error::GameError;
use crate::game::events::{AudioCue, GameEventData, Severity};
use crate::game::state::GameState;

/// Number of stoves in the kitchen.
pub const STOVE_COUNT: usize = 3;

// =============================================================================
// SLOTS
// =============================================================================

/// One cooking slot. A slot is cooking iff it holds a recipe.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoveSlot {
    recipe: Option<Recipe>,
    remaining_ms: u32,
}

impl StoveSlot {
    #[inline]
    pub fn is_cooking(&self) -> bool {
        self.recipe.is_some()
    }

    pub fn recipe(&self) -> Option<&Recipe> {
        self.recipe.as_ref()
    }

    pub fn remaining_ms(&self) -> u32 {
        self.remaining_ms
    }
}

/// Result of ticking one cooking slot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SlotTick {
    pub slot: usize,
    pub remaining_ms: u32,
    /// Set when the dish finished this tick; the slot is already free
    pub completed: Option<Recipe>,
}

/// The kitchen's stoves.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stoves {
    slots: [StoveSlot; STOVE_COUNT],
}

impl Stoves {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn slots(&self) -> &[StoveSlot] {
        &self.slots
    }

    pub fn slot(&self, index: usize) -> Option<&StoveSlot> {
        self.slots.get(index)
    }

    /// Lowest-index free slot.
    pub fn free_slot(&self) -> Option<usize> {
        self.slots.iter().position(|slot| !slot.is_cooking())
    }

    pub fn busy_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_cooking()).count()
    }

    /// Put a recipe on a free slot.
    fn occupy(&mut self, index: usize, recipe: Recipe) {
        if let Some(slot) = self.slots.get_mut(index) {
            slot.remaining_ms = recipe.cooking_ms;
            slot.recipe = Some(recipe);
        }
    }

    /// Advance every cooking slot, in slot order.
    ///
    /// Slots that reach zero are freed before returning.
    pub fn tick(&mut self, delta_ms: u32) -> Vec<SlotTick> {
        let mut ticks = Vec::new();

        for (index, slot) in self.slots.iter_mut().enumerate() {
            if !slot.is_cooking() {
                continue;
            }

            slot.remaining_ms = slot.remaining_ms.saturating_sub(delta_ms);

            let completed = if slot.remaining_ms == 0 {
                slot.recipe.take()
            } else {
                None
            };

            ticks.push(SlotTick {
                slot: index,
                remaining_ms: slot.remaining_ms,
                completed,
            });
        }

        ticks
    }
}

// =============================================================================
// COOKING
// =============================================================================

/// A dish finished today.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletedDish {
    pub recipe_id: String,
    pub name: String,
    pub emoji: String,
    pub slot: usize,
    /// 1-based position among today's dishes
    pub dish_index: u32,
    pub reward: i64,
    /// Milliseconds into the day
    pub completed_at_ms: u32,
}

/// Start cooking a recipe on the first free stove.
///
/// Checks run in order: recipe exists, a stove is free, ingredients are
/// available. On success one item per required kind is consumed.
pub fn start_cooking(
    state: &mut GameState,
    catalog: &Catalog,
    recipe_id: &str,
) -> Result<usize, GameError> {
    let recipe = catalog
        .recipe(recipe_id)
        .ok_or_else(|| GameError::RecipeNotFound(recipe_id.to_string()))?;

    let slot = state.stoves.free_slot().ok_or(GameError::NoFreeStove)?;

    let missing = state.inventory.missing_kinds(&recipe.required);
    if !missing.is_empty() {
        return Err(GameError::MissingIngredients {
            recipe: recipe.id.clone(),
            missing,
        });
    }
    let consumed = state.inventory.reserve(&recipe.required).unwrap_or_default();

    state.stoves.occupy(slot, recipe.clone());

    debug!(slot, recipe = %recipe.id, ?consumed, "Cooking started");

    state.push_event(GameEventData::CookingStarted {
        slot,
        recipe_id: recipe.id.clone(),
        recipe_name: recipe.name.clone(),
        cooking_ms: recipe.cooking_ms,
        consumed,
    });
    state.push_cue(AudioCue::Cook);
    state.notify(format!("Started cooking {}!", recipe.name), Severity::Info);

    Ok(slot)
}

/// Advance all stoves by one clock tick. Returns dishes completed.
pub fn advance_stoves(state: &mut GameState, economy: &EconomyConfig, delta_ms: u32) -> usize {
    let ticks = state.stoves.tick(delta_ms);
    let mut completed = 0;

    for tick in ticks {
        state.push_event(GameEventData::StoveTick {
            slot: tick.slot,
            remaining_ms: tick.remaining_ms,
        });

        if let Some(recipe) = tick.completed {
            complete_dish(state, economy, tick.slot, &recipe);
            completed += 1;
        }
    }

    completed
}

fn complete_dish(state: &mut GameState, economy: &EconomyConfig, slot: usize, recipe: &Recipe) {
    let dish_index = state.completed_dishes.len() as u32 + 1;
    let reward = economy.dish_reward(dish_index);

    state.money += reward;
    state.completed_dishes.push(CompletedDish {
        recipe_id: recipe.id.clone(),
        name: recipe.name.clone(),
        emoji: recipe.emoji.clone(),
        slot,
        dish_index,
        reward,
        completed_at_ms: state.clock.elapsed_ms(),
    });

    debug!(slot, recipe = %recipe.id, dish_index, reward, money = state.money, "Dish completed");

    state.push_event(GameEventData::DishCompleted {
        slot,
        recipe_id: recipe.id.clone(),
        recipe_name: recipe.name.clone(),
        reward,
        dish_index,
    });
    state.push_cue(AudioCue::Success);
    state.notify(
        format!("{} is ready! Earned {} VND", recipe.name, reward),
        Severity::Success,
    );

    challenge::on_dish_completed(state, &recipe.id);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::game::catalog::ItemKind;

    fn kitchen(kinds: &[ItemKind]) -> (GameState, GameConfig) {
        let config = GameConfig::default();
        let mut state = GameState::new(&config);
        for kind in kinds {
            let item = config.catalog.item(*kind).unwrap();
            state.inventory.add(item, state.day);
        }
        (state, config)
    }

    #[test]
    fn test_start_cooking_reserves_and_occupies() {
        let (mut state, config) = kitchen(&[ItemKind::Rice, ItemKind::Egg]);

        let slot = start_cooking(&mut state, &config.catalog, "fried_rice").unwrap();
        assert_eq!(slot, 0);
        assert!(state.stoves.slots()[0].is_cooking());
        assert_eq!(state.stoves.slots()[0].remaining_ms(), 10_000);
        assert_eq!(state.inventory.available_count(), 0);
    }

    #[test]
    fn test_error_order() {
        let (mut state, config) = kitchen(&[]);

        assert_eq!(
            start_cooking(&mut state, &config.catalog, "pizza"),
            Err(GameError::RecipeNotFound("pizza".to_string()))
        );

        match start_cooking(&mut state, &config.catalog, "pho") {
            Err(GameError::MissingIngredients { recipe, missing }) => {
                assert_eq!(recipe, "pho");
                assert_eq!(missing, vec![ItemKind::Rice, ItemKind::Beef]);
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_no_free_stove_checked_before_ingredients() {
        let (mut state, config) = kitchen(&[
            ItemKind::Spinach, ItemKind::Carrot,
            ItemKind::Spinach, ItemKind::Carrot,
            ItemKind::Spinach, ItemKind::Carrot,
        ]);

        for expected in 0..STOVE_COUNT {
            assert_eq!(start_cooking(&mut state, &config.catalog, "spinach_soup"), Ok(expected));
        }

        // Nothing left in inventory, but the stove check wins
        assert_eq!(
            start_cooking(&mut state, &config.catalog, "pho"),
            Err(GameError::NoFreeStove)
        );
    }

    #[test]
    fn test_failed_cook_consumes_nothing() {
        let (mut state, config) = kitchen(&[ItemKind::Rice]);
        assert!(start_cooking(&mut state, &config.catalog, "fried_rice").is_err());
        assert_eq!(state.inventory.available_count(), 1);
        assert_eq!(state.stoves.busy_count(), 0);
    }

    #[test]
    fn test_completion_frees_slot_and_credits_reward() {
        let (mut state, config) = kitchen(&[ItemKind::Spinach, ItemKind::Carrot]);
        let money_before = state.money;
        start_cooking(&mut state, &config.catalog, "spinach_soup").unwrap();

        let mut last_remaining = u32::MAX;
        let mut completed = 0;
        for _ in 0..80 {
            if let Some(slot) = state.stoves.slot(0) {
                if slot.is_cooking() {
                    assert!(slot.remaining_ms() <= last_remaining);
                    last_remaining = slot.remaining_ms();
                }
            }
            completed += advance_stoves(&mut state, &config.economy, 100);
        }

        assert_eq!(completed, 1);
        assert!(!state.stoves.slots()[0].is_cooking());
        assert_eq!(state.completed_dishes.len(), 1);
        assert_eq!(state.money, money_before + 25_000);
    }

    #[test]
    fn test_same_tick_completions_in_slot_order() {
        let (mut state, config) = kitchen(&[
            ItemKind::Rice, ItemKind::Egg,
            ItemKind::Rice, ItemKind::Egg,
        ]);
        start_cooking(&mut state, &config.catalog, "fried_rice").unwrap();
        start_cooking(&mut state, &config.catalog, "fried_rice").unwrap();

        for _ in 0..100 {
            advance_stoves(&mut state, &config.economy, 100);
        }

        let dishes = &state.completed_dishes;
        assert_eq!(dishes.len(), 2);
        assert_eq!((dishes[0].slot, dishes[0].reward), (0, 25_000));
        assert_eq!((dishes[1].slot, dishes[1].reward), (1, 30_000));
    }
}
