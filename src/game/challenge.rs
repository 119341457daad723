//! Daily Challenge
//!
//! One bonus objective per day, drawn from the catalog pool. Completion is
//! checked as items arrive and dishes finish; the bonus is paid at day end.

use serde::{Serialize, Deserialize};
use tracing::debug;

use crate::core::rng::DeterministicRng;
use crate::game::catalog::{Catalog, ChallengeGoal, ItemKind};
use crate::game::events::{GameEventData, Severity};
use crate::game::state::GameState;

/// Today's challenge.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyChallenge {
    pub text: String,
    pub goal: ChallengeGoal,
    pub bonus: i64,
    pub completed: bool,
}

impl DailyChallenge {
    /// Draw a challenge uniformly from the pool.
    pub fn draw(rng: &mut DeterministicRng, catalog: &Catalog) -> Option<Self> {
        rng.choose(&catalog.challenges).map(|template| Self {
            text: template.text.clone(),
            goal: template.goal.clone(),
            bonus: template.bonus,
            completed: false,
        })
    }

    fn wants_item(&self, kind: ItemKind) -> bool {
        matches!(&self.goal, ChallengeGoal::Collect { kind: wanted } if *wanted == kind)
    }

    fn wants_dish(&self, recipe_id: &str) -> bool {
        matches!(&self.goal, ChallengeGoal::Cook { recipe_id: wanted } if wanted == recipe_id)
    }
}

/// Check a collect goal after an item is bought or collected.
pub fn on_item_added(state: &mut GameState, kind: ItemKind) {
    let satisfied = state
        .challenge
        .as_ref()
        .is_some_and(|challenge| !challenge.completed && challenge.wants_item(kind));

    if satisfied {
        complete(state);
    }
}

/// Check a cook goal after a dish finishes.
pub fn on_dish_completed(state: &mut GameState, recipe_id: &str) {
    let satisfied = state
        .challenge
        .as_ref()
        .is_some_and(|challenge| !challenge.completed && challenge.wants_dish(recipe_id));

    if satisfied {
        complete(state);
    }
}

fn complete(state: &mut GameState) {
    let Some(challenge) = state.challenge.as_mut() else {
        return;
    };
    challenge.completed = true;

    let text = challenge.text.clone();
    let bonus = challenge.bonus;

    debug!(%text, bonus, "Challenge completed");

    state.push_event(GameEventData::ChallengeCompleted {
        text: text.clone(),
        bonus,
    });
    state.notify(format!("Challenge complete: {text}"), Severity::Success);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;

    fn with_goal(goal: ChallengeGoal) -> GameState {
        let mut state = GameState::new(&GameConfig::default());
        state.challenge = Some(DailyChallenge {
            text: "test".to_string(),
            goal,
            bonus: 10_000,
            completed: false,
        });
        state
    }

    #[test]
    fn test_draw_uses_pool() {
        let catalog = Catalog::default();
        let mut rng = DeterministicRng::new(42);
        for _ in 0..20 {
            let challenge = DailyChallenge::draw(&mut rng, &catalog).unwrap();
            assert!(catalog.challenges.iter().any(|t| t.text == challenge.text));
            assert!(!challenge.completed);
        }
    }

    #[test]
    fn test_draw_empty_pool() {
        let catalog = Catalog { challenges: Vec::new(), ..Catalog::default() };
        let mut rng = DeterministicRng::new(42);
        assert!(DailyChallenge::draw(&mut rng, &catalog).is_none());
    }

    #[test]
    fn test_collect_goal() {
        let mut state = with_goal(ChallengeGoal::Collect { kind: ItemKind::Beef });

        on_item_added(&mut state, ItemKind::Rice);
        assert!(!state.challenge.as_ref().unwrap().completed);

        on_dish_completed(&mut state, "pho");
        assert!(!state.challenge.as_ref().unwrap().completed);

        on_item_added(&mut state, ItemKind::Beef);
        assert!(state.challenge.as_ref().unwrap().completed);
    }

    #[test]
    fn test_completes_once() {
        let mut state = with_goal(ChallengeGoal::Cook { recipe_id: "fried_rice".to_string() });

        on_dish_completed(&mut state, "fried_rice");
        on_dish_completed(&mut state, "fried_rice");

        let completions = state
            .take_events()
            .into_iter()
            .filter(|event| matches!(event.data, GameEventData::ChallengeCompleted { .. }))
            .count();
        assert_eq!(completions, 1);
    }
}
