//! Game Errors
//!
//! Recoverable, user-facing failures. None of these are fatal; the
//! simulation surfaces them as error notifications and carries on.

use crate::game::catalog::ItemKind;

/// Why a player action was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    /// All stoves are occupied.
    #[error("All stoves are busy!")]
    NoFreeStove,

    /// Inventory lacks an unconsumed item for some required kind.
    #[error("Missing ingredients for {recipe}: {}", format_kinds(.missing))]
    MissingIngredients {
        recipe: String,
        missing: Vec<ItemKind>,
    },

    /// Unknown recipe id.
    #[error("Unknown recipe: {0}")]
    RecipeNotFound(String),

    /// Item kind is not sold in this catalog.
    #[error("Unknown item: {0}")]
    ItemNotFound(ItemKind),

    /// Not enough money to buy an item.
    #[error("Not enough money for {item}: costs {cost}, have {balance}")]
    InsufficientFunds {
        item: ItemKind,
        cost: i64,
        balance: i64,
    },

    /// A day is already in progress.
    #[error("A day is already in progress")]
    DayNotStartable,

    /// The action needs a running day.
    #[error("No day is in progress")]
    NoActiveDay,

    /// All days have been played.
    #[error("The game is over")]
    GameOver,
}

fn format_kinds(kinds: &[ItemKind]) -> String {
    kinds
        .iter()
        .map(|kind| kind.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = GameError::MissingIngredients {
            recipe: "pho".to_string(),
            missing: vec![ItemKind::Rice, ItemKind::Beef],
        };
        assert_eq!(err.to_string(), "Missing ingredients for pho: rice, beef");

        let err = GameError::InsufficientFunds {
            item: ItemKind::Beef,
            cost: 70_000,
            balance: 10_000,
        };
        assert_eq!(err.to_string(), "Not enough money for beef: costs 70000, have 10000");
    }
}
