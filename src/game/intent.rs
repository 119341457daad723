//! Intents
//!
//! Everything that can change the game, as data: player commands and the
//! two timer sources alike. An ordered list of intents plus the seed fully
//! determines a session.

use std::fmt;
use serde::{Serialize, Deserialize};

use crate::game::catalog::ItemKind;

/// A queued request for the simulation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Intent {
    /// Begin the next day
    StartDay,
    /// Put a recipe on a stove
    Cook { recipe_id: String },
    /// Buy one item
    Buy { kind: ItemKind },
    /// Runner jump (edge-triggered)
    Jump,
    /// Go to the supermarket
    EnterShop,
    /// Go to the kitchen
    EnterKitchen,
    /// Close the day early
    EndDay,
    /// Day clock interval fired
    ClockTick,
    /// Animation frame at a monotonic timestamp
    Frame { now_ms: f64 },
}

impl Intent {
    /// Timer intents are not player actions.
    pub fn is_timer(&self) -> bool {
        matches!(self, Intent::ClockTick | Intent::Frame { .. })
    }

    /// Parse a text command. Used by the binary and by tests that
    /// script sessions.
    ///
    /// `start`, `cook <recipe>`, `buy <kind>`, `jump`, `shop`, `kitchen`,
    /// `end`.
    pub fn parse_command(line: &str) -> Option<Intent> {
        let mut words = line.split_whitespace();
        let intent = match (words.next()?, words.next()) {
            ("start", None) => Intent::StartDay,
            ("cook", Some(recipe)) => Intent::Cook { recipe_id: recipe.to_string() },
            ("buy", Some(kind)) => Intent::Buy {
                kind: serde_json::from_value(serde_json::Value::String(kind.to_string())).ok()?,
            },
            ("jump", None) => Intent::Jump,
            ("shop", None) => Intent::EnterShop,
            ("kitchen", None) => Intent::EnterKitchen,
            ("end", None) => Intent::EndDay,
            _ => return None,
        };

        if words.next().is_some() {
            return None;
        }
        Some(intent)
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Intent::StartDay => write!(f, "start"),
            Intent::Cook { recipe_id } => write!(f, "cook {recipe_id}"),
            Intent::Buy { kind } => write!(f, "buy {kind}"),
            Intent::Jump => write!(f, "jump"),
            Intent::EnterShop => write!(f, "shop"),
            Intent::EnterKitchen => write!(f, "kitchen"),
            Intent::EndDay => write!(f, "end"),
            Intent::ClockTick => write!(f, "clock"),
            Intent::Frame { now_ms } => write!(f, "frame {now_ms:.1}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!(Intent::parse_command("start"), Some(Intent::StartDay));
        assert_eq!(
            Intent::parse_command("cook fried_rice"),
            Some(Intent::Cook { recipe_id: "fried_rice".to_string() })
        );
        assert_eq!(
            Intent::parse_command("  buy   beef "),
            Some(Intent::Buy { kind: ItemKind::Beef })
        );
        assert_eq!(Intent::parse_command("kitchen"), Some(Intent::EnterKitchen));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(Intent::parse_command(""), None);
        assert_eq!(Intent::parse_command("buy caviar"), None);
        assert_eq!(Intent::parse_command("cook"), None);
        assert_eq!(Intent::parse_command("jump jump"), None);
    }

    #[test]
    fn test_display_round_trips_commands() {
        for intent in [
            Intent::StartDay,
            Intent::Cook { recipe_id: "pho".to_string() },
            Intent::Buy { kind: ItemKind::Spinach },
            Intent::EndDay,
        ] {
            assert_eq!(Intent::parse_command(&intent.to_string()), Some(intent));
        }
    }

    #[test]
    fn test_json_shape() {
        let json = serde_json::to_string(&Intent::Frame { now_ms: 16.0 }).unwrap();
        assert_eq!(json, r#"{"type":"frame","now_ms":16.0}"#);
        assert!(Intent::ClockTick.is_timer());
        assert!(!Intent::Jump.is_timer());
    }
}
