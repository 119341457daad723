//! Game Events
//!
//! Everything a UI layer needs to render, emitted in the order it happened.
//! Events are also the record replay tests compare.

use serde::{Serialize, Deserialize};

use crate::core::geom::Vec2;
use crate::game::catalog::ItemKind;
use crate::game::runner::{EntityKind, RemovalReason};
use crate::game::state::View;
use crate::game::summary::{DaySummary, FinalResults};

/// Notification styling.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Info,
    Success,
    Error,
}

/// Fire-and-forget sound cues.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AudioCue {
    Click,
    Jump,
    Hit,
    Buy,
    Cook,
    Success,
    Error,
}

impl AudioCue {
    pub fn name(self) -> &'static str {
        match self {
            AudioCue::Click => "click",
            AudioCue::Jump => "jump",
            AudioCue::Hit => "hit",
            AudioCue::Buy => "buy",
            AudioCue::Cook => "cook",
            AudioCue::Success => "success",
            AudioCue::Error => "error",
        }
    }
}

/// How an item entered the inventory.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemSource {
    Purchased,
    Collected,
}

/// Game event data.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEventData {
    /// A new day began
    DayStarted {
        day: u32,
        money: i64,
    },

    /// Today's challenge was drawn
    ChallengeAssigned {
        text: String,
        bonus: i64,
    },

    /// Day clock advanced
    ClockTicked {
        remaining_ms: u32,
        ratio: f32,
    },

    /// Obstacle hit cost time
    TimePenalty {
        penalty_ms: u32,
        remaining_ms: u32,
    },

    /// A cooking slot counted down
    StoveTick {
        slot: usize,
        remaining_ms: u32,
    },

    /// A recipe went on a stove
    CookingStarted {
        slot: usize,
        recipe_id: String,
        recipe_name: String,
        cooking_ms: u32,
        /// Inventory instances reserved for the dish
        consumed: Vec<u32>,
    },

    /// A dish finished and was paid for
    DishCompleted {
        slot: usize,
        recipe_id: String,
        recipe_name: String,
        reward: i64,
        dish_index: u32,
    },

    /// An item was bought or collected
    ItemAdded {
        instance_id: u32,
        kind: ItemKind,
        source: ItemSource,
        paid: i64,
    },

    /// Today's challenge was met
    ChallengeCompleted {
        text: String,
        bonus: i64,
    },

    /// Runner entity appeared
    EntitySpawned {
        entity_id: u32,
        kind: EntityKind,
        item: Option<ItemKind>,
        position: Vec2,
    },

    /// Runner entity left the field
    EntityRemoved {
        entity_id: u32,
        kind: EntityKind,
        reason: RemovalReason,
    },

    /// Active screen changed
    ViewChanged {
        view: View,
    },

    /// Day closed out
    DayEnded {
        summary: DaySummary,
    },

    /// Last day is over
    GameFinished {
        results: FinalResults,
    },

    /// User-facing message
    Notify {
        message: String,
        severity: Severity,
    },
}

/// A game event stamped with when it happened.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameEvent {
    /// Clock ticks processed since the game started
    pub tick: u32,
    /// Day the event belongs to (0 before the first day)
    pub day: u32,
    /// Event data
    pub data: GameEventData,
}

impl GameEvent {
    pub fn new(tick: u32, day: u32, data: GameEventData) -> Self {
        Self { tick, day, data }
    }

    /// Is this a user-facing error notification?
    pub fn is_error(&self) -> bool {
        matches!(
            self.data,
            GameEventData::Notify { severity: Severity::Error, .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_json_shape() {
        let event = GameEvent::new(
            12,
            1,
            GameEventData::StoveTick { slot: 2, remaining_ms: 900 },
        );
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["tick"], 12);
        assert_eq!(json["data"]["type"], "stove_tick");
        assert_eq!(json["data"]["slot"], 2);
    }

    #[test]
    fn test_is_error() {
        let error = GameEvent::new(0, 1, GameEventData::Notify {
            message: "All stoves are busy!".to_string(),
            severity: Severity::Error,
        });
        let info = GameEvent::new(0, 1, GameEventData::Notify {
            message: "Bought Rice!".to_string(),
            severity: Severity::Success,
        });
        assert!(error.is_error());
        assert!(!info.is_error());
    }
}
