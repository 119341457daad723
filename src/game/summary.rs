//! Day Summary and Final Results

use serde::{Serialize, Deserialize};

use crate::game::catalog::ItemKind;
use crate::game::stove::CompletedDish;

/// An item written off at day end.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WastedItem {
    pub instance_id: u32,
    pub kind: ItemKind,
    pub name: String,
    pub emoji: String,
    pub purchase_cost: i64,
}

/// Outcome of the day's challenge.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChallengeOutcome {
    pub text: String,
    pub completed: bool,
    /// Bonus actually credited (0 if not completed)
    pub bonus: i64,
}

/// End-of-day report.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaySummary {
    pub day: u32,
    pub dishes: Vec<CompletedDish>,
    /// Dish rewards earned today; already credited as each dish finished
    pub earnings: i64,
    pub wasted: Vec<WastedItem>,
    pub waste_penalty: i64,
    pub challenge: Option<ChallengeOutcome>,
    pub challenge_bonus: i64,
    /// `earnings - waste_penalty + challenge_bonus`
    pub net_profit: i64,
    /// Balance after the day closed
    pub money: i64,
    /// Cumulative waste score after the day closed
    pub waste_score: u32,
}

/// Results shown after the final day.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinalResults {
    pub days_played: u32,
    pub final_money: i64,
    pub waste_score: u32,
    /// `100 - waste_score`; may go negative
    pub final_score: i64,
}

impl FinalResults {
    pub fn new(days_played: u32, final_money: i64, waste_score: u32) -> Self {
        Self {
            days_played,
            final_money,
            waste_score,
            final_score: 100 - i64::from(waste_score),
        }
    }
}
