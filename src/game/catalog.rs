//! Game Content Catalog
//!
//! Shop items, recipes and the daily challenge pool. Immutable once the
//! simulation starts; loaded from config or taken from the defaults.

use std::collections::BTreeSet;
use std::fmt;
use serde::{Serialize, Deserialize};

// =============================================================================
// ITEM KIND
// =============================================================================

/// Ingredient kind.
///
/// Implements Ord so recipe requirements iterate deterministically.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum ItemKind {
    Carrot = 0,
    Rice = 1,
    Beef = 2,
    Egg = 3,
    Spinach = 4,
}

impl ItemKind {
    /// Every kind, in declaration order.
    pub const ALL: [ItemKind; 5] = [
        ItemKind::Carrot,
        ItemKind::Rice,
        ItemKind::Beef,
        ItemKind::Egg,
        ItemKind::Spinach,
    ];

    /// Stable identifier used in config files and logs.
    pub fn as_str(self) -> &'static str {
        match self {
            ItemKind::Carrot => "carrot",
            ItemKind::Rice => "rice",
            ItemKind::Beef => "beef",
            ItemKind::Egg => "egg",
            ItemKind::Spinach => "spinach",
        }
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// SHOP ITEMS & RECIPES
// =============================================================================

/// An item that can be bought or collected in the runner.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShopItem {
    pub kind: ItemKind,
    pub name: String,
    pub emoji: String,
    /// Price in VND
    pub cost: i64,
    /// Days until the item expires after purchase
    pub shelf_life_days: u32,
}

impl ShopItem {
    fn new(kind: ItemKind, name: &str, emoji: &str, cost: i64, shelf_life_days: u32) -> Self {
        Self {
            kind,
            name: name.to_string(),
            emoji: emoji.to_string(),
            cost,
            shelf_life_days,
        }
    }
}

/// A dish that can be cooked on a stove.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: String,
    pub name: String,
    /// One unconsumed item of each kind is reserved when cooking starts
    pub required: BTreeSet<ItemKind>,
    pub cooking_ms: u32,
    pub emoji: String,
}

impl Recipe {
    /// Build a recipe from a list of required kinds.
    pub fn new(id: &str, name: &str, required: &[ItemKind], cooking_ms: u32, emoji: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            required: required.iter().copied().collect(),
            cooking_ms,
            emoji: emoji.to_string(),
        }
    }
}

// =============================================================================
// CHALLENGES
// =============================================================================

/// What a daily challenge asks for.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChallengeGoal {
    /// Buy or collect at least one item of this kind
    Collect { kind: ItemKind },
    /// Finish at least one dish of this recipe
    Cook { recipe_id: String },
}

/// A challenge in the daily pool.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChallengeTemplate {
    pub text: String,
    pub goal: ChallengeGoal,
    pub bonus: i64,
}

// =============================================================================
// CATALOG
// =============================================================================

/// All static game content.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Catalog {
    pub items: Vec<ShopItem>,
    pub recipes: Vec<Recipe>,
    pub challenges: Vec<ChallengeTemplate>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self {
            items: vec![
                ShopItem::new(ItemKind::Carrot, "Carrots", "🥕", 15_000, 3),
                ShopItem::new(ItemKind::Rice, "Rice", "🍚", 25_000, 50),
                ShopItem::new(ItemKind::Beef, "Beef", "🥩", 70_000, 1),
                ShopItem::new(ItemKind::Egg, "Eggs", "🥚", 30_000, 7),
                ShopItem::new(ItemKind::Spinach, "Spinach", "🥬", 18_000, 2),
            ],
            recipes: vec![
                Recipe::new("pho", "Beef Soup", &[ItemKind::Beef, ItemKind::Rice], 15_000, "🍜"),
                Recipe::new("fried_rice", "Fried Rice", &[ItemKind::Rice, ItemKind::Egg], 10_000, "🍛"),
                Recipe::new(
                    "spinach_soup",
                    "Spinach Soup",
                    &[ItemKind::Spinach, ItemKind::Carrot],
                    8_000,
                    "🍲",
                ),
            ],
            challenges: vec![
                ChallengeTemplate {
                    text: "Collect at least one Beef in the supermarket!".to_string(),
                    goal: ChallengeGoal::Collect { kind: ItemKind::Beef },
                    bonus: 15_000,
                },
                ChallengeTemplate {
                    text: "Try to cook Fried Rice today!".to_string(),
                    goal: ChallengeGoal::Cook { recipe_id: "fried_rice".to_string() },
                    bonus: 20_000,
                },
            ],
        }
    }
}

impl Catalog {
    /// Look up a shop item by kind.
    pub fn item(&self, kind: ItemKind) -> Option<&ShopItem> {
        self.items.iter().find(|item| item.kind == kind)
    }

    /// Look up a recipe by id.
    pub fn recipe(&self, id: &str) -> Option<&Recipe> {
        self.recipes.iter().find(|recipe| recipe.id == id)
    }
}
