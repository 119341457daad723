//! Inventory
//!
//! Items the player holds for the current day. Items are flagged `consumed`
//! when reserved by a stove or written off as waste, and dropped from the
//! list at the day boundary.

use std::collections::BTreeSet;
use serde::{Serialize, Deserialize};

use crate::game::catalog::{ItemKind, ShopItem};

/// A single held ingredient.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryItem {
    /// Unique within a game, never reused
    pub instance_id: u32,
    pub kind: ItemKind,
    pub name: String,
    pub emoji: String,
    pub purchase_cost: i64,
    /// Last day on which the item is still fresh
    pub expiry_day: u32,
    pub consumed: bool,
    pub spoiled: bool,
}

impl InventoryItem {
    /// Has the item passed its expiry day?
    pub fn is_expired(&self, day: u32) -> bool {
        day > self.expiry_day
    }

    /// Available for cooking.
    #[inline]
    pub fn is_available(&self) -> bool {
        !self.consumed
    }
}

/// Ordered list of held items.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inventory {
    items: Vec<InventoryItem>,
    next_instance_id: u32,
}

impl Inventory {
    /// Create an empty inventory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a fresh item. Returns its instance id.
    pub fn add(&mut self, item: &ShopItem, current_day: u32) -> u32 {
        let instance_id = self.next_instance_id;
        self.next_instance_id += 1;

        self.items.push(InventoryItem {
            instance_id,
            kind: item.kind,
            name: item.name.clone(),
            emoji: item.emoji.clone(),
            purchase_cost: item.cost,
            expiry_day: current_day + item.shelf_life_days,
            consumed: false,
            spoiled: false,
        });

        instance_id
    }

    /// All items, oldest first.
    pub fn items(&self) -> &[InventoryItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Get an item by instance id.
    pub fn get(&self, instance_id: u32) -> Option<&InventoryItem> {
        self.items.iter().find(|item| item.instance_id == instance_id)
    }

    /// Is there an unconsumed item of this kind?
    pub fn has_available(&self, kind: ItemKind) -> bool {
        self.items.iter().any(|item| item.kind == kind && item.is_available())
    }

    /// Number of unconsumed items.
    pub fn available_count(&self) -> usize {
        self.items.iter().filter(|item| item.is_available()).count()
    }

    /// Kinds from `required` with no unconsumed item.
    pub fn missing_kinds(&self, required: &BTreeSet<ItemKind>) -> Vec<ItemKind> {
        required
            .iter()
            .copied()
            .filter(|kind| !self.has_available(*kind))
            .collect()
    }

    /// Reserve one unconsumed item per required kind.
    ///
    /// All-or-nothing: if any kind is missing nothing is touched and `None`
    /// is returned. Otherwise the oldest matching item of each kind is marked
    /// consumed and the reserved instance ids are returned.
    pub fn reserve(&mut self, required: &BTreeSet<ItemKind>) -> Option<Vec<u32>> {
        if !self.missing_kinds(required).is_empty() {
            return None;
        }

        let mut reserved = Vec::with_capacity(required.len());
        for kind in required {
            if let Some(item) = self
                .items
                .iter_mut()
                .find(|item| item.kind == *kind && item.is_available())
            {
                item.consumed = true;
                reserved.push(item.instance_id);
            }
        }

        Some(reserved)
    }

    /// Write off every unconsumed item as spoiled.
    ///
    /// Returns snapshots of the items that were wasted.
    pub fn spoil_available(&mut self) -> Vec<InventoryItem> {
        let mut wasted = Vec::new();
        for item in self.items.iter_mut().filter(|item| item.is_available()) {
            item.consumed = true;
            item.spoiled = true;
            wasted.push(item.clone());
        }
        wasted
    }

    /// Drop consumed items. Returns how many were removed.
    pub fn purge_consumed(&mut self) -> usize {
        let before = self.items.len();
        self.items.retain(|item| item.is_available());
        before - self.items.len()
    }
}
