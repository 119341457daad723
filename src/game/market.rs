//! Market
//!
//! Items enter the inventory two ways: bought with money in the shop or
//! picked up for free in the runner.

use tracing::debug;

use crate::game::catalog::{Catalog, ItemKind};
use crate::game::challenge;
use crate::game::error::GameError;
use crate::game::events::{AudioCue, GameEventData, ItemSource, Severity};
use crate::game::state::GameState;

/// Buy one item. Returns the new instance id.
pub fn buy_item(state: &mut GameState, catalog: &Catalog, kind: ItemKind) -> Result<u32, GameError> {
    let item = catalog.item(kind).ok_or(GameError::ItemNotFound(kind))?;

    if state.money < item.cost {
        return Err(GameError::InsufficientFunds {
            item: kind,
            cost: item.cost,
            balance: state.money,
        });
    }

    state.money -= item.cost;
    let instance_id = state.inventory.add(item, state.day);

    debug!(%kind, cost = item.cost, money = state.money, instance_id, "Item bought");

    state.push_event(GameEventData::ItemAdded {
        instance_id,
        kind,
        source: ItemSource::Purchased,
        paid: item.cost,
    });
    state.push_cue(AudioCue::Buy);
    state.notify(format!("Bought {}!", item.name), Severity::Success);

    challenge::on_item_added(state, kind);

    Ok(instance_id)
}

/// Add a runner pickup for free. Returns the new instance id, or `None`
/// if the kind is not in the catalog.
pub fn collect_item(state: &mut GameState, catalog: &Catalog, kind: ItemKind) -> Option<u32> {
    let item = catalog.item(kind)?;
    let instance_id = state.inventory.add(item, state.day);

    debug!(%kind, instance_id, "Item collected");

    state.push_event(GameEventData::ItemAdded {
        instance_id,
        kind,
        source: ItemSource::Collected,
        paid: 0,
    });
    state.notify(format!("Collected {} {}!", item.emoji, item.name), Severity::Success);

    challenge::on_item_added(state, kind);

    Some(instance_id)
}
