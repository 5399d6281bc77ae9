//! Picking things up (pickup.c)
//!
//! Ground items live in `GameState::items`. Picking one up moves it out of
//! that list and into the wallet or the inventory, so an item is never both
//! on the floor and owned.

use crate::action::ActionResult;
use crate::gameloop::GameState;
use crate::object::ItemKind;

/// Collect everything underfoot that fits. Runs after every step.
pub fn auto_pickup(state: &mut GameState) {
    let pos = state.player.pos();
    let mut i = 0;
    while i < state.items.len() {
        let item = &state.items[i];
        if !item.on_ground || item.pos != pos {
            i += 1;
            continue;
        }
        if item.kind == ItemKind::Gold {
            let item = state.items.remove(i);
            state.player.gold += item.value;
            state.message(format!("Picked up {} gold.", item.value));
            continue;
        }
        if state.player.inventory.is_full() {
            i += 1;
            continue;
        }
        let item = state.items.remove(i);
        let mut msg = format!("Picked up {}.", item.name);
        if let Some(note) = state.player.gear_comparison(&item) {
            msg.push(' ');
            msg.push_str(&note);
        }
        if let Err(item) = state.player.inventory.add(item) {
            state.items.insert(i, item);
            i += 1;
            continue;
        }
        state.message(msg);
    }
}

/// Explicit pick-up command: trade if the merchant is in reach, otherwise
/// take the first item underfoot.
pub fn pick_up(state: &mut GameState) -> ActionResult {
    let pos = state.player.pos();
    if state.shop.as_ref().is_some_and(|shop| shop.in_reach(pos)) {
        return ActionResult::ShopOpen;
    }

    let Some(i) = state
        .items
        .iter()
        .position(|item| item.on_ground && item.pos == pos)
    else {
        return ActionResult::Failed("Nothing to pick up.".to_string());
    };

    if state.items[i].kind == ItemKind::Gold {
        let item = state.items.remove(i);
        state.player.gold += item.value;
        state.message(format!("Picked up {} gold.", item.value));
        return ActionResult::Success;
    }
    if state.player.inventory.is_full() {
        return ActionResult::Failed("Inventory full!".to_string());
    }
    let item = state.items.remove(i);
    let msg = format!("Picked up {}.", item.name);
    match state.player.inventory.add(item) {
        Ok(()) => {
            state.message(msg);
            ActionResult::Success
        }
        Err(item) => {
            state.items.insert(i, item);
            ActionResult::Failed("Inventory full!".to_string())
        }
    }
}
