//! Using inventory items (potion.c / read.c / wear.c)

use tracing::debug;

use crate::action::ActionResult;
use crate::action::trap::teleport_player;
use crate::combat::reward_kill;
use crate::consts::{BOMB_RANGE_SQ, SHIELD_TURNS};
use crate::gameloop::GameState;
use crate::object::ItemKind;
use crate::player::PlayerClass;
use crate::rng::RandomSource;

/// Use, drink, read or equip the item at `index`.
/// Out-of-range indices are a silent no-op.
pub fn use_item(state: &mut GameState, index: usize, rng: &mut dyn RandomSource) -> ActionResult {
    let Some(kind) = state.player.inventory.get(index).map(|i| i.kind) else {
        return ActionResult::NoTime;
    };

    if kind.is_equipment() {
        return match state.player.equip(index) {
            Some(msg) => {
                state.message(msg);
                ActionResult::Success
            }
            None => ActionResult::NoTime,
        };
    }
    if kind == ItemKind::Gold {
        return ActionResult::NoTime;
    }

    let Some(item) = state.player.inventory.remove(index) else {
        return ActionResult::NoTime;
    };
    let msg = match kind {
        ItemKind::HealthPotion => {
            let heal = if state.player.class == PlayerClass::Cleric {
                item.value * 3 / 2
            } else {
                item.value
            };
            state.player.body.heal(heal);
            state.player.stats.potions_used += 1;
            format!("Used {}, healed {} HP.", item.name, heal)
        }
        ItemKind::ShieldPotion => {
            state.player.status.shield(item.value);
            state.player.stats.potions_used += 1;
            format!("Used {}, DEF +{} for {} turns!", item.name, item.value, SHIELD_TURNS)
        }
        ItemKind::HastePotion => {
            state.player.status.haste(item.value.max(0) as u32);
            state.player.stats.potions_used += 1;
            format!("Used {}, you feel quick for {} turns!", item.name, item.value)
        }
        ItemKind::AttackBoost => {
            state.player.base_attack += item.value;
            format!("Used {}, ATK +{}!", item.name, item.value)
        }
        ItemKind::DefenseBoost => {
            state.player.base_defense += item.value;
            format!("Used {}, DEF +{}!", item.name, item.value)
        }
        ItemKind::TeleportScroll => {
            if teleport_player(state, rng) {
                "You vanish and reappear elsewhere!".to_string()
            } else {
                "The scroll crumbles, but nothing happens.".to_string()
            }
        }
        ItemKind::Bomb => detonate(state, item.value, rng),
        ItemKind::Weapon | ItemKind::Armor | ItemKind::Gold => return ActionResult::NoTime,
    };
    state.message(msg);
    ActionResult::Success
}

/// Damage every living enemy close to the player. Kills pay out as usual.
fn detonate(state: &mut GameState, damage: i32, rng: &mut dyn RandomSource) -> String {
    let center = state.player.pos();
    let mut hits = 0;
    for index in 0..state.enemies.len() {
        let enemy = &mut state.enemies[index];
        if !enemy.is_alive() || center.distance_sq(enemy.pos()) > BOMB_RANGE_SQ {
            continue;
        }
        let fatal = enemy.body.take_damage(damage);
        enemy.awake = true;
        state.player.stats.record_dealt(damage);
        hits += 1;
        if fatal {
            reward_kill(state, index, rng);
        }
    }
    debug!(hits, damage, "bomb detonated");
    if hits > 0 {
        format!("BOOM! Bomb hits {} enemies for {} damage!", hits, damage)
    } else {
        "BOOM! The bomb explodes but hits nothing.".to_string()
    }
}
