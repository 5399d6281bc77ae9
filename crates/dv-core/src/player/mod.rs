//! Player character
//!
//! The player's body is a [`Creature`]; everything derived from equipment or
//! temporary effects is computed on demand rather than stored.

pub mod ability;
pub mod class;
pub mod experience;
pub mod stats;
pub mod status;

pub use ability::AbilityOutcome;
pub use class::{ClassStats, PlayerClass};
pub use experience::LevelChoice;
pub use stats::SessionStats;
pub use status::{StatusEffects, StatusTick};

use serde::{Deserialize, Serialize};

use crate::consts::{BLIND_SIGHT_RADIUS, SIGHT_RADIUS};
use crate::creature::{Creature, Position};
use crate::object::{Enchantment, Inventory, Item, ItemKind};

/// Worn weapon and armor. Each slot owns its item outright.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Equipment {
    pub weapon: Option<Item>,
    pub armor: Option<Item>,
}

impl Equipment {
    pub fn weapon_value(&self) -> i32 {
        self.weapon.as_ref().map_or(0, |w| w.value)
    }

    pub fn armor_value(&self) -> i32 {
        self.armor.as_ref().map_or(0, |a| a.value)
    }

    pub fn weapon_enchantment(&self) -> Enchantment {
        self.weapon
            .as_ref()
            .map_or(Enchantment::None, |w| w.enchantment)
    }

    fn slot_mut(&mut self, kind: ItemKind) -> Option<&mut Option<Item>> {
        match kind {
            ItemKind::Weapon => Some(&mut self.weapon),
            ItemKind::Armor => Some(&mut self.armor),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub body: Creature,
    pub class: PlayerClass,
    pub base_attack: i32,
    pub base_defense: i32,
    pub equipment: Equipment,
    pub inventory: Inventory,
    pub ability_cooldown: u32,
    /// One-shot melee buff waiting for the next attack
    pub ability_armed: bool,
    pub status: StatusEffects,
    pub gold: i32,
    pub stats: SessionStats,
    pub pending_level_ups: u32,
}

impl Player {
    pub fn new(class: PlayerClass, pos: Position) -> Self {
        let s = class.stats();
        Self {
            body: Creature::new(pos, "Player", '@', s.hp, s.attack, s.defense),
            class,
            base_attack: s.attack,
            base_defense: s.defense,
            equipment: Equipment::default(),
            inventory: Inventory::new(),
            ability_cooldown: 0,
            ability_armed: false,
            status: StatusEffects::default(),
            gold: 0,
            stats: SessionStats::default(),
            pending_level_ups: 0,
        }
    }

    pub fn pos(&self) -> Position {
        self.body.pos
    }

    pub fn is_alive(&self) -> bool {
        self.body.is_alive()
    }

    pub fn total_attack(&self) -> i32 {
        self.base_attack + self.equipment.weapon_value()
    }

    pub fn total_defense(&self) -> i32 {
        self.base_defense + self.equipment.armor_value() + self.status.shield_defense()
    }

    /// Sight radius, shrunk while blinded
    pub fn sight_radius(&self) -> i32 {
        if self.status.is_blind() {
            BLIND_SIGHT_RADIUS
        } else {
            SIGHT_RADIUS
        }
    }

    /// Count the ability cooldown down by one turn
    pub fn tick_cooldown(&mut self) {
        self.ability_cooldown = self.ability_cooldown.saturating_sub(1);
    }

    /// Equip the weapon or armor at `index`.
    ///
    /// The previous occupant of the slot takes the new item's inventory index,
    /// so equipping never needs a free slot. Returns `None` for out-of-range
    /// indices and non-equipment items.
    pub fn equip(&mut self, index: usize) -> Option<String> {
        let kind = self.inventory.get(index)?.kind;
        let slot = self.equipment.slot_mut(kind)?;
        let msg;
        match slot.take() {
            Some(old) => {
                let new = self.inventory.replace(index, old)?;
                msg = format!("Equipped {}.", new.name);
                *slot = Some(new);
            }
            None => {
                let new = self.inventory.remove(index)?;
                msg = format!("Equipped {}.", new.name);
                *slot = Some(new);
            }
        }
        Some(msg)
    }

    /// Picking-up note comparing gear against what is equipped
    pub fn gear_comparison(&self, item: &Item) -> Option<String> {
        let (equipped, stat) = match item.kind {
            ItemKind::Weapon => (self.equipment.weapon.as_ref(), "ATK"),
            ItemKind::Armor => (self.equipment.armor.as_ref(), "DEF"),
            _ => return None,
        };
        let Some(current) = equipped else {
            let noun = if item.kind == ItemKind::Weapon { "weapon" } else { "armor" };
            return Some(format!("[new {}!]", noun));
        };
        let diff = item.value - current.value;
        match diff.signum() {
            1 => Some(format!("[+{} {} vs equipped]", diff, stat)),
            -1 => Some(format!("[{} {} vs equipped]", diff, stat)),
            _ => None,
        }
    }
}
