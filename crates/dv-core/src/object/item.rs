//! Items
//!
//! An item is either lying on the floor (`on_ground`, at `pos`) or owned by
//! exactly one inventory or equipment slot. Picking it up clears the flag.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use crate::creature::Position;
use crate::object::enchant::Enchantment;

/// Item kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
pub enum ItemKind {
    HealthPotion,
    ShieldPotion,
    HastePotion,
    AttackBoost,
    DefenseBoost,
    Weapon,
    Armor,
    Gold,
    TeleportScroll,
    Bomb,
}

/// Broad grouping of item kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
pub enum ItemCategory {
    Consumable,
    Boost,
    Weapon,
    Armor,
    Currency,
    Utility,
}

impl ItemKind {
    pub const fn category(self) -> ItemCategory {
        match self {
            ItemKind::HealthPotion | ItemKind::ShieldPotion | ItemKind::HastePotion => {
                ItemCategory::Consumable
            }
            ItemKind::AttackBoost | ItemKind::DefenseBoost => ItemCategory::Boost,
            ItemKind::Weapon => ItemCategory::Weapon,
            ItemKind::Armor => ItemCategory::Armor,
            ItemKind::Gold => ItemCategory::Currency,
            ItemKind::TeleportScroll | ItemKind::Bomb => ItemCategory::Utility,
        }
    }

    pub const fn glyph(self) -> char {
        match self {
            ItemKind::HealthPotion | ItemKind::ShieldPotion | ItemKind::HastePotion => '!',
            ItemKind::AttackBoost | ItemKind::DefenseBoost | ItemKind::TeleportScroll => '?',
            ItemKind::Weapon => '/',
            ItemKind::Armor => '[',
            ItemKind::Gold => '$',
            ItemKind::Bomb => 'o',
        }
    }

    pub const fn is_equipment(self) -> bool {
        matches!(self, ItemKind::Weapon | ItemKind::Armor)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub kind: ItemKind,
    /// Display name, enchantment prefix included
    pub name: String,
    /// Magnitude; its meaning depends on the kind (heal, attack, defense, gold...)
    pub value: i32,
    #[serde(default)]
    pub enchantment: Enchantment,
    pub pos: Position,
    pub on_ground: bool,
}

impl Item {
    /// A plain, unowned, unplaced item
    pub fn new(kind: ItemKind, name: impl Into<String>, value: i32) -> Self {
        Self {
            kind,
            name: name.into(),
            value,
            enchantment: Enchantment::None,
            pos: Position::NONE,
            on_ground: false,
        }
    }

    /// Build an item and apply an enchantment's prefix and value modifier.
    ///
    /// The modifier is applied exactly once, here. Restoring a saved item goes
    /// through serde and keeps the stored name and value as they are.
    pub fn enchanted(
        kind: ItemKind,
        base_name: &str,
        base_value: i32,
        enchantment: Enchantment,
    ) -> Self {
        let mut item = Self::new(kind, base_name, base_value);
        if enchantment != Enchantment::None {
            item.name = format!("{}{}", enchantment.prefix(), base_name);
            item.value = (base_value + enchantment.modifier()).max(1);
            item.enchantment = enchantment;
        }
        item
    }

    pub fn gold(amount: i32) -> Self {
        Self::new(ItemKind::Gold, format!("{} Gold", amount), amount)
    }

    /// Place the item on the floor at `pos`
    pub fn placed_at(mut self, pos: Position) -> Self {
        self.pos = pos;
        self.on_ground = true;
        self
    }

    pub fn glyph(&self) -> char {
        self.kind.glyph()
    }

    pub fn category(&self) -> ItemCategory {
        self.kind.category()
    }

    /// Name plus what the item does
    pub fn description(&self) -> String {
        let mut desc = match self.kind {
            ItemKind::HealthPotion => format!("{} (heals {} HP)", self.name, self.value),
            ItemKind::ShieldPotion => format!("{} (+{} DEF, 10 turns)", self.name, self.value),
            ItemKind::HastePotion => format!("{} (haste, {} turns)", self.name, self.value),
            ItemKind::AttackBoost => format!("{} (+{} ATK permanently)", self.name, self.value),
            ItemKind::DefenseBoost => format!("{} (+{} DEF permanently)", self.name, self.value),
            ItemKind::Weapon => format!("{} ({} ATK)", self.name, self.value),
            ItemKind::Armor => format!("{} ({} DEF)", self.name, self.value),
            ItemKind::Gold => format!("{} ({} gold)", self.name, self.value),
            ItemKind::TeleportScroll => format!("{} (teleport)", self.name),
            ItemKind::Bomb => format!("{} ({} dmg AoE)", self.name, self.value),
        };
        if let Some(tag) = self.enchantment.tag() {
            desc.push(' ');
            desc.push_str(tag);
        }
        desc
    }

    /// Gold a merchant pays for this item; zero means it cannot be sold
    pub fn sell_price(&self) -> i32 {
        match self.kind {
            ItemKind::HealthPotion | ItemKind::ShieldPotion | ItemKind::HastePotion => {
                self.value.max(1)
            }
            ItemKind::AttackBoost | ItemKind::DefenseBoost => (self.value * 15).max(1),
            ItemKind::Weapon => (8 + self.value * 5).max(1),
            ItemKind::Armor => (6 + self.value * 5).max(1),
            ItemKind::TeleportScroll => 10,
            ItemKind::Bomb => 12,
            ItemKind::Gold => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enchantment_applied_once() {
        let sword = Item::enchanted(ItemKind::Weapon, "Long Sword", 7, Enchantment::Sharp);
        assert_eq!(sword.name, "Sharp Long Sword");
        assert_eq!(sword.value, 9);
        assert_eq!(sword.enchantment, Enchantment::Sharp);

        // A restored copy keeps its fields verbatim
        let json = serde_json::to_string(&sword).unwrap();
        let restored: Item = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, sword);
    }

    #[test]
    fn test_rusty_value_floor() {
        let dagger = Item::enchanted(ItemKind::Weapon, "Dagger", 1, Enchantment::Rusty);
        assert_eq!(dagger.value, 1);
        assert_eq!(dagger.name, "Rusty Dagger");
    }

    #[test]
    fn test_no_enchantment_keeps_name() {
        let armor = Item::enchanted(ItemKind::Armor, "Chain Mail", 4, Enchantment::None);
        assert_eq!(armor.name, "Chain Mail");
        assert_eq!(armor.value, 4);
    }

    #[test]
    fn test_sell_prices() {
        assert_eq!(Item::new(ItemKind::HealthPotion, "Health Potion", 14).sell_price(), 14);
        assert_eq!(Item::new(ItemKind::AttackBoost, "Attack Scroll", 1).sell_price(), 15);
        assert_eq!(Item::new(ItemKind::Weapon, "Dagger", 3).sell_price(), 23);
        assert_eq!(Item::new(ItemKind::Armor, "Leather Armor", 2).sell_price(), 16);
        assert_eq!(Item::new(ItemKind::TeleportScroll, "Teleport Scroll", 0).sell_price(), 10);
        assert_eq!(Item::new(ItemKind::Bomb, "Bomb", 12).sell_price(), 12);
        assert_eq!(Item::gold(30).sell_price(), 0);
    }

    #[test]
    fn test_categories() {
        assert_eq!(ItemKind::HastePotion.category(), ItemCategory::Consumable);
        assert_eq!(ItemKind::DefenseBoost.category(), ItemCategory::Boost);
        assert_eq!(ItemKind::Bomb.category(), ItemCategory::Utility);
        assert_eq!(ItemKind::Gold.category(), ItemCategory::Currency);
    }

    #[test]
    fn test_description_tags() {
        let blade = Item::enchanted(ItemKind::Weapon, "Flame Blade", 11, Enchantment::Vampiric);
        assert_eq!(blade.description(), "Vampiric Flame Blade (12 ATK) [Lifesteal]");
    }

    #[test]
    fn test_placed_at() {
        let gold = Item::gold(7).placed_at(Position::new(3, 4));
        assert!(gold.on_ground);
        assert_eq!(gold.pos, Position::new(3, 4));
        assert_eq!(gold.name, "7 Gold");
    }
}
