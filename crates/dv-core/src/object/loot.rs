//! Floor-scaled item generation (mkobj.c)

use crate::object::enchant::Enchantment;
use crate::object::item::{Item, ItemKind};
use crate::rng::RandomSource;

const WEAPON_NAMES: [&str; 5] = ["Dagger", "Short Sword", "Long Sword", "War Axe", "Flame Blade"];
const ARMOR_NAMES: [&str; 5] = [
    "Leather Armor",
    "Chain Mail",
    "Scale Mail",
    "Plate Armor",
    "Dragon Armor",
];

/// Equipment tier for a floor: 0 on floor 1, capped at 4
pub fn tier_for_depth(depth: u32) -> usize {
    (depth.saturating_sub(1) as usize).min(4)
}

pub fn weapon(depth: u32, enchantment: Enchantment) -> Item {
    let tier = tier_for_depth(depth);
    Item::enchanted(
        ItemKind::Weapon,
        WEAPON_NAMES[tier],
        3 + tier as i32 * 2,
        enchantment,
    )
}

pub fn armor(depth: u32, enchantment: Enchantment) -> Item {
    let tier = tier_for_depth(depth);
    Item::enchanted(
        ItemKind::Armor,
        ARMOR_NAMES[tier],
        2 + tier as i32 * 2,
        enchantment,
    )
}

pub fn health_potion(value: i32) -> Item {
    Item::new(ItemKind::HealthPotion, "Health Potion", value)
}

pub fn shield_potion(depth: u32) -> Item {
    Item::new(ItemKind::ShieldPotion, "Shield Potion", 3 + depth as i32)
}

pub fn haste_potion(depth: u32) -> Item {
    Item::new(ItemKind::HastePotion, "Haste Potion", 4 + depth as i32 / 2)
}

pub fn bomb(depth: u32) -> Item {
    Item::new(ItemKind::Bomb, "Bomb", 10 + depth as i32 * 2)
}

pub fn attack_scroll() -> Item {
    Item::new(ItemKind::AttackBoost, "Attack Scroll", 1)
}

pub fn defense_scroll() -> Item {
    Item::new(ItemKind::DefenseBoost, "Defense Scroll", 1)
}

pub fn teleport_scroll() -> Item {
    Item::new(ItemKind::TeleportScroll, "Teleport Scroll", 0)
}

/// Gear enchantment for floor loot: only from floor 3, one time in three
fn floor_gear_enchantment(depth: u32, rng: &mut dyn RandomSource) -> Enchantment {
    if depth >= 3 && rng.one_in(3) {
        Enchantment::roll(depth, false, rng)
    } else {
        Enchantment::None
    }
}

/// The candidate pool that random floor items are drawn from
pub fn floor_pool(depth: u32, rng: &mut dyn RandomSource) -> Vec<Item> {
    let mut pool = vec![
        health_potion(10 + depth as i32 * 2),
        health_potion(10 + depth as i32 * 2),
        attack_scroll(),
        defense_scroll(),
        teleport_scroll(),
        bomb(depth),
        shield_potion(depth),
        haste_potion(depth),
    ];
    if rng.one_in(3) {
        let ench = floor_gear_enchantment(depth, rng);
        pool.push(weapon(depth, ench));
    }
    if rng.one_in(3) {
        let ench = floor_gear_enchantment(depth, rng);
        pool.push(armor(depth, ench));
    }
    pool
}

/// Weapon or armor, 50/50
pub fn random_gear(depth: u32, enchantment: Enchantment, rng: &mut dyn RandomSource) -> Item {
    if rng.one_in(2) {
        weapon(depth, enchantment)
    } else {
        armor(depth, enchantment)
    }
}

/// Enchanted drop from a slain enemy. Bosses always drop legendary gear;
/// everything else drops one time in ten.
pub fn kill_drop(depth: u32, is_boss: bool, rng: &mut dyn RandomSource) -> Option<Item> {
    if !is_boss && !rng.one_in(10) {
        return None;
    }
    let ench = Enchantment::roll(depth, is_boss, rng);
    Some(random_gear(depth, ench, rng))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::ScriptedRng;

    #[test]
    fn test_tiers() {
        assert_eq!(tier_for_depth(1), 0);
        assert_eq!(tier_for_depth(3), 2);
        assert_eq!(tier_for_depth(8), 4);
        assert_eq!(weapon(1, Enchantment::None).name, "Dagger");
        assert_eq!(weapon(1, Enchantment::None).value, 3);
        assert_eq!(armor(5, Enchantment::None).name, "Dragon Armor");
        assert_eq!(armor(5, Enchantment::None).value, 10);
    }

    #[test]
    fn test_boss_drop_is_legendary() {
        // rn2(2) == 0 picks a weapon
        let mut rng = ScriptedRng::new([0]);
        let drop = kill_drop(5, true, &mut rng).unwrap();
        assert_eq!(drop.enchantment, Enchantment::Legendary);
        assert_eq!(drop.name, "Legendary Flame Blade");
        assert_eq!(drop.value, 16);
    }

    #[test]
    fn test_common_drop_rate() {
        let mut rng = ScriptedRng::new([3]);
        assert!(kill_drop(2, false, &mut rng).is_none());
    }

    #[test]
    fn test_pool_gear_chance() {
        // weapon roll hits, armor roll misses
        let mut rng = ScriptedRng::new([0, 1]);
        let pool = floor_pool(1, &mut rng);
        assert_eq!(pool.len(), 9);
        assert_eq!(pool.last().map(|i| i.kind), Some(ItemKind::Weapon));
    }
}
