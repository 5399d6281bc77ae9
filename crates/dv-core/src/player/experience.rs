//! Experience and level advancement (exper.c)

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use crate::player::Player;

/// Heal granted by every level-up choice before its own effect
const LEVEL_UP_HEAL: i32 = 5;

/// Stat picked when resolving a pending level-up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
pub enum LevelChoice {
    /// Raise max hp by the class growth and heal that much
    Vitality,
    /// Raise base attack
    Power,
    /// Raise base defense
    Fortitude,
}

impl Player {
    /// Experience needed to leave the current level
    pub fn xp_to_next_level(&self) -> u32 {
        self.body.level * 20
    }

    /// Add experience. Returns how many levels were gained; each one is queued
    /// as a pending level-up awaiting a [`LevelChoice`].
    pub fn gain_xp(&mut self, amount: u32) -> u32 {
        self.body.xp += amount;
        let mut gained = 0;
        while self.body.xp >= self.xp_to_next_level() {
            self.body.xp -= self.xp_to_next_level();
            self.body.level += 1;
            self.pending_level_ups += 1;
            gained += 1;
        }
        gained
    }

    /// Resolve one pending level-up. No-op when none is pending.
    pub fn apply_level_choice(&mut self, choice: LevelChoice) -> bool {
        if self.pending_level_ups == 0 {
            return false;
        }
        let growth = self.class.stats();
        self.body.heal(LEVEL_UP_HEAL);
        match choice {
            LevelChoice::Vitality => {
                self.body.max_hp += growth.hp_growth;
                self.body.heal(growth.hp_growth);
            }
            LevelChoice::Power => {
                self.base_attack += growth.attack_growth.max(1);
                self.body.max_hp += 2;
            }
            LevelChoice::Fortitude => {
                self.base_defense += growth.defense_growth.max(1);
                self.body.max_hp += 2;
            }
        }
        self.pending_level_ups -= 1;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::creature::Position;
    use crate::player::PlayerClass;

    #[test]
    fn test_single_level() {
        let mut p = Player::new(PlayerClass::Warrior, Position::new(0, 0));
        assert_eq!(p.gain_xp(19), 0);
        assert_eq!(p.gain_xp(1), 1);
        assert_eq!(p.body.level, 2);
        assert_eq!(p.body.xp, 0);
        assert_eq!(p.pending_level_ups, 1);
    }

    #[test]
    fn test_multiple_levels_accumulate() {
        let mut p = Player::new(PlayerClass::Mage, Position::new(0, 0));
        // 20 for level 1, 40 for level 2, 60 for level 3
        assert_eq!(p.gain_xp(125), 3);
        assert_eq!(p.body.level, 4);
        assert_eq!(p.body.xp, 5);
        assert_eq!(p.pending_level_ups, 3);
    }

    #[test]
    fn test_vitality() {
        let mut p = Player::new(PlayerClass::Warrior, Position::new(0, 0));
        p.body.hp = 20;
        p.gain_xp(20);
        assert!(p.apply_level_choice(LevelChoice::Vitality));
        assert_eq!(p.body.max_hp, 48);
        assert_eq!(p.body.hp, 33);
        assert_eq!(p.pending_level_ups, 0);
        assert!(!p.apply_level_choice(LevelChoice::Vitality));
    }

    #[test]
    fn test_fortitude_minimum_growth() {
        let mut p = Player::new(PlayerClass::Mage, Position::new(0, 0));
        p.gain_xp(20);
        p.apply_level_choice(LevelChoice::Fortitude);
        assert_eq!(p.base_defense, 2);
        assert_eq!(p.body.max_hp, 22);
    }

    #[test]
    fn test_power() {
        let mut p = Player::new(PlayerClass::Rogue, Position::new(0, 0));
        p.gain_xp(20);
        p.apply_level_choice(LevelChoice::Power);
        assert_eq!(p.base_attack, 10);
    }
}
