//! Player classes (role.c)

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Starting stats and per-level growth for a class
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassStats {
    pub hp: i32,
    pub attack: i32,
    pub defense: i32,
    pub hp_growth: i32,
    pub attack_growth: i32,
    pub defense_growth: i32,
    pub ability: &'static str,
    pub cooldown: u32,
}

/// The four playable archetypes
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
)]
#[strum(ascii_case_insensitive)]
pub enum PlayerClass {
    #[default]
    Warrior,
    Rogue,
    Mage,
    Cleric,
}

impl PlayerClass {
    pub const fn stats(self) -> ClassStats {
        match self {
            PlayerClass::Warrior => ClassStats {
                hp: 40,
                attack: 4,
                defense: 4,
                hp_growth: 8,
                attack_growth: 1,
                defense_growth: 2,
                ability: "Shield Bash",
                cooldown: 8,
            },
            PlayerClass::Rogue => ClassStats {
                hp: 25,
                attack: 7,
                defense: 1,
                hp_growth: 3,
                attack_growth: 3,
                defense_growth: 1,
                ability: "Backstab",
                cooldown: 6,
            },
            PlayerClass::Mage => ClassStats {
                hp: 20,
                attack: 8,
                defense: 1,
                hp_growth: 3,
                attack_growth: 3,
                defense_growth: 0,
                ability: "Fireball",
                cooldown: 10,
            },
            PlayerClass::Cleric => ClassStats {
                hp: 35,
                attack: 3,
                defense: 3,
                hp_growth: 6,
                attack_growth: 1,
                defense_growth: 1,
                ability: "Divine Heal",
                cooldown: 12,
            },
        }
    }

    pub const fn ability_name(self) -> &'static str {
        self.stats().ability
    }

    pub const fn cooldown_max(self) -> u32 {
        self.stats().cooldown
    }
}
