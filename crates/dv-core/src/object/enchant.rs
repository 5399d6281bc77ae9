//! Weapon and armor enchantments

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use crate::rng::RandomSource;

/// Enchantment tag; adds a name prefix and a fixed value modifier
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
pub enum Enchantment {
    #[default]
    None,
    Rusty,
    Sharp,
    Flaming,
    Frozen,
    Vampiric,
    Blessed,
    Legendary,
}

impl Enchantment {
    pub const fn modifier(self) -> i32 {
        match self {
            Enchantment::None => 0,
            Enchantment::Rusty => -1,
            Enchantment::Sharp => 2,
            Enchantment::Flaming | Enchantment::Frozen | Enchantment::Vampiric => 1,
            Enchantment::Blessed => 3,
            Enchantment::Legendary => 5,
        }
    }

    pub const fn prefix(self) -> &'static str {
        match self {
            Enchantment::None => "",
            Enchantment::Rusty => "Rusty ",
            Enchantment::Sharp => "Sharp ",
            Enchantment::Flaming => "Flaming ",
            Enchantment::Frozen => "Frozen ",
            Enchantment::Vampiric => "Vampiric ",
            Enchantment::Blessed => "Blessed ",
            Enchantment::Legendary => "Legendary ",
        }
    }

    /// Descriptive tag shown after the item name
    pub const fn tag(self) -> Option<&'static str> {
        match self {
            Enchantment::Flaming => Some("[Burns]"),
            Enchantment::Vampiric => Some("[Lifesteal]"),
            Enchantment::Frozen => Some("[Chills]"),
            Enchantment::Blessed => Some("[Holy]"),
            Enchantment::Legendary => Some("[Legendary]"),
            _ => None,
        }
    }

    /// Roll an enchantment; deeper floors have better odds
    pub fn roll(depth: u32, legendary: bool, rng: &mut dyn RandomSource) -> Enchantment {
        if legendary {
            return Enchantment::Legendary;
        }
        let roll = rng.rn2(100);
        // Ascending (upper bound, result) thresholds per depth bracket
        let table: &[(u32, Enchantment)] = if depth >= 6 {
            &[
                (5, Enchantment::Rusty),
                (20, Enchantment::Sharp),
                (35, Enchantment::Flaming),
                (50, Enchantment::Frozen),
                (65, Enchantment::Vampiric),
                (80, Enchantment::Blessed),
            ]
        } else if depth >= 3 {
            &[
                (10, Enchantment::Rusty),
                (30, Enchantment::Sharp),
                (45, Enchantment::Flaming),
                (55, Enchantment::Frozen),
                (60, Enchantment::Vampiric),
            ]
        } else {
            &[(20, Enchantment::Rusty), (35, Enchantment::Sharp)]
        };
        table
            .iter()
            .find(|(bound, _)| roll < *bound)
            .map_or(Enchantment::None, |(_, e)| *e)
    }
}
