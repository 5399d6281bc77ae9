//! Difficulty scaling for spawned enemies

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Session difficulty
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
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

impl Difficulty {
    pub fn scale_hp(self, hp: i32) -> i32 {
        match self {
            Difficulty::Easy => (hp * 3 / 4).max(1),
            Difficulty::Normal => hp,
            Difficulty::Hard => hp * 3 / 2,
        }
    }

    pub fn scale_attack(self, attack: i32) -> i32 {
        match self {
            Difficulty::Easy => (attack * 3 / 4).max(1),
            Difficulty::Normal => attack,
            Difficulty::Hard => attack * 5 / 4,
        }
    }

    /// Additional enemies per floor
    pub fn extra_spawns(self) -> usize {
        match self {
            Difficulty::Hard => 2,
            _ => 0,
        }
    }
}
