//! Per-session statistics

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SessionStats {
    pub damage_dealt: u32,
    pub damage_taken: u32,
    pub potions_used: u32,
    pub turns_played: u32,
    pub kills: u32,
    /// What last hurt the player, for the death message
    #[serde(default)]
    pub last_damage_source: String,
}

impl SessionStats {
    pub fn record_dealt(&mut self, amount: i32) {
        self.damage_dealt += amount.max(0) as u32;
    }

    pub fn record_taken(&mut self, amount: i32, source: impl Into<String>) {
        self.damage_taken += amount.max(0) as u32;
        self.last_damage_source = source.into();
    }
}
