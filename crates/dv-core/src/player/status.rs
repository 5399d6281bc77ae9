//! Timed status effects (timeout.c)
//!
//! Each effect is its own countdown. Re-applying an effect overwrites the
//! counter instead of stacking it.

use serde::{Deserialize, Serialize};

use crate::consts::{BURN_DAMAGE, SHIELD_TURNS};
use crate::creature::Creature;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusEffects {
    pub poison_turns: u32,
    pub poison_damage: i32,
    pub burning_turns: u32,
    pub burning_damage: i32,
    pub blind_turns: u32,
    pub slow_turns: u32,
    pub haste_turns: u32,
    pub shield_turns: u32,
    pub shield_bonus: i32,
}

impl Default for StatusEffects {
    fn default() -> Self {
        Self {
            poison_turns: 0,
            poison_damage: 0,
            burning_turns: 0,
            burning_damage: BURN_DAMAGE,
            blind_turns: 0,
            slow_turns: 0,
            haste_turns: 0,
            shield_turns: 0,
            shield_bonus: 0,
        }
    }
}

/// Periodic damage taken during one status tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StatusTick {
    /// Poison damage and the turns that were left before the tick
    pub poison: Option<(i32, u32)>,
    /// Burn damage and the turns that were left before the tick
    pub burning: Option<(i32, u32)>,
}

impl StatusTick {
    pub fn total_damage(&self) -> i32 {
        self.poison.map_or(0, |(d, _)| d) + self.burning.map_or(0, |(d, _)| d)
    }
}

impl StatusEffects {
    pub fn poison(&mut self, turns: u32, damage: i32) {
        self.poison_turns = turns;
        self.poison_damage = damage;
    }

    pub fn ignite(&mut self, turns: u32, damage: i32) {
        self.burning_turns = turns;
        self.burning_damage = damage;
    }

    pub fn blind(&mut self, turns: u32) {
        self.blind_turns = turns;
    }

    pub fn slow(&mut self, turns: u32) {
        self.slow_turns = turns;
    }

    pub fn haste(&mut self, turns: u32) {
        self.haste_turns = turns;
    }

    pub fn shield(&mut self, bonus: i32) {
        self.shield_turns = SHIELD_TURNS;
        self.shield_bonus = bonus;
    }

    pub fn is_blind(&self) -> bool {
        self.blind_turns > 0
    }

    pub fn is_slowed(&self) -> bool {
        self.slow_turns > 0
    }

    pub fn is_hasted(&self) -> bool {
        self.haste_turns > 0
    }

    /// Defense contributed right now by an active shield
    pub fn shield_defense(&self) -> i32 {
        if self.shield_turns > 0 {
            self.shield_bonus
        } else {
            0
        }
    }

    /// Poison tick, then burning tick, then plain countdowns.
    pub fn tick(&mut self, body: &mut Creature) -> StatusTick {
        let mut result = StatusTick::default();

        if self.poison_turns > 0 {
            result.poison = Some((self.poison_damage, self.poison_turns));
            body.take_damage(self.poison_damage);
            self.poison_turns -= 1;
        }
        if self.burning_turns > 0 {
            result.burning = Some((self.burning_damage, self.burning_turns));
            body.take_damage(self.burning_damage);
            self.burning_turns -= 1;
        }

        for counter in [
            &mut self.blind_turns,
            &mut self.slow_turns,
            &mut self.haste_turns,
            &mut self.shield_turns,
        ] {
            *counter = counter.saturating_sub(1);
        }

        result
    }
}
