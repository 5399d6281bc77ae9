//! Class abilities
//!
//! Every class has one special action behind a cooldown. Invoking it while the
//! cooldown is running is rejected and leaves the counter alone; any accepted
//! invocation resets the counter to the class maximum, even if it hits nothing.

use tracing::debug;

use crate::consts::FIREBALL_RANGE_SQ;
use crate::monster::Enemy;
use crate::player::{Player, PlayerClass};

/// What an ability invocation did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AbilityOutcome {
    /// Rejected; turns left on the cooldown
    OnCooldown { ability: &'static str, remaining: u32 },
    /// A one-shot melee buff is now armed
    Armed(PlayerClass),
    /// Area damage; indices of the enemies that were hit
    Fireball { damage: i32, hits: Vec<usize> },
    /// Hp restored
    Healed(i32),
}

impl AbilityOutcome {
    /// True if the invocation was accepted and the turn should advance
    pub fn took_effect(&self) -> bool {
        !matches!(self, AbilityOutcome::OnCooldown { .. })
    }

    pub fn message(&self) -> String {
        match self {
            AbilityOutcome::OnCooldown { ability, remaining } => {
                format!("{} on cooldown ({} turns).", ability, remaining)
            }
            AbilityOutcome::Armed(PlayerClass::Rogue) => {
                "Backstab ready! Next attack deals triple damage.".to_string()
            }
            AbilityOutcome::Armed(_) => {
                "Shield Bash ready! Next attack deals bonus damage and stuns.".to_string()
            }
            AbilityOutcome::Fireball { hits, .. } if hits.is_empty() => {
                "Fireball! No enemies in range.".to_string()
            }
            AbilityOutcome::Fireball { damage, hits } => {
                format!("Fireball hits {} enemies for {} damage!", hits.len(), damage)
            }
            AbilityOutcome::Healed(amount) => format!("Divine Heal restores {} HP!", amount),
        }
    }
}

impl Player {
    /// Invoke the class ability against the current enemy list
    pub fn use_ability(&mut self, enemies: &mut [Enemy]) -> AbilityOutcome {
        if self.ability_cooldown > 0 {
            return AbilityOutcome::OnCooldown {
                ability: self.class.ability_name(),
                remaining: self.ability_cooldown,
            };
        }
        self.ability_cooldown = self.class.cooldown_max();

        match self.class {
            PlayerClass::Warrior | PlayerClass::Rogue => {
                self.ability_armed = true;
                AbilityOutcome::Armed(self.class)
            }
            PlayerClass::Mage => {
                let damage = 8 + 2 * self.body.level as i32;
                let origin = self.pos();
                let mut hits = Vec::new();
                for (i, enemy) in enemies.iter_mut().enumerate() {
                    if !enemy.is_alive() || origin.distance_sq(enemy.pos()) > FIREBALL_RANGE_SQ {
                        continue;
                    }
                    enemy.body.take_damage(damage);
                    self.stats.record_dealt(damage);
                    hits.push(i);
                }
                debug!(damage, hits = hits.len(), "fireball");
                AbilityOutcome::Fireball { damage, hits }
            }
            PlayerClass::Cleric => {
                let heal = self.body.max_hp / 2;
                self.body.heal(heal);
                AbilityOutcome::Healed(heal)
            }
        }
    }
}
