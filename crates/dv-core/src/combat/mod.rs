//! Combat resolution
//!
//! One exchange is: critical roll, raw difference of attack and defense,
//! uniform variance, floor of one, then doubling on a critical. The same
//! resolver serves player melee, enemy melee and enemy arrows.

mod mhitu;
mod reward;
mod uhitm;

pub use mhitu::{enemy_melee, enemy_shoot};
pub use reward::reward_kill;
pub use uhitm::{attack_enemy, effective_attack};

use crate::consts::{CRIT_ONE_IN, DAMAGE_VARIANCE};
use crate::creature::Creature;
use crate::rng::RandomSource;

/// The random half of an exchange, rolled before any arithmetic
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CombatRoll {
    pub critical: bool,
    /// Uniform in `-DAMAGE_VARIANCE..=DAMAGE_VARIANCE`
    pub variance: i32,
}

impl CombatRoll {
    /// Crit first, then variance
    pub fn roll(rng: &mut dyn RandomSource) -> Self {
        let critical = rng.one_in(CRIT_ONE_IN);
        let variance = rng.rn2((DAMAGE_VARIANCE * 2 + 1) as u32) as i32 - DAMAGE_VARIANCE;
        Self { critical, variance }
    }

    /// Damage before the critical multiplier, never below one
    pub fn base_damage(&self, attack: i32, defense: i32) -> i32 {
        (attack - defense + self.variance).max(1)
    }

    pub fn damage(&self, attack: i32, defense: i32) -> i32 {
        let base = self.base_damage(attack, defense);
        if self.critical { base * 2 } else { base }
    }
}

/// Outcome of one exchange
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CombatResult {
    pub damage: i32,
    pub critical: bool,
    /// The defender went from alive to dead on this hit
    pub fatal: bool,
    pub summary: String,
}

/// Resolve `attacker` hitting `defender`.
///
/// `attack` and `defense` are effective values with any situational bonuses
/// already folded in by the caller.
pub fn resolve(
    attacker: &str,
    attack: i32,
    defender: &mut Creature,
    defense: i32,
    rng: &mut dyn RandomSource,
) -> CombatResult {
    let roll = CombatRoll::roll(rng);
    resolve_with(attacker, attack, defender, defense, roll)
}

/// Resolve with a pre-rolled [`CombatRoll`]
pub fn resolve_with(
    attacker: &str,
    attack: i32,
    defender: &mut Creature,
    defense: i32,
    roll: CombatRoll,
) -> CombatResult {
    let damage = roll.damage(attack, defense);
    let fatal = defender.take_damage(damage);

    let mut summary = format!("{} hits {} for {} damage.", attacker, defender.name, damage);
    if roll.critical {
        summary.push_str(" Critical hit!");
    }
    if fatal {
        summary.push_str(&format!(" {} dies!", defender.name));
    }

    CombatResult {
        damage,
        critical: roll.critical,
        fatal,
        summary,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::creature::Position;
    use crate::rng::ScriptedRng;

    fn rat() -> Creature {
        Creature::new(Position::new(2, 1), "Rat", 'r', 8, 3, 0)
    }

    #[test]
    fn test_plain_hit() {
        // rn2(10)=1 no crit, rn2(5)=2 variance 0
        let mut rng = ScriptedRng::new([1, 2]);
        let mut target = rat();
        let res = resolve("Player", 4, &mut target, 0, &mut rng);
        assert_eq!(res.damage, 4);
        assert!(!res.critical);
        assert!(!res.fatal);
        assert_eq!(target.hp, 4);
        assert_eq!(res.summary, "Player hits Rat for 4 damage.");
    }

    #[test]
    fn test_critical_doubles() {
        let mut rng = ScriptedRng::new([0, 4]);
        let mut target = rat();
        let res = resolve("Player", 3, &mut target, 0, &mut rng);
        // (3 + 2) * 2
        assert_eq!(res.damage, 10);
        assert!(res.fatal);
        assert_eq!(target.hp, 0);
        assert_eq!(
            res.summary,
            "Player hits Rat for 10 damage. Critical hit! Rat dies!"
        );
    }

    #[test]
    fn test_damage_floor() {
        let roll = CombatRoll {
            critical: false,
            variance: -2,
        };
        assert_eq!(roll.damage(1, 20), 1);
        let crit = CombatRoll {
            critical: true,
            variance: -2,
        };
        assert_eq!(crit.damage(1, 20), 2);
    }

    #[test]
    fn test_dead_defender_not_fatal_twice() {
        let mut target = rat();
        target.hp = 0;
        let roll = CombatRoll {
            critical: false,
            variance: 0,
        };
        let res = resolve_with("Player", 5, &mut target, 0, roll);
        assert!(!res.fatal);
        assert_eq!(target.hp, 0);
    }
}
