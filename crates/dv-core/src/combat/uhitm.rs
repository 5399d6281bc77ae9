//! Player attacks enemy (uhitm.c)

use tracing::debug;

use crate::combat::{CombatResult, resolve};
use crate::combat::reward::reward_kill;
use crate::consts::STUN_TURNS;
use crate::gameloop::GameState;
use crate::object::Enchantment;
use crate::player::{Player, PlayerClass};
use crate::rng::RandomSource;

/// Flat bonus a flaming weapon adds to every swing
const FLAMING_BONUS: i32 = 2;
/// Flat bonus from an armed Shield Bash
const SHIELD_BASH_BONUS: i32 = 5;
/// Hp drained back by a vampiric weapon per swing
const VAMPIRIC_DRAIN: i32 = 2;

/// Attack value for the player's next melee swing, including any armed buff.
///
/// Backstab adds twice the total attack on top of everything else, so the
/// enchantment bonus is not tripled.
pub fn effective_attack(player: &Player) -> i32 {
    let mut attack = player.total_attack();
    if player.equipment.weapon_enchantment() == Enchantment::Flaming {
        attack += FLAMING_BONUS;
    }
    if player.ability_armed {
        match player.class {
            PlayerClass::Warrior => attack += SHIELD_BASH_BONUS,
            PlayerClass::Rogue => attack += player.total_attack() * 2,
            _ => {}
        }
    }
    attack
}

/// Player melee against `state.enemies[index]`
pub fn attack_enemy(state: &mut GameState, index: usize, rng: &mut dyn RandomSource) -> CombatResult {
    let attack = effective_attack(&state.player);
    let armed = state.player.ability_armed;

    let enemy = &mut state.enemies[index];
    let defense = enemy.body.defense;
    let result = resolve("Player", attack, &mut enemy.body, defense, rng);
    enemy.awake = true;

    let mut notes = Vec::new();
    if armed && state.player.class == PlayerClass::Warrior {
        enemy.stun_turns = STUN_TURNS;
        if enemy.is_alive() {
            notes.push(format!("{} is stunned!", enemy.name()));
        }
    }
    debug!(target = %enemy.name(), damage = result.damage, fatal = result.fatal, "player melee");

    state.player.ability_armed = false;
    state.player.stats.record_dealt(result.damage);
    state.message(result.summary.clone());
    for note in notes {
        state.message(note);
    }

    if state.player.equipment.weapon_enchantment() == Enchantment::Vampiric {
        state.player.body.heal(VAMPIRIC_DRAIN);
        state.message(format!("Your vampiric weapon drains life! +{} HP", VAMPIRIC_DRAIN));
    }

    if result.fatal {
        reward_kill(state, index, rng);
    }
    result
}
