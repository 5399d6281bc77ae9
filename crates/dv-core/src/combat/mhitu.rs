//! Enemy attacks player (mhitu.c)

use crate::combat::{CombatResult, resolve};
use crate::consts::{BURN_DAMAGE, BURN_TURNS, ON_HIT_BLIND_TURNS};
use crate::gameloop::GameState;
use crate::monster::EnemyFlags;
use crate::rng::RandomSource;

/// Melee hit from `state.enemies[index]`, with its on-hit rider
pub fn enemy_melee(state: &mut GameState, index: usize, rng: &mut dyn RandomSource) -> CombatResult {
    let enemy = &state.enemies[index];
    let name = enemy.name().to_string();
    let flags = enemy.flags();
    let defense = state.player.total_defense();
    let result = resolve(&name, enemy.body.attack, &mut state.player.body, defense, rng);

    state.player.stats.record_taken(result.damage, format!("a {}", name));
    state.message(result.summary.clone());

    if state.player.is_alive() {
        if flags.contains(EnemyFlags::BLINDING_TOUCH) {
            state.player.status.blind(ON_HIT_BLIND_TURNS);
            state.message(format!("The {}'s touch blinds you!", name));
        }
        if flags.contains(EnemyFlags::BURNING_TOUCH) {
            state.player.status.ignite(BURN_TURNS, BURN_DAMAGE);
            state.message(format!("The {} sets you ablaze!", name));
        }
    }
    result
}

/// Arrow from a marksman. Same arithmetic as melee, its own wording.
pub fn enemy_shoot(state: &mut GameState, index: usize, rng: &mut dyn RandomSource) -> CombatResult {
    let enemy = &state.enemies[index];
    let name = enemy.name().to_string();
    let defense = state.player.total_defense();
    let result = resolve(&name, enemy.body.attack, &mut state.player.body, defense, rng);

    state.player.stats.record_taken(result.damage, format!("an {}'s arrow", name));
    let crit = if result.critical { " Critical hit!" } else { "" };
    state.message(format!("{} shoots you for {} damage!{}", name, result.damage, crit));
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::PlayerClass;
    use crate::rng::{GameRng, ScriptedRng};
    use crate::scenario::Scenario;

    fn state(rows: &str) -> GameState {
        Scenario::parse(rows)
            .unwrap()
            .into_state(PlayerClass::Warrior, &mut GameRng::new(1))
    }

    #[test]
    fn test_ghost_blinds() {
        let mut s = state("#####\n#@g.#\n#####");
        let mut rng = ScriptedRng::new([1, 2]);
        let res = enemy_melee(&mut s, 0, &mut rng);
        // 8 attack vs 4 defense
        assert_eq!(res.damage, 4);
        assert_eq!(s.player.body.hp, 36);
        assert_eq!(s.player.status.blind_turns, ON_HIT_BLIND_TURNS);
        assert!(s.messages.contains("touch blinds you"));
        assert_eq!(s.player.stats.last_damage_source, "a Ghost");
    }

    #[test]
    fn test_demon_ignites() {
        let mut s = state("#####\n#@D.#\n#####");
        let mut rng = ScriptedRng::new([1, 2]);
        enemy_melee(&mut s, 0, &mut rng);
        assert_eq!(s.player.status.burning_turns, BURN_TURNS);
        assert_eq!(s.player.status.burning_damage, BURN_DAMAGE);
    }

    #[test]
    fn test_no_rider_on_dead_player() {
        let mut s = state("#####\n#@g.#\n#####");
        s.player.body.hp = 1;
        let mut rng = ScriptedRng::new([1, 2]);
        enemy_melee(&mut s, 0, &mut rng);
        assert!(!s.player.is_alive());
        assert_eq!(s.player.status.blind_turns, 0);
    }

    #[test]
    fn test_arrow_uses_variance() {
        let mut s = state("#######\n#@...a#\n#######");
        // no crit, variance +2: 7 - 4 + 2
        let mut rng = ScriptedRng::new([1, 4]);
        let res = enemy_shoot(&mut s, 0, &mut rng);
        assert_eq!(res.damage, 5);
        assert!(s.messages.contains("Archer shoots you for 5 damage!"));
    }
}
