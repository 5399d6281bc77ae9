//! Boss phases and reinforcement summons
//!
//! Enrage is one-shot: the `enraged` flag guards every side effect, so extra
//! turns spent below the threshold never stack the bonus or re-summon.

use tracing::{debug, info};

use crate::consts::TELEPORT_ATTEMPTS;
use crate::creature::Position;
use crate::gameloop::GameState;
use crate::monster::enemy::Enemy;
use crate::monster::kind::EnemyKind;
use crate::rng::RandomSource;
use crate::world::grid::Grid;

/// Slow bosses act only on odd ticks of their timer until enraged.
/// Returns true if the enemy sits this turn out.
pub fn skips_turn(enemy: &mut Enemy) -> bool {
    if !enemy.behavior().is_slow_paced() || enemy.enraged {
        return false;
    }
    enemy.timer += 1;
    enemy.timer % 2 == 0
}

/// Apply the kind's enrage transition if it is due. Returns true if it fired.
pub fn check_enrage(state: &mut GameState, index: usize, rng: &mut dyn RandomSource) -> bool {
    let enemy = &mut state.enemies[index];
    let Some(rule) = enemy.behavior().enrage_rule() else {
        return false;
    };
    if enemy.enraged || !enemy.is_bloodied() {
        return false;
    }
    enemy.enraged = true;
    enemy.body.attack += rule.attack_bonus;
    info!(enemy = %enemy.name(), attack = enemy.body.attack, "enemy enraged");

    if let Some(wave) = rule.phase_shift_wave {
        teleport_enemy(state, index, rng);
        let center = state.enemies[index].pos();
        summon_around(state, center, &[EnemyKind::Skeleton, EnemyKind::Ghost], wave, rng);
    }
    state.message(rule.message);
    true
}

/// Advance a caster's summon clock and raise one reinforcement when it fills
pub fn tick_summons(state: &mut GameState, index: usize, rng: &mut dyn RandomSource) {
    let enemy = &mut state.enemies[index];
    let Some(rule) = enemy.behavior().summon_rule() else {
        return;
    };
    if !enemy.awake {
        return;
    }
    enemy.timer += 1;
    if enemy.timer < rule.interval {
        return;
    }
    enemy.timer = 0;
    let center = enemy.pos();
    if summon_around(state, center, rule.kinds, 1, rng) > 0 {
        state.message(rule.message);
    }
}

/// Append up to `count` awake reinforcements on free cardinal neighbours of
/// `center`. New enemies go to the end of the list and the count is returned
/// so the running pass can extend its bound.
pub fn summon_around(
    state: &mut GameState,
    center: Position,
    kinds: &[EnemyKind],
    count: usize,
    rng: &mut dyn RandomSource,
) -> usize {
    let mut summoned = 0;
    for spot in center.cardinal_neighbors() {
        if summoned >= count || kinds.is_empty() {
            break;
        }
        if !state.is_free(spot) {
            continue;
        }
        let kind = kinds[rng.index(kinds.len())];
        let mut minion = Enemy::spawn_scaled(kind, spot, state.difficulty);
        minion.awake = true;
        debug!(?kind, ?spot, "summoned reinforcement");
        state.enemies.push(minion);
        summoned += 1;
    }
    summoned
}

/// Blink to a random free tile. Stays put if no tile is found in budget.
pub fn teleport_enemy(state: &mut GameState, index: usize, rng: &mut dyn RandomSource) -> bool {
    let (w, h) = (state.grid.width(), state.grid.height());
    for _ in 0..TELEPORT_ATTEMPTS {
        let spot = Position::new(rng.rn2(w as u32) as i32, rng.rn2(h as u32) as i32);
        if state.is_free(spot) {
            state.enemies[index].body.pos = spot;
            return true;
        }
    }
    debug!(enemy = %state.enemies[index].name(), "teleport fizzled");
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::PlayerClass;
    use crate::scenario::Scenario;

    fn arena(rows: &str) -> GameState {
        Scenario::parse(rows)
            .unwrap()
            .into_state(PlayerClass::Warrior, &mut crate::rng::GameRng::new(1))
    }

    #[test]
    fn test_dragon_paces_until_enraged() {
        let mut d = Enemy::spawn(EnemyKind::Dragon, Position::new(0, 0));
        let skips: Vec<bool> = (0..4).map(|_| skips_turn(&mut d)).collect();
        assert_eq!(skips, vec![false, true, false, true]);
        d.enraged = true;
        assert!(!skips_turn(&mut d));
        let mut rat = Enemy::spawn(EnemyKind::Rat, Position::new(0, 0));
        assert!(!skips_turn(&mut rat));
    }

    #[test]
    fn test_dragon_enrage_once() {
        let mut state = arena("#######\n#@...W#\n#######");
        let mut rng = crate::rng::GameRng::new(5);
        state.enemies[0].body.hp = 30;
        assert!(check_enrage(&mut state, 0, &mut rng));
        assert_eq!(state.enemies[0].body.attack, 18);
        assert!(!check_enrage(&mut state, 0, &mut rng));
        assert_eq!(state.enemies[0].body.attack, 18);
    }

    #[test]
    fn test_summon_respects_occupancy() {
        // Necromancer boxed in: player west, rat east, walls north and south
        let mut state = arena("#####\n#@nr#\n#####");
        let mut rng = crate::rng::GameRng::new(5);
        let n = summon_around(&mut state, Position::new(2, 1), &[EnemyKind::Skeleton], 1, &mut rng);
        assert_eq!(n, 0);
        assert_eq!(state.enemies.len(), 2);
    }

    #[test]
    fn test_summon_clock() {
        let mut state = arena("#######\n#@...n#\n#.....#\n#######");
        let mut rng = crate::rng::GameRng::new(5);
        state.enemies[0].awake = true;
        for _ in 0..4 {
            tick_summons(&mut state, 0, &mut rng);
        }
        assert_eq!(state.enemies.len(), 1);
        tick_summons(&mut state, 0, &mut rng);
        assert_eq!(state.enemies.len(), 2);
        assert!(state.enemies[1].awake);
        assert_eq!(state.enemies[1].kind, EnemyKind::Skeleton);
        assert_eq!(state.enemies[0].timer, 0);
    }
}
