//! Enemy turn processing (monmove.c)
//!
//! One pass walks the enemy list in index order. Reinforcements are appended
//! past the current index and the bound grows by what each update summoned, so
//! they act in the same pass while nothing already processed is visited twice.

use tracing::trace;

use crate::combat::{enemy_melee, enemy_shoot};
use crate::consts::{MELEE_RANGE_SQ, WAKE_RANGE_SQ};
use crate::creature::Position;
use crate::gameloop::GameState;
use crate::monster::behavior::Behavior;
use crate::monster::boss;
use crate::monster::enemy::Enemy;
use crate::monster::path::find_step;
use crate::rng::RandomSource;
use crate::world::grid::{Grid, Tile};

/// What an enemy does with its turn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Hold,
    Shoot,
    Strike,
    Step(Position),
}

/// Run every enemy once, including any summoned along the way
pub fn move_enemies(state: &mut GameState, rng: &mut dyn RandomSource) {
    let mut bound = state.enemies.len();
    let mut index = 0;
    while index < bound {
        if !state.player.is_alive() {
            break;
        }
        let before = state.enemies.len();
        update_enemy(state, index, rng);
        bound += state.enemies.len() - before;
        index += 1;
    }
    trace!(processed = index, total = state.enemies.len(), "enemy pass done");
}

fn update_enemy(state: &mut GameState, index: usize, rng: &mut dyn RandomSource) {
    let player_pos = state.player.pos();
    let enemy = &mut state.enemies[index];
    if !enemy.is_alive() {
        return;
    }
    if enemy.pos().distance_sq(player_pos) <= WAKE_RANGE_SQ {
        enemy.awake = true;
    }
    if enemy.stun_turns > 0 {
        enemy.stun_turns -= 1;
        trace!(enemy = %enemy.name(), left = enemy.stun_turns, "stunned");
        return;
    }
    if boss::skips_turn(enemy) {
        return;
    }

    boss::check_enrage(state, index, rng);
    boss::tick_summons(state, index, rng);

    let here = state.enemies[index].pos();
    if state.grid.tile(here) == Tile::Water && rng.one_in(2) {
        trace!(enemy = %state.enemies[index].name(), "wading, turn lost");
        return;
    }

    let intent = decide(&state.enemies[index], &state.grid, player_pos, rng);
    match intent {
        Intent::Hold => {}
        Intent::Shoot => {
            enemy_shoot(state, index, rng);
        }
        Intent::Strike => {
            enemy_melee(state, index, rng);
        }
        Intent::Step(next) => try_step(state, index, next),
    }
}

/// Choose this turn's action. Pure apart from the wander roll.
pub fn decide<G: Grid + ?Sized>(
    enemy: &Enemy,
    grid: &G,
    player: Position,
    rng: &mut dyn RandomSource,
) -> Intent {
    let behavior = enemy.behavior();
    let from = enemy.pos();
    let step = |next: Option<Position>| next.map_or(Intent::Hold, Intent::Step);

    if !enemy.awake {
        return step(wander_step(grid, behavior, from, rng));
    }
    // A clear shot is taken even when wounded
    if behavior.has_shot(grid, from, player) {
        return Intent::Shoot;
    }
    if enemy.should_flee() {
        return step(flee_step(grid, behavior, from, player));
    }
    if from.distance_sq(player) <= MELEE_RANGE_SQ {
        return Intent::Strike;
    }
    step(find_step(grid, from, player, behavior).or_else(|| greedy_step(grid, behavior, from, player)))
}

/// Move unless the destination holds the player or another living enemy
fn try_step(state: &mut GameState, index: usize, next: Position) {
    let blocked = next == state.player.pos()
        || state
            .enemies
            .iter()
            .enumerate()
            .any(|(j, other)| j != index && other.is_alive() && other.pos() == next);
    if blocked {
        trace!(enemy = %state.enemies[index].name(), ?next, "move rolled back");
        return;
    }
    state.enemies[index].body.pos = next;
}

/// One time in three, a random cardinal step
pub fn wander_step<G: Grid + ?Sized>(
    grid: &G,
    behavior: Behavior,
    from: Position,
    rng: &mut dyn RandomSource,
) -> Option<Position> {
    if !rng.one_in(3) {
        return None;
    }
    let dirs = from.cardinal_neighbors();
    let next = dirs[rng.index(dirs.len())];
    behavior.can_enter(grid, next).then_some(next)
}

/// Directly away along the axis of greater displacement, else the other one
pub fn flee_step<G: Grid + ?Sized>(
    grid: &G,
    behavior: Behavior,
    from: Position,
    threat: Position,
) -> Option<Position> {
    let dx = from.x - threat.x;
    let dy = from.y - threat.y;
    let away = |d: i32| if d >= 0 { 1 } else { -1 };
    let (first, second) = if dx.abs() >= dy.abs() {
        (from.offset(away(dx), 0), from.offset(0, away(dy)))
    } else {
        (from.offset(0, away(dy)), from.offset(away(dx), 0))
    };
    [first, second]
        .into_iter()
        .find(|&p| behavior.can_enter(grid, p))
}

/// Toward the target along the axis of greater displacement, else the
/// perpendicular one if there is any distance to close on it
pub fn greedy_step<G: Grid + ?Sized>(
    grid: &G,
    behavior: Behavior,
    from: Position,
    target: Position,
) -> Option<Position> {
    if from == target {
        return None;
    }
    let dx = target.x - from.x;
    let dy = target.y - from.y;
    let (first, second) = if dx.abs() >= dy.abs() {
        (from.offset(dx.signum(), 0), (dy != 0).then(|| from.offset(0, dy.signum())))
    } else {
        (from.offset(0, dy.signum()), (dx != 0).then(|| from.offset(dx.signum(), 0)))
    };
    if behavior.can_enter(grid, first) {
        return Some(first);
    }
    second.filter(|&p| behavior.can_enter(grid, p))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::monster::EnemyKind;
    use crate::player::PlayerClass;
    use crate::rng::{GameRng, ScriptedRng};
    use crate::scenario::Scenario;
    use crate::world::grid::TileGrid;

    fn state(rows: &str) -> GameState {
        Scenario::parse(rows)
            .unwrap()
            .into_state(PlayerClass::Warrior, &mut GameRng::new(1))
    }

    #[test]
    fn test_adjacent_enemy_strikes() {
        let mut s = state("#####\n#@r.#\n#####");
        let mut rng = ScriptedRng::new([1, 2]);
        move_enemies(&mut s, &mut rng);
        // 3 attack vs 4 defense floors at 1
        assert_eq!(s.player.body.hp, 39);
        assert_eq!(s.enemies[0].pos(), Position::new(2, 1));
        assert!(s.enemies[0].awake);
    }

    #[test]
    fn test_pursuit_closes_distance() {
        let mut s = state("##########\n#@......r#\n##########");
        let before = s.enemies[0].pos().distance_sq(s.player.pos());
        move_enemies(&mut s, &mut GameRng::new(3));
        let after = s.enemies[0].pos().distance_sq(s.player.pos());
        assert!(after < before);
    }

    #[test]
    fn test_stun_skips_turn() {
        let mut s = state("#####\n#@r.#\n#####");
        s.enemies[0].stun_turns = 2;
        move_enemies(&mut s, &mut GameRng::new(3));
        assert_eq!(s.enemies[0].stun_turns, 1);
        assert_eq!(s.player.body.hp, 40);
    }

    #[test]
    fn test_wounded_enemy_flees() {
        let mut s = state("########\n#@.s...#\n########");
        s.enemies[0].body.hp = 3;
        move_enemies(&mut s, &mut GameRng::new(3));
        assert_eq!(s.enemies[0].pos(), Position::new(4, 1));
    }

    #[test]
    fn test_archer_holds_and_shoots() {
        let mut s = state("########\n#@...a.#\n########");
        let mut rng = ScriptedRng::new([1, 2]);
        move_enemies(&mut s, &mut rng);
        assert_eq!(s.enemies[0].pos(), Position::new(5, 1));
        assert_eq!(s.player.body.hp, 37);
    }

    #[test]
    fn test_wounded_archer_keeps_shooting() {
        let mut s = state("########\n#@...a.#\n########");
        s.enemies[0].body.hp = 2;
        assert!(s.enemies[0].should_flee());
        let mut rng = ScriptedRng::new([1, 2]);
        move_enemies(&mut s, &mut rng);
        assert_eq!(s.enemies[0].pos(), Position::new(5, 1));
        assert_eq!(s.player.body.hp, 37);
    }

    #[test]
    fn test_wounded_archer_without_shot_flees() {
        // Adjacent, so no shot; runs east instead of striking
        let mut s = state("########\n#@a....#\n########");
        s.enemies[0].body.hp = 2;
        move_enemies(&mut s, &mut GameRng::new(3));
        assert_eq!(s.enemies[0].pos(), Position::new(3, 1));
        assert_eq!(s.player.body.hp, 40);
    }

    #[test]
    fn test_collision_rollback() {
        // The rear rat's only route is through the front one
        let mut s = state("#######\n#@.rr.#\n#######");
        s.enemies[0].stun_turns = 1;
        move_enemies(&mut s, &mut GameRng::new(3));
        assert_eq!(s.enemies[0].pos(), Position::new(3, 1));
        assert_eq!(s.enemies[1].pos(), Position::new(4, 1));
    }

    #[test]
    fn test_summoned_minion_strikes_same_pass() {
        // The only free tile beside the necromancer is next to the player
        let mut s = state("#####\n#@.n#\n#####");
        s.enemies[0].awake = true;
        s.enemies[0].timer = 4;
        // kind pick, then the skeleton's swing: no crit, variance 0
        let mut rng = ScriptedRng::new([0, 1, 2]);
        move_enemies(&mut s, &mut rng);

        assert_eq!(s.enemies.len(), 2);
        let raised = &s.enemies[1];
        assert_eq!(raised.kind, EnemyKind::Skeleton);
        assert_eq!(raised.pos(), Position::new(2, 1));
        assert!(s.messages.contains("raises a Skeleton"));
        // 6 attack vs 4 defense
        assert_eq!(s.player.body.hp, 38);
        assert!(s.messages.contains("Skeleton hits Player for 2 damage."));
        // the necromancer was not run a second time
        assert_eq!(s.enemies[0].timer, 0);
    }

    #[test]
    fn test_greedy_fallbacks() {
        let mut g = TileGrid::filled(5, 5, Tile::Floor);
        g.set_tile(Position::new(3, 2), Tile::Wall);
        let from = Position::new(2, 2);
        assert_eq!(
            greedy_step(&g, Behavior::Walker, from, Position::new(4, 3)),
            Some(Position::new(2, 3))
        );
        assert_eq!(greedy_step(&g, Behavior::Walker, from, Position::new(4, 2)), None);
        assert_eq!(
            greedy_step(&g, Behavior::Phantom, from, Position::new(4, 2)),
            Some(Position::new(3, 2))
        );
    }

    #[test]
    fn test_flee_falls_back_to_other_axis() {
        let mut g = TileGrid::filled(5, 5, Tile::Floor);
        g.set_tile(Position::new(3, 2), Tile::Wall);
        let step = flee_step(&g, Behavior::Walker, Position::new(2, 2), Position::new(0, 1));
        assert_eq!(step, Some(Position::new(2, 3)));
    }

    #[test]
    fn test_dormant_wander() {
        let g = TileGrid::filled(5, 5, Tile::Floor);
        let rat = Enemy::spawn(EnemyKind::Rat, Position::new(2, 2));
        // one_in(3) hits, direction index 3 is east
        let mut rng = ScriptedRng::new([0, 3]);
        assert_eq!(decide(&rat, &g, Position::new(20, 20), &mut rng), Intent::Step(Position::new(3, 2)));
        let mut rng = ScriptedRng::new([1]);
        assert_eq!(decide(&rat, &g, Position::new(20, 20), &mut rng), Intent::Hold);
    }
}
