//! Movement system (hack.c)
//!
//! A step into an enemy is an attack. A step onto open ground collects items,
//! then applies the tile and finally any trap.

use crate::action::pickup::auto_pickup;
use crate::action::trap::{spring_trap, tile_effects};
use crate::action::{ActionResult, Direction};
use crate::combat::attack_enemy;
use crate::gameloop::GameState;
use crate::rng::RandomSource;
use crate::world::grid::Grid;

pub fn move_player(state: &mut GameState, dir: Direction, rng: &mut dyn RandomSource) -> ActionResult {
    let (dx, dy) = dir.delta();
    let target = state.player.pos().offset(dx, dy);

    if let Some(index) = state.enemy_at(target) {
        attack_enemy(state, index, rng);
        return ActionResult::Success;
    }
    if !state.grid.is_walkable(target) {
        return ActionResult::NoTime;
    }

    state.player.body.pos = target;
    auto_pickup(state);
    tile_effects(state);
    spring_trap(state, rng);
    ActionResult::Success
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::creature::Position;
    use crate::object::Item;
    use crate::player::PlayerClass;
    use crate::rng::{GameRng, ScriptedRng};
    use crate::scenario::Scenario;

    fn state(rows: &str) -> GameState {
        Scenario::parse(rows)
            .unwrap()
            .into_state(PlayerClass::Warrior, &mut GameRng::new(1))
    }

    #[test]
    fn test_wall_bump_takes_no_time() {
        let mut s = state("####\n#@.#\n####");
        let res = move_player(&mut s, Direction::North, &mut GameRng::new(1));
        assert_eq!(res, ActionResult::NoTime);
        assert_eq!(s.player.pos(), Position::new(1, 1));
    }

    #[test]
    fn test_step_and_collect() {
        let mut s = state("#####\n#@$.#\n#####");
        let res = move_player(&mut s, Direction::East, &mut GameRng::new(1));
        assert_eq!(res, ActionResult::Success);
        assert_eq!(s.player.pos(), Position::new(2, 1));
        assert!(s.player.gold > 0);
        assert!(s.items.is_empty());
    }

    #[test]
    fn test_bump_attacks() {
        let mut s = state("#####\n#@r.#\n#####");
        let mut rng = ScriptedRng::new([1, 2]);
        let res = move_player(&mut s, Direction::East, &mut rng);
        assert_eq!(res, ActionResult::Success);
        assert_eq!(s.player.pos(), Position::new(1, 1));
        assert_eq!(s.enemies[0].body.hp, 4);
    }

    #[test]
    fn test_merchant_does_not_block() {
        let mut s = state("#####\n#@M.#\n#####");
        move_player(&mut s, Direction::East, &mut GameRng::new(1));
        assert_eq!(s.player.pos(), Position::new(2, 1));
        s.items.push(Item::gold(1).placed_at(Position::new(3, 1)));
        move_player(&mut s, Direction::East, &mut GameRng::new(1));
        assert_eq!(s.player.gold, 1);
    }
}
