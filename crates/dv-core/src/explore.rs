//! Auto-explore
//!
//! Breadth-first search from the player over walkable tiles. The nearest
//! visible enemy, visible ground item or never-explored tile becomes the
//! goal, and the first step toward it is submitted as an ordinary move.

use std::collections::VecDeque;

use strum::Display;
use tracing::{debug, trace};

use crate::action::{Command, Direction};
use crate::creature::Position;
use crate::gameloop::{GameLoop, GameLoopResult, GameState, TurnPhase};
use crate::object::ItemKind;
use crate::rng::RandomSource;
use crate::world::grid::Grid;

/// Why auto-explore handed control back
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum StopReason {
    /// Hp fell below the configured percentage of maximum
    LowHealth,
    MerchantAdjacent,
    /// A real key press is waiting
    InputPending,
    /// The scheduler wants something other than a move
    PhaseChange,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExploreOutcome {
    Stepped(GameLoopResult),
    Stopped(StopReason),
    NothingToDo,
}

fn is_target(state: &GameState, pos: Position) -> bool {
    let grid = &state.grid;
    if !grid.is_explored(pos) {
        return true;
    }
    if !grid.is_visible(pos) {
        return false;
    }
    if state.enemy_at(pos).is_some() {
        return true;
    }
    // Items the player cannot carry would be walked to forever
    let room = !state.player.inventory.is_full();
    state
        .items
        .iter()
        .any(|item| item.on_ground && item.pos == pos && (room || item.kind == ItemKind::Gold))
}

/// First step toward the nearest target, or `None` when nothing is left
pub fn next_step(state: &GameState) -> Option<Direction> {
    let grid = &state.grid;
    let start = state.player.pos();
    if !grid.in_bounds(start) {
        return None;
    }

    let width = grid.width();
    let index = |p: Position| (p.y * width + p.x) as usize;
    let cells = (width * grid.height()) as usize;
    let mut visited = vec![false; cells];
    let mut parent = vec![Position::NONE; cells];
    let mut queue = VecDeque::new();

    visited[index(start)] = true;
    queue.push_back(start);

    while let Some(current) = queue.pop_front() {
        for next in current.cardinal_neighbors() {
            if !grid.is_walkable(next) || visited[index(next)] {
                continue;
            }
            visited[index(next)] = true;
            parent[index(next)] = current;

            if is_target(state, next) {
                let mut step = next;
                while parent[index(step)] != start {
                    step = parent[index(step)];
                }
                trace!(target = ?next, ?step, "explore target");
                return Direction::from_delta(step.x - start.x, step.y - start.y);
            }
            queue.push_back(next);
        }
    }
    None
}

/// Conditions that return control to manual play
pub fn stop_reason(state: &GameState, input_pending: bool) -> Option<StopReason> {
    if !matches!(
        state.phase,
        TurnPhase::AwaitingCommand | TurnPhase::AwaitingBonusMove
    ) {
        return Some(StopReason::PhaseChange);
    }
    if input_pending {
        return Some(StopReason::InputPending);
    }
    let body = &state.player.body;
    if (body.hp as i64) * 100 < (body.max_hp as i64) * state.explore_threshold as i64 {
        return Some(StopReason::LowHealth);
    }
    if state.merchant_in_reach() {
        return Some(StopReason::MerchantAdjacent);
    }
    None
}

/// Take one synthesized step, unless a stop condition holds first
pub fn explore_step<R: RandomSource>(game: &mut GameLoop<R>, input_pending: bool) -> ExploreOutcome {
    if let Some(reason) = stop_reason(game.state(), input_pending) {
        debug!(%reason, "auto-explore stopped");
        game.state_mut().message("Auto-explore stopped.");
        return ExploreOutcome::Stopped(reason);
    }
    match next_step(game.state()) {
        Some(dir) => ExploreOutcome::Stepped(game.submit(Command::Move(dir))),
        None => {
            game.state_mut().message("Nothing left to explore.");
            ExploreOutcome::NothingToDo
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::loot;
    use crate::player::PlayerClass;
    use crate::rng::{GameRng, ScriptedRng};
    use crate::scenario::Scenario;

    fn state(rows: &str) -> GameState {
        Scenario::parse(rows)
            .unwrap()
            .into_state(PlayerClass::Warrior, &mut GameRng::new(1))
    }

    #[test]
    fn test_visible_enemy_beats_far_unexplored() {
        let mut s = state("###########\n#r.@......#\n###########");
        s.grid.reset_memory();
        s.grid.compute_visibility(s.player.pos(), 2);
        assert_eq!(next_step(&s), Some(Direction::West));
    }

    #[test]
    fn test_explored_floor_goes_to_enemy() {
        let mut s = state("#######\n#@....#\n#.....#\n#....s#\n#######");
        s.grid.reveal_all();
        assert_eq!(next_step(&s), Some(Direction::South));
        s.enemies.clear();
        assert_eq!(next_step(&s), None);
    }

    #[test]
    fn test_goes_to_visible_item() {
        let mut s = state("#####\n#...#\n#.@.#\n#####");
        s.grid.reveal_all();
        s.items.push(loot::bomb(1).placed_at(Position::new(2, 1)));
        assert_eq!(next_step(&s), Some(Direction::North));

        for _ in 0..crate::consts::MAX_INVENTORY {
            s.player.inventory.add(loot::teleport_scroll()).unwrap();
        }
        assert_eq!(next_step(&s), None);
    }

    #[test]
    fn test_walls_block_search() {
        let mut s = state("#######\n#@#...#\n#######");
        s.grid.reset_memory();
        s.grid.compute_visibility(s.player.pos(), 1);
        assert_eq!(next_step(&s), None);
    }

    #[test]
    fn test_stop_reasons() {
        let mut s = state("######\n#@.M.#\n######");
        assert_eq!(stop_reason(&s, false), None);
        assert_eq!(stop_reason(&s, true), Some(StopReason::InputPending));

        s.player.body.hp = 16;
        assert_eq!(stop_reason(&s, false), None);
        s.player.body.hp = 15;
        assert_eq!(stop_reason(&s, false), Some(StopReason::LowHealth));

        s.player.body.hp = 40;
        s.player.body.pos = Position::new(2, 1);
        assert_eq!(stop_reason(&s, false), Some(StopReason::MerchantAdjacent));

        s.phase = TurnPhase::AwaitingLevelChoice;
        assert_eq!(stop_reason(&s, false), Some(StopReason::PhaseChange));
    }

    #[test]
    fn test_explore_until_done() {
        let s = state("############\n#@.........#\n############");
        assert!(!s.grid.is_explored(Position::new(10, 1)));
        let mut game = GameLoop::with_rng(s, ScriptedRng::new(std::iter::empty()));

        assert_eq!(
            explore_step(&mut game, false),
            ExploreOutcome::Stepped(GameLoopResult::Continue)
        );
        assert_eq!(game.state().player.pos(), Position::new(2, 1));
        assert_eq!(explore_step(&mut game, false), ExploreOutcome::NothingToDo);
        assert!(game.state().messages.contains("Nothing left to explore."));

        assert_eq!(
            explore_step(&mut game, true),
            ExploreOutcome::Stopped(StopReason::InputPending)
        );
    }
}
