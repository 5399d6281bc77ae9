//! Bounded A* pathfinding (mfndpos / m_move)
//!
//! 4-directional search with a Manhattan heuristic. The open list is a
//! fixed-capacity array scanned linearly for the lowest f-score; the search
//! gives up once it has expanded [`ASTAR_MAX_EXPANSIONS`] nodes or the open
//! list overflows, and callers fall back to greedy movement.

use arrayvec::ArrayVec;
use tracing::debug;

use crate::consts::{ASTAR_MAX_EXPANSIONS, ASTAR_OPEN_CAPACITY};
use crate::creature::Position;
use crate::monster::behavior::Behavior;
use crate::world::grid::Grid;

#[derive(Debug, Clone, Copy)]
struct Node {
    pos: Position,
    g: i32,
    f: i32,
    parent: Position,
}

/// Bookkeeping from one search, exposed for tuning and tests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SearchStats {
    pub expanded: usize,
    pub peak_open: usize,
}

/// Why a search produced no step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoPath {
    /// Start equals goal or lies off the grid
    Trivial,
    ExpansionLimit,
    OpenListFull,
    Unreachable,
}

/// First step from `start` toward `goal` for a mover with `behavior`
pub fn astar_step<G: Grid + ?Sized>(
    grid: &G,
    start: Position,
    goal: Position,
    behavior: Behavior,
) -> (Result<Position, NoPath>, SearchStats) {
    let mut stats = SearchStats::default();
    if start == goal || !grid.in_bounds(start) {
        return (Err(NoPath::Trivial), stats);
    }

    let width = grid.width();
    let len = (width * grid.height()) as usize;
    let idx = |p: Position| (p.y * width + p.x) as usize;

    let mut closed = vec![false; len];
    let mut g_score = vec![i32::MAX; len];
    let mut parent = vec![Position::NONE; len];
    let mut open: ArrayVec<Node, ASTAR_OPEN_CAPACITY> = ArrayVec::new();

    g_score[idx(start)] = 0;
    open.push(Node {
        pos: start,
        g: 0,
        f: start.manhattan(goal),
        parent: start,
    });
    stats.peak_open = 1;

    while !open.is_empty() {
        if stats.expanded >= ASTAR_MAX_EXPANSIONS {
            debug!(?start, ?goal, "astar: expansion limit reached");
            return (Err(NoPath::ExpansionLimit), stats);
        }

        // Lowest f wins; earlier entries win ties
        let mut best = 0;
        for (i, node) in open.iter().enumerate().skip(1) {
            if node.f < open[best].f {
                best = i;
            }
        }
        let cur = open.swap_remove(best);
        let ci = idx(cur.pos);
        if closed[ci] {
            continue;
        }
        closed[ci] = true;
        parent[ci] = cur.parent;
        stats.expanded += 1;

        if cur.pos == goal {
            let mut step = goal;
            while parent[idx(step)] != start {
                step = parent[idx(step)];
            }
            return (Ok(step), stats);
        }

        for next in cur.pos.cardinal_neighbors() {
            if !grid.in_bounds(next) || closed[idx(next)] {
                continue;
            }
            let Some(cost) = behavior.step_cost(grid, next) else {
                continue;
            };
            let ng = cur.g + cost;
            let ni = idx(next);
            if ng >= g_score[ni] {
                continue;
            }
            g_score[ni] = ng;
            let node = Node {
                pos: next,
                g: ng,
                f: ng + next.manhattan(goal),
                parent: cur.pos,
            };
            if open.try_push(node).is_err() {
                debug!(?start, ?goal, "astar: open list full");
                return (Err(NoPath::OpenListFull), stats);
            }
            stats.peak_open = stats.peak_open.max(open.len());
        }
    }

    (Err(NoPath::Unreachable), stats)
}

/// Convenience wrapper returning just the step
pub fn find_step<G: Grid + ?Sized>(
    grid: &G,
    start: Position,
    goal: Position,
    behavior: Behavior,
) -> Option<Position> {
    astar_step(grid, start, goal, behavior).0.ok()
}
