//! Enemy behavior variants
//!
//! A closed set of movement and special-action rules, selected per kind from
//! the kind table. Each variant answers the same questions: where may it step,
//! what does a step cost, does it run, does it shoot, does it summon, does it
//! enrage.

use serde::{Deserialize, Serialize};
use strum::Display;

use crate::consts::{
    LICH_SUMMON_INTERVAL, NECROMANCER_SUMMON_INTERVAL, RANGED_MAX_SQ, MELEE_RANGE_SQ,
    WALL_STEP_COST,
};
use crate::creature::Position;
use crate::monster::kind::EnemyKind;
use crate::world::grid::{Grid, Tile};
use crate::world::los::has_line_of_sight;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum Behavior {
    /// Plain melee pursuer
    Walker,
    /// Drifts through walls at a cost
    Phantom,
    /// Holds position and shoots when it has a clear line
    Marksman,
    /// Keeps its distance and raises the dead
    Conjurer,
    /// Slow-paced boss that enrages at half health
    Wyrm,
    /// End boss: enrage with teleport and mass summon, then periodic summons
    Archlich,
}

/// Periodic reinforcement rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SummonRule {
    /// Turns (while awake) between summons
    pub interval: u32,
    /// Candidate kinds, picked uniformly
    pub kinds: &'static [EnemyKind],
    pub message: &'static str,
}

/// One-shot transition at half health
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnrageRule {
    pub attack_bonus: i32,
    /// Blink away and call a wave of this many reinforcements
    pub phase_shift_wave: Option<usize>,
    pub message: &'static str,
}

impl Behavior {
    /// Cost of stepping onto `pos`, or `None` if it cannot go there at all
    pub fn step_cost<G: Grid + ?Sized>(self, grid: &G, pos: Position) -> Option<i32> {
        if !grid.in_bounds(pos) {
            return None;
        }
        if grid.is_walkable(pos) {
            return Some(1);
        }
        match self {
            Behavior::Phantom if grid.tile(pos) == Tile::Wall => Some(WALL_STEP_COST),
            _ => None,
        }
    }

    pub fn can_enter<G: Grid + ?Sized>(self, grid: &G, pos: Position) -> bool {
        self.step_cost(grid, pos).is_some()
    }

    /// Runs from the player no matter its health
    pub fn always_flees(self) -> bool {
        matches!(self, Behavior::Conjurer)
    }

    /// Acts only on alternate turns until enraged
    pub fn is_slow_paced(self) -> bool {
        matches!(self, Behavior::Wyrm)
    }

    /// Ranged shot check: not adjacent, within six tiles, clear line
    pub fn has_shot<G: Grid + ?Sized>(self, grid: &G, from: Position, target: Position) -> bool {
        if !matches!(self, Behavior::Marksman) {
            return false;
        }
        let dist = from.distance_sq(target);
        dist > MELEE_RANGE_SQ && dist <= RANGED_MAX_SQ && has_line_of_sight(grid, from, target)
    }

    pub fn summon_rule(self) -> Option<SummonRule> {
        match self {
            Behavior::Conjurer => Some(SummonRule {
                interval: NECROMANCER_SUMMON_INTERVAL,
                kinds: &[EnemyKind::Skeleton],
                message: "The Necromancer raises a Skeleton!",
            }),
            Behavior::Archlich => Some(SummonRule {
                interval: LICH_SUMMON_INTERVAL,
                kinds: &[EnemyKind::Skeleton, EnemyKind::Ghost],
                message: "The Lich summons the undead!",
            }),
            _ => None,
        }
    }

    pub fn enrage_rule(self) -> Option<EnrageRule> {
        use crate::consts::{ENRAGE_ATTACK_BONUS, LICH_WAVE_SIZE};
        match self {
            Behavior::Wyrm => Some(EnrageRule {
                attack_bonus: ENRAGE_ATTACK_BONUS,
                phase_shift_wave: None,
                message: "The Dragon is enraged! Its attacks grow fiercer!",
            }),
            Behavior::Archlich => Some(EnrageRule {
                attack_bonus: ENRAGE_ATTACK_BONUS,
                phase_shift_wave: Some(LICH_WAVE_SIZE),
                message: "The Lich shrieks! Dark energy erupts as it vanishes into shadow!",
            }),
            _ => None,
        }
    }
}
