//! Floor traps (trap.c)
//!
//! Traps start hidden and reveal themselves when stepped on. The effect of
//! springing one is applied by the movement code in `action::trap`.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, IntoEnumIterator};

use crate::creature::Position;
use crate::rng::RandomSource;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
pub enum TrapKind {
    Spike,
    Poison,
    Teleport,
    Slow,
}

impl TrapKind {
    pub fn random(rng: &mut dyn RandomSource) -> TrapKind {
        let kinds: Vec<TrapKind> = TrapKind::iter().collect();
        kinds[rng.index(kinds.len())]
    }

    /// Spike damage scales with depth
    pub fn spike_damage(depth: u32) -> i32 {
        8 + 2 * depth as i32
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trap {
    pub pos: Position,
    pub kind: TrapKind,
    pub revealed: bool,
}

impl Trap {
    pub fn new(pos: Position, kind: TrapKind) -> Self {
        Self {
            pos,
            kind,
            revealed: false,
        }
    }
}
