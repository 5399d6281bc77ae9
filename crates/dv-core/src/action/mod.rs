//! Player action system
//!
//! Commands the scheduler accepts, and the handlers that resolve them against
//! the game state.

pub mod movement;
pub mod pickup;
pub mod trap;
pub mod use_item;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use crate::player::LevelChoice;

/// Player command types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    /// Step, or attack whatever stands in the way
    Move(Direction),
    Wait,
    /// Class ability
    Ability,
    /// Use or equip the inventory item at this index
    UseItem(usize),
    /// Pick up what is underfoot, or trade when the merchant is in reach
    PickUp,
    Descend,
    ChooseLevel(LevelChoice),
    /// Buy ware at this shop index
    Buy(usize),
    /// Sell the inventory item at this index
    Sell(usize),
}

impl Command {
    /// Commands that spend a turn when they succeed. These are the ones the
    /// slow effect can swallow.
    pub const fn takes_turn(&self) -> bool {
        matches!(
            self,
            Command::Move(_) | Command::Wait | Command::Ability | Command::UseItem(_) | Command::PickUp
        )
    }
}

/// Movement directions. Movement is 4-directional.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
pub enum Direction {
    North,
    South,
    West,
    East,
}

impl Direction {
    /// Get the delta (dx, dy) for this direction
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Direction::North => (0, -1),
            Direction::South => (0, 1),
            Direction::West => (-1, 0),
            Direction::East => (1, 0),
        }
    }

    /// Direction for a unit cardinal delta
    pub const fn from_delta(dx: i32, dy: i32) -> Option<Direction> {
        match (dx, dy) {
            (0, -1) => Some(Direction::North),
            (0, 1) => Some(Direction::South),
            (-1, 0) => Some(Direction::West),
            (1, 0) => Some(Direction::East),
            _ => None,
        }
    }
}

/// Outcome of resolving a single command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionResult {
    /// Action completed, time passes
    Success,
    /// Nothing happened, no time passes
    NoTime,
    /// Refused with a message, no time passes
    Failed(String),
    /// The merchant is ready to trade; no time passes
    ShopOpen,
}

impl ActionResult {
    pub fn takes_time(&self) -> bool {
        matches!(self, ActionResult::Success)
    }
}
