//! Shared creature body and grid coordinates
//!
//! Both the player and every enemy embed a [`Creature`]; the invariant
//! `0 <= hp <= max_hp` is maintained by routing all hp changes through
//! [`Creature::take_damage`] and [`Creature::heal`].

use serde::{Deserialize, Serialize};

/// A grid coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Sentinel for "no position", e.g. an unset path parent
    pub const NONE: Position = Position { x: -1, y: -1 };

    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    pub fn distance_sq(self, other: Position) -> i32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    pub fn manhattan(self, other: Position) -> i32 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }

    /// True if `other` is one of the eight neighbours
    pub fn is_adjacent(self, other: Position) -> bool {
        self != other && (self.x - other.x).abs() <= 1 && (self.y - other.y).abs() <= 1
    }

    /// The four orthogonal neighbours, in north, south, west, east order
    pub fn cardinal_neighbors(self) -> [Position; 4] {
        [
            self.offset(0, -1),
            self.offset(0, 1),
            self.offset(-1, 0),
            self.offset(1, 0),
        ]
    }
}

/// Common creature state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Creature {
    pub pos: Position,
    pub name: String,
    pub glyph: char,
    pub hp: i32,
    pub max_hp: i32,
    pub attack: i32,
    pub defense: i32,
    pub level: u32,
    pub xp: u32,
}

impl Creature {
    pub fn new(pos: Position, name: impl Into<String>, glyph: char, hp: i32, attack: i32, defense: i32) -> Self {
        Self {
            pos,
            name: name.into(),
            glyph,
            hp,
            max_hp: hp,
            attack,
            defense,
            level: 1,
            xp: 0,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    /// Subtract hp, clamping at zero. Returns true if this blow was fatal.
    pub fn take_damage(&mut self, amount: i32) -> bool {
        let was_alive = self.is_alive();
        self.hp = (self.hp - amount.max(0)).max(0);
        was_alive && !self.is_alive()
    }

    /// Restore hp up to the maximum. Returns the amount actually restored.
    pub fn heal(&mut self, amount: i32) -> i32 {
        let before = self.hp;
        self.hp = (self.hp + amount.max(0)).min(self.max_hp);
        self.hp - before
    }

    /// Set hp to the maximum
    pub fn restore_full(&mut self) {
        self.hp = self.max_hp;
    }
}
