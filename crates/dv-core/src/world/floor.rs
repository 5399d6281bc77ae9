//! Rooms and floor layout handed over by the level generator
//!
//! Room carving itself lives outside the core. What arrives here is the ordered
//! room list (the first room is where the player starts, the last one hosts any
//! boss) plus a cosmetic biome tag.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use crate::creature::Position;

/// Room theme, drives themed spawns
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
pub enum RoomTheme {
    #[default]
    Plain,
    Crypt,
    Armory,
    Library,
    Shrine,
    Shop,
}

/// Cosmetic floor theme
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
pub enum Biome {
    #[default]
    Stone,
    Moss,
    Bone,
    Ember,
    Frost,
}

/// A rectangular room; `x`/`y` is the top-left wall corner
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
    pub theme: RoomTheme,
    #[serde(default)]
    pub fountain_used: bool,
}

impl Room {
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self {
            x,
            y,
            w,
            h,
            theme: RoomTheme::Plain,
            fountain_used: false,
        }
    }

    pub fn with_theme(mut self, theme: RoomTheme) -> Self {
        self.theme = theme;
        self
    }

    pub fn center(&self) -> Position {
        Position::new(self.x + self.w / 2, self.y + self.h / 2)
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.x >= self.x && pos.x < self.x + self.w && pos.y >= self.y && pos.y < self.y + self.h
    }

    /// Width and height of the interior, never less than one
    pub fn interior_span(&self) -> (i32, i32) {
        ((self.w - 2).max(1), (self.h - 2).max(1))
    }
}

/// The generator's output for one floor
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FloorLayout {
    pub depth: u32,
    pub rooms: Vec<Room>,
    pub biome: Biome,
}

impl FloorLayout {
    pub fn new(depth: u32, rooms: Vec<Room>, biome: Biome) -> Self {
        Self {
            depth,
            rooms,
            biome,
        }
    }

    /// Room whose center is `pos`, if any
    pub fn room_centered_at_mut(&mut self, pos: Position) -> Option<&mut Room> {
        self.rooms.iter_mut().find(|r| r.center() == pos)
    }

    pub fn first_room_of(&self, theme: RoomTheme) -> Option<&Room> {
        self.rooms.iter().find(|r| r.theme == theme)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_room_center_and_contains() {
        let r = Room::new(2, 3, 7, 5);
        assert_eq!(r.center(), Position::new(5, 5));
        assert!(r.contains(Position::new(2, 3)));
        assert!(r.contains(Position::new(8, 7)));
        assert!(!r.contains(Position::new(9, 7)));
    }

    #[test]
    fn test_interior_span_minimum() {
        assert_eq!(Room::new(0, 0, 2, 1).interior_span(), (1, 1));
        assert_eq!(Room::new(0, 0, 6, 4).interior_span(), (4, 2));
    }

    #[test]
    fn test_first_room_of_theme() {
        let layout = FloorLayout::new(
            2,
            vec![
                Room::new(0, 0, 5, 5),
                Room::new(10, 0, 5, 5).with_theme(RoomTheme::Shop),
                Room::new(20, 0, 5, 5).with_theme(RoomTheme::Shop),
            ],
            Biome::Moss,
        );
        assert_eq!(layout.first_room_of(RoomTheme::Shop).map(|r| r.x), Some(10));
        assert!(layout.first_room_of(RoomTheme::Crypt).is_none());
    }
}
