//! Tile grid and visibility substrate
//!
//! The simulation only talks to the map through the [`Grid`] trait. [`TileGrid`]
//! is the concrete, serializable implementation used by scenarios and the CLI.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use crate::creature::Position;
use crate::world::los::has_line_of_sight;

/// Terrain kinds
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
pub enum Tile {
    #[default]
    Wall,
    Floor,
    StairsDown,
    StairsUp,
    Water,
    Lava,
    Fountain,
}

impl Tile {
    pub const fn is_walkable(self) -> bool {
        !matches!(self, Tile::Wall)
    }

    pub const fn is_opaque(self) -> bool {
        matches!(self, Tile::Wall)
    }

    /// Tiles a random teleport should never drop the player onto
    pub const fn is_dangerous(self) -> bool {
        matches!(self, Tile::Lava)
    }

    pub const fn glyph(self) -> char {
        match self {
            Tile::Wall => '#',
            Tile::Floor => '.',
            Tile::StairsDown => '>',
            Tile::StairsUp => '<',
            Tile::Water => '~',
            Tile::Lava => '^',
            Tile::Fountain => '{',
        }
    }

    pub fn from_glyph(c: char) -> Option<Tile> {
        Some(match c {
            '#' => Tile::Wall,
            '.' => Tile::Floor,
            '>' => Tile::StairsDown,
            '<' => Tile::StairsUp,
            '~' => Tile::Water,
            '^' => Tile::Lava,
            '{' => Tile::Fountain,
            _ => return None,
        })
    }
}

/// Map queries consumed by the simulation.
///
/// Out-of-bounds coordinates read as walls: not walkable, opaque, never visible.
pub trait Grid {
    fn width(&self) -> i32;
    fn height(&self) -> i32;

    fn in_bounds(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.y >= 0 && pos.x < self.width() && pos.y < self.height()
    }

    fn tile(&self, pos: Position) -> Tile;
    fn set_tile(&mut self, pos: Position, tile: Tile);

    fn is_walkable(&self, pos: Position) -> bool {
        self.in_bounds(pos) && self.tile(pos).is_walkable()
    }

    fn is_opaque(&self, pos: Position) -> bool {
        !self.in_bounds(pos) || self.tile(pos).is_opaque()
    }

    fn is_dangerous(&self, pos: Position) -> bool {
        self.in_bounds(pos) && self.tile(pos).is_dangerous()
    }

    fn is_visible(&self, pos: Position) -> bool;
    fn is_explored(&self, pos: Position) -> bool;

    /// Recompute the visible set from `origin` out to `radius` tiles
    fn compute_visibility(&mut self, origin: Position, radius: i32);
}

/// Row-major tile storage with visibility and exploration memory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileGrid {
    width: i32,
    height: i32,
    tiles: Vec<Tile>,
    visible: Vec<bool>,
    explored: Vec<bool>,
}

impl TileGrid {
    /// A grid filled with a single tile kind
    pub fn filled(width: i32, height: i32, tile: Tile) -> Self {
        let len = (width.max(0) * height.max(0)) as usize;
        Self {
            width: width.max(0),
            height: height.max(0),
            tiles: vec![tile; len],
            visible: vec![false; len],
            explored: vec![false; len],
        }
    }

    fn idx(&self, pos: Position) -> Option<usize> {
        self.in_bounds(pos)
            .then(|| (pos.y * self.width + pos.x) as usize)
    }

    /// Mark every cell explored and visible
    pub fn reveal_all(&mut self) {
        self.visible.fill(true);
        self.explored.fill(true);
    }

    /// Forget the explored memory, e.g. when entering a fresh floor
    pub fn reset_memory(&mut self) {
        self.visible.fill(false);
        self.explored.fill(false);
    }

    /// Iterate every coordinate of the grid in row-major order
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.height).flat_map(move |y| (0..self.width).map(move |x| Position::new(x, y)))
    }

    /// Render the terrain as text rows
    pub fn rows(&self) -> Vec<String> {
        (0..self.height)
            .map(|y| {
                (0..self.width)
                    .map(|x| self.tile(Position::new(x, y)).glyph())
                    .collect()
            })
            .collect()
    }
}

impl Grid for TileGrid {
    fn width(&self) -> i32 {
        self.width
    }

    fn height(&self) -> i32 {
        self.height
    }

    fn tile(&self, pos: Position) -> Tile {
        self.idx(pos).map_or(Tile::Wall, |i| self.tiles[i])
    }

    fn set_tile(&mut self, pos: Position, tile: Tile) {
        if let Some(i) = self.idx(pos) {
            self.tiles[i] = tile;
        }
    }

    fn is_visible(&self, pos: Position) -> bool {
        self.idx(pos).is_some_and(|i| self.visible[i])
    }

    fn is_explored(&self, pos: Position) -> bool {
        self.idx(pos).is_some_and(|i| self.explored[i])
    }

    fn compute_visibility(&mut self, origin: Position, radius: i32) {
        self.visible.fill(false);
        let r_sq = radius * radius;
        for y in (origin.y - radius)..=(origin.y + radius) {
            for x in (origin.x - radius)..=(origin.x + radius) {
                let target = Position::new(x, y);
                let Some(i) = self.idx(target) else {
                    continue;
                };
                if origin.distance_sq(target) > r_sq {
                    continue;
                }
                if has_line_of_sight(&*self, origin, target) {
                    self.visible[i] = true;
                    self.explored[i] = true;
                }
            }
        }
    }
}
