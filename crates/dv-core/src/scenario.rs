//! ASCII scenarios
//!
//! A scenario is a hand-drawn floor: terrain glyphs plus `@` for the player,
//! enemy glyphs, item glyphs and `M` for a merchant. Everything that stands on
//! the map sits on plain floor.
//!
//! ```text
//! #######
//! #@.r.>#
//! #..$..#
//! #######
//! ```

use std::path::Path;

use thiserror::Error;

use crate::creature::Position;
use crate::gameloop::GameState;
use crate::monster::{Enemy, EnemyKind};
use crate::object::{Enchantment, Item, loot};
use crate::player::{Player, PlayerClass};
use crate::rng::RandomSource;
use crate::world::floor::{Biome, FloorLayout, Room, RoomTheme};
use crate::world::grid::{Grid, Tile, TileGrid};
use crate::world::shop::Shop;

const PLAYER_GLYPH: char = '@';
const MERCHANT_GLYPH: char = 'M';
/// Gold lying on a scenario map
const SCENARIO_GOLD: i32 = 10;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScenarioError {
    #[error("IO error: {0}")]
    Io(String),
    #[error("scenario has no rows")]
    Empty,
    #[error("row {row} is {found} wide, expected {expected}")]
    Ragged { row: usize, expected: usize, found: usize },
    #[error("no player on the map")]
    MissingPlayer,
    #[error("second player at ({0}, {1})")]
    DuplicatePlayer(i32, i32),
    #[error("second merchant at ({0}, {1})")]
    DuplicateMerchant(i32, i32),
    #[error("unknown glyph '{glyph}' at ({x}, {y})")]
    UnknownGlyph { glyph: char, x: i32, y: i32 },
}

/// A parsed map, not yet bound to a player class
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scenario {
    pub grid: TileGrid,
    pub player: Position,
    /// Enemies in reading order
    pub enemies: Vec<(EnemyKind, Position)>,
    pub items: Vec<Item>,
    pub merchant: Option<Position>,
    pub depth: u32,
}

impl Scenario {
    pub fn load(path: &Path) -> Result<Self, ScenarioError> {
        let text =
            std::fs::read_to_string(path).map_err(|e| ScenarioError::Io(e.to_string()))?;
        Self::parse(&text)
    }

    pub fn parse(text: &str) -> Result<Self, ScenarioError> {
        let rows: Vec<Vec<char>> = text
            .lines()
            .map(|line| line.trim_end_matches('\r'))
            .filter(|line| !line.is_empty())
            .map(|line| line.chars().collect())
            .collect();
        let width = rows.first().map(Vec::len).ok_or(ScenarioError::Empty)?;
        if width == 0 {
            return Err(ScenarioError::Empty);
        }

        let depth = 1;
        let mut grid = TileGrid::filled(width as i32, rows.len() as i32, Tile::Wall);
        let mut player = None;
        let mut enemies = Vec::new();
        let mut items = Vec::new();
        let mut merchant = None;

        for (y, row) in rows.iter().enumerate() {
            if row.len() != width {
                return Err(ScenarioError::Ragged {
                    row: y,
                    expected: width,
                    found: row.len(),
                });
            }
            for (x, &glyph) in row.iter().enumerate() {
                let pos = Position::new(x as i32, y as i32);
                if let Some(tile) = Tile::from_glyph(glyph) {
                    grid.set_tile(pos, tile);
                    continue;
                }
                grid.set_tile(pos, Tile::Floor);

                match glyph {
                    PLAYER_GLYPH => {
                        if player.replace(pos).is_some() {
                            return Err(ScenarioError::DuplicatePlayer(pos.x, pos.y));
                        }
                    }
                    MERCHANT_GLYPH => {
                        if merchant.replace(pos).is_some() {
                            return Err(ScenarioError::DuplicateMerchant(pos.x, pos.y));
                        }
                    }
                    _ => {
                        if let Some(kind) = EnemyKind::from_glyph(glyph) {
                            enemies.push((kind, pos));
                        } else if let Some(item) = item_for_glyph(glyph, depth) {
                            items.push(item.placed_at(pos));
                        } else {
                            return Err(ScenarioError::UnknownGlyph {
                                glyph,
                                x: pos.x,
                                y: pos.y,
                            });
                        }
                    }
                }
            }
        }

        Ok(Self {
            grid,
            player: player.ok_or(ScenarioError::MissingPlayer)?,
            enemies,
            items,
            merchant,
            depth,
        })
    }

    pub fn with_depth(mut self, depth: u32) -> Self {
        self.depth = depth.max(1);
        self
    }

    /// Build the game state. The merchant's wares are rolled from `rng`.
    pub fn into_state(self, class: PlayerClass, rng: &mut dyn RandomSource) -> GameState {
        let player = Player::new(class, self.player);
        let layout = FloorLayout::new(self.depth, Vec::new(), Biome::default());
        let mut state = GameState::new(player, self.grid, layout);

        state.enemies = self
            .enemies
            .into_iter()
            .map(|(kind, pos)| Enemy::spawn(kind, pos))
            .collect();
        state.items = self.items;
        state.shop = self.merchant.map(|pos| {
            let stall = Room::new(pos.x - 1, pos.y - 1, 3, 3).with_theme(RoomTheme::Shop);
            Shop::generate(&stall, self.depth, rng)
        });
        state.refresh_visibility();
        state
    }
}

fn item_for_glyph(glyph: char, depth: u32) -> Option<Item> {
    Some(match glyph {
        '!' => loot::health_potion(10 + depth as i32 * 3),
        '$' => Item::gold(SCENARIO_GOLD),
        '/' => loot::weapon(depth, Enchantment::None),
        '[' => loot::armor(depth, Enchantment::None),
        '?' => loot::teleport_scroll(),
        'o' => loot::bomb(depth),
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::ItemKind;
    use crate::rng::GameRng;

    #[test]
    fn test_parse_layout() {
        let s = Scenario::parse("#######\n#@.r.>#\n#..$~M#\n#######\n").unwrap();
        assert_eq!(s.grid.width(), 7);
        assert_eq!(s.grid.height(), 4);
        assert_eq!(s.player, Position::new(1, 1));
        assert_eq!(s.enemies, vec![(EnemyKind::Rat, Position::new(3, 1))]);
        assert_eq!(s.grid.tile(Position::new(3, 1)), Tile::Floor);
        assert_eq!(s.grid.tile(Position::new(5, 1)), Tile::StairsDown);
        assert_eq!(s.grid.tile(Position::new(4, 2)), Tile::Water);
        assert_eq!(s.items.len(), 1);
        assert_eq!(s.items[0].kind, ItemKind::Gold);
        assert!(s.items[0].on_ground);
        assert_eq!(s.merchant, Some(Position::new(5, 2)));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(Scenario::parse(""), Err(ScenarioError::Empty));
        assert_eq!(Scenario::parse("###\n#.#\n###"), Err(ScenarioError::MissingPlayer));
        assert_eq!(
            Scenario::parse("####\n#@@#\n####"),
            Err(ScenarioError::DuplicatePlayer(2, 1))
        );
        assert_eq!(
            Scenario::parse("####\n#@.\n####"),
            Err(ScenarioError::Ragged {
                row: 1,
                expected: 4,
                found: 3
            })
        );
        assert_eq!(
            Scenario::parse("####\n#@X#\n####"),
            Err(ScenarioError::UnknownGlyph {
                glyph: 'X',
                x: 2,
                y: 1
            })
        );
    }

    #[test]
    fn test_into_state() {
        let s = Scenario::parse("#######\n#@.g.M#\n#######")
            .unwrap()
            .into_state(PlayerClass::Rogue, &mut GameRng::new(3));
        assert_eq!(s.player.class, PlayerClass::Rogue);
        assert_eq!(s.player.body.hp, 25);
        assert_eq!(s.enemies.len(), 1);
        assert_eq!(s.enemies[0].kind, EnemyKind::Ghost);
        assert!(!s.enemies[0].awake);
        assert_eq!(s.depth, 1);
        assert!(s.messages.is_empty());
        let shop = s.shop.as_ref().unwrap();
        assert_eq!(shop.merchant, Position::new(5, 1));
        assert!((3..=5).contains(&shop.stock.len()));
        assert!(s.grid.is_visible(Position::new(1, 1)));
    }
}
