//! World state outside the creatures: the grid substrate, floor layout, traps,
//! the shop, options and the message log.

pub mod difficulty;
pub mod floor;
pub mod grid;
pub mod los;
pub mod messages;
pub mod options;
pub mod populate;
pub mod shop;
pub mod trap;

pub use difficulty::Difficulty;
pub use floor::{Biome, FloorLayout, Room, RoomTheme};
pub use grid::{Grid, Tile, TileGrid};
pub use los::{bresenham_line, has_line_of_sight};
pub use messages::MessageLog;
pub use options::{GameOptions, OptionsError};
pub use populate::{FloorContents, populate_floor};
pub use shop::{Shop, ShopItem, TradeError};
pub use trap::{Trap, TrapKind};
