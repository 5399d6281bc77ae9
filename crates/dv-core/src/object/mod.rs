//! Object system
//!
//! Items, enchantments, the player's inventory and loot tables.

pub mod enchant;
pub mod inventory;
pub mod item;
pub mod loot;

pub use enchant::Enchantment;
pub use inventory::Inventory;
pub use item::{Item, ItemCategory, ItemKind};
