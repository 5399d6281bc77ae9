//! Merchant shop (shk.c)
//!
//! A single stationary merchant stands in the center of the first Shop-themed
//! room. Trading never advances the turn.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::creature::Position;
use crate::object::{Enchantment, Item, loot};
use crate::player::Player;
use crate::rng::RandomSource;
use crate::world::floor::Room;

/// Why a trade was refused. Each maps to a one-line status message.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TradeError {
    #[error("Nothing there.")]
    NoSuchItem,
    #[error("Already sold.")]
    AlreadySold,
    #[error("Not enough gold!")]
    NotEnoughGold,
    #[error("Inventory full!")]
    InventoryFull,
    #[error("Can't sell that.")]
    CannotSell,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShopItem {
    pub item: Item,
    pub price: i32,
    pub sold: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shop {
    pub merchant: Position,
    pub stock: Vec<ShopItem>,
}

impl Shop {
    /// Stock a shop in `room` for floor `depth`: three to five wares
    pub fn generate(room: &Room, depth: u32, rng: &mut dyn RandomSource) -> Shop {
        let d = depth as i32;
        let count = 3 + rng.rn2(3);
        let mut stock = Vec::with_capacity(count as usize);
        for _ in 0..count {
            let (item, price) = match rng.rn2(6) {
                0 => (loot::health_potion(10 + d * 3), 15 + d * 5),
                1 => {
                    let scroll = if rng.one_in(2) {
                        loot::attack_scroll()
                    } else {
                        loot::defense_scroll()
                    };
                    (scroll, 30 + d * 10)
                }
                2 => {
                    let ench = if depth >= 3 {
                        Enchantment::roll(depth, false, rng)
                    } else {
                        Enchantment::None
                    };
                    let tier = loot::tier_for_depth(depth) as i32;
                    (loot::weapon(depth, ench), 40 + tier * 15)
                }
                4 => (loot::bomb(depth), 20 + d * 5),
                _ => (loot::shield_potion(depth), 25 + d * 5),
            };
            stock.push(ShopItem {
                item,
                price,
                sold: false,
            });
        }
        debug!(depth, wares = stock.len(), merchant = ?room.center(), "shop stocked");
        Shop {
            merchant: room.center(),
            stock,
        }
    }

    /// Merchant is within reach: adjacent or underfoot
    pub fn in_reach(&self, pos: Position) -> bool {
        pos == self.merchant || pos.is_adjacent(self.merchant)
    }

    /// Buy ware `index`. Returns the success message.
    pub fn buy(&mut self, index: usize, player: &mut Player) -> Result<String, TradeError> {
        let ware = self.stock.get_mut(index).ok_or(TradeError::NoSuchItem)?;
        if ware.sold {
            return Err(TradeError::AlreadySold);
        }
        if player.gold < ware.price {
            return Err(TradeError::NotEnoughGold);
        }
        if player.inventory.is_full() {
            return Err(TradeError::InventoryFull);
        }
        player.gold -= ware.price;
        ware.sold = true;
        let msg = format!("Bought {}!", ware.item.name);
        player
            .inventory
            .add(ware.item.clone())
            .map_err(|_| TradeError::InventoryFull)?;
        Ok(msg)
    }

    /// Sell inventory item `index` at its sell price
    pub fn sell(&self, index: usize, player: &mut Player) -> Result<String, TradeError> {
        let item = player.inventory.get(index).ok_or(TradeError::NoSuchItem)?;
        let price = item.sell_price();
        if price <= 0 {
            return Err(TradeError::CannotSell);
        }
        let item = player.inventory.remove(index).ok_or(TradeError::NoSuchItem)?;
        player.gold += price;
        Ok(format!("Sold {} for {} gold.", item.name, price))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::ItemKind;
    use crate::player::PlayerClass;
    use crate::rng::ScriptedRng;
    use crate::world::floor::RoomTheme;

    fn shop() -> Shop {
        let room = Room::new(10, 10, 7, 5).with_theme(RoomTheme::Shop);
        // three wares: health potion, scroll (attack), bomb
        let mut rng = ScriptedRng::new([0, 0, 1, 0, 4]);
        Shop::generate(&room, 2, &mut rng)
    }

    #[test]
    fn test_generate() {
        let s = shop();
        assert_eq!(s.merchant, Position::new(13, 12));
        assert_eq!(s.stock.len(), 3);
        assert_eq!(s.stock[0].item.kind, ItemKind::HealthPotion);
        assert_eq!(s.stock[0].item.value, 16);
        assert_eq!(s.stock[0].price, 25);
        assert_eq!(s.stock[1].item.kind, ItemKind::AttackBoost);
        assert_eq!(s.stock[1].price, 50);
        assert_eq!(s.stock[2].item.kind, ItemKind::Bomb);
    }

    #[test]
    fn test_buy_rules() {
        let mut s = shop();
        let mut p = Player::new(PlayerClass::Rogue, Position::new(13, 11));
        assert_eq!(s.buy(0, &mut p), Err(TradeError::NotEnoughGold));
        p.gold = 100;
        assert_eq!(s.buy(0, &mut p).unwrap(), "Bought Health Potion!");
        assert_eq!(p.gold, 75);
        assert_eq!(p.inventory.len(), 1);
        assert_eq!(s.buy(0, &mut p), Err(TradeError::AlreadySold));
        assert_eq!(s.buy(9, &mut p), Err(TradeError::NoSuchItem));
    }

    #[test]
    fn test_buy_full_inventory() {
        let mut s = shop();
        let mut p = Player::new(PlayerClass::Rogue, Position::new(13, 11));
        p.gold = 500;
        for _ in 0..crate::consts::MAX_INVENTORY {
            p.inventory.add(loot::teleport_scroll()).unwrap();
        }
        assert_eq!(s.buy(1, &mut p), Err(TradeError::InventoryFull));
        assert_eq!(p.gold, 500);
        assert!(!s.stock[1].sold);
    }

    #[test]
    fn test_sell() {
        let s = shop();
        let mut p = Player::new(PlayerClass::Rogue, Position::new(13, 11));
        p.inventory.add(loot::teleport_scroll()).unwrap();
        p.inventory.add(Item::gold(5)).unwrap();
        assert_eq!(s.sell(1, &mut p), Err(TradeError::CannotSell));
        assert_eq!(s.sell(0, &mut p).unwrap(), "Sold Teleport Scroll for 10 gold.");
        assert_eq!(p.gold, 10);
        assert_eq!(p.inventory.len(), 1);
    }

    #[test]
    fn test_reach() {
        let s = shop();
        assert!(s.in_reach(Position::new(12, 11)));
        assert!(s.in_reach(s.merchant));
        assert!(!s.in_reach(Position::new(11, 12)));
    }
}
