//! Player inventory (invent.c)

use serde::{Deserialize, Serialize};

use crate::consts::MAX_INVENTORY;
use crate::object::item::Item;

/// Ordered, bounded item list. Indices are stable until an item is removed.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Inventory {
    items: Vec<Item>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.items.len() >= MAX_INVENTORY
    }

    /// Append an item. Hands the item back if there is no room.
    pub fn add(&mut self, mut item: Item) -> Result<(), Item> {
        if self.is_full() {
            return Err(item);
        }
        item.on_ground = false;
        self.items.push(item);
        Ok(())
    }

    /// Remove the item at `index`; out-of-range indices are ignored
    pub fn remove(&mut self, index: usize) -> Option<Item> {
        (index < self.items.len()).then(|| self.items.remove(index))
    }

    pub fn get(&self, index: usize) -> Option<&Item> {
        self.items.get(index)
    }

    /// Swap a new item into `index`, returning the previous occupant
    pub fn replace(&mut self, index: usize, mut item: Item) -> Option<Item> {
        let slot = self.items.get_mut(index)?;
        item.on_ground = false;
        Some(std::mem::replace(slot, item))
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Item> {
        self.items.iter()
    }
}

impl<'a> IntoIterator for &'a Inventory {
    type Item = &'a Item;
    type IntoIter = std::slice::Iter<'a, Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::item::ItemKind;

    fn potion(value: i32) -> Item {
        Item::new(ItemKind::HealthPotion, "Health Potion", value)
    }

    #[test]
    fn test_capacity() {
        let mut inv = Inventory::new();
        for i in 0..MAX_INVENTORY {
            assert!(inv.add(potion(i as i32)).is_ok());
        }
        assert!(inv.is_full());
        let rejected = inv.add(potion(99));
        assert_eq!(rejected.map_err(|i| i.value), Err(99));
    }

    #[test]
    fn test_insertion_order_stable() {
        let mut inv = Inventory::new();
        for v in [1, 2, 3] {
            inv.add(potion(v)).unwrap();
        }
        inv.remove(1);
        let values: Vec<i32> = inv.iter().map(|i| i.value).collect();
        assert_eq!(values, vec![1, 3]);
    }

    #[test]
    fn test_out_of_range_is_noop() {
        let mut inv = Inventory::new();
        inv.add(potion(5)).unwrap();
        assert!(inv.remove(4).is_none());
        assert!(inv.get(1).is_none());
        assert!(inv.replace(3, potion(1)).is_none());
        assert_eq!(inv.len(), 1);
    }

    #[test]
    fn test_add_clears_ground_flag() {
        let mut inv = Inventory::new();
        let item = potion(3).placed_at(crate::creature::Position::new(1, 1));
        inv.add(item).unwrap();
        assert!(!inv.get(0).unwrap().on_ground);
    }
}
