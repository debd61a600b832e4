use crate::ids::ItemId;
use crate::objects::GridCell;
use serde::{Deserialize, Serialize};

/// What an item is beyond its type id
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub enum ItemKind {
    #[default]
    Plain,
    /// Carried endpoint that acts as a storage access placed at `location`
    PortableAccess { location: GridCell },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    /// Modifier rolled on the item; two items only stack if it is equal
    pub prefix: u8,
    pub max_stack: u32,
    pub kind: ItemKind,
}

impl Item {
    pub fn new(id: u32, name: impl Into<String>, max_stack: u32) -> Self {
        Self {
            id: ItemId(id),
            name: name.into(),
            prefix: 0,
            max_stack,
            kind: ItemKind::Plain,
        }
    }

    pub fn with_prefix(mut self, prefix: u8) -> Self {
        self.prefix = prefix;
        self
    }

    /// Placeholder for an emptied slot
    pub fn air() -> Self {
        Self::new(0, "Air", 0)
    }

    pub fn healing_potion() -> Self {
        Self::new(28, "Healing Potion", 30)
    }

    pub fn iron_bar() -> Self {
        Self::new(22, "Iron Bar", 999)
    }

    pub fn wood() -> Self {
        Self::new(9, "Wood", 999)
    }

    pub fn portable_access(location: GridCell) -> Self {
        Self {
            kind: ItemKind::PortableAccess { location },
            ..Self::new(3001, "Portable Access", 1)
        }
    }

    /// Item equality ignoring amount: type and modifier must agree
    pub fn matches(&self, other: &Item) -> bool {
        self.id == other.id && self.prefix == other.prefix
    }

    pub fn portable_location(&self) -> Option<GridCell> {
        match self.kind {
            ItemKind::PortableAccess { location } => Some(location),
            ItemKind::Plain => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemStack {
    pub item: Item,
    pub quantity: u32,
}

impl ItemStack {
    pub fn new(item: Item, quantity: u32) -> Self {
        Self { item, quantity }
    }

    pub fn empty() -> Self {
        Self::new(Item::air(), 0)
    }

    /// A stack with nothing left in it is fully consumed
    pub fn is_empty(&self) -> bool {
        self.quantity == 0
    }

    pub fn matches(&self, other: &ItemStack) -> bool {
        self.item.matches(&other.item)
    }

    /// Room left before the stack reaches the item's max stack
    pub fn free_space(&self) -> u32 {
        self.item.max_stack.saturating_sub(self.quantity)
    }

    pub fn add(&mut self, amount: u32) {
        self.quantity += amount;
    }

    pub fn remove(&mut self, amount: u32) -> u32 {
        let removed = self.quantity.min(amount);
        self.quantity -= removed;
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_ignores_quantity() {
        let a = ItemStack::new(Item::healing_potion(), 3);
        let b = ItemStack::new(Item::healing_potion(), 29);
        assert!(a.matches(&b));
    }

    #[test]
    fn test_match_respects_prefix() {
        let plain = ItemStack::new(Item::iron_bar(), 1);
        let modded = ItemStack::new(Item::iron_bar().with_prefix(4), 1);
        assert!(!plain.matches(&modded));
        assert!(!ItemStack::new(Item::wood(), 1).matches(&plain));
    }

    #[test]
    fn test_remove_saturates() {
        let mut stack = ItemStack::new(Item::wood(), 5);
        assert_eq!(stack.remove(8), 5);
        assert!(stack.is_empty());
    }

    #[test]
    fn test_portable_location() {
        let cell = GridCell::new(4, 9);
        assert_eq!(Item::portable_access(cell).portable_location(), Some(cell));
        assert_eq!(Item::wood().portable_location(), None);
    }
}
