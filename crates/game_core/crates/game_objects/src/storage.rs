use crate::ids::NetworkId;
use crate::items::ItemStack;
use crate::objects::GridCell;
use game_utils::HasId;
use serde::{Deserialize, Serialize};

/// Aggregate owning the stored entries reachable through one heart and its
/// access points. Access points only know how to find it, they own nothing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageNetwork {
    pub id: NetworkId,
    pub heart: GridCell,
    stored: Vec<ItemStack>,
    /// Total units the network's storage units can hold
    capacity: u32,
}

impl HasId<NetworkId> for StorageNetwork {
    fn id_ref(&self) -> &NetworkId {
        &self.id
    }
}

impl StorageNetwork {
    pub fn new(id: NetworkId, heart: GridCell, capacity: u32) -> Self {
        Self {
            id,
            heart,
            stored: Vec::new(),
            capacity,
        }
    }

    /// Seeds an entry directly, as the storage units would when loaded from disk
    pub fn with_stored(mut self, stack: ItemStack) -> Self {
        self.stored.push(stack);
        self
    }

    pub fn stored_items(&self) -> &[ItemStack] {
        &self.stored
    }

    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    pub fn used(&self) -> u32 {
        self.stored.iter().map(|s| s.quantity).sum()
    }

    pub fn free_capacity(&self) -> u32 {
        self.capacity.saturating_sub(self.used())
    }

    /// Whether an entry matching `item` with a positive quantity is stored here
    pub fn stocks(&self, item: &ItemStack) -> bool {
        self.stored
            .iter()
            .any(|entry| entry.matches(item) && entry.quantity > 0)
    }

    /// Quantity of everything matching `item`
    pub fn count_of(&self, item: &ItemStack) -> u32 {
        self.stored
            .iter()
            .filter(|entry| entry.matches(item))
            .map(|entry| entry.quantity)
            .sum()
    }

    /// Moves as much of `item` as fits into the first matching stored entry.
    /// Returns the amount consumed. Never adds a new entry: without a stocked
    /// match nothing is consumed.
    pub fn deposit(&mut self, item: &mut ItemStack) -> u32 {
        let free = self.free_capacity();
        let Some(entry) = self
            .stored
            .iter_mut()
            .find(|entry| entry.matches(item) && entry.quantity > 0)
        else {
            return 0;
        };
        let moved = item.remove(free.min(item.quantity));
        entry.add(moved);
        moved
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::items::Item;

    fn network(capacity: u32) -> StorageNetwork {
        StorageNetwork::new(NetworkId(1), GridCell::new(0, 0), capacity)
    }

    #[test]
    fn test_deposit_tops_up_existing_entry() {
        let mut net = network(1000).with_stored(ItemStack::new(Item::healing_potion(), 10));
        let mut item = ItemStack::new(Item::healing_potion(), 50);

        assert_eq!(net.deposit(&mut item), 50);
        assert_eq!(item.quantity, 0);
        assert_eq!(net.stored_items().len(), 1);
        assert_eq!(net.count_of(&item), 60);
    }

    #[test]
    fn test_deposit_never_creates_entry() {
        let mut net = network(1000).with_stored(ItemStack::new(Item::wood(), 5));
        let mut item = ItemStack::new(Item::iron_bar(), 20);

        assert_eq!(net.deposit(&mut item), 0);
        assert_eq!(item.quantity, 20);
        assert_eq!(net.stored_items().len(), 1);
    }

    #[test]
    fn test_deposit_ignores_exhausted_entry() {
        let mut net = network(1000).with_stored(ItemStack::new(Item::wood(), 0));
        let mut item = ItemStack::new(Item::wood(), 20);

        assert!(!net.stocks(&item));
        assert_eq!(net.deposit(&mut item), 0);
        assert_eq!(item.quantity, 20);
    }

    #[test]
    fn test_deposit_limited_by_capacity() {
        let mut net = network(25).with_stored(ItemStack::new(Item::wood(), 10));
        let mut item = ItemStack::new(Item::wood(), 40);

        assert_eq!(net.deposit(&mut item), 15);
        assert_eq!(item.quantity, 25);
        assert_eq!(net.free_capacity(), 0);
        assert_eq!(net.deposit(&mut item), 0);
    }
}
