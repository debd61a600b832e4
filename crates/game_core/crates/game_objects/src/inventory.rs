use crate::items::ItemStack;
use crate::objects::GridCell;
use serde::{Deserialize, Serialize};

/// Main inventory size of a player
pub const INVENTORY_SLOTS: usize = 50;

/// Ordered, fixed-size list of slots. Empty slots hold an empty stack.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Inventory {
    slots: Vec<ItemStack>,
}

impl Default for Inventory {
    fn default() -> Self {
        Self::new(INVENTORY_SLOTS)
    }
}

impl Inventory {
    pub fn new(size: usize) -> Self {
        Self {
            slots: (0..size).map(|_| ItemStack::empty()).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(ItemStack::is_empty)
    }

    pub fn get(&self, slot: usize) -> Option<&ItemStack> {
        self.slots.get(slot)
    }

    /// Takes the stack out of `slot`, leaving an empty stack behind
    pub fn take(&mut self, slot: usize) -> Option<ItemStack> {
        self.slots
            .get_mut(slot)
            .map(|s| std::mem::replace(s, ItemStack::empty()))
    }

    /// Writes `stack` into `slot`. Returns false if the slot does not exist.
    pub fn set(&mut self, slot: usize, stack: ItemStack) -> bool {
        match self.slots.get_mut(slot) {
            Some(s) => {
                *s = stack;
                true
            }
            None => false,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &ItemStack> {
        self.slots.iter()
    }

    /// Locations represented by the portable endpoints carried here
    pub fn portable_locations(&self) -> Vec<GridCell> {
        self.slots
            .iter()
            .filter(|s| !s.is_empty())
            .filter_map(|s| s.item.portable_location())
            .collect()
    }
}
