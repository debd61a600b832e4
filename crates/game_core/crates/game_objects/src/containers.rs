use crate::ids::ContainerId;
use crate::items::ItemStack;
use crate::objects::GridCell;
use game_utils::HasId;

/// Generic chest placed in the world
#[derive(Debug, Clone)]
pub struct Container {
    pub id: ContainerId,
    pub origin: GridCell,
    pub slots: Vec<ItemStack>,
}

impl HasId<ContainerId> for Container {
    fn id_ref(&self) -> &ContainerId {
        &self.id
    }
}

impl Container {
    pub fn new(id: ContainerId, origin: GridCell) -> Self {
        Self {
            id,
            origin,
            slots: Vec::new(),
        }
    }

    pub fn with_slot(mut self, stack: ItemStack) -> Self {
        self.slots.push(stack);
        self
    }

    pub fn holds(&self, item: &ItemStack) -> bool {
        self.slots.iter().any(|s| s.matches(item) && s.quantity > 0)
    }

    /// Fills matching slots up to the item's max stack. Returns the amount moved.
    pub fn stack_onto(&mut self, item: &mut ItemStack) -> u32 {
        let mut moved = 0;
        for slot in self.slots.iter_mut() {
            if item.is_empty() {
                break;
            }
            if slot.matches(item) && slot.quantity > 0 {
                let n = item.remove(slot.free_space());
                slot.add(n);
                moved += n;
            }
        }
        moved
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::items::Item;

    #[test]
    fn test_stack_onto_respects_max_stack() {
        let mut chest = Container::new(ContainerId(1), GridCell::new(0, 0))
            .with_slot(ItemStack::new(Item::healing_potion(), 25))
            .with_slot(ItemStack::new(Item::healing_potion(), 28));
        let mut item = ItemStack::new(Item::healing_potion(), 10);

        assert_eq!(chest.stack_onto(&mut item), 7);
        assert_eq!(item.quantity, 3);
        assert_eq!(chest.slots[0].quantity, 30);
        assert_eq!(chest.slots[1].quantity, 30);
    }
}
