use crate::ids::PlayerId;
use crate::inventory::Inventory;
use crate::objects::WorldPosition;
use game_utils::HasId;

#[derive(Debug, Clone)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    /// Center of the player's hitbox
    pub position: WorldPosition,
    pub inventory: Inventory,
}

impl HasId<PlayerId> for Player {
    fn id_ref(&self) -> &PlayerId {
        &self.id
    }
}

impl Player {
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        Self {
            id: PlayerId(id),
            name: name.into(),
            position: WorldPosition::zero(),
            inventory: Inventory::default(),
        }
    }

    pub fn spawn_at(mut self, position: WorldPosition) -> Self {
        self.position = position;
        self
    }

    /// Move player to a new position
    pub fn move_to(&mut self, position: WorldPosition) {
        self.position = position;
    }

    pub fn center(&self) -> WorldPosition {
        self.position
    }
}
