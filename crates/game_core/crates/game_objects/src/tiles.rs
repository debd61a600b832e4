use crate::objects::GridCell;
use serde::{Deserialize, Serialize};

/// Type of the object occupying a world tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TileKind {
    /// Center of a storage network; is itself an access point
    StorageHeart,
    StorageAccess,
    /// Crafting station wired into a network. Structurally a storage access,
    /// but it does not accept deposits.
    CraftingAccess,
    StorageUnit,
    /// Generic chest, handled by the host's own stacking
    Container,
    Terrain,
}

/// Capability exposed by a tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AccessKind {
    StorageAccessPoint,
    CraftingAccessPoint,
    Other,
}

impl TileKind {
    /// True for every tile that behaves as a storage access, crafting access included
    pub fn is_storage_access(self) -> bool {
        matches!(
            self,
            TileKind::StorageHeart | TileKind::StorageAccess | TileKind::CraftingAccess
        )
    }

    pub fn is_crafting_access(self) -> bool {
        matches!(self, TileKind::CraftingAccess)
    }

    pub fn access_kind(self) -> AccessKind {
        if self.is_crafting_access() {
            AccessKind::CraftingAccessPoint
        } else if self.is_storage_access() {
            AccessKind::StorageAccessPoint
        } else {
            AccessKind::Other
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tile {
    pub kind: TileKind,
    /// Inactive tiles are placeholders left behind after mining
    pub active: bool,
    /// Heart this component is wired to, if any
    pub link: Option<GridCell>,
}

impl Tile {
    pub fn new(kind: TileKind) -> Self {
        Self {
            kind,
            active: true,
            link: None,
        }
    }

    pub fn linked_to(kind: TileKind, heart: GridCell) -> Self {
        Self {
            link: Some(heart),
            ..Self::new(kind)
        }
    }
}

/// A grid cell tagged with the capability of what occupies it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AccessPoint {
    pub cell: GridCell,
    pub kind: AccessKind,
}

impl AccessPoint {
    pub fn from_tile(cell: GridCell, tile: &Tile) -> Self {
        Self {
            cell,
            kind: tile.kind.access_kind(),
        }
    }

    /// Only plain storage access points take part in quick-stacking
    pub fn accepts_deposits(&self) -> bool {
        self.kind == AccessKind::StorageAccessPoint
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crafting_access_is_structurally_storage_access() {
        assert!(TileKind::CraftingAccess.is_storage_access());
        assert_eq!(
            TileKind::CraftingAccess.access_kind(),
            AccessKind::CraftingAccessPoint
        );
    }

    #[test]
    fn test_access_kinds() {
        assert_eq!(TileKind::StorageHeart.access_kind(), AccessKind::StorageAccessPoint);
        assert_eq!(TileKind::StorageAccess.access_kind(), AccessKind::StorageAccessPoint);
        assert_eq!(TileKind::StorageUnit.access_kind(), AccessKind::Other);
        assert_eq!(TileKind::Container.access_kind(), AccessKind::Other);
    }

    #[test]
    fn test_only_storage_access_points_accept_deposits() {
        let cell = GridCell::new(0, 0);
        let access = AccessPoint::from_tile(cell, &Tile::new(TileKind::StorageAccess));
        let crafting = AccessPoint::from_tile(cell, &Tile::new(TileKind::CraftingAccess));
        assert!(access.accepts_deposits());
        assert!(!crafting.accepts_deposits());
    }
}
