use super::host::TileQuery;
use game_objects::{AccessPoint, GridCell, WorldPosition};

/// Whether `cell` holds an active storage access strictly closer than `max_distance`
/// to `player`. Crafting accesses and everything else are dropped.
pub fn is_access_in_range<T: TileQuery + ?Sized>(
    tiles: &T,
    player: WorldPosition,
    cell: GridCell,
    max_distance: u32,
    tile_width: u32,
) -> bool {
    let distance = cell.to_world(tile_width).distance(&player);
    if distance >= max_distance as f32 {
        return false;
    }

    match tiles.tile_at(cell) {
        Some(tile) => tile.active && AccessPoint::from_tile(cell, tile).accepts_deposits(),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_objects::{Tile, TileKind};
    use std::collections::HashMap;

    struct Tiles(HashMap<GridCell, Tile>);

    impl TileQuery for Tiles {
        fn tile_at(&self, cell: GridCell) -> Option<&Tile> {
            self.0.get(&cell)
        }
    }

    fn with(cell: GridCell, tile: Tile) -> Tiles {
        Tiles(HashMap::from([(cell, tile)]))
    }

    #[test]
    fn test_boundary_is_rejected() {
        // cell (12, 0) has its center at (200, 8)
        let cell = GridCell::new(12, 0);
        let tiles = with(cell, Tile::new(TileKind::StorageAccess));

        assert!(!is_access_in_range(&tiles, WorldPosition::new(0.0, 8.0), cell, 200, 16));
        assert!(is_access_in_range(&tiles, WorldPosition::new(0.5, 8.0), cell, 200, 16));
    }

    #[test]
    fn test_crafting_access_rejected() {
        let cell = GridCell::new(1, 0);
        let tiles = with(cell, Tile::new(TileKind::CraftingAccess));
        assert!(!is_access_in_range(&tiles, WorldPosition::new(8.0, 8.0), cell, 200, 16));
    }

    #[test]
    fn test_heart_counts_as_access() {
        let cell = GridCell::new(1, 0);
        let tiles = with(cell, Tile::new(TileKind::StorageHeart));
        assert!(is_access_in_range(&tiles, WorldPosition::new(8.0, 8.0), cell, 200, 16));
    }

    #[test]
    fn test_empty_inactive_and_other_rejected() {
        let player = WorldPosition::new(8.0, 8.0);
        let cell = GridCell::new(1, 0);

        assert!(!is_access_in_range(&Tiles(HashMap::new()), player, cell, 200, 16));
        assert!(!is_access_in_range(&with(cell, Tile::new(TileKind::Container)), player, cell, 200, 16));
        assert!(!is_access_in_range(&with(cell, Tile::new(TileKind::StorageUnit)), player, cell, 200, 16));

        let mut mined = Tile::new(TileKind::StorageAccess);
        mined.active = false;
        assert!(!is_access_in_range(&with(cell, mined), player, cell, 200, 16));
    }
}
