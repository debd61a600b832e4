use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Half-width of the playable world, in world units, on either axis
pub const WORLD_EXTENT: f32 = 1_000_000.0;

/// Continuous world-space position, in world units
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct WorldPosition {
    pub x: f32,
    pub y: f32,
}

impl WorldPosition {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn zero() -> Self {
        Self::new(0.0, 0.0)
    }

    /// Finite and inside `[-WORLD_EXTENT, WORLD_EXTENT]` on both axes
    pub fn is_in_world(&self) -> bool {
        let inside = |v: f32| v.is_finite() && v.abs() <= WORLD_EXTENT;
        inside(self.x) && inside(self.y)
    }

    pub fn to_vec2(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub fn distance(&self, other: &WorldPosition) -> f32 {
        self.to_vec2().distance(other.to_vec2())
    }

    /// Grid cell containing this position
    pub fn to_cell(&self, tile_width: u32) -> GridCell {
        let w = tile_width as f32;
        GridCell::new((self.x / w).floor() as i32, (self.y / w).floor() as i32)
    }
}

/// Integer address of a tile in the world grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct GridCell {
    pub x: i32,
    pub y: i32,
}

impl GridCell {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Center of the cell in world space
    pub fn to_world(&self, tile_width: u32) -> WorldPosition {
        let w = tile_width as f32;
        WorldPosition::new(self.x as f32 * w + w / 2.0, self.y as f32 * w + w / 2.0)
    }

    /// Number of cells between the two addresses along the longest axis
    pub fn chebyshev(&self, other: &GridCell) -> u32 {
        self.x.abs_diff(other.x).max(self.y.abs_diff(other.y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_center() {
        let center = GridCell::new(2, -1).to_world(16);
        assert_eq!(center, WorldPosition::new(40.0, -8.0));
    }

    #[test]
    fn test_position_to_cell_floors() {
        assert_eq!(WorldPosition::new(15.9, 16.0).to_cell(16), GridCell::new(0, 1));
        assert_eq!(WorldPosition::new(-0.1, -16.0).to_cell(16), GridCell::new(-1, -1));
    }

    #[test]
    fn test_center_roundtrips_to_same_cell() {
        let cell = GridCell::new(-7, 12);
        assert_eq!(cell.to_world(16).to_cell(16), cell);
    }

    #[test]
    fn test_world_bounds() {
        assert!(WorldPosition::new(-WORLD_EXTENT, WORLD_EXTENT).is_in_world());
        assert!(!WorldPosition::new(1.0e12, 0.0).is_in_world());
        assert!(!WorldPosition::new(0.0, f32::NAN).is_in_world());
        assert!(!WorldPosition::new(f32::NEG_INFINITY, 0.0).is_in_world());
    }

    #[test]
    fn test_chebyshev_across_whole_grid() {
        let a = GridCell::new(i32::MIN, 0);
        let b = GridCell::new(i32::MAX, 3);
        assert_eq!(a.chebyshev(&b), u32::MAX);
    }

    #[test]
    fn test_distance() {
        let a = WorldPosition::new(0.0, 0.0);
        let b = WorldPosition::new(3.0, 4.0);
        assert_eq!(a.distance(&b), 5.0);
    }
}
