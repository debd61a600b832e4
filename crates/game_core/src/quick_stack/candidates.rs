use game_objects::GridCell;

/// Largest search radius, in cells, a configuration may ask for
pub const MAX_SEARCH_RADIUS: i32 = 64;

/// Number of cells to search on each side of the origin, `ceil(max_distance / tile_width)`,
/// capped at [`MAX_SEARCH_RADIUS`].
pub fn candidate_radius(max_distance: u32, tile_width: u32) -> i32 {
    let cells = max_distance.div_ceil(tile_width.max(1));
    i32::try_from(cells).map_or(MAX_SEARCH_RADIUS, |r| r.min(MAX_SEARCH_RADIUS))
}

/// Every cell of the square of side `2r + 1` centered on `origin`
pub fn candidate_cells(origin: GridCell, max_distance: u32, tile_width: u32) -> CandidateCells {
    CandidateCells::new(origin, candidate_radius(max_distance, tile_width))
}

/// Lazy walk over the search square. Column by column: every y for one x before
/// moving to the next x. Clone it to restart from the same point.
#[derive(Debug, Clone)]
pub struct CandidateCells {
    origin: GridCell,
    radius: i32,
    dx: i32,
    dy: i32,
}

impl CandidateCells {
    pub fn new(origin: GridCell, radius: i32) -> Self {
        let radius = radius.clamp(0, MAX_SEARCH_RADIUS);
        Self {
            origin,
            radius,
            dx: -radius,
            dy: -radius,
        }
    }

    pub fn radius(&self) -> i32 {
        self.radius
    }

    /// Total number of cells in the square
    pub fn total(&self) -> usize {
        let side = (2 * self.radius + 1) as usize;
        side * side
    }

    fn remaining(&self) -> usize {
        if self.dx > self.radius {
            return 0;
        }
        let side = (2 * self.radius + 1) as usize;
        let full_columns = (self.radius - self.dx) as usize;
        let in_column = (self.radius - self.dy + 1) as usize;
        full_columns * side + in_column
    }
}

impl Iterator for CandidateCells {
    type Item = GridCell;

    fn next(&mut self) -> Option<GridCell> {
        if self.dx > self.radius {
            return None;
        }
        // saturates at the edge of the grid, repeated edge cells are deduped downstream
        let cell = GridCell::new(
            self.origin.x.saturating_add(self.dx),
            self.origin.y.saturating_add(self.dy),
        );
        self.dy += 1;
        if self.dy > self.radius {
            self.dy = -self.radius;
            self.dx += 1;
        }
        Some(cell)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.remaining();
        (n, Some(n))
    }
}

impl ExactSizeIterator for CandidateCells {}
