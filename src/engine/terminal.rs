use super::grid::{Grid, SIZE, WIN_TILE};

/// Whether the winning tile is anywhere on the grid.
pub fn is_won(grid: &Grid) -> bool {
    grid.contains(WIN_TILE)
}

/// Whether any move could still change the grid: an empty slot exists or two horizontally or
/// vertically adjacent slots hold the same value.
pub fn has_moves(grid: &Grid) -> bool {
    let rows = grid.rows();
    for y in 0..SIZE {
        for x in 0..SIZE {
            let value = rows[y][x];
            if value == 0 {
                return true;
            }
            if x + 1 < SIZE && value == rows[y][x + 1] {
                return true;
            }
            if y + 1 < SIZE && value == rows[y + 1][x] {
                return true;
            }
        }
    }
    false
}
