use ndarray::Array2;

use crate::*;
pub use layout::*;
pub use random::*;

mod layout;
mod random;

/// Places bombs on a placeholder grid once the first move is known.
pub trait BoardGenerator {
    /// Sets the bomb bit on chosen tiles, never on `safe`, then fills in every adjacency count.
    ///
    /// Hidden and flag bits already on the grid are kept.
    fn generate(&mut self, grid: &mut Grid, safe: Coord2, density: f64);
}

/// Board of a game that has not started: all hidden, no flags, no bombs.
pub fn generate_empty((width, height): Coord2) -> Grid {
    Array2::from_elem((usize::from(height), usize::from(width)), Tile::PLACEHOLDER)
}

/// How many bombs a board gets, one less than the density asks for to account for the safe cell.
pub fn bomb_target((width, height): Coord2, density: f64) -> CellCount {
    let total = mult(width, height);
    let wanted = (density * f64::from(total)).floor() as CellCount;
    wanted.saturating_sub(1).min(total.saturating_sub(1))
}

/// Recomputes adjacency counts from the bomb bits, bombs themselves get a count of 0.
pub(crate) fn fill_adjacent(grid: &mut Grid) {
    let size = board_size(grid);
    for coords in iter_coords(size) {
        let tile = grid[coords.to_nd_index()];
        let count = if tile.is_bomb() {
            0
        } else {
            grid.iter_neighbors(coords)
                .filter(|pos| grid[pos.to_nd_index()].is_bomb())
                .count() as u8
        };
        grid[coords.to_nd_index()] = Tile::new(
            tile.is_hidden(),
            tile.contains(Tile::FLAGGED),
            tile.is_bomb(),
            count,
        );
    }
}
