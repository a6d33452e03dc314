use rand::prelude::*;

use super::*;

/// Places exactly [`bomb_target`] bombs by sampling the board in row-major order.
///
/// Each cell other than the safe one becomes a bomb with probability `bombs_remaining /
/// tiles_remaining`, so the count is exact for any random sequence, not just in expectation.
#[derive(Clone, Debug)]
pub struct ReservoirGenerator<R> {
    rng: R,
}

impl<R: Rng> ReservoirGenerator<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl ReservoirGenerator<SmallRng> {
    pub fn from_seed(seed: u64) -> Self {
        Self::new(SmallRng::seed_from_u64(seed))
    }
}

impl<R: Rng> BoardGenerator for ReservoirGenerator<R> {
    fn generate(&mut self, grid: &mut Grid, safe: Coord2, density: f64) {
        let size = board_size(grid);
        let (width, height) = size;
        let safe_on_board = safe.0 < width && safe.1 < height;

        let mut tiles_remaining = mult(width, height) - CellCount::from(safe_on_board);
        let mut bombs_remaining = bomb_target(size, density).min(tiles_remaining);
        let requested = bombs_remaining;

        for coords in iter_coords(size) {
            let tile = grid[coords.to_nd_index()];
            if coords == safe {
                grid[coords.to_nd_index()] = tile.with_bomb(false);
                continue;
            }

            let roll: f64 = self.rng.random();
            let place = roll < f64::from(bombs_remaining) / f64::from(tiles_remaining);
            grid[coords.to_nd_index()] = tile.with_bomb(place);
            if place {
                bombs_remaining -= 1;
            }
            tiles_remaining -= 1;
        }

        // double check bomb count
        if bombs_remaining != 0 {
            log::warn!(
                "Generated board count mismatch, missing {} of {} bombs",
                bombs_remaining,
                requested
            );
        }
        log::debug!(
            "Generated {}x{} board with {} bombs, safe at {:?}",
            width,
            height,
            requested - bombs_remaining,
            safe
        );

        fill_adjacent(grid);
    }
}
