use super::*;

/// Places bombs at fixed coordinates, for replaying a known board.
///
/// The density is ignored. A listed coordinate that is off the board or equal to the safe cell is
/// skipped.
#[derive(Clone, Debug, PartialEq)]
pub struct LayoutGenerator {
    bombs: Vec<Coord2>,
}

impl LayoutGenerator {
    pub fn new(bombs: impl Into<Vec<Coord2>>) -> Self {
        Self {
            bombs: bombs.into(),
        }
    }

    pub fn bombs(&self) -> &[Coord2] {
        &self.bombs
    }
}

impl BoardGenerator for LayoutGenerator {
    fn generate(&mut self, grid: &mut Grid, safe: Coord2, _density: f64) {
        let (width, height) = board_size(grid);
        grid.mapv_inplace(|tile| tile.with_bomb(false));

        for &coords in &self.bombs {
            if coords.0 >= width || coords.1 >= height {
                log::warn!("Bomb at {:?} is outside the {}x{} board", coords, width, height);
                continue;
            }
            if coords == safe {
                log::warn!("Bomb at {:?} is the safe cell, skipped", coords);
                continue;
            }
            let tile = grid[coords.to_nd_index()];
            grid[coords.to_nd_index()] = tile.with_bomb(true);
        }
        log::debug!("Placed fixed layout of {} bombs", self.bombs.len());

        fill_adjacent(grid);
    }
}
