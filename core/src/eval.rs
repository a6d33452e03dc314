//! Terminal conditions, computed from grid contents alone.

use crate::*;

/// What a reveal did to the game.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Verdict {
    Continue,
    Won,
    Lost,
}

/// Bombs never move after generation, so this is constant for a started game.
pub fn count_bombs(grid: &Grid) -> CellCount {
    count_where(grid, Tile::is_bomb)
}

pub fn count_hidden(grid: &Grid) -> CellCount {
    count_where(grid, Tile::is_hidden)
}

pub fn count_flagged(grid: &Grid) -> CellCount {
    count_where(grid, Tile::is_flagged)
}

/// Decides the game after `revealed` was opened and propagation has run.
///
/// Hitting a bomb loses, otherwise the game is won once every tile still hidden is a bomb.
pub fn evaluate(grid: &Grid, revealed: Tile) -> Verdict {
    if revealed.is_bomb() {
        Verdict::Lost
    } else if count_hidden(grid) == count_bombs(grid) {
        Verdict::Won
    } else {
        Verdict::Continue
    }
}

fn count_where(grid: &Grid, predicate: impl Fn(Tile) -> bool) -> CellCount {
    grid.iter()
        .filter(|&&tile| predicate(tile))
        .count()
        .try_into()
        .unwrap_or(CellCount::MAX)
}
