use chrono::prelude::*;
use serde::{Deserialize, Serialize};

use crate::*;

/// Read model handed to players, bombs and counts of hidden tiles are withheld until the game ends.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClientView {
    pub width: Coord,
    pub height: Coord,
    pub state: GameState,
    pub bombs: CellCount,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    /// Tile values, first index vertical and second horizontal
    pub tiles: Vec<Vec<u8>>,
}

impl ClientView {
    pub fn from_game(game: &Game) -> Self {
        let (width, height) = game.size();
        let grid = client_grid(game);
        let tiles = grid
            .rows()
            .into_iter()
            .map(|row| row.iter().map(|tile| tile.bits()).collect())
            .collect();

        Self {
            width,
            height,
            state: game.state(),
            bombs: game.bomb_count(),
            start_time: game.started_at(),
            end_time: game.ended_at(),
            tiles,
        }
    }
}

/// Copy of the grid a player may see: masked while the game runs, raw once it has ended.
pub fn client_grid(game: &Game) -> Grid {
    if game.is_finished() {
        game.grid().clone()
    } else {
        game.grid().mapv(Tile::masked)
    }
}

impl Game {
    pub fn client_view(&self) -> ClientView {
        ClientView::from_game(self)
    }
}
