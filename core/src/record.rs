use chrono::prelude::*;
use serde::{Deserialize, Serialize};

use crate::*;

/// Row form of a game for an external store, the grid is kept as its serialized text.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameRecord {
    pub width: Coord,
    pub height: Coord,
    #[serde(default = "crate::default_density")]
    pub density: f64,
    pub state: GameState,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub grid: String,
}

impl Game {
    pub fn to_record(&self) -> GameRecord {
        let config = self.config();
        GameRecord {
            width: config.size.0,
            height: config.size.1,
            density: config.density,
            state: self.state(),
            start_time: self.started_at(),
            end_time: self.ended_at(),
            grid: self.serialized_grid(),
        }
    }

    pub fn from_record(record: &GameRecord) -> Result<Self> {
        let config = GameConfig::new((record.width, record.height), record.density)?;
        let grid = deserialize(&record.grid, config.size)?;
        if record.state.is_created() && count_bombs(&grid) > 0 {
            log::warn!("Record of an unstarted game already holds bombs");
        }
        Game::from_parts(
            config,
            grid,
            record.state,
            record.start_time,
            record.end_time,
        )
    }
}
