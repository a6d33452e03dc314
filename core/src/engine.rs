use std::collections::VecDeque;

use chrono::prelude::*;
use serde::{Deserialize, Serialize};

use crate::*;

/// Valid transitions:
/// - Created -> Started
/// - Started -> Won
/// - Started -> Lost
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameState {
    /// Placeholder board, bombs are placed on the first reveal
    Created,
    /// Game started
    Started,
    /// Game ended and player won
    Won,
    /// Game ended and player lost
    Lost,
}

impl GameState {
    pub const fn is_created(self) -> bool {
        matches!(self, Self::Created)
    }

    /// Indicates the game has ended and no moves can be made anymore
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::Created
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    Revealed,
    Won,
    Lost,
}

impl RevealOutcome {
    pub const fn is_final(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FlagOutcome {
    Flagged,
    Unflagged,
}

/// Represents a game from creation to finish
#[derive(Clone, Debug, PartialEq)]
pub struct Game {
    config: GameConfig,
    grid: Grid,
    state: GameState,
    started_at: Option<DateTime<Utc>>,
    ended_at: Option<DateTime<Utc>>,
}

impl Game {
    pub fn new(config: GameConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            grid: generate_empty(config.size),
            state: GameState::Created,
            started_at: None,
            ended_at: None,
        })
    }

    /// Reassembles a game from stored parts, the grid must match the configured size.
    pub fn from_parts(
        config: GameConfig,
        grid: Grid,
        state: GameState,
        started_at: Option<DateTime<Utc>>,
        ended_at: Option<DateTime<Utc>>,
    ) -> Result<Self> {
        config.validate()?;
        let expected = usize::from(config.total_cells());
        if board_size(&grid) != config.size {
            return Err(GameError::TileCountMismatch {
                expected,
                actual: grid.len(),
            });
        }
        Ok(Self {
            config,
            grid,
            state,
            started_at,
            ended_at,
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    pub fn size(&self) -> Coord2 {
        self.config.size
    }

    /// Raw grid, including bomb positions.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn tile_at(&self, coords: Coord2) -> Result<Tile> {
        let coords = self.validate_coords(coords)?;
        Ok(self.grid[coords.to_nd_index()])
    }

    /// Zero until the first reveal places the bombs.
    pub fn bomb_count(&self) -> CellCount {
        count_bombs(&self.grid)
    }

    pub fn flag_count(&self) -> CellCount {
        count_flagged(&self.grid)
    }

    /// How many bombs have not been flagged yet, negative with too many flags
    pub fn bombs_left(&self) -> isize {
        (self.bomb_count() as isize) - (self.flag_count() as isize)
    }

    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    pub fn ended_at(&self) -> Option<DateTime<Utc>> {
        self.ended_at
    }

    /// How many seconds have passed since game started, 0 if it hasn't started
    pub fn elapsed_secs(&self) -> u32 {
        if let Some(started_at) = self.started_at {
            (self.ended_at.unwrap_or_else(Utc::now) - started_at)
                .num_seconds()
                .max(0) as u32
        } else {
            0
        }
    }

    /// Persisted text form of the grid.
    pub fn serialized_grid(&self) -> String {
        serialize(&self.grid)
    }

    /// Reveal a hidden tile, placing the bombs first if this is the opening move.
    ///
    /// Nothing is changed when an error is returned.
    pub fn reveal<G>(&mut self, coords: Coord2, generator: &mut G) -> Result<RevealOutcome>
    where
        G: BoardGenerator + ?Sized,
    {
        let coords = self.validate_coords(coords)?;
        self.check_not_finished()?;
        if !self.grid[coords.to_nd_index()].is_hidden() {
            return Err(GameError::AlreadyRevealed(coords));
        }

        if self.state.is_created() {
            generator.generate(&mut self.grid, coords, self.config.density);
            self.mark_started();
        }

        let tile = self.grid[coords.to_nd_index()];
        // a revealed tile never keeps its flag
        self.grid[coords.to_nd_index()] = tile.with_hidden(false).with_flagged(false);
        log::debug!(
            "Reveal tile at {:?}, bomb: {}, count: {}",
            coords,
            tile.is_bomb(),
            tile.adjacent_count()
        );

        if !tile.is_bomb() {
            let opened = propagate(&mut self.grid);
            log::debug!("Flood-fill opened {} tiles", opened);
        }

        Ok(match evaluate(&self.grid, tile) {
            Verdict::Continue => RevealOutcome::Revealed,
            Verdict::Won => {
                self.mark_ended(GameState::Won);
                RevealOutcome::Won
            }
            Verdict::Lost => {
                self.mark_ended(GameState::Lost);
                RevealOutcome::Lost
            }
        })
    }

    /// Toggle the flag on a hidden tile.
    pub fn flag(&mut self, coords: Coord2) -> Result<FlagOutcome> {
        let coords = self.validate_coords(coords)?;
        self.check_not_finished()?;

        let tile = self.grid[coords.to_nd_index()];
        if !tile.is_hidden() {
            return Err(GameError::AlreadyRevealed(coords));
        }

        let flagged = !tile.is_flagged();
        self.grid[coords.to_nd_index()] = tile.with_flagged(flagged);
        log::debug!("Flag at {:?} set to {}", coords, flagged);

        Ok(if flagged {
            FlagOutcome::Flagged
        } else {
            FlagOutcome::Unflagged
        })
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let (width, height) = self.size();
        if coords.0 < width && coords.1 < height {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords(coords))
        }
    }

    fn check_not_finished(&self) -> Result<()> {
        if self.state.is_finished() {
            Err(GameError::AlreadyEnded)
        } else {
            Ok(())
        }
    }

    /// Checks if the state is initial and changes to started recording the start time
    fn mark_started(&mut self) {
        if self.state.is_created() {
            let now = Utc::now();
            log::debug!("started at {}", now);
            self.started_at.replace(now);
            self.state = GameState::Started;
        }
    }

    fn mark_ended(&mut self, state: GameState) {
        if self.state.is_finished() {
            return;
        }
        let now = Utc::now();
        log::debug!("ended at {} with {:?}", now, state);
        self.ended_at.replace(now);
        self.state = state;
    }
}

fn opens_neighbors(tile: Tile) -> bool {
    !tile.is_hidden() && !tile.is_bomb() && tile.adjacent_count() == 0
}

/// Opens every hidden neighbor of every revealed zero tile until nothing changes.
///
/// Returns how many tiles were opened, 0 means the grid was already at its fixed point. Opened
/// tiles lose their flag bit.
pub fn propagate(grid: &mut Grid) -> CellCount {
    let mut to_visit: VecDeque<Coord2> = iter_coords(board_size(grid))
        .filter(|&pos| opens_neighbors(grid[pos.to_nd_index()]))
        .collect();
    let mut opened: CellCount = 0;

    while let Some(visit_coords) = to_visit.pop_front() {
        for pos in grid.iter_neighbors(visit_coords) {
            let tile = grid[pos.to_nd_index()];
            if !tile.is_hidden() {
                continue;
            }

            let tile = tile.with_hidden(false).with_flagged(false);
            grid[pos.to_nd_index()] = tile;
            opened += 1;
            log::trace!(
                "Flood opened tile at {:?}, bomb count: {}",
                pos,
                tile.adjacent_count()
            );

            // if this is also zero we visit the neighbors
            if opens_neighbors(tile) {
                to_visit.push_back(pos);
            }
        }
    }

    opened
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Bombs fill column 3, splitting an 8x8 board into two regions.
    fn wall() -> LayoutGenerator {
        LayoutGenerator::new((0..8).map(|y| (3, y)).collect::<Vec<Coord2>>())
    }

    fn new_game() -> Game {
        Game::new(GameConfig::default()).unwrap()
    }

    #[test]
    fn new_game_is_an_unstarted_placeholder() {
        let game = new_game();

        assert_eq!(game.state(), GameState::Created);
        assert_eq!(game.bomb_count(), 0);
        assert_eq!(game.started_at(), None);
        assert_eq!(game.elapsed_secs(), 0);
        assert!(game.grid().iter().all(|&tile| tile == Tile::PLACEHOLDER));
        assert_eq!(game.serialized_grid(), vec!["128"; 64].join(","));
    }

    #[test]
    fn new_game_rejects_bad_size() {
        let config = GameConfig::new_unchecked((8, 40), DEFAULT_DENSITY);
        assert_eq!(Game::new(config), Err(GameError::InvalidSize(8, 40)));
    }

    #[test]
    fn first_reveal_places_bombs_and_starts() {
        let mut game = new_game();
        let mut generator = ReservoirGenerator::from_seed(3);

        let outcome = game.reveal((4, 4), &mut generator).unwrap();

        assert_ne!(outcome, RevealOutcome::Lost);
        assert_eq!(game.bomb_count(), 8);
        assert!(game.started_at().is_some());
        let tile = game.tile_at((4, 4)).unwrap();
        assert!(!tile.is_hidden());
        assert!(!tile.is_bomb());
    }

    #[test]
    fn reveal_flood_fills_then_wins() {
        let mut game = new_game();
        let mut generator = wall();

        assert_eq!(game.reveal((7, 7), &mut generator), Ok(RevealOutcome::Revealed));
        assert_eq!(game.state(), GameState::Started);
        for y in 0..8 {
            for x in 4..8 {
                assert!(!game.tile_at((x, y)).unwrap().is_hidden());
            }
            for x in 0..4 {
                assert!(game.tile_at((x, y)).unwrap().is_hidden());
            }
        }
        assert_eq!(game.tile_at((4, 0)).unwrap().adjacent_count(), 2);
        assert_eq!(game.tile_at((4, 3)).unwrap().adjacent_count(), 3);

        assert_eq!(game.reveal((0, 0), &mut generator), Ok(RevealOutcome::Won));
        assert_eq!(game.state(), GameState::Won);
        assert!(game.ended_at().is_some());
        assert_eq!(count_hidden(game.grid()), 8);
    }

    #[test]
    fn revealing_a_bomb_loses_without_flood() {
        let mut game = new_game();
        game.reveal((7, 7), &mut wall()).unwrap();
        let hidden_before = count_hidden(game.grid());

        assert_eq!(game.reveal((3, 5), &mut wall()), Ok(RevealOutcome::Lost));

        assert_eq!(game.state(), GameState::Lost);
        assert!(game.ended_at().is_some());
        assert_eq!(count_hidden(game.grid()), hidden_before - 1);
        assert_eq!(game.reveal((0, 0), &mut wall()), Err(GameError::AlreadyEnded));
        assert_eq!(game.flag((0, 0)), Err(GameError::AlreadyEnded));
    }

    #[test]
    fn revealing_twice_fails_without_changes() {
        let mut game = new_game();
        let mut generator = wall();
        game.reveal((6, 6), &mut generator).unwrap();
        let before = game.clone();

        let err = game.reveal((5, 5), &mut generator).unwrap_err();

        assert_eq!(err, GameError::AlreadyRevealed((5, 5)));
        assert_eq!(err.kind(), ErrorKind::InvalidState);
        assert_eq!(game, before);
    }

    #[test]
    fn reveal_rejects_out_of_bounds() {
        let mut game = new_game();
        assert_eq!(
            game.reveal((8, 0), &mut wall()),
            Err(GameError::InvalidCoords((8, 0)))
        );
        assert_eq!(game.state(), GameState::Created);
    }

    #[test]
    fn flag_toggles_hidden_tiles() {
        let mut game = new_game();

        assert_eq!(game.flag((1, 2)), Ok(FlagOutcome::Flagged));
        assert!(game.tile_at((1, 2)).unwrap().is_flagged());
        assert_eq!(game.flag_count(), 1);
        assert_eq!(game.flag((1, 2)), Ok(FlagOutcome::Unflagged));
        assert!(!game.tile_at((1, 2)).unwrap().is_flagged());
        assert_eq!(game.state(), GameState::Created);
    }

    #[test]
    fn flag_on_revealed_tile_fails() {
        let mut game = new_game();
        game.reveal((7, 7), &mut wall()).unwrap();

        let err = game.flag((7, 7)).unwrap_err();
        assert_eq!(err, GameError::AlreadyRevealed((7, 7)));
        assert_eq!(err.kind(), ErrorKind::InvalidState);
    }

    #[test]
    fn flags_survive_generation_and_clear_on_reveal() {
        let mut game = new_game();
        let mut generator = wall();
        game.flag((0, 0)).unwrap();
        game.flag((6, 0)).unwrap();
        game.flag((3, 1)).unwrap();

        game.reveal((7, 7), &mut generator).unwrap();

        // flood opened the flagged tile and dropped its flag bit
        let opened = game.tile_at((6, 0)).unwrap();
        assert!(!opened.is_hidden());
        assert!(!opened.contains(Tile::FLAGGED));
        assert!(game.tile_at((3, 1)).unwrap().is_flagged());
        assert_eq!(game.bombs_left(), 6);

        game.reveal((0, 0), &mut generator).unwrap();
        assert!(!game.tile_at((0, 0)).unwrap().contains(Tile::FLAGGED));
    }

    #[test]
    fn propagation_reaches_a_fixed_point() {
        let mut game = new_game();
        game.reveal((2, 4), &mut ReservoirGenerator::from_seed(11)).unwrap();

        let mut grid = game.grid().clone();
        assert_eq!(propagate(&mut grid), 0);
        assert_eq!(&grid, game.grid());
    }

    #[test]
    fn propagation_opens_whole_zero_region() {
        let mut grid = generate_empty((8, 8));
        LayoutGenerator::new([(7, 7)]).generate(&mut grid, (0, 0), 0.0);
        let origin = grid[[0, 0]];
        grid[[0, 0]] = origin.with_hidden(false);

        assert_eq!(propagate(&mut grid), 62);
        assert_eq!(count_hidden(&grid), 1);
    }

    #[test]
    fn zero_density_wins_on_first_reveal() {
        let mut game = Game::new(GameConfig::new((8, 8), 0.0).unwrap()).unwrap();

        let outcome = game.reveal((0, 0), &mut ReservoirGenerator::from_seed(0));

        assert_eq!(outcome, Ok(RevealOutcome::Won));
        assert!(game.started_at().is_some());
        assert!(game.ended_at().is_some());
    }
}
