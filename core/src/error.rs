use thiserror::Error;

use crate::{Coord, Coord2};

/// Broad category of a [`GameError`], what a delivery layer needs to pick a response.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidArgument,
    Format,
    InvalidState,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GameError {
    #[error("Adjacent count {0} does not fit in 4 bits")]
    AdjacentOutOfRange(u8),
    #[error("Board size {0}x{1} is outside the supported range")]
    InvalidSize(Coord, Coord),
    #[error("Bomb density {0} must be within 0 and 1")]
    InvalidDensity(f64),
    #[error("Invalid coordinates {0:?}")]
    InvalidCoords(Coord2),
    #[error("Expected {expected} tiles but found {actual}")]
    TileCountMismatch { expected: usize, actual: usize },
    #[error("Invalid tile value {0:?}")]
    InvalidTileToken(String),
    #[error("Serialized state is {0} characters, above the storage limit")]
    StateTooLong(usize),
    #[error("Tile at {0:?} is already revealed")]
    AlreadyRevealed(Coord2),
    #[error("Game already ended, no new moves are accepted")]
    AlreadyEnded,
}

impl GameError {
    pub const fn kind(&self) -> ErrorKind {
        use GameError::*;
        match self {
            AdjacentOutOfRange(_) | InvalidSize(..) | InvalidDensity(_) | InvalidCoords(_) => {
                ErrorKind::InvalidArgument
            }
            TileCountMismatch { .. } | InvalidTileToken(_) | StateTooLong(_) => ErrorKind::Format,
            AlreadyRevealed(_) | AlreadyEnded => ErrorKind::InvalidState,
        }
    }
}

pub type Result<T> = core::result::Result<T, GameError>;
