//! Text form of a grid: row-major decimal tile values joined by commas.

use core::fmt::Write;

use ndarray::Array2;

use crate::*;

/// Upper bound on the persisted text, a 32x32 board of 3-digit tiles plus separators fits.
pub const MAX_STATE_LEN: usize = 4 * (MAX_SIZE as usize) * (MAX_SIZE as usize);

const SEPARATOR: char = ',';

pub fn serialize(grid: &Grid) -> String {
    let mut text = String::with_capacity(grid.len() * 4);
    for (i, tile) in grid.iter().enumerate() {
        if i > 0 {
            text.push(SEPARATOR);
        }
        // writing into a String cannot fail
        let _ = write!(text, "{}", tile.bits());
    }
    text
}

pub fn deserialize(text: &str, (width, height): Coord2) -> Result<Grid> {
    if text.len() > MAX_STATE_LEN {
        return Err(GameError::StateTooLong(text.len()));
    }

    let tiles = text
        .split(SEPARATOR)
        .map(parse_tile)
        .collect::<Result<Vec<_>>>()?;

    let expected = usize::from(width) * usize::from(height);
    let actual = tiles.len();
    if actual != expected {
        return Err(GameError::TileCountMismatch { expected, actual });
    }

    Array2::from_shape_vec((usize::from(height), usize::from(width)), tiles)
        .map_err(|_| GameError::TileCountMismatch { expected, actual })
}

/// Only plain decimal digits are accepted, no sign or whitespace.
fn parse_tile(token: &str) -> Result<Tile> {
    if token.is_empty() || !token.bytes().all(|b| b.is_ascii_digit()) {
        return Err(GameError::InvalidTileToken(token.into()));
    }
    token
        .parse::<u8>()
        .map(Tile::from_bits_retain)
        .map_err(|_| GameError::InvalidTileToken(token.into()))
}
