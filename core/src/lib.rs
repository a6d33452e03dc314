use ndarray::Array2;
use serde::{Deserialize, Serialize};

pub use engine::*;
pub use error::*;
pub use eval::*;
pub use generator::*;
pub use record::*;
pub use serial::*;
pub use tile::*;
pub use types::*;
pub use view::*;

mod engine;
mod error;
mod eval;
mod generator;
mod record;
mod serial;
mod tile;
mod types;
mod view;

/// Row-major board of packed tiles, indexed with [`ToNdIndex::to_nd_index`].
pub type Grid = Array2<Tile>;

/// Fraction of cells that become bombs when nothing else is configured.
pub const DEFAULT_DENSITY: f64 = 0.15;

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub size: Coord2,
    #[serde(default = "default_density")]
    pub density: f64,
}

pub(crate) const fn default_density() -> f64 {
    DEFAULT_DENSITY
}

impl GameConfig {
    pub const fn new_unchecked(size: Coord2, density: f64) -> Self {
        Self { size, density }
    }

    pub fn new(size: Coord2, density: f64) -> Result<Self> {
        let config = Self::new_unchecked(size, density);
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let (width, height) = self.size;
        let range = MIN_SIZE..=MAX_SIZE;
        if !range.contains(&width) || !range.contains(&height) {
            return Err(GameError::InvalidSize(width, height));
        }
        if !(0.0..=1.0).contains(&self.density) {
            return Err(GameError::InvalidDensity(self.density));
        }
        Ok(())
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new_unchecked((MIN_SIZE, MIN_SIZE), DEFAULT_DENSITY)
    }
}
