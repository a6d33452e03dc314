use bitflags::bitflags;

use crate::GameError;

bitflags! {
    /// Packed state of a single cell.
    ///
    /// From the highest bit down: hidden, flagged, bomb, then an unused bit and the 4-bit adjacent
    /// bomb count. Any `u8` is a valid tile, unknown bits are retained as-is.
    #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
    pub struct Tile: u8 {
        const HIDDEN   = 1 << 7;
        const FLAGGED  = 1 << 6;
        const BOMB     = 1 << 5;
        const ADJACENT = 0b0000_1111;
    }
}

impl Tile {
    /// Fresh hidden tile of a placeholder board.
    pub const PLACEHOLDER: Tile = Tile::HIDDEN;

    /// Composes a tile, `count` is truncated to its 4-bit field.
    pub const fn new(hidden: bool, flagged: bool, bomb: bool, count: u8) -> Self {
        let mut bits = count & Self::ADJACENT.bits();
        if hidden {
            bits |= Self::HIDDEN.bits();
        }
        if flagged {
            bits |= Self::FLAGGED.bits();
        }
        if bomb {
            bits |= Self::BOMB.bits();
        }
        Self::from_bits_retain(bits)
    }

    pub const fn is_hidden(self) -> bool {
        self.contains(Self::HIDDEN)
    }

    /// A flag only counts while the tile is hidden, a stale flag bit on a revealed tile is ignored.
    pub const fn is_flagged(self) -> bool {
        self.is_hidden() && self.contains(Self::FLAGGED)
    }

    pub const fn is_bomb(self) -> bool {
        self.contains(Self::BOMB)
    }

    pub const fn adjacent_count(self) -> u8 {
        self.bits() & Self::ADJACENT.bits()
    }

    pub fn with_hidden(self, value: bool) -> Self {
        self.with(Self::HIDDEN, value)
    }

    pub fn with_flagged(self, value: bool) -> Self {
        self.with(Self::FLAGGED, value)
    }

    pub fn with_bomb(self, value: bool) -> Self {
        self.with(Self::BOMB, value)
    }

    /// Replaces the adjacent count, keeping the upper 4 bits.
    pub fn with_adjacent(self, count: u8) -> crate::Result<Self> {
        if count > Self::ADJACENT.bits() {
            return Err(GameError::AdjacentOutOfRange(count));
        }
        let upper = self.bits() & !Self::ADJACENT.bits();
        Ok(Self::from_bits_retain(upper | count))
    }

    /// What a player may see of this tile while the game is running.
    ///
    /// Hidden tiles only expose hidden and flag state, revealed tiles expose bomb and count but never
    /// a leftover flag bit.
    pub fn masked(self) -> Self {
        if self.is_hidden() {
            Self::new(true, self.is_flagged(), false, 0)
        } else {
            Self::new(false, false, self.is_bomb(), self.adjacent_count())
        }
    }

    fn with(self, flag: Self, value: bool) -> Self {
        let mut tile = self;
        tile.set(flag, value);
        tile
    }
}

impl From<u8> for Tile {
    fn from(bits: u8) -> Self {
        Self::from_bits_retain(bits)
    }
}

impl From<Tile> for u8 {
    fn from(tile: Tile) -> Self {
        tile.bits()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tile(bits: u8) -> Tile {
        Tile::from_bits_retain(bits)
    }

    #[test]
    fn encodes_known_values() {
        assert_eq!(Tile::new(true, false, false, 0).bits(), 128);
        assert_eq!(Tile::empty().with_flagged(true).bits(), 64);
        assert_eq!(Tile::empty().with_bomb(true).bits(), 32);
        assert_eq!(Tile::empty().with_bomb(true).with_hidden(true).bits(), 160);
        assert_eq!(tile(255).with_flagged(false).bits(), 191);
        assert_eq!(tile(255).with_flagged(true).bits(), 255);
    }

    #[test]
    fn bit_queries() {
        assert!(tile(255).is_hidden());
        assert!(tile(128).is_hidden());
        assert!(!tile(127).is_hidden());
        assert!(tile(255).is_bomb());
        assert!(tile(32).is_bomb());
        assert!(!tile(223).is_bomb());
        assert!(!tile(0).is_bomb());
        assert_eq!(tile(0b1010_0111).adjacent_count(), 7);
    }

    #[test]
    fn flag_requires_hidden() {
        assert!(tile(255).is_flagged());
        assert!(tile(192).is_flagged());
        assert!(!tile(64).is_flagged());
        assert!(!tile(191).is_flagged());
        assert!(!tile(0).is_flagged());
    }

    #[test]
    fn setting_one_field_leaves_the_others() {
        for bits in 0..=u8::MAX {
            let base = tile(bits);
            for value in [false, true] {
                let hidden = base.with_hidden(value);
                assert_eq!(hidden.contains(Tile::FLAGGED), base.contains(Tile::FLAGGED));
                assert_eq!(hidden.is_bomb(), base.is_bomb());
                assert_eq!(hidden.adjacent_count(), base.adjacent_count());

                let flagged = base.with_flagged(value);
                assert_eq!(flagged.is_hidden(), base.is_hidden());
                assert_eq!(flagged.is_bomb(), base.is_bomb());
                assert_eq!(flagged.adjacent_count(), base.adjacent_count());

                let bomb = base.with_bomb(value);
                assert_eq!(bomb.is_hidden(), base.is_hidden());
                assert_eq!(bomb.contains(Tile::FLAGGED), base.contains(Tile::FLAGGED));
                assert_eq!(bomb.adjacent_count(), base.adjacent_count());
            }
        }
    }

    #[test]
    fn new_truncates_count() {
        assert_eq!(Tile::new(false, false, false, 0x1f).adjacent_count(), 0x0f);
        assert_eq!(Tile::new(false, false, true, 0x13).bits(), 0b0010_0011);
    }

    #[test]
    fn with_adjacent_rejects_overflow() {
        assert_eq!(
            Tile::PLACEHOLDER.with_adjacent(16),
            Err(GameError::AdjacentOutOfRange(16))
        );
        assert_eq!(tile(0xf0).with_adjacent(3).unwrap().bits(), 0xf3);
        assert_eq!(tile(0xff).with_adjacent(0).unwrap().bits(), 0xf0);
    }

    #[test]
    fn masking_hides_internals_of_hidden_tiles() {
        let hidden_bomb = Tile::new(true, true, true, 3);
        assert_eq!(hidden_bomb.masked().bits(), 0b1100_0000);

        let revealed = Tile::new(false, true, false, 2);
        assert_eq!(revealed.masked().bits(), 2);

        assert_eq!(Tile::PLACEHOLDER.masked().bits(), 128);
    }
}
