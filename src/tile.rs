use serde::{Deserialize, Serialize};

/// Stable identity of a tile.
///
/// Identities are handed out by the board that owns the tile and survive the
/// tile being moved by a row shift; only its position changes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TileId(pub u64);

impl std::fmt::Display for TileId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The value carried by an empty slot.
pub const EMPTY: u8 = 0;

/// Smallest and largest values a live tile may carry.
pub const MIN_VALUE: u8 = 1;
pub const MAX_VALUE: u8 = 9;

/// Two values pair when they are equal or add up to this.
pub const PAIR_SUM: u8 = 10;

/// One slot's occupant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    pub id: TileId,
    pub row: usize,
    pub col: usize,
    /// `1..=9`, or [`EMPTY`].
    pub value: u8,
    pub eliminated: bool,
}

impl Tile {
    pub fn new(id: TileId, row: usize, col: usize, value: u8) -> Self {
        Tile {
            id,
            row,
            col,
            value,
            eliminated: false,
        }
    }

    pub fn empty(id: TileId, row: usize, col: usize) -> Self {
        Self::new(id, row, col, EMPTY)
    }

    pub fn is_empty(&self) -> bool {
        self.value == EMPTY
    }

    /// A live tile still has a value and has not been eliminated.
    ///
    /// Only live tiles may be paired, and only live tiles block line of sight.
    pub fn is_live(&self) -> bool {
        !self.is_empty() && !self.eliminated
    }

    /// Linear slot index of this tile on a board `cols` wide.
    pub fn index(&self, cols: usize) -> usize {
        self.row * cols + self.col
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(5, false, true)]
    #[case(5, true, false)]
    #[case(EMPTY, false, false)]
    #[case(EMPTY, true, false)]
    fn liveness(#[case] value: u8, #[case] eliminated: bool, #[case] live: bool) {
        let mut tile = Tile::new(TileId(0), 0, 0, value);
        tile.eliminated = eliminated;
        assert_eq!(tile.is_live(), live);
    }

    #[test]
    fn index_is_row_major() {
        let tile = Tile::new(TileId(7), 2, 3, 4);
        assert_eq!(tile.index(5), 13);
    }
}
