use std::fmt;

use crate::{
    grid::Grid,
    tile::{Tile, TileId, MAX_VALUE},
};

/// A rectangular board of tiles, stored flat in row-major order.
///
/// Every slot always holds exactly one tile; the board never changes size.
/// Boards are cheap to clone, and the pairing and injection operations can
/// be used either in place or as snapshot-to-snapshot functions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    tiles: Grid<Tile>,
    next_id: u64,
}

impl Board {
    /// Build a board from row-major values, `0` meaning empty.
    ///
    /// Tile identities are assigned `0, 1, 2, ...` in slot order. Fails when
    /// `values` does not fill a whole, non-zero number of rows of width
    /// `cols`, or holds a value above 9.
    pub fn from_values(cols: usize, values: &[u8]) -> Result<Self, Error> {
        if cols == 0 {
            return Err(Error::ZeroColumns);
        }
        if values.is_empty() || values.len() % cols != 0 {
            return Err(Error::Ragged {
                len: values.len(),
                cols,
            });
        }
        if let Some(idx) = values.iter().position(|&value| value > MAX_VALUE) {
            return Err(Error::ValueOutOfRange {
                row: idx / cols,
                col: idx % cols,
                value: values[idx],
            });
        }
        let rows = values.len() / cols;
        Ok(Self::from_fn(rows, cols, |row, col| values[row * cols + col]))
    }

    /// Build a board by asking `value(row, col)` for each slot in row-major order.
    pub(crate) fn from_fn(
        rows: usize,
        cols: usize,
        mut value: impl FnMut(usize, usize) -> u8,
    ) -> Self {
        let tiles = Grid::from_fn(rows, cols, |row, col| {
            let id = TileId((row * cols + col) as u64);
            Tile::new(id, row, col, value(row, col))
        });
        let next_id = tiles.len() as u64;
        Board { tiles, next_id }
    }

    pub fn rows(&self) -> usize {
        self.tiles.rows()
    }

    pub fn cols(&self) -> usize {
        self.tiles.cols()
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&Tile> {
        self.tiles.get(row, col)
    }

    /// Linear slot index of `(row, col)`, or `None` when off the board.
    pub fn index_of(&self, row: usize, col: usize) -> Option<usize> {
        self.tiles.idx(row, col)
    }

    /// The tile at a linear slot index.
    pub fn slot(&self, idx: usize) -> Option<&Tile> {
        self.tiles.as_slice().get(idx)
    }

    pub fn row(&self, row: usize) -> Option<&[Tile]> {
        self.tiles.row(row)
    }

    /// All tiles, row-major.
    pub fn tiles(&self) -> &[Tile] {
        self.tiles.as_slice()
    }

    pub fn find(&self, id: TileId) -> Option<&Tile> {
        self.tiles.iter().find(|tile| tile.id == id)
    }

    /// Count of tiles that are neither empty nor eliminated.
    pub fn remaining(&self) -> usize {
        self.tiles.iter().filter(|tile| tile.is_live()).count()
    }

    /// `true` once no live tile remains.
    pub fn is_cleared(&self) -> bool {
        self.remaining() == 0
    }

    /// `true` when no tile in `row` is live.
    pub fn is_row_spent(&self, row: usize) -> bool {
        self.tiles
            .row(row)
            .map(|tiles| tiles.iter().all(|tile| !tile.is_live()))
            .unwrap_or(false)
    }

    pub(crate) fn tiles_mut(&mut self) -> &mut Grid<Tile> {
        &mut self.tiles
    }

    /// Hand out an identity no tile on this board has ever carried.
    pub(crate) fn alloc_id(&mut self) -> TileId {
        let id = TileId(self.next_id);
        self.next_id += 1;
        id
    }
}

/// Number of live tiles left on `board`; the level is complete at zero.
pub fn count_remaining(board: &Board) -> usize {
    board.remaining()
}

impl fmt::Display for Board {
    /// One line per row: digits for live tiles, `x` for eliminated, `.` for empty.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.rows() {
            for tile in self.tiles.row(row).unwrap_or_default() {
                let glyph = if tile.is_empty() {
                    '.'
                } else if tile.eliminated {
                    'x'
                } else {
                    char::from(b'0' + tile.value)
                };
                write!(f, "{glyph}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("a board needs at least one column")]
    ZeroColumns,
    #[error("{len} values do not fill whole rows of {cols}")]
    Ragged { len: usize, cols: usize },
    #[error("the value {value} at `({row}, {col})` is above 9")]
    ValueOutOfRange { row: usize, col: usize, value: u8 },
}
