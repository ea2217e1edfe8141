use log::debug;

use crate::{board::Board, generator::Reserve, tile::Tile};

/// What a call to [`Board::inject_row`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowInjection {
    /// The reserve was empty; nothing changed.
    Exhausted,
    /// Values were written into an existing spent row.
    Filled { row: usize, consumed: usize },
    /// No row was spent, so the board shifted up by one row before the bottom
    /// row was filled. `discarded` holds the old top row.
    Compacted { consumed: usize, discarded: Vec<Tile> },
}

impl RowInjection {
    /// Number of reserve values written to the board.
    pub fn consumed(&self) -> usize {
        match self {
            RowInjection::Exhausted => 0,
            RowInjection::Filled { consumed, .. } | RowInjection::Compacted { consumed, .. } => {
                *consumed
            }
        }
    }
}

impl Board {
    /// Drop the top row and move every row up by one, leaving an empty bottom row.
    ///
    /// Surviving tiles keep their identity and take their new position. The
    /// new bottom row is made of fresh empty tiles.
    fn compact(&mut self) -> Vec<Tile> {
        let (rows, cols) = (self.rows(), self.cols());
        let last = rows - 1;
        let fresh: Vec<Tile> = (0..cols)
            .map(|col| Tile::empty(self.alloc_id(), last, col))
            .collect();

        let tiles = self.tiles_mut();
        let discarded = tiles.shift_up(fresh);
        for (idx, tile) in tiles.iter_mut().enumerate() {
            tile.row = idx / cols;
            tile.col = idx % cols;
        }
        discarded
    }

    /// Add one row of tiles taken from the front of `reserve`.
    ///
    /// The values go into the topmost row with no live tile. When every row
    /// still has a live tile the board is compacted first and the values go
    /// into the bottom row. Slots are filled left to right until the row is
    /// full or the reserve runs out. An empty reserve is a no-op.
    pub fn inject_row(&mut self, reserve: &mut Reserve) -> RowInjection {
        if reserve.is_empty() || self.tiles().is_empty() {
            return RowInjection::Exhausted;
        }

        let spent = (0..self.rows()).find(|&row| self.is_row_spent(row));
        let (target, discarded) = match spent {
            Some(row) => (row, None),
            None => (self.rows() - 1, Some(self.compact())),
        };

        let mut consumed = 0;
        if let Some(slots) = self.tiles_mut().row_mut(target) {
            for tile in slots {
                let Some(value) = reserve.pop() else {
                    break;
                };
                tile.value = value;
                tile.eliminated = false;
                consumed += 1;
            }
        }

        match discarded {
            Some(discarded) => {
                debug!(
                    "board full; dropped top row and filled bottom row with {consumed} values, {} left",
                    reserve.len()
                );
                RowInjection::Compacted {
                    consumed,
                    discarded,
                }
            }
            None => {
                debug!(
                    "filled row {target} with {consumed} values, {} left",
                    reserve.len()
                );
                RowInjection::Filled {
                    row: target,
                    consumed,
                }
            }
        }
    }
}

/// Snapshot form of [`Board::inject_row`].
pub fn inject_row(board: &Board, reserve: &Reserve) -> (Board, Reserve) {
    let (mut board, mut reserve) = (board.clone(), reserve.clone());
    board.inject_row(&mut reserve);
    (board, reserve)
}
