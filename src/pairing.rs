//! Deciding whether two tiles may be eliminated together, and doing it.
//!
//! A pair is legal when both tiles are live, their values are equal or sum to
//! ten, and nothing live sits between them. "Between" means the unit-step
//! walk along the row, column or diagonal joining them when they are aligned.
//! When they are not aligned the board is read as one flattened row-major
//! sequence, so the end of a row connects to the start of the next.

use log::trace;

use crate::{
    board::Board,
    tile::{Tile, EMPTY, PAIR_SUM},
};

/// The value rule on its own: non-empty values that match or sum to ten.
pub fn can_pair_values(a: u8, b: u8) -> bool {
    a != EMPTY && b != EMPTY && (a == b || a.checked_add(b) == Some(PAIR_SUM))
}

/// `true` when `a` and `b` may be eliminated from `board`. Never mutates.
pub fn evaluate_pairing(a: &Tile, b: &Tile, board: &Board) -> bool {
    board.check_pair(a, b).is_ok()
}

/// Eliminate `a` and `b` if legal.
///
/// Returns `(true, updated)` on success. On any failure, including a missing
/// selection, returns `(false, board.clone())` with every tile unchanged.
pub fn commit_pairing(a: Option<&Tile>, b: Option<&Tile>, board: &Board) -> (bool, Board) {
    match board.try_match(a, b) {
        Ok(updated) => (true, updated),
        Err(_) => (false, board.clone()),
    }
}

impl Board {
    /// Resolve a caller's tile reference against the current board.
    ///
    /// The caller's copy may be stale; liveness is always read from the board.
    fn resolve(&self, tile: &Tile) -> Result<(usize, &Tile), Error> {
        let found = self
            .index_of(tile.row, tile.col)
            .and_then(|idx| self.slot(idx).map(|current| (idx, current)));
        match found {
            Some((idx, current)) if current.id == tile.id => Ok((idx, current)),
            _ => Err(Error::NotOnBoard {
                row: tile.row,
                col: tile.col,
            }),
        }
    }

    /// Linear index of the first live tile strictly between slots `from` and `to`, if any.
    fn first_blocker(&self, from: usize, to: usize) -> Option<usize> {
        let cols = self.cols();
        let (lo, hi) = if from < to { (from, to) } else { (to, from) };
        let (lo_row, lo_col) = ((lo / cols) as isize, (lo % cols) as isize);
        let (hi_row, hi_col) = ((hi / cols) as isize, (hi % cols) as isize);

        let dr = (hi_row - lo_row).signum();
        let dc = (hi_col - lo_col).signum();
        let straight = (dr == 0 && dc != 0)
            || (dc == 0 && dr != 0)
            || (dr != 0 && (hi_row - lo_row).abs() == (hi_col - lo_col).abs());

        let is_blocker = |idx: &usize| self.slot(*idx).is_some_and(Tile::is_live);

        if straight {
            let (mut row, mut col) = (lo_row + dr, lo_col + dc);
            while (row, col) != (hi_row, hi_col) {
                let idx = (row * cols as isize + col) as usize;
                if is_blocker(&idx) {
                    return Some(idx);
                }
                row += dr;
                col += dc;
            }
            None
        } else {
            (lo + 1..hi).find(is_blocker)
        }
    }

    /// Check every pairing rule for `a` and `b` without changing anything.
    pub fn check_pair(&self, a: &Tile, b: &Tile) -> Result<(), Error> {
        let (a_idx, a) = self.resolve(a)?;
        let (b_idx, b) = self.resolve(b)?;

        if a.id == b.id {
            return Err(Error::SameTile {
                row: a.row,
                col: a.col,
            });
        }
        for tile in [a, b] {
            if !tile.is_live() {
                return Err(Error::NotLive {
                    row: tile.row,
                    col: tile.col,
                });
            }
        }
        if !can_pair_values(a.value, b.value) {
            return Err(Error::Incompatible {
                a: a.value,
                b: b.value,
            });
        }
        if let Some(idx) = self.first_blocker(a_idx, b_idx) {
            let (row, col) = (idx / self.cols(), idx % self.cols());
            return Err(Error::Blocked { row, col });
        }
        Ok(())
    }

    /// Eliminate both tiles in place if the pair is legal.
    ///
    /// On error the board is untouched.
    pub fn eliminate_pair(&mut self, a: &Tile, b: &Tile) -> Result<(), Error> {
        if let Err(err) = self.check_pair(a, b) {
            trace!("rejected pair {} / {}: {err}", a.id, b.id);
            return Err(err);
        }
        // the following lines modify self, so we can't fail past this point
        for tile in [a, b] {
            let idx = tile.index(self.cols());
            self.tiles_mut()[idx].eliminated = true;
        }
        Ok(())
    }

    /// Snapshot form of [`eliminate_pair`][Self::eliminate_pair] that also accepts a missing selection.
    pub fn try_match(&self, a: Option<&Tile>, b: Option<&Tile>) -> Result<Board, Error> {
        let (Some(a), Some(b)) = (a, b) else {
            return Err(Error::NoSelection);
        };
        let mut updated = self.clone();
        updated.eliminate_pair(a, b)?;
        Ok(updated)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("two tiles must be selected")]
    NoSelection,
    #[error("the tile at `({row}, {col})` cannot pair with itself")]
    SameTile { row: usize, col: usize },
    #[error("no such tile at `({row}, {col})` on the current board")]
    NotOnBoard { row: usize, col: usize },
    #[error("the tile at `({row}, {col})` is empty or already eliminated")]
    NotLive { row: usize, col: usize },
    #[error("{a} and {b} are neither equal nor sum to 10")]
    Incompatible { a: u8, b: u8 },
    #[error("the line between the tiles is blocked at `({row}, {col})`")]
    Blocked { row: usize, col: usize },
}
