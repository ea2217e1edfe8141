//! One attempt at a level: the board, the reserve, and the player's
//! selection, add-row budget and clock.

use log::debug;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::{
    board::Board,
    generator::{generate, Reserve},
    inject::RowInjection,
    level::{self, LevelSpec},
    pairing,
    tile::{Tile, TileId},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Active,
    /// Every tile has been eliminated.
    Cleared,
    /// The clock ran out first.
    Failed,
}

/// What happened when a tile was picked.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Pick {
    /// Nothing was selected; now this tile is.
    Selected(TileId),
    /// The selected tile was picked again and is no longer selected.
    Deselected,
    /// The selected tile and this one were eliminated.
    Matched { remaining: usize },
    /// The pair is not legal. The first tile stays selected.
    Rejected(pairing::Error),
}

#[derive(Debug, Clone)]
pub struct Session {
    level: LevelSpec,
    board: Board,
    reserve: Reserve,
    selected: Option<TileId>,
    rows_left: u32,
    seconds_left: u32,
    state: SessionState,
}

impl Session {
    /// Start `level` with values drawn from `rng`.
    pub fn new<R: Rng + ?Sized>(level: &LevelSpec, rng: &mut R) -> Result<Self, Error> {
        level.validate()?;
        let (board, reserve) = generate(level, rng);
        let state = Self::dealt_state(&board);
        Ok(Session {
            level: level.clone(),
            board,
            reserve,
            selected: None,
            rows_left: level.add_row_limit,
            seconds_left: level.timer_seconds,
            state,
        })
    }

    /// Start `level` reproducibly from `seed`.
    pub fn seeded(level: &LevelSpec, seed: u64) -> Result<Self, Error> {
        Self::new(level, &mut ChaCha8Rng::seed_from_u64(seed))
    }

    /// Throw the current attempt away and deal a fresh board for the same level.
    pub fn restart<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let (board, reserve) = generate(&self.level, rng);
        self.board = board;
        self.reserve = reserve;
        self.selected = None;
        self.rows_left = self.level.add_row_limit;
        self.seconds_left = self.level.timer_seconds;
        self.state = Self::dealt_state(&self.board);
        debug!("restarted level {}", self.level.id);
    }

    /// A board dealt with no live tile is already cleared.
    fn dealt_state(board: &Board) -> SessionState {
        if board.is_cleared() {
            SessionState::Cleared
        } else {
            SessionState::Active
        }
    }

    pub fn level(&self) -> &LevelSpec {
        &self.level
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn reserve(&self) -> &Reserve {
        &self.reserve
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn rows_left(&self) -> u32 {
        self.rows_left
    }

    pub fn seconds_left(&self) -> u32 {
        self.seconds_left
    }

    pub fn remaining(&self) -> usize {
        self.board.remaining()
    }

    /// The currently selected tile, as it sits on the board now.
    pub fn selected(&self) -> Option<&Tile> {
        self.selected.and_then(|id| self.board.find(id))
    }

    fn ensure_active(&self) -> Result<(), Error> {
        match self.state {
            SessionState::Active => Ok(()),
            state => Err(Error::NotActive(state)),
        }
    }

    /// Pick the tile at `(row, col)`.
    ///
    /// The first pick selects. Picking the selected tile again deselects it.
    /// Any other pick tries to eliminate the pair and, if that works, clears
    /// the selection.
    pub fn pick(&mut self, row: usize, col: usize) -> Result<Pick, Error> {
        self.ensure_active()?;
        let tile = *self.board.get(row, col).ok_or(Error::OutOfBounds {
            row,
            col,
            rows: self.board.rows(),
            cols: self.board.cols(),
        })?;

        let Some(first) = self.selected().copied() else {
            self.selected = Some(tile.id);
            return Ok(Pick::Selected(tile.id));
        };
        if first.id == tile.id {
            self.selected = None;
            return Ok(Pick::Deselected);
        }

        if let Err(err) = self.board.eliminate_pair(&first, &tile) {
            return Ok(Pick::Rejected(err));
        }
        self.selected = None;
        let remaining = self.board.remaining();
        if remaining == 0 {
            self.state = SessionState::Cleared;
            debug!("level {} cleared", self.level.id);
        }
        Ok(Pick::Matched { remaining })
    }

    /// Inject a row from the reserve, spending one unit of the level's add-row budget.
    ///
    /// The budget is only spent when a row was actually added.
    pub fn add_row(&mut self) -> Result<RowInjection, Error> {
        self.ensure_active()?;
        if self.rows_left == 0 {
            return Err(Error::AddRowBudgetExhausted);
        }
        let injection = self.board.inject_row(&mut self.reserve);
        if injection == RowInjection::Exhausted {
            return Err(Error::ReserveExhausted);
        }
        self.rows_left -= 1;
        Ok(injection)
    }

    /// Let `seconds` pass on the level clock.
    pub fn tick(&mut self, seconds: u32) -> SessionState {
        if self.state == SessionState::Active {
            self.seconds_left = self.seconds_left.saturating_sub(seconds);
            if self.seconds_left == 0 {
                self.state = SessionState::Failed;
                debug!(
                    "level {} failed with {} tiles left",
                    self.level.id,
                    self.remaining()
                );
            }
        }
        self.state
    }
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("the session is over: {0:?}")]
    NotActive(SessionState),
    #[error("the point `({row}, {col})` is out of bounds. max: `({rows}, {cols})`")]
    OutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },
    #[error("no add-row uses left for this level")]
    AddRowBudgetExhausted,
    #[error("the reserve has no values left to add")]
    ReserveExhausted,
    #[error(transparent)]
    Level(#[from] level::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiny() -> LevelSpec {
        LevelSpec::new(1, "Tiny", 3, 3, 1, 2, 30).unwrap()
    }

    #[test]
    fn seeded_sessions_match() {
        let a = Session::seeded(&tiny(), 11).unwrap();
        let b = Session::seeded(&tiny(), 11).unwrap();
        assert_eq!(a.board(), b.board());
        assert_eq!(a.reserve(), b.reserve());
        assert_eq!(a.rows_left(), 2);
        assert_eq!(a.seconds_left(), 30);
        assert_eq!(a.state(), SessionState::Active);
    }

    #[test]
    fn rejects_invalid_level() {
        let mut level = tiny();
        level.initial_filled_rows = 3;
        assert!(matches!(
            Session::seeded(&level, 0),
            Err(Error::Level(level::Error::NoEmptyRows { .. }))
        ));
    }

    #[test]
    fn blank_deal_is_already_cleared() {
        let level = LevelSpec::new(1, "Blank", 3, 3, 0, 1, 60).unwrap();
        let mut session = Session::seeded(&level, 4).unwrap();
        assert_eq!(session.remaining(), 0);
        assert_eq!(session.state(), SessionState::Cleared);
        assert!(matches!(
            session.pick(0, 0),
            Err(Error::NotActive(SessionState::Cleared))
        ));

        session.restart(&mut ChaCha8Rng::seed_from_u64(9));
        assert_eq!(session.state(), SessionState::Cleared);
    }

    #[test]
    fn pick_toggles_selection() {
        let mut session = Session::seeded(&tiny(), 3).unwrap();
        let id = session.board().get(0, 0).unwrap().id;
        assert_eq!(session.pick(0, 0).unwrap(), Pick::Selected(id));
        assert_eq!(session.selected().map(|tile| tile.id), Some(id));
        assert_eq!(session.pick(0, 0).unwrap(), Pick::Deselected);
        assert!(session.selected().is_none());
    }

    #[test]
    fn rejected_pick_keeps_selection() {
        let mut session = Session::seeded(&tiny(), 3).unwrap();
        session.pick(0, 0).unwrap();
        // row 2 starts empty
        assert!(matches!(
            session.pick(2, 2).unwrap(),
            Pick::Rejected(pairing::Error::NotLive { row: 2, col: 2 })
        ));
        assert_eq!(session.selected().map(|tile| (tile.row, tile.col)), Some((0, 0)));
    }

    #[test]
    fn out_of_bounds_pick() {
        let mut session = Session::seeded(&tiny(), 3).unwrap();
        assert!(matches!(
            session.pick(3, 0),
            Err(Error::OutOfBounds { row: 3, col: 0, .. })
        ));
    }

    #[test]
    fn add_row_spends_budget() {
        let mut session = Session::seeded(&tiny(), 5).unwrap();
        assert!(matches!(
            session.add_row().unwrap(),
            RowInjection::Filled { row: 1, consumed: 3 }
        ));
        assert_eq!(session.rows_left(), 1);
        assert_eq!(session.reserve().len(), 3);
        session.add_row().unwrap();
        assert_eq!(session.rows_left(), 0);
        assert!(matches!(session.add_row(), Err(Error::AddRowBudgetExhausted)));
    }

    #[test]
    fn empty_reserve_does_not_spend_budget() {
        let level = LevelSpec::new(1, "Roomy", 2, 2, 1, 5, 30).unwrap();
        let mut session = Session::seeded(&level, 5).unwrap();
        session.add_row().unwrap();
        assert_eq!(session.rows_left(), 4);
        assert!(matches!(session.add_row(), Err(Error::ReserveExhausted)));
        assert_eq!(session.rows_left(), 4);
    }

    #[test]
    fn clock_fails_the_session() {
        let mut session = Session::seeded(&tiny(), 1).unwrap();
        assert_eq!(session.tick(29), SessionState::Active);
        assert_eq!(session.tick(5), SessionState::Failed);
        assert_eq!(session.seconds_left(), 0);
        assert!(matches!(
            session.pick(0, 0),
            Err(Error::NotActive(SessionState::Failed))
        ));
        assert!(matches!(session.add_row(), Err(Error::NotActive(_))));

        session.restart(&mut ChaCha8Rng::seed_from_u64(2));
        assert_eq!(session.state(), SessionState::Active);
        assert_eq!(session.seconds_left(), 30);
        assert_eq!(session.rows_left(), 2);
    }
}
