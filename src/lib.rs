//! Rules engine for a number-pairing puzzle.
//!
//! Tiles carrying `1..=9` sit on a rectangular board. Two live tiles can be
//! eliminated together when their values are equal or sum to ten and no live
//! tile stands between them. When the player runs out of moves a new row is
//! pulled from the [`Reserve`]; if no row is free the board shifts up and the
//! top row is lost.

mod board;
mod generator;
mod grid;
mod inject;
mod level;
mod pairing;
mod session;
mod tile;

pub use board::{count_remaining, Board, Error as BoardError};
pub use generator::{generate, Reserve};
pub use grid::Grid;
pub use inject::{inject_row, RowInjection};
pub use level::{Error as LevelError, LevelCatalog, LevelSpec};
pub use pairing::{can_pair_values, commit_pairing, evaluate_pairing, Error as MatchError};
pub use session::{Error as SessionError, Pick, Session, SessionState};
pub use tile::{Tile, TileId, EMPTY, MAX_VALUE, MIN_VALUE, PAIR_SUM};
