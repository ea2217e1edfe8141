use std::collections::VecDeque;

use log::debug;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::{
    board::Board,
    level::LevelSpec,
    tile::{EMPTY, MAX_VALUE, MIN_VALUE},
};

/// Queue of values waiting to be injected as new rows, consumed front first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reserve(VecDeque<u8>);

impl Reserve {
    pub fn new(values: impl IntoIterator<Item = u8>) -> Self {
        Reserve(values.into_iter().collect())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The next value to be injected, without consuming it.
    pub fn peek(&self) -> Option<u8> {
        self.0.front().copied()
    }

    pub fn pop(&mut self) -> Option<u8> {
        self.0.pop_front()
    }

    pub fn iter(&self) -> impl Iterator<Item = u8> + '_ {
        self.0.iter().copied()
    }
}

fn random_value<R: Rng + ?Sized>(rng: &mut R) -> u8 {
    rng.gen_range(MIN_VALUE..=MAX_VALUE)
}

/// Build the starting board and reserve for `level`.
///
/// The top `initial_filled_rows` rows get uniformly random values in `1..=9`,
/// the rest start empty. The reserve holds one value for every slot that
/// starts empty. Values are drawn from `rng`, so a seeded generator makes the
/// whole game reproducible.
pub fn generate<R: Rng + ?Sized>(level: &LevelSpec, rng: &mut R) -> (Board, Reserve) {
    let board = Board::from_fn(level.rows, level.cols, |row, _| {
        if row < level.initial_filled_rows {
            random_value(rng)
        } else {
            EMPTY
        }
    });
    let reserve = Reserve::new((0..level.reserve_len()).map(|_| random_value(rng)));
    debug!(
        "generated level {} ({}x{}), {} tiles live, {} in reserve",
        level.id,
        level.rows,
        level.cols,
        board.remaining(),
        reserve.len()
    );
    (board, reserve)
}

impl Board {
    /// See [`generate`].
    pub fn generate<R: Rng + ?Sized>(level: &LevelSpec, rng: &mut R) -> (Board, Reserve) {
        generate(level, rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::LevelCatalog;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::collections::HashSet;

    #[test]
    fn same_seed_same_game() {
        let level = LevelCatalog::builtin().first().clone();
        let a = generate(&level, &mut ChaCha8Rng::seed_from_u64(7));
        let b = generate(&level, &mut ChaCha8Rng::seed_from_u64(7));
        assert_eq!(a, b);
    }

    #[test]
    fn reserve_is_fifo() {
        let mut reserve = Reserve::new([3, 1, 4]);
        assert_eq!(reserve.peek(), Some(3));
        assert_eq!(reserve.pop(), Some(3));
        assert_eq!(reserve.pop(), Some(1));
        assert_eq!(reserve.len(), 1);
        assert_eq!(reserve.pop(), Some(4));
        assert_eq!(reserve.pop(), None);
        assert!(reserve.is_empty());
    }

    #[test]
    fn tiles_and_reserve_survive_a_json_snapshot() {
        let level = LevelCatalog::builtin().first().clone();
        let (board, reserve) = generate(&level, &mut ChaCha8Rng::seed_from_u64(21));

        let json = serde_json::to_string(&(board.tiles(), &reserve)).unwrap();
        let (tiles, mut restored): (Vec<crate::tile::Tile>, Reserve) =
            serde_json::from_str(&json).unwrap();

        assert_eq!(tiles.as_slice(), board.tiles());
        assert_eq!(restored, reserve);
        // queue order survives
        let drained: Vec<u8> = std::iter::from_fn(|| restored.pop()).collect();
        assert_eq!(drained, reserve.iter().collect::<Vec<_>>());
    }

    proptest! {
        #[test]
        fn generation_invariants(
            cols in 1usize..12,
            rows in 1usize..14,
            filled_frac in 0.0f64..1.0,
            seed in any::<u64>(),
        ) {
            let filled = ((rows as f64) * filled_frac) as usize;
            prop_assume!(filled < rows);
            let level = LevelSpec::new(1, "prop", cols, rows, filled, 3, 60).unwrap();
            let (board, reserve) = generate(&level, &mut ChaCha8Rng::seed_from_u64(seed));

            prop_assert_eq!(board.tiles().len(), rows * cols);
            prop_assert_eq!(reserve.len(), cols * (rows - filled));
            prop_assert!(reserve.iter().all(|v| (MIN_VALUE..=MAX_VALUE).contains(&v)));

            for tile in board.tiles() {
                prop_assert!(!tile.eliminated);
                if tile.row < filled {
                    prop_assert!((MIN_VALUE..=MAX_VALUE).contains(&tile.value));
                } else {
                    prop_assert_eq!(tile.value, EMPTY);
                }
            }

            let ids: HashSet<_> = board.tiles().iter().map(|tile| tile.id).collect();
            prop_assert_eq!(ids.len(), board.tiles().len());
        }
    }
}
