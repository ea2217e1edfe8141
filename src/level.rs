//! Level parameters and the catalog they are looked up from.

use serde::{Deserialize, Serialize};

/// Immutable description of one level.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelSpec {
    pub id: u32,
    pub name: String,
    pub cols: usize,
    pub rows: usize,
    /// Rows filled at generation, counted from the top.
    pub initial_filled_rows: usize,
    /// How many times a new row may be injected during one session.
    pub add_row_limit: u32,
    pub timer_seconds: u32,
}

impl LevelSpec {
    /// Construct a level, checking that it leaves at least one empty row.
    pub fn new(
        id: u32,
        name: impl Into<String>,
        cols: usize,
        rows: usize,
        initial_filled_rows: usize,
        add_row_limit: u32,
        timer_seconds: u32,
    ) -> Result<Self, Error> {
        let level = LevelSpec {
            id,
            name: name.into(),
            cols,
            rows,
            initial_filled_rows,
            add_row_limit,
            timer_seconds,
        };
        level.validate()?;
        Ok(level)
    }

    pub fn validate(&self) -> Result<(), Error> {
        if self.cols == 0 {
            return Err(Error::ZeroColumns { id: self.id });
        }
        if self.rows == 0 {
            return Err(Error::ZeroRows { id: self.id });
        }
        if self.initial_filled_rows >= self.rows {
            return Err(Error::NoEmptyRows {
                id: self.id,
                filled: self.initial_filled_rows,
                rows: self.rows,
            });
        }
        Ok(())
    }

    /// Number of slots on this level's board.
    pub fn slots(&self) -> usize {
        self.rows * self.cols
    }

    /// Number of values held back in the reserve at generation.
    pub fn reserve_len(&self) -> usize {
        self.cols * self.rows.saturating_sub(self.initial_filled_rows)
    }
}

/// Ordered list of levels, played first to last.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<LevelSpec>")]
pub struct LevelCatalog(Vec<LevelSpec>);

impl TryFrom<Vec<LevelSpec>> for LevelCatalog {
    type Error = Error;

    fn try_from(levels: Vec<LevelSpec>) -> Result<Self, Self::Error> {
        Self::new(levels)
    }
}

impl LevelCatalog {
    /// Build a catalog from already-constructed levels, validating each.
    pub fn new(levels: Vec<LevelSpec>) -> Result<Self, Error> {
        if levels.is_empty() {
            return Err(Error::Empty);
        }
        for level in &levels {
            level.validate()?;
        }
        Ok(LevelCatalog(levels))
    }

    /// The three levels the game ships with.
    pub fn builtin() -> Self {
        let level = |id, name: &str, cols, rows, initial_filled_rows, add_row_limit| LevelSpec {
            id,
            name: name.to_owned(),
            cols,
            rows,
            initial_filled_rows,
            add_row_limit,
            timer_seconds: 120,
        };
        LevelCatalog(vec![
            level(1, "Novice", 8, 9, 3, 6),
            level(2, "Adept", 9, 10, 4, 7),
            level(3, "Master", 10, 12, 4, 8),
        ])
    }

    /// Parse a catalog from a JSON array of levels.
    pub fn from_json(json: &str) -> Result<Self, Error> {
        let levels: Vec<LevelSpec> = serde_json::from_str(json)?;
        Self::new(levels)
    }

    pub fn get(&self, id: u32) -> Result<&LevelSpec, Error> {
        self.0
            .iter()
            .find(|level| level.id == id)
            .ok_or(Error::UnknownLevel(id))
    }

    pub fn first(&self) -> &LevelSpec {
        // every constructor, deserialization included, goes through `new`
        &self.0[0]
    }

    /// The level played after `id`, or `None` when `id` is the last one.
    pub fn next_after(&self, id: u32) -> Result<Option<&LevelSpec>, Error> {
        let pos = self
            .0
            .iter()
            .position(|level| level.id == id)
            .ok_or(Error::UnknownLevel(id))?;
        Ok(self.0.get(pos + 1))
    }

    /// The level played before `id`, or `None` when `id` is the first one.
    pub fn previous_before(&self, id: u32) -> Result<Option<&LevelSpec>, Error> {
        let pos = self
            .0
            .iter()
            .position(|level| level.id == id)
            .ok_or(Error::UnknownLevel(id))?;
        Ok(pos.checked_sub(1).map(|prev| &self.0[prev]))
    }

    pub fn iter(&self) -> impl Iterator<Item = &LevelSpec> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for LevelCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("level {id} has no columns")]
    ZeroColumns { id: u32 },
    #[error("level {id} has no rows")]
    ZeroRows { id: u32 },
    #[error("level {id} fills {filled} of {rows} rows; at least one must start empty")]
    NoEmptyRows { id: u32, filled: usize, rows: usize },
    #[error("a level catalog needs at least one level")]
    Empty,
    #[error("no level with id {0}")]
    UnknownLevel(u32),
    #[error("malformed level catalog")]
    Parse(#[from] serde_json::Error),
}
