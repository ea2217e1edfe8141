use std::ops::{Index, IndexMut};

/// A flat, row-major 2d grid whose dimensions are chosen at runtime.
///
/// For indexing operations on this grid, `(0, 0)` is the top left corner and
/// coordinates are given as `(row, col)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid<T> {
    cols: usize,
    cells: Vec<T>,
}

impl<T> Grid<T> {
    /// Build a grid by calling `make(row, col)` for every slot in row-major order.
    pub fn from_fn(rows: usize, cols: usize, mut make: impl FnMut(usize, usize) -> T) -> Self {
        let cells = (0..rows * cols)
            .map(|idx| make(idx / cols, idx % cols))
            .collect();
        Grid { cols, cells }
    }

    pub fn rows(&self) -> usize {
        if self.cols == 0 {
            0
        } else {
            self.cells.len() / self.cols
        }
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Get the internal index where the desired value is stored,
    /// or `None` if it is out of bounds.
    pub fn idx(&self, row: usize, col: usize) -> Option<usize> {
        (row < self.rows() && col < self.cols).then_some((row * self.cols) + col)
    }

    /// Split a linear index back into `(row, col)`.
    pub fn position(&self, idx: usize) -> (usize, usize) {
        (idx / self.cols, idx % self.cols)
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&T> {
        self.idx(row, col).map(|idx| &self.cells[idx])
    }

    pub fn get_mut(&mut self, row: usize, col: usize) -> Option<&mut T> {
        self.idx(row, col).map(|idx| &mut self.cells[idx])
    }

    /// The slots of a single row, left to right.
    pub fn row(&self, row: usize) -> Option<&[T]> {
        (row < self.rows()).then(|| &self.cells[row * self.cols..(row + 1) * self.cols])
    }

    pub fn row_mut(&mut self, row: usize) -> Option<&mut [T]> {
        (row < self.rows()).then(|| &mut self.cells[row * self.cols..(row + 1) * self.cols])
    }

    /// Drop the top row, move every other row up by one, and append `fill` as the new bottom row.
    ///
    /// Returns the dropped row. `fill` must yield exactly `cols` items; the
    /// grid's length never changes.
    pub fn shift_up(&mut self, fill: impl IntoIterator<Item = T>) -> Vec<T> {
        let dropped: Vec<T> = self.cells.drain(..self.cols).collect();
        self.cells.extend(fill.into_iter().take(self.cols));
        debug_assert_eq!(
            self.cells.len() % self.cols,
            0,
            "shift_up must refill a complete row"
        );
        dropped
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.cells.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.cells.iter_mut()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.cells
    }
}

impl<T> Index<usize> for Grid<T> {
    type Output = T;

    fn index(&self, idx: usize) -> &Self::Output {
        &self.cells[idx]
    }
}

impl<T> IndexMut<usize> for Grid<T> {
    fn index_mut(&mut self, idx: usize) -> &mut Self::Output {
        &mut self.cells[idx]
    }
}

impl<T> Index<(usize, usize)> for Grid<T> {
    type Output = T;

    fn index(&self, (row, col): (usize, usize)) -> &Self::Output {
        self.get(row, col).unwrap()
    }
}

impl<T> IndexMut<(usize, usize)> for Grid<T> {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut Self::Output {
        self.get_mut(row, col).unwrap()
    }
}
