//! The playing grid.
//!
//! `Board` is a dense `width × height` grid of optional pieces stored
//! row-major. It is exclusively owned by `GameState`; cloning it copies
//! every piece, so a cloned board never shares pieces with the original.

use serde::{Deserialize, Serialize};

use super::error::OutOfBounds;
use super::piece::Piece;
use super::position::Position;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board<K> {
    width: usize,
    height: usize,
    cells: Vec<Option<Piece<K>>>,
}

impl<K> Board<K> {
    /// Create an empty board. The dimensions must be ones
    /// `GameConfig::validate` accepts.
    #[must_use]
    pub fn new(width: usize, height: usize) -> Self {
        let mut cells = Vec::with_capacity(width * height);
        cells.resize_with(width * height, || None);
        Self { width, height, cells }
    }

    /// Number of columns.
    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    #[must_use]
    pub fn in_bounds(&self, pos: Position) -> bool {
        pos.row >= 0
            && pos.col >= 0
            && (pos.row as usize) < self.height
            && (pos.col as usize) < self.width
    }

    fn index(&self, pos: Position) -> Option<usize> {
        self.in_bounds(pos)
            .then(|| pos.row as usize * self.width + pos.col as usize)
    }

    /// Piece at `pos`, or `None` if the cell is empty or off the board.
    #[must_use]
    pub fn get(&self, pos: Position) -> Option<&Piece<K>> {
        self.index(pos).and_then(|i| self.cells[i].as_ref())
    }

    pub fn get_mut(&mut self, pos: Position) -> Option<&mut Piece<K>> {
        let i = self.index(pos)?;
        self.cells[i].as_mut()
    }

    /// Put `piece` (or nothing) on `pos`, returning the previous occupant.
    ///
    /// # Errors
    ///
    /// Returns `OutOfBounds` if `pos` is off the board; the board is left
    /// unchanged.
    pub fn set(&mut self, pos: Position, piece: Option<Piece<K>>) -> Result<Option<Piece<K>>, OutOfBounds> {
        let i = self.index(pos).ok_or(OutOfBounds(pos))?;
        Ok(std::mem::replace(&mut self.cells[i], piece))
    }

    /// Remove and return the piece at `pos`.
    pub fn take(&mut self, pos: Position) -> Option<Piece<K>> {
        let i = self.index(pos)?;
        self.cells[i].take()
    }

    /// True if `pos` is on the board and unoccupied.
    #[must_use]
    pub fn is_empty_cell(&self, pos: Position) -> bool {
        self.in_bounds(pos) && self.get(pos).is_none()
    }

    /// Every cell in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Position> {
        let width = self.width as i32;
        (0..self.height as i32).flat_map(move |row| (0..width).map(move |col| Position::new(row, col)))
    }

    /// Occupied cells in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Position, &Piece<K>)> {
        let width = self.width;
        self.cells.iter().enumerate().filter_map(move |(i, cell)| {
            cell.as_ref()
                .map(|piece| (Position::new((i / width) as i32, (i % width) as i32), piece))
        })
    }

    /// Number of occupied cells.
    #[must_use]
    pub fn occupied(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }
}
