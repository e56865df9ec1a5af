//! Board coordinates.

use serde::{Deserialize, Serialize};

/// A cell on the board. Row 0 is the top edge, column 0 the left edge.
///
/// Coordinates are signed so that offsets can step off the board; use
/// `Board::in_bounds` before indexing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: i32,
    pub col: i32,
}

impl Position {
    #[must_use]
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// The cell `(dr, dc)` away from this one.
    #[must_use]
    pub const fn offset(self, dr: i32, dc: i32) -> Self {
        Self {
            row: self.row + dr,
            col: self.col + dc,
        }
    }

    /// Signed `(row, col)` delta from `self` to `other`.
    #[must_use]
    pub const fn delta_to(self, other: Position) -> (i32, i32) {
        (other.row - self.row, other.col - self.col)
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_and_delta() {
        let origin = Position::new(2, 3);
        let moved = origin.offset(-1, 2);

        assert_eq!(moved, Position::new(1, 5));
        assert_eq!(origin.delta_to(moved), (-1, 2));
        assert_eq!(format!("{}", moved), "(1, 5)");
    }
}
