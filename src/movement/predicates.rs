//! Geometric predicates over pairs of positions.

use smallvec::SmallVec;

use super::direction::Direction;
use crate::core::{Board, Position};

/// In-bounds neighbour cells, at most eight.
pub type Neighbors = SmallVec<[Position; 8]>;

/// Same row or same column, and not the same cell.
#[must_use]
pub fn is_orthogonal(from: Position, to: Position) -> bool {
    from != to && (from.row == to.row || from.col == to.col)
}

/// On a shared diagonal, and not the same cell.
#[must_use]
pub fn is_diagonal(from: Position, to: Position) -> bool {
    let (dr, dc) = from.delta_to(to);
    dr != 0 && dr.abs() == dc.abs()
}

/// One step in any of the eight directions (Chebyshev distance exactly 1).
#[must_use]
pub fn is_king_step(from: Position, to: Position) -> bool {
    chebyshev_distance(from, to) == 1
}

#[must_use]
pub fn manhattan_distance(from: Position, to: Position) -> u32 {
    let (dr, dc) = from.delta_to(to);
    dr.unsigned_abs() + dc.unsigned_abs()
}

/// King-move distance: the larger of the row and column gaps.
#[must_use]
pub fn chebyshev_distance(from: Position, to: Position) -> u32 {
    let (dr, dc) = from.delta_to(to);
    dr.unsigned_abs().max(dc.unsigned_abs())
}

/// Cells strictly between two positions on a straight line.
///
/// Empty when the positions are adjacent, equal, or not on a shared
/// row, column or diagonal.
#[must_use]
pub fn cells_between(from: Position, to: Position) -> SmallVec<[Position; 8]> {
    if !is_orthogonal(from, to) && !is_diagonal(from, to) {
        return SmallVec::new();
    }
    let (dr, dc) = from.delta_to(to);
    let (sr, sc) = (dr.signum(), dc.signum());
    let steps = chebyshev_distance(from, to) as i32;
    (1..steps).map(|i| from.offset(sr * i, sc * i)).collect()
}

/// Neighbours of `pos` in the given directions that lie on `board`, in
/// the order the directions are listed.
#[must_use]
pub fn neighbors<K>(board: &Board<K>, pos: Position, directions: &[Direction]) -> Neighbors {
    directions
        .iter()
        .map(|dir| dir.step(pos, 1))
        .filter(|&p| board.in_bounds(p))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(row: i32, col: i32) -> Position {
        Position::new(row, col)
    }

    #[test]
    fn test_orthogonal() {
        assert!(is_orthogonal(p(2, 2), p(2, 7)));
        assert!(is_orthogonal(p(2, 2), p(0, 2)));
        assert!(!is_orthogonal(p(2, 2), p(3, 3)));
        assert!(!is_orthogonal(p(2, 2), p(2, 2)));
    }

    #[test]
    fn test_diagonal() {
        assert!(is_diagonal(p(0, 0), p(3, 3)));
        assert!(is_diagonal(p(4, 1), p(2, 3)));
        assert!(!is_diagonal(p(0, 0), p(1, 2)));
        assert!(!is_diagonal(p(1, 1), p(1, 1)));
    }

    #[test]
    fn test_king_step() {
        assert!(is_king_step(p(1, 1), p(0, 0)));
        assert!(is_king_step(p(1, 1), p(1, 2)));
        assert!(!is_king_step(p(1, 1), p(1, 1)));
        assert!(!is_king_step(p(1, 1), p(3, 1)));
    }

    #[test]
    fn test_distances() {
        assert_eq!(manhattan_distance(p(0, 0), p(2, 3)), 5);
        assert_eq!(chebyshev_distance(p(0, 0), p(2, 3)), 3);
        assert_eq!(chebyshev_distance(p(3, 3), p(3, 3)), 0);
    }

    #[test]
    fn test_cells_between() {
        assert_eq!(cells_between(p(0, 0), p(3, 3)).as_slice(), &[p(1, 1), p(2, 2)]);
        assert_eq!(cells_between(p(2, 4), p(2, 1)).as_slice(), &[p(2, 3), p(2, 2)]);
        assert!(cells_between(p(0, 0), p(0, 1)).is_empty());
        assert!(cells_between(p(0, 0), p(1, 2)).is_empty());
    }

    #[test]
    fn test_neighbors_clip_to_board() {
        let board: Board<()> = Board::new(3, 3);

        let corner = neighbors(&board, p(0, 0), &Direction::ALL);
        assert_eq!(corner.as_slice(), &[p(0, 1), p(1, 1), p(1, 0)]);

        let center = neighbors(&board, p(1, 1), &Direction::ORTHOGONAL);
        assert_eq!(center.as_slice(), &[p(0, 1), p(1, 2), p(2, 1), p(1, 0)]);
    }
}
