//! Legality checks shared by rule sets.
//!
//! These cover the game-independent part of `validate_move`: whether the
//! source piece may act and what the destination holds. Per-kind
//! geometry stays in each rule set.

use crate::core::{GameState, Piece, PieceKind, PlayerId, Position};

/// What a destination cell holds, from the mover's point of view.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Destination {
    OutOfBounds,
    Empty,
    Own,
    Enemy(PlayerId),
    Obstacle,
}

/// Classify `to` for a piece owned by `mover`.
#[must_use]
pub fn classify_destination<K: PieceKind, G, P>(
    state: &GameState<K, G, P>,
    mover: PlayerId,
    to: Position,
) -> Destination {
    if !state.board.in_bounds(to) {
        return Destination::OutOfBounds;
    }
    match state.piece_at(to) {
        None => Destination::Empty,
        Some(piece) => match piece.owner {
            None => Destination::Obstacle,
            Some(owner) if owner == mover => Destination::Own,
            Some(owner) => Destination::Enemy(owner),
        },
    }
}

/// The piece on `from`, if it belongs to the seat to move.
#[must_use]
pub fn movable_piece<K: PieceKind, G, P>(state: &GameState<K, G, P>, from: Position) -> Option<&Piece<K>> {
    state
        .piece_at(from)
        .filter(|piece| piece.is_owned_by(state.current_player))
}
