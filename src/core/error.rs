//! Error types.
//!
//! The rule-engine contract itself is boolean: rule sets answer
//! "legal or not" and the engine answers "applied or not". These types
//! carry the reason alongside, for callers and for the `InvalidAction`
//! event.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::player::PlayerId;
use super::position::Position;

/// A position that is not on the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[error("position {0} is off the board")]
pub struct OutOfBounds(pub Position);

/// Problems found while validating a `GameConfig`.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("a game needs at least one player")]
    NoPlayers,

    #[error("{0} players requested, at most 255 are supported")]
    TooManyPlayers(usize),

    #[error("board must have at least one cell, got {width}x{height}")]
    EmptyBoard { width: usize, height: usize },

    #[error("board of {width}x{height} cells is too large")]
    BoardTooLarge { width: usize, height: usize },

    #[error("initial piece at {0} is off the board")]
    PlacementOutOfBounds(Position),

    #[error("initial piece at {position} belongs to {owner}, who is not seated")]
    OwnerOutOfRange { position: Position, owner: PlayerId },

    #[error("two initial pieces placed on {0}")]
    DuplicatePlacement(Position),

    #[error("dice need at least one die with at least one side, got {count}d{sides}")]
    InvalidDice { count: u32, sides: u32 },
}

/// Why the engine refused an action.
#[derive(Clone, Debug, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum Rejection {
    /// The game has ended; no further actions are accepted.
    #[error("the game is over")]
    GameOver,

    /// The rule set judged the action illegal.
    #[error("the rules do not allow this action")]
    InvalidMove,

    /// The action costs more than is left in the turn's pool.
    #[error("action costs {cost} but only {remaining} remains this turn")]
    InsufficientResources { cost: u32, remaining: u32 },

    /// The rule set accepted the action but failed to carry it out.
    #[error("the rules failed to carry out the action")]
    ExecutionFailed,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = ConfigError::OwnerOutOfRange {
            position: Position::new(1, 2),
            owner: PlayerId::new(3),
        };
        assert_eq!(
            err.to_string(),
            "initial piece at (1, 2) belongs to Player 3, who is not seated"
        );

        let rejection = Rejection::InsufficientResources { cost: 2, remaining: 1 };
        assert_eq!(rejection.to_string(), "action costs 2 but only 1 remains this turn");
    }
}
