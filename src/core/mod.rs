//! Core data model: positions, players, pieces, board, configuration,
//! actions, state, RNG and errors.
//!
//! These types are passive. Game behaviour lives in rule sets
//! (`crate::rules`) and turn orchestration in `crate::engine`.

pub mod action;
pub mod board;
pub mod config;
pub mod error;
pub mod piece;
pub mod player;
pub mod position;
pub mod rng;
pub mod state;

pub use action::{ActionKind, ActionRecord, TurnAction};
pub use board::Board;
pub use config::{DiceConfig, GameConfig, GameMetadata, Placement, TurnBudget};
pub use error::{ConfigError, OutOfBounds, Rejection};
pub use piece::{Piece, PieceFlags, PieceId, PieceKind};
pub use player::{PlayerId, PlayerMap, MAX_PLAYERS};
pub use position::Position;
pub use rng::{DiceRoll, GameRng, GameRngState};
pub use state::{GamePhase, GameResult, GameState, ResourcePool, WinResult};
