//! # board-rules
//!
//! A generic engine for turn-based board games on a rectangular grid.
//!
//! ## Design Principles
//!
//! 1. **Game-Agnostic**: The engine knows nothing about piece kinds,
//!    movement patterns or win conditions. Games supply them through a
//!    `RuleSet`.
//!
//! 2. **N-Player First**: Every API takes `player_count` as context.
//!    No convenience methods that assume 2 players.
//!
//! 3. **Configuration Over Convention**: Games describe their board,
//!    pieces and turn budget in a `GameConfig`, which can be loaded from
//!    JSON.
//!
//! ## Architecture
//!
//! - **All-or-nothing actions**: the engine works on a copy of the state
//!   and commits it only if the whole action succeeded.
//!
//! - **Events last**: listeners are called after the state is committed,
//!   and a failing listener never affects the game or other listeners.
//!
//! - **Persistent history**: the action log is an `im::Vector`, so cloning
//!   a state for lookahead stays cheap.
//!
//! ## Modules
//!
//! - `core`: positions, players, pieces, board, configuration, actions, state, RNG
//! - `movement`: movement and capture geometry
//! - `rules`: the `RuleSet` trait and shared legality checks
//! - `events`: game events and the listener bus
//! - `engine`: `GameEngine` and `TurnTimer`
//! - `games`: complete rule sets (`skirmish`, `crown_chase`)

pub mod core;
pub mod engine;
pub mod events;
pub mod games;
pub mod movement;
pub mod rules;

// Re-export commonly used types
pub use crate::core::{
    ActionKind, ActionRecord, Board, ConfigError, DiceConfig, DiceRoll, GameConfig, GameMetadata, GamePhase,
    GameResult, GameRng, GameRngState, GameState, Piece, PieceFlags, PieceId, PieceKind, Placement, PlayerId,
    PlayerMap, Position, Rejection, ResourcePool, TurnAction, TurnBudget, WinResult,
};

pub use crate::engine::{GameEngine, Transition, TurnTimer};

pub use crate::events::{EventBus, GameEvent, ListenerId};

pub use crate::movement::Direction;

pub use crate::rules::{ActionOf, EventOf, RuleSet, StateOf};
