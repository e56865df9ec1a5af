//! The `RuleSet` trait.
//!
//! A rule set is the variation point of the engine: one implementation
//! per game. It decides what is legal, carries actions out on the board,
//! enumerates legal actions and detects the end of the game. The engine
//! handles everything game-independent (turn order, resource pools,
//! history, events).
//!
//! ## Implementation Notes
//!
//! - `validate_move`: check shape, then basic legality, then per-kind
//!   geometry, then resources. May rewrite `action.kind` (`Move` →
//!   `Capture` / `Jump`); execution relies on that rewrite.
//! - `execute_action`: revalidate first, the engine does not promise a
//!   fresh `validate_move` call. On failure leave the state untouched.
//! - `available_actions`: deterministic order (row-major board scan, then
//!   a fixed direction order per kind), every entry validated.
//! - `check_win_condition`: pure, safe to call after every action.
//! - Hooks have default bodies; override only what the game needs.

use crate::core::{GameState, Position, TurnAction, WinResult};
use crate::core::PieceKind;
use crate::events::GameEvent;

/// Cost of an action when neither the action nor the rule set says
/// otherwise.
pub const DEFAULT_ACTION_COST: u32 = 1;

/// Game state as seen by rule set `R`.
pub type StateOf<R> =
    GameState<<R as RuleSet>::Kind, <R as RuleSet>::GameData, <R as RuleSet>::PlayerData>;

/// Action type of rule set `R`.
pub type ActionOf<R> = TurnAction<<R as RuleSet>::Kind>;

/// Event type of rule set `R`.
pub type EventOf<R> = GameEvent<<R as RuleSet>::Kind>;

/// Rules of one game.
pub trait RuleSet: Sized {
    /// Closed set of piece kinds this game uses.
    type Kind: PieceKind;

    /// Whole-game scratch data (chains in progress, counters).
    type GameData: Clone + std::fmt::Debug + Default;

    /// Per-seat scratch data (scores, stock).
    type PlayerData: Clone + std::fmt::Debug + Default;

    /// Is `action` legal for the seat to move right now?
    fn validate_move(&self, state: &StateOf<Self>, action: &mut ActionOf<Self>) -> bool;

    /// Carry out `action`. Returns false, leaving `state` untouched, if it
    /// is not legal.
    fn execute_action(
        &self,
        state: &mut StateOf<Self>,
        action: &mut ActionOf<Self>,
        events: &mut Vec<EventOf<Self>>,
    ) -> bool;

    /// Legal actions for the piece on `position`, or for every piece of the
    /// seat to move when `position` is `None`.
    fn available_actions(&self, state: &StateOf<Self>, position: Option<Position>) -> Vec<ActionOf<Self>>;

    /// `Some` once the game is decided.
    fn check_win_condition(&self, state: &StateOf<Self>) -> Option<WinResult>;

    // === Hooks ===

    /// Called once after the board is set up.
    fn on_game_start(&self, _state: &mut StateOf<Self>, _events: &mut Vec<EventOf<Self>>) {}

    /// Called when a seat's turn begins (including the first turn).
    fn on_turn_start(&self, _state: &mut StateOf<Self>, _events: &mut Vec<EventOf<Self>>) {}

    /// Called when a seat's turn ends, before the next seat is chosen.
    fn on_turn_end(&self, _state: &mut StateOf<Self>, _events: &mut Vec<EventOf<Self>>) {}

    /// Called after every successful action, before the win check. Delayed
    /// effects (captures of trapped pieces, chain bookkeeping) go here.
    fn on_after_action(
        &self,
        _state: &mut StateOf<Self>,
        _action: &ActionOf<Self>,
        _events: &mut Vec<EventOf<Self>>,
    ) {
    }

    /// Resource cost of `action`: its explicit cost, else 1.
    fn calculate_action_cost(&self, _state: &StateOf<Self>, action: &ActionOf<Self>) -> u32 {
        action.cost.unwrap_or(DEFAULT_ACTION_COST)
    }

    /// Should the turn pass to the next seat? Default: when the pool is
    /// empty.
    fn should_end_turn(&self, state: &StateOf<Self>) -> bool {
        state.resources.is_exhausted()
    }
}
