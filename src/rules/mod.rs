//! Rule sets.
//!
//! Games implement `RuleSet` to define:
//! - Which actions are legal in a given state
//! - How actions change the board
//! - Which actions are available
//! - When the game is over
//!
//! The engine calls into `RuleSet` but never interprets piece kinds or
//! game-specific data itself.

pub mod checks;
mod rule_set;

pub use checks::{classify_destination, movable_piece, Destination};
pub use rule_set::{ActionOf, EventOf, RuleSet, StateOf, DEFAULT_ACTION_COST};
