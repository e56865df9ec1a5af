//! Turn orchestration.
//!
//! - `GameEngine`: the turn/resource state machine around a `RuleSet`
//! - `TurnTimer`: optional per-turn countdown

mod game;
mod timer;

pub use game::{GameEngine, Transition};
pub use timer::TurnTimer;
