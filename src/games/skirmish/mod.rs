//! Skirmish: a small capture game for testing the engine.
//!
//! - Runners move up to two cells in any direction but never capture
//! - Guards step diagonally and capture; kings step anywhere and capture
//! - A player may spend 2 resources to drop a barrier on an empty cell
//! - A runner boxed in on every side except its forward one is captured
//! - Last player holding a king wins
//!
//! Supports any number of seats; even seats face south, odd seats north.

mod game;

pub use game::{
    Skirmish, SkirmishBuilder, SkirmishData, SkirmishOptions, SkirmishPiece, SkirmishPlayer, BARRIER_COST,
    RUNNER_RANGE,
};
