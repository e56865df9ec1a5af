//! Game implementations.
//!
//! Each game is a `RuleSet` plus a builder that sets up its board.

pub mod crown_chase;
pub mod skirmish;
