//! Movement and capture geometry.
//!
//! Pure predicates over positions, used as building blocks by rule sets:
//! - `is_orthogonal`, `is_diagonal`, `is_king_step`: classify a step
//! - `manhattan_distance`, `chebyshev_distance`: measure it
//! - `cells_between`: the path a sliding piece crosses
//! - `Direction`: the eight compass directions in a fixed order, so that
//!   move enumeration is deterministic
//!
//! Nothing here looks at game state; the board is only consulted for
//! bounds in `neighbors`.

mod direction;
mod predicates;

pub use direction::Direction;
pub use predicates::{
    cells_between, chebyshev_distance, is_diagonal, is_king_step, is_orthogonal, manhattan_distance,
    neighbors, Neighbors,
};
