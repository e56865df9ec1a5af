//! Crown Chase: a checkers variant.
//!
//! - Men step one square diagonally forward; crowns step diagonally either way
//! - Jumping over an enemy captures it and scores its value
//! - A piece that can jump again after a jump must keep going, in the same turn
//! - A man reaching the far row is crowned, which ends its chain
//! - With mandatory capture on, a jump must be taken when one exists
//! - Last seat with pieces wins; a seat that cannot move loses
//! - Too long without a capture is a draw

mod game;

pub use game::{
    ChaseData, ChasePiece, ChasePlayer, CrownChase, CrownChaseBuilder, CrownChaseOptions, CROWN_VALUE, HOME_ROWS,
    MAN_VALUE,
};
