//! Pieces and piece identity.
//!
//! ## Piece Kinds
//!
//! Each rule set declares its own closed enum of piece kinds and
//! implements [`PieceKind`] for it. The engine never inspects kinds; rule
//! sets dispatch on them with exhaustive `match`es, so adding a kind is a
//! compile error everywhere a rule set forgot to handle it.
//!
//! ## Identity
//!
//! A `PieceId` is derived from the kind tag and the cell the piece started
//! on (`"man@2,3"`), and never changes while the piece is on the board.
//! Pieces created mid-game by placement actions get a `#n` suffix taken
//! from the action history length so repeated placements on one cell stay
//! distinct.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::hash::Hash;

use super::player::PlayerId;
use super::position::Position;

/// A rule set's closed set of piece types.
pub trait PieceKind: Copy + Eq + Hash + Debug {
    /// Short stable name used in piece ids and logs.
    fn tag(self) -> &'static str;
}

/// Stable identifier of a piece for its lifetime on the board.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PieceId(pub String);

impl PieceId {
    /// Id for a piece set up at `origin` when the game starts.
    #[must_use]
    pub fn derive<K: PieceKind>(kind: K, origin: Position) -> Self {
        Self(format!("{}@{},{}", kind.tag(), origin.row, origin.col))
    }

    /// Id for a piece created by the `sequence`-th action of the game.
    #[must_use]
    pub fn derive_placed<K: PieceKind>(kind: K, origin: Position, sequence: usize) -> Self {
        Self(format!("{}@{},{}#{}", kind.tag(), origin.row, origin.col, sequence))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PieceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Per-piece flags a rule set may toggle during play.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PieceFlags {
    /// Promoted (e.g. a man that reached the far row).
    pub promoted: bool,
    /// Team captain / leader piece.
    pub captain: bool,
    /// Has moved at least once.
    pub moved: bool,
    /// Free for rule-set specific use.
    pub special: bool,
}

/// A piece on the board.
///
/// `owner == None` marks an obstacle: it occupies its cell but belongs to
/// nobody and never takes part in a turn.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Piece<K> {
    pub id: PieceId,
    pub kind: K,
    pub owner: Option<PlayerId>,
    /// Numeric value for value-bearing games (scores, number tiles).
    pub value: Option<i64>,
    pub flags: PieceFlags,
}

impl<K: PieceKind> Piece<K> {
    /// A player-owned piece starting at `origin`.
    #[must_use]
    pub fn new(kind: K, owner: PlayerId, origin: Position) -> Self {
        Self {
            id: PieceId::derive(kind, origin),
            kind,
            owner: Some(owner),
            value: None,
            flags: PieceFlags::default(),
        }
    }

    /// An ownerless obstacle starting at `origin`.
    #[must_use]
    pub fn obstacle(kind: K, origin: Position) -> Self {
        Self {
            id: PieceId::derive(kind, origin),
            kind,
            owner: None,
            value: None,
            flags: PieceFlags::default(),
        }
    }

    #[must_use]
    pub fn with_value(mut self, value: i64) -> Self {
        self.value = Some(value);
        self
    }

    #[must_use]
    pub fn with_id(mut self, id: PieceId) -> Self {
        self.id = id;
        self
    }

    #[must_use]
    pub fn with_flags(mut self, flags: PieceFlags) -> Self {
        self.flags = flags;
        self
    }

    #[must_use]
    pub fn is_obstacle(&self) -> bool {
        self.owner.is_none()
    }

    #[must_use]
    pub fn is_owned_by(&self, player: PlayerId) -> bool {
        self.owner == Some(player)
    }
}
