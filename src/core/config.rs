//! Game configuration.
//!
//! A `GameConfig` is built once before the game starts and is read-only
//! afterwards. It describes:
//! - Board dimensions and seat count
//! - Initial piece placements
//! - The per-turn resource budget (`TurnBudget`: a move count *or* an
//!   energy pool, never both)
//! - Optional dice and turn time limit
//! - Display metadata and the RNG seed
//!
//! Configs are serde-serializable so games can be described in JSON.

use std::time::Duration;

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use super::error::ConfigError;
use super::piece::{Piece, PieceKind};
use super::player::{PlayerId, MAX_PLAYERS};
use super::position::Position;

/// Per-turn resource budget.
///
/// The two pools are mutually exclusive: a game counts either moves or
/// energy. The pool is refilled to this amount at every turn boundary.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnBudget {
    /// A number of actions per turn.
    Moves(u32),
    /// An energy pool that actions draw from according to their cost.
    Energy(u32),
}

impl Default for TurnBudget {
    fn default() -> Self {
        TurnBudget::Moves(1)
    }
}

/// Dice rolled by a `RollDice` action.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiceConfig {
    pub count: u32,
    pub sides: u32,
}

impl DiceConfig {
    #[must_use]
    pub const fn new(count: u32, sides: u32) -> Self {
        Self { count, sides }
    }
}

/// One piece placed on the board at game start.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement<K> {
    pub position: Position,
    pub kind: K,
    /// `None` places an obstacle.
    pub owner: Option<PlayerId>,
    #[serde(default)]
    pub value: Option<i64>,
}

impl<K: PieceKind> Placement<K> {
    /// A player-owned piece.
    #[must_use]
    pub fn piece(kind: K, owner: PlayerId, position: Position) -> Self {
        Self {
            position,
            kind,
            owner: Some(owner),
            value: None,
        }
    }

    /// An ownerless obstacle.
    #[must_use]
    pub fn obstacle(kind: K, position: Position) -> Self {
        Self {
            position,
            kind,
            owner: None,
            value: None,
        }
    }

    #[must_use]
    pub fn with_value(mut self, value: i64) -> Self {
        self.value = Some(value);
        self
    }

    /// Build the piece this placement describes, with its derived id.
    #[must_use]
    pub fn to_piece(&self) -> Piece<K> {
        let piece = match self.owner {
            Some(owner) => Piece::new(self.kind, owner, self.position),
            None => Piece::obstacle(self.kind, self.position),
        };
        match self.value {
            Some(value) => piece.with_value(value),
            None => piece,
        }
    }
}

/// Human-readable description of a game.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameMetadata {
    pub name: String,
    pub description: String,
}

/// Complete, immutable game setup.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameConfig<K> {
    pub board_width: usize,
    pub board_height: usize,
    pub player_count: usize,
    pub placements: Vec<Placement<K>>,
    #[serde(default)]
    pub budget: TurnBudget,
    #[serde(default)]
    pub dice: Option<DiceConfig>,
    #[serde(default)]
    pub turn_time_limit: Option<Duration>,
    #[serde(default)]
    pub metadata: GameMetadata,
    #[serde(default)]
    pub seed: u64,
}

impl<K: PieceKind> GameConfig<K> {
    /// An empty `width × height` board for `player_count` seats, one move
    /// per turn, no dice, no timer.
    #[must_use]
    pub fn new(board_width: usize, board_height: usize, player_count: usize) -> Self {
        Self {
            board_width,
            board_height,
            player_count,
            placements: Vec::new(),
            budget: TurnBudget::default(),
            dice: None,
            turn_time_limit: None,
            metadata: GameMetadata::default(),
            seed: 0,
        }
    }

    /// Place a player-owned piece at game start.
    #[must_use]
    pub fn with_piece(self, kind: K, owner: PlayerId, position: Position) -> Self {
        self.with_placement(Placement::piece(kind, owner, position))
    }

    /// Place an obstacle at game start.
    #[must_use]
    pub fn with_obstacle(self, kind: K, position: Position) -> Self {
        self.with_placement(Placement::obstacle(kind, position))
    }

    #[must_use]
    pub fn with_placement(mut self, placement: Placement<K>) -> Self {
        self.placements.push(placement);
        self
    }

    #[must_use]
    pub fn with_budget(mut self, budget: TurnBudget) -> Self {
        self.budget = budget;
        self
    }

    #[must_use]
    pub fn with_dice(mut self, count: u32, sides: u32) -> Self {
        self.dice = Some(DiceConfig::new(count, sides));
        self
    }

    #[must_use]
    pub fn with_turn_time_limit(mut self, limit: Duration) -> Self {
        self.turn_time_limit = Some(limit);
        self
    }

    #[must_use]
    pub fn with_metadata(mut self, name: impl Into<String>, description: impl Into<String>) -> Self {
        self.metadata = GameMetadata {
            name: name.into(),
            description: description.into(),
        };
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Check that the configuration describes a playable game.
    ///
    /// # Errors
    ///
    /// Returns the first problem found; see [`ConfigError`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.player_count == 0 {
            return Err(ConfigError::NoPlayers);
        }
        if self.player_count > MAX_PLAYERS {
            return Err(ConfigError::TooManyPlayers(self.player_count));
        }
        if self.board_width == 0 || self.board_height == 0 {
            return Err(ConfigError::EmptyBoard {
                width: self.board_width,
                height: self.board_height,
            });
        }
        if self.board_width > i32::MAX as usize
            || self.board_height > i32::MAX as usize
            || self.board_width.checked_mul(self.board_height).is_none()
        {
            return Err(ConfigError::BoardTooLarge {
                width: self.board_width,
                height: self.board_height,
            });
        }
        if let Some(dice) = self.dice {
            if dice.count == 0 || dice.sides == 0 {
                return Err(ConfigError::InvalidDice {
                    count: dice.count,
                    sides: dice.sides,
                });
            }
        }

        let mut occupied = FxHashSet::default();
        for placement in &self.placements {
            let pos = placement.position;
            if pos.row < 0
                || pos.col < 0
                || pos.row as usize >= self.board_height
                || pos.col as usize >= self.board_width
            {
                return Err(ConfigError::PlacementOutOfBounds(pos));
            }
            if let Some(owner) = placement.owner {
                if !owner.is_valid(self.player_count) {
                    return Err(ConfigError::OwnerOutOfRange { position: pos, owner });
                }
            }
            if !occupied.insert(pos) {
                return Err(ConfigError::DuplicatePlacement(pos));
            }
        }

        Ok(())
    }
}
