//! Game state.
//!
//! ## GameState
//!
//! The single mutable aggregate of a game in progress:
//! - Board and the seat to move
//! - Turn counter, phase (`Playing` → `Ended`, terminal) and winner
//! - The turn's remaining resource pool
//! - Rule-set extension data: one `G` for the whole game, one `P` per seat
//! - Last action, append-only action history, last dice roll
//! - The dice RNG
//!
//! The engine is the only writer during play. Rule sets receive it by
//! reference; callers read it between actions.
//!
//! ## Extension Data
//!
//! `G` and `P` replace free-form key/value bags: each rule set declares
//! plain structs for whatever scratch state it needs (scores, pending
//! capture chains, barrier stock) and the engine treats them as opaque.
//!
//! ## Utility Queries
//!
//! Piece lookup, per-player enumeration, counting and the surround check
//! live here so rule sets and callers share one implementation.

use im::Vector;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::action::{ActionRecord, TurnAction};
use super::board::Board;
use super::config::{GameConfig, TurnBudget};
use super::error::ConfigError;
use super::piece::{Piece, PieceId, PieceKind};
use super::player::{PlayerId, PlayerMap};
use super::position::Position;
use super::rng::{DiceRoll, GameRng};
use crate::movement::Direction;

/// Lifecycle of a game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Actions are accepted.
    Playing,
    /// Terminal: a winner or draw was recorded.
    Ended,
}

/// Final outcome of a game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    Winner(PlayerId),
    Draw,
}

impl GameResult {
    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        matches!(self, GameResult::Winner(p) if *p == player)
    }
}

/// A rule set's verdict that the game is over.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WinResult {
    pub result: GameResult,
    /// Human-readable explanation.
    pub reason: String,
    /// Set when the game ended mid-turn as a direct effect of an action.
    pub immediate: bool,
}

impl WinResult {
    #[must_use]
    pub fn winner(player: PlayerId, reason: impl Into<String>) -> Self {
        Self {
            result: GameResult::Winner(player),
            reason: reason.into(),
            immediate: false,
        }
    }

    #[must_use]
    pub fn draw(reason: impl Into<String>) -> Self {
        Self {
            result: GameResult::Draw,
            reason: reason.into(),
            immediate: false,
        }
    }

    #[must_use]
    pub fn immediate(mut self) -> Self {
        self.immediate = true;
        self
    }
}

/// What is left of the current turn's budget.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResourcePool {
    Moves(u32),
    Energy(u32),
}

impl ResourcePool {
    /// A full pool for a fresh turn.
    #[must_use]
    pub fn from_budget(budget: TurnBudget) -> Self {
        match budget {
            TurnBudget::Moves(n) => ResourcePool::Moves(n),
            TurnBudget::Energy(n) => ResourcePool::Energy(n),
        }
    }

    /// Amount left, whichever pool is active.
    #[must_use]
    pub fn remaining(self) -> u32 {
        match self {
            ResourcePool::Moves(n) | ResourcePool::Energy(n) => n,
        }
    }

    #[must_use]
    pub fn is_exhausted(self) -> bool {
        self.remaining() == 0
    }

    #[must_use]
    pub fn can_afford(self, cost: u32) -> bool {
        cost <= self.remaining()
    }

    /// Deduct `cost`; returns false and leaves the pool alone if it is
    /// more than what remains.
    pub fn spend(&mut self, cost: u32) -> bool {
        match self {
            ResourcePool::Moves(n) | ResourcePool::Energy(n) => match n.checked_sub(cost) {
                Some(left) => {
                    *n = left;
                    true
                }
                None => false,
            },
        }
    }
}

/// Complete state of one game.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameState<K: PieceKind, G, P> {
    player_count: usize,

    // === Board ===
    pub board: Board<K>,

    // === Progression ===
    /// Seat whose turn it is.
    pub current_player: PlayerId,

    /// Completed turns (starts at 0).
    pub turn_count: u32,

    pub phase: GamePhase,

    /// `None` while undecided.
    pub winner: Option<GameResult>,

    /// Remaining budget for the current turn.
    pub resources: ResourcePool,

    // === Rule-set data ===
    pub game_data: G,
    pub player_data: PlayerMap<P>,

    // === History ===
    pub last_action: Option<TurnAction<K>>,
    pub action_history: Vector<ActionRecord<K>>,
    pub last_dice_roll: Option<DiceRoll>,

    pub rng: GameRng,
}

impl<K: PieceKind, G: Default, P: Default> GameState<K, G, P> {
    /// Build the starting state for `config`: board with the configured
    /// pieces, seat 0 to move, turn 0, full resource pool, default
    /// extension data.
    ///
    /// # Errors
    ///
    /// Returns the config's validation error, if any.
    pub fn new(config: &GameConfig<K>) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut board = Board::new(config.board_width, config.board_height);
        for placement in &config.placements {
            board
                .set(placement.position, Some(placement.to_piece()))
                .map_err(|e| ConfigError::PlacementOutOfBounds(e.0))?;
        }

        Ok(Self {
            player_count: config.player_count,
            board,
            current_player: PlayerId::new(0),
            turn_count: 0,
            phase: GamePhase::Playing,
            winner: None,
            resources: ResourcePool::from_budget(config.budget),
            game_data: G::default(),
            player_data: PlayerMap::with_default(config.player_count),
            last_action: None,
            action_history: Vector::new(),
            last_dice_roll: None,
            rng: GameRng::new(config.seed),
        })
    }
}

impl<K: PieceKind, G, P> GameState<K, G, P> {
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.player_count
    }

    pub fn player_ids(&self) -> impl Iterator<Item = PlayerId> {
        PlayerId::all(self.player_count)
    }

    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.phase == GamePhase::Playing
    }

    // === Resources ===

    /// Moves left this turn, if the game counts moves.
    #[must_use]
    pub fn remaining_moves(&self) -> Option<u32> {
        match self.resources {
            ResourcePool::Moves(n) => Some(n),
            ResourcePool::Energy(_) => None,
        }
    }

    /// Energy left this turn, if the game uses an energy pool.
    #[must_use]
    pub fn remaining_energy(&self) -> Option<u32> {
        match self.resources {
            ResourcePool::Energy(n) => Some(n),
            ResourcePool::Moves(_) => None,
        }
    }

    // === Pieces ===

    #[must_use]
    pub fn piece_at(&self, pos: Position) -> Option<&Piece<K>> {
        self.board.get(pos)
    }

    /// Put `piece` (or nothing) on `pos`. Returns false, changing nothing,
    /// if `pos` is off the board.
    pub fn set_piece_at(&mut self, pos: Position, piece: Option<Piece<K>>) -> bool {
        self.board.set(pos, piece).is_ok()
    }

    /// Pieces owned by `player`, row-major. Obstacles are never included.
    #[must_use]
    pub fn player_pieces(&self, player: PlayerId) -> Vec<(Position, &Piece<K>)> {
        self.board
            .iter()
            .filter(|(_, piece)| piece.is_owned_by(player))
            .collect()
    }

    /// Count pieces, optionally restricted to one owner and/or one kind.
    #[must_use]
    pub fn count_pieces(&self, owner: Option<PlayerId>, kind: Option<K>) -> usize {
        self.board
            .iter()
            .filter(|(_, piece)| owner.map_or(true, |o| piece.is_owned_by(o)))
            .filter(|(_, piece)| kind.map_or(true, |k| piece.kind == k))
            .count()
    }

    /// Pieces per kind, optionally for one owner.
    #[must_use]
    pub fn piece_census(&self, owner: Option<PlayerId>) -> FxHashMap<K, usize> {
        let mut census = FxHashMap::default();
        for (_, piece) in self.board.iter() {
            if owner.map_or(true, |o| piece.is_owned_by(o)) {
                *census.entry(piece.kind).or_insert(0) += 1;
            }
        }
        census
    }

    /// Locate a piece by id.
    #[must_use]
    pub fn find_piece(&self, id: &PieceId) -> Option<(Position, &Piece<K>)> {
        self.board.iter().find(|(_, piece)| &piece.id == id)
    }

    /// True if the three orthogonal neighbours of `pos` other than the one
    /// in `forward` are all blocked. Off-board cells count as blocked, as
    /// do cells holding any piece or obstacle.
    #[must_use]
    pub fn is_position_surrounded(&self, pos: Position, forward: Direction) -> bool {
        Direction::ORTHOGONAL
            .iter()
            .filter(|&&dir| dir != forward)
            .map(|dir| dir.step(pos, 1))
            .all(|cell| !self.board.is_empty_cell(cell))
    }

    /// Deep copy for speculative play or undo. The copy owns its own board
    /// and extension data; nothing is shared with `self`.
    #[must_use]
    pub fn clone_state(&self) -> Self
    where
        G: Clone,
        P: Clone,
    {
        self.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
    enum Token {
        Stone,
        Rock,
    }

    impl PieceKind for Token {
        fn tag(self) -> &'static str {
            match self {
                Token::Stone => "stone",
                Token::Rock => "rock",
            }
        }
    }

    type State = GameState<Token, u32, Vec<u8>>;

    fn p(row: i32, col: i32) -> Position {
        Position::new(row, col)
    }

    fn sample_config() -> GameConfig<Token> {
        GameConfig::new(4, 3, 2)
            .with_piece(Token::Stone, PlayerId::new(0), p(0, 0))
            .with_piece(Token::Stone, PlayerId::new(0), p(0, 1))
            .with_piece(Token::Stone, PlayerId::new(1), p(2, 3))
            .with_obstacle(Token::Rock, p(1, 1))
            .with_budget(TurnBudget::Energy(4))
    }

    #[test]
    fn test_new_state() {
        let state = State::new(&sample_config()).unwrap();

        assert_eq!(state.board.width(), 4);
        assert_eq!(state.board.height(), 3);
        assert_eq!(state.board.occupied(), 4);
        assert_eq!(state.current_player, PlayerId::new(0));
        assert_eq!(state.turn_count, 0);
        assert!(state.is_playing());
        assert_eq!(state.winner, None);
        assert_eq!(state.remaining_energy(), Some(4));
        assert_eq!(state.remaining_moves(), None);
        assert!(state.action_history.is_empty());
    }

    #[test]
    fn test_new_state_rejects_invalid_config() {
        let config = sample_config().with_piece(Token::Stone, PlayerId::new(5), p(2, 2));
        assert!(matches!(State::new(&config), Err(ConfigError::OwnerOutOfRange { .. })));

        let huge = GameConfig::<Token>::new(usize::MAX, usize::MAX, 2);
        assert!(matches!(State::new(&huge), Err(ConfigError::BoardTooLarge { .. })));
    }

    #[test]
    fn test_piece_queries() {
        let state = State::new(&sample_config()).unwrap();

        let mine: Vec<_> = state.player_pieces(PlayerId::new(0)).iter().map(|(pos, _)| *pos).collect();
        assert_eq!(mine, vec![p(0, 0), p(0, 1)]);

        assert_eq!(state.count_pieces(None, None), 4);
        assert_eq!(state.count_pieces(Some(PlayerId::new(0)), None), 2);
        assert_eq!(state.count_pieces(None, Some(Token::Rock)), 1);
        assert_eq!(state.count_pieces(Some(PlayerId::new(1)), Some(Token::Rock)), 0);

        let census = state.piece_census(None);
        assert_eq!(census.get(&Token::Stone), Some(&3));
        assert_eq!(census.get(&Token::Rock), Some(&1));

        let (pos, _) = state.find_piece(&PieceId("stone@2,3".into())).unwrap();
        assert_eq!(pos, p(2, 3));
    }

    #[test]
    fn test_set_piece_at_bounds_checked() {
        let mut state = State::new(&sample_config()).unwrap();
        let stone = Piece::new(Token::Stone, PlayerId::new(1), p(9, 9));

        assert!(!state.set_piece_at(p(9, 9), Some(stone.clone())));
        assert!(state.set_piece_at(p(2, 0), Some(stone)));
        assert!(state.piece_at(p(2, 0)).is_some());
        assert!(state.set_piece_at(p(2, 0), None));
        assert!(state.piece_at(p(2, 0)).is_none());
    }

    #[test]
    fn test_surrounded() {
        let state = State::new(&sample_config()).unwrap();

        // (0,0): north and west are off the board, east holds a stone.
        assert!(state.is_position_surrounded(p(0, 0), Direction::South));
        // Facing east instead leaves the open south neighbour in the check.
        assert!(!state.is_position_surrounded(p(0, 0), Direction::East));
        // (2,3): west (2,2) is empty.
        assert!(!state.is_position_surrounded(p(2, 3), Direction::North));
    }

    #[test]
    fn test_resource_pool() {
        let mut pool = ResourcePool::from_budget(TurnBudget::Moves(2));
        assert!(pool.can_afford(2));
        assert!(!pool.spend(3));
        assert_eq!(pool.remaining(), 2);
        assert!(pool.spend(2));
        assert!(pool.is_exhausted());
    }

    #[test]
    fn test_clone_state_is_disjoint() {
        let original = State::new(&sample_config()).unwrap();
        let mut copy = original.clone_state();
        assert_eq!(copy, original);

        copy.board.take(p(0, 0));
        copy.player_data[PlayerId::new(1)].push(7);
        copy.game_data = 99;

        assert!(original.piece_at(p(0, 0)).is_some());
        assert!(original.player_data[PlayerId::new(1)].is_empty());
        assert_eq!(original.game_data, 0);
    }

    #[test]
    fn test_game_result() {
        let win = WinResult::winner(PlayerId::new(1), "last stone standing").immediate();
        assert!(win.result.is_winner(PlayerId::new(1)));
        assert!(!win.result.is_winner(PlayerId::new(0)));
        assert!(win.immediate);
        assert!(!GameResult::Draw.is_winner(PlayerId::new(0)));
    }
}
