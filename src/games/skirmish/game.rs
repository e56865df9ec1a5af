//! Skirmish rules.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::time::Duration;

use crate::core::{
    ActionKind, GameConfig, Piece, PieceId, PieceKind, Placement, PlayerId, Position, TurnAction, TurnBudget,
    WinResult,
};
use crate::engine::GameEngine;
use crate::events::GameEvent;
use crate::movement::{chebyshev_distance, is_diagonal, is_king_step, Direction};
use crate::rules::{
    classify_destination, movable_piece, ActionOf, Destination, EventOf, RuleSet, StateOf, DEFAULT_ACTION_COST,
};

/// Farthest a runner may travel in one move.
pub const RUNNER_RANGE: u32 = 2;

/// Cost of placing a barrier.
pub const BARRIER_COST: u32 = 2;

/// Piece kinds of Skirmish.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SkirmishPiece {
    /// Moves up to two cells in any direction, never captures.
    Runner,
    /// Steps one cell diagonally, captures.
    Guard,
    /// Steps one cell in any direction, captures. Losing it loses the game.
    King,
    /// Ownerless obstacle placed by a player.
    Barrier,
}

impl PieceKind for SkirmishPiece {
    fn tag(self) -> &'static str {
        match self {
            SkirmishPiece::Runner => "runner",
            SkirmishPiece::Guard => "guard",
            SkirmishPiece::King => "king",
            SkirmishPiece::Barrier => "barrier",
        }
    }
}

/// Variant switches.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkirmishOptions {
    /// Barriers each seat may place over the whole game.
    pub barriers_per_player: u32,
    /// Remove runners boxed in on three sides after every action.
    pub trap_capture: bool,
}

impl Default for SkirmishOptions {
    fn default() -> Self {
        Self {
            barriers_per_player: 2,
            trap_capture: true,
        }
    }
}

/// Whole-game data.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkirmishData {
    /// Seats that started with a king.
    pub royal: Vec<PlayerId>,
}

/// Per-seat data.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkirmishPlayer {
    pub barriers_left: u32,
    pub captures: u32,
}

/// Skirmish rule set.
#[derive(Clone, Debug, Default)]
pub struct Skirmish {
    options: SkirmishOptions,
}

impl Skirmish {
    #[must_use]
    pub fn new(options: SkirmishOptions) -> Self {
        Self { options }
    }

    #[must_use]
    pub fn options(&self) -> &SkirmishOptions {
        &self.options
    }

    /// Direction a seat's pieces face: even seats south, odd seats north.
    #[must_use]
    pub fn forward(player: PlayerId) -> Direction {
        if player.0 % 2 == 0 {
            Direction::South
        } else {
            Direction::North
        }
    }

    /// Action placing a barrier on `to`.
    #[must_use]
    pub fn place_barrier(to: Position) -> TurnAction<SkirmishPiece> {
        TurnAction::place(to, Piece::obstacle(SkirmishPiece::Barrier, to))
    }

    fn reaches(kind: SkirmishPiece, from: Position, to: Position) -> bool {
        match kind {
            SkirmishPiece::Runner => (1..=RUNNER_RANGE).contains(&chebyshev_distance(from, to)),
            SkirmishPiece::Guard => is_diagonal(from, to) && chebyshev_distance(from, to) == 1,
            SkirmishPiece::King => is_king_step(from, to),
            SkirmishPiece::Barrier => false,
        }
    }

    fn captures(kind: SkirmishPiece) -> bool {
        match kind {
            SkirmishPiece::Guard | SkirmishPiece::King => true,
            SkirmishPiece::Runner | SkirmishPiece::Barrier => false,
        }
    }

    /// Geometric destinations for `kind`, in a fixed order.
    fn candidate_targets(kind: SkirmishPiece, from: Position) -> SmallVec<[Position; 24]> {
        match kind {
            SkirmishPiece::Runner => {
                let range = RUNNER_RANGE as i32;
                (-range..=range)
                    .flat_map(|dr| (-range..=range).map(move |dc| (dr, dc)))
                    .filter(|&delta| delta != (0, 0))
                    .map(|(dr, dc)| from.offset(dr, dc))
                    .collect()
            }
            SkirmishPiece::Guard => Direction::DIAGONAL.iter().map(|d| d.step(from, 1)).collect(),
            SkirmishPiece::King => Direction::ALL.iter().map(|d| d.step(from, 1)).collect(),
            SkirmishPiece::Barrier => SmallVec::new(),
        }
    }

    fn validate_movement(&self, state: &StateOf<Self>, action: &mut ActionOf<Self>) -> bool {
        let Some((from, to)) = action.endpoints() else {
            return false;
        };
        let Some(piece) = movable_piece(state, from) else {
            return false;
        };
        let kind = piece.kind;

        let capturing = match classify_destination(state, state.current_player, to) {
            Destination::Empty => false,
            Destination::Enemy(_) => true,
            Destination::OutOfBounds | Destination::Own | Destination::Obstacle => return false,
        };
        if !Self::reaches(kind, from, to) {
            return false;
        }
        if capturing && !Self::captures(kind) {
            return false;
        }
        if action.kind == ActionKind::Capture && !capturing {
            return false;
        }
        if !state.resources.can_afford(self.calculate_action_cost(state, action)) {
            return false;
        }

        if capturing {
            action.kind = ActionKind::Capture;
        }
        true
    }

    fn validate_place(&self, state: &StateOf<Self>, action: &ActionOf<Self>) -> bool {
        if action.from.is_some() {
            return false;
        }
        let (Some(to), Some(piece)) = (action.to, action.piece.as_ref()) else {
            return false;
        };
        if piece.kind != SkirmishPiece::Barrier || !piece.is_obstacle() {
            return false;
        }
        if !state.board.is_empty_cell(to) {
            return false;
        }
        if state.player_data[state.current_player].barriers_left == 0 {
            return false;
        }
        state.resources.can_afford(self.calculate_action_cost(state, action))
    }

    fn move_piece(state: &mut StateOf<Self>, action: &mut ActionOf<Self>, events: &mut Vec<EventOf<Self>>) -> bool {
        let Some((from, to)) = action.endpoints() else {
            return false;
        };
        let player = state.current_player;
        let Some(mut piece) = state.board.take(from) else {
            return false;
        };
        piece.flags.moved = true;

        let captured = state.board.take(to);
        // `to` was bounds-checked during validation.
        let _ = state.board.set(to, Some(piece.clone()));

        if let Some(victim) = &captured {
            state.player_data[player].captures += 1;
            events.push(GameEvent::PieceCaptured {
                by: Some(player),
                piece: victim.clone(),
                at: to,
            });
        }
        action.piece = Some(piece);
        action.captured = captured;
        true
    }

    fn place(state: &mut StateOf<Self>, action: &mut ActionOf<Self>, events: &mut Vec<EventOf<Self>>) -> bool {
        let Some(to) = action.to else {
            return false;
        };
        let player = state.current_player;
        let sequence = state.action_history.len();
        let barrier = Piece::obstacle(SkirmishPiece::Barrier, to)
            .with_id(PieceId::derive_placed(SkirmishPiece::Barrier, to, sequence));

        if !state.set_piece_at(to, Some(barrier.clone())) {
            return false;
        }
        state.player_data[player].barriers_left -= 1;
        action.piece = Some(barrier);
        events.push(GameEvent::BarrierPlaced { player, at: to });
        true
    }
}

impl RuleSet for Skirmish {
    type Kind = SkirmishPiece;
    type GameData = SkirmishData;
    type PlayerData = SkirmishPlayer;

    fn validate_move(&self, state: &StateOf<Self>, action: &mut ActionOf<Self>) -> bool {
        match action.kind {
            ActionKind::Move | ActionKind::Capture => self.validate_movement(state, action),
            ActionKind::Place => self.validate_place(state, action),
            ActionKind::Custom
            | ActionKind::Jump
            | ActionKind::Bounce
            | ActionKind::Promote
            | ActionKind::RollDice => false,
        }
    }

    fn execute_action(
        &self,
        state: &mut StateOf<Self>,
        action: &mut ActionOf<Self>,
        events: &mut Vec<EventOf<Self>>,
    ) -> bool {
        if !self.validate_move(state, action) {
            return false;
        }
        match action.kind {
            ActionKind::Move | ActionKind::Capture => Self::move_piece(state, action, events),
            ActionKind::Place => Self::place(state, action, events),
            ActionKind::Custom
            | ActionKind::Jump
            | ActionKind::Bounce
            | ActionKind::Promote
            | ActionKind::RollDice => false,
        }
    }

    fn available_actions(&self, state: &StateOf<Self>, position: Option<Position>) -> Vec<ActionOf<Self>> {
        let origins: Vec<Position> = match position {
            Some(pos) => vec![pos],
            None => state
                .player_pieces(state.current_player)
                .into_iter()
                .map(|(pos, _)| pos)
                .collect(),
        };

        let mut actions = Vec::new();
        for from in origins {
            let Some(piece) = movable_piece(state, from) else {
                continue;
            };
            for to in Self::candidate_targets(piece.kind, from) {
                let mut action = TurnAction::movement(from, to);
                if self.validate_move(state, &mut action) {
                    actions.push(action);
                }
            }
        }

        if position.is_none() {
            for to in state.board.positions() {
                let mut action = Self::place_barrier(to);
                if self.validate_move(state, &mut action) {
                    actions.push(action);
                }
            }
        }
        actions
    }

    fn check_win_condition(&self, state: &StateOf<Self>) -> Option<WinResult> {
        let royal = &state.game_data.royal;
        if royal.is_empty() {
            return None;
        }

        let crowned: SmallVec<[PlayerId; 4]> = royal
            .iter()
            .copied()
            .filter(|&p| state.count_pieces(Some(p), Some(SkirmishPiece::King)) > 0)
            .collect();

        match crowned.as_slice() {
            [] => Some(WinResult::draw("every king has fallen").immediate()),
            [survivor] if royal.len() > 1 => {
                Some(WinResult::winner(*survivor, format!("{survivor} holds the last king")).immediate())
            }
            _ => None,
        }
    }

    fn on_game_start(&self, state: &mut StateOf<Self>, _events: &mut Vec<EventOf<Self>>) {
        let royal: Vec<PlayerId> = state
            .player_ids()
            .filter(|&p| state.count_pieces(Some(p), Some(SkirmishPiece::King)) > 0)
            .collect();
        state.game_data.royal = royal;

        for player in PlayerId::all(state.player_count()) {
            state.player_data[player].barriers_left = self.options.barriers_per_player;
        }
    }

    fn on_after_action(&self, state: &mut StateOf<Self>, _action: &ActionOf<Self>, events: &mut Vec<EventOf<Self>>) {
        if !self.options.trap_capture {
            return;
        }
        let mover = state.current_player;
        let trapped: Vec<Position> = state
            .board
            .iter()
            .filter(|(_, piece)| piece.kind == SkirmishPiece::Runner)
            .filter_map(|(pos, piece)| piece.owner.filter(|&owner| owner != mover).map(|owner| (pos, owner)))
            .filter(|&(pos, owner)| state.is_position_surrounded(pos, Self::forward(owner)))
            .map(|(pos, _)| pos)
            .collect();

        for pos in trapped {
            if let Some(victim) = state.board.take(pos) {
                state.player_data[mover].captures += 1;
                events.push(GameEvent::PieceCaptured {
                    by: Some(mover),
                    piece: victim,
                    at: pos,
                });
            }
        }
    }

    fn calculate_action_cost(&self, _state: &StateOf<Self>, action: &ActionOf<Self>) -> u32 {
        let base = match action.kind {
            ActionKind::Place => BARRIER_COST,
            _ => DEFAULT_ACTION_COST,
        };
        // An explicit cost may raise the price, never lower it.
        action.cost.map_or(base, |cost| cost.max(base))
    }
}

/// Builder for Skirmish games.
#[derive(Clone, Debug)]
pub struct SkirmishBuilder {
    width: usize,
    height: usize,
    player_count: usize,
    budget: TurnBudget,
    options: SkirmishOptions,
    placements: Vec<Placement<SkirmishPiece>>,
    time_limit: Option<Duration>,
    seed: u64,
}

impl SkirmishBuilder {
    /// An empty two-player board, one move per turn.
    #[must_use]
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            player_count: 2,
            budget: TurnBudget::Moves(1),
            options: SkirmishOptions::default(),
            placements: Vec::new(),
            time_limit: None,
            seed: 0,
        }
    }

    /// The standard 6x6 opening: a king flanked by guards on the back row
    /// and four runners in front, mirrored for the second seat.
    #[must_use]
    pub fn standard() -> Self {
        let mut builder = Self::new(6, 6);
        for (player, back, front) in [(PlayerId::new(0), 0, 1), (PlayerId::new(1), 5, 4)] {
            builder = builder
                .piece(SkirmishPiece::Guard, player, Position::new(back, 1))
                .piece(SkirmishPiece::King, player, Position::new(back, 2))
                .piece(SkirmishPiece::Guard, player, Position::new(back, 3));
            for col in 1..=4 {
                builder = builder.piece(SkirmishPiece::Runner, player, Position::new(front, col));
            }
        }
        builder
    }

    #[must_use]
    pub fn player_count(mut self, count: usize) -> Self {
        self.player_count = count;
        self
    }

    #[must_use]
    pub fn budget(mut self, budget: TurnBudget) -> Self {
        self.budget = budget;
        self
    }

    #[must_use]
    pub fn barriers_per_player(mut self, count: u32) -> Self {
        self.options.barriers_per_player = count;
        self
    }

    #[must_use]
    pub fn trap_capture(mut self, enabled: bool) -> Self {
        self.options.trap_capture = enabled;
        self
    }

    #[must_use]
    pub fn piece(mut self, kind: SkirmishPiece, owner: PlayerId, position: Position) -> Self {
        self.placements.push(Placement::piece(kind, owner, position));
        self
    }

    #[must_use]
    pub fn barrier(mut self, position: Position) -> Self {
        self.placements
            .push(Placement::obstacle(SkirmishPiece::Barrier, position));
        self
    }

    #[must_use]
    pub fn turn_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }

    #[must_use]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// The configuration this builder describes.
    #[must_use]
    pub fn config(&self) -> GameConfig<SkirmishPiece> {
        let mut config = GameConfig::new(self.width, self.height, self.player_count)
            .with_budget(self.budget)
            .with_seed(self.seed)
            .with_metadata(
                "Skirmish",
                "Protect your king; runners dash, guards and kings capture, barriers block.",
            );
        config.placements = self.placements.clone();
        config.turn_time_limit = self.time_limit;
        config
    }

    /// Build an engine running Skirmish with this setup.
    #[must_use]
    pub fn build(self) -> GameEngine<Skirmish> {
        let config = self.config();
        GameEngine::new(config, Skirmish::new(self.options))
    }
}
