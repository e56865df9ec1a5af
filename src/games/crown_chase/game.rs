//! Crown Chase rules.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{
    ActionKind, GameConfig, Piece, PieceKind, Placement, PlayerId, Position, TurnAction, TurnBudget, WinResult,
};
use crate::engine::GameEngine;
use crate::events::GameEvent;
use crate::movement::{chebyshev_distance, is_diagonal, Direction};
use crate::rules::{
    classify_destination, movable_piece, ActionOf, Destination, EventOf, RuleSet, StateOf, DEFAULT_ACTION_COST,
};

pub const MAN_VALUE: i64 = 1;
pub const CROWN_VALUE: i64 = 2;

/// Rows of men each side starts with.
pub const HOME_ROWS: usize = 3;

/// Piece kinds of Crown Chase.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChasePiece {
    Man,
    Crown,
}

impl PieceKind for ChasePiece {
    fn tag(self) -> &'static str {
        match self {
            ChasePiece::Man => "man",
            ChasePiece::Crown => "crown",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrownChaseOptions {
    /// Simple moves are illegal while any jump is available.
    pub mandatory_capture: bool,
    /// Consecutive actions without a capture before the game is drawn.
    /// Zero disables the rule.
    pub draw_after: u32,
}

impl Default for CrownChaseOptions {
    fn default() -> Self {
        Self {
            mandatory_capture: true,
            draw_after: 40,
        }
    }
}

/// Whole-game data.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChaseData {
    /// Square of the piece that must keep jumping this turn.
    pub chain: Option<Position>,
    /// Actions since the last capture.
    pub quiet_actions: u32,
}

/// Per-seat data.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChasePlayer {
    /// Total value of pieces captured.
    pub score: i64,
}

/// Crown Chase rule set.
#[derive(Clone, Debug, Default)]
pub struct CrownChase {
    options: CrownChaseOptions,
}

impl CrownChase {
    #[must_use]
    pub fn new(options: CrownChaseOptions) -> Self {
        Self { options }
    }

    #[must_use]
    pub fn options(&self) -> &CrownChaseOptions {
        &self.options
    }

    /// Direction men of `player` advance: even seats south, odd seats north.
    #[must_use]
    pub fn forward(player: PlayerId) -> Direction {
        if player.0 % 2 == 0 {
            Direction::South
        } else {
            Direction::North
        }
    }

    /// Row on which men of `player` are crowned.
    #[must_use]
    pub fn crowning_row(player: PlayerId, height: usize) -> i32 {
        match Self::forward(player) {
            Direction::South => height as i32 - 1,
            _ => 0,
        }
    }

    fn directions(piece: &Piece<ChasePiece>) -> SmallVec<[Direction; 4]> {
        match (piece.kind, piece.owner) {
            (ChasePiece::Crown, _) => Direction::DIAGONAL.into_iter().collect(),
            (ChasePiece::Man, Some(owner)) => {
                let sign = Self::forward(owner).row_sign();
                Direction::DIAGONAL
                    .into_iter()
                    .filter(|d| d.row_sign() == sign)
                    .collect()
            }
            (ChasePiece::Man, None) => SmallVec::new(),
        }
    }

    fn allows(piece: &Piece<ChasePiece>, from: Position, to: Position) -> bool {
        let (dr, dc) = from.delta_to(to);
        Self::directions(piece)
            .iter()
            .any(|d| d.delta() == (dr.signum(), dc.signum()))
    }

    /// Landing squares of every jump open to the piece on `from`.
    fn jump_targets(state: &StateOf<Self>, from: Position, piece: &Piece<ChasePiece>) -> SmallVec<[Position; 4]> {
        let Some(owner) = piece.owner else {
            return SmallVec::new();
        };
        Self::directions(piece)
            .into_iter()
            .filter(|d| matches!(classify_destination(state, owner, d.step(from, 1)), Destination::Enemy(_)))
            .map(|d| d.step(from, 2))
            .filter(|&land| state.board.is_empty_cell(land))
            .collect()
    }

    fn step_targets(state: &StateOf<Self>, from: Position, piece: &Piece<ChasePiece>) -> SmallVec<[Position; 4]> {
        Self::directions(piece)
            .into_iter()
            .map(|d| d.step(from, 1))
            .filter(|&to| state.board.is_empty_cell(to))
            .collect()
    }

    /// True if any piece of `player` can jump.
    #[must_use]
    pub fn can_jump(state: &StateOf<Self>, player: PlayerId) -> bool {
        state
            .player_pieces(player)
            .into_iter()
            .any(|(pos, piece)| !Self::jump_targets(state, pos, piece).is_empty())
    }

    /// True if `player` has any move at all, ignoring whose turn it is.
    #[must_use]
    pub fn has_any_move(state: &StateOf<Self>, player: PlayerId) -> bool {
        state.player_pieces(player).into_iter().any(|(pos, piece)| {
            !Self::jump_targets(state, pos, piece).is_empty() || !Self::step_targets(state, pos, piece).is_empty()
        })
    }

    /// The captured square if `from -> to` is a jump shape.
    fn jumped_square(from: Position, to: Position) -> Option<Position> {
        let (dr, dc) = from.delta_to(to);
        (is_diagonal(from, to) && chebyshev_distance(from, to) == 2).then(|| from.offset(dr / 2, dc / 2))
    }
}

impl RuleSet for CrownChase {
    type Kind = ChasePiece;
    type GameData = ChaseData;
    type PlayerData = ChasePlayer;

    fn validate_move(&self, state: &StateOf<Self>, action: &mut ActionOf<Self>) -> bool {
        if !matches!(action.kind, ActionKind::Move | ActionKind::Capture | ActionKind::Jump) {
            return false;
        }
        let Some((from, to)) = action.endpoints() else {
            return false;
        };
        let Some(piece) = movable_piece(state, from) else {
            return false;
        };
        if state.game_data.chain.is_some_and(|chained| chained != from) {
            return false;
        }
        if !state.board.is_empty_cell(to) || !is_diagonal(from, to) || !Self::allows(piece, from, to) {
            return false;
        }

        let jumping = match chebyshev_distance(from, to) {
            1 => {
                if action.kind != ActionKind::Move || state.game_data.chain.is_some() {
                    return false;
                }
                if self.options.mandatory_capture && Self::can_jump(state, state.current_player) {
                    return false;
                }
                false
            }
            2 => {
                let Some(over) = Self::jumped_square(from, to) else {
                    return false;
                };
                if !matches!(classify_destination(state, state.current_player, over), Destination::Enemy(_)) {
                    return false;
                }
                true
            }
            _ => return false,
        };

        if !state.resources.can_afford(self.calculate_action_cost(state, action)) {
            return false;
        }
        if jumping {
            action.kind = ActionKind::Jump;
        }
        true
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
        let Some((from, to)) = action.endpoints() else {
            return false;
        };
        let player = state.current_player;
        let Some(mut piece) = state.board.take(from) else {
            return false;
        };
        piece.flags.moved = true;

        let captured = if action.kind == ActionKind::Jump {
            Self::jumped_square(from, to).and_then(|over| state.board.take(over).map(|victim| (over, victim)))
        } else {
            None
        };
        if let Some((over, victim)) = &captured {
            state.player_data[player].score += victim.value.unwrap_or(MAN_VALUE);
            events.push(GameEvent::PieceCaptured {
                by: Some(player),
                piece: victim.clone(),
                at: *over,
            });
        }

        let promoted =
            piece.kind == ChasePiece::Man && to.row == Self::crowning_row(player, state.board.height());
        if promoted {
            piece.kind = ChasePiece::Crown;
            piece.value = Some(piece.value.unwrap_or(MAN_VALUE) + 1);
            piece.flags.promoted = true;
            events.push(GameEvent::PiecePromoted {
                piece: piece.clone(),
                at: to,
            });
        }

        // `to` was checked empty and on the board during validation.
        let _ = state.board.set(to, Some(piece.clone()));

        let jumped = captured.is_some();
        state.game_data.chain = (jumped && !promoted && !Self::jump_targets(state, to, &piece).is_empty()).then_some(to);
        state.game_data.quiet_actions = if jumped { 0 } else { state.game_data.quiet_actions + 1 };

        action.piece = Some(piece);
        action.captured = captured.map(|(_, victim)| victim);
        true
    }

    fn available_actions(&self, state: &StateOf<Self>, position: Option<Position>) -> Vec<ActionOf<Self>> {
        let origins: Vec<Position> = match (state.game_data.chain, position) {
            (Some(chained), Some(pos)) if pos != chained => Vec::new(),
            (Some(chained), _) => vec![chained],
            (None, Some(pos)) => vec![pos],
            (None, None) => state
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
            let candidates = Self::jump_targets(state, from, piece)
                .into_iter()
                .map(|to| TurnAction::between(ActionKind::Jump, from, to))
                .chain(
                    Self::step_targets(state, from, piece)
                        .into_iter()
                        .map(|to| TurnAction::movement(from, to)),
                );
            for mut action in candidates {
                if self.validate_move(state, &mut action) {
                    actions.push(action);
                }
            }
        }
        actions
    }

    fn check_win_condition(&self, state: &StateOf<Self>) -> Option<WinResult> {
        let standing: SmallVec<[PlayerId; 4]> = state
            .player_ids()
            .filter(|&p| state.count_pieces(Some(p), None) > 0)
            .collect();

        match standing.as_slice() {
            [] => return Some(WinResult::draw("no pieces left").immediate()),
            [last] if state.player_count() > 1 => {
                return Some(WinResult::winner(*last, format!("{last} has the last pieces on the board")).immediate())
            }
            _ => {}
        }

        if state.player_count() == 2 && state.game_data.chain.is_none() {
            let to_move = if self.should_end_turn(state) {
                state.current_player.next(state.player_count())
            } else {
                state.current_player
            };
            if !Self::has_any_move(state, to_move) {
                let other = to_move.next(state.player_count());
                return Some(WinResult::winner(other, format!("{to_move} has no legal move")).immediate());
            }
        }

        if self.options.draw_after > 0 && state.game_data.quiet_actions >= self.options.draw_after {
            return Some(WinResult::draw(format!(
                "{} actions without a capture",
                state.game_data.quiet_actions
            )));
        }
        None
    }

    fn on_game_start(&self, state: &mut StateOf<Self>, _events: &mut Vec<EventOf<Self>>) {
        let crowns: Vec<Position> = state
            .board
            .iter()
            .filter(|(_, piece)| piece.kind == ChasePiece::Crown)
            .map(|(pos, _)| pos)
            .collect();
        for pos in crowns {
            if let Some(piece) = state.board.get_mut(pos) {
                piece.flags.promoted = true;
            }
        }
    }

    fn on_turn_end(&self, state: &mut StateOf<Self>, _events: &mut Vec<EventOf<Self>>) {
        state.game_data.chain = None;
    }

    fn calculate_action_cost(&self, state: &StateOf<Self>, action: &ActionOf<Self>) -> u32 {
        let base = if state.game_data.chain.is_some() { 0 } else { DEFAULT_ACTION_COST };
        action.cost.map_or(base, |cost| cost.max(base))
    }

    fn should_end_turn(&self, state: &StateOf<Self>) -> bool {
        state.game_data.chain.is_none() && state.resources.is_exhausted()
    }
}

/// Builder for Crown Chase games.
#[derive(Clone, Debug)]
pub struct CrownChaseBuilder {
    size: usize,
    budget: TurnBudget,
    options: CrownChaseOptions,
    placements: Vec<Placement<ChasePiece>>,
    seed: u64,
}

impl CrownChaseBuilder {
    /// An empty `size × size` board for two seats.
    #[must_use]
    pub fn empty(size: usize) -> Self {
        Self {
            size,
            budget: TurnBudget::Moves(1),
            options: CrownChaseOptions::default(),
            placements: Vec::new(),
            seed: 0,
        }
    }

    /// The usual opening: men on the dark squares of the first three rows
    /// on each side.
    #[must_use]
    pub fn standard(size: usize) -> Self {
        let mut builder = Self::empty(size);
        let rows = HOME_ROWS.min(size.saturating_sub(2) / 2);
        let last = size as i32 - 1;
        for row in 0..rows as i32 {
            for col in 0..size as i32 {
                if (row + col) % 2 == 1 {
                    builder = builder.man(PlayerId::new(0), Position::new(row, col));
                }
                if (last - row + col) % 2 == 1 {
                    builder = builder.man(PlayerId::new(1), Position::new(last - row, col));
                }
            }
        }
        builder
    }

    #[must_use]
    pub fn man(self, owner: PlayerId, position: Position) -> Self {
        self.piece(ChasePiece::Man, owner, position)
    }

    #[must_use]
    pub fn crown(self, owner: PlayerId, position: Position) -> Self {
        self.piece(ChasePiece::Crown, owner, position)
    }

    #[must_use]
    pub fn piece(mut self, kind: ChasePiece, owner: PlayerId, position: Position) -> Self {
        let value = match kind {
            ChasePiece::Man => MAN_VALUE,
            ChasePiece::Crown => CROWN_VALUE,
        };
        self.placements
            .push(Placement::piece(kind, owner, position).with_value(value));
        self
    }

    #[must_use]
    pub fn budget(mut self, budget: TurnBudget) -> Self {
        self.budget = budget;
        self
    }

    #[must_use]
    pub fn mandatory_capture(mut self, enabled: bool) -> Self {
        self.options.mandatory_capture = enabled;
        self
    }

    #[must_use]
    pub fn draw_after(mut self, actions: u32) -> Self {
        self.options.draw_after = actions;
        self
    }

    #[must_use]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    #[must_use]
    pub fn config(&self) -> GameConfig<ChasePiece> {
        let mut config = GameConfig::new(self.size, self.size, 2)
            .with_budget(self.budget)
            .with_seed(self.seed)
            .with_metadata(
                "Crown Chase",
                "Jump diagonally over enemy pieces; reach the far row to be crowned.",
            );
        config.placements = self.placements.clone();
        config
    }

    #[must_use]
    pub fn build(self) -> GameEngine<CrownChase> {
        let config = self.config();
        GameEngine::new(config, CrownChase::new(self.options))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::GameState;

    fn p(row: i32, col: i32) -> Position {
        Position::new(row, col)
    }

    fn state_for(builder: &CrownChaseBuilder, rules: &CrownChase) -> StateOf<CrownChase> {
        let mut state: StateOf<CrownChase> = GameState::new(&builder.config()).unwrap();
        rules.on_game_start(&mut state, &mut Vec::new());
        state
    }

    #[test]
    fn test_standard_layout() {
        let config = CrownChaseBuilder::standard(8).config();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.placements.len(), 24);
        assert!(config
            .placements
            .iter()
            .all(|pl| (pl.position.row + pl.position.col) % 2 == 1));
    }

    #[test]
    fn test_men_move_forward_only() {
        let builder = CrownChaseBuilder::empty(6)
            .man(PlayerId::new(0), p(2, 1))
            .man(PlayerId::new(1), p(5, 4));
        let rules = CrownChase::default();
        let state = state_for(&builder, &rules);

        assert!(rules.validate_move(&state, &mut TurnAction::movement(p(2, 1), p(3, 2))));
        assert!(!rules.validate_move(&state, &mut TurnAction::movement(p(2, 1), p(1, 2))));
        assert!(!rules.validate_move(&state, &mut TurnAction::movement(p(2, 1), p(3, 1))));
    }

    #[test]
    fn test_jump_reclassified() {
        let builder = CrownChaseBuilder::empty(6)
            .man(PlayerId::new(0), p(1, 1))
            .man(PlayerId::new(1), p(2, 2))
            .man(PlayerId::new(1), p(5, 0));
        let rules = CrownChase::default();
        let state = state_for(&builder, &rules);

        let mut action = TurnAction::movement(p(1, 1), p(3, 3));
        assert!(rules.validate_move(&state, &mut action));
        assert_eq!(action.kind, ActionKind::Jump);
    }

    #[test]
    fn test_mandatory_capture_blocks_steps() {
        let builder = CrownChaseBuilder::empty(6)
            .man(PlayerId::new(0), p(1, 1))
            .man(PlayerId::new(0), p(1, 5))
            .man(PlayerId::new(1), p(2, 2));
        let state = state_for(&builder, &CrownChase::default());

        let strict = CrownChase::default();
        assert!(!strict.validate_move(&state, &mut TurnAction::movement(p(1, 5), p(2, 4))));
        let actions = strict.available_actions(&state, None);
        assert_eq!(actions.len(), 1);
        assert_eq!(actions[0].kind, ActionKind::Jump);

        let relaxed = CrownChase::new(CrownChaseOptions {
            mandatory_capture: false,
            ..CrownChaseOptions::default()
        });
        assert!(relaxed.validate_move(&state, &mut TurnAction::movement(p(1, 5), p(2, 4))));
    }

    #[test]
    fn test_crown_flagged_at_start() {
        let builder = CrownChaseBuilder::empty(4).crown(PlayerId::new(0), p(0, 1));
        let state = state_for(&builder, &CrownChase::default());
        let crown = state.piece_at(p(0, 1)).unwrap();
        assert!(crown.flags.promoted);
        assert_eq!(crown.value, Some(CROWN_VALUE));
    }

    #[test]
    fn test_explicit_cost_cannot_undercut_step() {
        let builder = CrownChaseBuilder::empty(6)
            .man(PlayerId::new(0), p(2, 1))
            .man(PlayerId::new(1), p(5, 4));
        let rules = CrownChase::default();
        let mut state = state_for(&builder, &rules);

        let free = TurnAction::movement(p(2, 1), p(3, 2)).with_cost(0);
        assert_eq!(rules.calculate_action_cost(&state, &free), 1);
        assert_eq!(rules.calculate_action_cost(&state, &free.clone().with_cost(3)), 3);

        state.game_data.chain = Some(p(2, 1));
        assert_eq!(rules.calculate_action_cost(&state, &free), 0);
    }

    #[test]
    fn test_crowning_rows() {
        assert_eq!(CrownChase::crowning_row(PlayerId::new(0), 8), 7);
        assert_eq!(CrownChase::crowning_row(PlayerId::new(1), 8), 0);
    }

    #[test]
    fn test_draw_after_quiet_actions() {
        let builder = CrownChaseBuilder::empty(6)
            .crown(PlayerId::new(0), p(0, 1))
            .crown(PlayerId::new(1), p(5, 4));
        let rules = CrownChase::new(CrownChaseOptions {
            draw_after: 3,
            ..CrownChaseOptions::default()
        });
        let mut state = state_for(&builder, &rules);
        assert!(rules.check_win_condition(&state).is_none());

        state.game_data.quiet_actions = 3;
        let result = rules.check_win_condition(&state).unwrap();
        assert_eq!(result.result, crate::core::GameResult::Draw);
    }
}
