//! Turn actions.
//!
//! A `TurnAction` is a request from the caller (or from a rule set's
//! action enumeration) to do one thing on the board. It is consumed once
//! by the engine. Validation may rewrite its `kind`: a `Move` whose
//! destination turns out to hold a capturable enemy becomes a `Capture`
//! (or a `Jump`, for jump-capture games), and execution fills in the
//! moved and captured pieces for the history log.

use serde::{Deserialize, Serialize};

use super::piece::Piece;
use super::player::PlayerId;
use super::position::Position;

/// What an action does.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionKind {
    /// Move a piece to another cell.
    Move,
    /// Move a piece onto an enemy, removing it.
    Capture,
    /// Put a new piece on the board.
    Place,
    /// Rule-set specific action identified by `TurnAction::tag`.
    Custom,
    /// Jump over a piece, removing it.
    Jump,
    /// Rebound off another piece or the edge.
    Bounce,
    /// Promote a piece in place.
    Promote,
    /// Roll the configured dice.
    RollDice,
}

/// A single action request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnAction<K> {
    pub kind: ActionKind,
    pub from: Option<Position>,
    pub to: Option<Position>,
    /// Piece to place (`Place`), or the piece that moved once executed.
    pub piece: Option<Piece<K>>,
    /// Piece removed by this action, filled in on execution.
    pub captured: Option<Piece<K>>,
    /// Rule-set specific discriminator for `Custom` actions.
    pub tag: Option<u32>,
    /// Explicit cost; when `None` the rule set decides (default 1).
    pub cost: Option<u32>,
}

impl<K> TurnAction<K> {
    fn bare(kind: ActionKind) -> Self {
        Self {
            kind,
            from: None,
            to: None,
            piece: None,
            captured: None,
            tag: None,
            cost: None,
        }
    }

    /// Move the piece on `from` to `to`.
    #[must_use]
    pub fn movement(from: Position, to: Position) -> Self {
        Self {
            from: Some(from),
            to: Some(to),
            ..Self::bare(ActionKind::Move)
        }
    }

    /// An action of `kind` between two cells.
    #[must_use]
    pub fn between(kind: ActionKind, from: Position, to: Position) -> Self {
        Self {
            from: Some(from),
            to: Some(to),
            ..Self::bare(kind)
        }
    }

    /// Put `piece` on `to`.
    #[must_use]
    pub fn place(to: Position, piece: Piece<K>) -> Self {
        Self {
            to: Some(to),
            piece: Some(piece),
            ..Self::bare(ActionKind::Place)
        }
    }

    /// Roll the configured dice.
    #[must_use]
    pub fn roll_dice() -> Self {
        Self::bare(ActionKind::RollDice)
    }

    /// A rule-set specific action.
    #[must_use]
    pub fn custom(tag: u32) -> Self {
        Self {
            tag: Some(tag),
            ..Self::bare(ActionKind::Custom)
        }
    }

    /// Override the cost the rule set would assign.
    #[must_use]
    pub fn with_cost(mut self, cost: u32) -> Self {
        self.cost = Some(cost);
        self
    }

    /// Both endpoints, if this action has them.
    #[must_use]
    pub fn endpoints(&self) -> Option<(Position, Position)> {
        Some((self.from?, self.to?))
    }
}

/// An executed action, as kept in the history log.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord<K> {
    /// The player who acted.
    pub player: PlayerId,
    /// The action after validation and execution.
    pub action: TurnAction<K>,
    /// Turn number when the action was taken.
    pub turn: u32,
    /// Position in the whole-game history, starting at 0.
    pub sequence: u32,
}

impl<K> ActionRecord<K> {
    #[must_use]
    pub fn new(player: PlayerId, action: TurnAction<K>, turn: u32, sequence: u32) -> Self {
        Self {
            player,
            action,
            turn,
            sequence,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_movement_action() {
        let action: TurnAction<()> = TurnAction::movement(Position::new(0, 0), Position::new(2, 2));

        assert_eq!(action.kind, ActionKind::Move);
        assert_eq!(action.endpoints(), Some((Position::new(0, 0), Position::new(2, 2))));
        assert_eq!(action.cost, None);
    }

    #[test]
    fn test_shapeless_actions() {
        let roll: TurnAction<()> = TurnAction::roll_dice();
        assert_eq!(roll.kind, ActionKind::RollDice);
        assert_eq!(roll.endpoints(), None);

        let custom: TurnAction<()> = TurnAction::custom(9).with_cost(3);
        assert_eq!(custom.tag, Some(9));
        assert_eq!(custom.cost, Some(3));
    }

    #[test]
    fn test_action_record_serialization() {
        let action: TurnAction<()> = TurnAction::movement(Position::new(1, 1), Position::new(2, 2));
        let record = ActionRecord::new(PlayerId::new(1), action, 4, 9);

        let json = serde_json::to_string(&record).unwrap();
        let restored: ActionRecord<()> = serde_json::from_str(&json).unwrap();

        assert_eq!(record, restored);
    }
}
