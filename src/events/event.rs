//! Game events.
//!
//! Events report what happened during a call into the engine. They are
//! transient feedback for the caller (highlight a capture, explain a
//! rejected click); everything that matters for play is also in the
//! `GameState`.

use serde::{Deserialize, Serialize};

use crate::core::{DiceRoll, Piece, PlayerId, Position, Rejection, TurnAction, WinResult};

/// Something that happened in the game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent<K> {
    /// A seat's turn began.
    TurnStart { player: PlayerId, turn: u32 },

    /// A seat's turn finished.
    TurnEnd { player: PlayerId, turn: u32 },

    /// An action was applied. `action` is the post-validation form, with
    /// any kind reclassification and the moved/captured pieces filled in.
    ActionExecuted { player: PlayerId, action: TurnAction<K> },

    /// An action was refused; the state is unchanged.
    InvalidAction {
        player: PlayerId,
        action: TurnAction<K>,
        reason: Rejection,
    },

    /// A piece was removed from the board.
    PieceCaptured {
        by: Option<PlayerId>,
        piece: Piece<K>,
        at: Position,
    },

    /// A piece was promoted in place. `piece` is the promoted form.
    PiecePromoted { piece: Piece<K>, at: Position },

    /// An obstacle was put on the board.
    BarrierPlaced { player: PlayerId, at: Position },

    /// Dice were rolled.
    DiceRolled { player: PlayerId, roll: DiceRoll },

    /// The game ended.
    Win { result: WinResult },
}

impl<K> GameEvent<K> {
    /// Snake-case event name, matching the serialized `type` tag.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            GameEvent::TurnStart { .. } => "turn_start",
            GameEvent::TurnEnd { .. } => "turn_end",
            GameEvent::ActionExecuted { .. } => "action_executed",
            GameEvent::InvalidAction { .. } => "invalid_action",
            GameEvent::PieceCaptured { .. } => "piece_captured",
            GameEvent::PiecePromoted { .. } => "piece_promoted",
            GameEvent::BarrierPlaced { .. } => "barrier_placed",
            GameEvent::DiceRolled { .. } => "dice_rolled",
            GameEvent::Win { .. } => "win",
        }
    }

    /// The seat the event concerns, if any.
    #[must_use]
    pub fn player(&self) -> Option<PlayerId> {
        match self {
            GameEvent::TurnStart { player, .. }
            | GameEvent::TurnEnd { player, .. }
            | GameEvent::ActionExecuted { player, .. }
            | GameEvent::InvalidAction { player, .. }
            | GameEvent::BarrierPlaced { player, .. }
            | GameEvent::DiceRolled { player, .. } => Some(*player),
            GameEvent::PieceCaptured { by, .. } => *by,
            GameEvent::PiecePromoted { piece, .. } => piece.owner,
            GameEvent::Win { result } => match result.result {
                crate::core::GameResult::Winner(p) => Some(p),
                crate::core::GameResult::Draw => None,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::GameResult;

    #[test]
    fn test_names() {
        let start: GameEvent<()> = GameEvent::TurnStart {
            player: PlayerId::new(0),
            turn: 0,
        };
        assert_eq!(start.name(), "turn_start");
        assert_eq!(start.player(), Some(PlayerId::new(0)));

        let draw: GameEvent<()> = GameEvent::Win {
            result: WinResult::draw("board locked"),
        };
        assert_eq!(draw.name(), "win");
        assert_eq!(draw.player(), None);
    }

    #[test]
    fn test_serialized_tag_matches_name() {
        let rejected: GameEvent<()> = GameEvent::InvalidAction {
            player: PlayerId::new(1),
            action: TurnAction::movement(Position::new(0, 0), Position::new(0, 1)),
            reason: Rejection::InvalidMove,
        };

        let json = serde_json::to_value(&rejected).unwrap();
        assert_eq!(json["type"], "invalid_action");

        let restored: GameEvent<()> = serde_json::from_value(json).unwrap();
        assert_eq!(restored, rejected);
    }

    #[test]
    fn test_win_event_player() {
        let win: GameEvent<()> = GameEvent::Win {
            result: WinResult {
                result: GameResult::Winner(PlayerId::new(2)),
                reason: "captured every king".into(),
                immediate: true,
            },
        };
        assert_eq!(win.player(), Some(PlayerId::new(2)));
    }
}
