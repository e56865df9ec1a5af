//! The game engine.
//!
//! `GameEngine` runs one `RuleSet` against one game. It owns the
//! configuration, the rule set and the event bus; the caller owns the
//! `GameState` and hands it in for every call.
//!
//! ## Action Flow
//!
//! 1. Refuse if the game has ended.
//! 2. `RollDice` with dice configured: roll, record, done (no cost, the
//!    turn continues).
//! 3. `RuleSet::validate_move` (may reclassify the action).
//! 4. Cost from `RuleSet::calculate_action_cost`, checked against the
//!    turn's pool.
//! 5. `RuleSet::execute_action`.
//! 6. Deduct cost, append history, `on_after_action`.
//! 7. Win check: record the result and stop, or
//! 8. Turn end if `should_end_turn`: `on_turn_end`, next seat,
//!    `turn_count + 1`, refill pool, `on_turn_start`.
//!
//! All of this runs on a private copy of the state. The copy replaces the
//! caller's state only if every step succeeded, and events are delivered
//! only after that, so a rejected action leaves the caller's state exactly
//! as it was and listeners always see committed state.

use tracing::{debug, instrument};

use super::timer::TurnTimer;
use crate::core::{
    ActionKind, ActionRecord, ConfigError, GameConfig, GamePhase, GameState, Position, Rejection,
    ResourcePool, WinResult,
};
use crate::events::{EventBus, GameEvent, ListenerId};
use crate::rules::{ActionOf, EventOf, RuleSet, StateOf};

/// A successfully applied action: the next state and what happened on
/// the way there, in order.
pub struct Transition<R: RuleSet> {
    pub state: StateOf<R>,
    pub events: Vec<EventOf<R>>,
}

/// Orchestrates a rule set against a game state.
pub struct GameEngine<R: RuleSet> {
    config: GameConfig<R::Kind>,
    rules: R,
    events: EventBus<R::Kind>,
}

impl<R: RuleSet> GameEngine<R> {
    #[must_use]
    pub fn new(config: GameConfig<R::Kind>, rules: R) -> Self {
        Self {
            config,
            rules,
            events: EventBus::new(),
        }
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig<R::Kind> {
        &self.config
    }

    #[must_use]
    pub fn rules(&self) -> &R {
        &self.rules
    }

    // === Events ===

    /// Register a listener for every event emitted from now on.
    pub fn add_event_listener(&mut self, listener: impl FnMut(&EventOf<R>) + 'static) -> ListenerId {
        let id = self.events.add_listener(listener);
        debug!(listeners = self.events.listener_count(), "listener added");
        id
    }

    pub fn remove_event_listener(&mut self, id: ListenerId) -> bool {
        let removed = self.events.remove_listener(id);
        debug!(removed, listeners = self.events.listener_count(), "listener removed");
        removed
    }

    // === Setup ===

    /// Build the starting state, run the start hooks and announce the first
    /// turn.
    ///
    /// # Errors
    ///
    /// Returns the configuration's validation error.
    #[instrument(skip_all, fields(game = %self.config.metadata.name))]
    pub fn initialize_game(&mut self) -> Result<StateOf<R>, ConfigError> {
        let mut state: StateOf<R> = GameState::new(&self.config)?;
        let mut events = Vec::new();

        self.rules.on_game_start(&mut state, &mut events);
        self.rules.on_turn_start(&mut state, &mut events);
        events.push(GameEvent::TurnStart {
            player: state.current_player,
            turn: state.turn_count,
        });

        debug!(
            players = state.player_count(),
            pieces = state.board.occupied(),
            "game initialized"
        );
        self.events.emit_all(&events);
        Ok(state)
    }

    // === Actions ===

    /// Apply `action` to a copy of `state` and return the result, without
    /// touching `state` or emitting anything.
    ///
    /// # Errors
    ///
    /// Returns why the action was refused.
    pub fn apply_action(&self, state: &StateOf<R>, action: &ActionOf<R>) -> Result<Transition<R>, Rejection> {
        if state.phase != GamePhase::Playing {
            return Err(Rejection::GameOver);
        }

        let mut next = state.clone_state();
        let mut events = Vec::new();
        let mut action = action.clone();
        let player = next.current_player;

        if action.kind == ActionKind::RollDice {
            if let Some(dice) = self.config.dice {
                let roll = next.rng.roll_dice(dice.count, dice.sides);
                next.last_dice_roll = Some(roll.clone());
                events.push(GameEvent::DiceRolled { player, roll });
                return Ok(Transition { state: next, events });
            }
        }

        if !self.rules.validate_move(&next, &mut action) {
            return Err(Rejection::InvalidMove);
        }

        let cost = self.rules.calculate_action_cost(&next, &action);
        let remaining = next.resources.remaining();
        if !next.resources.can_afford(cost) {
            return Err(Rejection::InsufficientResources { cost, remaining });
        }

        if !self.rules.execute_action(&mut next, &mut action, &mut events) {
            return Err(Rejection::ExecutionFailed);
        }

        next.resources.spend(cost);
        let sequence = next.action_history.len() as u32;
        next.action_history
            .push_back(ActionRecord::new(player, action.clone(), next.turn_count, sequence));
        next.last_action = Some(action.clone());
        events.push(GameEvent::ActionExecuted {
            player,
            action: action.clone(),
        });

        self.rules.on_after_action(&mut next, &action, &mut events);

        if let Some(win) = self.rules.check_win_condition(&next) {
            Self::finish(&mut next, win, &mut events);
            return Ok(Transition { state: next, events });
        }

        if self.rules.should_end_turn(&next) {
            self.advance_turn(&mut next, &mut events);
        }

        Ok(Transition { state: next, events })
    }

    /// Apply `action` to `state` and deliver the resulting events.
    ///
    /// On refusal `state` is unchanged and an `InvalidAction` event is
    /// emitted, except for actions against a finished game, which are
    /// dropped silently.
    ///
    /// # Errors
    ///
    /// Returns why the action was refused.
    #[instrument(skip_all, fields(player = %state.current_player, kind = ?action.kind))]
    pub fn try_execute_action(&mut self, state: &mut StateOf<R>, action: ActionOf<R>) -> Result<(), Rejection> {
        match self.apply_action(state, &action) {
            Ok(Transition { state: next, events }) => {
                *state = next;
                debug!(
                    turn = state.turn_count,
                    next_player = %state.current_player,
                    remaining = state.resources.remaining(),
                    "action applied"
                );
                self.events.emit_all(&events);
                Ok(())
            }
            Err(Rejection::GameOver) => {
                debug!("action ignored, game is over");
                Err(Rejection::GameOver)
            }
            Err(reason) => {
                debug!(%reason, "action rejected");
                self.events.emit(&GameEvent::InvalidAction {
                    player: state.current_player,
                    action,
                    reason: reason.clone(),
                });
                Err(reason)
            }
        }
    }

    /// Apply `action` to `state`; true if it was applied.
    pub fn execute_action(&mut self, state: &mut StateOf<R>, action: ActionOf<R>) -> bool {
        self.try_execute_action(state, action).is_ok()
    }

    /// End the current turn early, forfeiting whatever budget is left.
    /// The win check runs once the next seat is up, so a seat handed a
    /// lost position ends the game here. Returns false if the game is over.
    pub fn end_turn(&mut self, state: &mut StateOf<R>) -> bool {
        if !state.is_playing() {
            return false;
        }
        let mut events = Vec::new();
        self.advance_turn(state, &mut events);
        if let Some(win) = self.rules.check_win_condition(state) {
            Self::finish(state, win, &mut events);
        }
        self.events.emit_all(&events);
        true
    }

    // === Queries ===

    /// Whether the rule set would accept `action` right now.
    #[must_use]
    pub fn is_legal(&self, state: &StateOf<R>, action: &ActionOf<R>) -> bool {
        state.is_playing() && self.rules.validate_move(state, &mut action.clone())
    }

    /// Legal actions the seat to move can afford, for one piece or all.
    #[must_use]
    pub fn available_actions(&self, state: &StateOf<R>, position: Option<Position>) -> Vec<ActionOf<R>> {
        if !state.is_playing() {
            return Vec::new();
        }
        self.rules
            .available_actions(state, position)
            .into_iter()
            .filter(|action| {
                state
                    .resources
                    .can_afford(self.rules.calculate_action_cost(state, action))
            })
            .collect()
    }

    #[must_use]
    pub fn check_win_condition(&self, state: &StateOf<R>) -> Option<WinResult> {
        self.rules.check_win_condition(state)
    }

    // === Timer ===

    /// Start the configured turn timer, if there is one.
    pub fn start_turn_timer(&self, on_timeout: impl FnOnce() + Send + 'static) -> Option<TurnTimer> {
        self.config
            .turn_time_limit
            .map(|limit| TurnTimer::start(limit, on_timeout))
    }

    // === Transitions ===

    fn advance_turn(&self, state: &mut StateOf<R>, events: &mut Vec<EventOf<R>>) {
        self.rules.on_turn_end(state, events);
        events.push(GameEvent::TurnEnd {
            player: state.current_player,
            turn: state.turn_count,
        });

        state.current_player = state.current_player.next(state.player_count());
        state.turn_count += 1;
        state.resources = ResourcePool::from_budget(self.config.budget);

        self.rules.on_turn_start(state, events);
        events.push(GameEvent::TurnStart {
            player: state.current_player,
            turn: state.turn_count,
        });
    }

    fn finish(state: &mut StateOf<R>, win: WinResult, events: &mut Vec<EventOf<R>>) {
        debug!(result = ?win.result, reason = %win.reason, "game over");
        state.phase = GamePhase::Ended;
        state.winner = Some(win.result);
        events.push(GameEvent::Win { result: win });
    }
}
