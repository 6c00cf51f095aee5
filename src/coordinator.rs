//! Serializes human input, AI computation and move resolution so that
//! exactly one logical move is in flight at a time.
//!
//! Two lock flags guard the session: `resolving` while a move is being
//! resolved (the placement "animation" window) and `ai_thinking` while the
//! AI is computing. Both are released on every exit path, including
//! collaborator failures; a single fault must never leave the game unable
//! to accept input.

use std::thread;
use std::time::Duration;

use crate::ai::{AiPlayer, Difficulty};
use crate::error::ObserverError;
use crate::game::{GameSession, Move, Player, WinLine};

/// Sound events the core asks its (out-of-scope) audio collaborator to play.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    PiecePlaced,
    Victory,
    Draw,
}

/// The collaborators the core consumes: a renderer for placed pieces, a
/// sound player, and whoever displays or persists win results. Only piece
/// placement can fail; the remaining calls are notifications.
pub trait GameObserver {
    fn piece_placed(&mut self, mv: Move) -> Result<(), ObserverError>;
    fn cue(&mut self, _cue: SoundCue) {}
    fn game_won(&mut self, _line: &WinLine) {}
    fn game_drawn(&mut self) {}
}

/// Observer that ignores everything; useful for pull-based callers that
/// re-read the session instead of listening for events.
pub struct SilentObserver;

impl GameObserver for SilentObserver {
    fn piece_placed(&mut self, _mv: Move) -> Result<(), ObserverError> {
        Ok(())
    }
}

/// What a submitted move turned into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnOutcome {
    /// The input was not accepted (locked, out of turn, game over, or the
    /// cell is unavailable). Nothing changed.
    Rejected,
    Continuing,
    Won(WinLine),
    Draw,
}

pub struct TurnCoordinator {
    session: GameSession,
    ai: AiPlayer,
    /// Which side the AI plays; `None` for two human players.
    ai_side: Option<Player>,
    /// Pause after a placement before win/draw is evaluated, so a placement
    /// animation can settle. Zero in headless use.
    settle: Duration,
    /// Whether the AI pauses for its difficulty's thinking delay.
    paced: bool,
    resolving: bool,
    ai_thinking: bool,
}

impl TurnCoordinator {
    pub fn new(session: GameSession, ai: AiPlayer, ai_side: Option<Player>) -> Self {
        TurnCoordinator {
            session,
            ai,
            ai_side,
            settle: Duration::ZERO,
            paced: false,
            resolving: false,
            ai_thinking: false,
        }
    }

    pub fn with_pacing(mut self, settle: Duration, paced: bool) -> Self {
        self.settle = settle;
        self.paced = paced;
        self
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn ai(&self) -> &AiPlayer {
        &self.ai
    }

    pub fn ai_side(&self) -> Option<Player> {
        self.ai_side
    }

    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.ai.set_difficulty(difficulty);
    }

    /// Whether a human click would currently be accepted: no resolution
    /// pending and the AI idle.
    pub fn accepts_input(&self) -> bool {
        !self.resolving && !self.ai_thinking
    }

    pub fn is_ai_turn(&self) -> bool {
        self.session.is_active() && self.ai_side == Some(self.session.current_player())
    }

    /// Start a fresh game and drop any stale locks.
    pub fn reset(&mut self) {
        self.session.reset();
        self.resolving = false;
        self.ai_thinking = false;
    }

    /// Best column/cell for the side to move, for an on-demand suggestion.
    /// Unavailable while a move is in flight or after the game ended.
    pub fn hint(&mut self) -> Option<(usize, usize)> {
        if !self.accepts_input() || !self.session.is_active() {
            return None;
        }
        let player = self.session.current_player();
        self.ai.get_hint(&self.session, player)
    }

    /// Submit a human move for the side currently to move.
    ///
    /// Rejected (without touching the session) while locked, when it is the
    /// AI's turn, when the game is over, or when the target cell is
    /// unavailable. On an observer error the state transition is still
    /// finalized and the lock released before the error is returned.
    pub fn human_move(
        &mut self,
        row: usize,
        col: usize,
        observer: &mut dyn GameObserver,
    ) -> Result<TurnOutcome, ObserverError> {
        if !self.accepts_input() || !self.session.is_active() || self.is_ai_turn() {
            return Ok(TurnOutcome::Rejected);
        }
        if !self.session.is_valid_move(row, col) {
            return Ok(TurnOutcome::Rejected);
        }

        let player = self.session.current_player();
        self.resolving = true;
        let result = self.resolve_move(row, col, player, observer);
        // lock always releases, whatever resolution did
        self.resolving = false;
        result
    }

    /// Let the AI take its turn, if it is one. Blocks for the thinking
    /// delay (when pacing is on) plus the search itself.
    pub fn ai_turn(&mut self, observer: &mut dyn GameObserver) -> Result<TurnOutcome, ObserverError> {
        if !self.is_ai_turn() || !self.accepts_input() {
            return Ok(TurnOutcome::Rejected);
        }

        self.ai_thinking = true;
        self.resolving = true;
        let result = self.run_ai_turn(observer);
        // both locks always release, whatever happened above
        self.ai_thinking = false;
        self.resolving = false;
        result
    }

    fn run_ai_turn(&mut self, observer: &mut dyn GameObserver) -> Result<TurnOutcome, ObserverError> {
        if self.paced {
            thread::sleep(self.ai.difficulty().thinking_delay());
        }

        let player = self.session.current_player();
        match self.ai.get_best_move(&self.session, player) {
            Some((row, col)) => self.resolve_move(row, col, player, observer),
            None => {
                // no move can only mean a full board; confirm rather than
                // trusting the AI
                if self.session.is_board_full() {
                    self.session.mark_draw();
                    observer.cue(SoundCue::Draw);
                    observer.game_drawn();
                    Ok(TurnOutcome::Draw)
                } else {
                    Ok(TurnOutcome::Rejected)
                }
            }
        }
    }

    /// Apply a validated move and walk it through placement, settle delay,
    /// terminal-state evaluation and the turn switch.
    ///
    /// The observer's placement failure is remembered but the transition
    /// still completes; the session is never left between states.
    fn resolve_move(
        &mut self,
        row: usize,
        col: usize,
        player: Player,
        observer: &mut dyn GameObserver,
    ) -> Result<TurnOutcome, ObserverError> {
        if self.session.make_move(row, col, player).is_err() {
            return Ok(TurnOutcome::Rejected);
        }

        observer.cue(SoundCue::PiecePlaced);
        let placed = observer.piece_placed(Move { row, col, player });

        if self.settle > Duration::ZERO {
            thread::sleep(self.settle);
        }

        let outcome = if let Some(line) = self.session.check_win(row, col) {
            self.session.mark_won(line.clone());
            observer.cue(SoundCue::Victory);
            observer.game_won(&line);
            TurnOutcome::Won(line)
        } else if self.session.is_board_full() {
            self.session.mark_draw();
            observer.cue(SoundCue::Draw);
            observer.game_drawn();
            TurnOutcome::Draw
        } else {
            self.session.switch_player();
            TurnOutcome::Continuing
        };

        placed?;
        Ok(outcome)
    }
}
