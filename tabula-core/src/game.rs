//! Turn controller.
//!
//! A [`Game`] owns the board, the move history, the side to move and the
//! move counter, and walks each half-move through two steps: select an
//! origin, then choose a destination among its candidates. Any failure drops
//! the selection and leaves the state as it was.
//!
//! ```text
//! AwaitingOrigin ──select_origin──▶ AwaitingDestination
//!       ▲                                  │
//!       └──── choose_destination / error ──┘
//!
//! Any phase ──resign / termination check──▶ Finished
//! Any phase ──rollback / redo──▶ AwaitingOrigin (or Finished again)
//! ```

use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::board::Board;
use crate::color::Color;
use crate::error::{GameError, GameResult};
use crate::history::MoveHistory;
use crate::moves::Move;
use crate::pieces::Piece;
use crate::position::Position;
use crate::variants::VariantRules;
use crate::view::BoardView;

// ============================================================================
// Outcome & Phase
// ============================================================================

/// How a game ended.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// The loser gave up
    Resignation { winner: Color },
    /// The variant's termination rule decided the game
    Decided { winner: Color },
}

impl Outcome {
    pub fn winner(self) -> Color {
        match self {
            Outcome::Resignation { winner } | Outcome::Decided { winner } => winner,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Resignation { winner } => write!(f, "{winner} wins by resignation"),
            Outcome::Decided { winner } => write!(f, "{winner} wins"),
        }
    }
}

/// Where the controller is within a half-move.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Phase {
    AwaitingOrigin,
    AwaitingDestination {
        origin: Position,
        candidates: BTreeSet<Position>,
    },
    Finished(Outcome),
}

// ============================================================================
// Game state
// ============================================================================

/// Board, history, side to move and move counter.
///
/// `move_count` always equals the number of applied moves in `history`.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct GameState {
    board: Board,
    history: MoveHistory,
    active: Color,
    move_count: usize,
}

impl GameState {
    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn history(&self) -> &MoveHistory {
        &self.history
    }

    #[inline]
    pub fn active_color(&self) -> Color {
        self.active
    }

    /// Completed half-moves.
    #[inline]
    pub fn move_count(&self) -> usize {
        self.move_count
    }

    /// Take back the last applied move.
    fn retreat(&mut self) -> GameResult<()> {
        let Some(mv) = self.history.step_back() else {
            return Err(GameError::RollbackUnderflow {
                requested: 1,
                available: 0,
            });
        };
        if let Err(err) = self.board.undo_move(mv) {
            self.history.step_forward();
            return Err(err);
        }
        self.move_count -= 1;
        self.active = self.active.opponent();
        Ok(())
    }

    /// Re-apply the next rolled-back move.
    fn advance(&mut self) -> GameResult<()> {
        let Some(mv) = self.history.step_forward() else {
            return Err(GameError::RedoUnavailable {
                requested: 1,
                available: 0,
            });
        };
        if let Err(err) = self.board.apply_move(mv) {
            self.history.step_back();
            return Err(err);
        }
        self.move_count += 1;
        self.active = self.active.opponent();
        Ok(())
    }
}

// ============================================================================
// Game
// ============================================================================

/// One game in progress under a variant's rules.
#[derive(Clone, Debug)]
pub struct Game {
    rules: Arc<dyn VariantRules>,
    state: GameState,
    phase: Phase,
}

impl Game {
    /// Start a game from the variant's initial layout.
    pub fn new(rules: Arc<dyn VariantRules>) -> GameResult<Game> {
        let layout = rules.initial_layout();
        let active = rules.first_to_move();
        Game::from_position(rules, layout, active)
    }

    /// Start a game from an arbitrary layout with `active` to move.
    pub fn from_position(
        rules: Arc<dyn VariantRules>,
        layout: impl IntoIterator<Item = (Position, Piece)>,
        active: Color,
    ) -> GameResult<Game> {
        let board = Board::with_layout(rules.topology(), layout)?;
        let mut game = Game {
            rules,
            state: GameState {
                board,
                history: MoveHistory::new(),
                active,
                move_count: 0,
            },
            phase: Phase::AwaitingOrigin,
        };
        game.refresh_outcome();
        debug!("[GAME] New {} game, {} to move", game.rules.name(), active);
        Ok(game)
    }

    // ========== Accessors ==========

    #[inline]
    pub fn rules(&self) -> &dyn VariantRules {
        self.rules.as_ref()
    }

    #[inline]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.state.board
    }

    pub fn board_view(&self) -> BoardView {
        self.state.board.view()
    }

    #[inline]
    pub fn active_color(&self) -> Color {
        self.state.active
    }

    #[inline]
    pub fn move_count(&self) -> usize {
        self.state.move_count
    }

    #[inline]
    pub fn history(&self) -> &MoveHistory {
        &self.state.history
    }

    #[inline]
    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn outcome(&self) -> Option<Outcome> {
        match self.phase {
            Phase::Finished(outcome) => Some(outcome),
            _ => None,
        }
    }

    /// Check if the game has finished.
    pub fn is_over(&self) -> bool {
        matches!(self.phase, Phase::Finished(_))
    }

    // ========== Two-step move entry ==========

    /// Pick the piece to move. Returns its candidate destinations.
    pub fn select_origin(&mut self, origin: Position) -> GameResult<BTreeSet<Position>> {
        self.ensure_playing()?;
        self.phase = Phase::AwaitingOrigin;

        self.state.board.check_bounds(origin)?;
        let color = self.state.active;
        let piece = match self.state.board.piece_at(origin) {
            Some(piece) if piece.color == color => piece,
            _ => {
                debug!("[GAME] Rejected selection of {} for {}", origin, color);
                return Err(GameError::InvalidSelection { at: origin, color });
            }
        };

        let candidates = piece.candidate_destinations(origin, &self.state.board, self.rules.as_ref());
        self.phase = Phase::AwaitingDestination {
            origin,
            candidates: candidates.clone(),
        };
        Ok(candidates)
    }

    /// Move the selected piece to `destination`.
    pub fn choose_destination(&mut self, destination: Position) -> GameResult<Move> {
        self.ensure_playing()?;
        let (origin, candidates) = match std::mem::replace(&mut self.phase, Phase::AwaitingOrigin) {
            Phase::AwaitingDestination { origin, candidates } => (origin, candidates),
            _ => return Err(GameError::NoSelection),
        };

        self.state.board.check_bounds(destination)?;
        if !candidates.contains(&destination) {
            debug!("[GAME] Rejected {} -> {}: not reachable", origin, destination);
            return Err(GameError::IllegalMove {
                from: origin,
                to: destination,
            });
        }

        let mv = self.build_move(origin, destination)?;
        self.state.board.apply_move(&mv)?;
        if let Err(reason) = self.rules.check_move(&self.state.board, &mv) {
            self.state.board.undo_move(&mv)?;
            debug!("[GAME] Rejected {} -> {}: {}", origin, destination, reason);
            return Err(GameError::RuleViolation {
                from: origin,
                to: destination,
                reason,
            });
        }

        debug!(
            "[GAME] {} plays {}",
            self.state.active,
            mv.describe(self.state.board.topology())
        );
        self.state.history.record(mv.clone());
        self.state.move_count += 1;
        self.state.active = self.state.active.opponent();
        self.refresh_outcome();
        Ok(mv)
    }

    /// Both steps at once.
    pub fn submit_move(&mut self, origin: Position, destination: Position) -> GameResult<Move> {
        self.select_origin(origin)?;
        self.choose_destination(destination)
    }

    /// Drop the current selection.
    pub fn cancel_selection(&mut self) {
        if matches!(self.phase, Phase::AwaitingDestination { .. }) {
            self.phase = Phase::AwaitingOrigin;
        }
    }

    /// `color` gives up; the opponent wins.
    pub fn resign(&mut self, color: Color) -> GameResult<Outcome> {
        self.ensure_playing()?;
        let outcome = Outcome::Resignation {
            winner: color.opponent(),
        };
        info!("[GAME] {} resigns, {}", color, outcome);
        self.phase = Phase::Finished(outcome);
        Ok(outcome)
    }

    /// Candidates of the piece on `origin` that the variant's post-move
    /// check also accepts. Works for either color and any phase.
    pub fn legal_destinations(&self, origin: Position) -> GameResult<BTreeSet<Position>> {
        self.state.board.check_bounds(origin)?;
        let Some(piece) = self.state.board.piece_at(origin) else {
            return Ok(BTreeSet::new());
        };

        let rules = self.rules.as_ref();
        let mut trial = self.state.board.clone();
        let candidates = piece.candidate_destinations(origin, &trial, rules);
        let mut legal = BTreeSet::new();
        for destination in candidates {
            let mv = self.move_on(&trial, piece, origin, destination);
            trial.apply_move(&mv)?;
            let accepted = rules.check_move(&trial, &mv).is_ok();
            trial.undo_move(&mv)?;
            if accepted {
                legal.insert(destination);
            }
        }
        Ok(legal)
    }

    // ========== Rollback & Redo ==========

    /// Take back the last `count` moves. A count of zero changes nothing,
    /// not even a finished phase.
    pub fn rollback(&mut self, count: usize) -> GameResult<&GameState> {
        let available = self.state.history.len();
        if count > available {
            return Err(GameError::RollbackUnderflow {
                requested: count,
                available,
            });
        }
        if count == 0 {
            return Ok(&self.state);
        }

        for done in 0..count {
            if let Err(err) = self.state.retreat() {
                self.restore(done, GameState::advance);
                return Err(err);
            }
        }

        debug!("[GAME] Rolled back {} moves, {} to move", count, self.state.active);
        self.refresh_outcome();
        Ok(&self.state)
    }

    /// Re-apply `count` rolled-back moves.
    pub fn redo(&mut self, count: usize) -> GameResult<&GameState> {
        let available = self.state.history.redo_len();
        if count > available {
            return Err(GameError::RedoUnavailable {
                requested: count,
                available,
            });
        }
        if count == 0 {
            return Ok(&self.state);
        }

        for done in 0..count {
            if let Err(err) = self.state.advance() {
                self.restore(done, GameState::retreat);
                return Err(err);
            }
        }

        debug!("[GAME] Redid {} moves, {} to move", count, self.state.active);
        self.refresh_outcome();
        Ok(&self.state)
    }

    // ========== Internals ==========

    fn ensure_playing(&self) -> GameResult<()> {
        match self.phase {
            Phase::Finished(outcome) => Err(GameError::GameOver(outcome)),
            _ => Ok(()),
        }
    }

    /// Walk `steps` moves back in the other direction after a failed
    /// rollback or redo.
    fn restore(&mut self, steps: usize, step: fn(&mut GameState) -> GameResult<()>) {
        for _ in 0..steps {
            if let Err(err) = step(&mut self.state) {
                warn!("[GAME] Could not restore history: {}", err);
                break;
            }
        }
    }

    fn build_move(&self, origin: Position, destination: Position) -> GameResult<Move> {
        let piece = self
            .state
            .board
            .piece_at(origin)
            .ok_or(GameError::InvalidSelection {
                at: origin,
                color: self.state.active,
            })?;
        Ok(self.move_on(&self.state.board, piece, origin, destination))
    }

    /// The move the variant makes of `piece` going `origin` → `destination`.
    fn move_on(&self, board: &Board, piece: Piece, origin: Position, destination: Position) -> Move {
        let mut mv = Move::new(origin, destination, piece);
        for capture in self.rules.captures(piece, origin, destination, board) {
            mv = mv.with_capture(capture);
        }
        if let Some(kind) = self.rules.promotion(piece, destination) {
            mv = mv.with_promotion(kind);
        }
        mv
    }

    fn refresh_outcome(&mut self) {
        self.phase = match self.rules.outcome(&self.state.board, self.state.active) {
            Some(outcome) => {
                info!("[GAME] Game over: {}", outcome);
                Phase::Finished(outcome)
            }
            None => Phase::AwaitingOrigin,
        };
    }
}
