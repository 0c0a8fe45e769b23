//! Game session: a board, its state machine and the position history.
//!
//! After every accepted move the state is re-evaluated in a fixed order:
//! checkmate or stalemate first, then the fifty-move rule, insufficient
//! material and threefold repetition. A terminal state refuses further moves
//! until the game is reset or set up again.

mod draw;

use std::fmt;

use log::{debug, warn};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::board::{Board, Color, Move, MoveGenCache, Piece, Square};

pub use draw::{has_insufficient_material, occurrences, FIFTY_MOVE_HALFMOVES, REPETITION_LIMIT};

use draw::MIN_REPETITION_HISTORY;

/// Where the game stands after the last move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum GameState {
    Active,
    Check,
    Checkmate,
    Stalemate,
    DrawFifty,
    DrawRepetition,
    DrawMaterial,
    DrawAgreement,
}

impl GameState {
    /// No move is accepted in a terminal state
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        !matches!(self, GameState::Active | GameState::Check)
    }

    /// Stalemate and every draw rule, agreement included
    #[must_use]
    pub const fn is_draw(self) -> bool {
        matches!(
            self,
            GameState::Stalemate
                | GameState::DrawFifty
                | GameState::DrawRepetition
                | GameState::DrawMaterial
                | GameState::DrawAgreement
        )
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GameState::Active => "active",
            GameState::Check => "check",
            GameState::Checkmate => "checkmate",
            GameState::Stalemate => "stalemate",
            GameState::DrawFifty => "draw (fifty-move rule)",
            GameState::DrawRepetition => "draw (threefold repetition)",
            GameState::DrawMaterial => "draw (insufficient material)",
            GameState::DrawAgreement => "draw (agreed)",
        };
        f.write_str(name)
    }
}

/// A game in progress.
pub struct Game {
    board: Board,
    state: GameState,
    // position keys (FEN without counters), oldest first
    history: Vec<String>,
    cache: MoveGenCache,
}

impl Default for Game {
    fn default() -> Self {
        Game::new()
    }
}

impl Game {
    /// A new game from the standard initial position.
    #[must_use]
    pub fn new() -> Self {
        Game::from_board(Board::new())
    }

    /// Start a game from `fen`. Malformed fields are logged and defaulted,
    /// and a board without exactly one king per color is logged as well.
    #[must_use]
    pub fn from_fen(fen: &str) -> Self {
        let board = Board::from_fen(fen);
        if let Err(err) = board.validate_kings() {
            warn!("{err} (fen: {fen})");
        }
        Game::from_board(board)
    }

    fn from_board(board: Board) -> Self {
        let mut game = Game {
            history: vec![board.position_key()],
            board,
            state: GameState::Active,
            cache: MoveGenCache::default(),
        };
        game.state = game.evaluate_state();
        game
    }

    pub fn reset_game(&mut self) {
        *self = Game::new();
    }

    /// Replace the position with `fen` and restart the history from it.
    pub fn setup_from_fen(&mut self, fen: &str) {
        *self = Game::from_fen(fen);
        debug!("game set up from {fen}: {}", self.state);
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn current_turn(&self) -> Color {
        self.board.side_to_move()
    }

    #[must_use]
    pub fn game_state(&self) -> GameState {
        self.state
    }

    #[must_use]
    pub fn history(&self) -> &[String] {
        &self.history
    }

    #[must_use]
    pub fn fen(&self) -> String {
        self.board.to_fen()
    }

    #[must_use]
    pub fn king_position(&self, color: Color) -> Option<Square> {
        self.board.find_king(color)
    }

    #[must_use]
    pub fn can_castle_kingside(&self, color: Color) -> bool {
        self.board.can_castle(color, true)
    }

    #[must_use]
    pub fn can_castle_queenside(&self, color: Color) -> bool {
        self.board.can_castle(color, false)
    }

    #[must_use]
    pub fn en_passant_target(&self) -> Option<Square> {
        self.board.en_passant_target()
    }

    #[must_use]
    pub fn halfmove_clock(&self) -> u32 {
        self.board.halfmove_clock()
    }

    #[must_use]
    pub fn fullmove_number(&self) -> u32 {
        self.board.fullmove_number()
    }

    /// Whether the side to move is in check
    #[must_use]
    pub fn is_in_check(&self) -> bool {
        self.board.is_in_check(self.current_turn())
    }

    #[must_use]
    pub fn is_checkmate(&self) -> bool {
        self.is_in_check() && !self.side_has_moves()
    }

    #[must_use]
    pub fn is_stalemate(&self) -> bool {
        !self.is_in_check() && !self.side_has_moves()
    }

    #[must_use]
    pub fn is_draw_fifty_move_rule(&self) -> bool {
        self.board.halfmove_clock() >= FIFTY_MOVE_HALFMOVES
    }

    #[must_use]
    pub fn is_draw_by_insufficient_material(&self) -> bool {
        self.board.piece_count() <= 4 && has_insufficient_material(&self.board)
    }

    /// Threefold repetition of the current position.
    #[must_use]
    pub fn is_draw_by_repetition(&self) -> bool {
        self.history.len() >= MIN_REPETITION_HISTORY && self.repetition_count() >= REPETITION_LIMIT
    }

    /// Occurrences of the current position in the history, itself included
    #[must_use]
    pub fn repetition_count(&self) -> usize {
        occurrences(&self.history, &self.board.position_key())
    }

    /// Stalemate, any draw rule, or an agreed draw.
    #[must_use]
    pub fn is_draw(&self) -> bool {
        self.state == GameState::DrawAgreement
            || self.is_stalemate()
            || self.is_draw_fifty_move_rule()
            || self.is_draw_by_insufficient_material()
            || self.is_draw_by_repetition()
    }

    /// Legal destinations for the piece on `from`.
    ///
    /// Empty when the game is over, the square is empty, or the piece
    /// belongs to the side not on move.
    #[must_use]
    pub fn legal_moves(&self, from: Square) -> Vec<Square> {
        if self.state.is_terminal() {
            return Vec::new();
        }
        match self.board.piece_at(from) {
            Some((color, _)) if color == self.current_turn() => {
                let candidates = self.cache.destinations(&self.board, from);
                self.board.filter_legal(from, &candidates)
            }
            _ => Vec::new(),
        }
    }

    /// Play `from -> to`. A promotion becomes a queen.
    pub fn execute_move(&mut self, from: Square, to: Square) -> bool {
        self.play(Move::new(from, to))
    }

    /// Play `from -> to`, promoting to `piece` when the move promotes.
    ///
    /// A king or pawn is not a valid choice and the request is refused.
    pub fn execute_move_with_promotion(&mut self, from: Square, to: Square, piece: Piece) -> bool {
        if self.board.is_promotion(from, to) && !piece.is_promotion_choice() {
            debug!("rejected {from}{to}: cannot promote to {piece}");
            return false;
        }
        self.play(Move::with_promotion(from, to, piece))
    }

    /// Record the answer to a draw offer. Declining changes nothing.
    pub fn offer_draw(&mut self, accepted: bool) {
        if !accepted {
            return;
        }
        if self.state.is_terminal() {
            debug!("draw offer ignored: game already over ({})", self.state);
            return;
        }
        self.state = GameState::DrawAgreement;
        debug!("draw agreed");
    }

    fn play(&mut self, mv: Move) -> bool {
        if self.state.is_terminal() {
            debug!("rejected {mv}: game is over ({})", self.state);
            return false;
        }
        if !self.legal_moves(mv.from()).contains(&mv.to()) {
            debug!("rejected {mv}: not legal for {}", self.current_turn());
            return false;
        }

        self.board.apply(mv);
        self.history.push(self.board.position_key());

        let previous = self.state;
        self.state = self.evaluate_state();
        if self.state != previous {
            debug!("{mv}: {previous} -> {}", self.state);
        }
        true
    }

    fn evaluate_state(&self) -> GameState {
        let in_check = self.is_in_check();
        let tentative = if in_check {
            GameState::Check
        } else {
            GameState::Active
        };

        if !self.side_has_moves() {
            if in_check {
                GameState::Checkmate
            } else {
                GameState::Stalemate
            }
        } else if self.is_draw_fifty_move_rule() {
            GameState::DrawFifty
        } else if self.is_draw_by_insufficient_material() {
            GameState::DrawMaterial
        } else if self.is_draw_by_repetition() {
            GameState::DrawRepetition
        } else {
            tentative
        }
    }

    fn side_has_moves(&self) -> bool {
        self.board.pieces(self.current_turn()).any(|(from, _)| {
            let candidates = self.cache.destinations(&self.board, from);
            !self.board.filter_legal(from, &candidates).is_empty()
        })
    }
}
