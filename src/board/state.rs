use std::fmt;

use crate::zobrist::ZOBRIST;

use super::error::KingCountError;
use super::{CastlingRights, Color, Piece, Square};

/// Everything needed to revert one applied move exactly.
///
/// Returned by [`Board::apply`] and consumed by [`Board::undo`].
#[derive(Clone, Debug)]
pub struct UnmakeInfo {
    // None when the origin square was empty and nothing moved
    pub(crate) moved: Option<(Color, Piece)>,
    pub(crate) captured: Option<(Square, Color, Piece)>,
    // (rook_from, rook_to) when the move castled
    pub(crate) rook_relocation: Option<(Square, Square)>,
    pub(crate) previous_white_to_move: bool,
    pub(crate) previous_castling_rights: CastlingRights,
    pub(crate) previous_en_passant_target: Option<Square>,
    pub(crate) previous_halfmove_clock: u32,
    pub(crate) previous_fullmove_number: u32,
    pub(crate) previous_hash: u64,
}

impl UnmakeInfo {
    #[must_use]
    pub fn moved_piece(&self) -> Option<Piece> {
        self.moved.map(|(_, piece)| piece)
    }

    /// The piece removed by the move, if any (the pawn itself for en passant)
    #[must_use]
    pub fn captured_piece(&self) -> Option<Piece> {
        self.captured.map(|(_, _, piece)| piece)
    }

    #[must_use]
    pub fn was_castling(&self) -> bool {
        self.rook_relocation.is_some()
    }
}

/// Standard initial position
pub const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Board position: 64 cells indexed by `rank * 8 + file`, `None` = empty.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    pub(crate) squares: [Option<(Color, Piece)>; 64],
    pub(crate) white_to_move: bool,
    pub(crate) castling_rights: CastlingRights,
    pub(crate) en_passant_target: Option<Square>,
    pub(crate) halfmove_clock: u32,
    pub(crate) fullmove_number: u32,
    pub(crate) hash: u64, // Zobrist hash, kept in sync by apply/undo
}

impl Board {
    pub fn new() -> Self {
        let mut board = Board::empty();
        let back_rank = [
            Piece::Rook,
            Piece::Knight,
            Piece::Bishop,
            Piece::Queen,
            Piece::King,
            Piece::Bishop,
            Piece::Knight,
            Piece::Rook,
        ];
        for (file, piece) in (0u8..).zip(back_rank) {
            board.put(file, 0, Color::White, piece);
            board.put(file, 7, Color::Black, piece);
            board.put(file, 1, Color::White, Piece::Pawn);
            board.put(file, 6, Color::Black, Piece::Pawn);
        }

        board.castling_rights = CastlingRights::all();
        board.hash = board.compute_hash();
        board
    }

    fn put(&mut self, file: u8, rank: u8, color: Color, piece: Piece) {
        if let Some(sq) = Square::new(file, rank) {
            self.set_piece(sq, color, piece);
        }
    }

    /// A board with no pieces, White to move, no rights.
    #[must_use]
    pub fn empty() -> Self {
        Board {
            squares: [None; 64],
            white_to_move: true,
            castling_rights: CastlingRights::none(),
            en_passant_target: None,
            halfmove_clock: 0,
            fullmove_number: 1,
            hash: 0,
        }
    }

    #[inline]
    #[must_use]
    pub fn piece_at(&self, sq: Square) -> Option<(Color, Piece)> {
        self.squares[sq.index()]
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self, sq: Square) -> bool {
        self.squares[sq.index()].is_none()
    }

    /// Place a piece, replacing whatever stood on the square.
    pub(crate) fn set_piece(&mut self, sq: Square, color: Color, piece: Piece) {
        self.remove_piece(sq);
        self.squares[sq.index()] = Some((color, piece));
        self.hash ^= ZOBRIST.piece(sq, color, piece);
    }

    pub(crate) fn remove_piece(&mut self, sq: Square) -> Option<(Color, Piece)> {
        let taken = self.squares[sq.index()].take();
        if let Some((color, piece)) = taken {
            self.hash ^= ZOBRIST.piece(sq, color, piece);
        }
        taken
    }

    #[inline]
    #[must_use]
    pub fn side_to_move(&self) -> Color {
        if self.white_to_move {
            Color::White
        } else {
            Color::Black
        }
    }

    #[must_use]
    pub fn white_to_move(&self) -> bool {
        self.white_to_move
    }

    /// Hand the move to `color`, keeping every other field.
    pub fn set_side_to_move(&mut self, color: Color) {
        if self.side_to_move() != color {
            self.white_to_move = color == Color::White;
            self.hash ^= ZOBRIST.black_to_move_key;
        }
    }

    #[must_use]
    pub fn castling_rights(&self) -> CastlingRights {
        self.castling_rights
    }

    #[must_use]
    pub fn en_passant_target(&self) -> Option<Square> {
        self.en_passant_target
    }

    #[must_use]
    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    #[must_use]
    pub fn fullmove_number(&self) -> u32 {
        self.fullmove_number
    }

    #[must_use]
    pub fn hash(&self) -> u64 {
        self.hash
    }

    /// All pieces of one color with their squares, a1 to h8
    pub fn pieces(&self, color: Color) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(move |sq| match self.piece_at(sq) {
            Some((c, piece)) if c == color => Some((sq, piece)),
            _ => None,
        })
    }

    /// Number of occupied squares
    #[must_use]
    pub fn piece_count(&self) -> usize {
        self.squares.iter().filter(|cell| cell.is_some()).count()
    }

    /// Recompute the Zobrist hash from scratch.
    #[must_use]
    pub fn compute_hash(&self) -> u64 {
        let mut hash = 0;
        for sq in Square::all() {
            if let Some((color, piece)) = self.piece_at(sq) {
                hash ^= ZOBRIST.piece(sq, color, piece);
            }
        }
        if !self.white_to_move {
            hash ^= ZOBRIST.black_to_move_key;
        }
        if let Some(ep) = self.en_passant_target {
            hash ^= ZOBRIST.en_passant(ep);
        }
        hash ^ ZOBRIST.castling(self.castling_rights)
    }

    /// Check the one-king-per-color setup invariant.
    pub fn validate_kings(&self) -> Result<(), KingCountError> {
        let count = |color| {
            self.pieces(color)
                .filter(|&(_, piece)| piece == Piece::King)
                .count()
        };
        let (white, black) = (count(Color::White), count(Color::Black));
        if white == 1 && black == 1 {
            Ok(())
        } else {
            Err(KingCountError { white, black })
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::new()
    }
}

/// ASCII diagram, rank 8 at the top.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  +---+---+---+---+---+---+---+---+")?;
        for rank in (0..8u8).rev() {
            write!(f, "{} |", rank + 1)?;
            for file in 0..8u8 {
                let cell = Square::new(file, rank)
                    .and_then(|sq| self.piece_at(sq))
                    .map_or(' ', |(color, piece)| piece.to_fen_char(color));
                write!(f, " {cell} |")?;
            }
            writeln!(f)?;
            writeln!(f, "  +---+---+---+---+---+---+---+---+")?;
        }
        write!(f, "    a   b   c   d   e   f   g   h")
    }
}
