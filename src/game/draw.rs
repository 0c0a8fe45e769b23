//! Draw rules that depend only on the position or its history.

use crate::board::{Board, Color, Piece, Square};

/// Halfmove clock value at which the fifty-move rule applies
pub const FIFTY_MOVE_HALFMOVES: u32 = 100;

/// Occurrences of one position that make a repetition draw
pub const REPETITION_LIMIT: usize = 3;

/// Shortest history that can hold three occurrences of one position
pub(crate) const MIN_REPETITION_HISTORY: usize = 9;

/// Whether neither side can possibly mate.
///
/// Covers K v K, K+N v K, K+B v K and K+B v K+B with both bishops on the
/// same square color. Anything else, including K+N v K+B, is playable.
#[must_use]
pub fn has_insufficient_material(board: &Board) -> bool {
    let mut minors: [Vec<(Square, Piece)>; 2] = [Vec::new(), Vec::new()];
    for color in Color::BOTH {
        for (sq, piece) in board.pieces(color) {
            match piece {
                Piece::King => {}
                Piece::Knight | Piece::Bishop => minors[color.index()].push((sq, piece)),
                Piece::Pawn | Piece::Rook | Piece::Queen => return false,
            }
        }
    }

    match (minors[0].as_slice(), minors[1].as_slice()) {
        ([], []) | ([_], []) | ([], [_]) => true,
        ([(white_sq, Piece::Bishop)], [(black_sq, Piece::Bishop)]) => {
            white_sq.is_light() == black_sq.is_light()
        }
        _ => false,
    }
}

/// How often `key` occurs in `history`
#[must_use]
pub fn occurrences(history: &[String], key: &str) -> usize {
    history.iter().filter(|entry| entry.as_str() == key).count()
}
