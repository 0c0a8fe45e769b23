//! Static evaluation for search leaves.

use super::super::board::{Board, Color, Piece, Square};
use super::constants::{MINOR_CENTRE_BONUS, MINOR_CORE_BONUS, PAWN_ADVANCE_BONUS};
use super::move_order::is_central;

/// Positional bonus for a single piece of `color` on `sq`
fn placement_bonus(color: Color, piece: Piece, sq: Square) -> i32 {
    match piece {
        Piece::Pawn => {
            let advanced = sq.rank().abs_diff(color.pawn_start_rank());
            i32::from(advanced) * PAWN_ADVANCE_BONUS
        }
        Piece::Knight | Piece::Bishop if is_central(sq.file(), sq.rank()) => {
            let core = (3..=4).contains(&sq.file()) && (3..=4).contains(&sq.rank());
            MINOR_CENTRE_BONUS + if core { MINOR_CORE_BONUS } else { 0 }
        }
        _ => 0,
    }
}

/// Material plus placement, positive when White is better.
#[must_use]
pub fn evaluate(board: &Board) -> i32 {
    Color::BOTH
        .iter()
        .map(|&color| {
            let side: i32 = board
                .pieces(color)
                .map(|(sq, piece)| piece.value() + placement_bonus(color, piece, sq))
                .sum();
            side * color.sign()
        })
        .sum()
}

/// [`evaluate`] from the point of view of `side`.
#[inline]
#[must_use]
pub fn evaluate_for(board: &Board, side: Color) -> i32 {
    evaluate(board) * side.sign()
}
