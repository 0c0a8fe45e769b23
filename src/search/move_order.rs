//! Move ordering for alpha-beta.

use std::cmp::Reverse;

use super::super::board::{Board, Move, Piece};
use super::constants::{
    CASTLING_BONUS, CENTRE_MOVE_BONUS, EN_PASSANT_BONUS, HASH_MOVE_SCORE, PROMOTION_BONUS,
};

#[inline]
pub(crate) fn is_central(file: u8, rank: u8) -> bool {
    (2..=5).contains(&file) && (2..=5).contains(&rank)
}

/// MVV-LVA: valuable victims first, cheap attackers breaking ties
#[inline]
fn mvv_lva(victim: Piece, aggressor: Piece) -> i32 {
    victim.value() * 10 - aggressor.value() / 10
}

/// Ordering score for `mv`; higher is searched first.
pub(crate) fn score_move(board: &Board, mv: Move, hash_move: Option<Move>) -> i32 {
    if hash_move == Some(mv) {
        return HASH_MOVE_SCORE;
    }
    let Some((_, piece)) = board.piece_at(mv.from()) else {
        return 0;
    };
    let (from, to) = (mv.from(), mv.to());

    let mut score = match board.piece_at(to) {
        Some((_, victim)) => mvv_lva(victim, piece),
        None if piece == Piece::Pawn && from.file() != to.file() => {
            mvv_lva(Piece::Pawn, Piece::Pawn) + EN_PASSANT_BONUS
        }
        None => 0,
    };

    if let Some(promoted) = mv.promotion() {
        score += PROMOTION_BONUS + promoted.value() / 10;
    }
    if piece == Piece::King && from.file().abs_diff(to.file()) == 2 {
        score += CASTLING_BONUS;
    }
    if matches!(piece, Piece::Pawn | Piece::Knight) && is_central(to.file(), to.rank()) {
        score += CENTRE_MOVE_BONUS;
    }
    score
}

pub(crate) fn order_moves(board: &Board, moves: &mut [Move], hash_move: Option<Move>) {
    moves.sort_by_cached_key(|&mv| Reverse(score_move(board, mv, hash_move)));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Square;

    fn mv(from: &str, to: &str) -> Move {
        Move::new(from.parse::<Square>().unwrap(), to.parse::<Square>().unwrap())
    }

    #[test]
    fn test_captures_ordered_by_victim_then_aggressor() {
        // the pawn on d4 can take the queen on e5 or the knight on c5; the rook on e1 takes e5 too
        let board = Board::from_fen("4k3/8/8/2n1q3/3P4/8/8/4R1K1 w - - 0 1");
        let mut moves = vec![mv("d4", "c5"), mv("e1", "e5"), mv("d4", "d5"), mv("d4", "e5")];
        order_moves(&board, &mut moves, None);
        assert_eq!(moves, vec![mv("d4", "e5"), mv("e1", "e5"), mv("d4", "c5"), mv("d4", "d5")]);
    }

    #[test]
    fn test_hash_move_first() {
        let board = Board::new();
        let mut moves = vec![mv("e2", "e4"), mv("g1", "f3"), mv("a2", "a3")];
        order_moves(&board, &mut moves, Some(mv("a2", "a3")));
        assert_eq!(moves[0], mv("a2", "a3"));
    }

    #[test]
    fn test_promotion_and_castling_bonuses() {
        let board = Board::from_fen("4k3/P7/8/8/8/8/8/4K2R w K - 0 1");
        let promotion = Move::with_promotion(
            "a7".parse().unwrap(),
            "a8".parse().unwrap(),
            Piece::Queen,
        );
        assert!(score_move(&board, promotion, None) >= PROMOTION_BONUS);
        assert_eq!(score_move(&board, mv("e1", "g1"), None), CASTLING_BONUS);
        assert_eq!(score_move(&board, mv("e1", "f1"), None), 0);
    }
}
