//! Legal move filtering.
//!
//! A destination is legal when playing it leaves the mover's king
//! unattacked. Each candidate is tried on a scratch copy, so the board being
//! asked about is never touched.

use super::movegen::CastlePath;
use super::{Board, Move, Piece, Square, PROMOTION_PIECES};

impl Board {
    /// Keep the candidates for the piece on `from` that do not leave its own
    /// king attacked.
    ///
    /// Captures (including the en passant victim) and the castling rook's
    /// move are played out before the king is tested. Castling is also
    /// rejected while the king is in check.
    #[must_use]
    pub fn filter_legal(&self, from: Square, candidates: &[Square]) -> Vec<Square> {
        let Some((color, piece)) = self.piece_at(from) else {
            return Vec::new();
        };
        let in_check = piece == Piece::King && self.is_in_check(color);

        let mut scratch = self.clone();
        candidates
            .iter()
            .copied()
            .filter(|&to| {
                if in_check && CastlePath::for_king_move(color, from, to).is_some() {
                    return false;
                }
                let mv = Move::new(from, to);
                let info = scratch.apply(mv);
                let safe = !scratch.is_in_check(color);
                scratch.undo(mv, info);
                safe
            })
            .collect()
    }

    /// Legal destinations of the piece on `from`.
    #[must_use]
    pub fn legal_destinations(&self, from: Square) -> Vec<Square> {
        self.filter_legal(from, &self.pseudo_legal_destinations(from))
    }

    /// Every legal move for the side to move. Promotions appear once per
    /// promotion piece.
    #[must_use]
    pub fn legal_moves(&self) -> Vec<Move> {
        let mut moves = Vec::with_capacity(48);
        for (from, piece) in self.pieces(self.side_to_move()) {
            for to in self.legal_destinations(from) {
                push_expanded(&mut moves, self, from, to, piece);
            }
        }
        moves
    }

    /// Whether the side to move has at least one legal move.
    #[must_use]
    pub fn has_legal_moves(&self) -> bool {
        self.pieces(self.side_to_move())
            .any(|(from, _)| !self.legal_destinations(from).is_empty())
    }

    /// Whether `from -> to` moves a pawn onto its last rank.
    #[must_use]
    pub fn is_promotion(&self, from: Square, to: Square) -> bool {
        self.piece_at(from).is_some_and(|(color, piece)| {
            piece == Piece::Pawn && to.rank() == color.pawn_promotion_rank()
        })
    }
}

/// Push `from -> to`, branching into one move per promotion piece when it promotes.
pub(crate) fn push_expanded(
    moves: &mut Vec<Move>,
    board: &Board,
    from: Square,
    to: Square,
    piece: Piece,
) {
    if piece == Piece::Pawn && board.is_promotion(from, to) {
        moves.extend(
            PROMOTION_PIECES
                .iter()
                .map(|&choice| Move::with_promotion(from, to, choice)),
        );
    } else {
        moves.push(Move::new(from, to));
    }
}
