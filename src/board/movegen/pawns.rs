use super::super::{Board, Color, Piece, Square};

impl Board {
    /// Pawn destinations. A promotion shows up once per destination square;
    /// the choice of piece is made when the move is applied.
    pub(crate) fn pawn_destinations(&self, from: Square, color: Color) -> Vec<Square> {
        let mut moves = Vec::with_capacity(4);
        let dir = color.pawn_direction();

        if let Some(forward) = from.offset(0, dir) {
            if self.is_empty(forward) {
                moves.push(forward);
                if from.rank() == color.pawn_start_rank() {
                    if let Some(double) = forward.offset(0, dir) {
                        if self.is_empty(double) {
                            moves.push(double);
                        }
                    }
                }
            }
        }

        for df in [-1, 1] {
            let Some(target) = from.offset(df, dir) else {
                continue;
            };
            match self.piece_at(target) {
                Some((owner, _)) if owner != color => moves.push(target),
                Some(_) => {}
                None if self.is_en_passant_capture(from, target, color) => moves.push(target),
                None => {}
            }
        }

        moves
    }

    /// Whether a pawn of `color` on `from` capturing onto the empty `target`
    /// takes en passant: the target must be the current en passant square and
    /// an enemy pawn must stand beside the mover on the target's file.
    pub(crate) fn is_en_passant_capture(&self, from: Square, target: Square, color: Color) -> bool {
        if self.en_passant_target != Some(target) {
            return false;
        }
        Square::new(target.file(), from.rank())
            .and_then(|victim| self.piece_at(victim))
            == Some((color.opponent(), Piece::Pawn))
    }
}
