use super::super::attacks::KING_OFFSETS;
use super::super::{Board, Color, Piece, Square};

/// Squares involved in one castling move, all on the castling color's back rank.
pub(crate) struct CastlePath {
    pub(crate) king_from: Square,
    pub(crate) king_to: Square,
    pub(crate) rook_from: Square,
    pub(crate) rook_to: Square,
    /// Squares that must be empty (between king and rook)
    pub(crate) between: &'static [u8],
}

const KINGSIDE_BETWEEN: [u8; 2] = [5, 6];
const QUEENSIDE_BETWEEN: [u8; 3] = [1, 2, 3];

impl CastlePath {
    pub(crate) fn new(color: Color, kingside: bool) -> Self {
        let rank = color.back_rank();
        let at = |file| Square::new(file, rank).unwrap_or(Square::from_index(0));
        if kingside {
            CastlePath {
                king_from: at(4),
                king_to: at(6),
                rook_from: at(7),
                rook_to: at(5),
                between: &KINGSIDE_BETWEEN,
            }
        } else {
            CastlePath {
                king_from: at(4),
                king_to: at(2),
                rook_from: at(0),
                rook_to: at(3),
                between: &QUEENSIDE_BETWEEN,
            }
        }
    }

    /// Castling path of a king move `from -> to`, if it is a castling move
    pub(crate) fn for_king_move(color: Color, from: Square, to: Square) -> Option<Self> {
        let home = Square::new(4, color.back_rank())?;
        if from != home || to.rank() != from.rank() {
            return None;
        }
        match to.file() {
            6 => Some(CastlePath::new(color, true)),
            2 => Some(CastlePath::new(color, false)),
            _ => None,
        }
    }

    /// The square the king crosses on its way (the rook's destination)
    pub(crate) fn transit(&self) -> Square {
        self.rook_to
    }
}

impl Board {
    pub(crate) fn king_destinations(&self, from: Square, color: Color) -> Vec<Square> {
        let mut moves = self.step_destinations(from, color, &KING_OFFSETS);
        for kingside in [true, false] {
            if self.can_castle(color, kingside) {
                moves.push(CastlePath::new(color, kingside).king_to);
            }
        }
        moves
    }

    /// Whether `color` may castle on the given side right now.
    ///
    /// Requires the right to be held (king and that rook unmoved), the king
    /// and rook on their home squares, every square between them empty, the
    /// king not in check, and neither the transit nor the destination square
    /// attacked.
    #[must_use]
    pub fn can_castle(&self, color: Color, kingside: bool) -> bool {
        if !self.castling_rights.has(color, kingside) {
            return false;
        }
        let path = CastlePath::new(color, kingside);
        if self.piece_at(path.king_from) != Some((color, Piece::King))
            || self.piece_at(path.rook_from) != Some((color, Piece::Rook))
        {
            return false;
        }
        let rank = color.back_rank();
        let path_clear = path
            .between
            .iter()
            .filter_map(|&file| Square::new(file, rank))
            .all(|sq| self.is_empty(sq));
        if !path_clear {
            return false;
        }
        let enemy = color.opponent();
        !self.is_square_attacked(path.king_from, enemy)
            && !self.is_square_attacked(path.transit(), enemy)
            && !self.is_square_attacked(path.king_to, enemy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(name: &str) -> Square {
        name.parse().unwrap()
    }

    #[test]
    fn test_both_castles_available() {
        let board = Board::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
        let moves = board.pseudo_legal_destinations(sq("e1"));
        assert!(moves.contains(&sq("g1")));
        assert!(moves.contains(&sq("c1")));
        assert_eq!(moves.len(), 7);
    }

    #[test]
    fn test_castling_blocked_by_piece() {
        let board = Board::from_fen("r3k2r/8/8/8/8/8/8/RN2K1NR w KQkq - 0 1");
        assert!(!board.can_castle(Color::White, true));
        assert!(!board.can_castle(Color::White, false));
    }

    #[test]
    fn test_queenside_b_file_may_be_attacked() {
        // the rook on b8 covers b1, which the king never crosses
        let board = Board::from_fen("1r2k3/8/8/8/8/8/8/R3K3 w Q - 0 1");
        assert!(board.can_castle(Color::White, false));
    }

    #[test]
    fn test_castling_through_attack() {
        let board = Board::from_fen("4kr2/8/8/8/8/8/8/R3K2R w KQ - 0 1");
        assert!(!board.can_castle(Color::White, true));
        assert!(board.can_castle(Color::White, false));

        let board = Board::from_fen("4k1r1/8/8/8/8/8/8/4K2R w K - 0 1");
        assert!(!board.can_castle(Color::White, true));
    }

    #[test]
    fn test_castling_out_of_check() {
        let board = Board::from_fen("4r1k1/8/8/8/8/8/8/R3K2R w KQ - 0 1");
        assert!(!board.can_castle(Color::White, true));
        assert!(!board.can_castle(Color::White, false));
    }

    #[test]
    fn test_castling_needs_right_and_rook() {
        let board = Board::from_fen("4k3/8/8/8/8/8/8/R3K2R w Q - 0 1");
        assert!(!board.can_castle(Color::White, true));
        let board = Board::from_fen("4k3/8/8/8/8/8/8/R3K3 w KQ - 0 1");
        assert!(!board.can_castle(Color::White, true));
        assert!(board.can_castle(Color::White, false));
    }
}
