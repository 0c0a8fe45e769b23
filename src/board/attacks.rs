//! Square attack detection.
//!
//! Pure queries against a board; nothing here mutates, so the same code
//! answers questions about hypothetical boards built by the legality filter.

use log::warn;

use super::{Board, Color, Piece, Square};

pub(crate) const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

pub(crate) const KING_OFFSETS: [(i8, i8); 8] = [
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
    (-1, 0),
    (-1, 1),
];

pub(crate) const ROOK_DIRECTIONS: [(i8, i8); 4] = [(0, 1), (1, 0), (0, -1), (-1, 0)];
pub(crate) const BISHOP_DIRECTIONS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, -1), (-1, 1)];

/// Whether `square` is attacked by any piece of `attacker` on `board`.
///
/// Checks run cheapest first: pawns, knights, king, then the eight rays.
#[must_use]
pub fn is_square_attacked(square: Square, attacker: Color, board: &Board) -> bool {
    let holds = |sq: Option<Square>, piece: Piece| {
        sq.and_then(|sq| board.piece_at(sq)) == Some((attacker, piece))
    };

    // An attacking pawn sits one rank behind the square, from its own point of view.
    let behind = -attacker.pawn_direction();
    if holds(square.offset(-1, behind), Piece::Pawn) || holds(square.offset(1, behind), Piece::Pawn)
    {
        return true;
    }

    if KNIGHT_OFFSETS
        .iter()
        .any(|&(df, dr)| holds(square.offset(df, dr), Piece::Knight))
    {
        return true;
    }

    if KING_OFFSETS
        .iter()
        .any(|&(df, dr)| holds(square.offset(df, dr), Piece::King))
    {
        return true;
    }

    ray_hits(board, square, attacker, &ROOK_DIRECTIONS, Piece::Rook)
        || ray_hits(board, square, attacker, &BISHOP_DIRECTIONS, Piece::Bishop)
}

/// Whether a `slider` (or queen) of `attacker` is the first piece on any of the rays.
fn ray_hits(
    board: &Board,
    square: Square,
    attacker: Color,
    directions: &[(i8, i8)],
    slider: Piece,
) -> bool {
    directions.iter().any(|&(df, dr)| {
        matches!(
            first_piece_on_ray(board, square, df, dr),
            Some((color, piece)) if color == attacker && (piece == slider || piece == Piece::Queen)
        )
    })
}

/// The first piece met walking from `from` (exclusive) in direction (df, dr).
fn first_piece_on_ray(board: &Board, from: Square, df: i8, dr: i8) -> Option<(Color, Piece)> {
    let mut current = from.offset(df, dr);
    while let Some(sq) = current {
        if let Some(found) = board.piece_at(sq) {
            return Some(found);
        }
        current = sq.offset(df, dr);
    }
    None
}

impl Board {
    #[inline]
    #[must_use]
    pub fn is_square_attacked(&self, square: Square, attacker: Color) -> bool {
        is_square_attacked(square, attacker, self)
    }

    #[must_use]
    pub fn find_king(&self, color: Color) -> Option<Square> {
        Square::all().find(|&sq| self.piece_at(sq) == Some((color, Piece::King)))
    }

    /// Whether `color`'s king is attacked.
    ///
    /// A board without that king reports `false`.
    #[must_use]
    pub fn is_in_check(&self, color: Color) -> bool {
        match self.find_king(color) {
            Some(king_sq) => self.is_square_attacked(king_sq, color.opponent()),
            None => {
                warn!("no {color} king on board, treating it as not attacked");
                false
            }
        }
    }
}
