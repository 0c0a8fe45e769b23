//! Pseudo-legal move generation.
//!
//! Destinations here ignore whether the mover's own king is left attacked;
//! that is the legality filter's job. The one exception is castling, whose
//! safety gates are part of the rule itself.

mod cache;
mod kings;
mod knights;
mod pawns;
mod sliders;

pub use cache::{CacheStats, MoveGenCache, DEFAULT_CACHE_CAPACITY};
pub(crate) use kings::CastlePath;

use super::attacks::{BISHOP_DIRECTIONS, ROOK_DIRECTIONS};
use super::{Board, Piece, Square};

impl Board {
    /// Squares the piece on `from` could move to, before self-check filtering.
    ///
    /// Returns an empty list for an empty square. The piece's own color is
    /// used, whoever is to move.
    #[must_use]
    pub fn pseudo_legal_destinations(&self, from: Square) -> Vec<Square> {
        let Some((color, piece)) = self.piece_at(from) else {
            return Vec::new();
        };
        match piece {
            Piece::Pawn => self.pawn_destinations(from, color),
            Piece::Knight => self.knight_destinations(from, color),
            Piece::Bishop => self.slider_destinations(from, color, &BISHOP_DIRECTIONS),
            Piece::Rook => self.slider_destinations(from, color, &ROOK_DIRECTIONS),
            Piece::Queen => {
                let mut moves = self.slider_destinations(from, color, &ROOK_DIRECTIONS);
                moves.extend(self.slider_destinations(from, color, &BISHOP_DIRECTIONS));
                moves
            }
            Piece::King => self.king_destinations(from, color),
        }
    }
}
