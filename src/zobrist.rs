//! Zobrist hashing for chess positions.
//!
//! A position hash is the XOR of one key per occupied (square, piece, color),
//! the side-to-move key when Black is to move, the file key of the en passant
//! target when one is set, and one key per castling right still held.
//! Keys are drawn once per process from a fixed seed, so hashes are stable
//! across runs.

use once_cell::sync::Lazy;
use rand::prelude::*;

use crate::board::{CastlingRights, Color, Piece, Square};

pub(crate) struct ZobristKeys {
    // piece_keys[square][piece_type][color]
    pub(crate) piece_keys: [[[u64; 2]; 6]; 64],
    pub(crate) black_to_move_key: u64,
    // en_passant_keys[file_index] (only file matters for EP target)
    pub(crate) en_passant_keys: [u64; 8],
    // castling_keys[bit]: white K, white Q, black K, black Q
    pub(crate) castling_keys: [u64; 4],
}

const ZOBRIST_SEED: u64 = 42;

impl ZobristKeys {
    fn new() -> Self {
        let mut rng = StdRng::seed_from_u64(ZOBRIST_SEED);
        let mut piece_keys = [[[0; 2]; 6]; 64];
        let mut en_passant_keys = [0; 8];
        let mut castling_keys = [0; 4];

        for square in &mut piece_keys {
            for piece in square.iter_mut() {
                for key in piece.iter_mut() {
                    *key = rng.gen();
                }
            }
        }

        for key in &mut en_passant_keys {
            *key = rng.gen();
        }

        let black_to_move_key = rng.gen();

        for key in &mut castling_keys {
            *key = rng.gen();
        }

        ZobristKeys {
            piece_keys,
            black_to_move_key,
            en_passant_keys,
            castling_keys,
        }
    }

    #[inline]
    pub(crate) fn piece(&self, sq: Square, color: Color, piece: Piece) -> u64 {
        self.piece_keys[sq.index()][piece.index()][color.index()]
    }

    #[inline]
    pub(crate) fn en_passant(&self, sq: Square) -> u64 {
        self.en_passant_keys[sq.file() as usize]
    }

    /// Combined key for every right in `rights`
    pub(crate) fn castling(&self, rights: CastlingRights) -> u64 {
        let bits = rights.as_u8();
        self.castling_keys
            .iter()
            .enumerate()
            .filter(|(i, _)| bits & (1u8 << *i) != 0)
            .fold(0, |acc, (_, key)| acc ^ key)
    }
}

pub(crate) static ZOBRIST: Lazy<ZobristKeys> = Lazy::new(ZobristKeys::new);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_are_distinct() {
        let a1 = Square::from_index(0);
        let h8 = Square::from_index(63);
        let k1 = ZOBRIST.piece(a1, Color::White, Piece::Rook);
        let k2 = ZOBRIST.piece(a1, Color::Black, Piece::Rook);
        let k3 = ZOBRIST.piece(h8, Color::White, Piece::Rook);
        assert_ne!(k1, k2);
        assert_ne!(k1, k3);
        assert_ne!(ZOBRIST.black_to_move_key, 0);
    }

    #[test]
    fn test_castling_key_combines_bits() {
        let all = ZOBRIST.castling(CastlingRights::all());
        let expected = ZOBRIST.castling_keys.iter().fold(0, |acc, k| acc ^ k);
        assert_eq!(all, expected);
        assert_eq!(ZOBRIST.castling(CastlingRights::none()), 0);
    }
}
