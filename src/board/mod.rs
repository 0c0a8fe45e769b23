//! Chess board representation and move rules.
//!
//! A 64-cell array board with incremental Zobrist hashing, pseudo-legal move
//! generation, a legality filter, and a reversible `apply`/`undo` pair.
//! Castling, en passant and promotion follow the standard rules.
//!
//! # Example
//! ```
//! use chess_rules::board::Board;
//!
//! let board = Board::new();
//! let moves = board.legal_moves();
//! println!("Starting position has {} legal moves", moves.len());
//! ```

mod attacks;
mod error;
mod fen;
mod legality;
mod make_unmake;
mod movegen;
mod state;
mod types;

#[cfg(test)]
mod tests;

pub use attacks::is_square_attacked;
pub use error::{FenError, KingCountError, MoveParseError, SquareError};
pub use movegen::{CacheStats, MoveGenCache, DEFAULT_CACHE_CAPACITY};
pub use state::{Board, UnmakeInfo, START_FEN};
pub use types::{CastlingRights, Color, Move, Piece, Square};

pub(crate) use legality::push_expanded;
pub(crate) use types::PROMOTION_PIECES;
