pub mod board;
pub mod game;
pub mod perft;
pub mod search;
pub mod tt;
pub mod zobrist;

pub use board::{Board, Color, Move, Piece, Square};
pub use game::{Game, GameState};
pub use perft::{Perft, PerftConfig};
pub use search::{find_best_move, SearchConfig, SearchResult, Searcher};
pub use tt::TranspositionTable;
