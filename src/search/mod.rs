//! Alpha-beta search with a transposition table.
//!
//! Features:
//! - Negamax alpha-beta with iterative deepening from depth 1
//! - Transposition table cutoffs and hash-move ordering
//! - Check extensions bounded by a ply limit
//! - Capture, promotion and castling aware move ordering
//!
//! Scores are in centipawns from the point of view of the side to move.
//! Checkmate scores grow with the remaining depth, so faster mates are
//! preferred.

mod constants;
mod eval;
mod move_order;

use std::time::Instant;

use log::{debug, info};

use crate::board::{push_expanded, Board, Color, Move, MoveGenCache, DEFAULT_CACHE_CAPACITY};
use crate::tt::{NodeType, TranspositionTable, DEFAULT_TT_CAPACITY};

pub use constants::{DEFAULT_MAX_EXTENSION_PLY, INFINITY, MATE_SCORE, MATE_THRESHOLD};
pub use eval::{evaluate, evaluate_for};

use move_order::order_moves;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchConfig {
    pub tt_capacity: usize,
    pub cache_capacity: usize,
    /// Check extensions stop this many plies below the root
    pub max_extension_ply: u32,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            tt_capacity: DEFAULT_TT_CAPACITY,
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            max_extension_ply: DEFAULT_MAX_EXTENSION_PLY,
        }
    }
}

/// Outcome of [`Searcher::search`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchResult {
    pub best_move: Move,
    /// Score for the side that was searched
    pub score: i32,
    /// Nodes visited over every iteration
    pub nodes: u64,
}

impl SearchResult {
    /// Whether the score announces a forced mate for either side
    #[must_use]
    pub fn is_mate(&self) -> bool {
        self.score.abs() >= MATE_THRESHOLD
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    pub nodes: u64,
    pub tt_hits: u64,
    pub tt_cutoffs: u64,
}

/// Search state: the transposition table and move cache persist between
/// searches until [`Searcher::clear`].
pub struct Searcher {
    tt: TranspositionTable,
    cache: MoveGenCache,
    config: SearchConfig,
    stats: SearchStats,
}

impl Default for Searcher {
    fn default() -> Self {
        Searcher::new(SearchConfig::default())
    }
}

impl Searcher {
    #[must_use]
    pub fn new(config: SearchConfig) -> Self {
        Searcher {
            tt: TranspositionTable::new(config.tt_capacity),
            cache: MoveGenCache::new(config.cache_capacity),
            config,
            stats: SearchStats::default(),
        }
    }

    #[must_use]
    pub fn tt(&self) -> &TranspositionTable {
        &self.tt
    }

    #[must_use]
    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    pub fn clear(&mut self) {
        self.tt.clear();
        self.cache.clear();
        self.stats = SearchStats::default();
    }

    /// Search `board` for `side`, deepening one ply at a time up to `depth`.
    ///
    /// Returns `None` when `side` has no legal move. A depth of 0 is
    /// searched as 1.
    pub fn search(&mut self, board: &Board, side: Color, depth: u32) -> Option<SearchResult> {
        let mut root = board.clone();
        root.set_side_to_move(side);
        if self.legal_moves(&root).is_empty() {
            debug!("search: {side} has no legal moves");
            return None;
        }

        let start = Instant::now();
        self.stats = SearchStats::default();
        let mut result = None;
        for iteration in 1..=depth.max(1) {
            let (score, best) = self.negamax(&mut root, iteration, -INFINITY, INFINITY, 0);
            let Some(best_move) = best else {
                break;
            };
            debug!(
                "depth {iteration}: {best_move} score {score} nodes {}",
                self.stats.nodes
            );
            result = Some(SearchResult {
                best_move,
                score,
                nodes: self.stats.nodes,
            });
            if score.abs() >= MATE_THRESHOLD {
                break;
            }
        }

        if let Some(found) = result {
            info!(
                "bestmove {} score {} nodes {} tt hits {} in {:?}",
                found.best_move,
                found.score,
                found.nodes,
                self.stats.tt_hits,
                start.elapsed()
            );
        }
        result
    }

    /// One fixed-depth negamax call on `board` with `side` to move.
    ///
    /// Returns the score for `side` within `(alpha, beta)` and the best move
    /// found, if any. The board is left as it was given apart from the side
    /// to move.
    pub fn alpha_beta(
        &mut self,
        board: &mut Board,
        depth: u32,
        alpha: i32,
        beta: i32,
        side: Color,
    ) -> (i32, Option<Move>) {
        board.set_side_to_move(side);
        self.negamax(board, depth, alpha, beta, 0)
    }

    fn negamax(
        &mut self,
        board: &mut Board,
        depth: u32,
        mut alpha: i32,
        mut beta: i32,
        ply: u32,
    ) -> (i32, Option<Move>) {
        self.stats.nodes += 1;
        let hash = board.hash();
        let original_alpha = alpha;

        let mut hash_move = None;
        if let Some(entry) = self.tt.probe(hash) {
            self.stats.tt_hits += 1;
            hash_move = entry.best_move();
            if entry.depth() >= depth {
                match entry.node_type() {
                    NodeType::Exact => {
                        self.stats.tt_cutoffs += 1;
                        return (entry.score(), entry.best_move());
                    }
                    NodeType::Beta => alpha = alpha.max(entry.score()),
                    NodeType::Alpha => beta = beta.min(entry.score()),
                }
                if alpha >= beta {
                    self.stats.tt_cutoffs += 1;
                    return (entry.score(), entry.best_move());
                }
            }
        }

        let side = board.side_to_move();
        let in_check = board.is_in_check(side);
        let mut moves = self.legal_moves(board);
        if moves.is_empty() {
            let score = if in_check {
                -(MATE_SCORE + depth as i32)
            } else {
                0
            };
            return (score, None);
        }

        let mut remaining = depth;
        if in_check && ply < self.config.max_extension_ply {
            remaining += 1;
        }
        if remaining == 0 {
            return (evaluate_for(board, side), None);
        }

        order_moves(board, &mut moves, hash_move);

        let mut best_score = -INFINITY;
        let mut best_move = None;
        for mv in moves {
            let undo = board.apply(mv);
            let (child, _) = self.negamax(board, remaining - 1, -beta, -alpha, ply + 1);
            board.undo(mv, undo);

            let score = -child;
            if score > best_score {
                best_score = score;
                best_move = Some(mv);
            }
            alpha = alpha.max(score);
            if alpha >= beta {
                break;
            }
        }

        let node_type = if best_score <= original_alpha {
            NodeType::Alpha
        } else if best_score >= beta {
            NodeType::Beta
        } else {
            NodeType::Exact
        };
        self.tt.store(hash, depth, best_score, node_type, best_move);
        (best_score, best_move)
    }

    fn legal_moves(&self, board: &Board) -> Vec<Move> {
        let mut moves = Vec::with_capacity(48);
        for (from, piece) in board.pieces(board.side_to_move()) {
            let candidates = self.cache.destinations(board, from);
            for to in board.filter_legal(from, &candidates) {
                push_expanded(&mut moves, board, from, to, piece);
            }
        }
        moves
    }
}

/// Best move for `side` at `depth` with a fresh table and cache.
#[must_use]
pub fn find_best_move(board: &Board, side: Color, depth: u32) -> Option<SearchResult> {
    Searcher::default().search(board, side, depth)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Square;

    fn sq(name: &str) -> Square {
        name.parse().unwrap()
    }

    #[test]
    fn test_finds_back_rank_mate() {
        let board = Board::from_fen("6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1");
        let result = find_best_move(&board, Color::White, 2).unwrap();
        assert_eq!(result.best_move, Move::new(sq("a1"), sq("a8")));
        assert!(result.is_mate());
        assert!(result.score > 0);
    }

    #[test]
    fn test_takes_hanging_queen() {
        let board = Board::from_fen("4k3/8/8/3q4/8/8/8/3RK3 w - - 0 1");
        let result = find_best_move(&board, Color::White, 2).unwrap();
        assert_eq!(result.best_move, Move::new(sq("d1"), sq("d5")));
    }

    #[test]
    fn test_no_moves_returns_none() {
        let mated = Board::from_fen("R5k1/5ppp/8/8/8/8/8/6K1 b - - 0 1");
        assert!(find_best_move(&mated, Color::Black, 3).is_none());
        let stalemate = Board::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1");
        assert!(find_best_move(&stalemate, Color::Black, 3).is_none());
    }

    #[test]
    fn test_stalemate_and_mate_scores() {
        let mut searcher = Searcher::default();
        let mut stalemate = Board::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1");
        assert_eq!(
            searcher.alpha_beta(&mut stalemate, 2, -INFINITY, INFINITY, Color::Black),
            (0, None)
        );
        let mut mated = Board::from_fen("R5k1/5ppp/8/8/8/8/8/6K1 b - - 0 1");
        let (score, best) = searcher.alpha_beta(&mut mated, 2, -INFINITY, INFINITY, Color::Black);
        assert_eq!(score, -(MATE_SCORE + 2));
        assert!(best.is_none());
    }

    #[test]
    fn test_search_fills_table_and_restores_board() {
        let mut searcher = Searcher::default();
        let board = Board::new();
        let result = searcher.search(&board, Color::White, 3).unwrap();
        assert!(result.nodes > 20);
        assert!(!searcher.tt().is_empty());
        let root = searcher.tt().probe(board.hash()).unwrap();
        assert_eq!(root.best_move(), Some(result.best_move));

        let mut scratch = board.clone();
        searcher.alpha_beta(&mut scratch, 2, -INFINITY, INFINITY, Color::White);
        assert_eq!(scratch.to_fen(), board.to_fen());
        assert_eq!(scratch.hash(), board.hash());

        searcher.clear();
        assert!(searcher.tt().is_empty());
        assert_eq!(searcher.stats(), SearchStats::default());
    }

    #[test]
    fn test_side_argument_overrides_board() {
        // with white to move the rook takes the queen; searched for black, the queen takes the rook
        let board = Board::from_fen("4k3/8/8/8/q6R/8/8/4K3 w - - 0 1");
        let black = find_best_move(&board, Color::Black, 2).unwrap();
        assert_eq!(black.best_move, Move::new(sq("a4"), sq("h4")));
        assert!(black.score > 0);
        let white = find_best_move(&board, Color::White, 2).unwrap();
        assert_eq!(white.best_move, Move::new(sq("h4"), sq("a4")));
    }
}
