//! Perft: exhaustive legal move-tree counting.
//!
//! Node counts for well-known positions are the standard check that move
//! generation is right. The parallel counter splits the root position's
//! pieces over scoped worker threads, each playing on its own copy of the
//! board while the move cache is shared.

use std::cmp::Reverse;
use std::fmt;
use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::thread;
use std::time::{Duration, Instant};

use log::{debug, info, trace};

use crate::board::{push_expanded, Board, Color, Move, MoveGenCache, DEFAULT_CACHE_CAPACITY};

/// Standard-rules node counts from the initial position, depth 1 upwards.
pub const START_POSITION_COUNTS: [u64; 8] = [
    20,
    400,
    8_902,
    197_281,
    4_865_609,
    119_060_324,
    3_195_901_860,
    84_998_978_956,
];

/// Depth from which the report switches to the parallel counter
const PARALLEL_REPORT_DEPTH: u32 = 4;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PerftConfig {
    /// Upper bound on worker threads; `None` asks the OS
    pub max_workers: Option<usize>,
    pub cache_capacity: usize,
}

impl Default for PerftConfig {
    fn default() -> Self {
        PerftConfig {
            max_workers: None,
            cache_capacity: DEFAULT_CACHE_CAPACITY,
        }
    }
}

/// Perft counter owning its move-generation cache.
pub struct Perft {
    cache: MoveGenCache,
    config: PerftConfig,
}

impl Default for Perft {
    fn default() -> Self {
        Perft::new(PerftConfig::default())
    }
}

impl Perft {
    #[must_use]
    pub fn new(config: PerftConfig) -> Self {
        Perft {
            cache: MoveGenCache::new(config.cache_capacity),
            config,
        }
    }

    #[must_use]
    pub fn cache(&self) -> &MoveGenCache {
        &self.cache
    }

    /// Count leaf nodes `depth` plies below `board`, with `turn` to move.
    ///
    /// Depth 0 counts the position itself. Each promotion counts once per
    /// promotion piece.
    #[must_use]
    pub fn count_at_depth(&self, depth: u32, board: &Board, turn: Color) -> u64 {
        let mut board = board.clone();
        board.set_side_to_move(turn);
        self.count(depth, &mut board)
    }

    /// Same count as [`Perft::count_at_depth`], spread over worker threads.
    ///
    /// Shallow trees (depth 3 or less) are counted on the calling thread.
    /// Otherwise the moving pieces are ordered busiest first and dealt
    /// round-robin to the workers.
    #[must_use]
    pub fn count_parallel(&self, depth: u32, board: &Board, turn: Color) -> u64 {
        if depth <= 3 {
            return self.count_at_depth(depth, board, turn);
        }

        let mut root = board.clone();
        root.set_side_to_move(turn);

        let mut by_piece: Vec<Vec<Move>> = root
            .pieces(turn)
            .map(|(from, piece)| {
                let mut moves = Vec::new();
                let candidates = self.cache.destinations(&root, from);
                for to in root.filter_legal(from, &candidates) {
                    push_expanded(&mut moves, &root, from, to, piece);
                }
                moves
            })
            .filter(|moves| !moves.is_empty())
            .collect();
        if by_piece.is_empty() {
            return 0;
        }
        by_piece.sort_by_key(|moves| Reverse(moves.len()));

        let workers = self.worker_count(depth).min(by_piece.len());
        let mut buckets: Vec<Vec<Move>> = vec![Vec::new(); workers];
        for (i, moves) in by_piece.into_iter().enumerate() {
            buckets[i % workers].extend(moves);
        }
        debug!("perft depth {depth}: {workers} workers");

        let total = AtomicU64::new(0);
        thread::scope(|scope| {
            for (id, bucket) in buckets.into_iter().enumerate() {
                let total = &total;
                let root = &root;
                scope.spawn(move || {
                    let mut board = root.clone();
                    let mut nodes = 0;
                    for mv in bucket {
                        let undo = board.apply(mv);
                        nodes += self.count(depth - 1, &mut board);
                        board.undo(mv, undo);
                    }
                    trace!("perft worker {id}: {nodes} nodes");
                    total.fetch_add(nodes, Ordering::Relaxed);
                });
            }
        });
        total.load(Ordering::Relaxed)
    }

    /// Node count below each legal root move of the side to move.
    #[must_use]
    pub fn divide(&self, depth: u32, board: &Board) -> Vec<(Move, u64)> {
        if depth == 0 {
            return Vec::new();
        }
        let mut board = board.clone();
        let moves = self.moves(&board);
        moves
            .into_iter()
            .map(|mv| {
                let undo = board.apply(mv);
                let nodes = self.count(depth - 1, &mut board);
                board.undo(mv, undo);
                (mv, nodes)
            })
            .collect()
    }

    /// Run depths `1..=max_depth` on `fen` and time each one.
    ///
    /// The cache is cleared before and after the run. Depths from 4 use the
    /// parallel counter. Reference counts are attached when `fen` is the
    /// standard initial position.
    pub fn calculate_moves_for_position(&self, fen: &str, max_depth: u32) -> PerftReport {
        self.cache.clear();
        let board = Board::from_fen(fen);
        let turn = board.side_to_move();
        let standard = board.position_key() == Board::new().position_key();

        let mut rows = Vec::with_capacity(max_depth as usize);
        for depth in 1..=max_depth {
            let start = Instant::now();
            let nodes = if depth >= PARALLEL_REPORT_DEPTH {
                self.count_parallel(depth, &board, turn)
            } else {
                self.count_at_depth(depth, &board, turn)
            };
            let elapsed = start.elapsed();
            let expected = if standard {
                START_POSITION_COUNTS.get(depth as usize - 1).copied()
            } else {
                None
            };
            info!("perft {depth}: {nodes} nodes in {elapsed:?}");
            rows.push(PerftRow {
                depth,
                nodes,
                elapsed,
                expected,
            });
        }

        self.cache.clear();
        PerftReport {
            fen: board.to_fen(),
            rows,
        }
    }

    fn worker_count(&self, depth: u32) -> usize {
        let available = thread::available_parallelism().map_or(4, NonZeroUsize::get);
        let cap = if depth <= 5 { 8 } else { 16 };
        self.config
            .max_workers
            .map_or(available, |limit| limit.min(available))
            .clamp(1, cap)
    }

    /// Legal moves of the side to move, through the shared cache
    fn moves(&self, board: &Board) -> Vec<Move> {
        let mut moves = Vec::with_capacity(48);
        for (from, piece) in board.pieces(board.side_to_move()) {
            let candidates = self.cache.destinations(board, from);
            for to in board.filter_legal(from, &candidates) {
                push_expanded(&mut moves, board, from, to, piece);
            }
        }
        moves
    }

    fn count(&self, depth: u32, board: &mut Board) -> u64 {
        if depth == 0 {
            return 1;
        }
        let moves = self.moves(board);
        if depth == 1 {
            return moves.len() as u64;
        }

        let mut nodes = 0;
        for mv in moves {
            let undo = board.apply(mv);
            nodes += self.count(depth - 1, board);
            board.undo(mv, undo);
        }
        nodes
    }
}

/// One timed depth of a perft run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PerftRow {
    pub depth: u32,
    pub nodes: u64,
    pub elapsed: Duration,
    pub expected: Option<u64>,
}

impl PerftRow {
    #[must_use]
    pub fn nodes_per_second(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 {
            self.nodes as f64 / secs
        } else {
            0.0
        }
    }

    /// `None` when there is no reference count for this depth
    #[must_use]
    pub fn matches(&self) -> Option<bool> {
        self.expected.map(|expected| expected == self.nodes)
    }
}

/// Result of [`Perft::calculate_moves_for_position`]; displays as a table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PerftReport {
    pub fen: String,
    pub rows: Vec<PerftRow>,
}

impl PerftReport {
    /// False if any depth with a reference count disagrees with it
    #[must_use]
    pub fn all_match(&self) -> bool {
        self.rows.iter().all(|row| row.matches() != Some(false))
    }

    #[must_use]
    pub fn total_nodes(&self) -> u64 {
        self.rows.iter().map(|row| row.nodes).sum()
    }
}

impl fmt::Display for PerftReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Perft results for {}", self.fen)?;
        writeln!(
            f,
            "{:>5} {:>12} {:>10} {:>14} {:>12}",
            "depth", "nodes", "seconds", "nodes/sec", "expected"
        )?;
        for row in &self.rows {
            let expected = match (row.expected, row.matches()) {
                (Some(count), Some(true)) => format!("{count} ok"),
                (Some(count), _) => format!("{count} FAIL"),
                (None, _) => "-".to_string(),
            };
            writeln!(
                f,
                "{:>5} {:>12} {:>10.3} {:>14.0} {:>12}",
                row.depth,
                row.nodes,
                row.elapsed.as_secs_f64(),
                row.nodes_per_second(),
                expected
            )?;
        }
        write!(f, "total nodes: {}", self.total_nodes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_depth_zero_is_one() {
        let perft = Perft::default();
        assert_eq!(perft.count_at_depth(0, &Board::new(), Color::White), 1);
    }

    #[test]
    fn test_turn_argument_overrides_board() {
        let perft = Perft::default();
        let board = Board::new();
        assert_eq!(perft.count_at_depth(1, &board, Color::Black), 20);
        // only the black king can move
        let board = Board::from_fen("4k3/8/8/8/8/8/4P3/4K3 w - - 0 1");
        assert_eq!(perft.count_at_depth(1, &board, Color::Black), 5);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let perft = Perft::new(PerftConfig {
            max_workers: Some(3),
            ..PerftConfig::default()
        });
        let board = Board::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
        let sequential = perft.count_at_depth(4, &board, Color::White);
        let parallel = perft.count_parallel(4, &board, Color::White);
        assert_eq!(sequential, parallel);
    }

    #[test]
    fn test_parallel_with_no_moves() {
        let perft = Perft::default();
        let board = Board::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1");
        assert_eq!(perft.count_parallel(4, &board, Color::Black), 0);
    }

    #[test]
    fn test_divide_sums_to_total() {
        let perft = Perft::default();
        let board = Board::new();
        let split = perft.divide(3, &board);
        assert_eq!(split.len(), 20);
        let sum: u64 = split.iter().map(|&(_, nodes)| nodes).sum();
        assert_eq!(sum, 8_902);
    }

    #[test]
    fn test_report_marks_expected_counts() {
        let perft = Perft::default();
        let report = perft.calculate_moves_for_position(crate::board::START_FEN, 3);
        assert_eq!(report.rows.len(), 3);
        assert!(report.all_match());
        assert_eq!(report.rows[2].expected, Some(8_902));
        assert!(perft.cache().is_empty());
        let table = report.to_string();
        assert!(table.contains("8902 ok"));
    }

    #[test]
    fn test_report_without_reference() {
        let perft = Perft::default();
        let report = perft.calculate_moves_for_position("4k3/8/8/8/8/8/8/4K2R w K - 0 1", 1);
        assert_eq!(report.rows[0].expected, None);
        assert_eq!(report.rows[0].nodes, 15);
        assert!(report.all_match());
    }
}
