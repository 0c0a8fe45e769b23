//! Perft node counts for the standard test positions.

use serde::Deserialize;

use chess_rules::board::Board;
use chess_rules::perft::{Perft, PerftConfig};

#[derive(Debug, Deserialize)]
struct PerftCase {
    name: String,
    fen: String,
    counts: Vec<u64>,
}

fn load_cases() -> Vec<PerftCase> {
    let data = include_str!("data/perft.json");
    serde_json::from_str(data).expect("perft.json should parse")
}

#[test]
fn perft_suite_sequential() {
    let perft = Perft::default();
    for case in load_cases() {
        let board = Board::from_fen(&case.fen);
        for (i, &expected) in case.counts.iter().enumerate() {
            let depth = i as u32 + 1;
            let nodes = perft.count_at_depth(depth, &board, board.side_to_move());
            assert_eq!(nodes, expected, "{} at depth {depth}", case.name);
        }
    }
}

#[test]
fn perft_suite_parallel_deepest() {
    let perft = Perft::new(PerftConfig {
        max_workers: Some(4),
        ..PerftConfig::default()
    });
    for case in load_cases() {
        let (Some(&expected), depth) = (case.counts.last(), case.counts.len() as u32) else {
            continue;
        };
        let board = Board::from_fen(&case.fen);
        let nodes = perft.count_parallel(depth, &board, board.side_to_move());
        assert_eq!(nodes, expected, "{} at depth {depth} (parallel)", case.name);
    }
}

#[test]
fn divide_matches_total() {
    let perft = Perft::default();
    for case in load_cases() {
        let Some(&expected) = case.counts.get(1) else {
            continue;
        };
        let board = Board::from_fen(&case.fen);
        let split = perft.divide(2, &board);
        assert_eq!(split.len() as u64, case.counts[0], "{}", case.name);
        let total: u64 = split.iter().map(|&(_, nodes)| nodes).sum();
        assert_eq!(total, expected, "{}", case.name);
    }
}

#[test]
fn counts_do_not_depend_on_move_counters() {
    let perft = Perft::default();
    let fresh = Board::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
    let late = Board::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 37 60");
    assert_eq!(
        perft.count_at_depth(3, &fresh, fresh.side_to_move()),
        perft.count_at_depth(3, &late, late.side_to_move())
    );
}
