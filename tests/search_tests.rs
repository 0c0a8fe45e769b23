//! Search tests to verify the engine finds correct moves in various positions.

use chess_rules::board::{Board, Color, Move, Square};
use chess_rules::search::{find_best_move, SearchConfig, Searcher, MATE_SCORE};

fn uci(mv: Move) -> String {
    mv.to_string()
}

/// Test that the engine finds a simple mate in 1
#[test]
fn finds_mate_in_one_back_rank() {
    // White to move, Qe8# is mate
    let board = Board::from_fen("6k1/5ppp/8/8/8/8/8/4Q2K w - - 0 1");
    let result = find_best_move(&board, Color::White, 3).expect("Should find a move");
    assert_eq!(uci(result.best_move), "e1e8", "Should find Qe8# (back rank mate)");
    assert!(result.is_mate());
}

/// Test that the engine finds a simple mate in 1 with queen
#[test]
fn finds_mate_in_one_queen() {
    // White to move, Qxf7# is mate
    let board =
        Board::from_fen("r1bqkb1r/pppp1ppp/2n2n2/4p2Q/2B1P3/8/PPPP1PPP/RNB1K1NR w KQkq - 0 4");
    let result = find_best_move(&board, Color::White, 3).expect("Should find a move");
    assert_eq!(uci(result.best_move), "h5f7", "Should find Qxf7# (scholar's mate)");
}

/// Test that a two-move rook ladder is seen at depth 3
#[test]
fn finds_mate_in_two() {
    let board = Board::from_fen("7k/8/8/8/8/8/R7/1R5K w - - 0 1");
    let result = find_best_move(&board, Color::White, 3).expect("Should find a move");
    assert!(result.is_mate(), "Should announce mate, got {}", result.score);
    assert!(result.score >= MATE_SCORE, "Mate should be for white");
}

/// Test that the engine avoids giving away material
#[test]
fn avoids_hanging_queen() {
    // White to move, should not hang the queen
    let board =
        Board::from_fen("r1bqkbnr/pppppppp/2n5/8/4P3/5Q2/PPPP1PPP/RNB1KBNR w KQkq - 0 3");
    let result = find_best_move(&board, Color::White, 3).expect("Should find a move");
    // Qxc6 wins the knight but loses the queen to bxc6 or dxc6
    assert_ne!(uci(result.best_move), "f3c6", "Should not hang the queen on c6");
}

/// Test that the engine captures an undefended piece
#[test]
fn captures_free_piece() {
    // the black knight on e5 is attacked by the f3 knight and defended by nothing
    let board = Board::from_fen("rnbqkb1r/pppp1ppp/8/4n3/8/5N2/PPPPPPPP/RNBQKB1R w KQkq - 0 3");
    let result = find_best_move(&board, Color::White, 3).expect("Should find a move");
    assert_eq!(uci(result.best_move), "f3e5", "Should take the knight");
}

/// Test that the best move is always legal
#[test]
fn best_move_is_legal() {
    let board = Board::new();
    for depth in [1, 2, 3] {
        let result = find_best_move(&board, Color::White, depth).expect("Should find a move");
        assert!(
            board.legal_moves().contains(&result.best_move),
            "Depth {depth} move should be legal"
        );
    }
}

/// Test that a king in check escapes
#[test]
fn escapes_check() {
    // rook on g1 checks the king on a1
    let board = Board::from_fen("8/8/8/8/8/8/8/K5rk w - - 0 1");
    let result = find_best_move(&board, Color::White, 3).expect("Should find a move");
    let from: Square = "a1".parse().unwrap();
    assert_eq!(result.best_move.from(), from);
    assert!(["a1a2", "a1b2"].contains(&uci(result.best_move).as_str()));
}

/// Test that search returns None for checkmate position
#[test]
fn no_move_in_checkmate() {
    // White is checkmated
    let board = Board::from_fen("rnb1kbnr/pppp1ppp/4p3/8/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 0 1");
    assert!(board.is_in_check(Color::White));
    assert!(!board.has_legal_moves(), "Position should be checkmate");
    assert!(find_best_move(&board, Color::White, 3).is_none());
}

/// Test that a second search on the same table reuses its entries
#[test]
fn table_persists_between_searches() {
    let mut searcher = Searcher::new(SearchConfig::default());
    let board =
        Board::from_fen("r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 3");
    let first = searcher.search(&board, Color::White, 3).expect("Should find a move");
    let second = searcher.search(&board, Color::White, 3).expect("Should find a move");
    assert_eq!(first.best_move, second.best_move);
    assert!(second.nodes < first.nodes, "Cached search should visit fewer nodes");
    assert!(searcher.stats().tt_hits > 0);
}
