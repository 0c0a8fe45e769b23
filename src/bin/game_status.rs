//! Replay moves like `e2e4` or `e7e8n` from the initial position and print
//! where the game stands.

use std::env;
use std::process::ExitCode;

use chess_rules::board::{Piece, Square};
use chess_rules::game::Game;

/// Split `e2e4` / `e7e8q` into squares and an optional promotion piece
fn parse_notation(notation: &str) -> Option<(Square, Square, Option<Piece>)> {
    if !notation.is_ascii() || !(4..=5).contains(&notation.len()) {
        return None;
    }
    let from: Square = notation[0..2].parse().ok()?;
    let to: Square = notation[2..4].parse().ok()?;
    let promotion = match notation.chars().nth(4) {
        Some(c) => Some(Piece::from_char(c)?),
        None => None,
    };
    Some((from, to, promotion))
}

fn main() -> ExitCode {
    env_logger::init();

    let moves: Vec<String> = env::args().skip(1).collect();
    let mut game = Game::new();

    for notation in &moves {
        let Some((from, to, promotion)) = parse_notation(notation) else {
            eprintln!("unreadable move '{notation}'");
            return ExitCode::from(2);
        };
        let accepted = match promotion {
            Some(piece) => game.execute_move_with_promotion(from, to, piece),
            None => game.execute_move(from, to),
        };
        if !accepted {
            eprintln!("move '{notation}' rejected ({})", game.game_state());
            return ExitCode::FAILURE;
        }
    }

    let turn = game.current_turn();
    let mut legal = Vec::new();
    for (from, _) in game.board().pieces(turn) {
        for to in game.legal_moves(from) {
            legal.push(format!("{from}{to}"));
        }
    }

    println!("side_to_move: {turn}");
    println!("state: {}", game.game_state());
    println!("in_check: {}", game.is_in_check());
    println!("legal_moves: {}", legal.len());
    for mv in &legal {
        println!("{mv}");
    }
    println!("fen: {}", game.fen());
    ExitCode::SUCCESS
}
