use std::env;
use std::fmt;
use std::process::ExitCode;
use std::time::Instant;

use chess_rules::board::{Board, START_FEN};
use chess_rules::perft::Perft;
use chess_rules::search::find_best_move;

const DEFAULT_PERFT_DEPTH: u32 = 4;
const DEFAULT_SEARCH_DEPTH: u32 = 4;

const USAGE: &str = "usage:
  chess_rules perft [--depth N] [FEN...]
  chess_rules bestmove [--depth N] [FEN...]
  chess_rules divide --depth N [FEN...]";

#[derive(Debug, PartialEq, Eq)]
enum CliError {
    MissingCommand,
    UnknownCommand(String),
    MissingDepth,
    InvalidDepth(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::MissingCommand => write!(f, "no command given"),
            CliError::UnknownCommand(cmd) => write!(f, "unknown command '{cmd}'"),
            CliError::MissingDepth => write!(f, "--depth needs a value"),
            CliError::InvalidDepth(value) => write!(f, "invalid depth '{value}'"),
        }
    }
}

impl std::error::Error for CliError {}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Command {
    Perft,
    BestMove,
    Divide,
}

#[derive(Debug, PartialEq, Eq)]
struct Invocation {
    command: Command,
    depth: Option<u32>,
    fen: String,
}

fn parse_args(args: &[String]) -> Result<Invocation, CliError> {
    let (name, rest) = args.split_first().ok_or(CliError::MissingCommand)?;
    let command = match name.as_str() {
        "perft" => Command::Perft,
        "bestmove" => Command::BestMove,
        "divide" => Command::Divide,
        other => return Err(CliError::UnknownCommand(other.to_string())),
    };

    let mut depth = None;
    let mut fen_parts = Vec::new();
    let mut iter = rest.iter();
    while let Some(arg) = iter.next() {
        if arg == "--depth" {
            let value = iter.next().ok_or(CliError::MissingDepth)?;
            let parsed = value
                .parse::<u32>()
                .map_err(|_| CliError::InvalidDepth(value.clone()))?;
            depth = Some(parsed);
        } else {
            fen_parts.push(arg.as_str());
        }
    }
    if command == Command::Divide && depth.is_none() {
        return Err(CliError::MissingDepth);
    }

    let fen = if fen_parts.is_empty() {
        START_FEN.to_string()
    } else {
        fen_parts.join(" ")
    };
    Ok(Invocation {
        command,
        depth,
        fen,
    })
}

fn run(invocation: &Invocation) -> bool {
    let board = Board::from_fen(&invocation.fen);
    match invocation.command {
        Command::Perft => {
            let depth = invocation.depth.unwrap_or(DEFAULT_PERFT_DEPTH);
            let report = Perft::default().calculate_moves_for_position(&invocation.fen, depth);
            println!("{report}");
            report.all_match()
        }
        Command::BestMove => {
            let depth = invocation.depth.unwrap_or(DEFAULT_SEARCH_DEPTH);
            let start = Instant::now();
            match find_best_move(&board, board.side_to_move(), depth) {
                Some(result) => {
                    println!(
                        "bestmove {} score {} nodes {} time {:.3}s",
                        result.best_move,
                        result.score,
                        result.nodes,
                        start.elapsed().as_secs_f64()
                    );
                    true
                }
                None => {
                    println!("bestmove (none)");
                    true
                }
            }
        }
        Command::Divide => {
            let depth = invocation.depth.unwrap_or(1);
            let split = Perft::default().divide(depth, &board);
            let mut total = 0;
            for (mv, nodes) in &split {
                println!("{mv}: {nodes}");
                total += nodes;
            }
            println!();
            println!("moves: {}", split.len());
            println!("nodes: {total}");
            true
        }
    }
}

fn main() -> ExitCode {
    env_logger::init();

    let args: Vec<String> = env::args().skip(1).collect();
    let invocation = match parse_args(&args) {
        Ok(invocation) => invocation,
        Err(err) => {
            eprintln!("error: {err}");
            eprintln!("{USAGE}");
            return ExitCode::from(2);
        }
    };

    if run(&invocation) {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(line: &str) -> Vec<String> {
        line.split_whitespace().map(str::to_string).collect()
    }

    #[test]
    fn test_fen_words_are_joined() {
        let parsed = parse_args(&args("perft --depth 2 8/8/8/8/8/8/8/K6k w - - 0 1")).unwrap();
        assert_eq!(parsed.command, Command::Perft);
        assert_eq!(parsed.depth, Some(2));
        assert_eq!(parsed.fen, "8/8/8/8/8/8/8/K6k w - - 0 1");
    }

    #[test]
    fn test_defaults_to_start_position() {
        let parsed = parse_args(&args("bestmove")).unwrap();
        assert_eq!(parsed.fen, START_FEN);
        assert_eq!(parsed.depth, None);
    }

    #[test]
    fn test_errors() {
        assert_eq!(parse_args(&[]), Err(CliError::MissingCommand));
        assert_eq!(
            parse_args(&args("play")),
            Err(CliError::UnknownCommand("play".to_string()))
        );
        assert_eq!(parse_args(&args("divide")), Err(CliError::MissingDepth));
        assert_eq!(
            parse_args(&args("perft --depth x")),
            Err(CliError::InvalidDepth("x".to_string()))
        );
    }
}
