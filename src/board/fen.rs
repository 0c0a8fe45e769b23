use std::str::FromStr;

use log::warn;

use super::error::{FenError, MoveParseError};
use super::{Board, Color, Move, Piece, Square};

impl Board {
    /// Parse a board position from FEN notation, collecting diagnostics.
    ///
    /// Parsing never fails: overflowing ranks are clamped, unknown characters
    /// are skipped and missing trailing fields take their defaults
    /// (`w - - 0 1`). Every repair is reported in the returned list.
    #[must_use]
    pub fn parse_fen(fen: &str) -> (Self, Vec<FenError>) {
        let mut board = Board::empty();
        let mut problems = Vec::new();
        let mut parts = fen.split_whitespace();

        match parts.next() {
            Some(placement) => board.parse_placement(placement, &mut problems),
            None => problems.push(FenError::MissingPlacement),
        }

        // Parse side to move
        match parts.next() {
            None | Some("w") => board.white_to_move = true,
            Some("b") => board.white_to_move = false,
            Some(other) => problems.push(FenError::InvalidSideToMove {
                found: other.to_string(),
            }),
        }

        // Parse castling rights
        if let Some(castling) = parts.next() {
            for c in castling.chars() {
                match c {
                    'K' => board.castling_rights.set(Color::White, true),
                    'Q' => board.castling_rights.set(Color::White, false),
                    'k' => board.castling_rights.set(Color::Black, true),
                    'q' => board.castling_rights.set(Color::Black, false),
                    '-' => {}
                    _ => problems.push(FenError::InvalidCastling { char: c }),
                }
            }
        }

        // Parse en passant target
        if let Some(ep) = parts.next() {
            if ep != "-" {
                match ep.parse::<Square>() {
                    Ok(sq) if sq.rank() == 2 || sq.rank() == 5 => {
                        board.en_passant_target = Some(sq);
                    }
                    _ => problems.push(FenError::InvalidEnPassant {
                        found: ep.to_string(),
                    }),
                }
            }
        }

        if let Some(halfmove) = parts.next() {
            match halfmove.parse() {
                Ok(n) => board.halfmove_clock = n,
                Err(_) => problems.push(FenError::InvalidCounter {
                    field: "halfmove clock",
                    found: halfmove.to_string(),
                }),
            }
        }

        if let Some(fullmove) = parts.next() {
            match fullmove.parse::<u32>() {
                Ok(n) => board.fullmove_number = n.max(1),
                Err(_) => problems.push(FenError::InvalidCounter {
                    field: "fullmove number",
                    found: fullmove.to_string(),
                }),
            }
        }

        board.hash = board.compute_hash();
        (board, problems)
    }

    fn parse_placement(&mut self, placement: &str, problems: &mut Vec<FenError>) {
        let mut ranks_seen = 0;
        for (rank_idx, rank_str) in placement.split('/').enumerate() {
            if rank_idx >= 8 {
                problems.push(FenError::TooManyRanks {
                    found: placement.split('/').count(),
                });
                break;
            }
            ranks_seen += 1;
            let rank = 7 - rank_idx as u8;
            let mut file: u8 = 0;
            let mut overflowed = false;
            for c in rank_str.chars() {
                if let Some(run) = c.to_digit(10) {
                    file = file.saturating_add(run as u8);
                    if file > 8 {
                        file = 8;
                        overflowed = true;
                    }
                    continue;
                }
                let Some(piece) = Piece::from_char(c) else {
                    problems.push(FenError::InvalidPiece {
                        char: c,
                        rank: rank_idx,
                    });
                    continue;
                };
                match Square::new(file, rank) {
                    Some(sq) => {
                        let color = if c.is_ascii_uppercase() {
                            Color::White
                        } else {
                            Color::Black
                        };
                        self.set_piece(sq, color, piece);
                        file += 1;
                    }
                    None => overflowed = true,
                }
            }
            if overflowed {
                problems.push(FenError::RankOverflow { rank: rank_idx });
            }
        }
        if ranks_seen < 8 {
            problems.push(FenError::TooFewRanks { found: ranks_seen });
        }
    }

    /// Parse a board position from FEN notation, logging any repairs.
    #[must_use]
    pub fn from_fen(fen: &str) -> Self {
        let (board, problems) = Self::parse_fen(fen);
        for problem in &problems {
            warn!("{problem} (fen: {fen})");
        }
        board
    }

    /// Convert the board position to FEN notation.
    #[must_use]
    pub fn to_fen(&self) -> String {
        format!(
            "{} {} {}",
            self.position_key(),
            self.halfmove_clock,
            self.fullmove_number
        )
    }

    /// FEN without the move counters: placement, side, castling, en passant.
    ///
    /// Two positions with the same key are the same position for repetition
    /// purposes.
    #[must_use]
    pub fn position_key(&self) -> String {
        let mut rows: Vec<String> = Vec::with_capacity(8);
        for rank in (0..8u8).rev() {
            let mut row = String::new();
            let mut empty = 0;
            for file in 0..8u8 {
                match Square::new(file, rank).and_then(|sq| self.piece_at(sq)) {
                    Some((color, piece)) => {
                        if empty > 0 {
                            row.push_str(&empty.to_string());
                            empty = 0;
                        }
                        row.push(piece.to_fen_char(color));
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                row.push_str(&empty.to_string());
            }
            rows.push(row);
        }

        let active = if self.white_to_move { "w" } else { "b" };
        let ep = self
            .en_passant_target
            .map_or_else(|| "-".to_string(), |sq| sq.to_string());

        format!(
            "{} {} {} {}",
            rows.join("/"),
            active,
            self.castling_rights,
            ep
        )
    }

    /// Parse a move in long algebraic notation (e.g., "e2e4", "e7e8q").
    ///
    /// Returns the matching legal move if found, or an error describing why parsing failed.
    ///
    /// # Example
    /// ```
    /// use chess_rules::board::Board;
    ///
    /// let board = Board::new();
    /// let mv = board.parse_move("e2e4").unwrap();
    /// assert_eq!(mv.to_string(), "e2e4");
    /// ```
    pub fn parse_move(&self, notation: &str) -> Result<Move, MoveParseError> {
        if notation.len() < 4 || notation.len() > 5 || !notation.is_ascii() {
            return Err(MoveParseError::InvalidLength {
                len: notation.len(),
            });
        }

        let (from, to) = match (notation[0..2].parse(), notation[2..4].parse()) {
            (Ok(from), Ok(to)) => (from, to),
            _ => {
                return Err(MoveParseError::InvalidSquare {
                    notation: notation.to_string(),
                })
            }
        };

        let promotion = match notation.chars().nth(4) {
            Some(c) => match Piece::from_char(c) {
                Some(piece) if piece.is_promotion_choice() => Some(piece),
                _ => return Err(MoveParseError::InvalidPromotion { char: c }),
            },
            None => None,
        };

        self.legal_moves()
            .into_iter()
            .find(|mv| mv.from == from && mv.to == to && mv.promotion == promotion)
            .ok_or_else(|| MoveParseError::IllegalMove {
                notation: notation.to_string(),
            })
    }

    /// Parse a move and apply it in one call.
    pub fn apply_notation(&mut self, notation: &str) -> Result<Move, MoveParseError> {
        let mv = self.parse_move(notation)?;
        self.apply(mv);
        Ok(mv)
    }
}

/// Strict parsing: the first diagnostic becomes the error.
impl FromStr for Board {
    type Err = FenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (board, mut problems) = Board::parse_fen(s);
        if problems.is_empty() {
            Ok(board)
        } else {
            Err(problems.swap_remove(0))
        }
    }
}
