//! Error types for chess board operations.

use std::fmt;

/// Diagnostic produced while reading a FEN string.
///
/// FEN ingestion never aborts: each problem is recorded, the offending input
/// is skipped or clamped, and parsing continues.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FenError {
    /// The string has no piece-placement field at all
    MissingPlacement,
    /// More than 8 ranks; the extra ranks are ignored
    TooManyRanks { found: usize },
    /// Fewer than 8 ranks; the missing ranks stay empty
    TooFewRanks { found: usize },
    /// Unrecognized character in the placement field; it is skipped
    InvalidPiece { char: char, rank: usize },
    /// A rank describes more than 8 files; the overflow is dropped
    RankOverflow { rank: usize },
    /// Side to move is neither 'w' nor 'b'; White is assumed
    InvalidSideToMove { found: String },
    /// Unrecognized castling character; it is skipped
    InvalidCastling { char: char },
    /// En passant field is not '-' or a square on rank 3/6; it is ignored
    InvalidEnPassant { found: String },
    /// Halfmove clock or fullmove number is not a number; the default is used
    InvalidCounter { field: &'static str, found: String },
}

impl fmt::Display for FenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FenError::MissingPlacement => write!(f, "FEN has no piece placement field"),
            FenError::TooManyRanks { found } => {
                write!(f, "FEN placement has {found} ranks, extra ranks ignored")
            }
            FenError::TooFewRanks { found } => {
                write!(f, "FEN placement has only {found} ranks, rest left empty")
            }
            FenError::InvalidPiece { char, rank } => {
                write!(f, "Invalid piece character '{char}' in FEN rank {rank}, skipped")
            }
            FenError::RankOverflow { rank } => {
                write!(f, "FEN rank {rank} describes more than 8 files, clamped")
            }
            FenError::InvalidSideToMove { found } => {
                write!(f, "Invalid side to move '{found}', expected 'w' or 'b'")
            }
            FenError::InvalidCastling { char } => {
                write!(f, "Invalid castling character '{char}' in FEN, skipped")
            }
            FenError::InvalidEnPassant { found } => {
                write!(f, "Invalid en passant square '{found}', ignored")
            }
            FenError::InvalidCounter { field, found } => {
                write!(f, "Invalid {field} '{found}' in FEN, default used")
            }
        }
    }
}

impl std::error::Error for FenError {}

/// Error type for move parsing failures
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveParseError {
    /// Move string has invalid length (must be 4-5 characters)
    InvalidLength { len: usize },
    /// Invalid square notation in move
    InvalidSquare { notation: String },
    /// Invalid promotion piece
    InvalidPromotion { char: char },
    /// Move is not legal in the current position
    IllegalMove { notation: String },
}

impl fmt::Display for MoveParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveParseError::InvalidLength { len } => {
                write!(f, "Move must be 4-5 characters, found {len}")
            }
            MoveParseError::InvalidSquare { notation } => {
                write!(f, "Invalid square notation in '{notation}'")
            }
            MoveParseError::InvalidPromotion { char } => {
                write!(f, "Invalid promotion piece '{char}'")
            }
            MoveParseError::IllegalMove { notation } => {
                write!(f, "Illegal move '{notation}'")
            }
        }
    }
}

impl std::error::Error for MoveParseError {}

/// Error type for square parsing failures
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SquareError {
    /// Rank out of bounds (must be 0-7)
    RankOutOfBounds { rank: u8 },
    /// File out of bounds (must be 0-7)
    FileOutOfBounds { file: u8 },
    /// Invalid algebraic notation
    InvalidNotation { notation: String },
}

impl fmt::Display for SquareError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SquareError::RankOutOfBounds { rank } => {
                write!(f, "Rank {rank} out of bounds (must be 0-7)")
            }
            SquareError::FileOutOfBounds { file } => {
                write!(f, "File {file} out of bounds (must be 0-7)")
            }
            SquareError::InvalidNotation { notation } => {
                write!(f, "Invalid square notation '{notation}'")
            }
        }
    }
}

impl std::error::Error for SquareError {}

/// Violation of the one-king-per-color setup invariant
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KingCountError {
    pub white: usize,
    pub black: usize,
}

impl fmt::Display for KingCountError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Expected one king per color, found {} white and {} black",
            self.white, self.black
        )
    }
}

impl std::error::Error for KingCountError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fen_error_invalid_piece() {
        let err = FenError::InvalidPiece { char: 'z', rank: 3 };
        assert!(err.to_string().contains("'z'"));
        assert!(err.to_string().contains('3'));
    }

    #[test]
    fn test_fen_error_rank_counts() {
        assert!(FenError::TooManyRanks { found: 9 }.to_string().contains('9'));
        assert!(FenError::TooFewRanks { found: 7 }.to_string().contains('7'));
    }

    #[test]
    fn test_fen_error_invalid_side() {
        let err = FenError::InvalidSideToMove {
            found: "X".to_string(),
        };
        assert!(err.to_string().contains("'X'"));
    }

    #[test]
    fn test_move_error_illegal_move() {
        let err = MoveParseError::IllegalMove {
            notation: "e2e5".to_string(),
        };
        assert!(err.to_string().contains("e2e5"));
    }

    #[test]
    fn test_square_error_invalid_notation() {
        let err = SquareError::InvalidNotation {
            notation: "xyz".to_string(),
        };
        assert!(err.to_string().contains("xyz"));
    }

    #[test]
    fn test_king_count_error() {
        let err = KingCountError { white: 0, black: 2 };
        assert!(err.to_string().contains("0 white"));
        assert!(err.to_string().contains("2 black"));
    }
}
