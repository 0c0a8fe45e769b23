//! Search constants and parameters.

// ============================================================================
// SCORES
// ============================================================================

/// Larger than any reachable score
pub const INFINITY: i32 = 1_000_000;

/// Base checkmate score; the remaining depth is added so shorter mates score higher
pub const MATE_SCORE: i32 = 100_000;

/// Scores with absolute value >= this are checkmate scores
pub const MATE_THRESHOLD: i32 = MATE_SCORE - 1_000;

// ============================================================================
// EXTENSIONS
// ============================================================================

/// Plies from the root past which check extensions stop
pub const DEFAULT_MAX_EXTENSION_PLY: u32 = 16;

// ============================================================================
// MOVE ORDERING PRIORITIES
// ============================================================================
// Higher scores are tried earlier: hash move, then captures and promotions.

/// Best move remembered by the transposition table
pub const HASH_MOVE_SCORE: i32 = 1 << 20;

pub const PROMOTION_BONUS: i32 = 800;

pub const EN_PASSANT_BONUS: i32 = 500;

pub const CASTLING_BONUS: i32 = 50;

/// Pawn or knight landing on the central 4x4 block
pub const CENTRE_MOVE_BONUS: i32 = 10;

// ============================================================================
// EVALUATION
// ============================================================================

/// Per rank a pawn has advanced from its start
pub const PAWN_ADVANCE_BONUS: i32 = 5;

/// Knight or bishop on the central 4x4 block
pub const MINOR_CENTRE_BONUS: i32 = 10;

/// Extra for a knight or bishop on d4, e4, d5 or e5
pub const MINOR_CORE_BONUS: i32 = 10;
