//! Shared cache of pseudo-legal destinations.
//!
//! Entries are keyed on the full-board Zobrist hash as well as the piece's
//! square, type, color, the en passant target and the castling rights, so a
//! change anywhere on the board produces a different key. Callers share one
//! cache across threads; every access goes through the mutex and the lock is
//! never held while destinations are generated.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;

use crate::board::{Board, CastlingRights, Color, Piece, Square};

/// Default number of cached entries before the cache is flushed
pub const DEFAULT_CACHE_CAPACITY: usize = 1 << 18;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
struct CacheKey {
    hash: u64,
    square: Square,
    piece: Piece,
    color: Color,
    en_passant: Option<Square>,
    castling: CastlingRights,
}

/// Hit/miss counters
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub flushes: u64,
}

pub struct MoveGenCache {
    entries: Mutex<HashMap<CacheKey, Vec<Square>>>,
    capacity: usize,
    hits: AtomicU64,
    misses: AtomicU64,
    flushes: AtomicU64,
}

impl Default for MoveGenCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_CAPACITY)
    }
}

impl MoveGenCache {
    /// Create a cache holding at most `capacity` entries.
    ///
    /// When full, the whole cache is cleared before the next insert.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        MoveGenCache {
            entries: Mutex::new(HashMap::new()),
            capacity: capacity.max(1),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            flushes: AtomicU64::new(0),
        }
    }

    /// Pseudo-legal destinations of the piece on `from`, cached.
    pub fn destinations(&self, board: &Board, from: Square) -> Vec<Square> {
        let Some((color, piece)) = board.piece_at(from) else {
            return Vec::new();
        };
        let key = CacheKey {
            hash: board.hash(),
            square: from,
            piece,
            color,
            en_passant: board.en_passant_target(),
            castling: board.castling_rights(),
        };

        if let Some(found) = self.entries.lock().get(&key) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            return found.clone();
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        let moves = board.pseudo_legal_destinations(from);

        let mut entries = self.entries.lock();
        if entries.len() >= self.capacity {
            entries.clear();
            self.flushes.fetch_add(1, Ordering::Relaxed);
        }
        entries.insert(key, moves.clone());
        moves
    }

    /// Drop every entry.
    pub fn clear(&self) {
        self.entries.lock().clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            flushes: self.flushes.load(Ordering::Relaxed),
        }
    }
}
