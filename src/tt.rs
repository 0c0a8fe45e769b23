//! Transposition table for caching search results.
//!
//! Keyed by the board's Zobrist hash. Entries live in a `HashMap` behind a
//! `parking_lot::Mutex`, so one table may be shared between threads; each
//! probe or store takes the lock once.

use std::collections::HashMap;

use parking_lot::Mutex;

use crate::board::Move;

/// Default entry limit before the table is flushed
pub const DEFAULT_TT_CAPACITY: usize = 1 << 20;

/// How a stored score relates to the true value of the position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeType {
    Exact, // Score is the exact value
    Alpha, // Upper bound: the search failed low (score <= alpha)
    Beta,  // Lower bound: the search failed high (score >= beta)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TTEntry {
    pub depth: u32,
    pub score: i32,
    pub node_type: NodeType,
    pub best_move: Option<Move>,
}

impl TTEntry {
    pub fn depth(&self) -> u32 {
        self.depth
    }

    pub fn score(&self) -> i32 {
        self.score
    }

    pub fn node_type(&self) -> NodeType {
        self.node_type
    }

    pub fn best_move(&self) -> Option<Move> {
        self.best_move
    }
}

pub struct TranspositionTable {
    entries: Mutex<HashMap<u64, TTEntry>>,
    capacity: usize,
}

impl Default for TranspositionTable {
    fn default() -> Self {
        TranspositionTable::new(DEFAULT_TT_CAPACITY)
    }
}

impl TranspositionTable {
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        TranspositionTable {
            entries: Mutex::new(HashMap::new()),
            capacity: capacity.max(1),
        }
    }

    #[must_use]
    pub fn probe(&self, hash: u64) -> Option<TTEntry> {
        self.entries.lock().get(&hash).copied()
    }

    /// Store a result. An existing entry for the same hash is replaced only
    /// when `depth` is at least as deep as the stored one. A full table is
    /// cleared before a new hash goes in.
    pub fn store(
        &self,
        hash: u64,
        depth: u32,
        score: i32,
        node_type: NodeType,
        best_move: Option<Move>,
    ) {
        let mut entries = self.entries.lock();
        match entries.get(&hash) {
            Some(existing) if existing.depth > depth => return,
            Some(_) => {}
            None if entries.len() >= self.capacity => entries.clear(),
            None => {}
        }
        entries.insert(
            hash,
            TTEntry {
                depth,
                score,
                node_type,
                best_move,
            },
        );
    }

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
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Square;

    fn mv() -> Move {
        Move::new(Square::from_index(12), Square::from_index(28))
    }

    #[test]
    fn test_store_and_probe() {
        let tt = TranspositionTable::default();
        tt.store(42, 3, 15, NodeType::Exact, Some(mv()));
        let entry = tt.probe(42).unwrap();
        assert_eq!(entry.depth(), 3);
        assert_eq!(entry.score(), 15);
        assert_eq!(entry.node_type(), NodeType::Exact);
        assert_eq!(entry.best_move(), Some(mv()));
        assert!(tt.probe(43).is_none());
    }

    #[test]
    fn test_shallower_store_does_not_replace() {
        let tt = TranspositionTable::default();
        tt.store(7, 5, 100, NodeType::Exact, None);
        tt.store(7, 2, -50, NodeType::Alpha, None);
        assert_eq!(tt.probe(7).unwrap().score(), 100);

        // equal depth counts as fresher
        tt.store(7, 5, 30, NodeType::Beta, None);
        assert_eq!(tt.probe(7).unwrap().node_type(), NodeType::Beta);
    }

    #[test]
    fn test_capacity_flush_and_clear() {
        let tt = TranspositionTable::new(2);
        tt.store(1, 1, 0, NodeType::Exact, None);
        tt.store(2, 1, 0, NodeType::Exact, None);
        tt.store(2, 2, 0, NodeType::Exact, None);
        assert_eq!(tt.len(), 2);
        tt.store(3, 1, 0, NodeType::Exact, None);
        assert_eq!(tt.len(), 1);
        tt.clear();
        assert!(tt.is_empty());
    }
}
