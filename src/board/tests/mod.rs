//! Board module tests.
//!
//! Tests are organized into separate files by category:
//! - `perft.rs` - Node counts for reference positions
//! - `make_unmake.rs` - Apply/undo correctness
//! - `edge_cases.rs` - Castling, en passant, promotion and check edge cases
//! - `proptest.rs` - Property-based tests

mod perft;
