use log::warn;

use crate::zobrist::ZOBRIST;

use super::movegen::CastlePath;
use super::{Board, Color, Move, Piece, Square, UnmakeInfo};

/// The castling right tied to a rook corner, if `sq` is one.
fn corner_right(sq: Square) -> Option<(Color, bool)> {
    match (sq.file(), sq.rank()) {
        (0, 0) => Some((Color::White, false)),
        (7, 0) => Some((Color::White, true)),
        (0, 7) => Some((Color::Black, false)),
        (7, 7) => Some((Color::Black, true)),
        _ => None,
    }
}

impl Board {
    /// Play `mv` and return the token that reverts it.
    ///
    /// Castling and en passant are recognised from the board: a king moving
    /// two files from its home square castles, a pawn moving diagonally onto
    /// the empty en passant target captures the pawn beside it. A pawn
    /// reaching the last rank promotes to `mv.promotion()`, or to a queen
    /// when none (or an invalid piece) is given.
    ///
    /// The move is not validated. An empty origin leaves the board untouched.
    pub fn apply(&mut self, mv: Move) -> UnmakeInfo {
        let mut info = UnmakeInfo {
            moved: None,
            captured: None,
            rook_relocation: None,
            previous_white_to_move: self.white_to_move,
            previous_castling_rights: self.castling_rights,
            previous_en_passant_target: self.en_passant_target,
            previous_halfmove_clock: self.halfmove_clock,
            previous_fullmove_number: self.fullmove_number,
            previous_hash: self.hash,
        };

        let Some((color, piece)) = self.remove_piece(mv.from) else {
            warn!("apply {mv}: no piece on {}", mv.from);
            return info;
        };
        info.moved = Some((color, piece));

        let en_passant = piece == Piece::Pawn
            && mv.from.file() != mv.to.file()
            && self.is_empty(mv.to)
            && self.en_passant_target == Some(mv.to);
        let capture_square = if en_passant {
            Square::new(mv.to.file(), mv.from.rank())
        } else {
            Some(mv.to)
        };
        if let Some(sq) = capture_square {
            if let Some((captured_color, captured_piece)) = self.remove_piece(sq) {
                info.captured = Some((sq, captured_color, captured_piece));
            }
        }

        let placed = if piece == Piece::Pawn && mv.to.rank() == color.pawn_promotion_rank() {
            mv.promotion
                .filter(|choice| choice.is_promotion_choice())
                .unwrap_or(Piece::Queen)
        } else {
            piece
        };
        self.set_piece(mv.to, color, placed);

        if piece == Piece::King {
            if let Some(path) = CastlePath::for_king_move(color, mv.from, mv.to) {
                if self.piece_at(path.rook_from) == Some((color, Piece::Rook)) {
                    self.remove_piece(path.rook_from);
                    self.set_piece(path.rook_to, color, Piece::Rook);
                    info.rook_relocation = Some((path.rook_from, path.rook_to));
                }
            }
        }

        let mut rights = self.castling_rights;
        match piece {
            Piece::King => rights.remove_color(color),
            Piece::Rook => {
                if let Some((owner, kingside)) = corner_right(mv.from) {
                    if owner == color {
                        rights.remove(owner, kingside);
                    }
                }
            }
            _ => {}
        }
        if let Some((sq, captured_color, Piece::Rook)) = info.captured {
            if let Some((owner, kingside)) = corner_right(sq) {
                if owner == captured_color {
                    rights.remove(owner, kingside);
                }
            }
        }
        self.hash ^= ZOBRIST.castling(self.castling_rights) ^ ZOBRIST.castling(rights);
        self.castling_rights = rights;

        if let Some(old) = self.en_passant_target.take() {
            self.hash ^= ZOBRIST.en_passant(old);
        }
        if piece == Piece::Pawn
            && mv.from.rank() == color.pawn_start_rank()
            && mv.to.rank().abs_diff(mv.from.rank()) == 2
        {
            if let Some(target) = mv.from.offset(0, color.pawn_direction()) {
                self.en_passant_target = Some(target);
                self.hash ^= ZOBRIST.en_passant(target);
            }
        }

        if piece == Piece::Pawn || info.captured.is_some() {
            self.halfmove_clock = 0;
        } else {
            self.halfmove_clock = self.halfmove_clock.saturating_add(1);
        }
        if color == Color::Black {
            self.fullmove_number = self.fullmove_number.saturating_add(1);
        }
        self.set_side_to_move(color.opponent());

        info
    }

    /// Revert a move played by [`Board::apply`]. `info` must be the token
    /// that call returned, and no other move may have been applied since.
    pub fn undo(&mut self, mv: Move, info: UnmakeInfo) {
        if let Some((color, piece)) = info.moved {
            self.remove_piece(mv.to);
            if let Some((rook_from, rook_to)) = info.rook_relocation {
                if let Some((rook_color, rook)) = self.remove_piece(rook_to) {
                    self.set_piece(rook_from, rook_color, rook);
                }
            }
            if let Some((sq, captured_color, captured_piece)) = info.captured {
                self.set_piece(sq, captured_color, captured_piece);
            }
            self.set_piece(mv.from, color, piece);
        }

        self.white_to_move = info.previous_white_to_move;
        self.castling_rights = info.previous_castling_rights;
        self.en_passant_target = info.previous_en_passant_target;
        self.halfmove_clock = info.previous_halfmove_clock;
        self.fullmove_number = info.previous_fullmove_number;
        self.hash = info.previous_hash;
    }
}
