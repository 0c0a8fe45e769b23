use super::super::attacks::KNIGHT_OFFSETS;
use super::super::{Board, Color, Square};

impl Board {
    pub(crate) fn knight_destinations(&self, from: Square, color: Color) -> Vec<Square> {
        self.step_destinations(from, color, &KNIGHT_OFFSETS)
    }

    /// Single-step targets that are empty or hold an enemy piece.
    pub(crate) fn step_destinations(
        &self,
        from: Square,
        color: Color,
        offsets: &[(i8, i8)],
    ) -> Vec<Square> {
        offsets
            .iter()
            .filter_map(|&(df, dr)| from.offset(df, dr))
            .filter(|&to| self.piece_at(to).map_or(true, |(owner, _)| owner != color))
            .collect()
    }
}
