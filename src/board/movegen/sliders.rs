use super::super::{Board, Color, Square};

impl Board {
    /// Walk each ray until the board edge or the first occupied square,
    /// which is included when it holds an enemy piece.
    pub(crate) fn slider_destinations(
        &self,
        from: Square,
        color: Color,
        directions: &[(i8, i8)],
    ) -> Vec<Square> {
        let mut moves = Vec::with_capacity(14);
        for &(df, dr) in directions {
            let mut current = from.offset(df, dr);
            while let Some(to) = current {
                match self.piece_at(to) {
                    None => moves.push(to),
                    Some((owner, _)) => {
                        if owner != color {
                            moves.push(to);
                        }
                        break;
                    }
                }
                current = to.offset(df, dr);
            }
        }
        moves
    }
}
