//! The shapes a chess move can take.

use crate::model::{CastleSide, Color, CompassRose, EnPassant, Promote, Square};

/// A chess move, as one of exactly four shapes.
///
/// Normal moves carry their start and end squares as single-bit masks,
/// matching how the rest of the model addresses the board. The other
/// three shapes carry only what cannot be derived: an en-passant
/// capture is fully determined by the en-passant record plus the
/// direction the capturer approaches from, a castle by color and side,
/// and a promotion by its start square, travel direction and the chosen
/// piece.
///
/// Every consumer matches this enum exhaustively, so adding a shape is
/// a compile error at each application and display site rather than a
/// silent fall-through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChessMove {
    Normal { start: u64, end: u64 },
    EnPassant { target: EnPassant, approach: CompassRose },
    Castle { color: Color, side: CastleSide },
    Promotion { start: Square, travel: CompassRose, promote_to: Promote },
}

impl ChessMove {
    /// Convenience constructor from squares.
    #[inline]
    pub fn normal(start: Square, end: Square) -> Self {
        Self::Normal { start: start.mask(), end: end.mask() }
    }

    /// Whether this move is a capture against the given occupancy of
    /// the opposing side. En passant always captures; castling never.
    pub fn captures(&self, enemy: u64) -> bool {
        match self {
            Self::Normal { end, .. } => end & enemy != 0,
            Self::EnPassant { .. } => true,
            Self::Castle { .. } => false,
            Self::Promotion { start, travel, .. } => match start.step(*travel, 1) {
                Some(end) => end.mask() & enemy != 0,
                None => false,
            },
        }
    }
}

impl super::EnPassant {
    /// The square the capturing pawn stands on, given the direction it
    /// approaches the landing square from.
    ///
    /// The approach direction points from the capturer toward its
    /// landing square, so stepping backwards from the landing square
    /// recovers the start.
    #[inline]
    pub fn capturer_square(self, approach: CompassRose) -> Option<Square> {
        self.landing_square().step(approach.opp(), 1)
    }
}
