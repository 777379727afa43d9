//! The fixed geometry of castling.
//!
//! Everything castling needs to know about the board is tabulated here:
//! which squares must be empty, which must be safe from the opponent,
//! and where king and rook start and end up. Tables are indexed by
//! [`Color`] then [`CastleSide`] throughout.

use crate::model::{CastleSide, Color, Square};

/// The castling tables for a ruleset.
///
/// `space` masks cover every square between king and rook that must be
/// empty; `safety` masks cover the king's transit and destination
/// squares that must not be controlled by the opponent. The king's own
/// square is deliberately absent from `safety`: castling out of check
/// is a legality concern, which this crate leaves to its callers.
#[derive(Debug, Clone, Copy)]
pub struct CastleRules {
    pub space: [[u64; 2]; 2],
    pub safety: [[u64; 2]; 2],
    pub king_start: [Square; 2],
    pub rook_start: [[Square; 2]; 2],
    pub king_end: [[Square; 2]; 2],
    pub rook_end: [[Square; 2]; 2],
}

/// Standard chess castling.
pub const CLASSIC: CastleRules = {
    // First-rank masks; shifting by 56 moves them to the eighth rank.
    const KS_SPACE: u64 = 0x60; // f1, g1
    const QS_SPACE: u64 = 0x0E; // b1, c1, d1
    const KS_SAFE: u64 = 0x60; // f1, g1
    const QS_SAFE: u64 = 0x0C; // c1, d1

    CastleRules {
        space: [
            [KS_SPACE, QS_SPACE],
            [KS_SPACE << 56, QS_SPACE << 56],
        ],
        safety: [
            [KS_SAFE, QS_SAFE],
            [KS_SAFE << 56, QS_SAFE << 56],
        ],
        king_start: [Square::e1, Square::e8],
        rook_start: [[Square::h1, Square::a1], [Square::h8, Square::a8]],
        king_end: [[Square::g1, Square::c1], [Square::g8, Square::c8]],
        rook_end: [[Square::f1, Square::d1], [Square::f8, Square::d8]],
    }
};

impl CastleRules {
    #[inline]
    pub fn space(&self, color: Color, side: CastleSide) -> u64 {
        self.space[color.ix()][side.ix()]
    }

    #[inline]
    pub fn safety(&self, color: Color, side: CastleSide) -> u64 {
        self.safety[color.ix()][side.ix()]
    }

    /// King travel of a castle, as (start, end).
    #[inline]
    pub fn king_travel(&self, color: Color, side: CastleSide) -> (Square, Square) {
        (self.king_start[color.ix()], self.king_end[color.ix()][side.ix()])
    }

    /// Rook travel of a castle, as (start, end).
    #[inline]
    pub fn rook_travel(&self, color: Color, side: CastleSide) -> (Square, Square) {
        (
            self.rook_start[color.ix()][side.ix()],
            self.rook_end[color.ix()][side.ix()],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CastleSide::*, Color::*};

    #[test]
    fn classic_geometry() {
        assert_eq!(
            CLASSIC.space(WHITE, QUEENSIDE),
            Square::b1.mask() | Square::c1.mask() | Square::d1.mask()
        );
        assert_eq!(
            CLASSIC.safety(WHITE, QUEENSIDE),
            Square::c1.mask() | Square::d1.mask()
        );
        assert_eq!(
            CLASSIC.space(BLACK, KINGSIDE),
            Square::f8.mask() | Square::g8.mask()
        );
        assert_eq!(CLASSIC.king_travel(BLACK, KINGSIDE), (Square::e8, Square::g8));
        assert_eq!(CLASSIC.rook_travel(BLACK, QUEENSIDE), (Square::a8, Square::d8));
    }

    #[test]
    fn safety_is_subset_of_space_plus_destination() {
        for color in [WHITE, BLACK] {
            for side in [KINGSIDE, QUEENSIDE] {
                let space = CLASSIC.space(color, side);
                let safety = CLASSIC.safety(color, side);
                assert_eq!(safety & !space, 0);
                let (_, end) = CLASSIC.king_travel(color, side);
                assert_ne!(safety & end.mask(), 0);
            }
        }
    }
}
