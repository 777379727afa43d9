//! Controlled-square computation.
//!
//! A square is controlled by a side if one of its pieces attacks it,
//! whether or not the square is occupied. Squares holding the
//! controlling side's own pieces count: a defended piece denies the
//! enemy king its square just as an empty attacked square does.

use std::sync::LazyLock;

use crate::model::board::Board;
use crate::model::{Color, CompassRose, Role, Square};
use strum::IntoEnumIterator;

/// Knight destination masks per square.
pub static KNIGHT_SEES: LazyLock<[u64; 64]> = LazyLock::new(|| {
    const JUMPS: [(i8, i8); 8] = [
        (1, 2), (2, 1), (2, -1), (1, -2),
        (-1, -2), (-2, -1), (-2, 1), (-1, 2),
    ];
    let mut sees = [0u64; 64];
    for sq in Square::iter() {
        for (df, dr) in JUMPS {
            if let Some(to) = Square::from_coords(sq.file() as i8 + df, sq.rank() as i8 + dr) {
                sees[sq.ix()] |= to.mask();
            }
        }
    }
    sees
});

/// King destination masks per square.
pub static KING_SEES: LazyLock<[u64; 64]> = LazyLock::new(|| {
    let mut sees = [0u64; 64];
    for sq in Square::iter() {
        for dir in DIRS {
            if let Some(to) = sq.step(dir, 1) {
                sees[sq.ix()] |= to.mask();
            }
        }
    }
    sees
});

const DIRS: [CompassRose; 8] = [
    CompassRose::NORTH,
    CompassRose::NORTHEAST,
    CompassRose::EAST,
    CompassRose::SOUTHEAST,
    CompassRose::SOUTH,
    CompassRose::SOUTHWEST,
    CompassRose::WEST,
    CompassRose::NORTHWEST,
];

pub const BISHOP_DIRS: [CompassRose; 4] = [
    CompassRose::NORTHEAST,
    CompassRose::SOUTHEAST,
    CompassRose::SOUTHWEST,
    CompassRose::NORTHWEST,
];

pub const ROOK_DIRS: [CompassRose; 4] = [
    CompassRose::NORTH,
    CompassRose::EAST,
    CompassRose::SOUTH,
    CompassRose::WEST,
];

pub const QUEEN_DIRS: [CompassRose; 8] = DIRS;

/// The diagonal capture directions of a pawn of the given color.
#[inline]
pub fn pawn_dirs(color: Color) -> [CompassRose; 2] {
    match color {
        Color::WHITE => [CompassRose::NORTHWEST, CompassRose::NORTHEAST],
        Color::BLACK => [CompassRose::SOUTHWEST, CompassRose::SOUTHEAST],
    }
}

/// The squares a pawn of `color` on `sq` attacks.
pub fn pawn_sees(color: Color, sq: Square) -> u64 {
    let mut sees = 0;
    for dir in pawn_dirs(color) {
        if let Some(to) = sq.step(dir, 1) {
            sees |= to.mask();
        }
    }
    sees
}

/// The squares a slider on `sq` attacks along `dirs`, given the total
/// occupancy: every ray square up to and including the first blocker
/// of either color.
pub fn ray_sees(sq: Square, dirs: &[CompassRose], total: u64) -> u64 {
    let mut sees = 0;
    for &dir in dirs {
        let mut cursor = sq;
        while let Some(to) = cursor.step(dir, 1) {
            sees |= to.mask();
            if total & to.mask() != 0 {
                break;
            }
            cursor = to;
        }
    }
    sees
}

/// Every square `side` controls in the given position.
pub fn controlled(board: &Board, side: Color) -> u64 {
    let total = board.total();
    let lo = side.ix() * 6;
    let mut sees = 0;

    crate::biterate!(sq in board.boards[lo + Role::PAWN.ix()] => {
        sees |= pawn_sees(side, sq);
    });
    crate::biterate!(sq in board.boards[lo + Role::KNIGHT.ix()] => {
        sees |= KNIGHT_SEES[sq.ix()];
    });
    crate::biterate!(sq in board.boards[lo + Role::BISHOP.ix()] => {
        sees |= ray_sees(sq, &BISHOP_DIRS, total);
    });
    crate::biterate!(sq in board.boards[lo + Role::ROOK.ix()] => {
        sees |= ray_sees(sq, &ROOK_DIRS, total);
    });
    crate::biterate!(sq in board.boards[lo + Role::QUEEN.ix()] => {
        sees |= ray_sees(sq, &QUEEN_DIRS, total);
    });
    crate::biterate!(sq in board.boards[lo + Role::KING.ix()] => {
        sees |= KING_SEES[sq.ix()];
    });

    sees
}
