//! # Modeling the game of chess.
//!
//! This module contains the value types of the model: squares, colors,
//! the twelve-piece catalog, compass directions, and the en-passant
//! record. The heavier machinery lives in the sub-modules.

use strum::{EnumIs, EnumIter, VariantArray, VariantNames};

pub mod attacks;
pub mod board;
pub mod cache;
pub mod castling;
pub mod movegen;
pub mod moves;
pub mod moving;
pub mod perft;
pub mod utils;

/// Representation of the squares on a chessboard.
///
/// This enum uses the convention of numbering squares starting with
/// a1 = 0 and then counting up over the files first, b1 = 1, c1 = 2, ...
/// and then the ranks, a2 = 8, a3 = 16, ... ending with h8 = 63.
///
/// This file-major little-endian layout makes `1u64 << square` the
/// occupancy bit of the square, which is the only mapping between
/// squares and mask bits used anywhere in this crate.
#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash,
     VariantNames, EnumIter)]
#[repr(u8)]
#[rustfmt::skip]
pub enum Square {
    a1 = 0o00, b1 = 0o01, c1 = 0o02, d1 = 0o03, e1 = 0o04, f1 = 0o05, g1 = 0o06, h1 = 0o07,
    a2 = 0o10, b2 = 0o11, c2 = 0o12, d2 = 0o13, e2 = 0o14, f2 = 0o15, g2 = 0o16, h2 = 0o17,
    a3 = 0o20, b3 = 0o21, c3 = 0o22, d3 = 0o23, e3 = 0o24, f3 = 0o25, g3 = 0o26, h3 = 0o27,
    a4 = 0o30, b4 = 0o31, c4 = 0o32, d4 = 0o33, e4 = 0o34, f4 = 0o35, g4 = 0o36, h4 = 0o37,
    a5 = 0o40, b5 = 0o41, c5 = 0o42, d5 = 0o43, e5 = 0o44, f5 = 0o45, g5 = 0o46, h5 = 0o47,
    a6 = 0o50, b6 = 0o51, c6 = 0o52, d6 = 0o53, e6 = 0o54, f6 = 0o55, g6 = 0o56, h6 = 0o57,
    a7 = 0o60, b7 = 0o61, c7 = 0o62, d7 = 0o63, e7 = 0o64, f7 = 0o65, g7 = 0o66, h7 = 0o67,
    a8 = 0o70, b8 = 0o71, c8 = 0o72, d8 = 0o73, e8 = 0o74, f8 = 0o75, g8 = 0o76, h8 = 0o77,
}

impl Square {
    /// Use this Square as an array index.
    #[inline]
    pub fn ix(self) -> usize {
        self as usize
    }

    /// Infallible conversion from a u8 by way of truncating the
    /// extraneous bits.
    #[inline]
    pub fn from_u8(ix: u8) -> Self {
        unsafe { std::mem::transmute::<u8, Self>(ix & 0x3F) }
    }

    /// The file index, 0 = the a-file.
    #[inline]
    pub fn file(self) -> u8 {
        self as u8 & 0x7
    }

    /// The rank index, 0 = the first rank.
    #[inline]
    pub fn rank(self) -> u8 {
        (self as u8 & 0x38) >> 3
    }

    /// Construct from a file and rank pair, which may lie off the board.
    #[inline]
    pub fn from_coords(file: i8, rank: i8) -> Option<Self> {
        if (0..8).contains(&file) && (0..8).contains(&rank) {
            Some(Self::from_u8(file as u8 | (rank as u8) << 3))
        } else {
            None
        }
    }

    /// The single-bit occupancy mask of this square.
    #[inline]
    pub fn mask(self) -> u64 {
        1u64 << self as u8
    }

    /// Decode a single-bit mask back into its square.
    ///
    /// Returns `None` unless exactly one bit is set.
    #[inline]
    pub fn from_mask(mask: u64) -> Option<Self> {
        if mask.is_power_of_two() {
            Some(Self::from_u8(mask.trailing_zeros() as u8))
        } else {
            None
        }
    }

    /// Step `n` squares in a compass direction.
    ///
    /// Stepping may leave the board; the bounds check lives in the
    /// return type rather than with the caller.
    #[inline]
    pub fn step(self, dir: CompassRose, n: i8) -> Option<Self> {
        let (df, dr) = dir.delta();
        Self::from_coords(self.file() as i8 + df * n, self.rank() as i8 + dr * n)
    }

    /// Iterate the set bits of a mask as squares, most significant
    /// bit first, by repeatedly isolating and clearing the top bit.
    ///
    /// The ordering is an implementation artifact kept stable for
    /// reproducible tests, not a chess-semantic guarantee.
    #[inline]
    pub fn descending(mask: u64) -> Descending {
        Descending(mask)
    }
}

/// See [`Square::descending`].
#[derive(Debug, Clone, Copy)]
#[repr(transparent)]
pub struct Descending(u64);

impl Iterator for Descending {
    type Item = Square;

    #[inline]
    fn next(&mut self) -> Option<Square> {
        if self.0 == 0 {
            return None;
        }
        let top = 63 - self.0.leading_zeros() as u8;
        self.0 ^= 1u64 << top;
        Some(Square::from_u8(top))
    }
}

/// Representation of the color of a player or piece.
///
/// The discriminants are used extensively for indexing arrays of the
/// form `[<white value>, <black value>]`.
#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, EnumIs)]
#[repr(u8)]
pub enum Color {
    WHITE = 0,
    BLACK = 1,
}

impl Color {
    /// Opposing color.
    #[inline]
    pub fn opp(self) -> Self {
        unsafe { std::mem::transmute(self as u8 ^ 1) }
    }

    /// Associated array index.
    #[inline]
    pub fn ix(self) -> usize {
        self as usize
    }
}

/// Representation of the six piece types.
#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, VariantArray)]
#[repr(u8)]
pub enum Role {
    PAWN = 0,
    KNIGHT = 1,
    BISHOP = 2,
    ROOK = 3,
    QUEEN = 4,
    KING = 5,
}

impl Role {
    /// Use as an array index.
    #[inline]
    pub fn ix(self) -> usize {
        self as usize
    }
}

/// One of the twelve colored pieces of the catalog.
///
/// Every piece owns a storage slot in `0..12` — the index of its
/// occupancy mask in [`board::Board::boards`] — and a FEN symbol,
/// uppercase for white. "No piece" is `Option::<Piece>::None`; there
/// is deliberately no in-band empty sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub role: Role,
    pub color: Color,
}

impl Piece {
    /// The full catalog in storage-slot order: white pawn through
    /// white king, then black pawn through black king.
    pub const ALL: [Piece; 12] = {
        use Color::*;
        use Role::*;
        let mut all = [Piece { role: PAWN, color: WHITE }; 12];
        let roles = [PAWN, KNIGHT, BISHOP, ROOK, QUEEN, KING];
        let mut i = 0;
        while i < 6 {
            all[i] = Piece { role: roles[i], color: WHITE };
            all[i + 6] = Piece { role: roles[i], color: BLACK };
            i += 1;
        }
        all
    };

    /// Lookup by piece type and color. Total over the catalog.
    #[inline]
    pub fn new(role: Role, color: Color) -> Self {
        Self { role, color }
    }

    /// The storage slot of this piece's occupancy mask.
    #[inline]
    pub fn slot(self) -> usize {
        self.color.ix() * 6 + self.role.ix()
    }

    /// Lookup by storage slot; `None` outside `0..12`.
    #[inline]
    pub fn from_slot(slot: usize) -> Option<Self> {
        Self::ALL.get(slot).copied()
    }

    /// The FEN symbol, uppercase for white.
    pub fn symbol(self) -> char {
        let sym = match self.role {
            Role::PAWN => 'p',
            Role::KNIGHT => 'n',
            Role::BISHOP => 'b',
            Role::ROOK => 'r',
            Role::QUEEN => 'q',
            Role::KING => 'k',
        };
        match self.color {
            Color::WHITE => sym.to_ascii_uppercase(),
            Color::BLACK => sym,
        }
    }

    /// Lookup by FEN symbol; `None` for anything but the twelve
    /// defined symbols.
    pub fn from_symbol(symbol: char) -> Option<Self> {
        let role = match symbol.to_ascii_lowercase() {
            'p' => Role::PAWN,
            'n' => Role::KNIGHT,
            'b' => Role::BISHOP,
            'r' => Role::ROOK,
            'q' => Role::QUEEN,
            'k' => Role::KING,
            _ => return None,
        };
        let color = if symbol.is_ascii_uppercase() {
            Color::WHITE
        } else {
            Color::BLACK
        };
        Some(Self { role, color })
    }
}

/// Representation of the directions on a chessboard.
///
/// North is toward the eighth rank and east toward the h-file. Each
/// direction carries the (file, rank) delta of a single step.
#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum CompassRose {
    NORTH,
    NORTHEAST,
    EAST,
    SOUTHEAST,
    SOUTH,
    SOUTHWEST,
    WEST,
    NORTHWEST,
}

impl CompassRose {
    /// The (file, rank) delta of one step in this direction.
    #[inline]
    pub fn delta(self) -> (i8, i8) {
        match self {
            Self::NORTH => (0, 1),
            Self::NORTHEAST => (1, 1),
            Self::EAST => (1, 0),
            Self::SOUTHEAST => (1, -1),
            Self::SOUTH => (0, -1),
            Self::SOUTHWEST => (-1, -1),
            Self::WEST => (-1, 0),
            Self::NORTHWEST => (-1, 1),
        }
    }

    /// Opposing direction.
    #[inline]
    pub fn opp(self) -> Self {
        match self {
            Self::NORTH => Self::SOUTH,
            Self::NORTHEAST => Self::SOUTHWEST,
            Self::EAST => Self::WEST,
            Self::SOUTHEAST => Self::NORTHWEST,
            Self::SOUTH => Self::NORTH,
            Self::SOUTHWEST => Self::NORTHEAST,
            Self::WEST => Self::EAST,
            Self::NORTHWEST => Self::SOUTHEAST,
        }
    }
}

/// Representation of the two directions of castling.
#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum CastleSide {
    KINGSIDE = 0,
    QUEENSIDE = 1,
}

impl CastleSide {
    /// Use as an array index.
    #[inline]
    pub fn ix(self) -> usize {
        self as usize
    }
}

/// The promotion-piece selector of a promotion move.
///
/// `ANY` defers the choice to the caller; the generator always emits
/// the four concrete selectors as distinct moves.
#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Promote {
    KNIGHT,
    BISHOP,
    ROOK,
    QUEEN,
    ANY,
}

impl Promote {
    /// The four concrete promotion choices.
    pub const CHOICES: [Promote; 4] = [Self::KNIGHT, Self::BISHOP, Self::ROOK, Self::QUEEN];

    /// The concrete piece type, or `None` for a deferred choice.
    #[inline]
    pub fn role(self) -> Option<Role> {
        match self {
            Self::KNIGHT => Some(Role::KNIGHT),
            Self::BISHOP => Some(Role::BISHOP),
            Self::ROOK => Some(Role::ROOK),
            Self::QUEEN => Some(Role::QUEEN),
            Self::ANY => None,
        }
    }
}

/// Representation of the en-passant capture rule.
///
/// Records the file of a pawn that has just advanced two squares and
/// the color entitled to capture it. The record lives for exactly one
/// ply: any reply other than the capture clears it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EnPassant {
    /// File of the pawn that double-stepped.
    pub file: u8,
    /// The side entitled to capture en passant.
    pub capturer: Color,
}

impl EnPassant {
    /// The square of the pawn to be captured.
    ///
    /// A white capturer takes a black pawn that just landed on the
    /// fifth rank; a black capturer takes a white pawn on the fourth.
    #[inline]
    pub fn captured_square(self) -> Square {
        let rank = match self.capturer {
            Color::WHITE => 4,
            Color::BLACK => 3,
        };
        Square::from_u8(self.file & 0x7 | rank << 3)
    }

    /// The square the capturing pawn lands on, one step behind the
    /// captured pawn. This is also the FEN en-passant target square.
    #[inline]
    pub fn landing_square(self) -> Square {
        let rank = match self.capturer {
            Color::WHITE => 5,
            Color::BLACK => 2,
        };
        Square::from_u8(self.file & 0x7 | rank << 3)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn square_mask_round_trip() {
        for sq in Square::iter() {
            assert_eq!(Square::from_mask(sq.mask()), Some(sq));
            assert_eq!(
                Square::from_coords(sq.file() as i8, sq.rank() as i8),
                Some(sq)
            );
        }
    }

    #[test]
    fn square_stepping() {
        assert_eq!(Square::e4.step(CompassRose::NORTH, 1), Some(Square::e5));
        assert_eq!(Square::e4.step(CompassRose::SOUTHWEST, 2), Some(Square::c2));
        assert_eq!(Square::a1.step(CompassRose::WEST, 1), None);
        assert_eq!(Square::h8.step(CompassRose::NORTHEAST, 1), None);
        assert_eq!(Square::b2.step(CompassRose::SOUTH, 3), None);
    }

    #[test]
    fn descending_is_most_significant_first() {
        let mask = Square::a1.mask() | Square::e4.mask() | Square::h8.mask();
        let squares: Vec<Square> = Square::descending(mask).collect();
        assert_eq!(squares, vec![Square::h8, Square::e4, Square::a1]);
    }

    #[test]
    fn piece_catalog_lookups_agree() {
        for (slot, piece) in Piece::ALL.iter().enumerate() {
            assert_eq!(piece.slot(), slot);
            assert_eq!(Piece::from_slot(slot), Some(*piece));
            assert_eq!(Piece::from_symbol(piece.symbol()), Some(*piece));
            assert_eq!(Piece::new(piece.role, piece.color), *piece);
        }
        assert_eq!(Piece::from_symbol('x'), None);
        assert_eq!(Piece::from_slot(12), None);
    }

    #[test]
    fn en_passant_squares() {
        let ep = EnPassant { file: 4, capturer: Color::BLACK };
        assert_eq!(ep.captured_square(), Square::e4);
        assert_eq!(ep.landing_square(), Square::e3);

        let ep = EnPassant { file: 0, capturer: Color::WHITE };
        assert_eq!(ep.captured_square(), Square::a5);
        assert_eq!(ep.landing_square(), Square::a6);
    }
}
