//! The position itself: twelve occupancy masks plus game bookkeeping.

use std::cell::RefCell;

use crate::model::cache::MoveCache;
use crate::model::movegen;
use crate::model::moves::ChessMove;
use crate::model::utils::bin_sum;
use crate::model::{Color, EnPassant, Piece, Role, Square};

/// A chess position.
///
/// The board proper is `boards`: one 64-bit occupancy mask per catalog
/// piece, indexed by [`Piece::slot`], kept pairwise disjoint by move
/// application. The remaining fields are the game-state bookkeeping a
/// position needs beyond its occupancy: whose turn it is, which
/// castling rights survive (`rights[color][side]`), the live
/// en-passant window if any, and the two move counters.
///
/// The cache memoizes generator output behind shared references; see
/// [`MoveCache`]. It is excluded from equality, so two boards compare
/// equal iff they describe the same position regardless of what has
/// been queried on each.
#[derive(Debug, Clone)]
pub struct Board {
    pub boards: [u64; 12],
    pub turn: Color,
    pub rights: [[bool; 2]; 2],
    pub en_passant: Option<EnPassant>,
    pub halfmove_clock: u16,
    pub fullmove: u16,
    pub(crate) cache: RefCell<MoveCache>,
}

impl PartialEq for Board {
    fn eq(&self, other: &Self) -> bool {
        self.boards == other.boards
            && self.turn == other.turn
            && self.rights == other.rights
            && self.en_passant == other.en_passant
            && self.halfmove_clock == other.halfmove_clock
            && self.fullmove == other.fullmove
    }
}

impl Eq for Board {}

impl Board {
    /// A board with no pieces on it, White to move, no rights.
    pub fn empty() -> Self {
        Self {
            boards: [0; 12],
            turn: Color::WHITE,
            rights: [[false; 2]; 2],
            en_passant: None,
            halfmove_clock: 0,
            fullmove: 1,
            cache: RefCell::new(MoveCache::default()),
        }
    }

    /// The canonical starting position.
    pub fn start() -> Self {
        const WHITE: [u64; 6] = [
            0xFF00, // pawns on the second rank
            0x42,   // knights b1 g1
            0x24,   // bishops c1 f1
            0x81,   // rooks a1 h1
            0x08,   // queen d1
            0x10,   // king e1
        ];

        let mut boards = [0; 12];
        for (slot, mask) in WHITE.iter().enumerate() {
            boards[slot] = *mask;
            boards[slot + 6] = mask.swap_bytes();
        }

        Self {
            boards,
            turn: Color::WHITE,
            rights: [[true; 2]; 2],
            en_passant: None,
            halfmove_clock: 0,
            fullmove: 1,
            cache: RefCell::new(MoveCache::default()),
        }
    }

    /// Toggle the given occupancy bits on a piece's mask.
    #[inline]
    pub fn xor(&mut self, piece: Piece, mask: u64) {
        self.boards[piece.slot()] ^= mask;
    }

    /// Every occupied square.
    #[inline]
    pub fn total(&self) -> u64 {
        bin_sum(&self.boards)
    }

    /// Every square occupied by the given side.
    #[inline]
    pub fn color_mask(&self, color: Color) -> u64 {
        let lo = color.ix() * 6;
        bin_sum(&self.boards[lo..lo + 6])
    }

    /// The piece on a square, if any.
    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        let mask = sq.mask();
        self.boards
            .iter()
            .position(|board| board & mask != 0)
            .and_then(Piece::from_slot)
    }

    /// The color occupying a square, if any.
    pub fn color_at(&self, sq: Square) -> Option<Color> {
        let mask = sq.mask();
        if self.color_mask(Color::WHITE) & mask != 0 {
            Some(Color::WHITE)
        } else if self.color_mask(Color::BLACK) & mask != 0 {
            Some(Color::BLACK)
        } else {
            None
        }
    }

    /// The position as an 8×8 grid of optional pieces, eighth rank
    /// first, files left to right. The layout text renderers want.
    pub fn grid(&self) -> [[Option<Piece>; 8]; 8] {
        let mut grid = [[None; 8]; 8];
        for (row, rank) in (0..8).rev().enumerate() {
            for file in 0..8 {
                grid[row][file as usize] =
                    Square::from_coords(file, rank).and_then(|sq| self.piece_at(sq));
            }
        }
        grid
    }

    /// The pseudo-legal moves available to `side`, computed on first
    /// use and memoized until the fullmove number changes.
    pub fn moves_for(&self, side: Color) -> Vec<ChessMove> {
        if let Some(moves) = self.cache.borrow().moves(self.fullmove, side.ix()) {
            return moves.clone();
        }
        let listing = movegen::enumerate(self, side);
        self.cache.borrow_mut().store(
            self.fullmove,
            side.ix(),
            listing.moves.clone(),
            listing.controlled,
        );
        listing.moves
    }

    /// The squares `side` controls, memoized like [`Board::moves_for`].
    pub fn controlled_by(&self, side: Color) -> u64 {
        if let Some(controlled) = self.cache.borrow().controlled(self.fullmove, side.ix()) {
            return controlled;
        }
        let listing = movegen::enumerate(self, side);
        self.cache
            .borrow_mut()
            .store(self.fullmove, side.ix(), listing.moves, listing.controlled);
        listing.controlled
    }

    /// Whether `side`'s king stands on a square the opponent controls.
    ///
    /// The probe a legality filter wants after simulating a candidate
    /// move; generation itself never consults it.
    pub fn king_exposed(&self, side: Color) -> bool {
        let king = self.boards[Piece::new(Role::KING, side).slot()];
        king & self.controlled_by(side.opp()) != 0
    }

    /// Check the fundamental invariant: no square claimed by two masks.
    #[cfg(test)]
    pub fn sanity_check(&self) {
        for i in 0..12 {
            for j in (i + 1)..12 {
                assert_eq!(
                    self.boards[i] & self.boards[j],
                    0,
                    "masks {i} and {j} overlap:\n{self}",
                );
            }
        }
    }
}
