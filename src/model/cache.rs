//! Per-position memo of generated moves and controlled squares.

use crate::model::moves::ChessMove;

/// Cached generator output for both sides, keyed by the fullmove
/// number of the position it was computed for.
///
/// The cache never invalidates eagerly. Every read re-checks `key`
/// against the owning board's fullmove number and discards stale
/// entries on mismatch, so applying a move costs nothing and a query
/// after it recomputes on demand. Within one fullmove the surviving
/// entries are what castling generation consults for the opponent's
/// controlled squares.
#[derive(Debug, Clone, Default)]
pub struct MoveCache {
    key: u16,
    moves: [Option<Vec<ChessMove>>; 2],
    controlled: [Option<u64>; 2],
}

impl MoveCache {
    /// Drop every entry not computed at `key`.
    pub fn roll(&mut self, key: u16) {
        if self.key != key {
            self.key = key;
            self.moves = [None, None];
            self.controlled = [None, None];
        }
    }

    /// Cached move listing for the side at the given index, if the
    /// cache is current at `key`.
    pub fn moves(&self, key: u16, side: usize) -> Option<&Vec<ChessMove>> {
        if self.key == key {
            self.moves[side].as_ref()
        } else {
            None
        }
    }

    /// Cached controlled-square mask, if current at `key`.
    pub fn controlled(&self, key: u16, side: usize) -> Option<u64> {
        if self.key == key {
            self.controlled[side]
        } else {
            None
        }
    }

    /// Store a freshly computed listing under `key`.
    pub fn store(&mut self, key: u16, side: usize, moves: Vec<ChessMove>, controlled: u64) {
        self.roll(key);
        self.moves[side] = Some(moves);
        self.controlled[side] = Some(controlled);
    }
}
