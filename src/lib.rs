//! # esochess
//!
//! A bitboard model of the game of chess: a position held as twelve
//! 64-bit occupancy masks, a pseudo-legal move generator covering the
//! special-move families (double push, en passant, castling, promotion),
//! and in-place move application.
//!
//! Pseudo-legal here means a move obeys the piece movement and occupancy
//! rules but is not checked for leaving the mover's own king in check;
//! that filtering belongs to a layer above this crate. The primitives such
//! a layer needs (per-side controlled-square masks) are exposed alongside
//! the move listings.

pub mod error;
pub mod model;
pub mod notation;

pub use crate::error::Error;
pub use crate::model::board::Board;
pub use crate::model::moves::ChessMove;
