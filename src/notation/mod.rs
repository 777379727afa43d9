//! Text notations.
//!
//! FEN lives in [`fen`]; this module holds the `Display` impls for
//! squares, pieces, moves and the board pretty-printer.

use std::fmt::{self, Display};

use strum::VariantNames;

use crate::model::board::Board;
use crate::model::moves::ChessMove;
use crate::model::{CastleSide, Color, Piece, Promote, Square};

pub mod fen;

impl Display for Square {
    /// `a1` style; the alternate form `{:#}` prints machine-readable
    /// `file,rank` indices instead.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            write!(f, "{},{}", self.file(), self.rank())
        } else {
            write!(f, "{}", Square::VARIANTS[self.ix()])
        }
    }
}

impl Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl Display for ChessMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Normal { start, end } => {
                match (Square::from_mask(*start), Square::from_mask(*end)) {
                    (Some(from), Some(to)) => write!(f, "{from}{to}"),
                    _ => write!(f, "??"),
                }
            }
            Self::EnPassant { target, approach } => {
                match target.capturer_square(*approach) {
                    Some(from) => write!(f, "{from}{} e.p.", target.landing_square()),
                    None => write!(f, "??"),
                }
            }
            Self::Castle { side: CastleSide::KINGSIDE, .. } => write!(f, "O-O"),
            Self::Castle { side: CastleSide::QUEENSIDE, .. } => write!(f, "O-O-O"),
            Self::Promotion { start, travel, promote_to } => {
                let Some(to) = start.step(*travel, 1) else {
                    return write!(f, "??");
                };
                let choice = promote_symbol(*promote_to).unwrap_or('?');
                write!(f, "{start}{to}={choice}")
            }
        }
    }
}

impl Display for Board {
    /// A framed diagram, eighth rank on top, with the game state
    /// summarized underneath.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (row, rank) in self.grid().iter().zip((1..=8).rev()) {
            write!(f, "{rank} ")?;
            for piece in row {
                match piece {
                    Some(p) => write!(f, " {p}")?,
                    None => write!(f, " .")?,
                }
            }
            writeln!(f)?;
        }
        writeln!(f, "   a b c d e f g h")?;

        match self.turn {
            Color::WHITE => writeln!(f, "white to move")?,
            Color::BLACK => writeln!(f, "black to move")?,
        }

        write!(f, "castling: ")?;
        let mut any = false;
        for (color, symbols) in [(Color::WHITE, ['K', 'Q']), (Color::BLACK, ['k', 'q'])] {
            for (side, symbol) in [CastleSide::KINGSIDE, CastleSide::QUEENSIDE].into_iter().zip(symbols) {
                if self.rights[color.ix()][side.ix()] {
                    write!(f, "{symbol}")?;
                    any = true;
                }
            }
        }
        if !any {
            write!(f, "-")?;
        }
        writeln!(f)?;

        match self.en_passant {
            Some(ep) => writeln!(f, "en passant: {}", ep.landing_square())?,
            None => writeln!(f, "en passant: -")?,
        }
        write!(f, "halfmove {}, fullmove {}", self.halfmove_clock, self.fullmove)
    }
}

/// The FEN symbol of a promotion choice, uppercase.
pub(crate) fn promote_symbol(choice: Promote) -> Option<char> {
    choice.role().map(|role| Piece::new(role, Color::WHITE).symbol())
}

/// Parse an `a1` style square name.
pub fn square_by_name(name: &str) -> Option<Square> {
    let mut chars = name.chars();
    let file = chars.next()?;
    let rank = chars.next()?;
    if chars.next().is_some() {
        return None;
    }
    if !('a'..='h').contains(&file) || !('1'..='8').contains(&rank) {
        return None;
    }
    Square::from_coords(file as i8 - 'a' as i8, rank as i8 - '1' as i8)
}
