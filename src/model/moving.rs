//! Applying moves to a board.
//!
//! [`Board::apply`] edits occupancy masks only, one arm per move
//! shape. [`Board::play`] wraps it with the game bookkeeping: rights,
//! the en-passant window, the clocks and the turn. Both validate that
//! the move fits the position and fail with a
//! [`ContractViolation`](Error::ContractViolation) rather than corrupt
//! the masks.

use crate::error::Error;
use crate::model::board::Board;
use crate::model::castling::CLASSIC;
use crate::model::moves::ChessMove;
use crate::model::{CastleSide, Color, CompassRose, Piece, Role, Square};

impl Board {
    /// Apply a move to the occupancy masks.
    ///
    /// Rights, en passant, clocks and turn are untouched; callers
    /// sequencing a game want [`Board::play`].
    pub fn apply(&mut self, mv: ChessMove) -> Result<(), Error> {
        match mv {
            ChessMove::Normal { start, end } => self.apply_normal(start, end),
            ChessMove::EnPassant { target, approach } => self.apply_en_passant(target, approach),
            ChessMove::Castle { color, side } => self.apply_castle(color, side),
            ChessMove::Promotion { start, travel, promote_to } => {
                let role = promote_to
                    .role()
                    .ok_or(Error::ContractViolation("promotion choice left deferred"))?;
                self.apply_promotion(start, travel, role)
            }
        }
    }

    fn apply_normal(&mut self, start: u64, end: u64) -> Result<(), Error> {
        let from = Square::from_mask(start)
            .ok_or(Error::ContractViolation("start is not a single square"))?;
        let to = Square::from_mask(end)
            .ok_or(Error::ContractViolation("end is not a single square"))?;
        let mover = self
            .piece_at(from)
            .ok_or(Error::ContractViolation("no piece on the start square"))?;

        if let Some(captured) = self.piece_at(to) {
            if captured.color == mover.color {
                return Err(Error::ContractViolation("end square held by the mover's own side"));
            }
            self.xor(captured, end);
        }
        self.xor(mover, start | end);
        Ok(())
    }

    fn apply_en_passant(
        &mut self,
        target: crate::model::EnPassant,
        approach: CompassRose,
    ) -> Result<(), Error> {
        let from = target
            .capturer_square(approach)
            .ok_or(Error::ContractViolation("en passant approach leaves the board"))?;
        let capturer = Piece::new(Role::PAWN, target.capturer);
        let captured = Piece::new(Role::PAWN, target.capturer.opp());

        if self.boards[capturer.slot()] & from.mask() == 0 {
            return Err(Error::ContractViolation("no capturing pawn for en passant"));
        }
        if self.boards[captured.slot()] & target.captured_square().mask() == 0 {
            return Err(Error::ContractViolation("no captured pawn for en passant"));
        }

        self.xor(capturer, from.mask() | target.landing_square().mask());
        self.xor(captured, target.captured_square().mask());
        Ok(())
    }

    fn apply_castle(&mut self, color: Color, side: CastleSide) -> Result<(), Error> {
        let (king_from, king_to) = CLASSIC.king_travel(color, side);
        let (rook_from, rook_to) = CLASSIC.rook_travel(color, side);
        let king = Piece::new(Role::KING, color);
        let rook = Piece::new(Role::ROOK, color);

        if self.boards[king.slot()] & king_from.mask() == 0 {
            return Err(Error::ContractViolation("castling king not on its start square"));
        }
        if self.boards[rook.slot()] & rook_from.mask() == 0 {
            return Err(Error::ContractViolation("castling rook not on its start square"));
        }

        self.xor(king, king_from.mask() | king_to.mask());
        self.xor(rook, rook_from.mask() | rook_to.mask());
        Ok(())
    }

    fn apply_promotion(&mut self, start: Square, travel: CompassRose, role: Role) -> Result<(), Error> {
        let pawn = match self.piece_at(start) {
            Some(p) if p.role == Role::PAWN => p,
            _ => return Err(Error::ContractViolation("no pawn on the promotion start square")),
        };
        let end = start
            .step(travel, 1)
            .ok_or(Error::ContractViolation("promotion travel leaves the board"))?;

        match travel {
            CompassRose::NORTH | CompassRose::SOUTH => {
                if self.piece_at(end).is_some() {
                    return Err(Error::ContractViolation("promotion push into an occupied square"));
                }
            }
            _ => match self.piece_at(end) {
                Some(captured) if captured.color != pawn.color => {
                    self.xor(captured, end.mask());
                }
                _ => {
                    return Err(Error::ContractViolation("promotion capture without a victim"));
                }
            },
        }

        self.xor(pawn, start.mask());
        self.xor(Piece::new(role, pawn.color), end.mask());
        Ok(())
    }

    /// Apply a move and perform the game bookkeeping around it.
    pub fn play(&mut self, mv: ChessMove) -> Result<(), Error> {
        let facts = self.inspect(mv)?;
        self.apply(mv)?;

        match mv {
            ChessMove::Normal { .. } | ChessMove::Promotion { .. } | ChessMove::EnPassant { .. } => {
                self.shed_rights(mv, &facts);
            }
            ChessMove::Castle { color, .. } => {
                self.rights[color.ix()] = [false, false];
            }
        }

        self.en_passant = facts.opens_window;

        if facts.captures || facts.mover.role == Role::PAWN {
            self.halfmove_clock = 0;
        } else {
            self.halfmove_clock += 1;
        }

        if facts.mover.color.is_black() {
            self.fullmove += 1;
        }
        self.turn = facts.mover.color.opp();
        Ok(())
    }

    /// Pre-application facts [`Board::play`] needs for bookkeeping.
    fn inspect(&self, mv: ChessMove) -> Result<MoveFacts, Error> {
        Ok(match mv {
            ChessMove::Normal { start, end } => {
                let from = Square::from_mask(start)
                    .ok_or(Error::ContractViolation("start is not a single square"))?;
                let to = Square::from_mask(end)
                    .ok_or(Error::ContractViolation("end is not a single square"))?;
                let mover = self
                    .piece_at(from)
                    .ok_or(Error::ContractViolation("no piece on the start square"))?;
                let opens_window = if mover.role == Role::PAWN
                    && from.ix().abs_diff(to.ix()) == 16
                {
                    Some(crate::model::EnPassant {
                        file: from.file(),
                        capturer: mover.color.opp(),
                    })
                } else {
                    None
                };
                MoveFacts {
                    mover,
                    captures: self.piece_at(to).is_some(),
                    captured_on: Some(to),
                    opens_window,
                }
            }
            ChessMove::EnPassant { target, .. } => MoveFacts {
                mover: Piece::new(Role::PAWN, target.capturer),
                captures: true,
                captured_on: None,
                opens_window: None,
            },
            ChessMove::Castle { color, .. } => MoveFacts {
                mover: Piece::new(Role::KING, color),
                captures: false,
                captured_on: None,
                opens_window: None,
            },
            ChessMove::Promotion { start, travel, .. } => {
                let mover = self
                    .piece_at(start)
                    .ok_or(Error::ContractViolation("no pawn on the promotion start square"))?;
                let end = start.step(travel, 1);
                MoveFacts {
                    mover,
                    captures: end.map(|sq| self.piece_at(sq).is_some()).unwrap_or(false),
                    captured_on: end,
                    opens_window: None,
                }
            }
        })
    }

    /// Clear castling rights invalidated by a non-castle move: the
    /// mover's when its king or a rook on its home corner moves, the
    /// opponent's when a rook is captured on its home corner.
    fn shed_rights(&mut self, mv: ChessMove, facts: &MoveFacts) {
        let color = facts.mover.color;
        if facts.mover.role == Role::KING {
            self.rights[color.ix()] = [false, false];
        }
        if facts.mover.role == Role::ROOK {
            if let ChessMove::Normal { start, .. } = mv {
                for side in [CastleSide::KINGSIDE, CastleSide::QUEENSIDE] {
                    if start == CLASSIC.rook_start[color.ix()][side.ix()].mask() {
                        self.rights[color.ix()][side.ix()] = false;
                    }
                }
            }
        }
        if facts.captures {
            if let Some(on) = facts.captured_on {
                let opp = color.opp();
                for side in [CastleSide::KINGSIDE, CastleSide::QUEENSIDE] {
                    if on == CLASSIC.rook_start[opp.ix()][side.ix()] {
                        self.rights[opp.ix()][side.ix()] = false;
                    }
                }
            }
        }
    }
}

struct MoveFacts {
    mover: Piece,
    captures: bool,
    captured_on: Option<Square>,
    opens_window: Option<crate::model::EnPassant>,
}
