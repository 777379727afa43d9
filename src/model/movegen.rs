//! Pseudo-legal move enumeration.
//!
//! Enumeration is total: every reachable position yields a listing,
//! possibly empty. Moves obey piece movement and occupancy rules but
//! are not screened for leaving the mover's king attacked, with two
//! deliberate exceptions at the king itself: the king never steps onto
//! a controlled square, and castling transit squares must be safe.

use crate::biterate;
use crate::model::attacks;
use crate::model::board::Board;
use crate::model::castling::CLASSIC;
use crate::model::moves::ChessMove;
use crate::model::{CastleSide, Color, Promote, Role};

/// The full generator output for one side: the move listing and the
/// controlled-square mask accumulated while producing it.
#[derive(Debug, Clone)]
pub struct Listing {
    pub moves: Vec<ChessMove>,
    pub controlled: u64,
}

/// Enumerate the pseudo-legal moves of `side`.
pub fn enumerate(board: &Board, side: Color) -> Listing {
    let mut listing = Listing { moves: Vec::with_capacity(40), controlled: 0 };
    let total = board.total();
    let friendly = board.color_mask(side);
    let enemy = board.color_mask(side.opp());
    let opp_control = opponent_control(board, side);
    let lo = side.ix() * 6;

    pawn_moves(board, side, total, enemy, &mut listing);

    biterate!(sq in board.boards[lo + Role::KNIGHT.ix()] => {
        let sees = attacks::KNIGHT_SEES[sq.ix()];
        listing.controlled |= sees;
        biterate!(to in sees & !friendly => {
            listing.moves.push(ChessMove::normal(sq, to));
        });
    });

    slider_moves(board, lo + Role::BISHOP.ix(), &attacks::BISHOP_DIRS, total, friendly, &mut listing);
    slider_moves(board, lo + Role::ROOK.ix(), &attacks::ROOK_DIRS, total, friendly, &mut listing);
    slider_moves(board, lo + Role::QUEEN.ix(), &attacks::QUEEN_DIRS, total, friendly, &mut listing);

    biterate!(sq in board.boards[lo + Role::KING.ix()] => {
        let sees = attacks::KING_SEES[sq.ix()];
        listing.controlled |= sees;
        biterate!(to in sees & !friendly & !opp_control => {
            listing.moves.push(ChessMove::normal(sq, to));
        });
    });

    castle_moves(board, side, total, opp_control, &mut listing.moves);

    listing
}

/// The opponent's controlled squares, preferring a listing already
/// cached for this fullmove (the value computed before the mover's
/// reply, when one exists) over a fresh computation. The cache is only
/// peeked, never filled, so the two sides' enumerations cannot recurse
/// into each other.
fn opponent_control(board: &Board, side: Color) -> u64 {
    let opp = side.opp();
    if let Some(controlled) = board.cache.borrow().controlled(board.fullmove, opp.ix()) {
        return controlled;
    }
    attacks::controlled(board, opp)
}

fn pawn_moves(board: &Board, side: Color, total: u64, enemy: u64, listing: &mut Listing) {
    use crate::model::CompassRose::{NORTH, SOUTH};

    let (ahead, start_rank, promo_rank) = match side {
        Color::WHITE => (NORTH, 1, 6),
        Color::BLACK => (SOUTH, 6, 1),
    };
    let capture_dirs = attacks::pawn_dirs(side);

    biterate!(sq in board.boards[side.ix() * 6 + Role::PAWN.ix()] => {
        listing.controlled |= attacks::pawn_sees(side, sq);

        if sq.rank() == promo_rank {
            // Last step of this pawn's life; only promotions come out.
            if let Some(to) = sq.step(ahead, 1) {
                if total & to.mask() == 0 {
                    for promote_to in Promote::CHOICES {
                        listing.moves.push(ChessMove::Promotion { start: sq, travel: ahead, promote_to });
                    }
                }
            }
            for dir in capture_dirs {
                if let Some(to) = sq.step(dir, 1) {
                    if enemy & to.mask() != 0 {
                        for promote_to in Promote::CHOICES {
                            listing.moves.push(ChessMove::Promotion { start: sq, travel: dir, promote_to });
                        }
                    }
                }
            }
        } else {
            if let Some(to) = sq.step(ahead, 1) {
                if total & to.mask() == 0 {
                    listing.moves.push(ChessMove::normal(sq, to));
                    if sq.rank() == start_rank {
                        if let Some(two) = sq.step(ahead, 2) {
                            if total & two.mask() == 0 {
                                listing.moves.push(ChessMove::normal(sq, two));
                            }
                        }
                    }
                }
            }
            for dir in capture_dirs {
                if let Some(to) = sq.step(dir, 1) {
                    if enemy & to.mask() != 0 {
                        listing.moves.push(ChessMove::normal(sq, to));
                    }
                }
            }
        }
    });

    if let Some(ep) = board.en_passant {
        if ep.capturer == side {
            let pawns = board.boards[side.ix() * 6 + Role::PAWN.ix()];
            for approach in capture_dirs {
                if let Some(from) = ep.capturer_square(approach) {
                    if pawns & from.mask() != 0 {
                        listing.moves.push(ChessMove::EnPassant { target: ep, approach });
                    }
                }
            }
        }
    }
}

fn slider_moves(
    board: &Board,
    slot: usize,
    dirs: &[crate::model::CompassRose],
    total: u64,
    friendly: u64,
    listing: &mut Listing,
) {
    biterate!(sq in board.boards[slot] => {
        for &dir in dirs {
            let mut cursor = sq;
            while let Some(to) = cursor.step(dir, 1) {
                listing.controlled |= to.mask();
                if friendly & to.mask() != 0 {
                    break;
                }
                listing.moves.push(ChessMove::normal(sq, to));
                if total & to.mask() != 0 {
                    break;
                }
                cursor = to;
            }
        }
    });
}

fn castle_moves(board: &Board, side: Color, total: u64, opp_control: u64, moves: &mut Vec<ChessMove>) {
    for castle in [CastleSide::KINGSIDE, CastleSide::QUEENSIDE] {
        if !board.rights[side.ix()][castle.ix()] {
            continue;
        }
        if CLASSIC.space(side, castle) & total != 0 {
            continue;
        }
        if CLASSIC.safety(side, castle) & opp_control != 0 {
            continue;
        }
        moves.push(ChessMove::Castle { color: side, side: castle });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Color::*, CompassRose, EnPassant, Piece, Role, Square};

    fn count_shape(moves: &[ChessMove], f: impl Fn(&ChessMove) -> bool) -> usize {
        moves.iter().filter(|m| f(m)).count()
    }

    #[test]
    fn startpos_has_twenty_moves() {
        let board = Board::start();
        for side in [WHITE, BLACK] {
            let listing = enumerate(&board, side);
            assert_eq!(listing.moves.len(), 20);
            // 8 single plus 8 double pushes plus 4 knight moves.
            assert_eq!(
                count_shape(&listing.moves, |m| matches!(m, ChessMove::Normal { .. })),
                20
            );
        }
    }

    #[test]
    fn sliders_stop_before_friends_and_on_enemies() {
        let mut board = Board::empty();
        board.xor(Piece::new(Role::ROOK, WHITE), Square::a1.mask());
        board.xor(Piece::new(Role::PAWN, WHITE), Square::a3.mask());
        board.xor(Piece::new(Role::KNIGHT, BLACK), Square::c1.mask());

        let listing = enumerate(&board, WHITE);
        let rook_targets: Vec<ChessMove> = listing
            .moves
            .iter()
            .copied()
            .filter(|m| matches!(m, ChessMove::Normal { start, .. } if *start == Square::a1.mask()))
            .collect();
        assert!(rook_targets.contains(&ChessMove::normal(Square::a1, Square::a2)));
        assert!(!rook_targets.contains(&ChessMove::normal(Square::a1, Square::a3)));
        assert!(rook_targets.contains(&ChessMove::normal(Square::a1, Square::c1)));
        assert!(!rook_targets.contains(&ChessMove::normal(Square::a1, Square::d1)));
        // Both blockers show up as controlled.
        assert_ne!(listing.controlled & Square::a3.mask(), 0);
        assert_ne!(listing.controlled & Square::c1.mask(), 0);
    }

    #[test]
    fn king_avoids_controlled_squares() {
        let mut board = Board::empty();
        board.xor(Piece::new(Role::KING, WHITE), Square::e1.mask());
        board.xor(Piece::new(Role::ROOK, BLACK), Square::d8.mask());

        let moves = enumerate(&board, WHITE).moves;
        assert!(!moves.contains(&ChessMove::normal(Square::e1, Square::d1)));
        assert!(!moves.contains(&ChessMove::normal(Square::e1, Square::d2)));
        assert!(moves.contains(&ChessMove::normal(Square::e1, Square::e2)));
        assert!(moves.contains(&ChessMove::normal(Square::e1, Square::f1)));
    }

    #[test]
    fn promotion_rank_pawns_yield_only_promotions() {
        let mut board = Board::empty();
        board.xor(Piece::new(Role::PAWN, WHITE), Square::g7.mask());
        board.xor(Piece::new(Role::ROOK, BLACK), Square::h8.mask());

        let moves = enumerate(&board, WHITE).moves;
        assert_eq!(
            count_shape(&moves, |m| matches!(m, ChessMove::Normal { .. })),
            0
        );
        // Four pushes to g8 and four captures on h8.
        assert_eq!(
            count_shape(&moves, |m| matches!(m, ChessMove::Promotion { .. })),
            8
        );
        assert!(moves.contains(&ChessMove::Promotion {
            start: Square::g7,
            travel: CompassRose::NORTHEAST,
            promote_to: Promote::QUEEN,
        }));
    }

    #[test]
    fn en_passant_needs_an_adjacent_capturer() {
        // Black pawn just landed on e5; a white pawn on d5 may take it.
        let mut board = Board::empty();
        board.xor(Piece::new(Role::PAWN, BLACK), Square::e5.mask());
        board.xor(Piece::new(Role::PAWN, WHITE), Square::d5.mask());
        board.en_passant = Some(EnPassant { file: 4, capturer: WHITE });

        let moves = enumerate(&board, WHITE).moves;
        assert!(moves.contains(&ChessMove::EnPassant {
            target: EnPassant { file: 4, capturer: WHITE },
            approach: CompassRose::NORTHEAST,
        }));
        assert_eq!(
            count_shape(&moves, |m| matches!(m, ChessMove::EnPassant { .. })),
            1
        );

        // Remove the capturer and the window becomes inert.
        board.xor(Piece::new(Role::PAWN, WHITE), Square::d5.mask());
        let moves = enumerate(&board, WHITE).moves;
        assert_eq!(
            count_shape(&moves, |m| matches!(m, ChessMove::EnPassant { .. })),
            0
        );
    }

    #[test]
    fn castling_requires_right_space_and_safety() {
        let mut board = Board::empty();
        board.xor(Piece::new(Role::KING, WHITE), Square::e1.mask());
        board.xor(Piece::new(Role::ROOK, WHITE), Square::h1.mask());
        board.rights[WHITE.ix()][CastleSide::KINGSIDE.ix()] = true;

        let kingside = ChessMove::Castle { color: WHITE, side: CastleSide::KINGSIDE };
        assert!(enumerate(&board, WHITE).moves.contains(&kingside));

        // Occupied transit square.
        let mut blocked = board.clone();
        blocked.xor(Piece::new(Role::BISHOP, WHITE), Square::f1.mask());
        assert!(!enumerate(&blocked, WHITE).moves.contains(&kingside));

        // Controlled transit square.
        let mut attacked = board.clone();
        attacked.xor(Piece::new(Role::ROOK, BLACK), Square::g8.mask());
        assert!(!enumerate(&attacked, WHITE).moves.contains(&kingside));

        // No right.
        let mut unentitled = board.clone();
        unentitled.rights[WHITE.ix()][CastleSide::KINGSIDE.ix()] = false;
        assert!(!enumerate(&unentitled, WHITE).moves.contains(&kingside));
    }

    #[test]
    fn clearing_one_right_leaves_the_other_side_alone() {
        let mut board = Board::empty();
        board.xor(Piece::new(Role::KING, WHITE), Square::e1.mask());
        board.xor(Piece::new(Role::ROOK, WHITE), Square::a1.mask() | Square::h1.mask());
        board.rights[WHITE.ix()] = [true, true];

        let kingside = ChessMove::Castle { color: WHITE, side: CastleSide::KINGSIDE };
        let queenside = ChessMove::Castle { color: WHITE, side: CastleSide::QUEENSIDE };
        let moves = enumerate(&board, WHITE).moves;
        assert!(moves.contains(&kingside));
        assert!(moves.contains(&queenside));

        board.rights[WHITE.ix()][CastleSide::KINGSIDE.ix()] = false;
        let moves = enumerate(&board, WHITE).moves;
        assert!(!moves.contains(&kingside));
        assert!(moves.contains(&queenside));
    }

    #[test]
    fn castling_out_of_check_is_not_screened_here() {
        // The king's own square is not part of the safety mask; a
        // caller filtering for legality rejects this case.
        let mut board = Board::empty();
        board.xor(Piece::new(Role::KING, WHITE), Square::e1.mask());
        board.xor(Piece::new(Role::ROOK, WHITE), Square::h1.mask());
        board.xor(Piece::new(Role::ROOK, BLACK), Square::e8.mask());
        board.rights[WHITE.ix()][CastleSide::KINGSIDE.ix()] = true;

        let kingside = ChessMove::Castle { color: WHITE, side: CastleSide::KINGSIDE };
        assert!(enumerate(&board, WHITE).moves.contains(&kingside));
    }
}
