//! Forsyth-Edwards notation.
//!
//! Decoding is a chumsky parser over the six-field record; every
//! diagnostic the combinators produce is folded into
//! [`Error::MalformedInput`]. Encoding walks the grid.

use chumsky::prelude::*;

use crate::error::Error;
use crate::model::board::Board;
use crate::model::{CastleSide, Color, EnPassant, Piece, Square};

type Extra<'s> = extra::Err<Rich<'s, char>>;

/// One cell run of a placement row: a piece, or a run of empties.
fn cell<'s>() -> impl Parser<'s, &'s str, Vec<Option<Piece>>, Extra<'s>> {
    choice((
        one_of("PNBRQKpnbrqk").try_map(|symbol, span| {
            Piece::from_symbol(symbol)
                .map(|p| vec![Some(p)])
                .ok_or_else(|| Rich::custom(span, "unknown piece symbol"))
        }),
        one_of("12345678").map(|digit: char| {
            vec![None; digit as usize - '0' as usize]
        }),
    ))
}

/// One rank of the placement field, validated to cover 8 files.
fn row<'s>() -> impl Parser<'s, &'s str, Vec<Option<Piece>>, Extra<'s>> {
    cell()
        .repeated()
        .at_least(1)
        .collect::<Vec<_>>()
        .try_map(|cells, span| {
            let row: Vec<Option<Piece>> = cells.into_iter().flatten().collect();
            if row.len() == 8 {
                Ok(row)
            } else {
                Err(Rich::custom(span, format!("rank covers {} files, want 8", row.len())))
            }
        })
}

fn placement<'s>() -> impl Parser<'s, &'s str, Vec<Vec<Option<Piece>>>, Extra<'s>> {
    row()
        .separated_by(just('/'))
        .exactly(8)
        .collect::<Vec<_>>()
}

fn turn<'s>() -> impl Parser<'s, &'s str, Color, Extra<'s>> {
    choice((just('w').to(Color::WHITE), just('b').to(Color::BLACK)))
}

fn rights<'s>() -> impl Parser<'s, &'s str, [[bool; 2]; 2], Extra<'s>> {
    choice((
        just('-').to([[false; 2]; 2]),
        one_of("KQkq")
            .repeated()
            .at_least(1)
            .collect::<Vec<char>>()
            .map(|symbols| {
                let mut rights = [[false; 2]; 2];
                for symbol in symbols {
                    let color = if symbol.is_ascii_uppercase() { Color::WHITE } else { Color::BLACK };
                    let side = match symbol.to_ascii_lowercase() {
                        'k' => CastleSide::KINGSIDE,
                        _ => CastleSide::QUEENSIDE,
                    };
                    rights[color.ix()][side.ix()] = true;
                }
                rights
            }),
    ))
}

/// The en-passant field holds the capturer's landing square; its rank
/// tells which side just double-stepped and hence who may capture.
fn en_passant<'s>() -> impl Parser<'s, &'s str, Option<EnPassant>, Extra<'s>> {
    choice((
        just('-').to(None),
        group((one_of("abcdefgh"), one_of("36"))).map(|(file, rank): (char, char)| {
            let capturer = match rank {
                '3' => Color::BLACK,
                _ => Color::WHITE,
            };
            Some(EnPassant { file: file as u8 - b'a', capturer })
        }),
    ))
}

fn counter<'s>() -> impl Parser<'s, &'s str, u16, Extra<'s>> {
    text::int(10).try_map(|digits: &str, span| {
        digits
            .parse::<u16>()
            .map_err(|_| Rich::custom(span, "counter out of range"))
    })
}

fn record<'s>() -> impl Parser<
    's,
    &'s str,
    (Vec<Vec<Option<Piece>>>, Color, [[bool; 2]; 2], Option<EnPassant>, u16, u16),
    Extra<'s>,
> {
    group((
        placement().then_ignore(just(' ')),
        turn().then_ignore(just(' ')),
        rights().then_ignore(just(' ')),
        en_passant().then_ignore(just(' ')),
        counter().then_ignore(just(' ')),
        counter(),
    ))
    .then_ignore(end())
}

impl Board {
    /// Decode a six-field FEN record.
    pub fn from_fen(fen: &str) -> Result<Self, Error> {
        let (rows, turn, rights, en_passant, halfmove_clock, fullmove) = record()
            .parse(fen)
            .into_result()
            .map_err(|errs| {
                let what = errs
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join("; ");
                Error::MalformedInput(what)
            })?;

        let mut board = Board::empty();
        board.turn = turn;
        board.rights = rights;
        board.en_passant = en_passant;
        board.halfmove_clock = halfmove_clock;
        board.fullmove = fullmove;

        for (row_ix, row) in rows.iter().enumerate() {
            for (file, cell) in row.iter().enumerate() {
                if let Some(piece) = cell {
                    // Rows arrive eighth rank first.
                    let sq = Square::from_u8(file as u8 | (7 - row_ix as u8) << 3);
                    board.xor(*piece, sq.mask());
                }
            }
        }
        Ok(board)
    }

    /// Encode this position as a six-field FEN record.
    pub fn fen(&self) -> String {
        let mut out = String::with_capacity(80);

        for (row_ix, row) in self.grid().iter().enumerate() {
            if row_ix > 0 {
                out.push('/');
            }
            let mut empties = 0;
            for cell in row {
                match cell {
                    Some(piece) => {
                        if empties > 0 {
                            out.push((b'0' + empties) as char);
                            empties = 0;
                        }
                        out.push(piece.symbol());
                    }
                    None => empties += 1,
                }
            }
            if empties > 0 {
                out.push((b'0' + empties) as char);
            }
        }

        out.push(' ');
        out.push(match self.turn {
            Color::WHITE => 'w',
            Color::BLACK => 'b',
        });

        out.push(' ');
        let mut any = false;
        for (color, symbols) in [(Color::WHITE, ['K', 'Q']), (Color::BLACK, ['k', 'q'])] {
            for (side, symbol) in [CastleSide::KINGSIDE, CastleSide::QUEENSIDE].into_iter().zip(symbols) {
                if self.rights[color.ix()][side.ix()] {
                    out.push(symbol);
                    any = true;
                }
            }
        }
        if !any {
            out.push('-');
        }

        out.push(' ');
        match self.en_passant {
            Some(ep) => out.push_str(&ep.landing_square().to_string()),
            None => out.push('-'),
        }

        out.push_str(&format!(" {} {}", self.halfmove_clock, self.fullmove));
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Color::*, Role};

    const START: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

    #[test]
    fn start_position_round_trips_exactly() {
        let board = Board::from_fen(START).unwrap();
        assert_eq!(board, Board::start());
        assert_eq!(board.fen(), START);
        assert_eq!(Board::start().fen(), START);
    }

    #[test]
    fn mid_game_record_decodes() {
        let fen = "rnbqkbnr/ppp1pppp/8/3p4/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1";
        let board = Board::from_fen(fen).unwrap();
        board.sanity_check();
        assert_eq!(board.turn, BLACK);
        assert_eq!(
            board.en_passant,
            Some(EnPassant { file: 4, capturer: BLACK })
        );
        assert_eq!(
            board.piece_at(Square::e4),
            Some(Piece::new(Role::PAWN, WHITE))
        );
        assert_eq!(board.fen(), fen);
    }

    #[test]
    fn partial_rights_and_clocks_round_trip() {
        let fen = "r3k2r/8/8/8/8/8/8/R3K2R w Kq - 12 34";
        let board = Board::from_fen(fen).unwrap();
        assert_eq!(board.rights, [[true, false], [false, true]]);
        assert_eq!(board.halfmove_clock, 12);
        assert_eq!(board.fullmove, 34);
        assert_eq!(board.fen(), fen);
    }

    #[test]
    fn malformed_records_are_rejected() {
        let bad = [
            "",
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP w KQkq - 0 1",
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNX w KQkq - 0 1",
            "rnbqkbnr/pppppppp/9/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
            "rnbqkbnr/ppppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR x KQkq - 0 1",
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq e4 0 1",
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 99999",
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1 extra",
        ];
        for fen in bad {
            assert!(
                matches!(Board::from_fen(fen), Err(Error::MalformedInput(_))),
                "accepted: {fen}",
            );
        }
    }
}
