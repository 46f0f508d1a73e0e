// This file is part of the gambit library.
// Copyright (C) 2017-2025 Niklas Fiekas <niklas.fiekas@backscattering.de>
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program. If not, see <http://www.gnu.org/licenses/>.

//! Parse and write Forsyth-Edwards-Notation.
//!
//! # Examples
//!
//! Parse a FEN and set up a position:
//!
//! ```
//! use gambit::{fen::Fen, Chess, Color, Square};
//!
//! let fen: Fen = "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1".parse()?;
//! let pos: Chess = fen.into_position()?;
//!
//! assert_eq!(pos.turn(), Color::Black);
//! assert_eq!(pos.ep_square(), Some(Square::E3));
//! # Ok::<_, Box<dyn std::error::Error>>(())
//! ```
//!
//! Write the FEN of a position:
//!
//! ```
//! use gambit::{fen::Fen, Chess};
//!
//! let pos = Chess::default();
//! assert_eq!(
//!     Fen::from_position(&pos).to_string(),
//!     "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"
//! );
//! ```
//!
//! The notation has no field for moved pieces. Kings and rooks are
//! considered unmoved exactly if the castling field refers to them, and the
//! last move is reconstructed from the en passant field, which is written
//! after every two-row pawn advance.

use core::{
    error::Error,
    fmt::{self, Display, Write as _},
    num::NonZeroU32,
    str::FromStr,
};

use crate::{
    bitboard::Bitboard,
    board::Board,
    castling_side::{king_home, CastlingRights, CastlingSide},
    color::Color,
    position::{Chess, PositionError},
    role::Role,
    square::Square,
    types::{LastMove, Piece},
};

/// Errors that can occur when parsing a FEN.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ParseFenError {
    InvalidFen,
    InvalidBoard,
    InvalidTurn,
    InvalidCastling,
    InvalidEpSquare,
    InvalidHalfmoveClock,
    InvalidFullmoves,
}

impl Display for ParseFenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match *self {
            ParseFenError::InvalidFen => "invalid fen",
            ParseFenError::InvalidBoard => "invalid board part in fen",
            ParseFenError::InvalidTurn => "invalid turn part in fen",
            ParseFenError::InvalidCastling => "invalid castling part in fen",
            ParseFenError::InvalidEpSquare => "invalid ep square in fen",
            ParseFenError::InvalidHalfmoveClock => "invalid halfmove clock in fen",
            ParseFenError::InvalidFullmoves => "invalid fullmove part in fen",
        })
    }
}

impl Error for ParseFenError {}

/// Displays the piece placement part of a FEN.
///
/// Returned by [`Board::board_fen()`].
#[derive(Debug)]
pub struct BoardFen<'b> {
    board: &'b Board,
}

impl Display for BoardFen<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..8 {
            let mut empty = 0;

            for col in 0..8 {
                let sq = Square::from_row_col(row, col);
                match self.board.piece_at(sq) {
                    Some(piece) => {
                        if empty > 0 {
                            f.write_char(char::from(b'0' + empty))?;
                            empty = 0;
                        }
                        f.write_char(piece.char())?;
                    }
                    None => empty += 1,
                }
            }

            if empty > 0 {
                f.write_char(char::from(b'0' + empty))?;
            }

            if row < 7 {
                f.write_char('/')?;
            }
        }

        Ok(())
    }
}

impl Board {
    /// Parses the piece placement part of a FEN. All pieces are marked
    /// unmoved, White is to move, and there is no last move.
    ///
    /// # Errors
    ///
    /// Returns [`ParseFenError::InvalidBoard`] unless there are exactly 8
    /// rows of exactly 8 squares.
    pub fn from_ascii_board_fen(board_fen: &[u8]) -> Result<Board, ParseFenError> {
        let mut board = Board::empty();

        let mut rows = board_fen.split(|&ch| ch == b'/');
        for row in 0..8 {
            let row_fen = rows.next().ok_or(ParseFenError::InvalidBoard)?;

            let mut col = 0;
            let mut prev_was_digit = false;
            for &ch in row_fen {
                if (b'1'..=b'8').contains(&ch) {
                    if prev_was_digit {
                        return Err(ParseFenError::InvalidBoard);
                    }
                    prev_was_digit = true;
                    col += ch - b'0';
                } else {
                    prev_was_digit = false;
                    let piece =
                        Piece::from_char(char::from(ch)).ok_or(ParseFenError::InvalidBoard)?;
                    if col >= 8 {
                        return Err(ParseFenError::InvalidBoard);
                    }
                    board.set_piece_at(Square::from_row_col(row, col), piece, false);
                    col += 1;
                }
                if col > 8 {
                    return Err(ParseFenError::InvalidBoard);
                }
            }

            if col != 8 {
                return Err(ParseFenError::InvalidBoard);
            }
        }

        if rows.next().is_some() {
            return Err(ParseFenError::InvalidBoard);
        }

        Ok(board)
    }

    /// The piece placement part of a FEN, like
    /// `rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR`.
    ///
    /// # Examples
    ///
    /// ```
    /// use gambit::Board;
    ///
    /// let board = Board::default();
    /// assert_eq!(
    ///     board.board_fen().to_string(),
    ///     "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR"
    /// );
    /// ```
    pub const fn board_fen(&self) -> BoardFen<'_> {
        BoardFen { board: self }
    }
}

/// A parsed FEN.
///
/// The board carries side to move and last move, so the remaining fields
/// are only the move counters.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Fen {
    pub board: Board,
    pub halfmoves: u32,
    pub fullmoves: NonZeroU32,
}

impl Default for Fen {
    fn default() -> Fen {
        Fen::from_position(&Chess::default())
    }
}

impl Fen {
    pub fn empty() -> Fen {
        Fen {
            board: Board::empty(),
            halfmoves: 0,
            fullmoves: NonZeroU32::MIN,
        }
    }

    pub fn from_position(pos: &Chess) -> Fen {
        Fen {
            board: *pos.board(),
            halfmoves: pos.halfmoves(),
            fullmoves: pos.fullmoves(),
        }
    }

    /// Validates the parsed board and sets up a position.
    ///
    /// # Errors
    ///
    /// See [`Chess::from_board()`].
    pub fn into_position(self) -> Result<Chess, PositionError> {
        Chess::from_parts(self.board, self.halfmoves, self.fullmoves)
    }

    /// Parses a FEN. Trailing fields may be omitted, defaulting to White to
    /// move, no castling rights, no en passant square and the counters of
    /// the initial position.
    ///
    /// # Errors
    ///
    /// Returns [`ParseFenError`] if the FEN is syntactically invalid, if the
    /// castling field names a king or rook that is not on its original
    /// square, or if the en passant field does not describe a two-row pawn
    /// advance of the player not to move.
    pub fn from_ascii(fen: &[u8]) -> Result<Fen, ParseFenError> {
        let mut parts = fen.split(|&ch| ch == b' ');

        let mut board = parts
            .next()
            .ok_or(ParseFenError::InvalidFen)
            .and_then(Board::from_ascii_board_fen)?;

        let turn = match parts.next() {
            Some(b"w") | None => Color::White,
            Some(b"b") => Color::Black,
            Some(_) => return Err(ParseFenError::InvalidTurn),
        };
        board.set_turn(turn);

        let castling_rights = match parts.next() {
            Some(part) => CastlingRights::from_ascii(part).ok_or(ParseFenError::InvalidCastling)?,
            None => CastlingRights::empty(),
        };
        mark_moved_by_castling_rights(&mut board, castling_rights)?;

        match parts.next() {
            Some(b"-") | None => (),
            Some(part) => {
                let ep_square =
                    Square::from_ascii(part).map_err(|_| ParseFenError::InvalidEpSquare)?;
                let last_move =
                    double_pawn_push_over(&board, ep_square).ok_or(ParseFenError::InvalidEpSquare)?;
                board.set_last_move(Some(last_move));
            }
        }

        let halfmoves = match parts.next() {
            Some(part) => btoi::btou(part).map_err(|_| ParseFenError::InvalidHalfmoveClock)?,
            None => 0,
        };

        let fullmoves = match parts.next() {
            Some(part) => btoi::btou(part)
                .ok()
                .and_then(NonZeroU32::new)
                .ok_or(ParseFenError::InvalidFullmoves)?,
            None => NonZeroU32::MIN,
        };

        if parts.next().is_some() {
            return Err(ParseFenError::InvalidFen);
        }

        Ok(Fen {
            board,
            halfmoves,
            fullmoves,
        })
    }

    pub fn castling_rights(&self) -> CastlingRights {
        self.board.castling_rights()
    }

    pub fn ep_square(&self) -> Option<Square> {
        self.board
            .last_move()
            .and_then(|last| last.en_passant_target())
    }
}

/// Marks all kings and rooks as moved, except those the castling rights
/// refer to.
fn mark_moved_by_castling_rights(
    board: &mut Board,
    castling_rights: CastlingRights,
) -> Result<(), ParseFenError> {
    let mut unmoved = Bitboard::EMPTY;
    for color in Color::ALL {
        for side in CastlingSide::ALL {
            if !castling_rights.has(color, side) {
                continue;
            }
            let king = king_home(color);
            let rook = side.rook_from(color);
            if board.piece_at(king) != Some(color.king())
                || board.piece_at(rook) != Some(color.rook())
            {
                return Err(ParseFenError::InvalidCastling);
            }
            unmoved = unmoved.with(king).with(rook);
        }
    }

    for sq in Square::all() {
        let castler = board
            .piece_at(sq)
            .is_some_and(|piece| matches!(piece.role, Role::King | Role::Rook));
        if castler && !unmoved.contains(sq) {
            board.set_moved(sq);
        }
    }

    Ok(())
}

/// Reconstructs the two-row pawn advance of the player not to move that
/// skipped `ep_square`.
pub(crate) fn double_pawn_push_over(board: &Board, ep_square: Square) -> Option<LastMove> {
    let pusher = !board.turn();
    if ep_square.row() as i8 != pusher.pawn_row() as i8 + pusher.forward()
        || !board.is_empty(ep_square)
    {
        return None;
    }

    let from = ep_square.offset(-pusher.forward(), 0)?;
    let to = ep_square.offset(pusher.forward(), 0)?;
    if !board.is_empty(from) || board.piece_at(to) != Some(pusher.pawn()) {
        return None;
    }

    Some(LastMove {
        from,
        to,
        role: Role::Pawn,
    })
}

impl FromStr for Fen {
    type Err = ParseFenError;

    fn from_str(fen: &str) -> Result<Fen, ParseFenError> {
        Fen::from_ascii(fen.as_bytes())
    }
}

impl Display for Fen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} ",
            self.board.board_fen(),
            self.board.turn().char(),
            self.castling_rights()
        )?;
        match self.ep_square() {
            Some(sq) => write!(f, "{sq}")?,
            None => f.write_char('-')?,
        }
        write!(f, " {} {}", self.halfmoves, self.fullmoves)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Fen {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Fen {
    fn deserialize<D>(deserializer: D) -> Result<Fen, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct FenVisitor;

        impl serde::de::Visitor<'_> for FenVisitor {
            type Value = Fen;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("fen")
            }

            fn visit_str<E>(self, value: &str) -> Result<Fen, E>
            where
                E: serde::de::Error,
            {
                value.parse().map_err(serde::de::Error::custom)
            }
        }

        deserializer.deserialize_str(FenVisitor)
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString as _;

    use super::*;

    #[test]
    fn test_initial_fen() {
        let fen: Fen = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"
            .parse()
            .expect("valid fen");
        assert_eq!(fen, Fen::default());
        assert_eq!(fen.into_position(), Ok(Chess::default()));
    }

    #[test]
    fn test_invalid_board() {
        for fen in [
            "",
            "8/8/8/8/8/8/8",
            "8/8/8/8/8/8/8/8/8",
            "9/8/8/8/8/8/8/8",
            "44/8/8/8/8/8/8/8",
            "ppppppppp/8/8/8/8/8/8/8",
            "7/8/8/8/8/8/8/8",
            "x7/8/8/8/8/8/8/8",
        ] {
            assert_eq!(
                Board::from_ascii_board_fen(fen.as_bytes()),
                Err(ParseFenError::InvalidBoard),
                "{fen}"
            );
        }
    }

    #[test]
    fn test_moved_flags_from_castling_rights() {
        let fen: Fen = "r3k2r/8/8/8/8/8/8/R3K2R w Kq - 0 1".parse().expect("valid fen");
        assert!(!fen.board.has_moved(Square::E1));
        assert!(!fen.board.has_moved(Square::H1));
        assert!(fen.board.has_moved(Square::A1));
        assert!(!fen.board.has_moved(Square::E8));
        assert!(!fen.board.has_moved(Square::A8));
        assert!(fen.board.has_moved(Square::H8));
        assert_eq!(
            fen.castling_rights(),
            CastlingRights::WHITE_KING_SIDE | CastlingRights::BLACK_QUEEN_SIDE
        );
        assert_eq!(fen.to_string(), "r3k2r/8/8/8/8/8/8/R3K2R w Kq - 0 1");
    }

    #[test]
    fn test_invalid_castling() {
        assert_eq!(
            "4k3/8/8/8/8/8/8/4K3 w K - 0 1".parse::<Fen>(),
            Err(ParseFenError::InvalidCastling)
        );
        assert_eq!(
            "4k3/8/8/8/8/8/8/R3K2R w KX - 0 1".parse::<Fen>(),
            Err(ParseFenError::InvalidCastling)
        );
    }

    #[test]
    fn test_ep_square() {
        let fen: Fen = "4k3/8/8/8/4P3/8/8/4K3 b - e3 0 1".parse().expect("valid fen");
        assert_eq!(
            fen.board.last_move(),
            Some(LastMove {
                from: Square::E2,
                to: Square::E4,
                role: Role::Pawn,
            })
        );
        assert_eq!(fen.ep_square(), Some(Square::E3));
        assert_eq!(fen.to_string(), "4k3/8/8/8/4P3/8/8/4K3 b - e3 0 1");

        // Wrong side, no pawn, or wrong row.
        for fen in [
            "4k3/8/8/8/4P3/8/8/4K3 w - e3 0 1",
            "4k3/8/8/8/8/8/8/4K3 b - e3 0 1",
            "4k3/8/8/8/4P3/8/8/4K3 b - e4 0 1",
        ] {
            assert_eq!(fen.parse::<Fen>(), Err(ParseFenError::InvalidEpSquare), "{fen}");
        }
    }

    #[test]
    fn test_counters() {
        let fen: Fen = "4k3/8/8/8/8/8/8/4K3 w - - 12 34".parse().expect("valid fen");
        assert_eq!(fen.halfmoves, 12);
        assert_eq!(fen.fullmoves.get(), 34);

        assert_eq!(
            "4k3/8/8/8/8/8/8/4K3 w - - x 1".parse::<Fen>(),
            Err(ParseFenError::InvalidHalfmoveClock)
        );
        assert_eq!(
            "4k3/8/8/8/8/8/8/4K3 w - - 0 0".parse::<Fen>(),
            Err(ParseFenError::InvalidFullmoves)
        );
        assert_eq!(
            "4k3/8/8/8/8/8/8/4K3 w - - 0 1 extra".parse::<Fen>(),
            Err(ParseFenError::InvalidFen)
        );
    }

    #[test]
    fn test_partial_fen() {
        let fen: Fen = "4k3/8/8/8/8/8/8/4K3".parse().expect("valid fen");
        assert_eq!(fen.board.turn(), Color::White);
        assert_eq!(fen.to_string(), "4k3/8/8/8/8/8/8/4K3 w - - 0 1");
    }
}
