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

//! The board state: piece placement, side to move and the last move.

use core::fmt::{self, Write as _};

use crate::{
    bitboard::Bitboard,
    castling_side::{king_home, CastlingRights, CastlingSide},
    color::Color,
    position::PositionError,
    role::Role,
    rules,
    square::Square,
    types::{LastMove, Piece, PlacedPiece},
};

/// [`Piece`] positions on a board, together with the side to move and the
/// most recently applied move.
///
/// The board is a plain value. Copying it is cheap, so hypothetical moves
/// are tried out on a copy, leaving the original untouched.
///
/// # Examples
///
/// ```
/// use gambit::{Board, Color, Square};
///
/// let board = Board::new();
/// // r n b q k b n r
/// // p p p p p p p p
/// // . . . . . . . .
/// // . . . . . . . .
/// // . . . . . . . .
/// // . . . . . . . .
/// // P P P P P P P P
/// // R N B Q K B N R
///
/// assert_eq!(board.piece_at(Square::E2), Some(Color::White.pawn()));
/// assert_eq!(board.turn(), Color::White);
/// ```
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct Board {
    squares: [Option<PlacedPiece>; 64],
    turn: Color,
    last_move: Option<LastMove>,
}

impl Board {
    /// The standard starting position, with White to move.
    pub fn new() -> Board {
        const BACK_RANK: [Role; 8] = [
            Role::Rook,
            Role::Knight,
            Role::Bishop,
            Role::Queen,
            Role::King,
            Role::Bishop,
            Role::Knight,
            Role::Rook,
        ];

        let mut board = Board::empty();
        for color in Color::ALL {
            for (col, role) in (0..8).zip(BACK_RANK) {
                board.set_piece_at(
                    Square::from_row_col(color.home_row(), col),
                    role.of(color),
                    false,
                );
                board.set_piece_at(
                    Square::from_row_col(color.pawn_row(), col),
                    color.pawn(),
                    false,
                );
            }
        }
        board
    }

    /// An empty board with White to move.
    pub const fn empty() -> Board {
        Board {
            squares: [None; 64],
            turn: Color::White,
            last_move: None,
        }
    }

    #[inline]
    pub const fn turn(&self) -> Color {
        self.turn
    }

    #[inline]
    pub fn set_turn(&mut self, turn: Color) {
        self.turn = turn;
    }

    /// Passes the turn to the other side.
    #[inline]
    pub fn toggle_turn(&mut self) {
        self.turn = !self.turn;
    }

    /// The most recently applied move, if any.
    #[inline]
    pub const fn last_move(&self) -> Option<LastMove> {
        self.last_move
    }

    #[inline]
    pub fn set_last_move(&mut self, last_move: Option<LastMove>) {
        self.last_move = last_move;
    }

    #[inline]
    pub const fn placed_at(&self, sq: Square) -> Option<PlacedPiece> {
        self.squares[sq.to_usize()]
    }

    #[inline]
    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.placed_at(sq).map(|placed| placed.piece)
    }

    #[inline]
    pub const fn is_empty(&self, sq: Square) -> bool {
        self.squares[sq.to_usize()].is_none()
    }

    /// Checks if `sq` holds a piece of the color opposing `color`.
    #[inline]
    pub fn is_opponent_piece(&self, sq: Square, color: Color) -> bool {
        self.placed_at(sq)
            .is_some_and(|placed| placed.color() != color)
    }

    /// Checks if the piece on `sq` has been moved. Empty squares report
    /// `false`.
    #[inline]
    pub fn has_moved(&self, sq: Square) -> bool {
        self.placed_at(sq).is_some_and(|placed| placed.has_moved)
    }

    /// Puts `piece` on `sq`, replacing any previous occupant.
    pub fn set_piece_at(&mut self, sq: Square, piece: Piece, has_moved: bool) {
        self.squares[sq.to_usize()] = Some(PlacedPiece {
            piece,
            square: sq,
            has_moved,
        });
    }

    pub fn remove_piece_at(&mut self, sq: Square) -> Option<PlacedPiece> {
        self.squares[sq.to_usize()].take()
    }

    /// Moves the piece on `from` to `to`, keeping its moved flag, and
    /// returns the previous occupant of `to`. Does nothing if `from` is
    /// empty.
    pub(crate) fn relocate(&mut self, from: Square, to: Square) -> Option<PlacedPiece> {
        let mut placed = self.remove_piece_at(from)?;
        placed.square = to;
        self.squares[to.to_usize()].replace(placed)
    }

    pub(crate) fn set_moved(&mut self, sq: Square) {
        if let Some(placed) = &mut self.squares[sq.to_usize()] {
            placed.has_moved = true;
        }
    }

    /// Iterates over all pieces on the board, row by row, starting
    /// on the eighth rank.
    pub fn pieces(&self) -> impl Iterator<Item = PlacedPiece> + '_ {
        self.squares.iter().copied().flatten()
    }

    /// Number of pieces on the board.
    pub fn piece_count(&self) -> usize {
        self.pieces().count()
    }

    pub fn occupied(&self) -> Bitboard {
        self.pieces().map(|placed| placed.square).collect()
    }

    pub fn by_color(&self, color: Color) -> Bitboard {
        self.pieces()
            .filter(|placed| placed.color() == color)
            .map(|placed| placed.square)
            .collect()
    }

    pub fn by_piece(&self, piece: Piece) -> Bitboard {
        self.pieces()
            .filter(|placed| placed.piece == piece)
            .map(|placed| placed.square)
            .collect()
    }

    /// Squares of the pieces that oppose `color` and threaten `sq`.
    pub fn attackers(&self, sq: Square, color: Color) -> Bitboard {
        self.pieces()
            .filter(|placed| {
                placed.color() != color && rules::attacks(placed.piece, placed.square, sq, self)
            })
            .map(|placed| placed.square)
            .collect()
    }

    /// Checks if any piece opposing `color` threatens `sq`.
    pub fn is_under_attack(&self, sq: Square, color: Color) -> bool {
        self.pieces().any(|placed| {
            placed.color() != color && rules::attacks(placed.piece, placed.square, sq, self)
        })
    }

    /// Castling rights as they follow from the moved flags: each side
    /// where a king and a rook of the same color both stand unmoved on
    /// their original squares.
    ///
    /// This does not consider whether castling is currently possible. A
    /// captured rook takes its right with it.
    pub fn castling_rights(&self) -> CastlingRights {
        let unmoved = |sq: Square, piece: Piece| {
            self.placed_at(sq)
                .is_some_and(|placed| placed.piece == piece && !placed.has_moved)
        };

        let mut rights = CastlingRights::empty();
        for color in Color::ALL {
            if !unmoved(king_home(color), color.king()) {
                continue;
            }
            for side in CastlingSide::ALL {
                if unmoved(side.rook_from(color), color.rook()) {
                    rights |= CastlingRights::of(color, side);
                }
            }
        }
        rights
    }

    /// Finds the king of `color`.
    ///
    /// # Errors
    ///
    /// Fails with [`PositionError::MissingKing`] or
    /// [`PositionError::TooManyKings`] unless there is exactly one king of
    /// that color.
    pub fn king_of(&self, color: Color) -> Result<Square, PositionError> {
        let kings = self.by_piece(color.king());
        match kings.first() {
            None => Err(PositionError::MissingKing(color)),
            Some(_) if kings.more_than_one() => Err(PositionError::TooManyKings(color)),
            Some(sq) => Ok(sq),
        }
    }

    /// Checks if the king of `color` is attacked.
    ///
    /// # Errors
    ///
    /// See [`Board::king_of()`].
    pub fn is_in_check(&self, color: Color) -> Result<bool, PositionError> {
        self.king_of(color)
            .map(|king| self.is_under_attack(king, color))
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::new()
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for sq in Square::all() {
            f.write_char(self.piece_at(sq).map_or('.', Piece::char))?;
            f.write_char(if sq.col() < 7 { ' ' } else { '\n' })?;
        }
        write!(f, "{} to move", self.turn)?;
        if let Some(last) = self.last_move {
            write!(f, ", last move {}{}", last.from, last.to)?;
        }
        Ok(())
    }
}
