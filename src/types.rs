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

use crate::{color::Color, role::Role, square::Square};

/// A piece with [`Color`] and [`Role`].
#[allow(missing_docs)]
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub struct Piece {
    pub color: Color,
    pub role: Role,
}

impl Piece {
    /// Gets the FEN letter of the piece, uppercase for `White`.
    pub const fn char(self) -> char {
        match self.color {
            Color::White => self.role.upper_char(),
            Color::Black => self.role.char(),
        }
    }

    pub const fn from_char(ch: char) -> Option<Piece> {
        match Role::from_char(ch) {
            Some(role) => Some(role.of(Color::from_white(ch.is_ascii_uppercase()))),
            None => None,
        }
    }
}

/// A [`Piece`] as it stands on the board, with the state the rules need
/// to remember about it.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub struct PlacedPiece {
    pub piece: Piece,
    /// The square the piece currently occupies.
    pub square: Square,
    /// Set once the piece has been moved. Kings and rooks that have moved
    /// can no longer castle.
    pub has_moved: bool,
}

impl PlacedPiece {
    #[inline]
    pub const fn color(&self) -> Color {
        self.piece.color
    }

    #[inline]
    pub const fn role(&self) -> Role {
        self.piece.role
    }
}

/// The most recently applied move, as far as en passant needs to know it.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub struct LastMove {
    pub from: Square,
    pub to: Square,
    pub role: Role,
}

impl LastMove {
    /// Checks if the move was a pawn advancing two rows.
    pub const fn is_double_pawn_push(&self) -> bool {
        matches!(self.role, Role::Pawn)
            && self.from.col() == self.to.col()
            && self.from.row().abs_diff(self.to.row()) == 2
    }

    /// The square skipped by a two-row pawn advance.
    pub fn en_passant_target(&self) -> Option<Square> {
        if self.is_double_pawn_push() {
            Some(Square::from_row_col(
                (self.from.row() + self.to.row()) / 2,
                self.to.col(),
            ))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_piece_char() {
        assert_eq!(Color::White.queen().char(), 'Q');
        assert_eq!(Color::Black.knight().char(), 'n');
        assert_eq!(Piece::from_char('K'), Some(Color::White.king()));
        assert_eq!(Piece::from_char('p'), Some(Color::Black.pawn()));
        assert_eq!(Piece::from_char('x'), None);
    }

    #[test]
    fn test_en_passant_target() {
        let push = LastMove {
            from: Square::D7,
            to: Square::D5,
            role: Role::Pawn,
        };
        assert_eq!(push.en_passant_target(), Some(Square::D6));

        let single = LastMove {
            from: Square::D7,
            to: Square::D6,
            role: Role::Pawn,
        };
        assert_eq!(single.en_passant_target(), None);

        let rook = LastMove {
            from: Square::A8,
            to: Square::A6,
            role: Role::Rook,
        };
        assert_eq!(rook.en_passant_target(), None);
    }
}
