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

use core::{fmt, ops};

use crate::{color::Color, square::Square};

/// `KingSide` (O-O) or `QueenSide` (O-O-O).
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub enum CastlingSide {
    KingSide = 0,
    QueenSide = 1,
}

impl CastlingSide {
    #[inline]
    pub const fn is_king_side(self) -> bool {
        matches!(self, CastlingSide::KingSide)
    }

    #[inline]
    pub const fn from_king_side(king_side: bool) -> CastlingSide {
        if king_side {
            CastlingSide::KingSide
        } else {
            CastlingSide::QueenSide
        }
    }

    /// Gets the side a king move with the given column delta castles
    /// towards, if it is a two column move.
    pub const fn from_col_delta(dcol: i8) -> Option<CastlingSide> {
        match dcol {
            2 => Some(CastlingSide::KingSide),
            -2 => Some(CastlingSide::QueenSide),
            _ => None,
        }
    }

    /// Column of the rook before castling.
    pub const fn rook_from_col(self) -> u8 {
        match self {
            CastlingSide::KingSide => 7,
            CastlingSide::QueenSide => 0,
        }
    }

    /// Column of the king after castling.
    pub const fn king_to_col(self) -> u8 {
        match self {
            CastlingSide::KingSide => 6,
            CastlingSide::QueenSide => 2,
        }
    }

    /// Column of the rook after castling, next to the king on the side it
    /// came from.
    pub const fn rook_to_col(self) -> u8 {
        match self {
            CastlingSide::KingSide => 5,
            CastlingSide::QueenSide => 3,
        }
    }

    pub const fn rook_from(self, color: Color) -> Square {
        Square::from_row_col(color.home_row(), self.rook_from_col())
    }

    pub const fn king_to(self, color: Color) -> Square {
        Square::from_row_col(color.home_row(), self.king_to_col())
    }

    pub const fn rook_to(self, color: Color) -> Square {
        Square::from_row_col(color.home_row(), self.rook_to_col())
    }

    #[must_use]
    #[inline]
    pub const fn other(self) -> CastlingSide {
        match self {
            CastlingSide::KingSide => CastlingSide::QueenSide,
            CastlingSide::QueenSide => CastlingSide::KingSide,
        }
    }

    /// `KingSide` and `QueenSide`, in this order.
    pub const ALL: [CastlingSide; 2] = [CastlingSide::KingSide, CastlingSide::QueenSide];
}

impl ops::Not for CastlingSide {
    type Output = CastlingSide;

    #[inline]
    fn not(self) -> CastlingSide {
        self.other()
    }
}

/// The original square of the king of `color`, the only square it can
/// castle from.
pub const fn king_home(color: Color) -> Square {
    Square::from_row_col(color.home_row(), 4)
}

bitflags::bitflags! {
    /// Castling availability, as written in the third FEN field.
    #[derive(Copy, Clone, Eq, PartialEq, Debug, Hash, Default)]
    pub struct CastlingRights: u8 {
        const WHITE_KING_SIDE = 1 << 0;
        const WHITE_QUEEN_SIDE = 1 << 1;
        const BLACK_KING_SIDE = 1 << 2;
        const BLACK_QUEEN_SIDE = 1 << 3;
    }
}

impl CastlingRights {
    pub const fn of(color: Color, side: CastlingSide) -> CastlingRights {
        match (color, side) {
            (Color::White, CastlingSide::KingSide) => CastlingRights::WHITE_KING_SIDE,
            (Color::White, CastlingSide::QueenSide) => CastlingRights::WHITE_QUEEN_SIDE,
            (Color::Black, CastlingSide::KingSide) => CastlingRights::BLACK_KING_SIDE,
            (Color::Black, CastlingSide::QueenSide) => CastlingRights::BLACK_QUEEN_SIDE,
        }
    }

    /// Both rights of a color.
    pub const fn color(color: Color) -> CastlingRights {
        match color {
            Color::White => CastlingRights::WHITE_KING_SIDE.union(CastlingRights::WHITE_QUEEN_SIDE),
            Color::Black => CastlingRights::BLACK_KING_SIDE.union(CastlingRights::BLACK_QUEEN_SIDE),
        }
    }

    pub const fn has(self, color: Color, side: CastlingSide) -> bool {
        self.contains(CastlingRights::of(color, side))
    }

    /// Parses the FEN castling field, like `KQkq` or `-`.
    pub fn from_ascii(s: &[u8]) -> Option<CastlingRights> {
        if s == b"-" {
            return Some(CastlingRights::empty());
        }
        if s.is_empty() {
            return None;
        }
        let mut rights = CastlingRights::empty();
        for &ch in s {
            let flag = match ch {
                b'K' => CastlingRights::WHITE_KING_SIDE,
                b'Q' => CastlingRights::WHITE_QUEEN_SIDE,
                b'k' => CastlingRights::BLACK_KING_SIDE,
                b'q' => CastlingRights::BLACK_QUEEN_SIDE,
                _ => return None,
            };
            if rights.contains(flag) {
                return None;
            }
            rights |= flag;
        }
        Some(rights)
    }
}

impl fmt::Display for CastlingRights {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("-");
        }
        for (flag, ch) in [
            (CastlingRights::WHITE_KING_SIDE, "K"),
            (CastlingRights::WHITE_QUEEN_SIDE, "Q"),
            (CastlingRights::BLACK_KING_SIDE, "k"),
            (CastlingRights::BLACK_QUEEN_SIDE, "q"),
        ] {
            if self.contains(flag) {
                f.write_str(ch)?;
            }
        }
        Ok(())
    }
}
