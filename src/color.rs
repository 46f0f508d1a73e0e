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

use core::{error::Error, fmt, ops, str::FromStr};

use crate::{role::Role, types::Piece};

/// `White` or `Black`.
#[allow(missing_docs)]
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
pub enum Color {
    Black = 0,
    White = 1,
}

impl Color {
    pub const fn from_char(ch: char) -> Option<Color> {
        Some(match ch {
            'w' => Color::White,
            'b' => Color::Black,
            _ => return None,
        })
    }

    #[inline]
    pub const fn from_white(white: bool) -> Color {
        if white {
            Color::White
        } else {
            Color::Black
        }
    }

    pub fn fold_wb<T>(self, white: T, black: T) -> T {
        match self {
            Color::White => white,
            Color::Black => black,
        }
    }

    #[inline]
    pub const fn is_white(self) -> bool {
        matches!(self, Color::White)
    }

    #[inline]
    pub const fn is_black(self) -> bool {
        matches!(self, Color::Black)
    }

    #[must_use]
    #[inline]
    pub const fn other(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// The row holding the pieces of this color in the initial position.
    ///
    /// Row 0 is the home row of `Black`, row 7 the home row of `White`.
    #[inline]
    pub const fn home_row(self) -> u8 {
        match self {
            Color::White => 7,
            Color::Black => 0,
        }
    }

    /// The row from which pawns of this color may advance two steps.
    #[inline]
    pub const fn pawn_row(self) -> u8 {
        match self {
            Color::White => 6,
            Color::Black => 1,
        }
    }

    /// The row on which pawns of this color promote.
    #[inline]
    pub const fn promotion_row(self) -> u8 {
        self.other().home_row()
    }

    /// The row delta of a single pawn step.
    ///
    /// ```
    /// use gambit::Color;
    ///
    /// assert_eq!(Color::White.forward(), -1);
    /// assert_eq!(Color::Black.forward(), 1);
    /// ```
    #[inline]
    pub const fn forward(self) -> i8 {
        match self {
            Color::White => -1,
            Color::Black => 1,
        }
    }

    pub const fn char(self) -> char {
        match self {
            Color::White => 'w',
            Color::Black => 'b',
        }
    }

    #[inline]
    pub const fn pawn(self) -> Piece {
        Role::Pawn.of(self)
    }
    #[inline]
    pub const fn knight(self) -> Piece {
        Role::Knight.of(self)
    }
    #[inline]
    pub const fn bishop(self) -> Piece {
        Role::Bishop.of(self)
    }
    #[inline]
    pub const fn rook(self) -> Piece {
        Role::Rook.of(self)
    }
    #[inline]
    pub const fn queen(self) -> Piece {
        Role::Queen.of(self)
    }
    #[inline]
    pub const fn king(self) -> Piece {
        Role::King.of(self)
    }

    /// `White` and `Black`, in this order.
    pub const ALL: [Color; 2] = [Color::White, Color::Black];
}

impl ops::Not for Color {
    type Output = Color;

    #[inline]
    fn not(self) -> Color {
        self.other()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.fold_wb("white", "black"))
    }
}

/// Error when parsing an invalid color name.
#[derive(Clone, Debug)]
pub struct ParseColorError;

impl fmt::Display for ParseColorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("invalid color")
    }
}

impl Error for ParseColorError {}

impl FromStr for Color {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Color, ParseColorError> {
        Ok(match s {
            "white" => Color::White,
            "black" => Color::Black,
            _ => return Err(ParseColorError),
        })
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Color {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.fold_wb("white", "black"))
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Color {
    fn deserialize<D>(deserializer: D) -> Result<Color, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct ColorVisitor;

        impl serde::de::Visitor<'_> for ColorVisitor {
            type Value = Color;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("white or black")
            }

            fn visit_str<E>(self, value: &str) -> Result<Color, E>
            where
                E: serde::de::Error,
            {
                value.parse().map_err(serde::de::Error::custom)
            }
        }

        deserializer.deserialize_str(ColorVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rows() {
        assert_eq!(Color::White.home_row(), 7);
        assert_eq!(Color::Black.home_row(), 0);
        assert_eq!(Color::White.promotion_row(), 0);
        assert_eq!(Color::Black.promotion_row(), 7);
        assert_eq!(
            Color::White.pawn_row() as i8 + Color::White.forward(),
            5
        );
    }

    #[test]
    fn test_parse_color() {
        assert_eq!("white".parse::<Color>().ok(), Some(Color::White));
        assert_eq!("black".parse::<Color>().ok(), Some(Color::Black));
        assert!("w".parse::<Color>().is_err());
        assert_eq!(!Color::White, Color::Black);
    }
}
