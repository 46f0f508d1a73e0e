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

use core::{
    error::Error,
    fmt::{self, Write as _},
    num,
    str::FromStr,
};

use crate::util::overflow_error;

/// Error when parsing an invalid square name.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParseSquareError;

impl fmt::Display for ParseSquareError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("invalid square name")
    }
}

impl Error for ParseSquareError {}

/// A square of the chessboard, addressed by row and column.
///
/// Row 0 is the home row of `Black` (rank 8) and row 7 the home row of
/// `White` (rank 1). Column 0 is the a-file.
///
/// # Examples
///
/// ```
/// use gambit::Square;
///
/// assert_eq!(Square::A8.row(), 0);
/// assert_eq!(Square::E1.row(), 7);
/// assert_eq!(Square::E1.col(), 4);
/// assert_eq!(Square::from_row_col(6, 4), Square::E2);
/// ```
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Square(u8);

macro_rules! square_consts {
    ($($name:ident = $index:expr,)+) => {
        $(pub const $name: Square = Square($index);)+
    }
}

impl Square {
    /// Gets a [`Square`] from its index, `row * 8 + col`.
    ///
    /// # Panics
    ///
    /// Panics if the index is not in the range `0..=63`.
    #[track_caller]
    #[inline]
    pub const fn new(index: u8) -> Square {
        assert!(index < 64);
        Square(index)
    }

    /// Gets a [`Square`] from row and column.
    ///
    /// # Panics
    ///
    /// Panics if row or column is not in the range `0..=7`.
    #[track_caller]
    #[inline]
    pub const fn from_row_col(row: u8, col: u8) -> Square {
        assert!(row < 8 && col < 8);
        Square(row * 8 + col)
    }

    /// Gets a [`Square`] from signed coordinates, or `None` if they are
    /// off the board.
    #[inline]
    pub const fn try_from_row_col(row: i8, col: i8) -> Option<Square> {
        if 0 <= row && row < 8 && 0 <= col && col < 8 {
            Some(Square((row * 8 + col) as u8))
        } else {
            None
        }
    }

    /// Parses a square name like `e4`.
    ///
    /// # Errors
    ///
    /// Returns [`ParseSquareError`] if the input is not a valid square name.
    ///
    /// # Examples
    ///
    /// ```
    /// use gambit::Square;
    ///
    /// assert_eq!(Square::from_ascii(b"e4"), Ok(Square::E4));
    /// assert!(Square::from_ascii(b"i9").is_err());
    /// ```
    pub const fn from_ascii(s: &[u8]) -> Result<Square, ParseSquareError> {
        if s.len() == 2 {
            let (file, rank) = (s[0], s[1]);
            if b'a' <= file && file <= b'h' && b'1' <= rank && rank <= b'8' {
                return Ok(Square::from_row_col(b'8' - rank, file - b'a'));
            }
        }
        Err(ParseSquareError)
    }

    #[inline]
    pub const fn row(self) -> u8 {
        self.0 >> 3
    }

    #[inline]
    pub const fn col(self) -> u8 {
        self.0 & 7
    }

    #[inline]
    pub const fn index(self) -> u8 {
        self.0
    }

    #[inline]
    pub const fn to_usize(self) -> usize {
        self.0 as usize
    }

    /// Gets the square `drow` rows and `dcol` columns away, or `None` if
    /// that would leave the board.
    ///
    /// # Examples
    ///
    /// ```
    /// use gambit::Square;
    ///
    /// assert_eq!(Square::E2.offset(-2, 0), Some(Square::E4));
    /// assert_eq!(Square::H1.offset(0, 1), None);
    /// ```
    #[inline]
    pub const fn offset(self, drow: i8, dcol: i8) -> Option<Square> {
        Square::try_from_row_col(self.row() as i8 + drow, self.col() as i8 + dcol)
    }

    /// Gets the file letter, `a` to `h`.
    pub const fn file_char(self) -> char {
        (b'a' + self.col()) as char
    }

    /// Gets the rank digit, `1` to `8`.
    pub const fn rank_char(self) -> char {
        (b'8' - self.row()) as char
    }

    /// Signed row and column difference `other - self`.
    #[inline]
    pub const fn delta(self, other: Square) -> (i8, i8) {
        (
            other.row() as i8 - self.row() as i8,
            other.col() as i8 - self.col() as i8,
        )
    }

    /// Iterates over all squares, row by row, starting with `A8`.
    pub fn all() -> impl DoubleEndedIterator<Item = Square> + ExactSizeIterator {
        (0..64).map(Square)
    }

    square_consts! {
        A8 = 0, B8 = 1, C8 = 2, D8 = 3, E8 = 4, F8 = 5, G8 = 6, H8 = 7,
        A7 = 8, B7 = 9, C7 = 10, D7 = 11, E7 = 12, F7 = 13, G7 = 14, H7 = 15,
        A6 = 16, B6 = 17, C6 = 18, D6 = 19, E6 = 20, F6 = 21, G6 = 22, H6 = 23,
        A5 = 24, B5 = 25, C5 = 26, D5 = 27, E5 = 28, F5 = 29, G5 = 30, H5 = 31,
        A4 = 32, B4 = 33, C4 = 34, D4 = 35, E4 = 36, F4 = 37, G4 = 38, H4 = 39,
        A3 = 40, B3 = 41, C3 = 42, D3 = 43, E3 = 44, F3 = 45, G3 = 46, H3 = 47,
        A2 = 48, B2 = 49, C2 = 50, D2 = 51, E2 = 52, F2 = 53, G2 = 54, H2 = 55,
        A1 = 56, B1 = 57, C1 = 58, D1 = 59, E1 = 60, F1 = 61, G1 = 62, H1 = 63,
    }
}

macro_rules! int_from_square_impl {
    ($($t:ty)+) => {
        $(impl From<Square> for $t {
            #[inline]
            fn from(sq: Square) -> $t {
                sq.0 as $t
            }
        })+
    }
}

int_from_square_impl! { u8 i8 u16 i16 u32 i32 u64 i64 usize isize }

macro_rules! try_square_from_int_impl {
    ($($t:ty)+) => {
        $(impl core::convert::TryFrom<$t> for Square {
            type Error = num::TryFromIntError;

            #[inline]
            fn try_from(value: $t) -> Result<Square, Self::Error> {
                if (0..64).contains(&value) {
                    Ok(Square(value as u8))
                } else {
                    Err(overflow_error())
                }
            }
        })+
    }
}

try_square_from_int_impl! { u8 i8 u16 i16 u32 i32 u64 i64 usize isize }

impl FromStr for Square {
    type Err = ParseSquareError;

    fn from_str(s: &str) -> Result<Square, ParseSquareError> {
        Square::from_ascii(s.as_bytes())
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_char(self.file_char())?;
        f.write_char(self.rank_char())
    }
}

impl fmt::Debug for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_char(self.file_char().to_ascii_uppercase())?;
        f.write_char(self.rank_char())
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Square {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Square {
    fn deserialize<D>(deserializer: D) -> Result<Square, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct SquareVisitor;

        impl serde::de::Visitor<'_> for SquareVisitor {
            type Value = Square;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("square name")
            }

            fn visit_str<E>(self, value: &str) -> Result<Square, E>
            where
                E: serde::de::Error,
            {
                value.parse().map_err(serde::de::Error::custom)
            }
        }

        deserializer.deserialize_str(SquareVisitor)
    }
}

#[cfg(feature = "arbitrary")]
impl<'a> arbitrary::Arbitrary<'a> for Square {
    fn arbitrary(u: &mut arbitrary::Unstructured<'a>) -> arbitrary::Result<Square> {
        u.int_in_range(0..=63).map(Square)
    }

    fn size_hint(_depth: usize) -> (usize, Option<usize>) {
        (1, Some(1))
    }
}
