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

//! Sets of squares.

use core::{
    fmt::{self, Write as _},
    iter::FusedIterator,
    ops,
};

use crate::square::Square;

/// A set of [squares](Square) represented by a 64 bit integer mask.
///
/// Bit `n` is set if the square with index `n` (row `n / 8`, column
/// `n % 8`) is in the set.
///
/// # Examples
///
/// ```
/// use gambit::{Bitboard, Square};
///
/// let mut bb = Bitboard::EMPTY;
/// bb.add(Square::E4);
/// bb.add(Square::E3);
///
/// assert!(bb.contains(Square::E4));
/// assert_eq!(bb.count(), 2);
/// assert_eq!(bb.first(), Some(Square::E4));
/// ```
#[derive(Copy, Clone, Default, Eq, PartialEq, Hash)]
pub struct Bitboard(pub u64);

impl Bitboard {
    /// An empty set.
    pub const EMPTY: Bitboard = Bitboard(0);

    /// All squares.
    pub const FULL: Bitboard = Bitboard(!0);

    /// The four corner squares.
    pub const CORNERS: Bitboard = Bitboard(0x8100_0000_0000_0081);

    #[inline]
    pub const fn from_square(sq: Square) -> Bitboard {
        Bitboard(1 << sq.index())
    }

    /// All squares of the given row.
    ///
    /// # Panics
    ///
    /// Panics if `row` is not in the range `0..=7`.
    #[track_caller]
    pub const fn row(row: u8) -> Bitboard {
        assert!(row < 8);
        Bitboard(0xff << (8 * row))
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn contains(self, sq: Square) -> bool {
        self.0 & (1 << sq.index()) != 0
    }

    #[inline]
    pub fn add(&mut self, sq: Square) {
        self.0 |= 1 << sq.index();
    }

    #[must_use]
    #[inline]
    pub const fn with(self, sq: Square) -> Bitboard {
        Bitboard(self.0 | (1 << sq.index()))
    }

    #[must_use]
    #[inline]
    pub const fn without(self, sq: Square) -> Bitboard {
        Bitboard(self.0 & !(1 << sq.index()))
    }

    #[inline]
    pub const fn count(self) -> usize {
        self.0.count_ones() as usize
    }

    #[inline]
    pub const fn more_than_one(self) -> bool {
        self.0 & self.0.wrapping_sub(1) != 0
    }

    /// The square with the lowest index.
    #[inline]
    pub const fn first(self) -> Option<Square> {
        if self.is_empty() {
            None
        } else {
            Some(Square::new(self.0.trailing_zeros() as u8))
        }
    }

    /// The only square in the set, if there is exactly one.
    #[inline]
    pub const fn single_square(self) -> Option<Square> {
        if self.more_than_one() {
            None
        } else {
            self.first()
        }
    }
}

impl fmt::Debug for Bitboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for sq in Square::all() {
            f.write_char(if self.contains(sq) { '1' } else { '.' })?;
            f.write_char(if sq.col() < 7 { ' ' } else { '\n' })?;
        }
        Ok(())
    }
}

impl From<Square> for Bitboard {
    #[inline]
    fn from(sq: Square) -> Bitboard {
        Bitboard::from_square(sq)
    }
}

impl From<Bitboard> for u64 {
    #[inline]
    fn from(Bitboard(bb): Bitboard) -> u64 {
        bb
    }
}

impl ops::BitAnd for Bitboard {
    type Output = Bitboard;

    #[inline]
    fn bitand(self, Bitboard(rhs): Bitboard) -> Bitboard {
        Bitboard(self.0 & rhs)
    }
}

impl ops::BitOr for Bitboard {
    type Output = Bitboard;

    #[inline]
    fn bitor(self, Bitboard(rhs): Bitboard) -> Bitboard {
        Bitboard(self.0 | rhs)
    }
}

impl ops::BitOrAssign for Bitboard {
    #[inline]
    fn bitor_assign(&mut self, Bitboard(rhs): Bitboard) {
        self.0 |= rhs;
    }
}

impl ops::Not for Bitboard {
    type Output = Bitboard;

    #[inline]
    fn not(self) -> Bitboard {
        Bitboard(!self.0)
    }
}

impl FromIterator<Square> for Bitboard {
    fn from_iter<T>(iter: T) -> Bitboard
    where
        T: IntoIterator<Item = Square>,
    {
        let mut result = Bitboard::EMPTY;
        for sq in iter {
            result.add(sq);
        }
        result
    }
}

impl IntoIterator for Bitboard {
    type Item = Square;
    type IntoIter = IntoIter;

    #[inline]
    fn into_iter(self) -> IntoIter {
        IntoIter(self)
    }
}

/// Iterator over the squares of a [`Bitboard`], in index order.
#[derive(Debug, Clone)]
pub struct IntoIter(Bitboard);

impl Iterator for IntoIter {
    type Item = Square;

    #[inline]
    fn next(&mut self) -> Option<Square> {
        let square = self.0.first();
        self.0 .0 &= self.0 .0.wrapping_sub(1);
        square
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.len();
        (len, Some(len))
    }
}

impl ExactSizeIterator for IntoIter {
    #[inline]
    fn len(&self) -> usize {
        self.0.count()
    }
}

impl FusedIterator for IntoIter {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first() {
        assert_eq!(Bitboard::from_square(Square::A8).first(), Some(Square::A8));
        assert_eq!(Bitboard::from_square(Square::D2).first(), Some(Square::D2));
        assert_eq!(Bitboard::EMPTY.first(), None);
    }

    #[test]
    fn test_single_square() {
        assert_eq!(Bitboard::EMPTY.single_square(), None);
        assert_eq!(Bitboard::from(Square::H1).single_square(), Some(Square::H1));
        assert_eq!(Bitboard::CORNERS.single_square(), None);
    }

    #[test]
    fn test_row() {
        assert_eq!(Bitboard::row(0), Bitboard(0xff));
        assert!(Bitboard::row(7).contains(Square::E1));
        assert!(!Bitboard::row(7).contains(Square::E2));
    }

    #[test]
    fn test_iter_corners() {
        let corners: [Square; 4] = [Square::A8, Square::H8, Square::A1, Square::H1];
        assert!(Bitboard::CORNERS.into_iter().eq(corners));
        assert_eq!(corners.into_iter().collect::<Bitboard>(), Bitboard::CORNERS);
    }
}
