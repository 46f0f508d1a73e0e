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

//! Compact binary representation of complete positions.
//!
//! Unlike a FEN, the packed form keeps the moved flag of every piece, so
//! unpacking restores exactly the position that was packed.
//!
//! # Format
//!
//! * Occupied squares as a 64 bit big-endian bitboard, bit `n` for the
//!   square with index `n`.
//! * One nibble per occupied square, in index order, two per byte with the
//!   first in the low half. The nibble is the role (`1` pawn to `6` king),
//!   plus `8` for White.
//! * Squares of moved pieces as a 64 bit big-endian bitboard.
//! * One byte for the side to move, `0` for White and `1` for Black.
//! * The last move: `0`, or the role of the moved piece followed by the
//!   indexes of origin and destination square.
//! * Half-move clock and move number, as LEB128.
//!
//! # Examples
//!
//! ```
//! use gambit::{packed::PackedPosition, uci::Uci, Chess};
//!
//! let mut pos = Chess::default();
//! pos.play("e2e4".parse::<Uci>()?)?;
//!
//! let packed = PackedPosition::pack(&pos);
//! assert_eq!(packed.unpack()?, pos);
//! # Ok::<_, Box<dyn std::error::Error>>(())
//! ```

use core::{array::TryFromSliceError, error::Error, fmt, mem, num::NonZeroU32};

use crate::{
    bitboard::Bitboard,
    board::Board,
    color::Color,
    fen::double_pawn_push_over,
    position::{Chess, PositionError},
    role::Role,
    square::Square,
    types::{LastMove, Piece},
    util::try_from_slice_error,
};

/// Error when unpacking an invalid [`PackedPosition`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum UnpackError {
    InvalidPiece,
    InvalidMovedSquares,
    InvalidTurn,
    InvalidLastMove,
    InvalidHalfmoveClock,
    InvalidFullmoves,
    /// The data is well-formed, but does not describe a valid position.
    Position(PositionError),
}

impl fmt::Display for UnpackError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            UnpackError::InvalidPiece => f.write_str("invalid packed piece"),
            UnpackError::InvalidMovedSquares => f.write_str("moved flag on empty square"),
            UnpackError::InvalidTurn => f.write_str("invalid packed turn"),
            UnpackError::InvalidLastMove => f.write_str("invalid packed last move"),
            UnpackError::InvalidHalfmoveClock => f.write_str("invalid packed halfmove clock"),
            UnpackError::InvalidFullmoves => f.write_str("invalid packed fullmoves"),
            UnpackError::Position(err) => write!(f, "invalid packed position: {err}"),
        }
    }
}

impl Error for UnpackError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            UnpackError::Position(err) => Some(err),
            _ => None,
        }
    }
}

/// A [`Chess`] position, packed into at most
/// [`PackedPosition::MAX_BYTES`] bytes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PackedPosition([u8; PackedPosition::MAX_BYTES]);

impl PackedPosition {
    pub const MAX_BYTES: usize = 8 + 64 / 2 + 8 + 1 + 3 + 5 + 5;

    const fn empty() -> PackedPosition {
        PackedPosition([0; PackedPosition::MAX_BYTES])
    }

    /// The packed bytes, without padding.
    pub fn as_bytes(&self) -> &[u8] {
        // Trim trailing zeroes
        let mut bytes = &self.0[..];
        while let [rest @ .., last] = bytes {
            if *last == 0 {
                bytes = rest
            } else {
                break;
            }
        }
        bytes
    }

    /// Takes packed bytes. They are only validated when unpacking.
    ///
    /// # Errors
    ///
    /// Errors if `bytes` is longer than [`PackedPosition::MAX_BYTES`].
    pub fn try_from_bytes(bytes: &[u8]) -> Result<PackedPosition, TryFromSliceError> {
        let mut packed = PackedPosition::empty();
        let dst = packed
            .0
            .get_mut(..bytes.len())
            .ok_or_else(try_from_slice_error)?;
        dst.copy_from_slice(bytes);
        Ok(packed)
    }

    pub fn pack(pos: &Chess) -> PackedPosition {
        let mut packed = PackedPosition::empty();
        let mut writer = Writer::new(&mut packed.0);
        let board = pos.board();

        writer.write_u64(board.occupied().0);

        let mut pieces = board.pieces();
        while let Some(first) = pieces.next() {
            let second = pieces.next().map_or(0, |placed| encode_piece(placed.piece));
            writer.write_nibbles(encode_piece(first.piece), second);
        }

        let moved: Bitboard = board
            .pieces()
            .filter(|placed| placed.has_moved)
            .map(|placed| placed.square)
            .collect();
        writer.write_u64(moved.0);

        writer.write_u8(u8::from(board.turn().is_black()));

        match board.last_move() {
            Some(last) => {
                writer.write_u8(last.role as u8);
                writer.write_u8(last.from.index());
                writer.write_u8(last.to.index());
            }
            None => writer.write_u8(0),
        }

        writer.write_leb128(u64::from(pos.halfmoves()));
        writer.write_leb128(u64::from(pos.fullmoves().get()));

        packed
    }

    /// Restores the packed position.
    ///
    /// # Errors
    ///
    /// Returns [`UnpackError`] if the bytes are malformed, or if they do
    /// not describe a valid position.
    pub fn unpack(&self) -> Result<Chess, UnpackError> {
        let mut reader = Reader::new(&self.0);
        let mut board = Board::empty();

        let occupied = Bitboard(reader.read_u64());
        let mut squares = occupied.into_iter();
        while let Some(first) = squares.next() {
            let (lo, hi) = reader.read_nibbles();
            board.set_piece_at(first, decode_piece(lo)?, false);
            if let Some(second) = squares.next() {
                board.set_piece_at(second, decode_piece(hi)?, false);
            }
        }

        let moved = Bitboard(reader.read_u64());
        if !(moved & !occupied).is_empty() {
            return Err(UnpackError::InvalidMovedSquares);
        }
        for sq in moved {
            board.set_moved(sq);
        }

        board.set_turn(match reader.read_u8() {
            0 => Color::White,
            1 => Color::Black,
            _ => return Err(UnpackError::InvalidTurn),
        });

        let last_move = match reader.read_u8() {
            0 => None,
            role => {
                let role = Role::try_from(role).map_err(|_| UnpackError::InvalidLastMove)?;
                let from =
                    Square::try_from(reader.read_u8()).map_err(|_| UnpackError::InvalidLastMove)?;
                let to =
                    Square::try_from(reader.read_u8()).map_err(|_| UnpackError::InvalidLastMove)?;
                Some(LastMove { from, to, role })
            }
        };
        if let Some(last) = last_move {
            if !is_consistent_last_move(&board, last) {
                return Err(UnpackError::InvalidLastMove);
            }
        }
        board.set_last_move(last_move);

        let halfmoves = u32::try_from(reader.read_leb128(5))
            .map_err(|_| UnpackError::InvalidHalfmoveClock)?;
        let fullmoves = u32::try_from(reader.read_leb128(5))
            .ok()
            .and_then(NonZeroU32::new)
            .ok_or(UnpackError::InvalidFullmoves)?;

        Chess::from_parts(board, halfmoves, fullmoves).map_err(UnpackError::Position)
    }
}

impl TryFrom<&[u8]> for PackedPosition {
    type Error = TryFromSliceError;

    fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
        PackedPosition::try_from_bytes(value)
    }
}

/// The last move must have been made by the player not to move, and end
/// on an occupied square. A two-row pawn advance must also be readable
/// from a FEN en passant field.
fn is_consistent_last_move(board: &Board, last: LastMove) -> bool {
    let mover = !board.turn();
    if last.from == last.to
        || board
            .piece_at(last.to)
            .is_none_or(|piece| piece.color != mover)
    {
        return false;
    }

    match last.en_passant_target() {
        Some(ep_square) => double_pawn_push_over(board, ep_square) == Some(last),
        None => true,
    }
}

fn encode_piece(piece: Piece) -> u8 {
    piece.role as u8 | if piece.color.is_white() { 8 } else { 0 }
}

fn decode_piece(nibble: u8) -> Result<Piece, UnpackError> {
    let role = Role::try_from(nibble & 7).map_err(|_| UnpackError::InvalidPiece)?;
    Ok(role.of(Color::from_white(nibble & 8 != 0)))
}

struct Writer<'a> {
    inner: &'a mut [u8],
}

impl Writer<'_> {
    fn new(dst: &mut [u8]) -> Writer<'_> {
        Writer { inner: dst }
    }

    #[inline]
    fn write_u8(&mut self, n: u8) {
        let (head, tail) = mem::take(&mut self.inner).split_at_mut(1);
        head[0] = n;
        self.inner = tail;
    }

    fn write_u64(&mut self, n: u64) {
        let (head, tail) = mem::take(&mut self.inner).split_at_mut(8);
        head.copy_from_slice(&n.to_be_bytes());
        self.inner = tail;
    }

    fn write_nibbles(&mut self, lo: u8, hi: u8) {
        debug_assert!(lo & 0xf == lo);
        debug_assert!(hi & 0xf == hi);
        self.write_u8(lo | (hi << 4))
    }

    fn write_leb128(&mut self, mut n: u64) {
        while n > 127 {
            self.write_u8(n as u8 | 128);
            n >>= 7;
        }
        self.write_u8(n as u8);
    }
}

struct Reader<'a> {
    inner: &'a [u8],
}

impl Reader<'_> {
    fn new(src: &[u8]) -> Reader<'_> {
        Reader { inner: src }
    }

    #[inline]
    fn read_u8(&mut self) -> u8 {
        let (head, tail) = self.inner.split_at(1);
        self.inner = tail;
        head[0]
    }

    fn read_u64(&mut self) -> u64 {
        let (head, tail) = self.inner.split_at(8);
        self.inner = tail;
        u64::from_be_bytes(head.try_into().unwrap())
    }

    fn read_nibbles(&mut self) -> (u8, u8) {
        let n = self.read_u8();
        (n & 0xf, n >> 4)
    }

    fn read_leb128(&mut self, max_bytes: usize) -> u64 {
        let mut n = 0;
        let mut shift = 0;
        for _ in 0..max_bytes {
            let byte = self.read_u8();
            n |= u64::from(byte & 127) << shift;
            shift += 7;
            if byte & 128 == 0 {
                break;
            }
        }
        n
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for PackedPosition {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_bytes(self.as_bytes())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for PackedPosition {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct PackedPositionVisitor;

        impl serde::de::Visitor<'_> for PackedPositionVisitor {
            type Value = PackedPosition;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("packed position bytes")
            }

            fn visit_bytes<E>(self, value: &[u8]) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                PackedPosition::try_from_bytes(value).map_err(serde::de::Error::custom)
            }
        }

        deserializer.deserialize_bytes(PackedPositionVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{fen::Fen, uci::Uci};

    #[test]
    fn test_read_write_leb128() {
        let mut buf = [0; 16];

        let mut writer = Writer::new(&mut buf);
        writer.write_leb128(u64::from(u32::MAX));
        writer.write_leb128(128);
        writer.write_leb128(1);
        writer.write_leb128(0);

        let mut reader = Reader::new(&buf);
        assert_eq!(reader.read_leb128(5), u64::from(u32::MAX));
        assert_eq!(reader.read_leb128(5), 128);
        assert_eq!(reader.read_leb128(5), 1);
        assert_eq!(reader.read_leb128(5), 0);
    }

    #[test]
    fn test_initial_position_bytes() {
        let packed = PackedPosition::pack(&Chess::default());
        let bytes = packed.as_bytes();
        assert_eq!(&bytes[..8], &[0xff, 0xff, 0, 0, 0, 0, 0xff, 0xff]);
        // Black rook and knight on a8 and b8.
        assert_eq!(bytes[8], 0x24);
        // Moved pieces, turn, last move, clocks.
        assert_eq!(&bytes[24..], &[0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1]);
    }

    #[test]
    fn test_keeps_moved_flags() {
        // The rooks went back to their corners. A FEN would still grant
        // castling rights here.
        let mut pos = Chess::default();
        for uci in ["g1f3", "b8c6", "h1g1", "a8b8", "g1h1", "b8a8"] {
            pos.play(uci.parse::<Uci>().expect("valid uci")).expect("legal");
        }

        let unpacked = PackedPosition::pack(&pos).unpack().expect("valid");
        assert_eq!(unpacked, pos);
        assert!(unpacked.board().has_moved(Square::H1));
        assert!(unpacked.board().has_moved(Square::A8));
        assert!(!unpacked.board().has_moved(Square::E1));
    }

    #[test]
    fn test_keeps_last_move() {
        let pos = "4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 2"
            .parse::<Fen>()
            .expect("valid fen")
            .into_position()
            .expect("valid position");
        let packed = PackedPosition::pack(&pos);
        let restored = PackedPosition::try_from_bytes(packed.as_bytes()).expect("fits");
        assert_eq!(restored, packed);
        assert_eq!(restored.unpack().expect("valid").ep_square(), Some(Square::D6));
    }

    #[test]
    fn test_inconsistent_last_move() {
        let pos = "4k3/8/8/8/4P3/8/8/4K3 b - e3 0 1"
            .parse::<Fen>()
            .expect("valid fen")
            .into_position()
            .expect("valid position");
        let packed = PackedPosition::pack(&pos);
        let mut bytes = [0; PackedPosition::MAX_BYTES];
        bytes[..packed.as_bytes().len()].copy_from_slice(packed.as_bytes());

        // Occupied squares, two bytes of pieces, moved squares, then the
        // turn and the last move e2e4.
        assert_eq!(bytes[18], 1);
        assert_eq!(&bytes[19..22], &[1, Square::E2.index(), Square::E4.index()]);

        // White cannot have made the last move if it is White to move.
        let mut white_to_move = bytes;
        white_to_move[18] = 0;
        assert_eq!(
            PackedPosition::try_from_bytes(&white_to_move)
                .expect("fits")
                .unpack(),
            Err(UnpackError::InvalidLastMove)
        );

        // Nothing arrived on e5.
        let mut empty_destination = bytes;
        empty_destination[21] = Square::E5.index();
        assert_eq!(
            PackedPosition::try_from_bytes(&empty_destination)
                .expect("fits")
                .unpack(),
            Err(UnpackError::InvalidLastMove)
        );

        assert_eq!(PackedPosition::pack(&pos).unpack(), Ok(pos));
    }

    #[test]
    fn test_invalid_bytes() {
        assert_eq!(
            PackedPosition::try_from_bytes(&[]).expect("fits").unpack(),
            Err(UnpackError::InvalidFullmoves)
        );
        assert!(PackedPosition::try_from_bytes(&[1; PackedPosition::MAX_BYTES + 1]).is_err());

        let mut bytes = [0; 20];
        bytes[7] = 1; // a single piece on a8
        bytes[8] = 7; // no such role
        assert_eq!(
            PackedPosition::try_from_bytes(&bytes).expect("fits").unpack(),
            Err(UnpackError::InvalidPiece)
        );
    }
}
